use sheet_packer_core::error::{Result, SheetPackerError};
use sheet_packer_core::prelude::*;

/// Editor that records every call. Sources are the post-crop sizes.
#[derive(Default)]
struct RecordingEditor {
    calls: Vec<String>,
}

#[derive(Debug)]
struct Canvas {
    width: u32,
    height: u32,
}

impl ImageEditor for RecordingEditor {
    type Source = (u32, u32);
    type Canvas = Canvas;
    type Layer = (String, u32, u32);

    fn create_canvas(&mut self, width: u32, height: u32) -> Result<Canvas> {
        self.calls.push(format!("create {width}x{height}"));
        Ok(Canvas { width, height })
    }

    fn crop_copy(&mut self, sprite: &InputSprite<(u32, u32)>) -> Result<(String, u32, u32)> {
        self.calls.push(format!("crop {}", sprite.name));
        Ok((sprite.name.clone(), sprite.source.0, sprite.source.1))
    }

    fn layer_size(&self, layer: &(String, u32, u32)) -> (u32, u32) {
        (layer.1, layer.2)
    }

    fn place(
        &mut self,
        _canvas: &mut Canvas,
        layer: (String, u32, u32),
        x: u32,
        y: u32,
    ) -> Result<()> {
        self.calls.push(format!("place {} at {x},{y}", layer.0));
        Ok(())
    }

    fn merge_visible(&mut self, _canvas: &mut Canvas) -> Result<()> {
        self.calls.push("merge".into());
        Ok(())
    }

    fn autocrop(&mut self, canvas: &mut Canvas) -> Result<()> {
        self.calls.push("autocrop".into());
        canvas.width /= 2;
        canvas.height /= 2;
        Ok(())
    }

    fn canvas_size(&self, canvas: &Canvas) -> (u32, u32) {
        (canvas.width, canvas.height)
    }

    fn display(&mut self, _canvas: &Canvas) -> Result<()> {
        self.calls.push("display".into());
        Ok(())
    }
}

fn sprite(name: &str, source: (u32, u32), cropped: (u32, u32)) -> InputSprite<(u32, u32)> {
    InputSprite {
        name: name.to_string(),
        width: source.0,
        height: source.1,
        visible: true,
        source: cropped,
    }
}

#[test]
fn complete_run_call_sequence() {
    let cfg = PackerConfig::builder()
        .with_max_dimensions(64, 64)
        .padding(0)
        .autocrop(true)
        .build();
    let mut editor = RecordingEditor::default();
    let sprites = vec![sprite("s", (4, 4), (4, 4)), sprite("l", (20, 20), (10, 10))];
    let run = pack_sprites(&mut editor, sprites, &cfg).expect("pack");
    assert_eq!(
        editor.calls,
        vec![
            "create 64x64",
            "crop l",
            "place l at 0,0",
            "crop s",
            "place s at 10,0",
            "merge",
            "autocrop",
            "display",
        ]
    );
    // atlas size is read back after autocrop
    assert_eq!((run.width, run.height), (32, 32));
    // packed size is the cropped size
    assert_eq!(run.placements()[0].rect, Rect::new(0, 0, 10, 10));
}

#[test]
fn ordering_uses_source_size_not_cropped_size() {
    let cfg = PackerConfig::builder()
        .with_max_dimensions(64, 64)
        .padding(0)
        .build();
    let mut editor = RecordingEditor::default();
    let sprites = vec![
        sprite("small_source", (10, 10), (10, 10)),
        sprite("big_source", (30, 30), (2, 2)),
    ];
    let run = pack_sprites(&mut editor, sprites, &cfg).expect("pack");
    let names: Vec<&str> = run
        .placements()
        .iter()
        .map(|p| p.sprite.name.as_str())
        .collect();
    assert_eq!(names, vec!["big_source", "small_source"]);
    assert!(!editor.calls.contains(&"autocrop".to_string()));
}

#[test]
fn partial_run_skips_merge_but_still_displays() {
    let cfg = PackerConfig::builder()
        .with_max_dimensions(10, 10)
        .padding(0)
        .autocrop(true)
        .build();
    let mut editor = RecordingEditor::default();
    let sprites = vec![
        sprite("a", (8, 8), (8, 8)),
        sprite("b", (6, 6), (6, 6)),
        sprite("c", (1, 1), (1, 1)),
    ];
    let run = pack_sprites(&mut editor, sprites, &cfg).expect("pack");
    assert_eq!(
        editor.calls,
        vec!["create 10x10", "crop a", "place a at 0,0", "crop b", "display"]
    );
    assert_eq!((run.width, run.height), (10, 10));
    match run.outcome {
        PackOutcome::Partial {
            failed_index,
            ref failed_name,
            ..
        } => {
            assert_eq!(failed_index, 1);
            assert_eq!(failed_name, "b");
        }
        PackOutcome::Complete { .. } => panic!("expected a partial outcome"),
    }
}

#[test]
fn invalid_config_fails_before_any_editor_call() {
    let cfg = PackerConfig::builder().with_max_dimensions(0, 64).build();
    let mut editor = RecordingEditor::default();
    let err = pack_sprites(&mut editor, vec![sprite("a", (1, 1), (1, 1))], &cfg)
        .expect_err("zero width");
    assert!(matches!(
        err,
        SheetPackerError::InvalidDimensions {
            width: 0,
            height: 64
        }
    ));
    assert!(editor.calls.is_empty());
}

#[test]
fn editor_errors_propagate() {
    struct FailingEditor;
    impl ImageEditor for FailingEditor {
        type Source = ();
        type Canvas = ();
        type Layer = ();
        fn create_canvas(&mut self, _: u32, _: u32) -> Result<()> {
            Ok(())
        }
        fn crop_copy(&mut self, sprite: &InputSprite<()>) -> Result<()> {
            Err(SheetPackerError::InvalidInput(format!("cannot read {}", sprite.name)))
        }
        fn layer_size(&self, _: &()) -> (u32, u32) {
            (0, 0)
        }
        fn place(&mut self, _: &mut (), _: (), _: u32, _: u32) -> Result<()> {
            Ok(())
        }
        fn merge_visible(&mut self, _: &mut ()) -> Result<()> {
            Ok(())
        }
        fn autocrop(&mut self, _: &mut ()) -> Result<()> {
            Ok(())
        }
        fn canvas_size(&self, _: &()) -> (u32, u32) {
            (0, 0)
        }
        fn display(&mut self, _: &()) -> Result<()> {
            Ok(())
        }
    }

    let err = pack_sprites(
        &mut FailingEditor,
        vec![InputSprite::sized("broken", 4, 4)],
        &PackerConfig::default(),
    )
    .expect_err("crop failure");
    assert!(matches!(err, SheetPackerError::InvalidInput(msg) if msg.contains("broken")));
}
