use sheet_packer_core::prelude::*;

fn names<S>(sprites: &[InputSprite<S>]) -> Vec<&str> {
    sprites.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn largest_area_first() {
    let ordered = order_sprites(vec![
        InputSprite::sized("small", 10, 10),
        InputSprite::sized("large", 60, 60),
        InputSprite::sized("wide", 100, 20),
    ]);
    assert_eq!(names(&ordered), vec!["large", "wide", "small"]);
}

#[test]
fn equal_areas_keep_input_order() {
    let ordered = order_sprites(vec![
        InputSprite::sized("b", 20, 5),
        InputSprite::sized("a", 10, 10),
        InputSprite::sized("big", 50, 50),
        InputSprite::sized("c", 5, 20),
    ]);
    assert_eq!(names(&ordered), vec!["big", "b", "a", "c"]);
}

#[test]
fn hidden_sprites_are_dropped() {
    let mut hidden = InputSprite::sized("hidden", 200, 200);
    hidden.visible = false;
    let ordered = order_sprites(vec![
        InputSprite::sized("x", 4, 4),
        hidden,
        InputSprite::sized("y", 8, 8),
    ]);
    assert_eq!(names(&ordered), vec!["y", "x"]);
}

#[test]
fn area_does_not_overflow_u32() {
    let ordered = order_sprites(vec![
        InputSprite::sized("small", 2, 2),
        InputSprite::sized("huge", 100_000, 100_000),
    ]);
    assert_eq!(names(&ordered), vec!["huge", "small"]);
}

#[test]
fn placements_follow_the_ordering() {
    let sprites = vec![
        InputSprite::sized("d", 8, 8),
        InputSprite::sized("a", 16, 16),
        InputSprite::sized("b", 4, 16),
        InputSprite::sized("c", 16, 4),
    ];
    let cfg = PackerConfig::builder()
        .with_max_dimensions(64, 64)
        .padding(0)
        .build();
    let run = pack_layout(sprites, &cfg).expect("layout");
    assert!(run.outcome.is_complete());
    let placed: Vec<&str> = run
        .placements()
        .iter()
        .map(|p| p.sprite.name.as_str())
        .collect();
    // equal areas (d, b, c) keep their input order behind the largest sprite
    assert_eq!(placed, vec!["a", "d", "b", "c"]);
}

#[test]
fn hidden_sprites_never_reach_the_manifest() {
    let mut hidden = InputSprite::sized("ghost", 8, 8);
    hidden.visible = false;
    let sprites = vec![InputSprite::sized("hero", 8, 8), hidden];
    let cfg = PackerConfig::builder().with_max_dimensions(32, 32).build();
    let run = pack_layout(sprites, &cfg).expect("layout");
    assert_eq!(run.total, 1);
    let json = to_json_manifest(run.placements());
    assert!(json.get("ghost").is_none());
    assert!(!to_lua_sheet(run.placements(), run.width, run.height).contains("ghost"));
}
