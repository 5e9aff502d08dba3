use crate::config::{OverflowPolicy, PackerConfig};
use crate::editor::{CroppedLayoutEditor, ImageEditor, LayoutCanvas, LayoutEditor};
use crate::error::{Result, SheetPackerError};
use crate::model::{PackStats, Placement, Sprite};
use crate::ordering::{InputSprite, order_sprites};
use crate::packer::PackNode;
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// Result of the packing loop.
///
/// The loop stops at the first sprite that does not fit, so a `Partial` outcome holds
/// every placement made before that sprite and nothing after it.
#[derive(Debug, Clone, PartialEq)]
pub enum PackOutcome {
    Complete {
        placements: Vec<Placement>,
    },
    Partial {
        placements: Vec<Placement>,
        /// Position of the failing sprite in the ordered sequence.
        failed_index: usize,
        failed_name: String,
    },
}

impl PackOutcome {
    pub fn placements(&self) -> &[Placement] {
        match self {
            PackOutcome::Complete { placements } | PackOutcome::Partial { placements, .. } => {
                placements
            }
        }
    }

    pub fn into_placements(self) -> Vec<Placement> {
        match self {
            PackOutcome::Complete { placements } | PackOutcome::Partial { placements, .. } => {
                placements
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, PackOutcome::Complete { .. })
    }
}

/// Output of a packing run: the outcome, the editor's canvas and the final atlas size.
#[derive(Debug)]
pub struct PackRun<C> {
    pub outcome: PackOutcome,
    pub canvas: C,
    /// Atlas width after the optional autocrop.
    pub width: u32,
    /// Atlas height after the optional autocrop.
    pub height: u32,
    /// Number of visible sprites offered to the packer.
    pub total: usize,
}

/// Layout-only run (no pixel data).
pub type PackLayout = PackRun<LayoutCanvas>;

impl<C> PackRun<C> {
    pub fn placements(&self) -> &[Placement] {
        self.outcome.placements()
    }

    /// Computes packing statistics for this run.
    pub fn stats(&self) -> PackStats {
        PackStats::compute(self.placements(), self.total, self.width, self.height)
    }

    /// Errors with `OutOfSpace` unless every sprite was placed.
    pub fn ensure_complete(&self) -> Result<()> {
        match &self.outcome {
            PackOutcome::Complete { .. } => Ok(()),
            PackOutcome::Partial {
                placements,
                failed_name,
                ..
            } => Err(SheetPackerError::OutOfSpace {
                placed: placements.len(),
                total: self.total,
                name: failed_name.clone(),
            }),
        }
    }

    /// Applies the overflow policy: `Abort` behaves like `ensure_complete`,
    /// `EmitPartial` accepts whatever was placed.
    pub fn accept(&self, policy: OverflowPolicy) -> Result<()> {
        match policy {
            OverflowPolicy::Abort => self.ensure_complete(),
            OverflowPolicy::EmitPartial => Ok(()),
        }
    }
}

/// Packs `sprites` into one atlas of at most `max_width x max_height`, delegating
/// crop, placement, merge, autocrop and display to `editor`.
///
/// Notes:
/// - Hidden sprites are dropped; the rest are offered largest area first (stable).
/// - The first sprite that does not fit stops the loop; earlier placements are kept
///   and still positioned on the canvas, but the canvas is only merged (and
///   autocropped) when every sprite fit.
/// - The canvas is handed to `editor.display` whether or not the pack was complete.
/// - No visible sprite at all is an error (`Empty`), not an empty atlas.
/// - Two visible sprites with the same name are rejected (`DuplicateName`).
#[instrument(skip_all, fields(sprites = sprites.len()))]
pub fn pack_sprites<E: ImageEditor>(
    editor: &mut E,
    sprites: Vec<InputSprite<E::Source>>,
    cfg: &PackerConfig,
) -> Result<PackRun<E::Canvas>> {
    cfg.validate()?;
    let ordered = prepare_sprites(sprites)?;
    let total = ordered.len();

    let mut canvas = editor.create_canvas(cfg.max_width, cfg.max_height)?;
    let mut tree = PackNode::new(cfg.max_width, cfg.max_height);
    let mut placements: Vec<Placement> = Vec::with_capacity(total);
    let mut failed: Option<(usize, String)> = None;

    for (idx, sprite) in ordered.iter().enumerate() {
        let layer = editor.crop_copy(sprite)?;
        let (w, h) = editor.layer_size(&layer);
        let Some(rect) = tree.insert(w, h, cfg.padding) else {
            warn!(
                name = %sprite.name,
                w,
                h,
                placed = placements.len(),
                total,
                "sprite does not fit, stopping"
            );
            failed = Some((idx, sprite.name.clone()));
            break;
        };
        debug!(name = %sprite.name, x = rect.x(), y = rect.y(), w, h, "placed");
        editor.place(&mut canvas, layer, rect.x(), rect.y())?;
        placements.push(Placement {
            rect,
            sprite: Sprite {
                name: sprite.name.clone(),
                width: w,
                height: h,
            },
        });
    }

    let outcome = match failed {
        None => PackOutcome::Complete { placements },
        Some((failed_index, failed_name)) => PackOutcome::Partial {
            placements,
            failed_index,
            failed_name,
        },
    };

    if outcome.is_complete() {
        editor.merge_visible(&mut canvas)?;
        if cfg.autocrop {
            editor.autocrop(&mut canvas)?;
        }
    }

    let (width, height) = editor.canvas_size(&canvas);
    editor.display(&canvas)?;
    info!(
        placed = outcome.placements().len(),
        total,
        width,
        height,
        complete = outcome.is_complete(),
        "pack finished"
    );
    Ok(PackRun {
        outcome,
        canvas,
        width,
        height,
        total,
    })
}

/// Packs sizes only; no pixels are touched. Sprite sizes are used as given and the
/// atlas is `max_width x max_height` unless `autocrop` shrinks it to the placed extent.
pub fn pack_layout(sprites: Vec<InputSprite>, cfg: &PackerConfig) -> Result<PackLayout> {
    pack_sprites(&mut LayoutEditor, sprites, cfg)
}

/// Layout-only run for sprites whose packed (cropped) size is carried in `source`.
/// Ordering still uses `width`/`height`, the source size.
pub fn pack_cropped_layout(
    sprites: Vec<InputSprite<(u32, u32)>>,
    cfg: &PackerConfig,
) -> Result<PackLayout> {
    pack_sprites(&mut CroppedLayoutEditor, sprites, cfg)
}

/// Rejects empty or ambiguous inputs and applies the ordering policy.
fn prepare_sprites<S>(sprites: Vec<InputSprite<S>>) -> Result<Vec<InputSprite<S>>> {
    let ordered = order_sprites(sprites);
    if ordered.is_empty() {
        return Err(SheetPackerError::Empty);
    }
    {
        let mut seen: HashSet<&str> = HashSet::with_capacity(ordered.len());
        for s in &ordered {
            if !seen.insert(s.name.as_str()) {
                return Err(SheetPackerError::DuplicateName(s.name.clone()));
            }
        }
    }
    Ok(ordered)
}
