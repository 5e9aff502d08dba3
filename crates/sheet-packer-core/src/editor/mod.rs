//! The image-editing collaborator used by the packing pipeline.
//!
//! The pipeline decides *where* sprites go; an [`ImageEditor`] owns the pixels. It
//! produces a cropped copy of each sprite, positions copies on a working canvas,
//! merges and trims the canvas and finally presents it.

use crate::error::Result;
use crate::ordering::InputSprite;

#[cfg(feature = "image")]
mod rgba;
#[cfg(feature = "image")]
pub use rgba::{PlacedLayer, RgbaCanvas, RgbaEditor, compute_trim_rect, content_extent};

/// Capabilities the packing pipeline needs from an image editor.
///
/// Calls are strictly sequential: `create_canvas`, then `crop_copy`/`place` per
/// sprite, then `merge_visible`/`autocrop` on a complete pack, then `display`.
pub trait ImageEditor {
    /// Handle to a sprite's source pixels.
    type Source;
    /// Working canvas the atlas is assembled on.
    type Canvas;
    /// A cropped copy of one sprite, not yet positioned.
    type Layer;

    fn create_canvas(&mut self, width: u32, height: u32) -> Result<Self::Canvas>;
    /// Copies `sprite` cropped to its opaque bounds.
    fn crop_copy(&mut self, sprite: &InputSprite<Self::Source>) -> Result<Self::Layer>;
    fn layer_size(&self, layer: &Self::Layer) -> (u32, u32);
    /// Positions `layer` with its top-left corner at `(x, y)`.
    fn place(
        &mut self,
        canvas: &mut Self::Canvas,
        layer: Self::Layer,
        x: u32,
        y: u32,
    ) -> Result<()>;
    /// Flattens all placed layers into one.
    fn merge_visible(&mut self, canvas: &mut Self::Canvas) -> Result<()>;
    /// Trims the canvas to its content. Placements are origin-relative, so only the
    /// right and bottom edges may move.
    fn autocrop(&mut self, canvas: &mut Self::Canvas) -> Result<()>;
    fn canvas_size(&self, canvas: &Self::Canvas) -> (u32, u32);
    fn display(&mut self, canvas: &Self::Canvas) -> Result<()>;
}

/// Size-only canvas used by [`LayoutEditor`] and [`CroppedLayoutEditor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutCanvas {
    pub width: u32,
    pub height: u32,
    /// Exclusive right/bottom extent of everything placed so far.
    pub extent: (u32, u32),
}

impl LayoutCanvas {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            extent: (0, 0),
        }
    }

    fn grow(&mut self, (w, h): (u32, u32), x: u32, y: u32) {
        self.extent.0 = self.extent.0.max(x.saturating_add(w));
        self.extent.1 = self.extent.1.max(y.saturating_add(h));
    }

    fn crop_to_extent(&mut self) {
        self.width = self.extent.0;
        self.height = self.extent.1;
    }
}

/// Editor for layout-only runs: sprites are taken at their given size and nothing
/// is drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEditor;

impl ImageEditor for LayoutEditor {
    type Source = ();
    type Canvas = LayoutCanvas;
    type Layer = (u32, u32);

    fn create_canvas(&mut self, width: u32, height: u32) -> Result<LayoutCanvas> {
        Ok(LayoutCanvas::new(width, height))
    }

    fn crop_copy(&mut self, sprite: &InputSprite<()>) -> Result<(u32, u32)> {
        Ok((sprite.width, sprite.height))
    }

    fn layer_size(&self, layer: &(u32, u32)) -> (u32, u32) {
        *layer
    }

    fn place(
        &mut self,
        canvas: &mut LayoutCanvas,
        layer: (u32, u32),
        x: u32,
        y: u32,
    ) -> Result<()> {
        canvas.grow(layer, x, y);
        Ok(())
    }

    fn merge_visible(&mut self, _canvas: &mut LayoutCanvas) -> Result<()> {
        Ok(())
    }

    fn autocrop(&mut self, canvas: &mut LayoutCanvas) -> Result<()> {
        canvas.crop_to_extent();
        Ok(())
    }

    fn canvas_size(&self, canvas: &LayoutCanvas) -> (u32, u32) {
        (canvas.width, canvas.height)
    }

    fn display(&mut self, _canvas: &LayoutCanvas) -> Result<()> {
        Ok(())
    }
}

/// Layout-only editor for sprites whose cropped size is already known.
///
/// The sprite's `width`/`height` stay the source size (used for ordering) and
/// `source` carries the size it is packed at, so a layout run places sprites exactly
/// where a pixel run over the same images would.
#[derive(Debug, Clone, Copy, Default)]
pub struct CroppedLayoutEditor;

impl ImageEditor for CroppedLayoutEditor {
    type Source = (u32, u32);
    type Canvas = LayoutCanvas;
    type Layer = (u32, u32);

    fn create_canvas(&mut self, width: u32, height: u32) -> Result<LayoutCanvas> {
        Ok(LayoutCanvas::new(width, height))
    }

    fn crop_copy(&mut self, sprite: &InputSprite<(u32, u32)>) -> Result<(u32, u32)> {
        Ok(sprite.source)
    }

    fn layer_size(&self, layer: &(u32, u32)) -> (u32, u32) {
        *layer
    }

    fn place(
        &mut self,
        canvas: &mut LayoutCanvas,
        layer: (u32, u32),
        x: u32,
        y: u32,
    ) -> Result<()> {
        canvas.grow(layer, x, y);
        Ok(())
    }

    fn merge_visible(&mut self, _canvas: &mut LayoutCanvas) -> Result<()> {
        Ok(())
    }

    fn autocrop(&mut self, canvas: &mut LayoutCanvas) -> Result<()> {
        canvas.crop_to_extent();
        Ok(())
    }

    fn canvas_size(&self, canvas: &LayoutCanvas) -> (u32, u32) {
        (canvas.width, canvas.height)
    }

    fn display(&mut self, _canvas: &LayoutCanvas) -> Result<()> {
        Ok(())
    }
}
