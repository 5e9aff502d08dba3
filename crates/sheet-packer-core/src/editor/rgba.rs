use super::ImageEditor;
use crate::config::PackerConfig;
use crate::error::Result;
use crate::model::Rect;
use crate::ordering::InputSprite;
use image::{RgbaImage, imageops};
use std::path::PathBuf;
use tracing::{debug, info};

/// Returns the sub-rectangle of `rgba` holding every pixel with alpha > `threshold`,
/// or `None` if the image has no such pixel.
pub fn compute_trim_rect(rgba: &RgbaImage, threshold: u8) -> Option<Rect> {
    let (w, h) = rgba.dimensions();
    let opaque_col = |x: u32, ys: std::ops::Range<u32>| {
        ys.into_iter().any(|y| rgba.get_pixel(x, y)[3] > threshold)
    };
    let opaque_row = |y: u32, xs: std::ops::Range<u32>| {
        xs.into_iter().any(|x| rgba.get_pixel(x, y)[3] > threshold)
    };

    // left
    let x1 = (0..w).find(|&x| opaque_col(x, 0..h))?;
    // right
    let x2 = (x1..w).rev().find(|&x| opaque_col(x, 0..h))?;
    // top
    let y1 = (0..h).find(|&y| opaque_row(y, x1..x2 + 1))?;
    // bottom
    let y2 = (y1..h).rev().find(|&y| opaque_row(y, x1..x2 + 1))?;
    Some(Rect::new(x1, y1, x2 + 1, y2 + 1))
}

/// Exclusive right/bottom extent of the content (alpha > 0), measured from the origin.
pub fn content_extent(rgba: &RgbaImage) -> Option<(u32, u32)> {
    let mut extent: Option<(u32, u32)> = None;
    for (x, y, px) in rgba.enumerate_pixels() {
        if px[3] > 0 {
            let (ew, eh) = extent.unwrap_or((0, 0));
            extent = Some((ew.max(x + 1), eh.max(y + 1)));
        }
    }
    extent
}

/// A cropped sprite copy positioned on the canvas.
#[derive(Debug, Clone)]
pub struct PlacedLayer {
    pub image: RgbaImage,
    pub x: u32,
    pub y: u32,
}

/// RGBA working canvas: a base image plus layers placed on top of it.
#[derive(Debug, Clone)]
pub struct RgbaCanvas {
    pub base: RgbaImage,
    pub layers: Vec<PlacedLayer>,
}

impl RgbaCanvas {
    pub fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    /// Composites every layer onto a copy of the base image.
    pub fn flatten(&self) -> RgbaImage {
        let mut out = self.base.clone();
        for layer in &self.layers {
            imageops::replace(&mut out, &layer.image, layer.x as i64, layer.y as i64);
        }
        out
    }
}

/// [`ImageEditor`] backed by the `image` crate.
#[derive(Debug, Clone, Default)]
pub struct RgbaEditor {
    trim: bool,
    trim_threshold: u8,
    display_path: Option<PathBuf>,
}

impl RgbaEditor {
    pub fn new(cfg: &PackerConfig) -> Self {
        Self {
            trim: cfg.trim,
            trim_threshold: cfg.trim_threshold,
            display_path: None,
        }
    }

    /// Write the atlas as PNG to `path` when the run is displayed.
    pub fn with_display_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.display_path = Some(path.into());
        self
    }
}

impl ImageEditor for RgbaEditor {
    type Source = RgbaImage;
    type Canvas = RgbaCanvas;
    type Layer = RgbaImage;

    fn create_canvas(&mut self, width: u32, height: u32) -> Result<RgbaCanvas> {
        Ok(RgbaCanvas {
            base: RgbaImage::new(width, height),
            layers: Vec::new(),
        })
    }

    fn crop_copy(&mut self, sprite: &InputSprite<RgbaImage>) -> Result<RgbaImage> {
        if !self.trim {
            return Ok(sprite.source.clone());
        }
        // Fully transparent sprites keep their full size.
        match compute_trim_rect(&sprite.source, self.trim_threshold) {
            Some(r) => {
                debug!(
                    name = %sprite.name,
                    x = r.x(),
                    y = r.y(),
                    w = r.width(),
                    h = r.height(),
                    "trimmed"
                );
                let cropped =
                    imageops::crop_imm(&sprite.source, r.x(), r.y(), r.width(), r.height());
                Ok(cropped.to_image())
            }
            None => Ok(sprite.source.clone()),
        }
    }

    fn layer_size(&self, layer: &RgbaImage) -> (u32, u32) {
        layer.dimensions()
    }

    fn place(&mut self, canvas: &mut RgbaCanvas, layer: RgbaImage, x: u32, y: u32) -> Result<()> {
        canvas.layers.push(PlacedLayer { image: layer, x, y });
        Ok(())
    }

    fn merge_visible(&mut self, canvas: &mut RgbaCanvas) -> Result<()> {
        canvas.base = canvas.flatten();
        canvas.layers.clear();
        Ok(())
    }

    fn autocrop(&mut self, canvas: &mut RgbaCanvas) -> Result<()> {
        let flat = canvas.flatten();
        // An empty canvas is left as is.
        if let Some((w, h)) = content_extent(&flat) {
            canvas.base = imageops::crop_imm(&flat, 0, 0, w, h).to_image();
            canvas.layers.clear();
        }
        Ok(())
    }

    fn canvas_size(&self, canvas: &RgbaCanvas) -> (u32, u32) {
        canvas.dimensions()
    }

    fn display(&mut self, canvas: &RgbaCanvas) -> Result<()> {
        if let Some(path) = &self.display_path {
            canvas.flatten().save(path)?;
            info!(?path, "atlas image written");
        }
        Ok(())
    }
}
