use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels) stored as bounds: `(x0, y0)` is the top-left
/// corner, `(x1, y1)` the exclusive bottom-right corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl Rect {
    /// Builds a rectangle from its bounds. Inverted bounds are clamped to an empty span.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        }
    }

    /// Returns `None` when the bounds are inverted (`x0 > x1` or `y0 > y1`).
    pub fn spanning(x0: u32, y0: u32, x1: u32, y1: u32) -> Option<Self> {
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some(Self { x0, y0, x1, y1 })
    }

    /// Rectangle of the given size anchored at the origin.
    pub fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn x(&self) -> u32 {
        self.x0
    }
    pub fn y(&self) -> u32 {
        self.y0
    }
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
    /// Exclusive right edge (`x + width`).
    pub fn right(&self) -> u32 {
        self.x1
    }
    /// Exclusive bottom edge (`y + height`).
    pub fn bottom(&self) -> u32 {
        self.y1
    }
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Returns true if `r` lies fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x0 >= self.x0 && r.y0 >= self.y0 && r.x1 <= self.x1 && r.y1 <= self.y1
    }

    /// Returns true if the interiors of both rectangles share at least one pixel.
    pub fn intersects(&self, r: &Rect) -> bool {
        self.x0 < r.x1 && r.x0 < self.x1 && self.y0 < r.y1 && r.y0 < self.y1
    }
}

/// A named sprite with its packed (post-crop) size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sprite {
    /// Unique key used as the lookup name in both manifests.
    pub name: String,
    pub width: u32,
    pub height: u32,
}

/// A sprite placed into the atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    /// Placed rectangle within the atlas.
    pub rect: Rect,
    pub sprite: Sprite,
}

/// Statistics about one packing run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Number of sprites placed.
    pub placed: usize,
    /// Number of visible sprites offered to the packer.
    pub total: usize,
    /// Area of the final atlas (width * height).
    pub atlas_area: u64,
    /// Sum of placed rectangle areas.
    pub used_area: u64,
    /// used_area / atlas_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl PackStats {
    pub fn compute(placements: &[Placement], total: usize, atlas_w: u32, atlas_h: u32) -> Self {
        let atlas_area = atlas_w as u64 * atlas_h as u64;
        let used_area: u64 = placements.iter().map(|p| p.rect.area()).sum();
        let occupancy = if atlas_area > 0 {
            used_area as f64 / atlas_area as f64
        } else {
            0.0
        };
        Self {
            placed: placements.len(),
            total,
            atlas_area,
            used_area,
            occupancy,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Placed: {}/{}, Occupancy: {:.2}%, Atlas Area: {} px², Used Area: {} px²",
            self.placed,
            self.total,
            self.occupancy * 100.0,
            self.atlas_area,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.atlas_area.saturating_sub(self.used_area)
    }

    /// Returns wasted space as a percentage (0.0 to 100.0).
    pub fn waste_percentage(&self) -> f64 {
        if self.atlas_area > 0 {
            (self.wasted_area() as f64 / self.atlas_area as f64) * 100.0
        } else {
            0.0
        }
    }
}
