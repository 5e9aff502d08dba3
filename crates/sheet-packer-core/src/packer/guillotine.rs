use crate::model::Rect;

/// Recursive guillotine tree over a rectangular region.
///
/// Every successful insert places the rectangle at the top-left corner of a free
/// leaf and cuts the rest of that leaf into two children: a strip to the right of
/// the placed rectangle (limited to its height) and the full-width remainder below
/// it. Padding is reserved on the far side of each cut, never on the leaf's own
/// top-left edge.
///
/// Placement is first-fit, depth-first, right strip before bottom remainder. Once a
/// leaf is split its geometry never changes, so an early placement can block a later
/// rectangle even when enough total area is free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackNode {
    /// Free region, nothing placed yet.
    Leaf(Rect),
    /// A rectangle occupies the top-left of `area`; `children` hold the leftover space.
    Split {
        area: Rect,
        children: Box<[PackNode; 2]>,
    },
    /// Remainder consumed entirely by padding; never accepts a rectangle.
    Void,
}

impl PackNode {
    /// Root node over `(0, 0) .. (width, height)`.
    pub fn new(width: u32, height: u32) -> Self {
        PackNode::Leaf(Rect::from_size(width, height))
    }

    /// Reserves a `w x h` rectangle and returns where it landed, or `None` if no free
    /// leaf in this subtree is large enough.
    pub fn insert(&mut self, w: u32, h: u32, padding: u32) -> Option<Rect> {
        match self {
            PackNode::Split { children, .. } => {
                let [first, second] = &mut **children;
                first
                    .insert(w, h, padding)
                    .or_else(|| second.insert(w, h, padding))
            }
            PackNode::Leaf(area) => {
                let area = *area;
                if w > area.width() || h > area.height() {
                    return None;
                }
                let (x0, y0) = (area.x(), area.y());
                let placed_right = x0.saturating_add(w);
                let placed_bottom = y0.saturating_add(h);

                let right = Self::remainder(
                    placed_right.saturating_add(padding),
                    y0.saturating_add(padding),
                    area.right(),
                    placed_bottom,
                );
                let below = Self::remainder(
                    x0.saturating_add(padding),
                    placed_bottom.saturating_add(padding),
                    area.right(),
                    area.bottom(),
                );
                *self = PackNode::Split {
                    area,
                    children: Box::new([right, below]),
                };
                Some(Rect::new(x0, y0, placed_right, placed_bottom))
            }
            PackNode::Void => None,
        }
    }

    fn remainder(x0: u32, y0: u32, x1: u32, y1: u32) -> PackNode {
        match Rect::spanning(x0, y0, x1, y1) {
            Some(r) => PackNode::Leaf(r),
            None => PackNode::Void,
        }
    }

    /// Region covered by this node; `None` for a void remainder.
    pub fn area(&self) -> Option<Rect> {
        match self {
            PackNode::Leaf(area) | PackNode::Split { area, .. } => Some(*area),
            PackNode::Void => None,
        }
    }

    pub fn is_split(&self) -> bool {
        matches!(self, PackNode::Split { .. })
    }

    /// Free leaf regions in depth-first, right-strip-first order.
    pub fn leaves(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<Rect>) {
        match self {
            PackNode::Leaf(area) => out.push(*area),
            PackNode::Split { children, .. } => {
                for child in children.iter() {
                    child.collect_leaves(out);
                }
            }
            PackNode::Void => {}
        }
    }
}
