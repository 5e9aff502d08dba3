/// A sprite offered to the packer, as reported by the upstream source.
///
/// `width`/`height` are the source dimensions and drive the ordering; the size that
/// is actually packed may be smaller once the image editor crops the sprite.
#[derive(Debug, Clone)]
pub struct InputSprite<S = ()> {
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Hidden sprites never take atlas space and never reach a manifest.
    pub visible: bool,
    /// Editor-specific handle to the sprite pixels.
    pub source: S,
}

impl InputSprite<()> {
    /// A visible, size-only sprite for layout runs.
    pub fn sized(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            visible: true,
            source: (),
        }
    }
}

impl<S> InputSprite<S> {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Drops hidden sprites and orders the rest largest area first.
///
/// The sort is stable: sprites with equal area keep the order they were supplied in.
pub fn order_sprites<S>(sprites: Vec<InputSprite<S>>) -> Vec<InputSprite<S>> {
    let mut out: Vec<InputSprite<S>> = sprites.into_iter().filter(|s| s.visible).collect();
    out.sort_by(|a, b| b.area().cmp(&a.area()));
    out
}
