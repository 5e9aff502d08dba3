//! Core library for packing sprites into a single sprite-sheet atlas.
//!
//! - Algorithm: recursive guillotine tree (`PackNode`), first-fit, largest sprites first
//! - Pipeline: `pack_sprites` drives an [`ImageEditor`] (crop, place, merge, autocrop,
//!   display); `pack_layout` packs sizes only
//! - Manifests: JSON hash (`to_json_manifest`) and Lua `SheetInfo` module (`to_lua_sheet`)
//!
//! Quick example:
//! ```ignore
//! use sheet_packer_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let sprites = vec![
//!     InputSprite::sized("hero", 60, 60),
//!     InputSprite::sized("coin", 10, 10),
//! ];
//! let cfg = PackerConfig::builder().with_max_dimensions(128, 128).padding(2).build();
//! let run = pack_layout(sprites, &cfg)?;
//! run.ensure_complete()?;
//! println!("{}", to_lua_sheet(run.placements(), run.width, run.height));
//! # Ok(()) }
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod export_lua;
pub mod model;
pub mod ordering;
pub mod packer;
pub mod pipeline;

pub use config::*;
pub use editor::*;
pub use error::*;
pub use export::*;
pub use export_lua::*;
pub use model::*;
pub use ordering::*;
pub use packer::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `sheet_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{OverflowPolicy, PackerConfig, PackerConfigBuilder};
    pub use crate::editor::{CroppedLayoutEditor, ImageEditor, LayoutEditor};
    #[cfg(feature = "image")]
    pub use crate::editor::{RgbaCanvas, RgbaEditor};
    pub use crate::model::{PackStats, Placement, Rect, Sprite};
    pub use crate::ordering::{InputSprite, order_sprites};
    pub use crate::packer::PackNode;
    pub use crate::{
        PackLayout, PackOutcome, PackRun, pack_cropped_layout, pack_layout, pack_sprites,
        parse_json_manifest, to_json_manifest, to_json_manifest_string, to_lua_sheet,
    };
}
