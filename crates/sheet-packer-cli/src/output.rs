use anyhow::Context;
use sheet_packer_core::{
    JSON_MANIFEST_FILE, LUA_MANIFEST_FILE, Placement, to_json_manifest_string, to_lua_sheet,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name of the atlas image written next to the manifests.
pub const ATLAS_IMAGE_FILE: &str = "texturepack.png";

/// Returns `requested` if it is an existing directory, otherwise the user's home
/// directory (or the current directory when no home can be determined).
pub fn resolve_output_dir(requested: Option<&Path>) -> PathBuf {
    if let Some(dir) = requested {
        if dir.is_dir() {
            return dir.to_path_buf();
        }
        warn!(requested = %dir.display(), "output directory does not exist, using home directory");
    }
    default_output_dir()
}

pub fn default_output_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes `texturepack.json` and `texturepack.lua` into `dir`.
pub fn write_manifests(
    dir: &Path,
    placements: &[Placement],
    atlas_w: u32,
    atlas_h: u32,
) -> anyhow::Result<(PathBuf, PathBuf)> {
    let json_path = dir.join(JSON_MANIFEST_FILE);
    let json = to_json_manifest_string(placements)?;
    fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;
    info!(?json_path, frames = placements.len(), "json manifest written");

    let lua_path = dir.join(LUA_MANIFEST_FILE);
    let lua = to_lua_sheet(placements, atlas_w, atlas_h);
    fs::write(&lua_path, lua).with_context(|| format!("write {}", lua_path.display()))?;
    info!(?lua_path, frames = placements.len(), "lua manifest written");

    Ok((json_path, lua_path))
}
