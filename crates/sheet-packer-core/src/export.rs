use crate::error::{Result, SheetPackerError};
use crate::model::Placement;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

/// File name the JSON manifest is conventionally written to.
pub const JSON_MANIFEST_FILE: &str = "texturepack.json";

/// One entry of the JSON manifest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestFrame {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl From<&Placement> for ManifestFrame {
    fn from(p: &Placement) -> Self {
        Self {
            x: p.rect.x(),
            y: p.rect.y(),
            width: p.rect.width(),
            height: p.rect.height(),
        }
    }
}

/// Frames keyed by sprite name.
/// Shape: `{ name: { x, y, width, height } }`.
pub fn to_json_manifest(placements: &[Placement]) -> Value {
    let mut frames = Map::new();
    for p in placements {
        let f = ManifestFrame::from(p);
        frames.insert(
            p.sprite.name.clone(),
            json!({"x": f.x, "y": f.y, "width": f.width, "height": f.height}),
        );
    }
    Value::Object(frames)
}

/// Compact JSON text of [`to_json_manifest`].
pub fn to_json_manifest_string(placements: &[Placement]) -> Result<String> {
    serde_json::to_string(&to_json_manifest(placements))
        .map_err(|e| SheetPackerError::Encode(e.to_string()))
}

/// Parses a JSON manifest back into frames keyed by sprite name.
pub fn parse_json_manifest(text: &str) -> Result<BTreeMap<String, ManifestFrame>> {
    serde_json::from_str(text).map_err(|e| SheetPackerError::InvalidInput(e.to_string()))
}
