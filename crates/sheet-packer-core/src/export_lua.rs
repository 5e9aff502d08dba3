//! Lua sprite-sheet module in the `SheetInfo` layout understood by Corona/Solar2D
//! `graphics.newImageSheet`.
//!
//! Consumers parse this text, so the layout below (tabs, trailing commas, field and
//! table names) is kept byte for byte.

use crate::model::Placement;
use std::fmt::Write;

/// File name the Lua manifest is conventionally written to.
pub const LUA_MANIFEST_FILE: &str = "texturepack.lua";

/// Usage example emitted at the top of every module.
pub const LUA_HEADER: &str = "
-- local sheetInfo = require(\"mysheet\")
-- local myImageSheet = graphics.newImageSheet( \"mysheet.png\", sheetInfo:getSheet() )
-- local sprite = display.newSprite( myImageSheet , { frames={sheetInfo:getFrameIndex(\"sprite\")} } )
--
";

pub const LUA_TABLE_NAME: &str = "SheetInfo";
pub const LUA_WIDTH_FIELD: &str = "sheetContentWidth";
pub const LUA_HEIGHT_FIELD: &str = "sheetContentHeight";

const SPACER: &str = "\t\t\t\t\t\t\n";

const ACCESSORS: &str = "
function SheetInfo:getSheet()
  return self.sheet;
end

function SheetInfo:getFrameIndex(name)
  return self.frameIndex[name];
end

return SheetInfo
";

/// Renders the Lua module for `placements` on an `atlas_w x atlas_h` sheet.
///
/// Three parts: `sheet.frames`, one record per placement in placement order;
/// `sheetContentWidth`/`sheetContentHeight`; and `frameIndex`, mapping each sprite
/// name to its 1-based position in `frames`.
pub fn to_lua_sheet(placements: &[Placement], atlas_w: u32, atlas_h: u32) -> String {
    let mut frames = String::new();
    let mut index = String::new();
    for (i, p) in placements.iter().enumerate() {
        let _ = write!(
            frames,
            "\t\t{{\n\t\t-- {}\n\t\t  x={},\n\t\t\ty={},\n\t\t\twidth={},\n\t\t\theight={},\n\t\t}},\n",
            lua_comment(&p.sprite.name),
            p.rect.x(),
            p.rect.y(),
            p.rect.width(),
            p.rect.height(),
        );
        let _ = writeln!(index, "\t\t[\"{}\"] = {},", lua_string(&p.sprite.name), i + 1);
    }

    let mut s = String::new();
    s.push_str(LUA_HEADER);
    s.push_str(SPACER);
    let _ = writeln!(s, "local {LUA_TABLE_NAME} = {{}}");
    s.push_str(SPACER);
    let _ = write!(s, "{LUA_TABLE_NAME}.sheet =\n{{\n\tframes = {{\n");
    s.push_str(&frames);
    s.push_str("\n\t},\n");
    let _ = write!(
        s,
        "\t{LUA_WIDTH_FIELD} = {atlas_w},\n\t{LUA_HEIGHT_FIELD} = {atlas_h}\n"
    );
    s.push_str("\n}\n");
    s.push_str(SPACER);
    let _ = write!(s, "{LUA_TABLE_NAME}.frameIndex =\n{{\n");
    s.push_str(&index);
    s.push_str("\n}\n");
    s.push_str(ACCESSORS);
    s
}

fn lua_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

// Line comments end at the first newline.
fn lua_comment(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}
