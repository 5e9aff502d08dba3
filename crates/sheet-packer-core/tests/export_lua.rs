use sheet_packer_core::prelude::*;

fn placement(name: &str, x: u32, y: u32, w: u32, h: u32) -> Placement {
    Placement {
        rect: Rect::new(x, y, x + w, y + h),
        sprite: Sprite {
            name: name.to_string(),
            width: w,
            height: h,
        },
    }
}

#[test]
fn single_frame_module_text() {
    let lua = to_lua_sheet(&[placement("hero", 0, 0, 8, 4)], 16, 16);
    let expected = concat!(
        "\n",
        "-- local sheetInfo = require(\"mysheet\")\n",
        "-- local myImageSheet = graphics.newImageSheet( \"mysheet.png\", sheetInfo:getSheet() )\n",
        "-- local sprite = display.newSprite( myImageSheet , { frames={sheetInfo:getFrameIndex(\"sprite\")} } )\n",
        "--\n",
        "\t\t\t\t\t\t\n",
        "local SheetInfo = {}\n",
        "\t\t\t\t\t\t\n",
        "SheetInfo.sheet =\n",
        "{\n",
        "\tframes = {\n",
        "\t\t{\n",
        "\t\t-- hero\n",
        "\t\t  x=0,\n",
        "\t\t\ty=0,\n",
        "\t\t\twidth=8,\n",
        "\t\t\theight=4,\n",
        "\t\t},\n",
        "\n",
        "\t},\n",
        "\tsheetContentWidth = 16,\n",
        "\tsheetContentHeight = 16\n",
        "\n",
        "}\n",
        "\t\t\t\t\t\t\n",
        "SheetInfo.frameIndex =\n",
        "{\n",
        "\t\t[\"hero\"] = 1,\n",
        "\n",
        "}\n",
        "\n",
        "function SheetInfo:getSheet()\n",
        "  return self.sheet;\n",
        "end\n",
        "\n",
        "function SheetInfo:getFrameIndex(name)\n",
        "  return self.frameIndex[name];\n",
        "end\n",
        "\n",
        "return SheetInfo\n",
    );
    assert_eq!(lua, expected);
}

#[test]
fn frame_index_is_one_based_in_placement_order() {
    let placements = vec![
        placement("big", 0, 0, 60, 60),
        placement("mid", 60, 0, 20, 20),
        placement("small", 0, 60, 5, 5),
    ];
    let lua = to_lua_sheet(&placements, 100, 100);
    assert!(lua.contains("\t\t[\"big\"] = 1,\n\t\t[\"mid\"] = 2,\n\t\t[\"small\"] = 3,\n"));
    let frames: Vec<usize> = ["-- big\n", "-- mid\n", "-- small\n"]
        .iter()
        .map(|marker| lua.find(marker).expect("frame record"))
        .collect();
    assert!(frames.windows(2).all(|w| w[0] < w[1]));
    assert!(lua.contains("\t\t-- mid\n\t\t  x=60,\n\t\t\ty=0,\n\t\t\twidth=20,\n\t\t\theight=20,\n"));
}

#[test]
fn empty_sheet_still_has_every_section() {
    let lua = to_lua_sheet(&[], 32, 8);
    assert!(lua.contains("SheetInfo.sheet =\n{\n\tframes = {\n\n\t},\n"));
    assert!(lua.contains("\tsheetContentWidth = 32,\n\tsheetContentHeight = 8\n"));
    assert!(lua.contains("SheetInfo.frameIndex =\n{\n\n}\n"));
    assert!(lua.ends_with("return SheetInfo\n"));
}

#[test]
fn names_are_escaped_for_lua() {
    let lua = to_lua_sheet(&[placement("say \"hi\"\\\nnow", 0, 0, 1, 1)], 4, 4);
    assert!(lua.contains("\t\t[\"say \\\"hi\\\"\\\\\\nnow\"] = 1,\n"));
    assert!(lua.contains("\t\t-- say \"hi\"\\ now\n"));
}
