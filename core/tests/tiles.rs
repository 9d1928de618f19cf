mod common;

use common::{TILEMAP, TILEMAP_JRES};
use stitch_core::transform::rename_tiles;
use stitch_core::transform::tiles::{replace_identifier, tile_id};

fn resources() -> serde_json::Map<String, serde_json::Value> {
    match serde_json::from_str(TILEMAP_JRES).unwrap() {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[test]
fn renames_every_declared_tile() {
    let resources = resources();
    let renamed = rename_tiles(TILEMAP, 1, Some(&resources));

    let ids: Vec<(&str, &str)> = renamed
        .records
        .iter()
        .map(|t| (t.old_id.as_str(), t.new_id.as_str()))
        .collect();
    assert_eq!(ids, vec![("transparency16", "game1_transparency16"), ("apple", "game1_apple")]);
    assert_eq!(renamed.records[1].payload, resources.get("apple").cloned());

    assert!(renamed.declarations.contains("namespace myTiles {\n"));
    assert!(renamed.declarations.contains("    export const game1_apple = image.ofBuffer(hex``);\n"));
    assert!(!renamed.declarations.contains("export const apple"));
    assert!(renamed.declarations.ends_with("\n}\n"));
}

#[test]
fn helpers_point_at_new_ids() {
    let renamed = rename_tiles(TILEMAP, 0, Some(&resources()));

    assert!(renamed.helpers.starts_with("    helpers._registerFactory(\"tilemap\""));
    assert!(renamed.helpers.contains("[myTiles.game0_transparency16,myTiles.game0_apple]"));
    assert!(renamed.helpers.contains("case \"apple\":return myTiles.game0_apple;"));
    assert!(!renamed.helpers.contains("return apple;"));
    assert!(!renamed.helpers.contains("Auto-generated"));
    assert!(renamed.helpers.lines().all(|l| !l.starts_with('}')));
}

#[test]
fn same_tile_in_two_programs_gets_two_ids() {
    let resources = resources();
    let first = rename_tiles(TILEMAP, 0, Some(&resources));
    let second = rename_tiles(TILEMAP, 1, Some(&resources));

    assert_eq!(first.records[1].new_id, "game0_apple");
    assert_eq!(second.records[1].new_id, "game1_apple");
    assert_eq!(tile_id(7, "apple"), "game7_apple");
}

#[test]
fn missing_payload_is_left_out_of_the_catalog() {
    let mut resources = resources();
    resources.remove("apple");
    let renamed = rename_tiles(TILEMAP, 0, Some(&resources));

    assert_eq!(renamed.records.len(), 2);
    assert!(renamed.records[1].payload.is_none());
    let ids: Vec<&str> = renamed.catalog_entries().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["game0_transparency16"]);
}

#[test]
fn module_without_marker_has_no_helpers() {
    let text = "namespace myTiles {\n    export const grass = image.ofBuffer(hex``);\n}\n";
    let renamed = rename_tiles(text, 2, None);

    assert_eq!(renamed.records.len(), 1);
    assert_eq!(renamed.records[0].new_id, "game2_grass");
    assert!(renamed.helpers.is_empty());
    assert!(renamed.declarations.contains("export const game2_grass"));
}

#[test]
fn replacement_respects_identifier_boundaries() {
    let text = "myTiles.tile1, myTiles.tile10, notmyTiles.tile1";
    let replaced = replace_identifier(text, "myTiles.tile1", "myTiles.game0_tile1");

    assert_eq!(replaced, "myTiles.game0_tile1, myTiles.tile10, notmyTiles.tile1");
}

#[test]
fn rewrites_references_in_other_files() {
    let renamed = rename_tiles(TILEMAP, 3, Some(&resources()));
    let main = "tiles.setTileAt(loc, myTiles.apple)\nlet applesauce = myTiles.applesauce\n";

    assert_eq!(
        renamed.rewrite_references(main),
        "tiles.setTileAt(loc, myTiles.game3_apple)\nlet applesauce = myTiles.applesauce\n"
    );
}
