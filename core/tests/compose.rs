mod common;

use common::{tiled_project, ProjectBuilder};
use stitch_core::{compose, StitchConfig};

const RUNTIME: &str = "namespace GameJam {\n    export function init() {}\n}\n";

#[test]
fn same_tile_name_in_two_programs_stays_distinct() {
    let main = "tiles.setTileAt(loc, myTiles.apple)\n";
    let projects = vec![tiled_project("ann", "S1", main), tiled_project("bob", "S2", main)];
    let bundle = compose(&projects, RUNTIME, &StitchConfig::default()).unwrap();

    for id in ["game0_apple", "game1_apple", "game0_transparency16", "game1_transparency16"] {
        assert!(bundle.resources.contains_key(id), "missing resource {}", id);
    }
    assert_eq!(bundle.resources["*"]["namespace"], "myTiles");

    let first = bundle.file("game0.ts").unwrap();
    let second = bundle.file("game1.ts").unwrap();
    assert!(first.contains("myTiles.game0_apple") && !first.contains("game1_apple"));
    assert!(second.contains("myTiles.game1_apple") && !second.contains("game0_apple"));

    let tiles = bundle.file("tilemap.ts").unwrap();
    assert!(tiles.contains("export const game0_apple"));
    assert!(tiles.contains("export const game1_apple"));

    let catalog: serde_json::Value = serde_json::from_str(bundle.file("tilemap.jres").unwrap()).unwrap();
    assert_eq!(catalog["game1_apple"]["displayName"], "apple");
}

#[test]
fn kind_names_are_merged_once() {
    let projects = vec![
        ProjectBuilder::new("ann", "S1")
            .file(
                "main.ts",
                "namespace SpriteKind {\n    export const Coin = SpriteKind.create()\n    export const Boss = SpriteKind.create()\n}\n",
            )
            .build(),
        ProjectBuilder::new("bob", "S2")
            .file(
                "main.ts",
                "namespace SpriteKind {\n    export const Boss = SpriteKind.create()\n    export const Gem = SpriteKind.create()\n}\n",
            )
            .build(),
    ];
    let bundle = compose(&projects, RUNTIME, &StitchConfig::default()).unwrap();

    assert_eq!(bundle.kinds.sprite_kinds, vec!["Coin", "Boss", "Gem"]);
    assert_eq!(
        bundle.file("kinds.ts").unwrap(),
        "namespace SpriteKind {\n    \
         export const Coin = SpriteKind.create();\n    \
         export const Boss = SpriteKind.create();\n    \
         export const Gem = SpriteKind.create();\n\
         }\n\
         namespace StatusBarKind {\n\
         }\n"
    );
}

#[test]
fn composing_twice_gives_the_same_bundle() {
    let projects = vec![
        tiled_project("ann", "S1", "let lives = 3\n"),
        tiled_project("bob", "S2", "function go() {\n    lives = 1\n}\n"),
    ];
    let config = StitchConfig::default();
    let first = compose(&projects, RUNTIME, &config).unwrap();
    let second = compose(&projects, RUNTIME, &config).unwrap();

    assert_eq!(first.text, second.text);
    assert_eq!(first.files, second.files);
}

#[test]
fn bundle_layout_and_registration() {
    let projects = vec![
        ProjectBuilder::new("ann", "S1").file("main.ts", "game.splash(\"a\")\n").build(),
        ProjectBuilder::new("o\"neil", "S2").file("main.ts", "game.splash(\"b\")\n").build(),
    ];
    let config = StitchConfig::default();
    let bundle = compose(&projects, RUNTIME, &config).unwrap();

    let expected = ["tilemap.jres", "tilemap.ts", "kinds.ts", "lib.ts", "game0.ts", "game1.ts", "main.ts"];
    assert_eq!(bundle.files, expected);

    let manifest: serde_json::Value = serde_json::from_str(bundle.file("pxt.json").unwrap()).unwrap();
    assert_eq!(manifest["name"], config.project_name.as_str());
    assert_eq!(manifest["files"], serde_json::json!(expected));
    assert_eq!(manifest["preferredEditor"], "tsprj");

    assert_eq!(
        bundle.file("main.ts").unwrap(),
        "GameJam.registerGame(\"ann\", game0);\nGameJam.registerGame(\"o\\\"neil\", game1);\nGameJam.init();\n"
    );
    assert_eq!(bundle.file("lib.ts").unwrap(), RUNTIME);

    let wrappers: Vec<&str> = bundle.programs.iter().map(|p| p.wrapper.as_str()).collect();
    assert_eq!(wrappers, vec!["game0", "game1"]);
}

#[test]
fn dependencies_keep_builtins_and_first_version() {
    let projects = vec![
        ProjectBuilder::new("ann", "S1")
            .file("main.ts", "")
            .dependency("device", "*")
            .dependency("arcade-five-second-game-lib", "github:someone/lib")
            .build(),
        ProjectBuilder::new("bob", "S2")
            .file("main.ts", "")
            .dependency("device", "github:other/device")
            .dependency("animation", "*")
            .build(),
    ];
    let bundle = compose(&projects, RUNTIME, &StitchConfig::default()).unwrap();

    let names: Vec<&str> = bundle.dependencies.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["Color Fading", "device", "animation"]);
    assert_eq!(bundle.dependencies["device"], "*");
    assert_eq!(bundle.dependencies["Color Fading"], "github:jwunderl/pxt-color#v0.2.3");
}

#[test]
fn empty_game_list_still_initializes() {
    let bundle = compose(&[], RUNTIME, &StitchConfig::default()).unwrap();

    assert_eq!(bundle.file("main.ts").unwrap(), "GameJam.init();\n");
    assert!(bundle.programs.is_empty());
}

#[test]
fn one_bad_program_aborts_the_run() {
    let projects = vec![
        ProjectBuilder::new("ann", "S1").file("main.ts", "game.splash(\"a\")\n").build(),
        ProjectBuilder::new("bob", "S2").file("main.ts", "function f() {\n").build(),
    ];
    assert!(compose(&projects, RUNTIME, &StitchConfig::default()).is_err());
}

#[test]
fn writes_bundle_files_to_disk() {
    let projects = vec![tiled_project("ann", "S1", "game.splash(\"a\")\n")];
    let bundle = compose(&projects, RUNTIME, &StitchConfig::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("bundle");
    bundle.write_to_dir(&out).unwrap();

    for name in ["pxt.json", "tilemap.jres", "tilemap.ts", "kinds.ts", "lib.ts", "game0.ts", "main.ts"] {
        assert!(out.join(name).is_file(), "missing {}", name);
    }
    let written = std::fs::read_to_string(out.join("game0.ts")).unwrap();
    assert_eq!(written, bundle.file("game0.ts").unwrap());
}

#[test]
fn manifest_is_pretty_printed_with_four_spaces() {
    let projects = vec![ProjectBuilder::new("ann", "S1").file("main.ts", "").build()];
    let bundle = compose(&projects, RUNTIME, &StitchConfig::default()).unwrap();
    let manifest = bundle.file("pxt.json").unwrap();

    assert!(manifest.starts_with("{\n    \"name\": \"Five Second Games Redux\",\n"), "{}", manifest);
    assert!(manifest.contains("\n    \"files\": [\n        \"tilemap.jres\","));
}
