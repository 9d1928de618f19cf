use stitch_core::error::ConfigError;
use stitch_core::{generate_error_report, GameList, Level, Location, StitchConfig, StitchErrorExt};

#[test]
fn defaults_are_valid() {
    let config = StitchConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.project_name, "Five Second Games Redux");
    assert_eq!(config.builtin_dependencies["Color Fading"], "github:jwunderl/pxt-color#v0.2.3");
    assert!(config.excluded_dependencies.iter().any(|d| d == "arcade-five-second-game-lib"));
}

#[test]
fn partial_config_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stitch.json");
    std::fs::write(&path, r#"{"project_name": "Winter Jam", "versions": {"target": "1.13.0"}}"#).unwrap();

    let config = StitchConfig::resolve(Some(path.as_path())).unwrap();
    let defaults = StitchConfig::default();
    assert_eq!(config.project_name, "Winter Jam");
    assert_eq!(config.versions.target, "1.13.0");
    assert_eq!(config.versions.pxt, defaults.versions.pxt);
    assert_eq!(config.api_root, defaults.api_root);
}

#[test]
fn invalid_config_files_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let empty_name = dir.path().join("empty.json");
    std::fs::write(&empty_name, r#"{"project_name": "  "}"#).unwrap();
    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();

    assert!(StitchConfig::load_from_file(&empty_name).is_err());
    let err = StitchConfig::load_from_file(&broken).unwrap_err();
    assert_eq!(err.location().unwrap().file, broken.display().to_string());
    assert!(StitchConfig::load_from_file(dir.path().join("absent.json")).is_err());
}

#[test]
fn project_id_strips_share_prefix() {
    let config = StitchConfig::default();

    assert_eq!(config.project_id("https://arcade.makecode.com/_abc123"), "_abc123");
    assert_eq!(config.project_id("_abc123"), "_abc123");
}

#[test]
fn loads_game_list() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.json");
    std::fs::write(
        &path,
        r#"{"games": [{"url": "https://arcade.makecode.com/S1", "author": "ann"}, {"url": "S2", "author": "bob"}]}"#,
    )
    .unwrap();

    let list = GameList::load_from_file(&path).unwrap();
    let authors: Vec<&str> = list.games.iter().map(|g| g.author.as_str()).collect();
    assert_eq!(authors, vec!["ann", "bob"]);
    assert!(GameList::load_from_file(dir.path().join("absent.json")).is_err());
}

#[test]
fn error_report_names_level_and_location() {
    let err = ConfigError::in_file("bad value".into(), "test".into(), "stitch.json");
    assert_eq!(generate_error_report(&err), "STITCH | ERROR | stitch.json:0:0 | bad value");

    let err = ConfigError::new("no file".into(), "test".into());
    assert_eq!(generate_error_report(&err), "STITCH | ERROR | unknown location | no file");
}

#[test]
fn offsets_resolve_to_line_and_column() {
    let text = "let a = 1\nlet bc = 2\n";
    let location = Location::from_offset("main.ts", text, 14);

    assert_eq!(location, Location::new("main.ts".to_string(), 2, 5));
    assert_eq!(Location::from_offset("main.ts", text, 999).line, 3);
}

#[test]
fn boxed_errors_render_on_one_line() {
    let err: Box<dyn StitchErrorExt> = ConfigError::in_file("bad value".into(), "stitch.config".into(), "stitch.json").into();

    assert_eq!(
        format!("{}", err),
        "STITCH | ERROR | stitch.json:0:0 | stitch.config | span:none | bad value"
    );
    assert_eq!(format!("{:?}", err), format!("{}", err));
    assert_eq!(Level::Critical.label(), "CRITICAL");
    assert!(Level::Critical > Level::Warning);
}
