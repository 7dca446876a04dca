use std::fs;
use std::path::PathBuf;

use escapify::{Direction, EscapifyError, Side, SyncConfig, SyncController};

fn create_temp_file(name: &str, content: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("target");
    path.push("tmp");
    fs::create_dir_all(&path).expect("Failed to create tmp dir");
    path.push(name);
    fs::write(&path, content).expect("Failed to write temp file");
    path
}

#[test]
fn test_load_config_file() {
    println!("=== Config: load from file ===");

    let path = create_temp_file(
        "config_test_full.json",
        r#"{
  "initial_escaped": "\"start\\there\"",
  "initial_direction": "right_to_left",
  "resync_on_focus": true
}"#,
    );

    let config = SyncConfig::load(&path).expect("Config should load");
    assert_eq!(config.initial_escaped, r#""start\there""#);
    assert_eq!(config.initial_direction, Direction::RightToLeft);
    assert!(config.resync_on_focus);

    let mut controller = SyncController::with_config(&config);
    controller.on_focus(Side::Escaped);
    assert_eq!(controller.raw(), "start\there");

    println!("✓ Config file applied\n");
    let _ = fs::remove_file(path);
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config = SyncConfig::from_json_str(r#"{"resync_on_focus": true}"#).expect("Partial config");
    assert_eq!(config.initial_escaped, SyncConfig::default().initial_escaped);
    assert_eq!(config.initial_direction, Direction::LeftToRight);
    assert!(config.resync_on_focus);
}

#[test]
fn test_invalid_direction_rejected() {
    let err = SyncConfig::from_json_str(r#"{"initial_direction": "sideways"}"#).unwrap_err();
    match err {
        EscapifyError::Config { message } => assert!(message.starts_with("Invalid config"), "{}", message),
        other => panic!("Expected config error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_reports_path() {
    let err = SyncConfig::load("/nonexistent/escapify/config.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/escapify/config.json"), "{}", err);
}

#[test]
fn test_config_roundtrips_through_json() {
    let config = SyncConfig {
        initial_escaped: r#""x""#.to_string(),
        initial_direction: Direction::RightToLeft,
        resync_on_focus: true,
    };
    let json = serde_json::to_string(&config).expect("Config serializes");
    assert_eq!(SyncConfig::from_json_str(&json).expect("Config parses"), config);
}
