//! Tests for `SculptorConfig`.

use crate::config::SculptorConfig;
use crate::error::ConfigError;

#[test]
fn default_spawn_area_matches_canvas_safe_zone() {
  let c = SculptorConfig::default();
  assert_eq!(c.spawn_range(), 50.0..450.0);
  assert_eq!(c.group_width, 300.0);
  assert!(c.model_cmd.is_none());
  assert!(c.validate().is_ok());
}

#[test]
fn load_fills_missing_fields_with_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("sculptor.json");
  std::fs::write(&path, r#"{ "model_cmd": "render --png", "spawn_max": 600 }"#).unwrap();
  let c = SculptorConfig::load(&path).unwrap();
  assert_eq!(c.model_cmd.as_deref(), Some("render --png"));
  assert_eq!(c.spawn_max, 600.0);
  assert_eq!(c.spawn_min, 50.0);
}

#[test]
fn load_missing_file_returns_io_error() {
  let dir = tempfile::tempdir().unwrap();
  let r = SculptorConfig::load(&dir.path().join("nope.json"));
  assert!(matches!(r, Err(ConfigError::Io { .. })));
}

#[test]
fn load_invalid_json_returns_parse_error() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("bad.json");
  std::fs::write(&path, "{ not json").unwrap();
  assert!(matches!(
    SculptorConfig::load(&path),
    Err(ConfigError::Parse { .. })
  ));
}

#[test]
fn load_rejects_empty_spawn_area() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("area.json");
  std::fs::write(&path, r#"{ "spawn_min": 100, "spawn_max": 100 }"#).unwrap();
  assert!(matches!(
    SculptorConfig::load(&path),
    Err(ConfigError::SpawnArea { .. })
  ));
}
