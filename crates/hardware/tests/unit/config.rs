//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading and validation.

use retrobus_core::common::ConfigError;
use retrobus_core::config::*;
use retrobus_core::sync::DriveOp;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.general.host_hz, 985_248);
    assert!(!config.general.trace_bus);
    assert!(config.drives.is_empty());
    assert!(config.userport.devices.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config.general.host_hz, 985_248);
    assert!(config.drives.is_empty());
}

#[test]
fn test_drive_config_defaults() {
    let config = Config::from_json(r#"{ "drives": [{ "unit": 9 }] }"#).unwrap();
    let drive = &config.drives[0];
    assert_eq!(drive.unit, 9);
    assert!(drive.enabled);
    assert_eq!(drive.clock_hz, 1_000_000);
    assert!(drive.script.is_empty());
}

#[test]
fn test_drive_script_deserialization() {
    let json = r#"{ "drives": [{ "unit": 8, "script": [{ "write": 15 }, { "idle": 3 }] }] }"#;
    let config = Config::from_json(json).unwrap();
    assert_eq!(
        config.drives[0].script,
        vec![DriveOp::Write(0x0F), DriveOp::Idle(3)]
    );
}

#[test]
fn test_drive_unit_out_of_range() {
    let err = Config::from_json(r#"{ "drives": [{ "unit": 12 }] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDriveUnit(12)));
    let err = Config::from_json(r#"{ "drives": [{ "unit": 7 }] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDriveUnit(7)));
}

#[test]
fn test_duplicate_drive_unit() {
    let err = Config::from_json(r#"{ "drives": [{ "unit": 8 }, { "unit": 8 }] }"#).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateDriveUnit(8)));
}

#[test]
fn test_unknown_resource_is_rejected() {
    let err = Config::from_json(r#"{ "userport": { "devices": ["UserportRTC"] } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownResource(ref key) if key == "UserportRTC"));
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json("{ general: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{ "general": { "trace_bus": true }, "userport": { "devices": ["UserportDAC"] } }"#)
        .unwrap();
    let config = Config::from_path(file.path()).unwrap();
    assert!(config.general.trace_bus);
    assert_eq!(config.userport.devices, vec!["UserportDAC".to_string()]);
}

#[test]
fn test_from_missing_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = Config::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { path: ref p, .. } if *p == path));
}
