//! Settings files on disk.

use std::time::Duration;

use tempfile::TempDir;

use sbx_cli::settings::{Settings, TableViewSetting};
use sbx_model::AffineConstant;

#[test]
fn save_then_load_keeps_every_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut settings = Settings::default();
    settings.api.base_url = "https://sbox.example.org".to_string();
    settings.api.timeout = Duration::from_secs(5);
    settings.analysis.constant = AffineConstant::new(0x1F);
    settings.analysis.require_invertible = true;
    settings.ingest.max_upload_size = 4096;
    settings.display.table_view = TableViewSetting::Paper;
    settings.save_to(&path).unwrap();

    let loaded = Settings::load(Some(&path)).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn saved_file_is_readable_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    Settings::default().save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("[api]"), "{content}");
    assert!(content.contains("base_url = \"http://127.0.0.1:8000\""), "{content}");
    assert!(content.contains("timeout = 30"), "{content}");
    assert!(content.contains("constant = \"63\""), "{content}");
    assert!(content.contains("table_view = \"engineering\""), "{content}");
}

#[test]
fn empty_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "").unwrap();

    assert_eq!(Settings::load(Some(&path)).unwrap(), Settings::default());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"), "{err:#}");
}

#[test]
fn malformed_file_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[api\nbase_url = 1").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(err.to_string().starts_with("parse settings in"), "{err}");
}
