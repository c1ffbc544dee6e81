use photolayouts_core::{JoinStyle, Rgba};
use photolayouts_settings::{EditorConfig, SettingsError};
use tempfile::TempDir;

fn customized() -> EditorConfig {
    let mut config = EditorConfig::default();
    config.history.undo_limit = 10;
    config.border.width = 4.0;
    config.border.color = Rgba::rgb(10, 20, 30);
    config.border.join_style = JoinStyle::Bevel;
    config.canvas.width = 1920.0;
    config.canvas.height = 1080.0;
    config
}

#[test]
fn test_json_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"#0a141eff\""));
}

#[test]
fn test_toml_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_invalid_file_is_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[canvas]\nwidth = -10.0\nheight = 100.0\n").unwrap();

    let err = EditorConfig::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Config(_)));
}

#[test]
fn test_invalid_config_is_not_saved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = EditorConfig::default();
    config.border.width = f64::NAN;
    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_load_or_default_falls_back() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.toml");
    assert_eq!(EditorConfig::load_or_default(&missing), EditorConfig::default());

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{ not json").unwrap();
    assert_eq!(EditorConfig::load_or_default(&broken), EditorConfig::default());
}

#[test]
fn test_default_config_path_is_in_app_dir() {
    if let Ok(path) = EditorConfig::default_config_path() {
        assert!(path.ends_with("photolayouts/config.toml"));
    }
}

#[test]
fn test_unreadable_files_report_their_cause() {
    let dir = TempDir::new().unwrap();

    let json = dir.path().join("config.json");
    std::fs::write(&json, "{ not json").unwrap();
    let err = EditorConfig::load_from_file(&json).unwrap_err();
    assert!(matches!(err, SettingsError::JsonError(_)));

    let toml = dir.path().join("config.toml");
    std::fs::write(&toml, "history = [").unwrap();
    let err = EditorConfig::load_from_file(&toml).unwrap_err();
    assert!(matches!(err, SettingsError::TomlError(_)));

    let err = EditorConfig::load_from_file(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SettingsError::IoError(_)));
}
