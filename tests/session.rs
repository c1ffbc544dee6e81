use photolayouts::{open_session, BorderAttributes, EditorConfig, ItemKind, SceneModel};
use tempfile::TempDir;

#[test]
fn test_session_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = EditorConfig::default();
    config.history.undo_limit = 3;
    config.border.width = 1.5;
    config.canvas.width = 1200.0;
    config.save_to_file(&path).unwrap();

    let mut state = open_session(Some(&path)).unwrap();
    assert_eq!(state.history().limit(), 3);
    assert_eq!(state.scene().canvas_size().width, 1200.0);

    let item = state.append_item(None, ItemKind::Photo, "photo").unwrap();
    assert_eq!(state.scene().border(item).unwrap().width, 1.5);
}

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let state = open_session(Some(&dir.path().join("absent.json"))).unwrap();
    assert_eq!(state.config(), &EditorConfig::default());
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "border": { "width": -3.0 } }"#).unwrap();

    let err = open_session(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to load config"));
}

#[test]
fn test_undo_through_facade() {
    let mut state = open_session(Some(&TempDir::new().unwrap().path().join("none.toml"))).unwrap();
    let item = state.append_item(None, ItemKind::Text, "title").unwrap();
    state
        .change_border(item, BorderAttributes::default().with_width(2.0))
        .unwrap();
    state.undo().unwrap();
    assert_eq!(
        state.scene().border(item).unwrap(),
        BorderAttributes::default()
    );
}
