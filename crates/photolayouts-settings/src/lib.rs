//! Photo Layouts Settings Crate
//!
//! Handles editor configuration: history depth, default border and default
//! canvas, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{BorderSettings, CanvasSettings, EditorConfig, HistorySettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
