//! # Photo Layouts
//!
//! The editing core of a photo layout editor: a scene graph of photos, text
//! and groups with border attributes, and an undo/redo engine in which every
//! user edit is a reversible command.
//!
//! ## Architecture
//!
//! The project is organized as a workspace with multiple crates:
//!
//! 1. **photolayouts-core** - Item ids, colors, border attributes, errors
//! 2. **photolayouts-scene** - Arena-backed scene graph and change listeners
//! 3. **photolayouts-editor** - Commands, undo stack, editing session, tools
//! 4. **photolayouts-settings** - Editor configuration (JSON/TOML)
//! 5. **photolayouts** - This facade: logging setup and re-exports
//!
//! ## Features
//!
//! - **Reversible Commands**: border changes, add/remove items, layer moves,
//!   canvas resizing
//! - **History**: linear undo/redo with grouped steps, undo limit and
//!   saved-state tracking
//! - **Subtree Ownership**: removed items stay alive, with their ids, until
//!   their command leaves the history

use std::path::Path;

use anyhow::Context;

pub use photolayouts_core::{
    BorderAttributes, CanvasSize, CommandError, Error, ItemId, JoinStyle, Point, Result, Rgba,
    SceneError,
};
pub use photolayouts_editor::{
    AbstractTool, BorderChange, BorderEditTool, CanvasResize, Command, Composite, EditCommand,
    EditorState, InsertItem, MoveRows, RemoveItem, UndoStack,
};
pub use photolayouts_scene::{
    Item, ItemKind, ListenerHandle, Scene, SceneChange, SceneListener, SceneModel, SceneSnapshot,
};
pub use photolayouts_settings::{EditorConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support (INFO when unset)
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

/// Opens an editing session configured from `config_path`, or from the
/// default config location when no path is given.
///
/// A missing file yields the default configuration; a present but invalid
/// file is an error.
pub fn open_session(config_path: Option<&Path>) -> anyhow::Result<EditorState> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => EditorConfig::default_config_path()?,
    };

    let config = if path.exists() {
        EditorConfig::load_from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        tracing::info!("No config at {}, using defaults", path.display());
        EditorConfig::default()
    };

    Ok(EditorState::with_config(config))
}
