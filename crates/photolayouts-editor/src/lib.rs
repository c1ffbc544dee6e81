//! # Photo Layouts Editor
//!
//! Undoable editing for the photo layouts scene graph. Every user edit is a
//! [`commands::Command`] that can apply and reverse itself; the
//! [`history::UndoStack`] records commands behind a cursor so edits can be
//! undone and redone in order.
//!
//! ## Components
//!
//! - **Commands**: border changes, item insertion and removal, row moves,
//!   canvas resizing and composite groups
//! - **History**: undo/redo cursor, command groups, undo limit, clean state
//! - **Editing session**: [`EditorState`] owning the scene, history and
//!   settings
//! - **Tools**: [`tools::AbstractTool`] and the border editing tool
//!
//! ## Usage
//!
//! ```rust,ignore
//! use photolayouts_editor::EditorState;
//! use photolayouts_scene::ItemKind;
//!
//! let mut state = EditorState::new();
//! let photo = state.append_item(None, ItemKind::Photo, "Holiday")?;
//! state.change_border(photo, BorderAttributes::default().with_width(4.0))?;
//! state.undo()?;
//! ```

pub mod commands;
pub mod editor_state;
pub mod history;
pub mod snapshot;
pub mod tools;

pub use commands::{
    BorderChange, CanvasResize, Command, Composite, EditCommand, InsertItem, MoveRows, Placement,
    RemoveItem,
};
pub use editor_state::EditorState;
pub use history::{UndoStack, DEFAULT_UNDO_LIMIT};
pub use snapshot::BorderSnapshot;
pub use tools::{AbstractTool, BorderEditTool, ToolState};
