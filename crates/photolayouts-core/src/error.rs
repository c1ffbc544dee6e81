//! Error handling for the photo layouts editor
//!
//! Provides error types for each layer of the editing core:
//! - Scene errors (stale ids, detached items, bad rows, cycles)
//! - Command errors (invalid values rejected before a command is pushed)
//!
//! Scene errors are precondition violations: the operation that hit one is
//! aborted and the scene is left exactly as it was.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::types::ItemId;

/// Scene graph error type
///
/// Raised when an operation refers to an item or position that does not
/// exist in the current structure of the scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// The id does not refer to a live arena entry
    #[error("Item {id} not found")]
    ItemNotFound {
        /// The stale or unknown id.
        id: ItemId,
    },

    /// The item exists but is not part of the scene graph
    #[error("Item {id} is not attached to the scene")]
    NotAttached {
        /// The detached item.
        id: ItemId,
    },

    /// The item is already placed somewhere in the graph
    #[error("Item {id} is already attached to the scene")]
    AlreadyAttached {
        /// The attached item.
        id: ItemId,
    },

    /// Row index outside of the parent's child list
    #[error("Row {row} out of range for a parent with {len} children")]
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// Number of children under the parent.
        len: usize,
    },

    /// Placing the item would make it its own ancestor
    #[error("Item {id} cannot be placed inside its own subtree")]
    Cycle {
        /// The item being placed.
        id: ItemId,
    },

    /// The item is no longer where a command recorded it
    #[error("Item {id} is not at its recorded position")]
    Misplaced {
        /// The item that moved.
        id: ItemId,
    },
}

/// Command error type
///
/// Raised while constructing or grouping commands, before anything is
/// pushed onto the undo stack.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Attribute value outside its valid domain
    #[error("Invalid {attribute}: {reason}")]
    InvalidAttribute {
        /// The attribute name.
        attribute: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Canvas dimensions must be finite and positive
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize {
        /// Requested width.
        width: f64,
        /// Requested height.
        height: f64,
    },

    /// Row move that cannot be performed
    #[error("Invalid move: {reason}")]
    InvalidMove {
        /// Why the move was rejected.
        reason: String,
    },

    /// `end_group` without a matching `begin_group`
    #[error("No command group is open")]
    GroupNotOpen,

    /// History traversal while a command group is still being recorded
    #[error("Command group '{description}' is still open")]
    GroupOpen {
        /// Description of the open group.
        description: String,
    },

    /// A tool was asked to edit without a current item
    #[error("No current item selected")]
    NoCurrentItem,
}

/// Main error type for the editing core
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Scene graph error
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Command error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a precondition violation on the scene graph
    pub fn is_scene_error(&self) -> bool {
        matches!(self, Error::Scene(_))
    }

    /// Check if this is a rejected command
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Command(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SceneError::RowOutOfRange { row: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "Row 4 out of range for a parent with 2 children"
        );

        let err = CommandError::InvalidAttribute {
            attribute: "border width".to_string(),
            reason: "-1 is negative".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid border width: -1 is negative");

        assert_eq!(
            CommandError::GroupNotOpen.to_string(),
            "No command group is open"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = CommandError::GroupNotOpen.into();
        assert!(err.is_command_error());
        assert!(!err.is_scene_error());

        let err: Error = SceneError::RowOutOfRange { row: 1, len: 0 }.into();
        assert!(err.is_scene_error());
    }
}
