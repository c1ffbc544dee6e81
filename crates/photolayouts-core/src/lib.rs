//! # Photo Layouts Core
//!
//! Core types and error definitions shared by the photo layouts editor
//! crates: item identifiers, colors, border attributes, canvas geometry and
//! the error taxonomy used by the scene graph and the command engine.

pub mod data;
pub mod error;
pub mod types;

pub use data::{BorderAttributes, CanvasSize, JoinStyle, Point, Rgba};
pub use error::{CommandError, Error, Result, SceneError};
pub use types::ItemId;
