//! # Photo Layouts Scene
//!
//! The scene graph edited by the photo layouts editor: an arena of layout
//! items (photos, text, groups) with ordered parent/child relations, the
//! [`SceneModel`] trait the undo commands are written against, and the
//! [`SceneListener`] interface through which presentation layers learn
//! about completed changes.
//!
//! ## Architecture
//!
//! ```text
//! Scene (arena + top-level list + canvas size)
//!   ├── Item (border attributes, ordered children)
//!   └── Listeners (notified after each mutation)
//! ```

pub mod listener;
pub mod model;
pub mod scene;

pub use listener::{ListenerHandle, SceneChange, SceneListener};
pub use model::SceneModel;
pub use scene::{Item, ItemKind, Scene, SceneSnapshot, SnapshotEntry};
