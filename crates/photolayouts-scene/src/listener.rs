//! Scene change listener interface
//!
//! Presentation layers (layer trees, canvases, property editors) register a
//! listener to refresh themselves after the editing core mutates the scene.

use photolayouts_core::{CanvasSize, ItemId};

/// Handle for a registered scene listener.
///
/// Returned by [`crate::Scene::add_listener`] and used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(pub usize);

/// A single mutation of the scene, reported after it has happened.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneChange {
    /// Border width, color or join style of an item changed
    BorderChanged { item: ItemId },
    /// An item was placed at `row` under `parent` (`None` = top level)
    ItemInserted {
        item: ItemId,
        parent: Option<ItemId>,
        row: usize,
    },
    /// An item was taken out of `parent` at `row`
    ItemRemoved {
        item: ItemId,
        parent: Option<ItemId>,
        row: usize,
    },
    /// The canvas was resized
    CanvasResized { size: CanvasSize },
}

impl SceneChange {
    /// The item the change is about, if any.
    pub fn item(&self) -> Option<ItemId> {
        match self {
            Self::BorderChanged { item }
            | Self::ItemInserted { item, .. }
            | Self::ItemRemoved { item, .. } => Some(*item),
            Self::CanvasResized { .. } => None,
        }
    }
}

/// Listener trait for scene changes
///
/// Implement this trait to receive notifications of scene mutations.
/// Listeners must not fail; the editing core ignores anything they do.
pub trait SceneListener {
    /// Called once for every mutation, after it has been applied
    fn on_scene_changed(&self, _change: &SceneChange) {}
}
