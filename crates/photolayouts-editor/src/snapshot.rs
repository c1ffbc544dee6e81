//! Attribute snapshots used by reversible attribute edits.

use photolayouts_core::{BorderAttributes, ItemId, Result};
use photolayouts_scene::SceneModel;

/// The border attributes of one item, captured at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSnapshot {
    item: ItemId,
    border: BorderAttributes,
}

impl BorderSnapshot {
    /// Records the current border of `item`.
    pub fn capture(scene: &dyn SceneModel, item: ItemId) -> Result<Self> {
        Ok(Self {
            item,
            border: scene.border(item)?,
        })
    }

    /// Writes the recorded values back onto the item.
    pub fn restore(&self, scene: &mut dyn SceneModel) -> Result<()> {
        scene.set_border(self.item, self.border)
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn border(&self) -> BorderAttributes {
        self.border
    }
}
