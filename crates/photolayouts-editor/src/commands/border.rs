use photolayouts_core::{BorderAttributes, ItemId, Result};
use photolayouts_scene::{SceneChange, SceneModel};
use tracing::debug;

use super::{ensure_attached, Command};
use crate::snapshot::BorderSnapshot;

/// Changes the border width, color and join style of one item.
///
/// The item's current border is captured when the command is created.
/// `apply` always writes the new values and `reverse` always writes the
/// captured ones, so repeating either call is harmless.
#[derive(Debug, Clone)]
pub struct BorderChange {
    border: BorderAttributes,
    previous: BorderSnapshot,
}

impl BorderChange {
    pub const DESCRIPTION: &'static str = "Border changed";

    /// Prepares a border change for an attached item.
    ///
    /// Invalid values are rejected here, before the command can reach the
    /// history.
    pub fn new(scene: &dyn SceneModel, item: ItemId, border: BorderAttributes) -> Result<Self> {
        border.validate()?;
        ensure_attached(scene, item)?;
        Ok(Self {
            border,
            previous: BorderSnapshot::capture(scene, item)?,
        })
    }

    pub fn item(&self) -> ItemId {
        self.previous.item()
    }

    pub fn new_border(&self) -> BorderAttributes {
        self.border
    }

    pub fn old_border(&self) -> BorderAttributes {
        self.previous.border()
    }
}

impl Command for BorderChange {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        let item = self.item();
        ensure_attached(scene, item)?;
        scene.set_border(item, self.border)?;
        debug!("Border of {} set to {:?}", item, self.border);
        scene.notify_changed(SceneChange::BorderChanged { item });
        Ok(())
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        let item = self.item();
        ensure_attached(scene, item)?;
        self.previous.restore(scene)?;
        debug!("Border of {} restored to {:?}", item, self.previous.border());
        scene.notify_changed(SceneChange::BorderChanged { item });
        Ok(())
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }
}
