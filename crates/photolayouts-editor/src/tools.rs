//! Editing tools.
//!
//! A tool follows the item the user is working on and the pointer, and turns
//! its own input into commands. Tools never touch the scene directly; the
//! commands they build are pushed through [`crate::EditorState`].

use photolayouts_core::{BorderAttributes, CommandError, ItemId, JoinStyle, Point, Result, Rgba};
use photolayouts_scene::SceneModel;
use tracing::debug;

use crate::commands::BorderChange;

/// Current item and pointer position shared by every tool.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ToolState {
    current_item: Option<ItemId>,
    mouse_position: Option<Point>,
}

/// Common behaviour of editing tools.
pub trait AbstractTool {
    fn state(&self) -> &ToolState;

    fn state_mut(&mut self) -> &mut ToolState;

    fn current_item(&self) -> Option<ItemId> {
        self.state().current_item
    }

    /// Returns true if the current item actually changed.
    fn set_current_item(&mut self, item: Option<ItemId>) -> bool {
        if self.state().current_item == item {
            return false;
        }
        self.state_mut().current_item = item;
        debug!("Tool current item set to {:?}", item);
        true
    }

    fn mouse_position(&self) -> Option<Point> {
        self.state().mouse_position
    }

    /// Returns true if the position actually changed.
    fn set_mouse_position(&mut self, position: Option<Point>) -> bool {
        if self.state().mouse_position == position {
            return false;
        }
        self.state_mut().mouse_position = position;
        true
    }

    /// Tools act on the current item and are disabled without one.
    fn is_enabled(&self) -> bool {
        self.current_item().is_some()
    }
}

/// Edits the border of the current item.
///
/// The tool keeps a draft of the border values the user is editing; nothing
/// changes in the scene until [`BorderEditTool::change_border`] is pushed.
#[derive(Debug, Clone, Default)]
pub struct BorderEditTool {
    state: ToolState,
    draft: BorderAttributes,
}

impl BorderEditTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft values the next command will apply
    pub fn border(&self) -> BorderAttributes {
        self.draft
    }

    pub fn set_width(&mut self, width: f64) {
        self.draft.width = width;
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.draft.color = color;
    }

    pub fn set_join_style(&mut self, join_style: JoinStyle) {
        self.draft.join_style = join_style;
    }

    /// Copies the current item's border into the draft.
    pub fn sync(&mut self, scene: &dyn SceneModel) -> Result<()> {
        let item = self.current_item().ok_or(CommandError::NoCurrentItem)?;
        self.draft = scene.border(item)?;
        Ok(())
    }

    /// Builds the command applying the draft to the current item.
    pub fn change_border(&self, scene: &dyn SceneModel) -> Result<BorderChange> {
        let item = self.current_item().ok_or(CommandError::NoCurrentItem)?;
        BorderChange::new(scene, item, self.draft)
    }
}

impl AbstractTool for BorderEditTool {
    fn state(&self) -> &ToolState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ToolState {
        &mut self.state
    }
}
