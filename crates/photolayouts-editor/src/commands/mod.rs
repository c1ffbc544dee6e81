//! Reversible editing commands.
//!
//! Every edit the user commits is expressed as a command that knows how to
//! apply itself to the scene and how to reverse itself again. Commands are
//! pushed onto the [`crate::history::UndoStack`], which is the only place
//! that should call [`Command::apply`] and [`Command::reverse`].

mod border;
mod canvas;
mod move_rows;
mod structure;

pub use border::BorderChange;
pub use canvas::CanvasResize;
pub use move_rows::MoveRows;
pub use structure::{InsertItem, Placement, RemoveItem};

use photolayouts_core::{ItemId, Result, SceneError};
use photolayouts_scene::SceneModel;
use tracing::warn;

/// A reversible edit of the scene.
pub trait Command {
    /// Performs the edit.
    ///
    /// On error the scene is left exactly as it was before the call.
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()>;

    /// Undoes a previous [`Command::apply`].
    ///
    /// On error the scene is left exactly as it was before the call.
    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()>;

    /// Short human readable label, e.g. "Border changed".
    fn description(&self) -> &str;

    /// Called once when the command leaves the history for good.
    ///
    /// Commands that hold detached items free them here.
    fn release(&mut self, _scene: &mut dyn SceneModel) {}
}

/// All commands the editor records in its history.
#[derive(Debug)]
pub enum EditCommand {
    BorderChange(BorderChange),
    InsertItem(InsertItem),
    RemoveItem(RemoveItem),
    MoveRows(MoveRows),
    CanvasResize(CanvasResize),
    Composite(Composite),
}

impl EditCommand {
    fn inner(&self) -> &dyn Command {
        match self {
            EditCommand::BorderChange(cmd) => cmd,
            EditCommand::InsertItem(cmd) => cmd,
            EditCommand::RemoveItem(cmd) => cmd,
            EditCommand::MoveRows(cmd) => cmd,
            EditCommand::CanvasResize(cmd) => cmd,
            EditCommand::Composite(cmd) => cmd,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Command {
        match self {
            EditCommand::BorderChange(cmd) => cmd,
            EditCommand::InsertItem(cmd) => cmd,
            EditCommand::RemoveItem(cmd) => cmd,
            EditCommand::MoveRows(cmd) => cmd,
            EditCommand::CanvasResize(cmd) => cmd,
            EditCommand::Composite(cmd) => cmd,
        }
    }
}

impl Command for EditCommand {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.inner_mut().apply(scene)
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.inner_mut().reverse(scene)
    }

    fn description(&self) -> &str {
        self.inner().description()
    }

    fn release(&mut self, scene: &mut dyn SceneModel) {
        self.inner_mut().release(scene)
    }
}

impl From<BorderChange> for EditCommand {
    fn from(cmd: BorderChange) -> Self {
        EditCommand::BorderChange(cmd)
    }
}

impl From<InsertItem> for EditCommand {
    fn from(cmd: InsertItem) -> Self {
        EditCommand::InsertItem(cmd)
    }
}

impl From<RemoveItem> for EditCommand {
    fn from(cmd: RemoveItem) -> Self {
        EditCommand::RemoveItem(cmd)
    }
}

impl From<MoveRows> for EditCommand {
    fn from(cmd: MoveRows) -> Self {
        EditCommand::MoveRows(cmd)
    }
}

impl From<CanvasResize> for EditCommand {
    fn from(cmd: CanvasResize) -> Self {
        EditCommand::CanvasResize(cmd)
    }
}

impl From<Composite> for EditCommand {
    fn from(cmd: Composite) -> Self {
        EditCommand::Composite(cmd)
    }
}

/// Several commands recorded as one history entry.
///
/// Applies its children in order and reverses them in the opposite order.
/// If a child fails, the children already handled are rolled back so the
/// composite behaves atomically.
#[derive(Debug)]
pub struct Composite {
    description: String,
    commands: Vec<EditCommand>,
}

impl Composite {
    pub fn new(description: impl Into<String>, commands: Vec<EditCommand>) -> Self {
        Self {
            description: description.into(),
            commands,
        }
    }

    pub fn commands(&self) -> &[EditCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for Composite {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        for i in 0..self.commands.len() {
            if let Err(err) = self.commands[i].apply(scene) {
                for done in self.commands[..i].iter_mut().rev() {
                    if let Err(rollback) = done.reverse(scene) {
                        warn!("Rollback of '{}' failed: {}", done.description(), rollback);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        for i in (0..self.commands.len()).rev() {
            if let Err(err) = self.commands[i].reverse(scene) {
                for done in self.commands[i + 1..].iter_mut() {
                    if let Err(rollback) = done.apply(scene) {
                        warn!("Rollback of '{}' failed: {}", done.description(), rollback);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn release(&mut self, scene: &mut dyn SceneModel) {
        for cmd in self.commands.iter_mut().rev() {
            cmd.release(scene);
        }
    }
}

/// Fails unless `item` is live and reachable from the top-level list.
pub(crate) fn ensure_attached(scene: &dyn SceneModel, item: ItemId) -> Result<()> {
    if !scene.contains(item) {
        return Err(SceneError::ItemNotFound { id: item }.into());
    }
    if !scene.is_attached(item) {
        return Err(SceneError::NotAttached { id: item }.into());
    }
    Ok(())
}
