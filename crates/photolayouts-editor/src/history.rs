//! Linear undo history.
//!
//! The stack holds every recorded command and a cursor: commands below the
//! cursor are applied, commands at or above it have been undone and can be
//! redone. Pushing a new command discards everything above the cursor.

use photolayouts_core::{CommandError, Result};
use photolayouts_scene::SceneModel;
use tracing::{debug, warn};

use crate::commands::{Command, Composite, EditCommand};

/// Default number of commands kept before the oldest are evicted.
pub const DEFAULT_UNDO_LIMIT: usize = 50;

/// Commands collected between `begin_group` and the matching `end_group`.
#[derive(Debug)]
struct OpenGroup {
    description: String,
    commands: Vec<EditCommand>,
    depth: usize,
}

/// Ordered command history with a cursor.
#[derive(Debug)]
pub struct UndoStack {
    commands: Vec<EditCommand>,
    cursor: usize,
    limit: usize,
    clean_index: Option<usize>,
    open_group: Option<OpenGroup>,
}

impl UndoStack {
    /// Create a stack with the default limit
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Create a stack keeping at most `limit` commands (0 = unlimited)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            commands: Vec::new(),
            cursor: 0,
            limit,
            clean_index: Some(0),
            open_group: None,
        }
    }

    /// Applies `command` and records it.
    ///
    /// A command that fails to apply is released and not recorded; the
    /// stack is left as it was. While a group is open the command joins
    /// the group instead of becoming its own entry.
    pub fn push(
        &mut self,
        command: impl Into<EditCommand>,
        scene: &mut dyn SceneModel,
    ) -> Result<()> {
        let mut command = command.into();
        if let Err(err) = command.apply(scene) {
            warn!("Rejected '{}': {}", command.description(), err);
            command.release(scene);
            return Err(err);
        }
        debug!("Applied '{}'", command.description());

        match &mut self.open_group {
            Some(group) => group.commands.push(command),
            None => self.record(command, scene),
        }
        Ok(())
    }

    /// Appends an already applied command at the cursor.
    fn record(&mut self, command: EditCommand, scene: &mut dyn SceneModel) {
        for mut discarded in self.commands.drain(self.cursor..).rev() {
            debug!("Discarding redo entry '{}'", discarded.description());
            discarded.release(scene);
        }
        if self.clean_index.is_some_and(|clean| clean > self.cursor) {
            self.clean_index = None;
        }

        self.commands.push(command);
        self.cursor += 1;
        self.enforce_limit(scene);
    }

    /// Trims the history to the limit: redo entries go first, newest
    /// first, then the oldest applied commands.
    fn enforce_limit(&mut self, scene: &mut dyn SceneModel) {
        if self.limit == 0 || self.commands.len() <= self.limit {
            return;
        }

        let redo_entries = self.commands.len() - self.cursor;
        let keep = self.commands.len() - (self.commands.len() - self.limit).min(redo_entries);
        for mut discarded in self.commands.drain(keep..).rev() {
            warn!(
                "Undo limit reached, dropping redo entry '{}'",
                discarded.description()
            );
            discarded.release(scene);
        }
        if self.clean_index.is_some_and(|clean| clean > keep) {
            self.clean_index = None;
        }

        let excess = self.commands.len().saturating_sub(self.limit);
        for mut evicted in self.commands.drain(..excess) {
            warn!("Undo limit reached, dropping '{}'", evicted.description());
            evicted.release(scene);
        }
        self.cursor -= excess;
        self.clean_index = self.clean_index.and_then(|clean| clean.checked_sub(excess));
    }

    /// Reverses the command below the cursor.
    ///
    /// Returns `Ok(false)` when there is nothing to undo. If the command
    /// fails to reverse, the cursor does not move.
    pub fn undo(&mut self, scene: &mut dyn SceneModel) -> Result<bool> {
        self.ensure_no_group()?;
        if self.cursor == 0 {
            return Ok(false);
        }
        let command = &mut self.commands[self.cursor - 1];
        command.reverse(scene)?;
        debug!("Undid '{}'", command.description());
        self.cursor -= 1;
        Ok(true)
    }

    /// Re-applies the command at the cursor.
    ///
    /// Returns `Ok(false)` when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut dyn SceneModel) -> Result<bool> {
        self.ensure_no_group()?;
        if self.cursor == self.commands.len() {
            return Ok(false);
        }
        let command = &mut self.commands[self.cursor];
        command.apply(scene)?;
        debug!("Redid '{}'", command.description());
        self.cursor += 1;
        Ok(true)
    }

    fn ensure_no_group(&self) -> Result<()> {
        match &self.open_group {
            Some(group) => Err(CommandError::GroupOpen {
                description: group.description.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    /// Starts collecting pushed commands into one entry.
    ///
    /// Nested calls are folded into the outermost group, whose label wins.
    pub fn begin_group(&mut self, description: impl Into<String>) {
        match &mut self.open_group {
            Some(group) => group.depth += 1,
            None => {
                let description = description.into();
                debug!("Begin group '{}'", description);
                self.open_group = Some(OpenGroup {
                    description,
                    commands: Vec::new(),
                    depth: 1,
                });
            }
        }
    }

    /// Closes the innermost open group.
    ///
    /// Closing the outermost group records its commands as one
    /// [`Composite`] entry; a group with no commands records nothing.
    pub fn end_group(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        let group = self
            .open_group
            .as_mut()
            .ok_or(CommandError::GroupNotOpen)?;
        group.depth -= 1;
        if group.depth > 0 {
            return Ok(());
        }

        let Some(group) = self.open_group.take() else {
            return Ok(());
        };
        debug!(
            "End group '{}' with {} command(s)",
            group.description,
            group.commands.len()
        );
        if !group.commands.is_empty() {
            let composite = Composite::new(group.description, group.commands);
            self.record(composite.into(), scene);
        }
        Ok(())
    }

    pub fn is_group_open(&self) -> bool {
        self.open_group.is_some()
    }

    /// Changes the limit, evicting old commands if needed
    pub fn set_limit(&mut self, limit: usize, scene: &mut dyn SceneModel) {
        self.limit = limit;
        self.enforce_limit(scene);
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Drops all history, releasing every command.
    ///
    /// The current state becomes the clean state.
    pub fn clear(&mut self, scene: &mut dyn SceneModel) {
        let grouped = self
            .open_group
            .take()
            .map(|group| group.commands)
            .unwrap_or_default();
        let grouped = grouped.into_iter().rev();
        for mut command in self.commands.drain(..).rev().chain(grouped) {
            command.release(scene);
        }
        self.cursor = 0;
        self.clean_index = Some(0);
        debug!("History cleared");
    }

    /// Marks the current cursor as the saved state
    pub fn set_clean(&mut self) {
        self.clean_index = Some(self.cursor);
    }

    /// True when the scene matches the last saved state
    pub fn is_clean(&self) -> bool {
        let group_pending = self
            .open_group
            .as_ref()
            .is_some_and(|group| !group.commands.is_empty());
        !group_pending && self.clean_index == Some(self.cursor)
    }

    /// Number of recorded commands
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Position of the cursor (number of applied commands)
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.commands.len()
    }

    /// Label of the command `undo` would reverse
    pub fn undo_text(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .map(|index| self.commands[index].description())
    }

    /// Label of the command `redo` would apply
    pub fn redo_text(&self) -> Option<&str> {
        self.commands.get(self.cursor).map(|cmd| cmd.description())
    }

    /// Labels of all recorded commands, oldest first
    pub fn descriptions(&self) -> Vec<&str> {
        self.commands.iter().map(|cmd| cmd.description()).collect()
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{BorderChange, CanvasResize};
    use photolayouts_core::{BorderAttributes, CanvasSize, ItemId};
    use photolayouts_scene::{ItemKind, Scene};

    fn setup() -> (Scene, ItemId) {
        let mut scene = Scene::default();
        let item = scene
            .append_item(
                None,
                ItemKind::Photo,
                "photo",
                BorderAttributes::default().with_width(2.0),
            )
            .unwrap();
        (scene, item)
    }

    fn width(scene: &mut Scene, stack: &mut UndoStack, item: ItemId, width: f64) {
        let cmd =
            BorderChange::new(&*scene, item, BorderAttributes::default().with_width(width))
                .unwrap();
        stack.push(cmd, scene).unwrap();
    }

    #[test]
    fn test_push_undo_redo() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();

        width(&mut scene, &mut stack, item, 5.0);
        assert_eq!(scene.border(item).unwrap().width, 5.0);
        assert_eq!(stack.index(), 1);

        assert!(stack.undo(&mut scene).unwrap());
        assert_eq!(scene.border(item).unwrap().width, 2.0);
        assert!(!stack.undo(&mut scene).unwrap());

        assert!(stack.redo(&mut scene).unwrap());
        assert_eq!(scene.border(item).unwrap().width, 5.0);
        assert!(!stack.redo(&mut scene).unwrap());
    }

    #[test]
    fn test_push_truncates_redo_entries() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();

        width(&mut scene, &mut stack, item, 3.0);
        width(&mut scene, &mut stack, item, 4.0);
        stack.undo(&mut scene).unwrap();
        stack.undo(&mut scene).unwrap();
        width(&mut scene, &mut stack, item, 7.0);

        assert_eq!(stack.len(), 1);
        assert!(!stack.redo(&mut scene).unwrap());
        assert_eq!(scene.border(item).unwrap().width, 7.0);
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::with_limit(2);

        for w in [3.0, 4.0, 5.0] {
            width(&mut scene, &mut stack, item, w);
        }
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.index(), 2);

        stack.undo(&mut scene).unwrap();
        stack.undo(&mut scene).unwrap();
        assert!(!stack.can_undo());
        assert_eq!(scene.border(item).unwrap().width, 3.0);
    }

    #[test]
    fn test_group_undoes_as_one_step() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();

        stack.begin_group("Resize and border");
        width(&mut scene, &mut stack, item, 6.0);
        let resize = CanvasResize::new(&scene, CanvasSize::new(1024.0, 768.0)).unwrap();
        stack.push(resize, &mut scene).unwrap();
        assert!(stack.undo(&mut scene).is_err());
        stack.end_group(&mut scene).unwrap();

        assert_eq!(stack.len(), 1);
        assert_eq!(stack.undo_text(), Some("Resize and border"));

        stack.undo(&mut scene).unwrap();
        assert_eq!(scene.border(item).unwrap().width, 2.0);
        assert_eq!(scene.canvas_size(), CanvasSize::default());
    }

    #[test]
    fn test_nested_and_empty_groups() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();

        stack.begin_group("outer");
        stack.begin_group("inner");
        width(&mut scene, &mut stack, item, 6.0);
        stack.end_group(&mut scene).unwrap();
        assert!(stack.is_group_open());
        stack.end_group(&mut scene).unwrap();
        assert_eq!(stack.descriptions(), vec!["outer"]);

        stack.begin_group("empty");
        stack.end_group(&mut scene).unwrap();
        assert_eq!(stack.len(), 1);

        let err = stack.end_group(&mut scene).unwrap_err();
        assert_eq!(err, photolayouts_core::Error::from(CommandError::GroupNotOpen));
    }

    #[test]
    fn test_clean_state() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();
        assert!(stack.is_clean());

        width(&mut scene, &mut stack, item, 3.0);
        assert!(!stack.is_clean());
        stack.set_clean();
        assert!(stack.is_clean());

        stack.undo(&mut scene).unwrap();
        assert!(!stack.is_clean());
        stack.redo(&mut scene).unwrap();
        assert!(stack.is_clean());

        stack.undo(&mut scene).unwrap();
        width(&mut scene, &mut stack, item, 9.0);
        stack.undo(&mut scene).unwrap();
        stack.redo(&mut scene).unwrap();
        assert!(!stack.is_clean());
    }

    #[test]
    fn test_labels() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();
        assert_eq!(stack.undo_text(), None);

        width(&mut scene, &mut stack, item, 3.0);
        let resize = CanvasResize::new(&scene, CanvasSize::new(100.0, 100.0)).unwrap();
        stack.push(resize, &mut scene).unwrap();
        stack.undo(&mut scene).unwrap();

        assert_eq!(stack.undo_text(), Some(BorderChange::DESCRIPTION));
        assert_eq!(stack.redo_text(), Some(CanvasResize::DESCRIPTION));
        assert_eq!(
            stack.descriptions(),
            vec!["Border changed", "Canvas size change"]
        );
    }

    #[test]
    fn test_shrinking_limit_drops_redo_entries_first() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();

        for w in [3.0, 4.0, 5.0] {
            width(&mut scene, &mut stack, item, w);
        }
        stack.undo(&mut scene).unwrap();
        stack.undo(&mut scene).unwrap();
        assert_eq!(scene.border(item).unwrap().width, 3.0);

        stack.set_limit(1, &mut scene);
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.index(), 1);
        assert!(!stack.redo(&mut scene).unwrap());

        assert!(stack.undo(&mut scene).unwrap());
        assert_eq!(scene.border(item).unwrap().width, 2.0);
        assert!(stack.redo(&mut scene).unwrap());
        assert_eq!(scene.border(item).unwrap().width, 3.0);
    }

    #[test]
    fn test_shrinking_limit_then_evicts_oldest() {
        let (mut scene, item) = setup();
        let mut stack = UndoStack::new();

        for w in [3.0, 4.0, 5.0, 6.0] {
            width(&mut scene, &mut stack, item, w);
        }
        stack.undo(&mut scene).unwrap();
        stack.set_clean();

        stack.set_limit(2, &mut scene);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.index(), 2);
        assert!(stack.is_clean());
        assert!(!stack.can_redo());

        stack.undo(&mut scene).unwrap();
        stack.undo(&mut scene).unwrap();
        assert_eq!(scene.border(item).unwrap().width, 3.0);
        assert!(!stack.can_undo());
    }
}
