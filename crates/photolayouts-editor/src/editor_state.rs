//! Editing session: the scene, its undo history and the editor settings.

use photolayouts_core::{BorderAttributes, CanvasSize, ItemId, Result};
use photolayouts_scene::{ItemKind, ListenerHandle, Scene, SceneListener, SceneModel};
use photolayouts_settings::EditorConfig;
use tracing::{info, warn};

use crate::commands::{
    BorderChange, CanvasResize, EditCommand, InsertItem, MoveRows, RemoveItem,
};
use crate::history::UndoStack;

/// Owns everything one open layout needs.
///
/// All edits go through the undo stack; the scene is only exposed
/// read-only.
#[derive(Debug)]
pub struct EditorState {
    scene: Scene,
    history: UndoStack,
    config: EditorConfig,
}

impl EditorState {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Starts an empty layout using the canvas and history settings of
    /// `config`.
    pub fn with_config(config: EditorConfig) -> Self {
        let scene = Scene::new(config.canvas.size());
        let history = UndoStack::with_limit(config.history.undo_limit);
        info!(
            "Editor session started, canvas {}x{}, undo limit {}",
            config.canvas.width, config.canvas.height, config.history.undo_limit
        );
        Self {
            scene,
            history,
            config,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Replaces the settings; a smaller undo limit evicts old steps.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.history
            .set_limit(config.history.undo_limit, &mut self.scene);
        self.config = config;
    }

    pub fn add_listener(&mut self, listener: Box<dyn SceneListener>) -> ListenerHandle {
        self.scene.add_listener(listener)
    }

    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        self.scene.remove_listener(handle)
    }

    /// Creates a new item with the configured default border and inserts
    /// it under `parent` at `row` as one undoable step.
    pub fn add_item(
        &mut self,
        parent: Option<ItemId>,
        row: usize,
        kind: ItemKind,
        name: &str,
    ) -> Result<ItemId> {
        let item = self
            .scene
            .create_item(kind, name, self.config.border.attributes())?;
        match InsertItem::new(&mut self.scene, item, parent, row) {
            Ok(cmd) => self.history.push(cmd, &mut self.scene)?,
            Err(err) => {
                if let Err(cleanup) = self.scene.destroy(item) {
                    warn!("Failed to free unused item {}: {}", item, cleanup);
                }
                return Err(err);
            }
        }
        Ok(item)
    }

    /// Appends a new item at the end of `parent`'s children.
    pub fn append_item(
        &mut self,
        parent: Option<ItemId>,
        kind: ItemKind,
        name: &str,
    ) -> Result<ItemId> {
        let row = self.scene.children_of(parent)?.len();
        self.add_item(parent, row, kind, name)
    }

    pub fn remove_item(&mut self, item: ItemId) -> Result<()> {
        let cmd = RemoveItem::new(&self.scene, item)?;
        self.history.push(cmd, &mut self.scene)
    }

    pub fn change_border(&mut self, item: ItemId, border: BorderAttributes) -> Result<()> {
        let cmd = BorderChange::new(&self.scene, item, border)?;
        self.history.push(cmd, &mut self.scene)
    }

    /// Moves `count` sibling rows; see [`MoveRows`] for the row convention.
    pub fn move_rows(
        &mut self,
        source_parent: Option<ItemId>,
        source_row: usize,
        count: usize,
        destination_parent: Option<ItemId>,
        destination_row: usize,
    ) -> Result<()> {
        let cmd = MoveRows::new(
            &self.scene,
            source_parent,
            source_row,
            count,
            destination_parent,
            destination_row,
        )?;
        self.history.push(cmd, &mut self.scene)
    }

    pub fn resize_canvas(&mut self, size: CanvasSize) -> Result<()> {
        let cmd = CanvasResize::new(&self.scene, size)?;
        self.history.push(cmd, &mut self.scene)
    }

    /// Applies and records a command built elsewhere, e.g. by a tool.
    pub fn push_command(&mut self, command: impl Into<EditCommand>) -> Result<()> {
        self.history.push(command, &mut self.scene)
    }

    pub fn undo(&mut self) -> Result<bool> {
        self.history.undo(&mut self.scene)
    }

    pub fn redo(&mut self) -> Result<bool> {
        self.history.redo(&mut self.scene)
    }

    pub fn begin_group(&mut self, description: &str) {
        self.history.begin_group(description);
    }

    pub fn end_group(&mut self) -> Result<()> {
        self.history.end_group(&mut self.scene)
    }

    /// Forgets all undo steps; removed items held by them are freed.
    pub fn clear_history(&mut self) {
        self.history.clear(&mut self.scene);
    }

    /// Marks the current state as saved
    pub fn mark_saved(&mut self) {
        self.history.set_clean();
    }

    /// True if the layout differs from the last saved state
    pub fn is_modified(&self) -> bool {
        !self.history.is_clean()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
