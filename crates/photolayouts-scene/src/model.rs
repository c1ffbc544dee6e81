use photolayouts_core::{BorderAttributes, CanvasSize, ItemId, Result};

use crate::listener::SceneChange;

/// The scene operations the editing commands are written against.
///
/// `parent == None` always denotes the scene's top-level item list. Rows
/// are zero-based positions inside a parent's ordered child list.
///
/// Every mutating call either succeeds completely or returns an error and
/// leaves the scene untouched.
pub trait SceneModel {
    /// Returns true if `item` refers to a live arena entry.
    fn contains(&self, item: ItemId) -> bool;

    /// Returns true if `item` is reachable from the top-level list.
    fn is_attached(&self, item: ItemId) -> bool;

    fn border(&self, item: ItemId) -> Result<BorderAttributes>;

    /// Overwrites all border attributes of `item`; rejects invalid values.
    fn set_border(&mut self, item: ItemId, border: BorderAttributes) -> Result<()>;

    /// Parent of an item placed in the graph, `None` for top-level items.
    fn parent_of(&self, item: ItemId) -> Result<Option<ItemId>>;

    /// Row of an item inside its parent's child list.
    fn row_of(&self, item: ItemId) -> Result<usize>;

    fn children_of(&self, parent: Option<ItemId>) -> Result<&[ItemId]>;

    /// Unlinks `item` from its parent. Its own children stay linked to it.
    fn detach(&mut self, item: ItemId) -> Result<()>;

    /// Links a detached `item` into `parent` at `row` (0..=len).
    fn insert_at(&mut self, parent: Option<ItemId>, row: usize, item: ItemId) -> Result<()>;

    /// Frees a detached item and everything still linked below it.
    fn destroy(&mut self, item: ItemId) -> Result<()>;

    fn canvas_size(&self) -> CanvasSize;

    fn set_canvas_size(&mut self, size: CanvasSize) -> Result<()>;

    /// Reports a completed mutation to the presentation layer.
    fn notify_changed(&self, change: SceneChange);
}
