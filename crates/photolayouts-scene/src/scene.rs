use std::fmt;

use photolayouts_core::{BorderAttributes, CanvasSize, ItemId, Result, SceneError};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tracing::debug;

use crate::listener::{ListenerHandle, SceneChange, SceneListener};
use crate::model::SceneModel;

/// What a layout item displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A photo placed on the canvas
    Photo,
    /// A text block
    Text,
    /// A container for other items
    Group,
}

/// Where an arena entry is linked into the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Location {
    Root,
    Child(ItemId),
    Detached,
}

/// A node of the scene graph.
#[derive(Debug, Clone)]
pub struct Item {
    name: String,
    kind: ItemKind,
    border: BorderAttributes,
    location: Location,
    children: Vec<ItemId>,
}

impl Item {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn border(&self) -> BorderAttributes {
        self.border
    }

    /// Ordered children; row `n` is `children()[n]`.
    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn is_detached(&self) -> bool {
        self.location == Location::Detached
    }
}

/// One attached item as seen in a [`SceneSnapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotEntry {
    pub id: ItemId,
    pub parent: Option<ItemId>,
    pub row: usize,
    pub depth: usize,
    pub name: String,
    pub kind: ItemKind,
    pub border: BorderAttributes,
}

/// Structure and attributes of every attached item, in pre-order.
///
/// Two snapshots compare equal exactly when the visible scenes are
/// identical, which is what undo must guarantee.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub canvas_size: CanvasSize,
    pub entries: Vec<SnapshotEntry>,
}

/// Arena-backed scene graph.
///
/// Items live in a generational arena; parent/child relations are stored as
/// ids, so there are no ownership cycles. An entry can be *live but
/// detached*: it keeps its id and its own children while a command holds it
/// outside of the graph.
pub struct Scene {
    items: SlotMap<ItemId, Item>,
    roots: Vec<ItemId>,
    canvas_size: CanvasSize,
    listeners: Vec<(ListenerHandle, Box<dyn SceneListener>)>,
    next_listener: usize,
}

impl Scene {
    /// Creates an empty scene with the given canvas.
    pub fn new(canvas_size: CanvasSize) -> Self {
        Self {
            items: SlotMap::with_key(),
            roots: Vec::new(),
            canvas_size,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Allocates a new, detached item.
    ///
    /// The item is not visible until it is inserted, normally through an
    /// insert command so the addition can be undone.
    pub fn create_item(
        &mut self,
        kind: ItemKind,
        name: impl Into<String>,
        border: BorderAttributes,
    ) -> Result<ItemId> {
        border.validate()?;
        let id = self.items.insert(Item {
            name: name.into(),
            kind,
            border,
            location: Location::Detached,
            children: Vec::new(),
        });
        debug!("Created {:?} item {}", kind, id);
        Ok(id)
    }

    /// Creates an item and appends it directly under `parent`.
    ///
    /// This bypasses the undo history and is meant for building an initial
    /// layout.
    pub fn append_item(
        &mut self,
        parent: Option<ItemId>,
        kind: ItemKind,
        name: impl Into<String>,
        border: BorderAttributes,
    ) -> Result<ItemId> {
        let len = self.children_of(parent)?.len();
        let id = self.create_item(kind, name, border)?;
        if let Err(err) = self.insert_at(parent, len, id) {
            self.items.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Number of live arena entries, attached or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Top-level items in order.
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// `item` followed by all of its descendants, in pre-order.
    pub fn subtree(&self, item: ItemId) -> Result<Vec<ItemId>> {
        self.get(item)?;
        let mut out = Vec::new();
        let mut stack = vec![item];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.items[id].children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Number of ancestors of `item` (top-level items have depth 0).
    pub fn depth(&self, item: ItemId) -> Result<usize> {
        let mut depth = 0;
        let mut location = self.get(item)?.location;
        while let Location::Child(parent) = location {
            depth += 1;
            location = self.get(parent)?.location;
        }
        Ok(depth)
    }

    /// Captures the attached structure for comparison.
    pub fn snapshot(&self) -> SceneSnapshot {
        let mut entries = Vec::new();
        let mut stack: Vec<(ItemId, Option<ItemId>, usize, usize)> = self
            .roots
            .iter()
            .enumerate()
            .rev()
            .map(|(row, id)| (*id, None, row, 0))
            .collect();

        while let Some((id, parent, row, depth)) = stack.pop() {
            let item = &self.items[id];
            entries.push(SnapshotEntry {
                id,
                parent,
                row,
                depth,
                name: item.name.clone(),
                kind: item.kind,
                border: item.border,
            });
            for (child_row, child) in item.children.iter().enumerate().rev() {
                stack.push((*child, Some(id), child_row, depth + 1));
            }
        }

        SceneSnapshot {
            canvas_size: self.canvas_size,
            entries,
        }
    }

    /// Registers a listener for scene changes.
    pub fn add_listener(&mut self, listener: Box<dyn SceneListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((handle, listener));
        handle
    }

    /// Unregisters a listener. Returns false if the handle was unknown.
    pub fn remove_listener(&mut self, handle: ListenerHandle) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(h, _)| *h != handle);
        self.listeners.len() != before
    }

    fn get(&self, id: ItemId) -> Result<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| SceneError::ItemNotFound { id }.into())
    }

    fn siblings_mut(&mut self, parent: Option<ItemId>) -> Result<&mut Vec<ItemId>> {
        match parent {
            None => Ok(&mut self.roots),
            Some(id) => self
                .items
                .get_mut(id)
                .map(|item| &mut item.children)
                .ok_or_else(|| SceneError::ItemNotFound { id }.into()),
        }
    }

    /// True if `ancestor` is `node` or lies on the parent chain above it.
    fn is_self_or_ancestor(&self, ancestor: ItemId, node: ItemId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.items.get(id).map(|item| item.location) {
                Some(Location::Child(parent)) => Some(parent),
                _ => None,
            };
        }
        false
    }
}

impl SceneModel for Scene {
    fn contains(&self, item: ItemId) -> bool {
        self.items.contains_key(item)
    }

    fn is_attached(&self, item: ItemId) -> bool {
        let mut current = item;
        loop {
            match self.items.get(current).map(|entry| entry.location) {
                Some(Location::Root) => return true,
                Some(Location::Child(parent)) => current = parent,
                Some(Location::Detached) | None => return false,
            }
        }
    }

    fn border(&self, item: ItemId) -> Result<BorderAttributes> {
        Ok(self.get(item)?.border)
    }

    fn set_border(&mut self, item: ItemId, border: BorderAttributes) -> Result<()> {
        border.validate()?;
        let entry = self
            .items
            .get_mut(item)
            .ok_or(SceneError::ItemNotFound { id: item })?;
        entry.border = border;
        Ok(())
    }

    fn parent_of(&self, item: ItemId) -> Result<Option<ItemId>> {
        match self.get(item)?.location {
            Location::Root => Ok(None),
            Location::Child(parent) => Ok(Some(parent)),
            Location::Detached => Err(SceneError::NotAttached { id: item }.into()),
        }
    }

    fn row_of(&self, item: ItemId) -> Result<usize> {
        let parent = self.parent_of(item)?;
        self.children_of(parent)?
            .iter()
            .position(|id| *id == item)
            .ok_or_else(|| SceneError::NotAttached { id: item }.into())
    }

    fn children_of(&self, parent: Option<ItemId>) -> Result<&[ItemId]> {
        match parent {
            None => Ok(&self.roots),
            Some(id) => Ok(&self.get(id)?.children),
        }
    }

    fn detach(&mut self, item: ItemId) -> Result<()> {
        let parent = self.parent_of(item)?;
        let row = self.row_of(item)?;
        self.siblings_mut(parent)?.remove(row);
        self.items[item].location = Location::Detached;
        debug!("Detached item {} from row {}", item, row);
        Ok(())
    }

    fn insert_at(&mut self, parent: Option<ItemId>, row: usize, item: ItemId) -> Result<()> {
        if !self.get(item)?.is_detached() {
            return Err(SceneError::AlreadyAttached { id: item }.into());
        }
        if let Some(parent_id) = parent {
            self.get(parent_id)?;
            if self.is_self_or_ancestor(item, parent_id) {
                return Err(SceneError::Cycle { id: item }.into());
            }
        }

        let siblings = self.siblings_mut(parent)?;
        if row > siblings.len() {
            return Err(SceneError::RowOutOfRange {
                row,
                len: siblings.len(),
            }
            .into());
        }
        siblings.insert(row, item);

        self.items[item].location = match parent {
            Some(parent_id) => Location::Child(parent_id),
            None => Location::Root,
        };
        debug!("Inserted item {} at row {}", item, row);
        Ok(())
    }

    fn destroy(&mut self, item: ItemId) -> Result<()> {
        if !self.get(item)?.is_detached() {
            return Err(SceneError::AlreadyAttached { id: item }.into());
        }
        let doomed = self.subtree(item)?;
        for id in &doomed {
            self.items.remove(*id);
        }
        debug!("Destroyed {} item(s) rooted at {}", doomed.len(), item);
        Ok(())
    }

    fn canvas_size(&self) -> CanvasSize {
        self.canvas_size
    }

    fn set_canvas_size(&mut self, size: CanvasSize) -> Result<()> {
        size.validate()?;
        self.canvas_size = size;
        Ok(())
    }

    fn notify_changed(&self, change: SceneChange) {
        for (_, listener) in &self.listeners {
            listener.on_scene_changed(&change);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("items", &self.items.len())
            .field("roots", &self.roots)
            .field("canvas_size", &self.canvas_size)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photolayouts_core::Error;

    fn photo(scene: &mut Scene, parent: Option<ItemId>, name: &str) -> ItemId {
        scene
            .append_item(parent, ItemKind::Photo, name, BorderAttributes::default())
            .unwrap()
    }

    #[test]
    fn test_append_and_rows() {
        let mut scene = Scene::default();
        let a = photo(&mut scene, None, "a");
        let b = photo(&mut scene, None, "b");
        let c = photo(&mut scene, Some(a), "c");

        assert_eq!(scene.roots(), &[a, b]);
        assert_eq!(scene.row_of(b).unwrap(), 1);
        assert_eq!(scene.parent_of(c).unwrap(), Some(a));
        assert_eq!(scene.depth(c).unwrap(), 1);
        assert!(scene.is_attached(c));
    }

    #[test]
    fn test_detach_keeps_children_linked() {
        let mut scene = Scene::default();
        let group = photo(&mut scene, None, "group");
        let child = photo(&mut scene, Some(group), "child");

        scene.detach(group).unwrap();
        assert!(scene.roots().is_empty());
        assert!(!scene.is_attached(group));
        assert!(!scene.is_attached(child));
        assert_eq!(scene.children_of(Some(group)).unwrap(), &[child]);
        assert!(scene.parent_of(group).is_err());
    }

    #[test]
    fn test_insert_rejects_cycle_and_bad_row() {
        let mut scene = Scene::default();
        let group = photo(&mut scene, None, "group");
        let child = photo(&mut scene, Some(group), "child");

        scene.detach(group).unwrap();
        let err = scene.insert_at(Some(child), 0, group).unwrap_err();
        assert_eq!(err, Error::from(SceneError::Cycle { id: group }));

        let err = scene.insert_at(None, 3, group).unwrap_err();
        assert_eq!(err, Error::from(SceneError::RowOutOfRange { row: 3, len: 0 }));

        let err = scene.insert_at(None, 0, child).unwrap_err();
        assert_eq!(err, Error::from(SceneError::AlreadyAttached { id: child }));
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut scene = Scene::default();
        let group = photo(&mut scene, None, "group");
        let child = photo(&mut scene, Some(group), "child");

        assert!(scene.destroy(group).is_err());
        scene.detach(group).unwrap();
        scene.destroy(group).unwrap();

        assert!(!scene.contains(group));
        assert!(!scene.contains(child));
        assert!(scene.is_empty());
        assert!(scene.border(child).is_err());
    }

    #[test]
    fn test_snapshot_is_pre_order() {
        let mut scene = Scene::default();
        let a = photo(&mut scene, None, "a");
        let a1 = photo(&mut scene, Some(a), "a1");
        let b = photo(&mut scene, None, "b");

        let snapshot = scene.snapshot();
        let ids: Vec<_> = snapshot.entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, a1, b]);
        assert_eq!(snapshot.entries[1].parent, Some(a));
        assert_eq!(snapshot.entries[2].row, 1);
    }

    #[test]
    fn test_set_border_validates() {
        let mut scene = Scene::default();
        let a = photo(&mut scene, None, "a");
        let bad = BorderAttributes::default().with_width(-2.0);
        assert!(scene.set_border(a, bad).is_err());
        assert_eq!(scene.border(a).unwrap(), BorderAttributes::default());
    }
}
