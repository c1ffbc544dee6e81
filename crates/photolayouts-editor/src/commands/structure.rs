use std::cmp::Ordering;

use photolayouts_core::{ItemId, Result, SceneError};
use photolayouts_scene::{SceneChange, SceneModel};
use tracing::{debug, warn};

use super::{ensure_attached, Command};

/// Where one item of a removed or inserted subtree belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub item: ItemId,
    pub parent: Option<ItemId>,
    pub row: usize,
    /// Levels below the subtree root (the root itself is 0).
    pub depth: usize,
    sequence: usize,
}

impl Placement {
    /// Order in which items must be re-linked: parents before children and
    /// lower rows before higher ones. Recording order breaks ties.
    pub fn restore_order(&self, other: &Self) -> Ordering {
        self.depth
            .cmp(&other.depth)
            .then(self.row.cmp(&other.row))
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// A subtree held by a structural command, either linked into the scene
/// or fully detached (every item unlinked from its parent).
#[derive(Debug)]
struct Subtree {
    placements: Vec<Placement>,
    detached: bool,
}

impl Subtree {
    fn record(
        scene: &dyn SceneModel,
        root: ItemId,
        parent: Option<ItemId>,
        row: usize,
    ) -> Result<Self> {
        let mut placements = Vec::new();
        let mut stack = vec![(root, parent, row, 0usize)];
        while let Some((item, parent, row, depth)) = stack.pop() {
            placements.push(Placement {
                item,
                parent,
                row,
                depth,
                sequence: placements.len(),
            });
            let children = scene.children_of(Some(item))?;
            for (child_row, child) in children.iter().enumerate().rev() {
                stack.push((*child, Some(item), child_row, depth + 1));
            }
        }
        placements.sort_by(Placement::restore_order);
        Ok(Self {
            placements,
            detached: false,
        })
    }

    fn root(&self) -> Placement {
        self.placements[0]
    }

    fn change(&self, inserted: bool) -> SceneChange {
        let root = self.root();
        if inserted {
            SceneChange::ItemInserted {
                item: root.item,
                parent: root.parent,
                row: root.row,
            }
        } else {
            SceneChange::ItemRemoved {
                item: root.item,
                parent: root.parent,
                row: root.row,
            }
        }
    }

    fn check_linked(&self, scene: &dyn SceneModel) -> Result<()> {
        ensure_attached(scene, self.root().item)?;
        for placement in &self.placements {
            let item = placement.item;
            if !scene.contains(item) {
                return Err(SceneError::ItemNotFound { id: item }.into());
            }
            let in_place = scene.parent_of(item).ok() == Some(placement.parent)
                && scene.row_of(item).ok() == Some(placement.row);
            if !in_place {
                return Err(SceneError::Misplaced { id: item }.into());
            }
        }
        Ok(())
    }

    fn check_detached(&self, scene: &dyn SceneModel) -> Result<()> {
        for placement in &self.placements {
            let item = placement.item;
            if !scene.contains(item) {
                return Err(SceneError::ItemNotFound { id: item }.into());
            }
            if scene.is_attached(item) {
                return Err(SceneError::AlreadyAttached { id: item }.into());
            }
        }
        if let Some(parent) = self.root().parent {
            ensure_attached(scene, parent)?;
        }
        Ok(())
    }

    /// Unlinks every item, deepest and highest rows first.
    fn detach(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.check_linked(scene)?;
        for index in (0..self.placements.len()).rev() {
            if let Err(err) = scene.detach(self.placements[index].item) {
                self.relink(scene, index + 1);
                return Err(err);
            }
        }
        self.detached = true;
        scene.notify_changed(self.change(false));
        Ok(())
    }

    /// Links every item back, parents first.
    fn restore(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.check_detached(scene)?;
        for index in 0..self.placements.len() {
            let placement = self.placements[index];
            if let Err(err) = scene.insert_at(placement.parent, placement.row, placement.item) {
                self.unlink(scene, index);
                return Err(err);
            }
        }
        self.detached = false;
        scene.notify_changed(self.change(true));
        Ok(())
    }

    fn relink(&self, scene: &mut dyn SceneModel, from: usize) {
        for placement in &self.placements[from..] {
            if let Err(err) = scene.insert_at(placement.parent, placement.row, placement.item) {
                warn!("Failed to relink item {}: {}", placement.item, err);
            }
        }
    }

    fn unlink(&self, scene: &mut dyn SceneModel, until: usize) {
        for placement in self.placements[..until].iter().rev() {
            if let Err(err) = scene.detach(placement.item) {
                warn!("Failed to unlink item {}: {}", placement.item, err);
            }
        }
    }

    fn release(&mut self, scene: &mut dyn SceneModel) {
        if !self.detached {
            return;
        }
        for placement in self.placements.iter().rev() {
            if let Err(err) = scene.destroy(placement.item) {
                warn!("Failed to destroy item {}: {}", placement.item, err);
            }
        }
        self.detached = false;
        debug!(
            "Released {} detached item(s) rooted at {}",
            self.placements.len(),
            self.root().item
        );
    }
}

/// Removes an item and its descendants from the scene.
///
/// The items stay alive while the command is in the history so that undo
/// can put them back with the same ids. They are destroyed when the command
/// is dropped from the history while still removed.
#[derive(Debug)]
pub struct RemoveItem {
    subtree: Subtree,
}

impl RemoveItem {
    pub const DESCRIPTION: &'static str = "Remove item";

    pub fn new(scene: &dyn SceneModel, item: ItemId) -> Result<Self> {
        ensure_attached(scene, item)?;
        let parent = scene.parent_of(item)?;
        let row = scene.row_of(item)?;
        Ok(Self {
            subtree: Subtree::record(scene, item, parent, row)?,
        })
    }

    pub fn item(&self) -> ItemId {
        self.subtree.root().item
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.subtree.root().parent
    }

    pub fn row(&self) -> usize {
        self.subtree.root().row
    }

    /// The removed items in re-link order.
    pub fn placements(&self) -> &[Placement] {
        &self.subtree.placements
    }
}

impl Command for RemoveItem {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.subtree.detach(scene)?;
        debug!("Removed item {}", self.item());
        Ok(())
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.subtree.restore(scene)?;
        debug!("Restored item {} at row {}", self.item(), self.row());
        Ok(())
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn release(&mut self, scene: &mut dyn SceneModel) {
        self.subtree.release(scene);
    }
}

/// Links a detached item (and whatever hangs below it) into the scene.
///
/// The counterpart of [`RemoveItem`]: the command owns the item while it is
/// undone and destroys it if it leaves the history in that state.
#[derive(Debug)]
pub struct InsertItem {
    subtree: Subtree,
}

impl InsertItem {
    pub const DESCRIPTION: &'static str = "Add item";

    /// Prepares inserting `item` under `parent` at `row`.
    ///
    /// `item` must be a live entry that is not part of the graph.
    pub fn new(
        scene: &mut dyn SceneModel,
        item: ItemId,
        parent: Option<ItemId>,
        row: usize,
    ) -> Result<Self> {
        if !scene.contains(item) {
            return Err(SceneError::ItemNotFound { id: item }.into());
        }
        if scene.parent_of(item).is_ok() {
            return Err(SceneError::AlreadyAttached { id: item }.into());
        }
        if let Some(parent_id) = parent {
            ensure_attached(&*scene, parent_id)?;
        }
        let len = scene.children_of(parent)?.len();
        if row > len {
            return Err(SceneError::RowOutOfRange { row, len }.into());
        }

        let mut subtree = Subtree::record(&*scene, item, parent, row)?;
        for placement in subtree.placements[1..].iter().rev() {
            scene.detach(placement.item)?;
        }
        subtree.detached = true;
        Ok(Self { subtree })
    }

    pub fn item(&self) -> ItemId {
        self.subtree.root().item
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.subtree.root().parent
    }

    pub fn row(&self) -> usize {
        self.subtree.root().row
    }
}

impl Command for InsertItem {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.subtree.restore(scene)?;
        debug!("Inserted item {} at row {}", self.item(), self.row());
        Ok(())
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.subtree.detach(scene)?;
        debug!("Withdrew item {}", self.item());
        Ok(())
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn release(&mut self, scene: &mut dyn SceneModel) {
        self.subtree.release(scene);
    }
}
