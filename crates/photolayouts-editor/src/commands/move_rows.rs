use photolayouts_core::{CommandError, ItemId, Result, SceneError};
use photolayouts_scene::{SceneChange, SceneModel};
use tracing::{debug, warn};

use super::Command;

/// Moves a contiguous run of sibling rows, either within the same parent
/// (reordering layers) or into another parent.
///
/// `destination_row` is expressed in the destination list as it looks
/// once the moved rows have been taken out.
#[derive(Debug, Clone)]
pub struct MoveRows {
    items: Vec<ItemId>,
    source_parent: Option<ItemId>,
    source_row: usize,
    destination_parent: Option<ItemId>,
    destination_row: usize,
    description: &'static str,
}

impl MoveRows {
    pub const MOVE_UP: &'static str = "Move layers up";
    pub const MOVE_DOWN: &'static str = "Move layers down";
    pub const CHANGE_PARENT: &'static str = "Change parent layer";

    /// Prepares moving `count` rows starting at `source_row`.
    pub fn new(
        scene: &dyn SceneModel,
        source_parent: Option<ItemId>,
        source_row: usize,
        count: usize,
        destination_parent: Option<ItemId>,
        destination_row: usize,
    ) -> Result<Self> {
        if count == 0 {
            return Err(invalid("nothing to move"));
        }
        for parent in [source_parent, destination_parent].into_iter().flatten() {
            if !scene.is_attached(parent) {
                return Err(SceneError::NotAttached { id: parent }.into());
            }
        }

        let siblings = scene.children_of(source_parent)?;
        let end = source_row
            .checked_add(count)
            .filter(|end| *end <= siblings.len())
            .ok_or(SceneError::RowOutOfRange {
                row: source_row,
                len: siblings.len(),
            })?;
        let items = siblings[source_row..end].to_vec();

        let mut ancestor = destination_parent;
        while let Some(id) = ancestor {
            if items.contains(&id) {
                return Err(SceneError::Cycle { id }.into());
            }
            ancestor = scene.parent_of(id)?;
        }

        let same_parent = source_parent == destination_parent;
        let mut available = scene.children_of(destination_parent)?.len();
        if same_parent {
            available -= count;
        }
        if destination_row > available {
            return Err(SceneError::RowOutOfRange {
                row: destination_row,
                len: available,
            }
            .into());
        }
        if same_parent && destination_row == source_row {
            return Err(invalid("rows are already in place"));
        }

        let description = if !same_parent {
            Self::CHANGE_PARENT
        } else if destination_row < source_row {
            Self::MOVE_UP
        } else {
            Self::MOVE_DOWN
        };

        Ok(Self {
            items,
            source_parent,
            source_row,
            destination_parent,
            destination_row,
            description,
        })
    }

    /// The moved items in their relative order.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn source(&self) -> (Option<ItemId>, usize) {
        (self.source_parent, self.source_row)
    }

    pub fn destination(&self) -> (Option<ItemId>, usize) {
        (self.destination_parent, self.destination_row)
    }

    /// Takes the run out of `from` and re-links it into `to`.
    fn relocate(
        &self,
        scene: &mut dyn SceneModel,
        from: (Option<ItemId>, usize),
        to: (Option<ItemId>, usize),
    ) -> Result<()> {
        let (from_parent, from_row) = from;
        let (to_parent, to_row) = to;

        let current = scene.children_of(from_parent)?;
        let run = from_row
            .checked_add(self.items.len())
            .and_then(|end| current.get(from_row..end));
        if run != Some(self.items.as_slice()) {
            let id = self.items[0];
            return Err(SceneError::Misplaced { id }.into());
        }
        if let Some(parent) = to_parent {
            if !scene.is_attached(parent) {
                return Err(SceneError::NotAttached { id: parent }.into());
            }
        }

        for item in self.items.iter().rev() {
            scene.detach(*item)?;
        }
        for (offset, item) in self.items.iter().enumerate() {
            if let Err(err) = scene.insert_at(to_parent, to_row + offset, *item) {
                self.roll_back(scene, from, to, offset);
                return Err(err);
            }
        }

        for (offset, item) in self.items.iter().enumerate() {
            scene.notify_changed(SceneChange::ItemRemoved {
                item: *item,
                parent: from_parent,
                row: from_row + offset,
            });
            scene.notify_changed(SceneChange::ItemInserted {
                item: *item,
                parent: to_parent,
                row: to_row + offset,
            });
        }
        Ok(())
    }

    fn roll_back(
        &self,
        scene: &mut dyn SceneModel,
        from: (Option<ItemId>, usize),
        to: (Option<ItemId>, usize),
        inserted: usize,
    ) {
        for item in self.items[..inserted].iter().rev() {
            if let Err(err) = scene.detach(*item) {
                warn!("Failed to unlink item {} during rollback: {}", item, err);
            }
        }
        for (offset, item) in self.items.iter().enumerate() {
            if let Err(err) = scene.insert_at(from.0, from.1 + offset, *item) {
                warn!("Failed to relink item {} during rollback: {}", item, err);
            }
        }
        debug!("Rolled back move towards row {}", to.1);
    }
}

impl Command for MoveRows {
    fn apply(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.relocate(
            scene,
            (self.source_parent, self.source_row),
            (self.destination_parent, self.destination_row),
        )?;
        debug!(
            "Moved {} row(s) from {} to {}",
            self.items.len(),
            self.source_row,
            self.destination_row
        );
        Ok(())
    }

    fn reverse(&mut self, scene: &mut dyn SceneModel) -> Result<()> {
        self.relocate(
            scene,
            (self.destination_parent, self.destination_row),
            (self.source_parent, self.source_row),
        )?;
        debug!(
            "Moved {} row(s) back from {} to {}",
            self.items.len(),
            self.destination_row,
            self.source_row
        );
        Ok(())
    }

    fn description(&self) -> &str {
        self.description
    }
}

fn invalid(reason: &str) -> photolayouts_core::Error {
    CommandError::InvalidMove {
        reason: reason.to_string(),
    }
    .into()
}
