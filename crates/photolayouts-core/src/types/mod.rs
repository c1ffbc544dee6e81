//! Identifier types shared across the workspace.

use std::fmt;

slotmap::new_key_type! {
    /// Generational handle to an item stored in the scene arena.
    ///
    /// Ids stay valid while the item is attached to the scene or held
    /// detached by a command. Once the arena entry is destroyed the id
    /// becomes stale and every lookup with it fails.
    pub struct ItemId;
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
