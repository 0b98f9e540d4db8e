//! Inventory grid mutation outcomes
//!
//! These types communicate what happened when the grid was modified, so the
//! caller knows what to persist.

use crate::value_objects::{GridPosition, ItemName, ItemSize};
use crate::ItemId;

/// Outcome of moving an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMoved {
    Moved {
        item_id: ItemId,
        from: GridPosition,
        to: GridPosition,
    },
    /// Target was the current anchor
    Unchanged { item_id: ItemId },
}

/// Outcome of resizing an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemResized {
    Resized {
        item_id: ItemId,
        from: ItemSize,
        to: ItemSize,
    },
    /// Clamping brought the size back to what it already was
    Unchanged { item_id: ItemId, size: ItemSize },
}

/// Outcome of renaming an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRenamed {
    Renamed {
        item_id: ItemId,
        from: ItemName,
        to: ItemName,
    },
    /// Blank input; the old name is kept
    Cancelled { item_id: ItemId },
    /// The trimmed input equals the current name
    Unchanged { item_id: ItemId },
}

/// Outcome of changing the grid's row count
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCountChanged {
    Changed {
        from: u32,
        to: u32,
        /// Items now lying (partly) below the last row
        stranded: Vec<ItemId>,
    },
    Unchanged { rows: u32 },
}

impl ItemMoved {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

impl ItemResized {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Resized { .. })
    }
}

impl ItemRenamed {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Renamed { .. })
    }
}

impl RowCountChanged {
    pub fn is_change(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }

    pub fn rows(&self) -> u32 {
        match self {
            Self::Changed { to, .. } => *to,
            Self::Unchanged { rows } => *rows,
        }
    }
}
