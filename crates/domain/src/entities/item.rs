//! Item entity - An entry placed on a character's inventory grid
//!
//! Geometry is only ever changed through [`InventoryGrid`], which checks
//! bounds and overlap before committing. Outside the crate an `Item` is
//! read-only.
//!
//! [`InventoryGrid`]: crate::aggregates::InventoryGrid

use serde::{Deserialize, Serialize};

use crate::value_objects::{Footprint, GridPosition, ItemName, ItemSize};
use satchel_domain::{CharacterId, ItemId};

/// A placed inventory entry.
///
/// # Invariants
///
/// - `id` never changes after creation
/// - `name` is non-empty and trimmed (enforced by `ItemName`)
/// - `size` is at least 1x1 (enforced by `ItemSize`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    name: ItemName,
    position: GridPosition,
    size: ItemSize,
    /// Absent while the owning character has not been saved yet
    owner_id: Option<CharacterId>,
}

impl Item {
    pub(crate) fn new(name: ItemName, position: GridPosition, owner_id: Option<CharacterId>) -> Self {
        Self {
            id: ItemId::new(),
            name,
            position,
            size: ItemSize::UNIT,
            owner_id,
        }
    }

    /// Reconstruct from stored data
    pub fn from_parts(
        id: ItemId,
        name: ItemName,
        position: GridPosition,
        size: ItemSize,
        owner_id: Option<CharacterId>,
    ) -> Self {
        Self {
            id,
            name,
            position,
            size,
            owner_id,
        }
    }

    // Read-only accessors

    #[inline]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    #[inline]
    pub fn position(&self) -> GridPosition {
        self.position
    }

    #[inline]
    pub fn size(&self) -> ItemSize {
        self.size
    }

    #[inline]
    pub fn owner_id(&self) -> Option<CharacterId> {
        self.owner_id
    }

    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.size)
    }

    // Crate-private mutators, called by the grid after validation

    pub(crate) fn set_position(&mut self, position: GridPosition) {
        self.position = position;
    }

    pub(crate) fn set_size(&mut self, size: ItemSize) {
        self.size = size;
    }

    pub(crate) fn set_name(&mut self, name: ItemName) {
        self.name = name;
    }

    pub(crate) fn set_owner(&mut self, owner_id: Option<CharacterId>) {
        self.owner_id = owner_id;
    }
}
