//! Repository port traits.

use async_trait::async_trait;
use satchel_domain::{CharacterId, ItemId};

use super::{InventoryProfile, PersistedItem, RepoError};

// =============================================================================
// Item storage
// =============================================================================

/// Item persistence collaborator, keyed by item id and listed by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepo: Send + Sync {
    /// Items of one owner, in the order they were first stored. Sessions
    /// render items in this order.
    async fn list_items(&self, owner_id: CharacterId) -> Result<Vec<PersistedItem>, RepoError>;
    /// Create or update one item by id.
    async fn upsert_item(&self, item: &PersistedItem) -> Result<(), RepoError>;
    async fn delete_item(&self, id: ItemId) -> Result<(), RepoError>;
}

// =============================================================================
// Per-character inventory profile (row count, purse)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryProfileRepo: Send + Sync {
    async fn load_profile(
        &self,
        owner_id: CharacterId,
    ) -> Result<Option<InventoryProfile>, RepoError>;
    async fn save_profile(
        &self,
        owner_id: CharacterId,
        profile: &InventoryProfile,
    ) -> Result<(), RepoError>;
}
