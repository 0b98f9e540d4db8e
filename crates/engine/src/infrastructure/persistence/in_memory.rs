//! In-process storage adapters.
//!
//! Back sessions with shared maps instead of the hosted backend, for local
//! play, demos and tests. Safe to share between sessions behind an `Arc`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use satchel_domain::{CharacterId, ItemId};

use crate::infrastructure::ports::{
    InventoryProfile, InventoryProfileRepo, ItemRepo, PersistedItem, RepoError,
};

#[derive(Debug, Clone)]
struct StoredItem {
    /// Order of first insert; updates keep it
    seq: u64,
    record: PersistedItem,
}

/// Item store keyed by item id.
#[derive(Debug, Default)]
pub struct InMemoryItemRepo {
    items: DashMap<ItemId, StoredItem>,
    next_seq: AtomicU64,
    offline: AtomicBool,
}

impl InMemoryItemRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<PersistedItem> {
        self.items.get(&id).map(|entry| entry.value().record.clone())
    }

    /// Make every call fail with `RepoError::Storage` until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self, operation: &'static str) -> Result<(), RepoError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RepoError::storage(operation, "store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ItemRepo for InMemoryItemRepo {
    async fn list_items(&self, owner_id: CharacterId) -> Result<Vec<PersistedItem>, RepoError> {
        self.ensure_online("list_items")?;
        let mut items: Vec<StoredItem> = self
            .items
            .iter()
            .filter(|entry| entry.value().record.owner_id == Some(owner_id))
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.seq);
        Ok(items.into_iter().map(|item| item.record).collect())
    }

    async fn upsert_item(&self, item: &PersistedItem) -> Result<(), RepoError> {
        self.ensure_online("upsert_item")?;
        if item.owner_id.is_none() {
            return Err(RepoError::MissingOwner(item.id));
        }
        self.items
            .entry(item.id)
            .and_modify(|stored| stored.record = item.clone())
            .or_insert_with(|| StoredItem {
                seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
                record: item.clone(),
            });
        Ok(())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), RepoError> {
        self.ensure_online("delete_item")?;
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found("Item", id))
    }
}

/// Inventory profile store keyed by character.
#[derive(Debug, Default)]
pub struct InMemoryInventoryProfileRepo {
    profiles: DashMap<CharacterId, InventoryProfile>,
}

impl InMemoryInventoryProfileRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryProfileRepo for InMemoryInventoryProfileRepo {
    async fn load_profile(
        &self,
        owner_id: CharacterId,
    ) -> Result<Option<InventoryProfile>, RepoError> {
        Ok(self.profiles.get(&owner_id).map(|entry| *entry.value()))
    }

    async fn save_profile(
        &self,
        owner_id: CharacterId,
        profile: &InventoryProfile,
    ) -> Result<(), RepoError> {
        self.profiles.insert(owner_id, *profile);
        Ok(())
    }
}
