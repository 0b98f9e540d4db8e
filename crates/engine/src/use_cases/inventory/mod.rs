//! Inventory use cases.
//!
//! An [`InventorySession`] owns one character's grid and purse. Each
//! operation runs the placement rules on the in-memory grid first and only
//! then writes to storage. A failed write is logged and returned next to the
//! outcome; it never undoes the in-memory change.

mod error;
mod types;

use std::sync::Arc;

use tokio::sync::Mutex;

use satchel_domain::{
    CharacterId, Currency, DomainError, GridLimits, InventoryGrid, Item, ItemId, ItemMoved,
    ItemRenamed, ItemResized, RowCountChanged,
};

use crate::infrastructure::config::InventorySettings;
use crate::infrastructure::ports::{
    InventoryProfile, InventoryProfileRepo, ItemRepo, PersistedItem,
};

pub use error::InventoryError;
pub use types::{Committed, Persistence};

/// A session handed to several tasks; the lock serializes gestures.
pub type SharedInventorySession = Arc<Mutex<InventorySession>>;

/// One character's inventory editing session.
///
/// Mutations take `&mut self`, so gestures are applied one at a time. Use
/// [`InventorySession::into_shared`] to share it between tasks.
pub struct InventorySession {
    owner_id: Option<CharacterId>,
    grid: InventoryGrid,
    currency: Currency,
    item_repo: Arc<dyn ItemRepo>,
    profile_repo: Arc<dyn InventoryProfileRepo>,
}

impl InventorySession {
    /// Load a saved character's inventory.
    ///
    /// Falls back to `settings.default_rows` and an empty purse when no
    /// profile is stored. Stored items are kept as they are; records that
    /// cannot be read are skipped.
    pub async fn open(
        owner_id: CharacterId,
        settings: &InventorySettings,
        item_repo: Arc<dyn ItemRepo>,
        profile_repo: Arc<dyn InventoryProfileRepo>,
    ) -> Result<Self, InventoryError> {
        let limits = grid_limits(settings)?;
        let profile = profile_repo.load_profile(owner_id).await?;
        let (rows, currency) = match profile {
            Some(profile) => (profile.rows, profile.currency),
            None => (settings.default_rows, Currency::default()),
        };

        let records = item_repo.list_items(owner_id).await?;
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            let id = record.id;
            match Item::try_from(record) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(
                        owner_id = %owner_id,
                        item_id = %id,
                        error = %e,
                        "Skipping unreadable stored item"
                    );
                }
            }
        }

        let grid = InventoryGrid::from_parts(limits, rows, settings.shrink_policy, items);
        for id in grid.stranded_items() {
            tracing::warn!(owner_id = %owner_id, item_id = %id, "Stored item lies outside the grid");
        }
        for (a, b) in grid.collisions() {
            tracing::warn!(owner_id = %owner_id, item_a = %a, item_b = %b, "Stored items overlap");
        }
        tracing::debug!(
            owner_id = %owner_id,
            rows = grid.rows(),
            items = grid.len(),
            "Opened inventory"
        );

        Ok(Self {
            owner_id: Some(owner_id),
            grid,
            currency,
            item_repo,
            profile_repo,
        })
    }

    /// Start an inventory for a character that has not been saved yet.
    ///
    /// Mutations apply in memory; nothing is written until
    /// [`Self::attach_owner`] is called.
    pub fn new_unsaved(
        settings: &InventorySettings,
        item_repo: Arc<dyn ItemRepo>,
        profile_repo: Arc<dyn InventoryProfileRepo>,
    ) -> Result<Self, InventoryError> {
        let limits = grid_limits(settings)?;
        Ok(Self {
            owner_id: None,
            grid: InventoryGrid::new(limits, settings.default_rows, settings.shrink_policy),
            currency: Currency::default(),
            item_repo,
            profile_repo,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn grid(&self) -> &InventoryGrid {
        &self.grid
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn owner_id(&self) -> Option<CharacterId> {
        self.owner_id
    }

    pub fn into_shared(self) -> SharedInventorySession {
        Arc::new(Mutex::new(self))
    }

    // =========================================================================
    // Placement operations
    // =========================================================================

    pub async fn add_item(&mut self, name: &str) -> Result<Committed<Item>, InventoryError> {
        let item = self
            .grid
            .add_item(name, self.owner_id)
            .map_err(|e| rejected("add_item", e))?;
        tracing::info!(item_id = %item.id(), name = %item.name(), position = %item.position(), "Added item");

        let persistence = self.persist_item(item.id()).await;
        Ok(Committed::new(item, persistence))
    }

    pub async fn remove_item(&mut self, id: ItemId) -> Result<Committed<Item>, InventoryError> {
        let item = self
            .grid
            .remove_item(id)
            .map_err(|e| rejected("remove_item", e))?;
        tracing::info!(item_id = %id, name = %item.name(), "Removed item");

        let persistence = self.delete_item(id).await;
        Ok(Committed::new(item, persistence))
    }

    pub async fn move_item(
        &mut self,
        id: ItemId,
        x: u32,
        y: u32,
    ) -> Result<Committed<ItemMoved>, InventoryError> {
        let outcome = self
            .grid
            .move_item(id, x, y)
            .map_err(|e| rejected("move_item", e))?;

        let persistence = if outcome.is_change() {
            tracing::debug!(item_id = %id, x, y, "Moved item");
            self.persist_item(id).await
        } else {
            Persistence::Skipped
        };
        Ok(Committed::new(outcome, persistence))
    }

    /// Drag-end variant of [`Self::move_item`]: a drop on an invalid target
    /// is discarded and yields `Ok(None)`.
    pub async fn drop_item(
        &mut self,
        id: ItemId,
        x: u32,
        y: u32,
    ) -> Result<Option<Committed<ItemMoved>>, InventoryError> {
        match self.move_item(id, x, y).await {
            Ok(committed) => Ok(Some(committed)),
            Err(e) if e.is_soft_rejection() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn resize_item(
        &mut self,
        id: ItemId,
        delta_w: i32,
        delta_h: i32,
    ) -> Result<Committed<ItemResized>, InventoryError> {
        let outcome = self
            .grid
            .resize_item(id, delta_w, delta_h)
            .map_err(|e| rejected("resize_item", e))?;

        let persistence = match &outcome {
            ItemResized::Resized { to, .. } => {
                tracing::debug!(item_id = %id, size = %to, "Resized item");
                self.persist_item(id).await
            }
            ItemResized::Unchanged { .. } => Persistence::Skipped,
        };
        Ok(Committed::new(outcome, persistence))
    }

    pub async fn rename_item(
        &mut self,
        id: ItemId,
        new_name: &str,
    ) -> Result<Committed<ItemRenamed>, InventoryError> {
        let outcome = self
            .grid
            .rename_item(id, new_name)
            .map_err(|e| rejected("rename_item", e))?;

        let persistence = match &outcome {
            ItemRenamed::Renamed { to, .. } => {
                tracing::debug!(item_id = %id, name = %to, "Renamed item");
                self.persist_item(id).await
            }
            ItemRenamed::Cancelled { .. } | ItemRenamed::Unchanged { .. } => {
                Persistence::Skipped
            }
        };
        Ok(Committed::new(outcome, persistence))
    }

    pub async fn set_row_count(&mut self, rows: u32) -> Committed<RowCountChanged> {
        let outcome = self.grid.set_row_count(rows);

        let persistence = match &outcome {
            RowCountChanged::Changed { from, to, stranded } => {
                if !stranded.is_empty() {
                    tracing::info!(
                        from,
                        to,
                        stranded = stranded.len(),
                        "Row count shrink left items outside the grid"
                    );
                }
                self.persist_profile().await
            }
            RowCountChanged::Unchanged { .. } => Persistence::Skipped,
        };
        Committed::new(outcome, persistence)
    }

    /// Replace the purse; negative amounts are clamped to zero.
    pub async fn set_currency(&mut self, gold: i64, silver: i64, copper: i64) -> Committed<Currency> {
        let currency = Currency::from_input(gold, silver, copper);
        if currency == self.currency {
            return Committed::new(currency, Persistence::Skipped);
        }

        self.currency = currency;
        let persistence = self.persist_profile().await;
        Committed::new(currency, persistence)
    }

    /// Bind an unsaved inventory to its newly saved character and write
    /// everything out.
    ///
    /// # Errors
    ///
    /// `Validation` if the session already has an owner.
    pub async fn attach_owner(
        &mut self,
        owner_id: CharacterId,
    ) -> Result<Committed<Vec<ItemId>>, InventoryError> {
        if let Some(existing) = self.owner_id {
            let e = DomainError::validation(format!("Inventory already belongs to {}", existing));
            return Err(rejected("attach_owner", e));
        }

        self.owner_id = Some(owner_id);
        let adopted = self.grid.assign_owner(owner_id);
        tracing::info!(owner_id = %owner_id, items = adopted.len(), "Attached inventory to character");

        let mut persistence = self.persist_profile().await;
        let ids: Vec<ItemId> = self.grid.items().iter().map(Item::id).collect();
        for id in ids {
            persistence = persistence.and(self.persist_item(id).await);
        }
        Ok(Committed::new(adopted, persistence))
    }

    // =========================================================================
    // Storage
    // =========================================================================

    async fn persist_item(&self, id: ItemId) -> Persistence {
        if self.owner_id.is_none() {
            tracing::debug!(item_id = %id, "No owner yet, not saving item");
            return Persistence::Skipped;
        }
        let Some(item) = self.grid.item(id) else {
            return Persistence::Skipped;
        };

        let record = PersistedItem::from(item);
        match self.item_repo.upsert_item(&record).await {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(item_id = %id, error = %e, "Failed to save item");
                Persistence::Failed(e)
            }
        }
    }

    async fn delete_item(&self, id: ItemId) -> Persistence {
        if self.owner_id.is_none() {
            return Persistence::Skipped;
        }
        match self.item_repo.delete_item(id).await {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(item_id = %id, error = %e, "Failed to delete item");
                Persistence::Failed(e)
            }
        }
    }

    async fn persist_profile(&self) -> Persistence {
        let Some(owner_id) = self.owner_id else {
            return Persistence::Skipped;
        };
        let profile = InventoryProfile {
            rows: self.grid.rows(),
            currency: self.currency,
        };
        match self.profile_repo.save_profile(owner_id, &profile).await {
            Ok(()) => Persistence::Saved,
            Err(e) => {
                tracing::warn!(owner_id = %owner_id, error = %e, "Failed to save inventory profile");
                Persistence::Failed(e)
            }
        }
    }
}

fn grid_limits(settings: &InventorySettings) -> Result<GridLimits, InventoryError> {
    settings
        .validate()
        .and_then(|()| settings.limits())
        .map_err(|e| InventoryError::Settings(format!("{:#}", e)))
}

/// Log a refused operation at a level matching how the UI treats it.
fn rejected(operation: &'static str, error: DomainError) -> InventoryError {
    if error.is_soft_rejection() {
        tracing::debug!(operation, error = %error, "Placement rejected");
    } else if error.is_not_found() {
        tracing::warn!(operation, error = %error, "Stale item reference");
    } else {
        tracing::info!(operation, error = %error, "Inventory operation refused");
    }
    InventoryError::Domain(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        GridRect, MockInventoryProfileRepo, MockItemRepo, RepoError,
    };
    use satchel_domain::{GridPosition, ItemSize, RowShrinkPolicy};

    fn settings() -> InventorySettings {
        InventorySettings::default()
    }

    fn record(owner: CharacterId, name: &str, x: u32, y: u32, w: u32, h: u32) -> PersistedItem {
        PersistedItem {
            id: ItemId::new(),
            owner_id: Some(owner),
            name: name.to_string(),
            grid: GridRect {
                grid_x: x,
                grid_y: y,
                w,
                h,
            },
        }
    }

    async fn open_with(
        owner: CharacterId,
        stored: Vec<PersistedItem>,
        item_repo: MockItemRepo,
        profile_repo: MockInventoryProfileRepo,
    ) -> InventorySession {
        let mut item_repo = item_repo;
        item_repo
            .expect_list_items()
            .withf(move |id| *id == owner)
            .times(1)
            .returning(move |_| Ok(stored.clone()));
        let mut profile_repo = profile_repo;
        profile_repo
            .expect_load_profile()
            .returning(|_| Ok(None));
        InventorySession::open(owner, &settings(), Arc::new(item_repo), Arc::new(profile_repo))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn open_uses_stored_profile() {
        let owner = CharacterId::new();
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_list_items().returning(|_| Ok(vec![]));
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo.expect_load_profile().returning(|_| {
            Ok(Some(InventoryProfile {
                rows: 9,
                currency: Currency::new(4, 0, 12),
            }))
        });

        let session =
            InventorySession::open(owner, &settings(), Arc::new(item_repo), Arc::new(profile_repo))
                .await
                .unwrap();
        assert_eq!(session.grid().rows(), 9);
        assert_eq!(session.currency(), Currency::new(4, 0, 12));
        assert_eq!(session.owner_id(), Some(owner));
    }

    #[tokio::test]
    async fn open_defaults_without_profile_and_skips_bad_records() {
        let owner = CharacterId::new();
        let good = record(owner, "Rope", 2, 1, 1, 1);
        let bad = record(owner, "   ", 3, 1, 1, 1);
        let session = open_with(
            owner,
            vec![good.clone(), bad],
            MockItemRepo::new(),
            MockInventoryProfileRepo::new(),
        )
        .await;

        assert_eq!(session.grid().rows(), settings().default_rows);
        assert_eq!(session.grid().len(), 1);
        assert_eq!(session.grid().items()[0].id(), good.id);
    }

    #[tokio::test]
    async fn open_keeps_out_of_bounds_items() {
        let owner = CharacterId::new();
        let stranded = record(owner, "Anvil", 1, 9, 1, 1);
        let session = open_with(
            owner,
            vec![stranded.clone()],
            MockItemRepo::new(),
            MockInventoryProfileRepo::new(),
        )
        .await;
        assert_eq!(session.grid().stranded_items(), vec![stranded.id]);
    }

    #[tokio::test]
    async fn open_propagates_load_failures() {
        let mut item_repo = MockItemRepo::new();
        item_repo
            .expect_list_items()
            .returning(|_| Err(RepoError::storage("list_items", "offline")));
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo.expect_load_profile().returning(|_| Ok(None));

        let result = InventorySession::open(
            CharacterId::new(),
            &settings(),
            Arc::new(item_repo),
            Arc::new(profile_repo),
        )
        .await;
        assert!(matches!(result, Err(InventoryError::Repo(_))));
    }

    #[tokio::test]
    async fn add_persists_the_new_item() {
        let owner = CharacterId::new();
        let mut item_repo = MockItemRepo::new();
        item_repo
            .expect_upsert_item()
            .withf(move |rec| {
                rec.owner_id == Some(owner)
                    && rec.name == "Sword"
                    && rec.grid
                        == GridRect {
                            grid_x: 1,
                            grid_y: 1,
                            w: 1,
                            h: 1,
                        }
            })
            .times(1)
            .returning(|_| Ok(()));
        let mut session = open_with(owner, vec![], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.add_item("Sword").await.unwrap();
        assert_eq!(committed.outcome.position(), GridPosition::new(1, 1));
        assert!(committed.persistence.is_saved());
    }

    #[tokio::test]
    async fn storage_failure_does_not_roll_back() {
        let owner = CharacterId::new();
        let mut item_repo = MockItemRepo::new();
        item_repo
            .expect_upsert_item()
            .returning(|_| Err(RepoError::storage("upsert_item", "unauthorized")));
        let mut session = open_with(owner, vec![], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.add_item("Sword").await.unwrap();
        assert!(committed.persistence.is_failed());
        assert_eq!(session.grid().len(), 1);
        assert!(session.grid().item(committed.outcome.id()).is_some());
    }

    #[tokio::test]
    async fn rejected_moves_never_touch_storage() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 1, 1, 2, 2);
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_upsert_item().times(0);
        let mut session =
            open_with(owner, vec![a.clone()], item_repo, MockInventoryProfileRepo::new()).await;

        let before = session.grid().clone();
        let err = session.move_item(a.id, 5, 5).await.unwrap_err();
        assert!(err.is_soft_rejection());
        assert_eq!(session.grid(), &before);
    }

    #[tokio::test]
    async fn drop_on_invalid_target_is_discarded() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 1, 1, 1, 1);
        let b = record(owner, "B", 2, 1, 1, 1);
        let mut session = open_with(
            owner,
            vec![a.clone(), b],
            MockItemRepo::new(),
            MockInventoryProfileRepo::new(),
        )
        .await;

        assert!(session.drop_item(a.id, 2, 1).await.unwrap().is_none());
        assert!(session.drop_item(a.id, 9, 1).await.unwrap().is_none());
        let err = session.drop_item(ItemId::new(), 3, 3).await.unwrap_err();
        assert!(matches!(
            err.as_domain(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn drop_on_valid_target_persists() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 1, 1, 1, 1);
        let id = a.id;
        let mut item_repo = MockItemRepo::new();
        item_repo
            .expect_upsert_item()
            .withf(move |rec| rec.id == id && rec.grid.grid_x == 3 && rec.grid.grid_y == 2)
            .times(1)
            .returning(|_| Ok(()));
        let mut session = open_with(owner, vec![a], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.drop_item(id, 3, 2).await.unwrap().unwrap();
        assert!(committed.outcome.is_change());
        assert!(committed.persistence.is_saved());
    }

    #[tokio::test]
    async fn moving_onto_itself_skips_storage() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 2, 2, 1, 1);
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_upsert_item().times(0);
        let mut session =
            open_with(owner, vec![a.clone()], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.move_item(a.id, 2, 2).await.unwrap();
        assert!(matches!(committed.persistence, Persistence::Skipped));
    }

    #[tokio::test]
    async fn resize_overlap_is_rejected_and_unsaved() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 1, 1, 1, 1);
        let b = record(owner, "B", 2, 1, 1, 1);
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_upsert_item().times(0);
        let mut session =
            open_with(owner, vec![a.clone(), b], item_repo, MockInventoryProfileRepo::new()).await;

        let err = session.resize_item(a.id, 1, 0).await.unwrap_err();
        assert!(err.is_soft_rejection());
        assert_eq!(session.grid().item(a.id).unwrap().size(), ItemSize::UNIT);
    }

    #[tokio::test]
    async fn blank_rename_is_a_cancelled_success() {
        let owner = CharacterId::new();
        let a = record(owner, "Rope", 1, 1, 1, 1);
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_upsert_item().times(0);
        let mut session =
            open_with(owner, vec![a.clone()], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.rename_item(a.id, "   ").await.unwrap();
        assert_eq!(committed.outcome, ItemRenamed::Cancelled { item_id: a.id });
        assert_eq!(session.grid().item(a.id).unwrap().name().as_str(), "Rope");
    }

    #[tokio::test]
    async fn rename_to_same_name_is_unchanged_and_not_saved() {
        let owner = CharacterId::new();
        let a = record(owner, "Rope", 1, 1, 1, 1);
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_upsert_item().times(0);
        let mut session =
            open_with(owner, vec![a.clone()], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.rename_item(a.id, "Rope ").await.unwrap();
        assert_eq!(committed.outcome, ItemRenamed::Unchanged { item_id: a.id });
        assert!(matches!(committed.persistence, Persistence::Skipped));
    }

    #[tokio::test]
    async fn inconsistent_settings_refuse_to_start_a_session() {
        let bad = InventorySettings {
            max_rows: 3,
            default_rows: 9,
            ..InventorySettings::default()
        };

        // No expectations: the repositories must not be touched
        let err = InventorySession::open(
            CharacterId::new(),
            &bad,
            Arc::new(MockItemRepo::new()),
            Arc::new(MockInventoryProfileRepo::new()),
        )
        .await
        .err()
        .unwrap();
        assert!(matches!(
            &err,
            InventoryError::Settings(msg) if msg.contains("SATCHEL_GRID_DEFAULT_ROWS")
        ));

        let err = InventorySession::new_unsaved(
            &InventorySettings {
                columns: 0,
                ..InventorySettings::default()
            },
            Arc::new(MockItemRepo::new()),
            Arc::new(MockInventoryProfileRepo::new()),
        )
        .err()
        .unwrap();
        assert!(matches!(err, InventoryError::Settings(_)));
        assert!(err.as_domain().is_none());
    }

    #[tokio::test]
    async fn remove_deletes_from_storage() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 1, 1, 1, 1);
        let id = a.id;
        let mut item_repo = MockItemRepo::new();
        item_repo
            .expect_delete_item()
            .withf(move |deleted| *deleted == id)
            .times(1)
            .returning(|_| Ok(()));
        let mut session = open_with(owner, vec![a], item_repo, MockInventoryProfileRepo::new()).await;

        let committed = session.remove_item(id).await.unwrap();
        assert_eq!(committed.outcome.id(), id);
        assert!(session.grid().is_empty());
    }

    #[tokio::test]
    async fn shrinking_rows_saves_the_profile_and_strands() {
        let owner = CharacterId::new();
        let a = record(owner, "A", 1, 4, 1, 1);
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo
            .expect_save_profile()
            .withf(move |id, profile| *id == owner && profile.rows == 2)
            .times(1)
            .returning(|_, _| Ok(()));
        let mut session = open_with(owner, vec![a.clone()], MockItemRepo::new(), profile_repo).await;

        let committed = session.set_row_count(2).await;
        assert_eq!(
            committed.outcome,
            RowCountChanged::Changed {
                from: 5,
                to: 2,
                stranded: vec![a.id],
            }
        );
        assert!(committed.persistence.is_saved());
        assert_eq!(
            session.grid().item(a.id).unwrap().position(),
            GridPosition::new(1, 4)
        );
    }

    #[tokio::test]
    async fn currency_is_clamped_and_saved() {
        let owner = CharacterId::new();
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo
            .expect_save_profile()
            .withf(|_, profile| profile.currency == Currency::new(10, 0, 3))
            .times(1)
            .returning(|_, _| Ok(()));
        let mut session = open_with(owner, vec![], MockItemRepo::new(), profile_repo).await;

        let committed = session.set_currency(10, -4, 3).await;
        assert_eq!(committed.outcome, Currency::new(10, 0, 3));
        assert_eq!(session.currency(), Currency::new(10, 0, 3));

        let again = session.set_currency(10, 0, 3).await;
        assert!(matches!(again.persistence, Persistence::Skipped));
    }

    #[tokio::test]
    async fn unsaved_sessions_never_write() {
        let mut item_repo = MockItemRepo::new();
        item_repo.expect_upsert_item().times(0);
        item_repo.expect_delete_item().times(0);
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo.expect_save_profile().times(0);

        let mut session =
            InventorySession::new_unsaved(&settings(), Arc::new(item_repo), Arc::new(profile_repo))
                .unwrap();
        let sword = session.add_item("Sword").await.unwrap();
        assert!(matches!(sword.persistence, Persistence::Skipped));
        assert!(sword.outcome.owner_id().is_none());

        let rows = session.set_row_count(3).await;
        assert!(matches!(rows.persistence, Persistence::Skipped));
        let removed = session.remove_item(sword.outcome.id()).await.unwrap();
        assert!(matches!(removed.persistence, Persistence::Skipped));
    }

    #[tokio::test]
    async fn attach_owner_writes_everything_once() {
        let owner = CharacterId::new();
        let mut item_repo = MockItemRepo::new();
        item_repo
            .expect_upsert_item()
            .withf(move |rec| rec.owner_id == Some(owner))
            .times(2)
            .returning(|_| Ok(()));
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo
            .expect_save_profile()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut session =
            InventorySession::new_unsaved(&settings(), Arc::new(item_repo), Arc::new(profile_repo))
                .unwrap();
        let _ = session.add_item("Sword").await.unwrap();
        let _ = session.add_item("Shield").await.unwrap();

        let committed = session.attach_owner(owner).await.unwrap();
        assert_eq!(committed.outcome.len(), 2);
        assert!(committed.persistence.is_saved());
        assert_eq!(session.owner_id(), Some(owner));

        let err = session.attach_owner(CharacterId::new()).await.unwrap_err();
        assert!(matches!(err.as_domain(), Some(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn clamp_to_contents_policy_flows_from_settings() {
        let owner = CharacterId::new();
        let mut item_repo = MockItemRepo::new();
        let stored = vec![record(owner, "A", 1, 3, 1, 1)];
        item_repo
            .expect_list_items()
            .returning(move |_| Ok(stored.clone()));
        let mut profile_repo = MockInventoryProfileRepo::new();
        profile_repo.expect_load_profile().returning(|_| Ok(None));
        profile_repo.expect_save_profile().returning(|_, _| Ok(()));

        let settings = InventorySettings {
            shrink_policy: RowShrinkPolicy::ClampToContents,
            ..InventorySettings::default()
        };
        let mut session =
            InventorySession::open(owner, &settings, Arc::new(item_repo), Arc::new(profile_repo))
                .await
                .unwrap();

        assert_eq!(session.set_row_count(1).await.outcome.rows(), 3);
        assert!(session.grid().stranded_items().is_empty());
    }
}
