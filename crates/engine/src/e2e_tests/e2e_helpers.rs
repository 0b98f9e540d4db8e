//! Shared setup for E2E tests.

use std::sync::Arc;

use satchel_domain::CharacterId;

use crate::infrastructure::persistence::{InMemoryInventoryProfileRepo, InMemoryItemRepo};
use crate::infrastructure::telemetry;
use crate::{InventorySession, InventorySettings};

/// Storage shared by every session a test opens.
pub struct E2ETestContext {
    pub settings: InventorySettings,
    pub items: Arc<InMemoryItemRepo>,
    pub profiles: Arc<InMemoryInventoryProfileRepo>,
}

impl E2ETestContext {
    pub fn setup() -> Self {
        Self::setup_with(InventorySettings::default())
    }

    pub fn setup_with(settings: InventorySettings) -> Self {
        // Only the first test to get here installs the subscriber
        let _ = telemetry::init_tracing();
        Self {
            settings,
            items: Arc::new(InMemoryItemRepo::new()),
            profiles: Arc::new(InMemoryInventoryProfileRepo::new()),
        }
    }

    pub async fn open(&self, owner: CharacterId) -> InventorySession {
        InventorySession::open(
            owner,
            &self.settings,
            self.items.clone(),
            self.profiles.clone(),
        )
        .await
        .expect("Failed to open inventory")
    }

    pub fn unsaved(&self) -> InventorySession {
        InventorySession::new_unsaved(&self.settings, self.items.clone(), self.profiles.clone())
            .expect("Failed to start inventory")
    }
}
