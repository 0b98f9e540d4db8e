//! Inventory operation errors.

use crate::infrastructure::ports::RepoError;
use satchel_domain::DomainError;

/// Errors that can occur during inventory operations.
///
/// Storage failures after a committed mutation are not errors; they come
/// back in [`super::Persistence::Failed`].
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// The grid refused the operation; nothing changed
    #[error("Placement rejected: {0}")]
    Domain(#[from] DomainError),
    /// Loading the inventory failed
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    /// The grid settings are inconsistent; no session was started
    #[error("Invalid inventory settings: {0}")]
    Settings(String),
}

impl InventoryError {
    /// Geometry rejections a drag-and-drop caller silently discards.
    pub fn is_soft_rejection(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_soft_rejection())
    }

    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}
