//! Error types for port operations.

use satchel_domain::ItemId;

/// Failures reported by the storage collaborators.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The backing store could not complete the call.
    #[error("Storage unavailable during {operation}: {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },

    /// A stored item record does not describe a valid item.
    #[error("Stored item {id} is unreadable: {reason}")]
    CorruptRecord { id: ItemId, reason: String },

    /// Items are stored per character; an ownerless item has no key.
    #[error("Item {0} has no owner to be stored under")]
    MissingOwner(ItemId),
}

impl RepoError {
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn storage(operation: &'static str, message: impl ToString) -> Self {
        Self::Storage {
            operation,
            message: message.to_string(),
        }
    }

    pub fn corrupt(id: ItemId, reason: impl ToString) -> Self {
        Self::CorruptRecord {
            id,
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
