//! Inventory operation result types.

use crate::infrastructure::ports::RepoError;

/// What happened to the storage write that follows a committed mutation.
#[derive(Debug)]
pub enum Persistence {
    Saved,
    /// Nothing to write: the outcome was a no-op, or the character has no
    /// id yet
    Skipped,
    /// The in-memory change stands; the caller decides whether to retry
    Failed(RepoError),
}

impl Persistence {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn error(&self) -> Option<&RepoError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Combine two writes, keeping the first failure.
    pub(crate) fn and(self, next: Persistence) -> Persistence {
        match (self, next) {
            (Self::Failed(e), _) | (_, Self::Failed(e)) => Self::Failed(e),
            (Self::Saved, _) | (_, Self::Saved) => Self::Saved,
            _ => Self::Skipped,
        }
    }
}

/// A mutation that has been applied in memory, plus its storage result.
#[derive(Debug)]
#[must_use]
pub struct Committed<T> {
    pub outcome: T,
    pub persistence: Persistence,
}

impl<T> Committed<T> {
    pub fn new(outcome: T, persistence: Persistence) -> Self {
        Self {
            outcome,
            persistence,
        }
    }
}
