//! Port traits for infrastructure boundaries.
//!
//! Ports exist for storage only: the item collaborator and the per-character
//! inventory profile. Everything else is concrete types.

mod error;
mod repos;
pub mod types;

pub use error::RepoError;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::*;

// =============================================================================
// Storage records
// =============================================================================
pub use types::{GridRect, InventoryProfile, PersistedItem};
