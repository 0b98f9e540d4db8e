//! Satchel Engine library.
//!
//! Drives one character's inventory grid and forwards every committed change
//! to the storage collaborator.
//!
//! ## Structure
//!
//! - `use_cases/` - Inventory session orchestration over the domain grid
//! - `infrastructure/` - Ports, storage adapters, configuration, logging

pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests over the in-memory storage adapters.
#[cfg(test)]
mod e2e_tests;

pub use infrastructure::config::InventorySettings;
pub use use_cases::{
    Committed, InventoryError, InventorySession, Persistence, SharedInventorySession,
};
