//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod inventory;

pub use inventory::{
    Committed, InventoryError, InventorySession, Persistence, SharedInventorySession,
};
