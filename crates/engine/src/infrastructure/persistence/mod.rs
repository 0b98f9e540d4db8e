//! Storage adapters implementing the repository ports.

mod in_memory;

pub use in_memory::{InMemoryInventoryProfileRepo, InMemoryItemRepo};
