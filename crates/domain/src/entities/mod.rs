//! Domain entities - Core business objects with identity

mod item;

pub use item::Item;
