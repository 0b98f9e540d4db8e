extern crate self as satchel_domain;

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod events;
pub mod ids;
pub mod value_objects;

pub use aggregates::InventoryGrid;
pub use entities::Item;
pub use error::DomainError;
pub use events::{ItemMoved, ItemRenamed, ItemResized, RowCountChanged};
pub use ids::{CharacterId, ItemId};
pub use value_objects::{
    Currency, Footprint, GridLimits, GridPosition, ItemName, ItemSize, RowShrinkPolicy,
};
