//! Value objects - Immutable objects defined by their attributes

mod currency;
mod geometry;
mod grid_limits;
mod names;

pub use currency::Currency;
pub use geometry::{Footprint, GridPosition, ItemSize};
pub use grid_limits::{GridLimits, RowShrinkPolicy};
pub use names::ItemName;
