//! Grid coordinates, item sizes and footprints
//!
//! All coordinates are 1-based. A footprint covers the inclusive cell range
//! `[x, x + width - 1] × [y, y + height - 1]`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Top-left cell of an item (its anchor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: u32,
    pub y: u32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { x: 1, y: 1 };

    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of an item in cells, both at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSize", into = "RawSize")]
pub struct ItemSize {
    width: u32,
    height: u32,
}

impl ItemSize {
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::validation(format!(
                "Item size must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Serialize, Deserialize)]
struct RawSize {
    w: u32,
    h: u32,
}

impl TryFrom<RawSize> for ItemSize {
    type Error = DomainError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        Self::new(raw.w, raw.h)
    }
}

impl From<ItemSize> for RawSize {
    fn from(size: ItemSize) -> Self {
        Self {
            w: size.width,
            h: size.height,
        }
    }
}

/// The rectangle of cells an item occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Footprint {
    pub position: GridPosition,
    pub size: ItemSize,
}

impl Footprint {
    pub fn new(position: GridPosition, size: ItemSize) -> Self {
        Self { position, size }
    }

    /// Rightmost covered column (inclusive)
    #[inline]
    pub fn right(&self) -> u32 {
        self.position.x.saturating_add(self.size.width() - 1)
    }

    /// Bottom covered row (inclusive)
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.position.y.saturating_add(self.size.height() - 1)
    }

    pub fn covers(&self, x: u32, y: u32) -> bool {
        x >= self.position.x && x <= self.right() && y >= self.position.y && y <= self.bottom()
    }

    pub fn intersects(&self, other: &Footprint) -> bool {
        self.position.x <= other.right()
            && other.position.x <= self.right()
            && self.position.y <= other.bottom()
            && other.position.y <= self.bottom()
    }

    /// Whether the footprint lies inside `[1, columns] × [1, rows]`.
    pub fn within(&self, columns: u32, rows: u32) -> bool {
        self.position.x >= 1
            && self.position.y >= 1
            && self.right() <= columns
            && self.bottom() <= rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(x: u32, y: u32, w: u32, h: u32) -> Footprint {
        Footprint::new(GridPosition::new(x, y), ItemSize::new(w, h).unwrap())
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(ItemSize::new(0, 1).is_err());
        assert!(ItemSize::new(1, 0).is_err());
        assert_eq!(ItemSize::new(1, 1).unwrap(), ItemSize::UNIT);
    }

    #[test]
    fn edges_are_inclusive() {
        let f = fp(2, 3, 2, 3);
        assert_eq!(f.right(), 3);
        assert_eq!(f.bottom(), 5);
        assert!(f.covers(2, 3));
        assert!(f.covers(3, 5));
        assert!(!f.covers(4, 5));
        assert!(!f.covers(2, 6));
    }

    #[test]
    fn touching_footprints_do_not_intersect() {
        let a = fp(1, 1, 2, 2);
        assert!(!a.intersects(&fp(3, 1, 1, 1)));
        assert!(!a.intersects(&fp(1, 3, 1, 1)));
        assert!(a.intersects(&fp(2, 2, 3, 3)));
        assert!(fp(2, 2, 3, 3).intersects(&a));
    }

    #[test]
    fn containment_intersects() {
        assert!(fp(1, 1, 5, 5).intersects(&fp(3, 3, 1, 1)));
    }

    #[test]
    fn within_checks_all_edges() {
        assert!(fp(4, 4, 2, 2).within(5, 5));
        assert!(!fp(5, 5, 2, 2).within(5, 5));
        assert!(!fp(0, 1, 1, 1).within(5, 5));
        assert!(!fp(1, 0, 1, 1).within(5, 5));
    }

    #[test]
    fn size_serializes_as_w_h() {
        let json = serde_json::to_string(&ItemSize::new(2, 3).unwrap()).unwrap();
        assert_eq!(json, r#"{"w":2,"h":3}"#);
        assert!(serde_json::from_str::<ItemSize>(r#"{"w":0,"h":3}"#).is_err());
    }
}
