//! Unified error types for the domain layer
//!
//! Placement failures come in two flavours. Hard failures (`InvalidName`,
//! `NoSpace`) are meant to be shown to the player. Soft failures
//! (`OutOfBounds`, `Overlap`) are geometry rejections that a drag-and-drop
//! front end simply discards. `NotFound` means the caller holds a stale id.

use thiserror::Error;

use crate::ids::ItemId;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Name was empty after trimming, or too long
    #[error("Invalid name: {0}")]
    InvalidName(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// No free anchor exists for a footprint of the requested size
    #[error("No space left for a {width}x{height} item")]
    NoSpace { width: u32, height: u32 },

    /// Entity not found
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Footprint would leave the grid
    #[error("Footprint {width}x{height} at ({x}, {y}) is out of bounds")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// Footprint would collide with another item
    #[error("Footprint overlaps item {blocking}")]
    Overlap { blocking: ItemId },

    /// Resize deltas must be single steps
    #[error("Resize step ({delta_w}, {delta_h}) is not a single step")]
    InvalidResizeStep { delta_w: i32, delta_h: i32 },

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates an invalid name error.
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::invalid_name("Item name cannot be empty"));
    /// }
    /// ```
    pub fn invalid_name(msg: impl Into<String>) -> Self {
        Self::InvalidName(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Create a no space error for a footprint of the given size
    pub fn no_space(width: u32, height: u32) -> Self {
        Self::NoSpace { width, height }
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Geometry rejections a drag-and-drop caller silently discards.
    pub fn is_soft_rejection(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::Overlap { .. })
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_name_error() {
        let err = DomainError::invalid_name("Item name cannot be empty");
        assert!(matches!(err, DomainError::InvalidName(_)));
        assert_eq!(err.to_string(), "Invalid name: Item name cannot be empty");
    }

    #[test]
    fn test_not_found_error() {
        let err = DomainError::not_found("Item", "123e4567-e89b-12d3-a456-426614174000");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Item"));
        assert!(err.to_string().contains("123e4567"));
    }

    #[test]
    fn test_no_space_error() {
        let err = DomainError::no_space(1, 1);
        assert_eq!(err.to_string(), "No space left for a 1x1 item");
        assert!(!err.is_soft_rejection());
    }

    #[test]
    fn test_geometry_errors_are_soft() {
        let out = DomainError::OutOfBounds {
            x: 5,
            y: 5,
            width: 2,
            height: 2,
        };
        let overlap = DomainError::Overlap {
            blocking: ItemId::new(),
        };
        assert!(out.is_soft_rejection());
        assert!(overlap.is_soft_rejection());
        assert!(!DomainError::invalid_name("x").is_soft_rejection());
        assert!(!DomainError::not_found("Item", "x").is_soft_rejection());
    }
}
