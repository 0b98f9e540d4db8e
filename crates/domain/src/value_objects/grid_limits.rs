//! Grid dimension limits and the row-shrink policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Fixed grid width and the upper bound on user-chosen row counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    columns: u32,
    max_rows: u32,
}

impl GridLimits {
    pub const DEFAULT_COLUMNS: u32 = 5;
    pub const DEFAULT_MAX_ROWS: u32 = 15;

    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either bound is zero.
    pub fn new(columns: u32, max_rows: u32) -> Result<Self, DomainError> {
        if columns == 0 {
            return Err(DomainError::validation("Grid needs at least one column"));
        }
        if max_rows == 0 {
            return Err(DomainError::validation("Grid needs a row limit of at least one"));
        }
        Ok(Self { columns, max_rows })
    }

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    /// Clamp a requested row count into `[1, max_rows]`.
    pub fn clamp_rows(&self, rows: u32) -> u32 {
        rows.clamp(1, self.max_rows)
    }
}

impl Default for GridLimits {
    fn default() -> Self {
        Self {
            columns: Self::DEFAULT_COLUMNS,
            max_rows: Self::DEFAULT_MAX_ROWS,
        }
    }
}

/// What happens to items below the last row when the grid shrinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowShrinkPolicy {
    /// Apply the shrink; items beyond the new bound keep their cells and are
    /// reported as stranded.
    #[default]
    Strand,
    /// Never shrink past the lowest occupied row.
    ClampToContents,
}

impl fmt::Display for RowShrinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strand => write!(f, "strand"),
            Self::ClampToContents => write!(f, "clamp_to_contents"),
        }
    }
}

impl FromStr for RowShrinkPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strand" => Ok(Self::Strand),
            "clamp_to_contents" | "clamp" => Ok(Self::ClampToContents),
            other => Err(DomainError::validation(format!(
                "Unknown row shrink policy: {}",
                other
            ))),
        }
    }
}
