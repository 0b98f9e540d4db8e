//! Inventory configuration

use std::env;
use std::path::Path;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use satchel_domain::{GridLimits, RowShrinkPolicy};

/// Grid configuration shared by every inventory session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySettings {
    /// Fixed grid width
    pub columns: u32,
    /// Upper bound for the user-chosen row count
    pub max_rows: u32,
    /// Row count for characters with no stored profile
    pub default_rows: u32,
    /// What a row-count shrink does to items below the new last row
    pub shrink_policy: RowShrinkPolicy,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            columns: GridLimits::DEFAULT_COLUMNS,
            max_rows: GridLimits::DEFAULT_MAX_ROWS,
            default_rows: 5,
            shrink_policy: RowShrinkPolicy::Strand,
        }
    }
}

impl InventorySettings {
    /// Load settings from the environment, after applying `.env.local` and
    /// `.env` from the working directory.
    ///
    /// Reads `SATCHEL_GRID_COLUMNS`, `SATCHEL_GRID_MAX_ROWS`,
    /// `SATCHEL_GRID_DEFAULT_ROWS` and `SATCHEL_ROW_SHRINK_POLICY`; unset
    /// variables fall back to the defaults.
    pub fn from_env() -> Result<Self> {
        load_dotenv_from(Path::new("."));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let settings = Self {
            columns: parse_or(&lookup, "SATCHEL_GRID_COLUMNS", defaults.columns)?,
            max_rows: parse_or(&lookup, "SATCHEL_GRID_MAX_ROWS", defaults.max_rows)?,
            default_rows: parse_or(&lookup, "SATCHEL_GRID_DEFAULT_ROWS", defaults.default_rows)?,
            shrink_policy: parse_or(
                &lookup,
                "SATCHEL_ROW_SHRINK_POLICY",
                defaults.shrink_policy,
            )?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            bail!("SATCHEL_GRID_COLUMNS must be at least 1");
        }
        if self.max_rows == 0 {
            bail!("SATCHEL_GRID_MAX_ROWS must be at least 1");
        }
        if self.default_rows == 0 || self.default_rows > self.max_rows {
            bail!(
                "SATCHEL_GRID_DEFAULT_ROWS must be between 1 and {} (got {})",
                self.max_rows,
                self.default_rows
            );
        }
        Ok(())
    }

    pub fn limits(&self) -> Result<GridLimits> {
        GridLimits::new(self.columns, self.max_rows).context("Invalid grid limits")
    }
}

/// Apply `.env.local`, then `.env`, from `dir`. Variables already set win,
/// so local overrides take precedence over `.env`.
fn load_dotenv_from(dir: &Path) {
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).map(|raw| raw.trim().to_string()) {
        Some(raw) if !raw.is_empty() => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        _ => Ok(default),
    }
}
