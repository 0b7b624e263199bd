//! Dashboard configuration
//!
//! Loaded from TOML. Every field has a default, so an empty or partial file
//! is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hbi_core::aggregate::partners::DEFAULT_TOP_PERFORMERS;
use hbi_core::ScopeLimits;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::DataError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scope: ScopeLimits,
    #[serde(default)]
    pub ui: UiConfig,
}

/// What to do with fixture records that break an invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject the whole collection
    Strict,
    /// Drop the offending records and log a warning per issue
    #[default]
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON fixture files
    #[serde(default = "default_fixtures_dir")]
    pub fixtures_dir: PathBuf,

    #[serde(default)]
    pub validation: ValidationMode,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: default_fixtures_dir(),
            validation: ValidationMode::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Quiet period before a search term is applied
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Partners listed on the scorecard highlight
    #[serde(default = "default_top_performers")]
    pub top_performers: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            top_performers: default_top_performers(),
        }
    }
}

impl UiConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

// Defaults
fn default_fixtures_dir() -> PathBuf { PathBuf::from("fixtures") }
fn default_search_debounce_ms() -> u64 { 250 }
fn default_top_performers() -> usize { DEFAULT_TOP_PERFORMERS }

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, DataError> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file.
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// Load from a TOML file, falling back to defaults when it does not exist.
    pub async fn load_or_default(path: &Path) -> Result<Self, DataError> {
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}
