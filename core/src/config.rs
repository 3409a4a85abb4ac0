//! Configuration types for the address book

use crate::error::AddrbookError;
use crate::traits::AddrbookResult;
use crate::types::SortOrder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging level
    pub log_level: String,

    /// Store configuration
    pub store: StoreConfig,

    /// Query configuration
    pub query: QueryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            store: StoreConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> AddrbookResult<Self> {
        let config: AppConfig = serde_json::from_str(json)
            .map_err(|e| AddrbookError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> AddrbookResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AddrbookError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> AddrbookResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> AddrbookResult<()> {
        if self.query.default_page_size == 0 {
            return Err(AddrbookError::ConfigError(
                "query.default_page_size must be greater than zero".into(),
            ));
        }
        if self.query.page_size_options.contains(&0) {
            return Err(AddrbookError::ConfigError(
                "query.page_size_options must not contain zero".into(),
            ));
        }
        Ok(())
    }
}

/// How the store assigns ids to new addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random v4 UUIDs
    #[default]
    Uuid,
    /// Monotonic counter, skipping ids already in use
    Sequential,
}

/// Store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start from the synthetic seed set when no snapshot is loaded
    pub seed: bool,

    /// Id assignment strategy
    pub id_strategy: IdStrategy,

    /// Snapshot file to restore from and write back to
    pub snapshot_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed: true,
            id_strategy: IdStrategy::Uuid,
            snapshot_path: None,
        }
    }
}

/// Query and view configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Initial page size
    pub default_page_size: usize,

    /// Page sizes offered to the user
    pub page_size_options: Vec<usize>,

    /// Quiet period before a search term is applied
    pub search_debounce_ms: u64,

    /// Initial sort order, `null` for unsorted
    pub default_sort: Option<SortOrder>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            page_size_options: vec![5, 10, 20],
            search_debounce_ms: 300,
            default_sort: Some(SortOrder::Newest),
        }
    }
}
