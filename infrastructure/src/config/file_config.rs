//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to layer-specific
//! settings where appropriate.

use serde::{Deserialize, Serialize};

/// Where catalog records come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// A local TOML catalog file
    #[default]
    File,
    /// The hosted content store API
    Http,
}

/// Catalog store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    pub source: CatalogSource,
    /// Catalog file path (file source)
    pub path: Option<String>,
    /// Content store base URL (http source)
    pub base_url: Option<String>,
    /// Environment variable holding the API token
    pub token_env: String,
    /// Collection ids, one database per record type (http source)
    pub questions_db: Option<String>,
    pub goals_db: Option<String>,
    pub services_db: Option<String>,
    pub rules_db: Option<String>,
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSource::File,
            path: None,
            base_url: None,
            token_env: "COMPASS_CATALOG_TOKEN".to_string(),
            questions_db: None,
            goals_db: None,
            services_db: None,
            rules_db: None,
            timeout_secs: 10,
        }
    }
}

/// Flow orchestration settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFlowConfig {
    /// Per-fetch timeout in seconds; 0 disables the bound
    pub fetch_timeout_secs: u64,
    /// Optional JSONL turn-transcript path
    pub transcript: Option<String>,
}

impl Default for FileFlowConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 10,
            transcript: None,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Catalog store settings
    pub catalog: FileCatalogConfig,
    /// Flow orchestration settings
    pub flow: FileFlowConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    ///
    /// Issues are warnings for the caller to surface; loading never
    /// fails on them.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        match self.catalog.source {
            CatalogSource::Http => {
                if self.catalog.base_url.is_none() {
                    issues.push("catalog.base_url is required for the http source".to_string());
                }
                for (field, value) in [
                    ("catalog.questions_db", &self.catalog.questions_db),
                    ("catalog.goals_db", &self.catalog.goals_db),
                    ("catalog.services_db", &self.catalog.services_db),
                    ("catalog.rules_db", &self.catalog.rules_db),
                ] {
                    if value.is_none() {
                        issues.push(format!("{} is required for the http source", field));
                    }
                }
            }
            CatalogSource::File => {
                if self.catalog.path.is_none() {
                    issues.push(
                        "catalog.path is not set; pass --catalog or configure one".to_string(),
                    );
                }
            }
        }

        issues
    }
}
