//! Catalog files
//!
//! A local TOML file holding the four record collections, using the same
//! camelCase key names as the wire shape. Loads into a
//! [`StaticCatalog`].

use super::memory::StaticCatalog;
use compass_domain::{Goal, Question, RoutingRule, Service};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum CatalogFileError {
    #[error("Could not read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse catalog file: {0}")]
    Parse(#[from] Box<toml::de::Error>),
}

/// Raw structure of a catalog file
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    questions: Vec<QuestionEntry>,
    goals: Vec<Goal>,
    services: Vec<ServiceEntry>,
    rules: Vec<RoutingRule>,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    /// Catalog-level ordering; the lowest value is the flow's entry
    #[serde(default)]
    order: i64,
    #[serde(flatten)]
    question: Question,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceEntry {
    /// The goal this service is recommended for
    goal_id: String,
    #[serde(flatten)]
    service: Service,
}

/// Load a catalog file from disk
pub fn load_catalog_file(path: impl AsRef<Path>) -> Result<StaticCatalog, CatalogFileError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog_toml(&raw)?;
    info!("Loaded catalog from {}", path.display());
    Ok(catalog)
}

/// Parse catalog TOML into an in-memory catalog
pub fn parse_catalog_toml(raw: &str) -> Result<StaticCatalog, CatalogFileError> {
    let file: CatalogFile = toml::from_str(raw).map_err(Box::new)?;

    let mut catalog = StaticCatalog::new();
    for entry in file.questions {
        catalog = catalog.with_question(entry.order, entry.question);
    }
    for goal in file.goals {
        catalog = catalog.with_goal(goal);
    }
    for entry in file.services {
        catalog = catalog.with_service(entry.goal_id, entry.service);
    }
    for rule in file.rules {
        catalog = catalog.with_rule(rule);
    }
    Ok(catalog)
}
