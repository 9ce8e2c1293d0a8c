//! Infrastructure layer for service-compass
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use catalog::{
    CatalogFileError, HttpCatalog, HttpCatalogConfig, StaticCatalog, load_catalog_file,
    parse_catalog_toml,
};
pub use config::{CatalogSource, ConfigLoader, FileCatalogConfig, FileConfig};
pub use logging::JsonlFlowLogger;
