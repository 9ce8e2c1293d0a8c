//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    CatalogSource, FileCatalogConfig, FileConfig, FileFlowConfig, FileOutputConfig,
};
pub use loader::ConfigLoader;
