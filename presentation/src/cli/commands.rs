//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for flow nodes and goal listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console output
    Text,
    /// JSON wire shape
    Json,
}

/// CLI arguments for service-compass
#[derive(Parser, Debug)]
#[command(name = "service-compass")]
#[command(author, version, about = "Guided service recommendation flows")]
#[command(long_about = r#"
Service Compass walks you through a branching questionnaire and recommends
services for your goal. Each answer is routed through configured rules to
the next question, until the flow resolves to a recommendation result.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./compass.toml      Project-level config
3. ~/.config/service-compass/config.toml   Global config

Example:
  service-compass --catalog demos/catalog.toml
  service-compass --list-goals
  service-compass --answers '[{"questionId":"q_env","value":"dev"}]' -o json
"#)]
pub struct Cli {
    /// List the selectable goals and exit
    #[arg(long)]
    pub list_goals: bool,

    /// Compute the next node for a JSON answer history and exit
    #[arg(long, value_name = "JSON")]
    pub answers: Option<String>,

    /// Catalog file to use (overrides the configured catalog source)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
