//! CLI entrypoint for Service Compass
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use compass_application::{
    AdvanceFlowInput, AdvanceFlowUseCase, Catalog, FlowLogger, FlowParams, ListGoalsUseCase,
    NoFlowLogger,
};
use compass_domain::Answer;
use compass_infrastructure::{
    CatalogSource, ConfigLoader, FileConfig, HttpCatalog, HttpCatalogConfig, JsonlFlowLogger,
    load_catalog_file,
};
use compass_presentation::{Cli, ConsoleFormatter, FlowRepl, OutputFormat};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e))?
    };

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    // Pick the catalog adapter; --catalog always wins over config.
    if let Some(path) = &cli.catalog {
        let catalog = Arc::new(load_catalog_file(path)?);
        return run(catalog, &cli, &config).await;
    }

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    match config.catalog.source {
        CatalogSource::File => {
            let Some(path) = &config.catalog.path else {
                bail!("No catalog configured. Pass --catalog <path> or set catalog.path.");
            };
            let catalog = Arc::new(load_catalog_file(path)?);
            run(catalog, &cli, &config).await
        }
        CatalogSource::Http => {
            let http_config = HttpCatalogConfig::from_file_config(&config.catalog)
                .map_err(|e| anyhow::anyhow!(e))?;
            let catalog = Arc::new(HttpCatalog::new(http_config)?);
            run(catalog, &cli, &config).await
        }
    }
}

/// Dispatch the selected command against the injected catalog
async fn run<C: Catalog + 'static>(catalog: Arc<C>, cli: &Cli, config: &FileConfig) -> Result<()> {
    if cli.list_goals {
        let goals = ListGoalsUseCase::new(catalog).execute().await?;
        let output = match cli.output {
            OutputFormat::Text => ConsoleFormatter::format_goals(&goals),
            OutputFormat::Json => ConsoleFormatter::format_goals_json(&goals),
        };
        println!("{}", output);
        return Ok(());
    }

    let fetch_timeout = (config.flow.fetch_timeout_secs > 0)
        .then(|| Duration::from_secs(config.flow.fetch_timeout_secs));
    let params = FlowParams::default().with_fetch_timeout(fetch_timeout);

    let logger: Arc<dyn FlowLogger> = match config
        .flow
        .transcript
        .as_ref()
        .and_then(|path| JsonlFlowLogger::new(path))
    {
        Some(jsonl) => {
            info!("Writing flow transcript to {}", jsonl.path().display());
            Arc::new(jsonl)
        }
        None => Arc::new(NoFlowLogger),
    };

    let use_case = AdvanceFlowUseCase::new(catalog)
        .with_params(params)
        .with_logger(logger);

    // One-shot mode: compute the next node for a supplied history
    if let Some(raw) = &cli.answers {
        let history: Vec<Answer> =
            serde_json::from_str(raw).context("Could not parse --answers JSON")?;
        let step = use_case.execute(AdvanceFlowInput::new(history)).await?;

        match cli.output {
            OutputFormat::Json => println!("{}", ConsoleFormatter::format_step_json(&step)),
            OutputFormat::Text => match &step.node {
                Some(node) => println!("{}", ConsoleFormatter::format_node(node)),
                None => println!("No further node; the flow is exhausted."),
            },
        }
        return Ok(());
    }

    FlowRepl::new(use_case).run().await?;

    Ok(())
}
