pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Converter, CurrencyCode, RateService};
use crate::providers::FixerProvider;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    List,
    Rate {
        base: CurrencyCode,
        target: CurrencyCode,
    },
    Interactive,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xrate starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = FixerProvider::from_config(&config.providers.fixer, &config.user_agent)?;
    let service = Arc::new(RateService::new(Arc::new(provider)));

    match command {
        AppCommand::List => cli::list::run(&service).await,
        AppCommand::Rate { base, target } => cli::rate::run(&service, &base, &target).await,
        AppCommand::Interactive => cli::interactive::run(Converter::new(service)).await,
    }
}
