//! `itemtrack`: command-line front end for the inventory service.

mod commands;
mod config;

use anyhow::Context;
use clap::Parser;

use itemtrack_infra::JsonFileItemStore;
use itemtrack_inventory::InventoryService;

use crate::config::{Cli, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;
    itemtrack_observability::tracing::init(config.log_format);

    let store = JsonFileItemStore::open(&config.data_file)
        .with_context(|| format!("failed to open item store at {}", config.data_file.display()))?;
    let service = InventoryService::new(store);

    tracing::debug!(data_file = %config.data_file.display(), "configuration loaded");

    let stdout = std::io::stdout();
    commands::run(&service, &config, cli.command, &mut stdout.lock())
}
