//! pagemap - sitemap, robots.txt and dataset manifest generator for static sites.

mod build;
mod cli;
mod config;
mod generator;
mod history;
mod init;
mod logger;
mod pages;
mod utils;

use anyhow::{Result, bail};
use build::{build_site, list_pages};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_config;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init => new_config(config),
        Commands::Build { dry_run, .. } => build_site(config, *dry_run).map(|_| ()),
        Commands::List { .. } => list_pages(config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(std::path::Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() && !cli.is_init() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    if !cli.is_init() {
        if !config.config_path.exists() {
            bail!(
                "Config file `{}` not found. Run `pagemap init` first.",
                config.config_path.display()
            );
        }
        config.validate()?;
    }

    Ok(config)
}
