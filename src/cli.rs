//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::config::PageMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pagemap sitemap and dataset manifest generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Site root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name, relative to root (default: pagemap.toml)
    #[arg(short = 'C', long, default_value = "pagemap.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared arguments for Build and List commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Override the site origin.
    ///
    /// Useful for building a staging sitemap without touching pagemap.toml:
    ///   pagemap build --base-url "https://staging.example.com"
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Override which html files count as pages
    #[arg(short, long, value_enum)]
    pub mode: Option<PageMode>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a starter pagemap.toml into the site root
    Init,

    /// Generate sitemap.xml, robots.txt and the dataset manifest
    Build {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Render everything but write nothing
        #[arg(long)]
        dry_run: bool,
    },

    /// Print discovered pages with their history dates
    List {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init)
    }

    /// Build arguments of the current command, if it takes any.
    pub const fn build_args(&self) -> Option<&BuildArgs> {
        match &self.command {
            Commands::Build { build_args, .. } | Commands::List { build_args } => Some(build_args),
            Commands::Init => None,
        }
    }
}
