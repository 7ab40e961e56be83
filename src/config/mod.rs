//! Site configuration management for `pagemap.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                          |
//! |--------------|--------------------------------------------------|
//! | `[base]`     | Site origin                                      |
//! | `[build]`    | Walk exclusions, page mode, sitemap and robots   |
//! | `[manifest]` | Dataset manifest identity, links and page list   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! url = "https://www.example.com"
//!
//! [build]
//! mode = "index"
//!
//! [manifest]
//! id = "EXAMPLE_SITE_PAGES_001"
//! title = "Example - Site Pages Index"
//! ```

mod base;
mod build;
pub mod defaults;
mod error;
mod manifest;

// Re-export public types used by other modules
pub use build::{FlatUrls, PageMode};
pub use manifest::{DriftCheck, ManifestConfig, PageDescriptor};

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing pagemap.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site identity
    #[serde(default)]
    pub base: BaseConfig,

    /// Discovery and output settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Dataset manifest settings
    #[serde(default)]
    pub manifest: ManifestConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf());
    }

    /// Site origin without trailing slash.
    pub fn origin(&self) -> &str {
        self.base.origin()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = Self::normalize_path(&Self::expand_tilde(&root));
        self.set_root(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        if let Some(args) = cli.build_args() {
            if let Some(url) = &args.base_url {
                self.base.url = Some(url.clone());
            }
            Self::update_option(&mut self.build.mode, args.mode.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    fn expand_tilde(path: &Path) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration before generating anything
    pub fn validate(&self) -> Result<()> {
        let Some(base_url) = &self.base.url else {
            bail!(ConfigError::invalid(
                "base.url",
                "is required (or pass --base-url)"
            ));
        };

        let Some(rest) = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
        else {
            bail!(ConfigError::invalid(
                "base.url",
                format!("`{base_url}` must start with http:// or https://")
            ));
        };
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() {
            bail!(ConfigError::invalid(
                "base.url",
                format!("`{base_url}` has no host")
            ));
        }

        if !self.build.exclude_dirs.iter().all(|name| is_plain_name(name)) {
            bail!(ConfigError::invalid(
                "build.exclude_dirs",
                "entries must be plain directory names"
            ));
        }

        for (key, path) in [
            ("build.sitemap.path", &self.build.sitemap.path),
            ("build.robots.path", &self.build.robots.path),
        ] {
            if !is_under_root(path) {
                bail!(ConfigError::invalid(
                    key,
                    format!("`{}` must be a relative path inside the site root", path.display())
                ));
            }
        }

        if self.manifest.enable {
            self.validate_manifest()?;
        }

        Ok(())
    }

    fn validate_manifest(&self) -> Result<(), ConfigError> {
        let manifest = &self.manifest;

        if !is_plain_name(&manifest.id) {
            return Err(ConfigError::invalid(
                "manifest.id",
                format!("`{}` must be a single path segment", manifest.id),
            ));
        }

        if let Some(path) = &manifest.path {
            if !is_under_root(path) {
                return Err(ConfigError::invalid(
                    "manifest.path",
                    format!("`{}` must be a relative path inside the site root", path.display()),
                ));
            }
        }

        if let Err(err) = semver::Version::parse(&manifest.version) {
            return Err(ConfigError::invalid(
                "manifest.version",
                format!("`{}` is not a semantic version: {err}", manifest.version),
            ));
        }

        Ok(())
    }
}

/// A single directory or file name: not empty, no separators, not `.`/`..`.
fn is_plain_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// A relative path that names something below its starting directory.
fn is_under_root(path: &Path) -> bool {
    let mut normal = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    normal > 0
}

// ============================================================================
// Tests
// ============================================================================
