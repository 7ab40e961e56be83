//! `[build]` section configuration.
//!
//! Controls which files are walked, which of them count as pages and where
//! the generated artifacts are written.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Enums
// ============================================================================

/// Which HTML files are recognized as pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    /// Only `index.html` files are pages (default).
    #[default]
    Index,
    /// Any `*.html` file is a page, except `exclude_files`.
    Flat,
}

/// How flat (non-index) pages are addressed in `flat` mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatUrls {
    /// `about.html` → `/about.html` (default).
    #[default]
    Keep,
    /// `about.html` → `/about/`.
    Pretty,
}

// ============================================================================
// Main BuildConfig
// ============================================================================

/// `[build]` section in pagemap.toml.
///
/// # Example
/// ```toml
/// [build]
/// mode = "flat"
/// exclude_dirs = [".git", "node_modules"]
///
/// [build.sitemap]
/// path = "sitemap.xml"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Site root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Page recognition mode.
    #[serde(default)]
    pub mode: PageMode,

    /// URL style for flat pages.
    #[serde(default)]
    pub flat_urls: FlatUrls,

    /// Directory names never descended into, at any depth.
    #[serde(default = "defaults::build::exclude_dirs")]
    #[educe(Default = defaults::build::exclude_dirs())]
    pub exclude_dirs: Vec<String>,

    /// HTML file names that are never pages in `flat` mode (e.g. error pages).
    #[serde(default = "defaults::build::exclude_files")]
    #[educe(Default = defaults::build::exclude_files())]
    pub exclude_files: Vec<String>,

    /// Sitemap output settings.
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// robots.txt output settings.
    #[serde(default)]
    pub robots: RobotsConfig,
}

// ============================================================================
// Sub-configurations
// ============================================================================

/// `[build.sitemap]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the site root.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.robots]` section
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct RobotsConfig {
    /// Enable robots.txt generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the site root.
    #[serde(default = "defaults::build::robots::path")]
    #[educe(Default = defaults::build::robots::path())]
    pub path: PathBuf,
}
