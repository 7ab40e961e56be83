//! `[manifest]` section configuration.
//!
//! Describes the dataset manifest: identity, licensing links, free-text notes
//! and the hand-curated page list.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How drift between the curated page list and discovered pages is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftCheck {
    /// Skip the comparison.
    Off,
    /// Log each mismatch as a warning (default).
    #[default]
    Warn,
    /// Fail the build on any mismatch.
    Strict,
}

/// `[manifest]` section in pagemap.toml.
///
/// # Example
/// ```toml
/// [manifest]
/// id = "EXAMPLE_SITE_PAGES_001"
/// title = "Example - Site Pages Index"
/// notes = ["Commercial use requires a paid license."]
///
/// [[manifest.pages]]
/// path = "/"
/// type = "home"
/// notes = "Primary entry point."
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestConfig {
    /// Enable manifest generation.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Dataset identifier, also used for the default output directory.
    #[serde(default = "defaults::manifest::id")]
    #[educe(Default = defaults::manifest::id())]
    pub id: String,

    #[serde(default = "defaults::manifest::title")]
    #[educe(Default = defaults::manifest::title())]
    pub title: String,

    /// Semantic version of the dataset.
    #[serde(default = "defaults::manifest::version")]
    #[educe(Default = defaults::manifest::version())]
    pub version: String,

    /// Output path relative to the site root (default: `data/<id>/dataset.json`).
    pub path: Option<PathBuf>,

    /// File whose history dates the manifest (default: `data/<id>/index.html`).
    pub landing: Option<PathBuf>,

    /// File consulted when the landing file has no history.
    #[serde(default = "defaults::manifest::fallback")]
    #[educe(Default = defaults::manifest::fallback())]
    pub fallback: PathBuf,

    /// Human-readable license page. Site-relative paths resolve against the origin.
    #[serde(default = "defaults::manifest::license")]
    #[educe(Default = defaults::manifest::license())]
    pub license: String,

    /// Machine-readable license text.
    #[serde(default = "defaults::manifest::machine_license")]
    #[educe(Default = defaults::manifest::machine_license())]
    pub machine_license: String,

    #[serde(default = "defaults::manifest::pricing")]
    #[educe(Default = defaults::manifest::pricing())]
    pub pricing: String,

    #[serde(default = "defaults::manifest::contact")]
    #[educe(Default = defaults::manifest::contact())]
    pub contact: String,

    pub notes: Vec<String>,

    /// Curated page list vs discovered pages.
    pub check: DriftCheck,

    /// Hand-curated page descriptors, emitted in the given order.
    pub pages: Vec<PageDescriptor>,
}

/// `[[manifest.pages]]` entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageDescriptor {
    /// Site-relative path, e.g. `/pricing/` or `/LICENSE.txt`.
    pub path: String,
    /// Absolute URL; defaults to origin + `path`.
    #[serde(default)]
    pub url: Option<String>,
    /// Semantic type tag, e.g. `home` or `machine_license`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub notes: String,
}

impl ManifestConfig {
    /// Manifest output path relative to the site root.
    pub fn output_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.dataset_dir().join("dataset.json"))
    }

    /// Landing file relative to the site root.
    pub fn landing_path(&self) -> PathBuf {
        self.landing
            .clone()
            .unwrap_or_else(|| self.dataset_dir().join("index.html"))
    }

    fn dataset_dir(&self) -> PathBuf {
        PathBuf::from("data").join(&self.id)
    }
}
