//! Dataset manifest generation.
//!
//! The manifest describes the site as a licensable dataset: identity,
//! licensing links, notes and a hand-curated list of pages. Its own dates come
//! from the history of the dataset landing page, falling back to the site
//! root page.
//!
//! ```json
//! {
//!   "id": "SITE_PAGES_001",
//!   "title": "Site Pages Index",
//!   "version": "1.0.0",
//!   "published_at": "2024-01-01",
//!   "updated_at": "2025-06-30",
//!   "license": "https://example.com/license/",
//!   ...
//!   "pages": [{ "path": "/", "url": "https://example.com/", "type": "home", "notes": "" }]
//! }
//! ```

use crate::config::{ManifestConfig, PageDescriptor};
use crate::history::DateResolution;
use crate::pages::{Canonicalizer, PageRegistry};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("manifest page list is out of date ({} mismatch(es)):\n{}", .0.len(), format_drift(.0))]
    Drift(Vec<Drift>),

    #[error("failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),
}

/// One disagreement between the curated page list and the registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Drift {
    /// Discovered page with no curated entry.
    Unlisted(String),
    /// Curated directory-style entry with no discovered page.
    Missing(String),
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unlisted(url) => write!(f, "{url} is a page but not listed in [[manifest.pages]]"),
            Self::Missing(url) => write!(f, "{url} is listed in [[manifest.pages]] but no page exists"),
        }
    }
}

fn format_drift(drift: &[Drift]) -> String {
    drift
        .iter()
        .map(|d| format!("  - {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Serialized Shape
// ============================================================================

/// Field order here is the field order in the output.
#[derive(Debug, Serialize)]
struct Manifest<'a> {
    id: &'a str,
    title: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_at: Option<String>,
    license: String,
    machine_license: String,
    pricing: String,
    contact: String,
    notes: &'a [String],
    pages: Vec<ManifestPage<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestPage<'a> {
    path: &'a str,
    url: String,
    #[serde(rename = "type")]
    kind: &'a str,
    notes: &'a str,
}

// ============================================================================
// Public API
// ============================================================================

/// Render the manifest as 2-space-indented JSON with a trailing newline.
///
/// `dates` should come from `resolve_with_fallback` on the landing and
/// fallback files; absent dates are omitted from the output.
pub fn render_manifest(
    manifest: &ManifestConfig,
    canonicalizer: &Canonicalizer,
    dates: DateResolution,
) -> Result<String, ManifestError> {
    let ymd = |date: chrono::NaiveDate| date.format("%Y-%m-%d").to_string();

    let doc = Manifest {
        id: &manifest.id,
        title: &manifest.title,
        version: &manifest.version,
        published_at: dates.published.map(ymd),
        updated_at: dates.updated.map(ymd),
        license: canonicalizer.resolve(&manifest.license),
        machine_license: canonicalizer.resolve(&manifest.machine_license),
        pricing: canonicalizer.resolve(&manifest.pricing),
        contact: canonicalizer.resolve(&manifest.contact),
        notes: &manifest.notes,
        pages: manifest
            .pages
            .iter()
            .map(|page| ManifestPage {
                path: &page.path,
                url: descriptor_url(page, canonicalizer),
                kind: &page.kind,
                notes: &page.notes,
            })
            .collect(),
    };

    let mut json = serde_json::to_string_pretty(&doc)?;
    json.push('\n');
    Ok(json)
}

/// Compare the curated page list against discovered pages.
///
/// Every registry page must be listed. A listed entry whose path ends in `/`
/// must exist in the registry; other entries (`/LICENSE.txt`, `/sitemap.xml`)
/// name resources and are not checked. Results are sorted.
pub fn check_drift(
    manifest: &ManifestConfig,
    canonicalizer: &Canonicalizer,
    registry: &PageRegistry,
) -> Vec<Drift> {
    let listed: BTreeSet<String> = manifest
        .pages
        .iter()
        .map(|page| descriptor_url(page, canonicalizer))
        .collect();

    let unlisted = registry
        .urls()
        .filter(|url| !listed.contains(*url))
        .map(|url| Drift::Unlisted(url.to_owned()));

    let missing = manifest
        .pages
        .iter()
        .filter(|page| page.path.ends_with('/'))
        .map(|page| descriptor_url(page, canonicalizer))
        .filter(|url| registry.get(url).is_none())
        .map(Drift::Missing);

    let mut drift: Vec<Drift> = unlisted.chain(missing).collect();
    drift.sort();
    drift.dedup();
    drift
}

fn descriptor_url(page: &PageDescriptor, canonicalizer: &Canonicalizer) -> String {
    page.url
        .clone()
        .unwrap_or_else(|| canonicalizer.resolve(&page.path))
}

// ============================================================================
// Tests
// ============================================================================
