//! Build orchestration.
//!
//! Wires discovery, history and the generators together.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── history::detect()      ──► GitHistory or NoHistory
//!     │
//!     ├── collect_pages()
//!     │       │
//!     │       ├── walk()         ──► RepoFile[]
//!     │       └── PageRegistry::build()
//!     │               (collisions fail here, before any history query)
//!     │
//!     ├── render_artifacts()     ──► sitemap / manifest / robots in memory
//!     │
//!     └── Artifacts::write()     ──► write-then-rename, skipped on --dry-run
//! ```
//!
//! Nothing touches the disk until every artifact has rendered, and outputs
//! are staged as temporaries before any is renamed into place, so a failed
//! run leaves the previous outputs in place.

use crate::{
    config::{DriftCheck, SiteConfig},
    generator::{ManifestError, check_drift, render_manifest, render_robots, render_sitemap},
    history::{self, HistoryProvider, resolve_with_fallback},
    log,
    logger::ProgressBars,
    pages::{Canonicalizer, PageRegistry, RepoFile, walk},
    utils::fs::write_all_atomic,
};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Log tag of the generator that produced it
    pub tag: &'static str,
    /// Path relative to the site root
    pub path: PathBuf,
    pub contents: String,
}

/// Every output of one run, rendered but not yet written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Artifacts {
    items: Vec<Artifact>,
}

impl Artifacts {
    fn push(&mut self, tag: &'static str, path: &Path, contents: String) {
        self.items.push(Artifact {
            tag,
            path: path.to_path_buf(),
            contents,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn get(&self, path: &Path) -> Option<&Artifact> {
        self.items.iter().find(|artifact| artifact.path == path)
    }

    /// Write every artifact under `root`, all or nothing.
    pub fn write(&self, root: &Path) -> Result<()> {
        write_all_atomic(
            self.items
                .iter()
                .map(|artifact| (root.join(&artifact.path), artifact.contents.as_bytes())),
        )?;
        for artifact in &self.items {
            log!(artifact.tag; "{}", artifact.path.display());
        }
        Ok(())
    }
}

/// Generate every enabled artifact for the site.
///
/// Returns what was rendered; on `dry_run` nothing is written.
pub fn build_site(config: &SiteConfig, dry_run: bool) -> Result<Artifacts> {
    let history = history::detect(config.get_root());
    build_with(config, history.as_ref(), dry_run)
}

/// Discover pages and print them to stdout, one per line:
/// `<url>\t<published>\t<updated>` with `-` for absent dates.
pub fn list_pages(config: &SiteConfig) -> Result<()> {
    let history = history::detect(config.get_root());
    let (_, registry) = collect_pages(config, history.as_ref())?;

    for line in format_listing(&registry) {
        println!("{line}");
    }
    Ok(())
}

/// `build_site` with an explicit history provider.
pub fn build_with<H>(config: &SiteConfig, history: &H, dry_run: bool) -> Result<Artifacts>
where
    H: HistoryProvider + ?Sized,
{
    let (canonicalizer, registry) = collect_pages(config, history)?;
    let artifacts = render_artifacts(config, &canonicalizer, &registry, history)?;

    if dry_run {
        for artifact in artifacts.iter() {
            log!(artifact.tag; "{} (dry run, not written)", artifact.path.display());
        }
    } else {
        artifacts.write(config.get_root())?;
    }

    Ok(artifacts)
}

/// Walk the root and build the dated page registry.
fn collect_pages<H>(config: &SiteConfig, history: &H) -> Result<(Canonicalizer, PageRegistry)>
where
    H: HistoryProvider + ?Sized,
{
    let root = config.get_root();
    let files = walk(root, &config.build.exclude_dirs)
        .with_context(|| format!("Failed to scan site root {}", root.display()))?;
    log!("walk"; "{} files under {}", files.len(), root.display());

    let canonicalizer = Canonicalizer::from_config(config);
    let page_count = files.iter().filter(|f| canonicalizer.is_page(f)).count();

    let progress = ProgressBars::new_filtered(&[("history", page_count)]);
    let registry = PageRegistry::build(&files, &canonicalizer, history, || {
        if let Some(progress) = &progress {
            progress.inc_by_name("history");
        }
    })?;
    drop(progress);

    if registry.is_empty() {
        log!("warn"; "no pages found under {}", root.display());
    } else {
        log!("registry"; "{} pages at {}", registry.len(), canonicalizer.origin());
    }
    Ok((canonicalizer, registry))
}

/// Render all enabled artifacts in a fixed order: sitemap, manifest, robots.
fn render_artifacts<H>(
    config: &SiteConfig,
    canonicalizer: &Canonicalizer,
    registry: &PageRegistry,
    history: &H,
) -> Result<Artifacts>
where
    H: HistoryProvider + ?Sized,
{
    let mut artifacts = Artifacts::default();

    if config.build.sitemap.enable {
        artifacts.push(
            "sitemap",
            &config.build.sitemap.path,
            render_sitemap(registry),
        );
    }

    let manifest = &config.manifest;
    if manifest.enable {
        check_manifest(config, canonicalizer, registry)?;

        let landing = RepoFile::from_relative(&manifest.landing_path()).posix();
        let fallback = RepoFile::from_relative(&manifest.fallback).posix();
        let dates = resolve_with_fallback(history, &landing, &fallback);

        let json = render_manifest(manifest, canonicalizer, dates)?;
        artifacts.push("manifest", &manifest.output_path(), json);
    }

    if config.build.robots.enable {
        artifacts.push(
            "robots",
            &config.build.robots.path,
            render_robots(canonicalizer, &config.build.sitemap.path),
        );
    }

    Ok(artifacts)
}

/// Compare the curated manifest page list against the registry.
fn check_manifest(
    config: &SiteConfig,
    canonicalizer: &Canonicalizer,
    registry: &PageRegistry,
) -> Result<(), ManifestError> {
    if config.manifest.check == DriftCheck::Off {
        return Ok(());
    }

    let drift = check_drift(&config.manifest, canonicalizer, registry);
    if drift.is_empty() {
        return Ok(());
    }

    match config.manifest.check {
        DriftCheck::Strict => Err(ManifestError::Drift(drift)),
        _ => {
            for item in &drift {
                log!("warn"; "{item}");
            }
            Ok(())
        }
    }
}

fn format_listing(registry: &PageRegistry) -> Vec<String> {
    let show = |date: Option<NaiveDate>| {
        date.map_or_else(|| "-".to_owned(), |d| d.format("%Y-%m-%d").to_string())
    };
    registry
        .iter()
        .map(|page| format!("{}\t{}\t{}", page.url, show(page.published()), show(page.updated())))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
