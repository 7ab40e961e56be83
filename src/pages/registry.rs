//! The page registry: deduplicated, dated, sorted pages.

use super::{Canonicalizer, RepoFile};
use crate::history::{DateResolution, HistoryProvider, resolve_dates};
use chrono::NaiveDate;
use rayon::prelude::*;
use std::collections::{BTreeMap, btree_map::Entry};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("`{first}` and `{second}` both canonicalize to {url}")]
    Collision {
        url: String,
        first: String,
        second: String,
    },
}

/// A published, externally addressable page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Absolute canonical URL
    pub url: String,
    /// File the page was derived from
    pub source: RepoFile,
    pub dates: DateResolution,
}

impl Page {
    pub const fn published(&self) -> Option<NaiveDate> {
        self.dates.published
    }

    pub const fn updated(&self) -> Option<NaiveDate> {
        self.dates.updated
    }
}

/// Pages sorted by canonical URL (byte-wise), unique per URL.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageRegistry {
    pages: Vec<Page>,
}

impl PageRegistry {
    /// Build the registry from walked files.
    ///
    /// Rejected files are dropped silently. A URL produced by two files fails
    /// the build before any history is queried. Dates are resolved in parallel,
    /// `on_resolved` is called once per page, and the result is sorted after
    /// all lookups complete.
    pub fn build<H, F>(
        files: &[RepoFile],
        canonicalizer: &Canonicalizer,
        history: &H,
        on_resolved: F,
    ) -> Result<Self, RegistryError>
    where
        H: HistoryProvider + ?Sized,
        F: Fn() + Sync,
    {
        let candidates = Self::canonicalize(files, canonicalizer)?;

        let mut pages: Vec<Page> = candidates
            .into_par_iter()
            .map(|(url, source)| {
                let dates = resolve_dates(history, &source.posix());
                on_resolved();
                Page { url, source, dates }
            })
            .collect();

        pages.sort_by(|a, b| a.url.cmp(&b.url));
        Ok(Self { pages })
    }

    /// Map files to URLs, failing on the first collision.
    fn canonicalize(
        files: &[RepoFile],
        canonicalizer: &Canonicalizer,
    ) -> Result<Vec<(String, RepoFile)>, RegistryError> {
        let mut by_url: BTreeMap<String, &RepoFile> = BTreeMap::new();

        for file in files {
            let Some(url) = canonicalizer.to_url(file) else {
                continue;
            };
            match by_url.entry(url) {
                Entry::Vacant(slot) => {
                    slot.insert(file);
                }
                Entry::Occupied(slot) => {
                    let mut sources = [slot.get().posix(), file.posix()];
                    sources.sort();
                    let [first, second] = sources;
                    return Err(RegistryError::Collision {
                        url: slot.key().clone(),
                        first,
                        second,
                    });
                }
            }
        }

        Ok(by_url
            .into_iter()
            .map(|(url, file)| (url, file.clone()))
            .collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up a page by canonical URL.
    pub fn get(&self, url: &str) -> Option<&Page> {
        self.pages
            .binary_search_by(|page| page.url.as_str().cmp(url))
            .ok()
            .map(|i| &self.pages[i])
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().map(|page| page.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlatUrls, PageMode};
    use crate::history::NoHistory;
    use crate::history::testing::{FixedHistory, date};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const ORIGIN: &str = "https://www.example.com";

    fn files(paths: &[&str]) -> Vec<RepoFile> {
        paths.iter().map(|p| RepoFile::from_posix(p)).collect()
    }

    fn index_mode() -> Canonicalizer {
        Canonicalizer::new(ORIGIN, PageMode::Index, FlatUrls::Keep, &[])
    }

    #[test]
    fn test_three_page_site() {
        let files = files(&["index.html", "pricing/index.html", "about/index.html"]);
        let registry = PageRegistry::build(&files, &index_mode(), &NoHistory, || {}).unwrap();

        let urls: Vec<&str> = registry.urls().collect();
        assert_eq!(
            urls,
            [
                "https://www.example.com/",
                "https://www.example.com/about/",
                "https://www.example.com/pricing/",
            ]
        );
    }

    #[test]
    fn test_rejected_files_are_dropped() {
        let files = files(&["index.html", "style.css", "404.html", "robots.txt", "blog.html"]);
        let registry = PageRegistry::build(&files, &index_mode(), &NoHistory, || {}).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.get("https://www.example.com/").is_some());
    }

    #[test]
    fn test_sort_is_bytewise() {
        let files = files(&["b/index.html", "B/index.html", "a/index.html", "_/index.html"]);
        let registry = PageRegistry::build(&files, &index_mode(), &NoHistory, || {}).unwrap();

        let urls: Vec<&str> = registry.urls().collect();
        assert_eq!(
            urls,
            [
                "https://www.example.com/B/",
                "https://www.example.com/_/",
                "https://www.example.com/a/",
                "https://www.example.com/b/",
            ]
        );
    }

    #[test]
    fn test_collision_fails_build() {
        let canon = Canonicalizer::new(ORIGIN, PageMode::Flat, FlatUrls::Pretty, &[]);
        let files = files(&["about/index.html", "index.html", "about.html"]);

        let err = PageRegistry::build(&files, &canon, &NoHistory, || {}).unwrap_err();
        let RegistryError::Collision { url, first, second } = &err;
        assert_eq!(url, "https://www.example.com/about/");
        assert_eq!(first, "about.html");
        assert_eq!(second, "about/index.html");
        assert!(err.to_string().contains("both canonicalize to"));
    }

    #[test]
    fn test_collision_checked_before_history() {
        let canon = Canonicalizer::new(ORIGIN, PageMode::Flat, FlatUrls::Pretty, &[]);
        let files = files(&["about.html", "about/index.html"]);
        let resolved = AtomicUsize::new(0);

        let result = PageRegistry::build(&files, &canon, &NoHistory, || {
            resolved.fetch_add(1, Ordering::Relaxed);
        });
        assert!(result.is_err());
        assert_eq!(resolved.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_dates_attached_per_page() {
        let history = FixedHistory::new()
            .with("index.html", &["2024-01-01", "2025-02-02"])
            .failing("about/index.html");
        let files = files(&["index.html", "about/index.html", "new/index.html"]);

        let registry = PageRegistry::build(&files, &index_mode(), &history, || {}).unwrap();

        let home = registry.get("https://www.example.com/").unwrap();
        assert_eq!(home.published(), Some(date("2024-01-01")));
        assert_eq!(home.updated(), Some(date("2025-02-02")));
        assert_eq!(home.source.posix(), "index.html");

        let about = registry.get("https://www.example.com/about/").unwrap();
        assert_eq!(about.dates, DateResolution::ABSENT);

        let new = registry.get("https://www.example.com/new/").unwrap();
        assert_eq!(new.dates, DateResolution::ABSENT);
    }

    #[test]
    fn test_progress_callback_once_per_page() {
        let files = files(&["index.html", "a/index.html", "b/index.html", "c.css"]);
        let resolved = AtomicUsize::new(0);

        PageRegistry::build(&files, &index_mode(), &NoHistory, || {
            resolved.fetch_add(1, Ordering::Relaxed);
        })
        .unwrap();
        assert_eq!(resolved.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let history = FixedHistory::new().with("x/index.html", &["2024-05-05"]);
        let forward = files(&["index.html", "x/index.html", "y/index.html"]);
        let mut backward = forward.clone();
        backward.reverse();

        let a = PageRegistry::build(&forward, &index_mode(), &history, || {}).unwrap();
        let b = PageRegistry::build(&backward, &index_mode(), &history, || {}).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_registry() {
        let registry = PageRegistry::build(&[], &index_mode(), &NoHistory, || {}).unwrap();
        assert!(registry.is_empty());
        assert!(registry.get("https://www.example.com/").is_none());
    }
}
