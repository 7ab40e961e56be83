//! Canonical URL mapping.
//!
//! One policy for turning a root-relative file path into a public URL:
//!
//! | File                  | `index` mode         | `flat` mode (keep)       | `flat` mode (pretty) |
//! |-----------------------|----------------------|--------------------------|----------------------|
//! | `index.html`          | `{origin}/`          | `{origin}/`              | `{origin}/`          |
//! | `pricing/index.html`  | `{origin}/pricing/`  | `{origin}/pricing/`      | `{origin}/pricing/`  |
//! | `about.html`          | rejected             | `{origin}/about.html`    | `{origin}/about/`    |
//! | `404.html`            | rejected             | rejected (denylist)      | rejected (denylist)  |
//!
//! Path segments are percent-encoded; the origin is used verbatim minus any
//! trailing slash.

use super::RepoFile;
use crate::config::{FlatUrls, PageMode, SiteConfig};
use std::collections::HashSet;

/// File name that collapses to its containing directory.
pub const INDEX_FILE: &str = "index.html";

const HTML_EXT: &str = ".html";

/// Maps repository files to canonical URLs under one origin.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    origin: String,
    mode: PageMode,
    flat_urls: FlatUrls,
    denylist: HashSet<String>,
}

impl Canonicalizer {
    pub fn new(origin: &str, mode: PageMode, flat_urls: FlatUrls, denylist: &[String]) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_owned(),
            mode,
            flat_urls,
            denylist: denylist.iter().cloned().collect(),
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(
            config.origin(),
            config.build.mode,
            config.build.flat_urls,
            &config.build.exclude_files,
        )
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether the file name is recognized as a page in the active mode.
    pub fn is_page(&self, file: &RepoFile) -> bool {
        if file.is_dir() {
            return false;
        }
        let Some(name) = file.file_name() else {
            return false;
        };

        match self.mode {
            PageMode::Index => name == INDEX_FILE,
            PageMode::Flat => {
                name.len() > HTML_EXT.len()
                    && name.ends_with(HTML_EXT)
                    && !self.denylist.contains(name)
            }
        }
    }

    /// Canonical URL for `file`, or `None` if it is not a page.
    pub fn to_url(&self, file: &RepoFile) -> Option<String> {
        if !self.is_page(file) {
            return None;
        }

        let segments = file.segments();
        let (dirs, name) = segments.split_at(segments.len() - 1);
        let name = name[0].as_str();

        let mut path: Vec<&str> = dirs.iter().map(String::as_str).collect();
        let trailing_slash = if name == INDEX_FILE {
            true
        } else {
            match self.flat_urls {
                FlatUrls::Keep => {
                    path.push(name);
                    false
                }
                FlatUrls::Pretty => {
                    path.push(&name[..name.len() - HTML_EXT.len()]);
                    true
                }
            }
        };

        Some(self.join(&path, trailing_slash))
    }

    /// Absolute URL for a site-relative path such as `/license/`.
    ///
    /// Values that already carry a scheme are returned unchanged.
    pub fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        let trailing_slash = path.ends_with('/');
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return format!("{}/", self.origin);
        }
        let encoded: Vec<String> = segments.iter().map(|s| encode_segment(s)).collect();
        let mut url = format!("{}/{}", self.origin, encoded.join("/"));
        if trailing_slash {
            url.push('/');
        }
        url
    }

    fn join(&self, segments: &[&str], trailing_slash: bool) -> String {
        let mut url = String::with_capacity(self.origin.len() + 32);
        url.push_str(&self.origin);
        url.push('/');
        for (i, segment) in segments.iter().filter(|s| !s.is_empty()).enumerate() {
            if i > 0 {
                url.push('/');
            }
            url.push_str(&encode_segment(segment));
        }
        if trailing_slash && !url.ends_with('/') {
            url.push('/');
        }
        url
    }
}

/// Percent-encode one path segment, keeping RFC 3986 unreserved characters.
fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}
