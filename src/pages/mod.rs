//! Page discovery: from a site tree to a sorted registry of canonical URLs.
//!
//! # Flow
//!
//! ```text
//! walk(root) ──► Canonicalizer::to_url() ──► PageRegistry::build()
//!     │                  │                          │
//!     ▼                  ▼                          ▼
//! RepoFile[]     URL or rejection       collision check, dates, sort
//! ```
//!
//! The registry is the single source of truth for every emitter.

pub mod canonical;
pub mod registry;
pub mod walk;

pub use canonical::Canonicalizer;
pub use registry::{Page, PageRegistry, RegistryError};
pub use walk::{WalkError, walk};

use std::path::{Component, Path};

/// A file discovered under the site root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoFile {
    /// Path segments relative to the site root.
    segments: Vec<String>,
    is_dir: bool,
}

impl RepoFile {
    /// Build from a root-relative path, dropping `.` and empty components.
    pub fn from_relative(path: &Path) -> Self {
        let segments = path
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self {
            segments,
            is_dir: false,
        }
    }

    /// Build from a slash-separated path such as `about/index.html`.
    pub fn from_posix(path: &str) -> Self {
        let segments = path
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_owned)
            .collect();
        Self {
            segments,
            is_dir: false,
        }
    }

    #[cfg(test)]
    #[must_use]
    pub const fn with_dir(mut self, is_dir: bool) -> Self {
        self.is_dir = is_dir;
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Base name, `None` for the root itself.
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Forward-slash form, independent of the host platform.
    pub fn posix(&self) -> String {
        self.segments.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_relative() {
        let file = RepoFile::from_relative(Path::new("./about/index.html"));
        assert_eq!(file.segments(), ["about", "index.html"]);
        assert_eq!(file.posix(), "about/index.html");
        assert_eq!(file.file_name(), Some("index.html"));
        assert!(!file.is_dir());
    }

    #[test]
    fn test_from_posix_normalizes_separators() {
        let file = RepoFile::from_posix("docs\\guide//index.html");
        assert_eq!(file.posix(), "docs/guide/index.html");
        assert_eq!(file.segments(), ["docs", "guide", "index.html"]);
    }

    #[test]
    fn test_root_has_no_file_name() {
        let root = RepoFile::from_posix("").with_dir(true);
        assert_eq!(root.file_name(), None);
        assert!(root.is_dir());
        assert_eq!(root.posix(), "");
    }
}
