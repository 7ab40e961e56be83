//! Publish/update dates from version-control history.
//!
//! Dates come from commit metadata rather than filesystem mtimes, which are
//! not stable across checkouts. Every lookup degrades to an absent date on
//! failure; history problems never fail a build.
//!
//! # Providers
//!
//! | Provider     | Used when                                   |
//! |--------------|---------------------------------------------|
//! | `GitHistory` | `git` is installed and root is in a repo    |
//! | `NoHistory`  | no usable backend (all dates absent)        |

mod git;

pub use git::GitHistory;

use crate::log;
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("no history backend available")]
    Unavailable,

    #[error("history query for `{path}` failed: {reason}")]
    Query { path: String, reason: String },
}

/// Read-only access to per-file commit dates.
///
/// Paths are root-relative and slash-separated. `Ok(None)` means the file has
/// no history (untracked or new); `Err` means the lookup itself failed.
pub trait HistoryProvider: Send + Sync {
    /// Day of the earliest commit touching `path`.
    fn published(&self, path: &str) -> Result<Option<NaiveDate>, HistoryError>;

    /// Day of the latest commit touching `path`.
    fn updated(&self, path: &str) -> Result<Option<NaiveDate>, HistoryError>;
}

/// Backend used when history is unavailable: every query fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl HistoryProvider for NoHistory {
    fn published(&self, _path: &str) -> Result<Option<NaiveDate>, HistoryError> {
        Err(HistoryError::Unavailable)
    }

    fn updated(&self, _path: &str) -> Result<Option<NaiveDate>, HistoryError> {
        Err(HistoryError::Unavailable)
    }
}

/// Resolved (published, updated) pair; either side may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateResolution {
    pub published: Option<NaiveDate>,
    pub updated: Option<NaiveDate>,
}

impl DateResolution {
    pub const ABSENT: Self = Self {
        published: None,
        updated: None,
    };

    pub const fn is_complete(&self) -> bool {
        self.published.is_some() && self.updated.is_some()
    }

    /// Fill each absent field from `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            published: self.published.or(other.published),
            updated: self.updated.or(other.updated),
        }
    }
}

/// Pick a usable provider for the site at `root`.
///
/// Reports a missing `git` executable or a root outside any repository once,
/// and warns about shallow clones, whose earliest commits are missing.
pub fn detect(root: &Path) -> Box<dyn HistoryProvider> {
    if which::which("git").is_err() {
        log!("warn"; "`git` not found, publish/update dates will be absent");
        return Box::new(NoHistory);
    }

    match gix::discover(root) {
        Ok(repo) => {
            if repo.is_shallow() {
                log!("warn"; "shallow clone, published dates may be later than the real ones");
            }
            Box::new(GitHistory::new(root))
        }
        Err(_) => {
            log!("warn"; "`{}` is not inside a git repository, dates will be absent", root.display());
            Box::new(NoHistory)
        }
    }
}

/// Resolve both dates of one file.
///
/// Query failures become absent fields. `Unavailable` is not logged per file
/// since `detect` already reported it.
pub fn resolve_dates<H: HistoryProvider + ?Sized>(history: &H, path: &str) -> DateResolution {
    DateResolution {
        published: settle(path, "published", history.published(path)),
        updated: settle(path, "updated", history.updated(path)),
    }
}

/// Resolve dates for `landing`, falling back per field to `fallback`.
///
/// Only the dataset manifest dates itself this way; pages in the registry
/// always use their own history.
pub fn resolve_with_fallback<H: HistoryProvider + ?Sized>(
    history: &H,
    landing: &str,
    fallback: &str,
) -> DateResolution {
    let primary = resolve_dates(history, landing);
    if primary.is_complete() || landing == fallback {
        return primary;
    }
    primary.or(resolve_dates(history, fallback))
}

fn settle(
    path: &str,
    field: &str,
    result: Result<Option<NaiveDate>, HistoryError>,
) -> Option<NaiveDate> {
    match result {
        Ok(date) => date,
        Err(HistoryError::Unavailable) => None,
        Err(err) => {
            log!("warn"; "{path}: {field} date unavailable: {err}");
            None
        }
    }
}
