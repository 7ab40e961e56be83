//! History lookups through the `git` command line.

use super::{HistoryError, HistoryProvider};
use crate::exec;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// `%cs`: committer date, short `YYYY-MM-DD` form.
const DATE_FORMAT_ARG: &str = "--format=%cs";

/// Paths are file names, never pathspec patterns (`*`, `?`, `[..]`, `:(..)`).
const GIT: [&str; 2] = ["git", "--literal-pathspecs"];

/// Queries `git log` for each path, run from the site root.
#[derive(Debug, Clone)]
pub struct GitHistory {
    root: PathBuf,
}

impl GitHistory {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Commit days touching `path`, newest first.
    fn log_dates(&self, path: &str, limit_one: bool) -> Result<Vec<NaiveDate>, HistoryError> {
        let root = self.root.as_path();
        let output = if limit_one {
            exec!(root; GIT; "log", "-1", DATE_FORMAT_ARG, "--", path)
        } else {
            exec!(root; GIT; "log", DATE_FORMAT_ARG, "--", path)
        }
        .map_err(|err| HistoryError::Query {
            path: path.to_owned(),
            reason: format!("{err:#}"),
        })?;

        parse_dates(&String::from_utf8_lossy(&output.stdout)).map_err(|reason| {
            HistoryError::Query {
                path: path.to_owned(),
                reason,
            }
        })
    }
}

impl HistoryProvider for GitHistory {
    fn published(&self, path: &str) -> Result<Option<NaiveDate>, HistoryError> {
        Ok(self.log_dates(path, false)?.last().copied())
    }

    fn updated(&self, path: &str) -> Result<Option<NaiveDate>, HistoryError> {
        Ok(self.log_dates(path, true)?.first().copied())
    }
}

/// Parse one `YYYY-MM-DD` per line, ignoring blank lines.
fn parse_dates(stdout: &str) -> Result<Vec<NaiveDate>, String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            NaiveDate::parse_from_str(line, "%Y-%m-%d")
                .map_err(|err| format!("unexpected date `{line}`: {err}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::testing::date;
    use crate::history::{DateResolution, resolve_dates};
    use std::{fs, process::Command};
    use tempfile::TempDir;

    /// Run git in `dir`, optionally pinning author and committer dates.
    fn git(dir: &Path, when: Option<&str>, args: &[&str]) {
        let mut cmd = Command::new("git");
        cmd.current_dir(dir)
            .args(["-c", "user.name=pagemap", "-c", "user.email=pagemap@example.com"])
            .args(["-c", "commit.gpgsign=false"])
            .args(args);
        if let Some(when) = when {
            cmd.env("GIT_AUTHOR_DATE", when).env("GIT_COMMITTER_DATE", when);
        }
        let output = cmd.output().unwrap();
        assert!(output.status.success(), "git {args:?} failed: {output:?}");
    }

    fn commit_file(dir: &Path, rel: &str, contents: &str, when: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        git(dir, None, &["add", "--", rel]);
        git(dir, Some(when), &["commit", "-q", "-m", contents]);
    }

    fn repo() -> Option<TempDir> {
        which::which("git").ok()?;
        let dir = TempDir::new().unwrap();
        git(dir.path(), None, &["init", "-q"]);
        Some(dir)
    }

    #[test]
    fn test_parse_dates() {
        let dates = parse_dates("2025-06-30\n2024-03-01\n\n2023-01-15\n").unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(dates[2], NaiveDate::from_ymd_opt(2023, 1, 15).unwrap());
    }

    #[test]
    fn test_parse_dates_empty_output() {
        assert!(parse_dates("").unwrap().is_empty());
        assert!(parse_dates("\n  \n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_dates_rejects_garbage() {
        let err = parse_dates("2024-01-01\nnot a date\n").unwrap_err();
        assert!(err.contains("not a date"));
    }

    #[test]
    fn test_outside_repository_resolves_absent() {
        // Either git is missing or the directory is not a repository;
        // both must degrade to absent dates.
        let dir = TempDir::new().unwrap();
        let history = GitHistory::new(dir.path());

        assert_eq!(resolve_dates(&history, "index.html"), DateResolution::ABSENT);
    }

    #[test]
    fn test_first_and_latest_commit_days() {
        let Some(dir) = repo() else { return };
        commit_file(dir.path(), "index.html", "v1", "2021-03-04T12:00:00+0000");
        commit_file(dir.path(), "index.html", "v2", "2022-01-01T12:00:00+0000");
        commit_file(dir.path(), "index.html", "v3", "2023-07-08T12:00:00+0000");
        commit_file(dir.path(), "other.html", "x", "2024-09-09T12:00:00+0000");

        let history = GitHistory::new(dir.path());
        assert_eq!(history.published("index.html").unwrap(), Some(date("2021-03-04")));
        assert_eq!(history.updated("index.html").unwrap(), Some(date("2023-07-08")));
    }

    #[test]
    fn test_untracked_file_in_repository_is_absent() {
        let Some(dir) = repo() else { return };
        commit_file(dir.path(), "index.html", "v1", "2021-03-04T12:00:00+0000");
        fs::create_dir_all(dir.path().join("new")).unwrap();
        fs::write(dir.path().join("new/index.html"), "draft").unwrap();

        let history = GitHistory::new(dir.path());
        assert_eq!(resolve_dates(&history, "new/index.html"), DateResolution::ABSENT);
    }

    #[cfg(unix)]
    #[test]
    fn test_glob_characters_match_literally() {
        let Some(dir) = repo() else { return };
        commit_file(dir.path(), "ab/index.html", "tracked", "2019-01-01T12:00:00+0000");
        fs::create_dir_all(dir.path().join("a*")).unwrap();
        fs::write(dir.path().join("a*/index.html"), "untracked").unwrap();

        let history = GitHistory::new(dir.path());
        assert_eq!(resolve_dates(&history, "a*/index.html"), DateResolution::ABSENT);
        assert_eq!(resolve_dates(&history, "a?/index.html"), DateResolution::ABSENT);
        assert_eq!(
            history.updated("ab/index.html").unwrap(),
            Some(date("2019-01-01"))
        );
    }
}
