//! Site tree traversal.

use super::RepoFile;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum WalkError {
    #[error("site root `{0}` does not exist or is not a directory")]
    MissingRoot(PathBuf),

    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Collect every non-directory entry under `root`, depth-first.
///
/// Directories named in `exclude_dirs` are skipped at any depth, together with
/// everything below them. Subdirectories are descended before sibling files and
/// siblings are visited in file-name order. Symbolic links are not followed and
/// are returned like regular files.
///
/// Any unreadable entry fails the whole walk; no partial list is returned.
pub fn walk(root: &Path, exclude_dirs: &[String]) -> Result<Vec<RepoFile>, WalkError> {
    if !root.is_dir() {
        return Err(WalkError::MissingRoot(root.to_path_buf()));
    }

    let excluded: HashSet<&str> = exclude_dirs.iter().map(String::as_str).collect();

    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by(|a, b| {
            b.file_type()
                .is_dir()
                .cmp(&a.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| excluded.contains(name))
        });

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| WalkError::Io {
            path: source
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        files.push(RepoFile::from_relative(relative));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<html></html>").unwrap();
    }

    fn posix_paths(files: &[RepoFile]) -> Vec<String> {
        files.iter().map(RepoFile::posix).collect()
    }

    #[test]
    fn test_walk_collects_nested_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), "pricing/index.html");
        touch(dir.path(), "docs/guide/index.html");
        touch(dir.path(), "style.css");

        let files = walk(dir.path(), &defaults::build::exclude_dirs()).unwrap();
        let paths = posix_paths(&files);

        assert_eq!(paths.len(), 4);
        assert!(paths.contains(&"index.html".to_string()));
        assert!(paths.contains(&"pricing/index.html".to_string()));
        assert!(paths.contains(&"docs/guide/index.html".to_string()));
        assert!(paths.contains(&"style.css".to_string()));
        assert!(files.iter().all(|f| !f.is_dir()));
    }

    #[test]
    fn test_walk_directories_first_then_name_order() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.html");
        touch(dir.path(), "a.html");
        touch(dir.path(), "z/index.html");
        touch(dir.path(), "m/index.html");

        let files = walk(dir.path(), &[]).unwrap();
        assert_eq!(
            posix_paths(&files),
            ["m/index.html", "z/index.html", "a.html", "b.html"]
        );
    }

    #[test]
    fn test_walk_skips_excluded_dirs_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");
        touch(dir.path(), ".git/index.html");
        touch(dir.path(), "node_modules/pkg/index.html");
        touch(dir.path(), "docs/node_modules/deep/index.html");
        touch(dir.path(), "docs/scripts/index.html");
        touch(dir.path(), "docs/index.html");

        let files = walk(dir.path(), &defaults::build::exclude_dirs()).unwrap();
        let paths = posix_paths(&files);

        assert_eq!(paths, ["docs/index.html", "index.html"]);
    }

    #[test]
    fn test_walk_excluded_name_only_applies_to_directories() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "scripts");

        let files = walk(dir.path(), &["scripts".to_string()]).unwrap();
        assert_eq!(posix_paths(&files), ["scripts"]);
    }

    #[test]
    fn test_walk_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = walk(&missing, &[]).unwrap_err();
        assert!(matches!(err, WalkError::MissingRoot(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_walk_root_is_file() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.html");

        let result = walk(&dir.path().join("index.html"), &[]);
        assert!(matches!(result, Err(WalkError::MissingRoot(_))));
    }

    #[test]
    fn test_walk_empty_root() {
        let dir = TempDir::new().unwrap();
        assert!(walk(dir.path(), &[]).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_symlinked_dirs() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        touch(outside.path(), "secret/index.html");
        std::os::unix::fs::symlink(outside.path().join("secret"), dir.path().join("linked"))
            .unwrap();

        let files = walk(dir.path(), &[]).unwrap();
        assert_eq!(posix_paths(&files), ["linked"]);
    }
}
