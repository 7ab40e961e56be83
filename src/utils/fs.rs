//! Filesystem helpers for generated artifacts.

use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

/// Replace a set of files together.
///
/// Every file is first written to a hidden sibling (`.<name>.tmp`), creating
/// missing parent directories. If any of those writes fails, the temporaries
/// written so far are removed and no destination is touched. Only once all
/// temporaries exist are they renamed into place.
pub fn write_all_atomic<'a, I>(files: I) -> Result<()>
where
    I: IntoIterator<Item = (PathBuf, &'a [u8])>,
{
    let mut staged: Vec<(PathBuf, PathBuf)> = Vec::new();

    for (path, contents) in files {
        match stage(&path, contents) {
            Ok(tmp) => staged.push((tmp, path)),
            Err(err) => {
                discard(&staged);
                return Err(err);
            }
        }
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(err) = fs::rename(tmp, path) {
            discard(&staged[i..]);
            return Err(err).with_context(|| format!("Failed to move output to {}", path.display()));
        }
    }
    Ok(())
}

/// Write `contents` next to `path` and return the temporary path.
fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file_name = path
        .file_name()
        .with_context(|| format!("Invalid output path {}", path.display()))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    if let Err(err) = fs::write(&tmp, contents) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("Failed to write {}", tmp.display()));
    }
    Ok(tmp)
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}
