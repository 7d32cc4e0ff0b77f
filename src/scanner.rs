use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Error;
use crate::xrefmap;

/// Expand command-line paths into the list of maps to process.
///
/// Files are taken as given. Directories are walked recursively for files named
/// `xrefmap.yml`, sorted so runs are reproducible. Duplicates are removed while
/// keeping the first occurrence.
///
/// # Errors
///
/// Returns `Error::MapNotFound` if a path does not exist, or `Error::Io` if a
/// directory cannot be walked.
pub fn discover(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Error> {
    let mut maps: Vec<PathBuf> = Vec::new();

    for path in paths {
        if path.is_dir() {
            for map in scan_directory(path)? {
                push_unique(&mut maps, map);
            }
        } else if path.is_file() {
            push_unique(&mut maps, path.clone());
        } else {
            return Err(Error::MapNotFound { path: path.clone() });
        }
    }

    tracing::debug!(count = maps.len(), "discovered xref maps");
    return Ok(maps);
}

/// Every `xrefmap.yml` under `root`, sorted by path.
fn scan_directory(root: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut found = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| return Error::Io(e.into()))?;
        if entry.file_type().is_file() && entry.file_name() == xrefmap::FILE_NAME {
            found.push(entry.into_path());
        }
    }
    found.sort();
    return Ok(found);
}

/// Append `path` unless it is already listed.
fn push_unique(maps: &mut Vec<PathBuf>, path: PathBuf) {
    if !maps.contains(&path) {
        maps.push(path);
    }
}
