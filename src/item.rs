use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CleanupError, Result};

/// A file, directory or dot entry a cleanup can be applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileItem {
    /// Full path. For a dot entry this is the directory it belongs to.
    pub path: PathBuf,

    /// Entry name (last component of path)
    pub name: String,

    /// True if this is a directory
    pub is_dir: bool,

    /// True for the pseudo entry holding the plain files of a directory
    pub is_dot_entry: bool,

    /// True if the entry lives on a local filesystem
    pub is_local: bool,
}

impl FileItem {
    /// Stat `path` and build an item for it.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::symlink_metadata(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CleanupError::PathNotFound(path.to_path_buf())
            } else {
                CleanupError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            name: entry_name(path),
            is_dir: metadata.is_dir(),
            is_dot_entry: false,
            is_local: true,
        })
    }

    /// The pseudo entry standing for the plain files directly inside `dir`.
    pub fn dot_entry(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            path: dir.to_path_buf(),
            name: entry_name(dir),
            is_dir: false,
            is_dot_entry: true,
            is_local: true,
        }
    }

    /// Directory commands for this item are run in.
    pub fn working_dir(&self) -> &Path {
        if self.is_dir || self.is_dot_entry {
            &self.path
        } else {
            self.path.parent().unwrap_or(&self.path)
        }
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
