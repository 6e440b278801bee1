use std::path::{Path, PathBuf};

use crate::error::ListingError;

use super::model::{DirectoryListing, EntryKind, join_path};
use super::source::ListingSource;

/// Lists a directory tree on the local filesystem.
///
/// Listing paths are resolved against `base`; a file's fetch locator is its
/// filesystem path.
#[derive(Debug, Clone)]
pub struct LocalTree {
    base: PathBuf,
}

impl LocalTree {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Split `dir` into a tree rooted at its parent and the listing path of `dir`
    /// inside it, so files directly in `dir` report `dir`'s name as their folder.
    pub fn rooted_at(dir: &Path) -> (Self, String) {
        match (dir.parent(), dir.file_name().and_then(|n| n.to_str())) {
            (Some(parent), Some(name)) => (Self::new(parent), name.to_string()),
            _ => (Self::new(dir), String::new()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        path.split('/')
            .filter(|s| !s.is_empty())
            .fold(self.base.clone(), |acc, seg| acc.join(seg))
    }
}

impl ListingSource for LocalTree {
    async fn list(&self, path: &str) -> Result<Vec<DirectoryListing>, ListingError> {
        let dir = self.resolve(path);
        let io_err = |source| ListingError::Io {
            path: path.to_string(),
            source,
        };

        let mut read_dir = tokio::fs::read_dir(&dir).await.map_err(io_err)?;
        let mut entries = Vec::new();

        while let Some(entry) = read_dir.next_entry().await.map_err(io_err)? {
            let file_type = entry.file_type().await.map_err(io_err)?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let kind = if file_type.is_dir() {
                EntryKind::Directory
            } else if file_type.is_file() {
                EntryKind::File
            } else {
                EntryKind::Other
            };
            let fetch_locator = match kind {
                EntryKind::File => Some(entry.path().display().to_string()),
                _ => None,
            };
            entries.push(DirectoryListing {
                kind,
                path: join_path(path, &name),
                name,
                fetch_locator,
            });
        }

        // read_dir order is platform-defined.
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
