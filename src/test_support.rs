//! In-memory fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::ListingError;
use crate::remote::{DirectoryListing, ListingSource, join_path};

/// A listing source backed by a map from path to listing (or failure status).
#[derive(Default)]
pub struct MemorySource {
    dirs: HashMap<String, Result<Vec<DirectoryListing>, u16>>,
    calls: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register directory `path` holding the given child names.
    ///
    /// Names ending in `/` become subdirectories, everything else a file whose
    /// locator is `mem://<path>/<name>`.
    pub fn dir(mut self, path: &str, children: &[&str]) -> Self {
        let listing = children
            .iter()
            .map(|child| match child.strip_suffix('/') {
                Some(name) => DirectoryListing::directory(name, join_path(path, name)),
                None => {
                    let full = join_path(path, child);
                    DirectoryListing::file(*child, full.clone(), format!("mem://{full}"))
                }
            })
            .collect();
        self.dirs.insert(path.to_string(), Ok(listing));
        self
    }

    /// Register directory `path` whose listing fails with `status`.
    pub fn failing(mut self, path: &str, status: u16) -> Self {
        self.dirs.insert(path.to_string(), Err(status));
        self
    }

    /// Paths requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ListingSource for MemorySource {
    async fn list(&self, path: &str) -> Result<Vec<DirectoryListing>, ListingError> {
        self.calls.lock().unwrap().push(path.to_string());
        match self.dirs.get(path) {
            Some(Ok(listing)) => Ok(listing.clone()),
            Some(Err(status)) => Err(ListingError::Status {
                path: path.to_string(),
                status: *status,
            }),
            None => Err(ListingError::Status {
                path: path.to_string(),
                status: 404,
            }),
        }
    }
}
