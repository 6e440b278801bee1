use std::future::Future;

use crate::error::ListingError;

use super::github::GithubContents;
use super::local::LocalTree;
use super::model::DirectoryListing;

/// Something that can list one directory at a time.
///
/// `path` is slash-delimited and relative to the source root; `""` is the root
/// itself. A failure covers only that directory.
pub trait ListingSource {
    fn list(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<Vec<DirectoryListing>, ListingError>>;
}

impl<S: ListingSource + ?Sized> ListingSource for &S {
    async fn list(&self, path: &str) -> Result<Vec<DirectoryListing>, ListingError> {
        (**self).list(path).await
    }
}

/// The source picked at startup.
#[derive(Debug)]
pub enum LibrarySource {
    Github(GithubContents),
    Local(LocalTree),
}

impl LibrarySource {
    /// Short human description for status lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Github(g) => format!("github:{}", g.repository()),
            Self::Local(l) => format!("local:{}", l.base().display()),
        }
    }
}

impl ListingSource for LibrarySource {
    async fn list(&self, path: &str) -> Result<Vec<DirectoryListing>, ListingError> {
        match self {
            Self::Github(g) => g.list(path).await,
            Self::Local(l) => l.list(path).await,
        }
    }
}
