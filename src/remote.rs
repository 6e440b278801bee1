//! Directory listing sources.
//!
//! The catalog only ever talks to a [`ListingSource`]: one request per
//! directory, answered with the entries directly inside it. `GithubContents`
//! reads a repository through the GitHub contents API, `LocalTree` reads a
//! directory on disk.

mod github;
mod local;
mod model;
mod source;

pub use github::GithubContents;
pub use local::LocalTree;
pub use model::*;
pub use source::*;
