//! Error types shared by the listing sources and the playback session.

use thiserror::Error;

/// A directory listing could not be produced.
///
/// Inside a walk this only costs the affected subtree; it is returned to the
/// caller solely when the root listing itself fails.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request never produced a response.
    #[error("request for '{path}' failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The listing endpoint answered with a non-success status.
    #[error("listing '{path}' returned status {status}")]
    Status { path: String, status: u16 },

    /// The response body was not a directory listing.
    #[error("listing '{path}' could not be decoded: {message}")]
    Decode { path: String, message: String },

    /// Local directory read failed.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid listing url: {0}")]
    InvalidUrl(String),
}

impl ListingError {
    /// The listing path the error refers to, when there is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Transport { path, .. }
            | Self::Status { path, .. }
            | Self::Decode { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::Client(_) | Self::InvalidUrl(_) => None,
        }
    }
}

/// The external player refused or failed a track.
///
/// Never retried and never auto-advanced; the cursor stays where it is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("player rejected '{file_name}': {reason}")]
    Rejected { file_name: String, reason: String },

    #[error("player unavailable: {0}")]
    Unavailable(String),
}
