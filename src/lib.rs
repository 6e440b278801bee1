//! tunewalk: discover a music catalog in a directory tree (a GitHub repository
//! or a local folder), group it by artist and step through it.

pub mod config;
pub mod error;
pub mod library;
pub mod playback;
pub mod progress;
pub mod remote;
pub mod runtime;

#[cfg(test)]
pub(crate) mod test_support;
