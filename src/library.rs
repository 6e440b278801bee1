//! The catalog: discovering eligible files under a listing source, deriving
//! their metadata and laying them out as an artist-grouped playlist.

mod catalog;
mod display;
mod metadata;
mod model;
mod scan;

pub use catalog::build_playlist;
pub use display::{collate, separator_label, track_label};
pub use metadata::{derive_metadata, strip_extension};
pub use model::*;
pub use scan::scan;

use tracing::info;

use crate::config::LibrarySettings;
use crate::error::ListingError;
use crate::progress::{ProgressReporter, clamp_percent};
use crate::remote::ListingSource;

const METADATA_PERCENT: f64 = 20.0;
const METADATA_SPAN: f64 = 60.0;

/// Run a full scan: list the root, walk the tree, derive metadata and build the playlist.
///
/// Only a failure to list the root itself is returned; failures below it just
/// leave their subtree out.
pub async fn load_catalog<S, P>(
    source: &S,
    settings: &LibrarySettings,
    progress: &P,
) -> Result<Playlist, ListingError>
where
    S: ListingSource,
    P: ProgressReporter + ?Sized,
{
    let report = |percent: f64, message: &str| progress.report(clamp_percent(percent), message);

    report(5.0, "Connecting to music library...");
    let root = settings.root_path.trim_matches('/');
    let initial = source.list(root).await?;

    report(10.0, "Discovering all music files...");
    let files = scan(source, root, initial, settings, &report).await;

    report(METADATA_PERCENT, "Scanning metadata from all files...");
    let total = files.len();
    let extension = settings.normalized_extension();
    let mut songs = Vec::with_capacity(total);
    for (i, file) in files.into_iter().enumerate() {
        let percent = METADATA_PERCENT + (i as f64 / total as f64) * METADATA_SPAN;
        report(percent, &format!("Scanning: {} ({}/{})", file.name, i + 1, total));
        let metadata = derive_metadata(&file.name, &extension);
        songs.push((file, metadata));
    }

    report(80.0, "Organizing songs by artist...");
    let playlist = build_playlist(songs, &report);
    info!(
        tracks = playlist.track_count(),
        artists = playlist.artist_count(),
        "catalog built"
    );

    report(100.0, "Music library scan complete!");
    Ok(playlist)
}
