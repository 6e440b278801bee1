use std::collections::{HashMap, HashSet};

use crate::progress::ProgressReporter;

use super::display::{collate, separator_label, track_label};
use super::model::{DiscoveredFile, Playlist, PlaylistEntry, TrackEntry, TrackMetadata};

pub(crate) const ORGANIZE_PERCENT: f64 = 85.0;
pub(crate) const ORGANIZE_SPAN: f64 = 10.0;

/// Group tracks by artist and lay them out as a playlist.
///
/// Artists appear in collation order, each opened by a separator entry; tracks
/// within an artist are ordered by title. Input order only matters between
/// tracks whose titles collate equal.
pub fn build_playlist<P>(songs: Vec<(DiscoveredFile, TrackMetadata)>, progress: &P) -> Playlist
where
    P: ProgressReporter + ?Sized,
{
    let mut groups: HashMap<String, Vec<(DiscoveredFile, TrackMetadata)>> = HashMap::new();
    for (file, metadata) in songs {
        groups
            .entry(metadata.artist.clone())
            .or_default()
            .push((file, metadata));
    }

    let mut artists: Vec<String> = groups.keys().cloned().collect();
    artists.sort_by(|a, b| collate(a, b));

    let artist_count = artists.len();
    progress.report(
        ORGANIZE_PERCENT,
        &format!("Organizing {artist_count} artists..."),
    );

    let mut entries: Vec<PlaylistEntry> = Vec::new();
    for (i, artist) in artists.into_iter().enumerate() {
        let percent = ORGANIZE_PERCENT + (i as f64 / artist_count as f64) * ORGANIZE_SPAN;
        progress.report(percent, &format!("Adding {artist}..."));

        let mut tracks = groups.remove(&artist).unwrap_or_default();
        tracks.sort_by(|(_, a), (_, b)| collate(&a.title, &b.title));

        let folders: HashSet<&str> = tracks
            .iter()
            .map(|(f, _)| f.parent_folder_name.as_str())
            .collect();
        let disambiguate = folders.len() > 1;

        entries.push(PlaylistEntry::Separator {
            label: separator_label(&artist),
        });
        entries.extend(tracks.into_iter().map(|(file, metadata)| {
            PlaylistEntry::Track(TrackEntry {
                display_label: track_label(
                    &metadata.title,
                    &file.parent_folder_name,
                    disambiguate,
                ),
                fetch_locator: file.fetch_locator,
                file_name: file.name,
                parent_folder_name: file.parent_folder_name,
                metadata,
            })
        }));
    }

    Playlist::new(entries)
}
