use std::fmt::Write as _;

use tracing::{debug, info};

use crate::error::PlaybackError;
use crate::library::{Playlist, PlaylistEntry, TrackEntry};
use crate::playback::{HostEvents, PlaybackAdapter, PlaybackCursor, PlaybackMode};

/// Prints session events to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleHost;

impl HostEvents for ConsoleHost {
    fn on_scan_progress(&self, percent: f64, message: &str) {
        println!("[{:>3}%] {message}", percent.round() as u8);
    }

    fn on_playlist_changed(&self, playlist: &Playlist, cursor: PlaybackCursor) {
        let mode = match cursor.mode {
            PlaybackMode::Sequential => "sequential",
            PlaybackMode::Shuffled => "shuffled",
        };
        println!(
            "Playlist: {} songs, {} entries ({mode})",
            playlist.track_count(),
            playlist.len()
        );
    }

    fn on_status(&self, message: &str) {
        println!("{message}");
    }
}

/// Stand-in player: announces each track instead of decoding it.
#[derive(Debug, Default)]
pub struct AnnounceAdapter {
    playing: Option<String>,
    volume: u8,
}

impl PlaybackAdapter for AnnounceAdapter {
    fn start(&mut self, track: &TrackEntry) -> Result<(), PlaybackError> {
        if track.fetch_locator.is_empty() {
            return Err(PlaybackError::Rejected {
                file_name: track.file_name.clone(),
                reason: "no fetch locator".to_string(),
            });
        }
        info!(locator = %track.fetch_locator, volume = self.volume, "stream requested");
        println!(
            "Now playing: {} - {}",
            track.metadata.artist, track.metadata.title
        );
        self.playing = Some(track.fetch_locator.clone());
        Ok(())
    }

    fn pause(&mut self) {
        debug!(locator = ?self.playing, "pause");
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        match &self.playing {
            Some(locator) => {
                debug!(%locator, "resume");
                Ok(())
            }
            None => Err(PlaybackError::Unavailable("nothing to resume".to_string())),
        }
    }

    fn stop(&mut self) {
        debug!(locator = ?self.playing, "stop");
        self.playing = None;
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
    }
}

/// One line per entry; the entry at `cursor` is marked with `>`.
pub fn render_playlist(playlist: &Playlist, cursor: Option<usize>) -> String {
    let mut out = String::new();
    for (i, entry) in playlist.entries().iter().enumerate() {
        let marker = if cursor == Some(i) { '>' } else { ' ' };
        let _ = match entry {
            PlaylistEntry::Separator { label } => writeln!(out, "{marker}      {label}"),
            PlaylistEntry::Track(t) => writeln!(out, "{marker}{i:>5}  {}", t.display_label),
        };
    }
    out
}

/// The metadata panel for one track.
pub fn render_panel(track: &TrackEntry) -> String {
    let mut out = String::new();
    for (label, value) in track.metadata.panel_rows() {
        let _ = writeln!(out, "{label:>10}: {value}");
    }
    let _ = writeln!(out, "{:>10}: {}", "Folder", track.parent_folder_name);
    out
}
