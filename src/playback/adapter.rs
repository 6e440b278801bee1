use crate::error::PlaybackError;
use crate::library::{Playlist, TrackEntry};

use super::sequencer::PlaybackCursor;

/// The external player: fetches a track by its locator and plays it.
///
/// `start` replaces whatever is playing. Completion and asynchronous failures
/// come back through [`Session::on_track_ended`](super::Session::on_track_ended)
/// and [`Session::on_playback_error`](super::Session::on_playback_error).
pub trait PlaybackAdapter {
    fn start(&mut self, track: &TrackEntry) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn resume(&mut self) -> Result<(), PlaybackError>;
    fn stop(&mut self);
    /// `volume` is in `0..=100`.
    fn set_volume(&mut self, volume: u8);
}

/// Notifications for whatever presents the session. All default to no-ops.
pub trait HostEvents {
    fn on_scan_progress(&self, _percent: f64, _message: &str) {}

    fn on_playlist_changed(&self, _playlist: &Playlist, _cursor: PlaybackCursor) {}

    fn on_entry_selected(&self, _index: usize, _track: &TrackEntry) {}

    fn on_status(&self, _message: &str) {}
}

impl HostEvents for () {}
