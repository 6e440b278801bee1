use rand::Rng;
use rand::rngs::StdRng;
use tracing::{error, info};

use crate::config::{LibrarySettings, PlaybackSettings};
use crate::error::{ListingError, PlaybackError};
use crate::library::{Playlist, TrackEntry, load_catalog};
use crate::remote::ListingSource;

use super::adapter::{HostEvents, PlaybackAdapter};
use super::sequencer::{PlaybackMode, PlaybackSequencer};

/// What the external player is doing, as far as the session knows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// One listening session: the sequencer plus the player and host it drives.
pub struct Session<A, H, R = StdRng> {
    sequencer: PlaybackSequencer<R>,
    adapter: A,
    host: H,
    state: PlaybackState,
    volume: u8,
    volume_step: u8,
}

impl<A: PlaybackAdapter, H: HostEvents> Session<A, H> {
    pub fn new(adapter: A, host: H, settings: &PlaybackSettings) -> Self {
        Self::with_sequencer(PlaybackSequencer::new(), adapter, host, settings)
    }
}

impl<A, H, R> Session<A, H, R>
where
    A: PlaybackAdapter,
    H: HostEvents,
    R: Rng,
{
    pub fn with_sequencer(
        sequencer: PlaybackSequencer<R>,
        mut adapter: A,
        host: H,
        settings: &PlaybackSettings,
    ) -> Self {
        let volume = settings.volume.min(100);
        adapter.set_volume(volume);
        Self {
            sequencer,
            adapter,
            host,
            state: PlaybackState::Stopped,
            volume,
            volume_step: settings.volume_step,
        }
    }

    pub fn sequencer(&self) -> &PlaybackSequencer<R> {
        &self.sequencer
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn current(&self) -> Option<&TrackEntry> {
        self.sequencer.current()
    }

    /// Drop the current catalog and rebuild it from `source`.
    ///
    /// Scan progress goes to the host. Only a failure to list the root is
    /// returned; the session is left empty in that case.
    pub async fn refresh<S: ListingSource>(
        &mut self,
        source: &S,
        settings: &LibrarySettings,
    ) -> Result<(), ListingError> {
        self.reset();
        self.host.on_playlist_changed(self.sequencer.playlist(), self.sequencer.cursor());

        let host = &self.host;
        let progress = |percent: f64, message: &str| host.on_scan_progress(percent, message);
        let scanned = load_catalog(source, settings, &progress).await;
        match scanned {
            Ok(playlist) => {
                let (tracks, artists) = (playlist.track_count(), playlist.artist_count());
                self.load(playlist);
                self.host
                    .on_status(&format!("Loaded {tracks} songs from {artists} artists"));
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "music library scan failed");
                self.host.on_status(&format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Install `playlist` in sequential order with the cursor at the top.
    pub fn load(&mut self, playlist: Playlist) {
        self.sequencer.load(playlist);
        self.host
            .on_playlist_changed(self.sequencer.playlist(), self.sequencer.cursor());
    }

    /// Play the entry at `index` (or the next track after a separator).
    pub fn select(&mut self, index: usize) -> Result<Option<usize>, PlaybackError> {
        let target = self.sequencer.select_index(index);
        self.start_at(target)
    }

    pub fn next(&mut self) -> Result<Option<usize>, PlaybackError> {
        let target = self.sequencer.next();
        self.start_at(target)
    }

    pub fn previous(&mut self) -> Result<Option<usize>, PlaybackError> {
        let target = self.sequencer.previous();
        self.start_at(target)
    }

    pub fn play_pause(&mut self) -> Result<(), PlaybackError> {
        match self.state {
            PlaybackState::Stopped => {
                let position = self.sequencer.cursor().position;
                let target = self.sequencer.select_index(position);
                self.start_at(target).map(|_| ())
            }
            PlaybackState::Playing => {
                self.adapter.pause();
                self.state = PlaybackState::Paused;
                self.host.on_status("Paused");
                Ok(())
            }
            PlaybackState::Paused => match self.adapter.resume() {
                Ok(()) => {
                    self.state = PlaybackState::Playing;
                    self.host.on_status("Resumed");
                    Ok(())
                }
                Err(e) => {
                    self.fail(&e, "Failed to stream song");
                    Err(e)
                }
            },
        }
    }

    pub fn stop(&mut self) {
        self.adapter.stop();
        self.state = PlaybackState::Stopped;
        self.host.on_status("Stopped");
    }

    pub fn toggle_shuffle(&mut self) -> PlaybackMode {
        let mode = self.sequencer.toggle_shuffle();
        self.host
            .on_playlist_changed(self.sequencer.playlist(), self.sequencer.cursor());
        self.host.on_status(match mode {
            PlaybackMode::Shuffled => "Shuffle enabled",
            PlaybackMode::Sequential => "Shuffle disabled",
        });
        mode
    }

    pub fn clear(&mut self) {
        self.reset();
        self.host
            .on_playlist_changed(self.sequencer.playlist(), self.sequencer.cursor());
        self.host.on_status("Playlist cleared");
    }

    pub fn volume_up(&mut self) -> u8 {
        self.set_volume(self.volume.saturating_add(self.volume_step))
    }

    pub fn volume_down(&mut self) -> u8 {
        self.set_volume(self.volume.saturating_sub(self.volume_step))
    }

    /// Set the volume, clamped to `0..=100`, and return the applied value.
    pub fn set_volume(&mut self, volume: u8) -> u8 {
        self.volume = volume.min(100);
        self.adapter.set_volume(self.volume);
        self.host.on_status(&format!("Volume: {}%", self.volume));
        self.volume
    }

    /// The player finished the current track.
    pub fn on_track_ended(&mut self) -> Result<Option<usize>, PlaybackError> {
        self.next()
    }

    /// The player failed after a successful start. The cursor stays put.
    pub fn on_playback_error(&mut self, err: &PlaybackError) {
        self.fail(err, "Error playing audio file");
    }

    fn reset(&mut self) {
        if self.state != PlaybackState::Stopped {
            self.adapter.stop();
            self.state = PlaybackState::Stopped;
        }
        self.sequencer.clear();
    }

    fn start_at(&mut self, target: Option<usize>) -> Result<Option<usize>, PlaybackError> {
        let Some(index) = target else {
            return Ok(None);
        };
        let Some(track) = self.sequencer.playlist().track(index) else {
            return Ok(None);
        };

        match self.adapter.start(track) {
            Ok(()) => {
                info!(index, locator = %track.fetch_locator, "playing {}", track.file_name);
                self.state = PlaybackState::Playing;
                self.host.on_entry_selected(index, track);
                self.host
                    .on_status(&format!("Playing: {}", track.metadata.title));
                Ok(Some(index))
            }
            Err(e) => {
                self.fail(&e, "Failed to stream song");
                Err(e)
            }
        }
    }

    fn fail(&mut self, err: &PlaybackError, status: &str) {
        error!(error = %err, "playback failed");
        self.state = PlaybackState::Stopped;
        self.host.on_status(status);
    }
}
