use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::library::{Playlist, PlaylistEntry, TrackEntry};

/// Which ordering is active.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Artist-grouped build order, separators included.
    #[default]
    Sequential,
    /// A random permutation of the tracks, no separators.
    Shuffled,
}

/// Position into whichever playlist is active, plus the active ordering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub position: usize,
    pub mode: PlaybackMode,
}

/// Owns the active playlist, the pre-shuffle snapshot and the cursor.
///
/// Every navigation operation is total: on an empty playlist (or one without
/// tracks) it does nothing and returns `None`. Whenever a `Some(index)` comes
/// back, the entry at `index` is a track.
#[derive(Debug)]
pub struct PlaybackSequencer<R = StdRng> {
    playlist: Playlist,
    original: Playlist,
    cursor: PlaybackCursor,
    rng: R,
}

impl PlaybackSequencer<StdRng> {
    /// Sequencer shuffling with an OS-seeded generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl Default for PlaybackSequencer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PlaybackSequencer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            playlist: Playlist::default(),
            original: Playlist::default(),
            cursor: PlaybackCursor::default(),
            rng,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// The sequential playlist kept for leaving shuffle mode.
    pub fn original(&self) -> &Playlist {
        &self.original
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    /// The track under the cursor, if the cursor rests on one.
    pub fn current(&self) -> Option<&TrackEntry> {
        self.playlist.track(self.cursor.position)
    }

    /// Install a freshly built playlist as both active and original.
    pub fn load(&mut self, playlist: Playlist) {
        self.original = playlist.clone();
        self.playlist = playlist;
        self.cursor = PlaybackCursor::default();
    }

    /// Point the cursor at `index`. A separator moves on to the next track.
    ///
    /// An index past the end of the playlist is ignored.
    pub fn select_index(&mut self, index: usize) -> Option<usize> {
        if index >= self.playlist.len() {
            return None;
        }
        self.cursor.position = index;
        if self.playlist.is_separator(index) {
            self.next()
        } else {
            Some(index)
        }
    }

    /// Advance past separators, wrapping at the end.
    ///
    /// The skip loop gives up once it wraps onto index 0, even on a separator;
    /// such a landing is then settled forward onto the first track.
    pub fn next(&mut self) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        let mut pos = self.cursor.position;
        loop {
            pos = (pos + 1) % len;
            if pos == 0 || !self.playlist.is_separator(pos) {
                break;
            }
        }
        self.cursor.position = pos;
        self.settle()
    }

    /// Step back past separators, wrapping at the start.
    ///
    /// Mirror of [`next`](Self::next) with the loop giving up on the last index.
    /// A separator landing still settles forward.
    pub fn previous(&mut self) -> Option<usize> {
        let len = self.playlist.len();
        if len == 0 {
            return None;
        }
        let last = len - 1;
        let mut pos = self.cursor.position % len;
        loop {
            pos = (pos + last) % len;
            if pos == last || !self.playlist.is_separator(pos) {
                break;
            }
        }
        self.cursor.position = pos;
        self.settle()
    }

    /// Switch between sequential and shuffled order and return the new mode.
    ///
    /// The numeric position is kept either way, so after a toggle it usually
    /// points at a different track.
    pub fn toggle_shuffle(&mut self) -> PlaybackMode {
        self.cursor.mode = match self.cursor.mode {
            PlaybackMode::Sequential => {
                self.original = self.playlist.clone();
                let mut tracks: Vec<PlaylistEntry> = self
                    .playlist
                    .entries()
                    .iter()
                    .filter(|e| !e.is_separator())
                    .cloned()
                    .collect();
                tracks.shuffle(&mut self.rng);
                self.playlist = Playlist::new(tracks);
                PlaybackMode::Shuffled
            }
            PlaybackMode::Shuffled => {
                self.playlist = self.original.clone();
                PlaybackMode::Sequential
            }
        };
        self.cursor.mode
    }

    pub fn clear(&mut self) {
        self.playlist = Playlist::default();
        self.original = Playlist::default();
        self.cursor = PlaybackCursor::default();
    }

    /// Move forward from the cursor until it rests on a track, at most one lap.
    fn settle(&mut self) -> Option<usize> {
        let len = self.playlist.len();
        let mut pos = self.cursor.position;
        for _ in 0..len {
            if self.playlist.track(pos).is_some() {
                self.cursor.position = pos;
                return Some(pos);
            }
            pos = (pos + 1) % len;
        }
        None
    }
}
