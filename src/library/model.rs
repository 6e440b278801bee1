use serde::Serialize;

/// An eligible media file found somewhere under the walk root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredFile {
    pub fetch_locator: String,
    pub name: String,
    /// Slash-delimited path of the directory holding the file.
    pub path: String,
    /// Last segment of `path`.
    pub parent_folder_name: String,
}

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN: &str = "Unknown";

/// Descriptive fields derived from a file name. No audio is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackMetadata {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub duration: String,
    pub bitrate: String,
    pub file_size: String,
}

impl TrackMetadata {
    /// Label/value rows for a "now playing" panel; empty values show as `N/A`.
    pub fn panel_rows(&self) -> [(&'static str, &str); 8] {
        fn or_na(v: &str) -> &str {
            if v.trim().is_empty() { "N/A" } else { v }
        }
        [
            ("Artist", or_na(&self.artist)),
            ("Title", or_na(&self.title)),
            ("Album", or_na(&self.album)),
            ("Year", or_na(&self.year)),
            ("Genre", or_na(&self.genre)),
            ("Duration", or_na(&self.duration)),
            ("Bitrate", or_na(&self.bitrate)),
            ("File size", or_na(&self.file_size)),
        ]
    }
}

/// A playable playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackEntry {
    pub fetch_locator: String,
    pub file_name: String,
    pub metadata: TrackMetadata,
    pub parent_folder_name: String,
    /// Precomputed at build time; carries the folder when the artist spans several.
    pub display_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PlaylistEntry {
    /// Non-playable marker opening an artist group.
    Separator { label: String },
    Track(TrackEntry),
}

impl PlaylistEntry {
    pub fn is_separator(&self) -> bool {
        matches!(self, Self::Separator { .. })
    }

    pub fn as_track(&self) -> Option<&TrackEntry> {
        match self {
            Self::Track(t) => Some(t),
            Self::Separator { .. } => None,
        }
    }

    /// The text a playlist view shows for this entry.
    pub fn label(&self) -> &str {
        match self {
            Self::Separator { label } => label,
            Self::Track(t) => &t.display_label,
        }
    }
}

/// Ordered playlist. Position is the only address an entry has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Playlist {
    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    pub fn new(entries: Vec<PlaylistEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlaylistEntry> {
        self.entries.get(index)
    }

    pub fn track(&self, index: usize) -> Option<&TrackEntry> {
        self.get(index).and_then(PlaylistEntry::as_track)
    }

    pub fn is_separator(&self, index: usize) -> bool {
        self.get(index).is_some_and(PlaylistEntry::is_separator)
    }

    pub fn tracks(&self) -> impl Iterator<Item = &TrackEntry> {
        self.entries.iter().filter_map(PlaylistEntry::as_track)
    }

    pub fn track_count(&self) -> usize {
        self.tracks().count()
    }

    pub fn has_tracks(&self) -> bool {
        self.entries.iter().any(|e| !e.is_separator())
    }

    /// Number of artist groups, i.e. separators.
    pub fn artist_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_separator()).count()
    }
}

impl From<Vec<PlaylistEntry>> for Playlist {
    fn from(entries: Vec<PlaylistEntry>) -> Self {
        Self::new(entries)
    }
}
