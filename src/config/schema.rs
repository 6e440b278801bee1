use serde::{Deserialize, Serialize};

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/tunewalk/config.toml` or `~/.config/tunewalk/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `TUNEWALK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub remote: RemoteSettings,
    pub library: LibrarySettings,
    pub playback: PlaybackSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// `User-Agent` sent with every listing request (GitHub rejects requests without one).
    pub user_agent: String,
    /// Optional token, sent as a bearer credential to lift anonymous rate limits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request timeout in seconds. Unset waits forever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.github.com".to_string(),
            owner: "justAleks0".to_string(),
            repo: "MP3-Player".to_string(),
            user_agent: concat!("tunewalk/", env!("CARGO_PKG_VERSION")).to_string(),
            token: None,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory the walk starts from, relative to the source root.
    pub root_path: String,
    /// The single file extension treated as playable (case-insensitive, dot optional).
    pub extension: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            root_path: "MP3 Player/Songs".to_string(),
            extension: "mp3".to_string(),
        }
    }
}

impl LibrarySettings {
    /// Extension without leading dot or surrounding whitespace, lowercased.
    pub fn normalized_extension(&self) -> String {
        self.extension
            .trim()
            .trim_start_matches('.')
            .to_ascii_lowercase()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled after the first scan.
    pub shuffle: bool,
    /// Initial volume, 0..=100.
    pub volume: u8,
    /// Volume change per up/down step.
    pub volume_step: u8,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            shuffle: false,
            volume: 100,
            volume_step: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
