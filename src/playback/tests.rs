use super::*;
use crate::config::{LibrarySettings, PlaybackSettings};
use crate::error::PlaybackError;
use crate::library::{Playlist, PlaylistEntry, TrackEntry, derive_metadata};
use crate::test_support::MemorySource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::{Cell, RefCell};

fn sep(artist: &str) -> PlaylistEntry {
    PlaylistEntry::Separator {
        label: format!("====={artist}====="),
    }
}

fn track(file_name: &str) -> PlaylistEntry {
    let metadata = derive_metadata(file_name, "mp3");
    PlaylistEntry::Track(TrackEntry {
        fetch_locator: format!("mem://{file_name}"),
        file_name: file_name.to_string(),
        display_label: metadata.title.clone(),
        parent_folder_name: "Songs".to_string(),
        metadata,
    })
}

/// `[Sep X, A1, A2, Sep Y, B1]`
fn grouped() -> Playlist {
    Playlist::new(vec![
        sep("X"),
        track("X - A1.mp3"),
        track("X - A2.mp3"),
        sep("Y"),
        track("Y - B1.mp3"),
    ])
}

fn seeded(seed: u64) -> PlaybackSequencer<StdRng> {
    PlaybackSequencer::with_rng(StdRng::seed_from_u64(seed))
}

fn loaded(playlist: Playlist) -> PlaybackSequencer<StdRng> {
    let mut seq = seeded(7);
    seq.load(playlist);
    seq
}

fn file_names(playlist: &Playlist) -> Vec<String> {
    playlist.tracks().map(|t| t.file_name.clone()).collect()
}

// --- sequencer --------------------------------------------------------------

#[test]
fn next_skips_separators_between_groups() {
    let mut seq = loaded(grouped());
    assert_eq!(seq.select_index(1), Some(1));
    assert_eq!(seq.next(), Some(2));
    assert_eq!(seq.next(), Some(4));
    assert_eq!(seq.cursor().position, 4);
    assert_eq!(seq.current().map(|t| t.metadata.title.as_str()), Some("B1"));
}

#[test]
fn next_wraps_to_first_track() {
    let mut seq = loaded(grouped());
    seq.select_index(4);
    assert_eq!(seq.next(), Some(1));
}

#[test]
fn previous_skips_separators_and_wraps() {
    let mut seq = loaded(grouped());
    seq.select_index(4);
    assert_eq!(seq.previous(), Some(2));
    assert_eq!(seq.previous(), Some(1));
    assert_eq!(seq.previous(), Some(4));
}

#[test]
fn next_then_previous_returns_to_start() {
    for start in [1, 2, 4] {
        let mut seq = loaded(grouped());
        seq.select_index(start);
        seq.next();
        assert_eq!(seq.previous(), Some(start), "starting at {start}");
    }
}

#[test]
fn trailing_separator_makes_next_previous_non_invertible() {
    let mut seq = loaded(Playlist::new(vec![
        sep("A"),
        track("A - A1.mp3"),
        track("B - B1.mp3"),
        sep("Z"),
    ]));
    seq.select_index(2);

    // wraps onto index 0 and settles on A1
    assert_eq!(seq.next(), Some(1));
    // stops on the trailing separator and settles forward onto A1 again
    assert_eq!(seq.previous(), Some(1));
}

#[test]
fn selecting_a_separator_plays_the_following_track() {
    let mut seq = loaded(grouped());
    assert_eq!(seq.select_index(0), Some(1));
    assert_eq!(seq.select_index(3), Some(4));
}

#[test]
fn select_past_the_end_is_ignored() {
    let mut seq = loaded(grouped());
    seq.select_index(2);
    assert_eq!(seq.select_index(5), None);
    assert_eq!(seq.cursor().position, 2);
}

#[test]
fn empty_playlist_navigation_is_a_no_op() {
    let mut seq = loaded(Playlist::default());
    assert_eq!(seq.next(), None);
    assert_eq!(seq.previous(), None);
    assert_eq!(seq.select_index(0), None);
    assert_eq!(seq.cursor(), PlaybackCursor::default());
    assert!(seq.current().is_none());
}

#[test]
fn separator_only_playlist_has_nothing_to_play() {
    let mut seq = loaded(Playlist::new(vec![sep("A"), sep("B")]));
    assert_eq!(seq.next(), None);
    assert_eq!(seq.cursor().position, 0);
    assert_eq!(seq.previous(), None);
    assert_eq!(seq.select_index(1), None);
    assert!(seq.current().is_none());
}

#[test]
fn navigation_always_rests_on_a_track() {
    let playlist = Playlist::new(vec![
        sep("A"),
        track("A - 1.mp3"),
        sep("B"),
        sep("C"),
        track("C - 1.mp3"),
        track("C - 2.mp3"),
        sep("D"),
    ]);
    let mut seq = loaded(playlist);
    let mut ops = StdRng::seed_from_u64(99);

    for _ in 0..500 {
        let landed = match ops.random_range(0..4) {
            0 => seq.next(),
            1 => seq.previous(),
            2 => {
                let len = seq.playlist().len();
                seq.select_index(ops.random_range(0..len))
            }
            _ => {
                seq.toggle_shuffle();
                continue;
            }
        };
        let index = landed.expect("playlist has tracks");
        assert_eq!(index, seq.cursor().position);
        assert!(seq.current().is_some(), "rested on a separator at {index}");
    }
}

#[test]
fn shuffle_is_a_permutation_of_tracks_only() {
    let mut seq = loaded(grouped());
    assert_eq!(seq.toggle_shuffle(), PlaybackMode::Shuffled);

    let shuffled = seq.playlist();
    assert_eq!(shuffled.len(), 3);
    assert!(shuffled.entries().iter().all(|e| !e.is_separator()));

    let mut got = file_names(shuffled);
    got.sort();
    assert_eq!(got, vec!["X - A1.mp3", "X - A2.mp3", "Y - B1.mp3"]);
}

#[test]
fn shuffle_order_follows_the_injected_rng() {
    let many: Vec<PlaylistEntry> = (0..20).map(|i| track(&format!("A - {i:02}.mp3"))).collect();

    let mut first = seeded(42);
    first.load(Playlist::new(many.clone()));
    first.toggle_shuffle();

    let mut second = seeded(42);
    second.load(Playlist::new(many));
    second.toggle_shuffle();

    assert_eq!(first.playlist(), second.playlist());
}

#[test]
fn shuffle_off_restores_the_original_order() {
    let mut seq = loaded(grouped());
    seq.toggle_shuffle();
    assert_eq!(seq.original(), &grouped());

    assert_eq!(seq.toggle_shuffle(), PlaybackMode::Sequential);
    assert_eq!(seq.playlist(), &grouped());
    assert_eq!(seq.cursor().mode, PlaybackMode::Sequential);
}

#[test]
fn shuffle_keeps_the_numeric_position() {
    let mut seq = loaded(grouped());
    seq.select_index(2);
    seq.toggle_shuffle();
    assert_eq!(seq.cursor().position, 2);
    seq.toggle_shuffle();
    assert_eq!(seq.cursor().position, 2);
}

#[test]
fn load_resets_cursor_and_mode() {
    let mut seq = loaded(grouped());
    seq.select_index(4);
    seq.toggle_shuffle();

    seq.load(grouped());
    assert_eq!(seq.cursor(), PlaybackCursor::default());
    assert_eq!(seq.playlist(), seq.original());
}

#[test]
fn clear_empties_everything() {
    let mut seq = loaded(grouped());
    seq.select_index(4);
    seq.toggle_shuffle();

    seq.clear();
    assert!(seq.playlist().is_empty());
    assert!(seq.original().is_empty());
    assert_eq!(seq.cursor(), PlaybackCursor::default());
}

// --- session ----------------------------------------------------------------

#[derive(Default)]
struct FakePlayer {
    started: Vec<String>,
    paused: usize,
    stopped: usize,
    volume: Option<u8>,
    reject: Option<String>,
    resume_fails: bool,
}

impl PlaybackAdapter for FakePlayer {
    fn start(&mut self, track: &TrackEntry) -> Result<(), PlaybackError> {
        self.started.push(track.file_name.clone());
        if self.reject.as_deref() == Some(track.file_name.as_str()) {
            return Err(PlaybackError::Rejected {
                file_name: track.file_name.clone(),
                reason: "bad stream".to_string(),
            });
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.paused += 1;
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        if self.resume_fails {
            Err(PlaybackError::Unavailable("gone".to_string()))
        } else {
            Ok(())
        }
    }

    fn stop(&mut self) {
        self.stopped += 1;
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = Some(volume);
    }
}

#[derive(Default)]
struct Recorder {
    statuses: RefCell<Vec<String>>,
    selected: RefCell<Vec<usize>>,
    progress: RefCell<Vec<f64>>,
    changes: Cell<usize>,
}

impl Recorder {
    fn last_status(&self) -> Option<String> {
        self.statuses.borrow().last().cloned()
    }
}

impl HostEvents for Recorder {
    fn on_scan_progress(&self, percent: f64, _message: &str) {
        self.progress.borrow_mut().push(percent);
    }

    fn on_playlist_changed(&self, _playlist: &Playlist, _cursor: PlaybackCursor) {
        self.changes.set(self.changes.get() + 1);
    }

    fn on_entry_selected(&self, index: usize, _track: &TrackEntry) {
        self.selected.borrow_mut().push(index);
    }

    fn on_status(&self, message: &str) {
        self.statuses.borrow_mut().push(message.to_string());
    }
}

fn session(player: FakePlayer) -> Session<FakePlayer, Recorder, StdRng> {
    let mut s = Session::with_sequencer(
        seeded(3),
        player,
        Recorder::default(),
        &PlaybackSettings::default(),
    );
    s.load(grouped());
    s
}

#[test]
fn next_starts_the_player() {
    let mut s = session(FakePlayer::default());
    assert_eq!(s.select(1), Ok(Some(1)));
    assert_eq!(s.next(), Ok(Some(2)));

    assert_eq!(s.state(), PlaybackState::Playing);
    assert_eq!(s.adapter().started, vec!["X - A1.mp3", "X - A2.mp3"]);
    assert_eq!(*s.host().selected.borrow(), vec![1, 2]);
    assert_eq!(s.host().last_status().as_deref(), Some("Playing: A2"));
}

#[test]
fn rejected_start_stops_without_advancing() {
    let mut s = session(FakePlayer {
        reject: Some("X - A2.mp3".to_string()),
        ..FakePlayer::default()
    });
    s.select(1).unwrap();

    let err = s.next().unwrap_err();
    assert!(matches!(err, PlaybackError::Rejected { .. }));
    assert_eq!(s.state(), PlaybackState::Stopped);
    assert_eq!(s.sequencer().cursor().position, 2);
    assert_eq!(s.adapter().started.len(), 2);
    assert_eq!(s.host().last_status().as_deref(), Some("Failed to stream song"));
    assert_eq!(*s.host().selected.borrow(), vec![1]);
}

#[test]
fn play_pause_cycles_through_states() {
    let mut s = session(FakePlayer::default());

    s.play_pause().unwrap();
    assert_eq!(s.state(), PlaybackState::Playing);
    assert_eq!(s.adapter().started, vec!["X - A1.mp3"]);

    s.play_pause().unwrap();
    assert_eq!(s.state(), PlaybackState::Paused);
    assert_eq!(s.adapter().paused, 1);

    s.play_pause().unwrap();
    assert_eq!(s.state(), PlaybackState::Playing);
    assert_eq!(s.adapter().started.len(), 1);
}

#[test]
fn failed_resume_stops() {
    let mut s = session(FakePlayer {
        resume_fails: true,
        ..FakePlayer::default()
    });
    s.play_pause().unwrap();
    s.play_pause().unwrap();

    assert!(s.play_pause().is_err());
    assert_eq!(s.state(), PlaybackState::Stopped);
}

#[test]
fn play_pause_on_empty_playlist_does_nothing() {
    let mut s = session(FakePlayer::default());
    s.load(Playlist::default());
    assert_eq!(s.play_pause(), Ok(()));
    assert_eq!(s.state(), PlaybackState::Stopped);
    assert!(s.adapter().started.is_empty());
    assert_eq!(s.next(), Ok(None));
    assert_eq!(s.previous(), Ok(None));
    assert_eq!(s.select(0), Ok(None));
}

#[test]
fn playback_error_keeps_the_cursor() {
    let mut s = session(FakePlayer::default());
    s.select(4).unwrap();

    s.on_playback_error(&PlaybackError::Unavailable("decoder crashed".to_string()));
    assert_eq!(s.state(), PlaybackState::Stopped);
    assert_eq!(s.sequencer().cursor().position, 4);
    assert_eq!(s.host().last_status().as_deref(), Some("Error playing audio file"));
}

#[test]
fn track_end_advances() {
    let mut s = session(FakePlayer::default());
    s.select(2).unwrap();
    assert_eq!(s.on_track_ended(), Ok(Some(4)));
    assert_eq!(s.current().map(|t| t.file_name.as_str()), Some("Y - B1.mp3"));
}

#[test]
fn volume_is_clamped() {
    let mut s = session(FakePlayer::default());
    assert_eq!(s.adapter().volume, Some(100));
    assert_eq!(s.volume_up(), 100);
    assert_eq!(s.volume_down(), 90);
    assert_eq!(s.set_volume(250), 100);
    assert_eq!(s.set_volume(0), 0);
    assert_eq!(s.volume_down(), 0);
    assert_eq!(s.adapter().volume, Some(0));
    assert_eq!(s.host().last_status().as_deref(), Some("Volume: 0%"));
}

#[test]
fn shuffle_toggle_notifies_host() {
    let mut s = session(FakePlayer::default());
    let before = s.host().changes.get();

    assert_eq!(s.toggle_shuffle(), PlaybackMode::Shuffled);
    assert_eq!(s.host().last_status().as_deref(), Some("Shuffle enabled"));
    assert_eq!(s.toggle_shuffle(), PlaybackMode::Sequential);
    assert_eq!(s.host().last_status().as_deref(), Some("Shuffle disabled"));
    assert_eq!(s.host().changes.get(), before + 2);
}

#[test]
fn clear_stops_playback_and_empties() {
    let mut s = session(FakePlayer::default());
    s.select(1).unwrap();

    s.clear();
    assert_eq!(s.state(), PlaybackState::Stopped);
    assert_eq!(s.adapter().stopped, 1);
    assert!(s.sequencer().playlist().is_empty());
    assert_eq!(s.host().last_status().as_deref(), Some("Playlist cleared"));
}

fn library() -> LibrarySettings {
    LibrarySettings {
        root_path: "Songs".to_string(),
        ..LibrarySettings::default()
    }
}

#[tokio::test]
async fn refresh_loads_the_catalog() {
    let source = MemorySource::new()
        .dir("Songs", &["Rock/", "Pop/"])
        .dir("Songs/Rock", &["Queen - A.mp3", "Queen - B.mp3"])
        .dir("Songs/Pop", &["ABBA - SOS.mp3"]);
    let mut s = session(FakePlayer::default());
    s.select(1).unwrap();

    s.refresh(&source, &library()).await.unwrap();

    assert_eq!(s.adapter().stopped, 1);
    assert_eq!(s.state(), PlaybackState::Stopped);
    assert_eq!(s.sequencer().playlist().len(), 5);
    assert_eq!(
        s.host().last_status().as_deref(),
        Some("Loaded 3 songs from 2 artists")
    );
    let progress = s.host().progress.borrow();
    assert_eq!(progress.last(), Some(&100.0));
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn refresh_root_failure_leaves_session_empty() {
    let source = MemorySource::new().failing("Songs", 404);
    let mut s = session(FakePlayer::default());

    assert!(s.refresh(&source, &library()).await.is_err());
    assert!(s.sequencer().playlist().is_empty());
    let status = s.host().last_status().unwrap_or_default();
    assert!(status.starts_with("Error: "), "{status}");
}

#[test]
fn unit_host_accepts_every_event() {
    let mut s = Session::with_sequencer(seeded(1), FakePlayer::default(), (), &PlaybackSettings::default());
    s.load(grouped());
    assert_eq!(s.next(), Ok(Some(1)));
}
