use anyhow::Result;
use rand::Rng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::config::LibrarySettings;
use crate::playback::{HostEvents, PlaybackAdapter, Session};
use crate::remote::ListingSource;

use super::console::{render_panel, render_playlist};

pub const HELP: &str = "\
commands:
  list               show the playlist
  play [N], enter N  play entry N (or the entry under the cursor)
  p, pause           play/pause
  stop               stop playback
  n, next            next track
  b, prev            previous track
  s, shuffle         toggle shuffle
  r, refresh         rescan the library
  clear              empty the playlist
  +, -               volume up/down
  end                current track finished
  info               metadata of the current track
  help               this text
  q, quit            exit";

/// One console command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    List,
    Play(Option<usize>),
    PlayPause,
    Stop,
    Next,
    Prev,
    Shuffle,
    Refresh,
    Clear,
    VolumeUp,
    VolumeDown,
    TrackEnded,
    Info,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ControlCmd>, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for '{word}'"));
    }

    let index = |arg: Option<&str>| -> Result<Option<usize>, String> {
        arg.map(|a| a.parse::<usize>().map_err(|_| format!("not an entry number: '{a}'")))
            .transpose()
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "play" => ControlCmd::Play(index(arg)?),
        "enter" => match index(arg)? {
            Some(i) => ControlCmd::Play(Some(i)),
            None => return Err("usage: enter N".to_string()),
        },
        other => {
            if let Some(a) = arg {
                return Err(format!("'{other}' takes no argument (got '{a}')"));
            }
            match other {
                "list" | "ls" => ControlCmd::List,
                "p" | "pause" => ControlCmd::PlayPause,
                "stop" => ControlCmd::Stop,
                "n" | "next" => ControlCmd::Next,
                "b" | "prev" => ControlCmd::Prev,
                "s" | "shuffle" => ControlCmd::Shuffle,
                "r" | "refresh" => ControlCmd::Refresh,
                "clear" => ControlCmd::Clear,
                "+" => ControlCmd::VolumeUp,
                "-" => ControlCmd::VolumeDown,
                "end" => ControlCmd::TrackEnded,
                "info" => ControlCmd::Info,
                "help" | "?" => ControlCmd::Help,
                "q" | "quit" | "exit" => ControlCmd::Quit,
                _ => return Err(format!("unknown command '{word}' (try 'help')")),
            }
        }
    };
    Ok(Some(cmd))
}

/// Read commands from stdin until `quit` or end of input.
pub async fn run<A, H, R, S>(
    session: &mut Session<A, H, R>,
    source: &S,
    library: &LibrarySettings,
) -> Result<()>
where
    A: PlaybackAdapter,
    H: HostEvents,
    R: Rng,
    S: ListingSource,
{
    println!("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Some(cmd)) => {
                if handle_command(cmd, session, source, library).await {
                    break;
                }
            }
            Ok(None) => {}
            Err(msg) => println!("{msg}"),
        }
    }

    session.stop();
    Ok(())
}

/// Apply `cmd` to the session. Returns `true` when the loop should end.
///
/// Failures have already been reported to the host by the session.
async fn handle_command<A, H, R, S>(
    cmd: ControlCmd,
    session: &mut Session<A, H, R>,
    source: &S,
    library: &LibrarySettings,
) -> bool
where
    A: PlaybackAdapter,
    H: HostEvents,
    R: Rng,
    S: ListingSource,
{
    let outcome = match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Help => {
            println!("{HELP}");
            Ok(())
        }
        ControlCmd::List => {
            let cursor = session.sequencer().cursor().position;
            print!("{}", render_playlist(session.sequencer().playlist(), Some(cursor)));
            Ok(())
        }
        ControlCmd::Info => {
            match session.current() {
                Some(track) => print!("{}", render_panel(track)),
                None => println!("No song selected"),
            }
            Ok(())
        }
        ControlCmd::Play(Some(i)) => session.select(i).map(|_| ()),
        ControlCmd::Play(None) | ControlCmd::PlayPause => session.play_pause(),
        ControlCmd::Stop => {
            session.stop();
            Ok(())
        }
        ControlCmd::Next => session.next().map(|_| ()),
        ControlCmd::Prev => session.previous().map(|_| ()),
        ControlCmd::TrackEnded => session.on_track_ended().map(|_| ()),
        ControlCmd::Shuffle => {
            session.toggle_shuffle();
            Ok(())
        }
        ControlCmd::Clear => {
            session.clear();
            Ok(())
        }
        ControlCmd::VolumeUp => {
            session.volume_up();
            Ok(())
        }
        ControlCmd::VolumeDown => {
            session.volume_down();
            Ok(())
        }
        ControlCmd::Refresh => {
            if let Err(e) = session.refresh(source, library).await {
                debug!(error = %e, "refresh failed");
            }
            Ok(())
        }
    };

    if let Err(e) = outcome {
        debug!(error = %e, "command failed");
    }
    false
}
