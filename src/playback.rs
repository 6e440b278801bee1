//! Playback: the cursor over the active playlist and the session that drives
//! an external player from it.
//!
//! `PlaybackSequencer` only moves a cursor. `Session` wires it to a
//! [`PlaybackAdapter`] (the thing that actually fetches and plays bytes) and a
//! [`HostEvents`] sink (whatever displays state).

mod adapter;
mod sequencer;
mod session;

pub use adapter::{HostEvents, PlaybackAdapter};
pub use sequencer::{PlaybackCursor, PlaybackMode, PlaybackSequencer};
pub use session::{PlaybackState, Session};

#[cfg(test)]
mod tests;
