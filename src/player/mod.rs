//! Player module - schedules symbol sequences as timed tones
//!
//! This module provides:
//! - `PlayOptions` (unit length, pitch, unmapped-symbol policy)
//! - `timing::plan`, the pure layout of a sequence on the audio clock
//! - `Player`, the play/stop state machine
//! - Completion timers used to return the player to idle

mod options;
mod playback;
mod timer;
pub mod timing;

#[cfg(test)]
pub(crate) mod testing;

pub use options::{OptionsError, PlayOptions, UnmappedSymbol, DEFAULT_FREQUENCY, DEFAULT_UNIT_MS};
pub use playback::Player;
pub use timer::{Completion, CompletionTimer, ThreadTimer};
pub use timing::Timeline;
