//! morse-rs - Morse code translator and tone player
//!
//! Text is encoded into a space-delimited dot/dash sequence (`/` between
//! words) and decoded back. A [`Player`] lays a sequence out on an audio
//! clock with standard unit timing and hands the resulting tones to a
//! [`ToneEmitter`], normally the cpal-backed [`AudioEngine`].
//!
//! ```
//! let morse = morse_rs::encode("hello world");
//! assert_eq!(morse, ".... . .-.. .-.. --- / .-- --- .-. .-.. -..");
//! assert_eq!(morse_rs::decode(&morse), "HELLO WORLD");
//! ```

pub mod audio;
pub mod codec;
pub mod player;
pub mod settings;

pub use audio::{AudioConfig, AudioEngine, AudioError, ToneEmitter, ToneEvent};
pub use codec::{decode, encode};
pub use player::{PlayOptions, Player, UnmappedSymbol};
pub use settings::AppSettings;
