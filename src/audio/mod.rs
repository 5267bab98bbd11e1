//! Audio module - tone events and their playback
//!
//! This module provides:
//! - `ToneEmitter` trait, the seam between the player and real audio
//! - Tone envelope (linear attack, exponential decay)
//! - Audio engine for cpal integration

mod emitter;
mod engine;
mod envelope;

// Re-export public types
pub use emitter::{ToneEmitter, ToneEvent};
pub use engine::{AudioConfig, AudioEngine, AudioError};
pub use envelope::ToneEnvelope;
