//! Tone emitter - the capability the player schedules against

use std::time::Duration;

/// A single keyed tone on the audio clock
///
/// The waveform is always a sine; its amplitude follows
/// [`ToneEnvelope`](super::ToneEnvelope).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneEvent {
    /// Pitch in Hz
    pub frequency: u32,
    /// Absolute start time on the emitter's clock
    pub start: Duration,
    /// How long the tone sounds
    pub duration: Duration,
}

impl ToneEvent {
    pub fn new(frequency: u32, start: Duration, duration: Duration) -> Self {
        Self {
            frequency,
            start,
            duration,
        }
    }

    /// Clock time at which the tone has fully decayed
    pub fn end(&self) -> Duration {
        self.start + self.duration
    }
}

/// Something that can sound tones at absolute times
///
/// Implementations own a monotonic clock and fire submitted tones on their
/// own once that clock reaches each tone's start time. Tones are submitted
/// in start-time order and must not be reordered.
pub trait ToneEmitter {
    /// Current position of the audio clock
    fn now(&self) -> Duration;

    /// Queue a tone for playback
    fn emit(&self, tone: ToneEvent);

    /// Drop every queued and sounding tone
    fn silence(&self) {}
}

impl<E: ToneEmitter + ?Sized> ToneEmitter for Box<E> {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn emit(&self, tone: ToneEvent) {
        (**self).emit(tone)
    }

    fn silence(&self) {
        (**self).silence()
    }
}
