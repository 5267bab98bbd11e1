//! Tone envelope - amplitude shaping for a single keyed tone
//!
//! Every tone starts silent, ramps linearly to `peak` over `attack`, then
//! decays exponentially to `floor` by the end of the tone. Without the ramp
//! the abrupt on/off edges are heard as clicks.

use std::time::Duration;

/// Default attack time
pub const ATTACK: Duration = Duration::from_millis(10);

/// Default peak gain reached at the end of the attack
pub const PEAK_GAIN: f32 = 0.3;

/// Default gain at the very end of a tone
pub const FLOOR_GAIN: f32 = 0.01;

/// Attack/decay gain curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnvelope {
    /// Linear ramp length from silence to `peak`
    pub attack: Duration,
    /// Gain at the end of the attack
    pub peak: f32,
    /// Gain the exponential decay reaches at the end of the tone
    pub floor: f32,
}

impl Default for ToneEnvelope {
    fn default() -> Self {
        Self {
            attack: ATTACK,
            peak: PEAK_GAIN,
            floor: FLOOR_GAIN,
        }
    }
}

impl ToneEnvelope {
    /// Gain at `elapsed` seconds into a tone lasting `duration` seconds
    ///
    /// Returns 0.0 outside `[0, duration)`. Tones shorter than the attack
    /// spend their whole length ramping up.
    pub fn gain(&self, elapsed: f64, duration: f64) -> f32 {
        if elapsed < 0.0 || elapsed >= duration {
            return 0.0;
        }

        let attack = self.attack.as_secs_f64().min(duration);
        if elapsed < attack {
            return (self.peak as f64 * elapsed / attack) as f32;
        }

        let decay = duration - attack;
        if decay <= 0.0 {
            return self.peak;
        }

        let progress = (elapsed - attack) / decay;
        let ratio = (self.floor / self.peak) as f64;
        (self.peak as f64 * ratio.powf(progress)) as f32
    }
}
