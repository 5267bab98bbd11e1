//! Player - single-flight play/stop state machine
//!
//! `play` lays the whole sequence out on the emitter's clock up front and
//! hands every tone over at once; the emitter sounds them on its own. The
//! only deferred work is the completion callback that returns the player
//! to idle. Each `play` and `stop` bumps a generation counter and the
//! callback only acts if the generation it captured is still current.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::options::PlayOptions;
use super::timer::{CompletionTimer, ThreadTimer};
use super::timing;
use crate::audio::ToneEmitter;

/// The playback currently in flight
#[derive(Debug, Clone)]
struct Session {
    generation: u64,
    sequence: String,
    started_at: Duration,
    elapsed: Duration,
}

#[derive(Debug, Default)]
struct PlaybackState {
    generation: u64,
    session: Option<Session>,
}

/// Plays symbol sequences through a [`ToneEmitter`]
///
/// A player built without an emitter has no audio capability: `play`
/// never starts a session and `is_playing` stays false.
pub struct Player<E: ToneEmitter> {
    emitter: Option<E>,
    timer: Box<dyn CompletionTimer>,
    state: Arc<Mutex<PlaybackState>>,
}

impl<E: ToneEmitter> Player<E> {
    /// Create a player that completes sessions on a background thread
    pub fn new(emitter: Option<E>) -> Self {
        Self::with_timer(emitter, Box::new(ThreadTimer))
    }

    pub fn with_timer(emitter: Option<E>, timer: Box<dyn CompletionTimer>) -> Self {
        if emitter.is_none() {
            log::warn!("Player created without audio output, playback disabled");
        }
        Self {
            emitter,
            timer,
            state: Arc::new(Mutex::new(PlaybackState::default())),
        }
    }

    pub fn has_audio(&self) -> bool {
        self.emitter.is_some()
    }

    pub fn emitter(&self) -> Option<&E> {
        self.emitter.as_ref()
    }

    /// Start playing `sequence`
    ///
    /// Does nothing if a session is already active or there is no audio
    /// output. Check `is_playing` afterwards to see whether it started.
    pub fn play(&self, sequence: &str, options: &PlayOptions) {
        let Some(emitter) = &self.emitter else {
            log::debug!("No audio output, ignoring play");
            return;
        };

        let start = emitter.now();
        let timeline = timing::plan(sequence, options, start);

        let generation = {
            let mut state = lock(&self.state);
            if state.session.is_some() {
                log::debug!("Already playing, ignoring play");
                return;
            }
            state.generation += 1;
            state.session = Some(Session {
                generation: state.generation,
                sequence: sequence.to_string(),
                started_at: start,
                elapsed: timeline.elapsed,
            });
            state.generation
        };

        log::info!(
            "Playing {} tones over {:?} ({} ms unit, {} Hz)",
            timeline.events.len(),
            timeline.elapsed,
            options.unit_ms(),
            options.frequency()
        );

        for event in &timeline.events {
            emitter.emit(*event);
        }

        let state = Arc::downgrade(&self.state);
        self.timer.schedule(
            timeline.elapsed,
            Box::new(move || {
                if let Some(state) = state.upgrade() {
                    complete(&state, generation);
                }
            }),
        );
    }

    /// Cancel the active session, if any
    ///
    /// Safe to call at any time. Tones already handed to the emitter are
    /// silenced.
    pub fn stop(&self) {
        {
            let mut state = lock(&self.state);
            state.generation += 1;
            if let Some(session) = state.session.take() {
                log::info!("Playback stopped (generation {})", session.generation);
            }
        }
        if let Some(emitter) = &self.emitter {
            emitter.silence();
        }
    }

    pub fn is_playing(&self) -> bool {
        lock(&self.state).session.is_some()
    }

    /// The sequence being played, if any
    pub fn current_sequence(&self) -> Option<String> {
        lock(&self.state)
            .session
            .as_ref()
            .map(|s| s.sequence.clone())
    }

    /// Emitter-clock time at which the active session ends
    pub fn ends_at(&self) -> Option<Duration> {
        lock(&self.state)
            .session
            .as_ref()
            .map(|s| s.started_at + s.elapsed)
    }
}

fn lock(state: &Mutex<PlaybackState>) -> MutexGuard<'_, PlaybackState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Return to idle if `generation` is still the active session
fn complete(state: &Mutex<PlaybackState>, generation: u64) {
    let mut state = lock(state);
    let active = state.session.as_ref().map(|s| s.generation);
    if active == Some(generation) {
        state.session = None;
        log::info!("Playback complete (generation {})", generation);
    } else {
        log::debug!("Ignoring stale completion (generation {})", generation);
    }
}
