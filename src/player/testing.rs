//! Test doubles for the player: a recording emitter and a manual timer

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::timer::{Completion, CompletionTimer};
use crate::audio::{ToneEmitter, ToneEvent};

/// Emitter with a hand-set clock that records every tone
#[derive(Default)]
pub struct RecordingEmitter {
    now: Cell<Duration>,
    events: RefCell<Vec<ToneEvent>>,
    silenced: Cell<usize>,
}

impl RecordingEmitter {
    pub fn set_now(&self, now: Duration) {
        self.now.set(now);
    }

    pub fn events(&self) -> Vec<ToneEvent> {
        self.events.borrow().clone()
    }

    pub fn silenced(&self) -> usize {
        self.silenced.get()
    }
}

impl ToneEmitter for RecordingEmitter {
    fn now(&self) -> Duration {
        self.now.get()
    }

    fn emit(&self, tone: ToneEvent) {
        self.events.borrow_mut().push(tone);
    }

    fn silence(&self) {
        self.silenced.set(self.silenced.get() + 1);
    }
}

/// Timer that only fires when told to, in scheduling order
#[derive(Default, Clone)]
pub struct ManualTimer {
    pending: Arc<Mutex<VecDeque<(Duration, Completion)>>>,
}

impl ManualTimer {
    /// Delays of completions not yet fired
    pub fn delays(&self) -> Vec<Duration> {
        self.pending.lock().unwrap().iter().map(|(d, _)| *d).collect()
    }

    pub fn fire_next(&self) {
        let next = self.pending.lock().unwrap().pop_front();
        if let Some((_, completion)) = next {
            completion();
        }
    }

    pub fn fire_all(&self) {
        loop {
            let next = self.pending.lock().unwrap().pop_front();
            match next {
                Some((_, completion)) => completion(),
                None => break,
            }
        }
    }
}

impl CompletionTimer for ManualTimer {
    fn schedule(&self, after: Duration, completion: Completion) {
        self.pending.lock().unwrap().push_back((after, completion));
    }
}
