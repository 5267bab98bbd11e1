//! Completion timers - fire-and-forget delayed callbacks

use std::thread;
use std::time::Duration;

/// Callback run once a session's elapsed time has passed
pub type Completion = Box<dyn FnOnce() + Send + 'static>;

/// Runs a completion after a delay without blocking the caller
pub trait CompletionTimer: Send + Sync {
    fn schedule(&self, after: Duration, completion: Completion);
}

/// Sleeps on a short-lived background thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadTimer;

impl CompletionTimer for ThreadTimer {
    fn schedule(&self, after: Duration, completion: Completion) {
        thread::spawn(move || {
            thread::sleep(after);
            completion();
        });
    }
}
