//! Usage: The cooldown gate between fired notifications.
//!
//! This is one of two independent temporal gates. The other one, the
//! single-flight settle timer, lives in the watcher itself as an abortable
//! task handle (cancel-and-replace); this one is a stateless timestamp
//! comparison (reject-if-too-soon). They are deliberately not conflated.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub(crate) struct Cooldown {
    window: Duration,
    last_fired: Option<Instant>,
}

impl Cooldown {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            window,
            last_fired: None,
        }
    }

    /// Checked at schedule time against the last *fired* notification, not the
    /// last scheduled one.
    pub(crate) fn allows(&self, now: Instant) -> bool {
        match self.last_fired {
            None => true,
            Some(fired_at) => now.duration_since(fired_at) > self.window,
        }
    }

    /// Called at firing time, never at scheduling time.
    pub(crate) fn record_fired(&mut self, now: Instant) {
        self.last_fired = Some(now);
    }
}
