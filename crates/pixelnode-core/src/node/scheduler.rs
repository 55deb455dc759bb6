use std::time::{Duration, Instant};

/// Debounce state for broadcast ArtPollReply sends.
///
/// At most one reply is pending at a time; polls that arrive while pending
/// keep the original slot. A scheduled reply cannot be cancelled, it fires
/// once its delay elapses.
#[derive(Debug)]
pub struct ReplyScheduler {
    delay: Duration,
    scheduled_at: Option<Instant>,
}

impl ReplyScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            scheduled_at: None,
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Returns true when this call started a new pending reply.
    pub fn schedule(&mut self, now: Instant) -> bool {
        if self.scheduled_at.is_some() {
            return false;
        }
        self.scheduled_at = Some(now);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.scheduled_at.is_some()
    }

    /// Clears the pending state and returns true once the delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.scheduled_at {
            Some(at) if now.saturating_duration_since(at) >= self.delay => {
                self.scheduled_at = None;
                true
            }
            _ => false,
        }
    }
}
