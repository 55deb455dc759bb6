use std::time::{Duration, Instant};

/// Liveness record fed to the external watchdog collaborator.
///
/// Updated on every structurally and semantically valid ArtPoll/ArtDmx; the
/// watchdog decides what to do with an aging timestamp, this type only keeps
/// it readable.
#[derive(Debug, Default)]
pub struct Liveness {
    last_valid: Option<Instant>,
}

impl Liveness {
    pub fn record(&mut self, now: Instant) {
        self.last_valid = Some(now);
    }

    pub fn last_valid(&self) -> Option<Instant> {
        self.last_valid
    }

    pub fn time_since(&self, now: Instant) -> Option<Duration> {
        self.last_valid
            .map(|at| now.saturating_duration_since(at))
    }
}
