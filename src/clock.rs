use std::time::{Duration, Instant};

/// Play-time accounting for one session. Elapsed and remaining time are
/// always derived from the start instant and the accumulated pause total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionClock {
    started: Instant,
    paused_total: Duration,
    paused_at: Option<Instant>,
    limit: Option<Duration>,
}

impl SessionClock {
    pub fn start(now: Instant, limit: Option<Duration>) -> Self {
        Self {
            started: now,
            paused_total: Duration::ZERO,
            paused_at: None,
            limit,
        }
    }

    pub fn limit(&self) -> Option<Duration> {
        self.limit
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(at);
        }
    }

    /// `now - start - paused`, with an open pause counted as paused.
    pub fn elapsed(&self, now: Instant) -> Duration {
        let mut paused = self.paused_total;
        if let Some(at) = self.paused_at {
            paused += now.saturating_duration_since(at);
        }
        now.saturating_duration_since(self.started)
            .saturating_sub(paused)
    }

    /// Seconds left under the limit; negative once it has run out.
    pub fn remaining(&self, now: Instant) -> Option<f64> {
        self.limit
            .map(|limit| limit.as_secs_f64() - self.elapsed(now).as_secs_f64())
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        matches!(self.remaining(now), Some(r) if r <= 0.0)
    }
}
