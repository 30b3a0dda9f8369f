use std::time::{Duration, Instant};

/// The period after a submit during which the print button stays disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackWindow {
    pub expires_at: Instant,
}

impl FeedbackWindow {
    pub fn open(now: Instant, duration: Duration) -> Self {
        Self {
            expires_at: now + duration,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
