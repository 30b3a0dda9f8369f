use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Counts repeated presses inside a trailing time window.
///
/// Every [`record`](GestureTracker::record) drops entries older than the window,
/// and once `threshold` entries remain the gesture fires and the tracker empties.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    window: Duration,
    threshold: usize,
    events: VecDeque<Instant>,
}

impl GestureTracker {
    pub fn new(window: Duration, threshold: usize) -> Self {
        Self {
            window,
            threshold,
            events: VecDeque::with_capacity(threshold),
        }
    }

    /// Returns `true` when this event completes the gesture.
    pub fn record(&mut self, now: Instant) -> bool {
        self.events.push_back(now);

        while let Some(oldest) = self.events.front() {
            if now.saturating_duration_since(*oldest) > self.window {
                self.events.pop_front();
            } else {
                break;
            }
        }

        if self.events.len() >= self.threshold {
            self.events.clear();
            return true;
        }
        false
    }

}
