//! Fixed-rate frame pacing for the main loop.

use std::time::{Duration, Instant};

/// Hands out one frame's worth of elapsed time per deadline.
///
/// When the loop falls more than a frame behind, the missed frames are
/// reported as one longer step and the schedule is re-based on `now`.
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    next_deadline: Instant,
}

impl FramePacer {
    pub fn new(frame_ms: u32, now: Instant) -> Self {
        let frame = Duration::from_millis(u64::from(frame_ms.max(1)));
        Self {
            frame,
            next_deadline: now + frame,
        }
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// How long input polling may block before the next frame is due.
    pub fn time_until_deadline(&self, now: Instant) -> Duration {
        self.next_deadline.saturating_duration_since(now)
    }

    /// If the deadline has passed, advance it and return the milliseconds to
    /// feed into the game clock.
    pub fn frame_elapsed(&mut self, now: Instant) -> Option<u32> {
        if now < self.next_deadline {
            return None;
        }

        let behind = now - self.next_deadline;
        if behind < self.frame {
            self.next_deadline += self.frame;
            return Some(self.frame.as_millis() as u32);
        }

        let elapsed = self.frame + behind;
        self.next_deadline = now + self.frame;
        Some(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX))
    }
}
