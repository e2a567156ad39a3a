//! Frame timing for hosts that tick the simulator from a render or timer loop.

use std::time::Instant;

/// Turns frame timestamps into elapsed seconds.
///
/// The first frame has no predecessor and contributes a zero step.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    previous: Option<Instant>,
}

impl FrameClock {
    /// A clock that has not seen a frame yet.
    pub fn new() -> Self {
        FrameClock::default()
    }

    /// Seconds since the previous call, or 0.0 on the first frame.
    pub fn delta(&mut self, now: Instant) -> f64 {
        let dt = match self.previous {
            // a timestamp older than the previous one counts as no time passing
            Some(previous) => now.saturating_duration_since(previous).as_secs_f64(),
            None => 0.0,
        };
        self.previous = Some(now);
        dt
    }

    /// [`FrameClock::delta`] against the current time.
    pub fn tick(&mut self) -> f64 {
        self.delta(Instant::now())
    }

    /// Forgets the previous frame, e.g. after a pause.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
