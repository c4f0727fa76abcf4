//! Tick-driven countdown for quiz timing.
//!
//! There is no internal clock: the session owner calls
//! [`tick`](Countdown::tick) once per second while a quiz is in progress.
//! Remaining time floors at zero, and every quiz exit path calls
//! [`stop`](Countdown::stop), so a stale tick can never fire into a later
//! phase.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_secs: u64,
    running: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self {
            remaining_secs: 0,
            running: false,
        }
    }

    /// Arms the countdown with a fresh budget.
    pub fn start(&mut self, duration_secs: u64) {
        self.remaining_secs = duration_secs;
        self.running = true;
    }

    /// Disarms the countdown; idempotent.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances one second and returns the new remaining value. A stopped
    /// countdown does not move.
    pub fn tick(&mut self) -> u64 {
        if self.running {
            self.remaining_secs = self.remaining_secs.saturating_sub(1);
        }
        self.remaining_secs
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
