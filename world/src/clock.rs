//! Pausable session clock.

use std::time::Duration;

/// Monotonic session time that only advances while running.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clock {
    elapsed: Duration,
    running: bool,
}

impl Clock {
    /// Creates a running clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    /// Session time accumulated so far.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Session time in whole seconds.
    #[must_use]
    pub const fn elapsed_seconds(&self) -> u64 {
        self.elapsed.as_secs()
    }

    /// Reports whether ticks currently advance the clock.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the clock, returning the applied delta when running.
    pub(crate) fn advance(&mut self, dt: Duration) -> Option<Duration> {
        if !self.running || dt.is_zero() {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        Some(dt)
    }

    pub(crate) fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_clock_ignores_ticks() {
        let mut clock = Clock::new();
        assert_eq!(
            clock.advance(Duration::from_millis(250)),
            Some(Duration::from_millis(250))
        );
        clock.set_running(false);
        assert_eq!(clock.advance(Duration::from_secs(5)), None);
        assert_eq!(clock.elapsed(), Duration::from_millis(250));
    }

    #[test]
    fn reset_returns_to_zero_and_resumes() {
        let mut clock = Clock::new();
        let _ = clock.advance(Duration::from_millis(61_500));
        clock.set_running(false);
        assert_eq!(clock.elapsed_seconds(), 61);
        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);
        assert!(clock.is_running());
    }
}
