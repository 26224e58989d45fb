//! Per-tile activation countdown

use serde::{Deserialize, Serialize};

use crate::consts::COUNTDOWN_INTERVAL_SECS;

/// Result of advancing a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Deadline not reached yet
    Waiting,
    /// Decremented, still running
    Decremented { remaining: u32 },
    /// Reached zero; the owner should drop the countdown
    Expired,
}

/// Whole seconds remaining before a tile deactivates.
///
/// Decrements at most once per [`advance`](Self::advance) call, when the level
/// clock reaches the next deadline. The deadline is recomputed from the
/// current time after every decrement or restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    next_deadline: f64,
}

impl Countdown {
    /// Start counting down from `seconds` at level time `now`
    pub fn start(seconds: u32, now: f64) -> Self {
        Self {
            remaining: seconds,
            next_deadline: now + COUNTDOWN_INTERVAL_SECS,
        }
    }

    /// Reset to `seconds` with a full interval before the next decrement
    pub fn restart(&mut self, seconds: u32, now: f64) {
        self.remaining = seconds;
        self.next_deadline = now + COUNTDOWN_INTERVAL_SECS;
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn next_deadline(&self) -> f64 {
        self.next_deadline
    }

    /// Advance to level time `now`
    pub fn advance(&mut self, now: f64) -> CountdownTick {
        if now < self.next_deadline {
            return match self.remaining {
                0 => CountdownTick::Expired,
                _ => CountdownTick::Waiting,
            };
        }

        self.remaining = self.remaining.saturating_sub(1);
        self.next_deadline = now + COUNTDOWN_INTERVAL_SECS;

        match self.remaining {
            0 => CountdownTick::Expired,
            remaining => CountdownTick::Decremented { remaining },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_once_per_second() {
        let mut countdown = Countdown::start(3, 0.0);
        assert_eq!(countdown.advance(0.5), CountdownTick::Waiting);
        assert_eq!(countdown.remaining(), 3);

        assert_eq!(
            countdown.advance(1.0),
            CountdownTick::Decremented { remaining: 2 }
        );
        assert_eq!(countdown.advance(1.5), CountdownTick::Waiting);
        assert_eq!(
            countdown.advance(2.0),
            CountdownTick::Decremented { remaining: 1 }
        );
        assert_eq!(countdown.advance(3.0), CountdownTick::Expired);
    }

    #[test]
    fn test_long_frame_decrements_once() {
        let mut countdown = Countdown::start(5, 0.0);
        countdown.advance(4.0);
        assert_eq!(countdown.remaining(), 4);
        assert_eq!(countdown.next_deadline(), 5.0);
    }

    #[test]
    fn test_restart_pushes_deadline() {
        let mut countdown = Countdown::start(3, 0.0);
        countdown.advance(1.0);
        countdown.advance(2.0);
        assert_eq!(countdown.remaining(), 1);

        countdown.restart(3, 2.5);
        assert_eq!(countdown.advance(3.0), CountdownTick::Waiting);
        assert_eq!(countdown.remaining(), 3);
        assert_eq!(
            countdown.advance(3.5),
            CountdownTick::Decremented { remaining: 2 }
        );
    }

    #[test]
    fn test_zero_seconds_expires_immediately() {
        let mut countdown = Countdown::start(0, 0.0);
        assert_eq!(countdown.advance(0.0), CountdownTick::Expired);
    }
}
