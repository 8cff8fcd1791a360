//! Fixed-period beat source.
//!
//! A [`Heartbeat`] holds no game state. The host's periodic timer reports
//! elapsed wall time through [`Heartbeat::advance`], which answers how many
//! whole beats fell due. Entities implement [`Beating`] to turn those beats
//! into `beat` events on their own bus, so every entity has exactly one tick
//! source.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use arcship_core::heartbeat::Heartbeat;
//!
//! let mut heartbeat = Heartbeat::new();
//! heartbeat.run(Duration::from_millis(10)).unwrap();
//!
//! assert_eq!(heartbeat.advance(Duration::from_millis(25)), 2);
//! assert_eq!(heartbeat.advance(Duration::from_millis(5)), 1);
//!
//! heartbeat.stop();
//! heartbeat.stop();
//! assert_eq!(heartbeat.advance(Duration::from_millis(100)), 0);
//! ```

use std::time::Duration;

use crate::error::ScheduleError;

/// Periodic beat accumulator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Heartbeat {
    interval: Option<Duration>,
    pending: Duration,
}

impl Heartbeat {
    /// Creates a stopped heartbeat.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            interval: None,
            pending: Duration::ZERO,
        }
    }

    /// Starts (or restarts) beating every `interval`.
    ///
    /// Restarting discards any partially accumulated period.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::ZeroInterval`] if `interval` is zero.
    pub fn run(&mut self, interval: Duration) -> Result<(), ScheduleError> {
        if interval.is_zero() {
            return Err(ScheduleError::ZeroInterval);
        }
        self.interval = Some(interval);
        self.pending = Duration::ZERO;
        Ok(())
    }

    /// Stops beating. Safe to call repeatedly or before [`run`](Self::run).
    pub fn stop(&mut self) {
        self.interval = None;
        self.pending = Duration::ZERO;
    }

    /// Returns `true` while the heartbeat is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// The configured period, if running.
    #[must_use]
    pub const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Adds `elapsed` host time and returns the number of beats now due.
    ///
    /// The remainder below one period carries over to the next call. A backlog
    /// of more than `u32::MAX` beats is capped and the excess dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let Some(interval) = self.interval else {
            return 0;
        };
        let pending = self.pending.saturating_add(elapsed).as_nanos();
        let period = interval.as_nanos();
        self.pending = nanos_to_duration(pending % period);
        u32::try_from(pending / period).unwrap_or(u32::MAX)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn nanos_to_duration(nanos: u128) -> Duration {
    // Callers pass a remainder below some `Duration`, so the seconds fit.
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// An entity driven by its own [`Heartbeat`].
pub trait Beating {
    /// The entity's heartbeat.
    fn heartbeat(&self) -> &Heartbeat;

    /// Mutable access to the entity's heartbeat.
    fn heartbeat_mut(&mut self) -> &mut Heartbeat;

    /// Emits one `beat` on the entity's bus.
    fn beat(&mut self);

    /// Feeds host time to the heartbeat and emits every beat that fell due.
    ///
    /// If a beat stops the heartbeat, the remaining due beats are dropped.
    /// Returns the number of beats actually emitted.
    fn pulse(&mut self, elapsed: Duration) -> u32 {
        let due = self.heartbeat_mut().advance(elapsed);
        let mut emitted = 0;
        for _ in 0..due {
            if !self.heartbeat().is_running() {
                break;
            }
            self.beat();
            emitted += 1;
        }
        emitted
    }
}
