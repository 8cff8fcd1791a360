//! Error types for the edges of the core.
//!
//! The ship state machine itself never fails: unknown keys, queue overflow,
//! empty-queue fire passes and redundant teardown are all no-ops. Errors only
//! arise when an entity is built from an invalid configuration or a scheduler
//! is asked to run with a degenerate interval.

use thiserror::Error;

/// Errors returned by [`Heartbeat::run`](crate::heartbeat::Heartbeat::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A zero interval would produce unbounded beats per host tick.
    #[error("heartbeat interval must be greater than zero")]
    ZeroInterval,
}

/// Errors returned when validating entity configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Ship or bullet size must be strictly positive.
    #[error("{what} size must be positive, got {value}")]
    NonPositiveSize {
        /// Which entity the size belongs to.
        what: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// Movement and resize steps cannot be negative.
    #[error("{what} must not be negative, got {value}")]
    NegativeStep {
        /// Name of the offending field.
        what: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A bullet with no lifetime and no speed would never be retired.
    #[error("bullet step must be positive when the bullet has no lifetime")]
    StationaryBullet,

    /// Opacity must lie in `[0, 1]`.
    #[error("opacity must be within [0, 1], got {0}")]
    OpacityOutOfRange(f32),

    /// A key identifier is bound to more than one action.
    #[error("key `{0}` is bound to more than one action")]
    DuplicateKey(String),

    /// A heartbeat could not be scheduled.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
