//! Per-instance entity configuration.
//!
//! All structs deserialize with `#[serde(default)]`, so a JSON document only
//! needs the fields it overrides. Durations are expressed in milliseconds.

use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ConfigError, ScheduleError};
use crate::input::KeyBindings;

/// Tuning for projectiles spawned by a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    /// Distance travelled per beat.
    pub step: f32,
    /// Projectile diameter.
    pub size: f32,
    /// Beats before the bullet expires; `None` means it lives until it leaves
    /// the field.
    pub lifetime: Option<u32>,
    /// Beat period in milliseconds.
    pub beat_interval_ms: u64,
}

impl BulletConfig {
    /// The beat period.
    #[must_use]
    pub const fn beat_interval(&self) -> Duration {
        Duration::from_millis(self.beat_interval_ms)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.is_nan() || self.size <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "bullet",
                value: self.size,
            });
        }
        if self.step.is_nan() || self.step < 0.0 {
            return Err(ConfigError::NegativeStep {
                what: "bullet step",
                value: self.step,
            });
        }
        if self.step <= 0.0 && self.lifetime.is_none() {
            return Err(ConfigError::StationaryBullet);
        }
        if self.beat_interval_ms == 0 {
            return Err(ScheduleError::ZeroInterval.into());
        }
        Ok(())
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            step: 8.0,
            size: 6.0,
            lifetime: None,
            beat_interval_ms: 10,
        }
    }
}

/// Immutable parameters of one ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Starting center.
    pub coords: Vec2,
    /// Base diameter; the live size oscillates between this and 4× this.
    pub size: f32,
    /// Starting color.
    pub color: Color,
    /// Starting opacity.
    pub opacity: f32,
    /// Displacement per beat per moving direction.
    pub moving_step: f32,
    /// Growth per beat while moving (shrinking uses twice this).
    pub resizing_step: f32,
    /// Maximum number of queued bullets.
    pub bullets_limit: u32,
    /// Beat period in milliseconds.
    pub beat_interval_ms: u64,
    /// Seed for the color walk.
    pub color_seed: u64,
    /// Tuning for spawned bullets.
    pub bullet: BulletConfig,
    /// Key identifiers for the input translator.
    pub keys: KeyBindings,
}

impl ShipConfig {
    /// The beat period.
    #[must_use]
    pub const fn beat_interval(&self) -> Duration {
        Duration::from_millis(self.beat_interval_ms)
    }

    /// Half the base size, used by the boundary check.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Checks value ranges, including the nested bullet config and bindings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.is_nan() || self.size <= 0.0 {
            return Err(ConfigError::NonPositiveSize {
                what: "ship",
                value: self.size,
            });
        }
        if self.moving_step.is_nan() || self.moving_step < 0.0 {
            return Err(ConfigError::NegativeStep {
                what: "moving step",
                value: self.moving_step,
            });
        }
        if self.resizing_step.is_nan() || self.resizing_step < 0.0 {
            return Err(ConfigError::NegativeStep {
                what: "resizing step",
                value: self.resizing_step,
            });
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::OpacityOutOfRange(self.opacity));
        }
        if self.beat_interval_ms == 0 {
            return Err(ScheduleError::ZeroInterval.into());
        }
        self.bullet.validate()?;
        self.keys.validate()
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            coords: Vec2::new(100.0, 100.0),
            size: 40.0,
            color: Color::BLACK,
            opacity: 0.4,
            moving_step: 4.0,
            resizing_step: 2.0,
            bullets_limit: 100,
            beat_interval_ms: 10,
            color_seed: 0,
            bullet: BulletConfig::default(),
            keys: KeyBindings::default(),
        }
    }
}
