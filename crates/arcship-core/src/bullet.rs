//! Straight-line projectile spawned by a ship.
//!
//! A [`Bullet`] is `Alive` from construction until it leaves the field or its
//! lifetime runs out, then becomes `Stopped` for good: its heartbeat halts and
//! it emits [`BulletEvent::Stop`] exactly once. The owning ship listens for
//! that event to retire it.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::bounds::Bounds;
use crate::bus::{Event, EventBus, Evented};
use crate::color::Color;
use crate::config::BulletConfig;
use crate::direction::Direction;
use crate::error::ScheduleError;
use crate::heartbeat::{Beating, Heartbeat};

/// Identifier of a bullet, unique among the bullets of one ship.
///
/// Ids are handed out in firing order, so they also order bullets by age.
///
/// # Example
///
/// ```
/// use arcship_core::bullet::BulletId;
///
/// let first = BulletId::new(1);
/// let second = BulletId::new(2);
/// assert!(first < second);
/// assert_eq!(second.to_string(), "2");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BulletId(u64);

impl BulletId {
    /// Creates an id from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for BulletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BulletId({})", self.0)
    }
}

impl fmt::Display for BulletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BulletId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Lifecycle of a bullet. `Stopped` is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BulletState {
    /// In flight.
    Alive,
    /// Left the field or expired.
    Stopped,
}

/// Events on a bullet's bus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BulletEvent {
    /// One heartbeat period elapsed.
    Beat,
    /// The bullet advanced to `coords`.
    Move {
        /// New center.
        coords: Vec2,
    },
    /// Terminal event, emitted once.
    Stop,
}

/// Subscription keys for [`BulletEvent`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BulletEventKind {
    /// See [`BulletEvent::Beat`].
    Beat,
    /// See [`BulletEvent::Move`].
    Move,
    /// See [`BulletEvent::Stop`].
    Stop,
}

impl Event for BulletEvent {
    type Kind = BulletEventKind;

    fn kind(&self) -> BulletEventKind {
        match self {
            Self::Beat => BulletEventKind::Beat,
            Self::Move { .. } => BulletEventKind::Move,
            Self::Stop => BulletEventKind::Stop,
        }
    }
}

/// A projectile travelling in a fixed direction.
pub struct Bullet {
    id: BulletId,
    coords: Vec2,
    direction: Direction,
    color: Color,
    size: f32,
    step: f32,
    lifetime: Option<u32>,
    age: u32,
    bounds: Bounds,
    state: BulletState,
    heartbeat: Heartbeat,
    bus: EventBus<Bullet, BulletEvent>,
}

impl Bullet {
    /// Creates a live bullet and starts its heartbeat.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::ZeroInterval`] if the configured beat interval
    /// is zero.
    pub fn new(
        id: BulletId,
        coords: Vec2,
        direction: Direction,
        color: Color,
        config: &BulletConfig,
        bounds: Bounds,
    ) -> Result<Self, ScheduleError> {
        let mut heartbeat = Heartbeat::new();
        heartbeat.run(config.beat_interval())?;
        Ok(Self::spawn(id, coords, direction, color, config, bounds, heartbeat))
    }

    /// Creates a live bullet driven by an already running `heartbeat`.
    pub(crate) fn spawn(
        id: BulletId,
        coords: Vec2,
        direction: Direction,
        color: Color,
        config: &BulletConfig,
        bounds: Bounds,
        heartbeat: Heartbeat,
    ) -> Self {
        let mut bullet = Self {
            id,
            coords,
            direction,
            color,
            size: config.size,
            step: config.step,
            lifetime: config.lifetime,
            age: 0,
            bounds,
            state: BulletState::Alive,
            heartbeat,
            bus: EventBus::new(),
        };
        bullet.on(BulletEventKind::Beat, |bullet, _| bullet.fly());
        bullet
    }

    /// The bullet's id.
    #[must_use]
    pub const fn id(&self) -> BulletId {
        self.id
    }

    /// Current center.
    #[must_use]
    pub const fn coords(&self) -> Vec2 {
        self.coords
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Color inherited from the ship at firing time.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Diameter.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Beats flown so far.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BulletState {
        self.state
    }

    /// Returns `true` once the bullet has stopped.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state == BulletState::Stopped
    }

    /// Advances by host time; see [`Beating::pulse`].
    pub fn advance(&mut self, elapsed: std::time::Duration) -> u32 {
        self.pulse(elapsed)
    }

    /// Moves the bullet to its terminal state.
    ///
    /// Emits [`BulletEvent::Stop`] on the first call only.
    pub fn stop(&mut self) {
        if self.is_stopped() {
            return;
        }
        self.state = BulletState::Stopped;
        self.heartbeat.stop();
        trace!(bullet = %self.id, x = self.coords.x, y = self.coords.y, "bullet stopped");
        self.trigger(BulletEvent::Stop);
    }

    fn fly(&mut self) {
        if self.is_stopped() {
            return;
        }
        self.coords += self.direction.unit() * self.step;
        self.age += 1;
        let coords = self.coords;
        self.trigger(BulletEvent::Move { coords });

        let expired = self.lifetime.is_some_and(|limit| self.age >= limit);
        if expired || !self.bounds.contains(self.coords) {
            self.stop();
        }
    }
}

impl Evented for Bullet {
    type Event = BulletEvent;

    fn bus(&self) -> &EventBus<Self, BulletEvent> {
        &self.bus
    }

    fn bus_mut(&mut self) -> &mut EventBus<Self, BulletEvent> {
        &mut self.bus
    }
}

impl Beating for Bullet {
    fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    fn heartbeat_mut(&mut self) -> &mut Heartbeat {
        &mut self.heartbeat
    }

    fn beat(&mut self) {
        self.trigger(BulletEvent::Beat);
    }
}

impl fmt::Debug for Bullet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bullet")
            .field("id", &self.id)
            .field("coords", &self.coords)
            .field("direction", &self.direction)
            .field("state", &self.state)
            .field("age", &self.age)
            .finish_non_exhaustive()
    }
}
