//! The player ship.
//!
//! A [`Ship`] owns its position, size, color, the moving and shield direction
//! sets, the bullet queue and the live bullets it fired. All behavior is
//! expressed as reactions on the ship's own [`EventBus`]:
//!
//! | Event           | Reaction                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | `key`           | input translator re-emits `shift`/`shield`/`weapon`       |
//! | `shift`         | toggle one moving direction, emit `stop` when all clear   |
//! | `shield`        | raise shields on moving directions, or drop them all      |
//! | `weapon`        | switch between charging and the fire pass                 |
//! | `beat`          | movement, resize, `render`, then charge or fire pass      |
//! | `shot`          | end the fire pass once the queue is empty                 |
//! | `destroy`       | detach input, fade opacity on every later beat            |
//!
//! # Invariants
//!
//! - `0 <= bullets_in_queue <= bullets_limit`
//! - `shields ⊆ moving`: a shield is never up on a direction the ship is not
//!   moving in, and drops as soon as that direction is released.
//! - `is_moving()` iff `moving` is non-empty.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use arcship_core::bounds::Bounds;
//! use arcship_core::config::ShipConfig;
//! use arcship_core::input::KeyEvent;
//! use arcship_core::ship::Ship;
//! use glam::Vec2;
//!
//! let mut ship = Ship::new(ShipConfig::default(), Bounds::default()).unwrap();
//!
//! ship.key(KeyEvent::down("Up"));
//! ship.advance(Duration::from_millis(10));
//!
//! assert_eq!(ship.coords(), Vec2::new(100.0, 96.0));
//! assert!(ship.is_moving());
//! ```

mod events;
mod reactions;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::bounds::Bounds;
use crate::bullet::{Bullet, BulletId};
use crate::bus::{EventBus, Evented, HandlerId};
use crate::color::Color;
use crate::config::ShipConfig;
use crate::direction::{Direction, Directions};
use crate::error::ConfigError;
use crate::heartbeat::{Beating, Heartbeat};
use crate::input::{Control, KeyEvent};

pub use events::{ShipEvent, ShipEventKind};

/// Opacity lost per beat once the ship is destroyed.
pub const FADE_STEP: f32 = 0.01;

/// What the weapon does on each beat.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WeaponMode {
    /// Neither charging nor firing.
    Idle,
    /// Each beat adds one bullet to the queue.
    Charging,
    /// Each beat drains the queue into bullets along moving directions.
    Firing,
}

/// Beat handlers installed by the weapon; at most one of each.
#[derive(Debug, Default, Clone, Copy)]
struct WeaponHandlers {
    charge: Option<HandlerId>,
    fire: Option<HandlerId>,
}

/// The player-controlled craft.
pub struct Ship {
    config: ShipConfig,
    bounds: Bounds,
    id: Option<String>,
    coords: Vec2,
    size: f32,
    color: Color,
    opacity: f32,
    moving: Directions,
    shields: Directions,
    bullets_in_queue: u32,
    bullets: Vec<Bullet>,
    next_bullet_id: u64,
    retired: Rc<RefCell<Vec<BulletId>>>,
    weapon: WeaponHandlers,
    input: Option<HandlerId>,
    fade: Option<HandlerId>,
    rng: ChaCha8Rng,
    heartbeat: Heartbeat,
    /// Running at the bullet beat; each spawned bullet starts from a clone.
    bullet_heartbeat: Heartbeat,
    bus: EventBus<Ship, ShipEvent>,
}

impl Ship {
    /// Builds a ship, wires its reactions and starts its heartbeat.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(config: ShipConfig, bounds: Bounds) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut heartbeat = Heartbeat::new();
        heartbeat.run(config.beat_interval())?;
        let mut bullet_heartbeat = Heartbeat::new();
        bullet_heartbeat.run(config.bullet.beat_interval())?;

        let mut ship = Self {
            bounds,
            id: None,
            coords: config.coords,
            size: config.size,
            color: config.color,
            opacity: config.opacity,
            moving: Directions::empty(),
            shields: Directions::empty(),
            bullets_in_queue: 0,
            bullets: Vec::new(),
            next_bullet_id: 1,
            retired: Rc::new(RefCell::new(Vec::new())),
            weapon: WeaponHandlers::default(),
            input: None,
            fade: None,
            rng: ChaCha8Rng::seed_from_u64(config.color_seed),
            heartbeat,
            bullet_heartbeat,
            bus: EventBus::new(),
            config,
        };
        ship.init_events();
        Ok(ship)
    }

    // -------------------------------------------------------------------------
    // State accessors
    // -------------------------------------------------------------------------

    /// Server-assigned identifier, once registered.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Center of the craft.
    #[must_use]
    pub const fn coords(&self) -> Vec2 {
        self.coords
    }

    /// Current diameter.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.size
    }

    /// Current color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Current opacity. Not floored during the fade.
    #[must_use]
    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Directions the ship is currently moving in.
    #[must_use]
    pub const fn moving(&self) -> Directions {
        self.moving
    }

    /// Directions currently shielded.
    #[must_use]
    pub const fn shields(&self) -> Directions {
        self.shields
    }

    /// Returns `true` if at least one direction is held.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.moving.is_empty()
    }

    /// Number of bullets waiting to be fired.
    #[must_use]
    pub const fn bullets_in_queue(&self) -> u32 {
        self.bullets_in_queue
    }

    /// Live bullets in firing order.
    #[must_use]
    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    /// What the weapon does on the next beat.
    #[must_use]
    pub const fn weapon_mode(&self) -> WeaponMode {
        match (self.weapon.charge, self.weapon.fire) {
            (_, Some(_)) => WeaponMode::Firing,
            (Some(_), None) => WeaponMode::Charging,
            (None, None) => WeaponMode::Idle,
        }
    }

    /// Returns `true` once [`destroy`](Self::destroy) has run.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.fade.is_some()
    }

    /// Returns `true` while raw key events reach the input translator.
    #[must_use]
    pub const fn is_input_attached(&self) -> bool {
        self.input.is_some()
    }

    /// The instance configuration.
    #[must_use]
    pub const fn config(&self) -> &ShipConfig {
        &self.config
    }

    /// The field this ship moves on.
    #[must_use]
    pub const fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns `true` if the ship's edge has reached the field edge in
    /// `direction`.
    ///
    /// The check uses the base radius inflated by the wall thickness, not the
    /// live size.
    #[must_use]
    pub fn is_facing_bound(&self, direction: Direction) -> bool {
        let margin = self.config.radius() + self.bounds.thickness;
        match direction {
            Direction::Left => self.coords.x <= margin,
            Direction::Right => self.coords.x >= self.bounds.width - margin,
            Direction::Up => self.coords.y <= margin,
            Direction::Down => self.coords.y >= self.bounds.height - margin,
        }
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Delivers a raw key transition from the host input system.
    ///
    /// Ignored once the ship is destroyed.
    pub fn key(&mut self, event: KeyEvent) {
        self.trigger(ShipEvent::Key(event));
    }

    /// Delivers a semantic control event directly, bypassing key bindings.
    pub fn control(&mut self, control: Control) {
        self.trigger(control.into());
    }

    /// Places the ship at `coords` and emits `move`.
    pub fn move_to(&mut self, coords: Vec2) {
        self.coords = coords;
        self.trigger(ShipEvent::Move { coords });
    }

    /// Applies one step of the color walk.
    pub fn change_color(&mut self) {
        self.color = self.color.walked(&mut self.rng);
    }

    /// Emits `render` for external drawing subscribers.
    ///
    /// Every beat already renders; this is for frames outside the beat, such
    /// as the first one before the heartbeat fires.
    pub fn render(&mut self) {
        self.trigger(ShipEvent::Render);
    }

    /// Starts the destroy sequence. Idempotent.
    pub fn destroy(&mut self) {
        self.trigger(ShipEvent::Destroy);
    }

    /// Records the server-assigned id and emits `register`.
    pub fn register(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(%id, "ship registered");
        self.id = Some(id.clone());
        self.trigger(ShipEvent::Register { id });
    }

    /// Advances the ship and its bullets by `elapsed` host time.
    ///
    /// Bullets advance first and stopped ones are retired; then the ship emits
    /// its own due beats, so bullets fired now start flying on the next call.
    /// Returns the number of ship beats emitted.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        for bullet in &mut self.bullets {
            bullet.advance(elapsed);
        }
        self.retire_bullets();
        self.pulse(elapsed)
    }

    /// Halts the ship's heartbeat. Safe to call repeatedly.
    pub fn stop_beating(&mut self) {
        self.heartbeat.stop();
    }

    fn retire_bullets(&mut self) {
        let retired = std::mem::take(&mut *self.retired.borrow_mut());
        for id in retired {
            if let Some(index) = self.bullets.iter().position(|b| b.id() == id) {
                self.bullets.remove(index);
                debug!(bullet = %id, live = self.bullets.len(), "bullet retired");
            }
        }
    }
}

impl Evented for Ship {
    type Event = ShipEvent;

    fn bus(&self) -> &EventBus<Self, ShipEvent> {
        &self.bus
    }

    fn bus_mut(&mut self) -> &mut EventBus<Self, ShipEvent> {
        &mut self.bus
    }
}

impl Beating for Ship {
    fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    fn heartbeat_mut(&mut self) -> &mut Heartbeat {
        &mut self.heartbeat
    }

    fn beat(&mut self) {
        self.trigger(ShipEvent::Beat);
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ship")
            .field("id", &self.id)
            .field("coords", &self.coords)
            .field("size", &self.size)
            .field("moving", &self.moving)
            .field("shields", &self.shields)
            .field("bullets_in_queue", &self.bullets_in_queue)
            .field("bullets", &self.bullets.len())
            .field("weapon", &self.weapon_mode())
            .finish_non_exhaustive()
    }
}
