//! # Arcship Core
//!
//! Behavior core of the Arcship arcade client: a player ship that moves,
//! shields and shoots on a bounded 2D field, advanced by a fixed-period beat.
//!
//! ## Architecture
//!
//! Every entity owns an [`EventBus`](bus::EventBus) and reacts to typed events
//! dispatched synchronously, in registration order:
//!
//! - **Heartbeat**: converts host timer ticks into `beat` events
//! - **Input translator**: turns raw key transitions into control events
//! - **Ship**: movement, shields, weapon charge/fire, resizing, fading
//! - **Bullet**: straight-line projectile with a terminal `stop` event
//!
//! Drawing, key capture, transport and id storage stay with the host, behind
//! the [`view::Surface`], [`identity::ServerLink`] and [`identity::IdStore`]
//! traits.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use arcship_core::{Bounds, KeyEvent, Ship, ShipConfig};
//!
//! let mut ship = Ship::new(ShipConfig::default(), Bounds::default()).unwrap();
//!
//! ship.key(KeyEvent::down("Right"));
//! ship.key(KeyEvent::up("Control"));
//! ship.advance(Duration::from_millis(30));
//!
//! assert_eq!(ship.coords().x, 112.0);
//! assert_eq!(ship.bullets_in_queue(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bounds;
pub mod bullet;
pub mod bus;
pub mod color;
pub mod config;
pub mod direction;
pub mod error;
pub mod heartbeat;
pub mod identity;
pub mod input;
pub mod ship;
pub mod view;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use bounds::Bounds;
pub use bullet::{Bullet, BulletEvent, BulletEventKind, BulletId, BulletState};
pub use bus::{Event, EventBus, Evented, HandlerId};
pub use color::Color;
pub use config::{BulletConfig, ShipConfig};
pub use direction::{Direction, Directions};
pub use error::{ConfigError, ScheduleError};
pub use heartbeat::{Beating, Heartbeat};
pub use input::{Control, InputTranslator, KeyBindings, KeyEvent, KeyPhase};
pub use ship::{Ship, ShipEvent, ShipEventKind, WeaponMode};
pub use view::{ShipView, Surface};
