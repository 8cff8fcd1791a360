//! Drawing adapter for ships and their bullets.
//!
//! The core never draws on its own. A host subscribes to the ship's `render`
//! event and calls [`ShipView::draw`] with its [`Surface`] implementation:
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use arcship_core::bounds::Bounds;
//! use arcship_core::bus::Evented;
//! use arcship_core::color::Color;
//! use arcship_core::config::ShipConfig;
//! use arcship_core::ship::{Ship, ShipEventKind};
//! use arcship_core::view::{ShipView, Surface};
//! use glam::Vec2;
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl Surface for Counter {
//!     fn fill_rect(&mut self, _: Vec2, _: f32, _: Color, _: f32) {
//!         self.0 += 1;
//!     }
//!     fn fill_arc(&mut self, _: Vec2, _: f32, _: f32, _: f32, _: Color, _: f32) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let surface = Rc::new(RefCell::new(Counter::default()));
//! let mut ship = Ship::new(ShipConfig::default(), Bounds::default()).unwrap();
//! let target = Rc::clone(&surface);
//! ship.on(ShipEventKind::Render, move |ship, _| {
//!     ShipView::draw(ship, &mut *target.borrow_mut());
//! });
//!
//! ship.render();
//! assert_eq!(surface.borrow().0, 2);
//! ```

use std::f32::consts::{PI, SQRT_2, TAU};

use glam::Vec2;

use crate::bullet::Bullet;
use crate::color::Color;
use crate::ship::Ship;

/// Angular span of the arc marking each moving direction.
pub const FRONT_ARC_SPAN: f32 = PI * 0.4;

/// Angular span of each shield arc.
pub const SHIELD_ARC_SPAN: f32 = PI * 0.7;

/// Opacity of the queued-bullet gauge relative to the ship.
const GAUGE_OPACITY: f32 = 0.5;

/// Raster primitives supplied by the host.
pub trait Surface {
    /// Fills an axis-aligned square of side `side` centered on `center`.
    fn fill_rect(&mut self, center: Vec2, side: f32, color: Color, opacity: f32);

    /// Fills a circular sector between `start` and `end` (radians, canvas
    /// orientation with y pointing down).
    fn fill_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        color: Color,
        opacity: f32,
    );
}

/// Stateless ship renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShipView;

impl ShipView {
    /// Draws the ship, its direction and shield arcs, the queue gauge and its
    /// live bullets.
    pub fn draw<S: Surface + ?Sized>(ship: &Ship, surface: &mut S) {
        let center = ship.coords();
        let color = ship.color();
        let opacity = ship.opacity();

        surface.fill_rect(center, ship.config().size, color, opacity);
        surface.fill_rect(center, ship.size() / SQRT_2, color, opacity);

        for direction in ship.moving().directions() {
            let (start, end) = span_around(direction.angle(), FRONT_ARC_SPAN);
            surface.fill_arc(center, ship.size() / 2.0, start, end, color, opacity);
        }
        for direction in ship.shields().directions() {
            let (start, end) = span_around(direction.angle(), SHIELD_ARC_SPAN);
            surface.fill_arc(center, ship.size() * 0.8, start, end, color, opacity);
        }

        if ship.bullets_in_queue() > 0 {
            let sweep = gauge_sweep(ship.bullets_in_queue(), ship.config().bullets_limit);
            surface.fill_arc(
                center,
                ship.config().radius() / 2.0,
                0.0,
                sweep,
                color,
                opacity * GAUGE_OPACITY,
            );
        }

        for bullet in ship.bullets() {
            Self::draw_bullet(bullet, surface, opacity);
        }
    }

    /// Draws one bullet as a full disc.
    pub fn draw_bullet<S: Surface + ?Sized>(bullet: &Bullet, surface: &mut S, opacity: f32) {
        surface.fill_arc(
            bullet.coords(),
            bullet.size() / 2.0,
            0.0,
            TAU,
            bullet.color(),
            opacity,
        );
    }
}

fn span_around(angle: f32, span: f32) -> (f32, f32) {
    (angle - span / 2.0, angle + span / 2.0)
}

#[allow(clippy::cast_precision_loss)]
fn gauge_sweep(queued: u32, limit: u32) -> f32 {
    if limit == 0 {
        return 0.0;
    }
    TAU * (queued.min(limit) as f32 / limit as f32)
}
