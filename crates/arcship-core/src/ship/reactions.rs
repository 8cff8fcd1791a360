//! Event reactions wired onto every ship at construction.
//!
//! Registration order is load-bearing: the three beat handlers installed here
//! (movement, resize, then `render`) always run before any weapon handler,
//! because the weapon installs its beat handler later and the bus dispatches
//! in registration order.

use std::rc::Rc;

use tracing::{debug, trace};

use super::{Ship, ShipEvent, ShipEventKind, WeaponMode, FADE_STEP};
use crate::bullet::{Bullet, BulletEventKind, BulletId};
use crate::bus::Evented;
use crate::direction::{Direction, Directions};
use crate::input::InputTranslator;

impl Ship {
    pub(super) fn init_events(&mut self) {
        self.on(ShipEventKind::Beat, |ship, _| ship.apply_movement());
        self.on(ShipEventKind::Beat, |ship, _| ship.resize());
        self.on(ShipEventKind::Beat, |ship, _| ship.trigger(ShipEvent::Render));

        self.on(ShipEventKind::Shift, |ship, event| {
            if let ShipEvent::Shift { direction, to_stop } = event {
                ship.toggle_direction(*direction, *to_stop);
            }
        });
        self.on(ShipEventKind::Shield, |ship, event| {
            if let ShipEvent::Shield { to_stop } = event {
                ship.toggle_shield(!*to_stop);
            }
        });
        self.on(ShipEventKind::Weapon, |ship, event| {
            if let ShipEvent::Weapon { to_fire } = event {
                ship.toggle_weapon(*to_fire);
            }
        });
        self.on(ShipEventKind::Shot, |ship, _| {
            if ship.bullets_in_queue == 0 {
                ship.end_fire_pass();
            }
        });
        self.on(ShipEventKind::Destroy, |ship, _| ship.teardown());

        let translator = InputTranslator::new(self.config.keys.clone());
        let input = self.on(ShipEventKind::Key, move |ship, event| {
            if let ShipEvent::Key(key) = event {
                if let Some(control) = translator.translate(key) {
                    ship.trigger(control.into());
                }
            }
        });
        self.input = Some(input);
    }

    fn toggle_direction(&mut self, direction: Direction, to_stop: bool) {
        self.moving.set(direction.flag(), !to_stop);
        if !to_stop {
            return;
        }
        self.shields.remove(direction.flag());
        if !self.is_moving() {
            self.trigger(ShipEvent::Stop);
        }
    }

    /// Raising only ever adds moving directions, so shields already up stay up
    /// and still directions stay down.
    fn toggle_shield(&mut self, raise: bool) {
        if raise {
            self.shields |= self.moving;
        } else {
            self.shields = Directions::empty();
        }
    }

    fn toggle_weapon(&mut self, to_fire: bool) {
        let before = self.weapon_mode();
        if to_fire {
            if let Some(id) = self.weapon.charge.take() {
                self.off(id);
            }
            if self.weapon.fire.is_none() {
                self.weapon.fire = Some(self.on(ShipEventKind::Beat, |ship, _| ship.fire_pass()));
            }
        } else {
            self.end_fire_pass();
            if self.weapon.charge.is_none() {
                self.weapon.charge =
                    Some(self.on(ShipEventKind::Beat, |ship, _| ship.queue_bullet()));
            }
        }
        let after = self.weapon_mode();
        if before != after {
            debug!(?before, ?after, queue = self.bullets_in_queue, "weapon mode changed");
        }
    }

    fn end_fire_pass(&mut self) {
        if let Some(id) = self.weapon.fire.take() {
            self.off(id);
            if self.weapon_mode() == WeaponMode::Idle {
                debug!("fire pass ended");
            }
        }
    }

    fn apply_movement(&mut self) {
        for direction in self.moving.directions() {
            if self.is_facing_bound(direction) {
                continue;
            }
            let coords = self.coords + direction.unit() * self.config.moving_step;
            trace!(%direction, x = coords.x, y = coords.y, "ship shifted");
            self.move_to(coords);
        }
    }

    fn resize(&mut self) {
        let base = self.config.size;
        let step = self.config.resizing_step;
        self.size = if self.is_moving() {
            (self.size + step).min(base * 4.0)
        } else {
            (self.size - step * 2.0).max(base)
        };
    }

    fn queue_bullet(&mut self) {
        if self.bullets_in_queue < self.config.bullets_limit {
            self.bullets_in_queue += 1;
        }
    }

    fn fire_pass(&mut self) {
        let mut spawned = 0;
        for direction in self.moving.directions() {
            if self.bullets_in_queue == 0 {
                break;
            }
            self.spawn_bullet(direction);
            self.bullets_in_queue -= 1;
            spawned += 1;
        }
        self.trigger(ShipEvent::Shot { spawned });
    }

    fn spawn_bullet(&mut self, direction: Direction) {
        let id = BulletId::new(self.next_bullet_id);
        self.next_bullet_id += 1;
        let mut bullet = Bullet::spawn(
            id,
            self.coords,
            direction,
            self.color,
            &self.config.bullet,
            self.bounds,
            self.bullet_heartbeat.clone(),
        );

        let retired = Rc::clone(&self.retired);
        bullet.on(BulletEventKind::Stop, move |bullet, _| {
            retired.borrow_mut().push(bullet.id());
        });

        debug!(bullet = %id, %direction, queue = self.bullets_in_queue, "bullet fired");
        self.bullets.push(bullet);
    }

    fn teardown(&mut self) {
        if self.fade.is_some() {
            return;
        }
        if let Some(id) = self.input.take() {
            self.off(id);
        }
        self.fade = Some(self.on(ShipEventKind::Beat, |ship, _| ship.opacity -= FADE_STEP));
        debug!(id = ?self.id, "ship destroyed");
    }
}
