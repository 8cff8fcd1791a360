//! Test helper functions for building ships and observing their events.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::bounds::Bounds;
use crate::bus::Evented;
use crate::config::ShipConfig;
use crate::direction::{Direction, Directions};
use crate::input::Control;
use crate::ship::{Ship, ShipEvent, ShipEventKind};

// =============================================================================
// Ship Factories
// =============================================================================

/// Field used by most scenarios: 800 × 600 with a 4px wall.
pub fn test_bounds() -> Bounds {
    Bounds::new(800.0, 600.0, 4.0)
}

/// Spawns a default ship centered at `coords`.
pub fn spawn_ship_at(coords: Vec2) -> Ship {
    let config = ShipConfig {
        coords,
        ..ShipConfig::default()
    };
    Ship::new(config, test_bounds()).unwrap()
}

/// Spawns a ship with a custom config on the standard field.
pub fn spawn_ship_with(config: ShipConfig) -> Ship {
    Ship::new(config, test_bounds()).unwrap()
}

// =============================================================================
// Controls
// =============================================================================

/// Starts moving in `direction`.
pub fn hold(ship: &mut Ship, direction: Direction) {
    ship.control(Control::Shift {
        direction,
        to_stop: false,
    });
}

/// Stops moving in `direction`.
pub fn release(ship: &mut Ship, direction: Direction) {
    ship.control(Control::Shift {
        direction,
        to_stop: true,
    });
}

/// Charges the weapon for `beats` beats.
pub fn charge(ship: &mut Ship, beats: u32) {
    ship.control(Control::Weapon { to_fire: false });
    beat_n(ship, beats);
}

/// Emits `beats` beats on the ship's bus directly.
pub fn beat_n(ship: &mut Ship, beats: u32) {
    for _ in 0..beats {
        ship.trigger(ShipEvent::Beat);
    }
}

// =============================================================================
// Observation
// =============================================================================

/// Records every event of `kind` the ship emits from now on.
pub fn record(ship: &mut Ship, kind: ShipEventKind) -> Rc<RefCell<Vec<ShipEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    ship.on(kind, move |_, event| sink.borrow_mut().push(event.clone()));
    log
}

/// Checks the state invariants every reachable ship must satisfy.
pub fn assert_invariants(ship: &Ship) {
    assert!(
        ship.bullets_in_queue() <= ship.config().bullets_limit,
        "queue {} exceeds limit {}",
        ship.bullets_in_queue(),
        ship.config().bullets_limit
    );
    assert!(
        ship.moving().contains(ship.shields()),
        "shields {:?} outside moving {:?}",
        ship.shields(),
        ship.moving()
    );
    assert_eq!(ship.is_moving(), ship.moving() != Directions::empty());
    assert!(ship.size() >= ship.config().size);
    assert!(ship.size() <= ship.config().size * 4.0);

    let ids: Vec<_> = ship.bullets().iter().map(|b| b.id()).collect();
    assert!(
        ids.windows(2).all(|pair| pair[0] < pair[1]),
        "bullets out of firing order: {ids:?}"
    );
    assert!(ship.bullets().iter().all(|b| !b.is_stopped()));
}
