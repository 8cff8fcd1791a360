//! End-to-end scenarios driven through controls and beats.
//!
//! Each scenario starts from a freshly built ship and checks exact outcomes,
//! including the order in which a single beat applies movement, resize and
//! the weapon.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use glam::Vec2;

use crate::bounds::Bounds;
use crate::bus::Evented;
use crate::config::ShipConfig;
use crate::direction::{Direction, Directions};
use crate::input::{Control, KeyEvent};
use crate::ship::{Ship, ShipEvent, ShipEventKind, WeaponMode};

use super::helpers::{
    assert_invariants, beat_n, charge, hold, record, release, spawn_ship_at, spawn_ship_with,
    test_bounds,
};

// =============================================================================
// Movement
// =============================================================================

#[test]
fn single_beat_moves_up_by_one_step() {
    let mut ship = spawn_ship_at(Vec2::new(100.0, 100.0));
    let moves = record(&mut ship, ShipEventKind::Move);

    hold(&mut ship, Direction::Up);
    beat_n(&mut ship, 1);

    assert_eq!(ship.coords(), Vec2::new(100.0, 96.0));
    assert_eq!(
        *moves.borrow(),
        [ShipEvent::Move {
            coords: Vec2::new(100.0, 96.0)
        }]
    );
}

#[test]
fn directions_are_independent() {
    let mut ship = spawn_ship_at(Vec2::new(200.0, 200.0));
    let stops = record(&mut ship, ShipEventKind::Stop);

    hold(&mut ship, Direction::Up);
    hold(&mut ship, Direction::Left);
    assert_eq!(ship.moving(), Directions::UP | Directions::LEFT);

    release(&mut ship, Direction::Up);

    assert_eq!(ship.moving(), Directions::LEFT);
    assert!(ship.is_moving());
    assert!(stops.borrow().is_empty());

    beat_n(&mut ship, 1);
    assert_eq!(ship.coords(), Vec2::new(196.0, 200.0));
}

#[test]
fn wall_suspends_displacement_but_keeps_direction() {
    let config = ShipConfig::default();
    let top = config.radius() + 4.0;
    let mut ship = spawn_ship_at(Vec2::new(300.0, top));
    let moves = record(&mut ship, ShipEventKind::Move);

    hold(&mut ship, Direction::Up);
    beat_n(&mut ship, 1);

    assert_eq!(ship.coords().y, top);
    assert!(ship.moving().has(Direction::Up));
    assert!(moves.borrow().is_empty());
}

#[test]
fn right_wall_suspends_displacement_but_keeps_direction() {
    let config = ShipConfig::default();
    let right = test_bounds().width - config.radius() - test_bounds().thickness;
    let mut ship = spawn_ship_at(Vec2::new(right, 300.0));
    let moves = record(&mut ship, ShipEventKind::Move);

    hold(&mut ship, Direction::Right);
    beat_n(&mut ship, 3);

    assert_eq!(ship.coords(), Vec2::new(776.0, 300.0));
    assert!(ship.is_facing_bound(Direction::Right));
    assert!(ship.moving().has(Direction::Right));
    assert!(moves.borrow().is_empty());
}

#[test]
fn bottom_wall_suspends_displacement_but_keeps_direction() {
    let config = ShipConfig::default();
    let bottom = test_bounds().height - config.radius() - test_bounds().thickness;
    let mut ship = spawn_ship_at(Vec2::new(300.0, bottom));
    let moves = record(&mut ship, ShipEventKind::Move);

    hold(&mut ship, Direction::Down);
    beat_n(&mut ship, 3);

    assert_eq!(ship.coords(), Vec2::new(300.0, 576.0));
    assert!(ship.is_facing_bound(Direction::Down));
    assert!(ship.moving().has(Direction::Down));
    assert!(moves.borrow().is_empty());
}

#[test]
fn approach_from_the_left_stops_at_the_right_wall() {
    let mut ship = spawn_ship_at(Vec2::new(700.0, 300.0));

    hold(&mut ship, Direction::Right);
    beat_n(&mut ship, 100);

    assert_eq!(ship.coords().x, 776.0);
    assert!(!ship.is_facing_bound(Direction::Left));
}

#[test]
fn wall_on_one_axis_does_not_block_the_other() {
    let mut ship = spawn_ship_at(Vec2::new(300.0, 24.0));

    hold(&mut ship, Direction::Up);
    hold(&mut ship, Direction::Right);
    beat_n(&mut ship, 1);

    assert_eq!(ship.coords(), Vec2::new(304.0, 24.0));
}

#[test]
fn approach_stops_at_the_wall() {
    let mut ship = spawn_ship_at(Vec2::new(100.0, 300.0));

    hold(&mut ship, Direction::Left);
    beat_n(&mut ship, 100);

    // 24 = base radius 20 + wall 4; the last step lands exactly on it.
    assert_eq!(ship.coords().x, 24.0);
    assert!(ship.is_facing_bound(Direction::Left));
    assert!(!ship.is_facing_bound(Direction::Right));
}

// =============================================================================
// Resize
// =============================================================================

#[test]
fn idle_ship_shrinks_twice_as_fast_and_floors_at_base() {
    let mut ship = spawn_ship_at(Vec2::new(400.0, 300.0));
    hold(&mut ship, Direction::Right);
    beat_n(&mut ship, 5);
    assert_eq!(ship.size(), 50.0);

    release(&mut ship, Direction::Right);
    beat_n(&mut ship, 1);
    assert_eq!(ship.size(), 46.0);

    beat_n(&mut ship, 10);
    assert_eq!(ship.size(), 40.0);
}

#[test]
fn resize_sees_movement_state_of_the_same_beat() {
    let mut ship = spawn_ship_at(Vec2::new(400.0, 300.0));
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sizes);
    ship.on(ShipEventKind::Move, move |ship, _| sink.borrow_mut().push(ship.size()));

    hold(&mut ship, Direction::Down);
    beat_n(&mut ship, 2);

    // Movement runs before resize within a beat.
    assert_eq!(*sizes.borrow(), [40.0, 42.0]);
    assert_eq!(ship.size(), 44.0);
}

// =============================================================================
// Render
// =============================================================================

#[test]
fn every_beat_renders_once() {
    let mut ship = spawn_ship_at(Vec2::new(100.0, 100.0));
    let renders = record(&mut ship, ShipEventKind::Render);

    hold(&mut ship, Direction::Up);
    beat_n(&mut ship, 3);
    assert_eq!(renders.borrow().len(), 3);

    let beat = ship.config().beat_interval();
    ship.advance(beat * 2);
    assert_eq!(renders.borrow().len(), 5);
}

#[test]
fn render_sees_moved_and_resized_ship() {
    let mut ship = spawn_ship_at(Vec2::new(400.0, 300.0));
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    ship.on(ShipEventKind::Render, move |ship, _| {
        sink.borrow_mut().push((ship.coords(), ship.size()));
    });

    hold(&mut ship, Direction::Up);
    beat_n(&mut ship, 2);

    assert_eq!(
        *frames.borrow(),
        [
            (Vec2::new(400.0, 296.0), 42.0),
            (Vec2::new(400.0, 292.0), 44.0)
        ]
    );
}

#[test]
fn render_runs_before_the_fire_pass() {
    let mut ship = spawn_ship_at(Vec2::new(300.0, 300.0));
    hold(&mut ship, Direction::Left);
    charge(&mut ship, 2);
    ship.control(Control::Weapon { to_fire: true });

    let drawn = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&drawn);
    ship.on(ShipEventKind::Render, move |ship, _| {
        sink.borrow_mut().push(ship.bullets().len());
    });
    beat_n(&mut ship, 2);

    assert_eq!(*drawn.borrow(), [0, 1]);
    assert_eq!(ship.bullets().len(), 2);
}

#[test]
fn stopped_heartbeat_stops_rendering() {
    let mut ship = spawn_ship_at(Vec2::new(100.0, 100.0));
    let renders = record(&mut ship, ShipEventKind::Render);

    ship.stop_beating();
    ship.advance(Duration::from_secs(1));

    assert!(renders.borrow().is_empty());
}

// =============================================================================
// Weapon
// =============================================================================

#[test]
fn charge_then_fire_spawns_in_moving_direction() {
    let mut ship = spawn_ship_at(Vec2::new(300.0, 300.0));
    hold(&mut ship, Direction::Up);

    charge(&mut ship, 3);
    assert_eq!(ship.bullets_in_queue(), 3);

    ship.control(Control::Weapon { to_fire: true });
    beat_n(&mut ship, 1);

    assert_eq!(ship.bullets().len(), 1);
    assert_eq!(ship.bullets()[0].direction(), Direction::Up);
    assert_eq!(ship.bullets_in_queue(), 2);
}

#[test]
fn bullets_spawn_at_post_movement_coords() {
    let mut ship = spawn_ship_at(Vec2::new(300.0, 300.0));
    hold(&mut ship, Direction::Right);
    charge(&mut ship, 1);
    ship.control(Control::Weapon { to_fire: true });

    beat_n(&mut ship, 1);

    assert_eq!(ship.coords(), Vec2::new(308.0, 300.0));
    assert_eq!(ship.bullets()[0].coords(), Vec2::new(308.0, 300.0));
}

#[test]
fn sustained_fire_without_recharge_is_impossible() {
    let mut ship = spawn_ship_at(Vec2::new(300.0, 300.0));
    hold(&mut ship, Direction::Left);
    hold(&mut ship, Direction::Right);
    charge(&mut ship, 3);
    ship.control(Control::Weapon { to_fire: true });

    beat_n(&mut ship, 1);
    assert_eq!(ship.bullets().len(), 2);
    assert_eq!(ship.bullets_in_queue(), 1);

    beat_n(&mut ship, 1);
    assert_eq!(ship.bullets().len(), 3);
    assert_eq!(ship.bullets_in_queue(), 0);
    assert_eq!(ship.weapon_mode(), WeaponMode::Idle);

    beat_n(&mut ship, 10);
    ship.control(Control::Weapon { to_fire: true });
    beat_n(&mut ship, 5);
    assert_eq!(ship.bullets().len(), 3);
    assert_eq!(ship.bullets_in_queue(), 0);
}

#[test]
fn keyboard_session_round_trip() {
    let mut ship = spawn_ship_at(Vec2::new(400.0, 300.0));
    let beat = ship.config().beat_interval();

    ship.key(KeyEvent::down("Down"));
    ship.key(KeyEvent::down("U+0020"));
    ship.key(KeyEvent::up("Control"));
    ship.advance(beat * 4);

    assert_eq!(ship.coords(), Vec2::new(400.0, 316.0));
    assert_eq!(ship.shields(), Directions::DOWN);
    assert_eq!(ship.bullets_in_queue(), 4);

    ship.key(KeyEvent::down("Control"));
    ship.advance(beat * 4);
    assert_eq!(ship.bullets().len(), 4);
    assert_eq!(ship.weapon_mode(), WeaponMode::Idle);

    ship.key(KeyEvent::up("Down"));
    assert!(ship.shields().is_empty());
    assert!(!ship.is_moving());

    ship.key(KeyEvent::up("U+0020"));
    ship.advance(Duration::from_secs(2));
    assert!(ship.bullets().is_empty());
    assert_invariants(&ship);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn destroyed_ship_keeps_simulating_but_ignores_keys() {
    let mut ship = spawn_ship_with(ShipConfig {
        coords: Vec2::new(400.0, 300.0),
        opacity: 1.0,
        ..ShipConfig::default()
    });
    hold(&mut ship, Direction::Right);

    ship.destroy();
    ship.key(KeyEvent::up("Right"));
    beat_n(&mut ship, 10);

    assert!(ship.moving().has(Direction::Right));
    assert_eq!(ship.coords().x, 440.0);
    assert!((ship.opacity() - 0.9).abs() < 1e-5);
}

#[test]
fn render_reaches_external_subscribers() {
    let mut ship = Ship::new(ShipConfig::default(), Bounds::default()).unwrap();
    let renders = record(&mut ship, ShipEventKind::Render);

    ship.render();
    ship.render();

    assert_eq!(renders.borrow().len(), 2);
}
