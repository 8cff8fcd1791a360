//! Typed events on a ship's bus.

use glam::Vec2;

use crate::bus::Event;
use crate::direction::Direction;
use crate::input::{Control, KeyEvent};

/// Everything that can be triggered on a [`Ship`](super::Ship).
#[derive(Debug, Clone, PartialEq)]
pub enum ShipEvent {
    /// Raw key transition from the host input system.
    Key(KeyEvent),
    /// `control:shift`: start or stop moving one way.
    Shift {
        /// Direction to toggle.
        direction: Direction,
        /// `true` on release.
        to_stop: bool,
    },
    /// `control:shield`: raise or drop the shields.
    Shield {
        /// `true` on release.
        to_stop: bool,
    },
    /// `control:weapon`: charge or fire.
    Weapon {
        /// `true` to start a fire pass, `false` to start charging.
        to_fire: bool,
    },
    /// One heartbeat period elapsed.
    Beat,
    /// The ship's center changed.
    Move {
        /// New center.
        coords: Vec2,
    },
    /// The last moving direction was released.
    Stop,
    /// A fire pass completed.
    Shot {
        /// Bullets spawned by this pass.
        spawned: u32,
    },
    /// External renderers should draw the ship now.
    Render,
    /// Begin the destroy sequence.
    Destroy,
    /// The server assigned an identifier.
    Register {
        /// The assigned id.
        id: String,
    },
}

/// Subscription keys for [`ShipEvent`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ShipEventKind {
    Key,
    Shift,
    Shield,
    Weapon,
    Beat,
    Move,
    Stop,
    Shot,
    Render,
    Destroy,
    Register,
}

impl Event for ShipEvent {
    type Kind = ShipEventKind;

    fn kind(&self) -> ShipEventKind {
        match self {
            Self::Key(_) => ShipEventKind::Key,
            Self::Shift { .. } => ShipEventKind::Shift,
            Self::Shield { .. } => ShipEventKind::Shield,
            Self::Weapon { .. } => ShipEventKind::Weapon,
            Self::Beat => ShipEventKind::Beat,
            Self::Move { .. } => ShipEventKind::Move,
            Self::Stop => ShipEventKind::Stop,
            Self::Shot { .. } => ShipEventKind::Shot,
            Self::Render => ShipEventKind::Render,
            Self::Destroy => ShipEventKind::Destroy,
            Self::Register { .. } => ShipEventKind::Register,
        }
    }
}

impl From<Control> for ShipEvent {
    fn from(control: Control) -> Self {
        match control {
            Control::Shift { direction, to_stop } => Self::Shift { direction, to_stop },
            Control::Shield { to_stop } => Self::Shield { to_stop },
            Control::Weapon { to_fire } => Self::Weapon { to_fire },
        }
    }
}

impl From<KeyEvent> for ShipEvent {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}
