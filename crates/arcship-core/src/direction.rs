//! Cardinal directions and direction sets.
//!
//! Screen coordinates grow rightward on x and downward on y, so `Up` moves
//! toward smaller y.

use std::f32::consts::PI;
use std::fmt;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One of the four movement directions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward smaller y.
    Up,
    /// Toward larger y.
    Down,
    /// Toward smaller x.
    Left,
    /// Toward larger x.
    Right,
}

/// Axis a direction moves along.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Direction {
    /// All directions, in the order fire passes visit them.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Up | Self::Down => Axis::Y,
            Self::Left | Self::Right => Axis::X,
        }
    }

    /// Unit displacement for one step in this direction.
    #[must_use]
    pub const fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Canvas angle (radians) pointing in this direction.
    #[must_use]
    pub fn angle(self) -> f32 {
        match self {
            Self::Right => 0.0,
            Self::Up => -PI * 0.5,
            Self::Left => -PI,
            Self::Down => -PI * 1.5,
        }
    }

    /// The singleton set holding this direction.
    #[must_use]
    pub const fn flag(self) -> Directions {
        match self {
            Self::Up => Directions::UP,
            Self::Down => Directions::DOWN,
            Self::Left => Directions::LEFT,
            Self::Right => Directions::RIGHT,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

bitflags! {
    /// A set of directions, one flag per direction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Directions: u8 {
        /// Up flag.
        const UP = 1;
        /// Down flag.
        const DOWN = 1 << 1;
        /// Left flag.
        const LEFT = 1 << 2;
        /// Right flag.
        const RIGHT = 1 << 3;
    }
}

impl Directions {
    /// Returns `true` if `direction` is in the set.
    #[must_use]
    pub fn has(self, direction: Direction) -> bool {
        self.contains(direction.flag())
    }

    /// Iterates the contained directions in [`Direction::ALL`] order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

impl From<Direction> for Directions {
    fn from(direction: Direction) -> Self {
        direction.flag()
    }
}

impl FromIterator<Direction> for Directions {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, direction| set | direction.flag())
    }
}
