//! Raw key transitions to semantic control events.
//!
//! The host input system reports [`KeyEvent`]s carrying a logical key
//! identifier. [`InputTranslator`] maps the bound identifiers (four
//! directions, one shield key, one weapon key) to [`Control`] events and
//! ignores everything else.
//!
//! # Example
//!
//! ```
//! use arcship_core::direction::Direction;
//! use arcship_core::input::{Control, InputTranslator, KeyBindings, KeyEvent};
//!
//! let translator = InputTranslator::new(KeyBindings::default());
//!
//! assert_eq!(
//!     translator.translate(&KeyEvent::up("Left")),
//!     Some(Control::Shift { direction: Direction::Left, to_stop: true }),
//! );
//! assert_eq!(
//!     translator.translate(&KeyEvent::down("Control")),
//!     Some(Control::Weapon { to_fire: true }),
//! );
//! assert_eq!(translator.translate(&KeyEvent::down("Escape")), None);
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::ConfigError;

/// Whether a key went down or came back up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPhase {
    /// Key pressed (including auto-repeat).
    Down,
    /// Key released.
    Up,
}

/// A raw key transition from the host input system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Logical key identifier, e.g. `"Left"` or `"U+0020"`.
    pub key: String,
    /// Transition kind.
    pub phase: KeyPhase,
}

impl KeyEvent {
    /// Creates a key transition.
    #[must_use]
    pub fn new(key: impl Into<String>, phase: KeyPhase) -> Self {
        Self {
            key: key.into(),
            phase,
        }
    }

    /// A key-down transition.
    #[must_use]
    pub fn down(key: impl Into<String>) -> Self {
        Self::new(key, KeyPhase::Down)
    }

    /// A key-up transition.
    #[must_use]
    pub fn up(key: impl Into<String>) -> Self {
        Self::new(key, KeyPhase::Up)
    }

    /// Returns `true` for a key-up transition.
    #[must_use]
    pub fn is_release(&self) -> bool {
        self.phase == KeyPhase::Up
    }
}

/// Semantic control events understood by a ship.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "lowercase")]
pub enum Control {
    /// Start or stop moving in one direction.
    Shift {
        /// The direction to toggle.
        direction: Direction,
        /// `true` when the direction is released.
        to_stop: bool,
    },
    /// Raise or drop the shields.
    Shield {
        /// `true` when the shield key is released.
        to_stop: bool,
    },
    /// Switch the weapon between charging and firing.
    Weapon {
        /// `true` when the weapon key is pressed.
        to_fire: bool,
    },
}

/// Logical key identifiers bound to each action.
///
/// Defaults follow the legacy `keyIdentifier` names used by the browser
/// client: arrow names for movement, `U+0020` (space) for the shield and
/// `Control` for the weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Move up.
    pub up: String,
    /// Move down.
    pub down: String,
    /// Move left.
    pub left: String,
    /// Move right.
    pub right: String,
    /// Hold to shield.
    pub shield: String,
    /// Release to charge, press to fire.
    pub weapon: String,
}

impl KeyBindings {
    /// The key bound to a direction.
    #[must_use]
    pub fn key_for(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Checks that no identifier is bound twice.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKey`] naming the first repeated key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for key in [
            &self.up,
            &self.down,
            &self.left,
            &self.right,
            &self.shield,
            &self.weapon,
        ] {
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::DuplicateKey(key.clone()));
            }
        }
        Ok(())
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "Up".to_string(),
            down: "Down".to_string(),
            left: "Left".to_string(),
            right: "Right".to_string(),
            shield: "U+0020".to_string(),
            weapon: "Control".to_string(),
        }
    }
}

/// Maps raw key transitions to [`Control`] events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputTranslator {
    bindings: KeyBindings,
}

impl InputTranslator {
    /// Creates a translator for the given bindings.
    #[must_use]
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    /// The bindings in use.
    #[must_use]
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Translates one transition; unbound keys yield `None`.
    #[must_use]
    pub fn translate(&self, event: &KeyEvent) -> Option<Control> {
        let released = event.is_release();
        let key = event.key.as_str();

        if key == self.bindings.shield {
            return Some(Control::Shield { to_stop: released });
        }
        if key == self.bindings.weapon {
            return Some(Control::Weapon { to_fire: !released });
        }
        Direction::ALL
            .into_iter()
            .find(|d| self.bindings.key_for(*d) == key)
            .map(|direction| Control::Shift {
                direction,
                to_stop: released,
            })
    }
}
