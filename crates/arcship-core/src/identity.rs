//! Client identification handshake.
//!
//! On connect the client sends `identify` with whatever id it stored last
//! time (possibly none). The server answers `register` with the id to use,
//! which the client stores for the next session and hands to its ship.
//!
//! Transport and storage are host concerns reached through [`ServerLink`] and
//! [`IdStore`].
//!
//! # Example
//!
//! ```
//! use arcship_core::bounds::Bounds;
//! use arcship_core::config::ShipConfig;
//! use arcship_core::identity::{self, MemoryIdStore, ServerLink};
//! use arcship_core::ship::Ship;
//!
//! #[derive(Default)]
//! struct Outbox(Vec<Option<String>>);
//!
//! impl ServerLink for Outbox {
//!     fn send_identify(&mut self, id: Option<&str>) {
//!         self.0.push(id.map(str::to_owned));
//!     }
//! }
//!
//! let mut store = MemoryIdStore::default();
//! let mut link = Outbox::default();
//! let mut ship = Ship::new(ShipConfig::default(), Bounds::default()).unwrap();
//!
//! identity::identify(&store, &mut link, "arcship.id");
//! identity::complete_registration(&mut store, "arcship.id", "p-7", &mut ship);
//! identity::identify(&store, &mut link, "arcship.id");
//!
//! assert_eq!(link.0, [None, Some("p-7".to_string())]);
//! assert_eq!(ship.id(), Some("p-7"));
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::ship::Ship;

/// Persistent key/value storage for the client identifier.
pub trait IdStore {
    /// Returns the stored id for `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `id` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, id: &str);
}

/// Outbound half of the server connection.
pub trait ServerLink {
    /// Sends the `identify` message carrying the previously stored id.
    fn send_identify(&mut self, id: Option<&str>);
}

/// In-process [`IdStore`], for tests and hosts without persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryIdStore {
    entries: HashMap<String, String>,
}

impl IdStore for MemoryIdStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, id: &str) {
        self.entries.insert(key.to_string(), id.to_string());
    }
}

/// Sends `identify` with the id stored under `key`.
pub fn identify<S, L>(store: &S, link: &mut L, key: &str)
where
    S: IdStore + ?Sized,
    L: ServerLink + ?Sized,
{
    let stored = store.load(key);
    debug!(key, known = stored.is_some(), "identifying");
    link.send_identify(stored.as_deref());
}

/// Handles the server's `register` answer: persists `id` and registers the
/// ship under it.
pub fn complete_registration<S>(store: &mut S, key: &str, id: &str, ship: &mut Ship)
where
    S: IdStore + ?Sized,
{
    store.save(key, id);
    ship.register(id);
}
