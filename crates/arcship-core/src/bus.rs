//! Per-entity publish/subscribe bus.
//!
//! Every entity owns one [`EventBus`] and exposes it through the [`Evented`]
//! trait. Handlers receive mutable access to the owning entity together with
//! the event payload, so a reaction can mutate state and trigger follow-up
//! events in the same call chain.
//!
//! # Dispatch order
//!
//! - Handlers for one event kind run in registration order.
//! - Dispatch is re-entrant: a handler that triggers another event runs that
//!   event's handlers to completion before returning.
//! - Each dispatch works on a snapshot taken when it starts. A handler added
//!   during a dispatch first runs on the next trigger; a handler removed during
//!   a dispatch still completes the current one.
//!
//! # Example
//!
//! ```
//! use arcship_core::bus::{Event, EventBus, Evented};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Ping {
//!     Hit,
//! }
//!
//! impl Event for Ping {
//!     type Kind = Ping;
//!     fn kind(&self) -> Ping {
//!         *self
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Counter {
//!     hits: u32,
//!     bus: EventBus<Counter, Ping>,
//! }
//!
//! impl Evented for Counter {
//!     type Event = Ping;
//!     fn bus(&self) -> &EventBus<Self, Ping> {
//!         &self.bus
//!     }
//!     fn bus_mut(&mut self) -> &mut EventBus<Self, Ping> {
//!         &mut self.bus
//!     }
//! }
//!
//! let mut counter = Counter::default();
//! let id = counter.on(Ping::Hit, |c, _| c.hits += 1);
//! counter.trigger(Ping::Hit);
//! counter.off(id);
//! counter.trigger(Ping::Hit);
//! assert_eq!(counter.hits, 1);
//! ```

use std::fmt;
use std::rc::Rc;

/// A typed event that can be routed by kind.
pub trait Event {
    /// Payload-free discriminant used as the subscription key.
    type Kind: Copy + Eq + fmt::Debug;

    /// Returns the subscription key of this event.
    fn kind(&self) -> Self::Kind;
}

/// Handle returned by [`EventBus::on`], used to remove the registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Returns the raw registration number.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler:{}", self.0)
    }
}

/// A shared, single-threaded event handler.
pub type Handler<T, E> = Rc<dyn Fn(&mut T, &E)>;

struct Subscription<T, E: Event> {
    id: HandlerId,
    kind: E::Kind,
    handler: Handler<T, E>,
}

/// Ordered registry of handlers for one entity.
///
/// `T` is the entity handed to handlers as context, `E` its event type.
pub struct EventBus<T, E: Event> {
    subscriptions: Vec<Subscription<T, E>>,
    next_id: u64,
}

impl<T, E: Event> EventBus<T, E> {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers `handler` for events of `kind`.
    ///
    /// Registering the same closure twice creates two independent
    /// registrations.
    pub fn on<F>(&mut self, kind: E::Kind, handler: F) -> HandlerId
    where
        F: Fn(&mut T, &E) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    /// Removes a registration.
    ///
    /// Returns `false` when `id` was already removed (or never existed).
    pub fn off(&mut self, id: HandlerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Removes every registration for `kind`, returning how many were removed.
    pub fn off_kind(&mut self, kind: E::Kind) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.kind != kind);
        before - self.subscriptions.len()
    }

    /// Snapshot of the handlers for `kind`, in registration order.
    #[must_use]
    pub fn handlers_for(&self, kind: E::Kind) -> Vec<Handler<T, E>> {
        self.subscriptions
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| Rc::clone(&s.handler))
            .collect()
    }

    /// Number of handlers registered for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.subscriptions.iter().filter(|s| s.kind == kind).count()
    }

    /// Returns `true` if `id` is still registered.
    #[must_use]
    pub fn is_registered(&self, id: HandlerId) -> bool {
        self.subscriptions.iter().any(|s| s.id == id)
    }

    /// Total number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

impl<T, E: Event> Default for EventBus<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E: Event> fmt::Debug for EventBus<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<_> = self.subscriptions.iter().map(|s| s.kind).collect();
        f.debug_struct("EventBus")
            .field("subscriptions", &kinds)
            .field("next_id", &self.next_id)
            .finish()
    }
}

/// An entity that owns an [`EventBus`] keyed by its own event type.
pub trait Evented: Sized {
    /// The entity's event type.
    type Event: Event;

    /// Shared access to the entity's bus.
    fn bus(&self) -> &EventBus<Self, Self::Event>;

    /// Mutable access to the entity's bus.
    fn bus_mut(&mut self) -> &mut EventBus<Self, Self::Event>;

    /// Registers a handler on the entity's bus.
    fn on<F>(&mut self, kind: <Self::Event as Event>::Kind, handler: F) -> HandlerId
    where
        F: Fn(&mut Self, &Self::Event) + 'static,
    {
        self.bus_mut().on(kind, handler)
    }

    /// Removes a handler from the entity's bus.
    fn off(&mut self, id: HandlerId) -> bool {
        self.bus_mut().off(id)
    }

    /// Dispatches `event` synchronously to its handlers.
    fn trigger(&mut self, event: Self::Event) {
        let handlers = self.bus().handlers_for(event.kind());
        for handler in handlers {
            handler(self, &event);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Probe {
        A(u32),
        B,
    }

    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum ProbeKind {
        A,
        B,
    }

    impl Event for Probe {
        type Kind = ProbeKind;
        fn kind(&self) -> ProbeKind {
            match self {
                Self::A(_) => ProbeKind::A,
                Self::B => ProbeKind::B,
            }
        }
    }

    #[derive(Default)]
    struct Node {
        log: Vec<String>,
        bus: EventBus<Node, Probe>,
    }

    impl Evented for Node {
        type Event = Probe;
        fn bus(&self) -> &EventBus<Self, Probe> {
            &self.bus
        }
        fn bus_mut(&mut self) -> &mut EventBus<Self, Probe> {
            &mut self.bus
        }
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let mut node = Node::default();
        node.on(ProbeKind::A, |n, _| n.log.push("first".into()));
        node.on(ProbeKind::A, |n, _| n.log.push("second".into()));
        node.on(ProbeKind::A, |n, _| n.log.push("third".into()));

        node.trigger(Probe::A(0));

        assert_eq!(node.log, ["first", "second", "third"]);
    }

    #[test]
    fn payload_reaches_handler() {
        let mut node = Node::default();
        node.on(ProbeKind::A, |n, e| {
            if let Probe::A(value) = e {
                n.log.push(value.to_string());
            }
        });

        node.trigger(Probe::A(7));

        assert_eq!(node.log, ["7"]);
    }

    #[test]
    fn only_matching_kind_is_dispatched() {
        let mut node = Node::default();
        node.on(ProbeKind::B, |n, _| n.log.push("b".into()));

        node.trigger(Probe::A(1));
        assert!(node.log.is_empty());

        node.trigger(Probe::B);
        assert_eq!(node.log, ["b"]);
    }

    #[test]
    fn nested_trigger_completes_before_outer_continues() {
        let mut node = Node::default();
        node.on(ProbeKind::A, |n, _| {
            n.log.push("a:start".into());
            n.trigger(Probe::B);
            n.log.push("a:end".into());
        });
        node.on(ProbeKind::A, |n, _| n.log.push("a:next".into()));
        node.on(ProbeKind::B, |n, _| n.log.push("b".into()));

        node.trigger(Probe::A(0));

        assert_eq!(node.log, ["a:start", "b", "a:end", "a:next"]);
    }

    #[test]
    fn off_removes_registration_once() {
        let mut node = Node::default();
        let id = node.on(ProbeKind::A, |n, _| n.log.push("x".into()));

        assert!(node.off(id));
        assert!(!node.off(id));
        node.trigger(Probe::A(0));

        assert!(node.log.is_empty());
        assert!(node.bus().is_empty());
    }

    #[test]
    fn handler_added_during_dispatch_waits_for_next_trigger() {
        let mut node = Node::default();
        node.on(ProbeKind::A, |n, _| {
            n.log.push("outer".into());
            n.on(ProbeKind::A, |n, _| n.log.push("late".into()));
        });

        node.trigger(Probe::A(0));
        assert_eq!(node.log, ["outer"]);

        node.trigger(Probe::A(0));
        assert_eq!(node.log, ["outer", "outer", "late"]);
    }

    #[test]
    fn handler_removed_during_dispatch_finishes_current_pass() {
        let removed = Rc::new(RefCell::new(None::<HandlerId>));
        let mut node = Node::default();

        let slot = Rc::clone(&removed);
        node.on(ProbeKind::A, move |n, _| {
            if let Some(id) = slot.borrow_mut().take() {
                n.off(id);
            }
        });
        let second = node.on(ProbeKind::A, |n, _| n.log.push("second".into()));
        *removed.borrow_mut() = Some(second);

        node.trigger(Probe::A(0));
        node.trigger(Probe::A(0));

        assert_eq!(node.log, ["second"]);
    }

    #[test]
    fn off_kind_clears_only_that_kind() {
        let mut bus: EventBus<Node, Probe> = EventBus::new();
        bus.on(ProbeKind::A, |_, _| {});
        bus.on(ProbeKind::A, |_, _| {});
        let b = bus.on(ProbeKind::B, |_, _| {});

        assert_eq!(bus.off_kind(ProbeKind::A), 2);
        assert_eq!(bus.listener_count(ProbeKind::A), 0);
        assert!(bus.is_registered(b));
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn handler_ids_are_unique() {
        let mut bus: EventBus<Node, Probe> = EventBus::new();
        let a = bus.on(ProbeKind::A, |_, _| {});
        let b = bus.on(ProbeKind::A, |_, _| {});
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.to_string(), "handler:0");
    }
}
