//! Synchronous namespaced event bus.

use std::collections::HashMap;
use std::fmt;

use super::types::{Event, EventKind};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&Event)>;
type WildcardHandler = Box<dyn FnMut(EventKind, &Event)>;

/// Name-keyed event bus with a wildcard channel.
///
/// Dispatch is synchronous: [`EventBus::publish`] invokes every handler
/// registered for the event's kind in registration order, then every
/// wildcard handler in registration order, before returning. A kind with no
/// subscribers is a no-op apart from the wildcard channel.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: HashMap<EventKind, Vec<(SubscriptionId, Handler)>>,
    wildcard: Vec<(SubscriptionId, WildcardHandler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a handler for one event kind.
    pub fn subscribe<F>(&mut self, kind: impl Into<EventKind>, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) + 'static,
    {
        let id = self.allocate_id();
        self.handlers
            .entry(kind.into())
            .or_default()
            .push((id, Box::new(handler)));
        id
    }

    /// Registers a handler that receives every published event with its kind.
    pub fn subscribe_all<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(EventKind, &Event) + 'static,
    {
        let id = self.allocate_id();
        self.wildcard.push((id, Box::new(handler)));
        id
    }

    /// Removes a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(index) = self.wildcard.iter().position(|(sub, _)| *sub == id) {
            self.wildcard.remove(index);
            return true;
        }

        for handlers in self.handlers.values_mut() {
            if let Some(index) = handlers.iter().position(|(sub, _)| *sub == id) {
                handlers.remove(index);
                return true;
            }
        }
        false
    }

    /// Delivers `event` to its kind's handlers and then to the wildcard channel.
    pub fn publish(&mut self, event: &Event) {
        let kind = event.kind();
        tracing::trace!(%kind, "publishing event");

        if let Some(handlers) = self.handlers.get_mut(&kind) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
        for (_, handler) in self.wildcard.iter_mut() {
            handler(kind, event);
        }
    }

    /// Number of handlers registered for `kind`, excluding wildcard handlers.
    pub fn subscriber_count(&self, kind: impl Into<EventKind>) -> usize {
        self.handlers.get(&kind.into()).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered: usize = self.handlers.values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("handlers", &registered)
            .field("wildcard", &self.wildcard.len())
            .finish()
    }
}
