//! Namespaced event system for the interaction engine.
//!
//! Events are grouped into namespaces (`game`, `ui`, `sui`, `input`,
//! `observer`). Consumers subscribe to individual event kinds or to the
//! wildcard channel, and an [`ActivityLog`] can be attached to keep a
//! bounded history.

mod bus;
mod log;
mod types;

pub use bus::{EventBus, SubscriptionId};
pub use log::{ActivityLog, LogEntry};
pub use types::{
    ChainEvent, ChainEventKind, Event, EventKind, GameEvent, GameEventKind, InputEvent,
    InputEventKind, Namespace, ObserverEvent, ObserverEventKind, UiEvent, UiEventKind,
};
