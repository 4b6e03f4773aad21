//! Interaction engine for the tactical battlefield.
//!
//! This crate layers a mode-driven state machine and a namespaced event bus
//! on top of the `tactics-core` model. Hosts embed [`Engine`], feed it
//! pointer ticks, key presses and UI commands, and subscribe to the events it
//! publishes. Chain-resolved outcomes flow back in through
//! [`Engine::apply_attack_event`] and [`Engine::apply_reload_event`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the orchestrator and the busy latch
//! - [`modes`] defines the interaction modes and their lifecycle
//! - [`events`] provides the synchronous event bus and the activity log
//! - [`input`] normalizes pointer and keyboard input
//! - [`config`] loads runtime settings from the environment
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod events;
pub mod input;
pub mod modes;

pub use config::RuntimeConfig;
pub use context::EngineContext;
pub use engine::Engine;
pub use error::{Result, RuntimeError};
pub use events::{
    ActivityLog, ChainEvent, ChainEventKind, Event, EventBus, EventKind, GameEvent, GameEventKind,
    InputEvent, InputEventKind, LogEntry, Namespace, ObserverEvent, ObserverEventKind,
    SubscriptionId, UiEvent, UiEventKind,
};
pub use input::{Buttons, InputHandler, Key, KeyAction, PointerState};
pub use modes::{CommitOutcome, EditTool, Mode, ModeBehavior, ModeKind, Transition};
