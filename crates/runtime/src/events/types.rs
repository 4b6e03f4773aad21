//! Event payloads, grouped by namespace.
//!
//! Every event travels inside an [`Event`] envelope. Subscriptions key on
//! [`EventKind`], which renders as `namespace:name` (for example
//! `game:unitMoved` or `sui:attackResolved`).

use std::fmt;

use serde::{Deserialize, Serialize};
use tactics_core::{Direction, Position, TileKind, UnitId};

use crate::input::{Key, PointerState};
use crate::modes::{EditTool, ModeKind};

/// Channel prefixes used to route events.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
pub enum Namespace {
    /// State changes published by the engine.
    Game,
    /// Commands from the host UI.
    Ui,
    /// Notifications from the authoritative chain.
    #[strum(serialize = "sui")]
    Chain,
    /// Raw pointer and keyboard input.
    Input,
    /// Commit lifecycle notifications for observers.
    Observer,
}

/// State changes published by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[serde(rename_all = "camelCase")]
#[strum_discriminants(
    name(GameEventKind),
    derive(Hash, strum::Display, strum::IntoStaticStr),
    strum(serialize_all = "camelCase")
)]
pub enum GameEvent {
    UnitSelected { unit: UnitId, position: Position },
    UnitDeselected { unit: UnitId },
    ModeChanged { from: ModeKind, to: ModeKind },
    MovementRangeShown { unit: UnitId, tiles: Vec<Position> },
    UnitMoved { unit: UnitId, path: Vec<Position> },
    ActionPointsSpent {
        unit: UnitId,
        amount: u32,
        remaining: u32,
    },
    TargetChanged {
        shooter: UnitId,
        target: Option<UnitId>,
    },
    AttackRequested {
        attacker: UnitId,
        target: UnitId,
        from: Position,
        at: Position,
    },
    UnitDamaged {
        unit: UnitId,
        amount: u32,
        remaining: u32,
    },
    UnitRemoved { unit: UnitId, position: Position },
    UnitReloaded { unit: UnitId, ammo: u32 },
    GrenadeDetonated {
        thrower: UnitId,
        center: Position,
        blast: Vec<Position>,
        cleared: Vec<Position>,
    },
    TileEdited { position: Position, kind: TileKind },
    TurnAdvanced { turn: u64, refreshed: Vec<UnitId> },
    CommitRejected { mode: ModeKind, reason: String },
}

/// Commands issued by the host UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[serde(rename_all = "camelCase")]
#[strum_discriminants(
    name(UiEventKind),
    derive(Hash, strum::Display, strum::IntoStaticStr),
    strum(serialize_all = "camelCase")
)]
pub enum UiEvent {
    SwitchMode { mode: ModeKind },
    SelectUnit { unit: UnitId },
    Confirm,
    Cancel,
    CycleTarget { step: i32 },
    SetEditTool { tool: EditTool, edge: Direction },
    EndTurn,
}

/// Notifications from the authoritative chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[serde(rename_all = "camelCase")]
#[strum_discriminants(
    name(ChainEventKind),
    derive(Hash, strum::Display, strum::IntoStaticStr),
    strum(serialize_all = "camelCase")
)]
pub enum ChainEvent {
    /// An attack settled on chain. Units are identified by position because
    /// the chain does not know engine ids.
    AttackResolved {
        attacker: Position,
        target: Position,
        damage: u32,
    },
    ReloadResolved { position: Position },
    /// A submitted commit was rejected or timed out.
    CommitFailed { reason: String },
}

/// Raw pointer and keyboard input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[serde(rename_all = "camelCase")]
#[strum_discriminants(
    name(InputEventKind),
    derive(Hash, strum::Display, strum::IntoStaticStr),
    strum(serialize_all = "camelCase")
)]
pub enum InputEvent {
    Pointer(PointerState),
    Key(Key),
}

/// Commit lifecycle notifications.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::EnumDiscriminants)]
#[serde(rename_all = "camelCase")]
#[strum_discriminants(
    name(ObserverEventKind),
    derive(Hash, strum::Display, strum::IntoStaticStr),
    strum(serialize_all = "camelCase")
)]
pub enum ObserverEvent {
    /// A commit was handed to the chain; the busy latch is set.
    CommitStarted { mode: ModeKind, unit: UnitId },
    /// The pending commit settled; the busy latch is clear.
    CommitSettled { success: bool },
}

/// Event envelope carrying the namespace and the typed payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "namespace", content = "event", rename_all = "camelCase")]
pub enum Event {
    Game(GameEvent),
    Ui(UiEvent),
    #[serde(rename = "sui")]
    Chain(ChainEvent),
    Input(InputEvent),
    Observer(ObserverEvent),
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Game(event) => EventKind::Game(event.into()),
            Event::Ui(event) => EventKind::Ui(event.into()),
            Event::Chain(event) => EventKind::Chain(event.into()),
            Event::Input(event) => EventKind::Input(event.into()),
            Event::Observer(event) => EventKind::Observer(event.into()),
        }
    }

    pub fn namespace(&self) -> Namespace {
        self.kind().namespace()
    }
}

/// Subscription key identifying one event name within a namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Game(GameEventKind),
    Ui(UiEventKind),
    Chain(ChainEventKind),
    Input(InputEventKind),
    Observer(ObserverEventKind),
}

impl EventKind {
    pub fn namespace(&self) -> Namespace {
        match self {
            EventKind::Game(_) => Namespace::Game,
            EventKind::Ui(_) => Namespace::Ui,
            EventKind::Chain(_) => Namespace::Chain,
            EventKind::Input(_) => Namespace::Input,
            EventKind::Observer(_) => Namespace::Observer,
        }
    }

    /// Event name without the namespace prefix.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Game(kind) => kind.into(),
            EventKind::Ui(kind) => kind.into(),
            EventKind::Chain(kind) => kind.into(),
            EventKind::Input(kind) => kind.into(),
            EventKind::Observer(kind) => kind.into(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace(), self.name())
    }
}

macro_rules! event_conversions {
    ($($variant:ident => $payload:ty, $kind:ty;)*) => {
        $(
            impl From<$payload> for Event {
                fn from(event: $payload) -> Self {
                    Event::$variant(event)
                }
            }

            impl From<$kind> for EventKind {
                fn from(kind: $kind) -> Self {
                    EventKind::$variant(kind)
                }
            }
        )*
    };
}

event_conversions! {
    Game => GameEvent, GameEventKind;
    Ui => UiEvent, UiEventKind;
    Chain => ChainEvent, ChainEventKind;
    Input => InputEvent, InputEventKind;
    Observer => ObserverEvent, ObserverEventKind;
}
