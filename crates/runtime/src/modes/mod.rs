//! Interaction modes and their lifecycle.
//!
//! Exactly one mode is active at a time. The engine drives each mode
//! through `connect`, per-tick `input`, an optional `perform_action` commit
//! and `disconnect`. Modes never call these on themselves; they request
//! changes by returning a [`Transition`].

mod edit;
mod grenade;
mod movement;
mod none;
mod reload;
mod shoot;

use serde::{Deserialize, Serialize};

pub use edit::{EditMode, EditTool};
pub use grenade::GrenadeMode;
pub use movement::MoveMode;
pub use none::IdleMode;
pub use reload::ReloadMode;
pub use shoot::ShootMode;

use tactics_core::UnitId;

use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::input::{Buttons, PointerState};

/// Tag identifying an interaction mode.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    #[default]
    None,
    Move,
    Shoot,
    Reload,
    Grenade,
    Edit,
}

impl ModeKind {
    /// Sticky modes stay active after a successful commit.
    pub fn is_sticky(self) -> bool {
        matches!(self, ModeKind::Edit)
    }

    /// Modes that act on behalf of the selected unit.
    pub fn requires_selection(self) -> bool {
        matches!(
            self,
            ModeKind::Move | ModeKind::Shoot | ModeKind::Reload | ModeKind::Grenade
        )
    }

    /// Whether an explicit switch from `self` to `target` is legal.
    ///
    /// Returning to `None` is always legal. Action modes are entered from
    /// `None` or `Move` only.
    pub fn can_switch_to(self, target: ModeKind) -> bool {
        match target {
            ModeKind::None => true,
            ModeKind::Move => self == ModeKind::None,
            ModeKind::Shoot | ModeKind::Reload | ModeKind::Grenade | ModeKind::Edit => {
                matches!(self, ModeKind::None | ModeKind::Move)
            }
        }
    }
}

/// Request returned by a mode to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Switch(ModeKind),
    Select(UnitId),
    Commit,
}

/// Result of a `perform_action` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// State changed durably.
    Completed,
    /// A request went out to the chain; the engine latches busy until it settles.
    Pending { unit: UnitId },
    /// Preconditions failed; nothing changed.
    Rejected { reason: String },
    /// Nothing to commit in this mode.
    Noop,
}

impl CommitOutcome {
    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }
}

/// Lifecycle every interaction mode implements.
///
/// Engine state is passed in explicitly. `input` sees it read-only, so only
/// `connect` and `perform_action` can publish events or mutate the
/// battlefield.
pub trait ModeBehavior {
    /// Allocates scratch state. Fails when required shared state is missing.
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError>;

    /// Updates scratch state from one pointer tick. `pressed` holds the
    /// buttons that went down on this tick.
    fn input(&mut self, ctx: &EngineContext, pointer: &PointerState, pressed: Buttons)
    -> Transition;

    /// The single commit point. Safe to call with incomplete scratch state.
    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError>;

    /// Releases all scratch state.
    fn disconnect(&mut self);
}

/// The active mode together with its scratch state.
#[derive(Clone, Debug)]
pub enum Mode {
    None(IdleMode),
    Move(MoveMode),
    Shoot(ShootMode),
    Reload(ReloadMode),
    Grenade(GrenadeMode),
    Edit(EditMode),
}

macro_rules! dispatch {
    ($mode:expr, $inner:ident => $call:expr) => {
        match $mode {
            Mode::None($inner) => $call,
            Mode::Move($inner) => $call,
            Mode::Shoot($inner) => $call,
            Mode::Reload($inner) => $call,
            Mode::Grenade($inner) => $call,
            Mode::Edit($inner) => $call,
        }
    };
}

impl Mode {
    /// Fresh, unconnected instance of `kind`.
    pub fn new(kind: ModeKind) -> Self {
        match kind {
            ModeKind::None => Mode::None(IdleMode),
            ModeKind::Move => Mode::Move(MoveMode::default()),
            ModeKind::Shoot => Mode::Shoot(ShootMode::default()),
            ModeKind::Reload => Mode::Reload(ReloadMode),
            ModeKind::Grenade => Mode::Grenade(GrenadeMode::default()),
            ModeKind::Edit => Mode::Edit(EditMode::default()),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::None(_) => ModeKind::None,
            Mode::Move(_) => ModeKind::Move,
            Mode::Shoot(_) => ModeKind::Shoot,
            Mode::Reload(_) => ModeKind::Reload,
            Mode::Grenade(_) => ModeKind::Grenade,
            Mode::Edit(_) => ModeKind::Edit,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::None(IdleMode)
    }
}

impl ModeBehavior for Mode {
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        dispatch!(self, mode => mode.connect(ctx))
    }

    fn input(
        &mut self,
        ctx: &EngineContext,
        pointer: &PointerState,
        pressed: Buttons,
    ) -> Transition {
        dispatch!(self, mode => mode.input(ctx, pointer, pressed))
    }

    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        dispatch!(self, mode => mode.perform_action(ctx))
    }

    fn disconnect(&mut self) {
        dispatch!(self, mode => mode.disconnect())
    }
}
