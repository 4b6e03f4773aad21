use crate::error::{ErrorSeverity, GameError};

use super::{Position, Team, UnitId};

/// Enum naming the three per-unit resource pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Health,
    Ammo,
    ActionPoints,
}

/// Raised when a spend exceeds what a pool currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceError {
    #[error("insufficient {kind}: required {required}, available {available}")]
    Insufficient {
        kind: ResourceKind,
        required: u32,
        available: u32,
    },
}

impl GameError for ResourceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Insufficient { .. } => "INSUFFICIENT_RESOURCE",
        }
    }
}

/// Integer resource pool with `0 ≤ value ≤ max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    value: u32,
    max: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `value` to `max`.
    pub fn new(value: u32, max: u32) -> Self {
        Self {
            value: value.min(max),
            max,
        }
    }

    /// Creates a meter filled to capacity.
    pub fn full(max: u32) -> Self {
        Self { value: max, max }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.value == self.max
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    fn spend(&mut self, kind: ResourceKind, amount: u32) -> Result<(), ResourceError> {
        if amount > self.value {
            return Err(ResourceError::Insufficient {
                kind,
                required: amount,
                available: self.value,
            });
        }
        self.value -= amount;
        Ok(())
    }

    fn drain(&mut self, amount: u32) -> u32 {
        self.value = self.value.saturating_sub(amount);
        self.value
    }

    fn refill(&mut self) {
        self.value = self.max;
    }
}

/// Result of applying damage to a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    Survived { remaining: u32 },
    Killed,
}

/// Blueprint used to place a new unit on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSpec {
    pub position: Position,
    pub team: Team,
    pub max_health: u32,
    pub max_ammo: u32,
    pub max_ap: u32,
    pub last_turn: Option<u64>,
}

impl UnitSpec {
    pub fn new(position: Position, team: Team) -> Self {
        Self {
            position,
            team,
            max_health: 10,
            max_ammo: 4,
            max_ap: 8,
            last_turn: None,
        }
    }

    #[must_use]
    pub fn with_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    #[must_use]
    pub fn with_ammo(mut self, max_ammo: u32) -> Self {
        self.max_ammo = max_ammo;
        self
    }

    #[must_use]
    pub fn with_ap(mut self, max_ap: u32) -> Self {
        self.max_ap = max_ap;
        self
    }

    /// Stamps the unit as already refreshed for `turn`.
    #[must_use]
    pub fn with_last_turn(mut self, turn: u64) -> Self {
        self.last_turn = Some(turn);
        self
    }
}

/// A unit standing on the battlefield.
///
/// Resource pools are mutated only through [`Unit::spend_ap`],
/// [`Unit::spend_ammo`], [`Unit::apply_damage`], [`Unit::reload`] and
/// [`Unit::refresh`]. Position changes go through
/// [`GameState`](crate::GameState) so occupancy stays in sync.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub(crate) id: UnitId,
    pub(crate) team: Team,
    pub(crate) position: Position,
    pub(crate) health: ResourceMeter,
    pub(crate) ammo: ResourceMeter,
    pub(crate) ap: ResourceMeter,
    pub(crate) last_turn: u64,
}

impl Unit {
    pub(crate) fn from_spec(id: UnitId, spec: &UnitSpec, current_turn: u64) -> Self {
        Self {
            id,
            team: spec.team,
            position: spec.position,
            health: ResourceMeter::full(spec.max_health),
            ammo: ResourceMeter::full(spec.max_ammo),
            ap: ResourceMeter::full(spec.max_ap),
            last_turn: spec.last_turn.unwrap_or(current_turn),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn health(&self) -> &ResourceMeter {
        &self.health
    }

    pub fn ammo(&self) -> &ResourceMeter {
        &self.ammo
    }

    pub fn ap(&self) -> &ResourceMeter {
        &self.ap
    }

    /// Last turn this unit's AP was refilled for.
    pub fn last_turn(&self) -> u64 {
        self.last_turn
    }

    pub fn is_alive(&self) -> bool {
        !self.health.is_empty()
    }

    /// Spends action points. Fails without side effects if `amount` exceeds the pool.
    pub fn spend_ap(&mut self, amount: u32) -> Result<(), ResourceError> {
        self.ap.spend(ResourceKind::ActionPoints, amount)
    }

    /// Spends ammunition. Fails without side effects if `amount` exceeds the pool.
    pub fn spend_ammo(&mut self, amount: u32) -> Result<(), ResourceError> {
        self.ammo.spend(ResourceKind::Ammo, amount)
    }

    /// Subtracts health, clamping at zero.
    ///
    /// A [`DamageOutcome::Killed`] result flags the unit for removal; the
    /// owning state performs the removal.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        match self.health.drain(amount) {
            0 => DamageOutcome::Killed,
            remaining => DamageOutcome::Survived { remaining },
        }
    }

    /// Restores ammunition to capacity unconditionally.
    ///
    /// No gating happens here: reloading a full magazine is allowed and is a
    /// no-op on ammo. Callers decide whether to offer the action.
    pub fn reload(&mut self) {
        self.ammo.refill();
    }

    /// Refills AP for `turn` if the unit has not been refreshed for it yet.
    ///
    /// Returns whether the refresh happened.
    pub fn refresh(&mut self, turn: u64) -> bool {
        if self.last_turn >= turn {
            return false;
        }
        self.ap.refill();
        self.last_turn = turn;
        true
    }

    /// Number of tiles this unit can still walk at `move_cost` AP per tile.
    pub fn move_budget(&self, move_cost: u32) -> u32 {
        if move_cost == 0 {
            return self.ap.value();
        }
        self.ap.value() / move_cost
    }
}
