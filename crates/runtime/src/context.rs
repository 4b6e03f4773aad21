//! Shared state handed to every mode operation.

use tactics_core::{GameConfig, GameState, GridError, Unit, UnitId};

use crate::error::RuntimeError;
use crate::events::{Event, EventBus, GameEvent};
use crate::modes::ModeKind;

/// Battlefield, rules, selection and event bus, owned by the engine and
/// passed explicitly into each mode lifecycle call.
#[derive(Debug)]
pub struct EngineContext {
    pub(crate) state: GameState,
    pub(crate) config: GameConfig,
    pub(crate) selected: Option<UnitId>,
    pub(crate) bus: EventBus,
}

impl EngineContext {
    pub(crate) fn new(state: GameState, config: GameConfig) -> Self {
        Self {
            state,
            config,
            selected: None,
            bus: EventBus::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.selected
    }

    /// The selected unit, if it is still on the battlefield.
    pub fn selected_unit(&self) -> Option<&Unit> {
        self.selected.and_then(|id| self.state.unit(id))
    }

    pub(crate) fn require_selected(&self, mode: ModeKind) -> Result<&Unit, RuntimeError> {
        self.selected_unit()
            .ok_or_else(|| RuntimeError::illegal(mode, "no unit selected"))
    }

    pub(crate) fn emit(&mut self, event: impl Into<Event>) {
        self.bus.publish(&event.into());
    }

    /// Spends AP and publishes the new balance.
    pub(crate) fn spend_ap(&mut self, unit: UnitId, amount: u32) -> Result<(), RuntimeError> {
        let remaining = {
            let unit = self
                .state
                .unit_mut(unit)
                .ok_or(GridError::UnitNotFound(unit))?;
            unit.spend_ap(amount)?;
            unit.ap().value()
        };

        self.emit(GameEvent::ActionPointsSpent {
            unit,
            amount,
            remaining,
        });
        Ok(())
    }
}
