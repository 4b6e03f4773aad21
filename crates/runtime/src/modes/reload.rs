use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::events::GameEvent;
use crate::input::{Buttons, PointerState};

use super::{CommitOutcome, ModeBehavior, ModeKind, Transition};

/// Refills the selected unit's magazine for a fixed AP cost.
///
/// Reloading a full magazine is allowed and still costs AP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReloadMode;

impl ModeBehavior for ReloadMode {
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        match ctx.selected_unit() {
            Some(unit) if !unit.ap().is_empty() => Ok(Transition::Stay),
            _ => {
                tracing::debug!("reload unavailable, returning to idle");
                Ok(Transition::Switch(ModeKind::None))
            }
        }
    }

    fn input(
        &mut self,
        _ctx: &EngineContext,
        _pointer: &PointerState,
        pressed: Buttons,
    ) -> Transition {
        if pressed.contains(Buttons::SECONDARY) {
            Transition::Switch(ModeKind::None)
        } else if pressed.contains(Buttons::PRIMARY) {
            Transition::Commit
        } else {
            Transition::Stay
        }
    }

    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        let Some(unit) = ctx.selected_unit() else {
            return Ok(CommitOutcome::rejected("no unit selected"));
        };
        let id = unit.id();
        let cost = ctx.config().reload_ap_cost;
        if unit.ap().value() < cost {
            return Ok(CommitOutcome::rejected(format!(
                "reloading needs {cost} AP, {} available",
                unit.ap().value()
            )));
        }

        ctx.spend_ap(id, cost)?;
        let ammo = match ctx.state.unit_mut(id) {
            Some(unit) => {
                unit.reload();
                unit.ammo().value()
            }
            None => return Ok(CommitOutcome::rejected("unit is no longer on the field")),
        };

        tracing::info!(unit = %id, ammo, "unit reloaded");
        ctx.emit(GameEvent::UnitReloaded { unit: id, ammo });
        Ok(CommitOutcome::Completed)
    }

    fn disconnect(&mut self) {}
}
