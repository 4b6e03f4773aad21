use tactics_core::{Position, TileKind, UnitId, blast_area};

use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::events::GameEvent;
use crate::input::{Buttons, PointerState};

use super::{CommitOutcome, ModeBehavior, ModeKind, Transition};

/// Throws a grenade that strips cover and obstacles around a target tile.
///
/// Damage to units caught in the blast is left to the chain.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrenadeMode {
    thrower: Option<UnitId>,
    target: Option<Position>,
    blast: Vec<Position>,
}

impl GrenadeMode {
    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Tiles the blast would cover, row-major.
    pub fn blast(&self) -> &[Position] {
        &self.blast
    }

    pub fn is_clear(&self) -> bool {
        self.thrower.is_none() && self.target.is_none() && self.blast.is_empty()
    }

    fn aim(&mut self, ctx: &EngineContext, position: Position) {
        let in_range = self
            .thrower
            .and_then(|id| ctx.state().unit(id))
            .is_some_and(|unit| {
                unit.position().manhattan(position) <= ctx.config().grenade_range
            });

        if in_range && ctx.state().grid().contains(position) {
            self.target = Some(position);
            self.blast = blast_area(
                ctx.state().grid(),
                position,
                ctx.config().grenade_blast_radius,
            );
        } else {
            self.target = None;
            self.blast.clear();
        }
    }
}

impl ModeBehavior for GrenadeMode {
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        self.thrower = Some(ctx.require_selected(ModeKind::Grenade)?.id());
        Ok(Transition::Stay)
    }

    fn input(
        &mut self,
        ctx: &EngineContext,
        pointer: &PointerState,
        pressed: Buttons,
    ) -> Transition {
        if pressed.contains(Buttons::SECONDARY) {
            return Transition::Switch(ModeKind::None);
        }

        if self.target != Some(pointer.position) {
            self.aim(ctx, pointer.position);
        }

        if pressed.contains(Buttons::PRIMARY) && self.target.is_some() {
            Transition::Commit
        } else {
            Transition::Stay
        }
    }

    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        let (Some(thrower), Some(center)) = (self.thrower, self.target) else {
            return Ok(CommitOutcome::rejected("no target tile"));
        };
        let Some(unit) = ctx.state().unit(thrower) else {
            return Ok(CommitOutcome::rejected("thrower is no longer on the field"));
        };

        let range = ctx.config().grenade_range;
        if unit.position().manhattan(center) > range {
            return Ok(CommitOutcome::rejected("target is out of range"));
        }
        let cost = ctx.config().grenade_ap_cost;
        if unit.ap().value() < cost {
            return Ok(CommitOutcome::rejected(format!(
                "throwing needs {cost} AP, {} available",
                unit.ap().value()
            )));
        }

        ctx.spend_ap(thrower, cost)?;

        let blast = std::mem::take(&mut self.blast);
        let mut cleared = Vec::new();
        for &position in &blast {
            let destructible = ctx
                .state()
                .grid()
                .cell(position)
                .is_some_and(|tile| !matches!(tile.kind, TileKind::Empty));
            if destructible {
                ctx.state.set_terrain(position, TileKind::Empty)?;
                cleared.push(position);
            }
        }

        tracing::info!(unit = %thrower, %center, cleared = cleared.len(), "grenade detonated");
        ctx.emit(GameEvent::GrenadeDetonated {
            thrower,
            center,
            blast,
            cleared,
        });
        self.target = None;
        Ok(CommitOutcome::Completed)
    }

    fn disconnect(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use tactics_core::{GameConfig, GameState, Grid, Team, UnitSpec};

    use super::*;

    #[test]
    fn disconnect_releases_target_and_blast() {
        let mut state = GameState::new(Grid::new(5, 5).unwrap());
        let thrower = state
            .place_unit(UnitSpec::new(Position::ORIGIN, Team(0)))
            .unwrap();
        let mut ctx = EngineContext::new(state, GameConfig::new());
        ctx.selected = Some(thrower);
        let mut mode = GrenadeMode::default();

        mode.connect(&mut ctx).unwrap();
        mode.input(
            &ctx,
            &PointerState::hover(Position::new(2, 1)),
            Buttons::empty(),
        );
        assert_eq!(mode.target(), Some(Position::new(2, 1)));
        assert_eq!(mode.blast().len(), 5);
        assert!(!mode.is_clear());

        mode.disconnect();

        assert!(mode.is_clear());
        assert_eq!(mode, GrenadeMode::default());
    }
}
