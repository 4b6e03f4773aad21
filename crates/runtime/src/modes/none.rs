use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::input::{Buttons, PointerState};

use super::{CommitOutcome, ModeBehavior, Transition};

/// Idle mode. A primary click on an occupied tile selects its unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdleMode;

impl ModeBehavior for IdleMode {
    fn connect(&mut self, _ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        Ok(Transition::Stay)
    }

    fn input(
        &mut self,
        ctx: &EngineContext,
        pointer: &PointerState,
        pressed: Buttons,
    ) -> Transition {
        if !pressed.contains(Buttons::PRIMARY) {
            return Transition::Stay;
        }

        let grid = ctx.state().grid();
        match grid.cell(pointer.position) {
            Some(tile) if tile.is_walkable() => tile
                .occupant
                .map_or(Transition::Stay, Transition::Select),
            _ => Transition::Stay,
        }
    }

    fn perform_action(&mut self, _ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        Ok(CommitOutcome::Noop)
    }

    fn disconnect(&mut self) {}
}
