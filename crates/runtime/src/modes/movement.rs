use tactics_core::{MovementRange, Position, UnitId, clamp_path, reachable_tiles, trace_path};

use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::events::GameEvent;
use crate::input::{Buttons, PointerState};

use super::{CommitOutcome, ModeBehavior, ModeKind, Transition};

/// Walks the selected unit along a cover-aware path within its AP budget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveMode {
    unit: Option<UnitId>,
    budget: u32,
    range: MovementRange,
    hover: Option<Position>,
    path: Option<Vec<Position>>,
}

impl MoveMode {
    /// Tiles reachable with the unit's AP at connect time.
    pub fn range(&self) -> &MovementRange {
        &self.range
    }

    /// Path to the hovered tile, clamped to the AP budget.
    pub fn candidate_path(&self) -> Option<&[Position]> {
        self.path.as_deref()
    }

    pub fn is_clear(&self) -> bool {
        self.unit.is_none() && self.range.is_empty() && self.hover.is_none() && self.path.is_none()
    }

    fn plan(&self, ctx: &EngineContext, destination: Position) -> Option<Vec<Position>> {
        let unit = ctx.state().unit(self.unit?)?;
        let grid = ctx.state().grid();

        // The walk must end on a free tile. Pointing straight at an occupied
        // tile offers nothing; a clamped path backs off to its last free cell.
        if grid.occupant_at(destination).is_some() {
            return None;
        }
        let path = trace_path(grid, unit.position(), destination)?;
        let mut path = clamp_path(grid, path, self.budget)?;
        let last_free = path
            .iter()
            .rposition(|&cell| grid.occupant_at(cell).is_none())?;
        if last_free == 0 {
            return None;
        }
        path.truncate(last_free + 1);
        Some(path)
    }
}

impl ModeBehavior for MoveMode {
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        let unit = ctx.require_selected(ModeKind::Move)?;
        let (id, origin) = (unit.id(), unit.position());
        let budget = unit.move_budget(ctx.config().move_cost_per_tile);

        self.unit = Some(id);
        self.budget = budget;
        self.range = reachable_tiles(ctx.state().grid(), origin, budget);

        ctx.emit(GameEvent::MovementRangeShown {
            unit: id,
            tiles: self.range.iter().map(|tile| tile.position).collect(),
        });
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

        if self.hover != Some(pointer.position) {
            self.hover = Some(pointer.position);
            self.path = self.plan(ctx, pointer.position);
        }

        if pressed.contains(Buttons::PRIMARY) && self.path.is_some() {
            Transition::Commit
        } else {
            Transition::Stay
        }
    }

    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        let (Some(id), Some(path)) = (self.unit, self.path.take()) else {
            return Ok(CommitOutcome::rejected("no path selected"));
        };
        let Some(unit) = ctx.state().unit(id) else {
            return Ok(CommitOutcome::rejected("unit is no longer on the field"));
        };
        let (Some(&start), Some(&destination)) = (path.first(), path.last()) else {
            return Ok(CommitOutcome::rejected("no path selected"));
        };
        if start != unit.position() {
            return Ok(CommitOutcome::rejected("path does not start at the unit"));
        }

        let steps = (path.len() - 1) as u32;
        let cost = steps * ctx.config().move_cost_per_tile;
        if cost > unit.ap().value() {
            return Ok(CommitOutcome::rejected(format!(
                "walking {steps} tiles needs {cost} AP, {} available",
                unit.ap().value()
            )));
        }

        if let Err(error) = ctx.state.move_unit(id, destination) {
            return Ok(CommitOutcome::rejected(error.to_string()));
        }
        ctx.spend_ap(id, cost)?;

        tracing::info!(unit = %id, from = %start, to = %destination, steps, "unit moved");
        ctx.emit(GameEvent::UnitMoved { unit: id, path });
        Ok(CommitOutcome::Completed)
    }

    fn disconnect(&mut self) {
        *self = Self::default();
    }
}
