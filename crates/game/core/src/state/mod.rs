//! Authoritative battlefield state.
//!
//! This module owns the grid, the unit table and turn bookkeeping. Runtime
//! layers read it freely but mutate it exclusively through the operations
//! below, which keep tile occupancy and unit positions in lockstep.
mod error;
pub mod types;

use std::collections::BTreeMap;

pub use error::GridError;
pub use types::{
    Cover, CoverLevel, DamageOutcome, Direction, Grid, Position, ResourceError, ResourceKind,
    ResourceMeter, Team, Tile, TileKind, TurnState, Unit, UnitId, UnitSpec,
};

/// Canonical snapshot of the battlefield.
///
/// Invariant: for every unit `u` in the table, `grid.occupant_at(u.position())
/// == Some(u.id)`, and every occupied tile names a unit in the table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Sequential unit id allocator. Ids are never reused.
    next_unit_id: u32,

    pub turn: TurnState,
    grid: Grid,
    units: BTreeMap<UnitId, Unit>,
}

impl GameState {
    /// Creates a state with no units on the given grid.
    pub fn new(grid: Grid) -> Self {
        Self {
            next_unit_id: 1,
            turn: TurnState::new(),
            grid,
            units: BTreeMap::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Mutable access for resource operations. Positions cannot be changed
    /// through this handle; use [`GameState::move_unit`].
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    /// Iterates units in id order.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.grid.occupant_at(position)
    }

    /// Returns the unit standing on `position`, if any.
    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.occupant_at(position).and_then(|id| self.unit(id))
    }

    fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    /// Places a new unit on the grid with full resource pools.
    ///
    /// Fails if the target tile is out of bounds, unwalkable or occupied.
    pub fn place_unit(&mut self, spec: UnitSpec) -> Result<UnitId, GridError> {
        self.check_enterable(spec.position, None)?;

        let id = self.allocate_unit_id();
        let unit = Unit::from_spec(id, &spec, self.turn.turn);
        self.grid.set_occupant(spec.position, Some(id));
        self.units.insert(id, unit);

        Ok(id)
    }

    /// Relocates a unit, updating both tile occupancy and the unit's position.
    ///
    /// Returns the position the unit left.
    pub fn move_unit(&mut self, id: UnitId, destination: Position) -> Result<Position, GridError> {
        let origin = self
            .units
            .get(&id)
            .map(Unit::position)
            .ok_or(GridError::UnitNotFound(id))?;

        if self.grid.occupant_at(origin) != Some(id) {
            return Err(GridError::OccupancyDesync {
                unit: id,
                position: origin,
            });
        }
        if origin == destination {
            return Ok(origin);
        }
        self.check_enterable(destination, Some(id))?;

        self.grid.set_occupant(origin, None);
        self.grid.set_occupant(destination, Some(id));
        if let Some(unit) = self.units.get_mut(&id) {
            unit.position = destination;
        }

        Ok(origin)
    }

    /// Removes a unit from the table and clears its tile.
    pub fn remove_unit(&mut self, id: UnitId) -> Result<Unit, GridError> {
        let unit = self.units.remove(&id).ok_or(GridError::UnitNotFound(id))?;
        if self.grid.occupant_at(unit.position) == Some(id) {
            self.grid.set_occupant(unit.position, None);
        }
        Ok(unit)
    }

    /// Applies damage and removes the unit when its health reaches zero.
    pub fn damage_unit(&mut self, id: UnitId, amount: u32) -> Result<DamageOutcome, GridError> {
        let outcome = self
            .units
            .get_mut(&id)
            .ok_or(GridError::UnitNotFound(id))?
            .apply_damage(amount);

        if outcome == DamageOutcome::Killed {
            self.remove_unit(id)?;
        }
        Ok(outcome)
    }

    /// Advances the turn and refills AP for every unit stamped with an older turn.
    ///
    /// Returns the new turn number and the ids that were refreshed.
    pub fn next_turn(&mut self) -> (u64, Vec<UnitId>) {
        let turn = self.turn.advance();
        let refreshed = self
            .units
            .values_mut()
            .filter_map(|unit| unit.refresh(turn).then_some(unit.id))
            .collect();
        (turn, refreshed)
    }

    /// Replaces the terrain of a tile while keeping its occupant.
    ///
    /// Rejects turning an occupied tile unwalkable.
    pub fn set_terrain(&mut self, position: Position, kind: TileKind) -> Result<(), GridError> {
        let tile = self
            .grid
            .cell(position)
            .copied()
            .ok_or(GridError::OutOfBounds { position })?;

        if let (TileKind::Unwalkable, Some(occupant)) = (kind, tile.occupant) {
            return Err(GridError::Occupied { position, occupant });
        }

        self.grid.set_cell(
            position,
            Tile {
                kind,
                occupant: tile.occupant,
            },
        );
        Ok(())
    }

    fn check_enterable(&self, position: Position, mover: Option<UnitId>) -> Result<(), GridError> {
        let tile = self
            .grid
            .cell(position)
            .ok_or(GridError::OutOfBounds { position })?;

        if !tile.is_walkable() {
            return Err(GridError::Unwalkable { position });
        }
        match tile.occupant {
            Some(occupant) if Some(occupant) != mover => {
                Err(GridError::Occupied { position, occupant })
            }
            _ => Ok(()),
        }
    }
}
