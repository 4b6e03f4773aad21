//! Built-in skirmish used by the demo host.

use anyhow::Result;
use tactics_core::{GameState, Grid, Position, Team, UnitId, UnitSpec};

/// `.` ground, `#` obstacle, `C` full cover, `^ v < >` one-sided cover.
pub const SKIRMISH: &str = "\
........
..C..#..
........
.#..>...
........
..v.....
";

/// Ids of the units placed by [`skirmish`].
#[derive(Clone, Copy, Debug)]
pub struct Roster {
    pub rifleman: UnitId,
    pub grenadier: UnitId,
    pub raider: UnitId,
    pub sentry: UnitId,
}

pub fn skirmish() -> Result<(GameState, Roster)> {
    let mut state = GameState::new(Grid::from_ascii(SKIRMISH)?);

    let rifleman = state.place_unit(UnitSpec::new(Position::new(0, 0), Team(0)).with_ammo(2))?;
    let grenadier = state.place_unit(UnitSpec::new(Position::new(1, 4), Team(0)).with_ap(6))?;
    let raider = state.place_unit(UnitSpec::new(Position::new(5, 2), Team(1)).with_health(6))?;
    let sentry = state.place_unit(UnitSpec::new(Position::new(6, 5), Team(1)))?;

    Ok((
        state,
        Roster {
            rifleman,
            grenadier,
            raider,
            sentry,
        },
    ))
}

/// Renders the grid with units drawn as their team digit.
pub fn render(state: &GameState) -> String {
    let ascii = state.grid().to_ascii();
    let mut rows: Vec<Vec<char>> = ascii.lines().map(|line| line.chars().collect()).collect();

    for unit in state.units() {
        let Position { x, y } = unit.position();
        if let Some(cell) = rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = char::from_digit(u32::from(unit.team().0) % 10, 10).unwrap_or('?');
        }
    }

    rows.into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}
