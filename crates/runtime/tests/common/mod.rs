#![allow(dead_code)]

use tactics_core::{GameConfig, GameState, Grid, Position, UnitId, UnitSpec};
use tactics_runtime::{Buttons, Engine, PointerState, RuntimeConfig};

pub const OPEN_5X5: &str = ".....\n.....\n.....\n.....\n.....\n";

pub fn setup(layout: &str, config: GameConfig, specs: &[UnitSpec]) -> (Engine, Vec<UnitId>) {
    let mut state = GameState::new(Grid::from_ascii(layout).unwrap());
    let ids = specs
        .iter()
        .map(|spec| state.place_unit(*spec).unwrap())
        .collect();
    (Engine::new(state, RuntimeConfig::new(config)), ids)
}

/// Hover then press the primary button, so the press registers as a new click.
pub fn click(engine: &mut Engine, x: i32, y: i32) {
    let position = Position::new(x, y);
    engine.input(PointerState::hover(position)).unwrap();
    engine
        .input(PointerState::pressed(position, Buttons::PRIMARY))
        .unwrap();
}

pub fn hover(engine: &mut Engine, x: i32, y: i32) {
    engine
        .input(PointerState::hover(Position::new(x, y)))
        .unwrap();
}

/// `namespace:name` of every logged event, oldest first.
pub fn logged_kinds(engine: &Engine) -> Vec<String> {
    engine
        .activity()
        .entries()
        .map(|entry| entry.kind.clone())
        .collect()
}

pub fn logged(engine: &Engine, kind: &str) -> usize {
    engine
        .activity()
        .entries()
        .filter(|entry| entry.kind == kind)
        .count()
}
