mod common;

use common::{OPEN_5X5, click, hover, logged, setup};
use tactics_core::{Direction, GameConfig, Position, Team, TileKind, UnitSpec};
use tactics_runtime::{
    Buttons, CommitOutcome, EditTool, Key, Mode, ModeKind, PointerState, RuntimeError,
};

#[test]
fn clicking_a_unit_selects_it_and_shows_its_range() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(2)],
    );

    click(&mut engine, 0, 0);

    assert_eq!(engine.mode(), ModeKind::Move);
    assert_eq!(engine.selected(), Some(ids[0]));

    let range = engine.movement_range();
    assert_eq!(range.len(), 6);
    assert!(range.contains(Position::new(0, 2)));
    assert!(range.contains(Position::new(2, 0)));
    assert!(range.contains(Position::new(1, 1)));
    assert!(!range.contains(Position::new(0, 3)));
}

#[test]
fn clicking_empty_ground_in_idle_does_nothing() {
    let (mut engine, _) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );

    click(&mut engine, 3, 3);

    assert_eq!(engine.mode(), ModeKind::None);
    assert_eq!(engine.selected(), None);
}

#[test]
fn move_round_trip_leaves_no_scratch_state() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );

    engine.select_unit(ids[0]).unwrap();
    hover(&mut engine, 2, 0);
    assert_eq!(engine.candidate_path().map(<[_]>::len), Some(3));

    engine.cancel().unwrap();

    assert_eq!(engine.mode(), ModeKind::None);
    assert!(engine.movement_range().is_empty());
    assert!(engine.candidate_path().is_none());
    assert!(matches!(engine.active_mode(), Mode::None(_)));
    // Selection survives the round trip so action modes can use it.
    assert_eq!(engine.selected(), Some(ids[0]));
}

#[test]
fn secondary_click_cancels_move() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );
    engine.select_unit(ids[0]).unwrap();

    engine
        .input(PointerState::pressed(
            Position::new(1, 1),
            Buttons::SECONDARY,
        ))
        .unwrap();

    assert_eq!(engine.mode(), ModeKind::None);
    assert!(engine.movement_range().is_empty());
}

#[test]
fn committing_a_move_relocates_the_unit_and_spends_ap() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(8)],
    );

    click(&mut engine, 0, 0);
    click(&mut engine, 2, 1);

    let unit = engine.state().unit(ids[0]).unwrap();
    assert_eq!(unit.position(), Position::new(2, 1));
    assert_eq!(unit.ap().value(), 5);
    assert_eq!(engine.state().occupant_at(Position::ORIGIN), None);
    assert_eq!(engine.mode(), ModeKind::None);
    assert_eq!(logged(&engine, "game:unitMoved"), 1);
}

#[test]
fn candidate_path_is_clamped_to_the_ap_budget() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(2)],
    );
    engine.select_unit(ids[0]).unwrap();

    hover(&mut engine, 4, 0);

    let path = engine.candidate_path().unwrap();
    assert_eq!(path.len(), 3);
    assert_eq!(path.first(), Some(&Position::ORIGIN));
    assert_eq!(path.last(), Some(&Position::new(2, 0)));
}

#[test]
fn move_onto_an_occupied_tile_is_rejected_and_mode_stays() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)),
            UnitSpec::new(Position::new(1, 0), Team(1)),
        ],
    );
    engine.select_unit(ids[0]).unwrap();

    hover(&mut engine, 1, 0);
    assert!(engine.candidate_path().is_none());

    let outcome = engine.confirm().unwrap();

    assert!(matches!(outcome, CommitOutcome::Rejected { .. }));
    assert_eq!(engine.mode(), ModeKind::Move);
    assert_eq!(
        engine.state().unit(ids[0]).unwrap().position(),
        Position::ORIGIN
    );
    assert_eq!(logged(&engine, "game:commitRejected"), 1);
}

#[test]
fn shoot_targets_cycle_with_wraparound() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)),
            UnitSpec::new(Position::new(2, 0), Team(1)),
            UnitSpec::new(Position::new(4, 0), Team(1)),
            UnitSpec::new(Position::new(0, 4), Team(0)),
        ],
    );
    engine.select_unit(ids[0]).unwrap();
    engine.switch_mode(ModeKind::Shoot).unwrap();

    assert_eq!(engine.targets(), &ids[1..]);
    assert_eq!(engine.current_target(), Some(ids[1]));

    assert_eq!(engine.cycle_target(-1).unwrap(), Some(ids[3]));
    assert_eq!(engine.cycle_target(1).unwrap(), Some(ids[1]));

    engine.key(Key::Tab).unwrap();
    assert_eq!(engine.current_target(), Some(ids[2]));
}

#[test]
fn action_modes_require_a_selected_unit() {
    let (mut engine, _) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );

    let result = engine.switch_mode(ModeKind::Shoot);

    assert!(matches!(
        result,
        Err(RuntimeError::IllegalState {
            mode: ModeKind::Shoot,
            ..
        })
    ));
    assert_eq!(engine.mode(), ModeKind::None);
}

#[test]
fn reload_bounces_back_to_idle_without_ap() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(0)],
    );
    engine.select_unit(ids[0]).unwrap();

    engine.switch_mode(ModeKind::Reload).unwrap();

    assert_eq!(engine.mode(), ModeKind::None);
}

#[test]
fn reload_on_a_full_magazine_still_spends_ap() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(8).with_ammo(4)],
    );
    engine.select_unit(ids[0]).unwrap();
    engine.switch_mode(ModeKind::Reload).unwrap();

    let outcome = engine.confirm().unwrap();

    let unit = engine.state().unit(ids[0]).unwrap();
    assert_eq!(outcome, CommitOutcome::Completed);
    assert_eq!(unit.ammo().value(), 4);
    assert_eq!(unit.ap().value(), 7);
    assert_eq!(engine.mode(), ModeKind::None);
}

#[test]
fn grenade_clears_cover_and_obstacles_in_the_blast() {
    let layout = "...C.\n...#.\n.....\n.....\n.....\n";
    let (mut engine, ids) = setup(
        layout,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(8)],
    );
    engine.select_unit(ids[0]).unwrap();
    engine.switch_mode(ModeKind::Grenade).unwrap();

    hover(&mut engine, 4, 4);
    assert_eq!(engine.grenade_target(), None);

    hover(&mut engine, 3, 0);
    assert_eq!(engine.grenade_target(), Some(Position::new(3, 0)));
    assert_eq!(
        engine.blast_tiles(),
        &[
            Position::new(2, 0),
            Position::new(3, 0),
            Position::new(4, 0),
            Position::new(3, 1),
        ]
    );

    click(&mut engine, 3, 0);

    let grid = engine.state().grid();
    assert_eq!(
        grid.cell(Position::new(3, 0)).unwrap().kind,
        TileKind::Empty
    );
    assert_eq!(
        grid.cell(Position::new(3, 1)).unwrap().kind,
        TileKind::Empty
    );
    assert_eq!(engine.state().unit(ids[0]).unwrap().ap().value(), 6);
    assert_eq!(engine.mode(), ModeKind::None);
}

#[test]
fn edit_mode_is_locked_outside_the_editor() {
    let (mut engine, _) = setup(OPEN_5X5, GameConfig::new(), &[]);

    assert!(matches!(
        engine.switch_mode(ModeKind::Edit),
        Err(RuntimeError::IllegalState {
            mode: ModeKind::Edit,
            ..
        })
    ));
    assert_eq!(engine.mode(), ModeKind::None);
}

#[test]
fn edit_mode_is_sticky_across_edits() {
    let (mut engine, _) = setup(OPEN_5X5, GameConfig::editor(), &[]);
    engine.switch_mode(ModeKind::Edit).unwrap();

    click(&mut engine, 1, 1);
    assert_eq!(engine.mode(), ModeKind::Edit);
    assert_eq!(
        engine.state().grid().cell(Position::new(1, 1)).unwrap().kind,
        TileKind::Unwalkable
    );

    click(&mut engine, 1, 1);
    assert_eq!(
        engine.state().grid().cell(Position::new(1, 1)).unwrap().kind,
        TileKind::Empty
    );

    engine.set_edit_tool(EditTool::Cover).unwrap();
    engine.set_edit_edge(Direction::Left).unwrap();
    click(&mut engine, 2, 2);
    let tile = engine.state().grid().cell(Position::new(2, 2)).unwrap();
    assert!(tile.blocks(Direction::Left));
    assert!(!tile.blocks(Direction::Up));

    engine.cancel().unwrap();
    assert_eq!(engine.mode(), ModeKind::None);
}

#[test]
fn editor_refuses_to_wall_in_a_unit() {
    let (mut engine, _) = setup(
        OPEN_5X5,
        GameConfig::editor(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );
    engine.switch_mode(ModeKind::Edit).unwrap();

    click(&mut engine, 0, 0);

    let origin = engine.state().grid().cell(Position::ORIGIN).unwrap();
    assert!(origin.is_walkable());
    assert_eq!(logged(&engine, "game:commitRejected"), 1);
    assert_eq!(engine.mode(), ModeKind::Edit);
}

#[test]
fn action_modes_cannot_chain_into_each_other() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)),
            UnitSpec::new(Position::new(2, 2), Team(1)),
        ],
    );
    engine.select_unit(ids[0]).unwrap();
    engine.switch_mode(ModeKind::Grenade).unwrap();

    assert!(matches!(
        engine.switch_mode(ModeKind::Shoot),
        Err(RuntimeError::IllegalState { .. })
    ));
    assert_eq!(engine.mode(), ModeKind::Grenade);
}

#[test]
fn confirm_in_idle_is_a_no_op() {
    let (mut engine, _) = setup(OPEN_5X5, GameConfig::new(), &[]);

    assert_eq!(engine.confirm().unwrap(), CommitOutcome::Noop);
    assert_eq!(engine.mode(), ModeKind::None);
}
