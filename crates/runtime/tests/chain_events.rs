mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{OPEN_5X5, logged, logged_kinds, setup};
use tactics_core::{GameConfig, Position, Team, UnitSpec};
use tactics_runtime::{Event, GameEventKind, ModeKind, UiEvent};

#[test]
fn lethal_attack_removes_unit_and_late_reload_is_ignored() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)),
            UnitSpec::new(Position::new(2, 0), Team(1)).with_health(5),
        ],
    );

    engine.apply_attack_event(Position::ORIGIN, Position::new(2, 0), 5);

    assert!(engine.state().unit(ids[1]).is_none());
    assert_eq!(engine.state().occupant_at(Position::new(2, 0)), None);
    assert_eq!(engine.state().unit_count(), 1);
    assert_eq!(logged(&engine, "game:unitRemoved"), 1);

    engine.apply_reload_event(Position::new(2, 0));

    assert_eq!(logged(&engine, "game:unitReloaded"), 0);
    assert_eq!(engine.state().unit_count(), 1);
}

#[test]
fn attack_on_an_empty_tile_is_ignored() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0)).with_health(10)],
    );

    engine.apply_attack_event(Position::new(4, 4), Position::new(3, 3), 7);

    assert_eq!(engine.state().unit(ids[0]).unwrap().health().value(), 10);
    assert_eq!(logged(&engine, "game:unitDamaged"), 0);
}

#[test]
fn departed_attacker_still_lands_its_damage() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::new(1, 1), Team(1)).with_health(10)],
    );

    engine.apply_attack_event(Position::ORIGIN, Position::new(1, 1), 4);

    assert_eq!(engine.state().unit(ids[0]).unwrap().health().value(), 6);
}

#[test]
fn reload_event_refills_whoever_stands_on_the_tile() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::new(3, 1), Team(0)).with_ammo(4)],
    );
    engine.apply_attack_event(Position::new(3, 1), Position::new(0, 0), 1);
    assert_eq!(engine.state().unit(ids[0]).unwrap().ammo().value(), 3);

    engine.apply_reload_event(Position::new(3, 1));

    assert_eq!(engine.state().unit(ids[0]).unwrap().ammo().value(), 4);
    assert_eq!(logged(&engine, "game:unitReloaded"), 1);
}

#[test]
fn losing_the_selected_unit_drops_selection_and_mode() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)).with_health(3),
            UnitSpec::new(Position::new(2, 0), Team(1)),
        ],
    );
    engine.select_unit(ids[0]).unwrap();
    assert_eq!(engine.mode(), ModeKind::Move);

    engine.apply_attack_event(Position::new(2, 0), Position::ORIGIN, 3);

    assert_eq!(engine.selected(), None);
    assert_eq!(engine.mode(), ModeKind::None);
    assert!(engine.movement_range().is_empty());
}

#[test]
fn next_turn_refills_only_stale_units() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)).with_ap(8),
            UnitSpec::new(Position::new(4, 4), Team(1))
                .with_ap(8)
                .with_last_turn(1),
        ],
    );
    engine.select_unit(ids[0]).unwrap();
    engine.switch_mode(ModeKind::None).unwrap();
    engine.switch_mode(ModeKind::Reload).unwrap();
    engine.confirm().unwrap();
    assert_eq!(engine.state().unit(ids[0]).unwrap().ap().value(), 7);

    assert_eq!(engine.next_turn().unwrap(), 1);

    assert_eq!(engine.state().unit(ids[0]).unwrap().ap().value(), 8);
    assert_eq!(engine.state().unit(ids[1]).unwrap().last_turn(), 1);
    assert_eq!(logged(&engine, "game:turnAdvanced"), 1);
}

#[test]
fn selection_events_arrive_in_publish_order() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine
        .bus_mut()
        .subscribe_all(move |kind, _| sink.borrow_mut().push(kind.to_string()));

    engine.select_unit(ids[0]).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            "game:unitSelected",
            "game:movementRangeShown",
            "game:modeChanged"
        ]
    );
}

#[test]
fn typed_subscribers_only_see_their_kind() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    engine
        .bus_mut()
        .subscribe(GameEventKind::ModeChanged, move |event| {
            sink.borrow_mut().push(event.clone())
        });

    engine.select_unit(ids[0]).unwrap();
    engine.cancel().unwrap();

    assert_eq!(changes.borrow().len(), 2);
}

#[test]
fn dispatched_ui_commands_are_logged_then_applied() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[UnitSpec::new(Position::ORIGIN, Team(0))],
    );

    engine
        .dispatch(Event::from(UiEvent::SelectUnit { unit: ids[0] }))
        .unwrap();

    assert_eq!(engine.mode(), ModeKind::Move);
    assert_eq!(logged_kinds(&engine)[0], "ui:selectUnit");
    let json = engine.activity().to_json().unwrap();
    assert!(json.contains("unitSelected"));
}

#[test]
fn dispatched_target_cycling_accepts_any_step() {
    let (mut engine, ids) = setup(
        OPEN_5X5,
        GameConfig::new(),
        &[
            UnitSpec::new(Position::ORIGIN, Team(0)),
            UnitSpec::new(Position::new(2, 0), Team(1)),
            UnitSpec::new(Position::new(4, 0), Team(1)),
        ],
    );
    engine.select_unit(ids[0]).unwrap();
    engine.switch_mode(ModeKind::Shoot).unwrap();
    engine.cycle_target(1).unwrap();

    engine
        .dispatch(Event::from(UiEvent::CycleTarget { step: i32::MAX }))
        .unwrap();
    assert_eq!(engine.current_target(), Some(ids[1]));

    engine
        .dispatch(Event::from(UiEvent::CycleTarget { step: i32::MIN }))
        .unwrap();
    assert_eq!(engine.current_target(), Some(ids[1]));
}
