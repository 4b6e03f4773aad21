//! Scripted walkthrough of one turn on the skirmish map.

use anyhow::{Result, bail};
use tactics_core::{Position, UnitId};
use tactics_runtime::{Buttons, CommitOutcome, Engine, Event, ModeKind, PointerState};

use crate::chain::ChainHandle;
use crate::scenario::{Roster, render};

/// Drives the engine through move, shoot, reload, grenade and end of turn.
pub async fn run(engine: &mut Engine, roster: &Roster, chain: &mut ChainHandle) -> Result<()> {
    println!("{}\n", render(engine.state()));

    tracing::info!("rifleman advances");
    click(engine, Position::new(0, 0))?;
    hover(engine, Position::new(3, 2))?;
    click(engine, Position::new(3, 2))?;

    tracing::info!("rifleman fires on the raider");
    fire(engine, chain, roster.raider).await?;

    tracing::info!("rifleman reloads");
    engine.switch_mode(ModeKind::Reload)?;
    engine.confirm()?;

    tracing::info!("grenadier strips the cover");
    engine.select_unit(roster.grenadier)?;
    engine.switch_mode(ModeKind::Grenade)?;
    hover(engine, Position::new(2, 1))?;
    click(engine, Position::new(2, 1))?;

    tracing::info!("grenadier finishes the raider");
    fire(engine, chain, roster.raider).await?;

    tracing::info!("rifleman tries to fire without AP");
    engine.select_unit(roster.rifleman)?;
    engine.switch_mode(ModeKind::Shoot)?;
    if let CommitOutcome::Rejected { reason } = engine.confirm()? {
        tracing::info!(%reason, "shot refused");
    }
    engine.cancel()?;

    let turn = engine.next_turn()?;
    tracing::info!(turn, "turn over");

    println!("{}\n", render(engine.state()));
    Ok(())
}

/// Enters Shoot mode for the selected unit, aims at `target` and waits for
/// the chain to settle the attack.
async fn fire(engine: &mut Engine, chain: &mut ChainHandle, target: UnitId) -> Result<()> {
    engine.switch_mode(ModeKind::Shoot)?;
    for _ in 0..engine.targets().len() {
        if engine.current_target() == Some(target) {
            break;
        }
        engine.cycle_target(1)?;
    }
    if engine.current_target() != Some(target) {
        bail!("{target} is not a valid target");
    }

    match engine.confirm()? {
        CommitOutcome::Pending { .. } => settle(engine, chain).await,
        CommitOutcome::Rejected { reason } => {
            tracing::info!(%reason, "shot refused");
            engine.cancel()?;
            Ok(())
        }
        CommitOutcome::Completed | CommitOutcome::Noop => Ok(()),
    }
}

/// Feeds chain outcomes back until the busy latch clears.
async fn settle(engine: &mut Engine, chain: &mut ChainHandle) -> Result<()> {
    while engine.is_busy() {
        let Some(outcome) = chain.next_outcome().await else {
            bail!("chain closed with a commit in flight");
        };
        engine.dispatch(Event::Chain(outcome))?;
    }
    Ok(())
}

fn hover(engine: &mut Engine, position: Position) -> Result<()> {
    engine.input(PointerState::hover(position))?;
    Ok(())
}

fn click(engine: &mut Engine, position: Position) -> Result<()> {
    engine.input(PointerState::hover(position))?;
    engine.input(PointerState::pressed(position, Buttons::PRIMARY))?;
    Ok(())
}
