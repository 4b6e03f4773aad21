use tactics_core::UnitId;

use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::events::GameEvent;
use crate::input::{Buttons, PointerState};

use super::{CommitOutcome, ModeBehavior, ModeKind, Transition};

/// Picks a target among all other units and hands the attack to the chain.
///
/// Range and line of sight are not checked here; the chain resolves the
/// attack and reports the outcome back as `sui:attackResolved`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShootMode {
    shooter: Option<UnitId>,
    targets: Vec<UnitId>,
    index: usize,
}

impl ShootMode {
    pub fn shooter(&self) -> Option<UnitId> {
        self.shooter
    }

    /// Candidate targets in unit id order.
    pub fn targets(&self) -> &[UnitId] {
        &self.targets
    }

    pub fn current_target(&self) -> Option<UnitId> {
        self.targets.get(self.index).copied()
    }

    /// Moves the cursor by `step` with wraparound.
    pub fn cycle(&mut self, step: i32) -> Option<UnitId> {
        if self.targets.is_empty() {
            return None;
        }
        let len = self.targets.len() as i64;
        self.index = (self.index as i64 + i64::from(step)).rem_euclid(len) as usize;
        self.current_target()
    }

    fn focus(&mut self, target: UnitId) -> bool {
        match self.targets.iter().position(|&id| id == target) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    pub fn is_clear(&self) -> bool {
        self.shooter.is_none() && self.targets.is_empty() && self.index == 0
    }
}

impl ModeBehavior for ShootMode {
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        let shooter = ctx.require_selected(ModeKind::Shoot)?.id();

        self.shooter = Some(shooter);
        self.targets = ctx
            .state()
            .units()
            .map(|unit| unit.id())
            .filter(|&id| id != shooter)
            .collect();
        self.index = 0;

        ctx.emit(GameEvent::TargetChanged {
            shooter,
            target: self.current_target(),
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
        if !pressed.contains(Buttons::PRIMARY) {
            return Transition::Stay;
        }

        // Clicking the focused target fires; clicking another one focuses it.
        match ctx.state().occupant_at(pointer.position) {
            Some(id) if self.current_target() == Some(id) => Transition::Commit,
            Some(id) => {
                self.focus(id);
                Transition::Stay
            }
            None => Transition::Stay,
        }
    }

    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        let Some(shooter_id) = self.shooter else {
            return Ok(CommitOutcome::rejected("no shooter"));
        };
        let Some(target_id) = self.current_target() else {
            return Ok(CommitOutcome::rejected("no target available"));
        };
        let Some(shooter) = ctx.state().unit(shooter_id) else {
            return Ok(CommitOutcome::rejected("shooter is no longer on the field"));
        };
        let Some(target) = ctx.state().unit(target_id) else {
            return Ok(CommitOutcome::rejected("target is no longer on the field"));
        };

        let cost = ctx.config().shoot_ap_cost;
        if shooter.ap().value() < cost {
            return Ok(CommitOutcome::rejected(format!(
                "shooting needs {cost} AP, {} available",
                shooter.ap().value()
            )));
        }
        if shooter.ammo().is_empty() {
            return Ok(CommitOutcome::rejected("out of ammo"));
        }

        let (from, at) = (shooter.position(), target.position());
        tracing::info!(attacker = %shooter_id, target = %target_id, "attack requested");
        ctx.emit(GameEvent::AttackRequested {
            attacker: shooter_id,
            target: target_id,
            from,
            at,
        });
        Ok(CommitOutcome::Pending { unit: shooter_id })
    }

    fn disconnect(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(targets: &[u32]) -> ShootMode {
        ShootMode {
            shooter: Some(UnitId(1)),
            targets: targets.iter().copied().map(UnitId).collect(),
            index: 0,
        }
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut mode = mode(&[2, 3, 4]);

        assert_eq!(mode.cycle(-1), Some(UnitId(4)));
        assert_eq!(mode.cycle(1), Some(UnitId(2)));
        assert_eq!(mode.cycle(1), Some(UnitId(3)));
        assert_eq!(mode.cycle(1), Some(UnitId(4)));
        assert_eq!(mode.cycle(1), Some(UnitId(2)));
    }

    #[test]
    fn cycling_by_extreme_steps_wraps_without_overflow() {
        let mut mode = mode(&[2, 3]);
        assert_eq!(mode.cycle(1), Some(UnitId(3)));

        assert_eq!(mode.cycle(i32::MAX), Some(UnitId(2)));
        assert_eq!(mode.cycle(i32::MIN), Some(UnitId(2)));
        assert_eq!(mode.cycle(1), Some(UnitId(3)));
        assert_eq!(mode.cycle(i32::MIN), Some(UnitId(3)));
    }

    #[test]
    fn cycling_an_empty_list_is_a_no_op() {
        let mut mode = mode(&[]);
        assert_eq!(mode.cycle(1), None);
        assert_eq!(mode.current_target(), None);
    }

    #[test]
    fn disconnect_clears_targets() {
        let mut mode = mode(&[2, 3]);
        mode.cycle(1);
        mode.disconnect();
        assert!(mode.is_clear());
    }
}
