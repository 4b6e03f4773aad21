//! The interaction engine.
//!
//! [`Engine`] owns the battlefield, the active mode and the event bus. Hosts
//! feed it pointer ticks, key presses and UI commands; the chain feeds it
//! attack and reload outcomes. Only one commit may await the chain at a
//! time: while the busy latch is set, mode switches and further commits are
//! rejected and pointer input is ignored.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use tactics_core::{
    DamageOutcome, Direction, GameConfig, GameState, GridError, MovementRange, Position, UnitId,
};

use crate::config::RuntimeConfig;
use crate::context::EngineContext;
use crate::error::{Result, RuntimeError};
use crate::events::{
    ActivityLog, ChainEvent, Event, EventBus, GameEvent, InputEvent, ObserverEvent, UiEvent,
};
use crate::input::{Buttons, InputHandler, Key, KeyAction, PointerState};
use crate::modes::{CommitOutcome, EditTool, Mode, ModeBehavior, ModeKind, Transition};

static EMPTY_RANGE: MovementRange = MovementRange::empty();

#[derive(Debug)]
pub struct Engine {
    ctx: EngineContext,
    mode: Mode,
    busy: bool,
    last_buttons: Buttons,
    keys: InputHandler,
    activity: Rc<RefCell<ActivityLog>>,
}

impl Engine {
    pub fn new(state: GameState, config: RuntimeConfig) -> Self {
        let mut ctx = EngineContext::new(state, config.game);
        let (activity, _) = ActivityLog::attach(&mut ctx.bus, config.activity_log_capacity);

        Self {
            ctx,
            mode: Mode::default(),
            busy: false,
            last_buttons: Buttons::empty(),
            keys: InputHandler::new(),
            activity,
        }
    }

    // ===== read access =====

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn state(&self) -> &GameState {
        self.ctx.state()
    }

    pub fn config(&self) -> &GameConfig {
        self.ctx.config()
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.ctx.bus
    }

    pub fn activity(&self) -> Ref<'_, ActivityLog> {
        self.activity.borrow()
    }

    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn active_mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn selected(&self) -> Option<UnitId> {
        self.ctx.selected()
    }

    /// Movement overlay for the selected unit. Empty outside Move mode.
    pub fn movement_range(&self) -> &MovementRange {
        match &self.mode {
            Mode::Move(mode) => mode.range(),
            _ => &EMPTY_RANGE,
        }
    }

    pub fn candidate_path(&self) -> Option<&[Position]> {
        match &self.mode {
            Mode::Move(mode) => mode.candidate_path(),
            _ => None,
        }
    }

    pub fn targets(&self) -> &[UnitId] {
        match &self.mode {
            Mode::Shoot(mode) => mode.targets(),
            _ => &[],
        }
    }

    pub fn current_target(&self) -> Option<UnitId> {
        match &self.mode {
            Mode::Shoot(mode) => mode.current_target(),
            _ => None,
        }
    }

    pub fn grenade_target(&self) -> Option<Position> {
        match &self.mode {
            Mode::Grenade(mode) => mode.target(),
            _ => None,
        }
    }

    pub fn blast_tiles(&self) -> &[Position] {
        match &self.mode {
            Mode::Grenade(mode) => mode.blast(),
            _ => &[],
        }
    }

    // ===== mode control =====

    /// Selects a unit and enters Move mode. Legal only from idle.
    pub fn select_unit(&mut self, id: UnitId) -> Result<()> {
        self.ensure_idle_latch()?;
        if self.mode.kind() != ModeKind::None {
            return Err(RuntimeError::illegal(
                self.mode.kind(),
                "units are selected from idle",
            ));
        }
        let position = self
            .ctx
            .state
            .unit(id)
            .map(|unit| unit.position())
            .ok_or(GridError::UnitNotFound(id))?;

        self.ctx.selected = Some(id);
        tracing::info!(unit = %id, %position, "unit selected");
        self.ctx.emit(GameEvent::UnitSelected { unit: id, position });
        self.enter(ModeKind::Move)
    }

    /// Clears the selection. Legal only from idle.
    pub fn deselect(&mut self) -> Result<()> {
        if self.mode.kind() != ModeKind::None {
            return Err(RuntimeError::illegal(
                self.mode.kind(),
                "selection is cleared from idle",
            ));
        }
        if let Some(unit) = self.ctx.selected.take() {
            self.ctx.emit(GameEvent::UnitDeselected { unit });
        }
        Ok(())
    }

    /// Requests an explicit mode switch.
    ///
    /// Rejected while busy and for transitions the mode table forbids.
    /// Switching to the active mode is a no-op.
    pub fn switch_mode(&mut self, kind: ModeKind) -> Result<()> {
        self.ensure_idle_latch()?;
        let current = self.mode.kind();
        if current == kind {
            return Ok(());
        }
        if !current.can_switch_to(kind) {
            return Err(RuntimeError::illegal(current, "transition not allowed"));
        }
        self.enter(kind)
    }

    /// Returns to idle.
    pub fn cancel(&mut self) -> Result<()> {
        self.switch_mode(ModeKind::None)
    }

    /// Feeds one pointer tick to the active mode.
    pub fn input(&mut self, pointer: PointerState) -> Result<()> {
        let pressed = pointer.buttons.difference(self.last_buttons);
        self.last_buttons = pointer.buttons;

        if self.busy {
            tracing::debug!(position = %pointer.position, "pointer input ignored while busy");
            return Ok(());
        }

        let transition = self.mode.input(&self.ctx, &pointer, pressed);
        self.apply_transition(transition)
    }

    /// Translates a key press through the key map.
    pub fn key(&mut self, key: Key) -> Result<()> {
        match self.keys.handle_key(key, self.mode.kind()) {
            KeyAction::Switch(kind) => self.switch_mode(kind),
            KeyAction::Confirm => self.confirm().map(|_| ()),
            KeyAction::Cancel => self.cancel(),
            KeyAction::CycleTarget(step) => self.cycle_target(step).map(|_| ()),
            KeyAction::SelectTool(tool) => self.set_edit_tool(tool),
            KeyAction::SelectEdge(edge) => self.set_edit_edge(edge),
            KeyAction::EndTurn => self.next_turn().map(|_| ()),
            KeyAction::None => Ok(()),
        }
    }

    /// Commits the active mode's scratch state.
    ///
    /// Completed commits return to idle unless the mode is sticky. A pending
    /// commit sets the busy latch and returns to idle. Rejected commits leave
    /// the mode active and publish `game:commitRejected`.
    pub fn confirm(&mut self) -> Result<CommitOutcome> {
        if self.busy {
            tracing::warn!(mode = %self.mode.kind(), "commit rejected while busy");
            return Err(RuntimeError::Busy);
        }

        let kind = self.mode.kind();
        let outcome = self.mode.perform_action(&mut self.ctx)?;

        match &outcome {
            CommitOutcome::Completed => {
                if !kind.is_sticky() {
                    self.enter(ModeKind::None)?;
                }
            }
            CommitOutcome::Pending { unit } => {
                self.busy = true;
                tracing::info!(mode = %kind, unit = %unit, "commit awaiting chain");
                self.ctx.emit(ObserverEvent::CommitStarted {
                    mode: kind,
                    unit: *unit,
                });
                self.enter(ModeKind::None)?;
            }
            CommitOutcome::Rejected { reason } => {
                tracing::debug!(mode = %kind, %reason, "commit rejected");
                self.ctx.emit(GameEvent::CommitRejected {
                    mode: kind,
                    reason: reason.clone(),
                });
            }
            CommitOutcome::Noop => {}
        }

        Ok(outcome)
    }

    /// Steps the Shoot target cursor with wraparound.
    pub fn cycle_target(&mut self, step: i32) -> Result<Option<UnitId>> {
        let current = self.mode.kind();
        let Mode::Shoot(mode) = &mut self.mode else {
            return Err(RuntimeError::illegal(
                current,
                "target cycling needs shoot mode",
            ));
        };

        let target = mode.cycle(step);
        if let Some(shooter) = mode.shooter() {
            self.ctx.emit(GameEvent::TargetChanged { shooter, target });
        }
        Ok(target)
    }

    pub fn set_edit_tool(&mut self, tool: EditTool) -> Result<()> {
        match &mut self.mode {
            Mode::Edit(mode) => {
                mode.set_tool(tool);
                Ok(())
            }
            other => Err(RuntimeError::illegal(other.kind(), "tools need edit mode")),
        }
    }

    pub fn set_edit_edge(&mut self, edge: Direction) -> Result<()> {
        match &mut self.mode {
            Mode::Edit(mode) => {
                mode.set_edge(edge);
                Ok(())
            }
            other => Err(RuntimeError::illegal(other.kind(), "edges need edit mode")),
        }
    }

    /// Ends the turn: returns to idle and refills AP for stale units.
    pub fn next_turn(&mut self) -> Result<u64> {
        self.ensure_idle_latch()?;
        if self.mode.kind() != ModeKind::None {
            self.enter(ModeKind::None)?;
        }

        let (turn, refreshed) = self.ctx.state.next_turn();
        tracing::info!(turn, refreshed = refreshed.len(), "turn advanced");
        self.ctx.emit(GameEvent::TurnAdvanced { turn, refreshed });
        Ok(turn)
    }

    // ===== chain notifications =====

    /// Applies a resolved attack.
    ///
    /// The shooter pays AP and one round if it still stands on `attacker`.
    /// Damage lands on whoever occupies `target`; an empty tile means the
    /// notification is stale and is ignored. Clears the busy latch.
    pub fn apply_attack_event(&mut self, attacker: Position, target: Position, damage: u32) {
        match self.ctx.state.occupant_at(attacker) {
            Some(shooter) => self.charge_attack(shooter),
            None => tracing::debug!(%attacker, "attacker no longer present, cost not charged"),
        }

        match self.ctx.state.occupant_at(target) {
            Some(victim) => self.damage(victim, target, damage),
            None => tracing::debug!(%target, "attack target no longer present, ignored"),
        }

        self.settle(true);
    }

    /// Applies a resolved reload to whoever stands on `position`.
    pub fn apply_reload_event(&mut self, position: Position) {
        let Some(unit) = self
            .ctx
            .state
            .occupant_at(position)
            .and_then(|id| self.ctx.state.unit_mut(id))
        else {
            tracing::debug!(%position, "reload target no longer present, ignored");
            return;
        };

        unit.reload();
        let (id, ammo) = (unit.id(), unit.ammo().value());
        self.ctx.emit(GameEvent::UnitReloaded { unit: id, ammo });
    }

    /// Clears the busy latch after the chain rejected a pending commit.
    pub fn apply_commit_failure(&mut self, reason: &str) {
        tracing::warn!(%reason, "pending commit failed");
        self.settle(false);
    }

    /// Publishes `event` on the bus and routes it to the matching operation.
    ///
    /// Engine-origin namespaces (`game`, `observer`) are only published.
    pub fn dispatch(&mut self, event: Event) -> Result<()> {
        self.ctx.bus.publish(&event);

        match event {
            Event::Input(InputEvent::Pointer(pointer)) => self.input(pointer),
            Event::Input(InputEvent::Key(key)) => self.key(key),
            Event::Ui(command) => self.handle_ui(command),
            Event::Chain(notification) => {
                self.handle_chain(notification);
                Ok(())
            }
            Event::Game(_) | Event::Observer(_) => Ok(()),
        }
    }

    fn handle_ui(&mut self, command: UiEvent) -> Result<()> {
        match command {
            UiEvent::SwitchMode { mode } => self.switch_mode(mode),
            UiEvent::SelectUnit { unit } => self.select_unit(unit),
            UiEvent::Confirm => self.confirm().map(|_| ()),
            UiEvent::Cancel => self.cancel(),
            UiEvent::CycleTarget { step } => self.cycle_target(step).map(|_| ()),
            UiEvent::SetEditTool { tool, edge } => {
                self.set_edit_tool(tool)?;
                self.set_edit_edge(edge)
            }
            UiEvent::EndTurn => self.next_turn().map(|_| ()),
        }
    }

    fn handle_chain(&mut self, notification: ChainEvent) {
        match notification {
            ChainEvent::AttackResolved {
                attacker,
                target,
                damage,
            } => self.apply_attack_event(attacker, target, damage),
            ChainEvent::ReloadResolved { position } => self.apply_reload_event(position),
            ChainEvent::CommitFailed { reason } => self.apply_commit_failure(&reason),
        }
    }

    // ===== internals =====

    fn ensure_idle_latch(&self) -> Result<()> {
        if self.busy {
            tracing::warn!(mode = %self.mode.kind(), "request rejected while busy");
            return Err(RuntimeError::Busy);
        }
        Ok(())
    }

    /// Connects a fresh `kind` instance and, on success, swaps it in.
    ///
    /// A failed connect discards the new instance and leaves the current
    /// mode untouched.
    fn enter(&mut self, kind: ModeKind) -> Result<()> {
        let from = self.mode.kind();
        let mut next = Mode::new(kind);
        let transition = next.connect(&mut self.ctx)?;

        self.mode.disconnect();
        self.mode = next;

        tracing::info!(%from, to = %kind, "mode switched");
        self.ctx.emit(GameEvent::ModeChanged { from, to: kind });
        self.apply_transition(transition)
    }

    fn apply_transition(&mut self, transition: Transition) -> Result<()> {
        match transition {
            Transition::Stay => Ok(()),
            Transition::Switch(kind) if kind == self.mode.kind() => Ok(()),
            Transition::Switch(kind) => self.enter(kind),
            Transition::Select(id) => self.select_unit(id),
            Transition::Commit => self.confirm().map(|_| ()),
        }
    }

    fn charge_attack(&mut self, shooter: UnitId) {
        if let Some(unit) = self.ctx.state.unit_mut(shooter)
            && let Err(error) = unit.spend_ammo(1)
        {
            tracing::debug!(unit = %shooter, %error, "ammo not charged");
        }

        let cost = self.ctx.config.shoot_ap_cost;
        if let Err(error) = self.ctx.spend_ap(shooter, cost) {
            tracing::debug!(unit = %shooter, %error, "attack AP not charged");
        }
    }

    fn damage(&mut self, victim: UnitId, position: Position, amount: u32) {
        let outcome = match self.ctx.state.damage_unit(victim, amount) {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::debug!(unit = %victim, %error, "damage not applied");
                return;
            }
        };

        let remaining = match outcome {
            DamageOutcome::Survived { remaining } => remaining,
            DamageOutcome::Killed => 0,
        };
        self.ctx.emit(GameEvent::UnitDamaged {
            unit: victim,
            amount,
            remaining,
        });

        if outcome == DamageOutcome::Killed {
            tracing::info!(unit = %victim, %position, "unit removed");
            self.ctx.emit(GameEvent::UnitRemoved {
                unit: victim,
                position,
            });
            self.forget(victim);
        }
    }

    /// Drops references to a removed unit from the selection.
    fn forget(&mut self, unit: UnitId) {
        if self.ctx.selected != Some(unit) {
            return;
        }
        self.ctx.selected = None;
        self.ctx.emit(GameEvent::UnitDeselected { unit });

        if self.mode.kind().requires_selection() {
            self.mode.disconnect();
            let from = self.mode.kind();
            self.mode = Mode::default();
            self.ctx.emit(GameEvent::ModeChanged {
                from,
                to: ModeKind::None,
            });
        }
    }

    fn settle(&mut self, success: bool) {
        if !self.busy {
            return;
        }
        self.busy = false;
        tracing::info!(success, "pending commit settled");
        self.ctx.emit(ObserverEvent::CommitSettled { success });
    }
}
