//! Pointer and keyboard input for the interaction engine.
//!
//! Hosts translate their native events into [`PointerState`] snapshots and
//! [`Key`] presses. The engine only ever sees these types, so it stays
//! agnostic about the windowing or terminal library in front of it.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use tactics_core::{Direction, Position};

use crate::modes::{EditTool, ModeKind};

bitflags! {
    /// Set of pointer buttons held during a tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Buttons: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

/// Pointer snapshot delivered once per input tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerState {
    /// Grid cell under the pointer. May lie outside the grid.
    pub position: Position,
    /// Buttons currently held.
    pub buttons: Buttons,
}

impl PointerState {
    pub fn hover(position: Position) -> Self {
        Self {
            position,
            buttons: Buttons::empty(),
        }
    }

    pub fn pressed(position: Position, buttons: Buttons) -> Self {
        Self { position, buttons }
    }
}

/// Keys the engine understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Key {
    Enter,
    Escape,
    Tab,
    BackTab,
    Char(char),
}

/// High-level outcome of processing a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// Request a mode switch.
    Switch(ModeKind),
    /// Commit the active mode's scratch state.
    Confirm,
    /// Return to the idle mode.
    Cancel,
    /// Step through the active target list.
    CycleTarget(i32),
    /// Pick the map editor tool.
    SelectTool(EditTool),
    /// Pick the cover edge the editor toggles.
    SelectEdge(Direction),
    /// Advance to the next turn.
    EndTurn,
    /// No meaningful command was produced.
    None,
}

/// Translates key presses into engine commands.
///
/// Bindings depend on the active mode: the editor reuses the movement keys
/// to choose which cover edge to toggle.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: Key, mode: ModeKind) -> KeyAction {
        match key {
            Key::Enter => KeyAction::Confirm,
            Key::Escape => KeyAction::Cancel,
            Key::Tab => KeyAction::CycleTarget(1),
            Key::BackTab => KeyAction::CycleTarget(-1),
            Key::Char(ch) => self.handle_char(ch, mode),
        }
    }

    fn handle_char(&self, raw: char, mode: ModeKind) -> KeyAction {
        let ch = raw.to_ascii_lowercase();
        if mode == ModeKind::Edit
            && let Some(action) = Self::edit_binding(ch)
        {
            return action;
        }

        match ch {
            'm' => KeyAction::Switch(ModeKind::Move),
            'f' => KeyAction::Switch(ModeKind::Shoot),
            'r' => KeyAction::Switch(ModeKind::Reload),
            'g' => KeyAction::Switch(ModeKind::Grenade),
            'e' => KeyAction::Switch(ModeKind::Edit),
            'n' => KeyAction::EndTurn,
            ' ' => KeyAction::Confirm,
            _ => KeyAction::None,
        }
    }

    fn edit_binding(ch: char) -> Option<KeyAction> {
        let action = match ch {
            '1' => KeyAction::SelectTool(EditTool::Obstacle),
            '2' => KeyAction::SelectTool(EditTool::Cover),
            '3' => KeyAction::SelectTool(EditTool::Erase),
            'h' => KeyAction::SelectEdge(Direction::Left),
            'j' => KeyAction::SelectEdge(Direction::Down),
            'k' => KeyAction::SelectEdge(Direction::Up),
            'l' => KeyAction::SelectEdge(Direction::Right),
            _ => return None,
        };
        Some(action)
    }
}
