use serde::{Deserialize, Serialize};
use tactics_core::{Cover, Direction, Position, TileKind};

use crate::context::EngineContext;
use crate::error::RuntimeError;
use crate::events::GameEvent;
use crate::input::{Buttons, PointerState};

use super::{CommitOutcome, ModeBehavior, ModeKind, Transition};

/// Map editor brushes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EditTool {
    /// Toggles between empty ground and an obstacle.
    #[default]
    Obstacle,
    /// Toggles full cover on the selected edge.
    Cover,
    /// Resets terrain to empty ground.
    Erase,
}

impl EditTool {
    /// Terrain produced by applying this tool to `current`.
    pub fn apply(self, current: TileKind, edge: Direction) -> TileKind {
        match self {
            EditTool::Obstacle => match current {
                TileKind::Unwalkable => TileKind::Empty,
                _ => TileKind::Unwalkable,
            },
            EditTool::Cover => {
                let mut cover = match current {
                    TileKind::Cover(cover) => cover,
                    _ => Cover::NONE,
                };
                cover.toggle(edge);
                if cover.is_empty() {
                    TileKind::Empty
                } else {
                    TileKind::Cover(cover)
                }
            }
            EditTool::Erase => TileKind::Empty,
        }
    }
}

/// Map authoring. Sticky: stays active across edits until cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditMode {
    tool: EditTool,
    edge: Direction,
    pending: Option<Position>,
}

impl Default for EditMode {
    fn default() -> Self {
        Self {
            tool: EditTool::default(),
            edge: Direction::Up,
            pending: None,
        }
    }
}

impl EditMode {
    pub fn tool(&self) -> EditTool {
        self.tool
    }

    pub fn edge(&self) -> Direction {
        self.edge
    }

    pub fn set_tool(&mut self, tool: EditTool) {
        self.tool = tool;
    }

    pub fn set_edge(&mut self, edge: Direction) {
        self.edge = edge;
    }
}

impl ModeBehavior for EditMode {
    fn connect(&mut self, ctx: &mut EngineContext) -> Result<Transition, RuntimeError> {
        if !ctx.config().editor_enabled {
            return Err(RuntimeError::illegal(
                ModeKind::Edit,
                "map editor is disabled",
            ));
        }
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
        if pressed.contains(Buttons::PRIMARY) && ctx.state().grid().contains(pointer.position) {
            self.pending = Some(pointer.position);
            return Transition::Commit;
        }
        Transition::Stay
    }

    fn perform_action(&mut self, ctx: &mut EngineContext) -> Result<CommitOutcome, RuntimeError> {
        let Some(position) = self.pending.take() else {
            return Ok(CommitOutcome::rejected("no tile chosen"));
        };
        let Some(tile) = ctx.state().grid().cell(position) else {
            return Ok(CommitOutcome::rejected("tile is outside the grid"));
        };

        let kind = self.tool.apply(tile.kind, self.edge);
        if let Err(error) = ctx.state.set_terrain(position, kind) {
            return Ok(CommitOutcome::rejected(error.to_string()));
        }

        tracing::debug!(%position, tool = %self.tool, "tile edited");
        ctx.emit(GameEvent::TileEdited { position, kind });
        Ok(CommitOutcome::Completed)
    }

    fn disconnect(&mut self) {
        self.pending = None;
    }
}
