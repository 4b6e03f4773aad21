//! Deterministic battlefield model shared by the runtime and offline tools.
//!
//! `tactics-core` defines the grid of tiles with directional cover, the unit
//! table with its resource pools, turn bookkeeping, and cover-aware
//! navigation. It performs no I/O; all state mutation flows through
//! [`GameState`], and the interaction engine in `tactics-runtime` builds on
//! the types re-exported here.
pub mod config;
pub mod error;
pub mod navigation;
pub mod state;

pub use config::GameConfig;
pub use error::{ErrorSeverity, GameError};
pub use navigation::{
    MovementRange, ReachableTile, blast_area, clamp_path, reachable_tiles, trace_path,
};
pub use state::{
    Cover, CoverLevel, DamageOutcome, Direction, GameState, Grid, GridError, Position,
    ResourceError, ResourceKind, ResourceMeter, Team, Tile, TileKind, TurnState, Unit, UnitId,
    UnitSpec,
};
