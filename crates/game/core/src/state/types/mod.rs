pub mod common;
pub mod grid;
pub mod tile;
pub mod turn;
pub mod unit;

// Re-export common types
pub use common::{Direction, Position, Team, UnitId};

// Re-export terrain types
pub use grid::Grid;
pub use tile::{Cover, CoverLevel, Tile, TileKind};

// Re-export turn state
pub use turn::TurnState;

// Re-export unit types
pub use unit::{DamageOutcome, ResourceError, ResourceKind, ResourceMeter, Unit, UnitSpec};
