use crate::error::{ErrorSeverity, GameError};

use super::{Position, UnitId};

/// Errors raised by grid placement, occupancy and layout operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GridError {
    #[error("position {position} is out of bounds")]
    OutOfBounds { position: Position },

    #[error("tile at {position} is occupied by unit {occupant}")]
    Occupied {
        position: Position,
        occupant: UnitId,
    },

    #[error("tile at {position} is unwalkable")]
    Unwalkable { position: Position },

    #[error("unit {0} not found")]
    UnitNotFound(UnitId),

    #[error("occupancy desync for unit {unit} at {position}")]
    OccupancyDesync { unit: UnitId, position: Position },

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("malformed layout at row {row}: {reason}")]
    MalformedLayout { row: usize, reason: &'static str },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } | Self::Occupied { .. } | Self::Unwalkable { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::UnitNotFound(_)
            | Self::InvalidDimensions { .. }
            | Self::MalformedLayout { .. } => ErrorSeverity::Validation,
            Self::OccupancyDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            Self::Occupied { .. } => "GRID_OCCUPIED",
            Self::Unwalkable { .. } => "GRID_UNWALKABLE",
            Self::UnitNotFound(_) => "GRID_UNIT_NOT_FOUND",
            Self::OccupancyDesync { .. } => "GRID_OCCUPANCY_DESYNC",
            Self::InvalidDimensions { .. } => "GRID_INVALID_DIMENSIONS",
            Self::MalformedLayout { .. } => "GRID_MALFORMED_LAYOUT",
        }
    }
}
