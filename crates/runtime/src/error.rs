//! Errors surfaced by the interaction engine.

use tactics_core::{ErrorSeverity, GameError, GridError, ResourceError};

use crate::modes::ModeKind;

/// Errors returned by engine operations.
///
/// Stale chain notifications are never errors; they are logged and ignored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// An operation was requested in a mode or state that does not allow it.
    #[error("illegal in {mode} mode: {reason}")]
    IllegalState {
        mode: ModeKind,
        reason: &'static str,
    },

    /// A commit is awaiting chain resolution.
    #[error("engine is busy awaiting chain resolution")]
    Busy,

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl RuntimeError {
    pub(crate) fn illegal(mode: ModeKind, reason: &'static str) -> Self {
        Self::IllegalState { mode, reason }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IllegalState { .. } => ErrorSeverity::Validation,
            Self::Busy => ErrorSeverity::Recoverable,
            Self::Grid(error) => error.severity(),
            Self::Resource(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::IllegalState { .. } => "RUNTIME_ILLEGAL_STATE",
            Self::Busy => "RUNTIME_BUSY",
            Self::Grid(error) => error.error_code(),
            Self::Resource(error) => error.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
