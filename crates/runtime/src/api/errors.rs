//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from repositories, content loading and the engine so
//! hosts can bubble them up with consistent context.
use thiserror::Error;
use vpet_core::{ActionError, CoreError, ErrorSeverity, GameError};

pub use crate::repository::{CreatureId, InvalidCreatureId, RepositoryError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no creature named {0}")]
    CreatureNotFound(CreatureId),

    #[error("a creature named {0} already exists")]
    AlreadyExists(CreatureId),

    #[error(transparent)]
    InvalidId(#[from] InvalidCreatureId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error("failed to load content")]
    Content(#[source] anyhow::Error),

    #[error("storage task failed")]
    Storage(#[from] tokio::task::JoinError),
}

impl RuntimeError {
    /// Engine severity when the error came from the engine.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Core(err) => err.severity(),
            Self::Action(err) => err.severity(),
            Self::CreatureNotFound(_) | Self::AlreadyExists(_) | Self::InvalidId(_) => {
                ErrorSeverity::Validation
            }
            Self::Repository(_) | Self::Content(_) | Self::Storage(_) => ErrorSeverity::Fatal,
        }
    }
}
