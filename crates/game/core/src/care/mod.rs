//! Caretaker actions: feeding, training, cleaning, medicine, sleep and the
//! fridge, and starting over after death.
//!
//! Actions expect a snapshot that has already been caught up with
//! [`LazyUpdateEngine`](crate::decay::LazyUpdateEngine) and return a new one.

mod feeding;
mod hygiene;
mod lifecycle;
mod training;

pub use feeding::{FeedOutcome, feed_meat, feed_protein};
pub use hygiene::{HealOutcome, clean_waste, heal};
pub use lifecycle::{disturb_sleep, freeze, reincarnate, thaw};
pub use training::{TrainingOutcome, TrainingResult, train};

use crate::error::{CoreError, ErrorSeverity, GameError};

/// Why a creature will not take something.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Refusal {
    #[strum(serialize = "protein overdose limit reached")]
    ProteinOverdose,
}

/// Errors raised by caretaker actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("creature refused: {0}")]
    Refused(Refusal),

    #[error("not enough energy")]
    NotEnoughEnergy,

    #[error("nothing to do: {0}")]
    NothingToDo(&'static str),

    #[error("creature is still alive")]
    NotDead,

    #[error("creature is already frozen")]
    AlreadyFrozen,

    #[error("creature is not frozen")]
    NotFrozen,

    #[error("training hits must be 0..=5, got {0}")]
    InvalidTrainingHits(u32),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Core(err) => err.severity(),
            Self::NotEnoughEnergy => ErrorSeverity::Recoverable,
            Self::Refused(_)
            | Self::NothingToDo(_)
            | Self::NotDead
            | Self::AlreadyFrozen
            | Self::NotFrozen
            | Self::InvalidTrainingHits(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Core(err) => err.error_code(),
            Self::Refused(_) => "REFUSED",
            Self::NotEnoughEnergy => "NOT_ENOUGH_ENERGY",
            Self::NothingToDo(_) => "NOTHING_TO_DO",
            Self::NotDead => "NOT_DEAD",
            Self::AlreadyFrozen => "ALREADY_FROZEN",
            Self::NotFrozen => "NOT_FROZEN",
            Self::InvalidTrainingHits(_) => "INVALID_TRAINING_HITS",
        }
    }
}
