//! Common error infrastructure for vpet-core.
//!
//! Engine-level failures live in [`CoreError`]. Care actions report their own
//! [`ActionError`](crate::care::ActionError) next to the actions they validate.
//! Both implement [`GameError`] so hosts can classify failures uniformly.

use crate::species::SpeciesId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the request may succeed later or after another action
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected inconsistency that needs investigation
/// - **Fatal**: the record or content table is unusable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later or after changing the creature's condition.
    ///
    /// Examples: not enough energy, creature currently frozen
    Recoverable,

    /// Invalid request, do not retry unchanged.
    ///
    /// Examples: unknown quest area, refusing food
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Content table or snapshot cannot be used at all.
    ///
    /// Examples: snapshot references a species missing from the table
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a data or logic bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all vpet-core errors.
///
/// All error enums in the crate implement this trait alongside
/// `thiserror::Error` so callers can pick a handling strategy without matching
/// on every variant.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static identifier for this error variant.
    ///
    /// Useful for metrics, logs, and asserting in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Errors raised by the engine entry points.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A species id is missing from the species table.
    ///
    /// The engine never substitutes a default species.
    #[error("unknown species id `{0}`")]
    UnknownSpecies(SpeciesId),

    /// The creature is dead; only reincarnation may touch it.
    #[error("creature is deceased")]
    CreatureDeceased,

    /// The creature is frozen; thaw it first.
    #[error("creature is frozen")]
    CreatureFrozen,

    /// Quest mode was asked for an area that does not exist.
    #[error("unknown quest area `{0}`")]
    UnknownQuestArea(String),
}

impl GameError for CoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSpecies(_) => ErrorSeverity::Fatal,
            Self::CreatureDeceased => ErrorSeverity::Validation,
            Self::CreatureFrozen => ErrorSeverity::Recoverable,
            Self::UnknownQuestArea(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpecies(_) => "UNKNOWN_SPECIES",
            Self::CreatureDeceased => "CREATURE_DECEASED",
            Self::CreatureFrozen => "CREATURE_FROZEN",
            Self::UnknownQuestArea(_) => "UNKNOWN_QUEST_AREA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_species_is_fatal() {
        let err = CoreError::UnknownSpecies(SpeciesId::new("Missingmon"));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(err.error_code(), "UNKNOWN_SPECIES");
        assert_eq!(err.to_string(), "unknown species id `Missingmon`");
    }

    #[test]
    fn frozen_is_recoverable() {
        assert!(CoreError::CreatureFrozen.severity().is_recoverable());
        assert!(!CoreError::CreatureDeceased.severity().is_internal());
    }
}
