//! The persisted creature record.
//!
//! [`StatSnapshot`] is the only mutable entity in the engine. Every engine
//! entry point takes one by reference and returns a new one; the host persists
//! whatever comes back. Field names serialize in camelCase.

mod builder;
mod sanitize;

pub use builder::SnapshotBuilder;
pub use sanitize::SanitizeReport;

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::species::SpeciesId;

/// Milliseconds since the Unix epoch.
pub type EpochMs = i64;

/// Why a creature died.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DeathReason {
    /// Fullness sat at zero for the whole starvation window.
    Starvation,
    /// Strength sat at zero for the whole exhaustion window.
    Exhaustion,
    /// Too many injuries in one form.
    InjuryOverload,
    /// An injury went untreated for too long.
    InjuryNeglect,
}

/// One "please attend to me" timer.
///
/// - idle: `active == false`, `started_at == None`
/// - armed: `active == true`, `started_at == Some(..)`
/// - expired: `active == false`, `started_at == Some(..)`; already penalized,
///   waits for its condition to clear before it can arm again
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CallChannel {
    pub active: bool,
    pub started_at_epoch_ms: Option<EpochMs>,
}

impl CallChannel {
    pub const IDLE: Self = Self {
        active: false,
        started_at_epoch_ms: None,
    };

    pub fn armed_at(at: EpochMs) -> Self {
        Self {
            active: true,
            started_at_epoch_ms: Some(at),
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.active && self.started_at_epoch_ms.is_none()
    }

    pub fn is_expired(&self) -> bool {
        !self.active && self.started_at_epoch_ms.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallStatus {
    pub hunger: CallChannel,
    pub strength: CallChannel,
    pub sleep: CallChannel,
}

impl CallStatus {
    pub fn any_active(&self) -> bool {
        self.hunger.active || self.strength.active || self.sleep.active
    }
}

/// A creature's current condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct StatSnapshot {
    pub species_id: SpeciesId,

    // meters
    pub fullness: u32,
    pub strength: u32,
    pub weight: u32,
    pub energy: u32,
    pub effort: u32,
    /// Whole days, one per local midnight crossed.
    pub age: u32,

    // clocks
    pub lifespan_seconds: u64,
    pub time_to_evolve_seconds: u64,
    pub hunger_countdown_seconds: i64,
    pub strength_countdown_seconds: i64,
    pub waste_countdown_seconds: i64,

    pub waste_count: u32,
    /// When waste last reached the cap, advanced by each neglect penalty.
    pub waste_full_since_epoch_ms: Option<EpochMs>,
    pub overfeed_count: u32,
    pub consecutive_overfeed_streak: u32,
    pub protein_overdose_count: u32,
    /// Proteins eaten in this form.
    pub protein_fed: u32,

    // per-form counters
    pub trainings: u32,
    pub care_mistakes: u32,
    pub sleep_disturbances: u32,
    pub battles_won_this_form: u32,
    pub battles_lost_this_form: u32,

    // lifetime counters
    pub total_battles_won: u32,
    pub total_battles_lost: u32,
    pub total_reincarnations: u32,

    pub is_dead: bool,
    pub death_reason: Option<DeathReason>,
    pub is_injured: bool,
    pub injured_at_epoch_ms: Option<EpochMs>,
    pub injury_count: u32,
    /// Medicine doses given toward the current injury.
    pub heal_doses_given: u32,

    pub last_hunger_zero_at_epoch_ms: Option<EpochMs>,
    pub last_strength_zero_at_epoch_ms: Option<EpochMs>,
    /// `None` when the stored value was missing or unparseable.
    pub last_checkpoint_epoch_ms: Option<EpochMs>,

    pub call_status: CallStatus,

    pub is_frozen: bool,
    pub frozen_at_epoch_ms: Option<EpochMs>,
}

impl StatSnapshot {
    pub fn battles_this_form(&self) -> u32 {
        self.battles_won_this_form
            .saturating_add(self.battles_lost_this_form)
    }

    /// Whole-percent win ratio in this form; `None` before the first battle.
    pub fn win_ratio(&self) -> Option<u32> {
        let battles = u64::from(self.battles_this_form());
        if battles == 0 {
            return None;
        }
        let won = u64::from(self.battles_won_this_form);
        Some((won * 100 / battles) as u32)
    }

    pub fn ensure_alive(&self) -> Result<(), CoreError> {
        if self.is_dead {
            Err(CoreError::CreatureDeceased)
        } else {
            Ok(())
        }
    }

    /// Alive and not frozen.
    pub fn ensure_active(&self) -> Result<(), CoreError> {
        self.ensure_alive()?;
        if self.is_frozen {
            Err(CoreError::CreatureFrozen)
        } else {
            Ok(())
        }
    }

    /// Marks the creature dead. The first reason recorded is kept.
    pub(crate) fn kill(&mut self, reason: DeathReason) {
        if self.is_dead {
            return;
        }
        self.is_dead = true;
        self.death_reason = Some(reason);
        self.call_status = CallStatus::default();
    }

    /// Records a new injury at `at`.
    pub(crate) fn injure(&mut self, at: EpochMs) {
        self.is_injured = true;
        self.injured_at_epoch_ms = Some(at);
        self.injury_count = self.injury_count.saturating_add(1);
        self.heal_doses_given = 0;
    }

    pub(crate) fn restore_fullness(&mut self, cap: u32, amount: u32) {
        self.fullness = self.fullness.saturating_add(amount).min(cap);
        if self.fullness > 0 {
            self.last_hunger_zero_at_epoch_ms = None;
            self.call_status.hunger = CallChannel::IDLE;
        }
    }

    pub(crate) fn restore_strength(&mut self, cap: u32, amount: u32) {
        self.strength = self.strength.saturating_add(amount).min(cap);
        if self.strength > 0 {
            self.last_strength_zero_at_epoch_ms = None;
            self.call_status.strength = CallChannel::IDLE;
        }
    }

    pub(crate) fn add_effort(&mut self, amount: u32) {
        self.effort = self
            .effort
            .saturating_add(amount)
            .min(EngineConfig::MAX_EFFORT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::{SpeciesDef, Stage};

    fn snapshot() -> StatSnapshot {
        SnapshotBuilder::new(&SpeciesDef::new("Agumon", Stage::Child)).build()
    }

    #[test]
    fn win_ratio_is_undefined_without_battles() {
        let mut snap = snapshot();
        assert_eq!(snap.win_ratio(), None);
        snap.battles_won_this_form = 2;
        snap.battles_lost_this_form = 1;
        assert_eq!(snap.win_ratio(), Some(66));
    }

    #[test]
    fn kill_keeps_first_reason() {
        let mut snap = snapshot();
        snap.kill(DeathReason::Starvation);
        snap.kill(DeathReason::InjuryOverload);
        assert_eq!(snap.death_reason, Some(DeathReason::Starvation));
        assert_eq!(snap.ensure_alive(), Err(CoreError::CreatureDeceased));
    }

    #[test]
    fn death_reason_displays_as_wire_name() {
        assert_eq!(DeathReason::InjuryNeglect.to_string(), "INJURY_NEGLECT");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert!(json.get("lastCheckpointEpochMs").is_some());
        assert!(json.get("hungerCountdownSeconds").is_some());
        assert_eq!(json["callStatus"]["sleep"]["active"], false);
    }
}
