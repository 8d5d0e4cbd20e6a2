//! Static per-species constants.

use super::rules::EvolutionRule;
use crate::config::EngineConfig;

/// Species identifier, e.g. `"Agumon"`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeciesId(String);

impl SpeciesId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SpeciesId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpeciesId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Battle attribute. A species without one is stored as `None`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Attribute {
    Vaccine,
    Virus,
    Data,
    Free,
}

/// Growth stage.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    Digitama,
    BabyI,
    BabyII,
    Child,
    Adult,
    Perfect,
    Ultimate,
    SuperUltimate,
    /// Grave form shown after death.
    Ohakadamon,
}

/// Gate that must clear before any evolution rule is considered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionCriteria {
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_to_evolve_secs: Option<u64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_battles: Option<u32>,
    /// Minimum win ratio in percent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_win_ratio: Option<u32>,
}

/// Immutable species definition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeciesDef {
    pub id: SpeciesId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    pub stage: Stage,
    /// Minutes per fullness decrement. Zero disables hunger.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hunger_cycle_minutes: u32,
    /// Minutes per strength decrement. Zero disables strength decay.
    #[cfg_attr(feature = "serde", serde(default))]
    pub strength_cycle_minutes: u32,
    /// Minutes per waste pile. Zero disables waste.
    #[cfg_attr(feature = "serde", serde(default))]
    pub waste_cycle_minutes: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_overfeed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_energy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_weight: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute: Option<Attribute>,
    /// Medicine doses needed to cure one injury.
    #[cfg_attr(feature = "serde", serde(default = "default_heal_doses"))]
    pub heal_doses: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub evolution_criteria: Option<EvolutionCriteria>,
    /// Ordered by priority; the first satisfied rule wins.
    #[cfg_attr(feature = "serde", serde(default))]
    pub evolutions: Vec<EvolutionRule>,
}

#[cfg(feature = "serde")]
fn default_heal_doses() -> u32 {
    1
}

impl SpeciesDef {
    /// Creates a definition with every tunable zeroed and no evolutions.
    pub fn new(id: impl Into<String>, stage: Stage) -> Self {
        Self {
            id: SpeciesId::new(id),
            name: None,
            stage,
            hunger_cycle_minutes: 0,
            strength_cycle_minutes: 0,
            waste_cycle_minutes: 0,
            max_overfeed: 0,
            base_power: 0,
            max_energy: 0,
            min_weight: 0,
            attribute: None,
            heal_doses: 1,
            evolution_criteria: None,
            evolutions: Vec::new(),
        }
    }

    /// Upper bound for fullness and strength.
    pub fn meter_cap(&self) -> u32 {
        EngineConfig::BASE_METER_CAP + self.max_overfeed
    }

    pub fn hunger_cycle_secs(&self) -> i64 {
        i64::from(self.hunger_cycle_minutes) * 60
    }

    pub fn strength_cycle_secs(&self) -> i64 {
        i64::from(self.strength_cycle_minutes) * 60
    }

    pub fn waste_cycle_secs(&self) -> i64 {
        i64::from(self.waste_cycle_minutes) * 60
    }

    pub fn time_to_evolve_secs(&self) -> Option<u64> {
        self.evolution_criteria
            .as_ref()
            .and_then(|criteria| criteria.time_to_evolve_secs)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn is_terminal(&self) -> bool {
        self.evolutions.is_empty()
    }
}
