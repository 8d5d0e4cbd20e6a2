//! Evolution rule shapes.
//!
//! A rule's requirement is a closed tagged union, so every shape is handled by
//! an exhaustive `match` in the interpreter.

use std::collections::BTreeMap;

use super::def::SpeciesId;

/// Snapshot-derived value a condition can test.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum ConditionField {
    CareMistakes,
    Trainings,
    OverfeedCount,
    SleepDisturbances,
    /// Wins plus losses in the current form.
    Battles,
    /// Wins as a whole percentage of battles in the current form.
    WinRatio,
    Weight,
    Strength,
    /// Derived battle power.
    Power,
}

/// Inclusive range; an absent bound is unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatRange {
    #[cfg_attr(feature = "serde", serde(default))]
    pub min: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max: Option<u32>,
}

impl StatRange {
    pub const fn between(min: u32, max: u32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub const fn at_least(min: u32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub const fn at_most(max: u32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

impl core::fmt::Display for StatRange {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => write!(f, "{min}"),
            (Some(min), Some(max)) => write!(f, "{min}..={max}"),
            (Some(min), None) => write!(f, ">= {min}"),
            (None, Some(max)) => write!(f, "<= {max}"),
            (None, None) => f.write_str("any"),
        }
    }
}

/// AND-group: every listed field must fall in its range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ConditionGroup(BTreeMap<ConditionField, StatRange>);

impl ConditionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the range for `field` (builder pattern).
    #[must_use]
    pub fn with(mut self, field: ConditionField, range: StatRange) -> Self {
        self.0.insert(field, range);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConditionField, &StatRange)> {
        self.0.iter().map(|(field, range)| (*field, range))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What a rule needs before it fires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Requirement {
    /// Passes as soon as the time gate clears.
    #[default]
    Unconditional,
    Conditions(ConditionGroup),
    /// OR between groups.
    ConditionGroups(Vec<ConditionGroup>),
    /// Two-creature partner evolution. Never passes.
    Jogress { partner: SpeciesId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionRule {
    pub target: SpeciesId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: Requirement,
}

impl EvolutionRule {
    pub fn unconditional(target: impl Into<String>) -> Self {
        Self {
            target: SpeciesId::new(target),
            requirement: Requirement::Unconditional,
        }
    }

    pub fn when(target: impl Into<String>, group: ConditionGroup) -> Self {
        Self {
            target: SpeciesId::new(target),
            requirement: Requirement::Conditions(group),
        }
    }

    pub fn when_any(target: impl Into<String>, groups: Vec<ConditionGroup>) -> Self {
        Self {
            target: SpeciesId::new(target),
            requirement: Requirement::ConditionGroups(groups),
        }
    }

    pub fn jogress(target: impl Into<String>, partner: impl Into<String>) -> Self {
        Self {
            target: SpeciesId::new(target),
            requirement: Requirement::Jogress {
                partner: SpeciesId::new(partner),
            },
        }
    }
}
