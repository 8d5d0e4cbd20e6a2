//! Evolution interpreter.
//!
//! [`evaluate`] decides whether the creature may evolve and into what. It never
//! changes the snapshot; [`evolve`] builds the evolved one once the host has
//! decided to go ahead.
//!
//! Rules are walked in declared order and the first satisfied rule wins, even
//! when a later rule would also pass.

mod apply;
mod conditions;

pub use apply::evolve;

use crate::error::CoreError;
use crate::snapshot::StatSnapshot;
use crate::species::{
    ConditionField, EvolutionCriteria, EvolutionRule, Requirement, SpeciesDef, SpeciesId,
    SpeciesOracle, StatRange,
};

/// Result of [`evaluate`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvolutionVerdict {
    Ready(SpeciesId),
    NotReady { remaining_seconds: u64 },
    Blocked(Vec<BlockReason>),
}

impl EvolutionVerdict {
    pub fn ready_target(&self) -> Option<&SpeciesId> {
        match self {
            Self::Ready(target) => Some(target),
            Self::NotReady { .. } | Self::Blocked(_) => None,
        }
    }
}

/// One condition the snapshot does not meet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnmetCondition {
    pub field: ConditionField,
    /// `None` when the value is undefined, e.g. win ratio before any battle.
    pub current: Option<u32>,
    pub required: StatRange,
}

impl core::fmt::Display for UnmetCondition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.current {
            Some(current) => write!(f, "{}: {} (need {})", self.field, current, self.required),
            None => write!(f, "{}: undefined (need {})", self.field, self.required),
        }
    }
}

/// Mechanics a rule may name that this engine does not implement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnsupportedMechanic {
    Jogress { partner: SpeciesId },
}

/// Why evolution is blocked.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlockReason {
    /// The species has no evolutions.
    TerminalForm,
    /// Battle prerequisites of the current form are not met.
    Criteria(Vec<UnmetCondition>),
    /// A candidate rule failed on these conditions.
    Candidate {
        target: SpeciesId,
        unmet: Vec<UnmetCondition>,
    },
    Unsupported {
        target: SpeciesId,
        mechanic: UnsupportedMechanic,
    },
    /// The rule lists condition groups but none of them.
    NoConditionGroups { target: SpeciesId },
}

impl core::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn join(f: &mut core::fmt::Formatter<'_>, unmet: &[UnmetCondition]) -> core::fmt::Result {
            for (index, condition) in unmet.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{condition}")?;
            }
            Ok(())
        }

        match self {
            Self::TerminalForm => f.write_str("final form"),
            Self::Criteria(unmet) => {
                f.write_str("battle requirements: ")?;
                join(f, unmet)
            }
            Self::Candidate { target, unmet } => {
                write!(f, "{target}: ")?;
                join(f, unmet)
            }
            Self::Unsupported {
                target,
                mechanic: UnsupportedMechanic::Jogress { partner },
            } => write!(f, "{target}: jogress with {partner} is not supported"),
            Self::NoConditionGroups { target } => write!(f, "{target}: no condition groups"),
        }
    }
}

/// Decides the evolution for `snapshot` in its `current` form.
///
/// Fails on a dead creature or when `current` is not in `table`. The snapshot
/// is clamped before it is read.
pub fn evaluate(
    snapshot: &StatSnapshot,
    current: &SpeciesId,
    table: &impl SpeciesOracle,
) -> Result<EvolutionVerdict, CoreError> {
    snapshot.ensure_alive()?;
    let species = table.require(current)?;
    let mut snap = snapshot.clone();
    snap.sanitize(species);

    if species.time_to_evolve_secs().is_some() && snap.time_to_evolve_seconds > 0 {
        return Ok(EvolutionVerdict::NotReady {
            remaining_seconds: snap.time_to_evolve_seconds,
        });
    }

    if species.is_terminal() {
        return Ok(EvolutionVerdict::Blocked(vec![BlockReason::TerminalForm]));
    }

    if let Some(criteria) = &species.evolution_criteria {
        let unmet = unmet_criteria(criteria, &snap);
        if !unmet.is_empty() {
            return Ok(EvolutionVerdict::Blocked(vec![BlockReason::Criteria(unmet)]));
        }
    }

    let mut reasons = Vec::new();
    for rule in &species.evolutions {
        match check_rule(rule, &snap, species) {
            None => return Ok(EvolutionVerdict::Ready(rule.target.clone())),
            Some(reason) => reasons.push(reason),
        }
    }

    Ok(EvolutionVerdict::Blocked(reasons))
}

/// `None` when `rule` passes, otherwise why it does not.
fn check_rule(
    rule: &EvolutionRule,
    snap: &StatSnapshot,
    species: &SpeciesDef,
) -> Option<BlockReason> {
    let candidate = |unmet: Vec<UnmetCondition>| {
        (!unmet.is_empty()).then(|| BlockReason::Candidate {
            target: rule.target.clone(),
            unmet,
        })
    };

    match &rule.requirement {
        Requirement::Unconditional => None,
        Requirement::Conditions(group) => {
            candidate(conditions::unmet_in_group(group, snap, species))
        }
        Requirement::ConditionGroups(groups) => {
            let mut first_unmet = None;
            for group in groups {
                let unmet = conditions::unmet_in_group(group, snap, species);
                if unmet.is_empty() {
                    return None;
                }
                first_unmet.get_or_insert(unmet);
            }
            // An OR over no groups has nothing that could pass.
            Some(match first_unmet {
                Some(unmet) => BlockReason::Candidate {
                    target: rule.target.clone(),
                    unmet,
                },
                None => BlockReason::NoConditionGroups {
                    target: rule.target.clone(),
                },
            })
        }
        Requirement::Jogress { partner } => Some(BlockReason::Unsupported {
            target: rule.target.clone(),
            mechanic: UnsupportedMechanic::Jogress {
                partner: partner.clone(),
            },
        }),
    }
}

fn unmet_criteria(criteria: &EvolutionCriteria, snapshot: &StatSnapshot) -> Vec<UnmetCondition> {
    let mut unmet = Vec::new();
    if let Some(min) = criteria.min_battles {
        let battles = snapshot.battles_this_form();
        if battles < min {
            unmet.push(UnmetCondition {
                field: ConditionField::Battles,
                current: Some(battles),
                required: StatRange::at_least(min),
            });
        }
    }
    if let Some(min) = criteria.min_win_ratio {
        if !conditions::win_ratio_within(snapshot, &StatRange::at_least(min)) {
            unmet.push(UnmetCondition {
                field: ConditionField::WinRatio,
                current: snapshot.win_ratio(),
                required: StatRange::at_least(min),
            });
        }
    }
    unmet
}
