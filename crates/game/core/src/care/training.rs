use super::ActionError;
use crate::config::EngineConfig;
use crate::snapshot::StatSnapshot;
use crate::species::SpeciesDef;

/// Attacks in one training session.
pub const TRAINING_ROUNDS: u32 = 5;

/// Grade of a training session by hits landed out of five.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainingResult {
    /// 0-2 hits.
    Fail,
    /// 3-4 hits.
    Success,
    /// 5 hits.
    GreatSuccess,
}

impl TrainingResult {
    pub fn from_hits(hits: u32) -> Self {
        match hits {
            0..=2 => Self::Fail,
            3..=4 => Self::Success,
            _ => Self::GreatSuccess,
        }
    }

    fn weight_loss(self) -> u32 {
        match self {
            Self::Fail | Self::Success => 2,
            Self::GreatSuccess => 4,
        }
    }

    fn strength_gain(self) -> u32 {
        match self {
            Self::Fail => 0,
            Self::Success => 1,
            Self::GreatSuccess => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingOutcome {
    pub snapshot: StatSnapshot,
    pub result: TrainingResult,
    pub effort_gained: bool,
}

/// One training session with `hits` successful attacks out of five.
///
/// Every session costs one energy and counts toward effort, successful or not.
pub fn train(
    snapshot: &StatSnapshot,
    species: &SpeciesDef,
    hits: u32,
) -> Result<TrainingOutcome, ActionError> {
    snapshot.ensure_active()?;
    if hits > TRAINING_ROUNDS {
        return Err(ActionError::InvalidTrainingHits(hits));
    }
    if snapshot.energy == 0 {
        return Err(ActionError::NotEnoughEnergy);
    }

    let mut snap = snapshot.clone();
    snap.sanitize(species);
    let result = TrainingResult::from_hits(hits);

    snap.energy -= 1;
    snap.weight = snap.weight.saturating_sub(result.weight_loss());
    let gain = result.strength_gain();
    if gain > 0 {
        snap.restore_strength(species.meter_cap(), gain);
    }

    snap.trainings = snap.trainings.saturating_add(1);
    let effort_gained = snap.trainings % EngineConfig::TRAININGS_PER_EFFORT == 0
        && snap.effort < EngineConfig::MAX_EFFORT;
    if effort_gained {
        snap.add_effort(1);
    }

    Ok(TrainingOutcome {
        snapshot: snap,
        result,
        effort_gained,
    })
}
