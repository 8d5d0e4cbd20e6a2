//! Effects of a finished battle on the creature that fought it.

use super::result::{BattleOutcome, Side};
use super::rolls::RollSource;
use crate::care::ActionError;
use crate::config::EngineConfig;
use crate::snapshot::{EpochMs, StatSnapshot};

/// Why the battle was fought. Only recorded battles count toward evolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BattleKind {
    /// Sparring. No record, no injury.
    Practice,
    Ranked,
    Quest,
}

impl BattleKind {
    pub const fn is_recorded(self) -> bool {
        !matches!(self, Self::Practice)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleResult {
    Win,
    Loss,
    Draw,
}

impl BattleResult {
    /// Result from the point of view of `side`.
    pub fn for_side(outcome: &BattleOutcome, side: Side) -> Self {
        match outcome.winner {
            Some(winner) if winner == side => Self::Win,
            Some(_) => Self::Loss,
            None => Self::Draw,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleAftermath {
    pub snapshot: StatSnapshot,
    pub injured: bool,
    /// Injury chance (%) that was rolled against, if a roll happened.
    pub injury_chance: Option<u32>,
}

/// Charges the battle's cost and records its result.
///
/// Every battle costs weight and energy. Recorded battles also update the
/// per-form and lifetime counters and roll for injury; a draw records nothing.
pub fn apply_battle_result(
    snapshot: &StatSnapshot,
    result: BattleResult,
    kind: BattleKind,
    rolls: &mut impl RollSource,
    now: EpochMs,
    config: &EngineConfig,
) -> Result<BattleAftermath, ActionError> {
    snapshot.ensure_active()?;
    if snapshot.energy == 0 {
        return Err(ActionError::NotEnoughEnergy);
    }

    let mut snap = snapshot.clone();
    snap.weight = snap.weight.saturating_sub(config.battle_weight_loss);
    snap.energy = snap.energy.saturating_sub(config.battle_energy_cost);

    let won = match result {
        BattleResult::Win => true,
        BattleResult::Loss => false,
        BattleResult::Draw => {
            return Ok(BattleAftermath {
                snapshot: snap,
                injured: false,
                injury_chance: None,
            });
        }
    };
    if !kind.is_recorded() {
        return Ok(BattleAftermath {
            snapshot: snap,
            injured: false,
            injury_chance: None,
        });
    }

    if won {
        snap.battles_won_this_form = snap.battles_won_this_form.saturating_add(1);
        snap.total_battles_won = snap.total_battles_won.saturating_add(1);
    } else {
        snap.battles_lost_this_form = snap.battles_lost_this_form.saturating_add(1);
        snap.total_battles_lost = snap.total_battles_lost.saturating_add(1);
    }

    let chance = config.injury_chance(won, snap.protein_overdose_count);
    let injured = rolls.chance(chance);
    if injured {
        snap.injure(now);
    }

    Ok(BattleAftermath {
        snapshot: snap,
        injured,
        injury_chance: Some(chance),
    })
}
