//! Turn-based battle loop.

use super::hit::{attribute_bonus, hit_rate, hit_rate_formula};
use super::power::calculate_power;
use super::result::{AttackLog, AttackOutcome, BattleOutcome, Side};
use super::rolls::{FixedRolls, RollSource};
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::snapshot::StatSnapshot;
use crate::species::{Attribute, SpeciesDef};

/// One side of a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Combatant {
    pub power: u32,
    pub attribute: Option<Attribute>,
    pub display_name: String,
}

impl Combatant {
    pub fn new(display_name: impl Into<String>, power: u32, attribute: Option<Attribute>) -> Self {
        Self {
            power,
            attribute,
            display_name: display_name.into(),
        }
    }

    /// Builds a combatant from a stored creature.
    ///
    /// Dead or frozen creatures cannot fight. Out-of-range fields are clamped
    /// before power is derived.
    pub fn from_snapshot(snapshot: &StatSnapshot, species: &SpeciesDef) -> Result<Self, CoreError> {
        snapshot.ensure_active()?;
        let mut snap = snapshot.clone();
        snap.sanitize(species);
        Ok(Self::new(
            species.display_name(),
            calculate_power(&snap, species),
            species.attribute,
        ))
    }
}

/// Precomputed attack parameters for one side.
struct Attacker {
    side: Side,
    rate: f64,
    formula: String,
}

impl Attacker {
    fn new(side: Side, attacker: &Combatant, defender: &Combatant) -> Self {
        let bonus = attribute_bonus(attacker.attribute, defender.attribute);
        Self {
            side,
            rate: hit_rate(attacker.power, defender.power, bonus),
            formula: hit_rate_formula(attacker.power, defender.power, bonus),
        }
    }

    fn attack(&self, round: u32, rolls: &mut impl RollSource) -> AttackLog {
        let roll = rolls.roll();
        let outcome = if roll < self.rate {
            AttackOutcome::Hit
        } else {
            AttackOutcome::Miss
        };
        AttackLog {
            round,
            attacker: self.side,
            outcome,
            roll,
            hit_rate: self.rate,
            formula: self.formula.clone(),
        }
    }
}

/// Fights `a` against `b` until one side lands `config.hits_to_win` hits.
///
/// Each round `a` attacks first; `b` only answers if `a` has not just won.
/// The loop stops after `config.max_battle_rounds` rounds; with both hit
/// rates above zero that cap is practically unreachable, and reaching it
/// yields a draw.
pub fn simulate(
    a: &Combatant,
    b: &Combatant,
    rolls: &mut impl RollSource,
    config: &EngineConfig,
) -> BattleOutcome {
    let attackers = [Attacker::new(Side::A, a, b), Attacker::new(Side::B, b, a)];
    let mut hits = [0u32; 2];
    let mut log = Vec::new();
    let mut winner = None;
    let mut rounds = 0;

    'battle: for round in 1..=config.max_battle_rounds {
        rounds = round;
        for (index, attacker) in attackers.iter().enumerate() {
            let entry = attacker.attack(round, rolls);
            if entry.is_hit() {
                hits[index] += 1;
            }
            log.push(entry);
            if hits[index] >= config.hits_to_win {
                winner = Some(attacker.side);
                break 'battle;
            }
        }
    }

    BattleOutcome {
        winner,
        rounds,
        hits_a: hits[0],
        hits_b: hits[1],
        log,
    }
}

/// Re-runs a recorded battle from its own rolls and checks it reproduces.
pub fn replay(a: &Combatant, b: &Combatant, recorded: &BattleOutcome, config: &EngineConfig) -> bool {
    let mut rolls = FixedRolls::new(recorded.rolls());
    let rerun = simulate(a, b, &mut rolls, config);
    rolls.consumed() == recorded.log.len() && rerun == *recorded
}
