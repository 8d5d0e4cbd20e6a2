//! Battle result types.

use sha2::{Digest, Sha256};

/// Which combatant acted. `A` always attacks first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    const fn tag(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Outcome of an attack attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackOutcome {
    Miss,
    Hit,
}

/// One attack in the battle log.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AttackLog {
    pub round: u32,
    pub attacker: Side,
    pub outcome: AttackOutcome,
    /// Roll in `[0, 100)`; the attack hits iff `roll < hit_rate`.
    pub roll: f64,
    pub hit_rate: f64,
    pub formula: String,
}

impl AttackLog {
    pub fn is_hit(&self) -> bool {
        self.outcome == AttackOutcome::Hit
    }
}

/// Result of a full battle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleOutcome {
    /// `None` when the round cap was reached without a winner.
    pub winner: Option<Side>,
    pub rounds: u32,
    pub hits_a: u32,
    pub hits_b: u32,
    pub log: Vec<AttackLog>,
}

impl BattleOutcome {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }

    pub fn rolls(&self) -> Vec<f64> {
        self.log.iter().map(|entry| entry.roll).collect()
    }

    /// SHA-256 over the roll sequence and outcome, for replay verification.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        for entry in &self.log {
            hasher.update(entry.round.to_le_bytes());
            hasher.update([entry.attacker.tag(), u8::from(entry.is_hit())]);
            hasher.update(entry.roll.to_bits().to_le_bytes());
            hasher.update(entry.hit_rate.to_bits().to_le_bytes());
        }
        let winner = match self.winner {
            Some(side) => side.tag(),
            None => u8::MAX,
        };
        hasher.update([winner]);
        hasher.update(self.rounds.to_le_bytes());
        hasher.finalize().into()
    }
}
