use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vpet_core::StatSnapshot;

/// Owner-chosen creature name, also used as the save file stem.
///
/// 1 to 64 characters from `[A-Za-z0-9_-]`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(String);

impl CreatureId {
    pub const MAX_LEN: usize = 64;

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid creature id {0:?}: use 1-64 letters, digits, '_' or '-'")]
pub struct InvalidCreatureId(pub String);

impl FromStr for CreatureId {
    type Err = InvalidCreatureId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= Self::MAX_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(s.to_owned()))
        } else {
            Err(InvalidCreatureId(s.to_owned()))
        }
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything stored for one creature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub id: CreatureId,
    pub snapshot: StatSnapshot,
    /// Per-creature seed; battle rolls derive from it and `battle_nonce`.
    pub seed: u64,
    /// Battles and quest runs started so far.
    pub battle_nonce: u64,
    #[serde(default = "lights_on_default")]
    pub lights_on: bool,
}

fn lights_on_default() -> bool {
    true
}

impl CreatureRecord {
    pub fn new(id: CreatureId, snapshot: StatSnapshot, seed: u64) -> Self {
        Self {
            id,
            snapshot,
            seed,
            battle_nonce: 0,
            lights_on: true,
        }
    }
}
