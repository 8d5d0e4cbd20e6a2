//! Battle power derivation.

use crate::config::EngineConfig;
use crate::snapshot::StatSnapshot;
use crate::species::{SpeciesDef, Stage};

/// Strength at which the full-strength bonus applies.
pub const FULL_STRENGTH: u32 = EngineConfig::BASE_METER_CAP;
/// Power added per effort heart.
pub const POWER_PER_EFFORT: u32 = 5;

/// Bonus granted by full strength, by stage.
pub fn strength_bonus(stage: Stage) -> u32 {
    match stage {
        Stage::Child => 5,
        Stage::Adult => 8,
        Stage::Perfect => 15,
        Stage::Ultimate | Stage::SuperUltimate => 25,
        Stage::Digitama | Stage::BabyI | Stage::BabyII | Stage::Ohakadamon => 0,
    }
}

/// `basePower + strength bonus (at full strength) + 5 per effort heart`.
pub fn calculate_power(snapshot: &StatSnapshot, species: &SpeciesDef) -> u32 {
    let strength = if snapshot.strength >= FULL_STRENGTH {
        strength_bonus(species.stage)
    } else {
        0
    };
    let effort = snapshot.effort.min(EngineConfig::MAX_EFFORT) * POWER_PER_EFFORT;
    species.base_power.saturating_add(strength).saturating_add(effort)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;

    #[test]
    fn power_adds_strength_and_effort_bonuses() {
        let mut greymon = SpeciesDef::new("Greymon", Stage::Adult);
        greymon.base_power = 45;
        let mut snap = SnapshotBuilder::new(&greymon).strength(4).build();
        assert_eq!(calculate_power(&snap, &greymon), 45);

        snap.strength = 5;
        snap.effort = 3;
        assert_eq!(calculate_power(&snap, &greymon), 45 + 8 + 15);
    }

    #[test]
    fn baby_forms_get_no_strength_bonus() {
        let botamon = SpeciesDef::new("Botamon", Stage::BabyI);
        let snap = SnapshotBuilder::new(&botamon).strength(8).build();
        assert_eq!(calculate_power(&snap, &botamon), 0);
    }
}
