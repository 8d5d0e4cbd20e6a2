use super::{CallStatus, EpochMs, StatSnapshot};
use crate::species::SpeciesDef;

/// Produces fully populated snapshots for a species.
///
/// Defaults applied to a fresh snapshot:
///
/// | field | default |
/// |---|---|
/// | `fullness`, `strength`, `effort`, `age` | 0 |
/// | `weight` | species `min_weight` |
/// | `energy` | species `max_energy` |
/// | `*_countdown_seconds` | one full species cycle |
/// | `time_to_evolve_seconds` | species criteria, else 0 |
/// | counters, flags | 0 / false |
/// | epoch fields | `None`, except the checkpoint set by [`born_at`](Self::born_at) |
///
/// Evolution and reincarnation start from this same builder and carry
/// preserved fields over explicitly.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder {
    snapshot: StatSnapshot,
}

impl SnapshotBuilder {
    pub fn new(species: &SpeciesDef) -> Self {
        Self {
            snapshot: StatSnapshot {
                species_id: species.id.clone(),
                fullness: 0,
                strength: 0,
                weight: species.min_weight,
                energy: species.max_energy,
                effort: 0,
                age: 0,
                lifespan_seconds: 0,
                time_to_evolve_seconds: species.time_to_evolve_secs().unwrap_or(0),
                hunger_countdown_seconds: species.hunger_cycle_secs(),
                strength_countdown_seconds: species.strength_cycle_secs(),
                waste_countdown_seconds: species.waste_cycle_secs(),
                waste_count: 0,
                waste_full_since_epoch_ms: None,
                overfeed_count: 0,
                consecutive_overfeed_streak: 0,
                protein_overdose_count: 0,
                protein_fed: 0,
                trainings: 0,
                care_mistakes: 0,
                sleep_disturbances: 0,
                battles_won_this_form: 0,
                battles_lost_this_form: 0,
                total_battles_won: 0,
                total_battles_lost: 0,
                total_reincarnations: 0,
                is_dead: false,
                death_reason: None,
                is_injured: false,
                injured_at_epoch_ms: None,
                injury_count: 0,
                heal_doses_given: 0,
                last_hunger_zero_at_epoch_ms: None,
                last_strength_zero_at_epoch_ms: None,
                last_checkpoint_epoch_ms: None,
                call_status: CallStatus::default(),
                is_frozen: false,
                frozen_at_epoch_ms: None,
            },
        }
    }

    /// Sets the first checkpoint.
    #[must_use]
    pub fn born_at(mut self, now: EpochMs) -> Self {
        self.snapshot.last_checkpoint_epoch_ms = Some(now);
        self
    }

    #[must_use]
    pub fn fullness(mut self, fullness: u32) -> Self {
        self.snapshot.fullness = fullness;
        self
    }

    #[must_use]
    pub fn strength(mut self, strength: u32) -> Self {
        self.snapshot.strength = strength;
        self
    }

    #[must_use]
    pub fn weight(mut self, weight: u32) -> Self {
        self.snapshot.weight = weight;
        self
    }

    #[must_use]
    pub fn age(mut self, age: u32) -> Self {
        self.snapshot.age = age;
        self
    }

    #[must_use]
    pub fn lifespan_seconds(mut self, lifespan_seconds: u64) -> Self {
        self.snapshot.lifespan_seconds = lifespan_seconds;
        self
    }

    /// Carries lifetime battle totals and the reincarnation count.
    #[must_use]
    pub fn lifetime_totals_from(mut self, previous: &StatSnapshot) -> Self {
        self.snapshot.total_battles_won = previous.total_battles_won;
        self.snapshot.total_battles_lost = previous.total_battles_lost;
        self.snapshot.total_reincarnations = previous.total_reincarnations;
        self
    }

    pub fn build(self) -> StatSnapshot {
        self.snapshot
    }
}
