//! Lazy update: catch a snapshot up to `now` in one pass.
//!
//! Nothing here runs on a timer. The host calls
//! [`LazyUpdateEngine::apply_elapsed`] whenever it loads a creature, and the
//! engine reconstructs what continuous decay would have produced. Every meter
//! is advanced with closed-form cycle arithmetic, so the cost of a call does
//! not depend on how long the creature was left alone.
//!
//! Pass order:
//! 1. lifespan and evolution timer
//! 2. hunger, 3. strength (with overdose buffer), 4. waste
//! 5. death derivation
//! 6. care calls (skipped once dead)
//! 7. age rollover at local midnights
//! 8. checkpoint

mod age;
mod calls;
mod cycles;
mod death;
mod meters;

pub use age::midnights_between;
pub use calls::{CallInputs, CareCallSystem};

use crate::config::EngineConfig;
use crate::snapshot::{CallStatus, DeathReason, EpochMs, SanitizeReport, StatSnapshot};
use crate::species::SpeciesDef;

/// Host-supplied inputs for one catch-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickInput {
    pub now_epoch_ms: EpochMs,
    /// Offset of the owner's local time from UTC, for age rollover.
    pub utc_offset_minutes: i32,
    /// The creature should be asleep but is being kept awake.
    pub sleep_call_pending: bool,
}

impl TickInput {
    /// UTC, no pending sleep call.
    pub const fn at(now_epoch_ms: EpochMs) -> Self {
        Self {
            now_epoch_ms,
            utc_offset_minutes: 0,
            sleep_call_pending: false,
        }
    }

    #[must_use]
    pub const fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    #[must_use]
    pub const fn with_sleep_call(mut self, pending: bool) -> Self {
        self.sleep_call_pending = pending;
        self
    }
}

/// What a catch-up did, for host logging.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElapsedReport {
    /// Whole seconds consumed by this pass.
    pub elapsed_seconds: u64,
    /// The stored checkpoint was missing; no decay was applied.
    pub missing_checkpoint: bool,
    /// The stored checkpoint was later than `now`; treated as no elapsed time.
    pub clock_skew: bool,
    /// Creature was dead or frozen; only the checkpoint moved.
    pub paused: bool,
    pub sanitized: SanitizeReport,
    pub fullness_lost: u32,
    pub strength_lost: u32,
    pub overdose_absorbed: u32,
    pub waste_added: u32,
    pub injured_by_waste: bool,
    /// Neglect periods charged for waste left at the cap.
    pub waste_penalties: u32,
    pub died: Option<DeathReason>,
    pub care_mistakes_added: u32,
    pub days_aged: u32,
}

/// Result of [`LazyUpdateEngine::apply_elapsed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Elapsed {
    pub snapshot: StatSnapshot,
    pub report: ElapsedReport,
}

/// Stateless decay engine over a borrowed config.
#[derive(Clone, Copy, Debug)]
pub struct LazyUpdateEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> LazyUpdateEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Returns `snapshot` as if decay had run continuously until `input.now_epoch_ms`.
    ///
    /// Elapsed time is consumed in whole seconds; the sub-second remainder
    /// stays in front of the new checkpoint so frequent calls lose nothing.
    /// Calling again with the same `now` changes nothing.
    pub fn apply_elapsed(
        &self,
        snapshot: &StatSnapshot,
        species: &SpeciesDef,
        input: TickInput,
    ) -> Elapsed {
        let now = input.now_epoch_ms;
        let mut snap = snapshot.clone();
        let mut report = ElapsedReport::default();

        // A checkpoint before the Unix epoch cannot come from a real clock.
        let stored = snap.last_checkpoint_epoch_ms;
        let Some((previous, delta_ms)) = stored
            .filter(|at| *at >= 0)
            .and_then(|at| Some((at, now.checked_sub(at)?)))
        else {
            snap.last_checkpoint_epoch_ms = Some(now);
            report.missing_checkpoint = true;
            if stored.is_some() {
                report.sanitized.clamped.push("lastCheckpointEpochMs");
            }
            return Elapsed {
                snapshot: snap,
                report,
            };
        };

        if snap.is_dead || snap.is_frozen {
            snap.last_checkpoint_epoch_ms = Some(now);
            report.clock_skew = delta_ms < 0;
            report.paused = true;
            return Elapsed {
                snapshot: snap,
                report,
            };
        }

        let (elapsed, checkpoint) = if delta_ms < 0 {
            report.clock_skew = true;
            (0, now)
        } else {
            (delta_ms / 1_000, now - delta_ms % 1_000)
        };

        report.sanitized = snap.sanitize(species);
        report.elapsed_seconds = elapsed as u64;

        // 1. clocks
        snap.lifespan_seconds = snap.lifespan_seconds.saturating_add(elapsed as u64);
        snap.time_to_evolve_seconds = snap.time_to_evolve_seconds.saturating_sub(elapsed as u64);

        // 2-4. meters
        meters::decay_hunger(&mut snap, species, previous, elapsed, &mut report);
        meters::decay_strength(&mut snap, species, self.config, previous, elapsed, &mut report);
        meters::accumulate_waste(&mut snap, species, self.config, previous, elapsed, &mut report);

        // 5. death
        if let Some(reason) = death::derive_death(&snap, now, self.config) {
            snap.kill(reason);
            report.died = Some(reason);
        }

        // 6. care calls
        report.care_mistakes_added = report.waste_penalties;
        if snap.is_dead {
            snap.call_status = CallStatus::default();
        } else {
            report.care_mistakes_added += CareCallSystem::new(self.config).update(
                &mut snap,
                species,
                CallInputs {
                    now,
                    since: previous,
                    sleep_call_pending: input.sleep_call_pending,
                },
            );
        }

        // 7. age
        let days = midnights_between(previous, checkpoint, input.utc_offset_minutes);
        snap.age = snap.age.saturating_add(days);
        report.days_aged = days;

        // 8. checkpoint
        snap.last_checkpoint_epoch_ms = Some(checkpoint);

        Elapsed {
            snapshot: snap,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::Stage;

    const T0: EpochMs = 1_700_000_000_000;

    fn koromon() -> SpeciesDef {
        let mut def = SpeciesDef::new("Koromon", Stage::BabyII);
        def.hunger_cycle_minutes = 4;
        def.strength_cycle_minutes = 4;
        def.waste_cycle_minutes = 60;
        def.max_overfeed = 2;
        def
    }

    #[test]
    fn missing_checkpoint_means_no_decay() {
        let config = EngineConfig::default();
        let species = koromon();
        let snap = SnapshotBuilder::new(&species).fullness(5).build();

        let out = LazyUpdateEngine::new(&config).apply_elapsed(&snap, &species, TickInput::at(T0));

        assert!(out.report.missing_checkpoint);
        assert_eq!(out.snapshot.fullness, 5);
        assert_eq!(out.snapshot.last_checkpoint_epoch_ms, Some(T0));
    }

    #[test]
    fn frozen_creature_only_moves_its_checkpoint() {
        let config = EngineConfig::default();
        let species = koromon();
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).fullness(5).build();
        snap.is_frozen = true;
        snap.frozen_at_epoch_ms = Some(T0);

        let later = T0 + 48 * 3_600_000;
        let out = LazyUpdateEngine::new(&config).apply_elapsed(&snap, &species, TickInput::at(later));

        let mut expected = snap.clone();
        expected.last_checkpoint_epoch_ms = Some(later);
        assert_eq!(out.snapshot, expected);
        assert!(out.report.paused);
    }

    #[test]
    fn paused_checkpoint_is_now_to_the_millisecond() {
        let config = EngineConfig::default();
        let species = koromon();
        let engine = LazyUpdateEngine::new(&config);
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).fullness(5).build();
        snap.is_frozen = true;
        snap.frozen_at_epoch_ms = Some(T0);

        let out = engine.apply_elapsed(&snap, &species, TickInput::at(T0 + 1_500));
        assert_eq!(out.snapshot.last_checkpoint_epoch_ms, Some(T0 + 1_500));

        snap.is_frozen = false;
        snap.is_dead = true;
        let out = engine.apply_elapsed(&snap, &species, TickInput::at(T0 + 2_750));
        assert_eq!(out.snapshot.last_checkpoint_epoch_ms, Some(T0 + 2_750));
        assert!(out.report.paused);
    }

    #[test]
    fn sub_second_remainder_is_carried() {
        let config = EngineConfig::default();
        let species = koromon();
        let engine = LazyUpdateEngine::new(&config);
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).fullness(5).build();

        // 480 calls 999ms apart cover 479.52s of wall time.
        for step in 1..=480 {
            snap = engine
                .apply_elapsed(&snap, &species, TickInput::at(T0 + step * 999))
                .snapshot;
        }
        assert_eq!(snap.lifespan_seconds, 479);
        assert_eq!(snap.fullness, 4);
    }

    #[test]
    fn clock_skew_is_treated_as_no_elapsed_time() {
        let config = EngineConfig::default();
        let species = koromon();
        let snap = SnapshotBuilder::new(&species).born_at(T0).fullness(5).build();

        let out = LazyUpdateEngine::new(&config).apply_elapsed(
            &snap,
            &species,
            TickInput::at(T0 - 60_000),
        );

        assert!(out.report.clock_skew);
        assert_eq!(out.snapshot.fullness, 5);
        assert_eq!(out.snapshot.lifespan_seconds, 0);
        assert_eq!(out.snapshot.last_checkpoint_epoch_ms, Some(T0 - 60_000));
    }
}
