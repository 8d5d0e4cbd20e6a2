//! Hunger, strength and waste decay.

use super::ElapsedReport;
use super::cycles::CycleRun;
use crate::config::EngineConfig;
use crate::snapshot::{EpochMs, StatSnapshot};
use crate::species::SpeciesDef;

/// Decrements fullness once per hunger cycle.
///
/// The zero-clock records the instant fullness actually hit zero, not `now`.
pub(super) fn decay_hunger(
    snap: &mut StatSnapshot,
    species: &SpeciesDef,
    origin: EpochMs,
    elapsed: i64,
    report: &mut ElapsedReport,
) {
    let cycle = species.hunger_cycle_secs();
    if cycle <= 0 {
        return;
    }

    let run = CycleRun::over(snap.hunger_countdown_seconds, cycle, elapsed);
    snap.hunger_countdown_seconds = run.remaining;

    let before = snap.fullness;
    let lost = run.ticks.min(u64::from(before)) as u32;
    snap.fullness = before - lost;
    report.fullness_lost = lost;

    if before > 0 && snap.fullness == 0 {
        snap.last_hunger_zero_at_epoch_ms = Some(run.tick_instant(origin, u64::from(before)));
    } else if snap.fullness == 0 && snap.last_hunger_zero_at_epoch_ms.is_none() {
        snap.last_hunger_zero_at_epoch_ms = Some(origin);
    }
}

/// Decrements strength once per strength cycle.
///
/// While the protein overdose count sits at or above the buffer threshold,
/// each tick is absorbed by the overdose count instead.
pub(super) fn decay_strength(
    snap: &mut StatSnapshot,
    species: &SpeciesDef,
    config: &EngineConfig,
    origin: EpochMs,
    elapsed: i64,
    report: &mut ElapsedReport,
) {
    let cycle = species.strength_cycle_secs();
    if cycle <= 0 {
        return;
    }

    let run = CycleRun::over(snap.strength_countdown_seconds, cycle, elapsed);
    snap.strength_countdown_seconds = run.remaining;

    let threshold = config.overdose_buffer_threshold;
    let absorbable = if threshold > 0 && snap.protein_overdose_count >= threshold {
        snap.protein_overdose_count - (threshold - 1)
    } else {
        0
    };
    let absorbed = run.ticks.min(u64::from(absorbable)) as u32;
    snap.protein_overdose_count -= absorbed;
    report.overdose_absorbed = absorbed;

    let before = snap.strength;
    let remaining_ticks = run.ticks - u64::from(absorbed);
    let lost = remaining_ticks.min(u64::from(before)) as u32;
    snap.strength = before - lost;
    report.strength_lost = lost;

    if before > 0 && snap.strength == 0 {
        let tick = u64::from(absorbed) + u64::from(before);
        snap.last_strength_zero_at_epoch_ms = Some(run.tick_instant(origin, tick));
    } else if snap.strength == 0 && snap.last_strength_zero_at_epoch_ms.is_none() {
        snap.last_strength_zero_at_epoch_ms = Some(origin);
    }
}

fn secs_to_ms(secs: u64) -> i64 {
    i64::try_from(secs.saturating_mul(1_000)).unwrap_or(i64::MAX)
}

/// Adds one waste pile per waste cycle, up to the cap.
///
/// Reaching the cap injures the creature once, at the instant it filled up,
/// unless it is already injured. Waste left at the cap is then charged by
/// [`charge_full_waste`].
pub(super) fn accumulate_waste(
    snap: &mut StatSnapshot,
    species: &SpeciesDef,
    config: &EngineConfig,
    origin: EpochMs,
    elapsed: i64,
    report: &mut ElapsedReport,
) {
    let cycle = species.waste_cycle_secs();
    if cycle > 0 {
        let run = CycleRun::over(snap.waste_countdown_seconds, cycle, elapsed);
        snap.waste_countdown_seconds = run.remaining;

        let before = snap.waste_count;
        let room = EngineConfig::MAX_WASTE.saturating_sub(before);
        let added = run.ticks.min(u64::from(room)) as u32;
        snap.waste_count = before + added;
        report.waste_added = added;

        if added > 0 && snap.waste_count == EngineConfig::MAX_WASTE {
            let filled_at = run.tick_instant(origin, u64::from(room));
            snap.waste_full_since_epoch_ms = Some(filled_at);
            if !snap.is_injured {
                snap.injure(filled_at);
                report.injured_by_waste = true;
            }
        }
    }

    let end = origin.saturating_add(elapsed.saturating_mul(1_000));
    charge_full_waste(snap, config, origin, end, report);
}

/// Charges one care mistake and one injury for every full neglect period the
/// waste has sat at the cap before `end`.
///
/// A healthy creature is injured at the first period; an injured one keeps its
/// injury time. No period counts past the instant the injury turns fatal or
/// the injury count reaches the overload limit.
fn charge_full_waste(
    snap: &mut StatSnapshot,
    config: &EngineConfig,
    origin: EpochMs,
    end: EpochMs,
    report: &mut ElapsedReport,
) {
    if snap.waste_count < EngineConfig::MAX_WASTE {
        snap.waste_full_since_epoch_ms = None;
        return;
    }
    // Records from before the clock existed count from the last checkpoint.
    let since = *snap.waste_full_since_epoch_ms.get_or_insert(origin);

    let period = secs_to_ms(config.waste_neglect_period_secs);
    if period <= 0 {
        return;
    }
    let first = since.saturating_add(period);
    let injured_at = if snap.is_injured {
        snap.injured_at_epoch_ms.unwrap_or(origin)
    } else {
        first
    };
    let horizon = end.min(injured_at.saturating_add(secs_to_ms(config.injury_neglect_secs)));
    if first > horizon {
        return;
    }

    let periods = horizon.saturating_sub(since) / period;
    let room = config
        .injury_overload_count
        .saturating_sub(snap.injury_count)
        .max(1);
    let count = u32::try_from(periods).unwrap_or(u32::MAX).min(room);

    if snap.is_injured {
        snap.injury_count = snap.injury_count.saturating_add(count);
        snap.heal_doses_given = 0;
    } else {
        snap.injure(first);
        snap.injury_count = snap.injury_count.saturating_add(count - 1);
    }
    snap.care_mistakes = snap.care_mistakes.saturating_add(count);
    snap.waste_full_since_epoch_ms = Some(since + i64::from(count) * period);
    report.waste_penalties = count;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::Stage;

    const T0: EpochMs = 1_700_000_000_000;

    fn botamon() -> SpeciesDef {
        let mut def = SpeciesDef::new("Botamon", Stage::BabyI);
        def.hunger_cycle_minutes = 3;
        def.strength_cycle_minutes = 3;
        def.waste_cycle_minutes = 3;
        def.max_overfeed = 3;
        def
    }

    #[test]
    fn hunger_zero_clock_uses_computed_instant() {
        let species = botamon();
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).fullness(2).build();
        let mut report = ElapsedReport::default();

        // Ticks at 180s and 360s; fullness hits zero on the second.
        decay_hunger(&mut snap, &species, T0, 3_600, &mut report);

        assert_eq!(snap.fullness, 0);
        assert_eq!(report.fullness_lost, 2);
        assert_eq!(snap.last_hunger_zero_at_epoch_ms, Some(T0 + 360_000));
    }

    #[test]
    fn overdose_absorbs_strength_ticks_first() {
        let species = botamon();
        let config = EngineConfig::default();
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).strength(2).build();
        snap.protein_overdose_count = 7;
        let mut report = ElapsedReport::default();

        // Five ticks: two absorbed (7 -> 5), then strength 2 -> 0 on tick four.
        decay_strength(&mut snap, &species, &config, T0, 5 * 180, &mut report);

        assert_eq!(snap.protein_overdose_count, 5);
        assert_eq!(report.overdose_absorbed, 2);
        assert_eq!(snap.strength, 0);
        assert_eq!(snap.last_strength_zero_at_epoch_ms, Some(T0 + 4 * 180_000));
    }

    #[test]
    fn overdose_below_threshold_does_not_buffer() {
        let species = botamon();
        let config = EngineConfig::default();
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).strength(3).build();
        snap.protein_overdose_count = 5;
        let mut report = ElapsedReport::default();

        decay_strength(&mut snap, &species, &config, T0, 180, &mut report);

        assert_eq!(snap.protein_overdose_count, 5);
        assert_eq!(snap.strength, 2);
    }

    #[test]
    fn full_waste_injures_once() {
        let species = botamon();
        let config = EngineConfig::default();
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).build();
        snap.waste_count = 6;
        let mut report = ElapsedReport::default();

        accumulate_waste(&mut snap, &species, &config, T0, 10 * 180, &mut report);

        assert_eq!(snap.waste_count, 8);
        assert!(snap.is_injured);
        assert_eq!(snap.injury_count, 1);
        assert_eq!(snap.injured_at_epoch_ms, Some(T0 + 2 * 180_000));

        let mut again = ElapsedReport::default();
        accumulate_waste(&mut snap, &species, &config, T0, 10 * 180, &mut again);
        assert_eq!(snap.injury_count, 1);
        assert!(!again.injured_by_waste);
    }

    #[test]
    fn waste_filling_while_injured_does_not_stack() {
        let species = botamon();
        let config = EngineConfig::default();
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).build();
        snap.waste_count = 7;
        snap.injure(T0 - 1_000);
        let mut report = ElapsedReport::default();

        accumulate_waste(&mut snap, &species, &config, T0, 180, &mut report);

        assert_eq!(snap.waste_count, 8);
        assert_eq!(snap.injury_count, 1);
        assert_eq!(snap.injured_at_epoch_ms, Some(T0 - 1_000));
    }

    #[test]
    fn waste_left_full_is_charged_per_period() {
        let species = botamon();
        let config = EngineConfig {
            waste_neglect_period_secs: 3_600,
            ..EngineConfig::default()
        };
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).build();
        snap.waste_count = 8;
        snap.waste_countdown_seconds = 180;
        let mut report = ElapsedReport::default();

        // No stored clock: the waste counts as full from the checkpoint.
        accumulate_waste(&mut snap, &species, &config, T0, 3 * 3_600 + 1_800, &mut report);

        assert_eq!(report.waste_penalties, 3);
        assert_eq!(snap.care_mistakes, 3);
        assert_eq!(snap.injury_count, 3);
        assert_eq!(snap.injured_at_epoch_ms, Some(T0 + 3_600_000));
        assert_eq!(snap.waste_full_since_epoch_ms, Some(T0 + 3 * 3_600_000));
    }

    #[test]
    fn waste_penalties_stop_when_the_injury_turns_fatal() {
        let species = botamon();
        let config = EngineConfig {
            waste_neglect_period_secs: 3_600,
            ..EngineConfig::default()
        };
        let mut snap = SnapshotBuilder::new(&species).born_at(T0).build();
        snap.waste_count = 8;
        snap.waste_full_since_epoch_ms = Some(T0);
        let mut report = ElapsedReport::default();

        // Injured at 1h, fatal at 7h.
        accumulate_waste(&mut snap, &species, &config, T0, 10 * 3_600, &mut report);

        assert_eq!(report.waste_penalties, 7);
        assert_eq!(snap.injury_count, 7);
        assert_eq!(snap.waste_full_since_epoch_ms, Some(T0 + 7 * 3_600_000));
    }
}
