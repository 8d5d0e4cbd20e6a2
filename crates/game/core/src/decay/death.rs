use crate::config::EngineConfig;
use crate::snapshot::{DeathReason, EpochMs, StatSnapshot};

fn held_for(since: Option<EpochMs>, now: EpochMs, window_secs: u64) -> bool {
    let window_ms = i64::try_from(window_secs.saturating_mul(1_000)).unwrap_or(i64::MAX);
    since.is_some_and(|since| now.saturating_sub(since) >= window_ms)
}

/// First terminal condition that holds at `now`, checked in a fixed order.
pub(super) fn derive_death(
    snap: &StatSnapshot,
    now: EpochMs,
    config: &EngineConfig,
) -> Option<DeathReason> {
    if snap.fullness == 0
        && held_for(
            snap.last_hunger_zero_at_epoch_ms,
            now,
            config.starvation_window_secs,
        )
    {
        return Some(DeathReason::Starvation);
    }
    if snap.strength == 0
        && held_for(
            snap.last_strength_zero_at_epoch_ms,
            now,
            config.exhaustion_window_secs,
        )
    {
        return Some(DeathReason::Exhaustion);
    }
    if snap.injury_count >= config.injury_overload_count {
        return Some(DeathReason::InjuryOverload);
    }
    if snap.is_injured && held_for(snap.injured_at_epoch_ms, now, config.injury_neglect_secs) {
        return Some(DeathReason::InjuryNeglect);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::{SpeciesDef, Stage};

    const HOUR: i64 = 3_600_000;

    fn snapshot() -> StatSnapshot {
        SnapshotBuilder::new(&SpeciesDef::new("Agumon", Stage::Child))
            .fullness(3)
            .strength(3)
            .build()
    }

    #[test]
    fn starvation_needs_the_full_window() {
        let config = EngineConfig::default();
        let mut snap = snapshot();
        snap.fullness = 0;
        snap.last_hunger_zero_at_epoch_ms = Some(0);

        assert_eq!(derive_death(&snap, 12 * HOUR - 1, &config), None);
        assert_eq!(
            derive_death(&snap, 12 * HOUR, &config),
            Some(DeathReason::Starvation)
        );
    }

    #[test]
    fn starvation_wins_over_later_checks() {
        let config = EngineConfig::default();
        let mut snap = snapshot();
        snap.fullness = 0;
        snap.strength = 0;
        snap.last_hunger_zero_at_epoch_ms = Some(0);
        snap.last_strength_zero_at_epoch_ms = Some(0);
        snap.injury_count = 20;

        assert_eq!(
            derive_death(&snap, 13 * HOUR, &config),
            Some(DeathReason::Starvation)
        );
    }

    #[test]
    fn injuries_kill_by_count_or_neglect() {
        let config = EngineConfig::default();
        let mut snap = snapshot();
        snap.injury_count = 15;
        assert_eq!(
            derive_death(&snap, 0, &config),
            Some(DeathReason::InjuryOverload)
        );

        let mut snap = snapshot();
        snap.is_injured = true;
        snap.injury_count = 1;
        snap.injured_at_epoch_ms = Some(0);
        assert_eq!(derive_death(&snap, 6 * HOUR - 1, &config), None);
        assert_eq!(
            derive_death(&snap, 6 * HOUR, &config),
            Some(DeathReason::InjuryNeglect)
        );
    }
}
