//! Care-call timers.
//!
//! Each channel's state is re-derivable from the snapshot alone: hunger and
//! strength arm from their zero-clocks, sleep arms from the host flag.

use crate::config::EngineConfig;
use crate::snapshot::{CallChannel, EpochMs, StatSnapshot};
use crate::species::SpeciesDef;

/// Inputs for one care-call pass.
#[derive(Clone, Copy, Debug)]
pub struct CallInputs {
    pub now: EpochMs,
    /// Previous checkpoint; arming instant when a zero-clock is missing.
    pub since: EpochMs,
    /// Host-observed sleep condition being ignored.
    pub sleep_call_pending: bool,
}

/// Arms, expires, and clears the three care-call channels.
#[derive(Clone, Copy, Debug)]
pub struct CareCallSystem<'a> {
    config: &'a EngineConfig,
}

impl<'a> CareCallSystem<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Runs every channel once. Returns the care mistakes added.
    pub fn update(&self, snap: &mut StatSnapshot, species: &SpeciesDef, input: CallInputs) -> u32 {
        let hunger_condition = species.hunger_cycle_secs() > 0 && snap.fullness == 0;
        let hunger_start = snap.last_hunger_zero_at_epoch_ms.unwrap_or(input.since);
        let strength_condition = species.strength_cycle_secs() > 0 && snap.strength == 0;
        let strength_start = snap.last_strength_zero_at_epoch_ms.unwrap_or(input.since);

        let mut mistakes = 0;
        if step(
            &mut snap.call_status.hunger,
            hunger_condition,
            hunger_start,
            input.now,
            self.config.hunger_call_timeout_secs,
        ) {
            mistakes += 1;
        }
        if step(
            &mut snap.call_status.strength,
            strength_condition,
            strength_start,
            input.now,
            self.config.strength_call_timeout_secs,
        ) {
            mistakes += 1;
        }
        if step(
            &mut snap.call_status.sleep,
            input.sleep_call_pending,
            input.now,
            input.now,
            self.config.sleep_call_timeout_secs,
        ) {
            mistakes += 1;
        }

        snap.care_mistakes = snap.care_mistakes.saturating_add(mistakes);
        mistakes
    }
}

/// Advances one channel. Returns `true` when it just expired.
fn step(
    channel: &mut CallChannel,
    condition: bool,
    arm_at: EpochMs,
    now: EpochMs,
    timeout_secs: u64,
) -> bool {
    if !condition {
        *channel = CallChannel::IDLE;
        return false;
    }
    if channel.is_idle() {
        *channel = CallChannel::armed_at(arm_at);
    }
    if !channel.active {
        return false;
    }

    let timeout_ms = i64::try_from(timeout_secs.saturating_mul(1_000)).unwrap_or(i64::MAX);
    match channel.started_at_epoch_ms {
        Some(started) if now.saturating_sub(started) > timeout_ms => {
            channel.active = false;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::Stage;

    const MIN: i64 = 60_000;

    fn agumon() -> SpeciesDef {
        let mut def = SpeciesDef::new("Agumon", Stage::Child);
        def.hunger_cycle_minutes = 5;
        def.strength_cycle_minutes = 5;
        def
    }

    fn inputs(now: EpochMs) -> CallInputs {
        CallInputs {
            now,
            since: 0,
            sleep_call_pending: false,
        }
    }

    #[test]
    fn hunger_call_arms_from_zero_clock_and_penalizes_once() {
        let config = EngineConfig::default();
        let calls = CareCallSystem::new(&config);
        let species = agumon();
        let mut snap = SnapshotBuilder::new(&species).strength(3).build();
        snap.last_hunger_zero_at_epoch_ms = Some(0);

        assert_eq!(calls.update(&mut snap, &species, inputs(10 * MIN)), 0);
        assert!(snap.call_status.hunger.active);
        assert_eq!(snap.call_status.hunger.started_at_epoch_ms, Some(0));

        assert_eq!(calls.update(&mut snap, &species, inputs(10 * MIN + 1)), 1);
        assert!(snap.call_status.hunger.is_expired());
        assert_eq!(snap.care_mistakes, 1);

        // Condition persists: no second penalty until it clears.
        assert_eq!(calls.update(&mut snap, &species, inputs(500 * MIN)), 0);
        assert_eq!(snap.care_mistakes, 1);
    }

    #[test]
    fn clearing_the_condition_resets_without_penalty() {
        let config = EngineConfig::default();
        let calls = CareCallSystem::new(&config);
        let species = agumon();
        let mut snap = SnapshotBuilder::new(&species).strength(3).build();
        snap.last_hunger_zero_at_epoch_ms = Some(0);
        calls.update(&mut snap, &species, inputs(MIN));

        snap.fullness = 1;
        snap.last_hunger_zero_at_epoch_ms = None;
        assert_eq!(calls.update(&mut snap, &species, inputs(30 * MIN)), 0);
        assert!(snap.call_status.hunger.is_idle());
        assert_eq!(snap.care_mistakes, 0);
    }

    #[test]
    fn sleep_call_uses_host_flag_and_longer_timeout() {
        let config = EngineConfig::default();
        let calls = CareCallSystem::new(&config);
        let species = agumon();
        let mut snap = SnapshotBuilder::new(&species).fullness(4).strength(4).build();

        let pending = |now| CallInputs {
            now,
            since: 0,
            sleep_call_pending: true,
        };
        assert_eq!(calls.update(&mut snap, &species, pending(5 * MIN)), 0);
        assert_eq!(snap.call_status.sleep.started_at_epoch_ms, Some(5 * MIN));
        assert_eq!(calls.update(&mut snap, &species, pending(65 * MIN)), 0);
        assert_eq!(calls.update(&mut snap, &species, pending(65 * MIN + 1)), 1);
    }

    #[test]
    fn disabled_meters_never_call() {
        let config = EngineConfig::default();
        let calls = CareCallSystem::new(&config);
        let egg = SpeciesDef::new("Digitama", Stage::Digitama);
        let mut snap = SnapshotBuilder::new(&egg).build();

        assert_eq!(calls.update(&mut snap, &egg, inputs(1_000 * MIN)), 0);
        assert!(!snap.call_status.any_active());
    }
}
