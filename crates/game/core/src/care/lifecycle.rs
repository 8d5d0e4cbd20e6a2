use super::ActionError;
use crate::snapshot::{CallStatus, EpochMs, SnapshotBuilder, StatSnapshot};
use crate::species::SpeciesDef;

/// Records that the caretaker woke a sleeping creature.
pub fn disturb_sleep(snapshot: &StatSnapshot) -> Result<StatSnapshot, ActionError> {
    snapshot.ensure_active()?;
    let mut snap = snapshot.clone();
    snap.sleep_disturbances = snap.sleep_disturbances.saturating_add(1);
    Ok(snap)
}

/// Puts the creature in the fridge. Its clock stops until [`thaw`].
pub fn freeze(snapshot: &StatSnapshot, now: EpochMs) -> Result<StatSnapshot, ActionError> {
    snapshot.ensure_alive()?;
    if snapshot.is_frozen {
        return Err(ActionError::AlreadyFrozen);
    }
    let mut snap = snapshot.clone();
    snap.is_frozen = true;
    snap.frozen_at_epoch_ms = Some(now);
    snap.call_status = CallStatus::default();
    Ok(snap)
}

/// Takes the creature out of the fridge at `now`.
///
/// Time spent frozen never counts: the checkpoint moves to `now`, empty meters
/// restart their zero-clocks at `now`, and the clocks of an open injury and of
/// full waste are shifted by the frozen duration.
pub fn thaw(
    snapshot: &StatSnapshot,
    species: &SpeciesDef,
    now: EpochMs,
) -> Result<StatSnapshot, ActionError> {
    snapshot.ensure_alive()?;
    if !snapshot.is_frozen {
        return Err(ActionError::NotFrozen);
    }

    let mut snap = snapshot.clone();
    let frozen_for = snap
        .frozen_at_epoch_ms
        .map_or(0, |frozen_at| now.saturating_sub(frozen_at).max(0));

    snap.is_frozen = false;
    snap.frozen_at_epoch_ms = None;
    snap.call_status = CallStatus::default();
    snap.last_checkpoint_epoch_ms = Some(now);

    if species.hunger_cycle_secs() > 0 && snap.fullness == 0 {
        snap.last_hunger_zero_at_epoch_ms = Some(now);
    }
    if species.strength_cycle_secs() > 0 && snap.strength == 0 {
        snap.last_strength_zero_at_epoch_ms = Some(now);
    }
    for clock in [
        snap.injured_at_epoch_ms.as_mut(),
        snap.waste_full_since_epoch_ms.as_mut(),
    ]
    .into_iter()
    .flatten()
    {
        *clock = clock.saturating_add(frozen_for).min(now);
    }

    Ok(snap)
}

/// Starts over as a fresh `egg` after death.
///
/// Lifetime battle totals survive; the reincarnation count goes up by one.
pub fn reincarnate(
    snapshot: &StatSnapshot,
    egg: &SpeciesDef,
    now: EpochMs,
) -> Result<StatSnapshot, ActionError> {
    if !snapshot.is_dead {
        return Err(ActionError::NotDead);
    }
    let mut snap = SnapshotBuilder::new(egg)
        .born_at(now)
        .lifetime_totals_from(snapshot)
        .build();
    snap.total_reincarnations = snap.total_reincarnations.saturating_add(1);
    Ok(snap)
}
