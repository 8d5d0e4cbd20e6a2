use crate::error::CoreError;
use crate::snapshot::{SnapshotBuilder, StatSnapshot};
use crate::species::{SpeciesId, SpeciesOracle};

/// Builds the snapshot of `snapshot` after evolving into `target`.
///
/// Per-form progress starts over: training, overfeeding, mistakes, injuries,
/// overdose, battle record, strength and effort. Kept: age, lifespan, weight
/// (never below the new form's minimum), fullness, waste, lifetime totals and
/// the checkpoint. Energy refills to the new form's maximum.
pub fn evolve(
    snapshot: &StatSnapshot,
    target: &SpeciesId,
    table: &impl SpeciesOracle,
) -> Result<StatSnapshot, CoreError> {
    snapshot.ensure_active()?;
    let next = table.require(target)?;

    let mut evolved = SnapshotBuilder::new(next)
        .age(snapshot.age)
        .lifespan_seconds(snapshot.lifespan_seconds)
        .weight(snapshot.weight.max(next.min_weight))
        .fullness(snapshot.fullness.min(next.meter_cap()))
        .lifetime_totals_from(snapshot)
        .build();

    evolved.waste_count = snapshot.waste_count;
    evolved.waste_full_since_epoch_ms = snapshot.waste_full_since_epoch_ms;
    evolved.last_checkpoint_epoch_ms = snapshot.last_checkpoint_epoch_ms;
    if evolved.fullness == 0 && next.hunger_cycle_secs() > 0 {
        evolved.last_hunger_zero_at_epoch_ms = snapshot.last_hunger_zero_at_epoch_ms;
    }

    Ok(evolved)
}
