use super::{ActionError, Refusal};
use crate::config::EngineConfig;
use crate::snapshot::StatSnapshot;
use crate::species::SpeciesDef;

/// Result of a feeding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedOutcome {
    pub snapshot: StatSnapshot,
    /// Meat offered past the meter cap; nothing was eaten.
    pub overfed: bool,
    /// A protein step restored one energy.
    pub energy_restored: bool,
    /// A protein step added one overdose.
    pub overdosed: bool,
}

impl FeedOutcome {
    fn new(snapshot: StatSnapshot) -> Self {
        Self {
            snapshot,
            overfed: false,
            energy_restored: false,
            overdosed: false,
        }
    }
}

/// One piece of meat: +1 fullness, +1 weight.
///
/// A creature already at its meter cap refuses the meat, and the attempt
/// counts as an overfeed.
pub fn feed_meat(snapshot: &StatSnapshot, species: &SpeciesDef) -> Result<FeedOutcome, ActionError> {
    snapshot.ensure_active()?;
    let mut snap = snapshot.clone();
    snap.sanitize(species);
    let cap = species.meter_cap();

    if snap.fullness >= cap {
        snap.overfeed_count = snap.overfeed_count.saturating_add(1);
        snap.consecutive_overfeed_streak = snap.consecutive_overfeed_streak.saturating_add(1);
        return Ok(FeedOutcome {
            overfed: true,
            ..FeedOutcome::new(snap)
        });
    }

    snap.restore_fullness(cap, 1);
    snap.weight = snap.weight.saturating_add(1);
    snap.consecutive_overfeed_streak = 0;
    Ok(FeedOutcome::new(snap))
}

/// One protein: +1 strength, +2 weight.
///
/// Every fourth protein restores one energy; if strength was already full at
/// that point it also adds one overdose. Refused at the overdose cap.
pub fn feed_protein(
    snapshot: &StatSnapshot,
    species: &SpeciesDef,
) -> Result<FeedOutcome, ActionError> {
    snapshot.ensure_active()?;
    if snapshot.protein_overdose_count >= EngineConfig::MAX_PROTEIN_OVERDOSE {
        return Err(ActionError::Refused(Refusal::ProteinOverdose));
    }

    let mut snap = snapshot.clone();
    snap.sanitize(species);
    let already_full = snap.strength >= EngineConfig::BASE_METER_CAP;

    snap.restore_strength(species.meter_cap(), 1);
    snap.weight = snap.weight.saturating_add(2);
    snap.protein_fed = snap.protein_fed.saturating_add(1);

    let mut outcome = FeedOutcome::new(snap);
    if outcome.snapshot.protein_fed % EngineConfig::PROTEINS_PER_STEP == 0 {
        let snap = &mut outcome.snapshot;
        if snap.energy < species.max_energy {
            snap.energy += 1;
            outcome.energy_restored = true;
        }
        if already_full {
            snap.protein_overdose_count =
                (snap.protein_overdose_count + 1).min(EngineConfig::MAX_PROTEIN_OVERDOSE);
            outcome.overdosed = true;
        }
    }
    Ok(outcome)
}
