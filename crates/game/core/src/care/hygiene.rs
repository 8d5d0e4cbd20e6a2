use super::ActionError;
use crate::snapshot::StatSnapshot;
use crate::species::SpeciesDef;

/// Flushes every waste pile and clears any current injury.
///
/// The injury count in this form is kept.
pub fn clean_waste(snapshot: &StatSnapshot) -> Result<StatSnapshot, ActionError> {
    snapshot.ensure_active()?;
    if snapshot.waste_count == 0 {
        return Err(ActionError::NothingToDo("no waste to clean"));
    }
    let mut snap = snapshot.clone();
    snap.waste_count = 0;
    snap.waste_full_since_epoch_ms = None;
    snap.is_injured = false;
    snap.injured_at_epoch_ms = None;
    snap.heal_doses_given = 0;
    Ok(snap)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealOutcome {
    pub snapshot: StatSnapshot,
    pub cured: bool,
    pub doses_remaining: u32,
}

/// Gives one medicine dose. The injury clears once the species' dose count
/// is reached.
pub fn heal(snapshot: &StatSnapshot, species: &SpeciesDef) -> Result<HealOutcome, ActionError> {
    snapshot.ensure_active()?;
    if !snapshot.is_injured {
        return Err(ActionError::NothingToDo("creature is not injured"));
    }

    let mut snap = snapshot.clone();
    let needed = species.heal_doses.max(1);
    snap.heal_doses_given = snap.heal_doses_given.saturating_add(1);

    let cured = snap.heal_doses_given >= needed;
    let doses_remaining = if cured {
        snap.is_injured = false;
        snap.injured_at_epoch_ms = None;
        snap.heal_doses_given = 0;
        0
    } else {
        needed - snap.heal_doses_given
    };

    Ok(HealOutcome {
        snapshot: snap,
        cured,
        doses_remaining,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::Stage;

    #[test]
    fn cleaning_clears_the_injury() {
        let mut species = SpeciesDef::new("Koromon", Stage::BabyII);
        species.heal_doses = 2;
        let mut snap = SnapshotBuilder::new(&species).build();
        snap.waste_count = 8;
        snap.waste_full_since_epoch_ms = Some(1_000);
        snap.injure(1_000);
        snap = heal(&snap, &species).unwrap().snapshot;
        assert_eq!(snap.heal_doses_given, 1);

        let cleaned = clean_waste(&snap).unwrap();
        assert_eq!(cleaned.waste_count, 0);
        assert_eq!(cleaned.waste_full_since_epoch_ms, None);
        assert!(!cleaned.is_injured);
        assert_eq!(cleaned.injured_at_epoch_ms, None);
        assert_eq!(cleaned.heal_doses_given, 0);
        assert_eq!(cleaned.injury_count, 1);

        assert_eq!(
            clean_waste(&cleaned),
            Err(ActionError::NothingToDo("no waste to clean"))
        );
    }

    #[test]
    fn multi_dose_species_needs_every_dose() {
        let mut species = SpeciesDef::new("Greymon", Stage::Adult);
        species.heal_doses = 2;
        let mut snap = SnapshotBuilder::new(&species).build();
        snap.injure(1_000);

        let first = heal(&snap, &species).unwrap();
        assert!(!first.cured);
        assert_eq!(first.doses_remaining, 1);
        assert!(first.snapshot.is_injured);

        let second = heal(&first.snapshot, &species).unwrap();
        assert!(second.cured);
        assert_eq!(second.doses_remaining, 0);
        assert!(!second.snapshot.is_injured);
        assert_eq!(second.snapshot.injured_at_epoch_ms, None);
        // Injury history in this form is kept.
        assert_eq!(second.snapshot.injury_count, 1);
    }
}
