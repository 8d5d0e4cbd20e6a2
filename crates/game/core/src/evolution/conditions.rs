use super::UnmetCondition;
use crate::combat::calculate_power;
use crate::snapshot::StatSnapshot;
use crate::species::{ConditionField, ConditionGroup, SpeciesDef, StatRange};

/// Current value of `field`; `None` when the field is undefined (win ratio
/// with no battles).
pub(crate) fn field_value(
    field: ConditionField,
    snapshot: &StatSnapshot,
    species: &SpeciesDef,
) -> Option<u32> {
    match field {
        ConditionField::CareMistakes => Some(snapshot.care_mistakes),
        ConditionField::Trainings => Some(snapshot.trainings),
        ConditionField::OverfeedCount => Some(snapshot.overfeed_count),
        ConditionField::SleepDisturbances => Some(snapshot.sleep_disturbances),
        ConditionField::Battles => Some(snapshot.battles_this_form()),
        ConditionField::WinRatio => snapshot.win_ratio(),
        ConditionField::Weight => Some(snapshot.weight),
        ConditionField::Strength => Some(snapshot.strength),
        ConditionField::Power => Some(calculate_power(snapshot, species)),
    }
}

/// Whether the win ratio lies in `range`, compared as `won / battles` against
/// whole percents without rounding. Never true before the first battle.
pub(crate) fn win_ratio_within(snapshot: &StatSnapshot, range: &StatRange) -> bool {
    let battles = u64::from(snapshot.battles_this_form());
    if battles == 0 {
        return false;
    }
    let won = u64::from(snapshot.battles_won_this_form) * 100;
    range.min.is_none_or(|min| won >= u64::from(min) * battles)
        && range.max.is_none_or(|max| won <= u64::from(max) * battles)
}

/// Every range in `group` that the snapshot misses. Empty means the group passes.
pub(crate) fn unmet_in_group(
    group: &ConditionGroup,
    snapshot: &StatSnapshot,
    species: &SpeciesDef,
) -> Vec<UnmetCondition> {
    group
        .iter()
        .filter_map(|(field, range)| {
            let current = field_value(field, snapshot, species);
            let met = match field {
                ConditionField::WinRatio => win_ratio_within(snapshot, range),
                _ => current.is_some_and(|value| range.contains(value)),
            };
            (!met).then_some(UnmetCondition {
                field,
                current,
                required: *range,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::Stage;

    #[test]
    fn win_ratio_without_battles_never_passes() {
        let species = SpeciesDef::new("Greymon", Stage::Adult);
        let snap = SnapshotBuilder::new(&species).build();
        let group = ConditionGroup::new().with(ConditionField::WinRatio, StatRange::default());

        let unmet = unmet_in_group(&group, &snap, &species);

        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].current, None);
    }

    #[test]
    fn win_ratio_bounds_are_exact() {
        let species = SpeciesDef::new("Greymon", Stage::Adult);
        let mut snap = SnapshotBuilder::new(&species).build();
        snap.battles_won_this_form = 2;
        snap.battles_lost_this_form = 1;

        assert!(!win_ratio_within(&snap, &StatRange::at_most(66)));
        assert!(win_ratio_within(&snap, &StatRange::at_most(67)));
        assert!(win_ratio_within(&snap, &StatRange::at_least(66)));
        assert!(!win_ratio_within(&snap, &StatRange::at_least(67)));

        let group = ConditionGroup::new().with(ConditionField::WinRatio, StatRange::at_most(66));
        let unmet = unmet_in_group(&group, &snap, &species);
        assert_eq!(unmet.len(), 1);
        assert_eq!(unmet[0].current, Some(66));
    }

    #[test]
    fn power_is_derived() {
        let mut species = SpeciesDef::new("Agumon", Stage::Child);
        species.base_power = 30;
        let mut snap = SnapshotBuilder::new(&species).strength(5).build();
        snap.effort = 2;

        assert_eq!(field_value(ConditionField::Power, &snap, &species), Some(45));
    }
}
