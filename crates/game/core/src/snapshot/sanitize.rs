//! Clamping of records read from untrusted storage.

use super::StatSnapshot;
use crate::config::EngineConfig;
use crate::species::SpeciesDef;

/// Fields that were out of range and have been clamped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub clamped: Vec<&'static str>,
}

impl SanitizeReport {
    pub fn is_clean(&self) -> bool {
        self.clamped.is_empty()
    }
}

fn clamp_u32(value: &mut u32, max: u32, name: &'static str, report: &mut SanitizeReport) {
    if *value > max {
        *value = max;
        report.clamped.push(name);
    }
}

/// Countdowns live in `1..=cycle`; a disabled cycle pins them to 0.
fn clamp_countdown(value: &mut i64, cycle: i64, name: &'static str, report: &mut SanitizeReport) {
    let clamped = if cycle <= 0 { 0 } else { (*value).clamp(1, cycle) };
    if clamped != *value {
        *value = clamped;
        report.clamped.push(name);
    }
}

impl StatSnapshot {
    /// Clamps every bounded field to the nearest valid value for `species`.
    pub fn sanitize(&mut self, species: &SpeciesDef) -> SanitizeReport {
        let mut report = SanitizeReport::default();
        let cap = species.meter_cap();

        clamp_u32(&mut self.fullness, cap, "fullness", &mut report);
        clamp_u32(&mut self.strength, cap, "strength", &mut report);
        clamp_u32(
            &mut self.waste_count,
            EngineConfig::MAX_WASTE,
            "wasteCount",
            &mut report,
        );
        clamp_u32(
            &mut self.protein_overdose_count,
            EngineConfig::MAX_PROTEIN_OVERDOSE,
            "proteinOverdoseCount",
            &mut report,
        );
        clamp_u32(
            &mut self.effort,
            EngineConfig::MAX_EFFORT,
            "effort",
            &mut report,
        );

        clamp_countdown(
            &mut self.hunger_countdown_seconds,
            species.hunger_cycle_secs(),
            "hungerCountdownSeconds",
            &mut report,
        );
        clamp_countdown(
            &mut self.strength_countdown_seconds,
            species.strength_cycle_secs(),
            "strengthCountdownSeconds",
            &mut report,
        );
        clamp_countdown(
            &mut self.waste_countdown_seconds,
            species.waste_cycle_secs(),
            "wasteCountdownSeconds",
            &mut report,
        );

        if self.fullness > 0 && self.last_hunger_zero_at_epoch_ms.is_some() {
            self.last_hunger_zero_at_epoch_ms = None;
            report.clamped.push("lastHungerZeroAtEpochMs");
        }
        if self.strength > 0 && self.last_strength_zero_at_epoch_ms.is_some() {
            self.last_strength_zero_at_epoch_ms = None;
            report.clamped.push("lastStrengthZeroAtEpochMs");
        }

        if self.waste_count < EngineConfig::MAX_WASTE && self.waste_full_since_epoch_ms.is_some() {
            self.waste_full_since_epoch_ms = None;
            report.clamped.push("wasteFullSinceEpochMs");
        }

        if self.is_injured && self.injured_at_epoch_ms.is_none() {
            self.injured_at_epoch_ms = self.last_checkpoint_epoch_ms;
            report.clamped.push("injuredAtEpochMs");
        }
        if !self.is_injured && self.injured_at_epoch_ms.is_some() {
            self.injured_at_epoch_ms = None;
            report.clamped.push("injuredAtEpochMs");
        }

        let checkpoint = self.last_checkpoint_epoch_ms;
        for (channel, name) in [
            (&mut self.call_status.hunger, "callStatus.hunger"),
            (&mut self.call_status.strength, "callStatus.strength"),
            (&mut self.call_status.sleep, "callStatus.sleep"),
        ] {
            if channel.active && channel.started_at_epoch_ms.is_none() {
                channel.started_at_epoch_ms = checkpoint;
                if checkpoint.is_none() {
                    channel.active = false;
                }
                report.clamped.push(name);
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotBuilder;
    use crate::species::Stage;

    fn koromon() -> SpeciesDef {
        let mut def = SpeciesDef::new("Koromon", Stage::BabyII);
        def.hunger_cycle_minutes = 4;
        def.strength_cycle_minutes = 4;
        def.waste_cycle_minutes = 60;
        def.max_overfeed = 2;
        def
    }

    #[test]
    fn corrupted_fields_are_clamped() {
        let species = koromon();
        let mut snap = SnapshotBuilder::new(&species).born_at(0).build();
        snap.fullness = 40;
        snap.waste_count = 12;
        snap.protein_overdose_count = 9;
        snap.hunger_countdown_seconds = -50;
        snap.waste_countdown_seconds = 99_999;

        let report = snap.sanitize(&species);

        assert_eq!(snap.fullness, 7);
        assert_eq!(snap.waste_count, 8);
        assert_eq!(snap.protein_overdose_count, 7);
        assert_eq!(snap.hunger_countdown_seconds, 1);
        assert_eq!(snap.waste_countdown_seconds, 3_600);
        assert!(report.clamped.contains(&"fullness"));
        assert!(report.clamped.contains(&"hungerCountdownSeconds"));
    }

    #[test]
    fn waste_clock_needs_full_waste() {
        let species = koromon();
        let mut snap = SnapshotBuilder::new(&species).born_at(0).build();
        snap.waste_count = 3;
        snap.waste_full_since_epoch_ms = Some(0);

        let report = snap.sanitize(&species);

        assert_eq!(snap.waste_full_since_epoch_ms, None);
        assert_eq!(report.clamped, vec!["wasteFullSinceEpochMs"]);
    }

    #[test]
    fn valid_snapshot_is_untouched() {
        let species = koromon();
        let mut snap = SnapshotBuilder::new(&species).born_at(0).fullness(3).build();
        let before = snap.clone();
        assert!(snap.sanitize(&species).is_clean());
        assert_eq!(snap, before);
    }
}
