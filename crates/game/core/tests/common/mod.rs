#![allow(dead_code)]

use vpet_core::{
    Attribute, ConditionField, ConditionGroup, EvolutionCriteria, EvolutionRule, SpeciesDef,
    SpeciesTable, Stage, StatRange,
};

/// 2023-11-14T22:13:20Z
pub const T0: i64 = 1_700_000_000_000;
pub const SECOND: i64 = 1_000;
pub const MINUTE: i64 = 60 * SECOND;
pub const HOUR: i64 = 60 * MINUTE;
pub const DAY: i64 = 24 * HOUR;

fn species(
    id: &str,
    stage: Stage,
    cycles: (u32, u32, u32),
    max_overfeed: u32,
    tte_secs: Option<u64>,
) -> SpeciesDef {
    let mut def = SpeciesDef::new(id, stage);
    (
        def.hunger_cycle_minutes,
        def.strength_cycle_minutes,
        def.waste_cycle_minutes,
    ) = cycles;
    def.max_overfeed = max_overfeed;
    def.max_energy = 20;
    def.min_weight = 10;
    def.evolution_criteria = tte_secs.map(|secs| EvolutionCriteria {
        time_to_evolve_secs: Some(secs),
        ..EvolutionCriteria::default()
    });
    def
}

/// Egg to child line used across the engine tests.
pub fn ver1_table() -> SpeciesTable {
    let mut digitama = species("Digitama", Stage::Digitama, (0, 0, 0), 0, Some(8));
    digitama.evolutions.push(EvolutionRule::unconditional("Botamon"));

    let mut botamon = species("Botamon", Stage::BabyI, (3, 3, 3), 3, Some(600));
    botamon.evolutions.push(EvolutionRule::unconditional("Koromon"));

    let mut koromon = species("Koromon", Stage::BabyII, (4, 4, 60), 2, Some(43_200));
    koromon.evolutions.push(EvolutionRule::when(
        "Agumon",
        ConditionGroup::new().with(ConditionField::CareMistakes, StatRange::between(0, 3)),
    ));
    koromon.evolutions.push(EvolutionRule::when(
        "Betamon",
        ConditionGroup::new().with(ConditionField::CareMistakes, StatRange::between(4, 99)),
    ));

    let mut agumon = species("Agumon", Stage::Child, (5, 5, 120), 4, None);
    agumon.base_power = 30;
    agumon.attribute = Some(Attribute::Vaccine);

    let mut betamon = species("Betamon", Stage::Child, (5, 5, 120), 4, None);
    betamon.base_power = 30;
    betamon.attribute = Some(Attribute::Virus);

    [digitama, botamon, koromon, agumon, betamon]
        .into_iter()
        .collect()
}
