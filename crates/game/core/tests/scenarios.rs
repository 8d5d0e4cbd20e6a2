//! End-to-end scenarios through the public API: hatch, evolve, fight.

mod common;

use common::{HOUR, SECOND, T0, ver1_table};
use vpet_core::{
    Attribute, BattleKind, BattleResult, Combatant, ConditionField, ConditionGroup, EngineConfig,
    EvolutionRule, EvolutionVerdict, FixedRolls, LazyUpdateEngine, SeededRolls, Side,
    SnapshotBuilder, SpeciesDef, SpeciesId, SpeciesOracle, SpeciesTable, Stage, StatRange,
    TickInput, apply_battle_result, attribute_bonus, evaluate, evolve, feed_meat, hit_rate,
    replay, simulate, train,
};

fn id(name: &str) -> SpeciesId {
    SpeciesId::new(name)
}

#[test]
fn egg_hatches_after_eight_seconds() {
    let config = EngineConfig::default();
    let engine = LazyUpdateEngine::new(&config);
    let table = ver1_table();
    let egg = table.require(&id("Digitama")).expect("Digitama exists");
    let snap = SnapshotBuilder::new(egg).born_at(T0).build();

    let early = engine
        .apply_elapsed(&snap, egg, TickInput::at(T0 + 7 * SECOND))
        .snapshot;
    assert_eq!(
        evaluate(&early, &id("Digitama"), &table).expect("evaluate succeeds"),
        EvolutionVerdict::NotReady {
            remaining_seconds: 1
        }
    );

    let ready = engine
        .apply_elapsed(&snap, egg, TickInput::at(T0 + 8 * SECOND))
        .snapshot;
    assert_eq!(
        evaluate(&ready, &id("Digitama"), &table).expect("evaluate succeeds"),
        EvolutionVerdict::Ready(id("Botamon"))
    );

    let botamon = evolve(&ready, &id("Botamon"), &table).expect("Botamon exists");
    assert_eq!(botamon.species_id, id("Botamon"));
    assert_eq!(botamon.time_to_evolve_seconds, 600);
    assert_eq!(botamon.lifespan_seconds, 8);
}

#[test]
fn koromon_branches_on_care_mistakes() {
    let table = ver1_table();
    let koromon = table.require(&id("Koromon")).expect("Koromon exists");

    let mut snap = SnapshotBuilder::new(koromon).born_at(T0).build();
    snap.time_to_evolve_seconds = 0;

    snap.care_mistakes = 2;
    assert_eq!(
        evaluate(&snap, &id("Koromon"), &table).expect("evaluate succeeds"),
        EvolutionVerdict::Ready(id("Agumon"))
    );

    snap.care_mistakes = 5;
    assert_eq!(
        evaluate(&snap, &id("Koromon"), &table).expect("evaluate succeeds"),
        EvolutionVerdict::Ready(id("Betamon"))
    );
}

#[test]
fn first_satisfied_rule_wins() {
    let mut agumon = SpeciesDef::new("Agumon", Stage::Child);
    agumon.evolutions = vec![
        EvolutionRule::when(
            "Greymon",
            ConditionGroup::new().with(ConditionField::Trainings, StatRange::at_least(32)),
        ),
        EvolutionRule::when(
            "Tyranomon",
            ConditionGroup::new().with(ConditionField::CareMistakes, StatRange::at_most(3)),
        ),
        EvolutionRule::unconditional("Numemon"),
    ];
    let table: SpeciesTable = [agumon.clone()].into_iter().collect();
    let snap = SnapshotBuilder::new(&agumon).build();

    assert_eq!(
        evaluate(&snap, &agumon.id, &table).expect("evaluate succeeds"),
        EvolutionVerdict::Ready(id("Tyranomon"))
    );
}

#[test]
fn hit_rate_reference_values() {
    assert_eq!(hit_rate(30, 30, 0), 50.0);
    assert_eq!(hit_rate(100, 0, 0), 100.0);
    assert_eq!(hit_rate(0, 0, 0), 50.0);
    assert_eq!(attribute_bonus(Some(Attribute::Vaccine), Some(Attribute::Virus)), 5);
    assert_eq!(attribute_bonus(Some(Attribute::Virus), Some(Attribute::Vaccine)), -5);
    assert_eq!(attribute_bonus(Some(Attribute::Free), Some(Attribute::Data)), 0);
}

#[test]
fn same_rolls_same_battle() {
    let config = EngineConfig::default();
    let a = Combatant::new("Agumon", 45, Some(Attribute::Vaccine));
    let b = Combatant::new("Betamon", 23, Some(Attribute::Virus));
    let rolls = vec![12.5, 70.0, 80.0, 10.0, 3.0, 99.0, 42.0, 1.0, 65.0];

    let first = simulate(&a, &b, &mut FixedRolls::new(rolls.clone()), &config);
    let second = simulate(&a, &b, &mut FixedRolls::new(rolls), &config);

    assert_eq!(first, second);
    assert_eq!(first.digest(), second.digest());
    assert!(first.winner.is_some());
    assert_eq!(
        first.log[0].formula,
        "Hit Rate: ((45 * 100) / (45 + 23)) + 5 = 71.18%"
    );
}

#[test]
fn a_day_in_the_life() {
    let config = EngineConfig::default();
    let engine = LazyUpdateEngine::new(&config);
    let table = ver1_table();
    let agumon = table.require(&id("Agumon")).expect("Agumon exists");
    let betamon = table.require(&id("Betamon")).expect("Betamon exists");

    // ================================================================
    // Morning: feed and train
    // ================================================================
    let mut snap = SnapshotBuilder::new(agumon)
        .born_at(T0)
        .fullness(2)
        .strength(2)
        .build();
    snap = engine
        .apply_elapsed(&snap, agumon, TickInput::at(T0 + 3 * HOUR))
        .snapshot;
    assert_eq!(snap.fullness, 0);

    snap = feed_meat(&snap, agumon).expect("hungry creature eats").snapshot;
    assert_eq!(snap.fullness, 1);
    assert_eq!(snap.last_hunger_zero_at_epoch_ms, None);

    for _ in 0..4 {
        snap = train(&snap, agumon, 5).expect("training succeeds").snapshot;
    }
    assert_eq!(snap.strength, agumon.meter_cap());
    assert_eq!(snap.effort, 1);

    // ================================================================
    // Afternoon: a ranked battle against a Betamon
    // ================================================================
    let me = Combatant::from_snapshot(&snap, agumon).expect("creature can fight");
    assert_eq!(me.power, 30 + 5 + 5);
    let rival = Combatant::from_snapshot(
        &SnapshotBuilder::new(betamon).build(),
        betamon,
    )
    .expect("rival can fight");

    let mut rolls = SeededRolls::new(7);
    let outcome = simulate(&me, &rival, &mut rolls, &config);
    assert!(replay(&me, &rival, &outcome, &config));

    let result = BattleResult::for_side(&outcome, Side::A);
    let after = apply_battle_result(
        &snap,
        result,
        BattleKind::Ranked,
        &mut rolls,
        T0 + 4 * HOUR,
        &config,
    )
    .expect("creature has energy");
    assert_eq!(after.snapshot.battles_this_form(), u32::from(result != BattleResult::Draw));
    assert_eq!(after.snapshot.energy, snap.energy - 1);
}
