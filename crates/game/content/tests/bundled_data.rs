//! The data shipped in `data/` loads and drives the engine as expected.

use vpet_content::ContentFactory;
use vpet_core::{
    BlockReason, EngineConfig, EvolutionVerdict, SnapshotBuilder, SpeciesId, SpeciesOracle,
    SpeciesTable, Stage, StatSnapshot, evaluate,
};

fn species() -> SpeciesTable {
    ContentFactory::bundled()
        .load_species()
        .expect("bundled species.ron loads")
}

fn ready_to_evolve(table: &SpeciesTable, id: &str) -> StatSnapshot {
    let def = table
        .require(&SpeciesId::new(id))
        .expect("species is bundled");
    let mut snap = SnapshotBuilder::new(def).build();
    snap.time_to_evolve_seconds = 0;
    snap
}

fn verdict(table: &SpeciesTable, snap: &StatSnapshot) -> EvolutionVerdict {
    evaluate(snap, &snap.species_id, table).expect("evaluate succeeds")
}

#[test]
fn everything_loads() {
    let content = ContentFactory::bundled()
        .load_all()
        .expect("bundled content loads");

    assert_eq!(content.config, EngineConfig::default());
    assert_eq!(content.species.len(), 17);
    assert!(content.species.dangling_references().is_empty());
    assert_eq!(content.quests.len(), 8);

    let last = content.quests.area("areaF").expect("final area exists");
    let boss = last.enemies.last().expect("final area has enemies");
    assert!(boss.boss);
    assert_eq!(boss.power, 220);
}

#[test]
fn every_non_terminal_species_has_a_time_gate() {
    for def in species().iter() {
        if !def.is_terminal() {
            assert!(
                def.time_to_evolve_secs().is_some(),
                "{} can evolve but has no time gate",
                def.id
            );
        }
        if def.stage == Stage::Ohakadamon {
            assert!(def.is_terminal());
            assert_eq!(def.hunger_cycle_minutes, 0);
        }
    }
}

#[test]
fn agumon_branches() {
    let table = species();

    let mut snap = ready_to_evolve(&table, "Agumon");
    snap.trainings = 40;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("Greymon"))
    );

    snap.trainings = 10;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("Devimon"))
    );

    // Five mistakes, little training: one of the Numemon fallback groups.
    snap.care_mistakes = 5;
    snap.trainings = 2;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("Numemon"))
    );

    snap.trainings = 10;
    snap.overfeed_count = 3;
    snap.sleep_disturbances = 4;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("Tyranomon"))
    );
}

#[test]
fn betamon_branches() {
    let table = species();

    let mut snap = ready_to_evolve(&table, "Betamon");
    snap.care_mistakes = 4;
    snap.trainings = 10;
    snap.overfeed_count = 5;
    snap.sleep_disturbances = 2;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("Seadramon"))
    );

    snap.overfeed_count = 0;
    snap.sleep_disturbances = 9;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("Airdramon"))
    );
}

#[test]
fn adults_need_a_battle_record() {
    let table = species();

    let mut snap = ready_to_evolve(&table, "Greymon");
    snap.battles_won_this_form = 10;
    snap.battles_lost_this_form = 5;
    match verdict(&table, &snap) {
        EvolutionVerdict::Blocked(reasons) => {
            assert!(matches!(reasons[0], BlockReason::Criteria(_)));
        }
        other => panic!("expected a blocked verdict, got {other:?}"),
    }

    snap.battles_won_this_form = 12;
    snap.battles_lost_this_form = 3;
    assert_eq!(
        verdict(&table, &snap),
        EvolutionVerdict::Ready(SpeciesId::new("MetalGreymonVirus"))
    );
}
