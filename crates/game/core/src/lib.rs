//! Deterministic virtual-creature engine.
//!
//! `vpet-core` owns the rules of a creature's life: lazy decay and care calls
//! ([`decay`]), evolution ([`evolution`]), battles ([`combat`]), caretaker
//! actions ([`care`]) and quest mode ([`quest`]). Every entry point takes a
//! [`StatSnapshot`] by reference plus an explicit `now` and returns a new
//! snapshot; nothing here reads a clock, starts a timer, or touches storage.
//! Hosts hold the per-creature lock and persist whatever comes back.
pub mod care;
pub mod combat;
pub mod config;
pub mod decay;
pub mod error;
pub mod evolution;
pub mod quest;
pub mod snapshot;
pub mod species;

pub use care::{
    ActionError, FeedOutcome, HealOutcome, Refusal, TrainingOutcome, TrainingResult, clean_waste,
    disturb_sleep, feed_meat, feed_protein, freeze, heal, reincarnate, thaw, train,
};
pub use combat::{
    AttackLog, AttackOutcome, BattleAftermath, BattleKind, BattleOutcome, BattleResult, Combatant,
    FixedRolls, RollSource, SeededRolls, Side, apply_battle_result, attribute_bonus, battle_seed,
    calculate_power, hit_rate, replay, simulate,
};
pub use config::EngineConfig;
pub use decay::{CareCallSystem, Elapsed, ElapsedReport, LazyUpdateEngine, TickInput};
pub use error::{CoreError, ErrorSeverity, GameError};
pub use evolution::{
    BlockReason, EvolutionVerdict, UnmetCondition, UnsupportedMechanic, evaluate, evolve,
};
pub use quest::{
    QuestArea, QuestBattle, QuestBook, QuestEnemy, QuestReport, QuestRun, QuestStop,
    run_quest_area,
};
pub use snapshot::{
    CallChannel, CallStatus, DeathReason, EpochMs, SanitizeReport, SnapshotBuilder, StatSnapshot,
};
pub use species::{
    Attribute, ConditionField, ConditionGroup, EvolutionCriteria, EvolutionRule, Requirement,
    SpeciesDef, SpeciesId, SpeciesOracle, SpeciesTable, Stage, StatRange,
};
