//! Per-creature single-writer host service.
//!
//! Every operation runs under the creature's async mutex as
//! lock → load → catch up to `now` → operation → save. Calls for different
//! creatures never wait on each other. Repository calls run on the blocking
//! pool.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use vpet_content::{Content, ContentFactory};
use vpet_core::{
    BattleAftermath, BattleKind, BattleOutcome, BattleResult, Combatant, ElapsedReport, EpochMs,
    EvolutionVerdict, FeedOutcome, HealOutcome, LazyUpdateEngine, QuestReport, SeededRolls, Side,
    SnapshotBuilder, SpeciesDef, SpeciesId, SpeciesOracle, StatSnapshot, TickInput,
    TrainingOutcome, apply_battle_result, battle_seed, calculate_power, evaluate, run_quest_area,
    simulate,
};

use crate::api::{Result, RuntimeError};
use crate::clock::{Clock, SystemClock};
use crate::config::{RuntimeConfig, SleepSchedule};
use crate::repository::{
    CreatureId, CreatureRecord, CreatureRepository, FileCreatureRepository, RepositoryError,
};

/// Roll stream for the battle itself.
const BATTLE_STREAM: u32 = 0;
/// Roll stream for the post-battle injury check.
const INJURY_STREAM: u32 = 1;

/// A caught-up view of one creature.
#[derive(Clone, Debug)]
pub struct CreatureStatus {
    pub record: CreatureRecord,
    pub species_name: String,
    pub power: u32,
    pub asleep: bool,
    /// `None` once the creature has died.
    pub verdict: Option<EvolutionVerdict>,
    /// What the catch-up pass for this call did.
    pub report: ElapsedReport,
}

/// A battle fought through the service.
#[derive(Clone, Debug)]
pub struct BattleReport {
    pub creature: Combatant,
    pub opponent: Combatant,
    pub outcome: BattleOutcome,
    pub result: BattleResult,
    pub aftermath: BattleAftermath,
    /// Seed of the battle roll stream, enough to replay the fight.
    pub seed: u64,
}

/// State available to an operation after the catch-up pass.
struct Tick<'a> {
    now: EpochMs,
    asleep: bool,
    species: &'a SpeciesDef,
    report: ElapsedReport,
}

pub struct CreatureService {
    repo: Arc<dyn CreatureRepository>,
    content: Arc<Content>,
    clock: Arc<dyn Clock>,
    egg: SpeciesId,
    sleep: SleepSchedule,
    locks: Mutex<HashMap<CreatureId, Arc<Mutex<()>>>>,
}

impl CreatureService {
    pub fn new(
        repo: Arc<dyn CreatureRepository>,
        content: Content,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            content: Arc::new(content),
            clock,
            egg: SpeciesId::new(RuntimeConfig::DEFAULT_EGG_SPECIES),
            sleep: SleepSchedule::default(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a file-backed service on the system clock from `config`.
    pub fn open(config: &RuntimeConfig) -> Result<Self> {
        let content = ContentFactory::new(&config.data_dir)
            .load_all()
            .map_err(RuntimeError::Content)?;
        content.species.require(&config.egg_species)?;

        let repo = FileCreatureRepository::new(&config.save_dir)?;
        let clock = match config.utc_offset_minutes {
            Some(minutes) => SystemClock::with_offset(minutes),
            None => SystemClock::new(),
        };

        info!(
            data_dir = %config.data_dir.display(),
            save_dir = %config.save_dir.display(),
            species = content.species.len(),
            "creature service ready"
        );

        Ok(Self::new(Arc::new(repo), content, Arc::new(clock))
            .with_egg_species(config.egg_species.clone())
            .with_sleep_schedule(config.sleep))
    }

    #[must_use]
    pub fn with_egg_species(mut self, egg: SpeciesId) -> Self {
        self.egg = egg;
        self
    }

    #[must_use]
    pub fn with_sleep_schedule(mut self, sleep: SleepSchedule) -> Self {
        self.sleep = sleep;
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub async fn list(&self) -> Result<Vec<CreatureId>> {
        self.blocking(|repo| repo.list_ids()).await
    }

    /// Creates a new creature as a fresh egg.
    pub async fn hatch(&self, id: &CreatureId) -> Result<CreatureRecord> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        if self.exists(id).await? {
            return Err(RuntimeError::AlreadyExists(id.clone()));
        }

        let egg = self.content.species.require(&self.egg)?;
        let now = self.clock.now_ms();
        let snapshot = SnapshotBuilder::new(egg).born_at(now).build();
        let record = CreatureRecord::new(id.clone(), snapshot, rand::random());
        let saved = record.clone();
        self.blocking(move |repo| repo.save(&saved)).await?;

        info!(creature = %id, species = %egg.id, "hatched");
        Ok(record)
    }

    /// Deletes a creature for good.
    pub async fn release(&self, id: &CreatureId) -> Result<()> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        if !self.exists(id).await? {
            return Err(RuntimeError::CreatureNotFound(id.clone()));
        }
        let target = id.clone();
        self.blocking(move |repo| repo.delete(&target)).await?;

        // Tasks already queued on this lock keep sharing it.
        let mut locks = self.locks.lock().await;
        if Arc::strong_count(&lock) == 2 {
            locks.remove(id);
        }
        drop(locks);

        info!(creature = %id, "released");
        Ok(())
    }

    /// Catches the creature up to now and reports where it stands.
    pub async fn status(&self, id: &CreatureId) -> Result<CreatureStatus> {
        self.with_record(id, |record, tick| {
            let verdict = if record.snapshot.is_dead {
                None
            } else {
                Some(evaluate(
                    &record.snapshot,
                    &record.snapshot.species_id,
                    &self.content.species,
                )?)
            };
            Ok(CreatureStatus {
                record: record.clone(),
                species_name: tick.species.display_name().to_owned(),
                power: calculate_power(&record.snapshot, tick.species),
                asleep: tick.asleep,
                verdict,
                report: tick.report.clone(),
            })
        })
        .await
    }

    pub async fn feed_meat(&self, id: &CreatureId) -> Result<FeedOutcome> {
        self.with_record(id, |record, tick| {
            let snap = wake_if_asleep(record, tick)?;
            let outcome = vpet_core::feed_meat(&snap, tick.species)?;
            record.snapshot = outcome.snapshot.clone();
            Ok(outcome)
        })
        .await
    }

    pub async fn feed_protein(&self, id: &CreatureId) -> Result<FeedOutcome> {
        self.with_record(id, |record, tick| {
            let snap = wake_if_asleep(record, tick)?;
            let outcome = vpet_core::feed_protein(&snap, tick.species)?;
            record.snapshot = outcome.snapshot.clone();
            Ok(outcome)
        })
        .await
    }

    pub async fn train(&self, id: &CreatureId, hits: u32) -> Result<TrainingOutcome> {
        self.with_record(id, |record, tick| {
            let snap = wake_if_asleep(record, tick)?;
            let outcome = vpet_core::train(&snap, tick.species, hits)?;
            record.snapshot = outcome.snapshot.clone();
            Ok(outcome)
        })
        .await
    }

    pub async fn clean(&self, id: &CreatureId) -> Result<StatSnapshot> {
        self.with_record(id, |record, _tick| {
            record.snapshot = vpet_core::clean_waste(&record.snapshot)?;
            Ok(record.snapshot.clone())
        })
        .await
    }

    pub async fn heal(&self, id: &CreatureId) -> Result<HealOutcome> {
        self.with_record(id, |record, tick| {
            let outcome = vpet_core::heal(&record.snapshot, tick.species)?;
            record.snapshot = outcome.snapshot.clone();
            Ok(outcome)
        })
        .await
    }

    /// Flips the room light and returns whether it is now on.
    ///
    /// A sleeping creature with the light on raises a sleep call.
    pub async fn toggle_lights(&self, id: &CreatureId) -> Result<bool> {
        self.with_record(id, |record, _tick| {
            record.lights_on = !record.lights_on;
            Ok(record.lights_on)
        })
        .await
    }

    /// Fights `opponent` with rolls derived from the creature's seed.
    pub async fn battle(
        &self,
        id: &CreatureId,
        opponent: Combatant,
        kind: BattleKind,
    ) -> Result<BattleReport> {
        self.with_record(id, |record, tick| {
            let snap = wake_if_asleep(record, tick)?;
            if snap.energy == 0 {
                return Err(vpet_core::ActionError::NotEnoughEnergy.into());
            }

            let config = &self.content.config;
            let creature = Combatant::from_snapshot(&snap, tick.species)?;
            let seed = battle_seed(record.seed, record.battle_nonce, BATTLE_STREAM);
            let outcome = simulate(&creature, &opponent, &mut SeededRolls::new(seed), config);
            let result = BattleResult::for_side(&outcome, Side::A);

            let mut injury_rolls =
                SeededRolls::new(battle_seed(record.seed, record.battle_nonce, INJURY_STREAM));
            let aftermath =
                apply_battle_result(&snap, result, kind, &mut injury_rolls, tick.now, config)?;

            record.battle_nonce += 1;
            record.snapshot = aftermath.snapshot.clone();
            debug!(creature = %record.id, %kind, ?result, rounds = outcome.rounds, "battle");

            Ok(BattleReport {
                creature,
                opponent,
                outcome,
                result,
                aftermath,
                seed,
            })
        })
        .await
    }

    /// Runs one quest area from the bundled quest book.
    pub async fn quest(&self, id: &CreatureId, area_id: &str) -> Result<QuestReport> {
        self.with_record(id, |record, tick| {
            let area = self.content.quests.area(area_id)?;
            let snap = wake_if_asleep(record, tick)?;
            let seed = battle_seed(record.seed, record.battle_nonce, BATTLE_STREAM);

            let run = run_quest_area(
                &snap,
                tick.species,
                area,
                &mut SeededRolls::new(seed),
                tick.now,
                &self.content.config,
            )?;

            record.battle_nonce += 1;
            record.snapshot = run.snapshot;
            info!(creature = %record.id, area = %area.id, stop = %run.report.stop, "quest finished");
            Ok(run.report)
        })
        .await
    }

    /// Evolves the creature if it is ready.
    ///
    /// Returns the verdict it was evolved on; `Ready(target)` means the
    /// creature is now `target`.
    pub async fn evolve(&self, id: &CreatureId) -> Result<EvolutionVerdict> {
        self.with_record(id, |record, _tick| {
            let species = &self.content.species;
            let verdict = evaluate(&record.snapshot, &record.snapshot.species_id, species)?;
            if let Some(target) = verdict.ready_target() {
                let from = record.snapshot.species_id.clone();
                record.snapshot = vpet_core::evolve(&record.snapshot, target, species)?;
                info!(creature = %record.id, %from, to = %target, "evolved");
            }
            Ok(verdict)
        })
        .await
    }

    pub async fn disturb_sleep(&self, id: &CreatureId) -> Result<StatSnapshot> {
        self.with_record(id, |record, _tick| {
            record.snapshot = vpet_core::disturb_sleep(&record.snapshot)?;
            Ok(record.snapshot.clone())
        })
        .await
    }

    pub async fn freeze(&self, id: &CreatureId) -> Result<StatSnapshot> {
        self.with_record(id, |record, tick| {
            record.snapshot = vpet_core::freeze(&record.snapshot, tick.now)?;
            info!(creature = %record.id, "frozen");
            Ok(record.snapshot.clone())
        })
        .await
    }

    pub async fn thaw(&self, id: &CreatureId) -> Result<StatSnapshot> {
        self.with_record(id, |record, tick| {
            record.snapshot = vpet_core::thaw(&record.snapshot, tick.species, tick.now)?;
            info!(creature = %record.id, "thawed");
            Ok(record.snapshot.clone())
        })
        .await
    }

    /// Starts a dead creature over as a fresh egg.
    pub async fn reincarnate(&self, id: &CreatureId) -> Result<StatSnapshot> {
        self.with_record(id, |record, tick| {
            let egg = self.content.species.require(&self.egg)?;
            record.snapshot = vpet_core::reincarnate(&record.snapshot, egg, tick.now)?;
            info!(
                creature = %record.id,
                count = record.snapshot.total_reincarnations,
                "reincarnated"
            );
            Ok(record.snapshot.clone())
        })
        .await
    }

    async fn lock_for(&self, id: &CreatureId) -> Arc<Mutex<()>> {
        self.locks.lock().await.entry(id.clone()).or_default().clone()
    }

    /// Runs `call` against the repository on the blocking pool.
    async fn blocking<T, F>(&self, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CreatureRepository) -> std::result::Result<T, RepositoryError>
            + Send
            + 'static,
    {
        let repo = Arc::clone(&self.repo);
        Ok(tokio::task::spawn_blocking(move || call(repo.as_ref())).await??)
    }

    async fn exists(&self, id: &CreatureId) -> Result<bool> {
        let id = id.clone();
        self.blocking(move |repo| Ok(repo.exists(&id))).await
    }

    /// Runs `op` on the caught-up record under the creature's lock.
    ///
    /// The caught-up record is saved even when `op` fails; on success the
    /// record as left by `op` is saved instead.
    async fn with_record<T>(
        &self,
        id: &CreatureId,
        op: impl FnOnce(&mut CreatureRecord, &Tick<'_>) -> Result<T>,
    ) -> Result<T> {
        let lock = self.lock_for(id).await;
        let _guard = lock.lock().await;

        let target = id.clone();
        let mut record = self
            .blocking(move |repo| repo.load(&target))
            .await?
            .ok_or_else(|| RuntimeError::CreatureNotFound(id.clone()))?;
        let species = self.content.species.require(&record.snapshot.species_id)?;

        let now = self.clock.now_ms();
        let offset = self.clock.utc_offset_minutes(now);
        let asleep = self.sleep.is_asleep(now, offset);
        let input = TickInput::at(now)
            .with_utc_offset(offset)
            .with_sleep_call(asleep && record.lights_on);

        let elapsed = LazyUpdateEngine::new(&self.content.config).apply_elapsed(
            &record.snapshot,
            species,
            input,
        );
        log_catch_up(id, &elapsed.report);
        record.snapshot = elapsed.snapshot;

        let tick = Tick {
            now,
            asleep,
            species,
            report: elapsed.report,
        };

        let mut working = record.clone();
        let (outcome, kept) = match op(&mut working, &tick) {
            Ok(value) => (Ok(value), working),
            Err(err) => (Err(err), record),
        };
        self.blocking(move |repo| repo.save(&kept)).await?;
        outcome
    }
}

/// Interacting with a sleeping creature wakes it up.
fn wake_if_asleep(record: &CreatureRecord, tick: &Tick<'_>) -> Result<StatSnapshot> {
    if tick.asleep {
        Ok(vpet_core::disturb_sleep(&record.snapshot)?)
    } else {
        Ok(record.snapshot.clone())
    }
}

fn log_catch_up(id: &CreatureId, report: &ElapsedReport) {
    if report.missing_checkpoint {
        warn!(creature = %id, "record had no checkpoint; decay starts from now");
    }
    if report.clock_skew {
        warn!(creature = %id, "checkpoint is in the future; no time elapsed");
    }
    if !report.sanitized.is_clean() {
        warn!(creature = %id, fields = ?report.sanitized.clamped, "clamped out-of-range fields");
    }
    if let Some(reason) = report.died {
        info!(creature = %id, %reason, "creature died");
    }
    if report.waste_penalties > 0 {
        warn!(creature = %id, periods = report.waste_penalties, "waste left at the cap");
    }
    if report.care_mistakes_added > 0 {
        debug!(creature = %id, added = report.care_mistakes_added, "care mistakes");
    }
    debug!(
        creature = %id,
        elapsed_secs = report.elapsed_seconds,
        days_aged = report.days_aged,
        paused = report.paused,
        "caught up"
    );
}
