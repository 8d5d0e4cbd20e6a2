/// Engine tunables and record invariants.
///
/// Associated constants are bounds that persisted records rely on and never
/// change at runtime. Fields are tunable and load from `config.toml`; keys
/// missing from the file keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Seconds a meter may sit at zero before the creature starves.
    pub starvation_window_secs: u64,
    /// Seconds strength may sit at zero before the creature collapses.
    pub exhaustion_window_secs: u64,
    /// Seconds an untreated injury is survivable.
    pub injury_neglect_secs: u64,
    /// Injuries in one form that kill the creature.
    pub injury_overload_count: u32,
    /// Seconds waste may sit at the cap before each extra injury and care mistake.
    pub waste_neglect_period_secs: u64,

    /// Hunger call timeout before it counts as a care mistake.
    pub hunger_call_timeout_secs: u64,
    /// Strength call timeout before it counts as a care mistake.
    pub strength_call_timeout_secs: u64,
    /// Sleep call timeout before it counts as a care mistake.
    pub sleep_call_timeout_secs: u64,

    /// Overdose level at which strength decay is absorbed by the overdose counter.
    pub overdose_buffer_threshold: u32,

    /// Hits needed to win a battle.
    pub hits_to_win: u32,
    /// Round cap after which a battle ends in a draw.
    pub max_battle_rounds: u32,

    /// Injury chance (%) after a won battle.
    pub win_injury_chance: u32,
    /// Base injury chance (%) after a lost battle.
    pub loss_injury_base: u32,
    /// Extra injury chance (%) per protein overdose after a lost battle.
    pub loss_injury_per_overdose: u32,
    /// Upper bound for the loss injury chance (%).
    pub max_injury_chance: u32,
    /// Weight lost per battle.
    pub battle_weight_loss: u32,
    /// Energy spent per battle.
    pub battle_energy_cost: u32,
}

impl EngineConfig {
    // ===== record invariants =====
    /// Meter cap before a species' overfeed allowance is added.
    pub const BASE_METER_CAP: u32 = 5;
    /// Maximum waste piles.
    pub const MAX_WASTE: u32 = 8;
    /// Maximum protein overdose.
    pub const MAX_PROTEIN_OVERDOSE: u32 = 7;
    /// Cap on effort hearts.
    pub const MAX_EFFORT: u32 = 5;
    /// Proteins fed per energy/overdose step.
    pub const PROTEINS_PER_STEP: u32 = 4;
    /// Trainings per effort heart.
    pub const TRAININGS_PER_EFFORT: u32 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STARVATION_WINDOW_SECS: u64 = 12 * 60 * 60;
    pub const DEFAULT_EXHAUSTION_WINDOW_SECS: u64 = 12 * 60 * 60;
    pub const DEFAULT_INJURY_NEGLECT_SECS: u64 = 6 * 60 * 60;
    pub const DEFAULT_INJURY_OVERLOAD_COUNT: u32 = 15;
    pub const DEFAULT_WASTE_NEGLECT_PERIOD_SECS: u64 = 8 * 60 * 60;
    pub const DEFAULT_HUNGER_CALL_TIMEOUT_SECS: u64 = 10 * 60;
    pub const DEFAULT_STRENGTH_CALL_TIMEOUT_SECS: u64 = 10 * 60;
    pub const DEFAULT_SLEEP_CALL_TIMEOUT_SECS: u64 = 60 * 60;
    pub const DEFAULT_OVERDOSE_BUFFER_THRESHOLD: u32 = 6;
    pub const DEFAULT_HITS_TO_WIN: u32 = 3;
    pub const DEFAULT_MAX_BATTLE_ROUNDS: u32 = 100;
    pub const DEFAULT_WIN_INJURY_CHANCE: u32 = 20;
    pub const DEFAULT_LOSS_INJURY_BASE: u32 = 10;
    pub const DEFAULT_LOSS_INJURY_PER_OVERDOSE: u32 = 10;
    pub const DEFAULT_MAX_INJURY_CHANCE: u32 = 80;
    pub const DEFAULT_BATTLE_WEIGHT_LOSS: u32 = 4;
    pub const DEFAULT_BATTLE_ENERGY_COST: u32 = 1;

    pub fn new() -> Self {
        Self {
            starvation_window_secs: Self::DEFAULT_STARVATION_WINDOW_SECS,
            exhaustion_window_secs: Self::DEFAULT_EXHAUSTION_WINDOW_SECS,
            injury_neglect_secs: Self::DEFAULT_INJURY_NEGLECT_SECS,
            injury_overload_count: Self::DEFAULT_INJURY_OVERLOAD_COUNT,
            waste_neglect_period_secs: Self::DEFAULT_WASTE_NEGLECT_PERIOD_SECS,
            hunger_call_timeout_secs: Self::DEFAULT_HUNGER_CALL_TIMEOUT_SECS,
            strength_call_timeout_secs: Self::DEFAULT_STRENGTH_CALL_TIMEOUT_SECS,
            sleep_call_timeout_secs: Self::DEFAULT_SLEEP_CALL_TIMEOUT_SECS,
            overdose_buffer_threshold: Self::DEFAULT_OVERDOSE_BUFFER_THRESHOLD,
            hits_to_win: Self::DEFAULT_HITS_TO_WIN,
            max_battle_rounds: Self::DEFAULT_MAX_BATTLE_ROUNDS,
            win_injury_chance: Self::DEFAULT_WIN_INJURY_CHANCE,
            loss_injury_base: Self::DEFAULT_LOSS_INJURY_BASE,
            loss_injury_per_overdose: Self::DEFAULT_LOSS_INJURY_PER_OVERDOSE,
            max_injury_chance: Self::DEFAULT_MAX_INJURY_CHANCE,
            battle_weight_loss: Self::DEFAULT_BATTLE_WEIGHT_LOSS,
            battle_energy_cost: Self::DEFAULT_BATTLE_ENERGY_COST,
        }
    }

    /// Injury chance (%) for the given battle result.
    pub fn injury_chance(&self, won: bool, protein_overdose: u32) -> u32 {
        if won {
            self.win_injury_chance
        } else {
            self.loss_injury_base
                .saturating_add(protein_overdose.saturating_mul(self.loss_injury_per_overdose))
                .min(self.max_injury_chance)
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
