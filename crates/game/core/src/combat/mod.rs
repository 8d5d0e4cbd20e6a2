//! Battle resolution.
//!
//! Battles are pure: power and attribute go in, a full attack log comes out.
//! Randomness is injected through [`RollSource`], so any battle can be
//! replayed from its recorded rolls.
//!
//! - [`calculate_power`]: derived power of a stored creature
//! - [`hit_rate`]: per-attack hit chance with attribute advantage
//! - [`simulate`]: the round loop
//! - [`apply_battle_result`]: weight, energy, record, injury

mod aftermath;
mod hit;
mod power;
mod result;
mod rolls;
mod simulator;

pub use aftermath::{BattleAftermath, BattleKind, BattleResult, apply_battle_result};
pub use hit::{ZERO_POWER_HIT_RATE, attribute_bonus, hit_rate, hit_rate_formula};
pub use power::{FULL_STRENGTH, POWER_PER_EFFORT, calculate_power, strength_bonus};
pub use result::{AttackLog, AttackOutcome, BattleOutcome, Side};
pub use rolls::{FixedRolls, RollSource, SeededRolls, battle_seed};
pub use simulator::{Combatant, replay, simulate};
