//! Quest mode: a fixed ladder of enemies fought in order.

use crate::care::ActionError;
use crate::combat::{
    BattleKind, BattleOutcome, BattleResult, Combatant, RollSource, Side, apply_battle_result,
    simulate,
};
use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::snapshot::{EpochMs, StatSnapshot};
use crate::species::{Attribute, SpeciesDef};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestEnemy {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute: Option<Attribute>,
    pub power: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: bool,
}

impl QuestEnemy {
    pub fn combatant(&self) -> Combatant {
        Combatant::new(self.name.clone(), self.power, self.attribute)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestArea {
    pub id: String,
    pub name: String,
    pub enemies: Vec<QuestEnemy>,
}

/// All quest areas, in unlock order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestBook {
    areas: Vec<QuestArea>,
}

impl QuestBook {
    pub fn new(areas: Vec<QuestArea>) -> Self {
        Self { areas }
    }

    pub fn area(&self, id: &str) -> Result<&QuestArea, CoreError> {
        self.areas
            .iter()
            .find(|area| area.id == id)
            .ok_or_else(|| CoreError::UnknownQuestArea(id.to_owned()))
    }

    pub fn areas(&self) -> &[QuestArea] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

/// Why a quest run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestStop {
    /// Every enemy was beaten.
    Cleared,
    /// An enemy was not beaten (loss or draw).
    Defeated,
    /// No energy left for the next enemy.
    OutOfEnergy,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestBattle {
    pub enemy: String,
    pub boss: bool,
    pub result: BattleResult,
    pub injured: bool,
    pub outcome: BattleOutcome,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestReport {
    pub area_id: String,
    pub battles: Vec<QuestBattle>,
    pub stop: QuestStop,
}

impl QuestReport {
    pub fn cleared(&self) -> bool {
        self.stop == QuestStop::Cleared
    }

    pub fn total_rounds(&self) -> u32 {
        self.battles.iter().map(|battle| battle.outcome.rounds).sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestRun {
    pub snapshot: StatSnapshot,
    pub report: QuestReport,
}

/// Fights the enemies of `area` in order until one is not beaten.
///
/// The creature is side `A` in every battle. Each battle is recorded as a
/// quest battle. Fails only when the first battle cannot start.
pub fn run_quest_area(
    snapshot: &StatSnapshot,
    species: &SpeciesDef,
    area: &QuestArea,
    rolls: &mut impl RollSource,
    now: EpochMs,
    config: &EngineConfig,
) -> Result<QuestRun, ActionError> {
    snapshot.ensure_active()?;
    if snapshot.energy == 0 {
        return Err(ActionError::NotEnoughEnergy);
    }

    let mut snap = snapshot.clone();
    let mut battles = Vec::with_capacity(area.enemies.len());
    let mut stop = QuestStop::Cleared;

    for enemy in &area.enemies {
        if snap.energy == 0 {
            stop = QuestStop::OutOfEnergy;
            break;
        }

        let creature = Combatant::from_snapshot(&snap, species)?;
        let outcome = simulate(&creature, &enemy.combatant(), &mut *rolls, config);
        let result = BattleResult::for_side(&outcome, Side::A);
        let aftermath = apply_battle_result(&snap, result, BattleKind::Quest, &mut *rolls, now, config)?;
        snap = aftermath.snapshot;

        battles.push(QuestBattle {
            enemy: enemy.name.clone(),
            boss: enemy.boss,
            result,
            injured: aftermath.injured,
            outcome,
        });

        if result != BattleResult::Win {
            stop = QuestStop::Defeated;
            break;
        }
    }

    Ok(QuestRun {
        snapshot: snap,
        report: QuestReport {
            area_id: area.id.clone(),
            battles,
            stop,
        },
    })
}
