//! Subcommands and their execution.

use anyhow::{Context, Result};
use clap::Subcommand;
use vpet_core::{Attribute, BattleKind, Combatant};
use vpet_runtime::{CreatureId, CreatureService};

use crate::render;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Hatch a new egg
    Hatch { name: CreatureId },

    /// Show a creature's current state
    Status {
        name: CreatureId,
        /// Print the stored record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved creatures
    List,

    /// Feed meat (or protein with --protein)
    Feed {
        name: CreatureId,
        #[arg(long)]
        protein: bool,
    },

    /// Record a training session with HITS hits out of five
    Train {
        name: CreatureId,
        #[arg(value_parser = clap::value_parser!(u32).range(0..=5))]
        hits: u32,
    },

    /// Flush all waste
    Clean { name: CreatureId },

    /// Give one medicine dose
    Heal { name: CreatureId },

    /// Toggle the room light
    Lights { name: CreatureId },

    /// Fight an opponent
    Battle {
        name: CreatureId,
        /// Opponent power
        #[arg(long)]
        power: u32,
        /// Opponent attribute (Vaccine, Data, Virus, Free)
        #[arg(long, value_parser = parse_attribute)]
        attribute: Option<Attribute>,
        /// Opponent display name
        #[arg(long, default_value = "Rival")]
        opponent: String,
        /// practice or ranked
        #[arg(long, default_value = "ranked", value_parser = parse_kind)]
        kind: BattleKind,
        /// Print every attack
        #[arg(long)]
        log: bool,
    },

    /// Run a quest area
    Quest { name: CreatureId, area: String },

    /// List quest areas
    Quests,

    /// Evolve if ready, otherwise explain what is missing
    Evolve { name: CreatureId },

    /// Put the creature in the fridge
    Freeze { name: CreatureId },

    /// Take the creature out of the fridge
    Thaw { name: CreatureId },

    /// Start a dead creature over as an egg
    Reincarnate { name: CreatureId },

    /// Delete a creature
    Release { name: CreatureId },
}

fn parse_attribute(value: &str) -> Result<Attribute, String> {
    value
        .parse()
        .map_err(|_| format!("unknown attribute {value:?} (Vaccine, Data, Virus, Free)"))
}

fn parse_kind(value: &str) -> Result<BattleKind, String> {
    match value.parse() {
        Ok(BattleKind::Quest) | Err(_) => {
            Err(format!("unknown battle kind {value:?} (practice, ranked)"))
        }
        Ok(kind) => Ok(kind),
    }
}

impl Command {
    pub async fn execute(self, service: &CreatureService) -> Result<()> {
        match self {
            Command::Hatch { name } => {
                let record = service.hatch(&name).await?;
                println!("{} hatched as {}", name, record.snapshot.species_id);
            }
            Command::Status { name, json } => {
                let status = service.status(&name).await?;
                if json {
                    let text = serde_json::to_string_pretty(&status.record)
                        .context("failed to encode record")?;
                    println!("{}", text);
                } else {
                    print!("{}", render::status(&status));
                }
            }
            Command::List => {
                for id in service.list().await? {
                    println!("{}", id);
                }
            }
            Command::Feed { name, protein } => {
                let outcome = if protein {
                    service.feed_protein(&name).await?
                } else {
                    service.feed_meat(&name).await?
                };
                println!("{}", render::feeding(&outcome));
            }
            Command::Train { name, hits } => {
                let outcome = service.train(&name, hits).await?;
                println!(
                    "training: {} (strength {}, effort {})",
                    outcome.result, outcome.snapshot.strength, outcome.snapshot.effort
                );
            }
            Command::Clean { name } => {
                service.clean(&name).await?;
                println!("all clean");
            }
            Command::Heal { name } => {
                let outcome = service.heal(&name).await?;
                if outcome.cured {
                    println!("cured");
                } else {
                    println!("{} more dose(s) needed", outcome.doses_remaining);
                }
            }
            Command::Lights { name } => {
                let on = service.toggle_lights(&name).await?;
                println!("lights {}", if on { "on" } else { "off" });
            }
            Command::Battle {
                name,
                power,
                attribute,
                opponent,
                kind,
                log,
            } => {
                let opponent = Combatant::new(opponent, power, attribute);
                let report = service.battle(&name, opponent, kind).await?;
                print!("{}", render::battle(&report, log));
            }
            Command::Quest { name, area } => {
                let report = service.quest(&name, &area).await?;
                print!("{}", render::quest(&report));
            }
            Command::Quests => {
                for area in service.content().quests.areas() {
                    println!("{:<6} {} ({} enemies)", area.id, area.name, area.enemies.len());
                }
            }
            Command::Evolve { name } => {
                let verdict = service.evolve(&name).await?;
                println!("{}", render::verdict(&verdict, true));
            }
            Command::Freeze { name } => {
                service.freeze(&name).await?;
                println!("{} is in the fridge", name);
            }
            Command::Thaw { name } => {
                service.thaw(&name).await?;
                println!("{} is back", name);
            }
            Command::Reincarnate { name } => {
                let snapshot = service.reincarnate(&name).await?;
                println!(
                    "{} starts over as {} (reincarnation #{})",
                    name, snapshot.species_id, snapshot.total_reincarnations
                );
            }
            Command::Release { name } => {
                service.release(&name).await?;
                println!("{} was released", name);
            }
        }
        Ok(())
    }
}
