//! Plain-text output.

use std::fmt::Write;

use vpet_core::{BattleResult, EvolutionVerdict, FeedOutcome, QuestReport};
use vpet_runtime::{BattleReport, CreatureStatus};

pub fn status(status: &CreatureStatus) -> String {
    let snap = &status.record.snapshot;
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", status.record.id, status.species_name);
    if snap.is_dead {
        let reason = snap
            .death_reason
            .map_or_else(|| "unknown".to_owned(), |reason| reason.to_string());
        let _ = writeln!(out, "  deceased: {}", reason);
    }
    if snap.is_frozen {
        let _ = writeln!(out, "  frozen");
    }
    let _ = writeln!(
        out,
        "  fullness {}  strength {}  effort {}  energy {}  weight {}g",
        snap.fullness, snap.strength, snap.effort, snap.energy, snap.weight
    );
    let _ = writeln!(
        out,
        "  age {}d  power {}  waste {}  mistakes {}",
        snap.age, status.power, snap.waste_count, snap.care_mistakes
    );
    let _ = writeln!(
        out,
        "  battles {}W/{}L  trainings {}  overfeeds {}",
        snap.battles_won_this_form, snap.battles_lost_this_form, snap.trainings, snap.overfeed_count
    );
    if snap.is_injured {
        let _ = writeln!(out, "  injured");
    }

    let calls = &snap.call_status;
    let active: Vec<&str> = [
        ("hungry", calls.hunger.active),
        ("weak", calls.strength.active),
        ("sleepy", calls.sleep.active),
    ]
    .into_iter()
    .filter_map(|(label, active)| active.then_some(label))
    .collect();
    if !active.is_empty() {
        let _ = writeln!(out, "  calling: {}", active.join(", "));
    }
    if status.asleep {
        let light = if status.record.lights_on { "on" } else { "off" };
        let _ = writeln!(out, "  asleep (lights {})", light);
    }

    if let Some(evolution) = &status.verdict {
        let _ = writeln!(out, "  {}", verdict(evolution, false));
    }
    out
}

pub fn verdict(verdict: &EvolutionVerdict, applied: bool) -> String {
    match verdict {
        EvolutionVerdict::Ready(target) if applied => format!("evolved into {}", target),
        EvolutionVerdict::Ready(target) => format!("ready to evolve into {}", target),
        EvolutionVerdict::NotReady { remaining_seconds } => {
            format!("evolves in {}", duration(*remaining_seconds))
        }
        EvolutionVerdict::Blocked(reasons) => {
            let mut out = String::from("cannot evolve:");
            for reason in reasons {
                let _ = write!(out, "\n    {}", reason);
            }
            out
        }
    }
}

pub fn feeding(outcome: &FeedOutcome) -> String {
    let snap = &outcome.snapshot;
    let mut line = if outcome.overfed {
        String::from("refused: already full (overfeed)")
    } else {
        format!("fullness {} strength {}", snap.fullness, snap.strength)
    };
    if outcome.energy_restored {
        line.push_str(", energy +1");
    }
    if outcome.overdosed {
        line.push_str(", protein overdose");
    }
    line
}

pub fn battle(report: &BattleReport, with_log: bool) -> String {
    let mut out = String::new();
    let outcome = &report.outcome;
    let _ = writeln!(
        out,
        "{} ({}) vs {} ({}): {} after {} rounds, {}-{}",
        report.creature.display_name,
        report.creature.power,
        report.opponent.display_name,
        report.opponent.power,
        result(report.result),
        outcome.rounds,
        outcome.hits_a,
        outcome.hits_b
    );
    if with_log {
        for attack in &outcome.log {
            let _ = writeln!(
                out,
                "  round {:>3} {:?} {:?} (roll {:.2}) {}",
                attack.round, attack.attacker, attack.outcome, attack.roll, attack.formula
            );
        }
    }
    if report.aftermath.injured {
        let _ = writeln!(out, "  injured in battle");
    }
    let _ = writeln!(out, "  seed {:#018x}", report.seed);
    let _ = writeln!(out, "  digest {}", hex::encode(outcome.digest()));
    out
}

pub fn quest(report: &QuestReport) -> String {
    let mut out = String::new();
    for battle in &report.battles {
        let boss = if battle.boss { " [boss]" } else { "" };
        let _ = writeln!(
            out,
            "  {}{}: {} in {} rounds{}",
            battle.enemy,
            boss,
            result(battle.result),
            battle.outcome.rounds,
            if battle.injured { ", injured" } else { "" }
        );
    }
    let _ = writeln!(out, "{}: {}", report.area_id, report.stop);
    out
}

fn result(result: BattleResult) -> &'static str {
    match result {
        BattleResult::Win => "won",
        BattleResult::Loss => "lost",
        BattleResult::Draw => "draw",
    }
}

fn duration(seconds: u64) -> String {
    let (h, m, s) = (seconds / 3_600, seconds / 60 % 60, seconds % 60);
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}
