//! Rendering for the terminal frontend. All flavor text lives here, on
//! the far side of the simulation boundary.

use colored::Colorize;
use comfy_table::{Table, presets::UTF8_FULL};

use dusk_core::PlayerState;
use dusk_game::{
    ConsumeReport, DeathRecord, ExploreReport, FleeMishap, FleeResolution, GameSession, RestReport,
    SlotInfo, TurnReport,
};
use dusk_sim::clock;
use dusk_sim::event::{SimEvent, SimEventKind};

const HALLUCINATION_LINES: &[&str] = &[
    "Someone is whistling an old tune nearby. There is nobody there.",
    "Your reflection in a window blinks before you do.",
    "A phone rings somewhere under the rubble, once.",
    "You smell fresh bread. That cannot be right.",
];

fn bar(value: u32, max: u32) -> String {
    let width = 10usize;
    let filled = if max == 0 {
        0
    } else {
        ((value as f64 / max as f64) * width as f64).round() as usize
    };
    format!("{}{}", "█".repeat(filled.min(width)), "░".repeat(width - filled.min(width)))
}

/// The status panel.
pub fn status(session: &GameSession) -> String {
    let state = session.state();
    let mut out = String::new();
    let title = format!(
        "{} — level {} — day {} ({})",
        state.name,
        state.level,
        state.days_survived,
        clock::phase(state)
    );
    out.push_str(&format!("{}\n", title.bold()));
    out.push_str(&format!(
        "  health  {} {}\n",
        bar(state.health.value(), state.health.max()),
        state.health
    ));
    out.push_str(&format!(
        "  stamina {} {}\n",
        bar(state.stamina.value(), state.stamina.max()),
        state.stamina
    ));
    out.push_str(&format!(
        "  hunger  {} {}\n",
        bar(state.hunger.value(), state.hunger.max()),
        state.hunger
    ));
    out.push_str(&format!(
        "  thirst  {} {}\n",
        bar(state.thirst.value(), state.thirst.max()),
        state.thirst
    ));
    out.push_str(&format!(
        "  sleep   {} {}\n",
        bar(state.sleep.value(), state.sleep.max()),
        state.sleep
    ));
    out.push_str(&format!(
        "  weather: {}, kills: {}, XP: {}/{}\n",
        state.weather.current, state.kills, state.experience, state.experience_to_next
    ));
    if let Ok(location) = session.current_location() {
        out.push_str(&format!(
            "  at {} (danger {})\n",
            location.name, location.danger
        ));
    }
    let mut conditions = Vec::new();
    if state.status.bleeding {
        conditions.push("bleeding".red().to_string());
    }
    if state.status.infected {
        conditions.push("infected".red().to_string());
    }
    if state.status.broken_limb {
        conditions.push("broken limb".red().to_string());
    }
    if state.status.exhaustion > 50 {
        conditions.push("exhausted".yellow().to_string());
    }
    if state.status.insanity > 50 {
        conditions.push("fraying".yellow().to_string());
    }
    if !conditions.is_empty() {
        out.push_str(&format!("  conditions: {}\n", conditions.join(", ")));
    }
    if let Some(enemy) = session.combat_enemy() {
        out.push_str(&format!(
            "  {} {} — {}\n",
            "fighting:".red().bold(),
            enemy.name,
            enemy.health
        ));
    }
    out.trim_end().to_string()
}

/// Inventory listing with slot numbers.
pub fn inventory(state: &PlayerState) -> String {
    if state.inventory.is_empty() {
        return "The pack is empty.".to_string();
    }
    let mut out = String::new();
    for (index, item) in state.inventory.iter().enumerate() {
        let equipped = state.inventory.equipped_index() == Some(index);
        let marker = if equipped { "*" } else { " " };
        out.push_str(&format!("{marker}{index:2}  {}", item.name()));
        if item.count > 1 {
            out.push_str(&format!(" x{}", item.count));
        }
        if item.template.max_durability > 0 {
            out.push_str(&format!(
                " [{}/{}]",
                item.durability, item.template.max_durability
            ));
        }
        if item.template.is_ranged() {
            out.push_str(&format!(" ({} loaded)", item.ammo_loaded));
        }
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Missions listing.
pub fn mission_list(state: &PlayerState) -> String {
    if state.missions.is_empty() {
        return "No missions.".to_string();
    }
    let mut out = String::new();
    for mission in &state.missions {
        let mark = if mission.completed { "✓" } else { " " };
        out.push_str(&format!(
            "{mark} {} — {}/{} {}\n",
            mission.name, mission.progress, mission.required, mission.target
        ));
    }
    out.trim_end().to_string()
}

/// Known locations with danger levels.
pub fn location_list(session: &GameSession) -> String {
    let mut out = String::from("Places you know:\n");
    for location in session.locations().all() {
        let here = session.state().location == location.id;
        out.push_str(&format!(
            "{} {}  (danger {})\n",
            if here { "→" } else { " " },
            location.id,
            location.danger
        ));
    }
    out.trim_end().to_string()
}

/// Known recipes with inputs.
pub fn recipe_list(session: &GameSession) -> String {
    let mut out = String::from("Recipes:\n");
    for recipe in session.recipes() {
        let inputs: Vec<String> = recipe
            .inputs
            .iter()
            .map(|(id, count)| format!("{count}x {id}"))
            .collect();
        out.push_str(&format!("  {} <- {}\n", recipe.id, inputs.join(", ")));
    }
    out.trim_end().to_string()
}

/// Render drained simulation events.
pub fn print_events(events: Vec<SimEvent>) {
    for event in events {
        match event.kind {
            SimEventKind::NeedCritical { need } => {
                println!("{}", format!("Your {need} is getting desperate.").yellow());
            }
            SimEventKind::NeedDepleted { need } => {
                println!("{}", format!("You are out of {need}.").red());
            }
            SimEventKind::HealthLost { amount, cause } => {
                println!("{}", format!("-{amount} health ({cause})").red());
            }
            SimEventKind::StatusGained { status } => {
                println!("{}", format!("You are {status}.").red());
            }
            SimEventKind::StatusCleared { status } => {
                println!("{}", format!("No longer {status}.").green());
            }
            SimEventKind::Hallucination => {
                let line =
                    HALLUCINATION_LINES[(event.at_hours as usize) % HALLUCINATION_LINES.len()];
                println!("{}", line.magenta().italic());
            }
            SimEventKind::WeatherChanged { to, .. } => {
                println!("{}", format!("The weather turns: {to}.").cyan());
            }
            SimEventKind::DaySurvived { day } => {
                println!("{}", format!("You have survived {day} day(s).").green());
            }
            SimEventKind::PlayerDied { cause } => {
                println!("{}", format!("Death: {cause}.").red().bold());
            }
            SimEventKind::LevelUp { level } => {
                println!("{}", format!("Level up! Now level {level}.").green().bold());
            }
            SimEventKind::Note { text } => println!("{text}"),
        }
    }
}

/// Render an exploration/travel report.
pub fn explore_report(report: &ExploreReport) -> String {
    let mut out = format!("{:.1} hours pass.", report.hours);
    if let Some(loot) = &report.loot {
        out.push_str(&format!(" Found: {loot}."));
    }
    if let Some(enemy) = &report.encounter {
        out.push_str(&format!(" {}", format!("{enemy} attacks!").red().bold()));
    }
    out
}

/// Render a rest report.
pub fn rest_report(report: &RestReport) -> String {
    let mut out = format!("You sleep for {:.1} hours.", report.hours);
    if report.interrupted {
        out.push_str(" Something wakes you.");
    }
    if let Some(enemy) = &report.encounter {
        out.push_str(&format!(" {}", format!("{enemy} attacks!").red().bold()));
    }
    out
}

/// Render a consume report.
pub fn consume_report(report: &ConsumeReport) -> String {
    let mut parts = Vec::new();
    if report.healed > 0 {
        parts.push(format!("+{} health", report.healed));
    }
    if report.hunger > 0 {
        parts.push(format!("+{} hunger", report.hunger));
    }
    if report.thirst > 0 {
        parts.push(format!("+{} thirst", report.thirst));
    }
    for cured in &report.cured {
        parts.push(format!("cured {cured}"));
    }
    if parts.is_empty() {
        format!("Used {}.", report.item)
    } else {
        format!("Used {}: {}.", report.item, parts.join(", "))
    }
}

/// Render a combat round.
pub fn turn_report(report: &TurnReport) -> String {
    let mut out = String::new();
    let attack = &report.attack;
    if attack.hit {
        let crit = if attack.critical { " (critical!)" } else { "" };
        out.push_str(&format!("You hit for {}{crit}.", attack.damage));
        if attack.splash > 0 {
            out.push_str(&format!(" Splash: {}.", attack.splash));
        }
        for affliction in &attack.inflicted {
            out.push_str(&format!(" Enemy is {affliction}."));
        }
    } else {
        out.push_str("You miss.");
    }
    for message in &attack.companion_messages {
        out.push_str(&format!("\n{}", message.cyan()));
    }
    if attack.bolt_recovered {
        out.push_str("\nYou recover the bolt.");
    }
    if attack.weapon_broken {
        out.push_str(&format!("\n{}", "Your weapon breaks!".yellow()));
    } else if attack.weapon_consumed {
        out.push_str("\nThe weapon is spent.");
    }
    if let Some(enemy_turn) = &report.enemy_turn {
        if enemy_turn.skipped {
            out.push_str("\nThe enemy is disabled and loses its turn.");
        } else if enemy_turn.hit {
            out.push_str(&format!(
                "\n{}",
                format!("The enemy hits you for {}.", enemy_turn.damage).red()
            ));
            if enemy_turn.inflicted_bleeding {
                out.push_str(&format!("\n{}", "You are bleeding.".red()));
            }
            if enemy_turn.inflicted_infection {
                out.push_str(&format!("\n{}", "The wound looks infected.".red()));
            }
        } else {
            out.push_str("\nThe enemy misses.");
        }
        if enemy_turn.affliction_damage > 0 {
            out.push_str(&format!(
                "\nThe enemy suffers {} from its wounds.",
                enemy_turn.affliction_damage
            ));
        }
    }
    if let Some(victory) = &report.victory {
        out.push_str(&format!(
            "\n{}",
            format!("Enemy down. +{} XP.", victory.xp).green().bold()
        ));
        if let Some(loot) = &victory.loot {
            out.push_str(&format!("\nYou scavenge: {loot}."));
        }
        for mission in &victory.missions_completed {
            out.push_str(&format!("\nMission complete: {mission}."));
        }
    }
    if report.defeated {
        out.push_str(&format!("\n{}", "You fall.".red().bold()));
    }
    out
}

/// Render a flee resolution.
pub fn flee_report(resolution: &FleeResolution) -> String {
    let flee = &resolution.flee;
    let mut out = String::new();
    if flee.success {
        out.push_str(&"You get away.".green().to_string());
        if let Some(mishap) = &flee.mishap {
            match mishap {
                FleeMishap::DroppedItem(name) => {
                    out.push_str(&format!("\nYou dropped the {name} in the scramble."));
                }
                FleeMishap::MinorInjury(amount) => {
                    out.push_str(&format!("\n-{amount} health from a bad scrape."));
                }
            }
        }
    } else {
        out.push_str("You fail to get away.");
        if let Some(counter) = &flee.counter {
            if counter.hit {
                out.push_str(&format!(
                    "\n{}",
                    format!("The enemy punishes you for {}.", counter.damage).red()
                ));
            } else {
                out.push_str("\nThe enemy lunges and misses.");
            }
        }
    }
    if resolution.defeated {
        out.push_str(&format!("\n{}", "You fall.".red().bold()));
    }
    out
}

/// Slot listing table.
pub fn slot_table(slots: &[SlotInfo]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Slot", "Name", "Level", "Days", "Mode", "Saved"]);
    for slot in slots {
        table.add_row(vec![
            slot.slot.to_string(),
            slot.name.clone(),
            slot.level.to_string(),
            slot.days_survived.to_string(),
            if slot.hardcore { "hardcore" } else { "standard" }.to_string(),
            slot.saved_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table.to_string()
}

/// Graveyard table.
pub fn graveyard_table(graves: &[DeathRecord]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Cause", "Days", "Level", "Kills", "Where"]);
    for grave in graves {
        table.add_row(vec![
            grave.name.clone(),
            grave.cause.clone(),
            grave.days_survived.to_string(),
            grave.level.to_string(),
            grave.kills.to_string(),
            grave.location.clone(),
        ]);
    }
    table.to_string()
}
