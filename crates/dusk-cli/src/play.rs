//! The interactive play loop.
//!
//! Input is read through an explicit boundary: a line, or `Cancelled`
//! (end-of-input, interrupt). Cancellation always maps to the safe
//! default for wherever the prompt was, never to a caught fault.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use dusk_game::{GameError, GameSession, SaveOutcome};
use dusk_sim::clock::ActionCost;

use crate::render;

/// What the input boundary produced.
enum Input {
    /// A line of text (may be empty).
    Line(String),
    /// End of input or an interrupt; take the safe default.
    Cancelled,
}

fn read_input(prompt: &str) -> Input {
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return Input::Cancelled;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => Input::Cancelled,
        Ok(_) => Input::Line(line.trim().to_string()),
    }
}

/// Drive a loaded session until the player quits or the run ends.
pub fn run(session: &mut GameSession) -> Result<(), String> {
    println!(
        "{}",
        format!("— {} — type 'help' for commands", session.state().name).dimmed()
    );
    loop {
        render::print_events(session.take_events());
        if session.state().is_dead() {
            println!("{}", "The run is over.".red().bold());
            return Ok(());
        }
        let prompt = if session.in_combat() {
            "[fight] > "
        } else {
            "> "
        };
        let line = match read_input(prompt) {
            Input::Line(line) => line,
            // Safe default on interrupt: save if possible, then leave.
            Input::Cancelled => {
                if !session.in_combat() {
                    let _ = session.save_confirmed(1);
                    println!("\nSaved to slot 1. Goodbye.");
                } else {
                    println!("\nNo saving mid-fight. Goodbye.");
                }
                return Ok(());
            }
        };
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, ' ');
        let command = parts.next().unwrap_or("").to_lowercase();
        let rest = parts.next().unwrap_or("").trim();

        let done = match dispatch(session, &command, rest) {
            Ok(done) => done,
            Err(error) => {
                println!("{}", error.red());
                false
            }
        };
        if done {
            return Ok(());
        }
    }
}

/// Execute one command. Returns true when the loop should end.
fn dispatch(session: &mut GameSession, command: &str, rest: &str) -> Result<bool, String> {
    match command {
        "help" | "?" => {
            println!("{}", help_text());
            Ok(false)
        }
        "status" | "st" => {
            println!("{}", render::status(session));
            Ok(false)
        }
        "inventory" | "inv" | "i" => {
            println!("{}", render::inventory(session.state()));
            Ok(false)
        }
        "explore" | "x" => {
            let report = session.explore().map_err(stringify)?;
            println!("{}", render::explore_report(&report));
            Ok(false)
        }
        "travel" | "go" => {
            if rest.is_empty() {
                println!("{}", render::location_list(session));
                return Ok(false);
            }
            let report = session.travel(rest).map_err(stringify)?;
            println!("{}", render::explore_report(&report));
            Ok(false)
        }
        "rest" | "sleep" => {
            let hours: f64 = rest.parse().map_err(|_| "usage: rest <hours>".to_string())?;
            let report = session.rest(hours).map_err(stringify)?;
            println!("{}", render::rest_report(&report));
            Ok(false)
        }
        "wait" => {
            session
                .advance_time(ActionCost::Light)
                .and_then(|hours| session.apply_decay(hours).map(|_| hours))
                .map_err(stringify)?;
            println!("Time passes.");
            Ok(false)
        }
        "eat" | "use" | "drink" => {
            let index: usize = rest.parse().map_err(|_| "usage: use <slot>".to_string())?;
            let report = session.consume(index).map_err(stringify)?;
            println!("{}", render::consume_report(&report));
            Ok(false)
        }
        "equip" => {
            let index: usize = rest
                .parse()
                .map_err(|_| "usage: equip <slot>".to_string())?;
            session.equip(index).map_err(stringify)?;
            println!("Equipped.");
            Ok(false)
        }
        "craft" => {
            if rest.is_empty() {
                println!("{}", render::recipe_list(session));
                return Ok(false);
            }
            let name = session.craft(rest).map_err(stringify)?;
            println!("Crafted {name}.");
            Ok(false)
        }
        "attack" | "a" => {
            let report = session.resolve_player_attack().map_err(stringify)?;
            println!("{}", render::turn_report(&report));
            Ok(false)
        }
        "flee" | "run" => {
            let resolution = session.resolve_flee_attempt().map_err(stringify)?;
            println!("{}", render::flee_report(&resolution));
            Ok(false)
        }
        "missions" | "m" => {
            println!("{}", render::mission_list(session.state()));
            Ok(false)
        }
        "save" => {
            let slot: u32 = rest.parse().map_err(|_| "usage: save <slot>".to_string())?;
            match session.save(slot).map_err(stringify)? {
                SaveOutcome::Saved => println!("Saved to slot {slot}."),
                SaveOutcome::NeedsConfirmation => {
                    match read_input(&format!("Slot {slot} is occupied. Overwrite? [y/N] ")) {
                        Input::Line(answer) if answer.eq_ignore_ascii_case("y") => {
                            session.save_confirmed(slot).map_err(stringify)?;
                            println!("Saved to slot {slot}.");
                        }
                        // Safe default: keep the old save.
                        Input::Line(_) | Input::Cancelled => println!("Kept the old save."),
                    }
                }
            }
            Ok(false)
        }
        "load" => {
            let slot: u32 = rest.parse().map_err(|_| "usage: load <slot>".to_string())?;
            session.load(slot).map_err(stringify)?;
            println!("Loaded slot {slot}.");
            Ok(false)
        }
        "quit" | "q" | "exit" => Ok(true),
        other => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

fn stringify(error: GameError) -> String {
    error.to_string()
}

fn help_text() -> &'static str {
    "\
Survival:
  explore               Search the area (time passes, risk and reward)
  travel [place]        Move somewhere else; bare 'travel' lists places
  rest <hours>          Sleep; quality depends on where you are
  wait                  Let a little time pass
  use <slot>            Eat, drink, or apply an inventory item
  equip <slot>          Ready a weapon
  craft [recipe]        Craft; bare 'craft' lists recipes

Combat:
  attack                Swing at the enemy
  flee                  Try to get away

Info:
  status, inventory, missions

Persistence:
  save <slot>, load <slot>

quit                    Leave (does not save)"
}
