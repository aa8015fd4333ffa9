//! Interactive terminal front end for the arena simulation. All game
//! logic lives in the library; this shell only reads commands and prints
//! log lines.

use arena::session::GameSession;
use std::io::{self, BufRead, Write};

fn main() {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut rng = rand::thread_rng();
    let mut session = GameSession::new();

    println!("=== Arena ===");

    loop {
        if !session.in_progress {
            match read_names(&mut lines) {
                Some(names) => {
                    session.start(&names, &mut rng);
                    print_log(&mut session);
                    continue;
                }
                None => return,
            }
        }

        print!("> ");
        let _ = io::stdout().flush();
        let line = match lines.next() {
            Some(Ok(line)) => line,
            _ => return,
        };

        match line.trim() {
            "round" | "" => {
                session.play_round(&mut rng);
                print_log(&mut session);
            }
            "stats" => print_stats(&session),
            "json" => match serde_json::to_string_pretty(&session.roster_snapshot()) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("snapshot failed: {err}"),
            },
            "deaths" => {
                for entry in &session.death_log {
                    println!(
                        "{} died in Round {}, killed by {}.",
                        entry.name, entry.round, entry.killer
                    );
                }
            }
            "reset" => {
                session.reset();
                print_log(&mut session);
            }
            "quit" | "exit" => return,
            other => println!(
                "Unknown command '{other}'. Commands: round, stats, json, deaths, reset, quit"
            ),
        }
    }
}

/// Prompts for a player count and that many names. `None` means stdin
/// closed. An invalid count aborts the start with a message, matching
/// the engine's log-and-no-op error style.
fn read_names(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> Option<Vec<String>> {
    print!("Number of players: ");
    let _ = io::stdout().flush();
    let count_line = lines.next()?.ok()?;

    let count: usize = match count_line.trim().parse() {
        Ok(n) if n > 0 => n,
        // Engine-side validation logs the message for an empty list
        _ => return Some(Vec::new()),
    };

    let mut names = Vec::with_capacity(count);
    for i in 1..=count {
        print!("Name for player {i}: ");
        let _ = io::stdout().flush();
        let name = lines.next()?.ok()?;
        names.push(name.trim().to_string());
    }
    Some(names)
}

/// Prints and drains the pending log lines so repeated commands never
/// re-print earlier output.
fn print_log(session: &mut GameSession) {
    for line in session.log.lines() {
        println!("{line}");
    }
    session.log.clear();
}

fn print_stats(session: &GameSession) {
    for summary in session.roster_snapshot() {
        println!("{}", summary.name);
        let stats = summary
            .stats
            .iter()
            .map(|(k, v)| format!("{k} {v}"))
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {stats}");
        println!("  Inventory: {}", join_or(&summary.inventory, "empty"));
        println!("  Alliances: {}", join_or(&summary.alliances, "none"));
    }
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
