//! Headless batch simulator for the arena engine.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --games N      Games to play (default: 100)
//!   --players N    Players per game (default: 8)
//!   --seed N       Base RNG seed; game i uses seed + i (default: 42)
//!   --entropy      Seed each game from OS entropy instead
//!   --max-rounds N Round cap per game (default: 200)
//!   --json         Emit the report as JSON

use arena::simulator::{run_simulation, SimConfig};

fn parse_args() -> (SimConfig, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut json = false;
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                config.num_games = args[i].parse().expect("--games requires a number");
            }
            "--players" => {
                i += 1;
                config.num_players = args[i].parse().expect("--players requires a number");
            }
            "--seed" => {
                i += 1;
                config.seed = Some(args[i].parse().expect("--seed requires a number"));
            }
            "--entropy" => config.seed = None,
            "--max-rounds" => {
                i += 1;
                config.max_rounds = args[i].parse().expect("--max-rounds requires a number");
            }
            "--json" => json = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    (config, json)
}

fn print_usage() {
    eprintln!(
        "Arena Headless Simulator\n\
         \n\
         Usage: simulate [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --games N       Games to play (default: 100)\n\
         \x20 --players N     Players per game (default: 8)\n\
         \x20 --seed N        Base RNG seed (default: 42)\n\
         \x20 --entropy       Seed from OS entropy instead\n\
         \x20 --max-rounds N  Round cap per game (default: 200)\n\
         \x20 --json          Emit the report as JSON\n\
         \x20 --help, -h      Show this help"
    );
}

fn main() {
    let (config, json) = parse_args();
    if config.num_players == 0 {
        eprintln!("--players must be greater than 0");
        std::process::exit(1);
    }

    let report = run_simulation(&config);

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => {
                eprintln!("failed to serialize report: {err}");
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", report.render());
    }
}
