//! Headless Monte Carlo runner: plays full games through the public
//! `GameSession` lifecycle and aggregates outcome statistics. Each game
//! gets its own seeded RNG (base seed + game index) so a whole batch is
//! reproducible from one number.

use crate::session::GameSession;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub num_games: u32,
    pub num_players: usize,
    pub seed: Option<u64>,
    /// A game still undecided after this many rounds counts as unfinished.
    pub max_rounds: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_games: 100,
            num_players: 8,
            seed: Some(42),
            max_rounds: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub games: u32,
    pub wins: BTreeMap<String, u32>,
    /// Games where every player died in the same round.
    pub draws: u32,
    pub unfinished: u32,
    pub average_rounds: f64,
    pub longest_game: u32,
}

impl SimReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "{} games, {:.1} rounds on average, longest {}\n",
            self.games, self.average_rounds, self.longest_game
        ));
        for (name, wins) in &self.wins {
            out.push_str(&format!(
                "  {name}: {wins} wins ({:.1}%)\n",
                *wins as f64 / self.games as f64 * 100.0
            ));
        }
        if self.draws > 0 {
            out.push_str(&format!("  draws (no survivors): {}\n", self.draws));
        }
        if self.unfinished > 0 {
            out.push_str(&format!("  unfinished at round cap: {}\n", self.unfinished));
        }
        out
    }
}

pub fn run_simulation(config: &SimConfig) -> SimReport {
    let names: Vec<String> = (1..=config.num_players)
        .map(|i| format!("Player {i}"))
        .collect();

    let mut wins: BTreeMap<String, u32> = BTreeMap::new();
    let mut draws = 0;
    let mut unfinished = 0;
    let mut total_rounds: u64 = 0;
    let mut longest_game = 0;

    for game_idx in 0..config.num_games {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + game_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let rounds = play_one_game(&names, config.max_rounds, &mut rng, |outcome| {
            match outcome {
                GameOutcome::Winner(name) => *wins.entry(name).or_insert(0) += 1,
                GameOutcome::Draw => draws += 1,
                GameOutcome::Unfinished => unfinished += 1,
            }
        });
        total_rounds += rounds as u64;
        longest_game = longest_game.max(rounds);
    }

    SimReport {
        games: config.num_games,
        wins,
        draws,
        unfinished,
        average_rounds: total_rounds as f64 / config.num_games.max(1) as f64,
        longest_game,
    }
}

enum GameOutcome {
    Winner(String),
    Draw,
    Unfinished,
}

/// Plays one full game and reports its outcome; returns the number of
/// rounds actually executed.
fn play_one_game(
    names: &[String],
    max_rounds: u32,
    rng: &mut impl Rng,
    mut record: impl FnMut(GameOutcome),
) -> u32 {
    let mut session = GameSession::new();
    session.start(names, rng);

    let mut rounds = 0;
    while session.in_progress && rounds < max_rounds {
        session.play_round(rng);
        rounds += 1;
    }

    if session.in_progress {
        record(GameOutcome::Unfinished);
    } else {
        match session.winner() {
            Some(name) => record(GameOutcome::Winner(name.to_string())),
            None => record(GameOutcome::Draw),
        }
    }
    rounds
}
