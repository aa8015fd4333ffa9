use crate::log::GameLog;
use crate::player::Player;
use crate::round;
use crate::stats::StatType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// One elimination: who died, when, and to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    pub name: String,
    pub round: u32,
    pub killer: String,
}

/// A read-only view of one player for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub stats: BTreeMap<String, i32>,
    pub inventory: Vec<String>,
    pub alliances: Vec<String>,
}

/// Top-level mutable game state, lifecycle = one game. All mutation goes
/// through `start` / `play_round` / `reset`; there is no ambient state and
/// no internal RNG, callers inject one per call.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub players: Vec<Player>,
    pub round: u32,
    pub total_traps: u32,
    pub death_log: Vec<DeathRecord>,
    pub in_progress: bool,
    pub log: GameLog,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            round: 1,
            total_traps: 0,
            death_log: Vec::new(),
            in_progress: false,
            log: GameLog::new(),
        }
    }

    /// Starts a new game with the given player names. Rejects an empty
    /// list, blank names, and duplicates with a log message and no state
    /// mutation. The trap counter is deliberately left alone; only a full
    /// `reset` clears it.
    pub fn start(&mut self, names: &[String], rng: &mut impl Rng) -> bool {
        if names.is_empty() {
            self.log
                .append("Number of players must be greater than 0.");
            return false;
        }
        if names.iter().any(|n| n.trim().is_empty()) {
            self.log.append("Player names must not be blank.");
            return false;
        }
        let unique: BTreeSet<&str> = names.iter().map(String::as_str).collect();
        if unique.len() != names.len() {
            self.log.append("Player names must be unique.");
            return false;
        }

        self.players = names.iter().map(|n| Player::create(n, rng)).collect();
        self.death_log.clear();
        self.round = 1;
        self.in_progress = true;

        self.log.append("--- Initial Player Stats ---");
        for player in &self.players {
            let stats = StatType::all()
                .into_iter()
                .map(|s| format!("{} {}", s.abbrev(), player.stats.get(s)))
                .collect::<Vec<_>>()
                .join(", ");
            self.log.append(format!("{}: {stats}", player.name));
        }
        true
    }

    /// Plays one round. Without a game in progress this is a logged
    /// no-op. A game that begins with a single player ends immediately,
    /// winner declared, without executing a round.
    pub fn play_round(&mut self, rng: &mut impl Rng) {
        if !self.in_progress {
            self.log.append("No game is currently in progress.");
            return;
        }
        if self.players.len() <= 1 {
            round::finish_game(self);
            return;
        }
        round::execute_round(self, rng);
        self.round += 1;
    }

    /// Clears everything back to the initial state.
    pub fn reset(&mut self) {
        self.players.clear();
        self.round = 1;
        self.total_traps = 0;
        self.death_log.clear();
        self.in_progress = false;
        self.log.clear();
        self.log
            .append("Game reset. Enter the number of players to start a new game.");
    }

    /// The winner's name once the roster is down to one.
    pub fn winner(&self) -> Option<&str> {
        if self.players.len() == 1 {
            Some(&self.players[0].name)
        } else {
            None
        }
    }

    /// Serializable roster snapshot for stat/inventory/alliance display.
    pub fn roster_snapshot(&self) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .map(|p| PlayerSummary {
                name: p.name.clone(),
                stats: StatType::all()
                    .into_iter()
                    .map(|s| (s.abbrev().to_string(), p.stats.get(s)))
                    .collect(),
                inventory: p.inventory.iter().map(|i| i.name.clone()).collect(),
                alliances: p.alliances.iter().cloned().collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_start_builds_randomized_roster() {
        let mut session = GameSession::new();
        assert!(session.start(&names(&["A", "B", "C"]), &mut rng()));

        assert!(session.in_progress);
        assert_eq!(session.players.len(), 3);
        assert_eq!(session.round, 1);
        for p in &session.players {
            assert!(p.stats.total() > 30, "{} got no bonus points", p.name);
        }
        assert!(session
            .log
            .lines()
            .iter()
            .any(|l| l.contains("Initial Player Stats")));
    }

    #[test]
    fn test_start_rejects_empty_name_list() {
        let mut session = GameSession::new();
        assert!(!session.start(&[], &mut rng()));
        assert!(!session.in_progress);
        assert!(session.players.is_empty());
        assert!(session.log.lines()[0].contains("greater than 0"));
    }

    #[test]
    fn test_start_rejects_duplicate_names() {
        let mut session = GameSession::new();
        assert!(!session.start(&names(&["A", "A"]), &mut rng()));
        assert!(!session.in_progress);
        assert!(session.players.is_empty());
    }

    #[test]
    fn test_start_rejects_blank_names() {
        let mut session = GameSession::new();
        assert!(!session.start(&names(&["A", "  "]), &mut rng()));
        assert!(!session.in_progress);
    }

    #[test]
    fn test_play_round_without_game_is_a_noop() {
        let mut session = GameSession::new();
        session.play_round(&mut rng());
        assert_eq!(session.round, 1);
        assert!(session.log.lines()[0].contains("No game is currently in progress"));
    }

    #[test]
    fn test_play_round_advances_round_counter() {
        let mut session = GameSession::new();
        session.start(&names(&["A", "B", "C", "D", "E", "F"]), &mut rng());

        let mut game_rng = rng();
        session.play_round(&mut game_rng);
        assert_eq!(session.round, 2);
    }

    #[test]
    fn test_solo_game_ends_instantly_without_a_round() {
        let mut session = GameSession::new();
        session.start(&names(&["Only"]), &mut rng());

        session.play_round(&mut rng());

        assert!(!session.in_progress);
        assert_eq!(session.round, 1, "no round may execute for a solo game");
        assert_eq!(session.winner(), Some("Only"));
        assert!(session
            .log
            .lines()
            .iter()
            .any(|l| l == "The winner is Only!"));
    }

    #[test]
    fn test_reset_clears_all_state() {
        let mut session = GameSession::new();
        session.start(&names(&["A", "B"]), &mut rng());
        session.total_traps = 9;
        session.death_log.push(DeathRecord {
            name: "B".to_string(),
            round: 1,
            killer: "A".to_string(),
        });

        session.reset();

        assert!(session.players.is_empty());
        assert_eq!(session.round, 1);
        assert_eq!(session.total_traps, 0);
        assert!(session.death_log.is_empty());
        assert!(!session.in_progress);
        assert_eq!(session.log.lines().len(), 1);
    }

    #[test]
    fn test_start_does_not_reset_trap_counter() {
        let mut session = GameSession::new();
        session.total_traps = 4;
        session.start(&names(&["A", "B"]), &mut rng());
        assert_eq!(session.total_traps, 4);
    }

    #[test]
    fn test_roster_snapshot_round_trips_through_json() {
        let mut session = GameSession::new();
        session.start(&names(&["A", "B"]), &mut rng());

        let snapshot = session.roster_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].stats.len(), 6);

        let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
        assert!(json.contains("\"HP\""));

        let parsed: Vec<PlayerSummary> =
            serde_json::from_str(&json).expect("snapshot deserializes");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].name, snapshot[0].name);
        assert_eq!(parsed[0].stats, snapshot[0].stats);
    }
}
