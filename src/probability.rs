use crate::constants::{
    ENDGAME_COMBAT_BONUS_CAP, ENDGAME_COMBAT_BONUS_PER_ROUND, ENDGAME_PLAYER_THRESHOLD,
    FINAL_SHOWDOWN_ROUND,
};
use crate::player::Player;
use crate::stats::StatType;
use serde::{Deserialize, Serialize};

/// The eight things that can happen on a player's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Neutral,
    Item,
    Combat,
    TrapSetup,
    TrapFall,
    Sponsorship,
    Alliance,
    AllianceBreak,
}

impl EventKind {
    pub fn all() -> [EventKind; 8] {
        [
            EventKind::Neutral,
            EventKind::Item,
            EventKind::Combat,
            EventKind::TrapSetup,
            EventKind::TrapFall,
            EventKind::Sponsorship,
            EventKind::Alliance,
            EventKind::AllianceBreak,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Neutral => "neutral",
            EventKind::Item => "item",
            EventKind::Combat => "combat",
            EventKind::TrapSetup => "trap setup",
            EventKind::TrapFall => "trap fall",
            EventKind::Sponsorship => "sponsorship",
            EventKind::Alliance => "alliance",
            EventKind::AllianceBreak => "alliance break",
        }
    }
}

/// True once the final showdown has begun: late round or few survivors.
pub fn is_endgame(round: u32, total_players: usize) -> bool {
    round >= FINAL_SHOWDOWN_ROUND || total_players <= ENDGAME_PLAYER_THRESHOLD
}

/// Computes the normalized event probability distribution for one player's
/// turn, indexed to match `EventKind::all()`. Weights adapt to the
/// player's stats, the traps on the ground, the live player count, and the
/// round number; endgame overrides them with fixed combat-heavy values.
pub fn event_probabilities(
    player: &Player,
    total_traps: u32,
    total_players: usize,
    round: u32,
) -> [f64; 8] {
    let int = player.stats.get(StatType::Int) as f64;
    let cha = player.stats.get(StatType::Cha) as f64;
    let alliance_share = player.alliances.len() as f64 / total_players as f64;

    let mut weights = [
        0.6,                                                 // neutral
        0.1 + 0.025 * int,                                   // item
        0.15 + 0.01 * round as f64,                          // combat
        0.05,                                                // trap setup
        (0.05 * total_traps as f64 - 0.025 * int).max(0.0),  // trap fall
        0.1 + 0.025 * cha,                                   // sponsorship
        0.1 + 0.025 * cha,                                   // alliance
        0.1 + 0.05 * alliance_share,                         // alliance break
    ];

    if is_endgame(round, total_players) {
        weights = [0.4, 0.1, 0.4, 0.05, 0.05, 0.0, 0.0, 0.4];

        // Combat pressure ramps up past the showdown round, shifting
        // weight from neutral into combat. Neutral never drops below 0.
        let rounds_past = round.saturating_sub(FINAL_SHOWDOWN_ROUND) as f64;
        let bonus = (ENDGAME_COMBAT_BONUS_PER_ROUND * rounds_past).min(ENDGAME_COMBAT_BONUS_CAP);
        weights[2] += bonus;
        weights[0] = (weights[0] - bonus).max(0.0);
    }

    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}
