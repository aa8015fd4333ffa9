use crate::constants::{ENDGAME_PLAYER_THRESHOLD, FINAL_SHOWDOWN_ROUND};
use crate::events;
use crate::player;
use crate::session::GameSession;
use rand::Rng;

/// Drives one full round: stamps the log, gives every player who was
/// alive at round start one event turn, applies the end-of-round rules
/// (final-showdown alliance purge, death filtering, win detection).
pub fn execute_round(state: &mut GameSession, rng: &mut impl Rng) {
    state.log.begin_round(state.round);

    // Snapshot the turn order: players eliminated mid-round by someone
    // else's action get no further turn, but a turn already taken stands.
    let order: Vec<String> = state.players.iter().map(|p| p.name.clone()).collect();
    for name in &order {
        events::execute_event(state, name, rng);
    }

    if state.players.len() <= ENDGAME_PLAYER_THRESHOLD || state.round >= FINAL_SHOWDOWN_ROUND {
        state.log.append("--- Final Showdown! ---");
        for idx in 0..state.players.len() {
            let messages = player::break_all_alliances(&mut state.players, idx);
            state.log.extend(messages);
        }
    }

    state.players.retain(|p| p.is_alive());
    state.log.append("--- End of Round ---");

    if state.players.len() <= 1 {
        finish_game(state);
    }
}

/// Announces the outcome, appends the death log, and ends the session.
pub fn finish_game(state: &mut GameSession) {
    state.log.append("--- Game Over ---");
    match state.players.first() {
        Some(winner) => state.log.append(format!("The winner is {}!", winner.name)),
        None => state.log.append("No players remaining."),
    }
    state.in_progress = false;

    state.log.append("--- Death Log ---");
    for entry in &state.death_log {
        state.log.append(format!(
            "{} died in Round {}, killed by {}.",
            entry.name, entry.round, entry.killer
        ));
    }
}
