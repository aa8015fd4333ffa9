use crate::constants::{
    DEFENSE_OVERFLOW_DISCOUNT, DEFENSE_REDUCTION_FACTOR, FINAL_SHOWDOWN_ROUND,
    ITEM_EVENT_STAT_WEIGHTS, MIN_COMBAT_DAMAGE, TRAP_FALL_DAMAGE, TRAP_KILLER_NAME,
};
use crate::items::{catalog_for, Item};
use crate::player;
use crate::probability::{event_probabilities, EventKind};
use crate::selector::weighted_choice;
use crate::session::{DeathRecord, GameSession};
use crate::stats::StatType;
use rand::Rng;

/// Executes one event turn for the named player: draws an event from the
/// state-adapted distribution and applies it. A name no longer on the
/// roster (eliminated earlier this round) or a dead player gets no turn.
pub fn execute_event(state: &mut GameSession, player_name: &str, rng: &mut impl Rng) {
    let idx = match player::find_player_index(&state.players, player_name) {
        Some(idx) => idx,
        None => return,
    };
    if !state.players[idx].is_alive() {
        return;
    }

    let weights = event_probabilities(
        &state.players[idx],
        state.total_traps,
        state.players.len(),
        state.round,
    );
    let kinds = EventKind::all();
    let chosen = *weighted_choice(&kinds, &weights, rng);
    apply_event(state, idx, chosen, rng);
}

/// Applies a chosen event to the player at `idx`, enforcing the
/// eligibility guards first: a blocked draw degrades to a no-op with a
/// notice, never a substituted event.
pub fn apply_event(state: &mut GameSession, idx: usize, chosen: EventKind, rng: &mut impl Rng) {
    let candidates = eligible_candidates(state, idx);
    if chosen == EventKind::Combat && candidates.is_empty() {
        state.log.append(format!(
            "{} has no eligible opponents for combat.",
            state.players[idx].name
        ));
        return;
    }
    if chosen == EventKind::Alliance
        && (state.round >= FINAL_SHOWDOWN_ROUND || candidates.is_empty())
    {
        state.log.append(format!(
            "{} cannot form new alliances.",
            state.players[idx].name
        ));
        return;
    }

    state.log.append(format!(
        "{}'s turn - Chosen Event: {}",
        state.players[idx].name,
        chosen.label()
    ));

    match chosen {
        EventKind::Neutral => {
            state.log.append(format!(
                "{} has a peaceful moment.",
                state.players[idx].name
            ));
        }
        EventKind::Item => handle_item_event(state, idx, rng),
        EventKind::Combat => handle_combat_event(state, idx, rng),
        EventKind::TrapSetup => handle_trap_setup(state, idx),
        EventKind::TrapFall => handle_trap_fall(state, idx),
        EventKind::Sponsorship => handle_sponsorship_event(state, idx, rng),
        EventKind::Alliance => handle_alliance_event(state, idx, rng),
        EventKind::AllianceBreak => handle_alliance_break(state, idx, rng),
    }
}

/// Roster indices of players the actor could fight or ally with:
/// everyone else who is not already an ally.
fn eligible_candidates(state: &GameSession, idx: usize) -> Vec<usize> {
    state
        .players
        .iter()
        .enumerate()
        .filter(|(i, p)| *i != idx && !state.players[idx].alliances.contains(&p.name))
        .map(|(i, _)| i)
        .collect()
}

/// Item discovery: a stat category drawn from fixed weights, then an item
/// within the category weighted by effect magnitude. The item is granted
/// and consumed immediately.
pub fn handle_item_event(state: &mut GameSession, idx: usize, rng: &mut impl Rng) {
    let stats = StatType::all();
    let stat = *weighted_choice(&stats, &ITEM_EVENT_STAT_WEIGHTS, rng);

    let catalog = catalog_for(stat);
    let magnitudes: Vec<f64> = catalog.iter().map(|e| e.magnitude as f64).collect();
    let entry = weighted_choice(catalog, &magnitudes, rng);

    let item = Item::single(entry.name, stat, entry.magnitude);
    let item_name = entry.name;

    state.players[idx].add_item(item);
    let messages = state.players[idx].use_item(item_name);
    state.log.extend(messages);
    state.log.append(format!(
        "{} finds and uses a {item_name}.",
        state.players[idx].name
    ));
}

/// Combat against a uniformly random non-allied opponent. Damage is
/// `max(1, STR − floor(STR × effective_defense))` where effective defense
/// is DEF × 0.10, discounted to 75% when it exceeds the attacker's STR.
/// The multiply-then-floor order matters at the boundaries.
pub fn handle_combat_event(state: &mut GameSession, idx: usize, rng: &mut impl Rng) {
    let candidates = eligible_candidates(state, idx);
    if candidates.is_empty() {
        return;
    }
    let opponent_idx = candidates[rng.gen_range(0..candidates.len())];

    let attacker_name = state.players[idx].name.clone();
    state.log.append(format!(
        "{attacker_name} engages in combat with {}.",
        state.players[opponent_idx].name
    ));

    let attack = state.players[idx].stats.get(StatType::Str);
    let reduction = state.players[opponent_idx].stats.get(StatType::Def) as f64
        * DEFENSE_REDUCTION_FACTOR;
    let effective_defense = if reduction <= attack as f64 {
        reduction
    } else {
        reduction * DEFENSE_OVERFLOW_DISCOUNT
    };
    let damage = (attack - (attack as f64 * effective_defense).floor() as i32)
        .max(MIN_COMBAT_DAMAGE);

    state.players[opponent_idx].stats.add(StatType::Hp, -damage);
    state.log.append(format!(
        "{}'s HP changed by -{damage}. Current HP: {}",
        state.players[opponent_idx].name,
        state.players[opponent_idx].stats.get(StatType::Hp)
    ));

    if !state.players[opponent_idx].is_alive() {
        handle_player_death(state, opponent_idx, &attacker_name);
    }
}

pub fn handle_trap_setup(state: &mut GameSession, idx: usize) {
    state.total_traps += 1;
    state.log.append(format!(
        "{} sets up a trap. Total traps on the ground: {}",
        state.players[idx].name, state.total_traps
    ));
}

/// Trap damage is a flat 4 HP regardless of stats.
pub fn handle_trap_fall(state: &mut GameSession, idx: usize) {
    state.players[idx].stats.add(StatType::Hp, -TRAP_FALL_DAMAGE);
    state.log.append(format!(
        "{} falls into a trap and loses {TRAP_FALL_DAMAGE} HP. Current HP: {}",
        state.players[idx].name,
        state.players[idx].stats.get(StatType::Hp)
    ));
    if !state.players[idx].is_alive() {
        handle_player_death(state, idx, TRAP_KILLER_NAME);
    }
}

/// Sponsorship targets the actor's weakest stat: a uniformly random item
/// from that stat's catalog, granted and consumed immediately.
pub fn handle_sponsorship_event(state: &mut GameSession, idx: usize, rng: &mut impl Rng) {
    let lowest = state.players[idx].stats.lowest();
    let catalog = catalog_for(lowest);
    let entry = &catalog[rng.gen_range(0..catalog.len())];

    let item = Item::single(entry.name, lowest, entry.magnitude);
    let item_name = entry.name;

    state.players[idx].add_item(item);
    let messages = state.players[idx].use_item(item_name);
    state.log.extend(messages);
    state.log.append(format!(
        "{} receives sponsorship and gets a {item_name} to boost their {}.",
        state.players[idx].name,
        lowest.abbrev()
    ));
}

pub fn handle_alliance_event(state: &mut GameSession, idx: usize, rng: &mut impl Rng) {
    let candidates = eligible_candidates(state, idx);
    if candidates.is_empty() {
        return;
    }
    let ally_idx = candidates[rng.gen_range(0..candidates.len())];
    player::form_alliance(&mut state.players, idx, ally_idx);
    state.log.append(format!(
        "{} and {} have formed an alliance.",
        state.players[idx].name, state.players[ally_idx].name
    ));
}

/// Breaks one uniformly random existing alliance. No allies, no effect.
pub fn handle_alliance_break(state: &mut GameSession, idx: usize, rng: &mut impl Rng) {
    let allies: Vec<String> = state.players[idx].alliances.iter().cloned().collect();
    if allies.is_empty() {
        return;
    }
    let ally_name = &allies[rng.gen_range(0..allies.len())];
    if let Some(ally_idx) = player::find_player_index(&state.players, ally_name) {
        if let Some(msg) = player::break_alliance(&mut state.players, idx, ally_idx) {
            state.log.append(msg);
        }
    }
}

/// Elimination, shared by combat and trap fall: log the death, record it,
/// drop the player from the roster, and purge the name from every
/// surviving alliance set.
pub fn handle_player_death(state: &mut GameSession, idx: usize, killer: &str) {
    let name = state.players[idx].name.clone();
    state.log.append(format!(
        "{name}'s HP reached zero. {name} is dead."
    ));
    state.death_log.push(DeathRecord {
        name: name.clone(),
        round: state.round,
        killer: killer.to_string(),
    });
    state.players.remove(idx);
    for p in &mut state.players {
        p.alliances.remove(&name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn session_with(names: &[&str]) -> GameSession {
        let mut state = GameSession::new();
        state.players = names.iter().map(|n| Player::new(n)).collect();
        state.in_progress = true;
        state
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    #[test]
    fn test_combat_damage_formula() {
        let mut state = session_with(&["A", "B"]);
        state.players[0].stats.set(StatType::Str, 10);
        state.players[1].stats.set(StatType::Def, 5);
        state.players[1].stats.set(StatType::Hp, 20);

        // effective defense = 5 * 0.10 = 0.5; damage = 10 - floor(10 * 0.5) = 5
        handle_combat_event(&mut state, 0, &mut rng());
        assert_eq!(state.players[1].stats.get(StatType::Hp), 15);
    }

    #[test]
    fn test_combat_damage_never_below_one() {
        let mut state = session_with(&["A", "B"]);
        state.players[0].stats.set(StatType::Str, 1);
        state.players[1].stats.set(StatType::Def, 25);
        state.players[1].stats.set(StatType::Hp, 20);

        // reduction = 2.5 > STR 1, discounted to 1.875; raw damage would be 0
        handle_combat_event(&mut state, 0, &mut rng());
        assert_eq!(state.players[1].stats.get(StatType::Hp), 19);
    }

    #[test]
    fn test_combat_kill_eliminates_and_attributes_killer() {
        let mut state = session_with(&["A", "B", "C"]);
        state.players[0].stats.set(StatType::Str, 10);
        state.players[1].stats.set(StatType::Hp, 1);
        state.players[1].stats.set(StatType::Def, 0);
        // C only knows B as an ally; A will fight B (C is allied to A)
        player::form_alliance(&mut state.players, 0, 2);
        player::form_alliance(&mut state.players, 1, 2);

        handle_combat_event(&mut state, 0, &mut rng());

        assert_eq!(state.players.len(), 2);
        assert!(player::find_player_index(&state.players, "B").is_none());
        assert_eq!(state.death_log.len(), 1);
        assert_eq!(state.death_log[0].name, "B");
        assert_eq!(state.death_log[0].killer, "A");
        // C's alliance set no longer mentions the dead player
        let c = &state.players[player::find_player_index(&state.players, "C").unwrap()];
        assert!(!c.alliances.contains("B"));
    }

    #[test]
    fn test_trap_fall_costs_exactly_four_hp() {
        let mut state = session_with(&["A"]);
        state.players[0].stats.set(StatType::Hp, 25);
        handle_trap_fall(&mut state, 0);
        assert_eq!(state.players[0].stats.get(StatType::Hp), 21);
    }

    #[test]
    fn test_trap_fall_kill_is_attributed_to_the_trap() {
        let mut state = session_with(&["A", "B"]);
        state.players[0].stats.set(StatType::Hp, 3);

        handle_trap_fall(&mut state, 0);

        assert_eq!(state.players.len(), 1);
        assert_eq!(state.death_log[0].killer, TRAP_KILLER_NAME);
    }

    #[test]
    fn test_trap_setup_increments_counter() {
        let mut state = session_with(&["A"]);
        handle_trap_setup(&mut state, 0);
        handle_trap_setup(&mut state, 0);
        assert_eq!(state.total_traps, 2);
    }

    #[test]
    fn test_item_event_grants_and_consumes() {
        let mut state = session_with(&["A"]);
        let before = state.players[0].stats;

        handle_item_event(&mut state, 0, &mut rng());

        assert!(state.players[0].inventory.is_empty(), "item must be consumed");
        assert!(
            state.players[0].stats.total() > before.total(),
            "some stat should have increased"
        );
    }

    #[test]
    fn test_sponsorship_boosts_the_lowest_stat() {
        let mut state = session_with(&["A"]);
        state.players[0].stats.set(StatType::Cha, 2);

        handle_sponsorship_event(&mut state, 0, &mut rng());

        // CHA catalog item is Makeup (+2)
        assert_eq!(state.players[0].stats.get(StatType::Cha), 4);
        assert!(state.players[0].inventory.is_empty());
        assert!(state
            .log
            .lines()
            .iter()
            .any(|l| l.contains("sponsorship") && l.contains("CHA")));
    }

    #[test]
    fn test_alliance_event_forms_mutual_alliance() {
        let mut state = session_with(&["A", "B"]);
        handle_alliance_event(&mut state, 0, &mut rng());
        assert!(state.players[0].alliances.contains("B"));
        assert!(state.players[1].alliances.contains("A"));
    }

    #[test]
    fn test_alliance_break_with_no_allies_does_nothing() {
        let mut state = session_with(&["A", "B"]);
        handle_alliance_break(&mut state, 0, &mut rng());
        assert!(state.log.is_empty());
    }

    #[test]
    fn test_alliance_break_removes_one_alliance() {
        let mut state = session_with(&["A", "B"]);
        player::form_alliance(&mut state.players, 0, 1);

        handle_alliance_break(&mut state, 0, &mut rng());

        assert!(state.players[0].alliances.is_empty());
        assert!(state.players[1].alliances.is_empty());
        assert!(state.log.lines()[0].contains("broken their alliance"));
    }

    #[test]
    fn test_combat_guard_skips_turn_when_everyone_is_allied() {
        let mut state = session_with(&["A", "B"]);
        player::form_alliance(&mut state.players, 0, 1);

        apply_event(&mut state, 0, EventKind::Combat, &mut rng());

        assert_eq!(state.players.len(), 2, "no combat should have happened");
        assert_eq!(state.log.lines().len(), 1);
        assert!(state.log.lines()[0].contains("no eligible opponents"));
    }

    #[test]
    fn test_alliance_guard_blocks_at_showdown_round() {
        let mut state = session_with(&["A", "B"]);
        state.round = FINAL_SHOWDOWN_ROUND;

        apply_event(&mut state, 0, EventKind::Alliance, &mut rng());

        assert!(state.players[0].alliances.is_empty());
        assert!(state.log.lines()[0].contains("cannot form new alliances"));
    }

    #[test]
    fn test_alliance_guard_blocks_without_candidates() {
        let mut state = session_with(&["A", "B"]);
        player::form_alliance(&mut state.players, 0, 1);

        apply_event(&mut state, 0, EventKind::Alliance, &mut rng());

        assert!(state.log.lines()[0].contains("cannot form new alliances"));
    }

    #[test]
    fn test_neutral_event_logs_only() {
        let mut state = session_with(&["A", "B"]);
        let before = state.players.clone();

        apply_event(&mut state, 0, EventKind::Neutral, &mut rng());

        assert!(state.log.lines().iter().any(|l| l.contains("peaceful moment")));
        assert_eq!(state.players.len(), before.len());
        assert_eq!(state.players[0].stats, before[0].stats);
    }

    #[test]
    fn test_execute_event_skips_missing_and_dead_players() {
        let mut state = session_with(&["A", "B"]);
        state.players[0].stats.set(StatType::Hp, 0);

        execute_event(&mut state, "A", &mut rng());
        execute_event(&mut state, "Ghost", &mut rng());

        assert!(state.log.is_empty());
    }
}
