use crate::constants::{BONUS_STAT_POINTS, STAT_CAP};
use crate::items::Item;
use crate::stats::{StatType, Stats};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A contestant. Alliances are stored by name, not by reference: the
/// relation is symmetric and both sides are kept consistent by the
/// alliance operations below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub stats: Stats,
    pub inventory: Vec<Item>,
    pub alliances: BTreeSet<String>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stats: Stats::new(),
            inventory: Vec::new(),
            alliances: BTreeSet::new(),
        }
    }

    /// Creates a player with randomized stats.
    pub fn create(name: &str, rng: &mut impl Rng) -> Self {
        let mut player = Self::new(name);
        player.randomize_stats(rng);
        player
    }

    /// Distributes `BONUS_STAT_POINTS` across the stats one increment at a
    /// time: each step picks uniformly among stats below the cap, then adds
    /// a uniform amount between 1 and min(remaining, headroom). Stops early
    /// if every stat hits the cap first; that is accepted behavior.
    pub fn randomize_stats(&mut self, rng: &mut impl Rng) {
        let mut points = BONUS_STAT_POINTS;
        while points > 0 {
            let open: Vec<StatType> = StatType::all()
                .into_iter()
                .filter(|s| self.stats.get(*s) < STAT_CAP)
                .collect();
            if open.is_empty() {
                break;
            }
            let stat = open[rng.gen_range(0..open.len())];
            let max_gain = points.min(STAT_CAP - self.stats.get(stat));
            let gain = rng.gen_range(1..=max_gain);
            self.stats.add(stat, gain);
            points -= gain;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.stats.get(StatType::Hp) > 0
    }

    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Applies and removes the first inventory item with a matching name.
    /// Items are consumed on use, never reusable. Returns the log lines
    /// describing each stat change, or a not-found notice.
    pub fn use_item(&mut self, item_name: &str) -> Vec<String> {
        let mut messages = Vec::new();
        if let Some(pos) = self.inventory.iter().position(|i| i.name == item_name) {
            let item = self.inventory.remove(pos);
            for (stat, delta) in &item.effects {
                self.stats.add(*stat, *delta);
                messages.push(format!(
                    "{}'s {} changed by {}. Current {}: {}",
                    self.name,
                    stat.abbrev(),
                    delta,
                    stat.abbrev(),
                    self.stats.get(*stat)
                ));
            }
            messages.push(format!("{item_name} used. Effects applied."));
        } else {
            messages.push(format!(
                "No item named {item_name} found in inventory."
            ));
        }
        messages
    }

    pub fn list_inventory(&self) -> String {
        if self.inventory.is_empty() {
            "Inventory is empty.".to_string()
        } else {
            self.inventory
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn list_alliances(&self) -> String {
        if self.alliances.is_empty() {
            "No alliances.".to_string()
        } else {
            self.alliances
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

pub fn find_player_index(players: &[Player], name: &str) -> Option<usize> {
    players.iter().position(|p| p.name == name)
}

/// Records a mutual alliance between two roster slots. Idempotent; a
/// player never allies with themselves.
pub fn form_alliance(players: &mut [Player], a: usize, b: usize) {
    if a == b {
        return;
    }
    let a_name = players[a].name.clone();
    let b_name = players[b].name.clone();
    players[a].alliances.insert(b_name);
    players[b].alliances.insert(a_name);
}

/// Removes the alliance from both sides together and returns the log line.
/// Returns `None` if the two were not allied.
pub fn break_alliance(players: &mut [Player], a: usize, b: usize) -> Option<String> {
    if a == b {
        return None;
    }
    let a_name = players[a].name.clone();
    let b_name = players[b].name.clone();
    let removed = players[a].alliances.remove(&b_name);
    players[b].alliances.remove(&a_name);
    if removed {
        Some(format!(
            "{a_name} and {b_name} have broken their alliance."
        ))
    } else {
        None
    }
}

/// Breaks every alliance the player currently holds. The set is
/// snapshotted before the sweep so mutation during iteration is safe.
pub fn break_all_alliances(players: &mut [Player], idx: usize) -> Vec<String> {
    let allies: Vec<String> = players[idx].alliances.iter().cloned().collect();
    let mut messages = Vec::new();
    for ally_name in allies {
        if let Some(ally_idx) = find_player_index(players, &ally_name) {
            if let Some(msg) = break_alliance(players, idx, ally_idx) {
                messages.push(msg);
            }
        } else {
            // Stale entry for a player no longer on the roster
            players[idx].alliances.remove(&ally_name);
        }
    }
    messages
}
