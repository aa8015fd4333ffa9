use crate::constants::BASE_STAT_VALUE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StatType {
    Hp,
    Str,
    Def,
    Sta,
    Int,
    Cha,
}

impl StatType {
    pub fn all() -> [StatType; 6] {
        [
            StatType::Hp,
            StatType::Str,
            StatType::Def,
            StatType::Sta,
            StatType::Int,
            StatType::Cha,
        ]
    }

    pub fn abbrev(&self) -> &'static str {
        match self {
            StatType::Hp => "HP",
            StatType::Str => "STR",
            StatType::Def => "DEF",
            StatType::Sta => "STA",
            StatType::Int => "INT",
            StatType::Cha => "CHA",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StatType::Hp => 0,
            StatType::Str => 1,
            StatType::Def => 2,
            StatType::Sta => 3,
            StatType::Int => 4,
            StatType::Cha => 5,
        }
    }
}

/// Fixed-size stat block. Values are signed: items can apply negative
/// deltas and HP goes to zero or below on death.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    values: [i32; 6],
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    pub fn new() -> Self {
        Self {
            values: [BASE_STAT_VALUE; 6],
        }
    }

    pub fn get(&self, stat: StatType) -> i32 {
        self.values[stat.index()]
    }

    pub fn set(&mut self, stat: StatType, value: i32) {
        self.values[stat.index()] = value;
    }

    pub fn add(&mut self, stat: StatType, delta: i32) {
        self.values[stat.index()] += delta;
    }

    /// The lowest-valued stat; ties break toward the first in
    /// `StatType::all()` order.
    pub fn lowest(&self) -> StatType {
        let mut lowest = StatType::Hp;
        for stat in StatType::all() {
            if self.get(stat) < self.get(lowest) {
                lowest = stat;
            }
        }
        lowest
    }

    /// Sum of all six stat values.
    pub fn total(&self) -> i32 {
        self.values.iter().sum()
    }
}
