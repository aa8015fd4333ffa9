use crate::stats::StatType;
use serde::{Deserialize, Serialize};

/// A consumable item: a name plus signed stat deltas applied on use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub effects: Vec<(StatType, i32)>,
}

impl Item {
    /// Convenience constructor for the common single-stat item.
    pub fn single(name: &str, stat: StatType, amount: i32) -> Self {
        Self {
            name: name.to_string(),
            effects: vec![(stat, amount)],
        }
    }
}

/// A catalog entry: an item name and its effect magnitude. The magnitude
/// doubles as the stat delta granted and as the selection weight within
/// the category.
pub struct CatalogEntry {
    pub name: &'static str,
    pub magnitude: i32,
}

/// The basic item catalog, one category per stat.
pub fn catalog_for(stat: StatType) -> &'static [CatalogEntry] {
    match stat {
        StatType::Hp => &[CatalogEntry {
            name: "Bandaid",
            magnitude: 3,
        }],
        StatType::Def => &[CatalogEntry {
            name: "Armor",
            magnitude: 3,
        }],
        StatType::Str => &[CatalogEntry {
            name: "Knife",
            magnitude: 1,
        }],
        StatType::Sta => &[CatalogEntry {
            name: "Burger",
            magnitude: 3,
        }],
        StatType::Int => &[CatalogEntry {
            name: "Book",
            magnitude: 2,
        }],
        StatType::Cha => &[CatalogEntry {
            name: "Makeup",
            magnitude: 2,
        }],
    }
}
