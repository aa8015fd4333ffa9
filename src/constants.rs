// Stat allocation constants
pub const BASE_STAT_VALUE: i32 = 5;
pub const STAT_CAP: i32 = 25;
pub const BONUS_STAT_POINTS: i32 = 20;

// Endgame triggers
pub const FINAL_SHOWDOWN_ROUND: u32 = 20;
pub const ENDGAME_PLAYER_THRESHOLD: usize = 5;

// Endgame combat pressure: added to the combat weight, taken from neutral
pub const ENDGAME_COMBAT_BONUS_PER_ROUND: f64 = 0.05;
pub const ENDGAME_COMBAT_BONUS_CAP: f64 = 0.3;

// Combat constants
pub const DEFENSE_REDUCTION_FACTOR: f64 = 0.10;
pub const DEFENSE_OVERFLOW_DISCOUNT: f64 = 0.75;
pub const MIN_COMBAT_DAMAGE: i32 = 1;

// Trap constants
pub const TRAP_FALL_DAMAGE: i32 = 4;
pub const TRAP_KILLER_NAME: &str = "a trap";

/// Stat weights for the item discovery event, aligned with
/// `StatType::all()` order (HP, STR, DEF, STA, INT, CHA).
pub const ITEM_EVENT_STAT_WEIGHTS: [f64; 6] = [0.20, 0.15, 0.15, 0.25, 0.15, 0.10];
