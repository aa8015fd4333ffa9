//! Arena - Battle Royale Event Simulation Library
//!
//! Simulates a multiplayer elimination game: players with randomized
//! stats proceed through rounds of weighted random events (combat, item
//! discovery, alliances, traps, sponsorship) until one survivor remains.
//! All randomness is injected as `&mut impl Rng`; binaries pass
//! `rand::thread_rng()`, tests and the simulator pass a seeded
//! `rand_chacha::ChaCha8Rng`.

pub mod constants;
pub mod events;
pub mod items;
pub mod log;
pub mod player;
pub mod probability;
pub mod round;
pub mod selector;
pub mod session;
pub mod simulator;
pub mod stats;

pub use log::GameLog;
pub use player::Player;
pub use probability::EventKind;
pub use session::{DeathRecord, GameSession, PlayerSummary};
pub use stats::{StatType, Stats};
