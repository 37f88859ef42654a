//! Ranked, bounded collection of finished sessions.

mod leaderboard;
mod store;

pub use leaderboard::{Leaderboard, MAX_RANKINGS};
pub use store::{JsonFileStore, MemoryStore, RankingStore};
