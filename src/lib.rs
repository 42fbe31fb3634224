pub mod cli;
pub mod core;
pub mod games;
pub mod settings;

// Re-export for convenience
pub use crate::core::leaderboard::{update_leaderboard, LeaderboardEntry, Leaderboards, Placement};
pub use crate::core::timer::{RoundOutcome, RoundTimer};
pub use crate::core::tier::Tier;
