pub mod input;       // Timed line input raced against a deadline
pub mod leaderboard;
pub mod store;       // Per-tier leaderboard sheets
pub mod terminal;    // Terminal context wrapper
pub mod tier;
pub mod timer;
pub mod words;
