//! Top-ten leaderboard ranking.
//!
//! Entries are merged by stable sort on score, so at equal score earlier
//! arrivals stay ahead of later ones. The newcomer is tracked by its
//! insertion sequence number rather than by value, which keeps its rank
//! unambiguous when an identical name and score already exist.

use thiserror::Error;
use tracing::info;

use crate::core::store::{LeaderboardStore, StoreError};
use crate::core::tier::Tier;

/// Maximum number of entries kept per tier
pub const LEADERBOARD_CAPACITY: usize = 10;

/// Maximum length of a player name
pub const MAX_NAME_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("Please enter a username.")]
    Empty,
    #[error("Username too long ({0} characters). Please enter a username with at most 20 characters.")]
    TooLong(usize),
}

/// Trim and uppercase a player name, rejecting empty or overlong ones
pub fn normalize_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim().to_uppercase();
    let len = name.chars().count();
    if len == 0 {
        return Err(NameError::Empty);
    }
    if len > MAX_NAME_LEN {
        return Err(NameError::TooLong(len));
    }
    Ok(name)
}

/// Merged leaderboard plus where the new entry landed (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub entries: Vec<LeaderboardEntry>,
    pub rank: Option<usize>,
}

/// Merge `entry` into `existing`, keep the best `capacity` entries
pub fn update_leaderboard(existing: &[LeaderboardEntry], entry: LeaderboardEntry, capacity: usize) -> Placement {
    let newcomer = existing.len();
    let mut ranked: Vec<(usize, LeaderboardEntry)> = existing.iter().cloned().enumerate().collect();
    ranked.push((newcomer, entry));

    // stable: ties keep arrival order
    ranked.sort_by(|(_, a), (_, b)| b.score.cmp(&a.score));
    ranked.truncate(capacity);

    let rank = ranked.iter().position(|(seq, _)| *seq == newcomer).map(|i| i + 1);
    Placement {
        entries: ranked.into_iter().map(|(_, e)| e).collect(),
        rank,
    }
}

/// Read-merge-write over an injected store, one tier at a time.
///
/// Not safe for concurrent writers on the same tier: two simultaneous
/// submissions can each read the old board and the later write wins.
#[derive(Debug)]
pub struct Leaderboards<S> {
    store: S,
    capacity: usize,
}

impl<S: LeaderboardStore> Leaderboards<S> {
    pub fn new(store: S) -> Self {
        Self::with_capacity(store, LEADERBOARD_CAPACITY)
    }

    pub fn with_capacity(store: S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// Rank a finished game and persist the merged board
    pub fn submit(&self, tier: Tier, entry: LeaderboardEntry) -> Result<Placement, StoreError> {
        let existing = self.store.read_leaderboard(tier)?;
        let name = entry.name.clone();
        let score = entry.score;

        let placement = update_leaderboard(&existing, entry, self.capacity);
        self.store.write_leaderboard(tier, &placement.entries)?;

        info!(%tier, %name, score, rank = ?placement.rank, "leaderboard updated");
        Ok(placement)
    }

    /// Current board for a tier, best first
    pub fn standings(&self, tier: Tier) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut entries = self.store.read_leaderboard(tier)?;
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);
        Ok(entries)
    }
}
