//! Leaderboard persistence.
//!
//! Each tier is a small sheet of string cells: row 0 is the header and the
//! following rows hold one ranked entry each. The sheet is always written in
//! full, with unused rows blanked, so stale entries never survive a shrink.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::leaderboard::{LeaderboardEntry, LEADERBOARD_CAPACITY};
use crate::core::tier::Tier;

pub type Row = Vec<String>;

pub const HEADER: [&str; 2] = ["Name", "Score"];

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage could not be reached; a later attempt may succeed
    #[error("{tier} leaderboard storage unavailable: {source}")]
    Unavailable {
        tier: Tier,
        #[source]
        source: io::Error,
    },
    /// The persisted sheet is not valid JSON
    #[error("{tier} leaderboard sheet is corrupt: {source}")]
    Corrupt {
        tier: Tier,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Per-tier persistence of ranked entries
pub trait LeaderboardStore {
    fn read_leaderboard(&self, tier: Tier) -> Result<Vec<LeaderboardEntry>, StoreError>;

    /// Replace the whole tier with `entries`
    fn write_leaderboard(&self, tier: Tier, entries: &[LeaderboardEntry]) -> Result<(), StoreError>;
}

/// Decode sheet rows, skipping the header and any malformed row
pub fn rows_to_entries(rows: &[Row]) -> Vec<LeaderboardEntry> {
    rows.iter()
        .skip(1)
        .filter_map(|row| {
            let name = row.first()?.trim();
            let score = row.get(1)?.trim();
            if name.is_empty() || score.is_empty() || !score.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            Some(LeaderboardEntry::new(name, score.parse().ok()?))
        })
        .collect()
}

/// Encode entries as a full sheet: header plus `capacity` rows
pub fn entries_to_rows(entries: &[LeaderboardEntry], capacity: usize) -> Vec<Row> {
    let mut rows = Vec::with_capacity(capacity + 1);
    rows.push(HEADER.iter().map(|h| h.to_string()).collect());
    for i in 0..capacity.max(entries.len()) {
        rows.push(match entries.get(i) {
            Some(entry) => vec![entry.name.clone(), entry.score.to_string()],
            None => vec![String::new(), String::new()],
        });
    }
    rows
}

#[derive(Debug, Serialize)]
struct Sheet {
    tier: Tier,
    rows: Vec<Row>,
}

/// Cells of one stored row; a cell that is not a string reads as blank
fn stored_cells(row: &Value) -> Row {
    row.as_array()
        .map(|cells| {
            cells
                .iter()
                .map(|cell| cell.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Sheets stored as JSON files, one per tier, under a data directory.
///
/// Writes go to a temporary file that is renamed over the old sheet, so a
/// failed write leaves the previous leaderboard intact.
#[derive(Debug, Clone)]
pub struct SheetStore {
    dir: PathBuf,
    capacity: usize,
}

impl SheetStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            capacity: LEADERBOARD_CAPACITY,
        }
    }

    fn sheet_path(&self, tier: Tier) -> PathBuf {
        self.dir.join(format!("{}.json", tier.as_str()))
    }

    /// Raw rows of a tier's sheet, empty when none has been written yet
    pub fn read_rows(&self, tier: Tier) -> Result<Vec<Row>, StoreError> {
        let path = self.sheet_path(tier);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no sheet yet");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Unavailable { tier, source }),
        };

        let sheet: Value =
            serde_json::from_str(&text).map_err(|source| StoreError::Corrupt { tier, source })?;
        match sheet.get("tier").and_then(Value::as_str) {
            Some(found) if found == tier.as_str() => {}
            found => warn!(expected = %tier, ?found, path = %path.display(), "sheet tier mismatch"),
        }

        let Some(rows) = sheet.get("rows").and_then(Value::as_array) else {
            warn!(path = %path.display(), "sheet has no rows");
            return Ok(Vec::new());
        };
        Ok(rows.iter().map(stored_cells).collect())
    }

    fn write_rows(&self, tier: Tier, rows: Vec<Row>) -> Result<(), StoreError> {
        let unavailable = |source: io::Error| StoreError::Unavailable { tier, source };
        let sheet = Sheet { tier, rows };
        let json = serde_json::to_string_pretty(&sheet)
            .map_err(|source| StoreError::Corrupt { tier, source })?;

        fs::create_dir_all(&self.dir).map_err(unavailable)?;
        let path = self.sheet_path(tier);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(unavailable)?;
        fs::rename(&tmp, &path).map_err(unavailable)?;
        debug!(path = %path.display(), "sheet written");
        Ok(())
    }
}

impl LeaderboardStore for SheetStore {
    fn read_leaderboard(&self, tier: Tier) -> Result<Vec<LeaderboardEntry>, StoreError> {
        Ok(rows_to_entries(&self.read_rows(tier)?))
    }

    fn write_leaderboard(&self, tier: Tier, entries: &[LeaderboardEntry]) -> Result<(), StoreError> {
        self.write_rows(tier, entries_to_rows(entries, self.capacity))
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;
