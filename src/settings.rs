//! Runtime settings
//!
//! Resolved once from the command line and handed to the game.

use std::path::PathBuf;
use std::time::Duration;

use tracing::Level;

use crate::core::timer::DEFAULT_TIMEOUT;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Newline-separated vocabulary file
    pub words_path: PathBuf,
    /// Directory holding one leaderboard sheet per tier
    pub data_dir: PathBuf,
    /// Time allowed per guess
    pub timeout: Duration,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            words_path: PathBuf::from("words.txt"),
            data_dir: PathBuf::from("leaderboards"),
            timeout: DEFAULT_TIMEOUT,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }
}
