/// Difficulty tiers - each one owns an independent leaderboard
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// Word lengths drawn for this tier
    pub fn word_lengths(&self) -> &'static [usize] {
        match self {
            Tier::Easy => &[6],
            Tier::Medium => &[7, 8],
            Tier::Hard => &[9, 10],
        }
    }

    /// Storage key, also used as the file stem of the persisted sheet
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Easy => "easy",
            Tier::Medium => "medium",
            Tier::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Easy => "Easy",
            Tier::Medium => "Medium",
            Tier::Hard => "Hard",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Tier::Easy => "6-letter words",
            Tier::Medium => "7 or 8-letter words",
            Tier::Hard => "9 or 10-letter words",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_match_difficulty() {
        assert_eq!(Tier::Easy.word_lengths(), &[6]);
        assert_eq!(Tier::Medium.word_lengths(), &[7, 8]);
        assert_eq!(Tier::Hard.word_lengths(), &[9, 10]);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"medium\"");
        let tier: Tier = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(tier, Tier::Hard);
    }
}
