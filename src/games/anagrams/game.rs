use anyhow::{bail, Result};
use rand::Rng;
use thiserror::Error;
use tracing::info;

use crate::core::input::TimedInput;
use crate::core::tier::Tier;
use crate::core::timer::{RoundOutcome, RoundTimer};
use crate::core::words::{jumble, pick_word, WordSource};

/// Rounds in one game
pub const ROUNDS: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("no words available for {0} difficulty")]
    NoWordAvailable(Tier),
}

/// One drawn word and its scramble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub number: usize,
    pub word: String,
    pub scramble: String,
}

impl Round {
    /// Scramble with the letters spaced out for display
    pub fn spaced_scramble(&self) -> String {
        self.scramble
            .chars()
            .map(String::from)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Score keeping for a single five-round game
pub struct AnagramSession<'a, W: ?Sized> {
    words: &'a W,
    tier: Tier,
    timer: RoundTimer,
    score: u32,
    played: usize,
}

impl<'a, W: WordSource + ?Sized> AnagramSession<'a, W> {
    pub fn new(words: &'a W, tier: Tier, timer: RoundTimer) -> Self {
        Self {
            words,
            tier,
            timer,
            score: 0,
            played: 0,
        }
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds_played(&self) -> usize {
        self.played
    }

    pub fn is_finished(&self) -> bool {
        self.played >= ROUNDS
    }

    /// Draw the next word for this session's tier
    pub fn next_round<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Round, GameError> {
        let word = pick_word(self.words, self.tier, rng).ok_or(GameError::NoWordAvailable(self.tier))?;
        let scramble = jumble(&word, rng);
        Ok(Round {
            number: self.played + 1,
            word,
            scramble,
        })
    }

    /// Take exactly one timed guess at `round` and bank its points
    pub async fn play_round<I: TimedInput + ?Sized>(&mut self, round: &Round, input: &mut I) -> Result<RoundOutcome> {
        if self.is_finished() {
            bail!("all {ROUNDS} rounds have already been played");
        }

        let outcome = self.timer.attempt_guess(input, &round.word, self.words).await?;
        self.score += outcome.score_delta;
        self.played += 1;

        info!(
            round = round.number,
            tier = %self.tier,
            verdict = ?outcome.verdict,
            delta = outcome.score_delta,
            total = self.score,
            "round finished"
        );
        Ok(outcome)
    }
}
