//! Round timing and scoring.
//!
//! A round is a single guess against a fixed time budget. The guess is
//! judged against the target word and the vocabulary, and a correct answer
//! earns one point per second left on the clock, rounded up.

use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::core::input::{TimedInput, TimedLine};
use crate::core::words::WordSource;

/// Time budget for a single guess
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No line arrived before the deadline
    TimedOut,
    /// The guess is the target word
    Correct,
    /// A different vocabulary word built from the same letters
    AlternateAnagram,
    Incorrect,
}

impl Verdict {
    pub fn scores(&self) -> bool {
        matches!(self, Verdict::Correct | Verdict::AlternateAnagram)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub verdict: Verdict,
    /// Normalized guess, `None` on timeout
    pub guess: Option<String>,
    /// Time taken, capped at the timeout
    pub elapsed: Duration,
    pub score_delta: u32,
}

impl RoundOutcome {
    pub fn is_correct(&self) -> bool {
        self.verdict == Verdict::Correct
    }

    pub fn is_valid_alternate_anagram(&self) -> bool {
        self.verdict == Verdict::AlternateAnagram
    }

    pub fn timed_out(&self) -> bool {
        self.verdict == Verdict::TimedOut
    }
}

/// Points for answering after `elapsed`: `ceil(timeout - elapsed)`, never negative
pub fn score_delta(timeout: Duration, elapsed: Duration) -> u32 {
    let remaining = timeout.saturating_sub(elapsed);
    remaining.as_secs_f64().ceil() as u32
}

/// Same letters, same counts
pub fn is_anagram(a: &str, b: &str) -> bool {
    if a.chars().count() != b.chars().count() {
        return false;
    }
    let mut left: Vec<char> = a.chars().collect();
    let mut right: Vec<char> = b.chars().collect();
    left.sort_unstable();
    right.sort_unstable();
    left == right
}

/// Lowercase the guess and strip surrounding whitespace
pub fn normalize_guess(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Judge an already normalized guess
pub fn judge<W: WordSource + ?Sized>(target: &str, guess: &str, words: &W) -> Verdict {
    if guess.is_empty() {
        return Verdict::Incorrect;
    }
    if guess == target {
        return Verdict::Correct;
    }
    if is_anagram(guess, target) && words.is_known_word(guess) {
        return Verdict::AlternateAnagram;
    }
    Verdict::Incorrect
}

/// Enforces the time budget on one guess and converts it into points
#[derive(Debug, Clone, Copy)]
pub struct RoundTimer {
    timeout: Duration,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl RoundTimer {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait for a single guess of `target`, at most `timeout`
    pub async fn attempt_guess<I, W>(&self, input: &mut I, target: &str, words: &W) -> Result<RoundOutcome>
    where
        I: TimedInput + ?Sized,
        W: WordSource + ?Sized,
    {
        let TimedLine { line, elapsed } = input.read_line_with_deadline(self.timeout).await?;
        let elapsed = elapsed.min(self.timeout);

        let Some(raw) = line else {
            debug!(target_word = target, "guess timed out");
            return Ok(RoundOutcome {
                verdict: Verdict::TimedOut,
                guess: None,
                elapsed: self.timeout,
                score_delta: 0,
            });
        };

        let guess = normalize_guess(&raw);
        let verdict = judge(&target.to_lowercase(), &guess, words);
        let delta = if verdict.scores() {
            score_delta(self.timeout, elapsed)
        } else {
            0
        };
        debug!(target_word = target, %guess, ?verdict, ?elapsed, delta, "guess judged");

        Ok(RoundOutcome {
            verdict,
            guess: Some(guess),
            elapsed,
            score_delta: delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::ScriptedInput;
    use crate::core::words::WordList;
    use proptest::prelude::*;

    fn vocab() -> WordList {
        WordList::from_words(["garden", "ranged", "danger", "planet"])
    }

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn remaining_rounds_up() {
        assert_eq!(score_delta(DEFAULT_TIMEOUT, secs(12.3)), 8);
        assert_eq!(score_delta(DEFAULT_TIMEOUT, secs(0.0)), 20);
        assert_eq!(score_delta(DEFAULT_TIMEOUT, secs(19.99)), 1);
        assert_eq!(score_delta(DEFAULT_TIMEOUT, secs(20.0)), 0);
        assert_eq!(score_delta(DEFAULT_TIMEOUT, secs(31.0)), 0);
    }

    #[test]
    fn judge_cases() {
        let words = vocab();
        assert_eq!(judge("garden", "garden", &words), Verdict::Correct);
        assert_eq!(judge("garden", "ranged", &words), Verdict::AlternateAnagram);
        // same letters but not a word
        assert_eq!(judge("garden", "dengar", &words), Verdict::Incorrect);
        assert_eq!(judge("garden", "gardens", &words), Verdict::Incorrect);
        assert_eq!(judge("garden", "", &words), Verdict::Incorrect);
        assert_eq!(judge("garden", "planet", &words), Verdict::Incorrect);
    }

    #[tokio::test(start_paused = true)]
    async fn correct_guess_scores_remaining_time() {
        let words = vocab();
        let mut input = ScriptedInput::new().typed(secs(12.3), "  GarDen \n");
        let outcome = RoundTimer::default()
            .attempt_guess(&mut input, "garden", &words)
            .await
            .unwrap();

        assert!(outcome.is_correct());
        assert!(!outcome.is_valid_alternate_anagram());
        assert_eq!(outcome.guess.as_deref(), Some("garden"));
        assert_eq!(outcome.score_delta, 8);
    }

    #[tokio::test(start_paused = true)]
    async fn alternate_anagram_scores_like_exact() {
        let words = vocab();
        let mut input = ScriptedInput::new().typed(secs(5.0), "ranged");
        let outcome = RoundTimer::default()
            .attempt_guess(&mut input, "garden", &words)
            .await
            .unwrap();

        assert!(outcome.is_valid_alternate_anagram());
        assert!(!outcome.is_correct());
        assert_eq!(outcome.score_delta, 15);
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_and_empty_guesses_score_nothing() {
        let words = vocab();
        let mut input = ScriptedInput::new()
            .typed(secs(1.0), "planet")
            .typed(secs(1.0), "   ");
        let timer = RoundTimer::default();

        for _ in 0..2 {
            let outcome = timer.attempt_guess(&mut input, "garden", &words).await.unwrap();
            assert_eq!(outcome.verdict, Verdict::Incorrect);
            assert_eq!(outcome.score_delta, 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_scores_nothing() {
        let words = vocab();
        let mut input = ScriptedInput::new().silent();
        let timer = RoundTimer::new(Duration::from_secs(3));
        let outcome = timer.attempt_guess(&mut input, "garden", &words).await.unwrap();

        assert!(outcome.timed_out());
        assert_eq!(outcome.guess, None);
        assert_eq!(outcome.elapsed, Duration::from_secs(3));
        assert_eq!(outcome.score_delta, 0);
    }

    proptest! {
        #[test]
        fn delta_stays_within_budget(timeout in 1u64..120, frac in 0.0f64..=1.0) {
            let timeout = Duration::from_secs(timeout);
            let elapsed = timeout.mul_f64(frac);
            let delta = score_delta(timeout, elapsed);
            prop_assert!(u64::from(delta) <= timeout.as_secs());
            prop_assert_eq!(delta, timeout.saturating_sub(elapsed).as_secs_f64().ceil() as u32);
        }

        #[test]
        fn case_and_padding_never_matter(word in "[a-z]{6,10}", pad in "[ \t]{0,3}") {
            let words = WordList::from_words([word.as_str()]);
            let raw = format!("{pad}{}{pad}", word.to_uppercase());
            prop_assert_eq!(judge(&word, &normalize_guess(&raw), &words), Verdict::Correct);
        }
    }
}
