/// Anagrams-specific renderer - pure presentation, no game logic
use std::io::{self, Write};
use std::time::Duration;

use crate::core::leaderboard::{LeaderboardEntry, Placement};
use crate::core::store::StoreError;
use crate::core::terminal::{TerminalColor, TerminalContext};
use crate::core::tier::Tier;
use crate::core::timer::{RoundOutcome, Verdict};
use crate::games::anagrams::game::Round;

/// How to play, with the per-guess time budget filled in
pub fn rules_text(timeout: Duration) -> String {
    let secs = timeout.as_secs();
    let example = secs.saturating_sub(8).max(1);
    format!(
        "\
• You will be given five randomly chosen English words.
• The only problem is the letters have been jumbled up!
• You will need to try and work out what the word is.
• You have {secs} seconds to solve each anagram.
• The quicker you solve the anagram the more points you will receive.
• Eg, if you solve it with {example} seconds remaining you will score {example} points.
• Another real word made from the same letters scores just the same.
• If you score enough points your name will appear on the leaderboard."
    )
}

pub struct AnagramRenderer {
    player_name: String,
}

impl AnagramRenderer {
    pub fn new(player_name: String) -> Self {
        Self { player_name }
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn welcome<W: Write>(term: &mut TerminalContext<W>) -> io::Result<()> {
        term.clear_screen()?;
        term.print_colored_line("🔤 Welcome to the Anagrams game!", TerminalColor::Cyan)?;
        term.empty_line()?;
        term.flush()
    }

    pub fn rules<W: Write>(term: &mut TerminalContext<W>, timeout: Duration) -> io::Result<()> {
        term.empty_line()?;
        for line in rules_text(timeout).lines() {
            term.print_line(line)?;
        }
        term.empty_line()?;
        term.flush()
    }

    pub fn goodbye<W: Write>(term: &mut TerminalContext<W>) -> io::Result<()> {
        term.print_line("Thanks for playing! Goodbye!")?;
        term.flush()
    }

    pub fn greet<W: Write>(&self, term: &mut TerminalContext<W>) -> io::Result<()> {
        term.empty_line()?;
        term.print_line(&format!("Hello {}! Hope you enjoy the game.", self.player_name))?;
        term.flush()
    }

    pub fn round_banner<W: Write>(
        &self,
        term: &mut TerminalContext<W>,
        round: &Round,
        rounds: usize,
        timeout: Duration,
    ) -> io::Result<()> {
        term.empty_line()?;
        term.print_colored_line(&format!("Round {} of {}", round.number, rounds), TerminalColor::Cyan)?;
        term.print_line(&format!(
            "Unscramble this word (you have {} seconds): {}",
            timeout.as_secs(),
            round.spaced_scramble()
        ))?;
        term.print_line("To skip hit enter")?;
        term.print("Your guess: ")?;
        term.flush()
    }

    pub fn round_result<W: Write>(
        &self,
        term: &mut TerminalContext<W>,
        round: &Round,
        outcome: &RoundOutcome,
    ) -> io::Result<()> {
        match outcome.verdict {
            Verdict::TimedOut => {
                term.print_line("⏰ Time's up!")?;
                term.print("Sorry, time is up! The correct answer was: ")?;
                term.print_colored_line(&round.word, TerminalColor::Yellow)?;
            }
            Verdict::Correct => {
                term.print_colored_line("Correct!", TerminalColor::Green)?;
                term.print_line(&format!(
                    "You answered in {} seconds.",
                    outcome.elapsed.as_secs()
                ))?;
                term.print_line(&format!("You earn {} points.", outcome.score_delta))?;
            }
            Verdict::AlternateAnagram => {
                let guess = outcome.guess.as_deref().unwrap_or_default();
                term.print(&format!("Nice! '{guess}' is a valid anagram of the correct word: '"))?;
                term.print_colored(&round.word, TerminalColor::Yellow)?;
                term.print_line("'.")?;
                term.print_line(&format!("You earn {} points.", outcome.score_delta))?;
            }
            Verdict::Incorrect => {
                term.print("Incorrect. The correct word was: ")?;
                term.print_colored_line(&round.word, TerminalColor::Yellow)?;
            }
        }
        term.flush()
    }

    pub fn final_score<W: Write>(&self, term: &mut TerminalContext<W>, score: u32) -> io::Result<()> {
        term.empty_line()?;
        term.print_line(&format!("You scored {score} points!"))?;
        term.print_line("Checking the leaderboard. Please wait...")?;
        term.flush()
    }

    pub fn placement<W: Write>(&self, term: &mut TerminalContext<W>, placement: &Placement) -> io::Result<()> {
        match placement.rank {
            Some(rank) => {
                term.print_colored_line(
                    &format!("🎉 Well done {}! You are on the leaderboard!", self.player_name),
                    TerminalColor::Green,
                )?;
                term.print_colored_line(&format!("Position: #{rank}"), TerminalColor::Green)?;
            }
            None => {
                term.print_colored_line(&format!("Sorry {}.", self.player_name), TerminalColor::Yellow)?;
                term.print_colored_line("That score didn't make the leaderboard.", TerminalColor::Yellow)?;
            }
        }
        term.flush()
    }

    pub fn store_error<W: Write>(&self, term: &mut TerminalContext<W>, err: &StoreError) -> io::Result<()> {
        term.print_colored_line(
            &format!("Your score could not be saved to the leaderboard: {err}"),
            TerminalColor::Red,
        )?;
        term.flush()
    }

    pub fn standings<W: Write>(
        term: &mut TerminalContext<W>,
        tier: Tier,
        entries: &[LeaderboardEntry],
    ) -> io::Result<()> {
        term.empty_line()?;
        term.print_line("🏆 Leaderboard 🏆")?;
        term.print_line(&format!("Difficulty: {tier}"))?;
        term.empty_line()?;
        term.print_line(&format!("{:<20}{}", "Name", "Score"))?;
        if entries.is_empty() {
            term.print_line("No scores yet.")?;
        }
        for (i, entry) in entries.iter().enumerate() {
            term.print_line(&format!("{}. {:<18}{}", i + 1, entry.name, entry.score))?;
        }
        term.flush()
    }
}
