/// Anagrams game module - session, renderer and the game runner
pub mod game;
pub mod renderer;

pub use game::{AnagramSession, GameError, Round, ROUNDS};
pub use renderer::AnagramRenderer;

use std::io::Write;

use anyhow::Result;
use rand::Rng;
use tracing::warn;

use crate::core::input::TimedInput;
use crate::core::leaderboard::{LeaderboardEntry, Leaderboards, Placement};
use crate::core::store::LeaderboardStore;
use crate::core::terminal::TerminalContext;
use crate::core::tier::Tier;
use crate::core::timer::RoundTimer;
use crate::core::words::WordSource;

/// What a finished game left behind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub tier: Tier,
    pub score: u32,
    /// `None` when the leaderboard could not be saved
    pub placement: Option<Placement>,
}

/// Runs whole games for one player: five timed rounds, then the leaderboard
pub struct AnagramGame<'a, W: ?Sized, S> {
    words: &'a W,
    leaderboards: &'a Leaderboards<S>,
    timer: RoundTimer,
    renderer: AnagramRenderer,
}

impl<'a, W, S> AnagramGame<'a, W, S>
where
    W: WordSource + ?Sized,
    S: LeaderboardStore,
{
    pub fn new(words: &'a W, leaderboards: &'a Leaderboards<S>, timer: RoundTimer, player_name: String) -> Self {
        Self {
            words,
            leaderboards,
            timer,
            renderer: AnagramRenderer::new(player_name),
        }
    }

    pub fn renderer(&self) -> &AnagramRenderer {
        &self.renderer
    }

    /// Play one game. `pause` runs between rounds, not after the last one.
    pub async fn play<I, R, O, P>(
        &self,
        tier: Tier,
        input: &mut I,
        rng: &mut R,
        term: &mut TerminalContext<O>,
        mut pause: P,
    ) -> Result<GameSummary>
    where
        I: TimedInput + ?Sized,
        R: Rng + ?Sized,
        O: Write,
        P: FnMut() -> Result<()>,
    {
        let mut session = AnagramSession::new(self.words, tier, self.timer);

        while !session.is_finished() {
            let round = session.next_round(rng)?;
            self.renderer.round_banner(term, &round, ROUNDS, self.timer.timeout())?;
            let outcome = session.play_round(&round, input).await?;
            self.renderer.round_result(term, &round, &outcome)?;

            if !session.is_finished() {
                pause()?;
            }
        }

        let score = session.score();
        self.renderer.final_score(term, score)?;

        let entry = LeaderboardEntry::new(self.renderer.player_name(), score);
        let placement = match self.leaderboards.submit(tier, entry) {
            Ok(placement) => {
                self.renderer.placement(term, &placement)?;
                Some(placement)
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, %tier, score, "leaderboard not saved");
                self.renderer.store_error(term, &e)?;
                None
            }
            Err(e) => return Err(e.into()),
        };

        Ok(GameSummary { tier, score, placement })
    }

    /// Print the current board for `tier`
    pub fn show_standings<O: Write>(&self, tier: Tier, term: &mut TerminalContext<O>) -> Result<()> {
        let entries = self.leaderboards.standings(tier)?;
        AnagramRenderer::standings(term, tier, &entries)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::ScriptedInput;
    use crate::core::store::MemoryStore;
    use crate::core::words::WordList;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn vocab() -> WordList {
        WordList::from_words(["garden", "ranged", "danger", "mailbox"])
    }

    fn seeded_board() -> MemoryStore {
        let rows = [("Name", "Score"), ("ALICE", "80"), ("BOB", "20"), ("", "55"), ("CARL", "n/a")]
            .iter()
            .map(|(n, s)| vec![n.to_string(), s.to_string()])
            .collect();
        MemoryStore::new().with_rows(Tier::Easy, rows)
    }

    fn script() -> ScriptedInput {
        ScriptedInput::new()
            .typed(Duration::from_secs(5), "garden")
            .typed(Duration::from_millis(12_300), "ranged")
            .silent()
            .typed(Duration::from_secs(1), "xyzzyx")
            .typed(Duration::from_millis(19_500), "danger")
    }

    #[tokio::test(start_paused = true)]
    async fn full_game_lands_on_the_board() {
        let words = vocab();
        let boards = Leaderboards::new(seeded_board());
        let game = AnagramGame::new(&words, &boards, RoundTimer::default(), "DORA".to_string());
        let mut term = TerminalContext::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(11);
        let mut pauses = 0;

        let summary = game
            .play(Tier::Easy, &mut script(), &mut rng, &mut term, || {
                pauses += 1;
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(pauses, ROUNDS - 1);
        assert_eq!(summary.score, 24);
        let placement = summary.placement.unwrap();
        assert_eq!(placement.rank, Some(2));
        assert_eq!(
            placement.entries,
            vec![
                LeaderboardEntry::new("ALICE", 80),
                LeaderboardEntry::new("DORA", 24),
                LeaderboardEntry::new("BOB", 20),
            ]
        );

        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("Round 5 of 5"));
        assert!(out.contains("Time's up!"));
        assert!(out.contains("You scored 24 points!"));
        assert!(out.contains("Position: #2"));
    }

    #[tokio::test(start_paused = true)]
    async fn unsaved_score_is_reported_not_fatal() {
        let words = vocab();
        let boards = Leaderboards::new(seeded_board());
        boards.store().fail_writes(true);
        let game = AnagramGame::new(&words, &boards, RoundTimer::default(), "DORA".to_string());
        let mut term = TerminalContext::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(11);

        let summary = game
            .play(Tier::Easy, &mut script(), &mut rng, &mut term, || Ok(()))
            .await
            .unwrap();

        assert_eq!(summary.score, 24);
        assert_eq!(summary.placement, None);
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("could not be saved"));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_tier_aborts_the_game() {
        let words = vocab();
        let boards = Leaderboards::new(MemoryStore::new());
        let game = AnagramGame::new(&words, &boards, RoundTimer::default(), "DORA".to_string());
        let mut term = TerminalContext::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(3);

        let err = game
            .play(Tier::Hard, &mut ScriptedInput::new(), &mut rng, &mut term, || Ok(()))
            .await
            .unwrap_err();
        assert_eq!(err.downcast_ref::<GameError>(), Some(&GameError::NoWordAvailable(Tier::Hard)));
        assert!(boards.standings(Tier::Hard).unwrap().is_empty());
    }

    #[test]
    fn standings_render_from_store() {
        let words = vocab();
        let boards = Leaderboards::new(seeded_board());
        let game = AnagramGame::new(&words, &boards, RoundTimer::default(), "DORA".to_string());
        let mut term = TerminalContext::new(Vec::new());

        game.show_standings(Tier::Easy, &mut term).unwrap();
        let out = String::from_utf8(term.into_inner()).unwrap();
        assert!(out.contains("1. ALICE"));
        assert!(out.contains("2. BOB"));
        assert!(!out.contains("CARL"));
    }
}
