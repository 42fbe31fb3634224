use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use tracing::info;

use crate::core::input::TerminalInput;
use crate::core::leaderboard::{normalize_name, Leaderboards};
use crate::core::store::SheetStore;
use crate::core::terminal::TerminalContext;
use crate::core::tier::Tier;
use crate::core::timer::RoundTimer;
use crate::core::words::WordList;
use crate::games::anagrams::{AnagramGame, AnagramRenderer};
use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "anagrams")]
#[command(about = "🔤 Unscramble five words against the clock")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Word list, one word per line
    #[arg(long, global = true, default_value = "words.txt")]
    pub words: PathBuf,

    /// Directory holding the leaderboards
    #[arg(long, global = true, default_value = "leaderboards")]
    pub data_dir: PathBuf,

    /// Seconds allowed for each guess
    #[arg(long, global = true, default_value_t = 20, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Play the game (default)
    Play {
        /// Player name, skips the name prompt
        #[arg(short, long)]
        name: Option<String>,

        /// Difficulty for the first game, skips the difficulty prompt
        #[arg(short, long, value_enum)]
        tier: Option<Tier>,
    },
    /// Show how to play
    Rules,
    /// Show the top ten for a difficulty
    Leaderboard {
        #[arg(value_enum)]
        tier: Tier,
    },
}

impl From<&Cli> for Settings {
    fn from(cli: &Cli) -> Self {
        Self {
            words_path: cli.words.clone(),
            data_dir: cli.data_dir.clone(),
            timeout: Duration::from_secs(cli.timeout),
            verbose: cli.verbose,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from(&cli);

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
    info!(?settings, "starting");

    let mut term = TerminalContext::stdout();
    let command = cli.command.unwrap_or(Commands::Play { name: None, tier: None });

    match command {
        Commands::Rules => {
            AnagramRenderer::rules(&mut term, settings.timeout)?;
        }
        Commands::Leaderboard { tier } => {
            let leaderboards = Leaderboards::new(SheetStore::new(&settings.data_dir));
            let entries = leaderboards.standings(tier)?;
            AnagramRenderer::standings(&mut term, tier, &entries)?;
        }
        Commands::Play { name, tier } => {
            play(&settings, name, tier, &mut term).await?;
        }
    }

    Ok(())
}

async fn play(settings: &Settings, name: Option<String>, tier: Option<Tier>, term: &mut TerminalContext) -> Result<()> {
    let words = WordList::load(&settings.words_path)?;
    let leaderboards = Leaderboards::new(SheetStore::new(&settings.data_dir));

    AnagramRenderer::welcome(term)?;
    let name = match name {
        Some(raw) => normalize_name(&raw)?,
        None => {
            if welcome_choice()? == WelcomeChoice::Rules {
                AnagramRenderer::rules(term, settings.timeout)?;
            }
            prompt_name()?
        }
    };

    let game = AnagramGame::new(&words, &leaderboards, RoundTimer::new(settings.timeout), name);
    game.renderer().greet(term)?;

    let mut input = TerminalInput::new();
    let mut rng = rand::rng();
    let mut preset = tier;

    loop {
        let tier = match preset.take() {
            Some(tier) => tier,
            None => select_tier()?,
        };
        game.play(tier, &mut input, &mut rng, term, pause_for_enter).await?;

        let mut viewed = false;
        loop {
            match replay_choice(tier, viewed)? {
                Replay::Again => break,
                Replay::Leaderboard => {
                    game.show_standings(tier, term)?;
                    viewed = true;
                }
                Replay::Exit => {
                    AnagramRenderer::goodbye(term)?;
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum WelcomeChoice {
    Rules,
    Play,
}

fn welcome_choice() -> Result<WelcomeChoice> {
    let options = ["📖 Learn how to play", "🎮 Play"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What would you like to do?")
        .items(&options[..])
        .default(0)
        .interact()?;

    Ok(if selection == 0 {
        WelcomeChoice::Rules
    } else {
        WelcomeChoice::Play
    })
}

fn prompt_name() -> Result<String> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("What is your username (max 20 characters)?")
        .validate_with(|input: &String| normalize_name(input).map(|_| ()))
        .interact_text()?;

    Ok(normalize_name(&raw)?)
}

fn select_tier() -> Result<Tier> {
    let items: Vec<String> = Tier::ALL
        .iter()
        .map(|t| format!("{} ({})", t.label(), t.describe()))
        .collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What difficulty would you like?")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(Tier::ALL[selection])
}

fn pause_for_enter() -> Result<()> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Press ENTER to continue")
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Ok(())
            } else {
                Err("Please press ENTER without typing anything.")
            }
        })
        .interact_text()?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Replay {
    Again,
    Leaderboard,
    Exit,
}

/// Options after a game; the leaderboard is offered once
fn replay_options(tier: Tier, viewed: bool) -> Vec<(Replay, String)> {
    let mut options = vec![(Replay::Again, "🔁 Play again".to_string())];
    if !viewed {
        options.push((Replay::Leaderboard, format!("🏆 View the {tier} level leaderboard")));
    }
    options.push((Replay::Exit, "🚪 Exit".to_string()));
    options
}

fn replay_choice(tier: Tier, viewed: bool) -> Result<Replay> {
    let options = replay_options(tier, viewed);
    let labels: Vec<&str> = options.iter().map(|(_, label)| label.as_str()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Would you like to")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(options[selection].0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings() {
        let cli = Cli::try_parse_from(["anagrams"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(Settings::from(&cli), Settings::default());
    }

    #[test]
    fn play_flags_parse() {
        let cli = Cli::try_parse_from(["anagrams", "play", "--name", "alice", "--tier", "hard", "--timeout", "30"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Play {
                name: Some("alice".to_string()),
                tier: Some(Tier::Hard),
            })
        );
        assert_eq!(Settings::from(&cli).timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["anagrams", "--timeout", "0"]).is_err());
    }

    #[test]
    fn leaderboard_needs_a_tier() {
        assert!(Cli::try_parse_from(["anagrams", "leaderboard"]).is_err());
        let cli = Cli::try_parse_from(["anagrams", "leaderboard", "medium"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Leaderboard { tier: Tier::Medium }));
    }

    #[test]
    fn leaderboard_offered_once() {
        let first: Vec<_> = replay_options(Tier::Easy, false).into_iter().map(|(r, _)| r).collect();
        assert_eq!(first, vec![Replay::Again, Replay::Leaderboard, Replay::Exit]);

        let after: Vec<_> = replay_options(Tier::Easy, true).into_iter().map(|(r, _)| r).collect();
        assert_eq!(after, vec![Replay::Again, Replay::Exit]);
    }
}
