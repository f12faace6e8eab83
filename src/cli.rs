use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::Level;

use crate::core::engine::Engine;
use crate::data::{load_puzzles, PuzzleSource};
use crate::logging;
use crate::pyramid::{PyramidGame, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "wordpyramid")]
#[command(about = "🔺 Grow a three letter word into four and five letter words")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Puzzle deck to load (JSON). Defaults to the bundled deck.
    #[arg(short, long, global = true)]
    pub puzzles: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, global = true, default_value = "info")]
    pub log_level: Level,

    #[command(flatten)]
    pub play: PlayArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Play in the terminal (default)
    Play,
    /// Load the deck and report malformed puzzles
    Check,
}

#[derive(Args, Debug, Clone)]
pub struct PlayArgs {
    /// How long a solved word glows before the next step, in milliseconds (0 = instant)
    #[arg(long, global = true, default_value_t = 1000)]
    pub transition_delay_ms: u64,

    /// How long a hinted letter glows, in milliseconds
    #[arg(long, global = true, default_value_t = 1500)]
    pub glow_ms: u64,
}

impl From<&PlayArgs> for SessionConfig {
    fn from(args: &PlayArgs) -> Self {
        SessionConfig {
            transition_delay: Duration::from_millis(args.transition_delay_ms),
            letter_glow: Duration::from_millis(args.glow_ms),
        }
    }
}

impl Cli {
    pub fn puzzle_source(&self) -> PuzzleSource {
        match &self.puzzles {
            Some(path) => PuzzleSource::File(path.clone()),
            None => PuzzleSource::Bundled,
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref(), cli.log_level)?;

    let source = cli.puzzle_source();
    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => play(&source, SessionConfig::from(&cli.play)).await,
        Commands::Check => check(&source).await,
    }
}

async fn play(source: &PuzzleSource, config: SessionConfig) -> Result<()> {
    let puzzles = load_puzzles(source).await;
    let game = PyramidGame::new(puzzles, config);

    let terminal = ratatui::init();
    let result = Engine::new(game).run(terminal).await;
    ratatui::restore();

    let game = result?;
    println!("🏁 Completed {} puzzle(s). Goodbye!", game.session().completed_count());
    Ok(())
}

/// Validate the deck; fails when nothing loads or any puzzle breaks the one-letter rule
pub async fn check(source: &PuzzleSource) -> Result<()> {
    let puzzles = load_puzzles(source).await;
    if puzzles.is_empty() {
        bail!("no puzzles could be loaded from {:?}", source);
    }

    println!("📦 Loaded {} puzzles", puzzles.len());
    let malformed: Vec<_> = puzzles.iter().filter(|p| !p.is_well_formed()).collect();
    for p in &malformed {
        println!("  ❌ #{}: {} → {} → {}", p.id, p.three, p.four, p.five);
    }
    if !malformed.is_empty() {
        bail!("{} malformed puzzle(s)", malformed.len());
    }

    println!("✅ All puzzles are well formed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_play_with_bundled_deck() {
        let cli = Cli::try_parse_from(["wordpyramid"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.puzzle_source(), PuzzleSource::Bundled);
        assert_eq!(cli.log_level, Level::INFO);
        assert_eq!(SessionConfig::from(&cli.play), SessionConfig::default());
    }

    #[test]
    fn parses_check_with_deck_path() {
        let cli = Cli::try_parse_from(["wordpyramid", "check", "--puzzles", "deck.json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Check));
        assert_eq!(cli.puzzle_source(), PuzzleSource::File(PathBuf::from("deck.json")));
    }

    #[test]
    fn zero_delays_give_immediate_config() {
        let cli = Cli::try_parse_from([
            "wordpyramid",
            "play",
            "--transition-delay-ms",
            "0",
            "--glow-ms",
            "0",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(SessionConfig::from(&cli.play), SessionConfig::immediate());
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[tokio::test]
    async fn check_passes_on_bundled_deck() {
        assert!(check(&PuzzleSource::Bundled).await.is_ok());
    }

    #[tokio::test]
    async fn check_fails_on_malformed_deck() {
        let path = std::env::temp_dir().join(format!("wordpyramid-{}-check.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"puzzle_id":1,"three":"cat","four":"dogs","five":"frogs","4hint":"a","5hint":"b"}]"#,
        )
        .unwrap();
        let result = check(&PuzzleSource::File(path.clone())).await;
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn check_fails_when_nothing_loads() {
        let path = std::env::temp_dir().join("wordpyramid-missing-deck.json");
        assert!(check(&PuzzleSource::File(path)).await.is_err());
    }
}
