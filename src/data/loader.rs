use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::data::Puzzle;

const BUNDLED_PUZZLES: &str = include_str!("../../assets/puzzles.json");

/// Where the puzzle deck comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PuzzleSource {
    /// The deck compiled into the binary
    #[default]
    Bundled,
    /// A JSON file on disk, same format as the bundled deck
    File(PathBuf),
}

/// Parse a JSON array of puzzles
pub fn parse_puzzles(json: &str) -> Result<Vec<Puzzle>> {
    serde_json::from_str(json).context("puzzle data is not a valid puzzle array")
}

async fn try_load(source: &PuzzleSource) -> Result<Vec<Puzzle>> {
    match source {
        PuzzleSource::Bundled => parse_puzzles(BUNDLED_PUZZLES),
        PuzzleSource::File(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_puzzles(&json)
        }
    }
}

/// Load the deck. Never fails: any error is logged and yields an empty deck,
/// which the game shows as "no puzzles available".
pub async fn load_puzzles(source: &PuzzleSource) -> Vec<Puzzle> {
    match try_load(source).await {
        Ok(puzzles) => {
            info!(?source, count = puzzles.len(), "loaded puzzles");
            puzzles
        }
        Err(e) => {
            warn!(?source, error = ?e, "error loading puzzles; continuing with an empty deck");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("wordpyramid-{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn bundled_deck_loads_and_is_well_formed() {
        let puzzles = load_puzzles(&PuzzleSource::Bundled).await;
        assert!(!puzzles.is_empty());
        assert!(puzzles.iter().all(Puzzle::is_well_formed));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let path = scratch_file(
            "ok.json",
            r#"[{"puzzle_id":1,"three":"pin","four":"pint","five":"print","4hint":"a","5hint":"b"}]"#,
        );
        let puzzles = load_puzzles(&PuzzleSource::File(path.clone())).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(puzzles.len(), 1);
        assert_eq!(puzzles[0].five, "print");
    }

    #[tokio::test]
    async fn missing_file_yields_empty_deck() {
        let path = std::env::temp_dir().join("wordpyramid-does-not-exist.json");
        assert!(load_puzzles(&PuzzleSource::File(path)).await.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_yields_empty_deck() {
        let path = scratch_file("bad.json", r#"[{"puzzle_id":"one"}]"#);
        let puzzles = load_puzzles(&PuzzleSource::File(path.clone())).await;
        std::fs::remove_file(&path).ok();

        assert!(puzzles.is_empty());
    }

    #[test]
    fn parse_reports_errors() {
        assert!(parse_puzzles("not json").is_err());
        assert!(parse_puzzles("[]").unwrap().is_empty());
    }
}
