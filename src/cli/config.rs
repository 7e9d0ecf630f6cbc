//! Runtime configuration for the console game.
//!
//! Defaults, then environment variables, then command-line flags.

use std::env;
use std::path::PathBuf;

use clap::Parser;

use crate::core::{DiceRoll, DiceSource, GameRng, ScriptedDice};
use crate::persistence::{DEFAULT_HISTORY_FILE, DEFAULT_SAVE_FILE};
use crate::session::{FileMoveSink, MoveSink, TracingSink, DEFAULT_MOVES_FILE};

/// Play Snakes and Ladders in the terminal.
#[derive(Parser, Clone, Debug, Default)]
#[command(name = "snakes-ladders")]
#[command(about = "Snakes and Ladders for 2-4 players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Resume the game saved in FILE instead of asking
    #[arg(long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Where to save the game [default: game_state.json, env: SNAKES_SAVE_FILE]
    #[arg(long, value_name = "FILE")]
    pub save_file: Option<PathBuf>,

    /// Where to dump the move history when the game ends
    /// [default: game_history.txt, env: SNAKES_HISTORY_FILE]
    #[arg(long, value_name = "FILE")]
    pub history_file: Option<PathBuf>,

    /// Where to append each move as it happens
    /// [default: game_moves.txt, env: SNAKES_MOVES_FILE]
    #[arg(long, value_name = "FILE")]
    pub moves_file: Option<PathBuf>,

    /// Seed for reproducible dice [env: SNAKES_SEED]
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scripted rolls, e.g. `3,6,1`; repeats once exhausted
    #[arg(long, value_name = "LIST", value_delimiter = ',', value_parser = parse_roll)]
    pub dice: Vec<DiceRoll>,

    /// Log moves through tracing instead of the moves file
    #[arg(long)]
    pub no_move_file: bool,
}

fn parse_roll(value: &str) -> Result<DiceRoll, String> {
    let value: u8 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a die face"))?;
    DiceRoll::try_from(value)
}

/// Resolved runtime settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub resume: Option<PathBuf>,
    pub save_file: PathBuf,
    pub history_file: PathBuf,
    /// `None` disables the moves file.
    pub moves_file: Option<PathBuf>,
    pub seed: Option<u64>,
    pub dice: Vec<DiceRoll>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resume: None,
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
            moves_file: Some(PathBuf::from(DEFAULT_MOVES_FILE)),
            seed: None,
            dice: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SNAKES_SAVE_FILE` - save file (default: `game_state.json`)
    /// - `SNAKES_HISTORY_FILE` - history dump (default: `game_history.txt`)
    /// - `SNAKES_MOVES_FILE` - per-move log (default: `game_moves.txt`)
    /// - `SNAKES_SEED` - dice seed (default: from entropy)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>("SNAKES_SAVE_FILE") {
            config.save_file = path;
        }
        if let Some(path) = read_env::<PathBuf>("SNAKES_HISTORY_FILE") {
            config.history_file = path;
        }
        if let Some(path) = read_env::<PathBuf>("SNAKES_MOVES_FILE") {
            config.moves_file = Some(path);
        }
        if let Some(seed) = read_env::<u64>("SNAKES_SEED") {
            config.seed = Some(seed);
        }

        config
    }

    /// Layer command-line flags over this configuration.
    #[must_use]
    pub fn with_cli(mut self, cli: Cli) -> Self {
        if cli.resume.is_some() {
            self.resume = cli.resume;
        }
        if let Some(path) = cli.save_file {
            self.save_file = path;
        }
        if let Some(path) = cli.history_file {
            self.history_file = path;
        }
        if let Some(path) = cli.moves_file {
            self.moves_file = Some(path);
        }
        if cli.no_move_file {
            self.moves_file = None;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if !cli.dice.is_empty() {
            self.dice = cli.dice;
        }
        self
    }

    /// Scripted dice if given, else seeded, else from entropy.
    pub fn dice_source(&self) -> Box<dyn DiceSource> {
        if let Some(scripted) = ScriptedDice::new(self.dice.clone()) {
            return Box::new(scripted);
        }
        match self.seed {
            Some(seed) => Box::new(GameRng::new(seed)),
            None => {
                let rng = GameRng::from_entropy();
                tracing::info!(seed = rng.seed(), "dice seeded from entropy");
                Box::new(rng)
            }
        }
    }

    pub fn move_sink(&self) -> Box<dyn MoveSink> {
        match &self.moves_file {
            Some(path) => Box::new(FileMoveSink::new(path)),
            None => Box::new(TracingSink),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rolls(values: &[u8]) -> Vec<DiceRoll> {
        values.iter().map(|&v| DiceRoll::new(v).unwrap()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.save_file, PathBuf::from("game_state.json"));
        assert_eq!(config.history_file, PathBuf::from("game_history.txt"));
        assert_eq!(config.moves_file, Some(PathBuf::from("game_moves.txt")));
        assert!(config.resume.is_none());
    }

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "snakes-ladders",
            "--save-file",
            "s.json",
            "--seed",
            "7",
            "--dice",
            "3,6,1",
            "--no-move-file",
        ])
        .unwrap();

        assert_eq!(cli.save_file, Some(PathBuf::from("s.json")));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.dice, rolls(&[3, 6, 1]));
        assert!(cli.no_move_file);
    }

    #[test]
    fn test_cli_rejects_bad_die() {
        assert!(Cli::try_parse_from(["snakes-ladders", "--dice", "3,7"]).is_err());
        assert!(Cli::try_parse_from(["snakes-ladders", "--dice", "x"]).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let base = AppConfig {
            seed: Some(1),
            ..AppConfig::default()
        };
        let cli = Cli {
            history_file: Some(PathBuf::from("h.txt")),
            seed: Some(9),
            no_move_file: true,
            ..Cli::default()
        };

        let config = base.with_cli(cli);
        assert_eq!(config.history_file, PathBuf::from("h.txt"));
        assert_eq!(config.save_file, PathBuf::from("game_state.json"));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.moves_file, None);
    }

    #[test]
    fn test_dice_source_prefers_script() {
        let config = AppConfig {
            seed: Some(5),
            dice: rolls(&[2, 4]),
            ..AppConfig::default()
        };
        let mut dice = config.dice_source();
        let drawn: Vec<u8> = (0..3).map(|_| dice.roll().value()).collect();
        assert_eq!(drawn, vec![2, 4, 2]);
    }

    #[test]
    fn test_seeded_dice_repeat() {
        let config = AppConfig {
            seed: Some(42),
            ..AppConfig::default()
        };
        let mut a = config.dice_source();
        let mut b = config.dice_source();
        for _ in 0..20 {
            assert_eq!(a.roll(), b.roll());
        }
    }
}
