//! The interactive game loop.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use super::config::AppConfig;
use super::prompt::Prompter;
use crate::core::{Board, Player, MAX_BOARD_SIZE, MAX_PLAYERS, MIN_PLAYERS};
use crate::error::{ConfigurationError, InputError, Result};
use crate::persistence::{write_history, FileSnapshotRepository};
use crate::presentation::{render_board, render_heatmap, render_paths};
use crate::rules::TurnOutcome;
use crate::session::GameSession;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Start {
    New,
    Resume,
}

fn parse_start(line: &str) -> std::result::Result<Start, InputError> {
    match line.trim().to_ascii_lowercase().as_str() {
        "new" | "n" => Ok(Start::New),
        "resume" | "r" => Ok(Start::Resume),
        other => Err(InputError::UnknownChoice {
            input: other.to_string(),
            expected: "'new' or 'resume'",
        }),
    }
}

/// Run one game from the first prompt to the final summary.
///
/// A save file that cannot be resumed is reported and ends the run
/// normally. End of input ends it with `InputError::Eof`.
pub fn run<R: BufRead, W: Write>(config: &AppConfig, prompter: &mut Prompter<R, W>) -> Result<()> {
    let session = match &config.resume {
        Some(path) => resume(path, prompter)?,
        None => {
            let choice = prompter.ask_with(
                "Do you want to start a new game or resume a saved game? (new/resume): ",
                parse_start,
            )?;
            match choice {
                Start::New => Some(setup(prompter)?),
                Start::Resume => {
                    let path = ask_save_path(config, prompter)?;
                    resume(&path, prompter)?
                }
            }
        }
    };

    let Some(session) = session else {
        return Ok(());
    };

    let session = session
        .with_dice(config.dice_source())
        .with_sink(config.move_sink());

    play(config, session, prompter)
}

fn ask_save_path<R: BufRead, W: Write>(
    config: &AppConfig,
    prompter: &mut Prompter<R, W>,
) -> Result<PathBuf> {
    let prompt = format!(
        "Enter the filename of the saved game [{}]: ",
        config.save_file.display()
    );
    let line = prompter.ask_line(&prompt)?;
    Ok(if line.is_empty() {
        config.save_file.clone()
    } else {
        PathBuf::from(line)
    })
}

fn resume<R: BufRead, W: Write>(
    path: &Path,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<GameSession>> {
    let repo = FileSnapshotRepository::new(path);
    match GameSession::load_from(&repo) {
        Ok(session) => {
            prompter.say(format_args!(
                "Resumed game. It's {}'s turn.",
                session.current_player().name()
            ))?;
            Ok(Some(session))
        }
        Err(err) => {
            prompter.say(format_args!("Failed to resume game: {err}"))?;
            Ok(None)
        }
    }
}

/// Ask for board, snakes, ladders and players.
fn setup<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<GameSession> {
    let size = prompter.ask_int(
        "Enter the size of the game board (e.g., 10 for a 10x10 board): ",
        1,
        i64::from(MAX_BOARD_SIZE),
    )?;
    let mut board = Board::with_size(size)?;
    let last = i64::from(board.last_square());

    let snakes = prompter.ask_int("Enter the number of snakes: ", 0, last)?;
    for _ in 0..snakes {
        add_until_valid(
            prompter,
            "Enter the start and end points of a snake (e.g., '16,6'): ",
            |start, end| board.add_snake(start, end),
        )?;
    }

    let ladders = prompter.ask_int("Enter the number of ladders: ", 0, last)?;
    for _ in 0..ladders {
        add_until_valid(
            prompter,
            "Enter the start and end points of a ladder (e.g., '9,31'): ",
            |start, end| board.add_ladder(start, end),
        )?;
    }

    let count = prompter.ask_int(
        &format!("Enter the number of players ({MIN_PLAYERS}-{MAX_PLAYERS}): "),
        MIN_PLAYERS as i64,
        MAX_PLAYERS as i64,
    )?;

    let mut players: Vec<Player> = Vec::new();
    for i in 1..=count {
        let prompt = format!("Enter name of player {i}: ");
        loop {
            let name = prompter.ask_line(&prompt)?;
            match new_player(&players, name) {
                Ok(player) => {
                    players.push(player);
                    break;
                }
                Err(err) => prompter.say(format_args!("Invalid input: {err}"))?,
            }
        }
    }

    let session = GameSession::new(board, players)?;
    tracing::info!(
        size = session.board().size(),
        snakes = session.board().snakes().len(),
        ladders = session.board().ladders().len(),
        players = session.players().len(),
        "new game"
    );
    Ok(session)
}

fn add_until_valid<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
    mut add: impl FnMut(u32, u32) -> std::result::Result<(), ConfigurationError>,
) -> Result<()> {
    loop {
        let (start, end) = prompter.ask_pair(prompt)?;
        match add(start, end) {
            Ok(()) => return Ok(()),
            Err(err) => prompter.say(format_args!("Invalid input: {err}"))?,
        }
    }
}

fn new_player(existing: &[Player], name: String) -> std::result::Result<Player, ConfigurationError> {
    let player = Player::new(name)?;
    if existing.iter().any(|p| p.name() == player.name()) {
        return Err(ConfigurationError::DuplicatePlayerName(
            player.name().to_string(),
        ));
    }
    Ok(player)
}

fn play<R: BufRead, W: Write>(
    config: &AppConfig,
    mut session: GameSession,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let repo = FileSnapshotRepository::new(&config.save_file);

    while !session.is_over() {
        let name = session.current_player().name().to_string();
        prompter.say(format_args!("\n{name}'s turn."))?;
        prompter.wait_enter("Press enter to roll the dice.")?;

        let Some(outcome) = session.play_turn() else {
            break;
        };
        prompter.say(describe_turn(&outcome, session.board().last_square()))?;

        if !session.is_over() && prompter.ask_yes_no("Do you want to save the game? (y/n): ")? {
            match session.save_to(&repo) {
                Ok(()) => prompter.say("Game saved.")?,
                Err(err) => prompter.say(format_args!("Could not save the game: {err}"))?,
            }
        }
    }

    if let Err(err) = session.save_to(&repo) {
        prompter.say(format_args!("Could not save the game: {err}"))?;
    }
    if let Err(err) = write_history(&config.history_file, session.move_log()) {
        prompter.say(format_args!("Could not write the move history: {err}"))?;
    }

    if let Some(winner) = session.winner() {
        prompter.say(format_args!("Game over! {} wins!", winner.name()))?;
    }

    prompter.say(format_args!("\n{}", render_board(&session)))?;
    prompter.say(format_args!("Moves:\n{}", render_paths(&session)))?;
    prompter.say(format_args!("Landing frequency:\n{}", render_heatmap(&session)))?;
    Ok(())
}

fn describe_turn(outcome: &TurnOutcome, last: u32) -> String {
    let mut text = format!("Rolled a {}.", outcome.roll);
    if outcome.overshot() {
        text.push_str(&format!(
            " Need exactly {} to reach {}, staying on {}.",
            last - outcome.from,
            last,
            outcome.from
        ));
        return text;
    }
    if let Some(teleport) = outcome.teleport {
        text.push_str(&format!(
            " Landed on a {} at {}, moved to {}.",
            teleport.kind, teleport.from, teleport.to
        ));
    }
    text.push_str(&format!(" Moved to position {}.", outcome.position));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceRoll, Teleport, TeleportKind};
    use crate::rules::TurnStatus;

    #[test]
    fn test_parse_start() {
        assert_eq!(parse_start("NEW"), Ok(Start::New));
        assert_eq!(parse_start(" r "), Ok(Start::Resume));
        assert!(matches!(
            parse_start("load"),
            Err(InputError::UnknownChoice { .. })
        ));
    }

    #[test]
    fn test_new_player_rejects_duplicates() {
        let existing = vec![Player::new("Ada").unwrap()];
        assert_eq!(
            new_player(&existing, " Ada ".into()).unwrap_err(),
            ConfigurationError::DuplicatePlayerName("Ada".into())
        );
        assert_eq!(
            new_player(&existing, "  ".into()).unwrap_err(),
            ConfigurationError::EmptyPlayerName
        );
        assert!(new_player(&existing, "Bob".into()).is_ok());
    }

    #[test]
    fn test_describe_turn() {
        let roll = DiceRoll::new(3).unwrap();
        let ladder = TurnOutcome {
            roll,
            from: 6,
            landed: Some(9),
            teleport: Some(Teleport {
                kind: TeleportKind::Ladder,
                from: 9,
                to: 31,
            }),
            position: 31,
            status: TurnStatus::InProgress,
        };
        assert_eq!(
            describe_turn(&ladder, 100),
            "Rolled a 3. Landed on a ladder at 9, moved to 31. Moved to position 31."
        );

        let overshoot = TurnOutcome {
            roll,
            from: 98,
            landed: None,
            teleport: None,
            position: 98,
            status: TurnStatus::InProgress,
        };
        assert_eq!(
            describe_turn(&overshoot, 100),
            "Rolled a 3. Need exactly 2 to reach 100, staying on 98."
        );
    }
}
