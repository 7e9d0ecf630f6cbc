//! Session orchestration.

use crate::core::{
    validate_roster, Board, DiceSource, GameConfig, GameRng, MoveEvent, MoveLog, MoveRecord,
    Player, PlayerId,
};
use crate::error::ConfigurationError;
use crate::rules::{TurnEngine, TurnOutcome};

use super::sink::{MoveSink, TracingSink};

/// A game in progress: board, players in turn order, whose turn it is,
/// the move log and the winner once there is one.
///
/// The session owns its board and players. Callers get read-only access;
/// the only way to change state is [`GameSession::play_turn`].
pub struct GameSession {
    board: Board,
    players: Vec<Player>,
    current: usize,
    move_log: MoveLog,
    winner: Option<PlayerId>,
    dice: Box<dyn DiceSource>,
    sink: Box<dyn MoveSink>,
}

impl GameSession {
    /// Start a session with all players where they stand (normally off the
    /// board), first player to move.
    ///
    /// Rolls come from an entropy-seeded `GameRng` and moves are reported
    /// to a `TracingSink` until replaced with [`GameSession::with_dice`] and
    /// [`GameSession::with_sink`].
    pub fn new(board: Board, players: Vec<Player>) -> Result<Self, ConfigurationError> {
        Self::assemble(board, players, 0, MoveLog::new())
    }

    /// Start a session from a setup configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigurationError> {
        let (board, players) = config.build()?;
        Self::new(board, players)
    }

    /// Rebuild a session from already-validated parts.
    ///
    /// Checks the roster and positions and derives the winner: a player on
    /// the goal square has won. `current` must index into `players`.
    pub(crate) fn assemble(
        board: Board,
        players: Vec<Player>,
        current: usize,
        move_log: MoveLog,
    ) -> Result<Self, ConfigurationError> {
        validate_roster(&players)?;
        debug_assert!(current < players.len());

        let goal = board.last_square();
        let mut winner: Option<PlayerId> = None;
        for (index, player) in players.iter().enumerate() {
            if player.position() > goal {
                return Err(ConfigurationError::PositionOutOfRange {
                    name: player.name().to_string(),
                    position: player.position(),
                    last: goal,
                });
            }
            if player.position() == goal {
                if let Some(first) = winner {
                    return Err(ConfigurationError::MultipleWinners(
                        players[first.index()].name().to_string(),
                        player.name().to_string(),
                    ));
                }
                winner = Some(PlayerId::new(index as u8));
            }
        }

        Ok(Self {
            board,
            players,
            current,
            move_log,
            winner,
            dice: Box::new(GameRng::from_entropy()),
            sink: Box::new(TracingSink),
        })
    }

    /// Replace the dice source.
    #[must_use]
    pub fn with_dice(mut self, dice: impl DiceSource + 'static) -> Self {
        self.dice = Box::new(dice);
        self
    }

    /// Replace the move sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl MoveSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // === Read-only accessors ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// Index of the player whose turn it is (the winner once the game is over).
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    #[must_use]
    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    #[must_use]
    pub fn winner_id(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.winner.and_then(|id| self.player(id))
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    // === Play ===

    /// Resolve one turn for the current player.
    ///
    /// Returns `None` without touching anything once the game has a winner.
    pub fn play_turn(&mut self) -> Option<TurnOutcome> {
        if self.winner.is_some() {
            return None;
        }

        let index = self.current;
        let roll = self.dice.roll();
        let player = &mut self.players[index];
        let outcome = TurnEngine::resolve_turn(&self.board, player, roll);
        let name = player.name().to_string();

        tracing::debug!(
            player = %name,
            roll = roll.value(),
            from = outcome.from,
            to = outcome.position,
            teleport = ?outcome.teleport,
            "turn resolved"
        );

        self.move_log
            .push(MoveRecord::new(name.clone(), outcome.position));

        let event = MoveEvent {
            player: name,
            roll,
            position: outcome.position,
        };
        if let Err(err) = self.sink.record(&event) {
            tracing::warn!("move sink failed, continuing: {}", err);
        }

        if outcome.status.is_won() {
            self.winner = Some(PlayerId::new(index as u8));
            tracing::info!(
                "{} wins by reaching {}",
                event.player,
                self.board.last_square()
            );
        } else {
            self.current = (index + 1) % self.players.len();
        }

        Some(outcome)
    }

    /// Play until someone wins or `max_turns` turns have been resolved.
    ///
    /// Returns the number of turns played by this call.
    pub fn play_to_end(&mut self, max_turns: usize) -> usize {
        let mut played = 0;
        while played < max_turns && self.play_turn().is_some() {
            played += 1;
        }
        played
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("board", &self.board)
            .field("players", &self.players)
            .field("current", &self.current)
            .field("move_log", &self.move_log)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}
