//! A single running game
//!
//! The session owns the board and everything the engine leaves to its caller:
//! whose turn it is, which piece is in the middle of a multi-jump and whether
//! the game has been decided.

use checkers_core::{
    execute, legal_moves, validate_with_rules, Board, BoardError, Color, Continuation, Grid,
    Message, Move, Position, RuleSet, Verdict,
};
use serde::{Deserialize, Serialize};

/// Game identifier handed out by the registry
pub type GameId = u64;

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    RedWins,
    WhiteWins,
}

impl GameResult {
    fn won_by(color: Color) -> Self {
        match color {
            Color::Red => GameResult::RedWins,
            Color::White => GameResult::WhiteWins,
        }
    }
}

/// Failures that stop a move from being considered at all
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no game with id {0}")]
    UnknownGame(GameId),

    #[error("game {0} is already over")]
    GameOver(GameId),

    #[error("game {0} was abandoned after a board invariant broke")]
    GameCorrupted(GameId),

    #[error("game registry lock poisoned")]
    LockPoisoned,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Interactive game state
#[derive(Clone, Debug)]
pub struct GameSession {
    id: GameId,
    red_player: String,
    white_player: String,
    board: Board,
    rules: RuleSet,
    turn: Color,
    pending_jump: Option<Position>,
    result: GameResult,
    moves_played: u32,
    corrupted: bool,
}

impl GameSession {
    /// New game from the opening layout. Red moves first.
    pub fn new(id: GameId, red_player: &str, white_player: &str, rules: RuleSet) -> Self {
        Self::from_board(id, red_player, white_player, rules, Board::initial(), Color::Red)
    }

    /// Game resumed from an arbitrary position
    pub fn from_board(
        id: GameId,
        red_player: &str,
        white_player: &str,
        rules: RuleSet,
        board: Board,
        turn: Color,
    ) -> Self {
        Self {
            id,
            red_player: red_player.to_string(),
            white_player: white_player.to_string(),
            board,
            rules,
            turn,
            pending_jump: None,
            result: GameResult::Ongoing,
            moves_played: 0,
            corrupted: false,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn red_player(&self) -> &str {
        &self.red_player
    }

    pub fn white_player(&self) -> &str {
        &self.white_player
    }

    /// Color played by `name`, if they are in this game
    pub fn color_of(&self, name: &str) -> Option<Color> {
        if self.red_player == name {
            Some(Color::Red)
        } else if self.white_player == name {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Read-only borrow of the live board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board copy oriented for `color`'s client
    pub fn view_for(&self, color: Color) -> Grid {
        self.board.view_for(color)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Color expected to move next
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Square the current mover must keep jumping from
    pub fn pending_jump(&self) -> Option<Position> {
        self.pending_jump
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Completed turns; a whole multi-jump counts once
    pub fn moves_played(&self) -> u32 {
        self.moves_played
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    // ========================================================================
    // MOVES
    // ========================================================================

    /// Submit a move for `color`.
    ///
    /// Illegal moves come back as error messages with the board untouched.
    /// `Err` is reserved for games that can no longer accept moves.
    pub fn submit(&mut self, color: Color, mv: Move) -> Result<Message, SessionError> {
        if self.corrupted {
            return Err(SessionError::GameCorrupted(self.id));
        }
        if self.result != GameResult::Ongoing {
            return Err(SessionError::GameOver(self.id));
        }

        if color != self.turn {
            tracing::warn!(game = self.id, ?color, "move out of turn");
            return Ok(Message::error("It is not your turn!"));
        }
        if let Some(from) = self.pending_jump {
            if mv.start != from {
                tracing::warn!(game = self.id, %from, %mv, "multi-jump abandoned");
                return Ok(Message::error("You must continue jumping!"));
            }
        }

        let kind = match validate_with_rules(&self.board, color, mv, &self.rules) {
            Verdict::Accepted(kind) => kind,
            Verdict::Rejected(reason) => {
                tracing::warn!(game = self.id, ?color, %mv, %reason, "move rejected");
                return Ok(reason.into());
            }
        };

        let continuation = match execute(&mut self.board, color, mv, kind) {
            Ok(continuation) => continuation,
            Err(err) => {
                tracing::error!(game = self.id, %mv, %err, "board invariant broken");
                self.corrupted = true;
                return Err(err.into());
            }
        };

        match continuation {
            Continuation::MustContinue { from } => {
                self.pending_jump = Some(from);
                Ok(Message::must_continue(from))
            }
            Continuation::TurnEnds => Ok(self.end_turn()),
        }
    }

    fn end_turn(&mut self) -> Message {
        let mover = self.turn;
        self.pending_jump = None;
        self.moves_played += 1;
        self.turn = mover.opponent();

        let stuck = self.board.count(self.turn) == 0
            || legal_moves(&self.board, self.turn, &self.rules).is_empty();
        if stuck {
            self.result = GameResult::won_by(mover);
            tracing::info!(game = self.id, winner = ?mover, moves = self.moves_played, "game over");
            Message::game_won(mover)
        } else {
            Message::turn_ends(self.turn)
        }
    }
}
