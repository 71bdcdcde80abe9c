//! Headless game session
//!
//! Owns the board history, the seats and an explicit action log. A front-end
//! drives it with [`GameSession::play`] for human moves and
//! [`GameSession::play_computer`] when a computer seat is to move.

use tracing::{debug, info};

use crate::board::{Board, Piece, Pos};
use crate::config::GameConfig;
use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::rules::{board_outcome, outcome_after_move, winning_line, Outcome};

/// Who controls a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Seat {
    #[default]
    Human,
    Computer,
}

/// Entry in the session's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Place { pos: Pos, piece: Piece },
    JumpTo { step: usize },
    Reconfigure { name: String },
}

/// Game state container
pub struct GameSession {
    engine: Engine,
    seats: [Seat; 2],
    /// Board after each step; `boards[0]` is the empty board
    boards: Vec<Board>,
    /// Move that produced `boards[i + 1]`
    moves: Vec<Pos>,
    outcome: Outcome,
    actions: Vec<Action>,
}

impl GameSession {
    /// New game with both seats human.
    pub fn new(config: GameConfig) -> Result<Self> {
        let board = config.new_board()?;
        Ok(Self {
            engine: Engine::new(config)?,
            seats: [Seat::Human; 2],
            boards: vec![board],
            moves: Vec::new(),
            outcome: Outcome::InProgress,
            actions: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_seats(mut self, first: Seat, second: Seat) -> Self {
        self.seats = [first, second];
        self
    }

    pub fn set_seat(&mut self, piece: Piece, seat: Seat) {
        self.seats[piece.index()] = seat;
    }

    #[inline]
    pub fn seat(&self, piece: Piece) -> Seat {
        self.seats[piece.index()]
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Number of moves on the current board
    #[inline]
    pub fn step(&self) -> usize {
        self.boards.len() - 1
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.boards[self.step()]
    }

    /// `First` on even steps, `Second` on odd ones
    #[inline]
    pub fn to_move(&self) -> Piece {
        if self.step() % 2 == 0 {
            Piece::First
        } else {
            Piece::Second
        }
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn history(&self) -> &[Board] {
        &self.boards
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn last_move(&self) -> Option<Pos> {
        self.moves.last().copied()
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.outcome.is_terminal() && self.seat(self.to_move()) == Seat::Computer
    }

    /// Cells of the winning line, if the last move won
    pub fn winning_line(&self) -> Option<Vec<Pos>> {
        let winner = self.outcome.winner()?;
        let pos = self.last_move()?;
        winning_line(self.board(), pos, winner, self.config().win_length)
    }

    /// Place the side to move's piece at `pos`.
    pub fn play(&mut self, pos: Pos) -> Result<Outcome> {
        if let Outcome::Win(winner) = self.outcome {
            return Err(EngineError::GameOver { winner });
        }
        let piece = self.to_move();
        let board = self.board().with_move(pos, piece)?;
        let outcome = outcome_after_move(&board, pos, piece, self.config().win_length)?;

        debug!(%pos, ?piece, step = self.step() + 1, "move played");
        self.boards.push(board);
        self.moves.push(pos);
        self.actions.push(Action::Place { pos, piece });
        self.set_outcome(outcome);
        Ok(outcome)
    }

    /// Let the engine move for a computer seat.
    ///
    /// Returns `Ok(None)` when a human is to move or no legal move is left.
    pub fn play_computer(&mut self) -> Result<Option<(Pos, Outcome)>> {
        if !self.is_computer_turn() {
            return Ok(None);
        }
        let result = self.engine.best_move(self.board(), self.to_move())?;
        match result.best_move {
            Some(pos) => Ok(Some((pos, self.play(pos)?))),
            None => Ok(None),
        }
    }

    /// Rewind to `step`, discarding later moves.
    pub fn jump_to(&mut self, step: usize) -> Result<()> {
        if step > self.step() {
            return Err(EngineError::InvalidStep {
                step,
                available: self.step(),
            });
        }
        self.boards.truncate(step + 1);
        self.moves.truncate(step);
        self.actions.push(Action::JumpTo { step });

        let outcome = board_outcome(self.board(), self.config().win_length)?;
        self.set_outcome(outcome);
        debug!(step, ?outcome, "jumped to step");
        Ok(())
    }

    /// Take back the last move. Returns `false` on an empty board.
    pub fn undo(&mut self) -> Result<bool> {
        match self.step().checked_sub(1) {
            Some(step) => self.jump_to(step).map(|()| true),
            None => Ok(false),
        }
    }

    /// Switch to a new game variant on a fresh empty board. Seats are kept.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<()> {
        let board = config.new_board()?;
        let name = config.name.clone();
        self.engine = Engine::new(config)?;
        self.boards = vec![board];
        self.moves.clear();
        self.outcome = Outcome::InProgress;
        self.actions.push(Action::Reconfigure { name: name.clone() });
        info!(game = %name, "session reconfigured");
        Ok(())
    }

    fn set_outcome(&mut self, outcome: Outcome) {
        if outcome.is_terminal() && !self.outcome.is_terminal() {
            match outcome {
                Outcome::Win(winner) => info!(?winner, step = self.step(), "game won"),
                _ => info!(step = self.step(), "game drawn"),
            }
        }
        self.outcome = outcome;
    }
}
