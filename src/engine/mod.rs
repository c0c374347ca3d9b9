//! Turn state machine and move application.
//!
//! `GameEngine` owns one round at a time: the board, whose turn it is, the
//! symbol assignment and the starting-player alternator. It is purely
//! transitional: callers invoke [`GameEngine::submit_human_move`] and
//! [`GameEngine::run_computer_move`] and read the resulting state; the
//! engine never blocks, schedules or touches the filesystem.
//!
//! ## Evaluation order
//!
//! After every placement the win check runs before the draw check. A move
//! that completes a line and fills the board at the same time is a win,
//! never a draw.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Board, Coord, GameRng, PlaceError, Side, Symbol, SymbolAssignment};

/// Whose move the engine is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// A human move is expected next.
    AwaitingHuman,
    /// A computer move is expected next (usually after a scheduling delay).
    AwaitingComputer,
    /// The round reached a terminal outcome; no moves are accepted until
    /// the next round starts.
    RoundOver,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::AwaitingHuman => write!(f, "awaiting human move"),
            TurnState::AwaitingComputer => write!(f, "awaiting computer move"),
            TurnState::RoundOver => write!(f, "round over"),
        }
    }
}

/// Result of a round, recomputed after every move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The round continues.
    Ongoing,
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// The board filled with no complete line.
    Draw,
}

impl RoundOutcome {
    /// Whether the round has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, RoundOutcome::Ongoing)
    }

    /// The winning side, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            RoundOutcome::HumanWin => Some(Side::Human),
            RoundOutcome::ComputerWin => Some(Side::Computer),
            RoundOutcome::Ongoing | RoundOutcome::Draw => None,
        }
    }

    /// Outcome crediting `side` with the win.
    #[must_use]
    pub const fn win_for(side: Side) -> Self {
        match side {
            Side::Human => RoundOutcome::HumanWin,
            Side::Computer => RoundOutcome::ComputerWin,
        }
    }

    /// Display message for a terminal outcome, `None` while ongoing.
    #[must_use]
    pub const fn announcement(self) -> Option<&'static str> {
        match self {
            RoundOutcome::Ongoing => None,
            RoundOutcome::HumanWin => Some("You win!"),
            RoundOutcome::ComputerWin => Some("The computer wins!"),
            RoundOutcome::Draw => Some("It's a draw!"),
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Ongoing => write!(f, "ongoing"),
            RoundOutcome::HumanWin => write!(f, "human win"),
            RoundOutcome::ComputerWin => write!(f, "computer win"),
            RoundOutcome::Draw => write!(f, "draw"),
        }
    }
}

/// A move the engine refuses. Recoverable: the caller drops the input and
/// the round continues unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    /// Move arrived outside the mover's turn, or after the round ended.
    #[error("no move accepted while {state}")]
    WrongState { state: TurnState },
    /// The board rejected the placement.
    #[error(transparent)]
    Place(#[from] PlaceError),
}

/// Engine failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Recoverable rejection of a single move.
    #[error(transparent)]
    Illegal(#[from] IllegalMove),
    /// The state machine reached a contradictory state. Not recoverable;
    /// callers must surface it rather than play on.
    #[error("invariant violated: {0}")]
    Invariant(&'static str),
}

/// One round of tic-tac-toe at a time, plus the cross-round alternator.
///
/// A fresh engine starts its first round immediately, with the human to
/// open; every subsequent [`GameEngine::start_round`] flips the opener.
#[derive(Clone, Debug)]
pub struct GameEngine {
    board: Board,
    turn: TurnState,
    outcome: RoundOutcome,
    symbols: SymbolAssignment,
    human_opens_next: bool,
    rng: GameRng,
}

impl GameEngine {
    /// Creates an engine and starts the first round (human opens).
    #[must_use]
    pub fn new(rng: GameRng, symbols: SymbolAssignment) -> Self {
        let mut engine = Self {
            board: Board::new(),
            turn: TurnState::RoundOver,
            outcome: RoundOutcome::Ongoing,
            symbols,
            human_opens_next: true,
            rng,
        };
        engine.start_round();
        engine
    }

    /// Resets the board and begins a new round, interrupting any round in
    /// progress. The opener alternates on every call, regardless of who
    /// won or lost before.
    ///
    /// Returns the opening state. A computer opening is not played here;
    /// the caller schedules [`GameEngine::run_computer_move`] for it.
    pub fn start_round(&mut self) -> TurnState {
        self.board.reset();
        self.outcome = RoundOutcome::Ongoing;
        self.turn = if self.human_opens_next {
            TurnState::AwaitingHuman
        } else {
            TurnState::AwaitingComputer
        };
        self.human_opens_next = !self.human_opens_next;
        log::debug!("round started, {}", self.turn);
        self.turn
    }

    /// Reassigns the human's symbol and starts a fresh round
    /// unconditionally. Returns the new round's opening state.
    pub fn switch_symbols(&mut self, human: Symbol) -> TurnState {
        self.symbols = SymbolAssignment::new(human);
        log::debug!("human now plays {human}");
        self.start_round()
    }

    /// Applies a human move.
    ///
    /// # Errors
    ///
    /// [`IllegalMove`] if the engine is not awaiting a human move or the
    /// cell is unavailable. Board and turn state are left unchanged.
    pub fn submit_human_move(&mut self, at: Coord) -> Result<RoundOutcome, IllegalMove> {
        if self.turn != TurnState::AwaitingHuman {
            return Err(IllegalMove::WrongState { state: self.turn });
        }
        self.board.place(at, Side::Human)?;
        log::debug!("human plays {at}");
        Ok(self.evaluate(Side::Human))
    }

    /// Applies the computer's move: a uniformly random pick among the
    /// empty cells.
    ///
    /// # Errors
    ///
    /// [`EngineError::Illegal`] outside `AwaitingComputer` (e.g. a stale
    /// scheduler callback after a round reset; state unchanged), and
    /// [`EngineError::Invariant`] if no empty cell exists, which the draw
    /// check is supposed to make unreachable.
    pub fn run_computer_move(&mut self) -> Result<RoundOutcome, EngineError> {
        if self.turn != TurnState::AwaitingComputer {
            return Err(IllegalMove::WrongState { state: self.turn }.into());
        }
        let open = self.board.empty_cells();
        let at = *self
            .rng
            .choose(&open)
            .ok_or(EngineError::Invariant("computer move due on a full board"))?;
        self.board.place(at, Side::Computer).map_err(IllegalMove::Place)?;
        log::debug!("computer plays {at}");
        Ok(self.evaluate(Side::Computer))
    }

    /// Win check first, then draw check, then hand the turn over.
    fn evaluate(&mut self, mover: Side) -> RoundOutcome {
        if let Some(winner) = self.board.winner() {
            self.outcome = RoundOutcome::win_for(winner);
            self.turn = TurnState::RoundOver;
        } else if self.board.is_full() {
            self.outcome = RoundOutcome::Draw;
            self.turn = TurnState::RoundOver;
        } else {
            self.turn = match mover {
                Side::Human => TurnState::AwaitingComputer,
                Side::Computer => TurnState::AwaitingHuman,
            };
        }
        self.outcome
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose move the engine is waiting for.
    #[must_use]
    pub fn turn(&self) -> TurnState {
        self.turn
    }

    /// The round's outcome so far.
    #[must_use]
    pub fn outcome(&self) -> RoundOutcome {
        self.outcome
    }

    /// The current symbol assignment.
    #[must_use]
    pub fn symbols(&self) -> SymbolAssignment {
        self.symbols
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[cfg(test)]
    pub(crate) fn force_turn(&mut self, turn: TurnState) {
        self.turn = turn;
    }
}
