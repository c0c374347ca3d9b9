//! # tictactoe-engine
//!
//! A presentation-free tic-tac-toe core: one human against a
//! uniform-random computer opponent, with a persistent win tally.
//!
//! ## Design Principles
//!
//! 1. **No widgets in the core**: a GUI, TUI or test driver forwards cell
//!    clicks and symbol choices in, and renders from accessors plus a
//!    drained event queue. Nothing here blocks or draws.
//!
//! 2. **Explicit transitions**: every state change is a method call on
//!    [`GameSession`]; no timer or button callback reaches the engine
//!    directly. The computer's thinking delay is a capability the
//!    frontend supplies via [`MoveScheduler`].
//!
//! 3. **Deterministic when asked**: the opponent draws its moves from an
//!    injected seedable [`GameRng`], so a seeded session replays
//!    identically.
//!
//! ## Modules
//!
//! - `core`: board, sides, display symbols, RNG
//! - `engine`: turn state machine and move application
//! - `schedule`: deferred computer-move capability and cancel tokens
//! - `score`: win tally and its persistence
//! - `session`: orchestration and the frontend event interface

pub mod core;
pub mod engine;
pub mod schedule;
pub mod score;
pub mod session;

// Re-export commonly used types
pub use crate::core::{Board, Cell, Coord, GameRng, PlaceError, Side, Symbol, SymbolAssignment, SIZE};

pub use crate::engine::{EngineError, GameEngine, IllegalMove, RoundOutcome, TurnState};

pub use crate::schedule::{
    ManualScheduler, MoveScheduler, ScheduleToken, COMPUTER_MOVE_DELAY,
};

pub use crate::score::{
    FileScoreStore, MemoryScoreStore, ScoreError, ScoreStore, ScoreTally, SCORE_FILE,
};

pub use crate::session::{GameSession, GameSessionBuilder, SessionEvent};
