//! Core game types: board, sides, symbols, RNG.
//!
//! These are the leaf building blocks. They know nothing about turn order,
//! scheduling or persistence; that wiring lives in the modules above.

pub mod board;
pub mod rng;
pub mod symbol;

pub use board::{Board, Cell, Coord, PlaceError, Side, SIZE};
pub use rng::GameRng;
pub use symbol::{Symbol, SymbolAssignment};
