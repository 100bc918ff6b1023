//! Two-player chess rule engine.
//!
//! This crate owns board state, generates legal moves, detects
//! check/checkmate/stalemate, and applies moves (including castling) while
//! preserving game invariants:
//! - [`Board`] - 8x8 grid of optional [`Piece`]s with a FEN placement loader
//! - [`movegen`] - direction-template expansion into pseudo-legal moves
//! - [`legality`] - simulate-and-rollback filtering and check detection
//! - [`Game`] - turn management, move application, terminal results
//!
//! Rendering, input mapping, clocks, and network transport are external
//! collaborators: they hand the engine squares and [`Move`](chess_core::Move)
//! values (treated as untrusted) and get back applied, serializable move
//! records.
//!
//! The engine is single-threaded and synchronous. Callers own exclusive
//! access around every apply/query sequence; the two players' submissions
//! are serialized by the turn flag, not by internal locking.
//!
//! # Example
//!
//! ```
//! use chess_core::{Move, Square};
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! let from = Square::from_algebraic("e2").unwrap();
//! let to = Square::from_algebraic("e4").unwrap();
//! let applied = game.apply_move(Move::normal(from, to)).unwrap();
//! assert!(!applied.is_capture);
//! assert_eq!(game.moves().len(), 1);
//! ```

mod board;
mod game;
pub mod legality;
pub mod movegen;
mod piece;

pub use board::Board;
pub use game::{DrawReason, Game, GameError, GameResult};
pub use piece::Piece;
