//! Core value types for the chess rule engine.
//!
//! This crate provides the fundamental types shared by every consumer of
//! the engine:
//! - [`PieceKind`] and [`Color`] for piece identity
//! - [`Square`] and [`SquareSet`] for board coordinates
//! - [`Move`] for move records (serializable for network relay)
//! - [`PieceTemplate`] and the per-kind movement tables

mod color;
mod mov;
mod piece;
mod square;
pub mod template;

pub use color::Color;
pub use mov::{CastleSide, Move};
pub use piece::{InvalidPieceError, PieceKind};
pub use square::{Square, SquareSet};
pub use template::{templates_for, PieceTemplate};
