//! Move representation.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The side of the board a castle happens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// O-O, toward the h-file rook.
    Kingside,
    /// O-O-O, toward the a-file rook.
    Queenside,
}

impl CastleSide {
    /// Returns the file the castling rook starts on (7 kingside, 0 queenside).
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// Returns the file direction from the king toward the rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// A chess move.
///
/// The engine both produces these (per-piece legal move lists) and consumes
/// them (move application, including untrusted moves relayed from a network
/// peer). Flags describe the move as the engine classified it; a peer's
/// flags are never trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Square the moving piece starts on.
    pub from: Square,
    /// Square the moving piece lands on.
    pub to: Square,
    /// Set when this move is a castle.
    pub castle: Option<CastleSide>,
    /// True when the destination held an opposing piece at generation time.
    pub is_capture: bool,
    /// True when the move put the opponent in check (set on application).
    pub is_check: bool,
    /// True when the move delivered checkmate (set on application).
    pub is_checkmate: bool,
    /// The kind a pawn promotes to. Promotion selection is out of scope;
    /// generation always leaves this `None`.
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a plain, non-capturing move.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            castle: None,
            is_capture: false,
            is_check: false,
            is_checkmate: false,
            promotion: None,
        }
    }

    /// Creates a capturing move.
    #[inline]
    pub const fn capture(from: Square, to: Square) -> Self {
        let mut m = Move::normal(from, to);
        m.is_capture = true;
        m
    }

    /// Creates a castle move for the king on `from`.
    ///
    /// The king always lands two files toward the rook, on its own rank.
    ///
    /// # Panics
    ///
    /// Panics if the two-file shift leaves the board, which cannot happen
    /// for a king on a legal castling square.
    pub const fn castle(from: Square, side: CastleSide) -> Self {
        let to = match from.offset(2 * side.direction(), 0) {
            Some(sq) => sq,
            None => panic!("castle destination off the board"),
        };
        let mut m = Move::normal(from, to);
        m.castle = Some(side);
        m
    }

    /// Re-bases this move onto a new origin square, preserving the
    /// from-to delta.
    ///
    /// The engine itself always emits absolute-square moves; this exists
    /// for collaborators (opening books, premove queues) that keep move
    /// lists relative to a reference square and need them applied at a
    /// piece's actual location. Returns `None` when the shifted
    /// destination falls off the board.
    pub fn rebase(self, origin: Square) -> Option<Self> {
        let df = self.to.file() as i8 - self.from.file() as i8;
        let dr = self.to.rank() as i8 - self.from.rank() as i8;
        let to = origin.offset(df, dr)?;
        Some(Move {
            from: origin,
            to,
            ..self
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn normal_move() {
        let m = Move::normal(sq("e2"), sq("e4"));
        assert_eq!(m.from, sq("e2"));
        assert_eq!(m.to, sq("e4"));
        assert!(!m.is_capture);
        assert!(m.castle.is_none());
        assert!(m.promotion.is_none());
    }

    #[test]
    fn capture_move() {
        let m = Move::capture(sq("d4"), sq("e5"));
        assert!(m.is_capture);
    }

    #[test]
    fn castle_destinations() {
        let kingside = Move::castle(sq("e1"), CastleSide::Kingside);
        assert_eq!(kingside.to, sq("g1"));
        assert_eq!(kingside.castle, Some(CastleSide::Kingside));

        let queenside = Move::castle(sq("e8"), CastleSide::Queenside);
        assert_eq!(queenside.to, sq("c8"));
        assert_eq!(queenside.castle, Some(CastleSide::Queenside));
    }

    #[test]
    fn rebase_preserves_delta() {
        let m = Move::capture(sq("c3"), sq("d5"));
        let rebased = m.rebase(sq("f3")).unwrap();
        assert_eq!(rebased.from, sq("f3"));
        assert_eq!(rebased.to, sq("g5"));
        assert!(rebased.is_capture);
    }

    #[test]
    fn rebase_off_board() {
        let m = Move::normal(sq("a1"), sq("c2"));
        assert!(m.rebase(sq("g1")).is_none());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Move::normal(sq("e2"), sq("e4"))), "e2e4");
    }

    #[test]
    fn serde_round_trip() {
        let m = Move::castle(sq("e1"), CastleSide::Kingside);
        let json = serde_json::to_string(&m).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
