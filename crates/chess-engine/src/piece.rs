//! Board occupant representation.

use chess_core::{Color, InvalidPieceError, Move, PieceKind, Square};

/// A piece occupying a board square.
///
/// Owned exclusively by the board slot it sits on. Moving a piece updates
/// its square and moved-flag in place; identity is never reassigned. Each
/// piece carries its currently valid legal moves, rebuilt every ply by the
/// game controller and never touched by simulation probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    square: Square,
    has_moved: bool,
    legal_moves: Vec<Move>,
}

impl Piece {
    /// Creates a piece that has not yet moved.
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
            legal_moves: Vec::new(),
        }
    }

    /// Creates a piece from a FEN placement character (uppercase = White).
    pub fn from_fen_char(c: char, square: Square) -> Result<Self, InvalidPieceError> {
        let (kind, color) = PieceKind::from_fen_char(c)?;
        Ok(Piece::new(kind, color, square))
    }

    /// Returns the kind of this piece.
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the color of this piece.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the square this piece currently occupies.
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    /// Returns true once the piece has made a move. Gates castling and the
    /// pawn double push.
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns the FEN character for this piece.
    pub fn to_fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// Returns the piece's currently valid legal moves.
    #[inline]
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Returns the cached legal move landing on `to`, if any.
    pub fn legal_move_to(&self, to: Square) -> Option<Move> {
        self.legal_moves.iter().copied().find(|m| m.to == to)
    }

    pub(crate) fn set_legal_moves(&mut self, moves: Vec<Move>) {
        self.legal_moves = moves;
    }

    pub(crate) fn extend_legal_moves(&mut self, moves: impl IntoIterator<Item = Move>) {
        self.legal_moves.extend(moves);
    }

    pub(crate) fn relocate(&mut self, square: Square) {
        self.square = square;
        self.has_moved = true;
    }

    /// Restores position state recorded before a trial move.
    pub(crate) fn restore(&mut self, square: Square, has_moved: bool) {
        self.square = square;
        self.has_moved = has_moved;
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.square)
    }
}
