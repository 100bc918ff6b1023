//! Board state: an 8x8 grid of optional pieces.

use crate::Piece;
use chess_core::{Color, Move, PieceKind, Square};
use std::fmt;

/// The 8x8 chess board.
///
/// Holds at most one piece per square, the side to move, and the viewing
/// perspective. The perspective affects only display-rank indexing for the
/// rendering collaborator; legality never consults it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    perspective: Color,
}

/// Minimal record of the state a single move mutates, captured by
/// [`Board::apply_raw`] so a trial move can be rolled back exactly:
/// the two affected slots plus the mover's square and moved-flag.
#[derive(Debug)]
pub struct MoveUndo {
    from: Square,
    to: Square,
    had_moved: bool,
    captured: Option<Piece>,
}

impl Board {
    /// Creates an empty board with White to move.
    pub fn empty() -> Self {
        Board {
            squares: std::array::from_fn(|_| None),
            side_to_move: Color::White,
            perspective: Color::White,
        }
    }

    /// Creates a board from a FEN piece-placement field.
    pub fn from_placement(placement: &str) -> Self {
        let mut board = Board::empty();
        board.load(placement);
        board
    }

    /// Clears all squares, then places pieces per the FEN placement field.
    ///
    /// Only the placement field is consumed; anything after the first
    /// whitespace (turn, castling, en passant, move counters) is ignored.
    /// This is a known limitation: moved-flags and the turn always start
    /// fresh. A character that maps to no known piece is logged and
    /// skipped, consuming one file, and the load continues with a partial
    /// board.
    pub fn load(&mut self, placement: &str) {
        self.squares = std::array::from_fn(|_| None);

        // FEN ranks come top to bottom, so the first rank parsed is rank 7.
        let mut rank: i8 = 7;
        let mut file: u8 = 0;
        for c in placement.chars() {
            match c {
                c if c.is_whitespace() => break,
                '/' => {
                    rank = rank.saturating_sub(1);
                    file = 0;
                }
                // Saturate so a malformed digit run cannot wrap the file
                // counter; out-of-range squares are already ignored below.
                '1'..='8' => file = file.saturating_add(c as u8 - b'0'),
                _ => {
                    if file < 8 && (0..8).contains(&rank) {
                        let square = Square::new(file, rank as u8);
                        match Piece::from_fen_char(c, square) {
                            Ok(piece) => self.place(square, piece),
                            Err(err) => {
                                tracing::warn!("skipping placement character: {}", err);
                            }
                        }
                    }
                    file += 1;
                }
            }
        }
    }

    /// Places a piece on a square, updating the piece's own coordinates.
    /// Any previous occupant is dropped.
    pub fn place(&mut self, square: Square, mut piece: Piece) {
        let has_moved = piece.has_moved();
        piece.restore(square, has_moved);
        self.squares[square.index()] = Some(piece);
    }

    /// Removes and returns the piece on a square.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.index()].as_ref()
    }

    #[inline]
    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.index()].as_mut()
    }

    /// Iterates over all pieces on the board.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().filter_map(|slot| slot.as_ref())
    }

    /// Iterates over all pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color() == color)
    }

    /// Returns the square of the king of the given color, if present.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|p| p.kind() == PieceKind::King)
            .map(|p| p.square())
    }

    /// Returns whose turn it is.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub(crate) fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Returns the side viewing the board from the bottom.
    #[inline]
    pub fn perspective(&self) -> Color {
        self.perspective
    }

    /// Sets the viewing perspective. Affects only [`Board::display_rank`].
    pub fn set_perspective(&mut self, perspective: Color) {
        self.perspective = perspective;
    }

    /// Returns the display row (0 = top) for a square under the current
    /// perspective, for the rendering collaborator.
    pub fn display_rank(&self, square: Square) -> u8 {
        match self.perspective {
            Color::White => 7 - square.rank(),
            Color::Black => square.rank(),
        }
    }

    /// Relocates the piece on `m.from` to `m.to`, setting its moved-flag
    /// and capturing any occupant of the destination.
    ///
    /// Returns the undo record; [`Board::revert`] with it restores the
    /// board exactly. Callers validate legality first.
    ///
    /// # Panics
    ///
    /// Panics if the source square is empty.
    pub(crate) fn apply_raw(&mut self, m: Move) -> MoveUndo {
        let mut piece = self.squares[m.from.index()]
            .take()
            .expect("move source square is empty");
        let captured = self.squares[m.to.index()].take();
        let had_moved = piece.has_moved();
        piece.relocate(m.to);
        self.squares[m.to.index()] = Some(piece);
        MoveUndo {
            from: m.from,
            to: m.to,
            had_moved,
            captured,
        }
    }

    /// Undoes the move recorded by `undo`, restoring the captured piece,
    /// the mover's square, and its moved-flag.
    ///
    /// # Panics
    ///
    /// Panics if the board was mutated since the matching
    /// [`Board::apply_raw`].
    pub(crate) fn revert(&mut self, undo: MoveUndo) {
        let mut piece = self.squares[undo.to.index()]
            .take()
            .expect("reverted piece is missing");
        piece.restore(undo.from, undo.had_moved);
        self.squares[undo.from.index()] = Some(piece);
        self.squares[undo.to.index()] = undo.captured;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{}", piece.to_fen_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
