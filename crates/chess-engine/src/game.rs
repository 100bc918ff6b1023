//! Turn management, move application, and terminal-state detection.

use crate::{legality, movegen, Board};
use chess_core::{CastleSide, Color, Move, PieceKind, Square};
use thiserror::Error;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// A side has no legal moves but is not in checkmate.
    Stalemate,
    /// 50 moves without a pawn move or capture. Detection is not
    /// implemented; the engine never produces this value.
    FiftyMoveRule,
    /// The same position occurred three times. Detection is not
    /// implemented; the engine never produces this value.
    ThreefoldRepetition,
}

/// Error type for move application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move does not match any currently legal move. The board is
    /// unchanged; the move is never coerced into a different legal one.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// The game has already reached a terminal result.
    #[error("game has already ended")]
    GameAlreadyOver,
}

/// A two-player chess game.
///
/// Owns the board, drives per-piece legal-move regeneration every ply,
/// applies moves (including castling rook relocation), and computes the
/// terminal result. Single-threaded and synchronous; callers serialize
/// access around every apply/query sequence.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    result: Option<GameResult>,
}

impl Game {
    /// The standard starting placement.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Creates a game from the standard starting position.
    pub fn new() -> Self {
        Self::from_placement(Self::STARTPOS)
    }

    /// Creates a game from a FEN piece-placement field.
    ///
    /// White moves first regardless of any turn field in the input. The
    /// terminal result is computed immediately, so a dead position is
    /// reported as ended without any move being made.
    pub fn from_placement(placement: &str) -> Self {
        let mut game = Game {
            board: Board::from_placement(placement),
            moves: Vec::new(),
            result: None,
        };
        game.refresh_legal_moves();
        game.result = game.compute_result();
        game
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is.
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Returns the game result if the game has ended.
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    /// Returns true if the game has reached a terminal result.
    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        legality::king_is_capturable(&self.board, self.board.side_to_move())
    }

    /// Returns the applied-move history, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns the legal moves for the piece on `square` (empty for an
    /// empty square). For the rendering collaborator's highlights.
    pub fn legal_moves_for(&self, square: Square) -> &[Move] {
        self.board
            .piece_at(square)
            .map(|p| p.legal_moves())
            .unwrap_or(&[])
    }

    /// Returns the legal move from `from` to `to`, if one exists. For the
    /// rendering collaborator's drag-to-square resolution.
    pub fn get_legal_move(&self, from: Square, to: Square) -> Option<Move> {
        self.board.piece_at(from).and_then(|p| p.legal_move_to(to))
    }

    /// Applies a move for the side to move.
    ///
    /// The input is untrusted (it may come from a network peer): it must
    /// match a currently legal move by its endpoints, and the applied
    /// record's flags come from the engine's own generation, enriched with
    /// check/checkmate after application. On success the enriched record
    /// is returned for relay to the opponent; on error the board is
    /// unchanged.
    pub fn apply_move(&mut self, m: Move) -> Result<Move, GameError> {
        if self.result.is_some() {
            return Err(GameError::GameAlreadyOver);
        }

        let mover_color = self
            .board
            .piece_at(m.from)
            .map(|p| p.color())
            .ok_or(GameError::IllegalMove(m))?;
        if mover_color != self.board.side_to_move() {
            return Err(GameError::IllegalMove(m));
        }

        let chosen = self
            .get_legal_move(m.from, m.to)
            .ok_or(GameError::IllegalMove(m))?;

        self.board.apply_raw(chosen);
        if let Some(side) = chosen.castle {
            self.relocate_castle_rook(chosen, side);
        }

        self.board.switch_turn();
        self.refresh_legal_moves();

        let mut applied = chosen;
        applied.is_check =
            legality::king_is_capturable(&self.board, self.board.side_to_move());

        self.result = self.compute_result();
        applied.is_checkmate = matches!(
            self.result,
            Some(GameResult::WhiteWins | GameResult::BlackWins)
        );

        self.moves.push(applied);
        Ok(applied)
    }

    /// Moves the castling rook next to the king's destination: kingside
    /// one file inward of the king, queenside likewise from the other
    /// direction.
    fn relocate_castle_rook(&mut self, king_move: Move, side: CastleSide) {
        let rank = king_move.to.rank();
        let rook_from = Square::new(side.rook_file(), rank);
        let rook_to = king_move
            .to
            .offset(-side.direction(), 0)
            .expect("castle rook destination off the board");
        self.board.apply_raw(Move::normal(rook_from, rook_to));
    }

    /// Rebuilds every piece's legal-move cache from the current board,
    /// then appends castle candidates for unmoved kings using the
    /// opposing side's freshly computed reachable squares.
    fn refresh_legal_moves(&mut self) {
        let occupied: Vec<Square> = self.board.pieces().map(|p| p.square()).collect();

        for &square in &occupied {
            let pseudo = movegen::pseudo_legal_moves(&self.board, square);
            let mut kept = Vec::with_capacity(pseudo.len());
            for m in pseudo {
                if legality::is_legal(&mut self.board, m) {
                    kept.push(m);
                }
            }
            if let Some(piece) = self.board.piece_at_mut(square) {
                piece.set_legal_moves(kept);
            }
        }

        for &square in &occupied {
            let Some(piece) = self.board.piece_at(square) else {
                continue;
            };
            if piece.kind() != PieceKind::King || piece.has_moved() {
                continue;
            }
            let opponent = piece.color().opposite();
            let reach = movegen::reachable_squares(&self.board, opponent);
            let castles = movegen::castle_moves(&self.board, square, reach);
            if let Some(piece) = self.board.piece_at_mut(square) {
                piece.extend_legal_moves(castles);
            }
        }
    }

    /// Computes the terminal result, first match wins: White checkmated,
    /// Black checkmated, either side out of moves (stalemate), otherwise
    /// ongoing.
    fn compute_result(&self) -> Option<GameResult> {
        if self.is_checkmated(Color::White) {
            return Some(GameResult::BlackWins);
        }
        if self.is_checkmated(Color::Black) {
            return Some(GameResult::WhiteWins);
        }

        if self.no_moves_left(Color::White) || self.no_moves_left(Color::Black) {
            // Checkmate was ruled out above, so the stuck side must not be
            // in check.
            debug_assert!(!legality::king_is_capturable(&self.board, Color::White));
            debug_assert!(!legality::king_is_capturable(&self.board, Color::Black));
            return Some(GameResult::Draw(DrawReason::Stalemate));
        }

        None
    }

    fn is_checkmated(&self, color: Color) -> bool {
        legality::king_is_capturable(&self.board, color) && self.no_moves_left(color)
    }

    fn no_moves_left(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .all(|p| p.legal_moves().is_empty())
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
