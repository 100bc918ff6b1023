//! Pseudo-legal move generation.
//!
//! Expands a piece's direction templates against board occupancy. The
//! results are pseudo-legal: consistent with the movement pattern and
//! blocking, but not yet filtered for same-color landings or for leaving
//! the mover's own king capturable (see [`crate::legality`]).
//!
//! Generation always writes into fresh vectors; the per-piece caches on
//! [`Piece`](crate::Piece) are only ever written by the game controller's
//! refresh pass, so legality probes can call into this module without
//! disturbing authoritative state.

use crate::Board;
use chess_core::template::{self, PieceTemplate};
use chess_core::{CastleSide, Color, Move, PieceKind, Square, SquareSet};

/// Generates the pseudo-legal moves for the piece on `square`.
///
/// Returns an empty list for an empty square. Castle candidates are not
/// included here; they come from [`castle_moves`], which needs the
/// opponent's reachable squares as input.
pub fn pseudo_legal_moves(board: &Board, square: Square) -> Vec<Move> {
    let Some(piece) = board.piece_at(square) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    // Templates are written White-forward; the mover's color orients them.
    let forward = piece.color().pawn_direction();

    if piece.kind() == PieceKind::Pawn && !piece.has_moved() {
        // An unmoved pawn swaps its forward push for the two-square push.
        expand(board, square, &template::PAWN_DOUBLE_PUSH, forward, &mut moves);
        for t in &template::templates_for(PieceKind::Pawn)[1..] {
            expand(board, square, t, forward, &mut moves);
        }
    } else {
        for t in template::templates_for(piece.kind()) {
            expand(board, square, t, forward, &mut moves);
        }
    }

    moves
}

/// Expands one template from `square`, appending candidate moves.
fn expand(board: &Board, square: Square, t: &PieceTemplate, forward: i8, moves: &mut Vec<Move>) {
    for i in [-1i8, 1] {
        for j in [-1i8, 1] {
            if !t.rotatable && (i != 1 || j != 1) {
                continue;
            }
            // A mirrored zero component would repeat the base vector.
            if (i == -1 && t.dx == 0) || (j == -1 && t.dy == 0) {
                continue;
            }

            for k in 1..=t.repeat as i8 {
                let Some(to) = square.offset(i * k * t.dx, j * k * t.dy * forward) else {
                    break;
                };

                match board.piece_at(to) {
                    None => {
                        // A must-capture template has nothing to take here.
                        if t.must_capture {
                            break;
                        }
                        moves.push(Move::normal(square, to));
                    }
                    Some(_) => {
                        // Occupied: capture and stop, or just stop. Same-color
                        // captures are emitted here and rejected by the
                        // legality filter.
                        if t.can_capture {
                            moves.push(Move::capture(square, to));
                        }
                        break;
                    }
                }
            }
        }
    }
}

/// Returns the set of squares `color`'s pieces can land on, derived from
/// freshly generated pseudo-legal moves.
///
/// This is the explicit reachability input to [`castle_moves`]; computing
/// it on demand removes any ordering dependency on cached move lists.
pub fn reachable_squares(board: &Board, color: Color) -> SquareSet {
    board
        .pieces_of(color)
        .flat_map(|p| pseudo_legal_moves(board, p.square()))
        .map(|m| m.to)
        .collect()
}

/// Generates the castle candidates for the king on `king_square`.
///
/// `opponent_reach` must be the opposing side's reachable squares for the
/// current board (see [`reachable_squares`]). Returns at most two moves.
pub fn castle_moves(board: &Board, king_square: Square, opponent_reach: SquareSet) -> Vec<Move> {
    let Some(king) = board.piece_at(king_square) else {
        return Vec::new();
    };
    if king.kind() != PieceKind::King || king.has_moved() {
        return Vec::new();
    }

    [CastleSide::Kingside, CastleSide::Queenside]
        .into_iter()
        .filter(|&side| castle_possible(board, king_square, side, opponent_reach))
        .map(|side| Move::castle(king_square, side))
        .collect()
}

/// Checks one castle side: the rook must be unmoved on its home file, and
/// every square strictly between king and rook must be empty and not
/// reachable by the opponent.
fn castle_possible(
    board: &Board,
    king_square: Square,
    side: CastleSide,
    opponent_reach: SquareSet,
) -> bool {
    let rank = king_square.rank();
    let king_color = match board.piece_at(king_square) {
        Some(king) => king.color(),
        None => return false,
    };

    let rook_square = Square::new(side.rook_file(), rank);
    let rook_ok = board.piece_at(rook_square).is_some_and(|rook| {
        rook.kind() == PieceKind::Rook && rook.color() == king_color && !rook.has_moved()
    });
    if !rook_ok {
        return false;
    }

    // Walk from the king toward the rook, exclusive of both endpoints.
    let mut file = king_square.file() as i8 + side.direction();
    while file > 0 && file < 7 {
        let between = Square::new(file as u8, rank);
        if board.piece_at(between).is_some() || opponent_reach.contains(between) {
            return false;
        }
        file += side.direction();
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Color;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn targets(board: &Board, from: &str) -> Vec<String> {
        let mut out: Vec<String> = pseudo_legal_moves(board, sq(from))
            .iter()
            .map(|m| m.to.to_algebraic())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn knight_in_the_open() {
        let board = Board::from_placement("8/8/8/3N4/8/8/8/7K");
        assert_eq!(
            targets(&board, "d5"),
            ["b4", "b6", "c3", "c7", "e3", "e7", "f4", "f6"]
        );
    }

    #[test]
    fn rook_blocked_by_own_piece_emits_pseudo_capture() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R2P3K");
        let moves = pseudo_legal_moves(&board, sq("a1"));
        // The slide stops at d1; the landing there is emitted as a capture
        // and left for the legality filter to reject (same color).
        let d1 = moves.iter().find(|m| m.to == sq("d1")).unwrap();
        assert!(d1.is_capture);
        assert!(!moves.iter().any(|m| m.to == sq("e1")));
    }

    #[test]
    fn bishop_capture_stops_the_slide() {
        let board = Board::from_placement("8/8/8/8/4p3/8/2B5/7K");
        let moves = pseudo_legal_moves(&board, sq("c2"));
        let e4 = moves.iter().find(|m| m.to == sq("e4")).unwrap();
        assert!(e4.is_capture);
        assert!(!moves.iter().any(|m| m.to == sq("f5")));
    }

    #[test]
    fn unmoved_pawn_has_double_push() {
        let board = Board::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(targets(&board, "e2"), ["e3", "e4"]);
        // Black pawns run the other way.
        assert_eq!(targets(&board, "e7"), ["e5", "e6"]);
    }

    #[test]
    fn moved_pawn_loses_double_push() {
        let mut board = Board::from_placement("8/8/8/8/8/8/4P3/7K");
        let undo = board.apply_raw(Move::normal(sq("e2"), sq("e3")));
        assert_eq!(targets(&board, "e3"), ["e4"]);
        board.revert(undo);
        assert_eq!(targets(&board, "e2"), ["e3", "e4"]);
    }

    #[test]
    fn pawn_double_push_is_blockable() {
        // A piece on e3 blocks both the single and double push.
        let board = Board::from_placement("8/8/8/8/8/4n3/4P3/7K");
        assert!(targets(&board, "e2").is_empty());

        // A piece on e4 blocks only the second step.
        let board = Board::from_placement("8/8/8/8/4n3/8/4P3/7K");
        assert_eq!(targets(&board, "e2"), ["e3"]);
    }

    #[test]
    fn pawn_diagonal_only_with_a_target() {
        let board = Board::from_placement("8/8/8/8/8/3r4/4P3/7K");
        let moves = pseudo_legal_moves(&board, sq("e2"));
        let d3 = moves.iter().find(|m| m.to == sq("d3")).unwrap();
        assert!(d3.is_capture);
        // No capture target on f3, so no move there.
        assert!(!moves.iter().any(|m| m.to == sq("f3")));
        // The forward push never captures.
        assert!(moves.iter().all(|m| m.to != sq("e3") || !m.is_capture));
    }

    #[test]
    fn pawn_forward_push_cannot_capture() {
        let board = Board::from_placement("8/8/8/8/8/4r3/4P3/7K");
        let moves = pseudo_legal_moves(&board, sq("e2"));
        assert!(!moves.iter().any(|m| m.to == sq("e3")));
        assert!(!moves.iter().any(|m| m.to == sq("e4")));
    }

    #[test]
    fn king_steps_one_square() {
        let board = Board::from_placement("8/8/8/3K4/8/8/8/8");
        assert_eq!(
            targets(&board, "d5"),
            ["c4", "c5", "c6", "d4", "d6", "e4", "e5", "e6"]
        );
    }

    #[test]
    fn empty_square_generates_nothing() {
        let board = Board::empty();
        assert!(pseudo_legal_moves(&board, sq("e4")).is_empty());
    }

    #[test]
    fn reachable_squares_cover_attacks() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R6K");
        let reach = reachable_squares(&board, Color::White);
        assert!(reach.contains(sq("a8")));
        assert!(reach.contains(sq("g1")));
        assert!(!reach.contains(sq("b2")));
    }

    #[test]
    fn castle_both_sides_when_clear() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R3K2R");
        let castles = castle_moves(&board, sq("e1"), SquareSet::EMPTY);
        let mut tos: Vec<String> = castles.iter().map(|m| m.to.to_algebraic()).collect();
        tos.sort();
        assert_eq!(tos, ["c1", "g1"]);
        assert!(castles.iter().all(|m| m.castle.is_some()));
    }

    #[test]
    fn castle_blocked_by_piece_between() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R2QK1NR");
        let castles = castle_moves(&board, sq("e1"), SquareSet::EMPTY);
        assert!(castles.is_empty());
    }

    #[test]
    fn castle_refused_through_reachable_square() {
        let board = Board::from_placement("8/8/8/8/8/8/8/R3K2R");
        let mut reach = SquareSet::EMPTY;
        reach.insert(sq("f1"));
        let castles = castle_moves(&board, sq("e1"), reach);
        // Kingside passes through f1; queenside is unaffected.
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, sq("c1"));
    }

    #[test]
    fn castle_refused_after_rook_moved() {
        let mut board = Board::from_placement("8/8/8/8/8/8/8/R3K2R");
        let undo = board.apply_raw(Move::normal(sq("h1"), sq("h4")));
        let back = board.apply_raw(Move::normal(sq("h4"), sq("h1")));
        let castles = castle_moves(&board, sq("e1"), SquareSet::EMPTY);
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].castle, Some(CastleSide::Queenside));
        board.revert(back);
        board.revert(undo);
    }

    #[test]
    fn castle_requires_own_rook() {
        let board = Board::from_placement("8/8/8/8/8/8/8/r3K3");
        assert!(castle_moves(&board, sq("e1"), SquareSet::EMPTY).is_empty());
    }
}
