//! Legality filtering and check detection.
//!
//! A pseudo-legal move is legal when it does not land on a same-color
//! piece and does not leave the mover's own king capturable. The
//! capturability probe applies the move for real, asks the question, and
//! rolls the board back from the minimal undo record; pseudo-legal
//! generation is a pure function, so the probe needs no recursion guard
//! and never disturbs the per-piece move caches.

use crate::{movegen, Board};
use chess_core::{Color, Move, PieceKind};

/// Returns true if the move is legal on this board.
///
/// Rejects moves from empty squares, moves landing on a same-color piece,
/// and moves that leave the mover's own king capturable.
pub fn is_legal(board: &mut Board, m: Move) -> bool {
    let Some(mover) = board.piece_at(m.from) else {
        return false;
    };
    let mover_color = mover.color();

    // Cannot capture pieces of the same color.
    if board
        .piece_at(m.to)
        .is_some_and(|target| target.color() == mover_color)
    {
        return false;
    }

    !move_leaves_self_in_check(board, m)
}

/// Returns true if applying `m` would leave the mover's own king
/// capturable.
///
/// Applies the move, probes, and reverts; on return the board is
/// indistinguishable from before the call.
///
/// # Panics
///
/// Panics if `m.from` is empty.
pub fn move_leaves_self_in_check(board: &mut Board, m: Move) -> bool {
    let mover_color = board
        .piece_at(m.from)
        .expect("probed move has no piece on its source square")
        .color();

    let undo = board.apply_raw(m);
    let capturable = king_is_capturable(board, mover_color);
    board.revert(undo);

    capturable
}

/// Returns true if some pseudo-legal capture by the opposing side lands on
/// the king of `color`.
///
/// Check is derived from one ply of pseudo-legal opponent moves, freshly
/// generated; a pinned opposing piece still gives check here, and the
/// per-piece caches are never consulted.
pub fn king_is_capturable(board: &Board, color: Color) -> bool {
    for piece in board.pieces() {
        if piece.color() == color {
            continue;
        }
        for m in movegen::pseudo_legal_moves(board, piece.square()) {
            if !m.is_capture {
                continue;
            }
            let captured_king = board
                .piece_at(m.to)
                .is_some_and(|target| target.kind() == PieceKind::King && target.color() == color);
            if captured_king {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Square;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn rejects_same_color_landing() {
        let mut board = Board::from_placement("8/8/8/8/8/8/3P4/3R3K");
        assert!(!is_legal(&mut board, Move::capture(sq("d1"), sq("d2"))));
    }

    #[test]
    fn rejects_move_from_empty_square() {
        let mut board = Board::empty();
        assert!(!is_legal(&mut board, Move::normal(sq("e4"), sq("e5"))));
    }

    #[test]
    fn king_in_rook_line_is_capturable() {
        let board = Board::from_placement("3r4/8/8/8/8/8/8/3K4");
        assert!(king_is_capturable(&board, Color::White));
        assert!(!king_is_capturable(&board, Color::Black));
    }

    #[test]
    fn blocked_rook_line_is_no_check() {
        let board = Board::from_placement("3r4/8/8/3p4/8/8/8/3K4");
        assert!(!king_is_capturable(&board, Color::White));
    }

    #[test]
    fn pawn_gives_check_diagonally_only() {
        // Black pawn on e2 attacks d1 but not e1.
        let board = Board::from_placement("8/8/8/8/8/8/4p3/3K4");
        assert!(king_is_capturable(&board, Color::White));

        let board = Board::from_placement("8/8/8/8/8/8/4p3/4K3");
        assert!(!king_is_capturable(&board, Color::White));
    }

    #[test]
    fn pinned_piece_may_not_move_away() {
        // The d2 knight shields the white king from the d8 rook.
        let mut board = Board::from_placement("3r4/8/8/8/8/8/3N4/3K4");
        assert!(move_leaves_self_in_check(
            &mut board,
            Move::normal(sq("d2"), sq("e4"))
        ));
        // The king stepping off the line is fine.
        assert!(!move_leaves_self_in_check(
            &mut board,
            Move::normal(sq("d1"), sq("e1"))
        ));
    }

    #[test]
    fn king_may_not_step_into_check() {
        let mut board = Board::from_placement("3r4/8/8/8/8/8/8/4K3");
        assert!(!is_legal(&mut board, Move::normal(sq("e1"), sq("d1"))));
        assert!(is_legal(&mut board, Move::normal(sq("e1"), sq("f1"))));
    }

    #[test]
    fn probe_leaves_board_untouched() {
        let mut board = Board::from_placement("3r4/8/8/3p4/8/8/3N4/3K4");
        let before = board.clone();
        // Both capture and quiet probes round-trip exactly.
        move_leaves_self_in_check(&mut board, Move::normal(sq("d2"), sq("b3")));
        assert_eq!(board, before);
        move_leaves_self_in_check(&mut board, Move::capture(sq("d2"), sq("d5")));
        assert_eq!(board, before);
    }
}
