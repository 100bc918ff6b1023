//! Movement pattern templates.
//!
//! Every piece kind moves according to a small set of direction templates:
//! a base vector, how many times it may repeat, whether it mirrors across
//! both axes, and its capture policy. The generator expands these against
//! board occupancy; the tables here are the only per-kind movement data in
//! the engine.

use crate::PieceKind;

/// An immutable movement pattern for one direction family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceTemplate {
    /// File component of the direction vector.
    pub dx: i8,
    /// Rank component of the direction vector, in the mover's forward
    /// direction (White forward = increasing rank).
    pub dy: i8,
    /// Maximum number of steps along the vector: 1 for single-step pieces,
    /// 8 for sliders, 2 for the pawn's first-move double push.
    pub repeat: u8,
    /// When true the template applies to all four sign combinations of
    /// (dx, dy); when false only the literal vector.
    pub rotatable: bool,
    /// Whether a move along this template may land on an opposing piece.
    pub can_capture: bool,
    /// Whether a move along this template may only land on an opposing
    /// piece (pawn diagonals).
    pub must_capture: bool,
}

impl PieceTemplate {
    /// A mirrored slide to the board edge.
    pub const fn slide(dx: i8, dy: i8) -> Self {
        PieceTemplate {
            dx,
            dy,
            repeat: 8,
            rotatable: true,
            can_capture: true,
            must_capture: false,
        }
    }

    /// A mirrored single step.
    pub const fn step(dx: i8, dy: i8) -> Self {
        PieceTemplate {
            dx,
            dy,
            repeat: 1,
            rotatable: true,
            can_capture: true,
            must_capture: false,
        }
    }
}

/// The pawn's forward push: one square, straight, never a capture.
pub const PAWN_PUSH: PieceTemplate = PieceTemplate {
    dx: 0,
    dy: 1,
    repeat: 1,
    rotatable: false,
    can_capture: false,
    must_capture: false,
};

/// The pawn's first-move push: up to two squares, still blockable and
/// non-capturing. Substituted for [`PAWN_PUSH`] while the pawn is unmoved.
pub const PAWN_DOUBLE_PUSH: PieceTemplate = PieceTemplate {
    repeat: 2,
    ..PAWN_PUSH
};

const PAWN_TEMPLATES: [PieceTemplate; 3] = [PAWN_PUSH, pawn_diagonal(1), pawn_diagonal(-1)];

const fn pawn_diagonal(dx: i8) -> PieceTemplate {
    PieceTemplate {
        dx,
        dy: 1,
        repeat: 1,
        rotatable: false,
        can_capture: true,
        must_capture: true,
    }
}

const KNIGHT_TEMPLATES: [PieceTemplate; 2] = [PieceTemplate::step(1, 2), PieceTemplate::step(2, 1)];

const BISHOP_TEMPLATES: [PieceTemplate; 1] = [PieceTemplate::slide(1, 1)];

const ROOK_TEMPLATES: [PieceTemplate; 2] = [PieceTemplate::slide(0, 1), PieceTemplate::slide(1, 0)];

const QUEEN_TEMPLATES: [PieceTemplate; 3] = [
    PieceTemplate::slide(0, 1),
    PieceTemplate::slide(1, 1),
    PieceTemplate::slide(1, 0),
];

const KING_TEMPLATES: [PieceTemplate; 3] = [
    PieceTemplate::step(0, 1),
    PieceTemplate::step(1, 1),
    PieceTemplate::step(1, 0),
];

/// Returns the movement templates for a piece kind.
///
/// The pawn entry is the post-first-move set; callers substitute
/// [`PAWN_DOUBLE_PUSH`] for the forward push while the pawn is unmoved.
pub const fn templates_for(kind: PieceKind) -> &'static [PieceTemplate] {
    match kind {
        PieceKind::Pawn => &PAWN_TEMPLATES,
        PieceKind::Knight => &KNIGHT_TEMPLATES,
        PieceKind::Bishop => &BISHOP_TEMPLATES,
        PieceKind::Rook => &ROOK_TEMPLATES,
        PieceKind::Queen => &QUEEN_TEMPLATES,
        PieceKind::King => &KING_TEMPLATES,
    }
}
