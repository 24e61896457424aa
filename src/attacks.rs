//! Movement rules for every piece kind.
//!
//! Everything in here is pseudo-legal: geometry and occupancy only, no
//! knowledge of check. Squares are trusted to be on the board already, the
//! `Square` type guarantees that.
use crate::boards::*;
use crate::pieces::*;
use crate::positions::*;

/// Walks the unit step from `from` towards `to`, excluding both endpoints, and
/// fails on the first occupied cell. Only meaningful for straight or diagonal pairs.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step = (to - from).signum();
    let mut current = from + step;

    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty_at(sq) {
            return false;
        }
        current = sq + step;
    }
    // Ran off the board: the pair was not collinear.
    debug_assert!(false, "is_path_clear called on non-collinear {} {}", from, to);
    false
}

/// Geometry and occupancy check for moving a `kind` of `color` from `from` to `to`.
pub fn is_pseudo_legal_move(
    board: &Board,
    from: Square,
    to: Square,
    kind: PieceKind,
    color: Color,
) -> bool {
    // Can't move to the same square
    if from == to {
        return false;
    }

    // Can't capture your own pieces
    if let Some(target) = board.get(to) {
        if target.color == color {
            return false;
        }
    }

    match kind {
        PieceKind::Rook => is_rook_move(board, from, to),
        PieceKind::Bishop => is_bishop_move(board, from, to),
        PieceKind::Queen => is_rook_move(board, from, to) || is_bishop_move(board, from, to),
        PieceKind::Knight => is_knight_move(from, to),
        PieceKind::King => is_king_move(from, to),
        PieceKind::Pawn => is_pawn_move(board, from, to, color),
    }
}

fn is_rook_move(board: &Board, from: Square, to: Square) -> bool {
    if from.rank() != to.rank() && from.file() != to.file() {
        return false;
    }
    is_path_clear(board, from, to)
}

fn is_bishop_move(board: &Board, from: Square, to: Square) -> bool {
    let (dr, df) = (to - from).abs();
    if dr != df {
        return false;
    }
    is_path_clear(board, from, to)
}

fn is_knight_move(from: Square, to: Square) -> bool {
    let (dr, df) = (to - from).abs();
    (dr == 2 && df == 1) || (dr == 1 && df == 2)
}

fn is_king_move(from: Square, to: Square) -> bool {
    let (dr, df) = (to - from).abs();
    dr <= 1 && df <= 1
}

fn is_pawn_move(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let delta = to - from;
    if delta.rank != color.pawn_direction() {
        return false;
    }

    match delta.file.abs() {
        // Forward one, onto an empty square
        0 => board.is_empty_at(to),
        // Diagonal, capture only
        1 => matches!(board.get(to), Some(target) if target.color != color),
        _ => false,
    }
}

/// Every destination on the board the piece could reach, ignoring check.
pub fn possible_moves(board: &Board, from: Square, kind: PieceKind, color: Color) -> Vec<Square> {
    Square::all_squares()
        .filter(|&to| is_pseudo_legal_move(board, from, to, kind, color))
        .collect()
}

/// True if some piece of color `by` has a pseudo-legal move landing on `sq`.
/// Pawns only capture diagonally onto occupied squares, so this is only
/// meaningful for a square holding a piece of the other color.
pub fn is_square_attacked(board: &Board, sq: Square, by: Color) -> bool {
    board
        .pieces_of(by)
        .any(|(from, piece)| is_pseudo_legal_move(board, from, sq, piece.kind, piece.color))
}
