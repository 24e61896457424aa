//! Static evaluation of a board from one side's point of view.
//!
//! All terms are in pawn units, higher is better for the color asked about.
use crate::boards::*;
use crate::pieces::*;
use array_init::array_init;
use lazy_static::lazy_static;

pub const PAWN_VALUE: f64 = 1.0;
pub const KNIGHT_VALUE: f64 = 3.0;
pub const BISHOP_VALUE: f64 = 3.0;
pub const ROOK_VALUE: f64 = 5.0;
pub const QUEEN_VALUE: f64 = 9.0;
/// Only used to rank captures. Never part of the material count.
pub const KING_VALUE: f64 = 20000.0;

const PAWN_ADVANCE_BONUS: f64 = 0.1;
const EXPOSED_KING_PENALTY: f64 = -0.5;
const CENTER_BONUS: f64 = 0.1;

const CENTER_RANK: f64 = 2.0;
const CENTER_FILE: f64 = 1.5;

lazy_static! {
    /// |rank - 2| + |file - 1.5| for every cell, indexed [rank][file].
    static ref CENTER_DISTANCE: [[f64; BOARD_FILES as usize]; BOARD_RANKS as usize] =
        array_init(|rank| {
            array_init(|file| (rank as f64 - CENTER_RANK).abs() + (file as f64 - CENTER_FILE).abs())
        });
}

pub fn piece_value(kind: PieceKind) -> f64 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

fn center_distance(rank: u8, file: u8) -> f64 {
    CENTER_DISTANCE[rank as usize][file as usize]
}

/// Sum of piece values of `color`, kings excluded.
pub fn count_material(board: &Board, color: Color) -> f64 {
    board
        .pieces_of(color)
        .filter(|(_, p)| p.kind != PieceKind::King)
        .map(|(_, p)| piece_value(p.kind))
        .sum()
}

/// 0.1 for every rank a pawn has advanced past its starting rank.
pub fn evaluate_pawn_structure(board: &Board, color: Color) -> f64 {
    let start = color.pawn_start_rank() as i32;
    let direction = color.pawn_direction() as i32;

    board
        .pieces_of(color)
        .filter(|(_, p)| p.kind == PieceKind::Pawn)
        .map(|(sq, _)| (sq.rank() as i32 - start) * direction)
        .filter(|&advanced| advanced > 0)
        .map(|advanced| advanced as f64 * PAWN_ADVANCE_BONUS)
        .sum()
}

/// Penalises a king standing close to the center. Only the first king found counts.
pub fn evaluate_king_safety(board: &Board, color: Color) -> f64 {
    match board.find_king(color) {
        Some(king) if center_distance(king.rank(), king.file()) < 2.0 => EXPOSED_KING_PENALTY,
        _ => 0.0,
    }
}

/// 0.1 for every piece of `color` within distance 2 of the center.
pub fn evaluate_center_control(board: &Board, color: Color) -> f64 {
    board
        .pieces_of(color)
        .filter(|(sq, _)| center_distance(sq.rank(), sq.file()) <= 2.0)
        .count() as f64
        * CENTER_BONUS
}

/// Full evaluation for `color`. Material, pawn and king terms are taken as
/// differences against the opponent; center control only counts our own pieces.
pub fn evaluate_position(board: &Board, color: Color) -> f64 {
    let opponent = color.opposite();

    let material = count_material(board, color) - count_material(board, opponent);
    let pawns = evaluate_pawn_structure(board, color) - evaluate_pawn_structure(board, opponent);
    let king_safety = evaluate_king_safety(board, color) - evaluate_king_safety(board, opponent);
    let center = evaluate_center_control(board, color);

    material + pawns + king_safety + center
}
