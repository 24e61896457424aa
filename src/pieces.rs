use crate::boards::BOARD_RANKS;
use crate::chess_errors::*;
use std::fmt::{self, Display};
use std::str::FromStr;

// ---------------------------------------------
// Pieces
// ---------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

/// A piece on the board. Moving a piece relocates the value, it never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl PieceKind {
    /// Letter used in move notation ("K", "Q", "R", "B", "N", "P").
    pub fn algebraic(&self) -> char {
        use PieceKind::*;
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }

    pub fn from_algebraic(c: char) -> Option<PieceKind> {
        use PieceKind::*;
        match c.to_ascii_uppercase() {
            'P' => Some(Pawn),
            'N' => Some(Knight),
            'B' => Some(Bishop),
            'R' => Some(Rook),
            'Q' => Some(Queen),
            'K' => Some(King),
            _ => None,
        }
    }

    /// Kinds a pawn may turn into on the far rank.
    pub fn is_promotion_target(&self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a pawn step for this color.
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank the pawns of this color start on.
    pub fn pawn_start_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => BOARD_RANKS - 2,
        }
    }

    /// Rank on which a pawn of this color promotes.
    pub fn promotion_rank(&self) -> u8 {
        match self {
            Color::White => BOARD_RANKS - 1,
            Color::Black => 0,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl FromStr for Color {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(ChessError::Parse(format!("color {:?}", s))),
        }
    }
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    pub fn algebraic(&self) -> char {
        self.kind.algebraic()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PieceKind::*;
        let symbol = match (self.color, self.kind) {
            (Color::White, King) => '\u{2654}',
            (Color::White, Queen) => '\u{2655}',
            (Color::White, Rook) => '\u{2656}',
            (Color::White, Bishop) => '\u{2657}',
            (Color::White, Knight) => '\u{2658}',
            (Color::White, Pawn) => '\u{2659}',
            (Color::Black, King) => '\u{265a}',
            (Color::Black, Queen) => '\u{265b}',
            (Color::Black, Rook) => '\u{265c}',
            (Color::Black, Bishop) => '\u{265d}',
            (Color::Black, Knight) => '\u{265e}',
            (Color::Black, Pawn) => '\u{265f}',
        };
        write!(f, "{}", symbol)
    }
}
