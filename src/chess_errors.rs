use crate::pieces::PieceKind;
use crate::positions::Square;
use thiserror::Error;

// ---------------------------------------------
// Error Handling
// ---------------------------------------------
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    /// Coordinates outside of the 5x4 board.
    #[error("Invalid square: rank {rank}, file {file} (must be 0-4, 0-3)")]
    InvalidSquare { rank: i32, file: i32 },

    #[error("Square {square} is already occupied")]
    SquareOccupied { square: Square },

    #[error("Search depth must be between 1 and 6, got {depth}")]
    InvalidDepth { depth: u32 },

    #[error("Pawns cannot promote to {kind:?}")]
    InvalidPromotion { kind: PieceKind },

    #[error("Could not parse {0}")]
    Parse(String),

    #[error("Chess Error occured: {0}")]
    Other(String),
}

pub type ChessResult<T> = std::result::Result<T, ChessError>;

impl From<String> for ChessError {
    fn from(s: String) -> ChessError {
        ChessError::Other(s)
    }
}

impl From<&str> for ChessError {
    fn from(s: &str) -> ChessError {
        ChessError::Other(s.to_string())
    }
}
