/// Describing the moves that can be done on the board.
use crate::pieces::*;
use crate::positions::*;
use std::fmt;

/// A move is a plain value: source, destination and an optional promotion kind
/// (only meaningful for a pawn reaching the far rank).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }
}

impl From<(Square, Square)> for Move {
    fn from((from, to): (Square, Square)) -> Self {
        Move::new(from, to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.algebraic())?;
        }
        Ok(())
    }
}

/// Everything needed to take a move back exactly: the move, the piece that
/// moved (before any promotion) and whatever stood on the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.piece.algebraic(),
            self.mv.from,
            if self.is_capture() { "x" } else { "-" },
            self.mv.to
        )?;
        if let Some(kind) = self.mv.promotion {
            write!(f, "={}", kind.algebraic())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mv = Move::new(Square::at(0, 1), Square::at(2, 2));
        assert_eq!(format!("{}", mv), "b1-c3");

        let record = MoveRecord {
            mv,
            piece: Piece::new(PieceKind::Knight, Color::White),
            captured: None,
        };
        assert_eq!(format!("{}", record), "Nb1-c3");

        let capture = MoveRecord {
            mv: Move::new(Square::at(1, 1), Square::at(2, 2)),
            piece: Piece::new(PieceKind::Pawn, Color::White),
            captured: Some(Piece::new(PieceKind::Queen, Color::Black)),
        };
        assert_eq!(format!("{}", capture), "Pb2xc3");

        let promo = MoveRecord {
            mv: Move::with_promotion(Square::at(3, 1), Square::at(4, 1), PieceKind::Queen),
            piece: Piece::new(PieceKind::Pawn, Color::White),
            captured: None,
        };
        assert_eq!(format!("{}", promo), "Pb4-b5=Q");
    }

    #[test]
    fn test_from_pair() {
        let a = Square::at(0, 0);
        let b = Square::at(1, 0);
        assert_eq!(Move::from((a, b)), Move::new(a, b));
        assert_eq!(Move::from((a, b)).promotion, None);
    }
}
