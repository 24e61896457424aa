use crate::boards::{BOARD_FILES, BOARD_RANKS};
use crate::chess_errors::*;
use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::ops;
use std::str::FromStr;

// Squares on the 5x4 board, addressed as (rank, file).
//
//     a   b   c   d
//   -----------------
// 5 | 4,0 4,1 4,2 4,3 | 5   <- black back rank
// 4 | 3,0 3,1 3,2 3,3 | 4
// 3 | 2,0 2,1 2,2 2,3 | 3
// 2 | 1,0 1,1 1,2 1,3 | 2
// 1 | 0,0 0,1 0,2 0,3 | 1   <- white back rank
//   -----------------
//     a   b   c   d
//
// ---------------------------------------------
// Squares
// ---------------------------------------------

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    rank: u8,
    file: u8,
}

/// Signed distance between two squares, also used as a step direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Offset {
    pub rank: i8,
    pub file: i8,
}

impl Offset {
    pub const fn new(rank: i8, file: i8) -> Offset {
        Offset { rank, file }
    }

    /// Unit step pointing the same way (each component in -1..=1).
    pub fn signum(self) -> Offset {
        Offset::new(self.rank.signum(), self.file.signum())
    }

    pub fn abs(self) -> (u8, u8) {
        (self.rank.unsigned_abs(), self.file.unsigned_abs())
    }
}

impl Square {
    /// Checked construction. Anything outside ranks 0-4 and files 0-3 is rejected.
    pub fn new(rank: i32, file: i32) -> ChessResult<Square> {
        if Square::in_board(rank, file) {
            Ok(Square {
                rank: rank as u8,
                file: file as u8,
            })
        } else {
            Err(ChessError::InvalidSquare { rank, file })
        }
    }

    /// Construction for coordinates known at compile time. Panics when off the board.
    pub const fn at(rank: u8, file: u8) -> Square {
        assert!(rank < BOARD_RANKS && file < BOARD_FILES, "Square off the board");
        Square { rank, file }
    }

    pub const fn in_board(rank: i32, file: i32) -> bool {
        rank >= 0 && file >= 0 && rank < BOARD_RANKS as i32 && file < BOARD_FILES as i32
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    pub const fn file(self) -> u8 {
        self.file
    }

    /// The square `rank_delta`, `file_delta` away, if it is still on the board.
    pub fn offset(self, rank_delta: i8, file_delta: i8) -> Option<Square> {
        let rank = self.rank as i32 + rank_delta as i32;
        let file = self.file as i32 + file_delta as i32;
        Square::new(rank, file).ok()
    }

    /// Allows to iterate over all squares, rank by rank starting at a1.
    pub fn all_squares() -> SquareIterator {
        SquareIterator(0)
    }
}

pub struct SquareIterator(u8);

impl Iterator for SquareIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 >= BOARD_RANKS * BOARD_FILES {
            None
        } else {
            let sq = Square {
                rank: self.0 / BOARD_FILES,
                file: self.0 % BOARD_FILES,
            };
            self.0 += 1;
            Some(sq)
        }
    }
}

impl TryFrom<(i32, i32)> for Square {
    type Error = ChessError;

    fn try_from((rank, file): (i32, i32)) -> Result<Self, Self::Error> {
        Square::new(rank, file)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err_closure = || -> ChessError { ChessError::Parse(format!("square {:?}", s)) };
        let mut chars = s.trim().chars();

        let col = chars.next().ok_or_else(err_closure)?.to_ascii_lowercase();
        let row = chars
            .next()
            .and_then(|r| r.to_digit(10))
            .ok_or_else(err_closure)?;

        if chars.next().is_some() || !('a'..='z').contains(&col) || row == 0 {
            return Err(err_closure());
        }
        Square::new(row as i32 - 1, col as i32 - 'a' as i32).map_err(|_| err_closure())
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file) as char, self.rank + 1)
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.rank, self.file)
    }
}

impl_op_ex!(-|a: &Square, b: &Square| -> Offset {
    Offset::new(a.rank as i8 - b.rank as i8, a.file as i8 - b.file as i8)
});
impl_op_ex!(+|a: &Square, b: &Offset| -> Option<Square> { a.offset(b.rank, b.file) });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_off_board() {
        assert!(Square::new(0, 0).is_ok());
        assert!(Square::new(4, 3).is_ok());
        assert_eq!(
            Square::new(5, 0),
            Err(ChessError::InvalidSquare { rank: 5, file: 0 })
        );
        assert!(Square::new(0, 4).is_err());
        assert!(Square::new(-1, 0).is_err());
        assert!(Square::new(0, -1).is_err());
        assert!(Square::new(-1, 7).is_err());
    }

    #[test]
    #[should_panic]
    fn test_at_panics_off_board() {
        let _ = Square::at(5, 0);
    }

    #[test]
    fn test_all_squares() {
        let squares: Vec<Square> = Square::all_squares().collect();
        assert_eq!(squares.len(), 20);
        assert_eq!(squares[0], Square::at(0, 0));
        assert_eq!(squares[5], Square::at(1, 1));
        assert_eq!(squares[19], Square::at(4, 3));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("a1".parse::<Square>().unwrap(), Square::at(0, 0));
        assert_eq!("d5".parse::<Square>().unwrap(), Square::at(4, 3));
        assert_eq!("B2".parse::<Square>().unwrap(), Square::at(1, 1));
        assert!("e1".parse::<Square>().is_err());
        assert!("a6".parse::<Square>().is_err());
        assert!("a0".parse::<Square>().is_err());
        assert!("a".parse::<Square>().is_err());
        assert!("a12".parse::<Square>().is_err());
        assert_eq!(format!("{}", Square::at(2, 2)), "c3");
    }

    #[test]
    fn test_offsets() {
        let b2 = Square::at(1, 1);
        assert_eq!(b2.offset(1, 1), Some(Square::at(2, 2)));
        assert_eq!(b2.offset(-2, 0), None);
        assert_eq!(Square::at(3, 0) - b2, Offset::new(2, -1));
        assert_eq!((Square::at(3, 0) - b2).signum(), Offset::new(1, -1));
        assert_eq!(b2 + Offset::new(0, 2), Some(Square::at(1, 3)));
        assert_eq!(b2 + Offset::new(0, 3), None);
    }
}
