use crate::chess_errors::*;
use crate::pieces::*;
use crate::positions::*;
use array_init::array_init;
use std::fmt::{self, Display};
use std::ops;

// ---------------------------------------------
// Board Types
// ---------------------------------------------

pub const BOARD_RANKS: u8 = 5;
pub const BOARD_FILES: u8 = 4;

const R: usize = BOARD_RANKS as usize;
const F: usize = BOARD_FILES as usize;

pub type Cells = [[Option<Piece>; F]; R];

const fn white(kind: PieceKind) -> Option<Piece> {
    Some(Piece::new(kind, Color::White))
}

const fn black(kind: PieceKind) -> Option<Piece> {
    Some(Piece::new(kind, Color::Black))
}

/// Starting array, indexed [rank][file] with rank 0 being White's back rank.
pub const INITIAL_POSITION: Cells = {
    use PieceKind::*;
    [
        [white(Rook), white(Knight), white(Bishop), white(King)],
        [None, white(Pawn), None, None],
        [None, None, None, None],
        [None, black(Pawn), None, None],
        [black(Rook), black(Knight), black(Bishop), black(King)],
    ]
};

// Displays the cells from an iterator in a chessboard style, highest rank first:
//
//   a b c d
// 5 i1 i2 i3 i4 5
// 4 ....
//
// It is required that the iterator has at least 20 items, else we panic.
fn display_chessboard_style<I, C>(it: &mut I, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    I: Iterator<Item = C>,
    C: Display,
{
    write!(f, " ")?;
    for file in 0..BOARD_FILES {
        write!(f, " {}", (b'a' + file) as char)?;
    }
    for rank in (0..BOARD_RANKS).rev() {
        write!(f, "\n{} ", rank + 1)?;
        for _file in 0..BOARD_FILES {
            let i = it.next().expect("Iterator ended too early");
            write!(f, "{} ", i)?;
        }
        write!(f, "{}", rank + 1)?;
    }
    write!(f, "\n ")?;
    for file in 0..BOARD_FILES {
        write!(f, " {}", (b'a' + file) as char)?;
    }
    Ok(())
}

/// Mailbox representation of the 5x4 board. Pure data: one optional piece per cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Cells,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            cells: array_init(|_| array_init(|_| None)),
        }
    }

    /// The standard starting array.
    pub fn standard_setup() -> Board {
        Board {
            cells: INITIAL_POSITION,
        }
    }

    pub fn from_cells(cells: Cells) -> Board {
        Board { cells }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.rank() as usize][sq.file() as usize]
    }

    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.rank() as usize][sq.file() as usize] = piece;
    }

    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Places a piece on an empty square.
    pub fn add(&mut self, sq: Square, piece: Piece) -> ChessResult<()> {
        if self.get(sq).is_some() {
            return Err(ChessError::SquareOccupied { square: sq });
        }
        self.set(sq, Some(piece));
        Ok(())
    }

    /// Copy of the board with whatever stands on `from` relocated to `to`.
    /// Used to probe a move without touching the original.
    pub fn with_relocation(&self, from: Square, to: Square) -> Board {
        let mut copy = *self;
        let piece = copy.get(from);
        copy.set(to, piece);
        copy.set(from, None);
        copy
    }

    /// All occupied squares with their pieces, rank by rank from a1.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all_squares().filter_map(move |sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    /// First king of the given color, scanning from a1.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, p)| p.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard_setup()
    }
}

impl ops::Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, sq: Square) -> &Option<Piece> {
        &self.cells[sq.rank() as usize][sq.file() as usize]
    }
}

struct Cell(Option<Piece>);

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "{}", p),
            None => write!(f, "."),
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells = self.cells.iter().rev().flat_map(|rank| rank.iter().map(|c| Cell(*c)));
        display_chessboard_style(&mut cells, f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_setup() {
        let b = Board::standard_setup();
        let w = |kind| Some(Piece::new(kind, Color::White));
        let bl = |kind| Some(Piece::new(kind, Color::Black));

        assert_eq!(b.get(Square::at(0, 0)), w(PieceKind::Rook));
        assert_eq!(b.get(Square::at(0, 1)), w(PieceKind::Knight));
        assert_eq!(b.get(Square::at(0, 2)), w(PieceKind::Bishop));
        assert_eq!(b.get(Square::at(0, 3)), w(PieceKind::King));
        assert_eq!(b.get(Square::at(1, 1)), w(PieceKind::Pawn));
        assert_eq!(b.get(Square::at(3, 1)), bl(PieceKind::Pawn));
        assert_eq!(b.get(Square::at(4, 0)), bl(PieceKind::Rook));
        assert_eq!(b.get(Square::at(4, 1)), bl(PieceKind::Knight));
        assert_eq!(b.get(Square::at(4, 2)), bl(PieceKind::Bishop));
        assert_eq!(b.get(Square::at(4, 3)), bl(PieceKind::King));

        assert_eq!(b.pieces().count(), 10);
        assert_eq!(b.pieces_of(Color::White).count(), 5);
        assert_eq!(b.pieces_of(Color::Black).count(), 5);
        for file in 0..4 {
            assert!(b.is_empty_at(Square::at(2, file)));
        }
    }

    #[test]
    fn test_find_king() {
        let b = Board::standard_setup();
        assert_eq!(b.find_king(Color::White), Some(Square::at(0, 3)));
        assert_eq!(b.find_king(Color::Black), Some(Square::at(4, 3)));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn test_add_rejects_occupied() {
        let mut b = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        b.add(Square::at(2, 2), rook).unwrap();
        assert_eq!(b[Square::at(2, 2)], Some(rook));
        assert_eq!(
            b.add(Square::at(2, 2), rook),
            Err(ChessError::SquareOccupied {
                square: Square::at(2, 2)
            })
        );
    }

    #[test]
    fn test_with_relocation_leaves_original() {
        let b = Board::standard_setup();
        let moved = b.with_relocation(Square::at(1, 1), Square::at(2, 1));
        assert!(moved.is_empty_at(Square::at(1, 1)));
        assert_eq!(moved.get(Square::at(2, 1)), b.get(Square::at(1, 1)));
        assert_eq!(b, Board::standard_setup());
    }

    #[test]
    fn test_display() {
        let s = format!("{}", Board::standard_setup());
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "  a b c d");
        assert!(lines[1].starts_with("5 "));
        assert!(lines[5].starts_with("1 \u{2656}"));
    }
}
