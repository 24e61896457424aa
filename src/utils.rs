// For setups and tests: easily creates a board with the given pieces placed.
//
//     board![(King, White, 0, 0), (Rook, Black, 4, 3)]
//
// Each entry is (piece kind, color, rank, file). Panics if two pieces share a square
// or a square lies off the board.
#[macro_export]
macro_rules! board {
    ( $( ($kind:ident, $color:ident, $rank:expr, $file:expr) ),* $(,)? ) => {
        {
            #[allow(unused_mut)]
            let mut base = $crate::boards::Board::empty();
            $(
                base.add(
                    $crate::positions::Square::at($rank, $file),
                    $crate::pieces::Piece::new(
                        $crate::pieces::PieceKind::$kind,
                        $crate::pieces::Color::$color,
                    ),
                )
                .expect("board! placed two pieces on one square");
            )*
            base
        }
    };
}
