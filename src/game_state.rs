use crate::attacks::*;
use crate::boards::*;
use crate::chess_errors::*;
use crate::moves::*;
use crate::pieces::*;
use crate::positions::*;
use log::{debug, trace};
use std::fmt::{self, Debug, Display};

// -------------------------------------
// Game status
// ------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Playing,
    Checkmate,
    Stalemate,
    Resigned,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }

    /// Combines the stored status with the one derived from the position.
    /// Resignation is absorbing; everything else follows the board.
    fn resolve(self, derived: GameStatus) -> GameStatus {
        match (self, derived) {
            (GameStatus::Resigned, _) => GameStatus::Resigned,
            (_, derived) => derived,
        }
    }
}

impl Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameStatus::Playing => "playing",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Resigned => "resigned",
        };
        write!(f, "{}", s)
    }
}

// -------------------------------------
// GameState
// ------------------------------------

/// A Game State owns the board, the side to move and the move history.
/// Implements basic operations (executing one move forward, backwards, legal move generation)
/// and derives the game status from the position on demand.
#[derive(Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Color,
    // Only ever Playing or Resigned; the rest is derived in `status`.
    status: GameStatus,
    history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::standard_setup()
    }
}

// Construction and queries
impl GameState {
    /// Returns a game with the pieces placed on the starting array, White to move.
    pub fn standard_setup() -> GameState {
        GameState::from_board(Board::standard_setup())
    }

    /// Starts from an arbitrary board with White to move.
    pub fn from_board(board: Board) -> GameState {
        GameState::from_board_with_turn(board, Color::White)
    }

    pub fn from_board_with_turn(board: Board, current_player: Color) -> GameState {
        GameState {
            board,
            current_player,
            status: GameStatus::Playing,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Overrides the side to move. Meant for setting up positions.
    pub fn set_current_player(&mut self, color: Color) {
        self.current_player = color;
    }

    pub fn piece_at(&self, rank: i32, file: i32) -> ChessResult<Option<Piece>> {
        Ok(self.board.get(Square::new(rank, file)?))
    }

    /// Overwrites a cell. Meant for setting up positions.
    pub fn set_piece_at(&mut self, rank: i32, file: i32, piece: Option<Piece>) -> ChessResult<()> {
        self.board.set(Square::new(rank, file)?, piece);
        Ok(())
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.board.find_king(color)
    }

    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// The current status. Checkmate and stalemate are recomputed from the
    /// position each time; a resignation sticks until `reset`.
    pub fn status(&self) -> GameStatus {
        self.status.resolve(self.derive_status())
    }

    fn derive_status(&self) -> GameStatus {
        let color = self.current_player;
        if self.has_legal_moves(color) {
            GameStatus::Playing
        } else if self.is_king_in_check(color) {
            GameStatus::Checkmate
        } else {
            GameStatus::Stalemate
        }
    }
}

// Check detection
impl GameState {
    /// A king is in check if any opposing piece has a pseudo-legal move onto it.
    /// A color without a king is never in check.
    pub fn is_king_in_check(&self, color: Color) -> bool {
        king_attacked(&self.board, color)
    }

    /// Square of the side to move's king, if that king is in check.
    pub fn king_in_check_square(&self) -> Option<Square> {
        let color = self.current_player;
        self.find_king(color)
            .filter(|&king| is_square_attacked(&self.board, king, color.opposite()))
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        self.board.pieces_of(color).any(|(from, piece)| {
            possible_moves(&self.board, from, piece.kind, color)
                .into_iter()
                .any(|to| self.keeps_king_safe(from, to, color))
        })
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_king_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_king_in_check(color) && !self.has_legal_moves(color)
    }

    /// Probes the move on a scratch copy of the board.
    fn keeps_king_safe(&self, from: Square, to: Square, color: Color) -> bool {
        !king_attacked(&self.board.with_relocation(from, to), color)
    }
}

fn king_attacked(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}

// -------------------------------------
// Legal move generation
// ------------------------------------

impl GameState {
    /// Legal moves of the piece on (rank, file). Empty if the square is empty
    /// or holds a piece of the side not to move.
    pub fn valid_moves_for_piece(&self, rank: i32, file: i32) -> ChessResult<Vec<Move>> {
        Ok(self.legal_moves_from(Square::new(rank, file)?))
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let piece = match self.board.get(from) {
            Some(p) if p.color == self.current_player => p,
            _ => return Vec::new(),
        };

        possible_moves(&self.board, from, piece.kind, piece.color)
            .into_iter()
            .filter(|&to| self.keeps_king_safe(from, to, piece.color))
            .map(|to| {
                if is_promotion(piece, to) {
                    Move::with_promotion(from, to, PieceKind::Queen)
                } else {
                    Move::new(from, to)
                }
            })
            .collect()
    }

    /// Every legal move of the side to move, piece by piece from a1.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.current_player)
            .flat_map(|(from, _)| self.legal_moves_from(from))
            .collect()
    }
}

fn is_promotion(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
}

// -------------------------------------
// Moving impls
// ------------------------------------

impl GameState {
    /// Plays `mv` for the side to move. Returns false and leaves the state
    /// untouched if there is no piece of the side to move on the source, the
    /// move breaks the piece's movement rules, it would leave the own king in
    /// check, or it asks for a promotion to a king or pawn.
    pub fn execute_move(&mut self, mv: Move) -> bool {
        let piece = match self.board.get(mv.from) {
            Some(p) => p,
            None => return false,
        };
        if piece.color != self.current_player {
            return false;
        }
        if !is_pseudo_legal_move(&self.board, mv.from, mv.to, piece.kind, piece.color) {
            return false;
        }
        if !self.keeps_king_safe(mv.from, mv.to, piece.color) {
            return false;
        }

        let promotion = if is_promotion(piece, mv.to) {
            match mv.promotion.unwrap_or(PieceKind::Queen) {
                kind if kind.is_promotion_target() => Some(kind),
                _ => return false,
            }
        } else {
            None
        };

        let placed = Piece::new(promotion.unwrap_or(piece.kind), piece.color);
        let captured = self.board.get(mv.to);
        self.board.set(mv.to, Some(placed));
        self.board.set(mv.from, None);

        let record = MoveRecord {
            mv: Move {
                from: mv.from,
                to: mv.to,
                promotion,
            },
            piece,
            captured,
        };
        trace!("{} plays {}", self.current_player, record);
        self.history.push(record);
        self.flip_color();
        true
    }

    /// Same as `execute_move`, from flat coordinates. Off-board coordinates are an error.
    pub fn execute_coords(
        &mut self,
        from_rank: i32,
        from_file: i32,
        to_rank: i32,
        to_file: i32,
    ) -> ChessResult<bool> {
        let from = Square::new(from_rank, from_file)?;
        let to = Square::new(to_rank, to_file)?;
        Ok(self.execute_move(Move::new(from, to)))
    }

    /// Takes back the last move. Exact inverse of `execute_move`.
    pub fn undo_last_move(&mut self) -> bool {
        let record = match self.history.pop() {
            Some(r) => r,
            None => return false,
        };
        self.board.set(record.mv.from, Some(record.piece));
        self.board.set(record.mv.to, record.captured);
        self.flip_color();
        trace!("{} takes back {}", self.current_player, record);
        true
    }

    pub fn resign(&mut self) {
        debug!("{} resigns", self.current_player);
        self.status = GameStatus::Resigned;
    }

    /// Back to the starting array with an empty history.
    pub fn reset(&mut self) {
        debug!("Resetting game");
        *self = GameState::standard_setup();
    }

    fn flip_color(&mut self) {
        self.current_player = self.current_player.opposite();
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Move: {}  Player: {}  Status: {}\n{}",
            self.history.len() / 2 + 1,
            self.current_player,
            self.status(),
            self.board
        )
    }
}

impl Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Player: {}  Stored status: {}",
            self.current_player, self.status
        )?;
        write!(f, "History: [")?;
        for (i, record) in self.history.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", record)?;
        }
        writeln!(f, "]")?;
        write!(f, "{}", self.board)
    }
}
