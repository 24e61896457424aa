use crate::boards::Board;
use crate::evaluation::*;
use crate::game_state::*;
use crate::moves::Move;
use crate::pieces::Color;
use log::{debug, trace};

pub const MATE_SCORE: f64 = 50000.0;

/// Depth-bounded minimax with alpha-beta pruning over a `GameState`.
///
/// The position is searched in place: every move executed on a branch is
/// undone before the branch returns, so callers get their state back unchanged.
/// Scores are always from the point of view of the side that is maximizing.
pub trait AlphaBetaSearch {
    /// Static score of the position for `color`. Higher => Better
    fn score(&self, state: &GameState, color: Color) -> f64;

    /// Gives every move a heuristical score used for move ordering.
    /// Higher => searched earlier.
    fn move_score(&self, board: &Board, m: &Move) -> f64 {
        board.get(m.to).map_or(0.0, |captured| piece_value(captured.kind))
    }

    /// Stable sort, so moves with equal scores keep their generation order.
    fn order_moves(&self, board: &Board, moves: &mut [Move]) {
        moves.sort_by(|lhs, rhs| {
            self.move_score(board, rhs)
                .total_cmp(&self.move_score(board, lhs))
        });
    }

    fn minimax(
        &self,
        state: &mut GameState,
        depth: u32,
        alpha: f64,
        beta: f64,
        maximizing: bool,
    ) -> f64 {
        let mut moves = state.all_legal_moves();

        // Terminal positions are scored no matter the depth left
        if moves.is_empty() {
            if !state.is_king_in_check(state.current_player()) {
                return 0.0;
            }
            return if maximizing {
                -MATE_SCORE + depth as f64
            } else {
                MATE_SCORE - depth as f64
            };
        }

        if depth == 0 {
            let perspective = if maximizing {
                state.current_player()
            } else {
                state.current_player().opposite()
            };
            return self.score(state, perspective);
        }

        self.order_moves(state.board(), &mut moves);

        let mut alpha_ = alpha;
        let mut beta_ = beta;
        let mut val;
        if maximizing {
            val = f64::NEG_INFINITY;

            for mv in moves {
                let played = state.execute_move(mv);
                debug_assert!(played, "generated move {} was rejected", mv);
                val = val.max(self.minimax(state, depth - 1, alpha_, beta_, false));
                state.undo_last_move();
                alpha_ = alpha_.max(val);
                if beta_ <= alpha_ {
                    break;
                }
            }
        } else {
            val = f64::INFINITY;

            for mv in moves {
                let played = state.execute_move(mv);
                debug_assert!(played, "generated move {} was rejected", mv);
                val = val.min(self.minimax(state, depth - 1, alpha_, beta_, true));
                state.undo_last_move();
                beta_ = beta_.min(val);
                if beta_ <= alpha_ {
                    break;
                }
            }
        }
        val
    }

    /// Best move for the side to move, searched `depth` plies deep (at least one).
    /// Ties go to the move searched first. `None` if there is nothing to play.
    fn best_move(&self, state: &GameState, depth: u32) -> Option<Move> {
        let depth = depth.max(1);
        let mut scratch = state.clone();

        let mut moves = scratch.all_legal_moves();
        self.order_moves(scratch.board(), &mut moves);

        let mut best: Option<(Move, f64)> = None;
        for mv in moves {
            let played = scratch.execute_move(mv);
            debug_assert!(played, "generated move {} was rejected", mv);
            let score = self.minimax(
                &mut scratch,
                depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
            );
            scratch.undo_last_move();
            trace!("{}: {}", mv, score);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }
        debug_assert!(scratch == *state, "search did not restore the position");

        match best {
            Some((mv, score)) => {
                debug!(
                    "{} picks {} at depth {} (score {})",
                    state.current_player(),
                    mv,
                    depth,
                    score
                );
                Some(mv)
            }
            None => {
                debug!("{} has no legal moves", state.current_player());
                None
            }
        }
    }
}

/// Search driven by `evaluate_position`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardSearch;

impl AlphaBetaSearch for StandardSearch {
    fn score(&self, state: &GameState, color: Color) -> f64 {
        evaluate_position(state.board(), color)
    }
}

pub fn minimax(state: &mut GameState, depth: u32, alpha: f64, beta: f64, maximizing: bool) -> f64 {
    StandardSearch.minimax(state, depth, alpha, beta, maximizing)
}

pub fn get_best_move(state: &GameState, depth: u32) -> Option<Move> {
    StandardSearch.best_move(state, depth)
}

/// Captures first, most valuable victim first.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    StandardSearch.order_moves(board, moves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board;
    use crate::pieces::PieceKind;
    use crate::positions::Square;
    use rand::rngs::SmallRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    fn sq(rank: u8, file: u8) -> Square {
        Square::at(rank, file)
    }

    fn mv(from: (u8, u8), to: (u8, u8)) -> Move {
        Move::new(sq(from.0, from.1), sq(to.0, to.1))
    }

    // Plain minimax without pruning or ordering, as reference.
    fn full_minimax(state: &mut GameState, depth: u32, maximizing: bool) -> f64 {
        let moves = state.all_legal_moves();
        if moves.is_empty() {
            if !state.is_king_in_check(state.current_player()) {
                return 0.0;
            }
            return if maximizing {
                -MATE_SCORE + depth as f64
            } else {
                MATE_SCORE - depth as f64
            };
        }
        if depth == 0 {
            let color = if maximizing {
                state.current_player()
            } else {
                state.current_player().opposite()
            };
            return evaluate_position(state.board(), color);
        }

        let scores = moves.into_iter().map(|m| {
            assert!(state.execute_move(m));
            let s = full_minimax(state, depth - 1, !maximizing);
            assert!(state.undo_last_move());
            s
        });
        if maximizing {
            scores.fold(f64::NEG_INFINITY, f64::max)
        } else {
            scores.fold(f64::INFINITY, f64::min)
        }
    }

    fn assert_pruning_agrees(state: &GameState, depth: u32) {
        for maximizing in [true, false] {
            let mut pruned = state.clone();
            let mut full = state.clone();
            let a = minimax(
                &mut pruned,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                maximizing,
            );
            let b = full_minimax(&mut full, depth, maximizing);
            assert_eq!(a, b, "depth {}, maximizing {}\n{:?}", depth, maximizing, state);
            assert_eq!(&pruned, state);
        }
    }

    #[test]
    fn test_alphabeta_matches_full_minimax() {
        let start = GameState::standard_setup();
        for depth in 0..=3 {
            assert_pruning_agrees(&start, depth);
        }

        let tactical = GameState::from_board(board![
            (King, White, 0, 3),
            (Queen, White, 1, 3),
            (Knight, White, 1, 0),
            (King, Black, 4, 1),
            (Rook, Black, 4, 0),
            (Rook, Black, 4, 2)
        ]);
        for depth in 0..=3 {
            assert_pruning_agrees(&tactical, depth);
        }
    }

    #[test]
    fn test_alphabeta_matches_full_minimax_random_positions() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..6 {
            let mut g = GameState::standard_setup();
            for _ in 0..8 {
                match g.all_legal_moves().choose(&mut rng) {
                    Some(&m) => assert!(g.execute_move(m)),
                    None => break,
                }
            }
            assert_pruning_agrees(&g, 2);
        }
    }

    #[test]
    fn test_pawn_takes_hanging_queen() {
        let g = GameState::from_board(board![
            (King, White, 0, 3),
            (Pawn, White, 1, 1),
            (King, Black, 4, 3),
            (Queen, Black, 2, 2)
        ]);
        assert_eq!(get_best_move(&g, 3), Some(mv((1, 1), (2, 2))));

        let g = GameState::from_board_with_turn(
            board![
                (King, White, 0, 0),
                (Queen, White, 2, 1),
                (King, Black, 4, 0),
                (Pawn, Black, 3, 2)
            ],
            Color::Black,
        );
        assert_eq!(get_best_move(&g, 3), Some(mv((3, 2), (2, 1))));
    }

    #[test]
    fn test_finds_mate_in_one() {
        let g = GameState::from_board(board![
            (King, White, 0, 3),
            (Queen, White, 1, 3),
            (Knight, White, 1, 0),
            (King, Black, 4, 1),
            (Rook, Black, 4, 0),
            (Rook, Black, 4, 2)
        ]);
        let best = get_best_move(&g, 1);
        assert_eq!(best, Some(mv((1, 3), (3, 1))));

        let mut after = g.clone();
        assert!(after.execute_move(mv((1, 3), (3, 1))));
        assert_eq!(after.status(), GameStatus::Checkmate);
    }

    #[test]
    fn test_pushes_pawn_to_promote() {
        let g = GameState::from_board(board![
            (King, White, 0, 0),
            (Pawn, White, 3, 2),
            (King, Black, 4, 0)
        ]);
        let push = Move::with_promotion(sq(3, 2), sq(4, 2), PieceKind::Queen);
        for depth in 1..=3 {
            assert_eq!(get_best_move(&g, depth), Some(push), "depth {}", depth);
        }
    }

    #[test]
    fn test_terminal_scores() {
        let mut mated = GameState::from_board(board![
            (King, White, 0, 0),
            (Rook, Black, 1, 0),
            (Rook, Black, 0, 1),
            (Rook, Black, 1, 1)
        ]);
        let inf = f64::INFINITY;
        assert_eq!(minimax(&mut mated, 2, -inf, inf, true), -MATE_SCORE + 2.0);
        assert_eq!(minimax(&mut mated, 2, -inf, inf, false), MATE_SCORE - 2.0);
        assert_eq!(minimax(&mut mated, 0, -inf, inf, true), -MATE_SCORE);
        assert_eq!(get_best_move(&mated, 3), None);

        let mut stalemated = GameState::from_board(board![
            (King, White, 0, 0),
            (Rook, Black, 1, 2),
            (Rook, Black, 2, 1)
        ]);
        assert_eq!(minimax(&mut stalemated, 3, -inf, inf, true), 0.0);
        assert_eq!(minimax(&mut stalemated, 0, -inf, inf, false), 0.0);
        assert_eq!(get_best_move(&stalemated, 2), None);
    }

    #[test]
    fn test_leaf_perspective() {
        let mut g = GameState::from_board(board![
            (King, White, 0, 0),
            (Queen, White, 2, 0),
            (King, Black, 4, 3)
        ]);
        let inf = f64::INFINITY;
        let white = evaluate_position(g.board(), Color::White);
        let black = evaluate_position(g.board(), Color::Black);
        assert_eq!(minimax(&mut g, 0, -inf, inf, true), white);
        assert_eq!(minimax(&mut g, 0, -inf, inf, false), black);
    }

    #[test]
    fn test_depth_zero_searches_one_ply() {
        let g = GameState::standard_setup();
        assert_eq!(get_best_move(&g, 0), get_best_move(&g, 1));
    }

    #[test]
    fn test_search_leaves_state_untouched() {
        let mut g = GameState::standard_setup();
        assert!(g.execute_move(mv((1, 1), (2, 1))));
        let before = g.clone();
        assert!(get_best_move(&g, 3).is_some());
        assert_eq!(g, before);

        let mut scratch = g.clone();
        minimax(&mut scratch, 3, f64::NEG_INFINITY, f64::INFINITY, true);
        assert_eq!(scratch, before);
    }

    #[test]
    fn test_order_moves() {
        let b = board![
            (Rook, White, 0, 0),
            (Pawn, Black, 1, 0),
            (Queen, Black, 0, 3),
            (Bishop, Black, 0, 2)
        ];
        let mut moves = vec![
            mv((0, 0), (0, 1)),
            mv((0, 0), (1, 0)),
            mv((0, 0), (0, 2)),
            mv((0, 0), (2, 0)),
        ];
        order_moves(&b, &mut moves);
        assert_eq!(
            moves,
            vec![
                mv((0, 0), (0, 2)),
                mv((0, 0), (1, 0)),
                mv((0, 0), (0, 1)),
                mv((0, 0), (2, 0)),
            ]
        );

        // Only the target square is looked at, reachability is not
        let mut queen_first = vec![mv((0, 0), (1, 0)), mv((0, 0), (0, 3))];
        order_moves(&b, &mut queen_first);
        assert_eq!(queen_first[0], mv((0, 0), (0, 3)));
    }

    #[test]
    fn test_custom_scoring() {
        // Prefers whatever puts the most pieces on the a-file
        struct AFileLover;
        impl AlphaBetaSearch for AFileLover {
            fn score(&self, state: &GameState, color: Color) -> f64 {
                state
                    .board()
                    .pieces_of(color)
                    .filter(|(sq, _)| sq.file() == 0)
                    .count() as f64
            }
        }

        let g = GameState::from_board(board![
            (King, White, 0, 3),
            (Knight, White, 0, 1),
            (King, Black, 4, 3)
        ]);
        let best = AFileLover.best_move(&g, 1).unwrap();
        assert_eq!(best.to.file(), 0);
    }
}
