/// Differing kinds of agents that can play the game
use crate::algorithms::*;
use crate::chess_errors::*;
use crate::game::Agent;
use crate::game_state::GameState;
use crate::moves::Move;
use crate::pieces::PieceKind;
use crate::positions::Square;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::{stdout, Write};
use text_io::try_read;

pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 6;
pub const DEFAULT_DEPTH: u32 = 3;
pub const DEFAULT_HINT_DEPTH: u32 = 2;

// ---------------------------------------------
// Search settings
// ---------------------------------------------

/// Search depths for playing and for hints, both in plies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    depth: u32,
    hint_depth: u32,
}

fn check_depth(depth: u32) -> ChessResult<u32> {
    if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        Ok(depth)
    } else {
        Err(ChessError::InvalidDepth { depth })
    }
}

impl SearchSettings {
    pub fn new(depth: u32) -> ChessResult<SearchSettings> {
        Ok(SearchSettings {
            depth: check_depth(depth)?,
            hint_depth: DEFAULT_HINT_DEPTH,
        })
    }

    pub fn with_hint_depth(self, hint_depth: u32) -> ChessResult<SearchSettings> {
        Ok(SearchSettings {
            hint_depth: check_depth(hint_depth)?,
            ..self
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn hint_depth(&self) -> u32 {
        self.hint_depth
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            depth: DEFAULT_DEPTH,
            hint_depth: DEFAULT_HINT_DEPTH,
        }
    }
}

// ---------------------------------------------
// Agents
// ---------------------------------------------

/// Plays whatever the search thinks is best at the configured depth.
pub struct SearchAgent<S: AlphaBetaSearch = StandardSearch> {
    settings: SearchSettings,
    search: S,
}

impl SearchAgent<StandardSearch> {
    pub fn new(settings: SearchSettings) -> Self {
        SearchAgent::with_search(settings, StandardSearch)
    }
}

impl<S: AlphaBetaSearch> SearchAgent<S> {
    pub fn with_search(settings: SearchSettings, search: S) -> Self {
        SearchAgent { settings, search }
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    /// A suggestion for the side to move, searched at the hint depth.
    pub fn hint(&self, state: &GameState) -> Option<Move> {
        self.search.best_move(state, self.settings.hint_depth)
    }
}

impl<S: AlphaBetaSearch> Agent for SearchAgent<S> {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        self.search.best_move(state, self.settings.depth)
    }
}

/// Picks uniformly among the legal moves.
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        RandomAgent::new()
    }
}

impl Agent for RandomAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        state.all_legal_moves().choose(&mut self.rng).copied()
    }
}

/// What a line typed by the human asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(Move),
    Hint,
    Resign,
}

// Either "hint", "resign", or two squares such as "b4 b5", the second one
// optionally carrying a promotion ("b4 b5=N").
fn parse_command(first: &str, second: Option<&str>) -> ChessResult<Command> {
    match first.to_ascii_lowercase().as_str() {
        "hint" => return Ok(Command::Hint),
        "resign" | "quit" => return Ok(Command::Resign),
        _ => (),
    }

    let from: Square = first.parse()?;
    let second = second.ok_or_else(|| ChessError::Parse("missing target square".to_string()))?;
    let (to, promotion) = match second.split_once('=') {
        Some((to, kind)) => {
            let mut chars = kind.chars();
            let kind = match (chars.next().and_then(PieceKind::from_algebraic), chars.next()) {
                (Some(kind), None) => kind,
                _ => return Err(ChessError::Parse(format!("promotion {:?}", kind))),
            };
            if !kind.is_promotion_target() {
                return Err(ChessError::InvalidPromotion { kind });
            }
            (to, Some(kind))
        }
        None => (second, None),
    };

    Ok(Command::Play(Move {
        from,
        to: to.parse()?,
        promotion,
    }))
}

/// Reads moves from stdin, re-asking until a legal one is given.
pub struct HumanAgent {
    hints: SearchAgent,
}

impl HumanAgent {
    pub fn new(settings: SearchSettings) -> Self {
        HumanAgent {
            hints: SearchAgent::new(settings),
        }
    }

    fn read_token() -> Option<String> {
        let token: Result<String, _> = try_read!();
        token.ok().filter(|s| !s.is_empty())
    }
}

impl Default for HumanAgent {
    fn default() -> Self {
        HumanAgent::new(SearchSettings::default())
    }
}

impl Agent for HumanAgent {
    fn play_move(&mut self, state: &GameState) -> Option<Move> {
        if let Some(last) = state.last_move() {
            println!("{} played {}", state.current_player().opposite(), last);
        }
        println!("{}", state);
        if let Some(king) = state.king_in_check_square() {
            println!("Check! King on {}", king);
        }

        loop {
            print!("Your move (e.g. b2 b3, hint, resign): ");
            stdout().flush().ok();

            // End of input resigns
            let first = HumanAgent::read_token()?;
            let needs_target = !matches!(first.to_ascii_lowercase().as_str(), "hint" | "resign" | "quit");
            let second = if needs_target {
                Some(HumanAgent::read_token()?)
            } else {
                None
            };

            match parse_command(&first, second.as_deref()) {
                Ok(Command::Resign) => return None,
                Ok(Command::Hint) => match self.hints.hint(state) {
                    Some(mv) => println!("Hint: {}", mv),
                    None => println!("No moves left"),
                },
                Ok(Command::Play(mv)) => {
                    let legal = state.legal_moves_from(mv.from);
                    let promotes = legal.iter().any(|m| m.to == mv.to && m.promotion.is_some());
                    if legal.iter().any(|m| m.to == mv.to) {
                        return Some(Move {
                            promotion: if promotes {
                                mv.promotion.or(Some(PieceKind::Queen))
                            } else {
                                None
                            },
                            ..mv
                        });
                    }
                    println!("Illegal move {}", mv);
                    if !legal.is_empty() {
                        let targets: Vec<String> = legal.iter().map(|m| m.to.to_string()).collect();
                        println!("{} can go to: {}", mv.from, targets.join(" "));
                    }
                }
                Err(e) => println!("{}", e),
            }
        }
    }
}
