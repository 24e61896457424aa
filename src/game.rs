use crate::chess_errors::*;
use crate::game_state::*;
use crate::moves::*;
use crate::pieces::*;
use log::{debug, info};

/// An agent is an object that can play chess by choosing moves appropriate to a
/// current game state. Returning `None` resigns the game.
pub trait Agent {
    fn play_move(&mut self, state: &GameState) -> Option<Move>;
}

/// Two agents taking turns on one `GameState` until the game is decided.
pub struct Game<A1: Agent, A2: Agent> {
    white: A1,
    black: A2,
    state: GameState,
}

impl<A1: Agent, A2: Agent> Game<A1, A2> {
    pub fn new(white: A1, black: A2) -> Game<A1, A2> {
        Game::from_state(white, black, GameState::standard_setup())
    }

    pub fn from_state(white: A1, black: A2, state: GameState) -> Game<A1, A2> {
        Game {
            white,
            black,
            state,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Asks the side to move for a move and plays it. An agent answering with an
    /// illegal move is an error; the position stays as it was.
    pub fn play_turn(&mut self) -> ChessResult<GameStatus> {
        let color = self.state.current_player();
        let choice = match color {
            Color::White => self.white.play_move(&self.state),
            Color::Black => self.black.play_move(&self.state),
        };

        match choice {
            Some(mv) => {
                if !self.state.execute_move(mv) {
                    return Err(ChessError::Other(format!(
                        "{} tried the illegal move {}",
                        color, mv
                    )));
                }
                if let Some(record) = self.state.last_move() {
                    debug!("{} played {}", color, record);
                }
            }
            None => self.state.resign(),
        }
        Ok(self.state.status())
    }

    /// Plays until checkmate, stalemate or resignation.
    pub fn play(&mut self) -> ChessResult<GameStatus> {
        info!("Starting game, {} to move", self.state.current_player());
        let mut status = self.state.status();
        while !status.is_terminal() {
            status = self.play_turn()?;
        }
        self.finish(status);
        Ok(status)
    }

    /// Like `play`, but stops after `max_plies` half-moves even if the game is
    /// still running.
    pub fn play_for(&mut self, max_plies: usize) -> ChessResult<GameStatus> {
        let mut status = self.state.status();
        for _ in 0..max_plies {
            if status.is_terminal() {
                break;
            }
            status = self.play_turn()?;
        }
        if status.is_terminal() {
            self.finish(status);
        }
        Ok(status)
    }

    fn finish(&self, status: GameStatus) {
        info!(
            "Game over after {} plies: {}, {} to move",
            self.state.move_history().len(),
            status,
            self.state.current_player()
        );
    }
}
