#[macro_use]
extern crate impl_ops;

#[macro_use]
pub mod utils;

pub mod agents;
pub mod algorithms;
pub mod attacks;
pub mod boards;
pub mod chess_errors;
pub mod evaluation;
pub mod game;
pub mod game_state;
pub mod moves;
pub mod pieces;
pub mod positions;
