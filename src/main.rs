use microchess::agents::*;
use microchess::chess_errors::*;
use microchess::game::*;
use microchess::pieces::Color;
use std::env;
use std::process;

// ---------------------------------------------
// Main
// ---------------------------------------------
//
// Usage: microchess [depth] [white|black]
//
// The first argument is the search depth of the computer (1-6, default 3),
// the second the color the human plays (default white).

fn play<A1: Agent, A2: Agent>(mut game: Game<A1, A2>) -> ChessResult<()> {
    let status = game.play()?;
    println!("{}", game.state());
    if let Some(last) = game.state().move_history().last() {
        println!("Last move: {}", last);
    }
    println!("Game over: {}", status);
    Ok(())
}

fn run() -> ChessResult<()> {
    let mut args = env::args().skip(1);

    let depth = match args.next() {
        Some(arg) => arg
            .parse::<u32>()
            .map_err(|_| ChessError::Parse(format!("depth {:?}", arg)))?,
        None => DEFAULT_DEPTH,
    };
    let settings = SearchSettings::new(depth)?;
    let human_color = match args.next() {
        Some(arg) => arg.parse::<Color>()?,
        None => Color::White,
    };

    let human = HumanAgent::new(settings);
    let computer = SearchAgent::new(settings);
    println!(
        "Microchess, you play {} against search depth {}",
        human_color,
        settings.depth()
    );

    match human_color {
        Color::White => play(Game::new(human, computer)),
        Color::Black => play(Game::new(computer, human)),
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        process::exit(1);
    }
}
