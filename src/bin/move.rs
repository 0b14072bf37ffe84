use clap::Parser;
use log::info;

use snake_chaser::agents::*;
use snake_chaser::env::GameRequest;
use snake_chaser::game::Board;
use snake_chaser::logging;

#[derive(Parser)]
#[command(name = "snake-chaser move", about = "Decide a single move for a request.")]
struct Opts {
    /// Agent configuration as json.
    #[arg(long, default_value_t)]
    config: Config,
    /// JSON Game request.
    #[arg(value_parser = parse_request)]
    request: GameRequest,
}

fn parse_request(s: &str) -> Result<GameRequest, serde_json::Error> {
    serde_json::from_str(s)
}

fn main() {
    logging();

    let Opts { config, request } = Opts::parse();

    match Board::from_request(&request) {
        Ok(board) => {
            info!("{:?}", board);
            let moves: Vec<_> = safe_moves(&board).into_iter().map(|(d, _)| d).collect();
            info!("safe: {:?}, mode: {:?}", moves, select_mode(&board, &config));
        }
        Err(e) => info!("invalid request: {}", e),
    }

    let step = Agent::new(config).step(&request);
    info!("Step: {:?}", step);
}
