use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use log::info;
use snake_chaser::agents::{Agent, Config};
use snake_chaser::env::{GameRequest, IndexResponse, API_VERSION};
use snake_chaser::logging;

use warp::Filter;

pub const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runtime server configuration.
struct State {
    author: String,
    color: String,
    head: String,
    tail: String,
    agent: Agent,
}

#[derive(Debug, Parser)]
#[command(name = "snake-chaser server", about = "Greedy food and tail chasing snake.")]
struct Opt {
    /// IP and Port of the webserver.
    /// **Note**: Use the IP Address of your device if you want to access it from another device. (`127.0.0.1` or `localhost` is private to your computer)
    #[arg(long, default_value = "0.0.0.0:8080")]
    host: SocketAddr,
    /// Overrides the port of the host address.
    #[arg(long, env = "PORT")]
    port: Option<u16>,
    /// Battlesnake username.
    #[arg(long, default_value = "snake-chaser")]
    author: String,
    /// Color in hex format.
    #[arg(long, default_value = "#00FF00")]
    color: String,
    /// Head @see https://docs.battlesnake.com/references/personalization
    #[arg(long, default_value = "default")]
    head: String,
    /// Tail @see https://docs.battlesnake.com/references/personalization
    #[arg(long, default_value = "default")]
    tail: String,
    /// Agent configuration as json.
    #[arg(long, default_value_t)]
    config: Config,
}

#[tokio::main]
async fn main() {
    logging();

    let Opt {
        mut host,
        port,
        author,
        color,
        head,
        tail,
        config,
    } = Opt::parse();

    if let Some(port) = port {
        host.set_port(port);
    }
    info!("listening on {} with {}", host, config);

    let state = Arc::new(State {
        author,
        color,
        head,
        tail,
        agent: Agent::new(config),
    });

    let index = warp::get()
        .and(warp::path::end())
        .and(with_state(state.clone()))
        .map(|state: Arc<State>| {
            info!("index");
            warp::reply::json(&IndexResponse::new(
                API_VERSION,
                state.author.clone(),
                state.color.clone(),
                state.head.clone(),
                state.tail.clone(),
                PACKAGE_VERSION,
            ))
        });

    let start = warp::path("start")
        .and(warp::post())
        .and(warp::body::json::<GameRequest>())
        .map(|request: GameRequest| {
            info!(
                "start {} game {},{}",
                request.game.ruleset.name, request.game.id, request.you.id
            );
            warp::reply()
        });

    let r#move = warp::path("move")
        .and(with_state(state))
        .and(warp::post())
        .and(warp::body::json::<GameRequest>())
        .and_then(step);

    let end = warp::path("end")
        .and(warp::post())
        .and(warp::body::json::<GameRequest>())
        .map(|request: GameRequest| {
            info!(
                "end {} game {},{} win={}",
                request.game.ruleset.name,
                request.game.id,
                request.you.id,
                request.you.health != 0
            );
            warp::reply()
        });

    warp::serve(index.or(start).or(r#move).or(end))
        .run(host)
        .await
}

fn with_state(
    state: Arc<State>,
) -> impl Filter<Extract = (Arc<State>,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

async fn step(state: Arc<State>, request: GameRequest) -> Result<impl warp::Reply, Infallible> {
    let timer = Instant::now();
    let next_move = state.agent.step(&request);
    info!(
        "move {:?} game {},{} turn {} in {}us",
        next_move.r#move,
        request.game.id,
        request.you.id,
        request.turn,
        timer.elapsed().as_micros()
    );

    Ok(warp::reply::json(&next_move))
}
