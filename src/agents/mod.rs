use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

mod greedy;
pub use greedy::*;

use crate::env::{Direction, GameRequest, MoveResponse};
use crate::game::Board;

/// Configuration of the greedy food and tail chasing agent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Below this health the snake looks for food.
    hungry_health: u8,
    /// Below this length the snake looks for food.
    min_length: usize,
    /// Avoid cells that enemy heads can reach next turn.
    avoid_preoccupied: bool,
    /// Move if there is no safe option.
    fallback: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hungry_health: 17,
            min_length: 4,
            avoid_preoccupied: true,
            fallback: Direction::Up,
        }
    }
}

impl FromStr for Config {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Stateless agent that decides every turn from scratch.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    pub config: Config,
}

impl Agent {
    pub fn new(config: Config) -> Agent {
        Agent { config }
    }

    /// Decides the next move, falling back if the board has no safe option.
    pub fn decide(&self, board: &Board) -> Direction {
        match next_move(board, &self.config) {
            Some(dir) => dir,
            None => {
                warn!("no safe move, falling back to {:?}", self.config.fallback);
                self.config.fallback
            }
        }
    }

    /// Always responds with a move, even for inconsistent requests.
    pub fn step(&self, request: &GameRequest) -> MoveResponse {
        match Board::from_request(request) {
            Ok(board) => {
                debug!("{:?}", board);
                MoveResponse::new(self.decide(&board))
            }
            Err(e) => {
                warn!("invalid request for game {}: {}", request.game.id, e);
                MoveResponse::new(self.config.fallback)
            }
        }
    }
}
