use crate::env::{Direction, Vec2D};
use crate::game::Board;
use crate::util::argmin;

use super::Config;

/// A possible next head position and the move leading there.
pub type Candidate = (Direction, Vec2D);

/// What the snake is chasing this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Food,
    Tail,
}

/// The four cells around the head in up, down, left, right order.
pub fn candidates(head: Vec2D) -> [Candidate; 4] {
    [
        (Direction::Up, head.apply(Direction::Up)),
        (Direction::Down, head.apply(Direction::Down)),
        (Direction::Left, head.apply(Direction::Left)),
        (Direction::Right, head.apply(Direction::Right)),
    ]
}

/// Moves that do not immediately run into a wall or a body.
pub fn safe_moves(board: &Board) -> Vec<Candidate> {
    candidates(board.you.head())
        .into_iter()
        .filter(|&(_, p)| board.has(p) && !board.is_occupied(p))
        .collect()
}

/// Drops moves an opponent head could also reach.
/// Returns the input if nothing would be left.
pub fn avoid_preoccupied(board: &Board, moves: Vec<Candidate>) -> Vec<Candidate> {
    let unchallenged: Vec<Candidate> = moves
        .iter()
        .copied()
        .filter(|&(_, p)| !board.is_preoccupied(p))
        .collect();
    if unchallenged.is_empty() {
        moves
    } else {
        unchallenged
    }
}

pub fn select_mode(board: &Board, config: &Config) -> Mode {
    let you = &board.you;
    let hungry = you.health < config.hungry_health
        || you.len() < config.min_length
        || you.len() % 2 != 0;
    if hungry && !board.food.is_empty() {
        Mode::Food
    } else {
        Mode::Tail
    }
}

/// The move that brings the head closest to `target`.
pub fn chase(moves: &[Candidate], target: Vec2D) -> Option<Direction> {
    argmin(moves.iter().map(|&(_, p)| p.euclidean(target))).map(|i| moves[i].0)
}

pub fn chase_food(board: &Board, moves: &[Candidate]) -> Option<Direction> {
    let food = board.closest_food(board.you.head())?;
    chase(moves, food.location())
}

pub fn chase_tail(board: &Board, moves: &[Candidate]) -> Option<Direction> {
    chase(moves, board.you.tail())
}

/// Greedy choice for this turn, `None` if the snake is boxed in.
pub fn next_move(board: &Board, config: &Config) -> Option<Direction> {
    let mut moves = safe_moves(board);
    if config.avoid_preoccupied {
        moves = avoid_preoccupied(board, moves);
    }

    match select_mode(board, config) {
        Mode::Food => chase_food(board, &moves),
        Mode::Tail => chase_tail(board, &moves),
    }
}
