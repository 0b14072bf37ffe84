use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

pub const API_VERSION: &str = "1";
/// Board size used if the request does not specify one.
pub const DEFAULT_BOARD_SIZE: usize = 11;

#[derive(Serialize, Deserialize, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Vec2D {
    pub x: i16,
    pub y: i16,
}

impl Vec2D {
    pub fn new(x: i16, y: i16) -> Vec2D {
        Vec2D { x, y }
    }

    pub fn apply(self, d: Direction) -> Vec2D {
        self + d.into()
    }

    pub fn manhattan(&self) -> u64 {
        self.x.unsigned_abs() as u64 + self.y.unsigned_abs() as u64
    }

    /// Straight-line distance between two points.
    pub fn euclidean(self, other: Vec2D) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(i16, i16)> for Vec2D {
    fn from(val: (i16, i16)) -> Self {
        Vec2D::new(val.0, val.1)
    }
}

impl From<Direction> for Vec2D {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Up => Vec2D::new(0, 1),
            Direction::Down => Vec2D::new(0, -1),
            Direction::Left => Vec2D::new(-1, 0),
            Direction::Right => Vec2D::new(1, 0),
        }
    }
}

impl Add for Vec2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

impl Sub for Vec2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in candidate order: up, down, left, right.
    pub fn iter() -> impl Iterator<Item = Direction> {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .iter()
        .copied()
    }

    pub fn invert(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GameData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ruleset: Ruleset,
    #[serde(default)]
    pub timeout: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Ruleset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SnakeData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: u8,
    pub length: usize,
    /// head to tail
    pub body: Vec<Vec2D>,
    #[serde(default)]
    pub shout: String,
}

impl SnakeData {
    pub fn new(health: u8, body: Vec<Vec2D>) -> SnakeData {
        SnakeData {
            id: String::new(),
            name: String::new(),
            health,
            length: body.len(),
            body,
            shout: String::new(),
        }
    }

    /// Whether both records describe the same snake.
    /// Ids are compared if both are present, bodies otherwise.
    pub fn same_snake(&self, other: &SnakeData) -> bool {
        if !self.id.is_empty() && !other.id.is_empty() {
            self.id == other.id
        } else {
            self.body == other.body
        }
    }
}

fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BoardData {
    #[serde(default = "default_board_size")]
    pub height: usize,
    #[serde(default = "default_board_size")]
    pub width: usize,
    pub food: Vec<Vec2D>,
    #[serde(default)]
    pub hazards: Vec<Vec2D>,
    pub snakes: Vec<SnakeData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameRequest {
    #[serde(default)]
    pub game: GameData,
    #[serde(default)]
    pub turn: usize,
    pub board: BoardData,
    pub you: SnakeData,
}

#[derive(Serialize, Debug)]
pub struct IndexResponse {
    pub apiversion: &'static str,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: &'static str,
}

impl IndexResponse {
    pub fn new(
        apiversion: &'static str,
        author: String,
        color: String,
        head: String,
        tail: String,
        version: &'static str,
    ) -> IndexResponse {
        IndexResponse {
            apiversion,
            author,
            color,
            head,
            tail,
            version,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct MoveResponse {
    pub r#move: Direction,
    pub shout: String,
}

impl MoveResponse {
    pub fn new(r#move: Direction) -> MoveResponse {
        MoveResponse {
            r#move,
            shout: String::new(),
        }
    }
}
