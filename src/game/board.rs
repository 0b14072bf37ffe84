use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::iter;

use owo_colors::{OwoColorize, Style};

use super::{Error, Result, Snake};
use crate::env::{Direction, GameRequest, Vec2D};
use crate::util::argmin;

/// Max number of opponents considered for a turn.
pub const MAX_OPPONENTS: usize = 3;
/// Snakes with this name are test placeholders and ignored.
pub const PLACEHOLDER_NAME: &str = "__placeholder__";
/// Largest supported width and height.
pub const MAX_BOARD_SIZE: usize = 255;

fn within(p: Vec2D, width: usize, height: usize) -> bool {
    0 <= p.x && (p.x as usize) < width && 0 <= p.y && (p.y as usize) < height
}

fn check_size(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_BOARD_SIZE || height > MAX_BOARD_SIZE {
        return Err(Error::InvalidBoard { width, height });
    }
    Ok(())
}

fn check_points<'a>(
    width: usize,
    height: usize,
    points: impl IntoIterator<Item = &'a Vec2D>,
) -> Result<()> {
    match points.into_iter().find(|&&p| !within(p, width, height)) {
        Some(p) => Err(Error::OutOfBounds { x: p.x, y: p.y }),
        None => Ok(()),
    }
}

/// A consumable on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Food(Vec2D);

impl Food {
    pub fn new(p: Vec2D) -> Food {
        Food(p)
    }

    pub fn location(&self) -> Vec2D {
        self.0
    }
}

/// Spatial model of a single turn.
#[derive(Clone)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub you: Snake,
    pub opponents: Vec<Snake>,
    pub food: Vec<Food>,
    /// Body cells that are still blocked next turn
    occupied: HashSet<Vec2D>,
    /// Cells the opponents could move into next turn
    preoccupied: HashSet<Vec2D>,
}

impl Board {
    pub fn new(
        width: usize,
        height: usize,
        you: Snake,
        opponents: Vec<Snake>,
        food: &[Vec2D],
    ) -> Result<Board> {
        check_size(width, height)?;
        let bodies = iter::once(&you).chain(&opponents).flat_map(|s| s.body());
        check_points(width, height, bodies.chain(food))?;

        // Tails move away, except the segment is also covered by another part
        let occupied = iter::once(&you)
            .chain(&opponents)
            .flat_map(|s| s.body_without_tail().iter().copied())
            .collect();

        let preoccupied = opponents
            .iter()
            .flat_map(|s| s.around_head().iter().copied())
            .collect();

        Ok(Board {
            width,
            height,
            you,
            opponents,
            food: food.iter().copied().map(Food::new).collect(),
            occupied,
            preoccupied,
        })
    }

    /// Loads the board from the provided request.
    pub fn from_request(request: &GameRequest) -> Result<Board> {
        let (width, height) = (request.board.width, request.board.height);
        check_size(width, height)?;
        let bodies = iter::once(&request.you)
            .chain(&request.board.snakes)
            .flat_map(|s| &s.body);
        check_points(width, height, bodies.chain(&request.board.food))?;

        let you = Snake::from_data(&request.you)?;

        let mut opponents = Vec::with_capacity(request.board.snakes.len());
        for data in &request.board.snakes {
            if data.same_snake(&request.you) || data.name == PLACEHOLDER_NAME {
                continue;
            }
            opponents.push(Snake::from_data(data)?);
        }

        // Keep the closest ones, stable for equal distances
        if opponents.len() > MAX_OPPONENTS {
            let head = you.head();
            opponents.sort_by_key(|s| {
                s.body()
                    .iter()
                    .map(|&p| (p - head).manhattan())
                    .min()
                    .unwrap_or(u64::MAX)
            });
            opponents.truncate(MAX_OPPONENTS);
        }

        Board::new(width, height, you, opponents, &request.board.food)
    }

    pub fn has(&self, p: Vec2D) -> bool {
        within(p, self.width, self.height)
    }

    pub fn is_occupied(&self, p: Vec2D) -> bool {
        self.occupied.contains(&p)
    }

    pub fn is_preoccupied(&self, p: Vec2D) -> bool {
        self.preoccupied.contains(&p)
    }

    pub fn occupied(&self) -> &HashSet<Vec2D> {
        &self.occupied
    }

    pub fn preoccupied(&self) -> &HashSet<Vec2D> {
        &self.preoccupied
    }

    /// Food with the smallest straight-line distance, the first one on ties.
    pub fn closest_food(&self, from: Vec2D) -> Option<Food> {
        argmin(self.food.iter().map(|f| from.euclidean(f.location()))).map(|i| self.food[i])
    }

    /// Parses textual human readable board representation used in test.
    ///
    /// `0` is the head of the player, `1`-`9` are opponent heads,
    /// `^ > v <` point to the next segment towards the head and `o` is food.
    pub fn parse(txt: &str) -> Option<Board> {
        let txt = txt.trim();

        #[derive(PartialEq)]
        enum RawCell {
            Free,
            Food,
            Head(u8),
            Body(Direction),
        }

        let raw_cells: Vec<RawCell> = txt
            .lines()
            .rev()
            .flat_map(|l| {
                l.split_whitespace().flat_map(|s| {
                    s.chars().next().map(|c| match c {
                        'o' => RawCell::Food,
                        '0'..='9' => RawCell::Head(c as u8 - b'0'),
                        '^' => RawCell::Body(Direction::Up),
                        '>' => RawCell::Body(Direction::Right),
                        'v' => RawCell::Body(Direction::Down),
                        '<' => RawCell::Body(Direction::Left),
                        _ => RawCell::Free,
                    })
                })
            })
            .collect();
        let height = txt.lines().count();

        if height == 0 || raw_cells.len() % height != 0 {
            return None;
        }
        let width = raw_cells.len() / height;
        let to_point = |i: usize| Vec2D::new((i % width) as _, (i / width) as _);

        let food: Vec<Vec2D> = raw_cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == RawCell::Food)
            .map(|(i, _)| to_point(i))
            .collect();

        let mut snakes = Vec::new();
        for i in 0..=9 {
            let Some(start) = raw_cells.iter().position(|c| *c == RawCell::Head(i)) else {
                break;
            };
            let mut p = to_point(start);
            let mut body = vec![p];
            loop {
                let next = Direction::iter().find_map(|d| {
                    let next = p.apply(d);
                    (within(next, width, height)
                        && !body.contains(&next)
                        && raw_cells[next.x as usize + next.y as usize * width]
                            == RawCell::Body(d.invert()))
                    .then_some(next)
                });
                let Some(next) = next else {
                    break;
                };
                p = next;
                body.push(p);
            }
            while body.len() < 3 {
                body.push(p);
            }
            snakes.push(Snake::new(100, body).ok()?);
        }

        if snakes.is_empty() {
            return None;
        }
        let you = snakes.remove(0);
        Board::new(width, height, you, snakes, &food).ok()
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum FmtCell {
            Free,
            Preoccupied,
            Food,
            Body(Direction, u8),
            Head(u8),
        }
        fn id_color(id: u8) -> Style {
            match id {
                0 => Style::new().green(),
                1 => Style::new().yellow(),
                2 => Style::new().blue(),
                3 => Style::new().magenta(),
                _ => Style::new().cyan(),
            }
        }
        impl Debug for FmtCell {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    FmtCell::Free => write!(f, "."),
                    FmtCell::Preoccupied => write!(f, "{}", "+".bright_black()),
                    FmtCell::Food => write!(f, "{}", "o".red()),
                    FmtCell::Body(dir, id) => match dir {
                        Direction::Up => write!(f, "{}", "^".style(id_color(*id))),
                        Direction::Right => write!(f, "{}", ">".style(id_color(*id))),
                        Direction::Down => write!(f, "{}", "v".style(id_color(*id))),
                        Direction::Left => write!(f, "{}", "<".style(id_color(*id))),
                    },
                    FmtCell::Head(id) => write!(f, "{}", id.style(id_color(*id))),
                }
            }
        }

        let mut cells = vec![FmtCell::Free; self.width * self.height];
        let index = |p: Vec2D| p.x as usize + p.y as usize * self.width;

        for &p in &self.preoccupied {
            if self.has(p) {
                cells[index(p)] = FmtCell::Preoccupied;
            }
        }
        for food in &self.food {
            if self.has(food.location()) {
                cells[index(food.location())] = FmtCell::Food;
            }
        }

        for (id, snake) in iter::once(&self.you).chain(&self.opponents).enumerate() {
            let id = id as u8;
            for pair in snake.body().windows(2).rev() {
                let (next, p) = (pair[0], pair[1]);
                if let Some(dir) = Direction::iter().find(|&d| p.apply(d) == next) {
                    if self.has(p) {
                        cells[index(p)] = FmtCell::Body(dir, id);
                    }
                }
            }
            if self.has(snake.head()) {
                cells[index(snake.head())] = FmtCell::Head(id);
            }
        }

        writeln!(f, "Board {{")?;
        for y in (0..self.height).rev() {
            write!(f, "  ")?;
            for x in 0..self.width {
                write!(f, "{:?} ", cells[x + y * self.width])?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "  you: health={} length={}",
            self.you.health,
            self.you.len()
        )?;
        for (i, snake) in self.opponents.iter().enumerate() {
            writeln!(
                f,
                "  {}: health={} length={}",
                i + 1,
                snake.health,
                snake.len()
            )?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::env::SnakeData;

    fn request(json: &str) -> GameRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn board_parse() {
        let board = Board::parse(
            r#"
            . . . . . . . . . . .
            . . . . . . . . o . .
            . . . . . . . . . . .
            . . . . . . . . . . .
            . . . . . 0 < < . . .
            . . . . . . . ^ . . .
            . . . . . > > ^ . . .
            . . . . . . . . . . .
            . . . . . . . . . . .
            v . . . . . . . . . .
            1 . . . . . . . . . ."#,
        )
        .unwrap();
        println!("{:?}", board);

        assert_eq!(board.width, 11);
        assert_eq!(board.height, 11);
        assert_eq!(board.food, vec![Food::new(Vec2D::new(8, 9))]);
        assert_eq!(board.opponents.len(), 1);

        assert_eq!(
            board.you.body(),
            &[
                Vec2D::new(5, 6),
                Vec2D::new(6, 6),
                Vec2D::new(7, 6),
                Vec2D::new(7, 5),
                Vec2D::new(7, 4),
                Vec2D::new(6, 4),
                Vec2D::new(5, 4),
            ]
        );
        assert_eq!(
            board.opponents[0].body(),
            &[Vec2D::new(0, 0), Vec2D::new(0, 1), Vec2D::new(0, 1)]
        );

        assert!(board.is_occupied(Vec2D::new(6, 4)));
        assert!(!board.is_occupied(Vec2D::new(5, 4)));
        // stacked tail stays occupied
        assert!(board.is_occupied(Vec2D::new(0, 1)));
    }

    #[test]
    fn occupied_without_tails() {
        let board = Board::from_request(&request(
            r#"{"you":{"id":"a","health":90,"length":3,"body":[{"x":2,"y":2},{"x":2,"y":1},{"x":2,"y":0}]},
                "board":{"height":11,"width":11,"food":[],"snakes":[
                    {"id":"a","health":90,"length":3,"body":[{"x":2,"y":2},{"x":2,"y":1},{"x":2,"y":0}]},
                    {"id":"b","health":90,"length":3,"body":[{"x":6,"y":6},{"x":6,"y":5},{"x":6,"y":4}]}]}}"#,
        ))
        .unwrap();

        assert_eq!(board.opponents.len(), 1);
        assert_eq!(board.occupied().len(), 4);
        assert!(board.is_occupied(Vec2D::new(2, 2)));
        assert!(board.is_occupied(Vec2D::new(2, 1)));
        assert!(!board.is_occupied(Vec2D::new(2, 0)));
        assert!(board.is_occupied(Vec2D::new(6, 6)));
        assert!(board.is_occupied(Vec2D::new(6, 5)));
        assert!(!board.is_occupied(Vec2D::new(6, 4)));
    }

    #[test]
    fn tail_covered_by_other_snake() {
        // The tail of "a" lies below the neck of "b"
        let you = Snake::new(90, vec![Vec2D::new(1, 3), Vec2D::new(1, 2), Vec2D::new(2, 2)])
            .unwrap();
        let other = Snake::new(90, vec![Vec2D::new(3, 2), Vec2D::new(2, 2), Vec2D::new(2, 1)])
            .unwrap();
        let board = Board::new(11, 11, you, vec![other], &[]).unwrap();
        assert!(board.is_occupied(Vec2D::new(2, 2)));
        assert!(!board.is_occupied(Vec2D::new(2, 1)));

        // Two tails on the same cell that nobody else covers
        let you = Snake::new(90, vec![Vec2D::new(0, 1), Vec2D::new(1, 1)]).unwrap();
        let other = Snake::new(90, vec![Vec2D::new(2, 2), Vec2D::new(1, 2), Vec2D::new(1, 1)])
            .unwrap();
        let board = Board::new(11, 11, you, vec![other], &[]).unwrap();
        assert!(!board.is_occupied(Vec2D::new(1, 1)));
    }

    #[test]
    fn preoccupied_opponents_only() {
        let board = Board::parse(
            r#"
            . . . . .
            . . 1 . .
            . . ^ . .
            . . . . .
            0 < < . ."#,
        )
        .unwrap();

        let expected: HashSet<Vec2D> = [
            Vec2D::new(2, 4),
            Vec2D::new(2, 2),
            Vec2D::new(1, 3),
            Vec2D::new(3, 3),
        ]
        .into_iter()
        .collect();
        assert_eq!(board.preoccupied(), &expected);
        assert!(!board.is_preoccupied(Vec2D::new(0, 1)));
    }

    #[test]
    fn skip_you_and_placeholders() {
        let board = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":2,"y":2}]},
                "board":{"food":[{"x":1,"y":1},{"x":3,"y":3}],"snakes":[
                    {"name":"__placeholder__","health":0,"length":1,"body":[{"x":9,"y":9}]},
                    {"name":"me","health":90,"length":1,"body":[{"x":2,"y":2}]},
                    {"name":"other","health":90,"length":1,"body":[{"x":5,"y":5}]}]}}"#,
        ))
        .unwrap();
        assert_eq!(board.opponents.len(), 1);
        assert_eq!(board.opponents[0].head(), Vec2D::new(5, 5));
        assert_eq!(
            board.food,
            vec![Food::new(Vec2D::new(1, 1)), Food::new(Vec2D::new(3, 3))]
        );
    }

    #[test]
    fn closest_opponents() {
        let you = SnakeData::new(90, vec![Vec2D::new(0, 0)]);
        let mut snakes = vec![you.clone()];
        for x in [9, 3, 7, 1, 5] {
            let mut data = SnakeData::new(90, vec![Vec2D::new(x, 10), Vec2D::new(x, 0)]);
            data.name = format!("snake{}", x);
            snakes.push(data);
        }
        let mut request = request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":0,"y":0}]},
                "board":{"food":[],"snakes":[]}}"#,
        );
        request.board.snakes = snakes;

        let board = Board::from_request(&request).unwrap();
        let heads: Vec<Vec2D> = board.opponents.iter().map(|s| s.head()).collect();
        assert_eq!(
            heads,
            vec![Vec2D::new(1, 10), Vec2D::new(3, 10), Vec2D::new(5, 10)]
        );
    }

    #[test]
    fn closest_food() {
        let board = Board::parse(
            r#"
            . . o . .
            . . . . .
            o . 0 . o
            . . ^ . .
            . . ^ . ."#,
        )
        .unwrap();
        // Equal distance, first in order
        assert_eq!(
            board.closest_food(board.you.head()),
            Some(Food::new(Vec2D::new(0, 2)))
        );
        assert_eq!(
            board.closest_food(Vec2D::new(2, 4)),
            Some(Food::new(Vec2D::new(2, 4)))
        );
    }

    #[test]
    fn invalid_requests() {
        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":4,"body":[{"x":2,"y":2},{"x":2,"y":1}]},
                "board":{"food":[],"snakes":[]}}"#,
        ));
        assert_eq!(
            result.err(),
            Some(Error::LengthMismatch { length: 4, body: 2 })
        );

        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":2,"y":2}]},
                "board":{"food":[],"snakes":[{"id":"x","health":90,"length":0,"body":[]}]}}"#,
        ));
        assert_eq!(result.err(), Some(Error::EmptyBody));

        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":0,"y":0}]},
                "board":{"width":0,"height":11,"food":[],"snakes":[]}}"#,
        ));
        assert_eq!(
            result.err(),
            Some(Error::InvalidBoard {
                width: 0,
                height: 11
            })
        );

        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":0,"y":0}]},
                "board":{"width":32767,"height":11,"food":[],"snakes":[]}}"#,
        ));
        assert_eq!(
            result.err(),
            Some(Error::InvalidBoard {
                width: 32767,
                height: 11
            })
        );
    }

    #[test]
    fn off_board_points() {
        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":32767,"y":5}]},
                "board":{"food":[],"snakes":[]}}"#,
        ));
        assert_eq!(result.err(), Some(Error::OutOfBounds { x: 32767, y: 5 }));

        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":0,"y":0}]},
                "board":{"food":[{"x":-32768,"y":0}],"snakes":[]}}"#,
        ));
        assert_eq!(result.err(), Some(Error::OutOfBounds { x: -32768, y: 0 }));

        let result = Board::from_request(&request(
            r#"{"you":{"health":90,"length":1,"body":[{"x":0,"y":0}]},
                "board":{"food":[],"snakes":[
                    {"id":"x","health":90,"length":2,"body":[{"x":3,"y":11},{"x":3,"y":10}]}]}}"#,
        ));
        assert_eq!(result.err(), Some(Error::OutOfBounds { x: 3, y: 11 }));

        let you = Snake::new(90, vec![Vec2D::new(0, 0)]).unwrap();
        let result = Board::new(5, 5, you, Vec::new(), &[Vec2D::new(5, 0)]);
        assert_eq!(result.err(), Some(Error::OutOfBounds { x: 5, y: 0 }));
    }
}
