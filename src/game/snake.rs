use super::{Error, Result};
use crate::env::{Direction, SnakeData, Vec2D};

/// Per turn representation of a snake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub health: u8,
    /// head to tail, never empty
    body: Vec<Vec2D>,
    around_head: [Vec2D; 4],
}

impl Snake {
    pub fn new(health: u8, body: Vec<Vec2D>) -> Result<Snake> {
        let head = *body.first().ok_or(Error::EmptyBody)?;
        let mut around_head = [head; 4];
        for (p, d) in around_head.iter_mut().zip(Direction::iter()) {
            *p = head.apply(d);
        }
        Ok(Snake {
            health,
            body,
            around_head,
        })
    }

    /// Validates the announced length against the body.
    pub fn from_data(data: &SnakeData) -> Result<Snake> {
        if data.length != data.body.len() {
            return Err(Error::LengthMismatch {
                length: data.length,
                body: data.body.len(),
            });
        }
        Snake::new(data.health, data.body.clone())
    }

    pub fn body(&self) -> &[Vec2D] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Vec2D {
        self.body[0]
    }

    pub fn neck(&self) -> Option<Vec2D> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Vec2D {
        self.body[self.body.len() - 1]
    }

    /// Segments that are still there after the next move.
    pub fn body_without_tail(&self) -> &[Vec2D] {
        &self.body[..self.body.len() - 1]
    }

    /// Cells next to the head in up, down, left, right order.
    /// These may lie outside of the board.
    pub fn around_head(&self) -> &[Vec2D; 4] {
        &self.around_head
    }
}
