use std::fmt;

mod snake;
pub use snake::*;
mod board;
pub use board::*;

/// Inconsistent data in an otherwise well-formed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The announced length differs from the number of body segments.
    LengthMismatch { length: usize, body: usize },
    EmptyBody,
    InvalidBoard { width: usize, height: usize },
    /// A body segment or food lies outside of the board.
    OutOfBounds { x: i16, y: i16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LengthMismatch { length, body } => write!(
                f,
                "snake length {} does not match its {} body segments",
                length, body
            ),
            Error::EmptyBody => write!(f, "snake without body"),
            Error::InvalidBoard { width, height } => {
                write!(f, "invalid board size {}x{}", width, height)
            }
            Error::OutOfBounds { x, y } => write!(f, "point ({}, {}) is off the board", x, y),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
