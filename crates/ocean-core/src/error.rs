//! Error types for the simulation.

use crate::{AgentId, Position};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Position {position} is outside a {size}x{size} grid")]
    OutOfBounds { position: Position, size: i32 },

    #[error("No empty cell left on a {size}x{size} grid")]
    GridFull { size: i32 },

    #[error("Cell {position} is already occupied by agent {occupant}")]
    CellOccupied { position: Position, occupant: AgentId },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
