//! Text rendering of the grid.

use ocean_core::{AgentKind, Position, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Symbol for a cell nobody occupies
const EMPTY_SYMBOL: char = '\'';

/// Occupant kinds of every cell at the end of a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub size: i32,
    /// Row-major, `y = 0` first
    cells: Vec<Option<AgentKind>>,
}

impl Frame {
    pub fn new(tick: u64, size: i32, cells: Vec<Option<AgentKind>>) -> Self {
        Self { tick, size, cells }
    }

    pub fn get(&self, pos: Position) -> Option<AgentKind> {
        if pos.x < 0 || pos.x >= self.size || pos.y < 0 || pos.y >= self.size {
            return None;
        }
        self.cells
            .get((pos.y * self.size + pos.x) as usize)
            .copied()
            .flatten()
    }

    pub fn count(&self, kind: AgentKind) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(kind)).count()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.size <= 0 {
            return Ok(());
        }
        for row in self.cells.chunks(self.size as usize) {
            let line: Vec<String> = row
                .iter()
                .map(|cell| cell.map_or(EMPTY_SYMBOL, |kind| kind.symbol()).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Receives a frame every few ticks while the world runs
pub trait Renderer {
    fn render(&mut self, frame: &Frame) -> Result<()>;
}

/// Writes frames as text, each followed by a blank line
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        write!(self.out, "{}", frame)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
