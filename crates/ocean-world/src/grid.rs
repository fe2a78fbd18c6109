//! Bounded square grid of cell occupancy.

use ocean_core::{AgentId, Error, Offset, Position, Result};
use serde::{Deserialize, Serialize};

/// An `N x N` grid without wraparound. Cells hold the identity of the agent
/// standing on them; the agents themselves live in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: i32,
    cells: Vec<Option<AgentId>>,
}

impl Grid {
    pub fn new(size: i32) -> Self {
        let side = size.max(0) as usize;
        Self {
            size,
            cells: vec![None; side * side],
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.size && pos.y >= 0 && pos.y < self.size
    }

    /// Identity stored at a cell, `None` when the cell is empty
    pub fn occupant_at(&self, pos: Position) -> Result<Option<AgentId>> {
        let index = self.checked_index(pos)?;
        Ok(self.cells[index])
    }

    pub fn is_empty_at(&self, pos: Position) -> Result<bool> {
        Ok(self.occupant_at(pos)?.is_none())
    }

    /// Set a cell's occupant. The caller guarantees the cell is empty or is
    /// being vacated by the same agent.
    pub fn place(&mut self, id: AgentId, pos: Position) -> Result<()> {
        let index = self.checked_index(pos)?;
        self.cells[index] = Some(id);
        Ok(())
    }

    pub fn clear(&mut self, pos: Position) -> Result<()> {
        let index = self.checked_index(pos)?;
        self.cells[index] = None;
        Ok(())
    }

    /// In-bounds orthogonal neighbours in right, left, up, down order
    pub fn neighbors4(&self, pos: Position) -> Vec<Position> {
        Offset::all()
            .into_iter()
            .map(|offset| pos.offset(offset))
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    /// Orthogonal neighbours that nobody occupies
    pub fn empty_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors4(pos)
            .into_iter()
            .filter(|neighbor| self.cells[self.pos_to_index(*neighbor)].is_none())
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get position from index
    pub fn index_to_pos(&self, index: usize) -> Position {
        let x = (index as i32) % self.size;
        let y = (index as i32) / self.size;
        Position::new(x, y)
    }

    /// Iterator over all empty positions
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter()
            .filter(|(_, occupant)| occupant.is_none())
            .map(|(pos, _)| pos)
    }

    /// Iterator over all cells with positions
    pub fn iter(&self) -> impl Iterator<Item = (Position, Option<AgentId>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (self.index_to_pos(i), *cell))
    }

    fn checked_index(&self, pos: Position) -> Result<usize> {
        if !self.contains(pos) {
            return Err(Error::OutOfBounds {
                position: pos,
                size: self.size,
            });
        }
        Ok(self.pos_to_index(pos))
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        (pos.y * self.size + pos.x) as usize
    }
}
