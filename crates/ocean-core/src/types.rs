//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an agent.
///
/// Identities are handed out in strictly increasing order starting at 1 and
/// are never reused. The value 0 is reserved and never names a real agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl AgentId {
    /// Reserved marker that bounds one tick's pass through the turn queue.
    pub const SENTINEL: AgentId = AgentId(0);

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Species of an agent. Fixed for the agent's whole life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Predator,
    Prey,
    Barrier,
}

impl AgentKind {
    pub fn all() -> [AgentKind; 3] {
        [AgentKind::Predator, AgentKind::Prey, AgentKind::Barrier]
    }

    /// Barriers never take turns.
    pub fn acts(&self) -> bool {
        !matches!(self, AgentKind::Barrier)
    }

    /// Character used by the text renderer
    pub fn symbol(&self) -> char {
        match self {
            AgentKind::Predator => '@',
            AgentKind::Prey => '%',
            AgentKind::Barrier => '#',
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Predator => "predator",
            AgentKind::Prey => "prey",
            AgentKind::Barrier => "barrier",
        };
        f.write_str(name)
    }
}

/// 2D position on the grid. `x` grows rightward, `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, offset: Offset) -> Self {
        let (dx, dy) = offset.to_delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another position
    pub fn manhattan_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal step between neighbouring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Offset {
    Right,
    Left,
    Up,
    Down,
}

impl Offset {
    pub fn to_delta(&self) -> (i32, i32) {
        match self {
            Offset::Right => (1, 0),
            Offset::Left => (-1, 0),
            Offset::Up => (0, 1),
            Offset::Down => (0, -1),
        }
    }

    /// Neighbour scan order. Random choices are made over the filtered
    /// result, so the order only matters for reproducing a seeded run.
    pub fn all() -> [Offset; 4] {
        [Offset::Right, Offset::Left, Offset::Up, Offset::Down]
    }
}
