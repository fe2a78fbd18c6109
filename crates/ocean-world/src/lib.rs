//! World simulation engine.
//!
//! This module implements the bounded 2D grid where predators, prey and
//! barriers live, and the tick scheduler that gives every living agent
//! exactly one turn per tick.

pub mod agent;
pub mod behavior;
pub mod grid;
pub mod random;
pub mod render;
pub mod world;

pub use agent::Agent;
pub use behavior::Turn;
pub use grid::Grid;
pub use random::Randomness;
pub use render::{Frame, Renderer, TextRenderer};
pub use world::{Placement, RunSummary, SpawnKind, TickSummary, World, WorldState};
