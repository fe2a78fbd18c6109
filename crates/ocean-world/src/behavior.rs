//! Per-agent decision rules: feeding, starvation, movement and reproduction.

use crate::agent::Agent;
use crate::random::Randomness;
use crate::world::World;
use ocean_core::{AgentId, Position, Result};

/// Outcome of a single agent's turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Wandered to `to`, which may be the cell it already stood on
    Moved { to: Position },
    /// Stayed put and placed a newborn of its own kind next to it
    Reproduced { offspring: AgentId },
    /// Ate a neighbouring prey and took over its cell
    Fed { prey: AgentId, to: Position },
    /// Removed for going hungry too long
    Starved,
}

impl Turn {
    /// Agents that survive their turn go back into the queue
    pub fn survived(&self) -> bool {
        !matches!(self, Turn::Starved)
    }
}

impl<R: Randomness> World<R> {
    /// Take one turn for a living agent, given its state at the start of the
    /// turn. Barriers are never queued, so only predators and prey get here.
    pub(crate) fn act(&mut self, agent: Agent) -> Result<Turn> {
        if agent.is_predator() {
            self.predator_turn(agent)
        } else {
            self.generic_step(agent)
        }
    }

    /// Eat if hungry enough and prey is adjacent, otherwise starve or fall
    /// through to the generic step. Feeding, starving and stepping are
    /// mutually exclusive within one turn.
    fn predator_turn(&mut self, predator: Agent) -> Result<Turn> {
        let id = predator.id;

        if predator.hunger > self.lifecycle.hunger_threshold() {
            let prey_around = self.prey_around(predator.position);
            if let Some(&(prey, cell)) = self.rng.pick(&prey_around) {
                self.remove(prey)?;
                self.relocate(id, cell)?;
                if let Some(hunter) = self.agent_mut(id) {
                    hunter.feed();
                    hunter.mature();
                }
                self.log_meal(id, prey);
                return Ok(Turn::Fed { prey, to: cell });
            }
        }

        if predator.hunger > self.lifecycle.max_hunger {
            if let Some(starved) = self.remove(id)? {
                self.log_starvation(&starved);
            }
            return Ok(Turn::Starved);
        }

        if let Some(hunter) = self.agent_mut(id) {
            hunter.get_hungrier();
        }
        self.generic_step(predator)
    }

    /// Movement and reproduction shared by every kind that acts. A fertile
    /// agent with room next to it gives birth and stays put; otherwise it
    /// moves to a random empty neighbour or stays where it is.
    pub(crate) fn generic_step(&mut self, agent: Agent) -> Result<Turn> {
        let Agent {
            id,
            kind,
            position,
            fertility,
            ..
        } = agent;

        let mut moves = self.grid().empty_neighbors(position);
        if fertility >= self.lifecycle.pregnant_time {
            if let Some(&birthplace) = self.rng.pick(&moves) {
                let offspring = self.spawn(kind, birthplace, false)?;
                if let Some(parent) = self.agent_mut(id) {
                    parent.after_birth();
                }
                self.log_birth(id, offspring, kind);
                return Ok(Turn::Reproduced { offspring });
            }
        }

        moves.push(position);
        let target = self.rng.pick(&moves).copied().unwrap_or(position);
        self.relocate(id, target)?;
        if let Some(agent) = self.agent_mut(id) {
            agent.mature();
        }

        Ok(Turn::Moved { to: target })
    }

    /// Living prey on orthogonally adjacent cells, with the cell each occupies
    fn prey_around(&self, pos: Position) -> Vec<(AgentId, Position)> {
        self.grid()
            .neighbors4(pos)
            .into_iter()
            .filter_map(|cell| {
                let id = self.grid().occupant_at(cell).ok().flatten()?;
                self.agent(id)
                    .filter(|agent| agent.is_prey())
                    .map(|agent| (agent.id, cell))
            })
            .collect()
    }
}
