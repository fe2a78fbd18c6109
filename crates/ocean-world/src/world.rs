//! The world: grid, live agents, turn queue and the tick scheduler.

use crate::agent::Agent;
use crate::behavior::Turn;
use crate::grid::Grid;
use crate::random::Randomness;
use crate::render::{Frame, Renderer};
use ocean_core::{
    AgentId, AgentKind, Error, LifecycleConfig, PopulationSnapshot, Position, Result,
    SimulationConfig,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, instrument, trace, warn};

/// How often `run` logs a population line
const LOG_EVERY_TICKS: u64 = 1000;

/// Lifecycle of a world. `Ended` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldState {
    Running,
    Ended,
}

/// Kind requested from `spawn`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Random,
    Fixed(AgentKind),
}

impl From<AgentKind> for SpawnKind {
    fn from(kind: AgentKind) -> Self {
        SpawnKind::Fixed(kind)
    }
}

/// Cell requested from `spawn`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Random,
    At(Position),
}

impl From<Position> for Placement {
    fn from(pos: Position) -> Self {
        Placement::At(pos)
    }
}

/// What happened during one full tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickSummary {
    pub tick: u64,
    /// Agents that took a turn, in turn order
    pub acted: Vec<AgentId>,
    pub births: Vec<AgentId>,
    pub eaten: Vec<AgentId>,
    pub starved: Vec<AgentId>,
}

/// Result of a `run` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks_run: u64,
    pub final_population: PopulationSnapshot,
    pub ended: bool,
}

/// Owns the grid, the live agents keyed by identity, the population counters
/// and the turn queue. All mutation goes through `&mut self`.
pub struct World<R = ChaCha8Rng> {
    grid: Grid,
    agents: HashMap<AgentId, Agent>,
    predators: usize,
    prey: usize,
    queue: VecDeque<AgentId>,
    history: Vec<PopulationSnapshot>,
    state: WorldState,
    last_id: u64,
    tick: u64,
    pub(crate) lifecycle: LifecycleConfig,
    pub(crate) rng: R,
}

impl World<ChaCha8Rng> {
    /// World driven by a ChaCha8 generator seeded with `seed`
    pub fn seeded(size: i32, seed: u64) -> Result<Self> {
        World::new(size, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Build a world from configuration and place its initial population
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let mut world = World::seeded(config.grid_size, config.seed)?
            .with_lifecycle(config.lifecycle);

        let population = &config.population;
        let batches = [
            (SpawnKind::Fixed(AgentKind::Predator), population.predators),
            (SpawnKind::Fixed(AgentKind::Prey), population.prey),
            (SpawnKind::Fixed(AgentKind::Barrier), population.barriers),
            (SpawnKind::Random, population.random),
        ];
        for (kind, count) in batches {
            for _ in 0..count {
                world.spawn(kind, Placement::Random, population.randomize_age)?;
            }
        }

        info!(
            event = "world_created",
            grid_size = config.grid_size,
            seed = config.seed,
            predators = world.predators,
            prey = world.prey,
            agents = world.agents.len(),
            "World populated"
        );

        Ok(world)
    }
}

impl<R: Randomness> World<R> {
    pub fn new(size: i32, rng: R) -> Result<Self> {
        if size <= 0 {
            return Err(Error::Validation(format!(
                "grid size must be positive, got {}",
                size
            )));
        }

        Ok(Self {
            grid: Grid::new(size),
            agents: HashMap::new(),
            predators: 0,
            prey: 0,
            queue: VecDeque::new(),
            history: Vec::new(),
            state: WorldState::Running,
            last_id: 0,
            tick: 0,
            lifecycle: LifecycleConfig::default(),
            rng,
        })
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Create an agent and register it with the grid, the live set and,
    /// unless it is a barrier, the tail of the turn queue.
    pub fn spawn(
        &mut self,
        kind: impl Into<SpawnKind>,
        placement: impl Into<Placement>,
        randomize_age: bool,
    ) -> Result<AgentId> {
        let kind = match kind.into() {
            SpawnKind::Fixed(kind) => kind,
            SpawnKind::Random => {
                let kinds = AgentKind::all();
                *self.rng.pick(&kinds).unwrap_or(&AgentKind::Prey)
            }
        };

        let position = match placement.into() {
            Placement::At(pos) => {
                if let Some(occupant) = self.grid.occupant_at(pos)? {
                    return Err(Error::CellOccupied {
                        position: pos,
                        occupant,
                    });
                }
                pos
            }
            Placement::Random => self.find_empty_random_place()?,
        };

        self.last_id += 1;
        let id = AgentId(self.last_id);

        let mut agent = Agent::new(id, kind, position);
        if randomize_age {
            let hunger = self.rng.uniform(0, self.lifecycle.max_hunger);
            let fertility = self.rng.uniform(0, self.lifecycle.pregnant_time);
            agent = agent.with_counters(hunger, fertility);
        }

        self.grid.place(id, position)?;
        self.agents.insert(id, agent);

        match kind {
            AgentKind::Predator => self.predators += 1,
            AgentKind::Prey => self.prey += 1,
            AgentKind::Barrier => {}
        }
        if kind.acts() {
            self.queue.push_back(id);
        }

        trace!(agent_id = %id, kind = %kind, x = position.x, y = position.y, "Agent spawned");
        Ok(id)
    }

    /// Drop an agent from the live set and free its cell. Queue entries that
    /// still name it are skipped when reached.
    pub(crate) fn remove(&mut self, id: AgentId) -> Result<Option<Agent>> {
        let Some(agent) = self.agents.remove(&id) else {
            return Ok(None);
        };

        match agent.kind {
            AgentKind::Predator => self.predators -= 1,
            AgentKind::Prey => self.prey -= 1,
            AgentKind::Barrier => {}
        }
        self.grid.clear(agent.position)?;

        Ok(Some(agent))
    }

    /// Move an agent to `target`. Moving onto its own cell is a no-op.
    pub(crate) fn relocate(&mut self, id: AgentId, target: Position) -> Result<()> {
        let Some(agent) = self.agents.get_mut(&id) else {
            return Ok(());
        };

        let from = agent.position;
        self.grid.clear(from)?;
        agent.move_to(target);
        self.grid.place(id, target)?;

        if from != target {
            trace!(agent_id = %id, from = %from, to = %target, "Agent moved");
        }
        Ok(())
    }

    /// Rejection-sample a random empty cell, bounded by the number of cells.
    /// Falls back to a uniform pick over the remaining empty cells.
    fn find_empty_random_place(&mut self) -> Result<Position> {
        let size = self.grid.size();
        let cells = self.grid.cell_count();
        if self.agents.len() >= cells {
            return Err(Error::GridFull { size });
        }

        let high = (size - 1) as u32;
        for _ in 0..cells {
            let x = self.rng.uniform(0, high) as i32;
            let y = self.rng.uniform(0, high) as i32;
            let pos = Position::new(x, y);
            if self.grid.is_empty_at(pos)? {
                return Ok(pos);
            }
        }

        let empty: Vec<Position> = self.grid.empty_positions().collect();
        self.rng
            .pick(&empty)
            .copied()
            .ok_or(Error::GridFull { size })
    }

    /// Run one full tick. Every agent alive when the tick starts acts exactly
    /// once; agents born during the tick first act on the next one.
    ///
    /// Returns `None` without touching anything once the world has ended.
    pub fn step(&mut self) -> Result<Option<TickSummary>> {
        if self.state == WorldState::Ended {
            return Ok(None);
        }

        self.tick += 1;
        let snapshot = self.population();
        self.history.push(snapshot);

        let mut summary = TickSummary {
            tick: self.tick,
            ..Default::default()
        };

        if snapshot.is_extinct() {
            self.end();
            return Ok(Some(summary));
        }

        self.queue.push_back(AgentId::SENTINEL);
        while let Some(id) = self.queue.pop_front() {
            if id.is_sentinel() {
                break;
            }

            let Some(agent) = self.agents.get(&id).cloned() else {
                trace!(agent_id = %id, "Skipping stale queue entry");
                continue;
            };

            summary.acted.push(id);
            let turn = match self.act(agent) {
                Ok(turn) => turn,
                Err(err) => {
                    self.abandon_tick(id);
                    return Err(err);
                }
            };
            match turn {
                Turn::Reproduced { offspring } => summary.births.push(offspring),
                Turn::Fed { prey, .. } => summary.eaten.push(prey),
                Turn::Starved => summary.starved.push(id),
                Turn::Moved { .. } => {}
            }

            if turn.survived() {
                self.queue.push_back(id);
            }
        }

        if self.population().is_extinct() {
            self.end();
        }

        Ok(Some(summary))
    }

    /// Run ticks until extinction or until `max_ticks` have run (0 means no
    /// limit). With a renderer and a non-zero `render_every`, a frame is
    /// rendered after every `render_every`-th tick, except the tick that
    /// exhausts the budget.
    ///
    /// Calling `run` on an ended world returns immediately.
    #[instrument(skip(self, renderer), fields(size = self.grid.size()))]
    pub fn run(
        &mut self,
        max_ticks: u64,
        render_every: u64,
        mut renderer: Option<&mut dyn Renderer>,
    ) -> Result<RunSummary> {
        info!(
            event = "run_started",
            tick = self.tick,
            predators = self.predators,
            prey = self.prey,
            "Starting run"
        );

        let mut ticks_run = 0;
        while self.state == WorldState::Running {
            if self.step()?.is_none() {
                break;
            }
            ticks_run += 1;

            if ticks_run == max_ticks {
                break;
            }

            if ticks_run % LOG_EVERY_TICKS == 0 {
                info!(
                    event = "population_metrics",
                    tick = self.tick,
                    predators = self.predators,
                    prey = self.prey,
                    "Population metrics snapshot"
                );
            }

            if render_every != 0 && ticks_run % render_every == 0 {
                if let Some(renderer) = renderer.as_deref_mut() {
                    renderer.render(&self.frame())?;
                }
            }
        }

        let summary = RunSummary {
            ticks_run,
            final_population: self.population(),
            ended: self.is_ended(),
        };

        info!(
            event = "run_finished",
            ticks_run = summary.ticks_run,
            tick = self.tick,
            predators = self.predators,
            prey = self.prey,
            ended = summary.ended,
            "Run finished"
        );

        Ok(summary)
    }

    /// Put the queue back into its between-ticks shape after a failed turn:
    /// the failing agent goes back to the front and the pending sentinel is
    /// dropped, so the next tick still visits everyone once.
    fn abandon_tick(&mut self, id: AgentId) {
        if self.agents.contains_key(&id) {
            self.queue.push_front(id);
        }
        self.queue.retain(|queued| !queued.is_sentinel());
        warn!(event = "tick_aborted", tick = self.tick, agent_id = %id, "Tick aborted");
    }

    fn end(&mut self) {
        self.state = WorldState::Ended;
        info!(
            event = "extinction",
            tick = self.tick,
            predators = self.predators,
            prey = self.prey,
            "A species died out, simulation ended"
        );
    }

    pub(crate) fn log_birth(&self, parent: AgentId, offspring: AgentId, kind: AgentKind) {
        debug!(
            event = "agent_born",
            parent_id = %parent,
            offspring_id = %offspring,
            kind = %kind,
            tick = self.tick,
            "Agent reproduced"
        );
    }

    pub(crate) fn log_meal(&self, predator: AgentId, prey: AgentId) {
        debug!(
            event = "agent_eaten",
            predator_id = %predator,
            prey_id = %prey,
            tick = self.tick,
            "Predator fed"
        );
    }

    pub(crate) fn log_starvation(&self, predator: &Agent) {
        debug!(
            event = "agent_starved",
            predator_id = %predator.id,
            hunger = predator.hunger,
            tick = self.tick,
            "Predator starved"
        );
    }
}

impl<R> World<R> {
    pub fn size(&self) -> i32 {
        self.grid.size()
    }

    /// Number of full ticks executed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn state(&self) -> WorldState {
        self.state
    }

    pub fn is_ended(&self) -> bool {
        self.state == WorldState::Ended
    }

    pub fn predator_count(&self) -> usize {
        self.predators
    }

    pub fn prey_count(&self) -> usize {
        self.prey
    }

    pub fn population(&self) -> PopulationSnapshot {
        PopulationSnapshot::new(self.predators, self.prey)
    }

    /// Snapshot taken at the start of every tick, oldest first
    pub fn history(&self) -> &[PopulationSnapshot] {
        &self.history
    }

    pub fn lifecycle(&self) -> &LifecycleConfig {
        &self.lifecycle
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.values()
    }

    pub fn is_alive(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn occupant_at(&self, pos: Position) -> Result<Option<AgentId>> {
        self.grid.occupant_at(pos)
    }

    pub fn kind_at(&self, pos: Position) -> Result<Option<AgentKind>> {
        Ok(self
            .grid
            .occupant_at(pos)?
            .and_then(|id| self.agents.get(&id))
            .map(|agent| agent.kind))
    }

    /// Per-cell occupant kinds for the rendering collaborator
    pub fn frame(&self) -> Frame {
        let cells = self
            .grid
            .iter()
            .map(|(_, occupant)| {
                occupant
                    .and_then(|id| self.agents.get(&id))
                    .map(|agent| agent.kind)
            })
            .collect();
        Frame::new(self.tick, self.grid.size(), cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;
    use proptest::prelude::*;

    /// Every occupied cell maps to a live agent standing there, and every
    /// live agent occupies its recorded cell.
    fn assert_consistent<R>(world: &World<R>) {
        let mut occupied = 0;
        for (pos, occupant) in world.grid.iter() {
            if let Some(id) = occupant {
                let agent = world.agents.get(&id).expect("cell points at a dead agent");
                assert_eq!(agent.position, pos);
                occupied += 1;
            }
        }
        assert_eq!(occupied, world.agents.len());
        for agent in world.agents.values() {
            assert_eq!(world.grid.occupant_at(agent.position).unwrap(), Some(agent.id));
        }

        let predators = world.agents.values().filter(|a| a.is_predator()).count();
        let prey = world.agents.values().filter(|a| a.is_prey()).count();
        assert_eq!(predators, world.predators);
        assert_eq!(prey, world.prey);
    }

    #[test]
    fn test_world_creation() {
        let world = World::seeded(5, 1).unwrap();
        assert_eq!(world.size(), 5);
        assert_eq!(world.state(), WorldState::Running);
        assert!(world.history().is_empty());
        assert!(World::seeded(0, 1).is_err());
    }

    #[test]
    fn test_spawn_assigns_increasing_ids() {
        let mut world = World::seeded(4, 3).unwrap();
        let a = world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        let b = world.spawn(AgentKind::Barrier, Placement::Random, false).unwrap();
        let c = world.spawn(SpawnKind::Random, Placement::Random, false).unwrap();

        assert_eq!(a, AgentId(1));
        assert_eq!(b, AgentId(2));
        assert_eq!(c, AgentId(3));
        assert_eq!(world.predator_count(), 1 + usize::from(world.agent(c).unwrap().is_predator()));
        assert_consistent(&world);
    }

    #[test]
    fn test_barriers_are_not_queued() {
        let mut world = World::seeded(3, 3).unwrap();
        let barrier = world.spawn(AgentKind::Barrier, Position::new(1, 1), false).unwrap();
        let prey = world.spawn(AgentKind::Prey, Position::new(0, 0), false).unwrap();

        assert_eq!(world.queue.iter().copied().collect::<Vec<_>>(), vec![prey]);
        assert_eq!(world.predator_count(), 0);
        assert_eq!(world.prey_count(), 1);
        assert!(world.is_alive(barrier));
    }

    #[test]
    fn test_spawn_rejects_bad_cells() {
        let mut world = World::seeded(3, 3).unwrap();
        world.spawn(AgentKind::Prey, Position::new(1, 1), false).unwrap();

        let err = world.spawn(AgentKind::Prey, Position::new(1, 1), false).unwrap_err();
        assert!(matches!(err, Error::CellOccupied { occupant: AgentId(1), .. }));

        let err = world.spawn(AgentKind::Prey, Position::new(3, 1), false).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { .. }));

        // Failed spawns consume no identity
        let next = world.spawn(AgentKind::Prey, Placement::Random, false).unwrap();
        assert_eq!(next, AgentId(2));
    }

    #[test]
    fn test_grid_full() {
        let mut world = World::seeded(2, 9).unwrap();
        for _ in 0..4 {
            world.spawn(AgentKind::Barrier, Placement::Random, false).unwrap();
        }
        let err = world.spawn(AgentKind::Prey, Placement::Random, false).unwrap_err();
        assert!(matches!(err, Error::GridFull { size: 2 }));
        assert_consistent(&world);
    }

    #[test]
    fn test_random_age_stays_in_range() {
        let mut world = World::seeded(10, 5).unwrap();
        for _ in 0..50 {
            let id = world.spawn(AgentKind::Predator, Placement::Random, true).unwrap();
            let agent = world.agent(id).unwrap();
            assert!(agent.hunger <= 20);
            assert!(agent.fertility <= 100);
        }
    }

    #[test]
    fn test_remove_and_relocate() {
        let mut world = World::seeded(3, 3).unwrap();
        let predator = world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        let prey = world.spawn(AgentKind::Prey, Position::new(2, 2), false).unwrap();

        world.relocate(predator, Position::new(0, 1)).unwrap();
        assert_eq!(world.occupant_at(Position::new(0, 0)).unwrap(), None);
        assert_eq!(world.occupant_at(Position::new(0, 1)).unwrap(), Some(predator));

        world.relocate(predator, Position::new(0, 1)).unwrap();
        assert_eq!(world.agent(predator).unwrap().position, Position::new(0, 1));

        let removed = world.remove(prey).unwrap().unwrap();
        assert_eq!(removed.kind, AgentKind::Prey);
        assert_eq!(world.prey_count(), 0);
        assert!(world.remove(prey).unwrap().is_none());
        assert_consistent(&world);
    }

    #[test]
    fn test_each_agent_acts_once_per_tick() {
        let mut world = World::seeded(6, 11).unwrap();
        for _ in 0..3 {
            world.spawn(AgentKind::Predator, Placement::Random, false).unwrap();
            world.spawn(AgentKind::Prey, Placement::Random, false).unwrap();
            world.spawn(AgentKind::Barrier, Placement::Random, false).unwrap();
        }

        // Fresh counters: nobody eats, starves or breeds for the first ticks
        for _ in 0..10 {
            let summary = world.step().unwrap().unwrap();
            let mut acted = summary.acted.clone();
            acted.sort();
            let mut expected: Vec<AgentId> = world
                .agents()
                .filter(|agent| agent.kind.acts())
                .map(|agent| agent.id)
                .collect();
            expected.sort();
            assert_eq!(acted, expected);
            assert!(summary.births.is_empty());
            assert_consistent(&world);
        }
    }

    #[test]
    fn test_newborns_wait_for_next_tick() {
        let mut world = World::seeded(5, 2).unwrap();
        let parent = world.spawn(AgentKind::Prey, Position::new(2, 2), false).unwrap();
        world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        world.agent_mut(parent).unwrap().fertility = 100;

        let first = world.step().unwrap().unwrap();
        assert_eq!(first.births.len(), 1);
        let child = first.births[0];
        assert!(!first.acted.contains(&child));
        assert_eq!(world.agent(child).unwrap().fertility, 0);

        let second = world.step().unwrap().unwrap();
        assert!(second.acted.contains(&child));
        assert_eq!(world.agent(child).unwrap().fertility, 1);
    }

    #[test]
    fn test_stale_entries_are_skipped() {
        let mut world = World::seeded(4, 2).unwrap();
        world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        let gone = world.spawn(AgentKind::Prey, Position::new(3, 3), false).unwrap();
        world.spawn(AgentKind::Prey, Position::new(3, 0), false).unwrap();
        world.remove(gone).unwrap();

        let summary = world.step().unwrap().unwrap();
        assert!(!summary.acted.contains(&gone));
        assert_eq!(summary.acted.len(), 2);
        assert!(!world.queue.contains(&gone));
    }

    #[test]
    fn test_starved_predator_leaves_queue() {
        let mut world = World::seeded(5, 2).unwrap();
        let predator = world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        world.spawn(AgentKind::Predator, Position::new(0, 4), false).unwrap();
        world.spawn(AgentKind::Prey, Position::new(4, 4), false).unwrap();
        world.agent_mut(predator).unwrap().hunger = 21;

        let summary = world.step().unwrap().unwrap();
        assert_eq!(summary.starved, vec![predator]);
        assert!(!world.queue.contains(&predator));
        assert_eq!(world.queue.len(), 2);
        assert!(!world.is_ended());
    }

    #[test]
    fn test_failed_turn_leaves_queue_usable() {
        let mut world = World::seeded(5, 6).unwrap();
        let predator = world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        let broken = world.spawn(AgentKind::Prey, Position::new(4, 4), false).unwrap();
        let prey = world.spawn(AgentKind::Prey, Position::new(2, 2), false).unwrap();
        world.agent_mut(broken).unwrap().position = Position::new(99, 99);

        assert!(world.step().is_err());
        assert!(!world.queue.iter().any(|id| id.is_sentinel()));
        for id in [predator, broken, prey] {
            assert_eq!(world.queue.iter().filter(|queued| **queued == id).count(), 1);
        }

        world.agent_mut(broken).unwrap().position = Position::new(4, 4);
        let summary = world.step().unwrap().unwrap();
        let mut acted = summary.acted.clone();
        acted.sort();
        assert_eq!(acted, vec![predator, broken, prey]);
        assert_consistent(&world);
    }

    #[test]
    fn test_history_records_counts_before_acting() {
        let mut world = World::seeded(3, 4).unwrap();
        world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        world.spawn(AgentKind::Prey, Position::new(2, 2), false).unwrap();

        world.run(3, 0, None).unwrap();
        assert_eq!(world.history().len(), 3);
        assert_eq!(world.history()[0], PopulationSnapshot::new(1, 1));
        assert_eq!(world.tick(), 3);
    }

    #[test]
    fn test_run_on_extinct_world_does_not_mutate() {
        let mut world = World::seeded(3, 4).unwrap();
        let predator = world.spawn(AgentKind::Predator, Position::new(1, 1), false).unwrap();

        let summary = world.run(0, 0, None).unwrap();
        assert!(summary.ended);
        assert_eq!(summary.ticks_run, 1);
        assert_eq!(world.history(), &[PopulationSnapshot::new(1, 0)]);

        let agent = world.agent(predator).unwrap();
        assert_eq!(agent.position, Position::new(1, 1));
        assert_eq!(agent.hunger, 0);
        assert_eq!(agent.fertility, 0);
    }

    #[test]
    fn test_run_after_end_is_noop() {
        let mut world = World::seeded(3, 4).unwrap();
        world.spawn(AgentKind::Prey, Position::new(1, 1), false).unwrap();
        world.run(0, 0, None).unwrap();
        assert!(world.is_ended());

        let again = world.run(10, 1, None).unwrap();
        assert_eq!(again.ticks_run, 0);
        assert_eq!(world.history().len(), 1);
        assert!(world.step().unwrap().is_none());
    }

    #[test]
    fn test_run_respects_tick_budget() {
        let mut world = World::seeded(8, 21).unwrap();
        for _ in 0..4 {
            world.spawn(AgentKind::Predator, Placement::Random, false).unwrap();
            world.spawn(AgentKind::Prey, Placement::Random, false).unwrap();
        }

        let summary = world.run(5, 0, None).unwrap();
        assert_eq!(summary.ticks_run, 5);
        assert!(!summary.ended);
        assert_eq!(world.history().len(), 5);
    }

    #[test]
    fn test_run_renders_on_cadence() {
        let mut world = World::seeded(4, 8).unwrap();
        world.spawn(AgentKind::Predator, Position::new(0, 0), false).unwrap();
        world.spawn(AgentKind::Prey, Position::new(3, 3), false).unwrap();

        let mut renderer = TextRenderer::new(Vec::new());
        let sink: &mut dyn Renderer = &mut renderer;
        world.run(7, 2, Some(sink)).unwrap();

        // Ticks 2, 4 and 6 are rendered; tick 7 exhausts the budget
        let output = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(output.matches("\n\n").count(), 3);
    }

    #[test]
    fn test_from_config() {
        let config = SimulationConfig {
            grid_size: 6,
            seed: 17,
            population: ocean_core::PopulationConfig {
                predators: 2,
                prey: 5,
                barriers: 3,
                random: 2,
                randomize_age: true,
            },
            ..Default::default()
        };

        let world = World::from_config(&config).unwrap();
        assert_eq!(world.agents().count(), 12);
        assert!(world.predator_count() >= 2);
        assert!(world.prey_count() >= 5);
        assert_consistent(&world);
    }

    #[test]
    fn test_from_config_rejects_huge_lifecycle() {
        let mut config = SimulationConfig::default();
        config.lifecycle.max_hunger = 2_000_000_000;
        assert!(matches!(World::from_config(&config), Err(Error::Validation(_))));
    }

    #[test]
    fn test_frame_matches_grid() {
        let mut world = World::seeded(3, 1).unwrap();
        world.spawn(AgentKind::Barrier, Position::new(2, 0), false).unwrap();
        world.spawn(AgentKind::Prey, Position::new(0, 2), false).unwrap();

        let frame = world.frame();
        assert_eq!(frame.get(Position::new(2, 0)), Some(AgentKind::Barrier));
        assert_eq!(frame.get(Position::new(0, 2)), Some(AgentKind::Prey));
        assert_eq!(frame.get(Position::new(1, 1)), None);
        assert_eq!(world.kind_at(Position::new(2, 0)).unwrap(), Some(AgentKind::Barrier));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_grid_and_agents_stay_consistent(
            seed in any::<u64>(),
            size in 2i32..9,
            predators in 1usize..5,
            prey in 1usize..8,
            barriers in 0usize..4,
        ) {
            let cells = (size * size) as usize;
            prop_assume!(predators + prey + barriers <= cells);

            let mut world = World::seeded(size, seed).unwrap();
            for _ in 0..predators {
                world.spawn(AgentKind::Predator, Placement::Random, true).unwrap();
            }
            for _ in 0..prey {
                world.spawn(AgentKind::Prey, Placement::Random, true).unwrap();
            }
            for _ in 0..barriers {
                world.spawn(AgentKind::Barrier, Placement::Random, false).unwrap();
            }

            let mut highest_seen = world.agents().map(|a| a.id).max().unwrap();
            for _ in 0..150 {
                let Some(summary) = world.step().unwrap() else { break };
                assert_consistent(&world);

                // Newborn identities always exceed every earlier identity
                for child in &summary.births {
                    prop_assert!(*child > highest_seen);
                    highest_seen = *child;
                }
                for id in summary.eaten.iter().chain(&summary.starved) {
                    prop_assert!(!world.is_alive(*id));
                }
            }
        }
    }
}
