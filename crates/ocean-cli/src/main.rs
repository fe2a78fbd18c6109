//! Command line runner for the predator/prey ocean.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use ocean_core::{peak_populations, SimulationConfig};
use ocean_world::{Renderer, TextRenderer, World};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "ocean")]
#[command(version, about = "Predator/prey simulation on a bounded grid", long_about = None)]
struct Cli {
    /// Configuration file (JSON). Flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Side length of the square grid
    #[arg(short, long)]
    size: Option<i32>,

    /// Number of ticks to run, 0 runs until a species dies out
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Print the grid every N ticks, 0 disables printing
    #[arg(short, long)]
    render_every: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Initial number of predators
    #[arg(long)]
    predators: Option<usize>,

    /// Initial number of prey
    #[arg(long)]
    prey: Option<usize>,

    /// Initial number of barriers
    #[arg(long)]
    barriers: Option<usize>,

    /// Initial agents of a random kind
    #[arg(long)]
    random: Option<usize>,

    /// Start agents with random hunger and fertility
    #[arg(long)]
    random_age: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

impl Cli {
    /// Merge the optional config file with command line overrides.
    /// Without an explicit seed, one is drawn from OS entropy.
    fn to_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(ticks) = self.ticks {
            config.max_ticks = ticks;
        }
        if let Some(every) = self.render_every {
            config.render_every = every;
        }
        if let Some(predators) = self.predators {
            config.population.predators = predators;
        }
        if let Some(prey) = self.prey {
            config.population.prey = prey;
        }
        if let Some(barriers) = self.barriers {
            config.population.barriers = barriers;
        }
        if let Some(random) = self.random {
            config.population.random = random;
        }
        if self.random_age {
            config.population.randomize_age = true;
        }
        config.seed = match self.seed {
            Some(seed) => seed,
            None if self.config.is_some() => config.seed,
            None => rand::random(),
        };

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.to_config()?;

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    telemetry::init_telemetry(cli.log_json, cli.quiet)?;
    info!(
        grid_size = config.grid_size,
        seed = config.seed,
        max_ticks = config.max_ticks,
        render_every = config.render_every,
        "Starting ocean"
    );

    let mut world = World::from_config(&config)?;
    let mut renderer = TextRenderer::new(std::io::stdout().lock());

    if config.render_every != 0 {
        renderer.render(&world.frame())?;
    }

    let sink: &mut dyn Renderer = &mut renderer;
    let summary = world.run(config.max_ticks, config.render_every, Some(sink))?;
    let peak = peak_populations(world.history());

    info!(
        ticks = summary.ticks_run,
        predators = summary.final_population.predators,
        prey = summary.final_population.prey,
        peak_predators = peak.predators,
        peak_prey = peak.prey,
        ended = summary.ended,
        "Simulation complete"
    );

    Ok(())
}
