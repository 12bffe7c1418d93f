use anyhow::Context;
use clap::Parser;
use invpend::config::{ConfigBridge, ConfigManager};
use invpend::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use invpend::visual::TerminalVisualizer;
use std::path::PathBuf;

/// Evolve open-loop control sequences that balance an inverted pendulum.
#[derive(Parser, Debug)]
#[command(name = "invpend", version, about)]
struct Args {
    /// Print a per-step trace of the first genome each generation
    #[arg(short = 't', long)]
    trace: bool,

    /// Print max/avg fitness each generation
    #[arg(short = 's', long)]
    stats: bool,

    /// Population size
    #[arg(short = 'p', long)]
    population: Option<usize>,

    /// Number of generations (runs forever when omitted)
    #[arg(short = 'g', long)]
    generations: Option<usize>,

    /// Animate the first genome every N generations
    #[arg(short = 'x', long = "display", value_name = "N")]
    display_every: Option<usize>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file; INVPEND__SECTION__FIELD variables override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print the configuration field manifests as JSON and exit
    #[arg(long)]
    manifest: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let manager = ConfigManager::new();
    manager
        .load_layered(args.config.as_deref())
        .context("loading configuration")?;

    manager.update(|c| {
        if let Some(population) = args.population {
            c.evolution.population_size = population;
        }
        if args.generations.is_some() {
            c.evolution.num_generations = args.generations;
        }
        if args.seed.is_some() {
            c.evolution.seed = args.seed;
        }
        if args.display_every.is_some() {
            c.reporting.display_every = args.display_every;
        }
        c.reporting.trace |= args.trace;
        c.reporting.stats |= args.stats;
    })?;

    let config = manager.get();

    if args.manifest {
        println!("{}", serde_json::to_string_pretty(&config.manifests())?);
        return Ok(());
    }
    if args.dump_config {
        print!("{}", manager.to_toml()?);
        return Ok(());
    }

    let mut engine = EvolutionEngine::new(ConfigBridge::to_engine_config(&config))?;
    if config.reporting.display_every.is_some() {
        engine = engine.with_visualizer(Box::new(TerminalVisualizer::stdout()));
    }

    let summary = engine.run(ConsoleProgressCallback::new(config.reporting.stats))?;

    if let Some(best) = &summary.best {
        log::info!(
            "best fitness {} at generation {} (seed {})",
            best.max_fitness,
            best.generation,
            summary.seed
        );
    }
    Ok(())
}
