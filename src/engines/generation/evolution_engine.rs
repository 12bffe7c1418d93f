use crate::engines::evaluation::TrajectoryRunner;
use crate::engines::generation::{
    genome::{Genome, GenomeFactory, GenomeId, Population},
    operators::{crossover, mutate, rank_population},
};
use crate::engines::metrics::{GenerationStats, PopulationMetrics};
use crate::engines::physics::{PhysicsModel, PhysicsParameters};
use crate::config::traits::require_positive;
use crate::error::{InvpendError, Result};
use crate::types::TracePoint;
use crate::visual::{NoopVisualizer, Visualizer};
use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: Option<usize>, // None = until cancelled
    pub mutation_rate: u32,         // mutate with probability 1/mutation_rate
    pub replacement_divisor: usize, // replace the bottom N/replacement_divisor
    pub step_range: RangeInclusive<usize>,
    pub dt: f64,
    pub physics: PhysicsParameters,
    pub trace: bool,
    pub display_every: Option<usize>,
    pub frame_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            generations: None,
            mutation_rate: 20,
            replacement_divisor: 5,
            step_range: 2..=99,
            dt: 0.1,
            physics: PhysicsParameters::default(),
            trace: false,
            display_every: None,
            frame_delay: Duration::from_millis(100),
            seed: None,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(InvpendError::Configuration(
                "Population size must be positive".to_string(),
            ));
        }
        if self.generations == Some(0) {
            return Err(InvpendError::Configuration(
                "Generation limit must be positive".to_string(),
            ));
        }
        if self.mutation_rate == 0 {
            return Err(InvpendError::Configuration(
                "Mutation rate denominator must be positive".to_string(),
            ));
        }
        if self.replacement_divisor < 2 {
            return Err(InvpendError::Configuration(
                "Replacement divisor must be at least 2 so that parents survive".to_string(),
            ));
        }
        if *self.step_range.start() == 0 || self.step_range.is_empty() {
            return Err(InvpendError::Configuration(format!(
                "Genome length range {:?} is invalid",
                self.step_range
            )));
        }
        if self.display_every == Some(0) {
            return Err(InvpendError::Configuration(
                "Display period must be positive".to_string(),
            ));
        }
        require_positive("physics", "dt", self.dt)?;
        require_positive("physics", "rod_length", self.physics.rod_length)?;
        require_positive("physics", "position_limit", self.physics.position_limit)?;
        require_positive("physics", "gravity", self.physics.gravity)?;
        Ok(())
    }

    /// Genomes kept unchanged by a breeding round over `population_len` slots.
    pub fn survivor_count(&self, population_len: usize) -> usize {
        population_len - population_len / self.replacement_divisor
    }
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, stats: &GenerationStats);
    fn on_trace(&mut self, _generation: usize, _genome: GenomeId, _trace: &[TracePoint]) {}
}

/// Outcome of [`EvolutionEngine::run`]
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub generations: usize,
    pub seed: u64,
    /// Generation with the highest max fitness (earliest on ties).
    pub best: Option<GenerationStats>,
    pub last: Option<GenerationStats>,
    /// Top-ranked genome of the last evaluated generation.
    pub champion: Option<Genome>,
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    runner: TrajectoryRunner,
    factory: GenomeFactory,
    rng: StdRng,
    seed: u64,
    generation: usize,
    visualizer: Box<dyn Visualizer>,
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig) -> Result<Self> {
        config.validate()?;

        // An unseeded run still gets a concrete seed so it can be replayed.
        let seed = config.seed.unwrap_or_else(rand::random);
        let runner = TrajectoryRunner::new(PhysicsModel::new(config.physics), config.dt);
        let factory = GenomeFactory::new(config.step_range.clone());

        Ok(Self {
            config,
            runner,
            factory,
            rng: StdRng::seed_from_u64(seed),
            seed,
            generation: 0,
            visualizer: Box::new(NoopVisualizer),
        })
    }

    pub fn with_visualizer(mut self, visualizer: Box<dyn Visualizer>) -> Self {
        self.visualizer = visualizer;
        self
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of evaluations performed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn factory(&self) -> &GenomeFactory {
        &self.factory
    }

    pub fn runner(&self) -> &TrajectoryRunner {
        &self.runner
    }

    pub fn init_pop(&mut self) -> Result<Population> {
        self.factory.init_pop(self.config.population_size, &mut self.rng)
    }

    /// Score every genome by replaying it from the canonical state.
    ///
    /// Replays are independent, so they run in parallel; each worker writes
    /// only its own genome's fitness and the RNG is not touched.
    pub fn evaluate(&mut self, population: &mut Population) {
        self.generation += 1;
        let runner = self.runner;
        population.par_iter_mut().for_each(|genome| {
            let fitness = runner.fitness(genome.steps());
            genome.set_fitness(fitness);
        });
    }

    /// Sort by rank so survivors occupy the leading slots.
    pub fn rank(&self, population: &mut Population) {
        rank_population(population);
    }

    /// Rank, then overwrite the bottom slots with children of the survivors.
    ///
    /// Parents are drawn uniformly with replacement from the survivor slice,
    /// so one genome may be both parents. Survivor slots are never written.
    pub fn select_and_breed(&mut self, population: &mut Population) -> Result<()> {
        self.rank(population);

        let survivors = self.config.survivor_count(population.len());
        for slot in survivors..population.len() {
            let j1 = self.rng.gen_range(0..survivors);
            let j2 = self.rng.gen_range(0..survivors);
            let (mut steps, points) =
                crossover(population[j1].steps(), population[j2].steps(), &mut self.rng)?;
            let mutated = mutate(&mut steps, self.config.mutation_rate, &mut self.rng);

            let child = self.factory.adopt(steps);
            trace!(
                "slot {}: {} = {}[..{}] ++ {}[{}..] (len {}, mutated {:?})",
                slot,
                child.id(),
                population[j1].id(),
                points.n1,
                population[j2].id(),
                points.n2,
                child.len(),
                mutated
            );
            population[slot] = child;
        }

        Ok(())
    }

    /// Per-step trace of the genome in slot 0.
    pub fn trace_first(&self, population: &[Genome]) -> Option<(GenomeId, Vec<TracePoint>)> {
        population
            .first()
            .map(|genome| (genome.id(), self.runner.trace(genome.steps())))
    }

    fn should_display(&self) -> bool {
        self.config
            .display_every
            .map_or(false, |every| self.generation % every == 0)
    }

    /// Replay `genome` through the visualizer. Drawing never affects fitness.
    fn display(&mut self, genome: &Genome) {
        let runner = self.runner;
        let limit = runner.model().params().position_limit;
        let delay = self.config.frame_delay;
        let visualizer = &mut self.visualizer;

        visualizer.draw_cart(limit, 0.0);
        runner.replay(genome.steps(), |point| {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            visualizer.draw_cart(point.state.x + limit, point.state.theta);
        });
    }

    pub fn run<C: ProgressCallback>(&mut self, callback: C) -> Result<RunSummary> {
        let never = AtomicBool::new(false);
        self.run_with_cancel(callback, &never)
    }

    /// Run the evolution process until the generation limit or until `cancel` is set.
    pub fn run_with_cancel<C: ProgressCallback>(
        &mut self,
        mut callback: C,
        cancel: &AtomicBool,
    ) -> Result<RunSummary> {
        info!(
            "starting evolution: population {}, generations {}, seed {}",
            self.config.population_size,
            self.config
                .generations
                .map_or_else(|| "unbounded".to_string(), |g| g.to_string()),
            self.seed
        );

        let mut population = self.init_pop()?;

        if self.config.display_every.is_some() {
            let params = self.runner.model().params();
            let (rod_length, track_width) = (params.rod_length, 2.0 * params.position_limit);
            if let Err(e) = self.visualizer.init(rod_length, track_width) {
                warn!("display disabled: {}", e);
                self.visualizer = Box::new(NoopVisualizer);
            }
        }

        let result = self.generation_loop(&mut population, &mut callback, cancel);
        self.visualizer.destroy();
        let (best, last) = result?;

        info!(
            "evolution finished after {} generations, best fitness {}",
            self.generation,
            best.as_ref().map_or(0, |s| s.max_fitness)
        );

        Ok(RunSummary {
            generations: self.generation,
            seed: self.seed,
            best,
            last,
            champion: population.into_iter().next().filter(|g| g.fitness().is_some()),
        })
    }

    fn generation_loop<C: ProgressCallback>(
        &mut self,
        population: &mut Population,
        callback: &mut C,
        cancel: &AtomicBool,
    ) -> Result<(Option<GenerationStats>, Option<GenerationStats>)> {
        let mut best: Option<GenerationStats> = None;
        let mut last = None;

        while self.config.generations.map_or(true, |limit| self.generation < limit) {
            if cancel.load(Ordering::Relaxed) {
                info!("evolution cancelled at generation {}", self.generation);
                break;
            }

            callback.on_generation_start(self.generation + 1);
            self.evaluate(population);

            if self.config.trace {
                if let Some((id, points)) = self.trace_first(population) {
                    callback.on_trace(self.generation, id, &points);
                }
            }
            if self.should_display() {
                if let Some(first) = population.first() {
                    self.display(first);
                }
            }

            let stats = PopulationMetrics::calculate(population, self.generation);
            debug!(
                "gen {} max {} avg {:.3} degenerate {}",
                stats.generation, stats.max_fitness, stats.avg_fitness, stats.degenerate
            );
            callback.on_generation_complete(&stats);

            self.select_and_breed(population)?;

            if best.as_ref().map_or(true, |b| stats.max_fitness > b.max_fitness) {
                best = Some(stats.clone());
            }
            last = Some(stats);
        }

        Ok((best, last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config(seed: u64) -> EvolutionConfig {
        EvolutionConfig {
            population_size: 50,
            generations: Some(3),
            frame_delay: Duration::ZERO,
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_single_slice_replacement() {
        let config = EvolutionConfig { replacement_divisor: 1, ..small_config(1) };
        assert!(EvolutionEngine::new(config).is_err());
    }

    #[test]
    fn test_survivor_count() {
        let config = EvolutionConfig::default();
        assert_eq!(config.survivor_count(1000), 800);
        assert_eq!(config.survivor_count(10), 8);
        assert_eq!(config.survivor_count(4), 4);
    }

    #[test]
    fn test_evaluate_increments_generation() {
        let mut engine = EvolutionEngine::new(small_config(2)).unwrap();
        let mut population = engine.init_pop().unwrap();
        assert_eq!(engine.generation(), 0);
        engine.evaluate(&mut population);
        engine.evaluate(&mut population);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn test_children_get_fresh_identities() {
        let mut engine = EvolutionEngine::new(small_config(3)).unwrap();
        let mut population = engine.init_pop().unwrap();
        engine.evaluate(&mut population);
        engine.select_and_breed(&mut population).unwrap();

        let mut children: Vec<_> = population[40..].iter().map(Genome::id).collect();
        children.sort_unstable();
        assert_eq!(children, (51..=60).collect::<Vec<_>>());
        assert!(population[40..].iter().all(|g| g.fitness().is_none()));
    }
}
