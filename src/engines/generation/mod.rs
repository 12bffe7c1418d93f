pub mod genome;
pub mod operators;
pub mod evolution_engine;
pub mod progress;

pub use genome::{Genome, GenomeFactory, GenomeId, Population};
pub use operators::{crossover, mutate, rand_step, rank_population, CrossoverPoints};
pub use evolution_engine::{EvolutionEngine, EvolutionConfig, ProgressCallback, RunSummary};
pub use progress::{ConsoleProgressCallback, IpcProgressCallback, ProgressMessage, SilentProgressCallback};
