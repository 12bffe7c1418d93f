pub mod population;

pub use population::{GenerationStats, PopulationMetrics};
