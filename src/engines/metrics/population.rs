// src/engines/metrics/population.rs
use crate::engines::generation::genome::{Genome, GenomeId};
use serde::{Deserialize, Serialize};

/// Fitness summary of one evaluated generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    pub max_fitness: usize,
    pub min_fitness: usize,
    pub avg_fitness: f64,
    pub best_id: Option<GenomeId>,
    pub best_len: usize,
    pub avg_len: f64,
    pub degenerate: usize, // zero-length genomes
}

pub struct PopulationMetrics;

impl PopulationMetrics {
    /// Unevaluated genomes count as fitness 0. Among equal maxima the lowest
    /// identity is reported as best.
    pub fn calculate(population: &[Genome], generation: usize) -> GenerationStats {
        if population.is_empty() {
            return GenerationStats {
                generation,
                max_fitness: 0,
                min_fitness: 0,
                avg_fitness: 0.0,
                best_id: None,
                best_len: 0,
                avg_len: 0.0,
                degenerate: 0,
            };
        }

        let fitness = |g: &Genome| g.fitness().unwrap_or(0);

        let best = population
            .iter()
            .min_by(|a, b| fitness(b).cmp(&fitness(a)).then_with(|| a.id().cmp(&b.id())));

        let total_fitness: usize = population.iter().map(fitness).sum();
        let total_len: usize = population.iter().map(Genome::len).sum();
        let n = population.len() as f64;

        GenerationStats {
            generation,
            max_fitness: best.map(fitness).unwrap_or(0),
            min_fitness: population.iter().map(fitness).min().unwrap_or(0),
            avg_fitness: total_fitness as f64 / n,
            best_id: best.map(Genome::id),
            best_len: best.map(Genome::len).unwrap_or(0),
            avg_len: total_len as f64 / n,
            degenerate: population.iter().filter(|g| g.is_empty()).count(),
        }
    }
}
