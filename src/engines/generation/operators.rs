use crate::engines::generation::genome::{alloc_steps, Genome};
use crate::error::Result;
use crate::types::ControlInput;
use rand::Rng;
use std::cmp::Ordering;

/// Uniform draw from the 201 values -1.00, -0.99, ..., 1.00
pub fn rand_step<R: Rng + ?Sized>(rng: &mut R) -> ControlInput {
    (rng.gen_range(0..=200i32) - 100) as f64 / 100.0
}

/// Ranking order: fitness descending, then identity ascending so that among
/// equals the older genome ranks first. Unevaluated genomes rank last.
pub fn rank_order(a: &Genome, b: &Genome) -> Ordering {
    b.fitness()
        .cmp(&a.fitness())
        .then_with(|| a.id().cmp(&b.id()))
}

pub fn rank_population(population: &mut [Genome]) {
    population.sort_by(rank_order);
}

/// Cut points actually drawn for one crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverPoints {
    pub n1: usize,
    pub n2: usize,
}

impl CrossoverPoints {
    /// Length of the child these points produce from a second parent of `parent2_len` steps.
    pub fn child_len(&self, parent2_len: usize) -> usize {
        self.n1 + (parent2_len - self.n2)
    }
}

/// Draw a cut point in `[0, len)`. An empty parent contributes nothing and
/// consumes no randomness.
fn cut_point<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    if len == 0 {
        0
    } else {
        rng.gen_range(0..len)
    }
}

/// Single-point, variable-length crossover: a prefix of `parent1` followed by
/// a suffix of `parent2`, cut independently in each parent.
pub fn crossover<R: Rng + ?Sized>(
    parent1: &[ControlInput],
    parent2: &[ControlInput],
    rng: &mut R,
) -> Result<(Vec<ControlInput>, CrossoverPoints)> {
    let n1 = cut_point(parent1.len(), rng);
    let n2 = cut_point(parent2.len(), rng);
    let points = CrossoverPoints { n1, n2 };

    let mut child = alloc_steps(points.child_len(parent2.len()))?;
    child.extend_from_slice(&parent1[..n1]);
    child.extend_from_slice(&parent2[n2..]);

    Ok((child, points))
}

/// With probability `1 / mutation_rate`, overwrite one uniformly chosen
/// position with a fresh [`rand_step`]. Returns the mutated position.
pub fn mutate<R: Rng + ?Sized>(
    steps: &mut [ControlInput],
    mutation_rate: u32,
    rng: &mut R,
) -> Option<usize> {
    if rng.gen_range(0..mutation_rate) != 0 || steps.is_empty() {
        return None;
    }
    let position = rng.gen_range(0..steps.len());
    steps[position] = rand_step(rng);
    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::genome::GenomeFactory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rand_step_grid() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..2000 {
            let step = rand_step(&mut rng);
            assert!((-1.0..=1.0).contains(&step));
            let scaled = step * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_crossover_length_law() {
        let mut rng = StdRng::seed_from_u64(11);
        let p1: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let p2: Vec<f64> = (0..25).map(|i| -(i as f64)).collect();

        for _ in 0..200 {
            let (child, points) = crossover(&p1, &p2, &mut rng).unwrap();
            assert!(points.n1 < p1.len());
            assert!(points.n2 < p2.len());
            assert_eq!(child.len(), points.n1 + (p2.len() - points.n2));
            assert_eq!(&child[..points.n1], &p1[..points.n1]);
            assert_eq!(&child[points.n1..], &p2[points.n2..]);
        }
    }

    #[test]
    fn test_crossover_with_empty_parents() {
        let mut rng = StdRng::seed_from_u64(5);
        let (child, points) = crossover(&[], &[], &mut rng).unwrap();
        assert!(child.is_empty());
        assert_eq!(points, CrossoverPoints { n1: 0, n2: 0 });

        let (child, points) = crossover(&[], &[0.1, 0.2, 0.3], &mut rng).unwrap();
        assert_eq!(points.n1, 0);
        assert_eq!(child.len(), 3 - points.n2);
    }

    #[test]
    fn test_mutate_rate_one_always_mutates() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut steps = vec![5.0; 8];
        let position = mutate(&mut steps, 1, &mut rng).unwrap();
        assert!(steps[position] <= 1.0);
        assert_eq!(steps.iter().filter(|&&s| s == 5.0).count(), 7);
    }

    #[test]
    fn test_mutate_empty_is_noop() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut steps: Vec<f64> = Vec::new();
        assert_eq!(mutate(&mut steps, 1, &mut rng), None);
    }

    #[test]
    fn test_rank_breaks_ties_by_identity() {
        let factory = GenomeFactory::new(2..=99);
        let mut population: Vec<Genome> = (0..4)
            .map(|_| factory.from_steps(&[0.0; 4]).unwrap())
            .collect();
        population[0].set_fitness(1);
        population[1].set_fitness(3);
        population[2].set_fitness(3);
        // population[3] stays unevaluated

        population.reverse();
        rank_population(&mut population);

        let ids: Vec<_> = population.iter().map(Genome::id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }
}
