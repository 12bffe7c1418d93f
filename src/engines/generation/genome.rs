//! Genome representation for the cart-pole search
//!
//! A genome is an open-loop control program: an ordered sequence of per-step
//! cart displacements that is replayed from the canonical start state. Its
//! fitness is the number of steps the pole stays up.
//!
//! Sequences are variable length. Random genomes are created with a length in
//! the configured step range; children produced by crossover take whatever
//! length the cut points give them, which can be zero. A zero-length genome is
//! valid and always scores 0.

use crate::engines::generation::operators::rand_step;
use crate::error::{InvpendError, Result};
use crate::types::ControlInput;
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};

pub type GenomeId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct Genome {
    id: GenomeId,
    fitness: Option<usize>,
    steps: Vec<ControlInput>,
}

impl Genome {
    pub fn id(&self) -> GenomeId {
        self.id
    }

    /// Steps survived at the last evaluation; `None` before the first one.
    pub fn fitness(&self) -> Option<usize> {
        self.fitness
    }

    pub fn steps(&self) -> &[ControlInput] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn set_fitness(&mut self, fitness: usize) {
        debug_assert!(fitness <= self.steps.len());
        self.fitness = Some(fitness);
    }
}

/// Fixed-size, ordered. Slot order is meaningful: after ranking, the survivors
/// occupy the leading slots.
pub type Population = Vec<Genome>;

/// Reserve exactly `n` steps or report the failure instead of aborting.
pub(crate) fn alloc_steps(n: usize) -> Result<Vec<ControlInput>> {
    let mut steps = Vec::new();
    steps
        .try_reserve_exact(n)
        .map_err(|_| InvpendError::Allocation { requested: n })?;
    Ok(steps)
}

/// Creates genomes and hands out identities.
///
/// Identities start at 1 and increase by one per genome created, whether at
/// initialization or at breeding time.
#[derive(Debug)]
pub struct GenomeFactory {
    next_id: AtomicU64,
    step_range: RangeInclusive<usize>,
}

impl GenomeFactory {
    pub fn new(step_range: RangeInclusive<usize>) -> Self {
        Self {
            next_id: AtomicU64::new(1),
            step_range,
        }
    }

    pub fn next_id(&self) -> GenomeId {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Identity the next created genome will receive.
    pub fn peek_id(&self) -> GenomeId {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Random genome with a length drawn uniformly from the step range.
    pub fn make_instance<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Genome> {
        let id = self.next_id();
        let n = rng.gen_range(self.step_range.clone());
        let mut steps = alloc_steps(n)?;
        steps.extend((0..n).map(|_| rand_step(rng)));
        Ok(Genome { id, fitness: None, steps })
    }

    /// Genome with a fresh identity and the given sequence.
    pub fn from_steps(&self, source: &[ControlInput]) -> Result<Genome> {
        let mut steps = alloc_steps(source.len())?;
        steps.extend_from_slice(source);
        Ok(self.adopt(steps))
    }

    pub(crate) fn adopt(&self, steps: Vec<ControlInput>) -> Genome {
        Genome {
            id: self.next_id(),
            fitness: None,
            steps,
        }
    }

    pub fn init_pop<R: Rng + ?Sized>(&self, size: usize, rng: &mut R) -> Result<Population> {
        let mut population = Vec::new();
        population
            .try_reserve_exact(size)
            .map_err(|_| InvpendError::Allocation { requested: size })?;
        for _ in 0..size {
            population.push(self.make_instance(rng)?);
        }
        Ok(population)
    }
}
