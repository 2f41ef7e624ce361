//! The genetic-algorithm engine
//!
//! [`Evolution`] is a lazy, pull-based sequence of scored generations: each
//! call to `next()` scores the current population, sorts it best-first,
//! yields a snapshot and, unless a halt strategy fired, breeds the next
//! population. A halted engine is terminal. Runs are not restartable; start
//! a fresh run by constructing a fresh engine from a fresh seed population.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::diagnostics::{EvolutionStats, GenerationStats};
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::FitnessStrategy;
use crate::operators::GenerateStrategy;
use crate::population::{Individual, Population};
use crate::termination::{EvolutionState, HaltReason, HaltStrategy};

/// Outcome of a completed run.
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// The fittest individual of the final generation
    pub best: Individual,
    /// Number of generations produced
    pub generations: usize,
    /// True if the species' acceptance threshold was reached; false means the
    /// generation ceiling fired first and `best` is the best-so-far genome
    pub converged: bool,
    /// Per-generation statistics
    pub stats: EvolutionStats,
}

/// A single run of the genetic algorithm.
///
/// Two states: running and halted. Consumers pull generations through the
/// [`Iterator`] impl; ceasing to pull is cancellation, no cleanup needed.
pub struct Evolution<F, G, H, R = StdRng> {
    fitness: F,
    generate: G,
    halt: H,
    rng: R,
    population: Option<Population>,
    generation: usize,
    fitness_history: Vec<f64>,
    halt_reason: Option<HaltReason>,
    stats: EvolutionStats,
}

impl<F, G, H> Evolution<F, G, H, StdRng>
where
    F: FitnessStrategy,
    G: GenerateStrategy,
    H: HaltStrategy,
{
    /// Create an engine with a seeded random stream, making the full
    /// generation sequence reproducible.
    pub fn with_seed(
        initial: Population,
        fitness: F,
        generate: G,
        halt: H,
        seed: u64,
    ) -> EvoResult<Self> {
        Self::new(initial, fitness, generate, halt, StdRng::seed_from_u64(seed))
    }
}

impl<F, G, H, R> Evolution<F, G, H, R>
where
    F: FitnessStrategy,
    G: GenerateStrategy,
    H: HaltStrategy,
    R: Rng,
{
    /// Create an engine over an initial population.
    ///
    /// Fails fast on a degenerate population: breeding needs at least two
    /// members.
    pub fn new(initial: Population, fitness: F, generate: G, halt: H, rng: R) -> EvoResult<Self> {
        if initial.len() < 2 {
            return Err(EvolutionError::Configuration(format!(
                "population size must be > 1, got {}",
                initial.len()
            )));
        }
        Ok(Self {
            fitness,
            generate,
            halt,
            rng,
            population: Some(initial),
            generation: 0,
            fitness_history: Vec::new(),
            halt_reason: None,
            stats: EvolutionStats::new(),
        })
    }

    /// Number of generations produced so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Why the run halted, if it has.
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt_reason
    }

    /// Statistics recorded so far.
    pub fn stats(&self) -> &EvolutionStats {
        &self.stats
    }

    /// Drive the run to completion and return the final best individual.
    ///
    /// Hitting the generation ceiling is a normal terminal state reported
    /// through `converged: false`, not an error.
    pub fn run(mut self) -> EvoResult<EvolutionResult> {
        let mut last = None;
        for population in self.by_ref() {
            last = Some(population);
        }
        let population = last.ok_or(EvolutionError::EmptyPopulation)?;
        let best = population
            .best()
            .cloned()
            .ok_or(EvolutionError::EmptyPopulation)?;
        Ok(EvolutionResult {
            best,
            generations: self.generation,
            converged: self.halt_reason == Some(HaltReason::TargetReached),
            stats: self.stats,
        })
    }

    fn step(&mut self) -> Option<Population> {
        if self.halt_reason.is_some() {
            return None;
        }
        let current = self.population.take()?;
        let mut population = if self.generation == 0 {
            current
        } else {
            self.generate.generate(&current, &mut self.rng)
        };

        population.evaluate_parallel(&self.fitness);
        population.sort_by_fitness();
        self.generation += 1;

        let best = population.best().map(|i| i.fitness_or_worst())?;
        self.fitness_history.push(best);
        self.stats
            .record(GenerationStats::from_population(&population, self.generation));

        let state = EvolutionState {
            generation: self.generation,
            population: &population,
            fitness_history: &self.fitness_history,
        };
        if let Some(reason) = self.halt.check(&state) {
            debug!(
                generation = self.generation,
                best_fitness = best,
                ?reason,
                "evolution halted"
            );
            self.halt_reason = Some(reason);
            self.stats.set_halt_reason(reason);
        } else {
            debug!(generation = self.generation, best_fitness = best, "generation scored");
        }

        self.population = Some(population.clone());
        Some(population)
    }
}

impl<F, G, H, R> Iterator for Evolution<F, G, H, R>
where
    F: FitnessStrategy,
    G: GenerateStrategy,
    H: HaltStrategy,
    R: Rng,
{
    type Item = Population;

    fn next(&mut self) -> Option<Population> {
        self.step()
    }
}

pub mod prelude {
    pub use super::{Evolution, EvolutionResult};
}
