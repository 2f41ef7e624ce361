//! Run statistics
//!
//! Per-generation summaries recorded by the engine. The yielded generation
//! sequence itself remains the primary observability surface; these summaries
//! exist so a finished run can still be inspected.

use serde::{Deserialize, Serialize};

use crate::population::Population;
use crate::termination::HaltReason;

/// Summary of a single scored generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationStats {
    /// One-based generation index
    pub generation: usize,
    /// Best fitness in this generation
    pub best_fitness: f64,
    /// Worst fitness in this generation
    pub worst_fitness: f64,
    /// Mean fitness
    pub mean_fitness: f64,
    /// Sample standard deviation of fitness
    pub fitness_std: f64,
}

impl GenerationStats {
    /// Compute a summary from a fully scored population.
    pub fn from_population(population: &Population, generation: usize) -> Self {
        let fitnesses: Vec<f64> = population.iter().filter_map(|i| i.fitness).collect();
        let best = fitnesses
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let worst = fitnesses.iter().copied().fold(f64::INFINITY, f64::min);
        Self {
            generation,
            best_fitness: best,
            worst_fitness: worst,
            mean_fitness: population.mean_fitness().unwrap_or(0.0),
            fitness_std: population.fitness_std().unwrap_or(0.0),
        }
    }
}

/// Statistics for an entire run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// One summary per generation, in order
    pub generations: Vec<GenerationStats>,
    /// Why the run stopped, if it has
    pub halt_reason: Option<String>,
}

impl EvolutionStats {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one generation's summary.
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Number of generations recorded.
    pub fn num_generations(&self) -> usize {
        self.generations.len()
    }

    /// Best fitness per generation, in order.
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Record the halt reason.
    pub fn set_halt_reason(&mut self, reason: HaltReason) {
        self.halt_reason = Some(match reason {
            HaltReason::TargetReached => "target fitness reached".to_string(),
            HaltReason::GenerationCeiling => "generation ceiling reached".to_string(),
        });
    }
}

pub mod prelude {
    pub use super::{EvolutionStats, GenerationStats};
}
