//! Individual wrapper type

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::genome::Melody;

/// A melody paired with its cached fitness score.
///
/// Fitness is `None` until the individual has been scored; it is considered
/// stale whenever the melody changes, so mutation always clears it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// The candidate melody
    pub melody: Melody,
    /// The fitness score (None if not yet evaluated)
    pub fitness: Option<f64>,
}

impl Individual {
    /// Create a new unevaluated individual.
    pub fn new(melody: Melody) -> Self {
        Self {
            melody,
            fitness: None,
        }
    }

    /// Create an individual with a known fitness.
    pub fn with_fitness(melody: Melody, fitness: f64) -> Self {
        Self {
            melody,
            fitness: Some(fitness),
        }
    }

    /// Check if this individual has been scored.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness as f64, treating unevaluated individuals as worst possible.
    pub fn fitness_or_worst(&self) -> f64 {
        self.fitness.unwrap_or(f64::NEG_INFINITY)
    }

    /// Set the fitness score.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Take the melody out of this individual.
    pub fn into_melody(self) -> Melody {
        self.melody
    }

    /// Check if this individual scores strictly higher than another.
    ///
    /// A scored individual always beats an unscored one.
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (self.fitness, other.fitness) {
            (Some(a), Some(b)) => a > b,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

impl PartialOrd for Individual {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.fitness_or_worst()
            .partial_cmp(&other.fitness_or_worst())
    }
}
