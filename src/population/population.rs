//! Population container

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fitness::FitnessStrategy;
use crate::population::individual::Individual;

/// An ordered collection of individuals.
///
/// After the engine's per-generation scoring step the collection is sorted by
/// non-increasing fitness; index 0 is always the fittest member.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Create an empty population.
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
        }
    }

    /// Create a population with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            individuals: Vec::with_capacity(capacity),
        }
    }

    /// Create a population from a vector of individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Population size.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index.
    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// Add an individual.
    pub fn push(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Iterate over the individuals.
    pub fn iter(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// The individuals as a slice.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// The fittest individual.
    pub fn best(&self) -> Option<&Individual> {
        self.individuals.iter().max_by(|a, b| {
            a.fitness_or_worst()
                .partial_cmp(&b.fitness_or_worst())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Sort by fitness, best first. Unevaluated individuals sink to the end.
    pub fn sort_by_fitness(&mut self) {
        self.individuals.sort_by(|a, b| {
            b.fitness_or_worst()
                .partial_cmp(&a.fitness_or_worst())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Check if every individual has been scored.
    pub fn all_evaluated(&self) -> bool {
        self.individuals.iter().all(|i| i.is_evaluated())
    }

    /// Fitness values in population order, for selection weighting.
    ///
    /// Callers must only use this on a fully scored population.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.individuals
            .iter()
            .map(|i| i.fitness_or_worst())
            .collect()
    }

    /// Score every unevaluated individual (sequential).
    pub fn evaluate<F: FitnessStrategy>(&mut self, fitness: &F) {
        for individual in &mut self.individuals {
            if !individual.is_evaluated() {
                let score = fitness.evaluate(&individual.melody);
                individual.set_fitness(score);
            }
        }
    }

    /// Mean fitness of the scored individuals.
    pub fn mean_fitness(&self) -> Option<f64> {
        let scored: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();
        if scored.is_empty() {
            None
        } else {
            Some(scored.iter().sum::<f64>() / scored.len() as f64)
        }
    }

    /// Sample standard deviation of the scored fitness values.
    pub fn fitness_std(&self) -> Option<f64> {
        let mean = self.mean_fitness()?;
        let scored: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();
        if scored.len() < 2 {
            return None;
        }
        let variance =
            scored.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / (scored.len() - 1) as f64;
        Some(variance.sqrt())
    }
}

/// Parallel evaluation support (requires `parallel` feature)
#[cfg(feature = "parallel")]
impl Population {
    /// Score every unevaluated individual in parallel.
    ///
    /// Evaluation is pure and shares only the read-only cantus firmus, so the
    /// result is identical to the sequential pass.
    pub fn evaluate_parallel<F: FitnessStrategy>(&mut self, fitness: &F) {
        self.individuals
            .par_iter_mut()
            .filter(|i| !i.is_evaluated())
            .for_each(|individual| {
                let score = fitness.evaluate(&individual.melody);
                individual.set_fitness(score);
            });
    }
}

/// Sequential fallback when the `parallel` feature is disabled
#[cfg(not(feature = "parallel"))]
impl Population {
    /// Score every unevaluated individual (sequential fallback).
    pub fn evaluate_parallel<F: FitnessStrategy>(&mut self, fitness: &F) {
        self.evaluate(fitness);
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Individual;

    fn index(&self, index: usize) -> &Self::Output {
        &self.individuals[index]
    }
}

impl IntoIterator for Population {
    type Item = Individual;
    type IntoIter = std::vec::IntoIter<Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.into_iter()
    }
}

impl FromIterator<Individual> for Population {
    fn from_iter<I: IntoIterator<Item = Individual>>(iter: I) -> Self {
        Self::from_individuals(iter.into_iter().collect())
    }
}
