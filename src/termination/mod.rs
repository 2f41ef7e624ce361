//! Halting strategies
//!
//! A halt strategy is a predicate over the scored state of a generation. The
//! engine imposes no generation ceiling of its own; composing a species
//! threshold with [`MaxGenerations`] through [`AnyOf`] is the caller's
//! responsibility.

use crate::population::Population;

/// What made a run stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// The fittest genome reached the species' acceptance threshold
    TargetReached,
    /// The configured generation ceiling was hit; the best-so-far genome is
    /// returned as a non-convergent result
    GenerationCeiling,
}

/// Scored per-generation state handed to halt strategies.
#[derive(Clone, Copy, Debug)]
pub struct EvolutionState<'a> {
    /// One-based generation index (the initial population is generation 1)
    pub generation: usize,
    /// The scored, sorted population of this generation
    pub population: &'a Population,
    /// Best fitness per generation so far, most recent last
    pub fitness_history: &'a [f64],
}

impl EvolutionState<'_> {
    /// Best fitness of the current generation.
    pub fn best_fitness(&self) -> f64 {
        self.fitness_history.last().copied().unwrap_or(f64::NEG_INFINITY)
    }
}

/// Decides whether a run should stop after the current generation.
pub trait HaltStrategy: Send + Sync {
    /// Returns the halt reason if the run should stop, `None` otherwise.
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason>;
}

/// Halt once a fixed number of generations has been produced.
///
/// This is the safety net for non-convergent runs rather than an error: the
/// caller still receives the best genome found.
#[derive(Clone, Copy, Debug)]
pub struct MaxGenerations(pub usize);

impl MaxGenerations {
    /// Create a new generation ceiling.
    pub fn new(max: usize) -> Self {
        Self(max)
    }
}

impl HaltStrategy for MaxGenerations {
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason> {
        (state.generation >= self.0).then_some(HaltReason::GenerationCeiling)
    }
}

/// Halt once the fittest genome reaches a fixed fitness target.
#[derive(Clone, Copy, Debug)]
pub struct TargetFitness(pub f64);

impl TargetFitness {
    /// Create a new fitness target.
    pub fn new(target: f64) -> Self {
        Self(target)
    }
}

impl HaltStrategy for TargetFitness {
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason> {
        (state.best_fitness() >= self.0).then_some(HaltReason::TargetReached)
    }
}

/// Combine strategies; the first one that fires wins.
pub struct AnyOf {
    strategies: Vec<Box<dyn HaltStrategy>>,
}

impl AnyOf {
    /// Create a new combinator over the given strategies.
    pub fn new(strategies: Vec<Box<dyn HaltStrategy>>) -> Self {
        Self { strategies }
    }
}

impl HaltStrategy for AnyOf {
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason> {
        self.strategies.iter().find_map(|s| s.check(state))
    }
}

impl HaltStrategy for Box<dyn HaltStrategy> {
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason> {
        self.as_ref().check(state)
    }
}

pub mod prelude {
    pub use super::{
        AnyOf, EvolutionState, HaltReason, HaltStrategy, MaxGenerations, TargetFitness,
    };
}
