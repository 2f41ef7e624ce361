//! Selection operators

use rand::Rng;
use rand_distr::{Distribution, WeightedIndex};

use crate::operators::traits::SelectionOperator;

/// Roulette-wheel selection (fitness proportionate).
///
/// Each individual's selection weight is proportional to its fitness. Scores
/// are shifted so every weight is non-negative before the draw, which keeps
/// the wheel well defined for populations that have been punished below zero.
#[derive(Clone, Debug, Default)]
pub struct RouletteSelection;

impl RouletteSelection {
    /// Create a new roulette selection.
    pub fn new() -> Self {
        Self
    }
}

impl SelectionOperator for RouletteSelection {
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "Population cannot be empty");

        let min_fitness = fitness
            .iter()
            .copied()
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap_or(0.0);
        let offset = if min_fitness < 0.0 { -min_fitness } else { 0.0 };

        let weights: Vec<f64> = fitness.iter().map(|f| f + offset).collect();
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            // All weights collapsed to zero; fall back to a uniform draw.
            return rng.gen_range(0..fitness.len());
        }

        match WeightedIndex::new(&weights) {
            Ok(dist) => dist.sample(rng),
            Err(_) => rng.gen_range(0..fitness.len()),
        }
    }
}
