//! Fitness evaluation
//!
//! A fitness strategy is a pure function from a melody to a scalar score,
//! higher is better. Each species builds its strategy from a cantus firmus
//! and an immutable table of rule weights; the strategies themselves live in
//! [`crate::species`].

use crate::genome::Melody;

/// Fitness evaluation trait.
///
/// Evaluation must be side-effect free: the engine may score the individuals
/// of a generation in parallel against a shared read-only cantus firmus.
pub trait FitnessStrategy: Send + Sync {
    /// Score a melody (higher = better by convention; may be negative).
    fn evaluate(&self, melody: &Melody) -> f64;
}

/// Any plain function over melodies works as a fitness strategy, which keeps
/// engine tests independent of the species rules.
impl<F> FitnessStrategy for F
where
    F: Fn(&Melody) -> f64 + Send + Sync,
{
    fn evaluate(&self, melody: &Melody) -> f64 {
        self(melody)
    }
}

pub mod prelude {
    pub use super::FitnessStrategy;
}
