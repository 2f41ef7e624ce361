//! Operator traits
//!
//! The seams where species-specific behaviour plugs into the shared engine.
//! Crossover and selection are shared across species; mutation is the one
//! operator each species supplies itself, since legal pitches depend on the
//! species' interval rules.

use rand::Rng;

use crate::error::GenomeError;
use crate::genome::Melody;
use crate::population::Population;

/// Selects a breeding parent from a scored population.
pub trait SelectionOperator: Send + Sync {
    /// Pick one index given the population's fitness values, in order.
    fn select<R: Rng>(&self, fitness: &[f64], rng: &mut R) -> usize;
}

/// Combines two parent melodies into two complementary children.
pub trait CrossoverOperator: Send + Sync {
    /// Breed two parents of equal length.
    ///
    /// Fails if the parent lengths differ; children carry no fitness yet.
    fn crossover<R: Rng>(
        &self,
        mum: &Melody,
        dad: &Melody,
        rng: &mut R,
    ) -> Result<(Melody, Melody), GenomeError>;
}

/// Applies random changes to a melody in place.
///
/// Implementations carry their own mutation rate, range and whatever domain
/// context (the cantus firmus, legal interval tables) the species needs.
pub trait MutationOperator: Send + Sync {
    /// Mutate the melody; any cached fitness on the owning individual is
    /// stale afterwards.
    fn mutate<R: Rng>(&self, melody: &mut Melody, rng: &mut R);
}

/// Produces the next population from a scored, sorted one.
pub trait GenerateStrategy: Send + Sync {
    /// Build the next generation; must preserve the population size.
    fn generate<R: Rng>(&self, population: &Population, rng: &mut R) -> Population;
}
