//! Generation breeding strategy

use rand::Rng;

use crate::operators::traits::{
    CrossoverOperator, GenerateStrategy, MutationOperator, SelectionOperator,
};
use crate::population::{Individual, Population};

/// Elitism plus roulette-wheel breeding.
///
/// The fittest half (rounded up) of a scored, sorted population is carried
/// into the next generation verbatim, cached fitness included. The remaining
/// slots are filled by drawing parent pairs with the selection operator,
/// crossing them over and mutating each child. When an odd number of slots
/// remains the second child of the final pair is discarded.
#[derive(Clone, Debug)]
pub struct EliteBreeder<S, C, M> {
    selection: S,
    crossover: C,
    mutation: M,
}

impl<S, C, M> EliteBreeder<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// Create a breeder from its three operators.
    pub fn new(selection: S, crossover: C, mutation: M) -> Self {
        Self {
            selection,
            crossover,
            mutation,
        }
    }
}

impl<S, C, M> GenerateStrategy for EliteBreeder<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    fn generate<R: Rng>(&self, population: &Population, rng: &mut R) -> Population {
        let size = population.len();
        let elite = size.div_ceil(2);

        let mut next = Population::with_capacity(size);
        for individual in population.iter().take(elite) {
            next.push(individual.clone());
        }

        let weights = population.fitness_values();
        while next.len() < size {
            let mum = &population[self.selection.select(&weights, rng)].melody;
            let dad = &population[self.selection.select(&weights, rng)].melody;

            // All melodies in one run share a length, so crossover cannot
            // fail; fall back to cloning the parents if it ever does.
            let (mut first, mut second) = match self.crossover.crossover(mum, dad, rng) {
                Ok(children) => children,
                Err(_) => (mum.clone(), dad.clone()),
            };

            self.mutation.mutate(&mut first, rng);
            next.push(Individual::new(first));
            if next.len() < size {
                self.mutation.mutate(&mut second, rng);
                next.push(Individual::new(second));
            }
        }

        next
    }
}
