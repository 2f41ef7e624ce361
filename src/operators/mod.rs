//! Genetic operators
//!
//! Selection, crossover, mutation and the generate strategy that combines
//! them into the next generation.

pub mod breeding;
pub mod crossover;
pub mod selection;
pub mod traits;

pub use breeding::EliteBreeder;
pub use crossover::SinglePointCrossover;
pub use selection::RouletteSelection;
pub use traits::{CrossoverOperator, GenerateStrategy, MutationOperator, SelectionOperator};

pub mod prelude {
    pub use super::{
        CrossoverOperator, EliteBreeder, GenerateStrategy, MutationOperator, RouletteSelection,
        SelectionOperator, SinglePointCrossover,
    };
}
