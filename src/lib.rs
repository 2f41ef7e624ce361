//! # fux-evo
//!
//! Species counterpoint composition as genetic-algorithm search.
//!
//! Given a cantus firmus, the library evolves a counterpoint voice that
//! satisfies the heuristic rules of species counterpoint (species 1 to 4).
//! Candidate melodies are scored against the rules of the chosen species,
//! the fittest half of each generation survives verbatim and the rest are
//! bred by roulette-wheel selection, crossover and mutation until a
//! solution reaches its species' acceptance target or the generation
//! ceiling fires.
//!
//! ## Core Concepts
//!
//! - **Melody as genome**: a fixed-length sequence of diatonic pitch indices
//! - **Species as strategy set**: each species supplies its own fitness
//!   rules, mutation intervals and acceptance target over a shared engine
//! - **Lazy generations**: the engine is an [`Iterator`] over scored,
//!   sorted populations; dropping it cancels the run
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use fux_evo::prelude::*;
//!
//! let cantus_firmus = CantusFirmus::new(vec![5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5])?;
//! let config = SpeciesConfig::for_species(Species::First);
//! let solution = compose(&cantus_firmus, Species::First, &config, 42)?;
//! println!("{:?} ({} generations)", solution.counterpoint, solution.generations);
//! ```

pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod operators;
pub mod population;
pub mod species;
pub mod termination;
pub mod theory;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::diagnostics::prelude::*;
    pub use crate::engine::prelude::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::species::prelude::*;
    pub use crate::termination::prelude::*;
}
