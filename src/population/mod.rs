//! Population types
//!
//! An [`Individual`] pairs a melody with a cached fitness score; a
//! [`Population`] is the ordered collection of individuals one generation
//! works on.

pub mod individual;
#[allow(clippy::module_inception)]
pub mod population;

pub use individual::Individual;
pub use population::Population;

pub mod prelude {
    pub use super::{Individual, Population};
}
