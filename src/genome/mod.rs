//! Genome representations
//!
//! A candidate solution is a [`Melody`]: a fixed-length sequence of diatonic
//! pitch indices, one gene per note to compose. The [`CantusFirmus`] is the
//! immutable reference voice every melody is scored against.

pub mod cantus;
pub mod melody;

pub use cantus::CantusFirmus;
pub use melody::Melody;

pub mod prelude {
    pub use super::{CantusFirmus, Melody};
}
