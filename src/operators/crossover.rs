//! Crossover operators

use rand::Rng;

use crate::error::GenomeError;
use crate::genome::Melody;
use crate::operators::traits::CrossoverOperator;

/// Single-point crossover.
///
/// Draws one splice point and produces both complementary children from it,
/// so the two offspring together carry exactly the parents' genetic material.
#[derive(Clone, Debug, Default)]
pub struct SinglePointCrossover;

impl SinglePointCrossover {
    /// Create a new single-point crossover.
    pub fn new() -> Self {
        Self
    }
}

impl CrossoverOperator for SinglePointCrossover {
    fn crossover<R: Rng>(
        &self,
        mum: &Melody,
        dad: &Melody,
        rng: &mut R,
    ) -> Result<(Melody, Melody), GenomeError> {
        if mum.len() != dad.len() {
            return Err(GenomeError::LengthMismatch {
                expected: mum.len(),
                actual: dad.len(),
            });
        }
        // A single-note melody has no interior point; the children are the
        // parents swapped.
        let point = if mum.len() < 2 {
            0
        } else {
            rng.gen_range(1..mum.len())
        };
        mum.splice(dad, point)
    }
}
