//! The cantus firmus reference voice

use serde::{Deserialize, Serialize};

use crate::error::{EvolutionError, GenomeError};

/// The fixed melody a counterpoint voice is composed against.
///
/// Shared read-only by every fitness evaluation; never mutated after
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantusFirmus {
    notes: Vec<i32>,
}

impl CantusFirmus {
    /// Create a cantus firmus from diatonic pitch indices.
    ///
    /// Rejects an empty sequence: there is nothing to compose against.
    pub fn new(notes: Vec<i32>) -> Result<Self, EvolutionError> {
        if notes.is_empty() {
            return Err(GenomeError::EmptyMelody.into());
        }
        Ok(Self { notes })
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false: construction rejects the empty sequence.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The notes as a slice.
    pub fn notes(&self) -> &[i32] {
        &self.notes
    }

    /// The note at `index`.
    pub fn note(&self, index: usize) -> i32 {
        self.notes[index]
    }
}

impl std::ops::Index<usize> for CantusFirmus {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.notes[index]
    }
}
