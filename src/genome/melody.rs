//! The melody genome

use serde::{Deserialize, Serialize};

use crate::error::GenomeError;

/// A candidate counterpoint voice: a fixed-length sequence of diatonic pitch
/// indices.
///
/// Melodies are value-like; crossover and mutation produce or rewrite owned
/// copies, so parents and children never alias.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Melody {
    pitches: Vec<i32>,
}

impl Melody {
    /// Create a melody from pitch indices.
    pub fn new(pitches: Vec<i32>) -> Self {
        Self { pitches }
    }

    /// Number of notes.
    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    /// True if the melody has no notes.
    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    /// The pitches as a slice.
    pub fn pitches(&self) -> &[i32] {
        &self.pitches
    }

    /// Mutable access to the pitches.
    pub fn pitches_mut(&mut self) -> &mut [i32] {
        &mut self.pitches
    }

    /// Consume the melody, returning its pitches.
    pub fn into_pitches(self) -> Vec<i32> {
        self.pitches
    }

    /// Splice this melody with another at `point`, producing two complementary
    /// children: `self[..point] + other[point..]` and its mirror.
    ///
    /// Fails if the parents differ in length; the splice point must lie within
    /// the melody.
    pub fn splice(&self, other: &Melody, point: usize) -> Result<(Melody, Melody), GenomeError> {
        if self.len() != other.len() {
            return Err(GenomeError::LengthMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        debug_assert!(point <= self.len());
        let mut first = self.pitches[..point].to_vec();
        first.extend_from_slice(&other.pitches[point..]);
        let mut second = other.pitches[..point].to_vec();
        second.extend_from_slice(&self.pitches[point..]);
        Ok((Melody::new(first), Melody::new(second)))
    }
}

impl std::ops::Index<usize> for Melody {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        &self.pitches[index]
    }
}

impl From<Vec<i32>> for Melody {
    fn from(pitches: Vec<i32>) -> Self {
        Self::new(pitches)
    }
}
