//! Two-voice music theory primitives
//!
//! Pitches are diatonic scale indices, so vertical intervals are diatonic
//! step counts: 0 = unison, 2 = third, 4 = fifth, 5 = sixth, 7 = octave,
//! 9 = tenth, 11 = twelfth. All classification here works on those counts.

/// Consonant vertical intervals above the cantus firmus, usable when seeding
/// and mutating candidate melodies.
pub const CONSONANT_INTERVALS: [i32; 6] = [2, 4, 5, 7, 9, 11];

/// Dissonant intervals tolerated on weak beats in florid species when part of
/// stepwise passing motion.
pub const PASSING_INTERVALS: [i32; 4] = [3, 6, 8, 10];

/// Returns true if the vertical interval (in diatonic steps) is consonant.
pub fn is_consonant(interval: i32) -> bool {
    matches!(interval.abs() % 7, 0 | 2 | 4 | 5)
}

/// Returns true if the interval is a perfect consonance (unison, fifth or
/// octave and their compounds). Parallel motion into these is the classical
/// parallel-fifths/octaves violation.
pub fn is_perfect(interval: i32) -> bool {
    matches!(interval.abs() % 7, 0 | 4)
}

/// Relative motion of two voices between successive notes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Both voices move in the same direction by different amounts
    Similar,
    /// Both voices move in the same direction by the same amount
    Parallel,
    /// The voices move in opposite directions
    Contrary,
    /// One voice holds while the other moves (or both hold)
    Oblique,
}

/// Classify the motion between two successive two-voice sonorities.
///
/// `upper` and `lower` are (previous, current) pitch pairs for each voice.
pub fn classify_motion(upper: (i32, i32), lower: (i32, i32)) -> Motion {
    let upper_step = upper.1 - upper.0;
    let lower_step = lower.1 - lower.0;
    if upper_step == 0 || lower_step == 0 {
        Motion::Oblique
    } else if (upper_step > 0) == (lower_step > 0) {
        if upper_step == lower_step {
            Motion::Parallel
        } else {
            Motion::Similar
        }
    } else {
        Motion::Contrary
    }
}

/// Returns true if both voices move in the same direction (parallel or
/// similar motion).
pub fn is_direct(upper: (i32, i32), lower: (i32, i32)) -> bool {
    matches!(
        classify_motion(upper, lower),
        Motion::Parallel | Motion::Similar
    )
}

/// Returns true if the note at `position` sits in the middle of stepwise
/// motion continuing in one direction, i.e. a passing note.
pub fn is_stepwise_motion(melody: &[i32], position: usize) -> bool {
    if position == 0 || position + 1 >= melody.len() {
        return false;
    }
    let pre = melody[position - 1];
    let note = melody[position];
    let post = melody[position + 1];
    (pre - note).abs() == 1 && (note - post).abs() == 1 && pre != post
}

/// Returns true if the note at `position` forms a correctly prepared
/// suspension: a dissonance against the next cantus-firmus note that resolves
/// downward by step onto a consonance.
pub fn is_suspension(melody: &[i32], position: usize, cantus_firmus: &[i32]) -> bool {
    if position + 1 >= melody.len() || position + 1 >= cantus_firmus.len() {
        return false;
    }
    let suspension_interval = melody[position] - cantus_firmus[position + 1];
    let resolution_interval = melody[position + 1] - cantus_firmus[position + 1];
    (suspension_interval == 3 && resolution_interval == 2)
        || (suspension_interval == 6 && resolution_interval == 5)
}
