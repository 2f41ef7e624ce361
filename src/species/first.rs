//! First species: note against note
//!
//! The strictest species. Every vertical interval must be consonant, the
//! voices open on a fifth or octave and close on an octave reached by
//! contrary motion, and the melodic surface avoids monotony: few repeated
//! notes, no long chains of parallel thirds, sixths or parallel motion.

use rand::Rng;

use crate::fitness::FitnessStrategy;
use crate::genome::{CantusFirmus, Melody};
use crate::operators::MutationOperator;
use crate::population::{Individual, Population};
use crate::species::RuleWeights;
use crate::theory::{is_consonant, is_direct, is_perfect, CONSONANT_INTERVALS};

/// First-species fitness rules over a fixed cantus firmus.
pub struct FirstSpecies {
    cantus_firmus: CantusFirmus,
    weights: RuleWeights,
}

impl FirstSpecies {
    pub fn new(cantus_firmus: CantusFirmus, weights: RuleWeights) -> Self {
        Self {
            cantus_firmus,
            weights,
        }
    }
}

impl FitnessStrategy for FirstSpecies {
    fn evaluate(&self, melody: &Melody) -> f64 {
        let cp = melody.pitches();
        let cf = self.cantus_firmus.notes();
        let w = &self.weights;
        let len = cp.len();
        let mut score = 0.0;

        // Open on a fifth or octave.
        let first_interval = cp[0] - cf[0];
        if first_interval == 7 || first_interval == 4 {
            score += w.reward_first;
        } else {
            score -= w.punish_first;
        }

        // Close on an octave.
        if cp[len - 1] - cf[len - 1] == 7 {
            score += w.reward_last;
        } else {
            score -= w.punish_last;
        }

        // Contrary motion onto the final note.
        let cantus_motion = cf[len - 1] - cf[len - 2];
        let counter_motion = cp[len - 1] - cp[len - 2];
        if (cantus_motion < 0 && counter_motion > 0) || (cantus_motion > 0 && counter_motion < 0) {
            score += w.reward_last_motion;
        } else {
            score -= w.punish_last_motion;
        }

        // The penultimate note is approached from nearby, never repeated.
        let preparation = (cp[len - 2] - cp[len - 3]).abs();
        if preparation == 0 {
            score -= w.punish_repeated_penultimate;
        } else if preparation < 5 {
            score += w.reward_penultimate_preparation;
        } else {
            score -= w.punish_penultimate_preparation;
        }

        // Every dissonant vertical interval is a violation in this species.
        for (i, &note) in cp.iter().enumerate() {
            if !is_consonant(note - cf[i]) {
                score -= w.punish_dissonance;
            }
        }

        // Walk consecutive aligned pairs for voice-leading and contour rules.
        let mut repeats = 0u32;
        let mut thirds = 0u32;
        let mut sixths = 0u32;
        let mut parallel_motion = 0u32;
        for i in 1..len {
            let last_interval = cp[i - 1] - cf[i - 1];
            let interval = cp[i] - cf[i];

            if is_perfect(last_interval) && is_perfect(interval) {
                score -= w.punish_parallel_perfects;
            }
            if cp[i] == cp[i - 1] {
                repeats += 1;
            }
            if last_interval == 2 && interval == 2 {
                thirds += 1;
            }
            if last_interval == 5 && interval == 5 {
                sixths += 1;
            }
            if is_direct((cp[i - 1], cp[i]), (cf[i - 1], cf[i])) {
                parallel_motion += 1;
            }
        }

        // Contour counts past a third of the melody length are monotonous.
        let threshold = len as f64 / 3.0;
        if f64::from(repeats) > threshold {
            score -= w.punish_repeats;
        }
        if f64::from(thirds) > threshold {
            score -= w.punish_thirds;
        }
        if f64::from(sixths) > threshold {
            score -= w.punish_sixths;
        }
        if f64::from(parallel_motion) > threshold {
            score -= w.punish_parallel_motion;
        }

        score
    }
}

/// Rewrites genes to consonant intervals above the aligned cantus note.
pub struct FirstSpeciesMutation {
    cantus_firmus: CantusFirmus,
    rate: f64,
    intervals: Vec<i32>,
}

impl FirstSpeciesMutation {
    pub fn new(cantus_firmus: CantusFirmus, rate: f64, range: i32) -> Self {
        let intervals = CONSONANT_INTERVALS
            .iter()
            .copied()
            .filter(|&interval| interval <= range)
            .collect();
        Self {
            cantus_firmus,
            rate,
            intervals,
        }
    }
}

impl MutationOperator for FirstSpeciesMutation {
    fn mutate<R: Rng>(&self, melody: &mut Melody, rng: &mut R) {
        for (locus, pitch) in melody.pitches_mut().iter_mut().enumerate() {
            if rng.gen::<f64>() < self.rate {
                let interval = self.intervals[rng.gen_range(0..self.intervals.len())];
                *pitch = self.cantus_firmus[locus] + interval;
            }
        }
    }
}

/// Seed a population of random all-consonant candidates.
pub fn create_population<R: Rng>(
    size: usize,
    cantus_firmus: &CantusFirmus,
    rng: &mut R,
) -> Population {
    (0..size)
        .map(|_| {
            let pitches = cantus_firmus
                .notes()
                .iter()
                .map(|&note| note + CONSONANT_INTERVALS[rng.gen_range(0..CONSONANT_INTERVALS.len())])
                .collect();
            Individual::new(Melody::new(pitches))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cantus_firmus() -> CantusFirmus {
        CantusFirmus::new(vec![5, 7, 6]).unwrap()
    }

    #[test]
    fn test_perfect_solution_scores_maximum() {
        // Intervals 7, 2, 7: correct boundaries, contrary close, close
        // preparation, no dissonance, no contour violations.
        let fitness = FirstSpecies::new(cantus_firmus(), RuleWeights::first_species());
        let score = fitness.evaluate(&Melody::new(vec![12, 9, 13]));
        assert_eq!(score, 4.0);
    }

    #[test]
    fn test_dissonant_middle_interval_scores_below_maximum() {
        // Interval 3 at position 1 is a fourth.
        let fitness = FirstSpecies::new(cantus_firmus(), RuleWeights::first_species());
        let score = fitness.evaluate(&Melody::new(vec![12, 10, 13]));
        assert!(score < 4.0);
    }

    #[test]
    fn test_wrong_opening_interval_is_punished() {
        let fitness = FirstSpecies::new(cantus_firmus(), RuleWeights::first_species());
        // Opening on a third instead of a fifth or octave.
        let good = fitness.evaluate(&Melody::new(vec![12, 9, 13]));
        let bad = fitness.evaluate(&Melody::new(vec![7, 9, 13]));
        assert!(bad < good);
    }

    #[test]
    fn test_repeated_penultimate_is_punished() {
        let cf = CantusFirmus::new(vec![5, 7, 6, 5]).unwrap();
        let fitness = FirstSpecies::new(cf, RuleWeights::first_species());
        let repeated = fitness.evaluate(&Melody::new(vec![12, 11, 11, 12]));
        let prepared = fitness.evaluate(&Melody::new(vec![12, 14, 11, 12]));
        assert!(repeated < prepared);
    }

    #[test]
    fn test_parallel_perfects_are_punished() {
        let cf = CantusFirmus::new(vec![5, 6, 7, 6]).unwrap();
        let fitness = FirstSpecies::new(cf, RuleWeights::first_species());
        // Octaves all the way against thirds and sixths in the body.
        let parallel = fitness.evaluate(&Melody::new(vec![12, 13, 14, 13]));
        let mixed = fitness.evaluate(&Melody::new(vec![12, 11, 12, 13]));
        assert!(parallel < mixed);
    }

    #[test]
    fn test_mutation_respects_rate_and_range() {
        let cf = CantusFirmus::new(vec![1, 1, 1, 1, 1]).unwrap();
        // Rate 1 and range 2 force every gene to a third above the cantus.
        let mutation = FirstSpeciesMutation::new(cf, 1.0, 2);
        let mut melody = Melody::new(vec![5, 6, 7, 8, 9]);
        let mut rng = StdRng::seed_from_u64(0);
        mutation.mutate(&mut melody, &mut rng);
        assert_eq!(melody.pitches(), &[3, 3, 3, 3, 3]);
    }

    #[test]
    fn test_zero_rate_mutation_is_identity() {
        let mutation = FirstSpeciesMutation::new(cantus_firmus(), 0.0, 9);
        let mut melody = Melody::new(vec![12, 9, 13]);
        let mut rng = StdRng::seed_from_u64(1);
        mutation.mutate(&mut melody, &mut rng);
        assert_eq!(melody.pitches(), &[12, 9, 13]);
    }

    #[test]
    fn test_create_population_uses_consonant_intervals() {
        let cf = cantus_firmus();
        let mut rng = StdRng::seed_from_u64(2);
        let population = create_population(20, &cf, &mut rng);
        assert_eq!(population.len(), 20);
        for individual in population.iter() {
            assert_eq!(individual.melody.len(), 3);
            for (i, &pitch) in individual.melody.pitches().iter().enumerate() {
                assert!(CONSONANT_INTERVALS.contains(&(pitch - cf[i])));
            }
        }
    }
}
