//! Third species: four notes against one
//!
//! The most florid species: four counterpoint notes per cantus firmus note,
//! one in the final bar, so the chromosome holds 4n - 3 pitches. Only the
//! first beat of each bar is strong; the three weak beats admit passing
//! dissonances in stepwise motion.

use rand::Rng;

use crate::fitness::FitnessStrategy;
use crate::genome::{CantusFirmus, Melody};
use crate::operators::MutationOperator;
use crate::population::{Individual, Population};
use crate::species::RuleWeights;
use crate::theory::{is_consonant, is_perfect, is_stepwise_motion, CONSONANT_INTERVALS, PASSING_INTERVALS};

/// Third-species fitness rules over a fixed cantus firmus.
pub struct ThirdSpecies {
    cantus_firmus: CantusFirmus,
    weights: RuleWeights,
}

impl ThirdSpecies {
    pub fn new(cantus_firmus: CantusFirmus, weights: RuleWeights) -> Self {
        Self {
            cantus_firmus,
            weights,
        }
    }
}

impl FitnessStrategy for ThirdSpecies {
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

        // Close on an octave, reached by step and by contrary motion.
        if cp[len - 1] - cf[cf.len() - 1] == 7 {
            score += w.reward_last;
        } else {
            score -= w.punish_last;
        }
        if (cp[len - 1] - cp[len - 2]).abs() == 1 {
            score += w.reward_last_step;
        } else {
            score -= w.punish_last_step;
        }
        let cantus_motion = cf[cf.len() - 1] - cf[cf.len() - 2];
        let counter_motion = cp[len - 1] - cp[len - 2];
        if (cantus_motion < 0 && counter_motion > 0) || (cantus_motion > 0 && counter_motion < 0) {
            score += w.reward_last_motion;
        } else {
            score -= w.punish_last_motion;
        }

        // Penultimate note approached from nearby, never repeated.
        let preparation = (cp[len - 2] - cp[len - 3]).abs();
        if preparation == 0 {
            score -= w.punish_repeated_penultimate;
        } else if preparation < 5 {
            score += w.reward_penultimate_preparation;
        } else {
            score -= w.punish_penultimate_preparation;
        }

        // Dissonance handling: forbidden on downbeats, a passing figure on
        // the three weak beats of each bar.
        for (i, &note) in cp.iter().enumerate() {
            let interval = note - cf[i / 4];
            if !is_consonant(interval) {
                if i % 4 != 0 && is_stepwise_motion(cp, i) {
                    score += w.reward_stepwise_dissonance;
                } else {
                    score -= w.punish_dissonance;
                }
            }
        }

        // Perfect intervals on successive downbeats are accented parallels.
        for i in (4..len).step_by(4) {
            let last_interval = cp[i - 4] - cf[i / 4 - 1];
            let interval = cp[i] - cf[i / 4];
            if is_perfect(last_interval) && is_perfect(interval) {
                score -= w.punish_parallel_perfects;
            }
        }

        // A monotonous surface repeats itself.
        let repeats = cp.windows(2).filter(|pair| pair[0] == pair[1]).count();
        if repeats as f64 > cf.len() as f64 / 2.0 {
            score -= w.punish_repeats;
        }

        score
    }
}

/// Rewrites genes to intervals legal for their beat within the bar.
pub struct ThirdSpeciesMutation {
    cantus_firmus: CantusFirmus,
    rate: f64,
    strong_intervals: Vec<i32>,
    weak_intervals: Vec<i32>,
}

impl ThirdSpeciesMutation {
    pub fn new(cantus_firmus: CantusFirmus, rate: f64, range: i32) -> Self {
        let strong_intervals: Vec<i32> = CONSONANT_INTERVALS
            .iter()
            .copied()
            .filter(|&interval| interval <= range)
            .collect();
        let weak_intervals = CONSONANT_INTERVALS
            .iter()
            .chain(PASSING_INTERVALS.iter())
            .copied()
            .filter(|&interval| interval <= range)
            .collect();
        Self {
            cantus_firmus,
            rate,
            strong_intervals,
            weak_intervals,
        }
    }
}

impl MutationOperator for ThirdSpeciesMutation {
    fn mutate<R: Rng>(&self, melody: &mut Melody, rng: &mut R) {
        for (locus, pitch) in melody.pitches_mut().iter_mut().enumerate() {
            if rng.gen::<f64>() < self.rate {
                let intervals = if locus % 4 != 0 {
                    &self.weak_intervals
                } else {
                    &self.strong_intervals
                };
                let interval = intervals[rng.gen_range(0..intervals.len())];
                *pitch = self.cantus_firmus[locus / 4] + interval;
            }
        }
    }
}

/// Seed a population of 4n - 3 note candidates.
pub fn create_population<R: Rng>(
    size: usize,
    cantus_firmus: &CantusFirmus,
    rng: &mut R,
) -> Population {
    let weak: Vec<i32> = CONSONANT_INTERVALS
        .iter()
        .chain(PASSING_INTERVALS.iter())
        .copied()
        .collect();
    let length = cantus_firmus.len() * 4 - 3;
    (0..size)
        .map(|_| {
            let pitches = (0..length)
                .map(|i| {
                    let interval = if i % 4 != 0 {
                        weak[rng.gen_range(0..weak.len())]
                    } else {
                        CONSONANT_INTERVALS[rng.gen_range(0..CONSONANT_INTERVALS.len())]
                    };
                    cantus_firmus[i / 4] + interval
                })
                .collect();
            Individual::new(Melody::new(pitches))
        })
        .collect()
}
