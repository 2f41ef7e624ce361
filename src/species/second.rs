//! Second species: two notes against one
//!
//! Each cantus firmus note carries two counterpoint notes except the last,
//! which carries one, so the chromosome holds 2n - 1 pitches. Strong beats
//! (even indices) must be consonant; a weak-beat dissonance is tolerated,
//! and rewarded, when it passes stepwise between its neighbours.

use rand::Rng;

use crate::fitness::FitnessStrategy;
use crate::genome::{CantusFirmus, Melody};
use crate::operators::MutationOperator;
use crate::population::{Individual, Population};
use crate::species::RuleWeights;
use crate::termination::{EvolutionState, HaltReason, HaltStrategy};
use crate::theory::{is_consonant, is_perfect, is_stepwise_motion, CONSONANT_INTERVALS, PASSING_INTERVALS};

/// Second-species fitness rules over a fixed cantus firmus.
pub struct SecondSpecies {
    cantus_firmus: CantusFirmus,
    weights: RuleWeights,
}

impl SecondSpecies {
    pub fn new(cantus_firmus: CantusFirmus, weights: RuleWeights) -> Self {
        Self {
            cantus_firmus,
            weights,
        }
    }
}

impl FitnessStrategy for SecondSpecies {
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

        // Dissonance handling: forbidden on strong beats, a passing figure
        // on weak beats.
        for (i, &note) in cp.iter().enumerate() {
            let interval = note - cf[i / 2];
            if !is_consonant(interval) {
                if i % 2 == 1 && is_stepwise_motion(cp, i) {
                    score += w.reward_stepwise_dissonance;
                } else {
                    score -= w.punish_dissonance;
                }
            }
        }

        // Perfect intervals on successive strong beats are accented parallels.
        for i in (2..len).step_by(2) {
            let last_interval = cp[i - 2] - cf[i / 2 - 1];
            let interval = cp[i] - cf[i / 2];
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

/// Rewrites genes to intervals legal for their beat: consonances on strong
/// beats, consonances or passing dissonances on weak beats.
pub struct SecondSpeciesMutation {
    cantus_firmus: CantusFirmus,
    rate: f64,
    strong_intervals: Vec<i32>,
    weak_intervals: Vec<i32>,
}

impl SecondSpeciesMutation {
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

impl MutationOperator for SecondSpeciesMutation {
    fn mutate<R: Rng>(&self, melody: &mut Melody, rng: &mut R) {
        for (locus, pitch) in melody.pitches_mut().iter_mut().enumerate() {
            if rng.gen::<f64>() < self.rate {
                let intervals = if locus % 2 == 1 {
                    &self.weak_intervals
                } else {
                    &self.strong_intervals
                };
                let interval = intervals[rng.gen_range(0..intervals.len())];
                *pitch = self.cantus_firmus[locus / 2] + interval;
            }
        }
    }
}

/// Seed a population of 2n - 1 note candidates, weak beats drawn from the
/// wider passing-tone interval set.
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
    let length = cantus_firmus.len() * 2 - 1;
    (0..size)
        .map(|_| {
            let pitches = (0..length)
                .map(|i| {
                    let interval = if i % 2 == 1 {
                        weak[rng.gen_range(0..weak.len())]
                    } else {
                        CONSONANT_INTERVALS[rng.gen_range(0..CONSONANT_INTERVALS.len())]
                    };
                    cantus_firmus[i / 2] + interval
                })
                .collect();
            Individual::new(Melody::new(pitches))
        })
        .collect()
}

/// Acceptance target for the florid species.
///
/// The base target assumes an all-consonant solution; every dissonance in
/// the fittest chromosome raises it by one stepwise reward, since a legal
/// dissonance earns that reward instead of a punishment.
pub struct PassingToneTarget {
    cantus_firmus: CantusFirmus,
    base: f64,
    reward: f64,
    ratio: usize,
}

impl PassingToneTarget {
    pub fn new(cantus_firmus: CantusFirmus, weights: &RuleWeights, ratio: usize) -> Self {
        Self {
            cantus_firmus,
            base: weights.cadence_target(),
            reward: weights.reward_stepwise_dissonance,
            ratio,
        }
    }
}

impl HaltStrategy for PassingToneTarget {
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason> {
        let best = state.population.best()?;
        let dissonances = best
            .melody
            .pitches()
            .iter()
            .enumerate()
            .filter(|&(i, &pitch)| !is_consonant(pitch - self.cantus_firmus[i / self.ratio]))
            .count();
        let target = self.base + self.reward * dissonances as f64;
        (best.fitness_or_worst() >= target).then_some(HaltReason::TargetReached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cantus_firmus() -> CantusFirmus {
        CantusFirmus::new(vec![6, 6, 5]).unwrap()
    }

    #[test]
    fn test_all_consonant_solution_scores_cadence_target() {
        let fitness = SecondSpecies::new(cantus_firmus(), RuleWeights::second_species());
        // Intervals 4, 3(passing), 2, 5, 7 with a stepwise descent through
        // the dissonance, closing up by step against the falling cantus.
        let score = fitness.evaluate(&Melody::new(vec![10, 9, 8, 11, 12]));
        assert_eq!(score, 6.0);
    }

    #[test]
    fn test_weak_beat_passing_dissonance_is_rewarded() {
        let fitness = SecondSpecies::new(cantus_firmus(), RuleWeights::second_species());
        let passing = fitness.evaluate(&Melody::new(vec![10, 9, 8, 11, 12]));
        // Same dissonance approached as a neighbour note, not stepwise.
        let neighbour = fitness.evaluate(&Melody::new(vec![10, 9, 10, 11, 12]));
        assert!(passing > neighbour);
    }

    #[test]
    fn test_strong_beat_dissonance_is_punished() {
        let fitness = SecondSpecies::new(cantus_firmus(), RuleWeights::second_species());
        let consonant = fitness.evaluate(&Melody::new(vec![10, 11, 8, 11, 12]));
        // Position 2 a fourth above the cantus.
        let dissonant = fitness.evaluate(&Melody::new(vec![10, 11, 9, 11, 12]));
        assert!(dissonant < consonant);
    }

    #[test]
    fn test_halt_raises_target_per_dissonance() {
        let cf = cantus_firmus();
        let weights = RuleWeights::second_species();
        let target = PassingToneTarget::new(cf, &weights, 2);

        // One dissonance in the fittest raises the target to 6.0.
        let melody = Melody::new(vec![10, 9, 8, 11, 12]);
        let mut population = Population::new();
        population.push(Individual::with_fitness(melody.clone(), 5.9));
        let history = [5.9];
        let state = EvolutionState {
            generation: 1,
            population: &population,
            fitness_history: &history,
        };
        assert_eq!(target.check(&state), None);

        let mut population = Population::new();
        population.push(Individual::with_fitness(melody, 6.0));
        let history = [6.0];
        let state = EvolutionState {
            generation: 1,
            population: &population,
            fitness_history: &history,
        };
        assert_eq!(target.check(&state), Some(HaltReason::TargetReached));
    }

    #[test]
    fn test_mutation_respects_beat_structure() {
        let cf = cantus_firmus();
        let mutation = SecondSpeciesMutation::new(cf.clone(), 1.0, 11);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let mut melody = Melody::new(vec![10, 9, 8, 11, 12]);
            mutation.mutate(&mut melody, &mut rng);
            for (i, &pitch) in melody.pitches().iter().enumerate() {
                let interval = pitch - cf[i / 2];
                if i % 2 == 0 {
                    assert!(CONSONANT_INTERVALS.contains(&interval));
                } else {
                    assert!(
                        CONSONANT_INTERVALS.contains(&interval)
                            || PASSING_INTERVALS.contains(&interval)
                    );
                }
            }
        }
    }

    #[test]
    fn test_create_population_length_and_intervals() {
        let cf = CantusFirmus::new(vec![5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let population = create_population(20, &cf, &mut rng);
        assert_eq!(population.len(), 20);
        for individual in population.iter() {
            assert_eq!(individual.melody.len(), 21);
            for (i, &pitch) in individual.melody.pitches().iter().enumerate() {
                let interval = pitch - cf[i / 2];
                if i % 2 == 0 {
                    assert!(CONSONANT_INTERVALS.contains(&interval));
                } else {
                    assert!(
                        CONSONANT_INTERVALS.contains(&interval)
                            || PASSING_INTERVALS.contains(&interval)
                    );
                }
            }
        }
    }
}
