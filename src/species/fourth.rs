//! Fourth species: syncopated note against note
//!
//! One counterpoint note per cantus firmus note, but tied across the bar
//! line: a note held into the next bar may form a dissonance against that
//! bar's cantus note, provided it resolves down by step onto a consonance.
//! These suspensions are the point of the species and are rewarded.

use rand::Rng;

use crate::fitness::FitnessStrategy;
use crate::genome::{CantusFirmus, Melody};
use crate::operators::MutationOperator;
use crate::population::{Individual, Population};
use crate::species::RuleWeights;
use crate::termination::{EvolutionState, HaltReason, HaltStrategy};
use crate::theory::{is_consonant, is_perfect, is_suspension, CONSONANT_INTERVALS};

/// Seeded and mutated pitches stay below this register ceiling.
const PITCH_CEILING: i32 = 17;

/// Count the correctly formed suspensions in a counterpoint voice.
fn suspension_count(cp: &[i32], cf: &[i32]) -> usize {
    (1..cp.len() - 1)
        .filter(|&i| is_suspension(cp, i, cf))
        .count()
}

/// Fourth-species fitness rules over a fixed cantus firmus.
pub struct FourthSpecies {
    cantus_firmus: CantusFirmus,
    weights: RuleWeights,
}

impl FourthSpecies {
    pub fn new(cantus_firmus: CantusFirmus, weights: RuleWeights) -> Self {
        Self {
            cantus_firmus,
            weights,
        }
    }
}

impl FitnessStrategy for FourthSpecies {
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
        if cp[len - 1] - cf[len - 1] == 7 {
            score += w.reward_last;
        } else {
            score -= w.punish_last;
        }
        if (cp[len - 1] - cp[len - 2]).abs() == 1 {
            score += w.reward_last_step;
        } else {
            score -= w.punish_last_step;
        }
        let cantus_motion = cf[len - 1] - cf[len - 2];
        let counter_motion = cp[len - 1] - cp[len - 2];
        if (cantus_motion < 0 && counter_motion > 0) || (cantus_motion > 0 && counter_motion < 0) {
            score += w.reward_last_motion;
        } else {
            score -= w.punish_last_motion;
        }

        // The tied texture keeps the voice moving by step, so the penultimate
        // note must be approached from no further than a third.
        let preparation = (cp[len - 2] - cp[len - 3]).abs();
        if preparation == 0 {
            score -= w.punish_repeated_penultimate;
        } else if preparation < 2 {
            score += w.reward_penultimate_preparation;
        } else {
            score -= w.punish_penultimate_preparation;
        }

        // Aligned verticals must still be consonant; the sanctioned
        // dissonances live across the bar line and are scored below.
        for (i, &note) in cp.iter().enumerate() {
            if !is_consonant(note - cf[i]) {
                score -= w.punish_dissonance;
            }
        }

        // Voice leading over consecutive aligned pairs.
        let mut repeats = 0u32;
        for i in 1..len {
            let last_interval = cp[i - 1] - cf[i - 1];
            let interval = cp[i] - cf[i];
            if is_perfect(last_interval) && is_perfect(interval) {
                score -= w.punish_parallel_perfects;
            }
            if cp[i] == cp[i - 1] {
                repeats += 1;
            }
        }

        score += w.reward_suspension * suspension_count(cp, cf) as f64;

        // Ties make some repetition inherent; only excess is punished.
        if f64::from(repeats) > cf.len() as f64 / 2.0 {
            score -= w.punish_repeats;
        }

        score
    }
}

/// Rewrites genes to consonant intervals, capped below the register ceiling.
pub struct FourthSpeciesMutation {
    cantus_firmus: CantusFirmus,
    rate: f64,
    intervals: Vec<i32>,
}

impl FourthSpeciesMutation {
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

impl MutationOperator for FourthSpeciesMutation {
    fn mutate<R: Rng>(&self, melody: &mut Melody, rng: &mut R) {
        for (locus, pitch) in melody.pitches_mut().iter_mut().enumerate() {
            if rng.gen::<f64>() < self.rate {
                let note = self.cantus_firmus[locus];
                let in_register: Vec<i32> = self
                    .intervals
                    .iter()
                    .copied()
                    .filter(|&interval| note + interval < PITCH_CEILING)
                    .collect();
                if !in_register.is_empty() {
                    let interval = in_register[rng.gen_range(0..in_register.len())];
                    *pitch = note + interval;
                }
            }
        }
    }
}

/// Seed a population of consonant candidates below the register ceiling.
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
                .map(|&note| {
                    let in_register: Vec<i32> = CONSONANT_INTERVALS
                        .iter()
                        .copied()
                        .filter(|&interval| note + interval < PITCH_CEILING)
                        .collect();
                    note + in_register[rng.gen_range(0..in_register.len())]
                })
                .collect();
            Individual::new(Melody::new(pitches))
        })
        .collect()
}

/// Acceptance target: the cadence rewards plus one suspension reward per
/// suspension found in the fittest chromosome.
pub struct SuspensionTarget {
    cantus_firmus: CantusFirmus,
    base: f64,
    reward: f64,
}

impl SuspensionTarget {
    pub fn new(cantus_firmus: CantusFirmus, weights: &RuleWeights) -> Self {
        Self {
            cantus_firmus,
            base: weights.cadence_target(),
            reward: weights.reward_suspension,
        }
    }
}

impl HaltStrategy for SuspensionTarget {
    fn check(&self, state: &EvolutionState<'_>) -> Option<HaltReason> {
        let best = state.population.best()?;
        let suspensions =
            suspension_count(best.melody.pitches(), self.cantus_firmus.notes());
        let target = self.base + self.reward * suspensions as f64;
        (best.fitness_or_worst() >= target).then_some(HaltReason::TargetReached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cantus_firmus() -> CantusFirmus {
        CantusFirmus::new(vec![5, 7, 6, 5]).unwrap()
    }

    #[test]
    fn test_suspension_count() {
        let cf = cantus_firmus();
        // 12 held over the second bar forms a seventh against 6, resolving
        // to the sixth at 11.
        assert_eq!(suspension_count(&[12, 12, 11, 12], cf.notes()), 1);
        assert_eq!(suspension_count(&[12, 14, 11, 12], cf.notes()), 0);
    }

    #[test]
    fn test_suspended_solution_scores_above_cadence_target() {
        let fitness = FourthSpecies::new(cantus_firmus(), RuleWeights::fourth_species());
        let score = fitness.evaluate(&Melody::new(vec![12, 12, 11, 12]));
        assert_eq!(score, 6.0);
    }

    #[test]
    fn test_suspension_rewarded_over_plain_consonance() {
        let fitness = FourthSpecies::new(cantus_firmus(), RuleWeights::fourth_species());
        let suspended = fitness.evaluate(&Melody::new(vec![12, 12, 11, 12]));
        let plain = fitness.evaluate(&Melody::new(vec![12, 14, 11, 12]));
        assert!(suspended > plain);
    }

    #[test]
    fn test_aligned_dissonance_is_punished() {
        let fitness = FourthSpecies::new(cantus_firmus(), RuleWeights::fourth_species());
        let consonant = fitness.evaluate(&Melody::new(vec![12, 12, 11, 12]));
        // A fourth above the second cantus note, same cadence otherwise.
        let dissonant = fitness.evaluate(&Melody::new(vec![12, 10, 11, 12]));
        assert!(dissonant < consonant);
    }

    #[test]
    fn test_halt_raises_target_per_suspension() {
        let cf = cantus_firmus();
        let weights = RuleWeights::fourth_species();
        let target = SuspensionTarget::new(cf, &weights);

        let melody = Melody::new(vec![12, 12, 11, 12]);
        let mut population = Population::new();
        population.push(Individual::with_fitness(melody.clone(), 5.5));
        let history = [5.5];
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
    fn test_mutation_stays_below_register_ceiling() {
        let cf = CantusFirmus::new(vec![5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5]).unwrap();
        let mutation = FourthSpeciesMutation::new(cf.clone(), 1.0, 11);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut melody = Melody::new(vec![12; 11]);
            mutation.mutate(&mut melody, &mut rng);
            for (i, &pitch) in melody.pitches().iter().enumerate() {
                assert!(pitch < PITCH_CEILING);
                assert!(CONSONANT_INTERVALS.contains(&(pitch - cf[i])));
            }
        }
    }

    #[test]
    fn test_create_population_stays_below_register_ceiling() {
        let cf = CantusFirmus::new(vec![5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5]).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let population = create_population(20, &cf, &mut rng);
        for individual in population.iter() {
            assert_eq!(individual.melody.len(), 11);
            for &pitch in individual.melody.pitches() {
                assert!(pitch < PITCH_CEILING);
            }
        }
    }
}
