//! Species counterpoint strategy sets
//!
//! Each species module supplies the pieces the shared engine needs: a fitness
//! strategy built from the cantus firmus and a weight table, a mutation
//! operator constrained to that species' legal intervals, a seed population
//! builder and an acceptance target. [`compose`] wires them together.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::engine::Evolution;
use crate::error::{EvoResult, EvolutionError};
use crate::fitness::FitnessStrategy;
use crate::genome::{CantusFirmus, Melody};
use crate::operators::{EliteBreeder, MutationOperator, RouletteSelection, SinglePointCrossover};
use crate::population::Population;
use crate::termination::{AnyOf, HaltStrategy, MaxGenerations};

pub mod first;
pub mod fourth;
pub mod second;
pub mod third;

/// The species of counterpoint to compose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Species {
    /// Note against note
    First,
    /// Two notes against one
    Second,
    /// Four notes against one
    Third,
    /// Syncopated note against note
    Fourth,
}

impl Species {
    /// Counterpoint notes per cantus firmus note.
    pub fn ratio(&self) -> usize {
        match self {
            Species::First | Species::Fourth => 1,
            Species::Second => 2,
            Species::Third => 4,
        }
    }

    /// Chromosome length for a cantus firmus of `cantus_len` notes.
    ///
    /// The final bar always holds a single note, so the florid species run
    /// one bar short of a full multiple.
    pub fn chromosome_length(&self, cantus_len: usize) -> usize {
        match self {
            Species::First | Species::Fourth => cantus_len,
            Species::Second => cantus_len * 2 - 1,
            Species::Third => cantus_len * 4 - 3,
        }
    }

    /// The conventional species number, 1 through 4.
    pub fn number(&self) -> u8 {
        match self {
            Species::First => 1,
            Species::Second => 2,
            Species::Third => 3,
            Species::Fourth => 4,
        }
    }
}

impl TryFrom<u8> for Species {
    type Error = EvolutionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Species::First),
            2 => Ok(Species::Second),
            3 => Ok(Species::Third),
            4 => Ok(Species::Fourth),
            other => Err(EvolutionError::Configuration(format!(
                "species must be 1-4, got {other}"
            ))),
        }
    }
}

/// Named reward and punishment weights for one species' fitness rules.
///
/// Rewards add to the score when a rule is satisfied, punishments subtract
/// when it is violated. Constructed once per run and read-only thereafter;
/// the per-species constructors carry the magnitudes the rules were tuned
/// with, and a perfect solution scores exactly the sum of its rewards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleWeights {
    /// Opening on a fifth or octave
    pub reward_first: f64,
    pub punish_first: f64,
    /// Closing on an octave
    pub reward_last: f64,
    pub punish_last: f64,
    /// Stepwise motion onto the final note
    pub reward_last_step: f64,
    pub punish_last_step: f64,
    /// Contrary motion onto the final note
    pub reward_last_motion: f64,
    pub punish_last_motion: f64,
    /// Repeating the antepenultimate note into the penultimate
    pub punish_repeated_penultimate: f64,
    /// Approaching the penultimate note from nearby
    pub reward_penultimate_preparation: f64,
    pub punish_penultimate_preparation: f64,
    /// Consecutive perfect vertical intervals
    pub punish_parallel_perfects: f64,
    /// Contour counts past their thresholds
    pub punish_repeats: f64,
    pub punish_thirds: f64,
    pub punish_sixths: f64,
    pub punish_parallel_motion: f64,
    /// Any dissonant vertical interval outside a sanctioned figure
    pub punish_dissonance: f64,
    /// A weak-beat passing dissonance in stepwise motion
    pub reward_stepwise_dissonance: f64,
    /// A correctly prepared and resolved suspension
    pub reward_suspension: f64,
}

impl RuleWeights {
    /// Weights for first species: light uniform punishments.
    pub fn first_species() -> Self {
        Self {
            reward_first: 1.0,
            punish_first: 0.1,
            reward_last: 1.0,
            punish_last: 0.1,
            reward_last_step: 1.0,
            punish_last_step: 0.7,
            reward_last_motion: 1.0,
            punish_last_motion: 0.1,
            punish_repeated_penultimate: 0.1,
            reward_penultimate_preparation: 1.0,
            punish_penultimate_preparation: 0.1,
            punish_parallel_perfects: 0.1,
            punish_repeats: 0.1,
            punish_thirds: 0.1,
            punish_sixths: 0.1,
            punish_parallel_motion: 0.1,
            punish_dissonance: 0.1,
            reward_stepwise_dissonance: 1.0,
            reward_suspension: 1.0,
        }
    }

    /// Weights for second species: cadence violations cost more.
    pub fn second_species() -> Self {
        Self {
            punish_last_step: 0.7,
            punish_penultimate_preparation: 0.7,
            punish_parallel_perfects: 0.5,
            ..Self::first_species()
        }
    }

    /// Weights for third species, identical to second.
    pub fn third_species() -> Self {
        Self::second_species()
    }

    /// Weights for fourth species: as second, with suspensions rewarded.
    pub fn fourth_species() -> Self {
        Self::second_species()
    }

    /// Maximum attainable first-species score: all four boundary rewards,
    /// no violations.
    pub fn first_species_target(&self) -> f64 {
        self.reward_first
            + self.reward_last
            + self.reward_last_motion
            + self.reward_penultimate_preparation
    }

    /// Base acceptance score for species 2 through 4: the five boundary and
    /// cadence rewards. Sanctioned dissonances raise the target further,
    /// one reward each.
    pub fn cadence_target(&self) -> f64 {
        self.first_species_target() + self.reward_last_step
    }
}

/// Immutable parameter bundle for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Number of candidate solutions per generation
    pub population_size: usize,
    /// Probability each gene mutates, in [0, 1]
    pub mutation_rate: f64,
    /// Largest interval (in diatonic steps) a mutation may place above the
    /// cantus firmus
    pub mutation_range: i32,
    /// Generation ceiling after which the run halts unconverged
    pub max_generations: usize,
    /// Fitness rule weights
    pub weights: RuleWeights,
}

impl SpeciesConfig {
    /// Default parameters for a species: population 1000, mutation rate 0.4,
    /// mutation range 9, ceiling 100 generations.
    pub fn for_species(species: Species) -> Self {
        let weights = match species {
            Species::First => RuleWeights::first_species(),
            Species::Second => RuleWeights::second_species(),
            Species::Third => RuleWeights::third_species(),
            Species::Fourth => RuleWeights::fourth_species(),
        };
        Self {
            population_size: 1000,
            mutation_rate: 0.4,
            mutation_range: 9,
            max_generations: 100,
            weights,
        }
    }

    /// Reject ill-defined parameters before the engine starts.
    pub fn validate(&self) -> EvoResult<()> {
        if self.population_size < 2 {
            return Err(EvolutionError::Configuration(format!(
                "population size must be > 1, got {}",
                self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvolutionError::Configuration(format!(
                "mutation rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.mutation_range < 2 {
            return Err(EvolutionError::Configuration(format!(
                "mutation range must cover at least a third (2), got {}",
                self.mutation_range
            )));
        }
        if self.max_generations == 0 {
            return Err(EvolutionError::Configuration(
                "generation ceiling must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// The outcome of [`compose`]: the best counterpoint found, alongside the
/// inputs a renderer needs to typeset it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub species: Species,
    pub cantus_firmus: CantusFirmus,
    pub counterpoint: Melody,
    pub fitness: f64,
    /// True if the acceptance target was reached; false means the generation
    /// ceiling fired and `counterpoint` is the best candidate found
    pub converged: bool,
    pub generations: usize,
}

/// Compose a counterpoint voice against `cantus_firmus` in the given species.
///
/// Runs the full genetic algorithm with the species' strategy set; `seed`
/// makes the run reproducible. Fails fast on invalid configuration or a
/// cantus firmus too short to carry a cadence.
pub fn compose(
    cantus_firmus: &CantusFirmus,
    species: Species,
    config: &SpeciesConfig,
    seed: u64,
) -> EvoResult<Solution> {
    config.validate()?;
    if cantus_firmus.len() < 3 {
        return Err(EvolutionError::Configuration(format!(
            "cantus firmus must have at least 3 notes, got {}",
            cantus_firmus.len()
        )));
    }
    let mut rng = StdRng::seed_from_u64(seed);
    match species {
        Species::First => {
            let population =
                first::create_population(config.population_size, cantus_firmus, &mut rng);
            evolve(
                species,
                cantus_firmus,
                config,
                population,
                first::FirstSpecies::new(cantus_firmus.clone(), config.weights.clone()),
                first::FirstSpeciesMutation::new(
                    cantus_firmus.clone(),
                    config.mutation_rate,
                    config.mutation_range,
                ),
                crate::termination::TargetFitness::new(config.weights.first_species_target()),
                rng,
            )
        }
        Species::Second => {
            let population =
                second::create_population(config.population_size, cantus_firmus, &mut rng);
            evolve(
                species,
                cantus_firmus,
                config,
                population,
                second::SecondSpecies::new(cantus_firmus.clone(), config.weights.clone()),
                second::SecondSpeciesMutation::new(
                    cantus_firmus.clone(),
                    config.mutation_rate,
                    config.mutation_range,
                ),
                second::PassingToneTarget::new(cantus_firmus.clone(), &config.weights, 2),
                rng,
            )
        }
        Species::Third => {
            let population =
                third::create_population(config.population_size, cantus_firmus, &mut rng);
            evolve(
                species,
                cantus_firmus,
                config,
                population,
                third::ThirdSpecies::new(cantus_firmus.clone(), config.weights.clone()),
                third::ThirdSpeciesMutation::new(
                    cantus_firmus.clone(),
                    config.mutation_rate,
                    config.mutation_range,
                ),
                second::PassingToneTarget::new(cantus_firmus.clone(), &config.weights, 4),
                rng,
            )
        }
        Species::Fourth => {
            let population =
                fourth::create_population(config.population_size, cantus_firmus, &mut rng);
            evolve(
                species,
                cantus_firmus,
                config,
                population,
                fourth::FourthSpecies::new(cantus_firmus.clone(), config.weights.clone()),
                fourth::FourthSpeciesMutation::new(
                    cantus_firmus.clone(),
                    config.mutation_rate,
                    config.mutation_range,
                ),
                fourth::SuspensionTarget::new(cantus_firmus.clone(), &config.weights),
                rng,
            )
        }
    }
}

fn evolve<F, M, H>(
    species: Species,
    cantus_firmus: &CantusFirmus,
    config: &SpeciesConfig,
    population: Population,
    fitness: F,
    mutation: M,
    target: H,
    rng: StdRng,
) -> EvoResult<Solution>
where
    F: FitnessStrategy,
    M: MutationOperator,
    H: HaltStrategy + 'static,
{
    let breeder = EliteBreeder::new(RouletteSelection::new(), SinglePointCrossover::new(), mutation);
    let halt = AnyOf::new(vec![
        Box::new(target),
        Box::new(MaxGenerations::new(config.max_generations)),
    ]);
    let result = Evolution::new(population, fitness, breeder, halt, rng)?.run()?;
    Ok(Solution {
        species,
        cantus_firmus: cantus_firmus.clone(),
        counterpoint: result.best.melody.clone(),
        fitness: result.best.fitness_or_worst(),
        converged: result.converged,
        generations: result.generations,
    })
}

pub mod prelude {
    pub use super::{compose, RuleWeights, Solution, Species, SpeciesConfig};
}
