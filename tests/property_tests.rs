//! Property-based tests for fux-evo
//!
//! Uses proptest to verify invariants and properties of the library.

use fux_evo::prelude::*;
use fux_evo::species::first::{self, FirstSpecies, FirstSpeciesMutation};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn cantus_firmus() -> CantusFirmus {
    CantusFirmus::new(vec![5, 7, 6, 5, 8, 7, 9, 8, 7, 6, 5]).unwrap()
}

fn first_species_engine(
    population_size: usize,
    ceiling: usize,
    target: f64,
    seed: u64,
) -> Evolution<
    FirstSpecies,
    EliteBreeder<RouletteSelection, SinglePointCrossover, FirstSpeciesMutation>,
    AnyOf,
> {
    let cf = cantus_firmus();
    let mut rng = StdRng::seed_from_u64(seed);
    let population = first::create_population(population_size, &cf, &mut rng);
    let weights = RuleWeights::first_species();
    let halt = AnyOf::new(vec![
        Box::new(TargetFitness::new(target)),
        Box::new(MaxGenerations::new(ceiling)),
    ]);
    Evolution::new(
        population,
        FirstSpecies::new(cf.clone(), weights),
        EliteBreeder::new(
            RouletteSelection::new(),
            SinglePointCrossover::new(),
            FirstSpeciesMutation::new(cf, 0.4, 9),
        ),
        halt,
        rng,
    )
    .unwrap()
}

proptest! {
    // ==================== Population Properties ====================

    #[test]
    fn generation_size_is_invariant(size in 2usize..40, seed in any::<u64>()) {
        let engine = first_species_engine(size, 5, f64::INFINITY, seed);
        for population in engine {
            prop_assert_eq!(population.len(), size);
        }
    }

    #[test]
    fn generations_are_sorted_descending(seed in any::<u64>()) {
        let engine = first_species_engine(15, 5, f64::INFINITY, seed);
        for population in engine {
            let fitness = population.fitness_values();
            for pair in fitness.windows(2) {
                prop_assert!(pair[0] >= pair[1]);
            }
        }
    }

    #[test]
    fn best_fitness_never_decreases(seed in any::<u64>()) {
        let result = first_species_engine(20, 10, f64::INFINITY, seed)
            .run()
            .unwrap();
        let history = result.stats.best_fitness_history();
        for pair in history.windows(2) {
            prop_assert!(pair[1] >= pair[0]);
        }
    }

    // ==================== Crossover Properties ====================

    #[test]
    fn crossover_preserves_length(
        genes in prop::collection::vec(0i32..20, 2..30),
        seed in any::<u64>()
    ) {
        let mum = Melody::new(genes.clone());
        let dad = Melody::new(genes.iter().map(|g| g + 20).collect());
        let mut rng = StdRng::seed_from_u64(seed);
        let (first, second) = SinglePointCrossover::new()
            .crossover(&mum, &dad, &mut rng)
            .unwrap();
        prop_assert_eq!(first.len(), genes.len());
        prop_assert_eq!(second.len(), genes.len());
    }

    #[test]
    fn crossover_children_are_complementary(
        mum_genes in prop::collection::vec(0i32..20, 2..30),
        seed in any::<u64>()
    ) {
        let dad_genes: Vec<i32> = mum_genes.iter().map(|g| g + 100).collect();
        let mum = Melody::new(mum_genes.clone());
        let dad = Melody::new(dad_genes.clone());
        let mut rng = StdRng::seed_from_u64(seed);
        let (first, second) = SinglePointCrossover::new()
            .crossover(&mum, &dad, &mut rng)
            .unwrap();
        // Each locus holds one parent's gene in one child and the other
        // parent's gene in the other child.
        for i in 0..mum_genes.len() {
            prop_assert_eq!(first[i] + second[i], mum_genes[i] + dad_genes[i]);
        }
    }

    // ==================== Determinism ====================

    #[test]
    fn identical_seeds_give_identical_solutions(seed in any::<u64>()) {
        let cf = cantus_firmus();
        let config = SpeciesConfig {
            population_size: 20,
            max_generations: 5,
            ..SpeciesConfig::for_species(Species::First)
        };
        let a = compose(&cf, Species::First, &config, seed).unwrap();
        let b = compose(&cf, Species::First, &config, seed).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ==================== Statistical Properties ====================

#[test]
fn mutation_rate_converges_empirically() {
    // Seed every gene far above any reachable mutation product so each
    // mutation visibly changes its gene.
    let genes = 20_000;
    let rate = 0.4;
    let cf = CantusFirmus::new(vec![1; genes]).unwrap();
    let mutation = FirstSpeciesMutation::new(cf, rate, 9);
    let mut rng = StdRng::seed_from_u64(42);

    let mut melody = Melody::new(vec![100; genes]);
    mutation.mutate(&mut melody, &mut rng);
    let mutated = melody.pitches().iter().filter(|&&p| p != 100).count();

    let observed = mutated as f64 / genes as f64;
    assert!(
        (observed - rate).abs() < 0.02,
        "observed mutation rate {observed} too far from {rate}"
    );
}

#[test]
fn roulette_draws_are_fitness_proportional() {
    let selection = RouletteSelection::new();
    let weights = [1.0, 3.0];
    let mut rng = StdRng::seed_from_u64(42);
    let draws = 20_000;
    let favoured = (0..draws)
        .filter(|_| selection.select(&weights, &mut rng) == 1)
        .count();
    let observed = favoured as f64 / draws as f64;
    assert!(
        (observed - 0.75).abs() < 0.02,
        "observed selection frequency {observed} too far from 0.75"
    );
}

// ==================== Halting ====================

#[test]
fn first_species_halts_at_maximum_fitness() {
    let cf = CantusFirmus::new(vec![5, 7, 6]).unwrap();
    let weights = RuleWeights::first_species();
    let fitness = FirstSpecies::new(cf, weights.clone());

    // Octave, tenth, octave: every rule satisfied.
    let perfect = fitness.evaluate(&Melody::new(vec![12, 9, 13]));
    assert_eq!(perfect, weights.first_species_target());

    // A fourth at position 1 scores below the target.
    let dissonant = fitness.evaluate(&Melody::new(vec![12, 10, 13]));
    assert!(dissonant < weights.first_species_target());

    let halt = TargetFitness::new(weights.first_species_target());
    let mut population = Population::new();
    population.push(Individual::with_fitness(
        Melody::new(vec![12, 9, 13]),
        perfect,
    ));
    let history = [perfect];
    let state = EvolutionState {
        generation: 1,
        population: &population,
        fitness_history: &history,
    };
    assert_eq!(halt.check(&state), Some(HaltReason::TargetReached));

    let mut population = Population::new();
    population.push(Individual::with_fitness(
        Melody::new(vec![12, 10, 13]),
        dissonant,
    ));
    let history = [dissonant];
    let state = EvolutionState {
        generation: 1,
        population: &population,
        fitness_history: &history,
    };
    assert_eq!(halt.check(&state), None);
}

#[test]
fn unreachable_target_halts_at_generation_ceiling() {
    let result = first_species_engine(20, 50, f64::INFINITY, 7).run().unwrap();
    assert_eq!(result.generations, 50);
    assert!(!result.converged);
    assert_eq!(result.stats.num_generations(), 50);
}
