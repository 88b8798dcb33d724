//! Variation operators
//!
//! This module provides subtree crossover and subtree mutation over
//! double-tournament parents, the random dispatcher that picks between
//! them, and the depth filter applied to their offspring.
//!
//! Both operators clone the selected parents' trees before touching them,
//! so individuals in the live population are never mutated.

use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

use crate::genome::tree::{Function, Terminal, TreeGenome};
use crate::operators::selection::DoubleTournament;
use crate::operators::traits::{SelectionOperator, VariationOperator};
use crate::population::individual::Individual;

/// Subtree crossover
///
/// Selects two parents via independent double tournaments, swaps one
/// uniformly random subtree between clones of their trees, and wraps each
/// recombined tree in a new unevaluated individual carrying the
/// corresponding parent's configuration. Always produces two offspring.
#[derive(Clone, Debug)]
pub struct SubtreeCrossover {
    selector: DoubleTournament,
}

impl SubtreeCrossover {
    /// Create a new subtree crossover using the given parent selector
    pub fn new(selector: DoubleTournament) -> Self {
        Self { selector }
    }
}

impl<T: Terminal, F: Function> VariationOperator<T, F> for SubtreeCrossover {
    fn vary<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> Vec<Individual<T, F>> {
        let parent1 = &population[self.selector.select(population, rng)];
        let parent2 = &population[self.selector.select(population, rng)];

        let mut tree1 = parent1.genome.clone();
        let mut tree2 = parent2.genome.clone();
        let position1 = tree1.random_position(rng);
        let position2 = tree2.random_position(rng);
        TreeGenome::swap_subtrees(&mut tree1, &position1, &mut tree2, &position2);

        vec![
            Individual::from_config(parent1.config.clone(), tree1),
            Individual::from_config(parent2.config.clone(), tree2),
        ]
    }

    fn offspring_count(&self) -> usize {
        2
    }
}

/// Subtree mutation
///
/// Selects one parent via a double tournament, replaces one uniformly
/// random subtree of a clone of its tree with a freshly grown random
/// subtree bounded by the parent's configured max depth, and wraps the
/// result in a new unevaluated individual. Always produces one offspring.
#[derive(Clone, Debug)]
pub struct SubtreeMutation {
    selector: DoubleTournament,
    terminal_probability: f64,
}

impl SubtreeMutation {
    /// Create a new subtree mutation using the given parent selector
    pub fn new(selector: DoubleTournament) -> Self {
        Self {
            selector,
            terminal_probability: 0.3,
        }
    }

    /// Set the terminal probability used when growing replacement subtrees
    pub fn with_terminal_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.terminal_probability = probability;
        self
    }
}

impl<T: Terminal, F: Function> VariationOperator<T, F> for SubtreeMutation {
    fn vary<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> Vec<Individual<T, F>> {
        let parent = &population[self.selector.select(population, rng)];

        let mut tree = parent.genome.clone();
        let position = tree.random_position(rng);
        let grown = TreeGenome::generate_grow(
            rng,
            &parent.config.functions,
            &parent.config.terminals,
            parent.config.max_depth,
            self.terminal_probability,
        );
        tree.root.replace_subtree(&position, grown.root);

        vec![Individual::from_config(parent.config.clone(), tree)]
    }

    fn offspring_count(&self) -> usize {
        1
    }
}

/// Offspring dispatcher
///
/// Per call, flips a coin to apply either crossover (two offspring) or
/// mutation (one offspring) and returns whatever the chosen operator
/// produced, before any depth filtering.
#[derive(Clone, Debug)]
pub struct OffspringGenerator {
    crossover: SubtreeCrossover,
    mutation: SubtreeMutation,
    coin: Bernoulli,
}

impl OffspringGenerator {
    /// Create a new generator dispatching evenly between the operators
    pub fn new(selector: DoubleTournament) -> Self {
        Self {
            crossover: SubtreeCrossover::new(selector.clone()),
            mutation: SubtreeMutation::new(selector),
            coin: Bernoulli::new(0.5).unwrap(),
        }
    }

    /// Set the probability of dispatching to crossover
    pub fn with_crossover_probability(mut self, probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0, 1]"
        );
        self.coin = Bernoulli::new(probability).unwrap();
        self
    }

    /// Produce one batch of offspring (two via crossover or one via mutation)
    pub fn offspring<T: Terminal, F: Function, R: Rng>(
        &self,
        population: &[Individual<T, F>],
        rng: &mut R,
    ) -> Vec<Individual<T, F>> {
        if self.coin.sample(rng) {
            self.crossover.vary(population, rng)
        } else {
            self.mutation.vary(population, rng)
        }
    }
}

/// Drop offspring whose tree depth exceeds `limit`
///
/// Preserves the input order and may return an empty vector; callers must
/// tolerate a dispatch round yielding no accepted offspring.
pub fn discard_deep<T: Terminal, F: Function>(
    offspring: Vec<Individual<T, F>>,
    limit: usize,
) -> Vec<Individual<T, F>> {
    offspring
        .into_iter()
        .filter(|individual| individual.depth() <= limit)
        .collect()
}
