//! Population container
//!
//! This module provides the Population type used by the selection operators.
//! Selection relies on the population being sorted best-to-worst by fitness;
//! `sort_by_fitness` establishes that invariant.

use serde::{Deserialize, Serialize};

use crate::genome::tree::{Function, Terminal};
use crate::population::individual::Individual;

/// A population of individuals
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Population<T: Terminal, F: Function> {
    /// The individuals in this population
    individuals: Vec<Individual<T, F>>,
    /// Current generation number
    generation: usize,
}

impl<T: Terminal, F: Function> Population<T, F> {
    /// Create a new empty population
    pub fn new() -> Self {
        Self {
            individuals: Vec::new(),
            generation: 0,
        }
    }

    /// Create a population from existing individuals
    pub fn from_individuals(individuals: Vec<Individual<T, F>>) -> Self {
        Self {
            individuals,
            generation: 0,
        }
    }

    /// Get the current generation number
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Increment the generation counter
    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    /// Get the population size
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Check if the population is empty
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Get an individual by index
    pub fn get(&self, index: usize) -> Option<&Individual<T, F>> {
        self.individuals.get(index)
    }

    /// Add an individual to the population
    pub fn push(&mut self, individual: Individual<T, F>) {
        self.individuals.push(individual);
    }

    /// Iterate over individuals
    pub fn iter(&self) -> impl Iterator<Item = &Individual<T, F>> {
        self.individuals.iter()
    }

    /// Get the individuals as a slice
    ///
    /// Selection operators consume the population in this form.
    pub fn individuals(&self) -> &[Individual<T, F>] {
        &self.individuals
    }

    /// Consume the population, returning its individuals
    pub fn into_individuals(self) -> Vec<Individual<T, F>> {
        self.individuals
    }

    /// Sort best-to-worst by fitness (descending; unevaluated last)
    pub fn sort_by_fitness(&mut self) {
        self.individuals
            .sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
    }

    /// Get the best individual (first, once sorted)
    pub fn best(&self) -> Option<&Individual<T, F>> {
        self.individuals.first()
    }

    /// Get the worst individual (last, once sorted)
    pub fn worst(&self) -> Option<&Individual<T, F>> {
        self.individuals.last()
    }

    /// Get the `n` best individuals as a prefix slice
    ///
    /// A pure slice of the sorted population: no randomness, no copying.
    /// Requests larger than the population truncate rather than fail.
    pub fn elite(&self, n: usize) -> &[Individual<T, F>] {
        &self.individuals[..n.min(self.individuals.len())]
    }

    /// Mean fitness over the evaluated individuals
    pub fn mean_fitness(&self) -> Option<f64> {
        let fitnesses: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();
        if fitnesses.is_empty() {
            None
        } else {
            Some(fitnesses.iter().sum::<f64>() / fitnesses.len() as f64)
        }
    }

    /// Fitness standard deviation over the evaluated individuals
    pub fn fitness_std(&self) -> Option<f64> {
        let fitnesses: Vec<f64> = self.individuals.iter().filter_map(|i| i.fitness).collect();
        if fitnesses.is_empty() {
            return None;
        }
        let mean = fitnesses.iter().sum::<f64>() / fitnesses.len() as f64;
        let variance =
            fitnesses.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / fitnesses.len() as f64;
        Some(variance.sqrt())
    }
}

impl<T: Terminal, F: Function> Default for Population<T, F> {
    fn default() -> Self {
        Self::new()
    }
}
