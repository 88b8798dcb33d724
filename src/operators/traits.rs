//! Operator traits
//!
//! This module defines the core operator traits for genetic programming.

use rand::Rng;

use crate::genome::tree::{Function, Terminal};
use crate::population::individual::Individual;

/// Selection operator trait
///
/// Selects individuals from a population sorted best-to-worst by fitness.
pub trait SelectionOperator<T: Terminal, F: Function>: Send + Sync {
    /// Select a single individual from the population
    ///
    /// Returns the index of the selected individual.
    fn select<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> usize;

    /// Select multiple individuals from the population
    fn select_many<R: Rng>(
        &self,
        population: &[Individual<T, F>],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        (0..count).map(|_| self.select(population, rng)).collect()
    }
}

/// Variation operator trait
///
/// Produces new individuals from a population, selecting its own parents.
/// Offspring are unevaluated and carry their parent's configuration.
pub trait VariationOperator<T: Terminal, F: Function>: Send + Sync {
    /// Produce offspring from the population
    fn vary<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> Vec<Individual<T, F>>;

    /// Number of offspring produced per application
    fn offspring_count(&self) -> usize;
}
