//! Individual wrapper type
//!
//! This module provides the Individual type that wraps a program tree with
//! its fitness and the configuration metadata it was constructed from.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::genome::tree::{Function, Terminal, TreeGenome};

/// Tag identifying which fitness measure an individual is scored by
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessKind {
    /// Classification accuracy
    #[default]
    Accuracy,
    /// Root mean squared error
    Rmse,
}

/// Construction metadata for an individual
///
/// These fields are configuration, not evolved state: offspring carry their
/// parent's config forward unchanged across generations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ModelConfig<T: Terminal, F: Function> {
    /// Function set used to build trees
    pub functions: Vec<F>,
    /// Terminal set used to build trees
    pub terminals: Vec<T>,
    /// Maximum depth for newly grown (sub)trees
    pub max_depth: usize,
    /// Identifier of the model this individual belongs to
    pub model_name: String,
    /// Fitness measure this individual is scored by
    pub fitness_kind: FitnessKind,
}

impl<T: Terminal, F: Function> ModelConfig<T, F> {
    /// Create a new model configuration
    pub fn new(
        functions: Vec<F>,
        terminals: Vec<T>,
        max_depth: usize,
        model_name: impl Into<String>,
        fitness_kind: FitnessKind,
    ) -> Self {
        assert!(!functions.is_empty(), "Function set cannot be empty");
        assert!(!terminals.is_empty(), "Terminal set cannot be empty");
        assert!(max_depth >= 1, "Max depth must be at least 1");
        Self {
            functions,
            terminals,
            max_depth,
            model_name: model_name.into(),
            fitness_kind,
        }
    }
}

/// An individual in the population
///
/// Wraps a program tree with its computed fitness value and the
/// configuration it was constructed from.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Individual<T: Terminal, F: Function> {
    /// The program tree of this individual
    pub genome: TreeGenome<T, F>,
    /// The fitness value (None until the outer loop evaluates it)
    pub fitness: Option<f64>,
    /// Construction metadata, carried forward to offspring
    pub config: ModelConfig<T, F>,
}

impl<T: Terminal, F: Function> Individual<T, F> {
    /// Create a new unevaluated individual from configuration metadata
    pub fn from_config(config: ModelConfig<T, F>, genome: TreeGenome<T, F>) -> Self {
        Self {
            genome,
            fitness: None,
            config,
        }
    }

    /// Create a new individual with a known fitness
    pub fn with_fitness(config: ModelConfig<T, F>, genome: TreeGenome<T, F>, fitness: f64) -> Self {
        Self {
            genome,
            fitness: Some(fitness),
            config,
        }
    }

    /// Check if this individual has been evaluated
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Get the fitness value, panicking if not evaluated
    pub fn fitness_f64(&self) -> f64 {
        self.fitness.expect("Individual has not been evaluated")
    }

    /// Set the fitness value
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Number of nodes in this individual's tree
    pub fn size(&self) -> usize {
        self.genome.size()
    }

    /// Depth of this individual's tree
    pub fn depth(&self) -> usize {
        self.genome.depth()
    }

    /// Get a reference to the program tree
    pub fn genome(&self) -> &TreeGenome<T, F> {
        &self.genome
    }

    /// Get the construction metadata
    pub fn config(&self) -> &ModelConfig<T, F> {
        &self.config
    }

    /// Check if this individual is better than another (higher fitness wins)
    pub fn is_better_than(&self, other: &Self) -> bool {
        match (self.fitness, other.fitness) {
            (Some(f1), Some(f2)) => f1 > f2,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => false,
        }
    }
}

impl<T: Terminal, F: Function> PartialEq for Individual<T, F> {
    fn eq(&self, other: &Self) -> bool {
        self.genome == other.genome && self.fitness == other.fitness
    }
}

impl<T: Terminal, F: Function> PartialOrd for Individual<T, F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.fitness, other.fitness) {
            (Some(f1), Some(f2)) => f1.partial_cmp(&f2),
            (Some(_), None) => Some(Ordering::Greater),
            (None, Some(_)) => Some(Ordering::Less),
            (None, None) => Some(Ordering::Equal),
        }
    }
}
