//! Selection operators
//!
//! This module provides the tournament primitives and the double-tournament
//! selection scheme. All operators assume the population is sorted
//! best-to-worst by fitness.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GpResult, OperatorError};
use crate::genome::tree::{Function, Terminal};
use crate::operators::traits::SelectionOperator;
use crate::population::individual::Individual;

/// Size-based fitness transform used by parsimony selection
///
/// Strictly decreasing in `size`, so smaller trees score higher.
pub fn parsimony_score(size: usize) -> f64 {
    1.0 / (1.0 + size as f64)
}

/// Winner-so-far of a tournament stage: a candidate index and its score
#[derive(Clone, Copy, Debug)]
struct Contender {
    index: usize,
    score: f64,
}

/// Resolve a challenge against the incumbent winner
///
/// On exact score equality a fair coin decides, giving every tied
/// competitor the same long-run probability of winning regardless of
/// encounter order.
fn challenge<R: Rng>(incumbent: Contender, challenger: Contender, rng: &mut R) -> Contender {
    if challenger.score > incumbent.score {
        challenger
    } else if challenger.score == incumbent.score && rng.gen::<f64>() < 0.5 {
        challenger
    } else {
        incumbent
    }
}

/// Fitness tournament selection
///
/// Draws `tournament_size` uniform random indices (with repetition) and
/// returns the minimum drawn index. The population is sorted best-first,
/// so the lowest index is the fittest sampled candidate; no fitness value
/// is ever compared.
#[derive(Clone, Debug)]
pub struct FitnessTournament {
    /// Tournament size (number of individuals competing)
    pub tournament_size: usize,
}

impl FitnessTournament {
    /// Create a new fitness tournament with the given size
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self { tournament_size }
    }
}

impl<T: Terminal, F: Function> SelectionOperator<T, F> for FitnessTournament {
    fn select<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "Population cannot be empty");

        (0..self.tournament_size)
            .map(|_| rng.gen_range(0..population.len()))
            .min()
            .expect("tournament runs at least one draw")
    }
}

/// Parsimony tournament selection
///
/// Draws `tournament_size` individuals uniformly (with repetition), scores
/// each by `1 / (1 + size)`, and returns the highest-scoring one. Exact
/// ties are broken by a fair coin.
#[derive(Clone, Debug)]
pub struct ParsimonyTournament {
    /// Tournament size (number of individuals competing)
    pub tournament_size: usize,
}

impl ParsimonyTournament {
    /// Create a new parsimony tournament with the given size
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self { tournament_size }
    }
}

impl<T: Terminal, F: Function> SelectionOperator<T, F> for ParsimonyTournament {
    fn select<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "Population cannot be empty");

        let mut best: Option<Contender> = None;
        for _ in 0..self.tournament_size {
            let index = rng.gen_range(0..population.len());
            let contender = Contender {
                index,
                score: parsimony_score(population[index].size()),
            };
            best = Some(match best {
                None => contender,
                Some(incumbent) => challenge(incumbent, contender, rng),
            });
        }
        best.expect("tournament runs at least one draw").index
    }
}

/// Which objective the first (dominant) stage of a double tournament uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionBias {
    /// Fitness tournaments feed a size-scored sub-selection
    FitnessFirst,
    /// Parsimony tournaments feed a fitness-scored sub-selection
    ParsimonyFirst,
}

/// Double-tournament selection
///
/// A bi-objective tournament scheme: one round of primitive tournaments on
/// the dominant objective collects a winner pool, then a sub-selection on
/// the other objective reduces the pool to a single individual. The bias
/// direction decides whether fitness or parsimony is the primary pressure.
///
/// The rounds must respect the ordering invariant of the chosen bias:
/// `FitnessFirst` needs `fitness_rounds >= parsimony_rounds`, and
/// `ParsimonyFirst` needs `fitness_rounds <= parsimony_rounds`. The
/// invariant is checked once, at construction.
#[derive(Clone, Debug)]
pub struct DoubleTournament {
    fitness: FitnessTournament,
    parsimony: ParsimonyTournament,
    fitness_rounds: usize,
    parsimony_rounds: usize,
    bias: SelectionBias,
}

impl DoubleTournament {
    /// Create a new double tournament
    ///
    /// Returns [`OperatorError::InvalidConfiguration`] when the rounds
    /// violate the ordering invariant of the chosen bias.
    pub fn new(
        tournament_size: usize,
        fitness_rounds: usize,
        parsimony_rounds: usize,
        bias: SelectionBias,
    ) -> GpResult<Self> {
        assert!(fitness_rounds >= 1, "Fitness rounds must be at least 1");
        assert!(parsimony_rounds >= 1, "Parsimony rounds must be at least 1");

        match bias {
            SelectionBias::FitnessFirst if fitness_rounds < parsimony_rounds => {
                Err(OperatorError::InvalidConfiguration(format!(
                    "fitness-first selection needs fitness_rounds >= parsimony_rounds, got {} < {}",
                    fitness_rounds, parsimony_rounds
                )))
            }
            SelectionBias::ParsimonyFirst if fitness_rounds > parsimony_rounds => {
                Err(OperatorError::InvalidConfiguration(format!(
                    "parsimony-first selection needs fitness_rounds <= parsimony_rounds, got {} > {}",
                    fitness_rounds, parsimony_rounds
                )))
            }
            _ => Ok(Self {
                fitness: FitnessTournament::new(tournament_size),
                parsimony: ParsimonyTournament::new(tournament_size),
                fitness_rounds,
                parsimony_rounds,
                bias,
            }),
        }
    }

    /// Tournament size of the primitive tournaments
    pub fn tournament_size(&self) -> usize {
        self.fitness.tournament_size
    }

    /// Bias direction of this double tournament
    pub fn bias(&self) -> SelectionBias {
        self.bias
    }

    /// Reduce a pool of winner indices to one via scored uniform sampling
    ///
    /// Each round draws one pool member (with repetition) and challenges the
    /// incumbent; ties fall to a fair coin.
    fn refine<R: Rng, S: Fn(usize) -> f64>(
        &self,
        pool: &[usize],
        rounds: usize,
        rng: &mut R,
        score_of: S,
    ) -> usize {
        let mut best: Option<Contender> = None;
        for _ in 0..rounds {
            let index = *pool.choose(rng).expect("winner pool cannot be empty");
            let contender = Contender {
                index,
                score: score_of(index),
            };
            best = Some(match best {
                None => contender,
                Some(incumbent) => challenge(incumbent, contender, rng),
            });
        }
        best.expect("sub-selection runs at least one round").index
    }
}

impl<T: Terminal, F: Function> SelectionOperator<T, F> for DoubleTournament {
    fn select<R: Rng>(&self, population: &[Individual<T, F>], rng: &mut R) -> usize {
        match self.bias {
            SelectionBias::FitnessFirst => {
                let pool: Vec<usize> = (0..self.fitness_rounds)
                    .map(|_| self.fitness.select(population, rng))
                    .collect();
                self.refine(&pool, self.parsimony_rounds, rng, |i| {
                    parsimony_score(population[i].size())
                })
            }
            SelectionBias::ParsimonyFirst => {
                let pool: Vec<usize> = (0..self.parsimony_rounds)
                    .map(|_| self.parsimony.select(population, rng))
                    .collect();
                self.refine(&pool, self.fitness_rounds, rng, |i| {
                    population[i].fitness_f64()
                })
            }
        }
    }
}
