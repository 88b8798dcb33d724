//! # treegp
//!
//! Selection and variation operators for tree-based genetic programming.
//!
//! This library implements the reproductive core of a GP evolutionary loop:
//! a bias-controllable double-tournament selection scheme, subtree crossover
//! and mutation, elitism, and depth-based offspring filtering. Fitness
//! evaluation and the outer generational loop are left to the caller.
//!
//! ## Core Concepts
//!
//! - **Double tournament**: two sequential tournament stages on different
//!   criteria (fitness and tree size) balance selection pressure against
//!   code bloat
//! - **Copy-on-select variation**: parents are cloned before subtrees are
//!   swapped, so the live population is never mutated by offspring generation
//! - **Explicit randomness**: every operation takes a caller-supplied
//!   [`rand::Rng`], making runs reproducible from a seed
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use treegp::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let selector = DoubleTournament::new(2, 3, 1, SelectionBias::FitnessFirst)?;
//! let generator = OffspringGenerator::new(selector);
//!
//! population.sort_by_fitness();
//! let offspring = generator.offspring(population.individuals(), &mut rng);
//! let accepted = discard_deep(offspring, 17);
//! ```

pub mod error;
pub mod genome;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::genome::prelude::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
