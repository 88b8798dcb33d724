//! Population types
//!
//! This module provides the Individual wrapper and the Population container.

pub mod individual;
pub mod population;

pub mod prelude {
    pub use super::individual::*;
    pub use super::population::*;
}
