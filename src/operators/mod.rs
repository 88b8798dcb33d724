//! Genetic operators
//!
//! This module provides selection and variation operators.

pub mod selection;
pub mod traits;
pub mod variation;

pub mod prelude {
    pub use super::selection::*;
    pub use super::traits::*;
    pub use super::variation::*;
}
