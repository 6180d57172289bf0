//! Model construction errors.

use asd_core::CoreError;
use thiserror::Error;

/// Result type for model construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Structural errors raised while building a model entity.
///
/// Missing or degenerate data never ends up here; derived quantities report
/// that as `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Copolymer monomer mole fractions do not sum to one.
    #[error("Sum of monomer mole fractions for {polymer} must be 1.0, got {sum}")]
    MoleFractionSum { polymer: String, sum: f64 },

    /// Numeric argument rejected by a core check (e.g. drug load bounds).
    #[error(transparent)]
    Core(#[from] CoreError),
}
