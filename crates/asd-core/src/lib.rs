//! asd-core: shared foundation for the ASD screener.
//!
//! Contains:
//! - units (uom SI types, Celsius/Kelvin helpers)
//! - numeric (Real + tolerances + interval checks)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
