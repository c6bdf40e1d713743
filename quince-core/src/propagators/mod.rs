//! Contains the propagator implementations.
//!
//! See the [`crate::propagation`] documentation for the contract propagators
//! adhere to and for how new propagators are written.

mod sum;

pub use sum::SumPropagator;
pub use sum::SumPropagatorArgs;
