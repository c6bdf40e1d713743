//! Backtrackable integer registers.
//!
//! A [`TrailedInt`] refers to a single `i64` value in a [`TrailedRegisters`]
//! store. Every write goes through a trail, so that all writes made past a
//! decision level are transparently undone when the store is synchronised to
//! that level. Propagators use these registers for incremental state which
//! must follow the search chronology exactly.

mod trailed_change;
mod trailed_int;
mod trailed_registers;

pub use trailed_int::TrailedInt;

pub(crate) use trailed_change::TrailedChange;
pub(crate) use trailed_registers::TrailedRegisters;
