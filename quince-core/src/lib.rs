//! # Quince
//! Quince is an incremental bounds-propagation engine for constraint
//! satisfaction. It maintains an interval domain per variable and a set of
//! propagators which tighten those intervals whenever the domains of the
//! variables they watch change, until a fixpoint is reached or a domain
//! becomes empty. The engine is written for a single-threaded, cooperative
//! backtracking search: all state narrowed while descending the search tree
//! is restored exactly when the search backtracks.
//!
//! The main entry point is the [`PropagationEngine`]. The first step to using
//! it is **adding variables**:
//! ```rust
//! # use quince_core::PropagationEngine;
//! let mut engine = PropagationEngine::default();
//!
//! let x = engine.new_variable(0, 3);
//! let y = engine.new_variable(0, 3);
//! let s = engine.new_variable(5, 5);
//! ```
//! The second step is **installing propagators**, which immediately perform
//! their initial propagation:
//! ```rust
//! # use quince_core::PropagationEngine;
//! # use quince_core::propagators::SumPropagatorArgs;
//! # let mut engine = PropagationEngine::default();
//! # let x = engine.new_variable(0, 3);
//! # let y = engine.new_variable(0, 3);
//! # let s = engine.new_variable(5, 5);
//! let _ = engine
//!     .add_propagator(SumPropagatorArgs {
//!         terms: [x, y].into(),
//!         sum: s,
//!         offset: 0,
//!     })
//!     .expect("the constraint is feasible at the root");
//!
//! // x + y = 5 with x, y in [0, 3] forces both x and y to be at least 2.
//! assert_eq!(engine.lower_bound(x), 2);
//! assert_eq!(engine.lower_bound(y), 2);
//! ```
//! After that, the enclosing search interleaves decisions with calls to
//! [`PropagationEngine::propagate`], backtracking with
//! [`PropagationEngine::backtrack`] whenever propagation reports a conflict.
//!
//! New propagators are written against the [`propagation`] module; see its
//! documentation for the contract and the available hooks.

#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub mod engine;
pub mod propagation;
pub mod propagators;
pub mod variables;

pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::PropagationStatus;
pub use crate::engine::PropagationEngine;
