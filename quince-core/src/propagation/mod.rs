//! Contains the main building blocks for propagators.
//!
//! # Background
//!
//! A propagator takes as input a set of variables (<code>x<sub>i</sub> ∈
//! X</code>) and for each variable a corresponding domain
//! (<code>D<sub>i</sub> ∈ D</code>); it can then be seen as a function which
//! maps `D ↦ D'` such that <code>D'<sub>i</sub> ⊆ D<sub>i</sub></code> for
//! all variables (i.e. the domain of a variable either remains the same after
//! applying the propagator or it becomes a subset of the domain before
//! applying the propagator). In this crate, domains are intervals, and
//! propagators narrow the bounds of those intervals.
//!
//! A propagator is said to be at fixpoint if <code>D<sub>x</sub> =
//! D'<sub>x</sub></code>, meaning that no further propagations can take place
//! when applying the propagator.
//!
//! # Practical
//!
//! Each concrete propagator is associated with one trait: [`Propagator`]. The
//! main function to implement for this trait is [`Propagator::propagate`],
//! which performs the domain reduction.
//!
//! A propagator is created by a [`PropagatorConstructor`]. The constructor is
//! responsible for subscribing to domain events and setting up the state of
//! the propagator; it is provided a [`PropagatorConstructorContext`] which
//! has all the available functions allowing the propagator to hook into the
//! engine state. The engine runs the initial propagation immediately after
//! construction, so that a root-level conflict is reported from installation.
//!
//! Propagators are not required to be idempotent: if a propagator is not at
//! fixpoint after propagating, it will be called again by the engine until no
//! further propagations happen.

mod constructor;
mod contexts;
mod local_id;
mod propagator;
mod propagator_id;
mod propagator_var_id;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::NotificationContext;
pub use contexts::PropagationContext;
pub use contexts::PropagationContextMut;
pub use contexts::ReadDomains;
pub use local_id::LocalId;
pub use propagator::EnqueueDecision;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use propagator_id::PropagatorId;

pub(crate) use propagator_var_id::PropagatorVarId;

pub use crate::basic_types::PropagationStatus;
pub use crate::engine::DomainEvent;
pub use crate::engine::DomainEvents;
pub use crate::engine::EmptyDomain;
pub use crate::engine::TrailedInt;
