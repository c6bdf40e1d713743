//! The bounds-propagation engine: the interval domain store, the backtrackable
//! register store, watch lists, the propagator queue, and the fixpoint loop
//! which ties them together.

pub(crate) mod assignments;
pub(crate) mod domain_events;
pub(crate) mod event_sink;
pub(crate) mod propagation_engine;
pub(crate) mod propagator_queue;
pub(crate) mod test_solver;
pub(crate) mod trailed;
pub(crate) mod watch_list;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub use domain_events::DomainEvent;
pub use domain_events::DomainEvents;
pub use propagation_engine::PropagationEngine;
pub use trailed::TrailedInt;
pub use watch_list::Watchers;

pub(crate) use propagator_queue::PropagatorQueue;
pub(crate) use trailed::TrailedRegisters;
pub(crate) use watch_list::WatchList;
