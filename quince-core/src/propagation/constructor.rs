use super::contexts::private::HasAssignments;
use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
use crate::engine::Assignments;
use crate::engine::DomainEvents;
use crate::engine::TrailedInt;
use crate::engine::TrailedRegisters;
use crate::engine::Watchers;
use crate::engine::WatchList;
use crate::variables::IntegerVariable;

/// A propagator constructor turns an argument struct into an implementation
/// of [`Propagator`], subscribing to domain events and allocating
/// backtrackable registers along the way.
pub trait PropagatorConstructor {
    /// The propagator to construct.
    type PropagatorImpl: Propagator;

    /// The constructor function.
    fn create(self, context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl;
}

/// The context given to a [`PropagatorConstructor`]: it exposes the hooks with
/// which the propagator is wired into the engine.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    watch_list: &'a mut WatchList,
    trailed_registers: &'a mut TrailedRegisters,
    assignments: &'a Assignments,
    propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        watch_list: &'a mut WatchList,
        trailed_registers: &'a mut TrailedRegisters,
        assignments: &'a Assignments,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagatorConstructorContext {
            watch_list,
            trailed_registers,
            assignments,
            propagator_id,
        }
    }

    /// Subscribe the propagator to the given [`DomainEvents`] on the variable.
    /// Whenever one of those events happens to the variable, the propagator is
    /// notified with the given [`LocalId`] and is re-enqueued for propagation.
    pub fn register<Var: IntegerVariable>(
        &mut self,
        var: Var,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.events());
    }

    /// Allocate a new backtrackable register with the given initial value.
    pub fn new_trailed_int(&mut self, initial_value: i64) -> TrailedInt {
        self.trailed_registers.grow(initial_value)
    }
}

impl HasAssignments for PropagatorConstructorContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
