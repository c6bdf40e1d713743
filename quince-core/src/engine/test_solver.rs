#![cfg(any(test, doc))]
//! This module exposes helpers that aid testing of propagators. The
//! [`TestSolver`] allows setting up specific scenarios under which to test the
//! various operations of a propagator.

use super::Assignments;
use super::DomainEvent;
use super::TrailedRegisters;
use super::WatchList;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::engine::EmptyDomain;
use crate::propagation::EnqueueDecision;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;
use crate::variables::DomainId;

/// A container for the engine state, which can be used to test propagators in
/// isolation from the propagator queue.
pub(crate) struct TestSolver {
    pub(crate) assignments: Assignments,
    pub(crate) trailed_registers: TrailedRegisters,
    pub(crate) watch_list: WatchList,
    pub(crate) propagator_store: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    event_drain: Vec<(DomainEvent, DomainId)>,
}

impl Default for TestSolver {
    fn default() -> Self {
        TestSolver {
            assignments: Assignments::default(),
            trailed_registers: TrailedRegisters::default(),
            watch_list: WatchList::default(),
            propagator_store: KeyedVec::default(),
            event_drain: Vec::default(),
        }
    }
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lower_bound, upper_bound)
    }

    /// Run the constructor of the propagator and perform its initial
    /// propagation pass.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, EmptyDomain>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let propagator_id = PropagatorId(self.propagator_store.len() as u32);

        let context = PropagatorConstructorContext::new(
            &mut self.watch_list,
            &mut self.trailed_registers,
            &self.assignments,
            propagator_id,
        );
        let propagator = constructor.create(context);

        let _ = self.propagator_store.push(Box::new(propagator));

        self.propagate(propagator_id)?;

        Ok(propagator_id)
    }

    pub(crate) fn propagate(&mut self, propagator: PropagatorId) -> PropagationStatus {
        let context =
            PropagationContextMut::new(&mut self.assignments, &mut self.trailed_registers);
        self.propagator_store[propagator].propagate(context)
    }

    pub(crate) fn propagate_until_fixed_point(
        &mut self,
        propagator: PropagatorId,
    ) -> PropagationStatus {
        let mut num_trail_entries = self.assignments.num_trail_entries();

        loop {
            self.propagate(propagator)?;
            let _ = self.notify_propagators(propagator);

            if self.assignments.num_trail_entries() == num_trail_entries {
                break;
            }
            num_trail_entries = self.assignments.num_trail_entries();
        }

        Ok(())
    }

    /// Tighten the lower bound of the variable directly and notify the
    /// subscribed propagators, reporting whether the given propagator asked to
    /// be enqueued.
    pub(crate) fn increase_lower_bound_and_notify(
        &mut self,
        propagator: PropagatorId,
        var: DomainId,
        value: i32,
    ) -> EnqueueDecision {
        let result = self.assignments.tighten_lower_bound(var, value);
        assert!(
            result.is_ok(),
            "the provided value to `increase_lower_bound_and_notify` caused an empty domain"
        );

        self.notify_propagators(propagator)
    }

    /// Tighten the upper bound of the variable directly and notify the
    /// subscribed propagators, reporting whether the given propagator asked to
    /// be enqueued.
    pub(crate) fn decrease_upper_bound_and_notify(
        &mut self,
        propagator: PropagatorId,
        var: DomainId,
        value: i32,
    ) -> EnqueueDecision {
        let result = self.assignments.tighten_upper_bound(var, value);
        assert!(
            result.is_ok(),
            "the provided value to `decrease_upper_bound_and_notify` caused an empty domain"
        );

        self.notify_propagators(propagator)
    }

    fn notify_propagators(&mut self, propagator: PropagatorId) -> EnqueueDecision {
        let mut decision = EnqueueDecision::Skip;

        self.event_drain
            .extend(self.assignments.drain_domain_events());

        for (event, domain) in self.event_drain.drain(..) {
            for &propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                let context =
                    NotificationContext::new(&self.assignments, &mut self.trailed_registers);
                let enqueue = self.propagator_store[propagator_var.propagator].notify(
                    context,
                    propagator_var.variable,
                    event,
                );

                if propagator_var.propagator == propagator && enqueue == EnqueueDecision::Enqueue {
                    decision = EnqueueDecision::Enqueue;
                }
            }
        }

        decision
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.assignments.get_upper_bound(var)
    }

    pub(crate) fn increase_decision_level(&mut self) {
        self.assignments.increase_decision_level();
        self.trailed_registers.increase_decision_level();
    }

    pub(crate) fn synchronise(&mut self, decision_level: usize) {
        self.assignments.synchronise(decision_level);
        self.trailed_registers.synchronise(decision_level);
        self.event_drain.clear();

        for propagator in self.propagator_store.iter_mut() {
            propagator.synchronise(PropagationContext::new(&self.assignments));
        }
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub),
            (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }
}
