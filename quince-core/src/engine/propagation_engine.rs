use log::debug;
use log::trace;

use super::Assignments;
use super::DomainEvent;
use super::EmptyDomain;
use super::PropagatorQueue;
use super::TrailedRegisters;
use super::WatchList;
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::propagation::EnqueueDecision;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorId;
use crate::quince_assert_eq_simple;
use crate::quince_assert_simple;
use crate::variables::DomainId;

/// The cooperative single-threaded propagation engine: it owns the domains,
/// the backtrackable registers, the watch lists, and the propagators, and
/// re-establishes the fixpoint of all propagators whenever asked.
///
/// The expected usage is that the enclosing search creates variables with
/// [`PropagationEngine::new_variable`] and installs constraints with
/// [`PropagationEngine::add_propagator`], and then interleaves decisions
/// (a call to [`PropagationEngine::increase_decision_level`] followed by
/// bound tightenings) with calls to [`PropagationEngine::propagate`]. When
/// propagation fails, the search backtracks with
/// [`PropagationEngine::backtrack`], which restores the domains and the
/// registers to their state at the target decision level.
pub struct PropagationEngine {
    assignments: Assignments,
    trailed_registers: TrailedRegisters,
    watch_list: WatchList,
    propagator_queue: PropagatorQueue,
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
    event_drain: Vec<(DomainEvent, DomainId)>,
    is_in_infeasible_state: bool,
}

impl Default for PropagationEngine {
    fn default() -> Self {
        PropagationEngine {
            assignments: Assignments::default(),
            trailed_registers: TrailedRegisters::default(),
            watch_list: WatchList::default(),
            propagator_queue: PropagatorQueue::new(4),
            propagators: KeyedVec::default(),
            event_drain: Vec::default(),
            is_in_infeasible_state: false,
        }
    }
}

impl std::fmt::Debug for PropagationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagationEngine")
            .field("assignments", &self.assignments)
            .field("num_propagators", &self.propagators.len())
            .field("is_in_infeasible_state", &self.is_in_infeasible_state)
            .finish_non_exhaustive()
    }
}

impl PropagationEngine {
    /// Create a new variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lower_bound, upper_bound)
    }

    /// Install a propagator: run its constructor (which subscribes to domain
    /// events and allocates backtrackable registers) and immediately run its
    /// initial propagation to fixpoint.
    ///
    /// Must be called before any search decision is made. If the initial
    /// propagation detects a conflict, the engine becomes infeasible and
    /// [`ConstraintOperationError::InfeasibleConstraint`] is returned.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorId, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        quince_assert_simple!(
            self.get_decision_level() == 0,
            "propagators must be installed before any search decision is made"
        );

        if self.is_in_infeasible_state {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator_id = PropagatorId(self.propagators.len() as u32);

        let context = PropagatorConstructorContext::new(
            &mut self.watch_list,
            &mut self.trailed_registers,
            &self.assignments,
            propagator_id,
        );
        let propagator = constructor.create(context);

        let stored_id = self.propagators.push(Box::new(propagator));
        quince_assert_eq_simple!(propagator_id, stored_id);

        let priority = self.propagators[propagator_id].priority();
        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        match self.propagate() {
            Ok(()) => Ok(propagator_id),
            Err(EmptyDomain) => {
                debug!(
                    "propagator {} detected a root-level conflict during initialisation",
                    self.propagators[propagator_id].name()
                );
                self.is_in_infeasible_state = true;
                Err(ConstraintOperationError::InfeasibleConstraint)
            }
        }
    }

    /// Re-establish the fixpoint of all propagators: drain the pending domain
    /// events, notify and enqueue the subscribed propagators, and run the
    /// queue until it is empty or a propagator fails.
    pub fn propagate(&mut self) -> PropagationStatus {
        loop {
            self.notify_propagators();

            let Some(propagator_id) = self.propagator_queue.pop() else {
                break;
            };

            let propagator = &mut self.propagators[propagator_id];
            let context =
                PropagationContextMut::new(&mut self.assignments, &mut self.trailed_registers);

            if propagator.propagate(context).is_err() {
                trace!(
                    "propagator {} emptied a domain; abandoning the branch",
                    propagator.name()
                );
                self.propagator_queue.clear();
                self.event_drain.clear();
                self.assignments.clear_domain_events();
                return Err(EmptyDomain);
            }
        }

        Ok(())
    }

    fn notify_propagators(&mut self) {
        if !self.watch_list.is_watching_anything() {
            return;
        }

        self.event_drain
            .extend(self.assignments.drain_domain_events());

        for (event, domain) in self.event_drain.drain(..) {
            for &propagator_var in self.watch_list.get_affected_propagators(event, domain) {
                let propagator = &mut self.propagators[propagator_var.propagator];
                let context =
                    NotificationContext::new(&self.assignments, &mut self.trailed_registers);

                let enqueue_decision = propagator.notify(context, propagator_var.variable, event);

                if enqueue_decision == EnqueueDecision::Enqueue {
                    let priority = propagator.priority();
                    self.propagator_queue
                        .enqueue_propagator(propagator_var.propagator, priority);
                }
            }
        }
    }
}

// the decision interface used by the enclosing search
impl PropagationEngine {
    pub fn get_decision_level(&self) -> usize {
        self.assignments.get_decision_level()
    }

    pub fn increase_decision_level(&mut self) {
        self.assignments.increase_decision_level();
        self.trailed_registers.increase_decision_level();
    }

    /// Restore the domains and the backtrackable registers to their state at
    /// the given decision level, and give every propagator the opportunity to
    /// resynchronise its internal (untrailed) structures.
    pub fn backtrack(&mut self, decision_level: usize) {
        quince_assert_simple!(
            decision_level < self.get_decision_level(),
            "backtracking must target an earlier decision level"
        );
        trace!(
            "backtracking from decision level {} to {}",
            self.get_decision_level(),
            decision_level
        );

        self.assignments.synchronise(decision_level);
        self.trailed_registers.synchronise(decision_level);
        self.propagator_queue.clear();
        self.event_drain.clear();

        for propagator in self.propagators.iter_mut() {
            propagator.synchronise(PropagationContext::new(&self.assignments));
        }
    }

    /// Raise the lower bound of the variable as a search decision.
    pub fn set_lower_bound(&mut self, domain_id: DomainId, bound: i32) -> PropagationStatus {
        self.assignments.tighten_lower_bound(domain_id, bound)
    }

    /// Lower the upper bound of the variable as a search decision.
    pub fn set_upper_bound(&mut self, domain_id: DomainId, bound: i32) -> PropagationStatus {
        self.assignments.tighten_upper_bound(domain_id, bound)
    }

    /// Assign the variable to a single value as a search decision.
    pub fn assign(&mut self, domain_id: DomainId, value: i32) -> PropagationStatus {
        self.assignments.tighten_lower_bound(domain_id, value)?;
        self.assignments.tighten_upper_bound(domain_id, value)
    }

    pub fn lower_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_lower_bound(domain_id)
    }

    pub fn upper_bound(&self, domain_id: DomainId) -> i32 {
        self.assignments.get_upper_bound(domain_id)
    }

    pub fn is_assigned(&self, domain_id: DomainId) -> bool {
        self.assignments.is_domain_assigned(domain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::DomainEvents;
    use crate::propagation::LocalId;

    struct CountingPropagator {
        watched: DomainId,
        num_propagations: usize,
        fail_always: bool,
    }

    struct CountingPropagatorArgs {
        watched: DomainId,
        fail_always: bool,
    }

    impl PropagatorConstructor for CountingPropagatorArgs {
        type PropagatorImpl = CountingPropagator;

        fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
            context.register(self.watched, DomainEvents::BOUNDS, LocalId::from(0));

            CountingPropagator {
                watched: self.watched,
                num_propagations: 0,
                fail_always: self.fail_always,
            }
        }
    }

    impl Propagator for CountingPropagator {
        fn name(&self) -> &str {
            "Counting"
        }

        fn propagate(&mut self, _context: PropagationContextMut) -> PropagationStatus {
            self.num_propagations += 1;
            if self.fail_always {
                Err(EmptyDomain)
            } else {
                Ok(())
            }
        }
    }

    fn num_propagations(engine: &PropagationEngine, propagator_id: PropagatorId) -> usize {
        engine.propagators[propagator_id]
            .downcast_ref::<CountingPropagator>()
            .expect("the propagator is a CountingPropagator")
            .num_propagations
    }

    #[test]
    fn installing_a_propagator_runs_its_initial_propagation() {
        let mut engine = PropagationEngine::default();
        let x = engine.new_variable(0, 10);

        let propagator_id = engine
            .add_propagator(CountingPropagatorArgs {
                watched: x,
                fail_always: false,
            })
            .expect("the propagator does not fail");

        assert_eq!(num_propagations(&engine, propagator_id), 1);
    }

    #[test]
    fn a_watched_bound_change_reinvokes_the_propagator() {
        let mut engine = PropagationEngine::default();
        let x = engine.new_variable(0, 10);
        let y = engine.new_variable(0, 10);

        let propagator_id = engine
            .add_propagator(CountingPropagatorArgs {
                watched: x,
                fail_always: false,
            })
            .expect("the propagator does not fail");

        engine
            .set_lower_bound(x, 5)
            .expect("the domain is non-empty");
        engine.propagate().expect("no conflict");
        assert_eq!(num_propagations(&engine, propagator_id), 2);

        // An unwatched variable does not wake the propagator.
        engine
            .set_lower_bound(y, 5)
            .expect("the domain is non-empty");
        engine.propagate().expect("no conflict");
        assert_eq!(num_propagations(&engine, propagator_id), 2);
    }

    #[test]
    fn a_root_level_conflict_makes_the_engine_infeasible() {
        let mut engine = PropagationEngine::default();
        let x = engine.new_variable(0, 10);

        let result = engine.add_propagator(CountingPropagatorArgs {
            watched: x,
            fail_always: true,
        });
        assert_eq!(result, Err(ConstraintOperationError::InfeasibleConstraint));

        let result = engine.add_propagator(CountingPropagatorArgs {
            watched: x,
            fail_always: false,
        });
        assert_eq!(result, Err(ConstraintOperationError::InfeasibleState));
    }

    #[test]
    fn backtracking_restores_bounds_set_by_decisions() {
        let mut engine = PropagationEngine::default();
        let x = engine.new_variable(0, 10);

        engine.increase_decision_level();
        engine
            .set_lower_bound(x, 5)
            .expect("the domain is non-empty");
        engine
            .set_upper_bound(x, 7)
            .expect("the domain is non-empty");
        engine.propagate().expect("no conflict");

        engine.backtrack(0);
        assert_eq!(engine.lower_bound(x), 0);
        assert_eq!(engine.upper_bound(x), 10);
    }
}
