use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::NotificationContext;
use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatus;
use crate::engine::DomainEvent;
use crate::propagation::LocalId;

// We need `Downcast` to cast from `Box<dyn Propagator>` to a concrete
// propagator in tests; rust inherently does not allow downcasting from the
// trait definition to its concrete type.
impl_downcast!(Propagator);

/// A propagator removes values from domains which will never be in any
/// solution, or reports that the current state is unsatisfiable.
///
/// The only required functions are [`Propagator::name`] and
/// [`Propagator::propagate`]; all other functions have default
/// implementations.
///
/// See the [`crate::propagation`] documentation for more details.
pub trait Propagator: Downcast {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Returns the [`Priority`] of the propagator, used for determining the
    /// order in which propagators are called.
    ///
    /// By default the priority is set to [`Priority::VeryLow`]. It is expected
    /// that propagator implementations set this to an appropriate value;
    /// computationally cheap propagators should be assigned a high priority.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Returns whether the propagator should be enqueued for propagation when
    /// a [`DomainEvent`] happens to one of the variables the propagator is
    /// subscribed to (as registered during creation with
    /// [`PropagatorConstructorContext::register`]).
    ///
    /// This can be used to incrementally maintain data structures, and should
    /// only be used for computationally cheap logic. Expensive computation
    /// should be performed in the [`Propagator::propagate`] method.
    ///
    /// By default the propagator is always enqueued for every event it is
    /// subscribed to. Not all propagators will benefit from implementing this,
    /// so it is not required to do so.
    ///
    /// [`PropagatorConstructorContext::register`]:
    /// super::PropagatorConstructorContext::register
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after the engine backtracks, allowing the propagator to update
    /// internal data structures given the restored variable domains.
    ///
    /// State kept in backtrackable registers is restored by the trail before
    /// this hook runs, so propagators whose incremental state is fully trailed
    /// need not implement it. By default this function does nothing.
    fn synchronise(&mut self, _context: PropagationContext) {}

    /// Propagate: extend the current state with inferred bound changes, using
    /// [`PropagationContextMut`] to tighten domains.
    ///
    /// In case no conflict has been detected this function should return
    /// [`Result::Ok`]; otherwise it should return [`Result::Err`] with
    /// [`EmptyDomain`](crate::engine::EmptyDomain), after which the enclosing
    /// search abandons the current branch.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatus;
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// The priority of a propagator, used for determining the order in which
/// propagators will be called.
///
/// Propagators with high priority are propagated before propagators with
/// low(er) priority. If two propagators have the same priority, then the
/// order in which they are propagated is unspecified.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}
