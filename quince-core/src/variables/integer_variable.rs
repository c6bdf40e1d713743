use enumset::EnumSet;

use crate::engine::Assignments;
use crate::engine::DomainEvent;
use crate::engine::EmptyDomain;
use crate::engine::Watchers;

/// A variable over the integers whose domain is reasoned about through its
/// bounds.
///
/// The trait is the seam between propagators and the domain store: a
/// propagator only ever reads bounds, narrows bounds, and subscribes to bound
/// changes through these operations.
pub trait IntegerVariable: Clone {
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Raise the lower bound of the variable to `bound`. A weaker bound is a
    /// no-op. Fails if the domain of the variable becomes empty.
    fn set_lower_bound(&self, assignments: &mut Assignments, bound: i32)
        -> Result<(), EmptyDomain>;

    /// Lower the upper bound of the variable to `bound`. A weaker bound is a
    /// no-op. Fails if the domain of the variable becomes empty.
    fn set_upper_bound(&self, assignments: &mut Assignments, bound: i32)
        -> Result<(), EmptyDomain>;

    /// Subscribe the watchers to the given events on this variable.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);
}
