use super::event_sink::EventSink;
use super::DomainEvent;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::quince_assert_simple;
use crate::variables::DomainId;

/// The interval domain store: the current lower and upper bound of every
/// variable, together with the trail of bound writes which allows the store to
/// be restored exactly when the search backtracks.
///
/// Every tightening is recorded on the trail before it is applied, and raises
/// the corresponding [`DomainEvent`]s in an internal [`EventSink`] which the
/// engine drains to notify subscribed propagators.
#[derive(Clone, Default, Debug)]
pub struct Assignments {
    trail: Trail<TrailEntry>,
    domains: KeyedVec<DomainId, IntervalDomain>,
    events: EventSink,
}

/// The error which is reported when a tightening operation would leave a
/// variable with no possible value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// A bound write on the trail; undoing it restores both bounds of the domain
/// it refers to.
#[derive(Clone, Copy, Debug)]
struct TrailEntry {
    domain_id: DomainId,
    old_lower_bound: i32,
    old_upper_bound: i32,
}

#[derive(Clone, Copy, Debug)]
struct IntervalDomain {
    lower_bound: i32,
    upper_bound: i32,
}

impl IntervalDomain {
    fn verify_consistency(&self) -> Result<(), EmptyDomain> {
        if self.lower_bound > self.upper_bound {
            Err(EmptyDomain)
        } else {
            Ok(())
        }
    }
}

impl Assignments {
    pub(crate) fn increase_decision_level(&mut self) {
        self.trail.increase_decision_level()
    }

    pub fn get_decision_level(&self) -> usize {
        self.trail.get_decision_level()
    }

    pub fn num_domains(&self) -> u32 {
        self.domains.len() as u32
    }

    pub(crate) fn num_trail_entries(&self) -> usize {
        self.trail.len()
    }

    /// Register the domain of a new variable with the given bounds.
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        quince_assert_simple!(
            lower_bound <= upper_bound,
            "a variable must be created with a non-empty domain"
        );

        self.events.grow();

        self.domains.push(IntervalDomain {
            lower_bound,
            upper_bound,
        })
    }

    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain()
    }

    /// Discard the pending domain events, e.g. after a conflict: the writes
    /// that produced them are about to be undone, so no propagator may be
    /// notified of them.
    pub(crate) fn clear_domain_events(&mut self) {
        self.events.clear();
    }
}

// methods for getting info about the domains
impl Assignments {
    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        self.get_lower_bound(domain_id) == self.get_upper_bound(domain_id)
    }

    pub fn get_assigned_value(&self, domain_id: DomainId) -> i32 {
        quince_assert_simple!(self.is_domain_assigned(domain_id));
        self.domains[domain_id].lower_bound
    }
}

// methods to change the domains
impl Assignments {
    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<(), EmptyDomain> {
        if new_lower_bound <= self.get_lower_bound(domain_id) {
            return self.domains[domain_id].verify_consistency();
        }

        let old_lower_bound = self.get_lower_bound(domain_id);
        let old_upper_bound = self.get_upper_bound(domain_id);

        self.trail.push(TrailEntry {
            domain_id,
            old_lower_bound,
            old_upper_bound,
        });

        let domain = &mut self.domains[domain_id];
        domain.lower_bound = new_lower_bound;

        self.events.event_occurred(DomainEvent::LowerBound, domain_id);
        if domain.lower_bound == domain.upper_bound {
            self.events.event_occurred(DomainEvent::Assign, domain_id);
        }

        domain.verify_consistency()
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<(), EmptyDomain> {
        if new_upper_bound >= self.get_upper_bound(domain_id) {
            return self.domains[domain_id].verify_consistency();
        }

        let old_lower_bound = self.get_lower_bound(domain_id);
        let old_upper_bound = self.get_upper_bound(domain_id);

        self.trail.push(TrailEntry {
            domain_id,
            old_lower_bound,
            old_upper_bound,
        });

        let domain = &mut self.domains[domain_id];
        domain.upper_bound = new_upper_bound;

        self.events.event_occurred(DomainEvent::UpperBound, domain_id);
        if domain.lower_bound == domain.upper_bound {
            self.events.event_occurred(DomainEvent::Assign, domain_id);
        }

        domain.verify_consistency()
    }

    /// Restore the domains to the state they were in at the given decision
    /// level. Events raised by writes which are undone here must not reach any
    /// propagator, so pending events are discarded as well.
    pub(crate) fn synchronise(&mut self, new_decision_level: usize) {
        self.trail.synchronise(new_decision_level).for_each(|entry| {
            let domain = &mut self.domains[entry.domain_id];
            domain.lower_bound = entry.old_lower_bound;
            domain.upper_bound = entry.old_upper_bound;
        });

        self.events.clear();
    }
}
