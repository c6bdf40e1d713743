use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::propagation::PropagatorVarId;
use crate::variables::DomainId;

/// For every variable, the propagators that are subscribed to each kind of
/// [`DomainEvent`] on that variable.
#[derive(Default, Debug)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, Watcher>,
    is_watching_anything: bool,
}

/// Used to register a propagator for notifications about events on a
/// particular variable.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchList,
}

#[derive(Default, Debug)]
struct Watcher {
    lower_bound_watchers: Vec<PropagatorVarId>,
    upper_bound_watchers: Vec<PropagatorVarId>,
    assign_watchers: Vec<PropagatorVarId>,
}

impl WatchList {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Watcher::default());
    }

    pub(crate) fn is_watching_anything(&self) -> bool {
        self.is_watching_anything
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: DomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        let watcher = &self.watchers[domain];

        match event {
            DomainEvent::Assign => &watcher.assign_watchers,
            DomainEvent::LowerBound => &watcher.lower_bound_watchers,
            DomainEvent::UpperBound => &watcher.upper_bound_watchers,
        }
    }
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        self.watch_list.is_watching_anything = true;

        let watcher = &mut self.watch_list.watchers[domain];

        for event in events {
            let event_watcher = match event {
                DomainEvent::Assign => &mut watcher.assign_watchers,
                DomainEvent::LowerBound => &mut watcher.lower_bound_watchers,
                DomainEvent::UpperBound => &mut watcher.upper_bound_watchers,
            };

            if !event_watcher.contains(&self.propagator_var) {
                event_watcher.push(self.propagator_var);
            }
        }
    }
}
