use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::variables::DomainId;

/// While a propagator runs, the domain changes it performs are captured as
/// events in the event sink. When the propagator finishes, the event sink is
/// drained to notify all the propagators that subscribe to those events.
///
/// The event sink ensures duplicate events are ignored.
#[derive(Default, Clone, Debug)]
pub(crate) struct EventSink {
    present: KeyedVec<DomainId, EnumSet<DomainEvent>>,
    events: Vec<(DomainEvent, DomainId)>,
}

impl EventSink {
    pub(crate) fn grow(&mut self) {
        let _ = self.present.push(EnumSet::new());
    }

    pub(crate) fn event_occurred(&mut self, event: DomainEvent, domain: DomainId) {
        let elem = &mut self.present[domain];

        if elem.contains(event) {
            // The event was already triggered.
            return;
        }

        let _ = elem.insert(event);
        self.events.push((event, domain));
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (DomainEvent, DomainId)> + '_ {
        self.events.drain(..).inspect(|&(event, domain)| {
            let _ = self.present[domain].remove(event);
        })
    }

    /// Discard all pending events, e.g. when the search abandons the branch
    /// that produced them.
    pub(crate) fn clear(&mut self) {
        for (event, domain) in self.events.drain(..) {
            let _ = self.present[domain].remove(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sink_with_domains(num_domains: usize) -> EventSink {
        let mut sink = EventSink::default();
        for _ in 0..num_domains {
            sink.grow();
        }
        sink
    }

    #[test]
    fn the_default_sink_is_empty() {
        let mut sink = EventSink::default();

        let events = sink.drain().collect::<Vec<_>>();
        assert!(events.is_empty());
    }

    #[test]
    fn a_captured_event_is_observed_in_the_drain() {
        let mut sink = sink_with_domains(2);

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(DomainEvent::UpperBound, DomainId::new(1));

        let events = sink.drain().collect::<Vec<_>>();

        assert_eq!(events.len(), 2);
        assert!(events.contains(&(DomainEvent::LowerBound, DomainId::new(0))));
        assert!(events.contains(&(DomainEvent::UpperBound, DomainId::new(1))));
    }

    #[test]
    fn after_draining_the_event_sink_is_empty() {
        let mut sink = sink_with_domains(2);

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(DomainEvent::UpperBound, DomainId::new(1));

        let _ = sink.drain().collect::<Vec<_>>();

        let events = sink.drain().collect::<Vec<_>>();
        assert!(events.is_empty());
    }

    #[test]
    fn duplicate_events_are_ignored() {
        let mut sink = sink_with_domains(1);

        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));
        sink.event_occurred(DomainEvent::LowerBound, DomainId::new(0));

        let events = sink.drain().collect::<Vec<_>>();

        assert_eq!(events.len(), 1);
    }

    #[test]
    fn cleared_events_are_not_drained_and_can_reoccur() {
        let mut sink = sink_with_domains(1);

        sink.event_occurred(DomainEvent::Assign, DomainId::new(0));
        sink.clear();

        assert!(sink.drain().next().is_none());

        sink.event_occurred(DomainEvent::Assign, DomainId::new(0));
        let events = sink.drain().collect::<Vec<_>>();
        assert_eq!(events.len(), 1);
    }
}
