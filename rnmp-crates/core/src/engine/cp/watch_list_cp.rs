use enumset::EnumSet;

use super::IntDomainEvent;
use crate::containers::KeyedVec;
use crate::engine::propagation::PropagatorVarId;
use crate::engine::variables::DomainId;
use crate::rnmp_assert_moderate;

/// For every domain, the propagators (and their local variable ids) to notify per event.
#[derive(Default, Debug)]
pub(crate) struct WatchListCP {
    watchers: KeyedVec<DomainId, Watcher>,
}

/// Used by a propagator to subscribe to the events of the variables it reads.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchListCP,
}

#[derive(Default, Debug)]
struct Watcher {
    lower_bound_watchers: Vec<PropagatorVarId>,
    upper_bound_watchers: Vec<PropagatorVarId>,
    assign_watchers: Vec<PropagatorVarId>,
}

impl WatchListCP {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Watcher::default());
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: IntDomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        let watcher = &self.watchers[domain];

        match event {
            IntDomainEvent::Assign => &watcher.assign_watchers,
            IntDomainEvent::LowerBound => &watcher.lower_bound_watchers,
            IntDomainEvent::UpperBound => &watcher.upper_bound_watchers,
        }
    }

    fn watch_all(
        &mut self,
        domain: DomainId,
        events: EnumSet<IntDomainEvent>,
        propagator_var: PropagatorVarId,
    ) {
        let watcher = &mut self.watchers[domain];

        for event in events {
            let event_watchers = match event {
                IntDomainEvent::Assign => &mut watcher.assign_watchers,
                IntDomainEvent::LowerBound => &mut watcher.lower_bound_watchers,
                IntDomainEvent::UpperBound => &mut watcher.upper_bound_watchers,
            };

            rnmp_assert_moderate!(
                !event_watchers.contains(&propagator_var),
                "{propagator_var:?} already watches {domain} for {event}"
            );
            event_watchers.push(propagator_var);
        }
    }
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchListCP) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<IntDomainEvent>) {
        self.watch_list
            .watch_all(domain, events, self.propagator_var);
    }
}

#[cfg(test)]
mod tests {
    use enumset::enum_set;

    use super::*;
    use crate::engine::propagation::LocalId;
    use crate::engine::propagation::PropagatorId;

    #[test]
    fn watchers_are_registered_per_event() {
        let mut watch_list = WatchListCP::default();
        watch_list.grow();
        let domain = DomainId::new(0);

        let propagator_var = PropagatorVarId {
            propagator: PropagatorId(3),
            variable: LocalId::from(1),
        };
        Watchers::new(propagator_var, &mut watch_list).watch_all(
            domain,
            enum_set!(IntDomainEvent::LowerBound | IntDomainEvent::Assign),
        );

        assert_eq!(
            &[propagator_var],
            watch_list.get_affected_propagators(IntDomainEvent::LowerBound, domain)
        );
        assert_eq!(
            &[propagator_var],
            watch_list.get_affected_propagators(IntDomainEvent::Assign, domain)
        );
        assert!(watch_list
            .get_affected_propagators(IntDomainEvent::UpperBound, domain)
            .is_empty());
    }
}
