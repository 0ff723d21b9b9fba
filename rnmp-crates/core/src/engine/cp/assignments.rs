use super::IntDomainEvent;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::rnmp_assert_moderate;
use crate::rnmp_assert_simple;

/// Signals that a narrowing would have left a domain without values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The domain store: the current bounds of every integer variable, together with the trail which
/// allows them to be restored.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    trail: Trail<ConstraintProgrammingTrailEntry>,
    /// Events caused by narrowings since the last time they were taken.
    events: Vec<(IntDomainEvent, DomainId)>,
}

#[derive(Clone, Copy, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ConstraintProgrammingTrailEntry {
    domain_id: DomainId,
    old_lower_bound: i32,
    old_upper_bound: i32,
}

impl Assignments {
    /// Creates a new variable with the domain `[lower_bound, upper_bound]`.
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        rnmp_assert_simple!(
            lower_bound <= upper_bound,
            "cannot create the empty domain [{lower_bound}, {upper_bound}]"
        );

        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
        })
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        let domain = &self.domains[domain_id];
        domain.lower_bound == domain.upper_bound
    }

    pub fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        self.is_domain_assigned(domain_id)
            .then(|| self.get_lower_bound(domain_id))
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        let domain = &self.domains[domain_id];
        domain.lower_bound <= value && value <= domain.upper_bound
    }

    pub fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => self.get_lower_bound(domain_id) >= lower_bound,
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => self.get_upper_bound(domain_id) <= upper_bound,
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => self.get_assigned_value(domain_id) == Some(equality_constant),
        }
    }

    /// Raises the lower bound of `domain_id` to `new_lower_bound`.
    ///
    /// Nothing changes if the bound is not an improvement. On [`EmptyDomain`] the domain is left
    /// untouched.
    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = self.domains[domain_id];
        if new_lower_bound <= domain.lower_bound {
            return Ok(());
        }
        if new_lower_bound > domain.upper_bound {
            return Err(EmptyDomain);
        }

        self.record(domain_id, domain);
        self.domains[domain_id].lower_bound = new_lower_bound;

        self.events.push((IntDomainEvent::LowerBound, domain_id));
        if new_lower_bound == domain.upper_bound {
            self.events.push((IntDomainEvent::Assign, domain_id));
        }

        Ok(())
    }

    /// Lowers the upper bound of `domain_id` to `new_upper_bound`.
    ///
    /// Nothing changes if the bound is not an improvement. On [`EmptyDomain`] the domain is left
    /// untouched.
    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = self.domains[domain_id];
        if new_upper_bound >= domain.upper_bound {
            return Ok(());
        }
        if new_upper_bound < domain.lower_bound {
            return Err(EmptyDomain);
        }

        self.record(domain_id, domain);
        self.domains[domain_id].upper_bound = new_upper_bound;

        self.events.push((IntDomainEvent::UpperBound, domain_id));
        if new_upper_bound == domain.lower_bound {
            self.events.push((IntDomainEvent::Assign, domain_id));
        }

        Ok(())
    }

    /// Fixes `domain_id` to `value`.
    pub(crate) fn make_assignment(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = self.domains[domain_id];
        if !(domain.lower_bound <= value && value <= domain.upper_bound) {
            return Err(EmptyDomain);
        }
        if domain.lower_bound == domain.upper_bound {
            return Ok(());
        }

        self.record(domain_id, domain);
        self.domains[domain_id] = IntegerDomain {
            lower_bound: value,
            upper_bound: value,
        };

        if domain.lower_bound < value {
            self.events.push((IntDomainEvent::LowerBound, domain_id));
        }
        if domain.upper_bound > value {
            self.events.push((IntDomainEvent::UpperBound, domain_id));
        }
        self.events.push((IntDomainEvent::Assign, domain_id));

        Ok(())
    }

    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => self.tighten_lower_bound(domain_id, lower_bound),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => self.tighten_upper_bound(domain_id, upper_bound),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => self.make_assignment(domain_id, equality_constant),
        }
    }

    pub(crate) fn new_checkpoint(&mut self) {
        rnmp_assert_moderate!(
            self.events.is_empty(),
            "a checkpoint is only taken after all events have been processed"
        );
        self.trail.new_checkpoint();
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    /// Restores every domain to its state at the moment checkpoint `new_checkpoint` was taken.
    /// Pending events are dropped since they describe changes which no longer exist.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) {
        self.events.clear();
        for entry in self.trail.synchronise(new_checkpoint) {
            self.domains[entry.domain_id] = IntegerDomain {
                lower_bound: entry.old_lower_bound,
                upper_bound: entry.old_upper_bound,
            };
        }
    }

    /// Hands out the events collected since the previous call.
    pub(crate) fn take_events(&mut self) -> Vec<(IntDomainEvent, DomainId)> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    fn record(&mut self, domain_id: DomainId, old: IntegerDomain) {
        self.trail.push(ConstraintProgrammingTrailEntry {
            domain_id,
            old_lower_bound: old.lower_bound,
            old_upper_bound: old.upper_bound,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_tightening_leaves_the_domain_untouched() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(2, 5);

        assert_eq!(Err(EmptyDomain), assignments.tighten_lower_bound(domain, 6));
        assert_eq!(Err(EmptyDomain), assignments.tighten_upper_bound(domain, 1));
        assert_eq!(Err(EmptyDomain), assignments.make_assignment(domain, 7));

        assert_eq!(2, assignments.get_lower_bound(domain));
        assert_eq!(5, assignments.get_upper_bound(domain));
        assert!(!assignments.has_pending_events());
    }

    #[test]
    fn tightening_to_a_single_value_emits_an_assign_event() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 1);

        assignments
            .tighten_lower_bound(domain, 1)
            .expect("non-empty domain");

        assert_eq!(
            vec![
                (IntDomainEvent::LowerBound, domain),
                (IntDomainEvent::Assign, domain)
            ],
            assignments.take_events()
        );
        assert_eq!(Some(1), assignments.get_assigned_value(domain));
    }

    #[test]
    fn weaker_bounds_are_ignored() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(3, 8);

        assignments
            .tighten_lower_bound(domain, 1)
            .expect("non-empty domain");
        assignments
            .tighten_upper_bound(domain, 10)
            .expect("non-empty domain");

        assert!(!assignments.has_pending_events());
    }

    #[test]
    fn synchronise_restores_bounds() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(0, 10);
        let y = assignments.grow(0, 10);

        assignments.new_checkpoint();
        assignments.tighten_lower_bound(x, 4).expect("non-empty");
        assignments.make_assignment(y, 6).expect("non-empty");
        let _ = assignments.take_events();

        assignments.new_checkpoint();
        assignments.tighten_upper_bound(x, 5).expect("non-empty");

        assignments.synchronise(1);
        assert_eq!((4, 10), (assignments.get_lower_bound(x), assignments.get_upper_bound(x)));
        assert_eq!(Some(6), assignments.get_assigned_value(y));

        assignments.synchronise(0);
        assert_eq!((0, 10), (assignments.get_lower_bound(x), assignments.get_upper_bound(x)));
        assert_eq!(None, assignments.get_assigned_value(y));
        assert!(!assignments.has_pending_events());
    }
}
