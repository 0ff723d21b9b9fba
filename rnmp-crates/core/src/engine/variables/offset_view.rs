use enumset::EnumSet;

use super::IntegerVariable;
use super::TransformableVariable;
use crate::engine::cp::Assignments;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::Watchers;
use crate::engine::predicates::Predicate;
use crate::engine::predicates::PredicateConstructor;

/// Models the variable `inner + offset`.
///
/// Since the transformation is monotone, bound events of the view coincide with those of the
/// inner variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetView<Inner> {
    inner: Inner,
    offset: i32,
}

impl<Inner> OffsetView<Inner> {
    pub fn new(inner: Inner, offset: i32) -> Self {
        OffsetView { inner, offset }
    }

    pub fn inner(&self) -> &Inner {
        &self.inner
    }
}

impl<Inner: IntegerVariable> IntegerVariable for OffsetView<Inner> {
    fn lower_bound(&self, assignments: &Assignments) -> i32 {
        self.inner.lower_bound(assignments) + self.offset
    }

    fn upper_bound(&self, assignments: &Assignments) -> i32 {
        self.inner.upper_bound(assignments) + self.offset
    }

    fn contains(&self, assignments: &Assignments, value: i32) -> bool {
        self.inner.contains(assignments, value - self.offset)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>) {
        self.inner.watch_all(watchers, events)
    }
}

impl<Inner: IntegerVariable> PredicateConstructor for OffsetView<Inner> {
    type Value = i32;

    fn lower_bound_predicate(&self, bound: i32) -> Predicate {
        self.inner.lower_bound_predicate(bound - self.offset)
    }

    fn upper_bound_predicate(&self, bound: i32) -> Predicate {
        self.inner.upper_bound_predicate(bound - self.offset)
    }

    fn equality_predicate(&self, value: i32) -> Predicate {
        self.inner.equality_predicate(value - self.offset)
    }
}

impl<Inner: Clone> TransformableVariable<OffsetView<Inner>> for OffsetView<Inner> {
    fn offset(&self, offset: i32) -> OffsetView<Inner> {
        OffsetView::new(self.inner.clone(), self.offset + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn bounds_are_shifted() {
        let mut assignments = Assignments::default();
        let start = assignments.grow(2, 6);
        let end = start.offset(3);

        assert_eq!(5, end.lower_bound(&assignments));
        assert_eq!(9, end.upper_bound(&assignments));
        assert!(end.contains(&assignments, 9));
        assert!(!end.contains(&assignments, 4));
    }

    #[test]
    fn predicates_are_translated_to_the_inner_domain() {
        let mut assignments = Assignments::default();
        let start = assignments.grow(0, 10);
        let end = start.offset(4);

        assert_eq!(predicate![start >= 3], predicate![end >= 7]);
        assert_eq!(predicate![start <= 1], predicate![end <= 5]);
        assert_eq!(predicate![start == 6], predicate![end == 10]);
    }

    #[test]
    fn nested_offsets_add_up() {
        let mut assignments = Assignments::default();
        let start = assignments.grow(0, 10);
        let view = start.offset(2).offset(-5);

        assert_eq!(-3, view.lower_bound(&assignments));
    }
}
