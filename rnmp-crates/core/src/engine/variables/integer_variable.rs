use enumset::EnumSet;

use crate::engine::cp::Assignments;
use crate::engine::cp::IntDomainEvent;
use crate::engine::cp::Watchers;
use crate::engine::predicates::PredicateConstructor;

/// The behaviour shared by [`super::DomainId`] and the views built on top of it.
pub trait IntegerVariable: Clone + std::fmt::Debug + PredicateConstructor<Value = i32> {
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    fn is_fixed(&self, assignments: &Assignments) -> bool {
        self.lower_bound(assignments) == self.upper_bound(assignments)
    }

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);
}

/// Variables which can be shifted by a constant.
pub trait TransformableVariable<View> {
    /// Get a variable which domain is shifted by `offset`.
    fn offset(&self, offset: i32) -> View;
}
