//! Provides the [`ValueSelector`] trait which decides the start of a worksheet once a
//! [`crate::branching::variable_selection::VariableSelector`] picked it.
mod latest_start;
mod least_disruption;

pub use latest_start::LatestStart;
pub use least_disruption::LeastDisruption;

use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;

/// Chooses the start value to try first for a worksheet.
pub trait ValueSelector: std::fmt::Debug {
    /// Returns the decision `start[worksheet] == v` for a value `v` in the current domain; the
    /// start of `worksheet` is not fixed.
    fn select_start(&mut self, context: &SelectionContext, worksheet: usize) -> Predicate;
}

impl<Selector: ValueSelector + ?Sized> ValueSelector for Box<Selector> {
    fn select_start(&mut self, context: &SelectionContext, worksheet: usize) -> Predicate {
        (**self).select_start(context, worksheet)
    }
}
