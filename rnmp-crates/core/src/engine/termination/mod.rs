//! A [`TerminationCondition`] is a condition which is polled by the search between decisions
//! to determine whether it should stop.
mod combinator;
mod indefinite;
mod time_budget;

pub use combinator::*;
pub use indefinite::*;
pub use time_budget::*;

/// The central trait that defines a termination condition. A termination condition determines
/// when the solver should give up searching for solutions.
pub trait TerminationCondition {
    /// Returns `true` when the solver should stop, `false` otherwise.
    fn should_stop(&mut self) -> bool;
}

impl<T: TerminationCondition> TerminationCondition for Option<T> {
    fn should_stop(&mut self) -> bool {
        match self {
            Some(t) => t.should_stop(),
            None => false,
        }
    }
}
