use crate::basic_types::Solution;
#[cfg(doc)]
use crate::branching;
use crate::branching::SelectionContext;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::predicates::Predicate;
use crate::statistics::StatisticLogger;

/// A trait for defining a branching strategy.
///
/// Implementations of this trait define how the search proceeds: it is required that the
/// resulting decision shrinks the domain of the variable it concerns. See [`branching`] for the
/// provided implementation.
pub trait Brancher {
    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}

    /// Returns the next decision, or [`None`] if every variable under consideration is fixed.
    ///
    /// The decision is only a suggestion; the engine applies it.
    fn next_decision(&mut self, context: &SelectionContext) -> Option<Predicate>;

    /// Called whenever the search restores an earlier checkpoint.
    fn on_backtrack(&mut self) {}

    /// Called when a new incumbent solution is found.
    fn on_solution(&mut self, _solution: &Solution) {}
}

impl<B: Brancher + ?Sized> Brancher for Box<B> {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        (**self).log_statistics(statistic_logger)
    }

    fn next_decision(&mut self, context: &SelectionContext) -> Option<Predicate> {
        (**self).next_decision(context)
    }

    fn on_backtrack(&mut self) {
        (**self).on_backtrack()
    }

    fn on_solution(&mut self, solution: &Solution) {
        (**self).on_solution(solution)
    }
}
