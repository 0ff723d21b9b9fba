use super::LocalId;
use super::NotificationContext;
use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::cp::IntDomainEvent;
#[cfg(doc)]
use crate::engine::propagation::PropagatorConstructorContext;
use crate::statistics::StatisticLogger;

/// A propagator removes values from domains which will never be in any solution, or raises
/// explicit conflicts.
///
/// The only required functions are [`Propagator::name`] and [`Propagator::propagate`]; all other
/// functions have default implementations.
pub trait Propagator {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Narrows the domains of the variables of this propagator given the current domains, or
    /// reports that the current domains admit no solution.
    ///
    /// Fails with [`crate::basic_types::Inconsistency::EmptyDomain`] when a narrowing empties a
    /// domain, or with [`crate::basic_types::Inconsistency::Conflict`] when the propagator itself
    /// detects the failure.
    ///
    /// Propagators are not required to propagate until a fixed point. It will be called again by
    /// the solver until no further propagations happen.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Returns whether the propagator should be enqueued for propagation when an
    /// [`IntDomainEvent`] happens to one of the variables the propagator is subscribed to (as
    /// registered during creation with [`PropagatorConstructorContext::register`]).
    ///
    /// This can be used to incrementally maintain data structures, and should only be used for
    /// computationally cheap logic. Expensive computation should be performed in
    /// [`Propagator::propagate`].
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: IntDomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after backtracking, allowing the propagator to update its internal data structures
    /// given the new variable domains.
    ///
    /// By default this function does nothing.
    fn synchronise(&mut self, _context: PropagationContext) {}

    /// Returns the [`Priority`] of the propagator, used for determining the order in which
    /// propagators are called.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Reports whether the constraint is satisfied by every completion of the current domains,
    /// violated by all of them, or neither.
    fn is_entailed(&self, _context: PropagationContext) -> Entailment {
        Entailment::Unknown
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// The answer of [`Propagator::is_entailed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entailment {
    True,
    False,
    Unknown,
}

/// The priority of a propagator, used for determining the order in which propagators will be
/// called.
///
/// Typically, propagators with low computational complexity should be assigned a high
/// priority (i.e., should be propagated before computationally expensive propagators).
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}
