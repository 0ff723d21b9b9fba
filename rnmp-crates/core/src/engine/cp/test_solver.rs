#![cfg(test)]
//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows
//! setting up specific scenarios under which to test the various operations of a propagator.
use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::engine::predicates::Predicate;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::ConstraintSatisfactionSolver;

/// A container for variables and propagators, which can be used to test propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    solver: ConstraintSatisfactionSolver,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.solver.new_bounded_integer(lb, ub)
    }

    /// Adds the propagator and propagates the root to a fixed point.
    pub(crate) fn new_propagator<Constructor: PropagatorConstructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<(), ConstraintOperationError> {
        self.solver.add_propagator(constructor)
    }

    /// Opens a new checkpoint, applies `predicate` and propagates.
    pub(crate) fn post_and_propagate(&mut self, predicate: Predicate) -> Result<(), Inconsistency> {
        self.solver.new_checkpoint();
        self.solver.post(predicate)?;
        self.solver.propagate()
    }

    pub(crate) fn restore_to(&mut self, checkpoint: usize) {
        self.solver.restore_to(checkpoint)
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.solver.lower_bound(&var)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.solver.upper_bound(&var)
    }

    pub(crate) fn is_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        var.is_fixed(self.solver.assignments())
    }

    pub(crate) fn assert_bounds<Var: IntegerVariable>(&self, var: Var, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var.clone());
        let actual_ub = self.upper_bound(var.clone());

        assert_eq!(
            (lb, ub),
            (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}] of {var:?}"
        );
    }

    pub(crate) fn violated_propagators(&self) -> Vec<&str> {
        self.solver.violated_propagators()
    }
}
