use thiserror::Error;

/// Errors related to adding constraints to the solver.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the constraint failed because the solver is in an infeasible state")]
    InfeasibleState,
    #[error("Adding the constraint failed because it is infeasible at the root")]
    InfeasiblePropagator,
    #[error("Constraints can only be added at the root")]
    NotAtRoot,
}
