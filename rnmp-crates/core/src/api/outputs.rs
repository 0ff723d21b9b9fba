use thiserror::Error;

use crate::basic_types::Solution;
use crate::checker::SolutionViolation;
use crate::instance::InstanceError;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::optimise`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimisationResult {
    /// Indicates that an optimal solution has been found and proven to be optimal.
    Optimal { solution: Solution, objective: i32 },
    /// Indicates that a solution was found; it is the best known solution by the solver.
    Satisfiable { solution: Solution, objective: i32 },
    /// Indicates that there is no solution to the problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

impl OptimisationResult {
    /// The best solution found, if any.
    pub fn best(&self) -> Option<(&Solution, i32)> {
        match self {
            OptimisationResult::Optimal {
                solution,
                objective,
            }
            | OptimisationResult::Satisfiable {
                solution,
                objective,
            } => Some((solution, *objective)),
            OptimisationResult::Unsatisfiable | OptimisationResult::Unknown => None,
        }
    }
}

/// Reasons why a stored solution cannot be evaluated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("the instance is malformed: {0}")]
    Instance(#[from] InstanceError),
    #[error("worksheet {0} does not exist")]
    UnknownWorksheet(usize),
    #[error("worksheet {0} is listed more than once")]
    DuplicateWorksheet(usize),
    #[error("the solution is not feasible: {0}")]
    Violation(#[from] SolutionViolation),
    #[error("propagating the solution leads to a contradiction")]
    InfeasibleSolution,
}
