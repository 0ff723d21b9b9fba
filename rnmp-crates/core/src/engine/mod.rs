mod constraint_satisfaction_solver;
pub mod cp;
pub mod predicates;
pub mod propagation;
pub(crate) mod search;
mod solver_statistics;
pub mod termination;
pub mod variables;

pub use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use cp::Assignments;
pub use cp::EmptyDomain;
pub use solver_statistics::EngineStatistics;
