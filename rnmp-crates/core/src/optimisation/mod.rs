//! Contains structures related to optimisation.
//!
//! The solver maximises the objective with a branch-and-bound search: every solution it reports
//! is strictly better than the previous one, and the search only ends early when its
//! [`crate::termination::TerminationCondition`] triggers.
pub mod solution_callback;
