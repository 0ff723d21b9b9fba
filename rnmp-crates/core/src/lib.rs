//! # RNMP
//! A planner for road network maintenance: it decides which maintenance worksheets to execute
//! and when, maximising the importance of the executed work minus the peak disruption it causes
//! on the roads.
//!
//! The crate contains a small constraint programming engine (domains with a trail, a propagator
//! queue and trailed integers), the propagators of the planning model and a branch-and-bound
//! search over an explicit stack of choice points.
//!
//! # Planning an instance
//! ```rust
//! # use rnmp_core::instance::Instance;
//! # use rnmp_core::instance::Worksheet;
//! # use rnmp_core::Solution;
//! # use rnmp_core::SolverOptions;
//! # use rnmp_core::OptimisationResult;
//! let instance = Instance {
//!     horizon: 3,
//!     roads_cost: vec![vec![10, 1, 1]],
//!     work_centers: vec![1],
//!     worksheets: vec![Worksheet {
//!         id: 0,
//!         work_center_id: 0,
//!         mandatory: true,
//!         importance: 5,
//!         est: 0,
//!         lst: 2,
//!         duration: 1,
//!         roads_id: vec![0],
//!         amount_of_workers: vec![1],
//!     }],
//!     nb_activities: 1,
//!     ..Default::default()
//! };
//!
//! let result = rnmp_core::solve(
//!     instance.clone(),
//!     SolverOptions::default(),
//!     None,
//!     |solution: &Solution, objective: i32| println!("{objective}: {solution}"),
//! )
//! .expect("the instance is valid");
//!
//! let (solution, objective) = result.best().expect("a plan exists");
//! assert_eq!(4, objective);
//! assert_eq!(Ok(4), rnmp_core::evaluate(&instance, solution));
//! ```
pub mod asserts;
pub(crate) mod basic_types;
pub mod branching;
pub mod checker;
pub mod containers;
pub(crate) mod engine;
pub mod instance;
pub(crate) mod model;
pub mod objective;
pub mod optimisation;
pub mod propagators;
pub mod statistics;

pub use convert_case;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
mod api;

pub use api::*;

pub use crate::api::solver::DefaultBrancher;
pub use crate::api::solver::Solver;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagationStatusCP;
pub use crate::basic_types::PropagatorConflict;
pub use crate::basic_types::ScheduledWorksheet;
pub use crate::basic_types::Solution;
pub use crate::engine::predicates;
pub use crate::engine::propagation;
pub use crate::engine::termination;
pub use crate::engine::variables;
pub use crate::engine::Assignments;
pub use crate::engine::ConstraintSatisfactionSolver;
pub use crate::engine::EmptyDomain;
pub use crate::engine::EngineStatistics;
