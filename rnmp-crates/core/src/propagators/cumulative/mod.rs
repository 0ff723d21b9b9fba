//! Contains the propagator for the resource constraint of a work center.
//!
//! The constraint reasons over a set of optional tasks on a single resource with a capacity.
//! Each task consists of:
//! - A boolean variable `x_i` stating whether the task is executed
//! - A variable `s_i` representing its start time
//! - A sequence of unit-length steps, where step `k` runs at `s_i + k` and uses `r_ik` units of
//!   the resource
//!
//! The notation for the significant time points is the usual one: `EST_i = lb(s_i)`,
//! `LST_i = ub(s_i)`, `ECT_i = lb(s_i) + p_i` with `p_i` the number of steps.
//!
//! An executed task whose `LST_i < ECT_i` is guaranteed to run in `[LST_i, ECT_i)`; this is its
//! compulsory part. The time-table collects the compulsory parts of all executed tasks and is
//! used to shave the start bounds of the other tasks, or to rule out optional tasks which fit
//! nowhere.
mod time_table_per_point;

pub use time_table_per_point::*;

use crate::engine::variables::DomainId;

/// An optional task given as input to the [`TimeTablePerPointPropagator`].
#[derive(Clone, Debug)]
pub struct ArgOptionalTask {
    pub selected: DomainId,
    pub start_time: DomainId,
    /// The resource usage of each unit-length step.
    pub resource_usages: Box<[i32]>,
}

impl ArgOptionalTask {
    pub(crate) fn processing_time(&self) -> i32 {
        self.resource_usages.len() as i32
    }
}
