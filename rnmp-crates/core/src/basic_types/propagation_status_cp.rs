use std::fmt::Display;

use crate::engine::EmptyDomain;

/// The result of invoking a propagator: either propagation succeeded or it identified that the
/// current partial assignment cannot be extended to a solution.
pub type PropagationStatusCP = Result<(), Inconsistency>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inconsistency {
    /// A narrowing left some variable without values.
    EmptyDomain,
    /// A propagator detected the failure without emptying a domain itself.
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

impl Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inconsistency::EmptyDomain => write!(f, "empty domain"),
            Inconsistency::Conflict(conflict) => write!(f, "conflict: {}", conflict.description),
        }
    }
}

/// A failure stated explicitly by a propagator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    pub description: &'static str,
}

impl PropagatorConflict {
    pub(crate) fn new(description: &'static str) -> Self {
        PropagatorConflict { description }
    }
}
