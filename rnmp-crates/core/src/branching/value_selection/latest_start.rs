use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::predicate;

/// Starts worksheets as late as possible.
#[derive(Clone, Debug)]
pub struct LatestStart {
    starts: Vec<DomainId>,
}

impl LatestStart {
    pub fn new(starts: Vec<DomainId>) -> Self {
        LatestStart { starts }
    }
}

impl ValueSelector for LatestStart {
    fn select_start(&mut self, context: &SelectionContext, worksheet: usize) -> Predicate {
        let start = self.starts[worksheet];
        predicate![start == context.upper_bound(start)]
    }
}
