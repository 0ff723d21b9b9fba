use super::most_important_unfixed;
use super::VariableSelector;
use super::WorksheetVariable;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Places the worksheets with the heaviest chains of predecessors first.
///
/// The weight of a worksheet is `Σ (1 + weight(p))` over its direct predecessors `p`. Once every
/// start is fixed, the remaining selection flags are decided by decreasing importance.
#[derive(Clone, Debug)]
pub struct PrecedenceWeight {
    selected: Vec<DomainId>,
    starts: Vec<DomainId>,
    weights: Vec<u64>,
    importance: Vec<i32>,
}

impl PrecedenceWeight {
    pub fn new(
        selected: Vec<DomainId>,
        starts: Vec<DomainId>,
        weights: Vec<u64>,
        importance: Vec<i32>,
    ) -> Self {
        PrecedenceWeight {
            selected,
            starts,
            weights,
            importance,
        }
    }
}

impl VariableSelector for PrecedenceWeight {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<WorksheetVariable> {
        let mut heaviest: Option<(usize, u64)> = None;
        for (index, (&start, &weight)) in self.starts.iter().zip(self.weights.iter()).enumerate() {
            if context.is_integer_fixed(start) {
                continue;
            }
            if heaviest.map_or(true, |(_, heaviest_weight)| weight > heaviest_weight) {
                heaviest = Some((index, weight));
            }
        }

        heaviest
            .map(|(index, _)| WorksheetVariable::Start(index))
            .or_else(|| most_important_unfixed(context, &self.selected, &self.importance))
    }
}
