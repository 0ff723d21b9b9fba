use super::most_important_unfixed;
use super::VariableSelector;
use super::WorksheetVariable;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;

/// Completes the executed worksheets first, then decides the most important worksheets.
///
/// In order:
/// 1. the start of the first executed worksheet whose start is not fixed;
/// 2. the unfixed selection flag with the highest importance;
/// 3. the first start which is not fixed.
#[derive(Clone, Debug)]
pub struct ImportanceFirst {
    selected: Vec<DomainId>,
    starts: Vec<DomainId>,
    importance: Vec<i32>,
}

impl ImportanceFirst {
    pub fn new(selected: Vec<DomainId>, starts: Vec<DomainId>, importance: Vec<i32>) -> Self {
        ImportanceFirst {
            selected,
            starts,
            importance,
        }
    }
}

impl VariableSelector for ImportanceFirst {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<WorksheetVariable> {
        let executed_without_start = self
            .selected
            .iter()
            .zip(self.starts.iter())
            .position(|(&selected, &start)| {
                context.lower_bound(selected) == 1 && !context.is_integer_fixed(start)
            });
        if let Some(index) = executed_without_start {
            return Some(WorksheetVariable::Start(index));
        }

        most_important_unfixed(context, &self.selected, &self.importance).or_else(|| {
            self.starts
                .iter()
                .position(|&start| !context.is_integer_fixed(start))
                .map(WorksheetVariable::Start)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConstraintSatisfactionSolver;
    use crate::predicate;

    #[test]
    fn executed_worksheets_are_placed_before_new_ones_are_chosen() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let selected = vec![
            solver.new_bounded_integer(0, 1),
            solver.new_bounded_integer(0, 1),
            solver.new_bounded_integer(0, 1),
        ];
        let starts = vec![
            solver.new_bounded_integer(0, 3),
            solver.new_bounded_integer(0, 3),
            solver.new_bounded_integer(0, 3),
        ];
        let mut selector = ImportanceFirst::new(selected.clone(), starts.clone(), vec![1, 4, 4]);

        let context = SelectionContext::new(solver.assignments());
        assert_eq!(
            Some(WorksheetVariable::Selected(1)),
            selector.select_variable(&context)
        );

        let last = selected[2];
        solver.post(predicate![last == 1]).expect("non-empty domain");
        let context = SelectionContext::new(solver.assignments());
        assert_eq!(
            Some(WorksheetVariable::Start(2)),
            selector.select_variable(&context)
        );
    }

    #[test]
    fn remaining_starts_come_last() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let selected = vec![solver.new_bounded_integer(0, 0)];
        let starts = vec![solver.new_bounded_integer(1, 2)];
        let mut selector = ImportanceFirst::new(selected, starts.clone(), vec![3]);

        let context = SelectionContext::new(solver.assignments());
        assert_eq!(
            Some(WorksheetVariable::Start(0)),
            selector.select_variable(&context)
        );

        let start = starts[0];
        solver.post(predicate![start == 1]).expect("non-empty domain");
        let context = SelectionContext::new(solver.assignments());
        assert_eq!(None, selector.select_variable(&context));
    }
}
