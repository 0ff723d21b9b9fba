use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::variable_selection::WorksheetVariable;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::create_statistics_struct;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::predicate;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(WorksheetBrancherStatistics {
    num_selection_decisions: u64,
    num_start_decisions: u64,
});

/// A [`Brancher`] which asks its [`VariableSelector`] for a worksheet variable; a selection flag
/// is decided as "executed", a start is decided by the [`ValueSelector`].
#[derive(Debug)]
pub struct WorksheetBrancher<VariableSelection, ValueSelection> {
    selected: Vec<DomainId>,
    variable_selector: VariableSelection,
    value_selector: ValueSelection,
    statistics: WorksheetBrancherStatistics,
}

impl<VariableSelection, ValueSelection> WorksheetBrancher<VariableSelection, ValueSelection> {
    pub fn new(
        selected: Vec<DomainId>,
        variable_selector: VariableSelection,
        value_selector: ValueSelection,
    ) -> Self {
        WorksheetBrancher {
            selected,
            variable_selector,
            value_selector,
            statistics: WorksheetBrancherStatistics::default(),
        }
    }
}

impl<VariableSelection: VariableSelector, ValueSelection: ValueSelector> Brancher
    for WorksheetBrancher<VariableSelection, ValueSelection>
{
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    fn next_decision(&mut self, context: &SelectionContext) -> Option<Predicate> {
        match self.variable_selector.select_variable(context)? {
            WorksheetVariable::Selected(worksheet) => {
                self.statistics.num_selection_decisions += 1;
                let selected = self.selected[worksheet];
                Some(predicate![selected == 1])
            }
            WorksheetVariable::Start(worksheet) => {
                self.statistics.num_start_decisions += 1;
                Some(self.value_selector.select_start(context, worksheet))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::value_selection::LatestStart;
    use crate::branching::variable_selection::ImportanceFirst;
    use crate::engine::ConstraintSatisfactionSolver;

    #[test]
    fn flags_are_tried_as_executed_and_starts_as_late_as_possible() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let selected = vec![solver.new_bounded_integer(0, 1)];
        let starts = vec![solver.new_bounded_integer(1, 4)];
        let mut brancher = WorksheetBrancher::new(
            selected.clone(),
            ImportanceFirst::new(selected.clone(), starts.clone(), vec![2]),
            LatestStart::new(starts.clone()),
        );

        let decision = brancher
            .next_decision(&SelectionContext::new(solver.assignments()))
            .expect("the flag is not fixed");
        let flag = selected[0];
        assert_eq!(predicate![flag == 1], decision);

        solver.post(decision).expect("non-empty domain");
        let decision = brancher
            .next_decision(&SelectionContext::new(solver.assignments()))
            .expect("the start is not fixed");
        let start = starts[0];
        assert_eq!(predicate![start == 4], decision);

        solver.post(decision).expect("non-empty domain");
        assert_eq!(
            None,
            brancher.next_decision(&SelectionContext::new(solver.assignments()))
        );
    }
}
