//! Depth-first branch-and-bound over an explicit stack of choice points.
use crate::basic_types::PropagationStatusCP;
use crate::branching::Brancher;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::Assignments;
use crate::engine::ConstraintSatisfactionSolver;
use crate::predicate;
use crate::rnmp_assert_moderate;

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    /// The whole search space was explored.
    Exhausted,
    /// The termination condition triggered first.
    TimedOut,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchState {
    Branching,
    Propagating,
    Success,
    Failure,
    Backtracking,
}

/// A decision point; restoring `checkpoint` undoes the decision and everything after it.
#[derive(Clone, Debug)]
struct ChoicePoint {
    checkpoint: usize,
    /// The untried alternatives, the next one last.
    alternatives: Vec<Predicate>,
}

/// Maximises `objective`, calling `on_solution` for every strictly improving complete
/// assignment.
///
/// After the first solution every node is required to improve on the best objective so far.
pub(crate) fn branch_and_bound<B: Brancher>(
    solver: &mut ConstraintSatisfactionSolver,
    objective: DomainId,
    brancher: &mut B,
    termination: &mut impl TerminationCondition,
    mut on_solution: impl FnMut(&Assignments, i32, &mut B),
) -> SearchOutcome {
    if solver.is_infeasible() {
        return SearchOutcome::Exhausted;
    }

    let mut choice_points: Vec<ChoicePoint> = Vec::new();
    let mut best_objective: Option<i32> = None;
    let mut state = SearchState::Propagating;

    loop {
        state = match state {
            SearchState::Propagating => {
                match propagate_with_bound(solver, objective, best_objective) {
                    Ok(()) => SearchState::Branching,
                    Err(_) => SearchState::Failure,
                }
            }

            SearchState::Branching => {
                if termination.should_stop() {
                    return SearchOutcome::TimedOut;
                }

                let context = SelectionContext::new(solver.assignments());
                match brancher.next_decision(&context) {
                    None => SearchState::Success,
                    Some(decision) => {
                        choice_points.push(ChoicePoint {
                            checkpoint: solver.get_checkpoint(),
                            alternatives: alternatives(decision, solver.assignments()),
                        });
                        solver.statistics.num_decisions += 1;
                        solver.statistics.peak_depth =
                            solver.statistics.peak_depth.max(choice_points.len() as u64);

                        solver.new_checkpoint();
                        match solver.post(decision) {
                            Ok(()) => SearchState::Propagating,
                            Err(_) => SearchState::Failure,
                        }
                    }
                }
            }

            SearchState::Success => {
                let value = solver.lower_bound(&objective);
                rnmp_assert_moderate!(
                    solver.upper_bound(&objective) == value,
                    "The objective is fixed once every decision variable is"
                );

                solver.statistics.num_solutions += 1;
                on_solution(solver.assignments(), value, brancher);
                best_objective = Some(value);

                SearchState::Failure
            }

            SearchState::Failure => {
                solver.statistics.num_failures += 1;
                SearchState::Backtracking
            }

            SearchState::Backtracking => {
                if !backtrack(solver, &mut choice_points, brancher) {
                    return SearchOutcome::Exhausted;
                }
                SearchState::Propagating
            }
        };
    }
}

fn propagate_with_bound(
    solver: &mut ConstraintSatisfactionSolver,
    objective: DomainId,
    best_objective: Option<i32>,
) -> PropagationStatusCP {
    if let Some(best_objective) = best_objective {
        solver.post(predicate![objective >= best_objective + 1])?;
    }

    solver.propagate()
}

/// Restores the most recent choice point with an untried alternative and applies it. Returns
/// `false` when no such choice point exists.
fn backtrack<B: Brancher>(
    solver: &mut ConstraintSatisfactionSolver,
    choice_points: &mut Vec<ChoicePoint>,
    brancher: &mut B,
) -> bool {
    while let Some(choice_point) = choice_points.last_mut() {
        solver.restore_to(choice_point.checkpoint);
        solver.statistics.num_backtracks += 1;
        brancher.on_backtrack();

        let next_alternative = choice_point.alternatives.pop();
        match next_alternative {
            Some(alternative) => {
                solver.new_checkpoint();
                if solver.post(alternative).is_ok() {
                    return true;
                }
            }
            None => {
                let _ = choice_points.pop();
            }
        }
    }

    false
}

/// The refutations of `decision` within the current domain, stored so that `x <= v - 1` is tried
/// before `x >= v + 1`.
fn alternatives(decision: Predicate, assignments: &Assignments) -> Vec<Predicate> {
    let domain = decision.get_domain();
    match decision {
        Predicate::Equal {
            equality_constant, ..
        } => {
            let mut alternatives = Vec::with_capacity(2);
            if equality_constant < assignments.get_upper_bound(domain) {
                alternatives.push(predicate![domain >= equality_constant + 1]);
            }
            if equality_constant > assignments.get_lower_bound(domain) {
                alternatives.push(predicate![domain <= equality_constant - 1]);
            }
            alternatives
        }
        Predicate::LowerBound { lower_bound, .. } => {
            vec![predicate![domain <= lower_bound - 1]]
        }
        Predicate::UpperBound { upper_bound, .. } => {
            vec![predicate![domain >= upper_bound + 1]]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::termination::Indefinite;

    /// Assigns the first unfixed variable to its lower bound.
    #[derive(Debug)]
    struct InputOrderMin {
        variables: Vec<DomainId>,
        num_backtracks: usize,
    }

    impl Brancher for InputOrderMin {
        fn next_decision(&mut self, context: &SelectionContext) -> Option<Predicate> {
            self.variables
                .iter()
                .find(|&&variable| !context.is_integer_fixed(variable))
                .map(|&variable| predicate![variable == context.lower_bound(variable)])
        }

        fn on_backtrack(&mut self) {
            self.num_backtracks += 1;
        }
    }

    #[derive(Debug)]
    struct StopImmediately;

    impl TerminationCondition for StopImmediately {
        fn should_stop(&mut self) -> bool {
            true
        }
    }

    #[test]
    fn an_equality_decision_is_refuted_below_then_above() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.new_bounded_integer(0, 4);

        assert_eq!(
            vec![predicate![x >= 3], predicate![x <= 1]],
            alternatives(predicate![x == 2], solver.assignments())
        );
        assert_eq!(
            vec![predicate![x >= 1]],
            alternatives(predicate![x == 0], solver.assignments())
        );
    }

    #[test]
    fn solutions_improve_strictly_until_the_space_is_exhausted() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.new_bounded_integer(0, 2);
        let mut brancher = InputOrderMin {
            variables: vec![x],
            num_backtracks: 0,
        };

        let mut objectives = vec![];
        let outcome = branch_and_bound(
            &mut solver,
            x,
            &mut brancher,
            &mut Indefinite,
            |_, value, _| objectives.push(value),
        );

        assert_eq!(SearchOutcome::Exhausted, outcome);
        assert_eq!(vec![0, 1, 2], objectives);
        assert!(brancher.num_backtracks > 0);
        assert_eq!(3, solver.statistics.num_solutions);
    }

    #[test]
    fn termination_is_checked_before_deciding() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.new_bounded_integer(0, 2);
        let mut brancher = InputOrderMin {
            variables: vec![x],
            num_backtracks: 0,
        };

        let mut num_solutions = 0;
        let outcome = branch_and_bound(
            &mut solver,
            x,
            &mut brancher,
            &mut StopImmediately,
            |_, _, _| num_solutions += 1,
        );

        assert_eq!(SearchOutcome::TimedOut, outcome);
        assert_eq!(0, num_solutions);
        assert_eq!(0, solver.get_checkpoint());
    }
}
