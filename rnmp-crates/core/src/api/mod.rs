mod options;
mod outputs;
pub(crate) mod solver;

use std::time::Duration;

use log::debug;
pub use options::*;
pub use outputs::*;

use crate::basic_types::Solution;
use crate::checker::check_solution;
use crate::engine::termination::TimeBudget;
use crate::instance::Instance;
use crate::instance::InstanceError;
use crate::objective::evaluate_solution;
use crate::optimisation::solution_callback::SolutionCallback;
use crate::rnmp_assert_eq_simple;
use crate::Solver;

/// Plans `instance` with the default brancher, within `time_limit` if one is given.
///
/// Statistics are logged at the end when statistic logging is configured.
pub fn solve(
    instance: Instance,
    options: SolverOptions,
    time_limit: Option<Duration>,
    callback: impl SolutionCallback,
) -> Result<OptimisationResult, InstanceError> {
    let mut solver = Solver::new(instance, options)?;
    let mut brancher = solver.default_brancher();
    let mut termination = time_limit.map(TimeBudget::starting_now);

    let result = solver.optimise(&mut brancher, &mut termination, callback);

    match result.best() {
        Some((_, objective)) => solver.log_statistics_with_objective(&brancher, objective),
        None => solver.log_statistics(&brancher),
    }

    Ok(result)
}

/// Computes the objective of a stored plan.
///
/// The plan is checked against the instance, then imposed on the model (worksheets which are not
/// listed are not executed) and propagated without any search. The result only depends on the
/// instance and the plan.
pub fn evaluate(instance: &Instance, solution: &Solution) -> Result<i32, EvaluationError> {
    let mut solver = Solver::new(instance.clone(), SolverOptions::default())?;

    for pair in solution.scheduled().windows(2) {
        if pair[0].worksheet == pair[1].worksheet {
            return Err(EvaluationError::DuplicateWorksheet(pair[0].worksheet));
        }
    }
    if let Some(entry) = solution
        .scheduled()
        .iter()
        .find(|entry| entry.worksheet >= instance.num_worksheets())
    {
        return Err(EvaluationError::UnknownWorksheet(entry.worksheet));
    }

    check_solution(instance, solution)?;

    let Some(objective) = solver.propagate_solution(solution) else {
        debug!("Propagating the plan {solution} failed");
        return Err(EvaluationError::InfeasibleSolution);
    };

    rnmp_assert_eq_simple!(evaluate_solution(instance, solution), objective);
    Ok(objective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::SolutionViolation;
    use crate::instance::test_instances::single_worksheet;

    #[test]
    fn the_single_worksheet_avoids_the_expensive_step() {
        let mut objectives = vec![];
        let result = solve(
            single_worksheet(),
            SolverOptions::default(),
            None,
            |_: &Solution, objective: i32| objectives.push(objective),
        )
        .expect("a valid instance");

        let OptimisationResult::Optimal {
            solution,
            objective,
        } = result
        else {
            panic!("the search space is small enough to be exhausted, got {result:?}");
        };
        assert_eq!(4, objective);
        assert!(matches!(solution.start_of(0), Some(1) | Some(2)));
        assert!(objectives.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(Some(&4), objectives.last());
    }

    #[test]
    fn both_heuristics_reach_the_optimum() {
        for search in [SearchStrategy::ImportanceFirst, SearchStrategy::PrecedenceWeight] {
            for start_value in [
                StartValueSelection::LatestStart,
                StartValueSelection::LeastDisruption,
            ] {
                let options = SolverOptions {
                    search: Some(search),
                    start_value: Some(start_value),
                };
                let result = solve(single_worksheet(), options, None, None::<fn(&Solution, i32)>)
                    .expect("a valid instance");

                assert_eq!(Some(4), result.best().map(|(_, objective)| objective));
            }
        }
    }

    #[test]
    fn an_exhausted_time_limit_without_a_plan_is_unknown() {
        let result = solve(
            single_worksheet(),
            SolverOptions::default(),
            Some(Duration::ZERO),
            None::<fn(&Solution, i32)>,
        )
        .expect("a valid instance");

        assert_eq!(OptimisationResult::Unknown, result);
    }

    #[test]
    fn evaluation_rejects_invalid_instances() {
        let mut instance = single_worksheet();
        instance.worksheets[0].lst = i32::MAX;

        assert!(matches!(
            evaluate(&instance, &[(0, 1)].into_iter().collect()),
            Err(EvaluationError::Instance(
                InstanceError::WindowOutOfRange { worksheet: 0, .. }
            ))
        ));
    }

    #[test]
    fn evaluation_matches_the_objective() {
        let instance = single_worksheet();

        let early: Solution = [(0, 0)].into_iter().collect();
        let late: Solution = [(0, 1)].into_iter().collect();

        assert_eq!(Ok(-5), evaluate(&instance, &early));
        assert_eq!(Ok(4), evaluate(&instance, &late));
        assert_eq!(Ok(4), evaluate(&instance, &late));
    }

    #[test]
    fn evaluation_rejects_broken_plans() {
        let instance = single_worksheet();

        assert_eq!(
            Err(EvaluationError::UnknownWorksheet(2)),
            evaluate(&instance, &[(0, 1), (2, 0)].into_iter().collect())
        );
        assert_eq!(
            Err(EvaluationError::DuplicateWorksheet(0)),
            evaluate(&instance, &[(0, 1), (0, 2)].into_iter().collect())
        );
        assert_eq!(
            Err(EvaluationError::Violation(
                SolutionViolation::MandatoryNotExecuted(0)
            )),
            evaluate(&instance, &Solution::default())
        );
    }
}
