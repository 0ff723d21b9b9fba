use std::time::Instant;

use log::debug;
use log::info;

use super::options::SearchStrategy;
use super::options::SolverOptions;
use super::options::StartValueSelection;
use super::outputs::OptimisationResult;
use super::InstanceTier;
use crate::basic_types::Solution;
use crate::branching::branchers::WorksheetBrancher;
use crate::branching::value_selection::LatestStart;
use crate::branching::value_selection::LeastDisruption;
use crate::branching::value_selection::ValueSelector;
use crate::branching::variable_selection::ImportanceFirst;
use crate::branching::variable_selection::PrecedenceWeight;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::Brancher;
use crate::checker::check_solution;
use crate::engine::search::branch_and_bound;
use crate::engine::search::SearchOutcome;
use crate::engine::termination::TerminationCondition;
use crate::engine::ConstraintSatisfactionSolver;
use crate::instance::Instance;
use crate::instance::InstanceError;
use crate::instance::PrecedenceGraph;
use crate::model::PlanningModel;
use crate::optimisation::solution_callback::SolutionCallback;
use crate::predicate;
use crate::rnmp_assert_moderate;
use crate::statistics::log_statistic;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::StatisticLogger;

/// Plans one instance: owns the engine, the variables of the instance and its precedence graph.
///
/// ```rust
/// # use rnmp_core::instance::Instance;
/// # use rnmp_core::termination::Indefinite;
/// # use rnmp_core::OptimisationResult;
/// # use rnmp_core::Solution;
/// # use rnmp_core::Solver;
/// # use rnmp_core::SolverOptions;
/// // An instance without worksheets has the empty plan as its optimum.
/// let instance = Instance {
///     horizon: 2,
///     roads_cost: vec![vec![3, 1]],
///     ..Default::default()
/// };
///
/// let mut solver = Solver::new(instance, SolverOptions::default()).expect("a valid instance");
/// let mut brancher = solver.default_brancher();
/// let result = solver.optimise(&mut brancher, &mut Indefinite, |_: &Solution, _: i32| {});
///
/// assert!(matches!(result, OptimisationResult::Optimal { objective: 0, .. }));
/// ```
#[derive(Debug)]
pub struct Solver {
    satisfaction_solver: ConstraintSatisfactionSolver,
    instance: Instance,
    precedence_graph: PrecedenceGraph,
    model: PlanningModel,
    options: SolverOptions,
}

/// The brancher used when the caller does not provide one; its selectors follow the
/// [`SolverOptions`].
pub type DefaultBrancher =
    WorksheetBrancher<Box<dyn VariableSelector>, Box<dyn ValueSelector>>;

impl Solver {
    /// Validates `instance` and posts its model.
    pub fn new(instance: Instance, options: SolverOptions) -> Result<Solver, InstanceError> {
        let precedence_graph = instance.validate()?;

        let mut satisfaction_solver = ConstraintSatisfactionSolver::default();
        let model = PlanningModel::build(&instance, &mut satisfaction_solver);
        if satisfaction_solver.is_infeasible() {
            debug!("The model is infeasible at the root");
        }

        Ok(Solver {
            satisfaction_solver,
            instance,
            precedence_graph,
            model,
            options,
        })
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn tier(&self) -> InstanceTier {
        InstanceTier::from_name(self.instance.name.as_deref())
    }

    /// Creates an instance of the [`DefaultBrancher`].
    pub fn default_brancher(&self) -> DefaultBrancher {
        let tier = self.tier();
        let search = self.options.search.unwrap_or(tier.default_search());
        let start_value = self
            .options
            .start_value
            .unwrap_or(tier.default_start_value());
        debug!("Searching with {search:?} and {start_value:?}");

        let importance = self
            .instance
            .worksheets
            .iter()
            .map(|worksheet| worksheet.importance)
            .collect::<Vec<_>>();

        let variable_selector: Box<dyn VariableSelector> = match search {
            SearchStrategy::ImportanceFirst => Box::new(ImportanceFirst::new(
                self.model.selected.clone(),
                self.model.starts.clone(),
                importance,
            )),
            SearchStrategy::PrecedenceWeight => Box::new(PrecedenceWeight::new(
                self.model.selected.clone(),
                self.model.starts.clone(),
                self.precedence_graph.weights(),
                importance,
            )),
        };
        let value_selector: Box<dyn ValueSelector> = match start_value {
            StartValueSelection::LatestStart => {
                Box::new(LatestStart::new(self.model.starts.clone()))
            }
            StartValueSelection::LeastDisruption => Box::new(LeastDisruption::new(
                &self.instance,
                self.model.starts.clone(),
                self.model.perturbed.clone(),
            )),
        };

        WorksheetBrancher::new(self.model.selected.clone(), variable_selector, value_selector)
    }

    /// Searches for plans of increasing objective until the search space is exhausted or
    /// `termination` triggers. `callback` receives every improving plan.
    pub fn optimise(
        &mut self,
        brancher: &mut impl Brancher,
        termination: &mut impl TerminationCondition,
        mut callback: impl SolutionCallback,
    ) -> OptimisationResult {
        let started_at = Instant::now();
        let Solver {
            satisfaction_solver,
            instance,
            model,
            ..
        } = self;

        let mut best: Option<(Solution, i32)> = None;
        let outcome = branch_and_bound(
            satisfaction_solver,
            model.objective,
            brancher,
            termination,
            |assignments, objective, brancher| {
                let solution = model.solution(assignments);
                rnmp_assert_moderate!(
                    check_solution(instance, &solution).is_ok(),
                    "Every emitted plan satisfies the instance"
                );
                info!("Found a plan with objective {objective}");

                brancher.on_solution(&solution);
                callback.on_solution_callback(&solution, objective);
                best = Some((solution, objective));
            },
        );

        satisfaction_solver.restore_to(0);
        satisfaction_solver.statistics.time_spent_in_solver +=
            started_at.elapsed().as_millis() as u64;

        match (outcome, best) {
            (SearchOutcome::Exhausted, Some((solution, objective))) => {
                OptimisationResult::Optimal {
                    solution,
                    objective,
                }
            }
            (SearchOutcome::Exhausted, None) => OptimisationResult::Unsatisfiable,
            (SearchOutcome::TimedOut, Some((solution, objective))) => {
                OptimisationResult::Satisfiable {
                    solution,
                    objective,
                }
            }
            (SearchOutcome::TimedOut, None) => OptimisationResult::Unknown,
        }
    }

    /// Logs the statistics currently present in the solver with the provided objective value.
    pub fn log_statistics_with_objective(&self, brancher: &impl Brancher, objective_value: i32) {
        log_statistic("objective", objective_value);
        self.log_statistics(brancher);
    }

    /// Logs the statistics of the engine, its propagators and `brancher`.
    pub fn log_statistics(&self, brancher: &impl Brancher) {
        if !should_log_statistics() {
            return;
        }

        self.satisfaction_solver
            .log_statistics(StatisticLogger::new(["solver"]));
        brancher.log_statistics(StatisticLogger::new(["brancher"]));
        log_statistic_postfix();
    }

    /// Fixes every worksheet as in `solution` (unlisted worksheets are not executed) and
    /// propagates. Returns the value of the objective variable, or `None` when propagation fails.
    pub(crate) fn propagate_solution(&mut self, solution: &Solution) -> Option<i32> {
        if self.satisfaction_solver.is_infeasible() {
            return None;
        }

        let decisions = self
            .model
            .selected
            .iter()
            .zip(self.model.starts.iter())
            .enumerate()
            .flat_map(|(index, (&selected, &start))| match solution.start_of(index) {
                Some(value) => vec![predicate![selected == 1], predicate![start == value]],
                None => vec![predicate![selected == 0]],
            })
            .collect::<Vec<_>>();
        for decision in decisions {
            self.satisfaction_solver.post(decision).ok()?;
        }

        self.satisfaction_solver.propagate().ok()?;

        let objective = self.model.objective;
        rnmp_assert_moderate!(
            self.satisfaction_solver.lower_bound(&objective)
                == self.satisfaction_solver.upper_bound(&objective)
        );
        Some(self.satisfaction_solver.lower_bound(&objective))
    }
}
