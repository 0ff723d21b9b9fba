//! Turns an [`Instance`] into the decision variables and propagators of the planning model.
use log::debug;

use crate::basic_types::Solution;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::TransformableVariable;
use crate::engine::Assignments;
use crate::engine::ConstraintSatisfactionSolver;
use crate::instance::Instance;
use crate::objective::objective_bounds;
use crate::propagators::cumulative::ArgOptionalTask;
use crate::propagators::cumulative::TimeTablePerPointArgs;
use crate::propagators::ChannelingPropagatorArgs;
use crate::propagators::ChannelledWorksheet;
use crate::propagators::MaxBlockedPropagatorArgs;
use crate::propagators::ObjectiveBoundArgs;
use crate::propagators::OptionalStartPropagatorArgs;
use crate::propagators::PrecedencePropagatorArgs;

/// The decision variables of one instance.
#[derive(Clone, Debug)]
pub(crate) struct PlanningModel {
    /// Whether each worksheet is executed.
    pub(crate) selected: Vec<DomainId>,
    /// The first time step of each worksheet.
    pub(crate) starts: Vec<DomainId>,
    /// `perturbed[road][t]`
    pub(crate) perturbed: Vec<Vec<DomainId>>,
    pub(crate) objective: DomainId,
}

impl PlanningModel {
    /// Creates the variables in `solver` and posts every constraint of `instance`.
    ///
    /// The instance is expected to be valid. When the model is inconsistent at the root the
    /// solver is left in the infeasible state.
    pub(crate) fn build(instance: &Instance, solver: &mut ConstraintSatisfactionSolver) -> Self {
        let horizon = instance.horizon.max(0);
        let mut has_empty_window = false;

        let (selected, starts): (Vec<_>, Vec<_>) = instance
            .worksheets
            .iter()
            .enumerate()
            .map(|(index, worksheet)| {
                let latest_start = worksheet.latest_feasible_start(horizon);
                if worksheet.est <= latest_start {
                    return (
                        solver.new_bounded_integer(i32::from(worksheet.mandatory), 1),
                        solver.new_bounded_integer(worksheet.est, latest_start),
                    );
                }

                if worksheet.mandatory {
                    debug!("Mandatory worksheet {index} cannot be placed inside the horizon");
                    has_empty_window = true;
                }
                (
                    solver.new_bounded_integer(0, 0),
                    solver.new_bounded_integer(worksheet.est, worksheet.est),
                )
            })
            .unzip();

        let perturbed = (0..instance.num_roads())
            .map(|_| {
                (0..horizon)
                    .map(|_| solver.new_bounded_integer(0, 1))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let (lower, upper) = objective_bounds(instance);
        let objective = solver.new_bounded_integer(lower, upper);

        let model = PlanningModel {
            selected,
            starts,
            perturbed,
            objective,
        };

        if has_empty_window {
            solver.declare_infeasible();
            return model;
        }

        model.post_constraints(instance, solver);
        model
    }

    fn post_constraints(&self, instance: &Instance, solver: &mut ConstraintSatisfactionSolver) {
        for (index, worksheet) in instance.worksheets.iter().enumerate() {
            post(
                solver,
                OptionalStartPropagatorArgs {
                    selected: self.selected[index],
                    start: self.starts[index],
                    earliest_start: worksheet.est,
                },
            );
        }

        for &(pred, succ) in instance.precedences.iter() {
            post(
                solver,
                PrecedencePropagatorArgs {
                    pred_selected: self.selected[pred],
                    pred_end: self.starts[pred].offset(instance.worksheets[pred].duration),
                    succ_selected: self.selected[succ],
                    succ_start: self.starts[succ],
                },
            );
        }

        post(
            solver,
            ChannelingPropagatorArgs {
                worksheets: instance
                    .worksheets
                    .iter()
                    .enumerate()
                    .map(|(index, worksheet)| ChannelledWorksheet {
                        selected: self.selected[index],
                        start: self.starts[index],
                        roads: worksheet.roads_id.clone().into_boxed_slice(),
                    })
                    .collect(),
                perturbed: self.perturbed_rows(),
            },
        );

        for (work_center, &capacity) in instance.work_centers.iter().enumerate() {
            let tasks = instance
                .worksheets
                .iter()
                .enumerate()
                .filter(|(_, worksheet)| worksheet.work_center_id == work_center)
                .map(|(index, worksheet)| ArgOptionalTask {
                    selected: self.selected[index],
                    start_time: self.starts[index],
                    resource_usages: worksheet.amount_of_workers.clone().into_boxed_slice(),
                })
                .collect::<Box<[_]>>();
            if tasks.is_empty() {
                continue;
            }

            post(
                solver,
                TimeTablePerPointArgs {
                    tasks,
                    capacity,
                    horizon: instance.horizon,
                },
            );
        }

        for group in instance.roads_blocked.iter() {
            let mut roads = group.roads_id.clone();
            roads.sort_unstable();
            roads.dedup();

            post(
                solver,
                MaxBlockedPropagatorArgs {
                    max_blocked: group.max_blocked,
                    cells: roads
                        .iter()
                        .map(|&road| self.perturbed[road].clone().into_boxed_slice())
                        .collect(),
                },
            );
        }

        post(
            solver,
            ObjectiveBoundArgs {
                objective: self.objective,
                selections: self
                    .selected
                    .iter()
                    .zip(instance.worksheets.iter())
                    .map(|(&selected, worksheet)| (selected, worksheet.importance))
                    .collect(),
                perturbed: self.perturbed_rows(),
                roads_cost: instance
                    .roads_cost
                    .iter()
                    .map(|row| row.clone().into_boxed_slice())
                    .collect(),
            },
        );
    }

    fn perturbed_rows(&self) -> Box<[Box<[DomainId]>]> {
        self.perturbed
            .iter()
            .map(|row| row.clone().into_boxed_slice())
            .collect()
    }

    /// Reads the schedule from a complete assignment.
    pub(crate) fn solution(&self, assignments: &Assignments) -> Solution {
        self.selected
            .iter()
            .zip(self.starts.iter())
            .enumerate()
            .filter(|(_, (selected, _))| selected.lower_bound(assignments) == 1)
            .map(|(index, (_, start))| (index, start.lower_bound(assignments)))
            .collect()
    }
}

fn post<Constructor: PropagatorConstructor>(
    solver: &mut ConstraintSatisfactionSolver,
    constructor: Constructor,
) {
    if let Err(error) = solver.add_propagator(constructor) {
        debug!("Posting a constraint failed: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::test_instances::single_worksheet;
    use crate::instance::test_instances::worksheet;
    use crate::instance::Worksheet;

    #[test]
    fn variables_follow_the_worksheet_windows() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let model = PlanningModel::build(&single_worksheet(), &mut solver);

        assert!(!solver.is_infeasible());
        assert_eq!(1, solver.lower_bound(&model.selected[0]));
        assert_eq!(0, solver.lower_bound(&model.starts[0]));
        assert_eq!(2, solver.upper_bound(&model.starts[0]));
        assert_eq!(3, model.perturbed[0].len());
        assert_eq!(5, solver.upper_bound(&model.objective));
    }

    #[test]
    fn an_optional_worksheet_outside_the_horizon_is_dropped() {
        let mut instance = single_worksheet();
        instance.worksheets.push(worksheet(2, 2, vec![0, 0], vec![1, 1]));

        let mut solver = ConstraintSatisfactionSolver::default();
        let model = PlanningModel::build(&instance, &mut solver);

        assert!(!solver.is_infeasible());
        assert_eq!(0, solver.upper_bound(&model.selected[1]));
    }

    #[test]
    fn a_mandatory_worksheet_outside_the_horizon_is_infeasible() {
        let mut instance = single_worksheet();
        instance.worksheets[0].est = 3;
        instance.worksheets[0].lst = 3;

        let mut solver = ConstraintSatisfactionSolver::default();
        let _ = PlanningModel::build(&instance, &mut solver);

        assert!(solver.is_infeasible());
    }

    #[test]
    fn an_infeasible_precedence_is_detected_at_the_root() {
        let mut instance = single_worksheet();
        instance.work_centers[0] = 2;
        instance.worksheets.push(Worksheet {
            mandatory: true,
            ..worksheet(0, 0, vec![0], vec![1])
        });
        instance.worksheets[0].lst = 0;
        instance.precedences.push((0, 1));

        let mut solver = ConstraintSatisfactionSolver::default();
        let _ = PlanningModel::build(&instance, &mut solver);

        assert!(solver.is_infeasible());
    }
}
