use super::ArgOptionalTask;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::create_statistics_struct;
use crate::engine::cp::DomainEvents;
use crate::engine::propagation::Entailment;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// The [`PropagatorConstructor`] for the [`TimeTablePerPointPropagator`].
#[derive(Clone, Debug)]
pub struct TimeTablePerPointArgs {
    pub tasks: Box<[ArgOptionalTask]>,
    pub capacity: i32,
    pub horizon: i32,
}

impl PropagatorConstructor for TimeTablePerPointArgs {
    type PropagatorImpl = TimeTablePerPointPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (index, task) in self.tasks.iter().enumerate() {
            context.register(
                task.selected,
                DomainEvents::ASSIGN,
                LocalId::from(2 * index as u32),
            );
            context.register(
                task.start_time,
                DomainEvents::BOUNDS,
                LocalId::from(2 * index as u32 + 1),
            );
        }

        TimeTablePerPointPropagator {
            tasks: self.tasks,
            capacity: self.capacity as i64,
            time_table: vec![0; self.horizon.max(0) as usize],
            statistics: CumulativeStatistics::default(),
        }
    }
}

create_statistics_struct!(CumulativeStatistics {
    num_bound_updates: u64,
    num_tasks_excluded: u64,
});

/// Time-table reasoning for a resource shared by optional tasks with a varying resource usage.
///
/// The time-table is rebuilt from scratch at every call: the horizons of this problem are short
/// and the tasks of one work center are few.
#[derive(Clone, Debug)]
pub struct TimeTablePerPointPropagator {
    tasks: Box<[ArgOptionalTask]>,
    capacity: i64,
    /// The mandatory resource usage at each time point.
    time_table: Vec<i64>,
    statistics: CumulativeStatistics,
}

impl TimeTablePerPointPropagator {
    /// The usage of `task` at `time` which is guaranteed given its start bounds. For a time in the
    /// compulsory part, every start leaves some step running at `time`; the least demanding one
    /// is the guaranteed usage.
    fn compulsory_usage<Context: ReadDomains>(
        context: &Context,
        task: &ArgOptionalTask,
        time: i32,
    ) -> i64 {
        if context.lower_bound(&task.selected) != 1 {
            return 0;
        }

        let est = context.lower_bound(&task.start_time);
        let lst = context.upper_bound(&task.start_time);
        if time < lst || time >= est + task.processing_time() {
            return 0;
        }

        let first_step = (time - lst).max(0) as usize;
        let last_step = (time - est) as usize;
        task.resource_usages[first_step..=last_step]
            .iter()
            .map(|&usage| usage as i64)
            .min()
            .unwrap_or(0)
    }

    fn create_time_table<Context: ReadDomains>(&mut self, context: &Context) {
        self.time_table.iter_mut().for_each(|usage| *usage = 0);

        for task in self.tasks.iter() {
            if context.lower_bound(&task.selected) != 1 {
                continue;
            }

            let lst = context.upper_bound(&task.start_time);
            let ect = context.lower_bound(&task.start_time) + task.processing_time();
            for time in lst.max(0)..ect.min(self.time_table.len() as i32) {
                self.time_table[time as usize] += Self::compulsory_usage(context, task, time);
            }
        }
    }

    /// Whether `task` can start at `start` on top of the time-table without its own compulsory
    /// part.
    fn fits<Context: ReadDomains>(
        &self,
        context: &Context,
        task: &ArgOptionalTask,
        start: i32,
    ) -> bool {
        task.resource_usages
            .iter()
            .enumerate()
            .all(|(step, &usage)| {
                let time = start + step as i32;
                let Some(&profile) = usize::try_from(time)
                    .ok()
                    .and_then(|time| self.time_table.get(time))
                else {
                    return false;
                };

                let others = profile - Self::compulsory_usage(context, task, time);
                others + usage as i64 <= self.capacity
            })
    }

    fn first_fitting_start<Context: ReadDomains>(
        &self,
        context: &Context,
        task: &ArgOptionalTask,
    ) -> Option<i32> {
        (context.lower_bound(&task.start_time)..=context.upper_bound(&task.start_time))
            .find(|&start| self.fits(context, task, start))
    }

    fn last_fitting_start<Context: ReadDomains>(
        &self,
        context: &Context,
        task: &ArgOptionalTask,
    ) -> Option<i32> {
        (context.lower_bound(&task.start_time)..=context.upper_bound(&task.start_time))
            .rev()
            .find(|&start| self.fits(context, task, start))
    }

    fn is_decided<Context: ReadDomains>(context: &Context, task: &ArgOptionalTask) -> bool {
        context.upper_bound(&task.selected) == 0
            || (context.lower_bound(&task.selected) == 1 && context.is_fixed(&task.start_time))
    }
}

impl Propagator for TimeTablePerPointPropagator {
    fn name(&self) -> &str {
        "CumulativeTimeTablePerPoint"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        self.create_time_table(&context);
        if self.time_table.iter().any(|&usage| usage > self.capacity) {
            return Err(PropagatorConflict::new("the time-table exceeds the capacity").into());
        }

        for index in 0..self.tasks.len() {
            let task = &self.tasks[index];
            let is_selected = context.lower_bound(&task.selected) == 1;
            if context.upper_bound(&task.selected) == 0
                || (is_selected && context.is_fixed(&task.start_time))
            {
                continue;
            }

            let (Some(first), Some(last)) = (
                self.first_fitting_start(&context, task),
                self.last_fitting_start(&context, task),
            ) else {
                if is_selected {
                    return Err(PropagatorConflict::new("a selected task fits nowhere").into());
                }
                self.statistics.num_tasks_excluded += 1;
                let selected = task.selected;
                context.set_upper_bound(&selected, 0)?;
                continue;
            };

            // Optional tasks are not in the time-table yet, so their bounds stay untouched.
            if !is_selected {
                continue;
            }

            let start_time = task.start_time;
            if first > context.lower_bound(&start_time) || last < context.upper_bound(&start_time) {
                self.statistics.num_bound_updates += 1;
                context.set_lower_bound(&start_time, first)?;
                context.set_upper_bound(&start_time, last)?;
                // The compulsory part of the task may have grown.
                self.create_time_table(&context);
                if self.time_table.iter().any(|&usage| usage > self.capacity) {
                    return Err(PropagatorConflict::new("the time-table exceeds the capacity").into());
                }
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let mut usage = vec![0_i64; self.time_table.len()];
        let mut all_decided = true;

        for task in self.tasks.iter() {
            all_decided &= Self::is_decided(&context, task);
            for (time, usage) in usage.iter_mut().enumerate() {
                *usage += Self::compulsory_usage(&context, task, time as i32);
            }
        }

        if usage.iter().any(|&usage| usage > self.capacity) {
            Entailment::False
        } else if all_decided {
            Entailment::True
        } else {
            Entailment::Unknown
        }
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::engine::variables::DomainId;
    use crate::predicate;

    fn task(
        solver: &mut TestSolver,
        selected: (i32, i32),
        start: (i32, i32),
        resource_usages: &[i32],
    ) -> ArgOptionalTask {
        ArgOptionalTask {
            selected: solver.new_variable(selected.0, selected.1),
            start_time: solver.new_variable(start.0, start.1),
            resource_usages: resource_usages.into(),
        }
    }

    fn post(
        solver: &mut TestSolver,
        tasks: &[ArgOptionalTask],
        capacity: i32,
        horizon: i32,
    ) -> Result<(), crate::basic_types::ConstraintOperationError> {
        solver.new_propagator(TimeTablePerPointArgs {
            tasks: tasks.into(),
            capacity,
            horizon,
        })
    }

    #[test]
    fn a_fixed_task_pushes_the_other() {
        let mut solver = TestSolver::default();
        let tasks = [
            task(&mut solver, (1, 1), (0, 2), &[1, 1]),
            task(&mut solver, (1, 1), (0, 2), &[1, 1]),
        ];
        post(&mut solver, &tasks, 1, 4).expect("no conflict");

        let start: DomainId = tasks[0].start_time;
        solver
            .post_and_propagate(predicate![start == 0])
            .expect("feasible");

        solver.assert_bounds(tasks[1].start_time, 2, 2);
        assert!(solver.violated_propagators().is_empty());
    }

    #[test]
    fn varying_usages_only_block_the_busy_steps() {
        let mut solver = TestSolver::default();
        let tasks = [
            task(&mut solver, (1, 1), (0, 0), &[2, 1]),
            task(&mut solver, (1, 1), (0, 2), &[1]),
        ];
        post(&mut solver, &tasks, 2, 3).expect("no conflict");

        solver.assert_bounds(tasks[1].start_time, 1, 2);
    }

    #[test]
    fn an_optional_task_which_fits_nowhere_is_excluded() {
        let mut solver = TestSolver::default();
        let tasks = [
            task(&mut solver, (1, 1), (0, 0), &[1, 1, 1]),
            task(&mut solver, (0, 1), (0, 2), &[1]),
        ];
        post(&mut solver, &tasks, 1, 3).expect("no conflict");

        solver.assert_bounds(tasks[1].selected, 0, 0);
        solver.assert_bounds(tasks[1].start_time, 0, 2);
    }

    #[test]
    fn an_optional_task_does_not_push_others() {
        let mut solver = TestSolver::default();
        let tasks = [
            task(&mut solver, (0, 1), (0, 0), &[1, 1]),
            task(&mut solver, (1, 1), (0, 2), &[1]),
        ];
        post(&mut solver, &tasks, 1, 3).expect("no conflict");
        solver.assert_bounds(tasks[1].start_time, 0, 2);

        let selected = tasks[0].selected;
        solver
            .post_and_propagate(predicate![selected == 1])
            .expect("feasible");
        solver.assert_bounds(tasks[1].start_time, 2, 2);
    }

    #[test]
    fn overlapping_fixed_tasks_are_rejected_at_the_root() {
        let mut solver = TestSolver::default();
        let tasks = [
            task(&mut solver, (1, 1), (1, 1), &[2]),
            task(&mut solver, (1, 1), (1, 1), &[1]),
        ];

        assert!(post(&mut solver, &tasks, 2, 3).is_err());
    }

    #[test]
    fn restoring_a_checkpoint_restores_the_bounds() {
        let mut solver = TestSolver::default();
        let tasks = [
            task(&mut solver, (1, 1), (0, 2), &[1]),
            task(&mut solver, (1, 1), (0, 2), &[1]),
        ];
        post(&mut solver, &tasks, 1, 3).expect("no conflict");

        let start = tasks[0].start_time;
        solver
            .post_and_propagate(predicate![start == 1])
            .expect("feasible");
        solver.assert_bounds(tasks[1].start_time, 0, 2);
        let other = tasks[1].start_time;
        solver
            .post_and_propagate(predicate![other <= 1])
            .expect("feasible");
        solver.assert_bounds(other, 0, 0);

        solver.restore_to(1);
        solver.assert_bounds(other, 0, 2);
    }
}
