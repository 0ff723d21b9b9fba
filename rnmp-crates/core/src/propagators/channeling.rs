use crate::basic_types::PropagationStatusCP;
use crate::create_statistics_struct;
use crate::engine::cp::DomainEvents;
use crate::engine::cp::IntDomainEvent;
use crate::engine::propagation::EnqueueDecision;
use crate::engine::propagation::Entailment;
use crate::engine::propagation::LocalId;
use crate::engine::propagation::NotificationContext;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::DomainId;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

/// A worksheet as seen by the [`ChannelingPropagator`].
#[derive(Clone, Debug)]
pub struct ChannelledWorksheet {
    pub selected: DomainId,
    pub start: DomainId,
    /// The road blocked by each sub-activity.
    pub roads: Box<[usize]>,
}

/// The [`PropagatorConstructor`] for the [`ChannelingPropagator`].
#[derive(Clone, Debug)]
pub struct ChannelingPropagatorArgs {
    pub worksheets: Box<[ChannelledWorksheet]>,
    /// `perturbed[road][t]`
    pub perturbed: Box<[Box<[DomainId]>]>,
}

impl PropagatorConstructor for ChannelingPropagatorArgs {
    type PropagatorImpl = ChannelingPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        for (index, worksheet) in self.worksheets.iter().enumerate() {
            context.register(
                worksheet.selected,
                DomainEvents::ASSIGN,
                LocalId::from(2 * index as u32),
            );
            context.register(
                worksheet.start,
                DomainEvents::ASSIGN,
                LocalId::from(2 * index as u32 + 1),
            );
        }

        let num_worksheets = self.worksheets.len();
        ChannelingPropagator {
            worksheets: self.worksheets,
            perturbed: self.perturbed,
            // Worksheets may already be decided at the root.
            dirty: (0..num_worksheets).collect(),
            is_dirty: vec![true; num_worksheets],
            statistics: ChannelingStatistics::default(),
        }
    }
}

create_statistics_struct!(ChannelingStatistics {
    num_cells_blocked: u64,
    num_closures: u64,
});

/// Links the worksheets to the road grid.
///
/// A selected worksheet with a fixed start perturbs the road of each sub-activity at the matching
/// time step. Once every worksheet is decided, the cells which are still open can no longer be
/// perturbed and are closed.
#[derive(Clone, Debug)]
pub struct ChannelingPropagator {
    worksheets: Box<[ChannelledWorksheet]>,
    perturbed: Box<[Box<[DomainId]>]>,
    /// Worksheets assigned since the last propagation.
    dirty: Vec<usize>,
    is_dirty: Vec<bool>,
    statistics: ChannelingStatistics,
}

impl ChannelingPropagator {
    fn is_decided<Context: ReadDomains>(&self, context: &Context, worksheet: usize) -> bool {
        let worksheet = &self.worksheets[worksheet];
        context.upper_bound(&worksheet.selected) == 0
            || (context.lower_bound(&worksheet.selected) == 1 && context.is_fixed(&worksheet.start))
    }

    fn placed_start<Context: ReadDomains>(
        &self,
        context: &Context,
        worksheet: usize,
    ) -> Option<i32> {
        let worksheet = &self.worksheets[worksheet];
        (context.lower_bound(&worksheet.selected) == 1 && context.is_fixed(&worksheet.start))
            .then(|| context.lower_bound(&worksheet.start))
    }
}

impl Propagator for ChannelingPropagator {
    fn name(&self) -> &str {
        "RoadChanneling"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn notify(
        &mut self,
        _context: NotificationContext,
        local_id: LocalId,
        _event: IntDomainEvent,
    ) -> EnqueueDecision {
        let worksheet = local_id.unpack() as usize / 2;
        if !self.is_dirty[worksheet] {
            self.is_dirty[worksheet] = true;
            self.dirty.push(worksheet);
        }

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, _context: PropagationContext) {
        for worksheet in self.dirty.drain(..) {
            self.is_dirty[worksheet] = false;
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        while let Some(worksheet) = self.dirty.pop() {
            self.is_dirty[worksheet] = false;

            let Some(start) = self.placed_start(&context, worksheet) else {
                continue;
            };

            for (k, &road) in self.worksheets[worksheet].roads.iter().enumerate() {
                let cell = self.perturbed[road][(start as usize) + k];
                if context.lower_bound(&cell) == 0 {
                    self.statistics.num_cells_blocked += 1;
                }
                context.set_lower_bound(&cell, 1)?;
            }
        }

        let all_decided =
            (0..self.worksheets.len()).all(|worksheet| self.is_decided(&context, worksheet));
        if all_decided {
            self.statistics.num_closures += 1;
            for row in self.perturbed.iter() {
                for cell in row.iter() {
                    if !context.is_fixed(cell) {
                        context.set_upper_bound(cell, 0)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let mut occupied = self
            .perturbed
            .iter()
            .map(|row| vec![false; row.len()])
            .collect::<Vec<_>>();

        for worksheet in 0..self.worksheets.len() {
            if !self.is_decided(&context, worksheet) {
                return Entailment::Unknown;
            }
            if let Some(start) = self.placed_start(&context, worksheet) {
                for (k, &road) in self.worksheets[worksheet].roads.iter().enumerate() {
                    occupied[road][start as usize + k] = true;
                }
            }
        }

        let grid_matches = self.perturbed.iter().zip(occupied.iter()).all(|(row, occupied)| {
            row.iter().zip(occupied.iter()).all(|(cell, &is_occupied)| {
                context.is_fixed(cell) && (context.lower_bound(cell) == 1) == is_occupied
            })
        });

        if grid_matches {
            Entailment::True
        } else {
            Entailment::False
        }
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;

    struct Grid {
        worksheets: Vec<ChannelledWorksheet>,
        perturbed: Vec<Vec<DomainId>>,
    }

    /// Two roads, horizon 4; worksheet 0 blocks roads [0, 1], worksheet 1 blocks road [1].
    fn grid(solver: &mut TestSolver) -> Grid {
        let perturbed = (0..2)
            .map(|_| (0..4).map(|_| solver.new_variable(0, 1)).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let worksheets = vec![
            ChannelledWorksheet {
                selected: solver.new_variable(0, 1),
                start: solver.new_variable(0, 2),
                roads: vec![0, 1].into_boxed_slice(),
            },
            ChannelledWorksheet {
                selected: solver.new_variable(0, 1),
                start: solver.new_variable(0, 3),
                roads: vec![1].into_boxed_slice(),
            },
        ];

        solver
            .new_propagator(ChannelingPropagatorArgs {
                worksheets: worksheets.clone().into_boxed_slice(),
                perturbed: perturbed
                    .iter()
                    .map(|row| row.clone().into_boxed_slice())
                    .collect(),
            })
            .expect("no empty domains");

        Grid {
            worksheets,
            perturbed,
        }
    }

    #[test]
    fn a_placed_worksheet_blocks_its_cells() {
        let mut solver = TestSolver::default();
        let grid = grid(&mut solver);
        let worksheet = &grid.worksheets[0];

        solver
            .post_and_propagate(predicate![worksheet.selected == 1])
            .expect("feasible");
        solver
            .post_and_propagate(predicate![worksheet.start == 1])
            .expect("feasible");

        solver.assert_bounds(grid.perturbed[0][1], 1, 1);
        solver.assert_bounds(grid.perturbed[1][2], 1, 1);
        solver.assert_bounds(grid.perturbed[0][2], 0, 1);
    }

    #[test]
    fn deciding_every_worksheet_closes_the_grid() {
        let mut solver = TestSolver::default();
        let grid = grid(&mut solver);
        let first = grid.worksheets[0].clone();
        let second = grid.worksheets[1].clone();

        solver
            .post_and_propagate(predicate![second.selected == 0])
            .expect("feasible");
        solver
            .post_and_propagate(predicate![first.selected == 1])
            .expect("feasible");
        solver.assert_bounds(grid.perturbed[0][3], 0, 1);

        solver
            .post_and_propagate(predicate![first.start == 0])
            .expect("feasible");

        for (road, row) in grid.perturbed.iter().enumerate() {
            for (t, &cell) in row.iter().enumerate() {
                let expected = i32::from(t == road);
                solver.assert_bounds(cell, expected, expected);
            }
        }
        assert!(solver.violated_propagators().is_empty());
    }

    #[test]
    fn a_closed_cell_cannot_be_blocked() {
        let mut solver = TestSolver::default();
        let grid = grid(&mut solver);
        let second = grid.worksheets[1].clone();
        let last_cell = grid.perturbed[1][3];

        solver
            .post_and_propagate(predicate![last_cell <= 0])
            .expect("feasible");
        solver
            .post_and_propagate(predicate![second.selected == 1])
            .expect("feasible");

        let result = solver.post_and_propagate(predicate![second.start == 3]);
        assert_eq!(Err(Inconsistency::EmptyDomain), result);
    }

    #[test]
    fn backtracking_forgets_pending_worksheets() {
        let mut solver = TestSolver::default();
        let grid = grid(&mut solver);
        let second = grid.worksheets[1].clone();

        solver
            .post_and_propagate(predicate![second.selected == 1])
            .expect("feasible");
        solver
            .post_and_propagate(predicate![second.start == 2])
            .expect("feasible");
        solver.assert_bounds(grid.perturbed[1][2], 1, 1);

        solver.restore_to(1);
        solver.assert_bounds(grid.perturbed[1][2], 0, 1);
        solver
            .post_and_propagate(predicate![second.start == 0])
            .expect("feasible");
        solver.assert_bounds(grid.perturbed[1][0], 1, 1);
        solver.assert_bounds(grid.perturbed[1][2], 0, 1);
    }
}
