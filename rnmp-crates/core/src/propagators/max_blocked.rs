use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
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

/// The [`PropagatorConstructor`] for the [`MaxBlockedPropagator`].
#[derive(Clone, Debug)]
pub struct MaxBlockedPropagatorArgs {
    pub max_blocked: i32,
    /// `cells[member][t]`: the perturbation of each distinct road of the group over time.
    pub cells: Box<[Box<[DomainId]>]>,
}

impl PropagatorConstructor for MaxBlockedPropagatorArgs {
    type PropagatorImpl = MaxBlockedPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let horizon = self.cells.first().map_or(0, |row| row.len());

        for (member, row) in self.cells.iter().enumerate() {
            for (t, &cell) in row.iter().enumerate() {
                context.register(
                    cell,
                    DomainEvents::ASSIGN,
                    LocalId::from((member * horizon + t) as u32),
                );
            }
        }

        MaxBlockedPropagator {
            max_blocked: self.max_blocked,
            cells: self.cells,
            horizon,
            dirty: (0..horizon).collect(),
            is_dirty: vec![true; horizon],
        }
    }
}

/// At every time step, at most `max_blocked` roads of the group are perturbed. Reaching the
/// maximum closes the remaining roads of the group at that time step.
#[derive(Clone, Debug)]
pub struct MaxBlockedPropagator {
    max_blocked: i32,
    cells: Box<[Box<[DomainId]>]>,
    horizon: usize,
    /// Time steps with a cell assigned since the last propagation.
    dirty: Vec<usize>,
    is_dirty: Vec<bool>,
}

impl MaxBlockedPropagator {
    fn num_blocked<Context: ReadDomains>(&self, context: &Context, t: usize) -> i32 {
        self.cells
            .iter()
            .filter(|row| context.lower_bound(&row[t]) == 1)
            .count() as i32
    }
}

impl Propagator for MaxBlockedPropagator {
    fn name(&self) -> &str {
        "MaxSimultaneousBlock"
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
        let t = local_id.unpack() as usize % self.horizon;
        if !self.is_dirty[t] {
            self.is_dirty[t] = true;
            self.dirty.push(t);
        }

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, _context: PropagationContext) {
        for t in self.dirty.drain(..) {
            self.is_dirty[t] = false;
        }
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        while let Some(t) = self.dirty.pop() {
            self.is_dirty[t] = false;

            let num_blocked = self.num_blocked(&context, t);
            if num_blocked > self.max_blocked {
                return Err(PropagatorConflict::new("too many roads of a group are blocked").into());
            }

            if num_blocked == self.max_blocked {
                for row in self.cells.iter() {
                    if !context.is_fixed(&row[t]) {
                        context.set_upper_bound(&row[t], 0)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        let mut all_fixed = true;
        for t in 0..self.horizon {
            if self.num_blocked(&context, t) > self.max_blocked {
                return Entailment::False;
            }
            all_fixed &= self.cells.iter().all(|row| context.is_fixed(&row[t]));
        }

        if all_fixed {
            Entailment::True
        } else {
            Entailment::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;

    fn cells(solver: &mut TestSolver, roads: usize, horizon: usize) -> Vec<Vec<DomainId>> {
        (0..roads)
            .map(|_| (0..horizon).map(|_| solver.new_variable(0, 1)).collect())
            .collect()
    }

    fn post(solver: &mut TestSolver, max_blocked: i32, cells: &[Vec<DomainId>]) {
        solver
            .new_propagator(MaxBlockedPropagatorArgs {
                max_blocked,
                cells: cells
                    .iter()
                    .map(|row| row.clone().into_boxed_slice())
                    .collect(),
            })
            .expect("no empty domains");
    }

    #[test]
    fn reaching_the_maximum_closes_the_other_roads() {
        let mut solver = TestSolver::default();
        let cells = cells(&mut solver, 3, 2);
        post(&mut solver, 2, &cells);

        let (first, second) = (cells[0][1], cells[1][1]);
        solver
            .post_and_propagate(predicate![first >= 1])
            .expect("feasible");
        solver.assert_bounds(cells[2][1], 0, 1);

        solver
            .post_and_propagate(predicate![second >= 1])
            .expect("feasible");
        solver.assert_bounds(cells[2][1], 0, 0);
        solver.assert_bounds(cells[2][0], 0, 1);
    }

    #[test]
    fn a_zero_maximum_closes_everything_at_the_root() {
        let mut solver = TestSolver::default();
        let cells = cells(&mut solver, 2, 3);
        post(&mut solver, 0, &cells);

        for row in &cells {
            for &cell in row {
                solver.assert_bounds(cell, 0, 0);
            }
        }
    }

    #[test]
    fn exceeding_the_maximum_fails() {
        let mut solver = TestSolver::default();
        let cells = cells(&mut solver, 2, 1);
        let (first, second) = (cells[0][0], cells[1][0]);
        post(&mut solver, 1, &cells);

        solver
            .post_and_propagate(predicate![first >= 1])
            .expect("feasible");

        assert_eq!(
            Err(Inconsistency::EmptyDomain),
            solver.post_and_propagate(predicate![second >= 1])
        );
    }
}
