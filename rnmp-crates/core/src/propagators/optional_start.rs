use crate::basic_types::PropagationStatusCP;
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
use crate::engine::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`OptionalStartPropagator`].
#[derive(Clone, Debug)]
pub struct OptionalStartPropagatorArgs<Var> {
    pub selected: Var,
    pub start: Var,
    /// The start a worksheet takes when it is not executed.
    pub earliest_start: i32,
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for OptionalStartPropagatorArgs<Var> {
    type PropagatorImpl = OptionalStartPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register(self.selected.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        context.register(self.start.clone(), DomainEvents::LOWER_BOUND, LocalId::from(1));

        OptionalStartPropagator {
            selected: self.selected,
            start: self.start,
            earliest_start: self.earliest_start,
        }
    }
}

/// Enforces `start - selected * horizon <= earliest_start`: a worksheet which is not executed
/// sits at its earliest start, and a worksheet which cannot start there is executed.
#[derive(Clone, Debug)]
pub struct OptionalStartPropagator<Var> {
    selected: Var,
    start: Var,
    earliest_start: i32,
}

impl<Var: IntegerVariable + 'static> Propagator for OptionalStartPropagator<Var> {
    fn name(&self) -> &str {
        "OptionalStart"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        if context.upper_bound(&self.selected) == 0 {
            context.assign(&self.start, self.earliest_start)?;
        } else if context.lower_bound(&self.start) > self.earliest_start {
            context.set_lower_bound(&self.selected, 1)?;
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        if context.lower_bound(&self.selected) == 1
            || context.upper_bound(&self.start) <= self.earliest_start
        {
            Entailment::True
        } else if context.upper_bound(&self.selected) == 0
            && context.lower_bound(&self.start) > self.earliest_start
        {
            Entailment::False
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

    #[test]
    fn deselection_fixes_the_start() {
        let mut solver = TestSolver::default();
        let selected = solver.new_variable(0, 1);
        let start = solver.new_variable(3, 9);
        solver
            .new_propagator(OptionalStartPropagatorArgs {
                selected,
                start,
                earliest_start: 3,
            })
            .expect("no empty domains");

        solver
            .post_and_propagate(predicate![selected <= 0])
            .expect("feasible");

        solver.assert_bounds(start, 3, 3);
    }

    #[test]
    fn a_late_start_forces_selection() {
        let mut solver = TestSolver::default();
        let selected = solver.new_variable(0, 1);
        let start = solver.new_variable(3, 9);
        solver
            .new_propagator(OptionalStartPropagatorArgs {
                selected,
                start,
                earliest_start: 3,
            })
            .expect("no empty domains");

        solver
            .post_and_propagate(predicate![start >= 5])
            .expect("feasible");
        solver.assert_bounds(selected, 1, 1);

        solver.restore_to(0);
        solver.assert_bounds(selected, 0, 1);

        solver
            .post_and_propagate(predicate![selected <= 0])
            .expect("feasible");
        assert_eq!(
            Err(Inconsistency::EmptyDomain),
            solver.post_and_propagate(predicate![start >= 4])
        );
    }
}
