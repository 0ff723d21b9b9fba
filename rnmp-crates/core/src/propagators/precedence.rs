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
use crate::engine::variables::OffsetView;

/// The [`PropagatorConstructor`] for the [`PrecedencePropagator`].
#[derive(Clone, Debug)]
pub struct PrecedencePropagatorArgs<Var> {
    pub pred_selected: Var,
    pub pred_end: OffsetView<Var>,
    pub succ_selected: Var,
    pub succ_start: Var,
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for PrecedencePropagatorArgs<Var> {
    type PropagatorImpl = PrecedencePropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let PrecedencePropagatorArgs {
            pred_selected,
            pred_end,
            succ_selected,
            succ_start,
        } = self;

        context.register(pred_selected.clone(), DomainEvents::ANY_INT, LocalId::from(0));
        context.register(succ_selected.clone(), DomainEvents::ANY_INT, LocalId::from(1));
        context.register(pred_end.clone(), DomainEvents::BOUNDS, LocalId::from(2));
        context.register(succ_start.clone(), DomainEvents::BOUNDS, LocalId::from(3));

        PrecedencePropagator {
            pred_selected,
            pred_end,
            succ_selected,
            succ_start,
        }
    }
}

/// Propagator for "if both worksheets are executed, the successor starts once the predecessor
/// has ended".
///
/// When both are selected this is `succ_start >= pred_end` on bounds. Otherwise, if the order has
/// become impossible, a forced side deselects the other.
#[derive(Clone, Debug)]
pub struct PrecedencePropagator<Var> {
    pred_selected: Var,
    pred_end: OffsetView<Var>,
    succ_selected: Var,
    succ_start: Var,
}

impl<Var: IntegerVariable + 'static> Propagator for PrecedencePropagator<Var> {
    fn name(&self) -> &str {
        "Precedence"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let pred_forced = context.lower_bound(&self.pred_selected) == 1;
        let succ_forced = context.lower_bound(&self.succ_selected) == 1;

        if pred_forced && succ_forced {
            let earliest_end = context.lower_bound(&self.pred_end);
            context.set_lower_bound(&self.succ_start, earliest_end)?;

            let latest_start = context.upper_bound(&self.succ_start);
            context.set_upper_bound(&self.pred_end, latest_start)?;

            return Ok(());
        }

        let order_impossible =
            context.upper_bound(&self.succ_start) < context.lower_bound(&self.pred_end);
        if order_impossible {
            if pred_forced {
                context.set_upper_bound(&self.succ_selected, 0)?;
            } else if succ_forced {
                context.set_upper_bound(&self.pred_selected, 0)?;
            }
        }

        Ok(())
    }

    fn is_entailed(&self, context: PropagationContext) -> Entailment {
        if context.upper_bound(&self.pred_selected) == 0
            || context.upper_bound(&self.succ_selected) == 0
            || context.lower_bound(&self.succ_start) >= context.upper_bound(&self.pred_end)
        {
            return Entailment::True;
        }

        if context.lower_bound(&self.pred_selected) == 1
            && context.lower_bound(&self.succ_selected) == 1
            && context.upper_bound(&self.succ_start) < context.lower_bound(&self.pred_end)
        {
            return Entailment::False;
        }

        Entailment::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Inconsistency;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::engine::variables::DomainId;
    use crate::engine::variables::TransformableVariable;
    use crate::predicate;

    struct Pair {
        pred_selected: DomainId,
        pred_start: DomainId,
        succ_selected: DomainId,
        succ_start: DomainId,
    }

    fn pair(solver: &mut TestSolver, pred_window: (i32, i32), succ_window: (i32, i32)) -> Pair {
        Pair {
            pred_selected: solver.new_variable(0, 1),
            pred_start: solver.new_variable(pred_window.0, pred_window.1),
            succ_selected: solver.new_variable(0, 1),
            succ_start: solver.new_variable(succ_window.0, succ_window.1),
        }
    }

    fn post(solver: &mut TestSolver, pair: &Pair, duration: i32) {
        solver
            .new_propagator(PrecedencePropagatorArgs {
                pred_selected: pair.pred_selected,
                pred_end: pair.pred_start.offset(duration),
                succ_selected: pair.succ_selected,
                succ_start: pair.succ_start,
            })
            .expect("no empty domains");
    }

    #[test]
    fn bounds_are_tightened_once_both_are_selected() {
        let mut solver = TestSolver::default();
        let pair = pair(&mut solver, (2, 8), (0, 9));
        post(&mut solver, &pair, 3);

        solver.assert_bounds(pair.succ_start, 0, 9);

        solver
            .post_and_propagate(predicate![pair.pred_selected == 1])
            .expect("feasible");
        solver
            .post_and_propagate(predicate![pair.succ_selected == 1])
            .expect("feasible");

        solver.assert_bounds(pair.succ_start, 5, 9);
        solver.assert_bounds(pair.pred_start, 2, 6);
    }

    #[test]
    fn nothing_happens_while_a_side_is_optional() {
        let mut solver = TestSolver::default();
        let pair = pair(&mut solver, (2, 8), (0, 9));
        post(&mut solver, &pair, 3);

        solver
            .post_and_propagate(predicate![pair.pred_selected == 1])
            .expect("feasible");

        solver.assert_bounds(pair.succ_start, 0, 9);
        solver.assert_bounds(pair.succ_selected, 0, 1);
    }

    #[test]
    fn an_impossible_order_deselects_the_other_side() {
        let mut solver = TestSolver::default();
        let pair = pair(&mut solver, (4, 6), (0, 5));
        post(&mut solver, &pair, 2);

        solver
            .post_and_propagate(predicate![pair.pred_selected == 1])
            .expect("feasible");

        solver.assert_bounds(pair.succ_selected, 0, 0);
    }

    #[test]
    fn an_impossible_order_fails_when_both_are_selected() {
        let mut solver = TestSolver::default();
        let pair = pair(&mut solver, (4, 6), (0, 5));
        post(&mut solver, &pair, 2);

        solver
            .post_and_propagate(predicate![pair.succ_selected == 1])
            .expect("feasible");
        solver.assert_bounds(pair.pred_selected, 0, 0);

        let result = solver.post_and_propagate(predicate![pair.pred_selected >= 1]);
        assert_eq!(Err(Inconsistency::EmptyDomain), result);
    }

    #[test]
    fn entailment_follows_the_selection() {
        let mut solver = TestSolver::default();
        let pair = pair(&mut solver, (0, 0), (0, 0));
        post(&mut solver, &pair, 1);

        solver
            .post_and_propagate(predicate![pair.pred_selected == 0])
            .expect("feasible");

        assert!(solver.violated_propagators().is_empty());
    }
}
