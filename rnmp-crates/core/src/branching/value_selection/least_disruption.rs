use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::instance::Instance;
use crate::predicate;

/// Starts a worksheet where the cells it would newly perturb are the cheapest.
///
/// Cells which are already fixed cost nothing: either they are perturbed anyway or the start is
/// ruled out by propagation. The scan goes from the lower bound upwards and keeps the first
/// strict minimum.
#[derive(Clone, Debug)]
pub struct LeastDisruption {
    starts: Vec<DomainId>,
    /// The road of each sub-activity, per worksheet.
    roads: Vec<Vec<usize>>,
    /// `perturbed[road][t]`
    perturbed: Vec<Vec<DomainId>>,
    /// `roads_cost[road][t]`
    roads_cost: Vec<Vec<i32>>,
}

impl LeastDisruption {
    pub fn new(
        instance: &Instance,
        starts: Vec<DomainId>,
        perturbed: Vec<Vec<DomainId>>,
    ) -> Self {
        LeastDisruption {
            starts,
            roads: instance
                .worksheets
                .iter()
                .map(|worksheet| worksheet.roads_id.clone())
                .collect(),
            perturbed,
            roads_cost: instance.roads_cost.clone(),
        }
    }

    fn added_disruption(&self, context: &SelectionContext, worksheet: usize, start: i32) -> i64 {
        self.roads[worksheet]
            .iter()
            .enumerate()
            .map(|(step, &road)| {
                let t = start as usize + step;
                if context.is_integer_fixed(self.perturbed[road][t]) {
                    0
                } else {
                    self.roads_cost[road][t] as i64
                }
            })
            .sum()
    }
}

impl ValueSelector for LeastDisruption {
    fn select_start(&mut self, context: &SelectionContext, worksheet: usize) -> Predicate {
        let start = self.starts[worksheet];

        let mut best_value = context.lower_bound(start);
        let mut best_cost = self.added_disruption(context, worksheet, best_value);
        for value in best_value + 1..=context.upper_bound(start) {
            let cost = self.added_disruption(context, worksheet, value);
            if cost < best_cost {
                best_value = value;
                best_cost = cost;
            }
        }

        predicate![start == best_value]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ConstraintSatisfactionSolver;
    use crate::instance::test_instances::single_worksheet;

    fn setup(
        solver: &mut ConstraintSatisfactionSolver,
    ) -> (LeastDisruption, Vec<Vec<DomainId>>) {
        let mut instance = single_worksheet();
        instance.roads_cost = vec![vec![10, 1, 1]];

        let starts = vec![solver.new_bounded_integer(0, 2)];
        let perturbed = vec![(0..3).map(|_| solver.new_bounded_integer(0, 1)).collect()];

        (
            LeastDisruption::new(&instance, starts, perturbed.clone()),
            perturbed,
        )
    }

    #[test]
    fn the_first_cheapest_start_is_chosen() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let (mut selector, _) = setup(&mut solver);

        let context = SelectionContext::new(solver.assignments());
        let decision = selector.select_start(&context, 0);

        assert_eq!(1, decision.get_right_hand_side());
    }

    #[test]
    fn fixed_cells_are_free() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let (mut selector, perturbed) = setup(&mut solver);

        let expensive = perturbed[0][0];
        solver
            .post(predicate![expensive == 1])
            .expect("non-empty domain");

        let context = SelectionContext::new(solver.assignments());
        let decision = selector.select_start(&context, 0);

        assert_eq!(0, decision.get_right_hand_side());
    }
}
