//! The objective of a plan: the importance of the executed worksheets minus the peak disruption
//! they cause on the road network.
use crate::basic_types::Solution;
use crate::instance::Instance;

/// The domain `[lower, upper]` declared for the objective variable.
///
/// The lowest value is reached when nothing is executed but every road is perturbed at the most
/// expensive time step; the highest when everything is executed without disruption.
pub fn objective_bounds(instance: &Instance) -> (i32, i32) {
    let lower = (0..instance.horizon.max(0) as usize)
        .map(|t| -disruption_at(instance, t, |_| true))
        .min()
        .unwrap_or(0)
        .min(0);
    let upper = instance
        .worksheets
        .iter()
        .map(|worksheet| worksheet.importance as i64)
        .sum::<i64>();

    (lower as i32, upper as i32)
}

/// The objective of a complete assignment, with `perturbed[road][t]` the state of each cell.
pub fn evaluate_assignments(
    instance: &Instance,
    selected: &[bool],
    perturbed: &[Vec<bool>],
) -> i32 {
    let urgency = instance
        .worksheets
        .iter()
        .zip(selected)
        .filter(|(_, selected)| **selected)
        .map(|(worksheet, _)| worksheet.importance as i64)
        .sum::<i64>();
    let peak = (0..instance.horizon.max(0) as usize)
        .map(|t| disruption_at(instance, t, |road| perturbed[road][t]))
        .max()
        .unwrap_or(0);

    (urgency - peak) as i32
}

/// The objective of `solution`, assuming it places every worksheet inside the horizon.
pub fn evaluate_solution(instance: &Instance, solution: &Solution) -> i32 {
    let horizon = instance.horizon.max(0) as usize;
    let mut perturbed = vec![vec![false; horizon]; instance.num_roads()];
    let mut selected = vec![false; instance.num_worksheets()];

    for entry in solution.scheduled() {
        selected[entry.worksheet] = true;
        for (road, t) in instance.worksheets[entry.worksheet].occupied_cells(entry.start) {
            perturbed[road][t as usize] = true;
        }
    }

    evaluate_assignments(instance, &selected, &perturbed)
}

fn disruption_at(instance: &Instance, t: usize, is_perturbed: impl Fn(usize) -> bool) -> i64 {
    instance
        .roads_cost
        .iter()
        .enumerate()
        .filter(|&(road, _)| is_perturbed(road))
        .map(|(_, costs)| costs[t] as i64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::test_instances::single_worksheet;

    #[test]
    fn bounds_span_from_full_disruption_to_full_urgency() {
        let mut instance = single_worksheet();
        instance.roads_cost.push(vec![0, 7, 2]);

        assert_eq!((-10, 5), objective_bounds(&instance));
    }

    #[test]
    fn an_empty_horizon_has_no_disruption() {
        let instance = Instance::default();

        assert_eq!((0, 0), objective_bounds(&instance));
        assert_eq!(0, evaluate_solution(&instance, &Solution::default()));
    }

    #[test]
    fn the_peak_is_subtracted_once() {
        let instance = single_worksheet();

        let at_start: Solution = [(0, 0)].into_iter().collect();
        let later: Solution = [(0, 2)].into_iter().collect();

        assert_eq!(-5, evaluate_solution(&instance, &at_start));
        assert_eq!(4, evaluate_solution(&instance, &later));
        assert_eq!(0, evaluate_solution(&instance, &Solution::default()));
    }
}
