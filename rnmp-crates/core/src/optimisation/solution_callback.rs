use crate::basic_types::Solution;

/// Called by the solver for every improving solution, together with its objective value.
pub trait SolutionCallback {
    fn on_solution_callback(&mut self, solution: &Solution, objective: i32);
}

impl<T> SolutionCallback for T
where
    T: FnMut(&Solution, i32),
{
    fn on_solution_callback(&mut self, solution: &Solution, objective: i32) {
        (self)(solution, objective)
    }
}

impl<T: SolutionCallback> SolutionCallback for Option<T> {
    fn on_solution_callback(&mut self, solution: &Solution, objective: i32) {
        if let Some(callback) = self {
            callback.on_solution_callback(solution, objective);
        }
    }
}
