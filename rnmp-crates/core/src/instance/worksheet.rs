/// A maintenance job: a chain of one-time-step sub-activities, each blocking one road and
/// requiring workers from one work center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Worksheet {
    pub id: u32,
    /// Index into [`super::Instance::work_centers`].
    pub work_center_id: usize,
    pub mandatory: bool,
    pub importance: i32,
    /// Earliest start (inclusive).
    pub est: i32,
    /// Latest start (inclusive).
    pub lst: i32,
    pub duration: i32,
    /// The road occupied by the `k`-th sub-activity.
    pub roads_id: Vec<usize>,
    /// The workers required by the `k`-th sub-activity.
    pub amount_of_workers: Vec<i32>,
}

impl Worksheet {
    /// The last start which keeps the whole worksheet inside the horizon and its window.
    pub fn latest_feasible_start(&self, horizon: i32) -> i32 {
        self.lst.min(horizon - self.duration)
    }

    /// The `(road, time)` cells occupied when the worksheet starts at `start`.
    pub fn occupied_cells(&self, start: i32) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.roads_id
            .iter()
            .enumerate()
            .map(move |(k, &road)| (road, start + k as i32))
    }
}

/// Roads of which at most `max_blocked` may be perturbed at the same time step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoadGroup {
    pub max_blocked: i32,
    pub roads_id: Vec<usize>,
}
