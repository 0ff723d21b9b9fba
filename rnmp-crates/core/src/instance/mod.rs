//! The immutable description of one planning problem.
mod instance_error;
mod precedence_graph;
mod worksheet;

pub use instance_error::InstanceError;
use log::warn;
pub use precedence_graph::PrecedenceGraph;
pub use worksheet::*;

/// A road network maintenance planning problem.
///
/// Every other part of the crate refers to worksheets, roads and work centers by their position
/// in the vectors below.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instance {
    /// Number of discrete time steps; time `t` ranges over `0..horizon`.
    pub horizon: i32,
    /// `roads_cost[road][t]` is the disruption caused by perturbing `road` at time `t`.
    pub roads_cost: Vec<Vec<i32>>,
    /// The worker capacity of each work center.
    pub work_centers: Vec<i32>,
    pub worksheets: Vec<Worksheet>,
    pub roads_blocked: Vec<RoadGroup>,
    /// Pairs `(pred, succ)`: when both are executed, `succ` starts after `pred` ends.
    pub precedences: Vec<(usize, usize)>,
    /// The total number of sub-activities as announced by the instance file.
    pub nb_activities: i32,
    pub name: Option<String>,
}

impl Instance {
    pub fn num_roads(&self) -> usize {
        self.roads_cost.len()
    }

    pub fn num_worksheets(&self) -> usize {
        self.worksheets.len()
    }

    /// Checks every structural invariant and returns the precedence graph on success.
    pub fn validate(&self) -> Result<PrecedenceGraph, InstanceError> {
        if self.horizon < 0 {
            return Err(InstanceError::NegativeHorizon(self.horizon));
        }
        let horizon = self.horizon as usize;
        let num_roads = self.num_roads();

        for (road, row) in self.roads_cost.iter().enumerate() {
            if row.len() != horizon {
                return Err(InstanceError::CostRowLength {
                    road,
                    expected: horizon,
                    actual: row.len(),
                });
            }
            if let Some(&cost) = row.iter().find(|&&cost| cost < 0) {
                return Err(negative(format!("the cost of road {road}"), cost));
            }
        }

        for (center, &capacity) in self.work_centers.iter().enumerate() {
            if capacity < 0 {
                return Err(negative(format!("the capacity of work center {center}"), capacity));
            }
        }

        for (index, worksheet) in self.worksheets.iter().enumerate() {
            self.validate_worksheet(index, worksheet)?;
        }

        for (group_index, group) in self.roads_blocked.iter().enumerate() {
            if group.max_blocked < 0 {
                return Err(negative(
                    format!("the maximum of road group {group_index}"),
                    group.max_blocked,
                ));
            }
            if let Some(&road) = group.roads_id.iter().find(|&&road| road >= num_roads) {
                return Err(InstanceError::UnknownRoad {
                    context: format!("road group {group_index}"),
                    road,
                    num_roads,
                });
            }
        }

        let graph = PrecedenceGraph::new(self.num_worksheets(), &self.precedences)?;

        let total_importance = self
            .worksheets
            .iter()
            .map(|worksheet| worksheet.importance as i64)
            .sum::<i64>();
        let largest_disruption = (0..horizon)
            .map(|t| self.roads_cost.iter().map(|row| row[t] as i64).sum::<i64>())
            .max()
            .unwrap_or(0);
        if total_importance > i32::MAX as i64 || largest_disruption > i32::MAX as i64 {
            return Err(InstanceError::ObjectiveOutOfRange);
        }

        let num_sub_activities = self
            .worksheets
            .iter()
            .map(|worksheet| worksheet.duration as i64)
            .sum::<i64>();
        if num_sub_activities != self.nb_activities as i64 {
            warn!(
                "The instance announces {} activities but its worksheets contain {num_sub_activities}",
                self.nb_activities
            );
        }

        Ok(graph)
    }

    fn validate_worksheet(&self, index: usize, worksheet: &Worksheet) -> Result<(), InstanceError> {
        let num_roads = self.num_roads();

        if worksheet.duration < 0 {
            return Err(negative(
                format!("the duration of worksheet {index}"),
                worksheet.duration,
            ));
        }
        if worksheet.importance < 0 {
            return Err(negative(
                format!("the importance of worksheet {index}"),
                worksheet.importance,
            ));
        }
        if worksheet.est < 0 {
            return Err(negative(
                format!("the earliest start of worksheet {index}"),
                worksheet.est,
            ));
        }
        if worksheet.est.checked_add(worksheet.duration).is_none()
            || worksheet.lst.checked_add(worksheet.duration).is_none()
        {
            return Err(InstanceError::WindowOutOfRange {
                worksheet: index,
                est: worksheet.est,
                lst: worksheet.lst,
                duration: worksheet.duration,
            });
        }
        if let Some(&workers) = worksheet.amount_of_workers.iter().find(|&&w| w < 0) {
            return Err(negative(
                format!("the workers of worksheet {index}"),
                workers,
            ));
        }
        if worksheet.roads_id.len() != worksheet.duration as usize
            || worksheet.amount_of_workers.len() != worksheet.duration as usize
        {
            return Err(InstanceError::DurationMismatch {
                worksheet: index,
                duration: worksheet.duration,
                roads: worksheet.roads_id.len(),
                workers: worksheet.amount_of_workers.len(),
            });
        }
        if let Some(&road) = worksheet.roads_id.iter().find(|&&road| road >= num_roads) {
            return Err(InstanceError::UnknownRoad {
                context: format!("worksheet {index}"),
                road,
                num_roads,
            });
        }
        if worksheet.work_center_id >= self.work_centers.len() {
            return Err(InstanceError::UnknownWorkCenter {
                worksheet: index,
                work_center: worksheet.work_center_id,
                num_work_centers: self.work_centers.len(),
            });
        }

        Ok(())
    }
}

fn negative(what: String, value: i32) -> InstanceError {
    InstanceError::NegativeQuantity { what, value }
}
