//! Verifies a schedule against the instance without going through the propagators.
use thiserror::Error;

use crate::basic_types::Solution;
use crate::containers::HashSet;
use crate::instance::Instance;

/// The first property of an instance which a schedule breaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolutionViolation {
    #[error("worksheet {0} does not exist")]
    UnknownWorksheet(usize),
    #[error("worksheet {0} is scheduled more than once")]
    DuplicateWorksheet(usize),
    #[error("worksheet {worksheet} starts at {start}, outside of its window [{est}, {lst}]")]
    StartOutsideWindow {
        worksheet: usize,
        start: i32,
        est: i32,
        lst: i32,
    },
    #[error("worksheet {worksheet} starting at {start} does not end within the horizon")]
    EndsAfterHorizon { worksheet: usize, start: i32 },
    #[error("mandatory worksheet {0} is not executed")]
    MandatoryNotExecuted(usize),
    #[error("worksheet {succ} starts before its predecessor {pred} has ended")]
    PrecedenceViolated { pred: usize, succ: usize },
    #[error("work center {work_center} needs {demand} workers at time {time} but has {capacity}")]
    CapacityExceeded {
        work_center: usize,
        time: i32,
        demand: i64,
        capacity: i32,
    },
    #[error(
        "{blocked} roads of group {group} are blocked at time {time}, at most {max_blocked} may \
         be"
    )]
    TooManyBlocked {
        group: usize,
        time: i32,
        blocked: usize,
        max_blocked: i32,
    },
}

/// Checks every constraint of `instance` on `solution`; worksheets which are not listed are not
/// executed.
pub fn check_solution(instance: &Instance, solution: &Solution) -> Result<(), SolutionViolation> {
    let horizon = instance.horizon.max(0);

    for pair in solution.scheduled().windows(2) {
        if pair[0].worksheet == pair[1].worksheet {
            return Err(SolutionViolation::DuplicateWorksheet(pair[0].worksheet));
        }
    }

    for entry in solution.scheduled() {
        let Some(worksheet) = instance.worksheets.get(entry.worksheet) else {
            return Err(SolutionViolation::UnknownWorksheet(entry.worksheet));
        };

        if entry.start < worksheet.est || entry.start > worksheet.lst {
            return Err(SolutionViolation::StartOutsideWindow {
                worksheet: entry.worksheet,
                start: entry.start,
                est: worksheet.est,
                lst: worksheet.lst,
            });
        }
        if entry.start as i64 + worksheet.duration as i64 > horizon as i64 {
            return Err(SolutionViolation::EndsAfterHorizon {
                worksheet: entry.worksheet,
                start: entry.start,
            });
        }
    }

    if let Some(index) = (0..instance.num_worksheets())
        .find(|&index| instance.worksheets[index].mandatory && !solution.is_selected(index))
    {
        return Err(SolutionViolation::MandatoryNotExecuted(index));
    }

    for &(pred, succ) in instance.precedences.iter() {
        let (Some(pred_start), Some(succ_start)) = (solution.start_of(pred), solution.start_of(succ))
        else {
            continue;
        };
        if (succ_start as i64) < pred_start as i64 + instance.worksheets[pred].duration as i64 {
            return Err(SolutionViolation::PrecedenceViolated { pred, succ });
        }
    }

    check_capacities(instance, solution)?;
    check_road_groups(instance, solution)
}

fn check_capacities(instance: &Instance, solution: &Solution) -> Result<(), SolutionViolation> {
    let horizon = instance.horizon.max(0) as usize;
    let mut demand = vec![vec![0_i64; horizon]; instance.work_centers.len()];

    for entry in solution.scheduled() {
        let worksheet = &instance.worksheets[entry.worksheet];
        for (step, &workers) in worksheet.amount_of_workers.iter().enumerate() {
            demand[worksheet.work_center_id][entry.start as usize + step] += workers as i64;
        }
    }

    for (work_center, &capacity) in instance.work_centers.iter().enumerate() {
        if let Some(time) = demand[work_center]
            .iter()
            .position(|&demand| demand > capacity as i64)
        {
            return Err(SolutionViolation::CapacityExceeded {
                work_center,
                time: time as i32,
                demand: demand[work_center][time],
                capacity,
            });
        }
    }

    Ok(())
}

fn check_road_groups(instance: &Instance, solution: &Solution) -> Result<(), SolutionViolation> {
    let perturbed: HashSet<(usize, i32)> = solution
        .scheduled()
        .iter()
        .flat_map(|entry| instance.worksheets[entry.worksheet].occupied_cells(entry.start))
        .collect();

    for (group_index, group) in instance.roads_blocked.iter().enumerate() {
        let roads: HashSet<usize> = group.roads_id.iter().copied().collect();

        for time in 0..instance.horizon {
            let blocked = roads
                .iter()
                .filter(|&&road| perturbed.contains(&(road, time)))
                .count();
            if blocked as i64 > group.max_blocked as i64 {
                return Err(SolutionViolation::TooManyBlocked {
                    group: group_index,
                    time,
                    blocked,
                    max_blocked: group.max_blocked,
                });
            }
        }
    }

    Ok(())
}
