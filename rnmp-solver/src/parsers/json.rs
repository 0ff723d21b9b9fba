//! The JSON instance format, with the field names of the published instance files.
use std::io::Read;

use rnmp_core::instance::Instance;
use rnmp_core::instance::RoadGroup;
use rnmp_core::instance::Worksheet;
use serde::Deserialize;

use super::ParseError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InstanceFile {
    horizon: i32,
    roads_cost: Vec<Vec<i32>>,
    work_centers: Vec<i32>,
    worksheets: Vec<WorksheetEntry>,
    #[serde(default)]
    roads_blocked: Vec<RoadGroupEntry>,
    #[serde(default)]
    precedences: Vec<[usize; 2]>,
    #[serde(default)]
    nb_activities: Option<i32>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorksheetEntry {
    id: u32,
    #[serde(rename = "workCenterID")]
    work_center_id: usize,
    mandatory: Flag,
    importance: i32,
    est: i32,
    lst: i32,
    duration: i32,
    #[serde(rename = "roadsID")]
    roads_id: Vec<usize>,
    amount_of_workers: Vec<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RoadGroupEntry {
    nb_max_blocked: i32,
    #[serde(rename = "roadsID")]
    roads_id: Vec<usize>,
}

/// Mandatory flags are written as `0`/`1` by some generators and as booleans by others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(flag) => *flag,
            Flag::Int(value) => *value != 0,
        }
    }
}

/// Reads a JSON instance; `name` is used when the file does not name the instance itself.
pub fn parse_instance(source: impl Read, name: &str) -> Result<Instance, ParseError> {
    let file: InstanceFile = serde_json::from_reader(source)?;

    let worksheets: Vec<Worksheet> = file
        .worksheets
        .into_iter()
        .map(|entry| Worksheet {
            id: entry.id,
            work_center_id: entry.work_center_id,
            mandatory: entry.mandatory.is_set(),
            importance: entry.importance,
            est: entry.est,
            lst: entry.lst,
            duration: entry.duration,
            roads_id: entry.roads_id,
            amount_of_workers: entry.amount_of_workers,
        })
        .collect();
    let nb_activities = file.nb_activities.unwrap_or_else(|| {
        let total = worksheets
            .iter()
            .map(|worksheet| worksheet.duration as i64)
            .sum::<i64>();
        total.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    });

    Ok(Instance {
        horizon: file.horizon,
        roads_cost: file.roads_cost,
        work_centers: file.work_centers,
        worksheets,
        roads_blocked: file
            .roads_blocked
            .into_iter()
            .map(|group| RoadGroup {
                max_blocked: group.nb_max_blocked,
                roads_id: group.roads_id,
            })
            .collect(),
        precedences: file
            .precedences
            .into_iter()
            .map(|[pred, succ]| (pred, succ))
            .collect(),
        nb_activities,
        name: Some(file.name.unwrap_or_else(|| name.to_owned())),
    })
}
