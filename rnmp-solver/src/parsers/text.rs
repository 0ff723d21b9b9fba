//! The line based instance format.
//!
//! ```text
//! <horizon> <nbRoads> <nbWorkCenters> <nbWorksheets> <nbActivities>
//! <roadId> <from>:<to>:<cost> ...
//! <centerId> <capacity>
//! <id> <center> <mandatory> <importance> <est> <lst> <duration> <roads...> <workers...>
//! M <maxBlocked> <road> ...
//! P <pred> <succ>
//! ```
//!
//! There is one road line per road, one center line per work center and one worksheet line per
//! worksheet. Costs which are not covered by any `<from>:<to>:<cost>` interval are 0. The `M` and
//! `P` lines may appear in any order. Blank lines are ignored.
use std::io::Read;

use rnmp_core::instance::Instance;
use rnmp_core::instance::RoadGroup;
use rnmp_core::instance::Worksheet;

use super::parse_number;
use super::ParseError;
use super::Tokens;

pub fn parse_instance(mut source: impl Read, name: &str) -> Result<Instance, ParseError> {
    let mut content = String::new();
    let _ = source.read_to_string(&mut content)?;

    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| Tokens::new(index + 1, line));

    let mut header = next_line(&mut lines, "the header")?;
    let horizon_steps = header.next_number::<usize>("horizon")?;
    let horizon = i32::try_from(horizon_steps).map_err(|_| ParseError::InvalidNumber {
        line: header.line(),
        token: horizon_steps.to_string(),
        expected: "horizon",
    })?;
    let num_roads = header.next_number::<usize>("number of roads")?;
    let num_work_centers = header.next_number::<usize>("number of work centers")?;
    let num_worksheets = header.next_number::<usize>("number of worksheets")?;
    let nb_activities = header.next_number::<i32>("number of activities")?;
    header.finish()?;

    let roads_cost = (0..num_roads)
        .map(|_| {
            let tokens = next_line(&mut lines, "the road costs")?;
            parse_road(tokens, horizon_steps)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let work_centers = (0..num_work_centers)
        .map(|_| {
            let mut tokens = next_line(&mut lines, "the work centers")?;
            let _ = tokens.next_number::<usize>("work center id")?;
            let capacity = tokens.next_number("capacity")?;
            tokens.finish()?;
            Ok(capacity)
        })
        .collect::<Result<Vec<i32>, ParseError>>()?;

    let worksheets = (0..num_worksheets)
        .map(|_| parse_worksheet(next_line(&mut lines, "the worksheets")?))
        .collect::<Result<Vec<_>, _>>()?;

    let mut roads_blocked = Vec::new();
    let mut precedences = Vec::new();
    for mut tokens in lines {
        match tokens.next_token("a line tag")? {
            "M" => {
                let max_blocked = tokens.next_number("maximum of blocked roads")?;
                let line = tokens.line();
                let roads_id = tokens
                    .remaining()
                    .map(|token| parse_number(line, token, "road index"))
                    .collect::<Result<Vec<usize>, _>>()?;
                roads_blocked.push(RoadGroup {
                    max_blocked,
                    roads_id,
                });
            }
            "P" => {
                let pred = tokens.next_number("predecessor")?;
                let succ = tokens.next_number("successor")?;
                tokens.finish()?;
                precedences.push((pred, succ));
            }
            tag => {
                return Err(ParseError::UnknownTag {
                    line: tokens.line(),
                    tag: tag.to_owned(),
                })
            }
        }
    }

    Ok(Instance {
        horizon,
        roads_cost,
        work_centers,
        worksheets,
        roads_blocked,
        precedences,
        nb_activities,
        name: Some(name.to_owned()),
    })
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = Tokens<'a>>,
    what: &'static str,
) -> Result<Tokens<'a>, ParseError> {
    lines.next().ok_or(ParseError::UnexpectedEnd(what))
}

fn parse_road(mut tokens: Tokens<'_>, horizon: usize) -> Result<Vec<i32>, ParseError> {
    let line = tokens.line();
    let _ = tokens.next_number::<usize>("road id")?;

    let mut costs = vec![0; horizon];
    for entry in tokens.remaining() {
        let invalid_entry = || ParseError::InvalidCostEntry {
            line,
            entry: entry.to_owned(),
        };

        let mut parts = entry.split(':');
        let (Some(from), Some(to), Some(cost), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid_entry());
        };
        let from: usize = parse_number(line, from, "interval start")?;
        let to: usize = parse_number(line, to, "interval end")?;
        let cost: i32 = parse_number(line, cost, "cost")?;

        if to > horizon {
            return Err(ParseError::CostOutsideHorizon {
                line,
                from,
                to,
                horizon,
            });
        }
        for slot in costs.iter_mut().take(to).skip(from) {
            *slot = cost;
        }
    }

    Ok(costs)
}

fn parse_worksheet(mut tokens: Tokens<'_>) -> Result<Worksheet, ParseError> {
    let id = tokens.next_number("worksheet id")?;
    let work_center_id = tokens.next_number("work center index")?;
    let mandatory = tokens.next_number::<u8>("mandatory flag")? != 0;
    let importance = tokens.next_number("importance")?;
    let est = tokens.next_number("earliest start")?;
    let lst = tokens.next_number("latest start")?;
    let duration = tokens.next_number::<usize>("duration")?;

    let roads_id = (0..duration)
        .map(|_| tokens.next_number("road index"))
        .collect::<Result<Vec<usize>, _>>()?;
    let amount_of_workers = (0..duration)
        .map(|_| tokens.next_number("amount of workers"))
        .collect::<Result<Vec<i32>, _>>()?;
    let line = tokens.line();
    tokens.finish()?;

    Ok(Worksheet {
        id,
        work_center_id,
        mandatory,
        importance,
        est,
        lst,
        duration: i32::try_from(duration).map_err(|_| ParseError::InvalidNumber {
            line,
            token: duration.to_string(),
            expected: "duration",
        })?,
        roads_id,
        amount_of_workers,
    })
}
