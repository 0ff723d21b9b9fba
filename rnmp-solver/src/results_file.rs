//! Stored plans: one `<worksheet index> <start>` line per executed worksheet.
//!
//! A results directory keeps the best known plan of every instance in `<dir>/<name>.txt`.
use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::info;
use rnmp_core::instance::Instance;
use rnmp_core::Solution;

use crate::parsers::ParseError;
use crate::parsers::Tokens;
use crate::RnmpResult;

pub fn solution_path(results_dir: impl AsRef<Path>, instance_name: &str) -> PathBuf {
    results_dir.as_ref().join(format!("{instance_name}.txt"))
}

pub fn write_solution(path: impl AsRef<Path>, solution: &Solution) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in solution.scheduled() {
        writeln!(writer, "{} {}", entry.worksheet, entry.start)?;
    }
    writer.flush()
}

pub fn parse_solution(mut source: impl Read) -> Result<Solution, ParseError> {
    let mut content = String::new();
    let _ = source.read_to_string(&mut content)?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let mut tokens = Tokens::new(index + 1, line);
            let worksheet = tokens.next_number("worksheet index")?;
            let start = tokens.next_number("start")?;
            tokens.finish()?;
            Ok::<(usize, i32), ParseError>((worksheet, start))
        })
        .collect()
}

pub fn read_solution(path: impl AsRef<Path>) -> RnmpResult<Solution> {
    Ok(parse_solution(File::open(path)?)?)
}

/// Writes `solution` to the results directory unless the stored plan of the instance is at least
/// as good. A stored plan which cannot be read or evaluated is overwritten.
///
/// Returns whether the file was written.
pub fn store_if_better(
    results_dir: impl AsRef<Path>,
    instance: &Instance,
    solution: &Solution,
    objective: i32,
) -> RnmpResult<bool> {
    let name = instance.name.as_deref().unwrap_or("unnamed");
    let path = solution_path(&results_dir, name);

    if path.is_file() {
        let stored = read_solution(&path)
            .and_then(|stored| Ok(rnmp_core::evaluate(instance, &stored)?));
        match stored {
            Ok(stored_objective) if stored_objective >= objective => {
                debug!("Keeping the stored plan of {name} with objective {stored_objective}");
                return Ok(false);
            }
            Ok(_) => {}
            Err(e) => debug!("Replacing the stored plan of {name}: {e}"),
        }
    }

    std::fs::create_dir_all(&results_dir)?;
    write_solution(&path, solution)?;
    info!("Stored the plan of {name} with objective {objective}");

    Ok(true)
}

#[cfg(test)]
mod tests {
    use rnmp_core::instance::Worksheet;

    use super::*;

    fn single_worksheet(name: &str) -> Instance {
        Instance {
            horizon: 3,
            roads_cost: vec![vec![10, 1, 1]],
            work_centers: vec![1],
            worksheets: vec![Worksheet {
                id: 0,
                work_center_id: 0,
                mandatory: true,
                importance: 5,
                est: 0,
                lst: 2,
                duration: 1,
                roads_id: vec![0],
                amount_of_workers: vec![1],
            }],
            nb_activities: 1,
            name: Some(name.to_owned()),
            ..Default::default()
        }
    }

    fn scratch_dir(test: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rnmp-results-{test}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn plans_are_read_as_pairs() {
        let solution = parse_solution("2 7\n\n0 1\n".as_bytes()).unwrap();

        assert_eq!(Some(1), solution.start_of(0));
        assert_eq!(Some(7), solution.start_of(2));
        assert_eq!(2, solution.len());
    }

    #[test]
    fn malformed_plans_are_rejected() {
        assert!(matches!(
            parse_solution("0 1 2\n".as_bytes()),
            Err(ParseError::TrailingToken { line: 1, .. })
        ));
        assert!(matches!(
            parse_solution("0\n".as_bytes()),
            Err(ParseError::MissingToken { line: 1, .. })
        ));
    }

    #[test]
    fn only_better_plans_replace_the_stored_one() {
        let dir = scratch_dir("better");
        let instance = single_worksheet("single");
        let early: Solution = [(0, 0)].into_iter().collect();
        let late: Solution = [(0, 2)].into_iter().collect();

        assert!(store_if_better(&dir, &instance, &early, -5).unwrap());
        assert!(store_if_better(&dir, &instance, &late, 4).unwrap());
        assert!(!store_if_better(&dir, &instance, &early, -5).unwrap());
        assert!(!store_if_better(&dir, &instance, &late, 4).unwrap());

        let stored = read_solution(solution_path(&dir, "single")).unwrap();
        assert_eq!(late, stored);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unreadable_plans_are_replaced() {
        let dir = scratch_dir("unreadable");
        let instance = single_worksheet("single");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(solution_path(&dir, "single"), "not a plan\n").unwrap();

        let late: Solution = [(0, 2)].into_iter().collect();
        assert!(store_if_better(&dir, &instance, &late, 4).unwrap());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
