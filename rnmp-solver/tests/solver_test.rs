#![cfg(test)]

mod helpers;

use std::ffi::OsStr;

use helpers::instance_path;
use helpers::run_solver;
use helpers::scratch_path;
use rnmp_solver::results_file;

#[test]
fn the_single_worksheet_is_planned_at_a_cheap_time() {
    let run = run_solver([OsStr::new("solve"), instance_path("single.txt").as_os_str()]);

    assert!(run.status.success());
    assert_eq!(vec![4], run.objectives());
    assert_eq!(Some("[[0, 2]]"), run.last_plan());
    assert!(run.stdout.contains("=========="));
}

#[test]
fn json_and_text_instances_are_planned_alike() {
    let text = run_solver([OsStr::new("solve"), instance_path("single.txt").as_os_str()]);
    let json = run_solver([OsStr::new("solve"), instance_path("single.json").as_os_str()]);

    assert!(json.status.success());
    assert_eq!(text.objectives(), json.objectives());
    assert_eq!(text.last_plan(), json.last_plan());
}

#[test]
fn the_heuristics_can_be_chosen_on_the_command_line() {
    let run = run_solver([
        OsStr::new("solve"),
        instance_path("single.txt").as_os_str(),
        OsStr::new("--search"),
        OsStr::new("precedence-weight"),
        OsStr::new("--start-value"),
        OsStr::new("least-disruption"),
    ]);

    assert!(run.status.success());
    assert_eq!(Some(&4), run.objectives().last());
    assert_eq!(Some("[[0, 1]]"), run.last_plan());
}

#[test]
fn an_exhausted_time_limit_without_a_plan_is_unknown() {
    let run = run_solver([
        OsStr::new("solve"),
        instance_path("single.txt").as_os_str(),
        OsStr::new("-t"),
        OsStr::new("0"),
    ]);

    assert!(run.status.success());
    assert!(run.objectives().is_empty());
    assert!(run.stdout.contains("=====UNKNOWN====="));
}

#[test]
fn contradicting_precedences_are_reported_as_unsatisfiable() {
    let run = run_solver([
        OsStr::new("solve"),
        instance_path("infeasible_precedence.txt").as_os_str(),
    ]);

    assert!(run.status.success());
    assert!(run.objectives().is_empty());
    assert!(run.stdout.contains("=====UNSATISFIABLE====="));
}

#[test]
fn malformed_instances_fail_with_an_error_code() {
    let run = run_solver([OsStr::new("solve"), instance_path("malformed.txt").as_os_str()]);

    assert_eq!(Some(1), run.status.code());
    assert!(run.objectives().is_empty());
}

#[test]
fn improving_objectives_are_strictly_increasing() {
    let run = run_solver([
        OsStr::new("solve"),
        instance_path("MEDIUM_small.txt").as_os_str(),
    ]);

    assert!(run.status.success());
    let objectives = run.objectives();
    assert!(!objectives.is_empty());
    assert!(objectives.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn stored_plans_evaluate_to_the_reported_objective() {
    let results_dir = scratch_path("results");
    let run = run_solver([
        OsStr::new("solve"),
        instance_path("EASY_small.txt").as_os_str(),
        OsStr::new("--results-dir"),
        results_dir.as_os_str(),
    ]);
    assert!(run.status.success());
    let best = *run.objectives().last().unwrap();

    let stored = results_file::solution_path(&results_dir, "EASY_small");
    assert!(stored.is_file());

    let evaluation = run_solver([
        OsStr::new("evaluate"),
        instance_path("EASY_small.txt").as_os_str(),
        stored.as_os_str(),
    ]);
    assert!(evaluation.status.success());
    assert_eq!(vec![best], evaluation.objectives());

    let instance = rnmp_solver::read_instance(instance_path("EASY_small.txt")).unwrap();
    let solution = results_file::read_solution(&stored).unwrap();
    assert_eq!(Ok(best), rnmp_core::evaluate(&instance, &solution));

    std::fs::remove_dir_all(&results_dir).unwrap();
}
