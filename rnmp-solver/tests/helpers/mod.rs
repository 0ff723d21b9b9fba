//! Helpers to run the solver binary from the integration tests.
#![allow(
    dead_code,
    reason = "is used in integration tests but unable to find a way to silence these warnings"
)]

use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use regex::Regex;
use wait_timeout::ChildExt;

pub(crate) fn instance_path(file_name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("instances")
        .join(file_name)
}

/// A fresh path in the temporary directory which is unique within the test binary.
pub(crate) fn scratch_path(label: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let index = COUNTER.fetch_add(1, Ordering::Relaxed);

    std::env::temp_dir().join(format!("rnmp-{label}-{}-{index}", std::process::id()))
}

#[derive(Debug)]
pub(crate) struct SolverRun {
    pub(crate) status: ExitStatus,
    pub(crate) stdout: String,
}

impl SolverRun {
    /// The objectives in the order in which the solver printed them.
    pub(crate) fn objectives(&self) -> Vec<i32> {
        let pattern = Regex::new(r"(?m)^objective: (-?\d+)$").unwrap();
        pattern
            .captures_iter(&self.stdout)
            .map(|captures| captures[1].parse().unwrap())
            .collect()
    }

    pub(crate) fn last_plan(&self) -> Option<&str> {
        self.stdout
            .lines()
            .filter_map(|line| line.strip_prefix("plan: "))
            .last()
    }
}

pub(crate) fn run_solver<I, S>(args: I) -> SolverRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    const TEST_TIMEOUT: Duration = Duration::from_secs(60);

    let solver = PathBuf::from(env!("CARGO_BIN_EXE_rnmp-solver"));
    let log_file_path = scratch_path("log");

    let mut child = Command::new(solver)
        .args(args)
        .stdout(File::create(&log_file_path).expect("Failed to create log file."))
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .expect("Failed to run solver.");

    let status = match child.wait_timeout(TEST_TIMEOUT) {
        Ok(None) => {
            let _ = child.kill();
            panic!("solver took more than {} seconds", TEST_TIMEOUT.as_secs())
        }
        Ok(Some(status)) => status,
        Err(e) => panic!("error starting solver: {e}"),
    };

    let stdout = std::fs::read_to_string(&log_file_path).expect("Failed to read log file.");
    std::fs::remove_file(&log_file_path).expect("Failed to remove log file.");

    SolverRun { status, stdout }
}
