mod os_signal_termination;

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use log::error;
use log::info;
use log::warn;
use log::Level;
use log::LevelFilter;
use os_signal_termination::OsSignal;
use rnmp_core::asserts::RNMP_ASSERT_LEVEL_DEFINITION;
use rnmp_core::asserts::RNMP_ASSERT_MODERATE;
use rnmp_core::statistics::configure_statistic_logging;
use rnmp_core::termination::Combinator;
use rnmp_core::termination::TimeBudget;
use rnmp_core::OptimisationResult;
use rnmp_core::SearchStrategy;
use rnmp_core::Solution;
use rnmp_core::Solver;
use rnmp_core::SolverOptions;
use rnmp_core::StartValueSelection;
use rnmp_solver::results_file;
use rnmp_solver::RnmpResult;

const MSG_OPTIMAL: &str = "==========";
const MSG_UNKNOWN: &str = "=====UNKNOWN=====";
const MSG_UNSATISFIABLE: &str = "=====UNSATISFIABLE=====";

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about,
    arg_required_else_help = true
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", global = true, verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", global = true, verbatim_doc_comment)]
    log_statistics: bool,

    /// If `--verbose` is enabled then this option removes the timestamp information from the log
    /// messages.
    ///
    /// Possible values: bool
    #[arg(long = "omit-timestamp", global = true, verbatim_doc_comment)]
    omit_timestamp: bool,

    /// If `--verbose` is enabled then this option removes the call site information from the log
    /// messages. The call site is the file and line from which the message originated.
    ///
    /// Possible values: bool
    #[arg(long = "omit-call-site", global = true, verbatim_doc_comment)]
    omit_call_site: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plans an instance and prints every improving plan.
    Solve {
        /// The instance to plan. Files ending in '.json' are read as JSON, any other file is read
        /// in the text format.
        #[clap(verbatim_doc_comment)]
        instance_path: PathBuf,

        /// The time budget for the solver, given in milliseconds.
        ///
        /// Possible values: u64 (Optional)
        #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
        time_limit: Option<u64>,

        /// The variable selection of the search. When absent, it is derived from the name of the
        /// instance.
        #[arg(long, value_enum)]
        search: Option<SearchStrategy>,

        /// The selection of start times. When absent, it is derived from the name of the instance.
        #[arg(long = "start-value", value_enum)]
        start_value: Option<StartValueSelection>,

        /// The directory in which the best plan of every instance is kept, in '<name>.txt'.
        ///
        /// The stored plan is only replaced by strictly better plans.
        #[arg(long = "results-dir", verbatim_doc_comment)]
        results_dir: Option<PathBuf>,
    },
    /// Prints the objective of a stored plan.
    Evaluate {
        /// The instance the plan belongs to.
        instance_path: PathBuf,
        /// The plan, one '<worksheet index> <start>' line per executed worksheet.
        solution_path: PathBuf,
    },
}

fn configure_logging(
    verbose: bool,
    log_statistics: bool,
    omit_timestamp: bool,
    omit_call_site: bool,
) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging("c STAT", None, None, None);
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "c ")?;
            if record.level() != Level::Info && !omit_timestamp {
                write!(buf, "{} ", buf.timestamp())?;
            }
            write!(buf, "{} ", record.level())?;
            if record.level() != Level::Info && !omit_call_site {
                write!(
                    buf,
                    "[{}:{}] ",
                    record.file().unwrap_or("unknown"),
                    record.line().unwrap_or(0)
                )?;
            }
            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> RnmpResult<()> {
    let args = Args::parse();

    configure_logging(
        args.verbose,
        args.log_statistics,
        args.omit_timestamp,
        args.omit_call_site,
    )?;

    if RNMP_ASSERT_LEVEL_DEFINITION >= RNMP_ASSERT_MODERATE {
        warn!(
            "Potential performance degradation: the assert level is set to {RNMP_ASSERT_LEVEL_DEFINITION}, meaning many debug asserts are active which may result in performance degradation."
        );
    }

    match args.command {
        Command::Solve {
            instance_path,
            time_limit,
            search,
            start_value,
            results_dir,
        } => solve(
            &instance_path,
            time_limit.map(Duration::from_millis),
            SolverOptions {
                search,
                start_value,
            },
            results_dir.as_deref(),
        ),
        Command::Evaluate {
            instance_path,
            solution_path,
        } => {
            let instance = rnmp_solver::read_instance(&instance_path)?;
            let solution = results_file::read_solution(&solution_path)?;
            let objective = rnmp_core::evaluate(&instance, &solution)?;
            println!("objective: {objective}");
            Ok(())
        }
    }
}

fn solve(
    instance_path: &Path,
    time_limit: Option<Duration>,
    options: SolverOptions,
    results_dir: Option<&Path>,
) -> RnmpResult<()> {
    let instance = rnmp_solver::read_instance(instance_path)?;
    let mut solver = Solver::new(instance, options)?;
    info!(
        "Planning {} ({:?} tier)",
        instance_path.display(),
        solver.tier()
    );

    let stored_instance = solver.instance().clone();
    let mut brancher = solver.default_brancher();
    let mut termination = Combinator::new(
        OsSignal::install(),
        time_limit.map(TimeBudget::starting_now),
    );

    let result = solver.optimise(
        &mut brancher,
        &mut termination,
        |solution: &Solution, objective: i32| {
            println!("objective: {objective}");
            println!("plan: {solution}");

            if let Some(results_dir) = results_dir {
                if let Err(e) =
                    results_file::store_if_better(results_dir, &stored_instance, solution, objective)
                {
                    warn!("Failed to store the plan: {e}");
                }
            }
        },
    );

    match result {
        OptimisationResult::Optimal { objective, .. } => {
            solver.log_statistics_with_objective(&brancher, objective);
            println!("{MSG_OPTIMAL}");
        }
        OptimisationResult::Satisfiable { objective, .. } => {
            solver.log_statistics_with_objective(&brancher, objective);
        }
        OptimisationResult::Unsatisfiable => {
            solver.log_statistics(&brancher);
            println!("{MSG_UNSATISFIABLE}");
        }
        OptimisationResult::Unknown => {
            solver.log_statistics(&brancher);
            println!("{MSG_UNKNOWN}");
        }
    }

    Ok(())
}
