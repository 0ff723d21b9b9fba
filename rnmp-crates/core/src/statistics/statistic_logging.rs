//! Process-wide configuration of how statistic lines are written.
//!
//! Nothing is written until [`configure_statistic_logging`] has been called. Every line has the
//! form `<prefix> <name>=<value>`; a run of statistics can be closed with a configured postfix.

use std::fmt::Display;
use std::io::stdout;
use std::io::Write;
use std::sync::Mutex;
use std::sync::OnceLock;

use convert_case::Case;
use convert_case::Casing;
use log::debug;

struct StatisticSink {
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Box<dyn Write + Send + Sync>,
}

static STATISTIC_SINK: OnceLock<Mutex<StatisticSink>> = OnceLock::new();

/// Configures the prefix of statistic lines, an optional closing line written by
/// [`log_statistic_postfix`], an optional casing applied to the names and the writer (stdout when
/// absent). Only the first call has an effect.
pub fn configure_statistic_logging(
    prefix: &'static str,
    postfix: Option<&'static str>,
    casing: Option<Case>,
    writer: Option<Box<dyn Write + Send + Sync>>,
) {
    let _ = STATISTIC_SINK.get_or_init(|| {
        Mutex::new(StatisticSink {
            prefix,
            postfix,
            casing,
            writer: writer.unwrap_or_else(|| Box::new(stdout())),
        })
    });
}

fn with_sink(write: impl FnOnce(&mut StatisticSink) -> std::io::Result<()>) {
    let Some(sink) = STATISTIC_SINK.get() else {
        return;
    };
    if let Ok(mut sink) = sink.lock() {
        if let Err(e) = write(&mut sink) {
            debug!("Could not write statistic: {e}");
        }
    }
}

/// Writes `<prefix> <name>=<value>`.
pub fn log_statistic(name: impl Display, value: impl Display) {
    with_sink(|sink| {
        let name = match sink.casing {
            Some(casing) => name.to_string().to_case(casing),
            None => name.to_string(),
        };
        writeln!(sink.writer, "{} {name}={value}", sink.prefix)
    });
}

/// Writes the closing line, if one was configured.
pub fn log_statistic_postfix() {
    with_sink(|sink| match sink.postfix {
        Some(postfix) => writeln!(sink.writer, "{postfix}"),
        None => Ok(()),
    });
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_SINK.get().is_some()
}
