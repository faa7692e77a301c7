use crate::error::CliResult;
use crate::report::{Level, TIMESTAMP_FORMAT};
use chrono::Local;
use std::fmt;
use std::fs::File;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime, MakeWriter};

/// Same local timestamp the [`crate::report::Reporter`] stamps its lines with
struct LocalTime;

impl FormatTime for LocalTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", Local::now().format(TIMESTAMP_FORMAT))
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LevelFilter::ERROR,
            Level::Warning => LevelFilter::WARN,
            Level::Info => LevelFilter::INFO,
            Level::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Plain-text subscriber for library events, filtered by the configured level
pub fn subscriber<W>(writer: W, level: Level) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalTime)
        .with_max_level(level)
        .finish()
}

/// Route `tracing` events into the run's log file
pub fn init(log: File, level: Level) -> CliResult<()> {
    tracing::subscriber::set_global_default(subscriber(Mutex::new(log), level))?;
    Ok(())
}
