use crate::config::{LogMode, TallyConfig};
use crate::error::CliResult;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Stdout, Write};
use tally_records::Diagnostic;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Message level, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    Info,
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        };
        f.write_str(label)
    }
}

/// Console and log-file sink handed to every command.
///
/// Console lines look like `[WARNING] message`; log lines carry a local
/// timestamp and are dropped when less severe than `min_level`.
pub struct Reporter<C: Write, L: Write> {
    console: C,
    log: L,
    log_label: String,
    min_level: Level,
}

impl Reporter<Stdout, File> {
    /// Open the configured log file and write the console to stdout
    pub fn from_config(config: &TallyConfig) -> CliResult<Self> {
        let mut options = OpenOptions::new();
        match config.log_mode {
            LogMode::Overwrite => options.write(true).create(true).truncate(true),
            LogMode::Append => options.append(true).create(true),
        };
        let log = options.open(&config.log_file)?;

        Ok(Reporter::new(
            io::stdout(),
            log,
            config.log_file.display().to_string(),
            config.log_level,
        ))
    }

    /// Second handle on the log file, for the `tracing` subscriber
    pub fn log_file(&self) -> io::Result<File> {
        self.log.try_clone()
    }
}

impl<C: Write, L: Write> Reporter<C, L> {
    pub fn new(console: C, log: L, log_label: impl Into<String>, min_level: Level) -> Self {
        Self {
            console,
            log,
            log_label: log_label.into(),
            min_level,
        }
    }

    #[cfg(test)]
    pub fn console(&self) -> &C {
        &self.console
    }

    #[cfg(test)]
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Write `message` to the console, the log, or both
    pub fn print_and_log(
        &mut self,
        message: &str,
        level: Level,
        to_console: bool,
        to_log: bool,
    ) -> io::Result<()> {
        if to_console {
            writeln!(self.console, "[{}] {}", level, message)?;
        }
        if to_log && level <= self.min_level {
            writeln!(
                self.log,
                "{} {}: {}",
                Local::now().format(TIMESTAMP_FORMAT),
                level,
                message
            )?;
        }
        Ok(())
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.print_and_log(message, Level::Error, true, true)
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.print_and_log(message, Level::Warning, true, true)
    }

    /// Plain console output (results), never logged
    pub fn print(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.console, "{}", message)
    }

    /// Summarise per-line findings: a warning on both sinks, a pointer to the
    /// log on the console, and one aligned log line per diagnostic.
    pub fn report_content_errors(&mut self, diagnostics: &[Diagnostic]) -> io::Result<()> {
        if diagnostics.is_empty() {
            return Ok(());
        }

        self.warning(
            "There are potentially corrupted data in your dataset file \
             that may lead to wrong results and should be or may require fix:",
        )?;
        let pointer = format!("Please check '{}' file for more details.", self.log_label);
        self.print_and_log(&pointer, Level::Info, true, false)?;

        let width = diagnostics
            .iter()
            .map(|d| d.line.chars().count())
            .max()
            .unwrap_or(0);

        for diagnostic in diagnostics {
            let cause = if diagnostic.cause.is_empty() {
                "Unknown"
            } else {
                diagnostic.cause.as_str()
            };
            let message = format!(
                "Line {:<4} {:<width$} - Cause: ({}) {}",
                format!("{}:", diagnostic.line_index),
                diagnostic.line,
                diagnostic.severity,
                cause,
                width = width
            );
            self.print_and_log(&message, Level::Info, false, true)?;
        }

        self.log.flush()
    }
}
