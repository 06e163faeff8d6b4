//! Stderr logger.
//!
//! [`StderrLogger`] prints each record with a colored level prefix. Lines
//! following a record of the same level get `...` instead of repeating the
//! prefix.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

static LOGGER: StderrLogger = StderrLogger::new();

/// Installs the stderr logger with the given level.
///
/// # Errors
/// Fails if a logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Maps `-q` and the number of `-v` flags to a level.
#[must_use]
pub const fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// A [`Log`] implementation writing to stderr.
pub struct StderrLogger {
    /// Last level written, as `Level as usize`.
    last_level_written: AtomicUsize,
}

impl StderrLogger {
    /// Creates the logger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_level_written: AtomicUsize::new(0),
        }
    }

    fn prefix(&self, level: Level) -> &'static str {
        if self.last_level_written.load(Ordering::Relaxed) == level as usize {
            return "...";
        }
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    fn write_record(&self, out: &mut impl Write, record: &Record<'_>) -> io::Result<()> {
        let level = record.level();
        write!(out, "{}{:>5}\x1b[0m ", color(level), self.prefix(level))?;
        let body = record.args().to_string();
        for (i, line) in body.lines().enumerate() {
            if i > 0 {
                out.write_all(b"      ")?;
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl Default for StderrLogger {
    fn default() -> Self {
        Self::new()
    }
}

const fn color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m",
        Level::Warn => "\x1b[33m",
        Level::Info => "\x1b[32m",
        Level::Debug => "\x1b[34m",
        Level::Trace => "\x1b[38;5;242m",
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut err = io::stderr().lock();
        // Nowhere left to report a failing stderr.
        let _ = self.write_record(&mut err, record);
        self.last_level_written
            .store(record.level() as usize, Ordering::Relaxed);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
