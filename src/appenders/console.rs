//! Console appender implementation

use super::render_text;
use crate::core::{Appender, LogEntry, LogLevel, LoggerError, Result, TimestampFormat};
use colored::Colorize;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes entries to stdout, with `Error` and above routed to stderr
pub struct ConsoleAppender {
    name: String,
    use_colors: bool,
    timestamp_format: TimestampFormat,
    closed: AtomicBool,
    // Keeps lines from concurrent loggers whole
    write_lock: Mutex<()>,
}

impl ConsoleAppender {
    pub fn new() -> Self {
        Self::with_colors(true)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            name: "console".to_string(),
            use_colors,
            timestamp_format: TimestampFormat::default(),
            closed: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```
    /// use hierarchical_logger::appenders::ConsoleAppender;
    /// use hierarchical_logger::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_line(&self, entry: &LogEntry) -> String {
        let level = format!("{:5}", entry.level().to_str());
        let level = if self.use_colors {
            level.color(entry.level().color_code()).to_string()
        } else {
            level
        };
        render_text(entry, &self.timestamp_format, &level)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(LoggerError::appender_closed(&self.name));
        }

        let line = self.format_line(entry);
        let _guard = self.write_lock.lock();
        match entry.level() {
            LogLevel::Error | LogLevel::Fatal | LogLevel::Off => {
                writeln!(std::io::stderr().lock(), "{}", line)?
            }
            _ => writeln!(std::io::stdout().lock(), "{}", line)?,
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn close(&self) {
        if !self.closed.swap(true, Ordering::AcqRel) {
            let _ = self.flush();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
