//! File appender implementation

use super::render_text;
use crate::core::{Appender, LogEntry, LoggerError, Result, TimestampFormat};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per entry to a file
pub struct FileAppender {
    name: String,
    path: PathBuf,
    writer: Mutex<Option<BufWriter<File>>>,
    timestamp_format: TimestampFormat,
    immediate_flush: bool,
}

impl FileAppender {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            name: "file".to_string(),
            path,
            writer: Mutex::new(Some(BufWriter::new(file))),
            timestamp_format: TimestampFormat::default(),
            immediate_flush: false,
        })
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
    /// ```no_run
    /// use hierarchical_logger::appenders::FileAppender;
    /// use hierarchical_logger::TimestampFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Flush after every entry instead of when the buffer fills
    #[must_use]
    pub fn with_immediate_flush(mut self, immediate: bool) -> Self {
        self.immediate_flush = immediate;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let mut line = render_text(entry, &self.timestamp_format, &format!("{:5}", entry.level()));
        line.push('\n');

        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::appender_closed(&self.name))?;
        writer.write_all(line.as_bytes())?;
        if self.immediate_flush {
            writer.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&self) {
        if let Some(mut writer) = self.writer.lock().take() {
            let _ = writer.flush();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.flush();
    }
}
