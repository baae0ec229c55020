//! Log entry structure

use super::log_level::LogLevel;
use super::ndc::Ndc;
use super::thread_data::current_thread_identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source position of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub file: &'static str,
    pub line: u32,
}

impl Location {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Position of the caller of the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self {
            file: location.file(),
            line: location.line(),
        }
    }
}

/// One logging event.
///
/// Fields are fixed at construction. A live entry snapshots the clock, the
/// issuing thread and its NDC when built; a reconstructed entry takes every
/// value from the caller. Either way the values are owned, so clones and
/// entries handed to other threads never look at the current thread again.
/// Deserializing produces a reconstructed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    logger_name: String,
    level: LogLevel,
    message: String,
    ndc: String,
    thread_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thread_name: Option<String>,
    timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
}

impl LogEntry {
    /// Build a live entry on the calling thread
    pub fn new(
        logger_name: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
        location: Option<Location>,
    ) -> Self {
        let (thread_id, thread_name) = current_thread_identity();
        Self {
            logger_name: logger_name.into(),
            level,
            message: message.into(),
            ndc: Ndc::get(),
            thread_id,
            thread_name,
            timestamp: Utc::now(),
            file: location.map(|l| l.file.to_string()),
            line: location.map(|l| l.line),
        }
    }

    /// Rebuild an entry from values produced elsewhere, e.g. a remote peer
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        logger_name: impl Into<String>,
        level: LogLevel,
        ndc: impl Into<String>,
        message: impl Into<String>,
        thread: impl Into<String>,
        timestamp: DateTime<Utc>,
        file: Option<String>,
        line: Option<u32>,
    ) -> Self {
        Self {
            logger_name: logger_name.into(),
            level,
            message: message.into(),
            ndc: ndc.into(),
            thread_id: thread.into(),
            thread_name: None,
            timestamp,
            file,
            line,
        }
    }

    /// Replace this entry with a fresh live one
    pub fn reset(
        &mut self,
        logger_name: impl Into<String>,
        level: LogLevel,
        message: impl Into<String>,
        location: Option<Location>,
    ) {
        *self = Self::new(logger_name, level, message, location);
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Full NDC of the issuing thread when the entry was built
    pub fn ndc(&self) -> &str {
        &self.ndc
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    /// Thread name when the thread had one, its id otherwise
    pub fn thread(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }

    pub fn timestamp(&self) -> &DateTime<Utc> {
        &self.timestamp
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn line(&self) -> Option<u32> {
        self.line
    }
}
