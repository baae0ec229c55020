//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};
use std::sync::Arc;

/// A destination for log entries.
///
/// One appender may be attached to several loggers and is then called from
/// many threads at once, so implementations serialize their own writes.
/// `close` must be idempotent; writes after it should fail with
/// [`LoggerError::AppenderClosed`](super::LoggerError::AppenderClosed).
pub trait Appender: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn close(&self);

    fn name(&self) -> &str;
}

/// Appender handle shared between loggers
pub type SharedAppender = Arc<dyn Appender>;

/// Identity comparison, ignoring vtable differences
#[inline]
pub(crate) fn same_appender(a: &SharedAppender, b: &SharedAppender) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
