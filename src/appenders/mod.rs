//! Appender implementations

#[cfg(feature = "async")]
pub mod async_appender;
#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;

#[cfg(feature = "async")]
pub use async_appender::AsyncAppender;
#[cfg(feature = "console")]
pub use console::ConsoleAppender;
#[cfg(feature = "file")]
pub use file::FileAppender;

pub use crate::core::{Appender, SharedAppender};

#[cfg(any(feature = "console", feature = "file"))]
use crate::core::{LogEntry, TimestampFormat};

/// Single-line text form shared by the bundled appenders:
/// `[timestamp] [LEVEL] [thread] logger <ndc> - message`
#[cfg(any(feature = "console", feature = "file"))]
pub(crate) fn render_text(entry: &LogEntry, timestamp_format: &TimestampFormat, level: &str) -> String {
    let timestamp = timestamp_format.format(entry.timestamp());
    if entry.ndc().is_empty() {
        format!(
            "[{}] [{}] [{}] {} - {}",
            timestamp,
            level,
            entry.thread(),
            entry.logger_name(),
            entry.message()
        )
    } else {
        format!(
            "[{}] [{}] [{}] {} <{}> - {}",
            timestamp,
            level,
            entry.thread(),
            entry.logger_name(),
            entry.ndc(),
            entry.message()
        )
    }
}

#[cfg(all(test, any(feature = "console", feature = "file")))]
mod tests {
    use super::*;
    use crate::core::LogLevel;
    use chrono::TimeZone;

    #[test]
    fn test_render_text_with_and_without_ndc() {
        let ts = chrono::Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
        let plain = LogEntry::reconstruct("app", LogLevel::Info, "", "hi", "main", ts, None, None);
        let nested = LogEntry::reconstruct("app", LogLevel::Info, "req-1 db", "hi", "main", ts, None, None);

        assert_eq!(
            render_text(&plain, &TimestampFormat::Iso8601, "INFO "),
            "[2025-01-08T10:30:45.000Z] [INFO ] [main] app - hi"
        );
        assert_eq!(
            render_text(&nested, &TimestampFormat::Iso8601, "INFO "),
            "[2025-01-08T10:30:45.000Z] [INFO ] [main] app <req-1 db> - hi"
        );
    }
}
