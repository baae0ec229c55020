//! Logging macros for ergonomic log message formatting.
//!
//! The level check runs before the message is formatted, so a disabled
//! call costs one level lookup and no allocation. The call site's file and
//! line are recorded on the entry.
//!
//! # Examples
//!
//! ```
//! use hierarchical_logger::prelude::*;
//! use hierarchical_logger::info;
//!
//! let hierarchy = Hierarchy::new();
//! let logger = hierarchy.get_logger("server");
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger::prelude::*;
/// # let logger = Hierarchy::new().get_logger("app");
/// use hierarchical_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.is_enabled_for(level) {
            logger.forced_log(
                level,
                format!($($arg)+),
                Some($crate::Location::new(file!(), line!())),
            );
        }
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger::prelude::*;
/// # let logger = Hierarchy::new().get_logger("app");
/// # logger.set_level(Some(LogLevel::Trace));
/// use hierarchical_logger::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use hierarchical_logger::prelude::*;
/// # let logger = Hierarchy::new().get_logger("app");
/// use hierarchical_logger::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
