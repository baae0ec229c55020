//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Walked the whole chain without finding a level; the root is misconfigured
    #[error("No valid log level found for logger '{logger}'")]
    HierarchyInvariant { logger: String },

    /// An appender could not persist an entry
    #[error("Appender '{appender}' failed to write: {message}")]
    AppenderWrite { appender: String, message: String },

    /// Write attempted after `close()`
    #[error("Appender '{appender}' is closed")]
    AppenderClosed { appender: String },

    /// An appender panicked while handling an entry
    #[error("Appender '{appender}' panicked: {message}")]
    AppenderPanicked { appender: String, message: String },

    /// No appender was reachable from the logger
    #[error("No appenders could be found for logger ({logger})")]
    NoAppenders { logger: String },

    /// The calling thread's diagnostic context could not be accessed
    #[error("Diagnostic context failure in {operation}: {message}")]
    DiagnosticContext { operation: String, message: String },

    /// Async appender queue full
    #[error("Log queue full: {current}/{max} messages buffered")]
    QueueFull { current: usize, max: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a hierarchy invariant error for the logger whose walk failed
    pub fn hierarchy_invariant(logger: impl Into<String>) -> Self {
        LoggerError::HierarchyInvariant {
            logger: logger.into(),
        }
    }

    /// Create an appender write error
    pub fn appender_write(appender: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderWrite {
            appender: appender.into(),
            message: message.into(),
        }
    }

    /// Create an appender closed error
    pub fn appender_closed(appender: impl Into<String>) -> Self {
        LoggerError::AppenderClosed {
            appender: appender.into(),
        }
    }

    /// Create an appender panic error
    pub fn appender_panicked(appender: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::AppenderPanicked {
            appender: appender.into(),
            message: message.into(),
        }
    }

    /// Create a no-appenders error
    pub fn no_appenders(logger: impl Into<String>) -> Self {
        LoggerError::NoAppenders {
            logger: logger.into(),
        }
    }

    /// Create a diagnostic context error
    pub fn diagnostic_context(operation: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DiagnosticContext {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a queue full error with buffer details
    pub fn queue_full(current: usize, max: usize) -> Self {
        LoggerError::QueueFull { current, max }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
