//! Core logger types and traits

pub mod appender;
pub mod config;
mod dispatch;
pub mod error;
pub mod hierarchy;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod loglog;
pub mod metrics;
pub mod ndc;
pub mod runtime;
pub mod thread_data;
pub mod timestamp;

pub use appender::{Appender, SharedAppender};
pub use config::{AppenderRegistry, HierarchyBuilder, HierarchyConfig, LoggerConfig};
pub use error::{LoggerError, Result};
pub use hierarchy::{Hierarchy, ROOT_BASELINE, ROOT_NAME};
pub use log_entry::{Location, LogEntry};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use loglog::{set_reporter, GlobalReporter, Reporter, StderrReporter};
pub use metrics::DispatchMetrics;
pub use ndc::{DiagnosticContext, DiagnosticContextStack, Ndc, NdcGuard};
pub use runtime::{get_logger, initialize, root_logger, runtime, shutdown, LoggingRuntime};
pub use thread_data::{live_thread_registrations, thread_cleanup};
pub use timestamp::TimestampFormat;
