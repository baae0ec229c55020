//! # Hierarchical Logger
//!
//! A dotted-name logger hierarchy with inherited levels, additive appender
//! chains and a per-thread nested diagnostic context.
//!
//! ## Features
//!
//! - **Hierarchy**: `get_logger("a.b.c")` creates `a` and `a.b` on the way,
//!   and returns the same logger for the same name on every thread
//! - **Level Inheritance**: unset levels resolve through the nearest ancestor,
//!   with a hierarchy-wide disable floor on top
//! - **Additivity**: events travel up the ancestor chain until a
//!   non-additive logger is reached
//! - **Nested Diagnostic Context**: a per-thread stack of context strings
//!   captured into every event
//! - **Appenders**: console, file and a queue-backed async wrapper
//!
//! ## Example
//!
//! ```
//! use hierarchical_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let hierarchy = Hierarchy::new();
//! hierarchy.root().add_appender(Arc::new(ConsoleAppender::with_colors(false)));
//!
//! let db = hierarchy.get_logger("app.db");
//! let _request = Ndc::scoped("req-42");
//! db.info("connected");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    #[cfg(feature = "async")]
    pub use crate::appenders::AsyncAppender;
    #[cfg(feature = "console")]
    pub use crate::appenders::ConsoleAppender;
    #[cfg(feature = "file")]
    pub use crate::appenders::FileAppender;
    pub use crate::core::{
        Appender, Hierarchy, HierarchyBuilder, HierarchyConfig, Location, LogEntry, LogLevel,
        Logger, LoggerError, Ndc, NdcGuard, Reporter, Result, SharedAppender, TimestampFormat,
    };
}

#[cfg(feature = "async")]
pub use appenders::AsyncAppender;
#[cfg(feature = "console")]
pub use appenders::ConsoleAppender;
#[cfg(feature = "file")]
pub use appenders::FileAppender;
pub use core::{
    get_logger, initialize, live_thread_registrations, root_logger, runtime, set_reporter,
    shutdown, thread_cleanup, Appender, AppenderRegistry, DiagnosticContext,
    DiagnosticContextStack, DispatchMetrics, GlobalReporter, Hierarchy, HierarchyBuilder,
    HierarchyConfig, Location, LogEntry, LogLevel, Logger, LoggerConfig, LoggerError,
    LoggingRuntime, Ndc, NdcGuard, Reporter, Result, SharedAppender, StderrReporter,
    TimestampFormat, ROOT_BASELINE, ROOT_NAME,
};
