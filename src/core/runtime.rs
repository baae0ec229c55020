//! Process-wide logging runtime
//!
//! One [`LoggingRuntime`] exists per process. It is created on first use,
//! or explicitly through [`initialize`], and owns the default hierarchy.
//! Per-thread state is released by each thread's exit; [`shutdown`]
//! releases the calling thread's state before closing the hierarchy's
//! appenders.

use super::hierarchy::Hierarchy;
use super::logger::Logger;
use super::thread_data::thread_cleanup;
use std::sync::OnceLock;

static RUNTIME: OnceLock<LoggingRuntime> = OnceLock::new();

/// The process-wide logging context
#[derive(Debug)]
pub struct LoggingRuntime {
    hierarchy: Hierarchy,
}

impl LoggingRuntime {
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn get_logger(&self, name: &str) -> Logger {
        self.hierarchy.get_logger(name)
    }

    pub fn root(&self) -> Logger {
        self.hierarchy.root()
    }

    /// Release the calling thread's state, then flush, close and detach
    /// every appender of the default hierarchy.
    ///
    /// The runtime stays usable afterwards with a fresh configuration.
    pub fn shutdown(&self) {
        thread_cleanup();
        self.hierarchy.shutdown();
    }
}

/// Initialize the runtime if needed and return it.
///
/// Concurrent first calls are serialized; all callers get the same runtime.
pub fn initialize() -> &'static LoggingRuntime {
    RUNTIME.get_or_init(|| LoggingRuntime {
        hierarchy: Hierarchy::new(),
    })
}

pub fn runtime() -> &'static LoggingRuntime {
    initialize()
}

/// Logger `name` of the default hierarchy
pub fn get_logger(name: &str) -> Logger {
    initialize().get_logger(name)
}

pub fn root_logger() -> Logger {
    initialize().root()
}

/// Orderly teardown of the default hierarchy; see [`LoggingRuntime::shutdown`]
pub fn shutdown() {
    if let Some(runtime) = RUNTIME.get() {
        runtime.shutdown();
    }
}
