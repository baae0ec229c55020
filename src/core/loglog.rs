//! Last-resort reporter for the logging system's own diagnostics
//!
//! The logger cannot log its own failures through itself, so internal
//! problems (appender failures, missing appenders, NDC access faults) are
//! surfaced through a [`Reporter`]. The default [`StderrReporter`] writes
//! prefixed lines to stderr.

use super::log_level::LogLevel;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Side channel for internal diagnostics.
///
/// Implementations must never call back into a hierarchy that is currently
/// dispatching, or they may recurse.
pub trait Reporter: Send + Sync {
    fn report(&self, level: LogLevel, text: &str);
}

/// Writes `[LOGGER <LEVEL>] <text>` lines to stderr.
///
/// Debug reports are dropped unless internal debugging is enabled; quiet mode
/// drops everything.
#[derive(Debug, Default)]
pub struct StderrReporter {
    quiet: AtomicBool,
    internal_debugging: AtomicBool,
}

impl StderrReporter {
    pub const fn new() -> Self {
        Self {
            quiet: AtomicBool::new(false),
            internal_debugging: AtomicBool::new(false),
        }
    }

    pub fn set_quiet_mode(&self, quiet: bool) {
        self.quiet.store(quiet, Ordering::Relaxed);
    }

    pub fn set_internal_debugging(&self, enabled: bool) {
        self.internal_debugging.store(enabled, Ordering::Relaxed);
    }

    /// Whether a report at `level` would be printed
    pub fn would_print(&self, level: LogLevel) -> bool {
        if self.quiet.load(Ordering::Relaxed) {
            return false;
        }
        level > LogLevel::Debug || self.internal_debugging.load(Ordering::Relaxed)
    }
}

impl Reporter for StderrReporter {
    fn report(&self, level: LogLevel, text: &str) {
        if self.would_print(level) {
            eprintln!("[LOGGER {}] {}", level, text);
        }
    }
}

fn global_slot() -> &'static RwLock<Arc<dyn Reporter>> {
    static SLOT: OnceLock<RwLock<Arc<dyn Reporter>>> = OnceLock::new();
    SLOT.get_or_init(|| RwLock::new(Arc::new(StderrReporter::new())))
}

/// The process-wide reporter, used by the NDC and by hierarchies that were
/// not given their own.
pub fn reporter() -> Arc<dyn Reporter> {
    Arc::clone(&global_slot().read())
}

/// Replace the process-wide reporter
pub fn set_reporter(reporter: Arc<dyn Reporter>) {
    *global_slot().write() = reporter;
}

/// Report through the process-wide reporter
pub fn report(level: LogLevel, text: &str) {
    reporter().report(level, text);
}

/// Reporter that forwards to whatever the process-wide reporter is at the
/// time of each call.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalReporter;

impl Reporter for GlobalReporter {
    fn report(&self, level: LogLevel, text: &str) {
        report(level, text);
    }
}
