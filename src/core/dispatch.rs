//! Level resolution and appender dispatch
//!
//! These run on every logging call. Level checks read atomics under the
//! arena's shared lock; dispatch snapshots the appender chain under shared
//! locks and invokes it with no lock held, so an appender may itself log or
//! reconfigure the hierarchy.

use super::appender::SharedAppender;
use super::error::{LoggerError, Result};
use super::hierarchy::{HierarchyInner, LoggerNode, NodeId};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use std::any::Any;
use std::sync::atomic::Ordering;

impl HierarchyInner {
    /// First level set on `id` or one of its ancestors.
    ///
    /// Unset levels are skipped on the way up; only the root is required to
    /// have one, and reaching an unset root is reported as a broken invariant.
    pub(crate) fn chained_level(&self, id: NodeId, node: &LoggerNode) -> Result<LogLevel> {
        if let Some(level) = node.level() {
            return Ok(level);
        }

        let resolved = {
            let arena = self.arena.read();
            let mut current = Some(id);
            let mut found = None;
            while let Some(c) = current {
                let Some(n) = arena.nodes.get(c) else { break };
                if let Some(level) = n.level() {
                    found = Some(level);
                    break;
                }
                current = n.parent;
            }
            found
        };

        resolved.ok_or_else(|| {
            let err = LoggerError::hierarchy_invariant(node.name.as_str());
            self.report(LogLevel::Error, &format!("Logger::chained_level() - {}", err));
            err
        })
    }

    #[inline]
    pub(crate) fn is_enabled_for(&self, id: NodeId, node: &LoggerNode, level: LogLevel) -> bool {
        if let Some(floor) = self.disable_floor() {
            if level < floor {
                return false;
            }
        }
        match self.chained_level(id, node) {
            Ok(threshold) => level >= threshold,
            Err(_) => false,
        }
    }

    /// Appenders reached from `id`, in call order, stopping after the first
    /// non-additive node
    fn appender_chain(&self, id: NodeId) -> Vec<SharedAppender> {
        let arena = self.arena.read();
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let Some(node) = arena.nodes.get(c) else { break };
            chain.extend(node.appenders.read().iter().cloned());
            if !node.additive() {
                break;
            }
            current = node.parent;
        }
        chain
    }

    /// Deliver `entry` to every appender reachable from `id`.
    ///
    /// Returns the number of appenders invoked. Failing or panicking
    /// appenders are reported and skipped; the rest of the chain still runs.
    pub(crate) fn call_appenders(&self, id: NodeId, logger_name: &str, entry: &LogEntry) -> usize {
        self.metrics.record_dispatched();
        let chain = self.appender_chain(id);

        for appender in &chain {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match outcome {
                Ok(Ok(())) => {
                    self.metrics.record_write();
                }
                Ok(Err(e)) => {
                    self.metrics.record_failure();
                    self.report(
                        LogLevel::Error,
                        &format!("Appender '{}' failed: {}", appender.name(), e),
                    );
                }
                Err(panic_info) => {
                    self.metrics.record_failure();
                    let err = LoggerError::appender_panicked(
                        appender.name(),
                        panic_message(panic_info.as_ref()),
                    );
                    self.report(
                        LogLevel::Error,
                        &format!("{}. Other appenders continue to function.", err),
                    );
                }
            }
        }

        if chain.is_empty() {
            self.metrics.record_unrouted();
            if !self
                .emitted_no_appender_warning
                .swap(true, Ordering::AcqRel)
            {
                self.report(
                    LogLevel::Error,
                    &format!("{}.", LoggerError::no_appenders(logger_name)),
                );
                self.report(
                    LogLevel::Error,
                    "Please initialize the logging system properly.",
                );
            }
        }

        chain.len()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
