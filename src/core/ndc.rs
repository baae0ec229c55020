//! Nested diagnostic context
//!
//! This module provides:
//! - `DiagnosticContext`: one entry of a thread's context stack
//! - `Ndc`: operations on the calling thread's stack
//! - `NdcGuard`: RAII guard for a scoped push
//!
//! Every thread owns its stack exclusively, so no operation locks. The top
//! entry's full message is what [`LogEntry`](super::LogEntry) captures.
//!
//! # Example
//!
//! ```
//! use hierarchical_logger::Ndc;
//!
//! Ndc::push("request-42");
//! {
//!     let _guard = Ndc::scoped("db");
//!     assert_eq!(Ndc::get(), "request-42 db");
//! }
//! assert_eq!(Ndc::get(), "request-42");
//! assert_eq!(Ndc::pop(), "request-42");
//! assert_eq!(Ndc::pop(), "");
//! ```

use super::log_level::LogLevel;
use super::loglog;
use super::thread_data::{with_thread_data, PerThreadData};
use serde::{Deserialize, Serialize};

/// One level of nested context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticContext {
    message: String,
    full_message: String,
}

impl DiagnosticContext {
    /// Build a context nested under `parent`, or a bottom entry when `None`
    pub fn new(message: impl Into<String>, parent: Option<&DiagnosticContext>) -> Self {
        let message = message.into();
        let full_message = match parent {
            Some(parent) => format!("{} {}", parent.full_message, message),
            None => message.clone(),
        };
        Self {
            message,
            full_message,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// This entry's message prefixed by every entry below it
    pub fn full_message(&self) -> &str {
        &self.full_message
    }
}

/// A thread's context stack, bottom first
pub type DiagnosticContextStack = Vec<DiagnosticContext>;

/// Operations on the calling thread's diagnostic context stack.
///
/// Failures to reach thread-local state are reported through the
/// process-wide reporter and the call behaves as on an empty stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ndc;

impl Ndc {
    fn access<R>(operation: &str, fallback: R, f: impl FnOnce(&mut PerThreadData) -> R) -> R {
        match with_thread_data(operation, f) {
            Ok(value) => value,
            Err(e) => {
                loglog::report(LogLevel::Error, &format!("Ndc::{}() - {}", operation, e));
                fallback
            }
        }
    }

    pub fn push(message: impl Into<String>) {
        let message = message.into();
        Self::access("push", (), |data| {
            let context = DiagnosticContext::new(message, data.ndc.last());
            data.ndc.push(context);
        });
    }

    /// Remove the top entry and return its short message, or `""` when empty
    pub fn pop() -> String {
        Self::access("pop", String::new(), |data| {
            data.ndc.pop().map(|context| context.message).unwrap_or_default()
        })
    }

    pub fn pop_void() {
        Self::access("pop_void", (), |data| {
            data.ndc.pop();
        });
    }

    /// Short message of the top entry, or `""` when empty
    pub fn peek() -> String {
        Self::access("peek", String::new(), |data| {
            data.ndc
                .last()
                .map(|context| context.message.clone())
                .unwrap_or_default()
        })
    }

    /// Full message of the top entry, or `""` when empty
    pub fn get() -> String {
        Self::access("get", String::new(), |data| {
            data.ndc
                .last()
                .map(|context| context.full_message.clone())
                .unwrap_or_default()
        })
    }

    pub fn depth() -> usize {
        Self::access("depth", 0, |data| data.ndc.len())
    }

    pub fn clear() {
        Self::access("clear", (), |data| data.ndc.clear());
    }

    /// Empty the stack and release its storage
    pub fn remove() {
        Self::access("remove", (), |data| data.ndc = Vec::new());
    }

    /// Independent copy of the whole stack, for seeding another thread
    pub fn clone_stack() -> DiagnosticContextStack {
        Self::access("clone_stack", Vec::new(), |data| data.ndc.clone())
    }

    /// Replace this thread's stack with a copy of `stack`
    pub fn inherit(stack: &[DiagnosticContext]) {
        Self::access("inherit", (), |data| data.ndc = stack.to_vec());
    }

    /// Drop entries from the top until at most `max_depth` remain
    pub fn set_max_depth(max_depth: usize) {
        Self::access("set_max_depth", (), |data| data.ndc.truncate(max_depth));
    }

    /// Push `message` for the lifetime of the returned guard
    #[must_use = "the context is popped as soon as the guard is dropped"]
    pub fn scoped(message: impl Into<String>) -> NdcGuard {
        NdcGuard::new(message)
    }
}

/// RAII guard for a scoped NDC entry
///
/// Pushes on creation and pops when dropped, including during unwinding.
#[derive(Debug)]
pub struct NdcGuard {
    _private: (),
}

impl NdcGuard {
    pub fn new(message: impl Into<String>) -> Self {
        Ndc::push(message);
        Self { _private: () }
    }
}

impl Drop for NdcGuard {
    fn drop(&mut self) {
        Ndc::pop_void();
    }
}
