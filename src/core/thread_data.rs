//! Per-thread logging state
//!
//! Each thread that touches the logging system gets one [`PerThreadData`]
//! slot holding its diagnostic context stack and its cached identity. The
//! slot is allocated lazily and released by the thread-local destructor
//! when the thread ends, or earlier through [`thread_cleanup`].

use super::error::{LoggerError, Result};
use super::ndc::DiagnosticContextStack;
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_REGISTRATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static PER_THREAD: RefCell<Option<PerThreadData>> = const { RefCell::new(None) };
}

pub(crate) struct PerThreadData {
    pub(crate) ndc: DiagnosticContextStack,
    pub(crate) thread_id: String,
    pub(crate) thread_name: Option<String>,
}

impl PerThreadData {
    fn new() -> Self {
        let current = std::thread::current();
        LIVE_REGISTRATIONS.fetch_add(1, Ordering::AcqRel);
        Self {
            ndc: Vec::new(),
            thread_id: format!("{:?}", current.id()),
            thread_name: current.name().map(String::from),
        }
    }
}

impl Drop for PerThreadData {
    fn drop(&mut self) {
        LIVE_REGISTRATIONS.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Run `f` against the calling thread's data, allocating it on first use.
///
/// Fails when thread-local storage is already being torn down or when the
/// slot is re-entered from inside `f`.
pub(crate) fn with_thread_data<R>(
    operation: &str,
    f: impl FnOnce(&mut PerThreadData) -> R,
) -> Result<R> {
    PER_THREAD
        .try_with(|slot| {
            let mut slot = slot
                .try_borrow_mut()
                .map_err(|e| LoggerError::diagnostic_context(operation, e.to_string()))?;
            let data = slot.get_or_insert_with(PerThreadData::new);
            Ok(f(data))
        })
        .map_err(|e| LoggerError::diagnostic_context(operation, e.to_string()))?
}

/// Cached identity of the calling thread as `(id, name)`.
pub(crate) fn current_thread_identity() -> (String, Option<String>) {
    with_thread_data("thread identity", |data| {
        (data.thread_id.clone(), data.thread_name.clone())
    })
    .unwrap_or_else(|_| ("<unknown>".to_string(), None))
}

/// Release the calling thread's logging state now.
///
/// Safe to call repeatedly and on threads that never logged; a later logging
/// call on the same thread allocates fresh state.
pub fn thread_cleanup() {
    let released = PER_THREAD
        .try_with(|slot| slot.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
        .ok()
        .flatten();
    drop(released);
}

/// Number of threads currently holding logging state
pub fn live_thread_registrations() -> usize {
    LIVE_REGISTRATIONS.load(Ordering::Acquire)
}
