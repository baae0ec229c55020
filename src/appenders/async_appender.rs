//! Queue-backed wrapper that moves appender I/O onto a worker thread

use crate::core::loglog;
use crate::core::{Appender, LogEntry, LogLevel, LoggerError, Result, SharedAppender};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

const BATCH_SIZE: usize = 50;

enum Command {
    Append(LogEntry),
    Flush(Sender<Result<()>>),
}

/// Forwards entries to `inner` from a dedicated thread.
///
/// `append` only enqueues a copy of the entry. When the queue is full the
/// entry is dropped and `QueueFull` is returned for the dispatcher to report.
/// `close` stops intake, drains what is queued and closes `inner`.
///
/// # Examples
///
/// ```
/// use hierarchical_logger::appenders::{AsyncAppender, ConsoleAppender};
/// use hierarchical_logger::Hierarchy;
/// use std::sync::Arc;
///
/// let hierarchy = Hierarchy::new();
/// let console = Arc::new(ConsoleAppender::with_colors(false));
/// hierarchy.root().add_appender(Arc::new(AsyncAppender::new(console, 1024)));
/// hierarchy.get_logger("app").info("queued");
/// hierarchy.shutdown();
/// ```
pub struct AsyncAppender {
    name: String,
    capacity: usize,
    sender: RwLock<Option<Sender<Command>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    inner: SharedAppender,
    dropped: AtomicU64,
}

impl AsyncAppender {
    pub fn new(inner: SharedAppender, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        let target = inner.clone();
        let worker = thread::Builder::new()
            .name(format!("async-{}", inner.name()))
            .spawn(move || run_worker(receiver, target));

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(e) => {
                loglog::report(
                    LogLevel::Error,
                    &format!("Failed to start async worker for '{}': {}", inner.name(), e),
                );
                None
            }
        };
        // Without a worker nothing would drain the queue
        let sender = worker.as_ref().map(|_| sender);

        Self {
            name: format!("async({})", inner.name()),
            capacity,
            sender: RwLock::new(sender),
            worker: Mutex::new(worker),
            inner,
            dropped: AtomicU64::new(0),
        }
    }

    pub fn with_default_capacity(inner: SharedAppender) -> Self {
        Self::new(inner, DEFAULT_QUEUE_CAPACITY)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries discarded because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn pending(&self) -> usize {
        self.sender.read().as_ref().map_or(0, |s| s.len())
    }

    pub fn inner(&self) -> &SharedAppender {
        &self.inner
    }
}

fn run_worker(receiver: Receiver<Command>, target: SharedAppender) {
    let mut batch = Vec::with_capacity(BATCH_SIZE);

    // Exits once every sender is gone and the queue is drained
    while let Ok(command) = receiver.recv() {
        batch.push(command);
        while batch.len() < BATCH_SIZE {
            match receiver.try_recv() {
                Ok(command) => batch.push(command),
                Err(_) => break,
            }
        }

        for command in batch.drain(..) {
            match command {
                Command::Append(entry) => {
                    if let Err(e) = target.append(&entry) {
                        loglog::report(
                            LogLevel::Error,
                            &format!("Appender '{}' failed: {}", target.name(), e),
                        );
                    }
                }
                Command::Flush(ack) => {
                    let _ = ack.send(target.flush());
                }
            }
        }
    }
}

impl Appender for AsyncAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        let sender = self.sender.read();
        let sender = sender
            .as_ref()
            .ok_or_else(|| LoggerError::appender_closed(&self.name))?;

        match sender.try_send(Command::Append(entry.clone())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                Err(LoggerError::queue_full(sender.len(), self.capacity))
            }
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::appender_closed(&self.name)),
        }
    }

    /// Wait until everything queued before this call has been written and
    /// the inner appender flushed
    fn flush(&self) -> Result<()> {
        let (ack, done) = bounded(1);
        {
            let sender = self.sender.read();
            let Some(sender) = sender.as_ref() else {
                return Ok(());
            };
            if sender.send(Command::Flush(ack)).is_err() {
                return Err(LoggerError::appender_closed(&self.name));
            }
        }
        done.recv()
            .map_err(|_| LoggerError::appender_write(&self.name, "worker exited before flushing"))?
    }

    fn close(&self) {
        drop(self.sender.write().take());

        if let Some(handle) = self.worker.lock().take() {
            if handle.join().is_err() {
                loglog::report(
                    LogLevel::Error,
                    &format!("Async worker for '{}' panicked during close", self.name),
                );
            }
        }
        self.inner.close();
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for AsyncAppender {
    fn drop(&mut self) {
        if self.worker.get_mut().is_some() {
            self.close();
        }
    }
}
