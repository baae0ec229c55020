//! Logger hierarchy
//!
//! A [`Hierarchy`] owns every logger node of one logging domain. Nodes live
//! in an append-only arena and refer to their parent by index, so parent
//! links never own anything and nodes are never freed individually.
//!
//! Names are dotted paths: `"a.b.c"` is a child of `"a.b"`, which is a child
//! of `"a"`, which is a child of the root. Asking for a name creates every
//! missing ancestor at the same time.

use super::appender::SharedAppender;
use super::config::HierarchyBuilder;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::loglog::{GlobalReporter, Reporter};
use super::metrics::DispatchMetrics;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

pub(crate) type NodeId = usize;

pub(crate) const ROOT_ID: NodeId = 0;

/// Name reported by the root logger
pub const ROOT_NAME: &str = "root";

/// Level the root logger starts with and returns to on reset
pub const ROOT_BASELINE: LogLevel = LogLevel::Debug;

/// One named logger's configuration
pub(crate) struct LoggerNode {
    pub(crate) name: String,
    pub(crate) parent: Option<NodeId>,
    level: AtomicU8,
    additive: AtomicBool,
    pub(crate) appenders: RwLock<Vec<SharedAppender>>,
}

impl LoggerNode {
    fn new(name: String, parent: Option<NodeId>, level: Option<LogLevel>) -> Self {
        Self {
            name,
            parent,
            level: AtomicU8::new(LogLevel::encode(level)),
            additive: AtomicBool::new(true),
            appenders: RwLock::new(Vec::new()),
        }
    }

    #[inline]
    pub(crate) fn level(&self) -> Option<LogLevel> {
        LogLevel::decode(self.level.load(Ordering::Acquire))
    }

    #[inline]
    pub(crate) fn store_level(&self, level: Option<LogLevel>) {
        self.level.store(LogLevel::encode(level), Ordering::Release);
    }

    #[inline]
    pub(crate) fn additive(&self) -> bool {
        self.additive.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn store_additive(&self, additive: bool) {
        self.additive.store(additive, Ordering::Release);
    }

    pub(crate) fn is_root(&self) -> bool {
        self.parent.is_none()
    }

}

pub(crate) struct Arena {
    index: HashMap<String, NodeId>,
    pub(crate) nodes: Vec<Arc<LoggerNode>>,
}

impl Arena {
    fn get_or_insert(&mut self, name: &str, parent: NodeId) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes
            .push(Arc::new(LoggerNode::new(name.to_string(), Some(parent), None)));
        self.index.insert(name.to_string(), id);
        id
    }
}

pub(crate) struct HierarchyInner {
    pub(crate) arena: RwLock<Arena>,
    disable_floor: AtomicU8,
    pub(crate) emitted_no_appender_warning: AtomicBool,
    pub(crate) reporter: Arc<dyn Reporter>,
    pub(crate) metrics: DispatchMetrics,
}

impl HierarchyInner {
    #[inline]
    pub(crate) fn disable_floor(&self) -> Option<LogLevel> {
        LogLevel::decode(self.disable_floor.load(Ordering::Acquire))
    }

    pub(crate) fn report(&self, level: LogLevel, text: &str) {
        self.reporter.report(level, text);
    }

    /// Every node at the time of the call, in creation order
    pub(crate) fn snapshot_nodes(&self) -> Vec<Arc<LoggerNode>> {
        self.arena.read().nodes.clone()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<Arc<LoggerNode>> {
        self.arena.read().nodes.get(id).cloned()
    }

    /// Close every appender attached to `scope` or one of its descendants
    pub(crate) fn close_appenders_within(&self, scope: NodeId) {
        let nodes = self.snapshot_nodes();
        for (id, node) in nodes.iter().enumerate() {
            if !is_within(&nodes, id, scope) {
                continue;
            }
            let appenders = node.appenders.read().clone();
            for appender in appenders {
                appender.close();
            }
        }
    }
}

/// Whether `id` is `scope` itself or one of its descendants
fn is_within(nodes: &[Arc<LoggerNode>], id: NodeId, scope: NodeId) -> bool {
    let mut current = Some(id);
    while let Some(c) = current {
        if c == scope {
            return true;
        }
        current = nodes.get(c).and_then(|node| node.parent);
    }
    false
}

/// Registry of all loggers of one logging domain.
///
/// Cloning is cheap and yields a handle to the same hierarchy.
///
/// # Example
///
/// ```
/// use hierarchical_logger::{Hierarchy, LogLevel};
///
/// let hierarchy = Hierarchy::new();
/// let db = hierarchy.get_logger("app.db");
/// hierarchy.get_logger("app").set_level(Some(LogLevel::Warn));
///
/// assert_eq!(db.chained_level().unwrap(), LogLevel::Warn);
/// assert!(!db.is_enabled_for(LogLevel::Info));
/// assert_eq!(db.parent().unwrap().name(), "app");
/// ```
#[derive(Clone)]
pub struct Hierarchy {
    inner: Arc<HierarchyInner>,
}

impl Hierarchy {
    /// Create a hierarchy that reports through the process-wide reporter
    #[must_use]
    pub fn new() -> Self {
        Self::with_reporter(Arc::new(GlobalReporter))
    }

    #[must_use]
    pub fn with_reporter(reporter: Arc<dyn Reporter>) -> Self {
        let root = LoggerNode::new(ROOT_NAME.to_string(), None, Some(ROOT_BASELINE));
        Self {
            inner: Arc::new(HierarchyInner {
                arena: RwLock::new(Arena {
                    index: HashMap::new(),
                    nodes: vec![Arc::new(root)],
                }),
                disable_floor: AtomicU8::new(LogLevel::encode(None)),
                emitted_no_appender_warning: AtomicBool::new(false),
                reporter,
                metrics: DispatchMetrics::new(),
            }),
        }
    }

    #[must_use]
    pub fn builder() -> HierarchyBuilder {
        HierarchyBuilder::new()
    }

    /// Return the logger called `name`, creating it and its ancestors if needed.
    ///
    /// The empty name yields the root logger. Concurrent calls for the same
    /// name all receive the same logger.
    pub fn get_logger(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.root();
        }

        {
            let arena = self.inner.arena.read();
            if let Some(&id) = arena.index.get(name) {
                if let Some(node) = arena.nodes.get(id) {
                    return Logger::from_parts(Arc::clone(&self.inner), Arc::clone(node), id);
                }
            }
        }

        let mut arena = self.inner.arena.write();
        let mut parent = ROOT_ID;
        for (dot, _) in name.match_indices('.') {
            let prefix = &name[..dot];
            if !prefix.is_empty() {
                parent = arena.get_or_insert(prefix, parent);
            }
        }
        let id = arena.get_or_insert(name, parent);
        let node = Arc::clone(&arena.nodes[id]);
        drop(arena);

        Logger::from_parts(Arc::clone(&self.inner), node, id)
    }

    pub fn root(&self) -> Logger {
        let node = Arc::clone(&self.inner.arena.read().nodes[ROOT_ID]);
        Logger::from_parts(Arc::clone(&self.inner), node, ROOT_ID)
    }

    /// Whether a logger called `name` has been created, without creating it
    pub fn exists(&self, name: &str) -> bool {
        self.inner.arena.read().index.contains_key(name)
    }

    /// Every logger except the root, in creation order
    pub fn current_loggers(&self) -> Vec<Logger> {
        self.inner
            .snapshot_nodes()
            .into_iter()
            .enumerate()
            .skip(1)
            .map(|(id, node)| Logger::from_parts(Arc::clone(&self.inner), node, id))
            .collect()
    }

    /// Entries below `floor` are rejected by every logger. `None` lifts it.
    pub fn set_disable_floor(&self, floor: Option<LogLevel>) {
        self.inner
            .disable_floor
            .store(LogLevel::encode(floor), Ordering::Release);
    }

    pub fn disable_floor(&self) -> Option<LogLevel> {
        self.inner.disable_floor()
    }

    /// Whether `level` is below the disable floor
    pub fn is_disabled(&self, level: LogLevel) -> bool {
        self.disable_floor().is_some_and(|floor| level < floor)
    }

    pub fn disable_all(&self) {
        self.set_disable_floor(Some(LogLevel::Off));
    }

    /// Reject `Trace` and `Debug` everywhere
    pub fn disable_debug(&self) {
        self.set_disable_floor(Some(LogLevel::Info));
    }

    /// Reject everything below `Warn` everywhere
    pub fn disable_info(&self) {
        self.set_disable_floor(Some(LogLevel::Warn));
    }

    pub fn enable_all(&self) {
        self.set_disable_floor(None);
    }

    /// Return every logger to its default configuration.
    ///
    /// Appenders are closed and detached, levels cleared (the root goes back
    /// to [`ROOT_BASELINE`]), additivity restored, the disable floor lifted and
    /// the no-appender warning re-armed. Loggers keep their identity.
    pub fn reset_configuration(&self) {
        for node in self.inner.snapshot_nodes() {
            let detached = std::mem::take(&mut *node.appenders.write());
            for appender in detached {
                appender.close();
            }
            let level = if node.is_root() {
                Some(ROOT_BASELINE)
            } else {
                None
            };
            node.store_level(level);
            node.store_additive(true);
        }
        self.enable_all();
        self.inner
            .emitted_no_appender_warning
            .store(false, Ordering::Release);
    }

    /// Flush and close every appender, then reset the configuration
    pub fn shutdown(&self) {
        for node in self.inner.snapshot_nodes() {
            let appenders = node.appenders.read().clone();
            for appender in appenders {
                if let Err(e) = appender.flush() {
                    self.inner.report(
                        LogLevel::Error,
                        &format!("Appender '{}' flush failed during shutdown: {}", appender.name(), e),
                    );
                }
                appender.close();
            }
        }
        self.reset_configuration();
    }

    /// Whether the one-shot "no appenders" warning has fired since the last reset
    pub fn emitted_no_appender_warning(&self) -> bool {
        self.inner
            .emitted_no_appender_warning
            .load(Ordering::Acquire)
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.inner.metrics
    }

    pub fn reporter(&self) -> Arc<dyn Reporter> {
        Arc::clone(&self.inner.reporter)
    }

    pub(crate) fn from_inner(inner: Arc<HierarchyInner>) -> Self {
        Self { inner }
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hierarchy")
            .field("loggers", &self.inner.arena.read().nodes.len())
            .field("disable_floor", &self.disable_floor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;

    #[test]
    fn test_get_logger_creates_ancestors() {
        let hierarchy = Hierarchy::new();
        let leaf = hierarchy.get_logger("x.y.z");

        assert!(hierarchy.exists("x"));
        assert!(hierarchy.exists("x.y"));
        assert_eq!(leaf.parent().unwrap().name(), "x.y");
        assert_eq!(leaf.parent().unwrap().parent().unwrap().name(), "x");
        assert_eq!(
            leaf.parent().unwrap().parent().unwrap().parent().unwrap(),
            hierarchy.root()
        );
        assert_eq!(hierarchy.current_loggers().len(), 3);
    }

    #[test]
    fn test_get_logger_is_idempotent() {
        let hierarchy = Hierarchy::new();
        let a = hierarchy.get_logger("svc.api");
        let b = hierarchy.get_logger("svc.api");
        assert_eq!(a, b);
        assert_ne!(a, hierarchy.get_logger("svc"));
    }

    #[test]
    fn test_empty_name_is_root() {
        let hierarchy = Hierarchy::new();
        let root = hierarchy.get_logger("");
        assert_eq!(root, hierarchy.root());
        assert_eq!(root.name(), ROOT_NAME);
        assert!(root.parent().is_none());
        assert_eq!(root.level(), Some(ROOT_BASELINE));
    }

    #[test]
    fn test_odd_names_link_to_nearest_prefix() {
        let hierarchy = Hierarchy::new();
        assert_eq!(hierarchy.get_logger(".lead").parent().unwrap(), hierarchy.root());
        assert_eq!(hierarchy.get_logger("a..b").parent().unwrap().name(), "a.");
        assert_eq!(hierarchy.get_logger("a.").parent().unwrap().name(), "a");
    }

    #[test]
    fn test_loggers_of_distinct_hierarchies_differ() {
        let first = Hierarchy::new();
        let second = Hierarchy::new();
        assert_ne!(first.get_logger("a"), second.get_logger("a"));
    }

    #[test]
    fn test_disable_helpers() {
        let hierarchy = Hierarchy::new();
        hierarchy.disable_debug();
        assert!(hierarchy.is_disabled(LogLevel::Debug));
        assert!(!hierarchy.is_disabled(LogLevel::Info));

        hierarchy.disable_info();
        assert!(hierarchy.is_disabled(LogLevel::Info));
        assert!(!hierarchy.is_disabled(LogLevel::Warn));

        hierarchy.disable_all();
        assert!(hierarchy.is_disabled(LogLevel::Fatal));

        hierarchy.enable_all();
        assert_eq!(hierarchy.disable_floor(), None);
        assert!(!hierarchy.is_disabled(LogLevel::Trace));
    }

    #[test]
    fn test_unset_root_is_an_invariant_violation() {
        let hierarchy = Hierarchy::new();
        let leaf = hierarchy.get_logger("a.b");
        hierarchy.root().node().store_level(None);

        assert!(matches!(
            leaf.chained_level(),
            Err(LoggerError::HierarchyInvariant { .. })
        ));
        assert!(!leaf.is_enabled_for(LogLevel::Fatal));

        hierarchy.reset_configuration();
        assert_eq!(leaf.chained_level().unwrap(), ROOT_BASELINE);
    }

    #[test]
    fn test_reset_configuration_keeps_identity() {
        let hierarchy = Hierarchy::new();
        let a = hierarchy.get_logger("a");
        a.set_level(Some(LogLevel::Error));
        a.set_additivity(false);
        hierarchy.root().set_level(Some(LogLevel::Fatal));
        hierarchy.disable_info();

        hierarchy.reset_configuration();

        assert_eq!(hierarchy.get_logger("a"), a);
        assert_eq!(a.level(), None);
        assert!(a.additivity());
        assert_eq!(hierarchy.root().level(), Some(ROOT_BASELINE));
        assert_eq!(hierarchy.disable_floor(), None);
    }
}
