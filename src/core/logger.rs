//! Named logger handles

use super::{
    appender::{same_appender, SharedAppender},
    error::Result,
    hierarchy::{Hierarchy, HierarchyInner, LoggerNode, NodeId},
    log_entry::{LogEntry, Location},
    log_level::LogLevel,
};
use std::fmt;
use std::sync::Arc;

/// Handle to one logger of a [`Hierarchy`].
///
/// Handles are cheap to clone. Two handles are equal when they refer to the
/// same logger of the same hierarchy.
///
/// # Example
///
/// ```
/// use hierarchical_logger::{Hierarchy, LogLevel};
///
/// let hierarchy = Hierarchy::new();
/// let logger = hierarchy.get_logger("app.http");
/// logger.set_level(Some(LogLevel::Info));
///
/// logger.debug("suppressed");
/// logger.info("request served");
/// ```
#[derive(Clone)]
pub struct Logger {
    hierarchy: Arc<HierarchyInner>,
    node: Arc<LoggerNode>,
    id: NodeId,
}

impl Logger {
    pub(crate) fn from_parts(hierarchy: Arc<HierarchyInner>, node: Arc<LoggerNode>, id: NodeId) -> Self {
        Self {
            hierarchy,
            node,
            id,
        }
    }

    #[cfg(test)]
    pub(crate) fn node(&self) -> &LoggerNode {
        &self.node
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn is_root(&self) -> bool {
        self.node.is_root()
    }

    pub fn parent(&self) -> Option<Logger> {
        let parent_id = self.node.parent?;
        let parent = self.hierarchy.node(parent_id)?;
        Some(Self::from_parts(Arc::clone(&self.hierarchy), parent, parent_id))
    }

    pub fn hierarchy(&self) -> Hierarchy {
        Hierarchy::from_inner(Arc::clone(&self.hierarchy))
    }

    /// This logger's own level; `None` means it inherits
    pub fn level(&self) -> Option<LogLevel> {
        self.node.level()
    }

    /// Assign or clear this logger's own level.
    ///
    /// The root must always have a level, so clearing it is reported and
    /// ignored.
    pub fn set_level(&self, level: Option<LogLevel>) {
        if level.is_none() && self.is_root() {
            self.hierarchy.report(
                LogLevel::Error,
                "Logger::set_level() - the root logger cannot be assigned an unset level; ignored",
            );
            return;
        }
        self.node.store_level(level);
    }

    /// The level in effect: this logger's own, else the nearest ancestor's
    pub fn chained_level(&self) -> Result<LogLevel> {
        self.hierarchy.chained_level(self.id, &self.node)
    }

    /// Whether an entry at `level` would be dispatched
    #[inline]
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.hierarchy.is_enabled_for(self.id, &self.node, level)
    }

    /// Log `message` at `level`, recording the caller's file and line.
    ///
    /// Nothing is built when the level is disabled.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if self.is_enabled_for(level) {
            self.forced_log(level, message, Some(Location::caller()));
        }
    }

    /// Build and dispatch an entry without checking levels
    pub fn forced_log(&self, level: LogLevel, message: impl Into<String>, location: Option<Location>) {
        let entry = LogEntry::new(self.name(), level, message, location);
        self.call_appenders(&entry);
    }

    /// Deliver an already built entry to this logger's appender chain.
    ///
    /// Returns how many appenders were invoked.
    pub fn call_appenders(&self, entry: &LogEntry) -> usize {
        self.hierarchy.call_appenders(self.id, self.name(), entry)
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    pub fn additivity(&self) -> bool {
        self.node.additive()
    }

    /// When `false`, ancestors' appenders no longer see this logger's entries
    pub fn set_additivity(&self, additive: bool) {
        self.node.store_additive(additive);
    }

    /// Attach `appender`; attaching the same appender twice is a no-op
    pub fn add_appender(&self, appender: SharedAppender) {
        let mut appenders = self.node.appenders.write();
        if !appenders.iter().any(|a| same_appender(a, &appender)) {
            appenders.push(appender);
        }
    }

    /// Detach `appender`, returning whether it was attached
    pub fn remove_appender(&self, appender: &SharedAppender) -> bool {
        let mut appenders = self.node.appenders.write();
        let before = appenders.len();
        appenders.retain(|a| !same_appender(a, appender));
        appenders.len() != before
    }

    /// Detach the first appender called `name` and return it
    pub fn remove_appender_by_name(&self, name: &str) -> Option<SharedAppender> {
        let mut appenders = self.node.appenders.write();
        let position = appenders.iter().position(|a| a.name() == name)?;
        Some(appenders.remove(position))
    }

    pub fn remove_all_appenders(&self) {
        self.node.appenders.write().clear();
    }

    /// Appenders attached to this logger, in call order
    pub fn appenders(&self) -> Vec<SharedAppender> {
        self.node.appenders.read().clone()
    }

    pub fn appender(&self, name: &str) -> Option<SharedAppender> {
        self.node
            .appenders
            .read()
            .iter()
            .find(|a| a.name() == name)
            .cloned()
    }

    pub fn is_attached(&self, appender: &SharedAppender) -> bool {
        self.node
            .appenders
            .read()
            .iter()
            .any(|a| same_appender(a, appender))
    }

    /// Close every appender attached to this logger or any logger below it.
    ///
    /// Appenders stay attached; closing is idempotent.
    pub fn close_nested_appenders(&self) {
        self.hierarchy.close_appenders_within(self.id);
    }
}

impl PartialEq for Logger {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.hierarchy, &other.hierarchy) && self.id == other.id
    }
}

impl Eq for Logger {}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("additive", &self.additivity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::appender::Appender;
    use crate::core::error::LoggerError;
    use crate::core::loglog::Reporter;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Recording {
        name: String,
        seen: Arc<Mutex<Vec<String>>>,
        closed: AtomicBool,
    }

    impl Recording {
        fn shared(name: &str, seen: &Arc<Mutex<Vec<String>>>) -> SharedAppender {
            Arc::new(Self {
                name: name.to_string(),
                seen: Arc::clone(seen),
                closed: AtomicBool::new(false),
            })
        }
    }

    impl Appender for Recording {
        fn append(&self, entry: &LogEntry) -> Result<()> {
            if self.closed.load(Ordering::Acquire) {
                return Err(LoggerError::appender_closed(&self.name));
            }
            self.seen
                .lock()
                .push(format!("{}:{}", self.name, entry.message()));
            Ok(())
        }

        fn close(&self) {
            self.closed.store(true, Ordering::Release);
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[derive(Default)]
    struct Silent;

    impl Reporter for Silent {
        fn report(&self, _level: LogLevel, _text: &str) {}
    }

    fn quiet_hierarchy() -> Hierarchy {
        Hierarchy::with_reporter(Arc::new(Silent))
    }

    #[test]
    fn test_chained_level_inherits() {
        let hierarchy = quiet_hierarchy();
        let leaf = hierarchy.get_logger("a.b.c");
        assert_eq!(leaf.chained_level().unwrap(), LogLevel::Debug);

        hierarchy.get_logger("a").set_level(Some(LogLevel::Error));
        assert_eq!(leaf.chained_level().unwrap(), LogLevel::Error);

        leaf.set_level(Some(LogLevel::Trace));
        assert_eq!(leaf.chained_level().unwrap(), LogLevel::Trace);
    }

    #[test]
    fn test_root_rejects_unset_level() {
        let hierarchy = quiet_hierarchy();
        let root = hierarchy.root();
        root.set_level(None);
        assert_eq!(root.level(), Some(LogLevel::Debug));

        root.set_level(Some(LogLevel::Warn));
        assert_eq!(root.level(), Some(LogLevel::Warn));
    }

    #[test]
    fn test_disabled_level_builds_nothing() {
        let hierarchy = quiet_hierarchy();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let logger = hierarchy.get_logger("svc");
        logger.add_appender(Recording::shared("rec", &seen));
        logger.set_level(Some(LogLevel::Warn));

        logger.info("dropped");
        logger.warn("kept");
        logger.fatal("kept too");

        assert_eq!(*seen.lock(), vec!["rec:kept", "rec:kept too"]);
        assert_eq!(hierarchy.metrics().dispatched(), 2);
    }

    #[test]
    fn test_add_appender_rejects_duplicates() {
        let hierarchy = quiet_hierarchy();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let appender = Recording::shared("rec", &seen);
        let logger = hierarchy.get_logger("svc");

        logger.add_appender(Arc::clone(&appender));
        logger.add_appender(Arc::clone(&appender));
        assert_eq!(logger.appenders().len(), 1);
        assert!(logger.is_attached(&appender));

        logger.info("once");
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_remove_appenders() {
        let hierarchy = quiet_hierarchy();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let first = Recording::shared("first", &seen);
        let second = Recording::shared("second", &seen);
        let logger = hierarchy.get_logger("svc");
        logger.add_appender(Arc::clone(&first));
        logger.add_appender(Arc::clone(&second));

        assert!(logger.appender("second").is_some());
        assert!(logger.remove_appender(&first));
        assert!(!logger.remove_appender(&first));
        assert!(logger.remove_appender_by_name("second").is_some());
        assert!(logger.remove_appender_by_name("second").is_none());
        assert!(logger.appenders().is_empty());

        logger.add_appender(first);
        logger.remove_all_appenders();
        assert!(logger.appenders().is_empty());
    }

    #[test]
    fn test_close_nested_appenders_scope() {
        let hierarchy = quiet_hierarchy();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let inside = hierarchy.get_logger("app.db");
        let sibling = hierarchy.get_logger("app2");
        inside.add_appender(Recording::shared("inside", &seen));
        sibling.add_appender(Recording::shared("sibling", &seen));

        hierarchy.get_logger("app").close_nested_appenders();

        inside.info("lost");
        sibling.info("delivered");
        assert_eq!(*seen.lock(), vec!["sibling:delivered"]);
        assert_eq!(hierarchy.metrics().appender_failures(), 1);
    }

    #[test]
    fn test_close_nested_appenders_on_logger_named_root() {
        let hierarchy = quiet_hierarchy();
        let seen = Arc::new(Mutex::new(Vec::new()));
        hierarchy.root().add_appender(Recording::shared("real-root", &seen));
        let named_root = hierarchy.get_logger("root");
        named_root.add_appender(Recording::shared("child", &seen));
        assert!(!named_root.is_root());

        named_root.close_nested_appenders();

        hierarchy.get_logger("other").info("still routed");
        assert_eq!(*seen.lock(), vec!["real-root:still routed"]);
        assert_eq!(hierarchy.metrics().appender_failures(), 0);
    }

    #[test]
    fn test_close_nested_appenders_from_root_closes_everything() {
        let hierarchy = quiet_hierarchy();
        let seen = Arc::new(Mutex::new(Vec::new()));
        hierarchy.root().add_appender(Recording::shared("root", &seen));
        hierarchy
            .get_logger("a.b")
            .add_appender(Recording::shared("leaf", &seen));

        hierarchy.root().close_nested_appenders();

        hierarchy.get_logger("a.b").info("lost");
        assert!(seen.lock().is_empty());
        assert_eq!(hierarchy.metrics().appender_failures(), 2);
    }

    #[test]
    fn test_log_records_caller_location() {
        struct LineCapture(Mutex<Option<(String, u32)>>);

        impl Appender for LineCapture {
            fn append(&self, entry: &LogEntry) -> Result<()> {
                *self.0.lock() = entry.file().map(String::from).zip(entry.line());
                Ok(())
            }
            fn close(&self) {}
            fn name(&self) -> &str {
                "lines"
            }
        }

        let hierarchy = quiet_hierarchy();
        let capture = Arc::new(LineCapture(Mutex::new(None)));
        let logger = hierarchy.get_logger("loc");
        logger.add_appender(capture.clone());

        let expected_line = line!() + 1;
        logger.info("where");

        let (file, line) = capture.0.lock().clone().unwrap();
        assert!(file.ends_with("logger.rs"));
        assert_eq!(line, expected_line);
    }
}
