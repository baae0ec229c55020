//! Declarative hierarchy configuration
//!
//! This module provides:
//! - `HierarchyConfig`: per-logger levels, additivity and appender
//!   references plus a disable floor, loadable from JSON
//! - `HierarchyBuilder`: fluent construction of a configured hierarchy
//!
//! Appenders are referenced by name and resolved against a registry the
//! caller supplies, so one appender instance can serve several loggers.

use super::appender::{Appender, SharedAppender};
use super::error::{LoggerError, Result};
use super::hierarchy::{Hierarchy, ROOT_BASELINE};
use super::log_level::LogLevel;
use super::loglog::{GlobalReporter, Reporter};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Named appenders that configuration entries may refer to
pub type AppenderRegistry = HashMap<String, SharedAppender>;

fn default_additivity() -> bool {
    true
}

/// Configuration of one logger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Own level; absent means inherit
    #[serde(default)]
    pub level: Option<LogLevel>,

    #[serde(default = "default_additivity")]
    pub additivity: bool,

    /// Appender names, in call order
    #[serde(default)]
    pub appenders: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: None,
            additivity: true,
            appenders: Vec::new(),
        }
    }
}

/// Configuration of a whole hierarchy
///
/// # Example
///
/// ```
/// use hierarchical_logger::{AppenderRegistry, Hierarchy, HierarchyConfig, LogLevel};
///
/// let config = HierarchyConfig::from_json(r#"{
///     "disable_floor": "DEBUG",
///     "root": { "level": "INFO" },
///     "loggers": {
///         "app.audit": { "level": "WARN", "additivity": false }
///     }
/// }"#).unwrap();
///
/// let hierarchy = Hierarchy::new();
/// config.apply(&hierarchy, &AppenderRegistry::new()).unwrap();
///
/// assert_eq!(hierarchy.root().level(), Some(LogLevel::Info));
/// assert!(!hierarchy.get_logger("app.audit").additivity());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    #[serde(default)]
    pub disable_floor: Option<LogLevel>,

    #[serde(default)]
    pub root: Option<LoggerConfig>,

    #[serde(default)]
    pub loggers: BTreeMap<String, LoggerConfig>,
}

impl HierarchyConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every appender reference against `registry`
    pub fn validate(&self, registry: &AppenderRegistry) -> Result<()> {
        let entries = self
            .root
            .iter()
            .map(|config| ("root", config))
            .chain(self.loggers.iter().map(|(name, config)| (name.as_str(), config)));

        for (logger, config) in entries {
            if let Some(missing) = config
                .appenders
                .iter()
                .find(|name| !registry.contains_key(name.as_str()))
            {
                return Err(LoggerError::config(
                    format!("logger '{}'", logger),
                    format!("unknown appender '{}'", missing),
                ));
            }
        }
        Ok(())
    }

    /// Apply on top of `hierarchy`'s current configuration.
    ///
    /// Nothing is changed unless every appender reference resolves. Listed
    /// loggers have their level and additivity replaced and the named
    /// appenders attached; loggers not listed are left alone.
    pub fn apply(&self, hierarchy: &Hierarchy, registry: &AppenderRegistry) -> Result<()> {
        self.validate(registry)?;

        if let Some(root) = &self.root {
            let logger = hierarchy.root();
            logger.set_level(Some(root.level.unwrap_or(ROOT_BASELINE)));
            logger.set_additivity(root.additivity);
            for name in &root.appenders {
                if let Some(appender) = registry.get(name) {
                    logger.add_appender(Arc::clone(appender));
                }
            }
        }

        for (name, config) in &self.loggers {
            let logger = hierarchy.get_logger(name);
            logger.set_level(config.level);
            logger.set_additivity(config.additivity);
            for appender_name in &config.appenders {
                if let Some(appender) = registry.get(appender_name) {
                    logger.add_appender(Arc::clone(appender));
                }
            }
        }

        hierarchy.set_disable_floor(self.disable_floor);
        Ok(())
    }
}

/// Builder for constructing a configured [`Hierarchy`]
///
/// # Example
/// ```
/// use hierarchical_logger::prelude::*;
///
/// let hierarchy = Hierarchy::builder()
///     .root_level(LogLevel::Info)
///     .logger_level("app.db", LogLevel::Trace)
///     .disable_floor(LogLevel::Debug)
///     .build();
///
/// assert!(hierarchy.get_logger("app.db").is_enabled_for(LogLevel::Debug));
/// assert!(!hierarchy.get_logger("app.db").is_enabled_for(LogLevel::Trace));
/// ```
pub struct HierarchyBuilder {
    reporter: Arc<dyn Reporter>,
    root_level: LogLevel,
    root_appenders: Vec<SharedAppender>,
    levels: Vec<(String, LogLevel)>,
    disable_floor: Option<LogLevel>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self {
            reporter: Arc::new(GlobalReporter),
            root_level: ROOT_BASELINE,
            root_appenders: Vec::new(),
            levels: Vec::new(),
            disable_floor: None,
        }
    }

    /// Use `reporter` instead of the process-wide one
    #[must_use = "builder methods return a new value"]
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    /// Attach an appender to the root logger
    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.root_appenders.push(Arc::new(appender));
        self
    }

    /// Attach an already shared appender to the root logger
    #[must_use = "builder methods return a new value"]
    pub fn shared_appender(mut self, appender: SharedAppender) -> Self {
        self.root_appenders.push(appender);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn logger_level(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.levels.push((name.into(), level));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_floor(mut self, floor: LogLevel) -> Self {
        self.disable_floor = Some(floor);
        self
    }

    pub fn build(self) -> Hierarchy {
        let hierarchy = Hierarchy::with_reporter(self.reporter);
        let root = hierarchy.root();
        root.set_level(Some(self.root_level));
        for appender in self.root_appenders {
            root.add_appender(appender);
        }
        for (name, level) in self.levels {
            hierarchy.get_logger(&name).set_level(Some(level));
        }
        hierarchy.set_disable_floor(self.disable_floor);
        hierarchy
    }
}

impl Default for HierarchyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
