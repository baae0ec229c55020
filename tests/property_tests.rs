//! Property-based tests for level resolution and the diagnostic context

use hierarchical_logger::{Hierarchy, LogLevel, Ndc, Reporter};
use proptest::prelude::*;
use std::sync::Arc;

struct Silent;

impl Reporter for Silent {
    fn report(&self, _level: LogLevel, _text: &str) {}
}

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
        Just(LogLevel::Off),
    ]
}

fn event_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
        Just(LogLevel::Fatal),
    ]
}

proptest! {
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), use_lower in any::<bool>()) {
        let text = if use_lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        prop_assert_eq!(text.parse::<LogLevel>().unwrap(), level);
    }

    #[test]
    fn test_log_level_invalid_parse(invalid in "[^TDIWEFOtdiwefo]+") {
        prop_assert!(invalid.parse::<LogLevel>().is_err());
    }
}

proptest! {
    /// The effective level is the first level set on the way to the root
    #[test]
    fn test_chained_level_is_nearest_set_ancestor(
        root in any_level(),
        levels in proptest::collection::vec(proptest::option::of(any_level()), 1..6),
    ) {
        let hierarchy = Hierarchy::with_reporter(Arc::new(Silent));
        hierarchy.root().set_level(Some(root));

        let mut name = String::new();
        let mut expected = root;
        for (depth, level) in levels.iter().enumerate() {
            if depth > 0 {
                name.push('.');
            }
            name.push_str(&format!("n{}", depth));
            let logger = hierarchy.get_logger(&name);
            logger.set_level(*level);
            if let Some(level) = level {
                expected = *level;
            }
            prop_assert_eq!(logger.chained_level().unwrap(), expected);
        }
    }

    /// Enabling is monotone in the event level
    #[test]
    fn test_enabled_is_monotone(
        threshold in any_level(),
        floor in proptest::option::of(any_level()),
        a in event_level(),
        b in event_level(),
    ) {
        let hierarchy = Hierarchy::with_reporter(Arc::new(Silent));
        hierarchy.set_disable_floor(floor);
        let logger = hierarchy.get_logger("p.q");
        logger.set_level(Some(threshold));

        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if logger.is_enabled_for(low) {
            prop_assert!(logger.is_enabled_for(high));
        }
        prop_assert_eq!(
            logger.is_enabled_for(a),
            a >= threshold && floor.map_or(true, |f| a >= f)
        );
    }

    #[test]
    fn test_get_logger_creates_every_prefix(
        parts in proptest::collection::vec("[a-z]{1,4}", 1..5)
    ) {
        let hierarchy = Hierarchy::with_reporter(Arc::new(Silent));
        let name = parts.join(".");
        let logger = hierarchy.get_logger(&name);
        prop_assert_eq!(logger.name(), name.as_str());

        for i in 1..parts.len() {
            prop_assert!(hierarchy.exists(&parts[..i].join(".")));
        }
        let parent_name = logger.parent().map(|p| p.name().to_string());
        let expected = if parts.len() > 1 {
            parts[..parts.len() - 1].join(".")
        } else {
            "root".to_string()
        };
        prop_assert_eq!(parent_name, Some(expected));
    }
}

proptest! {
    #[test]
    fn test_ndc_full_message_joins_pushes(
        messages in proptest::collection::vec("[a-z0-9-]{1,8}", 0..8)
    ) {
        Ndc::remove();
        for message in &messages {
            Ndc::push(message.clone());
        }
        prop_assert_eq!(Ndc::depth(), messages.len());
        prop_assert_eq!(Ndc::get(), messages.join(" "));

        for expected in messages.iter().rev() {
            prop_assert_eq!(&Ndc::peek(), expected);
            prop_assert_eq!(&Ndc::pop(), expected);
        }
        prop_assert_eq!(Ndc::depth(), 0);
        prop_assert_eq!(Ndc::pop(), "");
    }

    #[test]
    fn test_ndc_max_depth_keeps_bottom(depth in 0usize..10, max in 0usize..10) {
        Ndc::remove();
        for i in 0..depth {
            Ndc::push(format!("c{}", i));
        }
        Ndc::set_max_depth(max);
        prop_assert_eq!(Ndc::depth(), depth.min(max));
        let expected: Vec<String> = (0..depth.min(max)).map(|i| format!("c{}", i)).collect();
        prop_assert_eq!(Ndc::get(), expected.join(" "));
        Ndc::remove();
    }
}
