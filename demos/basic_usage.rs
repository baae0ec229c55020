//! Basic hierarchy usage example
//!
//! Demonstrates named loggers, level inheritance, additivity and the
//! nested diagnostic context with a console appender.
//!
//! Run with: cargo run --example basic_usage

use hierarchical_logger::prelude::*;
use hierarchical_logger::{info, warn};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Hierarchical Logger - Basic Usage Example ===\n");

    let hierarchy = Hierarchy::new();
    hierarchy
        .root()
        .add_appender(Arc::new(ConsoleAppender::new().with_name("root-console")));

    println!("1. Levels are inherited from the nearest configured ancestor:");
    let app = hierarchy.get_logger("app");
    let db = hierarchy.get_logger("app.db.pool");
    app.set_level(Some(LogLevel::Info));
    db.debug("Debug message (hidden, inherits INFO from app)");
    db.info("Info message (visible)");

    hierarchy.get_logger("app.db").set_level(Some(LogLevel::Trace));
    db.trace("Trace message (visible, app.db is now TRACE)");

    println!("\n2. Non-additive loggers stop at their own appenders:");
    let audit = hierarchy.get_logger("app.audit");
    audit.add_appender(Arc::new(
        ConsoleAppender::with_colors(false).with_name("audit-console"),
    ));
    audit.warn("Printed twice: audit console and root console");
    audit.set_additivity(false);
    audit.warn("Printed once: audit console only");

    println!("\n3. Nested diagnostic context:");
    {
        let _request = Ndc::scoped("req-42");
        info!(app, "Handling request");
        {
            let _stage = Ndc::scoped("auth");
            warn!(app, "Token expires in {} seconds", 30);
        }
        info!(app, "Request finished");
    }

    println!("\n4. Hierarchy-wide disable floor:");
    hierarchy.disable_info();
    db.info("Info message (hidden by the floor)");
    db.warn("Warning message (visible)");
    hierarchy.enable_all();

    hierarchy.shutdown();
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
