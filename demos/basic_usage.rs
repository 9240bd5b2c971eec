//! Basic logger usage example
//!
//! Demonstrates named loggers, the six kinds and minimum-level filtering on
//! the process console.
//!
//! Run with: cargo run --example basic_usage

use named_logger::prelude::*;
use named_logger::{debug, warn};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== Named Logger - Basic Usage Example ===\n");

    let provider = LoggerProvider::builder()
        .ctx(json!({ "service": "checkout" }))
        .build();
    let app = provider.get_logger().named("App");

    println!("1. Default minimum (WARN) - debug and trace won't show:");
    app.trace("This is a trace message (hidden)");
    app.debug("This is a debug message (hidden)");
    app.warn("This is a warning message");
    app.error("This is an error message");
    app.todo("Handle partial refunds");
    app.hmm("Cart total was negative");

    println!("\n2. Lowering the minimum to TRACE:");
    provider.configure_logging(LoggingConfig::new().min(LogLevel::Trace));
    let session = app.keyed("Session", 42);
    session.trace("Entering checkout()");
    debug!(session, "Cart has {} items", 3);

    println!("\n3. Loggers built earlier keep their policy:");
    app.debug("Still hidden: `app` was built under WARN");

    println!("\n4. Structured arguments:");
    session.warn_with(
        "Payment slow",
        &LogArgs::new().with_field("ms", 1830).with_field("gateway", "acme"),
    );
    warn!(session.named("Retry"), "Attempt {} of {}", 2, 5);

    println!("\n5. Settings from JSON:");
    provider.configure_logging(LoggingSettings::parse_config(
        r#"{"min":"debug","consoleStyle":false}"#,
    )?);
    provider.get_logger().named("Inventory").debug("Plain output, no escapes");

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
