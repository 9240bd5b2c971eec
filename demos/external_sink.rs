//! External sink example
//!
//! Demonstrates routing loggers to structured sinks: a JSON lines file fed
//! through the keyed factory, and a custom sink through the named factory.
//!
//! Run with: cargo run --example external_sink

use named_logger::prelude::*;
use named_logger::ExternalSink;
use serde_json::{json, Value};
use std::sync::Arc;

/// Prints each entry on one line with its kind metadata
struct PrefixSink {
    prefix: String,
}

impl PrefixSink {
    fn emit(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        let args = args.map(LogArgs::format_fields).unwrap_or_default();
        println!(
            "[{} {}/{}] {} {}",
            self.prefix, meta.level, meta.category, message, args
        );
    }
}

impl ExternalSink for PrefixSink {
    fn error(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.emit(meta, message, args);
    }

    fn warn(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.emit(meta, message, args);
    }

    fn debug(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.emit(meta, message, args);
    }

    fn trace(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.emit(meta, message, args);
    }
}

fn main() -> Result<()> {
    println!("=== Named Logger - External Sink Example ===\n");

    let provider = LoggerProvider::builder()
        .ctx(json!({ "region": "eu-west-1" }))
        .build();
    provider.configure_logging(LoggingConfig::new().min(LogLevel::Debug));

    println!("1. Named factory with `name (key)` labels:");
    provider.configure_logger(LoggerConfig::named(|names: &[String], ctx: &Value| {
        Arc::new(PrefixSink {
            prefix: format!("{} {}", names.join(" / "), ctx),
        }) as Arc<dyn ExternalSink>
    }));
    let worker = provider.get_logger().named("Queue").keyed("Worker", 3);
    worker.debug("Polling");
    worker.todo_with("Batch acknowledgements", &LogArgs::new().with_field("batch", 50));
    worker.hmm("Received an empty payload");

    println!("\n2. JSON lines file through the keyed factory:");
    let path = std::env::temp_dir().join("named_logger_example.jsonl");
    let sink = Arc::new(JsonLinesSink::new(&path)?);
    provider.configure_logger(LoggerConfig::Keyed(sink.keyed_factory()));

    let request = provider
        .get_logger()
        .named("Api")
        .keyed("Request", "r-1042")
        .with(json!({ "user": "ada" }));
    request.warn_with("Slow upstream", &LogArgs::new().with_field("ms", 2300));
    request.error("Upstream returned 502");
    sink.flush()?;

    println!("   Wrote entries to {}", path.display());
    for line in std::fs::read_to_string(&path)?.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
