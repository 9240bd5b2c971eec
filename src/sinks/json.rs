//! JSON lines sink for structured logging

use crate::core::{
    ExternalSink, KeyedSinkFn, LogArgs, LogCategory, LogLevel, LogMeta, LoggerError, NameSegment,
    NamedSinkFn, Result,
};
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

#[derive(Serialize)]
struct JsonLine<'a> {
    level: LogLevel,
    category: LogCategory,
    names: &'a [String],
    #[serde(skip_serializing_if = "Value::is_null")]
    ctx: &'a Value,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    args: Option<&'a LogArgs>,
}

/// Writes each entry as a single-line JSON object (JSONL format)
///
/// Compatible with log aggregation tools like ELK, Loki, etc. The sink is
/// shared by every logger its factories build; each line carries the names
/// and context of the logger that wrote it.
pub struct JsonLinesSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesSink {
    /// Append to the file at `path`, creating it if needed
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::io_operation("opening JSON log", path.display().to_string(), e)
            })?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }

    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    /// Factory emitting `name#key` names
    pub fn keyed_factory(self: &Arc<Self>) -> KeyedSinkFn {
        let sink = Arc::clone(self);
        Arc::new(move |names: &[NameSegment], ctx: &Value| {
            Arc::new(JsonLinesHandle {
                sink: Arc::clone(&sink),
                names: names.iter().map(NameSegment::rendered).collect(),
                ctx: ctx.clone(),
            }) as Arc<dyn ExternalSink>
        })
    }

    /// Factory emitting `name (key)` names
    pub fn named_factory(self: &Arc<Self>) -> NamedSinkFn {
        let sink = Arc::clone(self);
        Arc::new(move |names: &[String], ctx: &Value| {
            Arc::new(JsonLinesHandle {
                sink: Arc::clone(&sink),
                names: names.to_vec(),
                ctx: ctx.clone(),
            }) as Arc<dyn ExternalSink>
        })
    }

    fn write_line(&self, line: &JsonLine<'_>) -> Result<()> {
        let json = serde_json::to_string(line)?;
        writeln!(self.writer.lock(), "{}", json)?;
        Ok(())
    }
}

struct JsonLinesHandle {
    sink: Arc<JsonLinesSink>,
    names: Vec<String>,
    ctx: Value,
}

impl JsonLinesHandle {
    fn emit(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        let line = JsonLine {
            level: meta.level,
            category: meta.category,
            names: &self.names,
            ctx: &self.ctx,
            message,
            args: args.filter(|args| !args.is_empty()),
        };
        // Never let sink failures reach the log call
        if let Err(e) = self.sink.write_line(&line) {
            eprintln!("[LOGGER ERROR] JSON sink write failed: {}", e);
        }
    }
}

impl ExternalSink for JsonLinesHandle {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogKind;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_json_lines_sink() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test.jsonl");

        let sink = Arc::new(JsonLinesSink::new(&log_path)?);
        let segments = vec![NameSegment::new("App"), NameSegment::keyed("Session", 42)];
        let handle = (sink.keyed_factory())(&segments, &json!({ "region": "eu" }));

        let args = LogArgs::new().with_field("user_id", 123);
        handle.write(LogKind::Todo.meta(), "add retry", Some(&args));
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let parsed: Value = serde_json::from_str(content.trim_end())?;
        assert_eq!(
            parsed,
            json!({
                "level": "error",
                "category": "todo",
                "names": ["App", "Session#42"],
                "ctx": { "region": "eu" },
                "message": "add retry",
                "args": { "user_id": 123 }
            })
        );

        Ok(())
    }

    #[test]
    fn test_json_lines_multiple_entries() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("test_multiple.jsonl");

        let sink = Arc::new(JsonLinesSink::new(&log_path)?);
        let handle = (sink.named_factory())(&["Worker (7)".to_string()], &Value::Null);

        for i in 0..5 {
            handle.write(LogKind::Debug.meta(), &format!("Iteration {}", i), None);
        }
        sink.flush()?;

        let content = fs::read_to_string(&log_path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 5);

        for line in lines {
            let parsed: Value = serde_json::from_str(line)?;
            assert_eq!(parsed["level"], "debug");
            assert_eq!(parsed["names"], json!(["Worker (7)"]));
            assert!(parsed.get("ctx").is_none());
            assert!(parsed.get("args").is_none());
        }

        Ok(())
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_does_not_panic() {
        let sink = Arc::new(JsonLinesSink::from_writer(FailingWriter));
        let handle = (sink.keyed_factory())(&[], &Value::Null);

        handle.write(LogKind::Error.meta(), "lost", None);
        assert!(sink.flush().is_ok());
    }
}
