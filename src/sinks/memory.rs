//! Recording sinks for tests and embedding

use crate::core::{
    ConsoleMethod, ConsoleRecord, ConsoleSink, ExternalSink, KeyedSinkFn, LogArgs, LogKind,
    LogLevel, LogMeta, NameSegment, NamedSinkFn,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// One call received by a [`MemoryConsole`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleCall {
    pub method: ConsoleMethod,
    pub kind: LogKind,
    pub label: String,
    pub names: Vec<String>,
    pub message: String,
    pub args: Option<LogArgs>,
    /// The record as [`ConsoleRecord::render`] joins it
    pub line: String,
}

/// Console sink that keeps every call in memory
#[derive(Debug, Default)]
pub struct MemoryConsole {
    calls: Mutex<Vec<ConsoleCall>>,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ConsoleCall> {
        self.calls.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls.lock().iter().map(|call| call.line.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, method: ConsoleMethod, record: &ConsoleRecord<'_>) {
        let call = ConsoleCall {
            method,
            kind: record.kind,
            label: record.label.to_string(),
            names: record.names.to_vec(),
            message: record.message.to_string(),
            args: record.args.cloned(),
            line: record.render(),
        };
        self.calls.lock().push(call);
    }
}

impl ConsoleSink for MemoryConsole {
    fn error(&self, record: &ConsoleRecord<'_>) {
        self.record(ConsoleMethod::Error, record);
    }

    fn warn(&self, record: &ConsoleRecord<'_>) {
        self.record(ConsoleMethod::Warn, record);
    }

    fn info(&self, record: &ConsoleRecord<'_>) {
        self.record(ConsoleMethod::Info, record);
    }

    fn debug(&self, record: &ConsoleRecord<'_>) {
        self.record(ConsoleMethod::Debug, record);
    }
}

/// One call received by a sink built from a [`MemorySink`] factory
#[derive(Debug, Clone, PartialEq)]
pub struct SinkCall {
    /// Which of the four sink methods was invoked
    pub method: LogLevel,
    pub meta: LogMeta,
    /// Names as the factory received them: `name (key)` from the named
    /// factory, `name#key` from the keyed one
    pub names: Vec<String>,
    pub ctx: Value,
    pub message: String,
    pub args: Option<LogArgs>,
}

/// Recorder behind external-sink factories
///
/// Every sink the factories build appends to the same call list, tagged
/// with the names and context it was built for.
#[derive(Debug, Default)]
pub struct MemorySink {
    calls: Mutex<Vec<SinkCall>>,
    builds: AtomicUsize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named_factory(self: &Arc<Self>) -> NamedSinkFn {
        let recorder = Arc::clone(self);
        Arc::new(move |names: &[String], ctx: &Value| {
            recorder.builds.fetch_add(1, Ordering::Relaxed);
            Arc::new(RecordingSink {
                recorder: Arc::clone(&recorder),
                names: names.to_vec(),
                ctx: ctx.clone(),
            }) as Arc<dyn ExternalSink>
        })
    }

    pub fn keyed_factory(self: &Arc<Self>) -> KeyedSinkFn {
        let recorder = Arc::clone(self);
        Arc::new(move |names: &[NameSegment], ctx: &Value| {
            recorder.builds.fetch_add(1, Ordering::Relaxed);
            Arc::new(RecordingSink {
                recorder: Arc::clone(&recorder),
                names: names.iter().map(NameSegment::rendered).collect(),
                ctx: ctx.clone(),
            }) as Arc<dyn ExternalSink>
        })
    }

    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.lock().is_empty()
    }

    /// How many sinks the factories have built
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }
}

struct RecordingSink {
    recorder: Arc<MemorySink>,
    names: Vec<String>,
    ctx: Value,
}

impl RecordingSink {
    fn record(&self, method: LogLevel, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        let call = SinkCall {
            method,
            meta,
            names: self.names.clone(),
            ctx: self.ctx.clone(),
            message: message.to_string(),
            args: args.cloned(),
        };
        self.recorder.calls.lock().push(call);
    }
}

impl ExternalSink for RecordingSink {
    fn error(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.record(LogLevel::Error, meta, message, args);
    }

    fn warn(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.record(LogLevel::Warn, meta, message, args);
    }

    fn debug(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.record(LogLevel::Debug, meta, message, args);
    }

    fn trace(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        self.record(LogLevel::Trace, meta, message, args);
    }
}
