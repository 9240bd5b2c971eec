//! Sink implementations

pub mod console;
pub mod json;
pub mod memory;

pub use console::StdConsole;
pub use json::JsonLinesSink;
pub use memory::{ConsoleCall, MemoryConsole, MemorySink, SinkCall};

// Re-export traits for convenience
pub use crate::core::{ConsoleSink, ExternalSink};
