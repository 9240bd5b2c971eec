//! Process console sink

use crate::core::{ConsoleRecord, ConsoleSink};
use std::io::Write;

/// Writes rendered records to the process streams
///
/// `error` and `warn` go to stderr, `info` and `debug` to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }

    /// Flush both streams, since records go to both
    pub fn flush(&self) -> crate::Result<()> {
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }
}

impl ConsoleSink for StdConsole {
    fn error(&self, record: &ConsoleRecord<'_>) {
        eprintln!("{}", record.render());
    }

    fn warn(&self, record: &ConsoleRecord<'_>) {
        eprintln!("{}", record.render());
    }

    fn info(&self, record: &ConsoleRecord<'_>) {
        println!("{}", record.render());
    }

    fn debug(&self, record: &ConsoleRecord<'_>) {
        println!("{}", record.render());
    }
}
