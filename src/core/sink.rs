//! Sink traits for log output destinations
//!
//! Two kinds of sink sit behind a logger. A [`ConsoleSink`] is console-like:
//! four leveled write methods receiving the pre-rendered label and name chain.
//! An [`ExternalSink`] is a structured backend receiving the kind metadata,
//! and is built per logger by a [`NamedSinkFn`] or [`KeyedSinkFn`].

use super::log_context::LogArgs;
use super::log_level::{LogKind, LogLevel, LogMeta};
use super::source::NameSegment;
use super::style::RESET;
use std::sync::Arc;

/// The four methods of a console-like sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleMethod {
    Error,
    Warn,
    Info,
    Debug,
}

/// The values of one console call, in output order
#[derive(Debug, Clone, Copy)]
pub struct ConsoleRecord<'a> {
    pub kind: LogKind,
    /// Whether `label` and `names` carry ANSI escapes
    pub styled: bool,
    pub label: &'a str,
    pub names: &'a [String],
    pub message: &'a str,
    pub args: Option<&'a LogArgs>,
}

impl ConsoleRecord<'_> {
    /// Join the values into one line, the way a console joins variadic arguments
    pub fn render(&self) -> String {
        let mut line = String::with_capacity(
            self.label.len()
                + self.names.iter().map(|n| n.len() + 1).sum::<usize>()
                + self.message.len()
                + 24,
        );
        line.push_str(self.label);
        for name in self.names {
            line.push(' ');
            line.push_str(name);
        }
        line.push(' ');
        if self.styled {
            line.push_str(self.kind.label_color());
        }
        line.push_str(self.message);
        if let Some(args) = self.args.filter(|args| !args.is_empty()) {
            line.push(' ');
            line.push_str(&args.format_fields());
        }
        if self.styled {
            line.push_str(RESET);
        }
        line
    }
}

pub trait ConsoleSink: Send + Sync {
    /// ERROR severity: `error`, `todo` and `hmm`
    fn error(&self, record: &ConsoleRecord<'_>);
    /// WARN severity
    fn warn(&self, record: &ConsoleRecord<'_>);
    /// DEBUG severity
    fn info(&self, record: &ConsoleRecord<'_>);
    /// TRACE severity
    fn debug(&self, record: &ConsoleRecord<'_>);

    fn write(&self, method: ConsoleMethod, record: &ConsoleRecord<'_>) {
        match method {
            ConsoleMethod::Error => self.error(record),
            ConsoleMethod::Warn => self.warn(record),
            ConsoleMethod::Info => self.info(record),
            ConsoleMethod::Debug => self.debug(record),
        }
    }
}

pub trait ExternalSink: Send + Sync {
    fn error(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>);
    fn warn(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>);
    fn debug(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>);
    fn trace(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>);

    /// Route by the meta's level
    fn write(&self, meta: LogMeta, message: &str, args: Option<&LogArgs>) {
        match meta.level {
            LogLevel::Error => self.error(meta, message, args),
            LogLevel::Warn => self.warn(meta, message, args),
            LogLevel::Debug => self.debug(meta, message, args),
            LogLevel::Trace => self.trace(meta, message, args),
        }
    }
}

/// Builds an external sink from rendered `name (key)` labels and the context
pub type NamedSinkFn =
    Arc<dyn Fn(&[String], &serde_json::Value) -> Arc<dyn ExternalSink> + Send + Sync>;

/// Builds an external sink from the raw name/key segments and the context
pub type KeyedSinkFn =
    Arc<dyn Fn(&[NameSegment], &serde_json::Value) -> Arc<dyn ExternalSink> + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_record() {
        let names = vec!["App".to_string(), "Session#42".to_string()];
        let args = LogArgs::new().with_field("user", "ada");
        let record = ConsoleRecord {
            kind: LogKind::Warn,
            styled: false,
            label: LogKind::Warn.label(),
            names: &names,
            message: "slow response",
            args: Some(&args),
        };

        assert_eq!(record.render(), "WARN  App Session#42 slow response user=ada");
    }

    #[test]
    fn test_render_styled_record_resets_at_end() {
        let record = ConsoleRecord {
            kind: LogKind::Hmm,
            styled: true,
            label: LogKind::Hmm.styled_label(),
            names: &[],
            message: "unexpected",
            args: None,
        };

        let line = record.render();
        assert!(line.starts_with("\u{1b}[38;5;13mHMM? "));
        assert!(line.contains("\u{1b}[38;5;13munexpected"));
        assert!(line.ends_with(RESET));
    }
}
