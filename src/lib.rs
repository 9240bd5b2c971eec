//! # Named Logger
//!
//! A level-filtered logging facade for hierarchically named components.
//!
//! Loggers form a tree: every [`Logger`] can mint children with
//! [`Logger::named`] and [`Logger::keyed`], and the name chain from the root
//! appears on every line the child writes. What gets written is decided once,
//! when a logger is built, from the policy held by its [`LoggerProvider`].
//!
//! ## Features
//!
//! - **Six fixed kinds**: `error`, `warn`, `debug`, `trace`, plus `todo` and
//!   `hmm` at error severity
//! - **Per-source filtering**: a minimum level with overrides by name or context
//! - **Styled names**: stable 256-color hashing, bold/italic/underline
//!   patterns, name collapsing and key truncation, memoized per configuration
//! - **Pluggable sinks**: console-like sinks or structured external sinks
//!
//! ## Example
//!
//! ```
//! use named_logger::prelude::*;
//! use std::sync::Arc;
//!
//! let console = Arc::new(MemoryConsole::new());
//! let provider = LoggerProvider::builder().console_arc(console.clone()).build();
//! provider.configure_logging(LoggingConfig::new().no_style());
//!
//! let logger = provider.get_logger().named("App").keyed("Session", 42);
//! logger.warn("slow response");
//! logger.debug("filtered out by the default minimum");
//!
//! assert_eq!(console.lines(), vec!["WARN  App Session#42 slow response"]);
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        ColorScheme, ConsoleConfig, ConsoleStyle, FieldValue, KeyReplace, LogArgs, LogCategory,
        LogIncludes, LogKind, LogLevel, LogMeta, LogSource, Logger, LoggerConfig, LoggerError,
        LoggerProvider, LoggingConfig, LoggingSettings, NamePattern, NameReplace, Result,
        StyleConfig, UtilLogger,
    };
    pub use crate::sinks::{JsonLinesSink, MemoryConsole, MemorySink, StdConsole};
}

pub use crate::core::{
    create_logger_provider, ColorScheme, ConsoleConfig, ConsoleMethod, ConsoleRecord, ConsoleSink,
    ConsoleStyle, EnabledKinds, ExternalSink, FieldValue, KeyReplace, KeyedSinkFn, LogArgs,
    LogCategory, LogIncludes, LogKind, LogLevel, LogMeta, LogSource, Logger, LoggerConfig,
    LoggerError, LoggerProvider, LoggerProviderBuilder, LoggingConfig, LoggingSettings,
    NamePattern, NameReplace, NameSegment, NamedSinkFn, ProviderOptions, Result, SourceKey,
    StyleConfig, StyleContext, UtilLogger, MAX_CACHED_NAMES,
};
pub use sinks::{JsonLinesSink, MemoryConsole, MemorySink, StdConsole};
