//! Core logger types and traits

pub mod error;
pub mod filter;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod provider;
pub mod settings;
pub mod sink;
pub mod source;
pub mod style;

pub use error::{LoggerError, Result};
pub use filter::{
    resolve_includes, should_log, EffectiveIncludes, EnabledKinds, IncludeFn, LogIncludes,
};
pub use log_context::{FieldValue, LogArgs};
pub use log_level::{LogCategory, LogKind, LogLevel, LogMeta};
pub use logger::{LogFn, Logger, UtilLogger};
pub use provider::{
    create_logger_provider, ConsoleConfig, ConsoleStyle, LoggerConfig, LoggerProvider,
    LoggerProviderBuilder, LoggingConfig, ProviderOptions,
};
pub use settings::{ConsoleStyleSettings, LoggingSettings, StyleSettings, Toggle};
pub use sink::{ConsoleMethod, ConsoleRecord, ConsoleSink, ExternalSink, KeyedSinkFn, NamedSinkFn};
pub use source::{LogSource, NameSegment, SourceKey};
pub use style::{
    ColorScheme, KeyReplace, NamePattern, NameReplace, StyleConfig, StyleContext, StyledName,
    MAX_CACHED_NAMES,
};
