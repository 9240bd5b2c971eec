//! Logger provider: the mutable policy and the entry points that change it
//!
//! A [`LoggerProvider`] owns one policy. [`LoggerProvider::configure_logger`]
//! picks the sink, [`LoggerProvider::configure_logging`] sets the minimum
//! level, per-source overrides and styling, and [`LoggerProvider::get_logger`]
//! mints a root logger from whatever policy is current.

use super::filter::{EffectiveIncludes, IncludeFn, LogIncludes};
use super::log_level::LogLevel;
use super::logger::{create_logger, Logger};
use super::sink::{ConsoleSink, ExternalSink, KeyedSinkFn, NamedSinkFn};
use super::source::{LogSource, NameSegment};
use super::style::{StyleConfig, StyleContext};
use crate::sinks::StdConsole;
use parking_lot::RwLock;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Which sink loggers write to
#[derive(Clone)]
pub enum LoggerConfig {
    /// A console-like sink
    Console(ConsoleConfig),
    /// External sink built from `name (key)` labels
    Named(NamedSinkFn),
    /// External sink built from raw name/key segments
    Keyed(KeyedSinkFn),
}

impl LoggerConfig {
    /// The provider's default console with colors on
    pub fn console() -> Self {
        LoggerConfig::Console(ConsoleConfig::default())
    }

    pub fn named<F>(f: F) -> Self
    where
        F: Fn(&[String], &Value) -> Arc<dyn ExternalSink> + Send + Sync + 'static,
    {
        LoggerConfig::Named(Arc::new(f))
    }

    pub fn keyed<F>(f: F) -> Self
    where
        F: Fn(&[NameSegment], &Value) -> Arc<dyn ExternalSink> + Send + Sync + 'static,
    {
        LoggerConfig::Keyed(Arc::new(f))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for LoggerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerConfig::Console(config) => f.debug_tuple("Console").field(config).finish(),
            LoggerConfig::Named(_) => write!(f, "Named(..)"),
            LoggerConfig::Keyed(_) => write!(f, "Keyed(..)"),
        }
    }
}

#[derive(Clone, Default)]
pub struct ConsoleConfig {
    /// Emit ANSI styling, default `true`
    pub ansi_colors: Option<bool>,
    /// Replacement console, default the provider's console
    pub console: Option<Arc<dyn ConsoleSink>>,
}

impl ConsoleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Colors on unless the environment disables them (`NO_COLOR`, `CLICOLOR=0`)
    #[cfg(feature = "console")]
    pub fn from_env() -> Self {
        Self {
            ansi_colors: Some(colored::control::SHOULD_COLORIZE.should_colorize()),
            console: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn ansi_colors(mut self, enabled: bool) -> Self {
        self.ansi_colors = Some(enabled);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console<C: ConsoleSink + 'static>(mut self, console: C) -> Self {
        self.console = Some(Arc::new(console));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_arc(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = Some(console);
        self
    }
}

impl fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("ansi_colors", &self.ansi_colors)
            .field("console", &self.console.as_ref().map(|_| ".."))
            .finish()
    }
}

/// Styling switch for console output
#[derive(Debug, Clone, Default)]
pub enum ConsoleStyle {
    Disabled,
    /// [`StyleConfig::default`]
    #[default]
    Enabled,
    Custom(StyleConfig),
}

impl From<bool> for ConsoleStyle {
    fn from(enabled: bool) -> Self {
        if enabled {
            ConsoleStyle::Enabled
        } else {
            ConsoleStyle::Disabled
        }
    }
}

impl From<StyleConfig> for ConsoleStyle {
    fn from(config: StyleConfig) -> Self {
        ConsoleStyle::Custom(config)
    }
}

/// Filtering and styling policy
///
/// Every field falls back to its default when unset, so each call to
/// [`LoggerProvider::configure_logging`] describes the whole policy.
#[derive(Clone, Default)]
pub struct LoggingConfig {
    /// Minimum level, default [`LogLevel::Warn`]
    pub min: Option<LogLevel>,
    pub include: Option<IncludeFn>,
    pub console_style: ConsoleStyle,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn min(mut self, level: LogLevel) -> Self {
        self.min = Some(level);
        self
    }

    /// Per-source override; return `None` to keep the defaults
    #[must_use = "builder methods return a new value"]
    pub fn include<F>(mut self, f: F) -> Self
    where
        F: Fn(&LogSource) -> Option<LogIncludes> + Send + Sync + 'static,
    {
        self.include = Some(Arc::new(f));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_style(mut self, style: impl Into<ConsoleStyle>) -> Self {
        self.console_style = style.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn style(self, config: StyleConfig) -> Self {
        self.console_style(ConsoleStyle::Custom(config))
    }

    #[must_use = "builder methods return a new value"]
    pub fn no_style(self) -> Self {
        self.console_style(ConsoleStyle::Disabled)
    }
}

impl fmt::Debug for LoggingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingConfig")
            .field("min", &self.min)
            .field("include", &self.include.as_ref().map(|_| ".."))
            .field("console_style", &self.console_style)
            .finish()
    }
}

#[derive(Clone)]
pub(crate) enum ExternalFactory {
    Named(NamedSinkFn),
    Keyed(KeyedSinkFn),
}

#[derive(Clone)]
enum SinkTarget {
    Console(Arc<dyn ConsoleSink>),
    External(ExternalFactory),
}

/// How loggers bind their calls, chosen once per configuration change
#[derive(Clone)]
pub(crate) enum CreateStrategy {
    ConsoleStyled {
        console: Arc<dyn ConsoleSink>,
        style: Arc<StyleContext>,
    },
    ConsolePlain {
        console: Arc<dyn ConsoleSink>,
    },
    External(ExternalFactory),
}

#[derive(Clone)]
pub(crate) struct Policy {
    pub(crate) includes: EffectiveIncludes,
    pub(crate) include: Option<IncludeFn>,
    /// `None` while console styling is disabled
    style: Option<Arc<StyleContext>>,
    ansi_colors: bool,
    sink: SinkTarget,
    pub(crate) strategy: CreateStrategy,
}

impl Policy {
    fn new(console: Arc<dyn ConsoleSink>) -> Self {
        let style = Some(Arc::new(StyleContext::new(StyleConfig::default())));
        let mut policy = Self {
            includes: EffectiveIncludes::default(),
            include: None,
            style,
            ansi_colors: true,
            sink: SinkTarget::Console(Arc::clone(&console)),
            strategy: CreateStrategy::ConsolePlain { console },
        };
        policy.refresh_strategy();
        policy
    }

    fn refresh_strategy(&mut self) {
        self.strategy = match &self.sink {
            SinkTarget::Console(console) => match (&self.style, self.ansi_colors) {
                (Some(style), true) => CreateStrategy::ConsoleStyled {
                    console: Arc::clone(console),
                    style: Arc::clone(style),
                },
                _ => CreateStrategy::ConsolePlain {
                    console: Arc::clone(console),
                },
            },
            SinkTarget::External(factory) => CreateStrategy::External(factory.clone()),
        };
    }
}

/// Handle to a provider's policy, held by every logger it mints
#[derive(Clone)]
pub(crate) struct SharedPolicy(Arc<RwLock<Policy>>);

impl SharedPolicy {
    /// Clone the current policy and release the lock before building
    fn snapshot(&self) -> Policy {
        self.0.read().clone()
    }

    pub(crate) fn create(&self, source: LogSource) -> Logger {
        let policy = self.snapshot();
        create_logger(&policy, self, source)
    }
}

/// Options for [`create_logger_provider`]
#[derive(Clone, Default)]
pub struct ProviderOptions {
    /// Default console, [`StdConsole`] when unset
    pub console: Option<Arc<dyn ConsoleSink>>,
    /// Context of every root logger
    pub ctx: Value,
}

pub fn create_logger_provider(options: ProviderOptions) -> LoggerProvider {
    let mut builder = LoggerProvider::builder().ctx(options.ctx);
    if let Some(console) = options.console {
        builder = builder.console_arc(console);
    }
    builder.build()
}

pub struct LoggerProvider {
    policy: SharedPolicy,
    default_console: Arc<dyn ConsoleSink>,
    root_ctx: Value,
}

impl LoggerProvider {
    /// Provider writing to [`StdConsole`] with the default policy
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a builder for LoggerProvider
    ///
    /// # Example
    /// ```
    /// use named_logger::prelude::*;
    ///
    /// let provider = LoggerProvider::builder()
    ///     .console(MemoryConsole::new())
    ///     .ctx(serde_json::json!({ "service": "api" }))
    ///     .logging(LoggingConfig::new().min(LogLevel::Debug))
    ///     .build();
    ///
    /// let logger = provider.get_logger().named("App");
    /// assert!(logger.enabled(LogKind::Debug));
    /// ```
    #[must_use]
    pub fn builder() -> LoggerProviderBuilder {
        LoggerProviderBuilder::new()
    }

    /// Switch the sink for loggers created from now on
    pub fn configure_logger(&self, config: LoggerConfig) {
        let mut policy = self.policy.0.write();
        match config {
            LoggerConfig::Console(console) => {
                policy.ansi_colors = console.ansi_colors.unwrap_or(true);
                policy.sink = SinkTarget::Console(
                    console
                        .console
                        .unwrap_or_else(|| Arc::clone(&self.default_console)),
                );
            }
            LoggerConfig::Named(named) => {
                policy.sink = SinkTarget::External(ExternalFactory::Named(named));
            }
            LoggerConfig::Keyed(keyed) => {
                policy.sink = SinkTarget::External(ExternalFactory::Keyed(keyed));
            }
        }
        policy.refresh_strategy();
    }

    /// Replace the filtering and styling policy for loggers created from now on
    ///
    /// Styling always starts a new epoch with an empty prefix cache.
    pub fn configure_logging(&self, config: LoggingConfig) {
        let style = match config.console_style {
            ConsoleStyle::Disabled => None,
            ConsoleStyle::Enabled => Some(StyleConfig::default()),
            ConsoleStyle::Custom(style) => Some(style),
        };

        let mut policy = self.policy.0.write();
        policy.includes = EffectiveIncludes::new(config.min.unwrap_or_default());
        policy.include = config.include;
        policy.style = style.map(|style| Arc::new(StyleContext::new(style)));
        policy.refresh_strategy();
    }

    /// Root logger under the current policy
    pub fn get_logger(&self) -> Logger {
        self.policy.create(LogSource::root(self.root_ctx.clone()))
    }

    /// Style context of the current epoch, `None` while styling is disabled
    pub fn style_context(&self) -> Option<Arc<StyleContext>> {
        self.policy.0.read().style.clone()
    }

    pub fn min_level(&self) -> LogLevel {
        self.policy.0.read().includes.min
    }
}

impl Default for LoggerProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = self.policy.0.read();
        f.debug_struct("LoggerProvider")
            .field("min", &policy.includes.min)
            .field("ansi_colors", &policy.ansi_colors)
            .field("style", &policy.style)
            .field("ctx", &self.root_ctx)
            .finish()
    }
}

/// Builder for constructing LoggerProvider with a fluent API
pub struct LoggerProviderBuilder {
    console: Option<Arc<dyn ConsoleSink>>,
    ctx: Value,
    logger: Option<LoggerConfig>,
    logging: Option<LoggingConfig>,
}

impl LoggerProviderBuilder {
    pub fn new() -> Self {
        Self {
            console: None,
            ctx: Value::Null,
            logger: None,
            logging: None,
        }
    }

    /// Default console sink
    #[must_use = "builder methods return a new value"]
    pub fn console<C: ConsoleSink + 'static>(mut self, console: C) -> Self {
        self.console = Some(Arc::new(console));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn console_arc(mut self, console: Arc<dyn ConsoleSink>) -> Self {
        self.console = Some(console);
        self
    }

    /// Context of every root logger
    #[must_use = "builder methods return a new value"]
    pub fn ctx(mut self, ctx: impl Into<Value>) -> Self {
        self.ctx = ctx.into();
        self
    }

    /// Applied with [`LoggerProvider::configure_logger`] on build
    #[must_use = "builder methods return a new value"]
    pub fn logger(mut self, config: LoggerConfig) -> Self {
        self.logger = Some(config);
        self
    }

    /// Applied with [`LoggerProvider::configure_logging`] on build
    #[must_use = "builder methods return a new value"]
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.logging = Some(config);
        self
    }

    pub fn build(self) -> LoggerProvider {
        let console = self
            .console
            .unwrap_or_else(|| Arc::new(StdConsole::new()) as Arc<dyn ConsoleSink>);
        let provider = LoggerProvider {
            policy: SharedPolicy(Arc::new(RwLock::new(Policy::new(Arc::clone(&console))))),
            default_console: console,
            root_ctx: self.ctx,
        };

        if let Some(logger) = self.logger {
            provider.configure_logger(logger);
        }
        if let Some(logging) = self.logging {
            provider.configure_logging(logging);
        }
        provider
    }
}

impl Default for LoggerProviderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::log_level::LogKind;
    use crate::sinks::MemoryConsole;
    use serde_json::json;

    fn provider() -> (LoggerProvider, Arc<MemoryConsole>) {
        let console = Arc::new(MemoryConsole::new());
        let provider = LoggerProvider::builder().console_arc(console.clone()).build();
        (provider, console)
    }

    #[test]
    fn test_defaults() {
        let (provider, _) = provider();

        assert_eq!(provider.min_level(), LogLevel::Warn);
        assert!(provider.style_context().is_some());
        assert!(matches!(
            provider.policy.snapshot().strategy,
            CreateStrategy::ConsoleStyled { .. }
        ));
    }

    #[test]
    fn test_configure_logging_resets_unset_fields() {
        let (provider, _) = provider();
        provider.configure_logging(LoggingConfig::new().min(LogLevel::Trace).no_style());
        assert_eq!(provider.min_level(), LogLevel::Trace);
        assert!(provider.style_context().is_none());

        provider.configure_logging(LoggingConfig::new());
        assert_eq!(provider.min_level(), LogLevel::Warn);
        assert!(provider.style_context().is_some());
    }

    #[test]
    fn test_every_style_change_starts_new_epoch() {
        let (provider, _) = provider();
        let first = provider.style_context().unwrap();
        provider.get_logger().named("App").error("fill the cache");
        assert!(first.is_cached("App"));

        provider.configure_logging(LoggingConfig::new());
        let second = provider.style_context().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.cached_len(), 1);
    }

    #[test]
    fn test_ansi_colors_off_selects_plain() {
        let (provider, console) = provider();
        provider.configure_logger(LoggerConfig::Console(ConsoleConfig::new().ansi_colors(false)));

        provider.get_logger().named("App").error("boom");

        let calls = console.calls();
        assert_eq!(calls[0].label, "ERROR");
        assert!(!calls[0].line.contains('\u{1b}'));
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_console_config_from_env_follows_color_override() {
        colored::control::set_override(false);
        let off = ConsoleConfig::from_env();
        colored::control::set_override(true);
        let on = ConsoleConfig::from_env();
        colored::control::unset_override();

        assert_eq!(off.ansi_colors, Some(false));
        assert_eq!(on.ansi_colors, Some(true));

        let (provider, console) = provider();
        provider.configure_logger(LoggerConfig::Console(off.console_arc(console.clone())));
        provider.get_logger().named("App").error("boom");
        assert!(!console.calls()[0].line.contains('\u{1b}'));
    }

    #[test]
    fn test_console_config_resets_to_default_console() {
        let (provider, console) = provider();
        let other = Arc::new(MemoryConsole::new());

        provider.configure_logger(LoggerConfig::Console(
            ConsoleConfig::new().console_arc(other.clone()),
        ));
        provider.get_logger().warn("to other");

        provider.configure_logger(LoggerConfig::console());
        provider.get_logger().warn("to default");

        assert_eq!(other.len(), 1);
        assert_eq!(console.len(), 1);
    }

    #[test]
    fn test_root_logger_carries_provider_ctx() {
        let provider = create_logger_provider(ProviderOptions {
            console: Some(Arc::new(MemoryConsole::new())),
            ctx: json!({ "service": "api" }),
        });

        assert_eq!(provider.get_logger().ctx(), &json!({ "service": "api" }));
    }

    #[test]
    fn test_builder_applies_configs() {
        let provider = LoggerProvider::builder()
            .console(MemoryConsole::new())
            .logging(LoggingConfig::new().min(LogLevel::Debug))
            .build();

        let logger = provider.get_logger();
        assert!(logger.enabled(LogKind::Debug));
        assert!(!logger.enabled(LogKind::Trace));
    }

    #[test]
    fn test_children_follow_current_policy() {
        let (provider, _) = provider();
        let root = provider.get_logger();

        provider.configure_logging(LoggingConfig::new().min(LogLevel::Trace));

        assert!(!root.enabled(LogKind::Trace));
        assert!(root.named("Child").enabled(LogKind::Trace));
    }
}
