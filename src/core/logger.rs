//! Named loggers and the factory that binds their calls
//!
//! A [`Logger`] is an immutable record of six bound calls, one per
//! [`LogKind`]. Each call is decided once, when the logger is built: either
//! it writes to the sink with the name chain already rendered, or it is a
//! shared no-op. Reconfiguring the provider never changes an existing
//! logger's calls; children minted through [`Logger::named`],
//! [`Logger::keyed`] and [`Logger::with`] pick up the policy current at
//! that time.

use super::filter::{resolve_includes, EnabledKinds};
use super::log_context::LogArgs;
use super::log_level::LogKind;
use super::provider::{CreateStrategy, ExternalFactory, Policy, SharedPolicy};
use super::sink::{ConsoleRecord, ConsoleSink, ExternalSink};
use super::source::{LogSource, SourceKey};
use super::style::StyleContext;
use serde_json::Value;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A bound log call
pub type LogFn = Arc<dyn Fn(&str, Option<&LogArgs>) + Send + Sync>;

static FILTERED: OnceLock<LogFn> = OnceLock::new();

/// The call bound for kinds the policy excludes
fn filtered() -> LogFn {
    Arc::clone(FILTERED.get_or_init(|| Arc::new(|_: &str, _: Option<&LogArgs>| {}) as LogFn))
}

macro_rules! kind_methods {
    ($($kind:ident => $plain:ident, $with:ident;)*) => {
        $(
            #[inline]
            pub fn $plain(&self, message: impl AsRef<str>) {
                self.log(LogKind::$kind, message.as_ref(), None);
            }

            #[inline]
            pub fn $with(&self, message: impl AsRef<str>, args: &LogArgs) {
                self.log(LogKind::$kind, message.as_ref(), Some(args));
            }
        )*
    };
}

#[derive(Clone)]
pub struct Logger {
    source: LogSource,
    enabled: EnabledKinds,
    calls: [LogFn; 6],
    policy: SharedPolicy,
}

impl Logger {
    kind_methods! {
        Error => error, error_with;
        Warn => warn, warn_with;
        Debug => debug, debug_with;
        Trace => trace, trace_with;
        Todo => todo, todo_with;
        Hmm => hmm, hmm_with;
    }

    #[inline]
    pub fn log(&self, kind: LogKind, message: &str, args: Option<&LogArgs>) {
        (self.calls[kind.index()])(message, args);
    }

    /// Whether calls of `kind` reach the sink
    #[inline]
    pub fn enabled(&self, kind: LogKind) -> bool {
        self.enabled.contains(kind)
    }

    pub fn enabled_kinds(&self) -> EnabledKinds {
        self.enabled
    }

    /// Child logger with one more name segment
    #[must_use]
    pub fn named(&self, name: impl Into<String>) -> Logger {
        self.policy.create(self.source.append(name, None))
    }

    /// Child logger with a keyed name segment, rendered `name#key`
    #[must_use]
    pub fn keyed(&self, name: impl Into<String>, key: impl Into<SourceKey>) -> Logger {
        self.policy.create(self.source.append(name, Some(key.into())))
    }

    /// Logger with the same names and `partial` merged into its context
    #[must_use]
    pub fn with(&self, partial: impl Into<Value>) -> Logger {
        self.policy.create(self.source.with_context(partial.into()))
    }

    pub fn ctx(&self) -> &Value {
        self.source.ctx()
    }

    pub fn source(&self) -> &LogSource {
        &self.source
    }

    /// A narrowed view for utility code
    pub fn downgrade(&self) -> UtilLogger {
        UtilLogger {
            inner: self.clone(),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("names", &self.source.rendered_names())
            .field("ctx", self.source.ctx())
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Logger restricted to the four general kinds
///
/// Utility code receiving a `UtilLogger` cannot emit `todo` or `hmm`
/// entries, which belong to the code that owns the logger.
#[derive(Clone, Debug)]
pub struct UtilLogger {
    inner: Logger,
}

impl UtilLogger {
    #[inline]
    fn log(&self, kind: LogKind, message: &str, args: Option<&LogArgs>) {
        self.inner.log(kind, message, args);
    }

    kind_methods! {
        Error => error, error_with;
        Warn => warn, warn_with;
        Debug => debug, debug_with;
        Trace => trace, trace_with;
    }

    #[must_use]
    pub fn named(&self, name: impl Into<String>) -> UtilLogger {
        self.inner.named(name).downgrade()
    }

    #[must_use]
    pub fn keyed(&self, name: impl Into<String>, key: impl Into<SourceKey>) -> UtilLogger {
        self.inner.keyed(name, key).downgrade()
    }

    pub fn enabled(&self, kind: LogKind) -> bool {
        self.inner.enabled(kind)
    }
}

/// Build a logger for `source` from a policy snapshot
pub(crate) fn create_logger(policy: &Policy, shared: &SharedPolicy, source: LogSource) -> Logger {
    let includes = resolve_includes(policy.includes, policy.include.as_ref(), &source);
    let enabled = EnabledKinds::resolve(&includes);

    let calls = match &policy.strategy {
        CreateStrategy::ConsoleStyled { console, style } => {
            console_calls(console, enabled, true, styled_names(style, &source))
        }
        CreateStrategy::ConsolePlain { console } => {
            console_calls(console, enabled, false, source.rendered_names().into())
        }
        CreateStrategy::External(factory) => external_calls(&factory.build(&source), enabled),
    };

    Logger {
        source,
        enabled,
        calls,
        policy: shared.clone(),
    }
}

fn styled_names(style: &StyleContext, source: &LogSource) -> Arc<[String]> {
    source
        .names()
        .iter()
        .map(|segment| style.render_segment(segment))
        .collect()
}

fn console_calls(
    console: &Arc<dyn ConsoleSink>,
    enabled: EnabledKinds,
    styled: bool,
    names: Arc<[String]>,
) -> [LogFn; 6] {
    LogKind::ALL.map(|kind| {
        if !enabled.contains(kind) {
            return filtered();
        }
        let console = Arc::clone(console);
        let names = Arc::clone(&names);
        let method = kind.console_method();
        let label = if styled {
            kind.styled_label()
        } else {
            kind.label()
        };
        Arc::new(move |message: &str, args: Option<&LogArgs>| {
            console.write(
                method,
                &ConsoleRecord {
                    kind,
                    styled,
                    label,
                    names: &names,
                    message,
                    args,
                },
            );
        }) as LogFn
    })
}

fn external_calls(sink: &Arc<dyn ExternalSink>, enabled: EnabledKinds) -> [LogFn; 6] {
    LogKind::ALL.map(|kind| {
        if !enabled.contains(kind) {
            return filtered();
        }
        let sink = Arc::clone(sink);
        let meta = kind.meta();
        Arc::new(move |message: &str, args: Option<&LogArgs>| {
            sink.write(meta, message, args);
        }) as LogFn
    })
}

impl ExternalFactory {
    fn build(&self, source: &LogSource) -> Arc<dyn ExternalSink> {
        match self {
            ExternalFactory::Named(named) => named(&source.named_labels(), source.ctx()),
            ExternalFactory::Keyed(keyed) => keyed(source.names(), source.ctx()),
        }
    }
}
