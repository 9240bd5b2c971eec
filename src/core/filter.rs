//! Inclusion rules: which kinds a logger built for a source will emit
//!
//! Resolution runs once per logger construction. The outcome is an
//! [`EnabledKinds`] mask, so a log call never re-evaluates the policy.

use super::log_level::{LogKind, LogLevel};
use super::source::LogSource;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A partial override returned by a per-source include function
///
/// Unset fields fall back to the provider defaults, so an empty override is
/// present but changes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogIncludes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<LogLevel>,
}

impl LogIncludes {
    pub fn min(level: LogLevel) -> Self {
        Self { min: Some(level) }
    }
}

/// Fully resolved inclusion settings for one logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveIncludes {
    pub min: LogLevel,
}

impl EffectiveIncludes {
    pub fn new(min: LogLevel) -> Self {
        Self { min }
    }

    #[must_use]
    pub fn apply(self, overrides: LogIncludes) -> Self {
        Self {
            min: overrides.min.unwrap_or(self.min),
        }
    }
}

impl Default for EffectiveIncludes {
    fn default() -> Self {
        Self {
            min: LogLevel::Warn,
        }
    }
}

/// Per-source override; `None` means "use the defaults"
pub type IncludeFn = Arc<dyn Fn(&LogSource) -> Option<LogIncludes> + Send + Sync>;

pub fn resolve_includes(
    defaults: EffectiveIncludes,
    include: Option<&IncludeFn>,
    source: &LogSource,
) -> EffectiveIncludes {
    match include.and_then(|include| include(source)) {
        Some(overrides) => defaults.apply(overrides),
        None => defaults,
    }
}

#[inline]
pub fn should_log(includes: &EffectiveIncludes, kind: LogKind) -> bool {
    kind.meets_minimum(includes.min)
}

/// Bit set of the kinds a logger emits, indexed by kind
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct EnabledKinds(u8);

impl EnabledKinds {
    pub fn resolve(includes: &EffectiveIncludes) -> Self {
        let mut mask = 0u8;
        for kind in LogKind::ALL {
            if should_log(includes, kind) {
                mask |= 1 << kind.index();
            }
        }
        Self(mask)
    }

    #[inline]
    pub fn contains(self, kind: LogKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = LogKind> {
        LogKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl fmt::Debug for EnabledKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(LogKind::name)).finish()
    }
}
