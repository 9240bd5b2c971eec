//! Log level, category and kind definitions
//!
//! Levels and categories are bit flags in disjoint ranges. Categories take
//! the low three bits and levels the four bits above them, so a kind's
//! combined bits order by level first and the category never changes the
//! outcome of a minimum-level check.

use super::error::LoggerError;
use super::sink::ConsoleMethod;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

const CATEGORY_MASK: u8 = 0b0000_0111;
const LEVEL_MASK: u8 = 0b0111_1000;

/// Ordered severity, `Trace < Debug < Warn < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Trace = 1 << 3,
    Debug = 1 << 4,
    #[default]
    Warn = 1 << 5,
    Error = 1 << 6,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Cross-cutting classification, independent of severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogCategory {
    #[default]
    General = 1 << 0,
    Todo = 1 << 1,
    Troubleshooting = 1 << 2,
}

impl LogCategory {
    pub const ALL: [LogCategory; 3] = [
        LogCategory::General,
        LogCategory::Todo,
        LogCategory::Troubleshooting,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogCategory::General => "general",
            LogCategory::Todo => "todo",
            LogCategory::Troubleshooting => "troubleshooting",
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// A level paired with a category
///
/// This is the metadata external sinks receive with every call. Ordering
/// between metas is defined by [`LogMeta::cmp_severity`] alone; two metas of
/// equal level are equally severe whatever their category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogMeta {
    pub category: LogCategory,
    pub level: LogLevel,
}

impl LogMeta {
    pub const fn new(level: LogLevel, category: LogCategory) -> Self {
        Self { category, level }
    }

    /// Combined flag value, level bits above category bits
    #[inline]
    pub const fn bits(self) -> u8 {
        self.level.bits() | self.category.bits()
    }

    /// Decode a combined flag value carrying exactly one level and one category
    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !(LEVEL_MASK | CATEGORY_MASK) != 0 {
            return None;
        }
        let level = LogLevel::ALL
            .into_iter()
            .find(|level| level.bits() == bits & LEVEL_MASK)?;
        let category = LogCategory::ALL
            .into_iter()
            .find(|category| category.bits() == bits & CATEGORY_MASK)?;
        Some(Self::new(level, category))
    }

    #[inline]
    pub fn cmp_severity(&self, other: &LogMeta) -> Ordering {
        self.level.cmp(&other.level)
    }

    /// Whether this meta is at least as severe as `min`
    #[inline]
    pub fn meets_minimum(self, min: LogLevel) -> bool {
        self.level >= min
    }
}

/// The six fixed kinds a logger exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    /// An unexpected event worth investigating
    Hmm,
    /// Known missing work
    Todo,
    Error,
    Warn,
    Debug,
    Trace,
}

impl LogKind {
    pub const ALL: [LogKind; 6] = [
        LogKind::Hmm,
        LogKind::Todo,
        LogKind::Error,
        LogKind::Warn,
        LogKind::Debug,
        LogKind::Trace,
    ];

    pub const fn meta(self) -> LogMeta {
        match self {
            LogKind::Hmm => LogMeta::new(LogLevel::Error, LogCategory::Troubleshooting),
            LogKind::Todo => LogMeta::new(LogLevel::Error, LogCategory::Todo),
            LogKind::Error => LogMeta::new(LogLevel::Error, LogCategory::General),
            LogKind::Warn => LogMeta::new(LogLevel::Warn, LogCategory::General),
            LogKind::Debug => LogMeta::new(LogLevel::Debug, LogCategory::General),
            LogKind::Trace => LogMeta::new(LogLevel::Trace, LogCategory::General),
        }
    }

    #[inline]
    pub const fn level(self) -> LogLevel {
        self.meta().level
    }

    #[inline]
    pub const fn category(self) -> LogCategory {
        self.meta().category
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.meta().bits()
    }

    /// The fixed kind for a level and category, if one exists
    pub fn encode(level: LogLevel, category: LogCategory) -> Option<LogKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.level() == level && kind.category() == category)
    }

    #[inline]
    pub fn meets_minimum(self, min: LogLevel) -> bool {
        self.meta().meets_minimum(min)
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogKind::Hmm => "hmm",
            LogKind::Todo => "todo",
            LogKind::Error => "error",
            LogKind::Warn => "warn",
            LogKind::Debug => "debug",
            LogKind::Trace => "trace",
        }
    }

    /// Fixed-width label rendered ahead of the name chain
    pub const fn label(self) -> &'static str {
        match self {
            LogKind::Hmm => "HMM? ",
            LogKind::Todo => "TODO ",
            LogKind::Error => "ERROR",
            LogKind::Warn => "WARN ",
            LogKind::Debug => "DEBUG",
            LogKind::Trace => "TRACE",
        }
    }

    /// 256-color escape used for the label and the message
    pub const fn label_color(self) -> &'static str {
        match self {
            LogKind::Hmm => "\u{1b}[38;5;13m",
            LogKind::Todo => "\u{1b}[38;5;14m",
            LogKind::Error => "\u{1b}[38;5;9m",
            LogKind::Warn => "\u{1b}[38;5;11m",
            LogKind::Debug => "\u{1b}[38;5;15m",
            LogKind::Trace => "\u{1b}[38;5;7m",
        }
    }

    pub const fn styled_label(self) -> &'static str {
        match self {
            LogKind::Hmm => "\u{1b}[38;5;13mHMM? ",
            LogKind::Todo => "\u{1b}[38;5;14mTODO ",
            LogKind::Error => "\u{1b}[38;5;9mERROR",
            LogKind::Warn => "\u{1b}[38;5;11mWARN ",
            LogKind::Debug => "\u{1b}[38;5;15mDEBUG",
            LogKind::Trace => "\u{1b}[38;5;7mTRACE",
        }
    }

    /// Console method this kind is written through
    pub const fn console_method(self) -> ConsoleMethod {
        match self.level() {
            LogLevel::Error => ConsoleMethod::Error,
            LogLevel::Warn => ConsoleMethod::Warn,
            LogLevel::Debug => ConsoleMethod::Info,
            LogLevel::Trace => ConsoleMethod::Debug,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogKind {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == lower)
            .ok_or_else(|| LoggerError::other(format!("Invalid log kind: '{}'", s)))
    }
}
