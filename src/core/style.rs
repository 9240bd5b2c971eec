//! ANSI styling of logger names and keys
//!
//! A [`StyleContext`] pairs one [`StyleConfig`] with a memo of rendered
//! prefixes. The provider replaces the whole context whenever styling is
//! reconfigured, so a memo never outlives the configuration that filled it.
//!
//! Byte-exact escapes:
//!
//! | effect    | escape          |
//! |-----------|-----------------|
//! | color     | `ESC[38;5;{n}m` |
//! | bold      | `ESC[1m`        |
//! | italic    | `ESC[3m`        |
//! | underline | `ESC[4m`        |
//! | reset     | `ESC[0m`        |

use super::error::{LoggerError, Result};
use super::source::{NameSegment, SourceKey};
use parking_lot::RwLock;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const BOLD: &str = "\u{1b}[1m";
pub const ITALIC: &str = "\u{1b}[3m";
pub const UNDERLINE: &str = "\u{1b}[4m";
pub const RESET: &str = "\u{1b}[0m";

/// Keys longer than this are cut by [`KeyReplace::Truncate`]
pub const DEFAULT_KEY_MAX_CHARS: usize = 16;

/// Names shorter than this are never collapsed
const MIN_COLLAPSE_CHARS: usize = 5;

/// Memo entries kept per context before it starts over
pub const MAX_CACHED_NAMES: usize = 1024;

/// 256-color foreground escape
pub fn ansi_256(index: u8) -> String {
    format!("\u{1b}[38;5;{}m", index)
}

fn edge_char_codes(name: &str) -> Option<(u32, u32)> {
    let first = name.chars().next()? as u32;
    let last = name.chars().next_back()? as u32;
    Some((first, last))
}

pub type ColorFn = Arc<dyn Fn(&str) -> String + Send + Sync>;
pub type PredicateFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;
pub type ReplaceFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How a name picks its foreground color
///
/// The presets hash the first and last character codes `f` and `l` of a
/// name into the 256-color palette:
///
/// - `Muted`: `22 + (f % 12) + (l % 6) * 36`
/// - `Bright`: `76 + (f % 12) + (l % 4) * 36`
/// - `Grayscale`: `232 + (f + l) % 24`
#[derive(Clone)]
pub enum ColorScheme {
    Bright,
    Muted,
    Grayscale,
    /// Returns the full escape sequence to emit before the name
    Custom(ColorFn),
}

impl ColorScheme {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        ColorScheme::Custom(Arc::new(f))
    }

    /// Palette index of a preset, `None` for custom schemes and empty names
    pub fn palette_index(&self, name: &str) -> Option<u8> {
        let (f, l) = edge_char_codes(name)?;
        let index = match self {
            ColorScheme::Muted => 22 + (f % 12) + (l % 6) * 36,
            ColorScheme::Bright => 76 + (f % 12) + (l % 4) * 36,
            ColorScheme::Grayscale => 232 + (f + l) % 24,
            ColorScheme::Custom(_) => return None,
        };
        Some(index as u8)
    }

    pub fn escape(&self, name: &str) -> String {
        match self {
            ColorScheme::Custom(f) => f(name),
            preset => preset
                .palette_index(name)
                .map(ansi_256)
                .unwrap_or_default(),
        }
    }
}

impl fmt::Debug for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Bright => write!(f, "Bright"),
            ColorScheme::Muted => write!(f, "Muted"),
            ColorScheme::Grayscale => write!(f, "Grayscale"),
            ColorScheme::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl FromStr for ColorScheme {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bright" => Ok(ColorScheme::Bright),
            "muted" => Ok(ColorScheme::Muted),
            "grayscale" | "greyscale" => Ok(ColorScheme::Grayscale),
            _ => Err(LoggerError::config(
                "color",
                format!("unknown preset '{}', expected bright, muted or grayscale", s),
            )),
        }
    }
}

/// Test deciding whether a name gets an attribute
#[derive(Clone)]
pub enum NamePattern {
    Regex(Regex),
    Predicate(PredicateFn),
}

impl NamePattern {
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(NamePattern::Regex)
            .map_err(|e| LoggerError::pattern("name pattern", e))
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        NamePattern::Predicate(Arc::new(f))
    }

    pub fn test(&self, name: &str) -> bool {
        match self {
            NamePattern::Regex(re) => re.is_match(name),
            NamePattern::Predicate(f) => f(name),
        }
    }
}

impl From<Regex> for NamePattern {
    fn from(re: Regex) -> Self {
        NamePattern::Regex(re)
    }
}

impl fmt::Debug for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePattern::Regex(re) => write!(f, "Regex({})", re.as_str()),
            NamePattern::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// Rewrites a name before display
#[derive(Clone)]
pub enum NameReplace {
    /// Strip `[a-z- ]` from names of five or more characters,
    /// e.g. `RequestHandler` becomes `RH`
    Collapse,
    Custom(ReplaceFn),
}

impl NameReplace {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        NameReplace::Custom(Arc::new(f))
    }

    /// The replacement text, or `None` when the name displays as is
    pub fn apply(&self, name: &str) -> Option<String> {
        let replaced = match self {
            NameReplace::Collapse => {
                if name.chars().count() < MIN_COLLAPSE_CHARS {
                    return None;
                }
                name.chars()
                    .filter(|c| !matches!(c, 'a'..='z' | '-' | ' '))
                    .collect::<String>()
            }
            NameReplace::Custom(f) => f(name),
        };
        (!replaced.is_empty() && replaced != name).then_some(replaced)
    }
}

impl fmt::Debug for NameReplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameReplace::Collapse => write!(f, "Collapse"),
            NameReplace::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Rewrites a stringified key before display
#[derive(Clone)]
pub enum KeyReplace {
    /// Cut keys beyond [`DEFAULT_KEY_MAX_CHARS`] characters
    Truncate,
    TruncateAt(usize),
    Custom(ReplaceFn),
}

impl KeyReplace {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        KeyReplace::Custom(Arc::new(f))
    }

    pub fn apply(&self, key: &str) -> Option<String> {
        let replaced = match self {
            KeyReplace::Truncate => truncate_chars(key, DEFAULT_KEY_MAX_CHARS)?,
            KeyReplace::TruncateAt(max) => truncate_chars(key, *max)?,
            KeyReplace::Custom(f) => f(key),
        };
        (replaced != key).then_some(replaced)
    }
}

impl fmt::Debug for KeyReplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyReplace::Truncate => write!(f, "Truncate"),
            KeyReplace::TruncateAt(max) => write!(f, "TruncateAt({})", max),
            KeyReplace::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> Option<String> {
    if s.chars().count() <= max {
        return None;
    }
    let mut cut: String = s.chars().take(max).collect();
    cut.push('…');
    Some(cut)
}

/// Styling options for console output
///
/// # Example
///
/// ```
/// use named_logger::{ColorScheme, NamePattern, NameReplace, StyleConfig};
///
/// let style = StyleConfig::new()
///     .color(ColorScheme::Bright)
///     .bold(NamePattern::regex("Service$").unwrap())
///     .replace(NameReplace::Collapse);
/// ```
#[derive(Debug, Clone)]
pub struct StyleConfig {
    pub color: Option<ColorScheme>,
    pub bold: Option<NamePattern>,
    pub italic: Option<NamePattern>,
    pub underline: Option<NamePattern>,
    pub replace: Option<NameReplace>,
    pub replace_key: Option<KeyReplace>,
}

impl StyleConfig {
    pub fn new() -> Self {
        Self {
            color: Some(ColorScheme::Muted),
            bold: None,
            italic: None,
            underline: None,
            replace: None,
            replace_key: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, scheme: ColorScheme) -> Self {
        self.color = Some(scheme);
        self
    }

    /// Keep attributes but emit no color escape
    #[must_use = "builder methods return a new value"]
    pub fn no_color(mut self) -> Self {
        self.color = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn bold(mut self, pattern: NamePattern) -> Self {
        self.bold = Some(pattern);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn italic(mut self, pattern: NamePattern) -> Self {
        self.italic = Some(pattern);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn underline(mut self, pattern: NamePattern) -> Self {
        self.underline = Some(pattern);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn replace(mut self, rule: NameReplace) -> Self {
        self.replace = Some(rule);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn replace_key(mut self, rule: KeyReplace) -> Self {
        self.replace_key = Some(rule);
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape emitted before a display string, and the reset emitted after it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledName {
    pub prefix: String,
    /// [`RESET`] when an attribute was applied, empty otherwise
    pub suffix: &'static str,
}

impl StyledName {
    pub fn wrap(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + text.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(text);
        out.push_str(self.suffix);
        out
    }
}

/// One style epoch: a configuration and the prefixes derived from it
///
/// Memo writes are idempotent, so concurrent renders of the same name at
/// worst compute the same entry twice. The memo holds at most
/// [`MAX_CACHED_NAMES`] entries; past that it is cleared and refilled on
/// demand, which keeps per-request keys from growing it without bound.
pub struct StyleContext {
    config: StyleConfig,
    memo: RwLock<HashMap<String, StyledName>>,
}

impl StyleContext {
    pub fn new(config: StyleConfig) -> Self {
        let mut memo = HashMap::new();
        // unnamed segments render as nothing
        memo.insert(String::new(), StyledName::default());
        Self {
            config,
            memo: RwLock::new(memo),
        }
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    /// Memoized style for a display string
    pub fn prefix(&self, name: &str) -> StyledName {
        if let Some(found) = self.memo.read().get(name).cloned() {
            return found;
        }
        let styled = self.compute(name);
        self.store(name, styled)
    }

    /// Insert unless present, returning whichever entry ends up memoized
    fn store(&self, display: &str, styled: StyledName) -> StyledName {
        let mut memo = self.memo.write();
        if let Some(found) = memo.get(display) {
            return found.clone();
        }
        if memo.len() >= MAX_CACHED_NAMES {
            memo.clear();
            memo.insert(String::new(), StyledName::default());
        }
        memo.insert(display.to_string(), styled.clone());
        styled
    }

    fn compute(&self, name: &str) -> StyledName {
        let mut prefix = self
            .config
            .color
            .as_ref()
            .map(|scheme| scheme.escape(name))
            .unwrap_or_default();

        let mut attributed = false;
        for (pattern, code) in [
            (&self.config.bold, BOLD),
            (&self.config.italic, ITALIC),
            (&self.config.underline, UNDERLINE),
        ] {
            if pattern.as_ref().is_some_and(|p| p.test(name)) {
                prefix.push_str(code);
                attributed = true;
            }
        }

        StyledName {
            prefix,
            suffix: if attributed { RESET } else { "" },
        }
    }

    /// Style of `display`, taken from `original` unless it already has one
    fn seed(&self, display: &str, original: &str) -> StyledName {
        if let Some(found) = self.memo.read().get(display).cloned() {
            return found;
        }
        let styled = self.prefix(original);
        self.store(display, styled)
    }

    /// A name as displayed: replaced if a rule applies, styled from the original
    pub fn render_name(&self, name: &str) -> String {
        match self.config.replace.as_ref().and_then(|rule| rule.apply(name)) {
            Some(replaced) => self.seed(&replaced, name).wrap(&replaced),
            None => self.prefix(name).wrap(name),
        }
    }

    /// A key as displayed, `#key`
    pub fn render_key(&self, key: &SourceKey) -> String {
        let raw = key.to_string();
        let original = format!("#{}", raw);
        match self
            .config
            .replace_key
            .as_ref()
            .and_then(|rule| rule.apply(&raw))
        {
            Some(replaced) => {
                let display = format!("#{}", replaced);
                self.seed(&display, &original).wrap(&display)
            }
            None => self.prefix(&original).wrap(&original),
        }
    }

    pub fn render_segment(&self, segment: &NameSegment) -> String {
        let mut out = self.render_name(&segment.name);
        if let Some(key) = &segment.key {
            out.push_str(&self.render_key(key));
        }
        out
    }

    pub fn is_cached(&self, display: &str) -> bool {
        self.memo.read().contains_key(display)
    }

    /// Number of memoized entries, including the empty name; never more
    /// than [`MAX_CACHED_NAMES`]
    pub fn cached_len(&self) -> usize {
        self.memo.read().len()
    }
}

impl fmt::Debug for StyleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleContext")
            .field("config", &self.config)
            .field("cached", &self.cached_len())
            .finish()
    }
}
