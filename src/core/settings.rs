//! Declarative logging configuration
//!
//! [`LoggingSettings`] is the serde form of [`LoggingConfig`], for policies
//! loaded from a file or an environment variable:
//!
//! ```json
//! {
//!   "min": "debug",
//!   "consoleStyle": {
//!     "color": "bright",
//!     "bold": "Service$",
//!     "replace": "collapse",
//!     "replaceKey": 8
//!   }
//! }
//! ```
//!
//! Level names and regex patterns are validated by the conversion, not by
//! deserialization, so a typo surfaces as a [`LoggerError`] naming the field.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::provider::{ConsoleStyle, LoggingConfig};
use super::style::{ColorScheme, KeyReplace, NamePattern, NameReplace, StyleConfig};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggingSettings {
    /// Level name, case-insensitive; `warning` is accepted for `warn`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_style: Option<ConsoleStyleSettings>,
}

/// `true` / `false`, or an object of style options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConsoleStyleSettings {
    Enabled(bool),
    Custom(StyleSettings),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleSettings {
    /// Preset name, or `false` for no color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Toggle<String>>,
    /// Regex matched against names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<String>,
    /// `true` or `"collapse"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<Toggle<String>>,
    /// `true` for the default length, or a character count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_key: Option<Toggle<usize>>,
}

/// A switch that may carry a value instead of `true`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Toggle<T> {
    Switch(bool),
    Value(T),
}

impl LoggingSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse and convert in one step
    pub fn parse_config(json: &str) -> Result<LoggingConfig> {
        Self::from_json(json)?.try_into()
    }
}

impl TryFrom<LoggingSettings> for LoggingConfig {
    type Error = LoggerError;

    fn try_from(settings: LoggingSettings) -> Result<Self> {
        let mut config = LoggingConfig::new();
        if let Some(min) = settings.min {
            config = config.min(LogLevel::from_str(&min)?);
        }
        if let Some(style) = settings.console_style {
            config = config.console_style(ConsoleStyle::try_from(style)?);
        }
        Ok(config)
    }
}

impl TryFrom<ConsoleStyleSettings> for ConsoleStyle {
    type Error = LoggerError;

    fn try_from(settings: ConsoleStyleSettings) -> Result<Self> {
        match settings {
            ConsoleStyleSettings::Enabled(enabled) => Ok(enabled.into()),
            ConsoleStyleSettings::Custom(style) => Ok(StyleConfig::try_from(style)?.into()),
        }
    }
}

impl TryFrom<StyleSettings> for StyleConfig {
    type Error = LoggerError;

    fn try_from(settings: StyleSettings) -> Result<Self> {
        let mut config = StyleConfig::new();

        config = match settings.color {
            None | Some(Toggle::Switch(true)) => config,
            Some(Toggle::Switch(false)) => config.no_color(),
            Some(Toggle::Value(preset)) => config.color(preset.parse::<ColorScheme>()?),
        };

        if let Some(pattern) = settings.bold {
            config = config.bold(NamePattern::regex(&pattern)?);
        }
        if let Some(pattern) = settings.italic {
            config = config.italic(NamePattern::regex(&pattern)?);
        }
        if let Some(pattern) = settings.underline {
            config = config.underline(NamePattern::regex(&pattern)?);
        }

        config = match settings.replace {
            None | Some(Toggle::Switch(false)) => config,
            Some(Toggle::Switch(true)) => config.replace(NameReplace::Collapse),
            Some(Toggle::Value(rule)) if rule.eq_ignore_ascii_case("collapse") => {
                config.replace(NameReplace::Collapse)
            }
            Some(Toggle::Value(rule)) => {
                return Err(LoggerError::config(
                    "replace",
                    format!("unknown rule '{}', expected collapse", rule),
                ))
            }
        };

        config = match settings.replace_key {
            None | Some(Toggle::Switch(false)) => config,
            Some(Toggle::Switch(true)) => config.replace_key(KeyReplace::Truncate),
            Some(Toggle::Value(0)) => {
                return Err(LoggerError::config(
                    "replaceKey",
                    "truncation length must be at least 1",
                ))
            }
            Some(Toggle::Value(max)) => config.replace_key(KeyReplace::TruncateAt(max)),
        };

        Ok(config)
    }
}

impl FromStr for LoggingSettings {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::style::StyleContext;

    #[test]
    fn test_empty_settings_are_defaults() {
        let config = LoggingSettings::parse_config("{}").unwrap();

        assert_eq!(config.min, None);
        assert!(matches!(config.console_style, ConsoleStyle::Enabled));
    }

    #[test]
    fn test_min_accepts_any_case_and_alias() {
        let config = LoggingSettings::parse_config(r#"{"min":"WARNING"}"#).unwrap();
        assert_eq!(config.min, Some(LogLevel::Warn));

        let config = LoggingSettings::parse_config(r#"{"min":"Trace"}"#).unwrap();
        assert_eq!(config.min, Some(LogLevel::Trace));
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let err = LoggingSettings::parse_config(r#"{"min":"verbose"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }

    #[test]
    fn test_console_style_switch() {
        let config = LoggingSettings::parse_config(r#"{"consoleStyle":false}"#).unwrap();
        assert!(matches!(config.console_style, ConsoleStyle::Disabled));

        let config = LoggingSettings::parse_config(r#"{"consoleStyle":true}"#).unwrap();
        assert!(matches!(config.console_style, ConsoleStyle::Enabled));
    }

    #[test]
    fn test_custom_style_options() {
        let config = LoggingSettings::parse_config(
            r#"{"consoleStyle":{"color":"bright","bold":"Service$","replace":"collapse","replaceKey":4}}"#,
        )
        .unwrap();

        let ConsoleStyle::Custom(style) = config.console_style else {
            panic!("expected custom style");
        };
        let ctx = StyleContext::new(style);

        // collapsed to "AS", styled and bolded from the original name
        let rendered = ctx.render_name("AuthService");
        assert!(rendered.starts_with(&ColorScheme::Bright.escape("AuthService")));
        assert!(rendered.ends_with("\u{1b}[1mAS\u{1b}[0m"));
        assert_eq!(
            ctx.render_key(&"abcdef".into()),
            format!("{}#abcd…", ColorScheme::Bright.escape("#abcdef"))
        );
    }

    #[test]
    fn test_color_off() {
        let settings: StyleSettings = serde_json::from_str(r#"{"color":false}"#).unwrap();
        let style = StyleConfig::try_from(settings).unwrap();
        assert!(style.color.is_none());
    }

    #[test]
    fn test_invalid_pattern_names_option() {
        let err = LoggingSettings::parse_config(r#"{"consoleStyle":{"italic":"("}}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidPattern { .. }));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(LoggingSettings::parse_config(r#"{"consoleStyle":{"color":"neon"}}"#).is_err());
        assert!(LoggingSettings::parse_config(r#"{"consoleStyle":{"replace":"shorten"}}"#).is_err());
        assert!(LoggingSettings::parse_config(r#"{"consoleStyle":{"replaceKey":0}}"#).is_err());
        assert!(LoggingSettings::parse_config(r#"{"minimum":"debug"}"#).is_err());
    }

    #[test]
    fn test_settings_round_trip_through_json() {
        let settings = LoggingSettings {
            min: Some("debug".to_string()),
            console_style: Some(ConsoleStyleSettings::Custom(StyleSettings {
                replace_key: Some(Toggle::Switch(true)),
                ..Default::default()
            })),
        };

        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"min":"debug","consoleStyle":{"replaceKey":true}}"#);
        assert_eq!(json.parse::<LoggingSettings>().unwrap(), settings);
    }
}
