//! Property-based tests for named_logger using proptest

use named_logger::prelude::*;
use named_logger::{EnabledKinds, NameSegment, SourceKey, StyleContext};
use proptest::prelude::*;
use serde_json::{json, Value};

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Trace),
        Just(LogLevel::Debug),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

fn any_kind() -> impl Strategy<Value = LogKind> {
    prop::sample::select(LogKind::ALL.to_vec())
}

fn any_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 _-]{0,20}"
}

// ============================================================================
// Level / kind model
// ============================================================================

proptest! {
    /// Kind inclusion depends on severity only, never on category
    #[test]
    fn test_meets_minimum_is_severity_order(kind in any_kind(), min in any_level()) {
        prop_assert_eq!(kind.meets_minimum(min), kind.level() >= min);
        prop_assert_eq!(kind.meets_minimum(min), min.bits() <= kind.bits());
    }

    /// Enabled mask agrees with the per-kind predicate
    #[test]
    fn test_enabled_kinds_match_predicate(min in any_level()) {
        let enabled = EnabledKinds::resolve(&named_logger::core::EffectiveIncludes::new(min));
        for kind in LogKind::ALL {
            prop_assert_eq!(enabled.contains(kind), kind.level() >= min);
        }
    }

    /// Level names parse back in any letter case
    #[test]
    fn test_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let name = if lower { level.to_str().to_lowercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    /// Meta bits decode to the kind they came from
    #[test]
    fn test_meta_bits_decode(kind in any_kind()) {
        let meta = LogMeta::from_bits(kind.bits()).unwrap();
        prop_assert_eq!(meta, kind.meta());
        prop_assert_eq!(LogKind::encode(meta.level, meta.category), Some(kind));
    }
}

// ============================================================================
// Sources
// ============================================================================

proptest! {
    /// Appending never changes the parent or its other children
    #[test]
    fn test_append_is_persistent(
        names in prop::collection::vec(any_name(), 0..6),
        a in any_name(),
        b in any_name(),
    ) {
        let parent = names
            .iter()
            .fold(LogSource::default(), |source, name| source.append(name.clone(), None));
        let before = parent.rendered_names();

        let left = parent.append(a.clone(), None);
        let right = parent.append(b.clone(), Some(SourceKey::Int(1)));

        prop_assert_eq!(parent.rendered_names(), before.clone());
        prop_assert_eq!(left.depth(), names.len() + 1);
        prop_assert_eq!(&left.names()[..names.len()], parent.names());
        prop_assert_eq!(right.names().last(), Some(&NameSegment::keyed(b, 1)));
    }

    /// Object contexts merge with the newer keys winning
    #[test]
    fn test_context_merge(x in any::<i64>(), y in any::<i64>(), z in any::<i64>()) {
        let source = LogSource::root(json!({ "x": x, "y": y }));
        let merged = source.with_context(json!({ "y": z }));

        prop_assert_eq!(merged.ctx(), &json!({ "x": x, "y": z }));
        prop_assert_eq!(source.ctx(), &json!({ "x": x, "y": y }));
    }

    /// Non-object contexts are replaced
    #[test]
    fn test_context_replace(old in any::<i64>(), new in any::<i64>()) {
        let source = LogSource::root(Value::from(old));
        let replaced = source.with_context(Value::from(new));
        prop_assert_eq!(replaced.ctx(), &Value::from(new));
    }
}

// ============================================================================
// Styling
// ============================================================================

proptest! {
    /// Repeated lookups within one context return the same prefix
    #[test]
    fn test_prefix_idempotent(name in any_name()) {
        let ctx = StyleContext::new(StyleConfig::default());
        let first = ctx.prefix(&name);
        let len = ctx.cached_len();

        prop_assert_eq!(ctx.prefix(&name), first);
        prop_assert_eq!(ctx.cached_len(), len);
    }

    /// Presets stay inside their palette ranges
    #[test]
    fn test_preset_ranges(name in any_name()) {
        let muted = ColorScheme::Muted.palette_index(&name).unwrap();
        let bright = ColorScheme::Bright.palette_index(&name).unwrap();
        let gray = ColorScheme::Grayscale.palette_index(&name).unwrap();

        prop_assert!((22..=213).contains(&muted));
        prop_assert!((76..=195).contains(&bright));
        prop_assert!(gray >= 232);
    }

    /// Collapsing never yields an empty or unchanged name
    #[test]
    fn test_collapse_result(name in any_name()) {
        if let Some(collapsed) = NameReplace::Collapse.apply(&name) {
            prop_assert!(!collapsed.is_empty());
            prop_assert_ne!(&collapsed, &name);
            prop_assert!(collapsed.chars().all(|c| !matches!(c, 'a'..='z' | '-' | ' ')));
        }
    }

    /// Truncated keys keep the cut length plus the ellipsis
    #[test]
    fn test_truncate_length(key in "[a-z0-9]{0,40}", max in 1usize..20) {
        match KeyReplace::TruncateAt(max).apply(&key) {
            Some(cut) => {
                prop_assert!(key.chars().count() > max);
                prop_assert_eq!(cut.chars().count(), max + 1);
                prop_assert!(cut.ends_with('…'));
            }
            None => {
                prop_assert!(key.chars().count() <= max);
            }
        }
    }
}
