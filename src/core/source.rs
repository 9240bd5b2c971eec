//! Logger sources: the chain of name segments from the root plus context
//!
//! A [`LogSource`] is immutable. Appending a segment or merging context
//! yields a new source; the segment slice is shared behind an `Arc` and only
//! copied when a child appends to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Key distinguishing instances of the same name, e.g. a request id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for SourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKey::Int(i) => write!(f, "{}", i),
            SourceKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for SourceKey {
    fn from(s: &str) -> Self {
        SourceKey::Str(s.to_string())
    }
}

impl From<String> for SourceKey {
    fn from(s: String) -> Self {
        SourceKey::Str(s)
    }
}

impl From<i64> for SourceKey {
    fn from(i: i64) -> Self {
        SourceKey::Int(i)
    }
}

impl From<i32> for SourceKey {
    fn from(i: i32) -> Self {
        SourceKey::Int(i as i64)
    }
}

impl From<u32> for SourceKey {
    fn from(i: u32) -> Self {
        SourceKey::Int(i as i64)
    }
}

/// Values past `i64::MAX` keep their digits as a string key
impl From<usize> for SourceKey {
    fn from(i: usize) -> Self {
        i64::try_from(i)
            .map(SourceKey::Int)
            .unwrap_or_else(|_| SourceKey::Str(i.to_string()))
    }
}

/// One `{name, key?}` step of a source chain
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameSegment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<SourceKey>,
}

impl NameSegment {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
        }
    }

    pub fn keyed(name: impl Into<String>, key: impl Into<SourceKey>) -> Self {
        Self {
            name: name.into(),
            key: Some(key.into()),
        }
    }

    /// `name#key`, the console and keyed-sink convention
    pub fn rendered(&self) -> String {
        match &self.key {
            Some(key) => format!("{}#{}", self.name, key),
            None => self.name.clone(),
        }
    }

    /// `name (key)`, the convention of the named-sink adapter
    pub fn labeled(&self) -> String {
        match &self.key {
            Some(key) => format!("{} ({})", self.name, key),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSource {
    names: Arc<[NameSegment]>,
    ctx: Value,
}

impl LogSource {
    pub fn root(ctx: Value) -> Self {
        Self {
            names: Arc::from(Vec::new()),
            ctx,
        }
    }

    /// A new source with one more segment; `self` is left untouched
    #[must_use]
    pub fn append(&self, name: impl Into<String>, key: Option<SourceKey>) -> Self {
        let mut names = Vec::with_capacity(self.names.len() + 1);
        names.extend_from_slice(&self.names);
        names.push(NameSegment {
            name: name.into(),
            key,
        });
        Self {
            names: Arc::from(names),
            ctx: self.ctx.clone(),
        }
    }

    /// A new source with the same segments and `partial` applied to the context
    ///
    /// When both the current context and `partial` are objects their keys are
    /// shallow-merged, `partial` winning. Any other combination replaces the
    /// context with `partial`.
    #[must_use]
    pub fn with_context(&self, partial: Value) -> Self {
        let ctx = match (&self.ctx, partial) {
            (Value::Object(existing), Value::Object(partial)) => {
                let mut merged = existing.clone();
                merged.extend(partial);
                Value::Object(merged)
            }
            (_, partial) => partial,
        };
        Self {
            names: Arc::clone(&self.names),
            ctx,
        }
    }

    pub fn names(&self) -> &[NameSegment] {
        &self.names
    }

    pub fn ctx(&self) -> &Value {
        &self.ctx
    }

    pub fn depth(&self) -> usize {
        self.names.len()
    }

    pub fn rendered_names(&self) -> Vec<String> {
        self.names.iter().map(NameSegment::rendered).collect()
    }

    pub fn named_labels(&self) -> Vec<String> {
        self.names.iter().map(NameSegment::labeled).collect()
    }
}

impl Default for LogSource {
    fn default() -> Self {
        Self::root(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usize_keys_never_wrap() {
        assert_eq!(SourceKey::from(7usize), SourceKey::Int(7));

        #[cfg(target_pointer_width = "64")]
        {
            assert_eq!(SourceKey::from(i64::MAX as usize), SourceKey::Int(i64::MAX));
            let key = SourceKey::from(usize::MAX);
            assert_eq!(key, SourceKey::Str(usize::MAX.to_string()));
            assert_eq!(key.to_string(), "18446744073709551615");
        }
    }

    #[test]
    fn test_append_leaves_parent_and_siblings_untouched() {
        let root = LogSource::default();
        let app = root.append("App", None);
        let a = app.append("X", None);
        let b = app.append("Y", None);

        assert_eq!(root.depth(), 0);
        assert_eq!(app.rendered_names(), vec!["App"]);
        assert_eq!(a.rendered_names(), vec!["App", "X"]);
        assert_eq!(b.rendered_names(), vec!["App", "Y"]);
    }

    #[test]
    fn test_render_conventions_differ() {
        let source = LogSource::default()
            .append("App", None)
            .append("Session", Some(42.into()));

        assert_eq!(source.rendered_names(), vec!["App", "Session#42"]);
        assert_eq!(source.named_labels(), vec!["App", "Session (42)"]);
    }

    #[test]
    fn test_with_context_merges_objects() {
        let source = LogSource::root(json!({ "a": 1 }));
        let merged = source.with_context(json!({ "b": 2 }));

        assert_eq!(merged.ctx(), &json!({ "a": 1, "b": 2 }));
        assert_eq!(source.ctx(), &json!({ "a": 1 }));
    }

    #[test]
    fn test_with_context_overrides_existing_keys() {
        let source = LogSource::root(json!({ "a": 1, "b": 1 }));
        let merged = source.with_context(json!({ "b": 2 }));

        assert_eq!(merged.ctx(), &json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn test_with_context_replaces_primitives() {
        let source = LogSource::root(json!(5));
        assert_eq!(source.with_context(json!(7)).ctx(), &json!(7));

        let empty = LogSource::default();
        assert_eq!(empty.with_context(json!({ "a": 1 })).ctx(), &json!({ "a": 1 }));
    }

    #[test]
    fn test_with_context_keeps_segments() {
        let source = LogSource::default().append("Worker", Some("w-1".into()));
        let with = source.with_context(json!({ "job": 3 }));

        assert_eq!(with.names(), source.names());
    }

    #[test]
    fn test_segment_serialization_omits_missing_key() {
        let json = serde_json::to_string(&NameSegment::new("App")).unwrap();
        assert_eq!(json, r#"{"name":"App"}"#);

        let json = serde_json::to_string(&NameSegment::keyed("Page", "home")).unwrap();
        assert_eq!(json, r#"{"name":"Page","key":"home"}"#);
    }
}
