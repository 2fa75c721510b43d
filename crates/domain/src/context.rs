//! Immutable structured context carried by loggers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Structured key/value fields.
pub type Fields = BTreeMap<Box<str>, Value>;

/// Build a [`Fields`] map from key/value pairs.
///
/// Later pairs overwrite earlier ones with the same key.
///
/// ```
/// use effect_log_domain::fields;
/// use serde_json::json;
///
/// let fields = fields([("service", json!("api")), ("attempt", json!(2))]);
/// assert_eq!(fields.len(), 2);
/// ```
pub fn fields<K, V, I>(pairs: I) -> Fields
where
    K: Into<Box<str>>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

/// Accumulated fields plus optional tracing identifiers.
///
/// Every enrichment returns a new value; the receiver is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    data: Fields,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    span_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl Context {
    /// Empty context with no tracing identifiers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context seeded with the given fields.
    #[must_use]
    pub const fn from_fields(data: Fields) -> Self {
        Self {
            data,
            span_id: None,
            trace_id: None,
        }
    }

    /// Accumulated fields.
    #[must_use]
    pub const fn data(&self) -> &Fields {
        &self.data
    }

    /// Current span id, if any.
    #[must_use]
    pub fn span_id(&self) -> Option<&str> {
        self.span_id.as_deref()
    }

    /// Current trace id, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// New context with `extra` merged over the current fields.
    ///
    /// Keys in `extra` win on conflict. Span and trace ids are inherited.
    #[must_use]
    pub fn merge(&self, extra: Fields) -> Self {
        let mut data = self.data.clone();
        data.extend(extra);
        Self {
            data,
            span_id: self.span_id.clone(),
            trace_id: self.trace_id.clone(),
        }
    }

    /// New context with the span replaced.
    ///
    /// The trace id is replaced only when one is supplied, so child spans keep
    /// their parent's trace.
    #[must_use]
    pub fn with_span(&self, span_id: impl Into<String>, trace_id: Option<String>) -> Self {
        Self {
            data: self.data.clone(),
            span_id: Some(span_id.into()),
            trace_id: trace_id.or_else(|| self.trace_id.clone()),
        }
    }

    /// Fields flattened with call-site `extra` fields, which win on conflict.
    #[must_use]
    pub fn flatten_with(&self, extra: Option<Fields>) -> Fields {
        match extra {
            Some(extra) if !extra.is_empty() => {
                let mut data = self.data.clone();
                data.extend(extra);
                data
            },
            _ => self.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn merge_leaves_receiver_untouched() {
        let base = Context::from_fields(fields([("service", "api")]));
        let merged = base.merge(fields([("user_id", 42)]));

        assert_eq!(base.data().len(), 1);
        assert_eq!(merged.data().len(), 2);
        assert_eq!(merged.data().get("user_id"), Some(&json!(42)));
    }

    #[test]
    fn merge_overwrites_conflicting_keys() {
        let context = Context::new()
            .merge(fields([("a", 1)]))
            .merge(fields([("a", 2)]));
        assert_eq!(context.data().get("a"), Some(&json!(2)));
        assert_eq!(context.data().len(), 1);
    }

    #[test]
    fn merge_keeps_tracing_ids() {
        let context = Context::new()
            .with_span("span-1", Some("trace-1".to_string()))
            .merge(fields([("k", "v")]));
        assert_eq!(context.span_id(), Some("span-1"));
        assert_eq!(context.trace_id(), Some("trace-1"));
    }

    #[test]
    fn child_span_inherits_parent_trace() {
        let parent = Context::new().with_span("span-1", Some("trace-1".to_string()));
        let child = parent.with_span("span-2", None);

        assert_eq!(child.span_id(), Some("span-2"));
        assert_eq!(child.trace_id(), Some("trace-1"));
        assert_eq!(parent.span_id(), Some("span-1"));

        let rerooted = child.with_span("span-3", Some("trace-2".to_string()));
        assert_eq!(rerooted.trace_id(), Some("trace-2"));
    }

    #[test]
    fn flatten_prefers_call_site_fields() {
        let context = Context::from_fields(fields([("service", "api"), ("region", "eu")]));
        let flat = context.flatten_with(Some(fields([("service", "override")])));

        assert_eq!(flat.get("service"), Some(&json!("override")));
        assert_eq!(flat.get("region"), Some(&json!("eu")));
        assert_eq!(context.data().get("service"), Some(&json!("api")));
        assert_eq!(context.flatten_with(None), context.data().clone());
    }

    proptest! {
        #[test]
        fn later_merge_always_wins(
            key in "[a-z]{1,8}",
            first in any::<i64>(),
            second in any::<i64>(),
        ) {
            let context = Context::new()
                .merge(fields([(key.as_str(), first)]))
                .merge(fields([(key.as_str(), second)]));
            prop_assert_eq!(context.data().get(key.as_str()), Some(&json!(second)));
            prop_assert_eq!(context.data().len(), 1);
        }

        #[test]
        fn merge_is_a_union(
            left in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..8),
            right in prop::collection::btree_map("[a-z]{1,6}", any::<i32>(), 0..8),
        ) {
            let merged = Context::from_fields(fields(left.clone())).merge(fields(right.clone()));
            for (key, value) in &right {
                prop_assert_eq!(merged.data().get(key.as_str()), Some(&json!(value)));
            }
            for (key, value) in &left {
                if !right.contains_key(key) {
                    prop_assert_eq!(merged.data().get(key.as_str()), Some(&json!(value)));
                }
            }
            let expected_len = left.keys().chain(right.keys()).collect::<std::collections::BTreeSet<_>>().len();
            prop_assert_eq!(merged.data().len(), expected_len);
        }
    }
}
