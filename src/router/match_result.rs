use serde::{Serialize, Serializer};
use smallvec::{Array, SmallVec};
use std::collections::HashMap;
use std::sync::Arc;

use crate::segment::ParamValue;

/// Maximum number of parameters per namespace before heap allocation.
/// Most routes bind four or fewer parameters (e.g. `/users/:id/posts/:post_id`).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Integer parameters, keyed by the name shared with the route tree.
pub type IntegerParamVec = SmallVec<[(Arc<str>, i64); MAX_INLINE_PARAMS]>;

/// String parameters, keyed by the name shared with the route tree.
pub type StringParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Segments captured by wildcard nodes, in traversal order.
pub type WildcardVec = SmallVec<[String; MAX_INLINE_PARAMS]>;

/// Values extracted from a path during a single traversal.
///
/// Three independent namespaces:
///
/// - integer parameters, filled by matchers of kind
///   [`ParamKind::Integer`](crate::segment::ParamKind::Integer)
/// - string parameters, filled by every other matcher
/// - an append-only list of wildcard-captured segments
///
/// A name is bound in at most one namespace. When a path binds the same name
/// twice, the later value wins, even if it moves the name to the other
/// namespace.
///
/// Each traversal starts from an empty result and owns it exclusively. Literal
/// segments never write into it, so matching a purely literal route returns an
/// empty result.
///
/// Storage uses `SmallVec` so the common case does not touch the heap for the
/// parameter lists themselves. Parameter names are `Arc<str>` clones of the
/// names held by the matchers in the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    #[serde(rename = "integers", serialize_with = "serialize_named")]
    integer_params: IntegerParamVec,
    #[serde(rename = "strings", serialize_with = "serialize_named")]
    string_params: StringParamVec,
    #[serde(rename = "wildcards")]
    wildcard_segments: WildcardVec,
}

impl MatchResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Integer value bound to `name`, if an integer matcher recorded one.
    #[inline]
    #[must_use]
    pub fn integer_param(&self, name: &str) -> Option<i64> {
        self.integer_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| *v)
    }

    /// String value bound to `name`, if a string matcher recorded one.
    #[inline]
    #[must_use]
    pub fn string_param(&self, name: &str) -> Option<&str> {
        self.string_params
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Wildcard-captured segments in traversal order; empty if none.
    #[inline]
    #[must_use]
    pub fn wildcard_segments(&self) -> &[String] {
        &self.wildcard_segments
    }

    pub fn integer_params(&self) -> impl Iterator<Item = (&str, i64)> {
        self.integer_params.iter().map(|(k, v)| (k.as_ref(), *v))
    }

    pub fn string_params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.string_params
            .iter()
            .map(|(k, v)| (k.as_ref(), v.as_str()))
    }

    /// True when nothing was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.integer_params.is_empty()
            && self.string_params.is_empty()
            && self.wildcard_segments.is_empty()
    }

    /// Copy the integer namespace into a `HashMap`.
    /// Note: This allocates - use `integer_param()` in hot paths instead
    #[must_use]
    pub fn integer_params_map(&self) -> HashMap<String, i64> {
        self.integer_params()
            .map(|(k, v)| (k.to_owned(), v))
            .collect()
    }

    /// Copy the string namespace into a `HashMap`.
    /// Note: This allocates - use `string_param()` in hot paths instead
    #[must_use]
    pub fn string_params_map(&self) -> HashMap<String, String> {
        self.string_params()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect()
    }

    /// Record a matcher's value into the namespace of its variant.
    ///
    /// Any earlier binding of `name`, in either namespace, is replaced.
    pub(crate) fn record(&mut self, name: &Arc<str>, value: ParamValue) {
        match value {
            ParamValue::Integer(v) => {
                self.string_params.retain(|(k, _)| *k != *name);
                upsert(&mut self.integer_params, name, v);
            }
            ParamValue::String(v) => {
                self.integer_params.retain(|(k, _)| *k != *name);
                upsert(&mut self.string_params, name, v);
            }
        }
    }

    pub(crate) fn push_wildcard(&mut self, segment: &str) {
        self.wildcard_segments.push(segment.to_owned());
    }
}

fn upsert<A, V>(params: &mut SmallVec<A>, name: &Arc<str>, value: V)
where
    A: Array<Item = (Arc<str>, V)>,
{
    match params.iter_mut().find(|(k, _)| k == name) {
        Some((_, slot)) => *slot = value,
        None => params.push((Arc::clone(name), value)),
    }
}

fn serialize_named<A, V, S>(params: &SmallVec<A>, serializer: S) -> Result<S::Ok, S::Error>
where
    A: Array<Item = (Arc<str>, V)>,
    V: Serialize,
    S: Serializer,
{
    serializer.collect_map(params.iter().map(|(k, v)| (k.as_ref(), v)))
}
