use std::fmt;
use std::sync::Arc;

use super::{ParamKind, ParamMatcher, ParamValue};

/// Matches any segment and records it verbatim.
///
/// This is the matcher installed by
/// [`RouteTreeBuilder::param`](crate::router::RouteTreeBuilder::param).
#[derive(Debug, Clone)]
pub struct StringSegment {
    name: Arc<str>,
}

impl StringSegment {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }
}

impl ParamMatcher for StringSegment {
    fn param_name(&self) -> &Arc<str> {
        &self.name
    }

    fn kind(&self) -> ParamKind {
        ParamKind::String
    }

    fn attempt_match(&self, raw: &str) -> Option<ParamValue> {
        Some(ParamValue::String(raw.to_owned()))
    }
}

/// Matches base-10 integers that fit in an `i64`.
///
/// Empty segments, segments with any non-digit character (apart from a single
/// leading sign) and values outside the `i64` range are rejected.
#[derive(Debug, Clone)]
pub struct IntegerSegment {
    name: Arc<str>,
}

impl IntegerSegment {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }
}

impl ParamMatcher for IntegerSegment {
    fn param_name(&self) -> &Arc<str> {
        &self.name
    }

    fn kind(&self) -> ParamKind {
        ParamKind::Integer
    }

    fn attempt_match(&self, raw: &str) -> Option<ParamValue> {
        raw.parse::<i64>().ok().map(ParamValue::Integer)
    }
}

type MatchFn = dyn Fn(&str) -> Option<ParamValue> + Send + Sync;

/// Host-supplied matcher backed by a closure.
///
/// Use the typed constructors so the declared kind always agrees with what the
/// closure produces:
///
/// ```rust
/// use routetree::segment::{FnSegment, ParamMatcher, ParamValue};
///
/// let slug = FnSegment::string("slug", |raw| raw.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
/// assert!(slug.attempt_match("hello-world").is_some());
/// assert!(slug.attempt_match("Hello").is_none());
///
/// let hex = FnSegment::integer("color", |raw| i64::from_str_radix(raw, 16).ok());
/// assert_eq!(hex.attempt_match("ff"), Some(ParamValue::Integer(255)));
/// ```
#[derive(Clone)]
pub struct FnSegment {
    name: Arc<str>,
    kind: ParamKind,
    func: Arc<MatchFn>,
}

impl FnSegment {
    /// Accepts the raw segment as a string value when `accept` returns true.
    pub fn string<F>(name: impl Into<Arc<str>>, accept: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ParamKind::String,
            func: Arc::new(move |raw: &str| accept(raw).then(|| ParamValue::String(raw.to_owned()))),
        }
    }

    /// Records whatever integer `parse` extracts from the segment.
    pub fn integer<F>(name: impl Into<Arc<str>>, parse: F) -> Self
    where
        F: Fn(&str) -> Option<i64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind: ParamKind::Integer,
            func: Arc::new(move |raw: &str| parse(raw).map(ParamValue::Integer)),
        }
    }
}

impl fmt::Debug for FnSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSegment")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

impl ParamMatcher for FnSegment {
    fn param_name(&self) -> &Arc<str> {
        &self.name
    }

    fn kind(&self) -> ParamKind {
        self.kind
    }

    fn attempt_match(&self, raw: &str) -> Option<ParamValue> {
        (self.func)(raw)
    }
}
