//! # Segment Module
//!
//! Parametric segment matchers decide whether a single raw path segment can be
//! bound to a named, typed parameter.
//!
//! ## Overview
//!
//! A [`ParamMatcher`] is a pure function from a raw segment to either a typed
//! [`ParamValue`] or `None`. `None` is not an error: it tells the traversal that
//! this segment kind does not apply at the current node, so it moves on to the
//! wildcard child (if any).
//!
//! Every matcher declares the [`ParamKind`] it produces. The kind decides which
//! namespace of the [`MatchResult`](crate::router::MatchResult) the value is
//! recorded into, so a route declared with an integer matcher is always read
//! back with [`MatchResult::integer_param`](crate::router::MatchResult::integer_param).
//!
//! ## Built-in Matchers
//!
//! - [`StringSegment`] - always succeeds, value is the raw segment
//! - [`IntegerSegment`] - succeeds when the segment is a base-10 `i64`
//! - [`FnSegment`] - closure-backed matcher supplied by the host
//!
//! ## Example
//!
//! ```rust
//! use routetree::segment::{IntegerSegment, ParamMatcher, ParamValue};
//!
//! let id = IntegerSegment::new("id");
//! assert_eq!(id.attempt_match("42"), Some(ParamValue::Integer(42)));
//! assert_eq!(id.attempt_match("abc"), None);
//! ```

mod builtin;

pub use builtin::{FnSegment, IntegerSegment, StringSegment};

use std::fmt;
use std::sync::Arc;

/// The result kind a matcher declares up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Recorded into the integer namespace
    Integer,
    /// Recorded into the string namespace
    String,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Integer => f.write_str("int"),
            ParamKind::String => f.write_str("string"),
        }
    }
}

/// A typed value produced by a successful segment match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Integer(i64),
    String(String),
}

impl ParamValue {
    /// The namespace this value belongs to.
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Integer(_) => ParamKind::Integer,
            ParamValue::String(_) => ParamKind::String,
        }
    }
}

/// Converts one raw path segment into a typed value.
///
/// Implementations must be total and side-effect free: the same segment always
/// yields the same outcome, and rejecting a segment is reported as `None`,
/// never as a panic.
///
/// The value returned by [`attempt_match`](Self::attempt_match) must be of the
/// declared [`kind`](Self::kind). A value of the wrong kind is treated as a
/// failed match by the traversal.
pub trait ParamMatcher: fmt::Debug + Send + Sync {
    /// Name under which a successful value is recorded.
    ///
    /// Names are shared with every [`MatchResult`](crate::router::MatchResult)
    /// produced by the tree, so they are handed out as `Arc<str>`.
    fn param_name(&self) -> &Arc<str>;

    /// Declared result kind.
    fn kind(&self) -> ParamKind;

    /// Try to convert `raw` into a value.
    fn attempt_match(&self, raw: &str) -> Option<ParamValue>;
}
