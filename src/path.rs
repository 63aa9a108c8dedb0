//! Request abstraction and the default path-to-segments conversion.
//!
//! The router never looks at raw URLs. Hosts hand it anything implementing
//! [`PathRequest`], which exposes the request path as an ordered list of
//! segments. [`parse_path`] is the default way to obtain those segments from a
//! raw request target such as `/projects/123?expand=true`.

use std::convert::Infallible;
use std::str::FromStr;

/// A request as seen by the router: an ordered sequence of path segments.
///
/// `/projects/123` is expected to be exposed as `["projects", "123"]`.
pub trait PathRequest {
    fn path_segments(&self) -> &[String];
}

/// Split a raw request path into segments.
///
/// Everything from the first `?` on is dropped, the remainder is split on `/`
/// and empty segments (leading, trailing or doubled slashes) are discarded.
///
/// ```rust
/// use routetree::path::parse_path;
///
/// assert_eq!(parse_path("/projects/123?test"), vec!["projects", "123"]);
/// assert!(parse_path("/").is_empty());
/// ```
#[must_use]
pub fn parse_path(raw: &str) -> Vec<String> {
    split_segments(strip_query(raw))
}

/// Remove the query string, if any.
#[must_use]
pub fn strip_query(raw: &str) -> &str {
    match raw.find('?') {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

pub(crate) fn split_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Owned [`PathRequest`] for hosts that have nothing richer to pass along.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedPath {
    segments: Vec<String>,
}

impl SegmentedPath {
    /// Parse a raw request path with [`parse_path`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self {
            segments: parse_path(raw),
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl PathRequest for SegmentedPath {
    fn path_segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<Vec<String>> for SegmentedPath {
    fn from(segments: Vec<String>) -> Self {
        Self { segments }
    }
}

impl FromStr for SegmentedPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
