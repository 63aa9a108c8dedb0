//! Router core module - hot path for request routing.
//!
//! Resolves a sequence of path segments against an immutable
//! [`RouteTreeNode`], one decision per segment:
//!
//! 1. literal child for the exact segment
//! 2. else the parametric child, if its matcher accepts the segment
//! 3. else the wildcard child, capturing the segment
//! 4. else no match
//!
//! Once a branch is taken there is no backtracking. A parametric branch that
//! dead-ends deeper in the tree does not fall back to a wildcard sibling, so
//! route sets must keep precedence unambiguous at every level. In exchange a
//! match costs O(k) in the number of segments.

use std::time::Instant;
use tracing::{debug, warn};

use super::match_result::MatchResult;
use super::node::RouteTreeNode;
use crate::path::{parse_path, split_segments, PathRequest};
use crate::runtime_config::RouterConfig;

/// Walk the tree without logging or timing.
///
/// Returns the handler of the node the path ends on together with the values
/// extracted on the way, or `None` when the path does not route anywhere.
/// A fresh [`MatchResult`] is created per call, so concurrent traversals of
/// one tree never share state.
#[must_use]
pub fn traverse<'t, H, S>(root: &'t RouteTreeNode<H>, segments: &[S]) -> Option<(&'t H, MatchResult)>
where
    S: AsRef<str>,
{
    let mut result = MatchResult::new();
    let mut node = root;
    for segment in segments {
        node = step(node, segment.as_ref(), &mut result)?;
    }
    node.handler().map(|handler| (handler, result))
}

fn step<'t, H>(
    node: &'t RouteTreeNode<H>,
    segment: &str,
    result: &mut MatchResult,
) -> Option<&'t RouteTreeNode<H>> {
    if let Some(child) = node.literal_child(segment) {
        return Some(child);
    }

    if let Some(param) = node.parametric_child() {
        let matcher = param.matcher();
        match matcher.attempt_match(segment) {
            Some(value) if value.kind() == matcher.kind() => {
                result.record(matcher.param_name(), value);
                return Some(param.node());
            }
            Some(value) => {
                warn!(
                    param_name = %matcher.param_name(),
                    declared_kind = %matcher.kind(),
                    produced_kind = %value.kind(),
                    "Parametric matcher produced a value of the wrong kind, treating as no match"
                );
            }
            None => {}
        }
    }

    if let Some(wildcard) = node.wildcard_child() {
        result.push_wildcard(segment);
        return Some(wildcard);
    }

    None
}

/// A successful match against a [`PathRequest`].
///
/// Carries the handler found in the tree, the request that was matched and the
/// extracted parameters. Read parameters with the accessor matching the kind
/// of matcher used when the route was declared; routes declared with
/// [`RouteTreeBuilder::param`](super::RouteTreeBuilder::param) default to
/// strings.
#[derive(Debug)]
pub struct RouteMatch<'t, 'r, H, R: ?Sized> {
    handler: &'t H,
    request: &'r R,
    result: MatchResult,
}

impl<'t, 'r, H, R: ?Sized> RouteMatch<'t, 'r, H, R> {
    #[must_use]
    pub fn handler(&self) -> &'t H {
        self.handler
    }

    #[must_use]
    pub fn request(&self) -> &'r R {
        self.request
    }

    #[must_use]
    pub fn result(&self) -> &MatchResult {
        &self.result
    }

    #[inline]
    #[must_use]
    pub fn integer_param(&self, name: &str) -> Option<i64> {
        self.result.integer_param(name)
    }

    #[inline]
    #[must_use]
    pub fn string_param(&self, name: &str) -> Option<&str> {
        self.result.string_param(name)
    }

    #[inline]
    #[must_use]
    pub fn wildcard_segments(&self) -> &[String] {
        self.result.wildcard_segments()
    }

    #[must_use]
    pub fn into_parts(self) -> (&'t H, &'r R, MatchResult) {
        (self.handler, self.request, self.result)
    }
}

/// Matches requests against route trees.
///
/// Stateless apart from its [`RouterConfig`]; one instance can serve any
/// number of trees and threads. Every attempt is logged at `debug`, and
/// attempts slower than [`RouterConfig::slow_match_threshold`] at `warn`.
#[derive(Debug, Clone, Default)]
pub struct RouteMatcher {
    config: RouterConfig,
}

impl RouteMatcher {
    #[must_use]
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Match a request, keeping a reference to it in the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use routetree::path::SegmentedPath;
    /// use routetree::router::{RouteMatcher, RouteTreeBuilder};
    ///
    /// let tree = RouteTreeBuilder::new()
    ///     .path("/users", RouteTreeBuilder::new()
    ///         .param("name", RouteTreeBuilder::new().handler("get_user")))
    ///     .build()
    ///     .unwrap();
    ///
    /// let request = SegmentedPath::parse("/users/alice");
    /// let matched = RouteMatcher::default().match_request(&tree, &request).unwrap();
    /// assert_eq!(*matched.handler(), "get_user");
    /// assert_eq!(matched.string_param("name"), Some("alice"));
    /// ```
    #[must_use]
    pub fn match_request<'t, 'r, H, R>(
        &self,
        root: &'t RouteTreeNode<H>,
        request: &'r R,
    ) -> Option<RouteMatch<'t, 'r, H, R>>
    where
        R: PathRequest + ?Sized,
    {
        let (handler, result) = self.match_segments(root, request.path_segments())?;
        Some(RouteMatch {
            handler,
            request,
            result,
        })
    }

    /// Match a raw path such as `/users/42?verbose=1`.
    ///
    /// The query string is dropped unless [`RouterConfig::strip_query`] is
    /// disabled, in which case `?` is treated as an ordinary character.
    #[must_use]
    pub fn match_path<'t, H>(
        &self,
        root: &'t RouteTreeNode<H>,
        raw_path: &str,
    ) -> Option<(&'t H, MatchResult)> {
        let segments = if self.config.strip_query {
            parse_path(raw_path)
        } else {
            split_segments(raw_path)
        };
        self.match_segments(root, &segments)
    }

    /// Match an already segmented path.
    #[must_use]
    pub fn match_segments<'t, H, S>(
        &self,
        root: &'t RouteTreeNode<H>,
        segments: &[S],
    ) -> Option<(&'t H, MatchResult)>
    where
        S: AsRef<str>,
    {
        debug!(segment_count = segments.len(), "Route match attempt");

        let match_start = Instant::now();
        let outcome = traverse(root, segments);
        let match_duration = match_start.elapsed();

        if match_duration > self.config.slow_match_threshold() {
            warn!(
                segment_count = segments.len(),
                matched = outcome.is_some(),
                duration_us = match_duration.as_micros(),
                "Slow route matching detected"
            );
        }

        match &outcome {
            Some((_, result)) => debug!(
                segment_count = segments.len(),
                params = ?result,
                duration_us = match_duration.as_micros(),
                "Route matched"
            ),
            None => debug!(
                segment_count = segments.len(),
                duration_us = match_duration.as_micros(),
                "No route matched"
            ),
        }

        outcome
    }
}
