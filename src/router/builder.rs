//! Builders for route trees.
//!
//! [`RouteTreeBuilder`] is the declarative entry point: it mirrors the shape of
//! the tree in source code, one nested builder per level. [`SingleRouteBuilder`]
//! describes one flat route and is meant to be combined with
//! [`RouteTreeNode::merge`].
//!
//! Both sit on top of a crate-private mutable staging type that is turned into
//! an immutable [`RouteTreeNode`] once, at `build()` time. Configuration errors
//! (invalid literal segments, a second parametric or wildcard child on one
//! node) are reported by `build()` and never reach match time.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::node::{ParametricChild, RouteTreeNode};
use crate::error::RouteConfigError;
use crate::segment::{ParamMatcher, StringSegment};

/// Unreserved URL characters. Literal segments outside this set are rejected.
static VALID_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[A-Za-z0-9_\-.~]+$").expect("segment regex must compile")
});

const PATH_PREFIX: char = '/';
const PARAM_PREFIXES: [&str; 2] = ["/:", ":"];

/// Mutable accumulator for one node while a tree is being assembled.
///
/// Literal children stay mutable so that `a/b/c` and `a/b/d` share the `a`
/// and `a/b` nodes. Parametric and wildcard children are single slots that are
/// filled with finished nodes.
pub(crate) struct RouteTreeNodeBuilder<H> {
    handler: Option<H>,
    literal_children: HashMap<String, RouteTreeNodeBuilder<H>>,
    parametric_child: Option<(Arc<dyn ParamMatcher>, RouteTreeNode<H>)>,
    wildcard_child: Option<RouteTreeNode<H>>,
}

impl<H> Default for RouteTreeNodeBuilder<H> {
    fn default() -> Self {
        Self {
            handler: None,
            literal_children: HashMap::new(),
            parametric_child: None,
            wildcard_child: None,
        }
    }
}

impl<H> RouteTreeNodeBuilder<H> {
    /// Overwrites any handler previously set on this node.
    pub(crate) fn set_handler(&mut self, handler: H) {
        self.handler = Some(handler);
    }

    /// Attach `child` under a literal path of one or more segments.
    ///
    /// Intermediate nodes are created or reused. If the final segment already
    /// exists, `child` is folded into it (see [`absorb`](Self::absorb)).
    pub(crate) fn add_path_segment_child(
        &mut self,
        path: &str,
        child: RouteTreeNode<H>,
    ) -> Result<(), RouteConfigError> {
        let segments = split_literal_path(path)?;

        let mut target = self;
        for segment in segments {
            target = target
                .literal_children
                .entry(segment.to_owned())
                .or_default();
        }
        target.absorb(child)
    }

    pub(crate) fn set_parametric_child(
        &mut self,
        matcher: Arc<dyn ParamMatcher>,
        child: RouteTreeNode<H>,
    ) -> Result<(), RouteConfigError> {
        if matcher.param_name().is_empty() {
            return Err(RouteConfigError::EmptyParamName);
        }
        if let Some((existing, _)) = &self.parametric_child {
            return Err(RouteConfigError::DuplicateParametricChild {
                existing: existing.param_name().to_string(),
                rejected: matcher.param_name().to_string(),
            });
        }
        self.parametric_child = Some((matcher, child));
        Ok(())
    }

    pub(crate) fn set_wildcard_child(
        &mut self,
        child: RouteTreeNode<H>,
    ) -> Result<(), RouteConfigError> {
        if self.wildcard_child.is_some() {
            return Err(RouteConfigError::DuplicateWildcardChild);
        }
        self.wildcard_child = Some(child);
        Ok(())
    }

    /// Fold a finished node into this one.
    ///
    /// Literal children merge recursively, a handler on `node` replaces ours,
    /// and parametric/wildcard children go through the single-slot checks.
    fn absorb(&mut self, node: RouteTreeNode<H>) -> Result<(), RouteConfigError> {
        let (handler, literal_children, parametric_child, wildcard_child) = node.into_parts();

        if let Some(handler) = handler {
            self.set_handler(handler);
        }
        for (segment, child) in literal_children {
            self.literal_children
                .entry(segment)
                .or_default()
                .absorb(child)?;
        }
        if let Some(parametric_child) = parametric_child {
            let (matcher, child) = parametric_child.into_parts();
            self.set_parametric_child(matcher, child)?;
        }
        if let Some(wildcard_child) = wildcard_child {
            self.set_wildcard_child(wildcard_child)?;
        }
        Ok(())
    }

    /// Snapshot into an immutable node.
    pub(crate) fn create_node(self) -> RouteTreeNode<H> {
        let literal_children = self
            .literal_children
            .into_iter()
            .map(|(segment, builder)| (segment, builder.create_node()))
            .collect();
        let parametric_child = self
            .parametric_child
            .map(|(matcher, child)| ParametricChild::new(matcher, child));

        RouteTreeNode::from_parts(
            self.handler,
            literal_children,
            parametric_child,
            self.wildcard_child,
        )
    }
}

/// Split and validate a literal path. One trailing `/` is tolerated.
fn split_literal_path(path: &str) -> Result<Vec<&str>, RouteConfigError> {
    let trimmed = path.strip_suffix(PATH_PREFIX).unwrap_or(path);
    let segments: Vec<&str> = trimmed.split(PATH_PREFIX).collect();

    if let Some(bad) = segments.iter().find(|s| !VALID_SEGMENT.is_match(s)) {
        return Err(RouteConfigError::InvalidSegment {
            path: path.to_owned(),
            segment: (*bad).to_owned(),
        });
    }
    Ok(segments)
}

fn strip_param_prefix(name: &str) -> &str {
    PARAM_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
}

/// Declarative, nested route tree builder.
///
/// Each level of the tree is described by its own builder, which is fully
/// built before it is attached to its parent, so trees are assembled bottom-up.
///
/// # Example
///
/// ```rust
/// use routetree::router::{RouteMatcher, RouteTreeBuilder};
/// use routetree::segment::IntegerSegment;
///
/// let tree = RouteTreeBuilder::new()
///     .handler("home")
///     .path("/projects", RouteTreeBuilder::new()
///         .handler("list_projects")
///         .path("/new", RouteTreeBuilder::new().handler("new_project"))
///         .param_with(IntegerSegment::new("project_id"), RouteTreeBuilder::new()
///             .handler("get_project")
///             .path("/todos", RouteTreeBuilder::new().handler("list_todos"))))
///     .build()
///     .expect("valid routes");
///
/// let matcher = RouteMatcher::default();
/// let (handler, result) = matcher.match_path(&tree, "/projects/42/todos").unwrap();
/// assert_eq!(*handler, "list_todos");
/// assert_eq!(result.integer_param("project_id"), Some(42));
/// ```
///
/// # Errors
///
/// Builder methods never fail on the spot. The first configuration error, from
/// this builder or any child attached to it, is kept and returned by
/// [`build()`](Self::build); everything after it is ignored.
pub struct RouteTreeBuilder<H> {
    node: RouteTreeNodeBuilder<H>,
    error: Option<RouteConfigError>,
}

impl<H> Default for RouteTreeBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> RouteTreeBuilder<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            node: RouteTreeNodeBuilder::default(),
            error: None,
        }
    }

    /// Handler returned when a path ends on this node.
    #[must_use]
    pub fn handler(mut self, handler: H) -> Self {
        if self.error.is_none() {
            self.node.set_handler(handler);
        }
        self
    }

    /// Attach `child` under a literal path such as `/users` or `/api/v1`.
    ///
    /// A single leading `/` is stripped. Multi-segment paths share their
    /// prefixes with paths added earlier on the same builder.
    #[must_use]
    pub fn path(self, path: &str, child: RouteTreeBuilder<H>) -> Self {
        let normalized = path.strip_prefix(PATH_PREFIX).unwrap_or(path);
        self.apply(|node| node.add_path_segment_child(normalized, child.build()?))
    }

    /// Attach `child` behind a string parameter.
    ///
    /// `/:name`, `:name` and `name` all declare the parameter `name`.
    #[must_use]
    pub fn param(self, name: &str, child: RouteTreeBuilder<H>) -> Self {
        let normalized = strip_param_prefix(name);
        let matcher: Arc<dyn ParamMatcher> = Arc::new(StringSegment::new(normalized));
        self.apply(|node| node.set_parametric_child(matcher, child.build()?))
    }

    /// Attach `child` behind a caller-supplied matcher.
    #[must_use]
    pub fn param_with<M>(self, matcher: M, child: RouteTreeBuilder<H>) -> Self
    where
        M: ParamMatcher + 'static,
    {
        self.param_shared(Arc::new(matcher), child)
    }

    /// Like [`param_with`](Self::param_with) for a matcher shared between trees.
    #[must_use]
    pub fn param_shared(self, matcher: Arc<dyn ParamMatcher>, child: RouteTreeBuilder<H>) -> Self {
        self.apply(|node| node.set_parametric_child(matcher, child.build()?))
    }

    /// Attach `child` behind a wildcard that consumes exactly one segment.
    ///
    /// Capturing several segments requires chaining wildcard builders.
    #[must_use]
    pub fn wildcard(self, child: RouteTreeBuilder<H>) -> Self {
        self.apply(|node| node.set_wildcard_child(child.build()?))
    }

    /// Finish the tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteConfigError`] recorded while building.
    pub fn build(self) -> Result<RouteTreeNode<H>, RouteConfigError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.node.create_node()),
        }
    }

    fn apply<F>(mut self, op: F) -> Self
    where
        F: FnOnce(&mut RouteTreeNodeBuilder<H>) -> Result<(), RouteConfigError>,
    {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = op(&mut self.node) {
            debug!(error = %err, "Route tree builder rejected configuration");
            self.error = Some(err);
        }
        self
    }
}

#[derive(Debug, Clone)]
enum RouteStep {
    Literal(String),
    Param(Arc<dyn ParamMatcher>),
    Wildcard,
}

/// Builds a tree holding exactly one route.
///
/// ```rust
/// use routetree::router::{RouteMatcher, SingleRouteBuilder};
///
/// let projects = SingleRouteBuilder::new().path("/projects").build("list").unwrap();
/// let project = SingleRouteBuilder::new()
///     .path("/projects")
///     .param("id")
///     .build("get")
///     .unwrap();
/// let tree = projects.merge(&project);
///
/// let matcher = RouteMatcher::default();
/// let (handler, result) = matcher.match_path(&tree, "/projects/abc").unwrap();
/// assert_eq!(*handler, "get");
/// assert_eq!(result.string_param("id"), Some("abc"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SingleRouteBuilder {
    steps: Vec<RouteStep>,
}

impl SingleRouteBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// One or more literal segments, e.g. `/api/v1`.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        let normalized = path.strip_prefix(PATH_PREFIX).unwrap_or(path);
        self.steps.push(RouteStep::Literal(normalized.to_owned()));
        self
    }

    /// A string parameter.
    #[must_use]
    pub fn param(mut self, name: &str) -> Self {
        let matcher = StringSegment::new(strip_param_prefix(name));
        self.steps.push(RouteStep::Param(Arc::new(matcher)));
        self
    }

    #[must_use]
    pub fn param_with<M>(mut self, matcher: M) -> Self
    where
        M: ParamMatcher + 'static,
    {
        self.steps.push(RouteStep::Param(Arc::new(matcher)));
        self
    }

    /// A single-segment wildcard.
    #[must_use]
    pub fn wildcard(mut self) -> Self {
        self.steps.push(RouteStep::Wildcard);
        self
    }

    /// Finish the route with `handler` on its last node.
    ///
    /// # Errors
    ///
    /// Returns [`RouteConfigError::InvalidSegment`] for a malformed literal
    /// path and [`RouteConfigError::EmptyParamName`] for an unnamed parameter.
    pub fn build<H>(self, handler: H) -> Result<RouteTreeNode<H>, RouteConfigError> {
        let mut bottom = RouteTreeNodeBuilder::default();
        bottom.set_handler(handler);
        let mut node = bottom.create_node();

        for step in self.steps.into_iter().rev() {
            let mut parent = RouteTreeNodeBuilder::default();
            match step {
                RouteStep::Literal(path) => parent.add_path_segment_child(&path, node)?,
                RouteStep::Param(matcher) => parent.set_parametric_child(matcher, node)?,
                RouteStep::Wildcard => parent.set_wildcard_child(node)?,
            }
            node = parent.create_node();
        }
        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::IntegerSegment;

    fn leaf(handler: &'static str) -> RouteTreeBuilder<&'static str> {
        RouteTreeBuilder::new().handler(handler)
    }

    #[test]
    fn test_split_literal_path() {
        assert_eq!(split_literal_path("a").unwrap(), vec!["a"]);
        assert_eq!(split_literal_path("a/b/c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(split_literal_path("a/b/").unwrap(), vec!["a", "b"]);
        assert_eq!(split_literal_path("v1.2_x-y~z").unwrap(), vec!["v1.2_x-y~z"]);
    }

    #[test]
    fn test_split_literal_path_rejects_invalid() {
        for bad in ["", "a//b", "a b", "a/b?c", "ü", "/a"] {
            assert!(
                matches!(
                    split_literal_path(bad),
                    Err(RouteConfigError::InvalidSegment { .. })
                ),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_strip_param_prefix() {
        assert_eq!(strip_param_prefix("/:id"), "id");
        assert_eq!(strip_param_prefix(":id"), "id");
        assert_eq!(strip_param_prefix("id"), "id");
    }

    #[test]
    fn test_node_builder_shares_prefixes() {
        let mut root = RouteTreeNodeBuilder::default();
        root.add_path_segment_child("a/b/c", leaf("c").build().unwrap())
            .unwrap();
        root.add_path_segment_child("a/b/d", leaf("d").build().unwrap())
            .unwrap();
        let node = root.create_node();

        assert_eq!(node.literal_segments().count(), 1);
        let b = node.literal_child("a").and_then(|a| a.literal_child("b")).unwrap();
        assert!(b.handler().is_none());
        assert_eq!(b.literal_child("c").and_then(|n| n.handler()), Some(&"c"));
        assert_eq!(b.literal_child("d").and_then(|n| n.handler()), Some(&"d"));
    }

    #[test]
    fn test_node_builder_folds_into_existing_literal() {
        let mut root = RouteTreeNodeBuilder::default();
        root.add_path_segment_child("a/b", leaf("ab").build().unwrap())
            .unwrap();
        root.add_path_segment_child("a", leaf("a").build().unwrap())
            .unwrap();
        let node = root.create_node();

        assert_eq!(node.routes(), vec!["/a", "/a/b"]);
    }

    #[test]
    fn test_node_builder_handler_overwrites() {
        let mut root = RouteTreeNodeBuilder::default();
        root.set_handler("first");
        root.set_handler("second");
        assert_eq!(root.create_node().handler(), Some(&"second"));
    }

    #[test]
    fn test_node_builder_single_parametric_slot() {
        let mut root: RouteTreeNodeBuilder<&str> = RouteTreeNodeBuilder::default();
        root.set_parametric_child(Arc::new(StringSegment::new("a")), RouteTreeNode::default())
            .unwrap();
        let err = root
            .set_parametric_child(Arc::new(IntegerSegment::new("b")), RouteTreeNode::default())
            .unwrap_err();
        assert_eq!(
            err,
            RouteConfigError::DuplicateParametricChild {
                existing: "a".to_string(),
                rejected: "b".to_string(),
            }
        );
    }

    #[test]
    fn test_node_builder_single_wildcard_slot() {
        let mut root: RouteTreeNodeBuilder<&str> = RouteTreeNodeBuilder::default();
        root.set_wildcard_child(RouteTreeNode::default()).unwrap();
        assert_eq!(
            root.set_wildcard_child(RouteTreeNode::default()),
            Err(RouteConfigError::DuplicateWildcardChild)
        );
    }

    #[test]
    fn test_conflict_through_shared_prefix() {
        let err = RouteTreeBuilder::new()
            .path("/a", RouteTreeBuilder::new().param("x", leaf("x")))
            .path("/a", RouteTreeBuilder::new().param("y", leaf("y")))
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteConfigError::DuplicateParametricChild { .. }));
    }

    #[test]
    fn test_child_error_propagates_to_parent() {
        let err = RouteTreeBuilder::new()
            .path(
                "/outer",
                RouteTreeBuilder::new().path("/bad segment", leaf("x")),
            )
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            RouteConfigError::InvalidSegment {
                path: "bad segment".to_string(),
                segment: "bad segment".to_string(),
            }
        );
    }

    #[test]
    fn test_first_error_wins() {
        let err = RouteTreeBuilder::new()
            .wildcard(leaf("a"))
            .wildcard(leaf("b"))
            .param("", leaf("c"))
            .build()
            .unwrap_err();
        assert_eq!(err, RouteConfigError::DuplicateWildcardChild);
    }

    #[test]
    fn test_empty_param_name() {
        let err = RouteTreeBuilder::new()
            .param("/:", leaf("x"))
            .build()
            .unwrap_err();
        assert_eq!(err, RouteConfigError::EmptyParamName);
    }

    #[test]
    fn test_single_route_builder_root() {
        let node = SingleRouteBuilder::new().build("root").unwrap();
        assert_eq!(node.handler(), Some(&"root"));
        assert_eq!(node.routes(), vec!["/"]);
    }

    #[test]
    fn test_single_route_builder_chain() {
        let node = SingleRouteBuilder::new()
            .path("/api/v1")
            .param(":user")
            .param_with(IntegerSegment::new("n"))
            .wildcard()
            .build("deep")
            .unwrap();
        assert_eq!(node.routes(), vec!["/api/v1/:user/:n{int}/*"]);
    }

    #[test]
    fn test_single_route_builder_invalid_path() {
        let err = SingleRouteBuilder::new()
            .path("/has space")
            .build("x")
            .unwrap_err();
        assert!(matches!(err, RouteConfigError::InvalidSegment { .. }));
    }
}
