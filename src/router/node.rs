use std::collections::HashMap;
use std::sync::Arc;

use crate::segment::{ParamKind, ParamMatcher};

/// Combines two handlers registered at the same point of two trees.
///
/// Called by [`RouteTreeNode::merge`] only when both trees carry a handler on
/// the same node. Implementations must build a new value and leave both
/// inputs untouched.
pub trait MergeHandler {
    fn merge(&self, other: &Self) -> Self;
}

/// Right side wins.
impl<T: ?Sized> MergeHandler for Arc<T> {
    fn merge(&self, other: &Self) -> Self {
        Arc::clone(other)
    }
}

/// Right side wins.
impl MergeHandler for String {
    fn merge(&self, other: &Self) -> Self {
        other.clone()
    }
}

/// Right side wins.
impl MergeHandler for &'static str {
    fn merge(&self, other: &Self) -> Self {
        *other
    }
}

/// The single parametric edge of a node: a matcher and the node it leads to.
#[derive(Debug, Clone)]
pub struct ParametricChild<H> {
    matcher: Arc<dyn ParamMatcher>,
    node: Box<RouteTreeNode<H>>,
}

impl<H> ParametricChild<H> {
    pub(crate) fn new(matcher: Arc<dyn ParamMatcher>, node: RouteTreeNode<H>) -> Self {
        Self {
            matcher,
            node: Box::new(node),
        }
    }

    #[must_use]
    pub fn matcher(&self) -> &dyn ParamMatcher {
        self.matcher.as_ref()
    }

    #[must_use]
    pub fn node(&self) -> &RouteTreeNode<H> {
        &self.node
    }

    pub(crate) fn into_parts(self) -> (Arc<dyn ParamMatcher>, RouteTreeNode<H>) {
        (self.matcher, *self.node)
    }
}

/// Immutable node of a route tree.
///
/// A node holds:
/// - literal children keyed by exact (case-sensitive) segment
/// - at most one parametric child
/// - at most one wildcard child
/// - an optional handler, returned when a path ends on this node
///
/// Nodes are only produced by the builders and expose no mutation methods, so
/// a finished tree can be shared freely between threads (`H: Send + Sync`)
/// and matched concurrently.
///
/// A node without a handler is a valid intermediate step: with routes for
/// `/foo/bar/baz` only, the `bar` node has no handler and `/foo/bar` does not
/// match.
#[derive(Debug, Clone)]
pub struct RouteTreeNode<H> {
    handler: Option<H>,
    literal_children: HashMap<String, RouteTreeNode<H>>,
    parametric_child: Option<ParametricChild<H>>,
    wildcard_child: Option<Box<RouteTreeNode<H>>>,
}

impl<H> Default for RouteTreeNode<H> {
    fn default() -> Self {
        Self {
            handler: None,
            literal_children: HashMap::new(),
            parametric_child: None,
            wildcard_child: None,
        }
    }
}

impl<H> RouteTreeNode<H> {
    pub(crate) fn from_parts(
        handler: Option<H>,
        literal_children: HashMap<String, RouteTreeNode<H>>,
        parametric_child: Option<ParametricChild<H>>,
        wildcard_child: Option<RouteTreeNode<H>>,
    ) -> Self {
        Self {
            handler,
            literal_children,
            parametric_child,
            wildcard_child: wildcard_child.map(Box::new),
        }
    }

    #[allow(clippy::type_complexity)]
    pub(crate) fn into_parts(
        self,
    ) -> (
        Option<H>,
        HashMap<String, RouteTreeNode<H>>,
        Option<ParametricChild<H>>,
        Option<RouteTreeNode<H>>,
    ) {
        (
            self.handler,
            self.literal_children,
            self.parametric_child,
            self.wildcard_child.map(|node| *node),
        )
    }

    /// Child reached by the exact segment string.
    ///
    /// Literal children take precedence over the parametric and wildcard
    /// children during matching: even if `:id` would accept `new`, a literal
    /// `new` child wins.
    #[inline]
    #[must_use]
    pub fn literal_child(&self, segment: &str) -> Option<&RouteTreeNode<H>> {
        self.literal_children.get(segment)
    }

    #[inline]
    #[must_use]
    pub fn parametric_child(&self) -> Option<&ParametricChild<H>> {
        self.parametric_child.as_ref()
    }

    /// Child that accepts any single segment, capturing it.
    #[inline]
    #[must_use]
    pub fn wildcard_child(&self) -> Option<&RouteTreeNode<H>> {
        self.wildcard_child.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn handler(&self) -> Option<&H> {
        self.handler.as_ref()
    }

    /// Literal segments directly below this node, in no particular order.
    pub fn literal_segments(&self) -> impl Iterator<Item = &str> {
        self.literal_children.keys().map(String::as_str)
    }

    /// True when the node has neither a handler nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handler.is_none()
            && self.literal_children.is_empty()
            && self.parametric_child.is_none()
            && self.wildcard_child.is_none()
    }

    /// Number of nodes carrying a handler, i.e. `routes().len()` without
    /// rendering anything.
    #[must_use]
    pub fn route_count(&self) -> usize {
        usize::from(self.handler.is_some())
            + self
                .literal_children
                .values()
                .map(RouteTreeNode::route_count)
                .sum::<usize>()
            + self
                .parametric_child
                .as_ref()
                .map_or(0, |param| param.node.route_count())
            + self
                .wildcard_child
                .as_ref()
                .map_or(0, |wildcard| wildcard.route_count())
    }

    /// Every route that reaches a handler, sorted.
    ///
    /// Literal segments are rendered verbatim, parameters as `:name` (with an
    /// `{int}` suffix for integer matchers) and wildcards as `*`. The root
    /// handler is rendered as `/`.
    ///
    /// ```rust
    /// use routetree::router::RouteTreeBuilder;
    /// use routetree::segment::IntegerSegment;
    ///
    /// let tree = RouteTreeBuilder::new()
    ///     .handler("root")
    ///     .path("/users", RouteTreeBuilder::new()
    ///         .handler("list")
    ///         .param_with(IntegerSegment::new("id"), RouteTreeBuilder::new().handler("get")))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(tree.routes(), vec!["/", "/users", "/users/:id{int}"]);
    /// ```
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        self.collect_routes(&mut prefix, &mut out);
        out.sort();
        out
    }

    fn collect_routes(&self, prefix: &mut Vec<String>, out: &mut Vec<String>) {
        if self.handler.is_some() {
            out.push(format!("/{}", prefix.join("/")));
        }
        for (segment, child) in &self.literal_children {
            prefix.push(segment.clone());
            child.collect_routes(prefix, out);
            prefix.pop();
        }
        if let Some(param) = &self.parametric_child {
            let label = match param.matcher.kind() {
                ParamKind::Integer => format!(":{}{{int}}", param.matcher.param_name()),
                ParamKind::String => format!(":{}", param.matcher.param_name()),
            };
            prefix.push(label);
            param.node.collect_routes(prefix, out);
            prefix.pop();
        }
        if let Some(wildcard) = &self.wildcard_child {
            prefix.push("*".to_string());
            wildcard.collect_routes(prefix, out);
            prefix.pop();
        }
    }
}

impl<H: MergeHandler + Clone> RouteTreeNode<H> {
    /// Deep left-to-right merge into a brand new tree.
    ///
    /// Neither input is modified. Where both trees define something at the
    /// same position:
    /// - handlers are combined with [`MergeHandler::merge`] (`self` on the left)
    /// - literal children with the same segment are merged recursively
    /// - parametric children keep `other`'s matcher and merge their nodes
    /// - wildcard children are merged recursively
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let handler = match (&self.handler, &other.handler) {
            (Some(left), Some(right)) => Some(left.merge(right)),
            (Some(left), None) => Some(left.clone()),
            (None, right) => right.clone(),
        };

        let mut literal_children = self.literal_children.clone();
        for (segment, theirs) in &other.literal_children {
            let merged = match self.literal_children.get(segment) {
                Some(ours) => ours.merge(theirs),
                None => theirs.clone(),
            };
            literal_children.insert(segment.clone(), merged);
        }

        let parametric_child = match (&self.parametric_child, &other.parametric_child) {
            (Some(ours), Some(theirs)) => Some(ParametricChild::new(
                Arc::clone(&theirs.matcher),
                ours.node.merge(&theirs.node),
            )),
            (Some(ours), None) => Some(ours.clone()),
            (None, theirs) => theirs.clone(),
        };

        let wildcard_child = match (&self.wildcard_child, &other.wildcard_child) {
            (Some(ours), Some(theirs)) => Some(ours.merge(theirs)),
            (Some(ours), None) => Some((**ours).clone()),
            (None, theirs) => theirs.as_deref().cloned(),
        };

        Self::from_parts(handler, literal_children, parametric_child, wildcard_child)
    }
}
