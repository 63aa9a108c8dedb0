use routetree::{
    router::{MergeHandler, RouteMatcher, RouteTreeBuilder, RouteTreeNode, SingleRouteBuilder},
    segment::IntegerSegment,
    RouteConfigError,
};
use std::sync::Arc;

type Handler = Arc<dyn Fn(&routetree::MatchResult) -> String + Send + Sync>;

fn handler(name: &'static str) -> Handler {
    Arc::new(move |result| format!("{name}:{:?}", result.integer_param("id")))
}

#[test]
fn test_opaque_handlers_are_returned_unchanged() {
    let show = handler("show");
    let tree = RouteTreeBuilder::new()
        .path(
            "/items",
            RouteTreeBuilder::new().param_with(
                IntegerSegment::new("id"),
                RouteTreeBuilder::new().handler(Arc::clone(&show)),
            ),
        )
        .build()
        .unwrap();

    let (found, result) = RouteMatcher::default().match_path(&tree, "/items/5").unwrap();
    assert!(Arc::ptr_eq(found, &show));
    assert_eq!(found(&result), "show:Some(5)");
}

#[test]
fn test_multi_segment_paths_share_prefixes() {
    let tree = RouteTreeBuilder::new()
        .path("/api/v1/users", RouteTreeBuilder::new().handler("users"))
        .path("/api/v1/posts", RouteTreeBuilder::new().handler("posts"))
        .path("/api/v2", RouteTreeBuilder::new().handler("v2"))
        .build()
        .unwrap();

    assert_eq!(tree.literal_segments().collect::<Vec<_>>(), vec!["api"]);
    assert_eq!(
        tree.routes(),
        vec!["/api/v1/posts", "/api/v1/users", "/api/v2"]
    );
}

#[test]
fn test_duplicate_parametric_child_fails_at_build() {
    let err = RouteTreeBuilder::<&str>::new()
        .param("a", RouteTreeBuilder::new().handler("a"))
        .param_with(IntegerSegment::new("b"), RouteTreeBuilder::new().handler("b"))
        .build()
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
fn test_duplicate_wildcard_child_fails_at_build() {
    let err = RouteTreeBuilder::<&str>::new()
        .wildcard(RouteTreeBuilder::new().handler("a"))
        .wildcard(RouteTreeBuilder::new().handler("b"))
        .build()
        .unwrap_err();
    assert_eq!(err, RouteConfigError::DuplicateWildcardChild);
}

#[test]
fn test_nested_error_surfaces_at_root_build() {
    let err = RouteTreeBuilder::<&str>::new()
        .path(
            "/a",
            RouteTreeBuilder::new().path(
                "/b",
                RouteTreeBuilder::new()
                    .wildcard(RouteTreeBuilder::new())
                    .wildcard(RouteTreeBuilder::new()),
            ),
        )
        .build()
        .unwrap_err();
    assert_eq!(err, RouteConfigError::DuplicateWildcardChild);
}

#[test]
fn test_invalid_literal_segments() {
    for bad in ["", "/", "/a b", "/a//b", "/caf\u{e9}"] {
        let result = RouteTreeBuilder::<&str>::new()
            .path(bad, RouteTreeBuilder::new().handler("x"))
            .build();
        assert!(
            matches!(result, Err(RouteConfigError::InvalidSegment { .. })),
            "expected '{}' to be rejected",
            bad
        );
    }
}

#[test]
fn test_handler_overwrites() {
    let tree = RouteTreeBuilder::new()
        .handler("first")
        .handler("second")
        .build()
        .unwrap();
    assert_eq!(tree.handler(), Some(&"second"));
}

#[test]
fn test_later_path_handler_overwrites_same_node() {
    let tree = RouteTreeBuilder::new()
        .path("/a", RouteTreeBuilder::new().handler("one"))
        .path("/a", RouteTreeBuilder::new().handler("two"))
        .build()
        .unwrap();
    let (found, _) = RouteMatcher::default().match_path(&tree, "/a").unwrap();
    assert_eq!(*found, "two");
}

#[derive(Debug, Clone, PartialEq)]
struct Methods(Vec<&'static str>);

impl MergeHandler for Methods {
    fn merge(&self, other: &Self) -> Self {
        let mut methods = self.0.clone();
        for m in &other.0 {
            if !methods.contains(m) {
                methods.push(*m);
            }
        }
        Methods(methods)
    }
}

#[test]
fn test_single_routes_merged_into_tree() {
    let routes: Vec<RouteTreeNode<Methods>> = vec![
        SingleRouteBuilder::new()
            .path("/projects")
            .build(Methods(vec!["GET"]))
            .unwrap(),
        SingleRouteBuilder::new()
            .path("/projects")
            .build(Methods(vec!["POST"]))
            .unwrap(),
        SingleRouteBuilder::new()
            .path("/projects")
            .param_with(IntegerSegment::new("id"))
            .build(Methods(vec!["GET", "DELETE"]))
            .unwrap(),
        SingleRouteBuilder::new()
            .path("/projects")
            .param_with(IntegerSegment::new("id"))
            .path("/files")
            .wildcard()
            .build(Methods(vec!["GET"]))
            .unwrap(),
    ];

    let tree = routes
        .iter()
        .fold(RouteTreeNode::default(), |acc, route| acc.merge(route));

    assert_eq!(
        tree.routes(),
        vec!["/projects", "/projects/:id{int}", "/projects/:id{int}/files/*"]
    );

    let matcher = RouteMatcher::default();
    let (methods, _) = matcher.match_path(&tree, "/projects").unwrap();
    assert_eq!(methods, &Methods(vec!["GET", "POST"]));

    let (methods, result) = matcher.match_path(&tree, "/projects/3/files/a.txt").unwrap();
    assert_eq!(methods, &Methods(vec!["GET"]));
    assert_eq!(result.integer_param("id"), Some(3));
    assert_eq!(result.wildcard_segments(), &["a.txt"]);
}

#[test]
fn test_merge_leaves_inputs_untouched() {
    let left = SingleRouteBuilder::new().path("/a").build("a").unwrap();
    let right = SingleRouteBuilder::new().path("/b").build("b").unwrap();
    let merged = left.merge(&right);

    assert_eq!(left.routes(), vec!["/a"]);
    assert_eq!(right.routes(), vec!["/b"]);
    assert_eq!(merged.routes(), vec!["/a", "/b"]);
}
