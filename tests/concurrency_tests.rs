use routetree::{
    path::SegmentedPath,
    router::{RouteMatcher, RouteTable, RouteTreeBuilder, RouteTreeNode, SingleRouteBuilder},
    segment::IntegerSegment,
};
use std::sync::Arc;
use std::thread;

fn tree() -> RouteTreeNode<String> {
    RouteTreeBuilder::new()
        .path(
            "/users",
            RouteTreeBuilder::new().param_with(
                IntegerSegment::new("id"),
                RouteTreeBuilder::new().handler("get_user".to_string()),
            ),
        )
        .build()
        .unwrap()
}

#[test]
fn test_tree_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RouteTreeNode<String>>();
    assert_send_sync::<RouteTable<String>>();
    assert_send_sync::<RouteMatcher>();
}

#[test]
fn test_concurrent_traversals_share_one_tree() {
    let tree = Arc::new(tree());
    let matcher = Arc::new(RouteMatcher::default());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let tree = Arc::clone(&tree);
            let matcher = Arc::clone(&matcher);
            thread::spawn(move || {
                for i in 0..200 {
                    let id = t * 1000 + i;
                    let (handler, result) = matcher
                        .match_path(&tree, &format!("/users/{id}"))
                        .expect("route must match");
                    assert_eq!(handler, "get_user");
                    assert_eq!(result.integer_param("id"), Some(id));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_readers_see_old_or_new_tree() {
    let table = Arc::new(RouteTable::new(tree()));
    let matcher = RouteMatcher::default();

    let reader = {
        let table = Arc::clone(&table);
        thread::spawn(move || {
            let request = SegmentedPath::parse("/users/1");
            for _ in 0..500 {
                let (handler, _) = table
                    .match_request(&matcher, &request)
                    .expect("/users/:id exists in every version");
                assert_eq!(handler, "get_user");
            }
        })
    };

    for i in 0..50 {
        let extra = SingleRouteBuilder::new()
            .path(&format!("/extra{i}"))
            .build(format!("extra_{i}"))
            .unwrap();
        table.extend(&extra);
    }
    reader.join().unwrap();

    assert_eq!(table.load().routes().len(), 51);
}
