//! # routetree
//!
//! **routetree** is a transport-agnostic path routing engine. Given a tree of
//! route definitions and the path of an incoming request, it finds the single
//! matching route and extracts typed parameters from the path segments, or
//! reports that nothing matches.
//!
//! It is meant to sit underneath an HTTP-like server. The router only consumes
//! an ordered list of path segments and hands back an opaque handler value
//! chosen by the host; methods, headers and response types stay with the host.
//!
//! ## Architecture
//!
//! - **[`segment`]** - parametric segment matchers (string, integer, custom)
//! - **[`router`]** - route tree, builders, match results and the traversal
//! - **[`path`]** - request abstraction and raw path splitting
//! - **[`error`]** - build-time configuration errors
//! - **[`runtime_config`]** - router tuning from env or TOML
//! - **[`logging`]** - optional `tracing` subscriber setup for hosts
//!
//! ## Matching Rules
//!
//! At every node the current segment is tried against, in order:
//!
//! 1. a literal child with exactly that segment
//! 2. the parametric child, if its matcher accepts the segment
//! 3. the wildcard child, which accepts any one segment
//!
//! The first applicable option is taken and never revisited. When the path
//! is exhausted the current node's handler, if any, is the result.
//!
//! ## Quick Start
//!
//! ```rust
//! use routetree::router::{RouteMatcher, RouteTreeBuilder};
//! use routetree::segment::IntegerSegment;
//!
//! let tree = RouteTreeBuilder::new()
//!     .handler("index")
//!     .path("/items", RouteTreeBuilder::new()
//!         .param_with(IntegerSegment::new("item_id"), RouteTreeBuilder::new().handler("show_item")))
//!     .path("/static", RouteTreeBuilder::new()
//!         .wildcard(RouteTreeBuilder::new().handler("serve_file")))
//!     .build()?;
//!
//! let matcher = RouteMatcher::default();
//!
//! let (handler, _) = matcher.match_path(&tree, "/").unwrap();
//! assert_eq!(*handler, "index");
//!
//! let (handler, params) = matcher.match_path(&tree, "/items/42").unwrap();
//! assert_eq!(*handler, "show_item");
//! assert_eq!(params.integer_param("item_id"), Some(42));
//!
//! let (handler, params) = matcher.match_path(&tree, "/static/app.js").unwrap();
//! assert_eq!(*handler, "serve_file");
//! assert_eq!(params.wildcard_segments(), &["app.js"]);
//!
//! assert!(matcher.match_path(&tree, "/items/abc").is_none());
//! # Ok::<(), routetree::error::RouteConfigError>(())
//! ```

pub mod error;
pub mod logging;
pub mod path;
pub mod router;
pub mod runtime_config;
pub mod segment;

pub use error::RouteConfigError;
pub use path::{parse_path, PathRequest, SegmentedPath};
pub use router::{
    MatchResult, RouteMatch, RouteMatcher, RouteTable, RouteTreeBuilder, RouteTreeNode,
    SingleRouteBuilder,
};
pub use runtime_config::RouterConfig;
