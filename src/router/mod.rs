//! # Router Module
//!
//! The router module holds the route tree and the algorithm that resolves a
//! path against it.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Building immutable route trees from declarative builders
//! - Matching a request's path segments to exactly one handler
//! - Extracting typed parameters (integer, string, wildcard) along the way
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Construction**: [`RouteTreeBuilder`] (or [`SingleRouteBuilder`] plus
//!    [`RouteTreeNode::merge`]) assembles a tree bottom-up. Configuration
//!    errors surface here as [`RouteConfigError`](crate::error::RouteConfigError).
//!
//! 2. **Matching**: [`RouteMatcher`] walks the tree one segment at a time with
//!    fixed precedence literal > parametric > wildcard and no backtracking,
//!    returning the handler plus a [`MatchResult`], or `None`.
//!
//! ## Example
//!
//! ```rust
//! use routetree::router::{RouteMatcher, RouteTreeBuilder};
//! use routetree::segment::IntegerSegment;
//!
//! let tree = RouteTreeBuilder::new()
//!     .path("/users", RouteTreeBuilder::new()
//!         .path("/new", RouteTreeBuilder::new().handler("new_user"))
//!         .param_with(IntegerSegment::new("id"), RouteTreeBuilder::new().handler("get_user")))
//!     .build()
//!     .unwrap();
//!
//! let matcher = RouteMatcher::default();
//!
//! let (handler, params) = matcher.match_path(&tree, "/users/123").unwrap();
//! assert_eq!(*handler, "get_user");
//! assert_eq!(params.integer_param("id"), Some(123));
//!
//! // literal children win over the parametric child
//! let (handler, _) = matcher.match_path(&tree, "/users/new").unwrap();
//! assert_eq!(*handler, "new_user");
//!
//! assert!(matcher.match_path(&tree, "/users/abc").is_none());
//! ```
//!
//! ## Performance
//!
//! - One decision per segment: O(k) in the path length
//! - Parameter storage is stack-allocated for up to
//!   [`MAX_INLINE_PARAMS`] entries per namespace
//! - Trees are read-only after construction; no locking while matching

mod builder;
mod core;
mod match_result;
mod node;
mod table;

pub use builder::{RouteTreeBuilder, SingleRouteBuilder};
pub use self::core::{traverse, RouteMatch, RouteMatcher};
pub use match_result::{
    IntegerParamVec, MatchResult, StringParamVec, WildcardVec, MAX_INLINE_PARAMS,
};
pub use node::{MergeHandler, ParametricChild, RouteTreeNode};
pub use table::RouteTable;
