//! Hot-swappable route tree.
//!
//! Trees are immutable, so changing the route set means building a new tree
//! and publishing it. [`RouteTable`] holds the current root behind an
//! `ArcSwap`: readers load it without locking and keep using the snapshot they
//! loaded, while a writer swaps in a replacement.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use super::core::RouteMatcher;
use super::match_result::MatchResult;
use super::node::{MergeHandler, RouteTreeNode};
use crate::path::PathRequest;

/// Shared, atomically replaceable route tree.
pub struct RouteTable<H> {
    root: ArcSwap<RouteTreeNode<H>>,
}

impl<H> RouteTable<H> {
    pub fn new(root: RouteTreeNode<H>) -> Self {
        info!(routes_count = root.route_count(), "Route table loaded");
        Self {
            root: ArcSwap::from_pointee(root),
        }
    }

    /// Snapshot of the current tree.
    #[must_use]
    pub fn load(&self) -> Arc<RouteTreeNode<H>> {
        self.root.load_full()
    }

    /// Publish a new tree, returning the previous one.
    pub fn replace(&self, root: RouteTreeNode<H>) -> Arc<RouteTreeNode<H>> {
        info!(routes_count = root.route_count(), "Route table replaced");
        self.root.swap(Arc::new(root))
    }

    /// Match against the current tree.
    ///
    /// The handler is cloned out of the snapshot so the result does not pin
    /// the tree; keep handlers cheap to clone (e.g. `Arc`).
    #[must_use]
    pub fn match_request<R>(&self, matcher: &RouteMatcher, request: &R) -> Option<(H, MatchResult)>
    where
        H: Clone,
        R: PathRequest + ?Sized,
    {
        let snapshot = self.root.load();
        let root: &RouteTreeNode<H> = &snapshot;
        matcher
            .match_segments(root, request.path_segments())
            .map(|(handler, result)| (handler.clone(), result))
    }
}

impl<H: MergeHandler + Clone> RouteTable<H> {
    /// Merge `other` into the current tree and publish the result.
    ///
    /// Concurrent `extend` calls are retried until each one has been applied
    /// on top of the latest tree.
    pub fn extend(&self, other: &RouteTreeNode<H>) -> Arc<RouteTreeNode<H>> {
        let mut published = 0;
        let previous = self.root.rcu(|current| {
            let merged = (**current).merge(other);
            published = merged.route_count();
            merged
        });
        info!(routes_count = published, "Route table extended");
        previous
    }
}
