// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing over a laid-out graph.

use understory_quadtree::{Quadtree, QuadtreeConfig};

use crate::{GraphLayout, LayoutNode};

/// Extra space around the layout canvas covered by the index root.
pub const INDEX_MARGIN: f64 = 50.0;

/// Quadtree over the nodes of a [`GraphLayout`], keyed by node center.
pub type SpatialIndex<'a> = Quadtree<&'a LayoutNode>;

/// Indexes every node of `layout` with [`QuadtreeConfig::default`].
///
/// # Example
///
/// ```
/// use kurbo::Vec2;
/// use understory_commit_graph::{CommitRecord, build_spatial_index, compute_layout};
///
/// let commits = [
///     CommitRecord::new("a", 1),
///     CommitRecord::new("b", 2).with_parent("a"),
/// ];
/// let layout = compute_layout(&commits);
/// let index = build_spatial_index(&layout);
///
/// let a = layout.node("a").unwrap().position;
/// let hit = index.query_nearest(a + Vec2::new(3.0, -2.0), 8.0).unwrap();
/// assert_eq!(hit.oid, "a");
/// ```
#[must_use]
pub fn build_spatial_index(layout: &GraphLayout) -> SpatialIndex<'_> {
    build_spatial_index_with(layout, QuadtreeConfig::default())
}

/// Indexes every node of `layout` with explicit subdivision limits.
///
/// The root covers the layout bounds grown by [`INDEX_MARGIN`] on every side,
/// so nodes laid out by [`compute_layout_with`](crate::compute_layout_with)
/// with non-negative metrics are always inside it.
#[must_use]
pub fn build_spatial_index_with(layout: &GraphLayout, config: QuadtreeConfig) -> SpatialIndex<'_> {
    let bounds = layout.bounds().inflate(INDEX_MARGIN, INDEX_MARGIN);
    let mut index = Quadtree::new(bounds, config);
    for node in &layout.nodes {
        index.insert(node, node.position);
    }
    index
}
