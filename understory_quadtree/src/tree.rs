// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed point quadtree.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::config::{MAX_DEPTH_LIMIT, QuadtreeConfig};

/// Entries stored inline per node before spilling to the heap.
const INLINE_ENTRIES: usize = 8;

/// Child quadrant of a subdivided node.
///
/// Coordinates are y-down, so "north" is the half with smaller `y`. Children are
/// always stored and visited in the order of [`Quadrant::ALL`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Smaller `x`, smaller `y`.
    NorthWest,
    /// Larger `x`, smaller `y`.
    NorthEast,
    /// Smaller `x`, larger `y`.
    SouthWest,
    /// Larger `x`, larger `y`.
    SouthEast,
}

impl Quadrant {
    /// All quadrants in enumeration order.
    pub const ALL: [Self; 4] = [
        Self::NorthWest,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
    ];

    /// Returns the part of `bounds` covered by this quadrant.
    ///
    /// The four quadrants of a rectangle share their inner edges, so together
    /// they cover `bounds` exactly.
    #[must_use]
    pub fn rect(self, bounds: Rect) -> Rect {
        let c = bounds.center();
        match self {
            Self::NorthWest => Rect::new(bounds.x0, bounds.y0, c.x, c.y),
            Self::NorthEast => Rect::new(c.x, bounds.y0, bounds.x1, c.y),
            Self::SouthWest => Rect::new(bounds.x0, c.y, c.x, bounds.y1),
            Self::SouthEast => Rect::new(c.x, c.y, bounds.x1, bounds.y1),
        }
    }
}

/// An indexed item together with its position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry<T> {
    /// Caller-supplied payload.
    pub item: T,
    /// Position the item was inserted at.
    pub point: Point,
}

#[derive(Clone)]
struct Node<T> {
    bounds: Rect,
    depth: u32,
    /// Leaf contents, or the overflow bucket of an internal node.
    entries: SmallVec<[Entry<T>; INLINE_ENTRIES]>,
    /// Arena indices of the children, in [`Quadrant::ALL`] order.
    children: Option<[usize; 4]>,
}

impl<T> Node<T> {
    fn leaf(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            entries: SmallVec::new(),
            children: None,
        }
    }
}

/// Inclusive point containment: points on any edge are inside.
///
/// [`Rect::contains`] is half-open, which would drop points lying on the far
/// edges of the root.
#[inline]
fn contains_inclusive(rect: &Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Inclusive AABB overlap: rectangles sharing only an edge overlap.
#[inline]
fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.x1 < b.x0 || a.x0 > b.x1 || a.y1 < b.y0 || a.y0 > b.y1)
}

/// A recursive point quadtree answering nearest-point and rectangle queries.
///
/// Nodes live in an arena owned by the tree; internal nodes refer to their four
/// children by index. Items are `Copy` payloads supplied by the caller, typically
/// small handles or shared references into data that outlives the tree.
///
/// Points outside the root bounds are ignored on insert, so the root must be
/// sized to cover every point of interest.
///
/// # Complexity
///
/// For points spread roughly uniformly over the bounds, queries visit
/// `O(log n)` nodes on average and building the tree costs `O(n log n)`.
/// Tightly clustered points pile up in leaves at the depth cap, and queries
/// over such a leaf degrade toward `O(n)`.
///
/// # Example
///
/// ```
/// use kurbo::{Point, Rect};
/// use understory_quadtree::{Quadtree, QuadtreeConfig};
///
/// let mut tree = Quadtree::new(Rect::new(0.0, 0.0, 100.0, 100.0), QuadtreeConfig::default());
/// tree.insert("a", Point::new(10.0, 10.0));
/// tree.insert("b", Point::new(50.0, 50.0));
/// tree.insert("c", Point::new(90.0, 90.0));
///
/// assert_eq!(tree.query_nearest(Point::new(11.0, 11.0), 20.0), Some("a"));
/// assert_eq!(tree.query_rect(Rect::new(40.0, 40.0, 100.0, 100.0)), vec!["b", "c"]);
/// ```
#[derive(Clone)]
pub struct Quadtree<T> {
    nodes: Vec<Node<T>>,
    config: QuadtreeConfig,
    len: usize,
}

impl<T: Copy> Quadtree<T> {
    /// Creates an empty tree covering `bounds`.
    ///
    /// `bounds` is normalized, so a rectangle with swapped corners covers the
    /// same area. `config.max_depth` is clamped to [`MAX_DEPTH_LIMIT`].
    #[must_use]
    pub fn new(bounds: Rect, config: QuadtreeConfig) -> Self {
        Self {
            nodes: vec![Node::leaf(bounds.abs(), 0)],
            config: QuadtreeConfig {
                max_depth: config.max_depth.min(MAX_DEPTH_LIMIT),
                ..config
            },
            len: 0,
        }
    }

    /// Returns the area covered by the root.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.nodes[0].bounds
    }

    /// Returns the subdivision limits, after clamping.
    #[must_use]
    pub fn config(&self) -> QuadtreeConfig {
        self.config
    }

    /// Returns the number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of tree nodes, including the root.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the depth of the deepest node (`0` for an undivided root).
    #[must_use]
    pub fn max_depth_reached(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Removes every entry and collapses the tree back to a single root.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        self.nodes.clear();
        self.nodes.push(Node::leaf(bounds, 0));
        self.len = 0;
    }

    /// Indexes `item` at `point`.
    ///
    /// Returns `false` and leaves the tree unchanged if `point` lies outside the
    /// root bounds (or is NaN). Points on the boundary are accepted.
    pub fn insert(&mut self, item: T, point: Point) -> bool {
        if !contains_inclusive(&self.nodes[0].bounds, point) {
            log::trace!("quadtree dropped out-of-bounds point {point:?}");
            return false;
        }
        let entry = Entry { item, point };
        let mut idx = 0;
        loop {
            match self.nodes[idx].children {
                Some(children) => match self.child_containing(children, point) {
                    Some(child) => idx = child,
                    None => {
                        self.nodes[idx].entries.push(entry);
                        break;
                    }
                },
                None => {
                    self.nodes[idx].entries.push(entry);
                    if self.should_subdivide(idx) {
                        self.subdivide(idx);
                    }
                    break;
                }
            }
        }
        self.len += 1;
        true
    }

    /// Returns the closest item strictly within `radius` of `point`.
    ///
    /// Nodes are pruned against the square of side `2 * radius` centered on
    /// `point`; entries are then filtered by exact Euclidean distance. When two
    /// entries are equally close, the one visited first (parents before
    /// children, children in [`Quadrant::ALL`] order, entries in insertion
    /// order) wins.
    #[must_use]
    pub fn query_nearest(&self, point: Point, radius: f64) -> Option<T> {
        self.nearest_entry(point, radius).map(|e| e.item)
    }

    /// Like [`query_nearest`](Self::query_nearest), but returns the whole entry.
    #[must_use]
    pub fn nearest_entry(&self, point: Point, radius: f64) -> Option<&Entry<T>> {
        if radius.is_nan() || radius <= 0.0 {
            return None;
        }
        let search = Rect::new(
            point.x - radius,
            point.y - radius,
            point.x + radius,
            point.y + radius,
        );
        let mut best: Option<&Entry<T>> = None;
        let mut best_dist_sq = radius * radius;
        self.visit_nodes(&search, |node| {
            for entry in &node.entries {
                let d = entry.point.distance_squared(point);
                if d < best_dist_sq {
                    best_dist_sq = d;
                    best = Some(entry);
                }
            }
        });
        best
    }

    /// Returns every item whose point lies inside `rect` (edges included).
    #[must_use]
    pub fn query_rect(&self, rect: Rect) -> Vec<T> {
        let mut out = Vec::new();
        self.visit_rect(rect, |entry| out.push(entry.item));
        out
    }

    /// Visits every entry whose point lies inside `rect` (edges included).
    pub fn visit_rect<F: FnMut(&Entry<T>)>(&self, rect: Rect, mut f: F) {
        let rect = rect.abs();
        self.visit_nodes(&rect, |node| {
            for entry in &node.entries {
                if contains_inclusive(&rect, entry.point) {
                    f(entry);
                }
            }
        });
    }

    /// Iterates over all entries in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> + '_ {
        self.nodes.iter().flat_map(|n| n.entries.iter())
    }

    /// Depth-first walk over nodes whose bounds overlap `region`.
    fn visit_nodes<'a, F: FnMut(&'a Node<T>)>(&'a self, region: &Rect, mut f: F) {
        if !overlaps(&self.nodes[0].bounds, region) {
            return;
        }
        let mut stack = vec![0_usize];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            f(node);
            if let Some(children) = node.children {
                // Reversed so that NW is popped first.
                for &child in children.iter().rev() {
                    if overlaps(&self.nodes[child].bounds, region) {
                        stack.push(child);
                    }
                }
            }
        }
    }

    fn child_containing(&self, children: [usize; 4], point: Point) -> Option<usize> {
        children
            .into_iter()
            .find(|&c| contains_inclusive(&self.nodes[c].bounds, point))
    }

    fn should_subdivide(&self, idx: usize) -> bool {
        let node = &self.nodes[idx];
        node.children.is_none()
            && node.entries.len() > self.config.max_entries
            && node.depth < self.config.max_depth
    }

    /// Splits leaf `idx` into four quadrants and pushes its entries down.
    ///
    /// Splits one level only. A child left over capacity is split by the next
    /// insert that lands in it.
    fn subdivide(&mut self, idx: usize) {
        let bounds = self.nodes[idx].bounds;
        let depth = self.nodes[idx].depth + 1;
        let first = self.nodes.len();
        self.nodes
            .extend(Quadrant::ALL.map(|q| Node::leaf(q.rect(bounds), depth)));
        let children = [first, first + 1, first + 2, first + 3];

        let entries = core::mem::take(&mut self.nodes[idx].entries);
        self.nodes[idx].children = Some(children);
        for entry in entries {
            match self.child_containing(children, entry.point) {
                Some(child) => self.nodes[child].entries.push(entry),
                None => self.nodes[idx].entries.push(entry),
            }
        }
        log::trace!("quadtree subdivided node {idx} at depth {} ({bounds:?})", depth - 1);
    }
}

impl<T> Debug for Quadtree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quadtree")
            .field("bounds", &self.nodes[0].bounds)
            .field("config", &self.config)
            .field("len", &self.len)
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_100(config: QuadtreeConfig) -> Quadtree<u32> {
        Quadtree::new(Rect::new(0.0, 0.0, 100.0, 100.0), config)
    }

    #[test]
    fn nearest_finds_closest_within_radius() {
        let mut tree = tree_100(QuadtreeConfig::default());
        tree.insert(1, Point::new(10.0, 10.0));
        tree.insert(2, Point::new(50.0, 50.0));
        tree.insert(3, Point::new(90.0, 90.0));

        assert_eq!(tree.query_nearest(Point::new(11.0, 11.0), 20.0), Some(1));
        assert_eq!(tree.query_nearest(Point::new(52.0, 49.0), 5.0), Some(2));
        assert_eq!(tree.query_nearest(Point::new(30.0, 70.0), 5.0), None);
    }

    #[test]
    fn nearest_misses_when_only_far_points_exist() {
        let mut tree = tree_100(QuadtreeConfig::default());
        tree.insert(1, Point::new(10.0, 10.0));
        assert_eq!(tree.query_nearest(Point::new(90.0, 90.0), 5.0), None);
    }

    #[test]
    fn nearest_excludes_square_corner() {
        let mut tree = tree_100(QuadtreeConfig::default());
        // Inside the search square, outside the circle: sqrt(2 * 9^2) > 10.
        tree.insert(1, Point::new(59.0, 59.0));
        assert_eq!(tree.query_nearest(Point::new(50.0, 50.0), 10.0), None);
        assert_eq!(tree.query_nearest(Point::new(50.0, 50.0), 13.0), Some(1));
    }

    #[test]
    fn nearest_requires_positive_radius() {
        let mut tree = tree_100(QuadtreeConfig::default());
        tree.insert(1, Point::new(10.0, 10.0));
        assert_eq!(tree.query_nearest(Point::new(10.0, 10.0), 0.0), None);
        assert_eq!(tree.query_nearest(Point::new(10.0, 10.0), f64::NAN), None);
        assert_eq!(tree.query_nearest(Point::new(10.0, 10.0), 0.5), Some(1));
    }

    #[test]
    fn equal_distances_prefer_first_inserted() {
        let mut tree = tree_100(QuadtreeConfig::default());
        tree.insert(1, Point::new(40.0, 50.0));
        tree.insert(2, Point::new(60.0, 50.0));
        assert_eq!(tree.query_nearest(Point::new(50.0, 50.0), 20.0), Some(1));
    }

    #[test]
    fn out_of_bounds_insert_is_a_no_op() {
        let mut tree = tree_100(QuadtreeConfig::default());
        assert!(!tree.insert(1, Point::new(-1.0, 50.0)));
        assert!(!tree.insert(2, Point::new(50.0, 100.5)));
        assert!(!tree.insert(3, Point::new(f64::NAN, 50.0)));
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn boundary_points_are_indexed() {
        let mut tree = tree_100(QuadtreeConfig::new(1, 4));
        let corners = [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0), (100.0, 100.0), (50.0, 50.0)];
        for (i, &(x, y)) in (0_u32..).zip(corners.iter()) {
            assert!(tree.insert(i, Point::new(x, y)));
        }
        assert_eq!(tree.len(), corners.len());
        for (i, &(x, y)) in (0_u32..).zip(corners.iter()) {
            assert_eq!(tree.query_nearest(Point::new(x, y), 0.1), Some(i));
        }
    }

    #[test]
    fn subdivides_once_capacity_is_exceeded() {
        let mut tree = tree_100(QuadtreeConfig::new(2, 4));
        tree.insert(1, Point::new(10.0, 10.0));
        tree.insert(2, Point::new(90.0, 10.0));
        assert_eq!(tree.node_count(), 1);

        tree.insert(3, Point::new(10.0, 90.0));
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.max_depth_reached(), 1);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn coincident_points_split_one_level_per_insert() {
        let mut tree = tree_100(QuadtreeConfig::new(1, 64));
        tree.insert(1, Point::new(1.0, 1.0));
        tree.insert(2, Point::new(1.0, 1.0));
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.max_depth_reached(), 1);

        tree.insert(3, Point::new(1.0, 1.0));
        assert_eq!(tree.node_count(), 9);
        assert_eq!(tree.max_depth_reached(), 2);
    }

    #[test]
    fn oversized_depth_is_clamped() {
        let mut tree = tree_100(QuadtreeConfig::new(1, 200_000));
        assert_eq!(tree.config().max_depth, MAX_DEPTH_LIMIT);
        for i in 0..100 {
            tree.insert(i, Point::new(1.0, 1.0));
        }
        assert_eq!(tree.max_depth_reached(), MAX_DEPTH_LIMIT);
        assert_eq!(tree.len(), 100);
        assert_eq!(tree.query_nearest(Point::new(1.0, 1.0), 0.5), Some(0));
    }

    #[test]
    fn depth_cap_stops_subdivision_of_clusters() {
        let mut tree = tree_100(QuadtreeConfig::new(1, 3));
        for i in 0..50 {
            tree.insert(i, Point::new(1.0, 1.0));
        }
        assert_eq!(tree.max_depth_reached(), 3);
        assert_eq!(tree.len(), 50);
        assert_eq!(tree.query_rect(Rect::new(0.0, 0.0, 2.0, 2.0)).len(), 50);
    }

    #[test]
    fn rect_query_is_inclusive_and_exact() {
        let mut tree = tree_100(QuadtreeConfig::new(2, 6));
        let mut id = 0;
        for y in 0..10 {
            for x in 0..10 {
                tree.insert(id, Point::new(f64::from(x) * 10.0 + 5.0, f64::from(y) * 10.0 + 5.0));
                id += 1;
            }
        }
        let mut hits = tree.query_rect(Rect::new(15.0, 15.0, 35.0, 25.0));
        hits.sort_unstable();
        // Columns 1..=3 of rows 1..=2.
        assert_eq!(hits, vec![11, 12, 13, 21, 22, 23]);

        // Swapped corners describe the same rectangle.
        let mut swapped = tree.query_rect(Rect::new(35.0, 25.0, 15.0, 15.0));
        swapped.sort_unstable();
        assert_eq!(swapped, hits);

        assert!(tree.query_rect(Rect::new(200.0, 200.0, 300.0, 300.0)).is_empty());
    }

    #[test]
    fn quadrants_tile_their_parent() {
        let bounds = Rect::new(0.0, 0.0, 8.0, 4.0);
        assert_eq!(Quadrant::NorthWest.rect(bounds), Rect::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(Quadrant::NorthEast.rect(bounds), Rect::new(4.0, 0.0, 8.0, 2.0));
        assert_eq!(Quadrant::SouthWest.rect(bounds), Rect::new(0.0, 2.0, 4.0, 4.0));
        assert_eq!(Quadrant::SouthEast.rect(bounds), Rect::new(4.0, 2.0, 8.0, 4.0));
    }

    #[test]
    fn clear_resets_to_single_root() {
        let mut tree = tree_100(QuadtreeConfig::new(1, 4));
        for i in 0..10 {
            tree.insert(i, Point::new(f64::from(i) * 9.0, 50.0));
        }
        assert!(tree.node_count() > 1);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(tree.query_nearest(Point::new(0.0, 50.0), 5.0), None);
    }
}
