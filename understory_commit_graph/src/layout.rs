// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel layout of a commit graph: node positions and edge curves.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use smallvec::{SmallVec, smallvec};

use crate::commit::newest_first;
use crate::{CommitRecord, LayoutConfig, assign_lanes};

/// A commit placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutNode {
    /// Identifier of the commit.
    pub oid: String,
    /// Center of the node in canvas pixels.
    pub position: Point,
    /// Lane index.
    pub column: usize,
    /// Rank in newest-first order; `0` is the newest commit.
    pub row: usize,
    /// Lane color.
    pub color: Color,
    /// Parent identifiers, copied from the record (dangling ones included).
    pub parents: Vec<String>,
    /// Branch labels, copied from the record.
    pub refs: Vec<String>,
    /// Commit message, copied from the record.
    pub message: String,
    /// Whether `HEAD` points at this commit.
    pub is_head: bool,
}

/// A child → parent connection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutEdge {
    /// Identifier of the child commit.
    pub from: String,
    /// Identifier of the parent commit.
    pub to: String,
    /// Stroke color (the child's lane color).
    pub color: Color,
    /// Two points for a straight segment, or four for a cubic S-curve.
    pub points: SmallVec<[Point; 4]>,
}

impl LayoutEdge {
    /// Builds the edge between two placed nodes.
    ///
    /// Nodes in the same lane are joined by a straight segment. Otherwise the
    /// curve leaves the child vertically, crosses lanes at the vertical midpoint,
    /// and enters the parent vertically: `[child, (child.x, mid), (parent.x, mid), parent]`.
    fn between(child: &LayoutNode, parent: &LayoutNode) -> Self {
        let from = child.position;
        let to = parent.position;
        let points = if child.column == parent.column {
            smallvec![from, to]
        } else {
            let mid_y = (from.y + to.y) * 0.5;
            smallvec![from, Point::new(from.x, mid_y), Point::new(to.x, mid_y), to]
        };
        Self {
            from: child.oid.clone(),
            to: parent.oid.clone(),
            color: child.color,
            points,
        }
    }

    /// Returns `true` if the edge is a straight segment.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        self.points.len() == 2
    }

    /// Converts the control points into a drawable path.
    #[must_use]
    pub fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        match self.points.as_slice() {
            [a, b] => {
                path.move_to(*a);
                path.line_to(*b);
            }
            [a, c1, c2, b] => {
                path.move_to(*a);
                path.curve_to(*c1, *c2, *b);
            }
            _ => {}
        }
        path
    }
}

/// Laid-out commit graph.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphLayout {
    /// One node per input commit, in row order.
    pub nodes: Vec<LayoutNode>,
    /// One edge per parent reference that resolves within the input.
    pub edges: Vec<LayoutEdge>,
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
}

impl GraphLayout {
    /// Returns the canvas rectangle, anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Looks a node up by commit identifier.
    ///
    /// This is a linear scan; build a spatial index or a map for repeated lookups.
    #[must_use]
    pub fn node(&self, oid: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.oid == oid)
    }
}

/// Lays out `commits` with [`LayoutConfig::default`].
///
/// See [`compute_layout_with`].
#[must_use]
pub fn compute_layout(commits: &[CommitRecord]) -> GraphLayout {
    compute_layout_with(commits, &LayoutConfig::default())
}

/// Lays out `commits` on a lane × row grid.
///
/// - Columns come from [`assign_lanes`].
/// - Rows follow timestamp-descending order (ties keep input order).
/// - Each resolving parent reference yields one [`LayoutEdge`]; references to
///   commits outside `commits` are dropped, but the commit itself is still
///   placed.
/// - The canvas spans `2 * padding` plus the outermost lane and row, floored at
///   `min_width` × `min_height`.
///
/// The result depends only on `commits` and `config`, so repeated calls on the
/// same input produce identical layouts.
///
/// # Example
///
/// ```
/// use understory_commit_graph::{CommitRecord, compute_layout};
///
/// let commits = [
///     CommitRecord::new("a", 1),
///     CommitRecord::new("b", 2).with_parent("a"),
/// ];
/// let layout = compute_layout(&commits);
/// assert_eq!(layout.nodes.len(), 2);
/// assert_eq!(layout.nodes[0].oid, "b");
/// assert_eq!(layout.edges.len(), 1);
/// assert!(layout.edges[0].is_straight());
/// ```
#[must_use]
pub fn compute_layout_with(commits: &[CommitRecord], config: &LayoutConfig) -> GraphLayout {
    if commits.is_empty() {
        return GraphLayout {
            nodes: Vec::new(),
            edges: Vec::new(),
            width: config.min_width,
            height: config.min_height,
        };
    }

    let lanes = assign_lanes(commits);
    let order = newest_first(commits);

    let mut rows: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    let mut nodes = Vec::with_capacity(order.len());
    let mut max_column = 0;
    for (row, commit) in order.into_iter().enumerate() {
        let column = lanes.get(commit.oid.as_str()).copied().unwrap_or_default();
        max_column = max_column.max(column);
        rows.insert(commit.oid.as_str(), row);
        nodes.push(LayoutNode {
            oid: commit.oid.clone(),
            position: config.position(column, row),
            column,
            row,
            color: config.color(column),
            parents: commit.parents.clone(),
            refs: commit.refs.clone(),
            message: commit.message.clone(),
            is_head: commit.is_head,
        });
    }

    let mut edges = Vec::with_capacity(nodes.len());
    for child in &nodes {
        for parent in &child.parents {
            if let Some(&row) = rows.get(parent.as_str()) {
                edges.push(LayoutEdge::between(child, &nodes[row]));
            }
        }
    }

    let width = (2.0 * config.padding + max_column as f64 * config.column_spacing)
        .max(config.min_width);
    let height = (2.0 * config.padding + (nodes.len() - 1) as f64 * config.row_spacing)
        .max(config.min_height);

    log::debug!(
        "laid out {} commits, {} edges across {} lanes ({width}x{height})",
        nodes.len(),
        edges.len(),
        max_column + 1
    );

    GraphLayout {
        nodes,
        edges,
        width,
        height,
    }
}
