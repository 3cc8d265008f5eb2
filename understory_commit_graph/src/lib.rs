// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Commit Graph: layout and hit testing for commit histories.
//!
//! This crate turns an unordered slice of [`CommitRecord`]s into a
//! deterministic swimlane picture of the history and an index for pointer
//! queries over it:
//!
//! - **Adjacency** ([`build_adjacency`]): commit → raw parent list.
//! - **Topological order** ([`topo_sort`], [`topo_sort_with_completion`]):
//!   Kahn's algorithm, parents before children, cycles broken deterministically.
//! - **Lanes** ([`assign_lanes`]): greedy column allocation that keeps first-parent
//!   chains straight and fans branches out into free lanes.
//! - **Layout** ([`compute_layout`], [`compute_layout_with`]): pixel positions,
//!   lane colors, and straight or S-curved edges ([`GraphLayout`]).
//! - **Hit testing** ([`build_spatial_index`]): an `understory_quadtree` over the
//!   node centers, answering nearest-node and rectangle queries.
//! - **Ancestry** ([`is_ancestor`], [`Ancestry`]): breadth-first reachability
//!   over parent edges.
//!
//! It does **not** talk to a version-control system, render anything, or keep
//! state between calls. Every function is a pure, synchronous computation over
//! its input slice; callers recompute the whole layout whenever the history
//! changes.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_commit_graph::{CommitRecord, build_spatial_index, compute_layout};
//!
//! // main: a - b - d (merge)
//! // side:      \- c -/
//! let commits = vec![
//!     CommitRecord::new("a", 1),
//!     CommitRecord::new("b", 2).with_parent("a"),
//!     CommitRecord::new("c", 3).with_parent("b").with_ref("side"),
//!     CommitRecord::new("d", 4).with_parents(["b", "c"]).with_ref("main").with_head(true),
//! ];
//!
//! let layout = compute_layout(&commits);
//! assert_eq!(layout.nodes.len(), 4);
//! assert_eq!(layout.edges.len(), 4);
//!
//! // The merge source is drawn in its own lane.
//! let c = layout.node("c").unwrap();
//! assert_eq!(c.column, 1);
//!
//! // Hit test around c's center.
//! let index = build_spatial_index(&layout);
//! let hit = index.query_nearest(c.position, 10.0).unwrap();
//! assert_eq!(hit.oid, "c");
//! ```
//!
//! ## Malformed input
//!
//! Nothing in this crate fails on bad input. Parent identifiers that do not
//! resolve within the slice are dropped from edges, lanes, and ancestry walks
//! (the commit itself is still placed), cycles are appended to the topological
//! order in input order, and empty input yields an empty layout with the
//! minimum canvas size. Identifiers are expected to be unique.
//!
//! Configuration is the only fallible surface: [`LayoutConfig::validate`]
//! rejects metrics that would produce a nonsensical canvas.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade at `debug`
//! and `trace` level. No logger is installed by this crate.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std` and `peniko/std`.
//! - `libm`: forwards to `kurbo/libm` and `peniko/libm` for `no_std` builds.
//! - `serde`: `Serialize`/`Deserialize` for records, layout output, and configs.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adjacency;
mod ancestry;
mod commit;
mod config;
mod index;
mod lanes;
mod layout;
pub mod synthetic;
mod topo;

pub use adjacency::{Adjacency, build_adjacency};
pub use ancestry::{Ancestry, is_ancestor};
pub use commit::CommitRecord;
pub use config::{DEFAULT_PALETTE, LayoutConfig, LayoutConfigError};
pub use index::{INDEX_MARGIN, SpatialIndex, build_spatial_index, build_spatial_index_with};
pub use lanes::assign_lanes;
pub use layout::{GraphLayout, LayoutEdge, LayoutNode, compute_layout, compute_layout_with};
pub use topo::{SortCompletion, topo_sort, topo_sort_with_completion};
pub use understory_quadtree::{Quadtree, QuadtreeConfig};
