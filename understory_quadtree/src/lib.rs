// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Quadtree: a point quadtree over Kurbo geometry.
//!
//! This crate indexes `(item, point)` pairs in a recursive partition of a
//! bounding rectangle and answers two questions quickly:
//!
//! - "What is the closest item to this point, within some radius?"
//!   ([`Quadtree::query_nearest`]), the core of pointer hit testing over
//!   scattered markers such as graph nodes.
//! - "Which items lie inside this rectangle?" ([`Quadtree::query_rect`] /
//!   [`Quadtree::visit_rect`]), used for marquee selection and visibility culling.
//!
//! The tree stores points only and has no removal; rebuild it wholesale
//! whenever the underlying positions change.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_quadtree::{Quadtree, QuadtreeConfig};
//!
//! let mut tree = Quadtree::new(Rect::new(0.0, 0.0, 100.0, 100.0), QuadtreeConfig::default());
//! tree.insert(1_u32, Point::new(10.0, 10.0));
//! tree.insert(2, Point::new(50.0, 50.0));
//!
//! // Hit test with a 20px tolerance.
//! assert_eq!(tree.query_nearest(Point::new(11.0, 11.0), 20.0), Some(1));
//! // Points outside the root are ignored.
//! assert!(!tree.insert(3, Point::new(150.0, 50.0)));
//! ```
//!
//! ## Subdivision
//!
//! A leaf splits into four equal quadrants ([`Quadrant`]) once it holds more than
//! [`QuadtreeConfig::max_entries`] entries, unless it sits at
//! [`QuadtreeConfig::max_depth`]. Each insert splits at most one level; a child
//! left over capacity splits on the next insert into it. Points on a quadrant
//! boundary go to the first quadrant containing them, in [`Quadrant::ALL`] order.
//!
//! ## Malformed input
//!
//! Insertion never fails loudly: points outside the root bounds (including NaN
//! coordinates) are dropped and [`Quadtree::insert`] returns `false`. Size the
//! root with some margin around the data.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//! - `serde`: `Serialize`/`Deserialize` for [`QuadtreeConfig`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod tree;

pub use config::{MAX_DEPTH_LIMIT, QuadtreeConfig, QuadtreeConfigError};
pub use tree::{Entry, Quadrant, Quadtree};
