// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Subdivision limits for [`Quadtree`](crate::Quadtree).

use core::fmt;

/// Deepest subdivision level accepted by [`QuadtreeConfig::validate`].
///
/// [`Quadtree::new`](crate::Quadtree::new) clamps larger depths to this value.
///
/// Quadrants at this depth are `2^-32` of the root extent, far below any pixel
/// resolution a hit test can distinguish.
pub const MAX_DEPTH_LIMIT: u32 = 32;

/// Tunable limits controlling when a [`Quadtree`](crate::Quadtree) node subdivides.
///
/// A leaf holding more than `max_entries` entries is split into four quadrants,
/// unless it already sits `max_depth` levels below the root. Leaves at the depth
/// cap absorb any number of entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuadtreeConfig {
    /// Number of entries a leaf may hold before it subdivides.
    pub max_entries: usize,
    /// Maximum number of subdivision levels below the root.
    pub max_depth: u32,
}

impl QuadtreeConfig {
    /// Creates a configuration with the given limits.
    #[must_use]
    pub const fn new(max_entries: usize, max_depth: u32) -> Self {
        Self {
            max_entries,
            max_depth,
        }
    }

    /// Checks the limits for values that make the tree degenerate.
    ///
    /// [`Quadtree::new`](crate::Quadtree::new) accepts any configuration and
    /// clamps the depth; use this when limits come from user settings or other
    /// untrusted input.
    pub fn validate(&self) -> Result<(), QuadtreeConfigError> {
        if self.max_entries == 0 {
            return Err(QuadtreeConfigError::ZeroCapacity);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(QuadtreeConfigError::DepthTooLarge {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

impl Default for QuadtreeConfig {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

/// Error returned by [`QuadtreeConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum QuadtreeConfigError {
    /// `max_entries` is zero, so every insert would subdivide down to the depth cap.
    ZeroCapacity,
    /// `max_depth` exceeds [`MAX_DEPTH_LIMIT`].
    DepthTooLarge {
        /// The rejected depth.
        max_depth: u32,
    },
}

impl fmt::Display for QuadtreeConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "quadtree leaf capacity must be at least 1"),
            Self::DepthTooLarge { max_depth } => write!(
                f,
                "quadtree depth {max_depth} exceeds the limit of {MAX_DEPTH_LIMIT}"
            ),
        }
    }
}

impl core::error::Error for QuadtreeConfigError {}
