// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout metrics and palette.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use peniko::Color;
use peniko::color::palette::css;

/// Lane colors used by [`LayoutConfig::default`].
pub const DEFAULT_PALETTE: [Color; 8] = [
    css::DODGER_BLUE,
    css::TOMATO,
    css::MEDIUM_SEA_GREEN,
    css::ORANGE,
    css::MEDIUM_PURPLE,
    css::DEEP_PINK,
    css::DARK_TURQUOISE,
    css::GOLDENROD,
];

/// Pixel metrics and colors for [`compute_layout_with`](crate::compute_layout_with).
///
/// Node centers sit on a grid: `x = padding + column * column_spacing` and
/// `y = padding + row * row_spacing`. The canvas is at least
/// `min_width` × `min_height` so empty or tiny graphs still get a usable area.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Margin between the canvas edge and the outermost node centers.
    pub padding: f64,
    /// Horizontal distance between adjacent lanes.
    pub column_spacing: f64,
    /// Vertical distance between adjacent rows.
    pub row_spacing: f64,
    /// Smallest canvas width reported by a layout.
    pub min_width: f64,
    /// Smallest canvas height reported by a layout.
    pub min_height: f64,
    /// Lane colors, indexed by `column % palette.len()`.
    ///
    /// An empty palette falls back to [`DEFAULT_PALETTE`].
    pub palette: Vec<Color>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            column_spacing: 40.0,
            row_spacing: 50.0,
            min_width: 200.0,
            min_height: 200.0,
            palette: DEFAULT_PALETTE.to_vec(),
        }
    }
}

impl LayoutConfig {
    /// Returns the center of the node at `column`/`row`.
    #[must_use]
    pub fn position(&self, column: usize, row: usize) -> Point {
        Point::new(
            self.padding + column as f64 * self.column_spacing,
            self.padding + row as f64 * self.row_spacing,
        )
    }

    /// Returns the color of lane `column`.
    #[must_use]
    pub fn color(&self, column: usize) -> Color {
        if self.palette.is_empty() {
            DEFAULT_PALETTE[column % DEFAULT_PALETTE.len()]
        } else {
            self.palette[column % self.palette.len()]
        }
    }

    /// Checks that every metric is finite and non-negative and that the palette
    /// is not empty.
    ///
    /// Layout itself accepts any configuration; validate configs that come from
    /// user settings before handing them over.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        let metrics = [
            ("padding", self.padding),
            ("column_spacing", self.column_spacing),
            ("row_spacing", self.row_spacing),
            ("min_width", self.min_width),
            ("min_height", self.min_height),
        ];
        for (field, value) in metrics {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutConfigError::InvalidMetric { field, value });
            }
        }
        if self.palette.is_empty() {
            return Err(LayoutConfigError::EmptyPalette);
        }
        Ok(())
    }
}

/// Error returned by [`LayoutConfig::validate`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LayoutConfigError {
    /// A spacing, padding, or floor is negative, infinite, or NaN.
    InvalidMetric {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The palette has no colors.
    EmptyPalette,
}

impl fmt::Display for LayoutConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMetric { field, value } => write!(
                f,
                "layout metric `{field}` must be finite and non-negative, got {value}"
            ),
            Self::EmptyPalette => write!(f, "layout palette must contain at least one color"),
        }
    }
}

impl core::error::Error for LayoutConfigError {}
