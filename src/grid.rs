// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Grid struct, which describes a rectangle of evenly
//! spaced parameter values on the complex plane, centered on some
//! point and reaching out a half-extent in each direction.
//!
//! The grid is flattened row-major: the imaginary axis is the outer
//! (row) index and the real axis the inner (column) index, so the
//! point at column `x`, row `y` lives at `y * columns + x`.  Row 0 is
//! the lowest imaginary value.
use itertools::iproduct;
use num::Complex;

use error::{finite, InvalidArgument};

/// Fraction of the visible span used as the half-extent of a grid
/// dropped onto a view.
pub const VIEW_FRACTION: f64 = 0.2;

/// Number of points along the real and imaginary axes respectively.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Counts(pub usize, pub usize);

/// Half-width and half-height of a grid.  Both must be non-negative.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extent(pub f64, pub f64);

/// `count` evenly spaced samples from `start` to `stop`, both ends
/// included.  A single sample sits at `start`.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![start],
        _ => {
            let delta = (stop - start) / ((count - 1) as f64);
            let mut samples: Vec<f64> = (0..count).map(|i| start + (i as f64) * delta).collect();
            // Pin the far end so rounding never leaves it short.
            samples[count - 1] = stop;
            samples
        }
    }
}

/// A rectangular batch of parameter values sharing one seed and one
/// iteration budget.
#[derive(Clone, Debug)]
pub struct Grid {
    center: Complex<f64>,
    extent: Extent,
    counts: Counts,
    points: Vec<Complex<f64>>,
}

impl Grid {
    /// Takes the center of the grid, its half-extent along each axis,
    /// and how many points to lay along each axis.  Every axis needs
    /// at least one point; an axis with one point sits on the center.
    pub fn new(center: Complex<f64>, extent: Extent, counts: Counts) -> Result<Grid, InvalidArgument> {
        if counts.0 < 1 || counts.1 < 1 {
            return Err(InvalidArgument::EmptyAxis {
                columns: counts.0,
                rows: counts.1,
            });
        }
        let center = finite("grid center", center)?;
        finite("grid extent", Complex::new(extent.0, extent.1))?;
        if extent.0 < 0.0 || extent.1 < 0.0 {
            return Err(InvalidArgument::InvertedExtent(extent.0, extent.1));
        }

        let xs = axis(center.re, extent.0, counts.0);
        let ys = axis(center.im, extent.1, counts.1);
        let points: Vec<Complex<f64>> = iproduct!(ys.iter(), xs.iter())
            .map(|(&im, &re)| Complex::new(re, im))
            .collect();
        // Finite inputs can still overflow once spread across an axis.
        for point in &points {
            finite("grid point", *point)?;
        }

        Ok(Grid {
            center,
            extent,
            counts,
            points,
        })
    }

    /// A square grid of `points_per_side` points along each axis,
    /// neighbours `spacing` apart.
    pub fn with_spacing(
        center: Complex<f64>,
        spacing: f64,
        points_per_side: usize,
    ) -> Result<Grid, InvalidArgument> {
        let half = (points_per_side.saturating_sub(1) as f64) * spacing / 2.0;
        Grid::new(
            center,
            Extent(half, half),
            Counts(points_per_side, points_per_side),
        )
    }

    /// A square grid of `points_per_side` points whose half-extent is
    /// `VIEW_FRACTION` of the visible width and height.
    pub fn within_view(
        center: Complex<f64>,
        view_width: f64,
        view_height: f64,
        points_per_side: usize,
    ) -> Result<Grid, InvalidArgument> {
        Grid::new(
            center,
            Extent(view_width * VIEW_FRACTION, view_height * VIEW_FRACTION),
            Counts(points_per_side, points_per_side),
        )
    }

    /// The total number of points in the grid.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// A valid grid always holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points along the real axis.
    pub fn columns(&self) -> usize {
        self.counts.0
    }

    /// Points along the imaginary axis.
    pub fn rows(&self) -> usize {
        self.counts.1
    }

    /// The point the grid was built around.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Half-width and half-height.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Every parameter value, flattened row-major.
    pub fn points(&self) -> &[Complex<f64>] {
        &self.points
    }

    /// The flattened offset of a column and row, if both are in range.
    pub fn index(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.counts.0 || row >= self.counts.1 {
            return None;
        }
        Some(row * self.counts.0 + column)
    }

    /// The parameter value at a column and row.
    pub fn point(&self, column: usize, row: usize) -> Option<Complex<f64>> {
        self.index(column, row).map(|i| self.points[i])
    }
}

// An axis with a single point collapses onto its center even when
// the other axis is wider.
fn axis(center: f64, half: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        vec![center]
    } else {
        linspace(center - half, center + half, count)
    }
}
