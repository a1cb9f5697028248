#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Orbit probe
//!
//! Pick a point c on the complex plane, pick a seed z0, and apply
//! z <- z * z + c over and over.  Some orbits stay close to home
//! forever; others run off to infinity.  The classic escape-time test
//! watches the magnitude of each iterate and, the moment it passes 2,
//! declares that the orbit diverges.  If the iteration budget runs
//! out first, we call the orbit convergent, knowing full well that a
//! bigger budget might have caught it escaping.
//!
//! Two evaluators live here.  `evaluate` follows a single point and
//! hands back its whole trajectory, which is what you want when
//! someone clicks on a point and asks "what happens here?"
//! `classify_grid` takes a whole rectangle of parameter values, runs
//! them all side by side, and keeps only the verdicts.  Both use the
//! same `step` and the same `escaped` test, so the two always agree.
//!
//! The library keeps no state between calls, does no I/O, and never
//! logs.  Anything that looks like user interface lives in the
//! `probe` binary.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate itertools;
extern crate num;

pub mod classify;
pub mod error;
pub mod grid;
pub mod orbit;

pub use classify::{classify_grid, classify_grid_threaded, GridResult};
pub use error::InvalidArgument;
pub use grid::{linspace, Counts, Extent, Grid, VIEW_FRACTION};
pub use num::Complex;
pub use orbit::{escaped, evaluate, step, Classification, Orbit, ESCAPE_RADIUS};

/// The knobs shared by a single probe and a grid probe, with the
/// explorer's starting values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Params {
    /// Seed of every orbit.
    pub z0: Complex<f64>,
    /// Step budget per orbit.
    pub max_iter: i64,
    /// Points along each side of a grid.
    pub points_per_side: usize,
    /// Width and height of the visible region a grid is dropped into.
    pub view: (f64, f64),
}

impl Default for Params {
    fn default() -> Params {
        Params {
            z0: Complex::new(0.0, 0.0),
            max_iter: 100,
            points_per_side: 11,
            view: (2.5, 2.5),
        }
    }
}

impl Params {
    /// Follows a single parameter value.
    pub fn probe(&self, c: Complex<f64>) -> Result<Orbit, InvalidArgument> {
        evaluate(self.z0, c, self.max_iter)
    }

    /// The grid that grid mode drops around `center`.
    pub fn grid_around(&self, center: Complex<f64>) -> Result<Grid, InvalidArgument> {
        Grid::within_view(center, self.view.0, self.view.1, self.points_per_side)
    }
}
