// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Batch escape classification.
//!
//! Every point of a grid starts at the same seed and is advanced one
//! step at a time, all together.  A per-point mask records which
//! orbits are still live; once a point escapes it is classified,
//! masked out, and its iterate is never touched again.  When nothing
//! is live the loop quits early.  None of this changes the answer:
//! each point ends up with exactly the classification (and escape
//! step) that `evaluate` would give it on its own.

use std::panic;

use crossbeam;
use num::Complex;

use error::{finite, InvalidArgument};
use grid::Grid;
use orbit::{budget, escaped, step, Classification};

/// Classifications for every point of a grid, index-aligned with the
/// grid's flattened points.  No trajectories are kept.
#[derive(Clone, Debug, PartialEq)]
pub struct GridResult {
    points: Vec<Complex<f64>>,
    classifications: Vec<Classification>,
    escape_steps: Vec<Option<usize>>,
}

impl GridResult {
    fn unclassified(grid: &Grid) -> GridResult {
        GridResult {
            points: grid.points().to_vec(),
            classifications: vec![Classification::Converges; grid.len()],
            escape_steps: vec![None; grid.len()],
        }
    }

    /// The parameter values, in grid order.
    pub fn points(&self) -> &[Complex<f64>] {
        &self.points
    }

    /// One classification per point.
    pub fn classifications(&self) -> &[Classification] {
        &self.classifications
    }

    /// The 1-indexed escape step per point, `None` for points that
    /// never escaped.
    pub fn escape_steps(&self) -> &[Option<usize>] {
        &self.escape_steps
    }

    /// Number of points in the result.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Never true for a result built from a valid grid.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// How many points received the given classification.
    pub fn count(&self, classification: Classification) -> usize {
        self.classifications
            .iter()
            .filter(|&&c| c == classification)
            .count()
    }

    /// Walks the point, classification, and escape step of each grid
    /// point together.
    pub fn iter<'a>(
        &'a self,
    ) -> impl Iterator<Item = (Complex<f64>, Classification, Option<usize>)> + 'a {
        self.points
            .iter()
            .zip(self.classifications.iter())
            .zip(self.escape_steps.iter())
            .map(|((&p, &c), &s)| (p, c, s))
    }
}

/// The masked kernel.  `params`, `classes`, and `steps` are the same
/// length and belong to one caller; nothing here is shared.
fn classify_band(
    params: &[Complex<f64>],
    z0: Complex<f64>,
    limit: usize,
    classes: &mut [Classification],
    steps: &mut [Option<usize>],
) {
    let mut z = vec![z0; params.len()];
    let mut live = vec![true; params.len()];
    let mut remaining = params.len();

    for iteration in 1..=limit {
        if remaining == 0 {
            break;
        }
        for i in 0..params.len() {
            if !live[i] {
                continue;
            }
            z[i] = step(z[i], params[i]);
            if escaped(z[i]) {
                live[i] = false;
                classes[i] = Classification::Diverges;
                steps[i] = Some(iteration);
                remaining -= 1;
            }
        }
    }
}

/// Classifies every point of `grid`, each orbit starting from `z0`,
/// with at most `max_iter` steps per point.
pub fn classify_grid(grid: &Grid, z0: Complex<f64>, max_iter: i64) -> Result<GridResult, InvalidArgument> {
    let limit = budget(max_iter)?;
    let z0 = finite("z0", z0)?;

    let mut result = GridResult::unclassified(grid);
    classify_band(
        grid.points(),
        z0,
        limit,
        &mut result.classifications,
        &mut result.escape_steps,
    );
    Ok(result)
}

/// The same as `classify_grid`, but the flattened grid is cut into
/// contiguous bands, one per thread.  Points never interact, so each
/// thread gets its own disjoint slices and no locking is needed.
pub fn classify_grid_threaded(
    grid: &Grid,
    z0: Complex<f64>,
    max_iter: i64,
    threads: usize,
) -> Result<GridResult, InvalidArgument> {
    let limit = budget(max_iter)?;
    let z0 = finite("z0", z0)?;
    if threads == 0 {
        return Err(InvalidArgument::NoWorkers);
    }

    let mut result = GridResult::unclassified(grid);
    let band = (grid.len() + threads - 1) / threads;
    {
        let params = grid.points().chunks(band);
        let classes = result.classifications.chunks_mut(band);
        let steps = result.escape_steps.chunks_mut(band);
        let scoped = crossbeam::scope(|spawner| {
            for ((params, classes), steps) in params.zip(classes).zip(steps) {
                spawner.spawn(move |_| classify_band(params, z0, limit, classes, steps));
            }
        });
        if let Err(cause) = scoped {
            panic::resume_unwind(cause);
        }
    }
    Ok(result)
}
