// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Single-point orbits.
//!
//! Starting at a seed z0, repeatedly square and add the parameter c.
//! If the magnitude of any iterate climbs past the escape radius the
//! orbit is said to diverge, and we stop right there.  If it never
//! does within the iteration budget we call it convergent, which is
//! only a statement about the budget: a point that escapes at step
//! 10,001 looks exactly like a point of the Mandelbrot set when we
//! only look at 10,000 steps.
//!
//! `step` and `escaped` are the rule and the test for the whole
//! crate.  The batch classifier uses them too, and nothing else may
//! carry its own copy.

use std::convert::TryFrom;
use std::fmt;

use num::Complex;

use error::{finite, InvalidArgument};

/// Magnitude beyond which an orbit is considered to have escaped.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// One application of the quadratic map: square first, then add.
#[inline]
pub fn step(z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
    z * z + c
}

/// True when `z` lies strictly outside the escape radius.
#[inline]
pub fn escaped(z: Complex<f64>) -> bool {
    z.norm() > ESCAPE_RADIUS
}

/// Converts a caller's iteration count into a usable budget.
pub(crate) fn budget(max_iter: i64) -> Result<usize, InvalidArgument> {
    usize::try_from(max_iter).map_err(|_| InvalidArgument::InvalidBudget(max_iter))
}

/// What an orbit did within its iteration budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Some iterate left the escape radius.
    Diverges,
    /// No iterate left the escape radius before the budget ran out.
    /// This is a finite-budget approximation, not a proof of
    /// boundedness.
    Converges,
}

impl Classification {
    /// Convenience for colour selection and counting.
    pub fn diverges(self) -> bool {
        self == Classification::Diverges
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Classification::Diverges => write!(f, "diverges"),
            Classification::Converges => write!(f, "converges"),
        }
    }
}

/// The full trajectory of a single seed under a single parameter,
/// along with its classification.  The seed is element 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    trajectory: Vec<Complex<f64>>,
    classification: Classification,
}

impl Orbit {
    /// Every iterate computed, seed first.  For a diverging orbit the
    /// last element is the first one outside the escape radius.
    pub fn trajectory(&self) -> &[Complex<f64>] {
        &self.trajectory
    }

    /// Whether the orbit escaped within its budget.
    pub fn classification(&self) -> Classification {
        self.classification
    }

    /// The 1-indexed step on which the orbit escaped, if it did.
    pub fn escape_step(&self) -> Option<usize> {
        match self.classification {
            Classification::Diverges => Some(self.trajectory.len() - 1),
            Classification::Converges => None,
        }
    }

    /// The final iterate computed.
    pub fn last(&self) -> Complex<f64> {
        // The seed is always present.
        self.trajectory[self.trajectory.len() - 1]
    }

    /// Gives up ownership of the trajectory.
    pub fn into_trajectory(self) -> Vec<Complex<f64>> {
        self.trajectory
    }
}

/// Iterates `z0` under `c` for at most `max_iter` steps, stopping at
/// the first iterate that escapes.
///
/// ```
/// use orbitprobe::{evaluate, Classification, Complex};
///
/// let orbit = evaluate(Complex::new(0.0, 0.0), Complex::new(3.0, 0.0), 5).unwrap();
/// assert_eq!(orbit.classification(), Classification::Diverges);
/// assert_eq!(orbit.trajectory().len(), 2);
/// ```
pub fn evaluate(
    z0: Complex<f64>,
    c: Complex<f64>,
    max_iter: i64,
) -> Result<Orbit, InvalidArgument> {
    let limit = budget(max_iter)?;
    let mut z = finite("z0", z0)?;
    let c = finite("c", c)?;

    let mut trajectory = Vec::with_capacity(limit.min(1024) + 1);
    trajectory.push(z);
    for _ in 0..limit {
        z = step(z, c);
        trajectory.push(z);
        if escaped(z) {
            return Ok(Orbit {
                trajectory,
                classification: Classification::Diverges,
            });
        }
    }
    Ok(Orbit {
        trajectory,
        classification: Classification::Converges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Complex<f64> {
        Complex::new(0.0, 0.0)
    }

    #[test]
    fn step_squares_then_adds() {
        let z = Complex::new(1.0, 2.0);
        let c = Complex::new(0.5, -0.5);
        // (1 + 2i)^2 = -3 + 4i
        assert_eq!(step(z, c), Complex::new(-2.5, 3.5));
    }

    #[test]
    fn escape_is_strictly_greater_than_two() {
        assert!(!escaped(Complex::new(2.0, 0.0)));
        assert!(!escaped(Complex::new(0.0, -2.0)));
        assert!(escaped(Complex::new(2.0000001, 0.0)));
        assert!(escaped(Complex::new(1.5, 1.5)));
    }

    #[test]
    fn zero_budget_returns_only_the_seed() {
        let seed = Complex::new(5.0, 5.0);
        let orbit = evaluate(seed, Complex::new(1.0, 1.0), 0).unwrap();
        assert_eq!(orbit.trajectory(), &[seed]);
        assert_eq!(orbit.classification(), Classification::Converges);
        assert_eq!(orbit.escape_step(), None);
    }

    #[test]
    fn origin_is_a_fixed_point() {
        let orbit = evaluate(origin(), origin(), 50).unwrap();
        assert_eq!(orbit.classification(), Classification::Converges);
        assert_eq!(orbit.trajectory().len(), 51);
        assert!(orbit.trajectory().iter().all(|z| *z == origin()));
    }

    #[test]
    fn three_escapes_on_the_first_step() {
        let orbit = evaluate(origin(), Complex::new(3.0, 0.0), 5).unwrap();
        assert_eq!(orbit.classification(), Classification::Diverges);
        assert_eq!(orbit.escape_step(), Some(1));
        assert_eq!(orbit.trajectory(), &[origin(), Complex::new(3.0, 0.0)]);
    }

    #[test]
    fn stops_at_the_first_escaping_iterate() {
        // 0 -> 1 -> 2 -> 5: |2| is not past the radius, |5| is.
        let orbit = evaluate(origin(), Complex::new(1.0, 0.0), 100).unwrap();
        assert_eq!(orbit.escape_step(), Some(3));
        assert_eq!(
            orbit.trajectory(),
            &[
                origin(),
                Complex::new(1.0, 0.0),
                Complex::new(2.0, 0.0),
                Complex::new(5.0, 0.0)
            ]
        );
        assert_eq!(orbit.last(), Complex::new(5.0, 0.0));
    }

    #[test]
    fn period_two_orbit_converges() {
        // c = -1 cycles 0, -1, 0, -1, ...
        let orbit = evaluate(origin(), Complex::new(-1.0, 0.0), 9).unwrap();
        assert_eq!(orbit.classification(), Classification::Converges);
        assert_eq!(orbit.trajectory().len(), 10);
        assert_eq!(orbit.last(), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn nonzero_seed_is_honoured() {
        let orbit = evaluate(Complex::new(2.5, 0.0), origin(), 3).unwrap();
        assert_eq!(orbit.escape_step(), Some(1));
        assert_eq!(orbit.last(), Complex::new(6.25, 0.0));
    }

    #[test]
    fn negative_budget_is_rejected() {
        assert_eq!(
            evaluate(origin(), origin(), -1),
            Err(InvalidArgument::InvalidBudget(-1))
        );
    }

    #[test]
    fn non_finite_inputs_are_rejected() {
        use std::f64;
        assert!(evaluate(Complex::new(f64::NAN, 0.0), origin(), 3).is_err());
        assert!(evaluate(origin(), Complex::new(0.0, f64::INFINITY), 3).is_err());
    }

    #[test]
    fn classification_displays_lowercase() {
        assert_eq!(Classification::Diverges.to_string(), "diverges");
        assert_eq!(Classification::Converges.to_string(), "converges");
        assert!(Classification::Diverges.diverges());
        assert!(!Classification::Converges.diverges());
    }
}
