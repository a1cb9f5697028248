// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one kind of failure the engine knows about: the caller handed
//! it something it cannot iterate.  Every check happens before the
//! first step is taken, so an error never comes with a partial
//! trajectory or a half-classified grid.

use num::Complex;

/// Rejected input to one of the evaluators.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum InvalidArgument {
    /// The iteration budget was negative, or too large to count.
    #[fail(display = "iteration budget must be a non-negative count, got {}", _0)]
    InvalidBudget(i64),

    /// One of the grid axes asked for no points at all.
    #[fail(
        display = "a grid needs at least one point per axis, got {}x{}",
        columns, rows
    )]
    EmptyAxis {
        /// Requested points along the real axis.
        columns: usize,
        /// Requested points along the imaginary axis.
        rows: usize,
    },

    /// A half-extent was negative, which would flip the grid.
    #[fail(display = "grid half-extent must not be negative, got ({}, {})", _0, _1)]
    InvertedExtent(f64, f64),

    /// NaN or an infinity turned up in a numeric input.
    #[fail(display = "{} must be finite, got {}", what, value)]
    NonFinite {
        /// Which input was at fault.
        what: &'static str,
        /// The offending value.
        value: Complex<f64>,
    },

    /// The threaded classifier was asked to run on zero threads.
    #[fail(display = "at least one worker thread is required")]
    NoWorkers,
}

/// Rejects NaN and infinities in either component.
pub(crate) fn finite(what: &'static str, value: Complex<f64>) -> Result<Complex<f64>, InvalidArgument> {
    if value.re.is_finite() && value.im.is_finite() {
        Ok(value)
    } else {
        Err(InvalidArgument::NonFinite { what, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64;

    #[test]
    fn finite_passes_ordinary_values() {
        let z = Complex::new(-0.75, 0.1);
        assert_eq!(finite("c", z), Ok(z));
    }

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert!(finite("c", Complex::new(f64::NAN, 0.0)).is_err());
        assert!(finite("c", Complex::new(0.0, f64::INFINITY)).is_err());
        assert!(finite("c", Complex::new(f64::NEG_INFINITY, 1.0)).is_err());
    }

    #[test]
    fn messages_name_the_bad_input() {
        let e = InvalidArgument::InvalidBudget(-1);
        assert_eq!(
            format!("{}", e),
            "iteration budget must be a non-negative count, got -1"
        );
        let e = InvalidArgument::EmptyAxis { columns: 0, rows: 3 };
        assert_eq!(format!("{}", e), "a grid needs at least one point per axis, got 0x3");
    }
}
