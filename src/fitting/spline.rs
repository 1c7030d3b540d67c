/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Constrained spline fitting
//!
//! [`fit_spline`] solves the augmented system from [`super::bounds`] and
//! evaluates the resulting polynomials over the whole sample domain. Two
//! situations never reach the solver result: degenerate segment lists give a
//! flat curve at the mean of the data, and a singular system gives a straight
//! line between the outer segment bounds.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::bounds::{build_constrained_system, coefficient_offsets};
use super::errors::{FitError, Result};
use super::polynomial::Polynomial;
use super::segment::Segment;
use crate::utils::math::mean;
use crate::utils::{closest_index, solve_linear_system};

/// How a spline curve was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplineMethod {
    /// Solution of the constrained least-squares system
    Constrained,
    /// Mean of the data, used when the segments are unusable
    FlatMean,
    /// Straight line between the outer bounds after a singular solve
    LinearFallback,
}

/// Result of a spline fit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplineFit {
    /// Spline evaluated at every sample
    pub values: Vec<f64>,
    /// Spline value at the edge energy, used for normalization
    pub value_at_e0: f64,
    /// One polynomial per segment (a single line or constant for fallbacks)
    pub polynomials: Vec<Polynomial>,
    pub method: SplineMethod,
}

impl SplineFit {
    fn flat(y: &[f64]) -> Self {
        let level = mean(y);
        Self {
            values: vec![level; y.len()],
            value_at_e0: level,
            polynomials: vec![Polynomial::new(vec![level])],
            method: SplineMethod::FlatMean,
        }
    }
}

/// Fit a continuity-constrained spline to `(x, y)`
///
/// # Arguments
///
/// * `x` - Sample energies, sorted ascending
/// * `y` - Sample values (usually background-subtracted absorption)
/// * `e0` - Edge energy
/// * `segments` - Spline pieces in ascending order
///
/// # Returns
///
/// The fitted curve and its value at `e0`. Mismatched or empty sample arrays
/// are an error; everything else produces a curve.
pub fn fit_spline(x: &[f64], y: &[f64], e0: f64, segments: &[Segment]) -> Result<SplineFit> {
    if x.len() != y.len() || x.is_empty() {
        warn!(
            "cannot fit spline: {} energies and {} values",
            x.len(),
            y.len()
        );
        return Err(FitError::InvalidInput(format!(
            "spline fit needs equal, non-empty arrays (got {} and {})",
            x.len(),
            y.len()
        )));
    }

    if segments.is_empty() || segments.iter().any(Segment::is_degenerate) {
        debug!("no usable spline segments, returning the mean");
        return Ok(SplineFit::flat(y));
    }

    let system = build_constrained_system(x, y, segments, e0)?;
    let solution = match solve_linear_system(&system.matrix, &system.vector) {
        Ok(solution) => solution,
        Err(err) => {
            warn!("spline system could not be solved ({}), using a straight line", err);
            return Ok(linear_fallback(x, y, e0, segments));
        }
    };

    let polynomials: Vec<Polynomial> = segments
        .iter()
        .zip(coefficient_offsets(segments))
        .map(|(seg, offset)| {
            Polynomial::new(solution.iter().skip(offset).take(seg.order).copied().collect())
        })
        .collect();

    let values = evaluate_segments(x, segments, &polynomials);
    let value_at_e0 = polynomials[0].evaluate(e0);

    Ok(SplineFit {
        values,
        value_at_e0,
        polynomials,
        method: SplineMethod::Constrained,
    })
}

/// Evaluate piecewise polynomials over every sample
///
/// Sample `i` uses the polynomial of the last segment whose snapped low bound
/// lies at or before `i`. Samples before the first segment use the first
/// polynomial, samples after the last one the last polynomial.
pub fn evaluate_segments(x: &[f64], segments: &[Segment], polynomials: &[Polynomial]) -> Vec<f64> {
    let starts: Vec<usize> = segments
        .iter()
        .map(|seg| closest_index(seg.low, x))
        .collect();

    x.iter()
        .enumerate()
        .map(|(i, &xi)| {
            let piece = starts.iter().rposition(|&start| start <= i).unwrap_or(0);
            polynomials.get(piece).map_or(0.0, |p| p.evaluate(xi))
        })
        .collect()
}

/// Straight line through the samples nearest the outermost segment bounds
///
/// The anchors are the snapped samples `x[low]` and `x[high]`, not the bound
/// values themselves, so unsnapped bounds give the line of their nearest
/// samples. Below the low bound the edge value is held at the low sample.
fn linear_fallback(x: &[f64], y: &[f64], e0: f64, segments: &[Segment]) -> SplineFit {
    let low = closest_index(segments[0].low, x);
    let high = closest_index(segments[segments.len() - 1].high, x);
    let (low_x, low_y) = (x[low], y[low]);
    let (high_x, high_y) = (x[high], y[high]);

    let run = high_x - low_x;
    let slope = if run != 0.0 { (high_y - low_y) / run } else { 0.0 };

    let value_at_e0 = if e0 >= low_x {
        low_y + slope * (e0 - low_x)
    } else {
        low_y
    };

    let line = Polynomial::new(vec![low_y - slope * low_x, slope]);
    let values = x.iter().map(|&xi| line.evaluate(xi)).collect();

    SplineFit {
        values,
        value_at_e0,
        polynomials: vec![line],
        method: SplineMethod::LinearFallback,
    }
}
