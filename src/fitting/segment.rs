/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Spline segment descriptors and knot placement

use serde::{Deserialize, Serialize};

use super::errors::{FitError, Result};
use crate::utils::{closest_value, from_k, to_k};

/// Degree used for a segment whose degree was not supplied
pub const DEFAULT_SEGMENT_DEGREE: usize = 2;

/// One polynomial piece of the spline
///
/// `order` is the number of coefficients (degree + 1). The bounds are
/// energies; they are snapped to the nearest sample when the system is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub order: usize,
    pub low: f64,
    pub high: f64,
}

impl Segment {
    pub fn new(order: usize, low: f64, high: f64) -> Self {
        Self { order, low, high }
    }

    /// Build a segment from a polynomial degree instead of an order
    pub fn with_degree(degree: usize, low: f64, high: f64) -> Self {
        Self::new(degree + 1, low, high)
    }

    /// Polynomial degree (order - 1)
    pub fn degree(&self) -> usize {
        self.order.saturating_sub(1)
    }

    /// Zero-width segments make the normal equations singular
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

/// Turn knot positions into contiguous segments
///
/// Every knot is snapped to the closest sample energy. Segment `i` spans
/// knots `i` and `i + 1` and uses `degrees[i]`, or
/// [`DEFAULT_SEGMENT_DEGREE`] when no degree is given for it. Fewer than two
/// knots produce no segments.
pub fn segments_from_knots(knots: &[f64], degrees: &[usize], energies: &[f64]) -> Vec<Segment> {
    if knots.len() < 2 {
        return Vec::new();
    }

    knots
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let degree = degrees.get(i).copied().unwrap_or(DEFAULT_SEGMENT_DEGREE);
            Segment::with_degree(
                degree,
                closest_value(pair[0], energies),
                closest_value(pair[1], energies),
            )
        })
        .collect()
}

/// Place `count` knots between `first` and `last`, evenly spaced in k
///
/// The end knots stay where they are; interior knots are converted back to
/// energy and snapped to the closest sample.
pub fn distribute_knots(
    first: f64,
    last: f64,
    count: usize,
    e0: f64,
    energies: &[f64],
) -> Result<Vec<f64>> {
    if count < 2 {
        return Err(FitError::InvalidInput(format!(
            "need at least 2 knots, got {}",
            count
        )));
    }

    let k_min = to_k(first, e0);
    let k_max = to_k(last, e0);
    let step = (k_max - k_min) / (count - 1) as f64;

    let mut knots = Vec::with_capacity(count);
    knots.push(first);
    for i in 1..count - 1 {
        let energy = from_k(k_min + i as f64 * step, e0);
        knots.push(closest_value(energy, energies));
    }
    knots.push(last);

    Ok(knots)
}
