/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Constrained least-squares system for piecewise polynomial splines
//!
//! All segment polynomials are solved for at once. The unknown vector is laid
//! out segment by segment: the `order` coefficients of a segment are followed
//! by two Lagrange multipliers tying it to the next segment, so the system has
//! `sum(order) + 2 * (segments - 1)` unknowns.
//!
//! ```text
//!  | N_0   C_0r               |   | a_0  |   | b_0 |
//!  | K_0r        K_1l         |   | λ_01 |   |  0  |
//!  |       C_1l  N_1   C_1r   | * | a_1  | = | b_1 |
//!  |             K_1r    ...  |   | λ_12 |   |  0  |
//! ```
//!
//! `N_i` holds the k^3-weighted normal equations of segment `i`, `C` the
//! multiplier columns and `K` the continuity rows. The rows require the value
//! and first derivative of neighbouring pieces to agree at the shared knot,
//! with the lower segment entering negatively at its high bound and the
//! upper segment positively at its low bound.

use log::{debug, warn};
use ndarray::{Array1, Array2};

use super::errors::{FitError, Result};
use super::segment::Segment;
use crate::utils::{closest_index, k_weight};

/// The augmented linear system for one spline fit
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub matrix: Array2<f64>,
    pub vector: Array1<f64>,
}

impl LinearSystem {
    fn zeros(size: usize) -> Self {
        Self {
            matrix: Array2::zeros((size, size)),
            vector: Array1::zeros(size),
        }
    }

    /// Number of unknowns
    pub fn size(&self) -> usize {
        self.vector.len()
    }
}

/// Number of unknowns for a set of segments
pub fn system_size(segments: &[Segment]) -> usize {
    let total_order: usize = segments.iter().map(|s| s.order).sum();
    (total_order + 2 * segments.len()).saturating_sub(2)
}

/// Offset of each segment's first coefficient in the solution vector
pub fn coefficient_offsets(segments: &[Segment]) -> Vec<usize> {
    segments
        .iter()
        .scan(0usize, |offset, seg| {
            let start = *offset;
            *offset += seg.order + 2;
            Some(start)
        })
        .collect()
}

#[inline]
fn monomial(x: f64, power: usize) -> f64 {
    x.powi(power as i32)
}

/// d/dx x^power, defined as 0 for the constant term
#[inline]
fn monomial_slope(x: f64, power: usize) -> f64 {
    if power == 0 {
        0.0
    } else {
        power as f64 * x.powi(power as i32 - 1)
    }
}

/// Position of a segment within the spline
#[derive(Debug, Clone, Copy)]
struct Neighbours {
    has_previous: bool,
    has_next: bool,
}

/// Build the constrained normal equations for `segments`
///
/// # Arguments
///
/// * `x` - Sample energies, sorted ascending
/// * `y` - Sample values
/// * `segments` - Spline pieces in ascending order
/// * `e0` - Edge energy used for the k^3 weights
///
/// # Returns
///
/// The square system; solving it yields every segment's coefficients followed
/// by its multiplier pair. A single segment yields the plain `order x order`
/// weighted normal equations.
pub fn build_constrained_system(
    x: &[f64],
    y: &[f64],
    segments: &[Segment],
    e0: f64,
) -> Result<LinearSystem> {
    if x.len() != y.len() {
        warn!(
            "x and y need the same length for a spline fit ({} vs {})",
            x.len(),
            y.len()
        );
        return Err(FitError::InvalidInput(format!(
            "x has {} samples but y has {}",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        warn!("spline system requested for empty data");
        return Err(FitError::InvalidInput("no samples to fit".to_string()));
    }
    if segments.is_empty() {
        return Err(FitError::InvalidInput("no spline segments".to_string()));
    }
    if let Some(i) = segments.iter().position(|s| s.order == 0) {
        return Err(FitError::InvalidInput(format!(
            "segment {} has no coefficients",
            i
        )));
    }

    let size = system_size(segments);
    let mut system = LinearSystem::zeros(size);
    let weights: Vec<f64> = x.iter().map(|&xi| k_weight(xi, e0)).collect();
    let last = segments.len() - 1;

    debug!(
        "building spline system: {} segments, {} unknowns",
        segments.len(),
        size
    );

    segments
        .iter()
        .enumerate()
        .fold(0usize, |offset, (i, segment)| {
            let neighbours = Neighbours {
                has_previous: i > 0,
                has_next: i < last,
            };
            fill_segment(&mut system, x, y, &weights, segment, offset, neighbours);
            offset + segment.order + 2
        });

    Ok(system)
}

/// Write one segment's normal-equation block and its continuity terms
fn fill_segment(
    system: &mut LinearSystem,
    x: &[f64],
    y: &[f64],
    weights: &[f64],
    segment: &Segment,
    offset: usize,
    neighbours: Neighbours,
) {
    let last_sample = x.len() - 1;
    let lindex = closest_index(segment.low, x).min(last_sample);
    let hindex = closest_index(segment.high, x).min(last_sample);
    let order = segment.order;
    let x_low = x[lindex];
    let x_high = x[hindex];
    let constrained = neighbours.has_previous || neighbours.has_next;

    for row in 0..order {
        for col in 0..order {
            let sum: f64 = (lindex..=hindex)
                .map(|i| monomial(x[i], row + col) * weights[i])
                .sum();
            system.matrix[(offset + row, offset + col)] = sum;
        }
        system.vector[offset + row] = (lindex..=hindex)
            .map(|i| monomial(x[i], row) * y[i] * weights[i])
            .sum();

        if !constrained {
            continue;
        }

        // Multiplier columns: the first of each pair carries the slope
        // gradient, the second the value gradient.
        if neighbours.has_next {
            system.matrix[(offset + row, offset + order)] = 0.5 * monomial_slope(x_high, row);
            system.matrix[(offset + row, offset + order + 1)] = 0.5 * monomial(x_high, row);
        }
        if neighbours.has_previous {
            system.matrix[(offset + row, offset - 2)] = -0.5 * monomial_slope(x_low, row);
            system.matrix[(offset + row, offset - 1)] = -0.5 * monomial(x_low, row);
        }
    }

    if !constrained {
        return;
    }

    for col in 0..order {
        if neighbours.has_next {
            system.matrix[(offset + order, offset + col)] = -monomial(x_high, col);
            system.matrix[(offset + order + 1, offset + col)] = -monomial_slope(x_high, col);
        }
        if neighbours.has_previous {
            system.matrix[(offset - 2, offset + col)] = monomial(x_low, col);
            system.matrix[(offset - 1, offset + col)] = monomial_slope(x_low, col);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ramp(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y: Vec<f64> = x.iter().map(|&v| 1.0 + 0.5 * v).collect();
        (x, y)
    }

    #[test]
    fn test_system_size() {
        let segs = [
            Segment::new(3, 0.0, 10.0),
            Segment::new(2, 10.0, 20.0),
            Segment::new(4, 20.0, 30.0),
        ];
        assert_eq!(system_size(&segs), 9 + 4);
        assert_eq!(system_size(&segs[..1]), 3);
        assert_eq!(coefficient_offsets(&segs), vec![0, 5, 9]);
    }

    #[test]
    fn test_single_segment_is_plain_normal_equations() {
        let (x, y) = ramp(20);
        let e0 = -1.0;
        let system = build_constrained_system(&x, &y, &[Segment::new(2, 0.0, 19.0)], e0).unwrap();

        assert_eq!(system.size(), 2);
        let w: Vec<f64> = x.iter().map(|&v| k_weight(v, e0)).collect();
        let s0: f64 = w.iter().sum();
        let s1: f64 = x.iter().zip(&w).map(|(xi, wi)| xi * wi).sum();
        assert_relative_eq!(system.matrix[(0, 0)], s0, max_relative = 1e-12);
        assert_relative_eq!(system.matrix[(0, 1)], s1, max_relative = 1e-12);
        assert_relative_eq!(system.matrix[(1, 0)], s1, max_relative = 1e-12);
    }

    #[test]
    fn test_two_segment_continuity_rows() {
        let (x, y) = ramp(21);
        let segs = [Segment::new(2, 0.0, 10.0), Segment::new(2, 10.0, 20.0)];
        let system = build_constrained_system(&x, &y, &segs, -1.0).unwrap();

        assert_eq!(system.size(), 6);
        // Value row: -p_0(10) + p_1(10)
        assert_eq!(system.matrix.row(2).to_vec(), vec![-1.0, -10.0, 0.0, 0.0, 1.0, 10.0]);
        // Slope row: -p_0'(10) + p_1'(10)
        assert_eq!(system.matrix.row(3).to_vec(), vec![0.0, -1.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(system.vector[2], 0.0);
        assert_eq!(system.vector[3], 0.0);

        // Multiplier columns of the first segment
        assert_eq!(system.matrix[(0, 2)], 0.0);
        assert_eq!(system.matrix[(0, 3)], 0.5);
        assert_eq!(system.matrix[(1, 2)], 0.5);
        assert_eq!(system.matrix[(1, 3)], 5.0);
        // ...and of the second
        assert_eq!(system.matrix[(4, 2)], 0.0);
        assert_eq!(system.matrix[(4, 3)], -0.5);
        assert_eq!(system.matrix[(5, 2)], -0.5);
        assert_eq!(system.matrix[(5, 3)], -5.0);
    }

    #[test]
    fn test_quadratic_multiplier_terms() {
        let (x, y) = ramp(21);
        let segs = [Segment::new(3, 0.0, 10.0), Segment::new(3, 10.0, 20.0)];
        let system = build_constrained_system(&x, &y, &segs, -1.0).unwrap();

        // Row 2 of segment 0 links to the next segment at x = 10
        assert_eq!(system.matrix[(2, 3)], 0.5 * 2.0 * 10.0);
        assert_eq!(system.matrix[(2, 4)], 0.5 * 100.0);
        // Continuity rows for the second segment start at column 5
        assert_eq!(system.matrix[(3, 5)], 1.0);
        assert_eq!(system.matrix[(3, 7)], 100.0);
        assert_eq!(system.matrix[(4, 7)], 20.0);
    }

    #[test]
    fn test_invalid_input() {
        let (x, y) = ramp(10);
        let seg = [Segment::new(2, 0.0, 9.0)];

        assert!(matches!(
            build_constrained_system(&x, &y[..5], &seg, 0.0),
            Err(FitError::InvalidInput(_))
        ));
        assert!(matches!(
            build_constrained_system(&[], &[], &seg, 0.0),
            Err(FitError::InvalidInput(_))
        ));
        assert!(matches!(
            build_constrained_system(&x, &y, &[], 0.0),
            Err(FitError::InvalidInput(_))
        ));
        assert!(matches!(
            build_constrained_system(&x, &y, &[Segment::new(0, 0.0, 9.0)], 0.0),
            Err(FitError::InvalidInput(_))
        ));
    }
}
