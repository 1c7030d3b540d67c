/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Pre-edge background fitting

use log::{debug, warn};
use ndarray::{Array1, Array2};

use super::errors::{FitError, Result};
use super::polynomial::Polynomial;
use crate::utils::math::{argmin, mean};
use crate::utils::solve_linear_system;

/// Background model fitted over a sub-range of the data
#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundModel {
    /// Ordinary polynomial
    Polynomial(Polynomial),
    /// `constant + scale / x`
    Reciprocal { constant: f64, scale: f64 },
}

impl BackgroundModel {
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            BackgroundModel::Polynomial(p) => p.evaluate(x),
            BackgroundModel::Reciprocal { constant, scale } => constant + scale / x,
        }
    }
}

/// Fit a background over `[low_index, high_index]` and evaluate it everywhere
///
/// `order` is the number of polynomial coefficients. An order of 0 selects
/// the reciprocal model `a + b / x`.
///
/// When the upper fit bound lies past `e0` the curve is shifted so that it
/// meets the local average of the data around the absorption minimum.
///
/// A singular normal-equations matrix is returned as an error.
pub fn fit_background(
    x: &[f64],
    y: &[f64],
    low_index: usize,
    high_index: usize,
    order: usize,
    e0: f64,
) -> Result<Vec<f64>> {
    if x.len() != y.len() || x.is_empty() {
        warn!(
            "cannot fit background: {} energies and {} values",
            x.len(),
            y.len()
        );
        return Err(FitError::InvalidInput(format!(
            "background fit needs equal, non-empty arrays (got {} and {})",
            x.len(),
            y.len()
        )));
    }
    if low_index > high_index || high_index >= x.len() {
        return Err(FitError::InvalidInput(format!(
            "background range {}..={} is not inside {} samples",
            low_index,
            high_index,
            x.len()
        )));
    }

    let xs = &x[low_index..=high_index];
    let ys = &y[low_index..=high_index];
    let model = if order == 0 {
        fit_reciprocal(xs, ys)?
    } else {
        fit_polynomial(xs, ys, order)?
    };
    debug!("background model: {:?}", model);

    let mut background: Vec<f64> = x.iter().map(|&xi| model.evaluate(xi)).collect();

    if x[high_index] > e0 {
        if let Some(delta) = floor_offset(y, &background) {
            debug!("aligning background with the absorption minimum (delta = {})", delta);
            background.iter_mut().for_each(|b| *b -= delta);
        }
    }

    Ok(background)
}

/// Unweighted least-squares polynomial with `order` coefficients
pub fn fit_polynomial(x: &[f64], y: &[f64], order: usize) -> Result<BackgroundModel> {
    let mut matrix = Array2::<f64>::zeros((order, order));
    let mut vector = Array1::<f64>::zeros(order);

    for row in 0..order {
        for col in 0..order {
            matrix[(row, col)] = x.iter().map(|&xi| xi.powi((row + col) as i32)).sum();
        }
        vector[row] = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| xi.powi(row as i32) * yi)
            .sum();
    }

    let coeffs = solve_linear_system(&matrix, &vector)?;
    Ok(BackgroundModel::Polynomial(Polynomial::new(coeffs.to_vec())))
}

/// Least-squares fit of `a + b / x`
pub fn fit_reciprocal(x: &[f64], y: &[f64]) -> Result<BackgroundModel> {
    let n = x.len() as f64;
    let inv: f64 = x.iter().map(|&xi| 1.0 / xi).sum();
    let inv_sq: f64 = x.iter().map(|&xi| 1.0 / (xi * xi)).sum();
    let sum_y: f64 = y.iter().sum();
    let sum_y_inv: f64 = x.iter().zip(y).map(|(&xi, &yi)| yi / xi).sum();

    let matrix = ndarray::array![[n, inv], [inv, inv_sq]];
    let vector = ndarray::array![sum_y, sum_y_inv];
    let solution = solve_linear_system(&matrix, &vector)?;

    Ok(BackgroundModel::Reciprocal {
        constant: solution[0],
        scale: solution[1],
    })
}

/// Difference between the background and the local data average at the
/// first minimum of `y`
fn floor_offset(y: &[f64], background: &[f64]) -> Option<f64> {
    let index = argmin(y)?;
    let start = index.saturating_sub(2);
    let end = (index + 3).min(y.len());
    Some(background[index] - mean(&y[start..end]))
}
