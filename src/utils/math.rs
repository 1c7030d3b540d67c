/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Mathematical utility functions for XAFS analysis
//!
//! Polynomial evaluation, a real-input FFT, numerical gradients and a few
//! small statistics helpers shared by the fitting and transform code.

use super::errors::{Result, UtilsError};
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Horner evaluation of `coeffs[0] + coeffs[1] x + ...`
pub fn evaluate_polynomial(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Forward FFT of real data over exactly `points` samples
///
/// The input is zero-padded or truncated to `points`. Any positive length is
/// accepted; powers of two are fastest.
pub fn real_fft(input: &[f64], points: usize) -> Result<Vec<Complex64>> {
    if points == 0 {
        return Err(UtilsError::Math("FFT needs at least one point".to_string()));
    }

    let mut buffer: Vec<Complex64> = (0..points)
        .map(|i| Complex64::new(input.get(i).copied().unwrap_or(0.0), 0.0))
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(points);
    fft.process(&mut buffer);

    Ok(buffer)
}

/// Numerical derivative dy/dx on a possibly non-uniform grid
///
/// Interior points use second-order central differences, the end points
/// one-sided first differences.
pub fn gradient(y: &[f64], x: &[f64]) -> Result<Vec<f64>> {
    let n = y.len();
    if n != x.len() {
        return Err(UtilsError::DimensionMismatch(format!(
            "gradient needs equal lengths, got {} values and {} coordinates",
            n,
            x.len()
        )));
    }
    if n < 2 {
        return Err(UtilsError::Math(
            "gradient needs at least two points".to_string(),
        ));
    }

    let mut result = vec![0.0; n];
    result[0] = (y[1] - y[0]) / (x[1] - x[0]);
    result[n - 1] = (y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]);

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        result[i] = (hs * hs * y[i + 1] + (hd * hd - hs * hs) * y[i] - hd * hd * y[i - 1])
            / (hs * hd * (hd + hs));
    }

    Ok(result)
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len().max(1) as f64
}

/// Index of the first occurrence of the smallest value
pub fn argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v >= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first occurrence of the largest value
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
