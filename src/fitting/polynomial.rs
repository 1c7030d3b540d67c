/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Polynomial pieces produced by the least-squares solvers

use serde::{Deserialize, Serialize};

use crate::utils::math::evaluate_polynomial;

/// A polynomial `c0 + c1 x + ... + c_{n-1} x^(n-1)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients in ascending order of power
    pub fn new(coeffs: Vec<f64>) -> Self {
        Self { coeffs }
    }

    /// Coefficients in ascending order of power
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    /// Number of coefficients (degree + 1)
    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        evaluate_polynomial(x, &self.coeffs)
    }

    /// First derivative as a new polynomial
    pub fn derivative(&self) -> Polynomial {
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(power, &c)| power as f64 * c)
            .collect();
        Polynomial::new(coeffs)
    }
}
