/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Dense linear solves on faer matrices
//!
//! The least-squares builders assemble their systems as ndarray arrays; this
//! module moves them into Faer storage and solves them with an LU
//! decomposition with partial pivoting. A zero pivot is reported as
//! [`UtilsError::SingularMatrix`] so callers can choose a fallback.

use super::errors::{Result, UtilsError};
use faer::{col, Mat};
use ndarray::{Array1, Array2};

/// Convert from ndarray::Array2<f64> to faer::Mat<f64>
pub fn ndarray_to_faer(array: &Array2<f64>) -> Mat<f64> {
    let (rows, cols) = array.dim();
    let mut result = Mat::<f64>::zeros(rows, cols);

    for i in 0..rows {
        for j in 0..cols {
            result[(i, j)] = array[(i, j)];
        }
    }

    result
}

/// Convert from ndarray::Array1<f64> to faer::col::Col<f64>
pub fn ndarray_to_faer_vector(array: &Array1<f64>) -> col::Col<f64> {
    let n = array.len();
    let mut result = col::Col::<f64>::zeros(n);

    for i in 0..n {
        result[i] = array[i];
    }

    result
}

/// Convert from faer::col::Col<f64> to ndarray::Array1<f64>
pub fn faer_vector_to_ndarray(vector: &col::Col<f64>) -> Array1<f64> {
    let n = vector.nrows();
    let mut result = Array1::<f64>::zeros(n);

    for i in 0..n {
        result[i] = vector[i];
    }

    result
}

/// LU factors of a square matrix, stored packed with the row permutation
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// Unit lower triangle below the diagonal, upper triangle on and above it
    lu: Mat<f64>,
    /// `permutation[i]` is the input row now at position `i`
    permutation: Vec<usize>,
}

impl LuDecomposition {
    /// Size of the factored system
    pub fn dim(&self) -> usize {
        self.lu.nrows()
    }

    /// Solve `A x = b` with the stored factors
    pub fn solve(&self, rhs: &col::Col<f64>) -> Result<col::Col<f64>> {
        let n = self.dim();
        if rhs.nrows() != n {
            return Err(UtilsError::DimensionMismatch(format!(
                "right-hand side has {} rows, system has {}",
                rhs.nrows(),
                n
            )));
        }

        let mut x = col::Col::<f64>::zeros(n);
        for i in 0..n {
            x[i] = rhs[self.permutation[i]];
        }

        // Forward substitution: L y = P b
        for i in 0..n {
            let mut sum = x[i];
            for k in 0..i {
                sum -= self.lu[(i, k)] * x[k];
            }
            x[i] = sum;
        }

        // Backward substitution: U x = y
        for i in (0..n).rev() {
            let mut sum = x[i];
            for k in (i + 1)..n {
                sum -= self.lu[(i, k)] * x[k];
            }
            x[i] = sum / self.lu[(i, i)];
        }

        for i in 0..n {
            if !x[i].is_finite() {
                return Err(UtilsError::SingularMatrix { column: i });
            }
        }

        Ok(x)
    }
}

/// Factor a square matrix with partial (row) pivoting
///
/// Only an exactly zero or non-finite pivot is treated as singular. Badly
/// conditioned normal equations still produce a factorisation.
pub fn lu_decompose(matrix: &Mat<f64>) -> Result<LuDecomposition> {
    let n = matrix.nrows();
    if matrix.ncols() != n {
        return Err(UtilsError::DimensionMismatch(format!(
            "expected a square matrix, got {}x{}",
            n,
            matrix.ncols()
        )));
    }

    let mut lu = matrix.clone();
    let mut permutation: Vec<usize> = (0..n).collect();

    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_val = lu[(k, k)].abs();

        for i in (k + 1)..n {
            let val = lu[(i, k)].abs();
            if val > pivot_val {
                pivot_row = i;
                pivot_val = val;
            }
        }

        if pivot_val == 0.0 || !pivot_val.is_finite() {
            return Err(UtilsError::SingularMatrix { column: k });
        }

        if pivot_row != k {
            permutation.swap(k, pivot_row);
            for j in 0..n {
                let temp = lu[(k, j)];
                lu[(k, j)] = lu[(pivot_row, j)];
                lu[(pivot_row, j)] = temp;
            }
        }

        for i in (k + 1)..n {
            let factor = lu[(i, k)] / lu[(k, k)];
            lu[(i, k)] = factor;
            for j in (k + 1)..n {
                lu[(i, j)] -= factor * lu[(k, j)];
            }
        }
    }

    Ok(LuDecomposition { lu, permutation })
}

/// Solve the dense system `matrix * x = vector`
pub fn solve_linear_system(matrix: &Array2<f64>, vector: &Array1<f64>) -> Result<Array1<f64>> {
    let (rows, cols) = matrix.dim();
    if rows != cols || rows != vector.len() {
        return Err(UtilsError::DimensionMismatch(format!(
            "cannot solve a {}x{} system with a vector of length {}",
            rows,
            cols,
            vector.len()
        )));
    }

    let lu = lu_decompose(&ndarray_to_faer(matrix))?;
    let solution = lu.solve(&ndarray_to_faer_vector(vector))?;

    Ok(faer_vector_to_ndarray(&solution))
}
