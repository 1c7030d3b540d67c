/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Errors raised by the numerical helpers

use thiserror::Error;

/// Failures of the shared numerical kernels
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UtilsError {
    /// Invalid input to a numerical routine
    #[error("Math error: {0}")]
    Math(String),

    /// Matrix and vector shapes do not agree
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Elimination hit a zero (or non-finite) pivot
    #[error("Matrix is singular (zero pivot in column {column})")]
    SingularMatrix { column: usize },
}

/// Result alias for [`UtilsError`]
pub type Result<T> = std::result::Result<T, UtilsError>;
