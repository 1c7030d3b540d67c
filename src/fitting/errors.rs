/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the fitting module

use thiserror::Error;

use crate::utils::UtilsError;

/// Result type for fitting operations
pub type Result<T> = std::result::Result<T, FitError>;

/// Errors raised while building or solving a least-squares fit
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// Mismatched or empty sample arrays, bad indices or segment descriptors
    #[error("Invalid fit input: {0}")]
    InvalidInput(String),

    /// The normal equations could not be solved
    #[error("Singular least-squares system (zero pivot in column {column})")]
    SingularMatrix { column: usize },

    /// Any other numerical failure from the solver
    #[error("Numerical error during fit: {0}")]
    Numerical(String),
}

impl From<UtilsError> for FitError {
    fn from(err: UtilsError) -> Self {
        match err {
            UtilsError::SingularMatrix { column } => FitError::SingularMatrix { column },
            other => FitError::Numerical(other.to_string()),
        }
    }
}
