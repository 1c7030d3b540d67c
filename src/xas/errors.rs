/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for XAS signal processing

use thiserror::Error;

use crate::utils::UtilsError;

/// Result type for XAS operations
pub type Result<T> = std::result::Result<T, XasError>;

/// XAS processing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum XasError {
    /// Error related to the energy or k grid
    #[error("Energy grid error: {0}")]
    EnergyGridError(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unknown element or edge
    #[error("Unknown edge: {element} {edge}")]
    UnknownEdge { element: String, edge: String },

    /// Malformed edge table
    #[error("Edge table parse error at line {line}: {message}")]
    EdgeTableError { line: usize, message: String },

    /// Failure inside a numerical kernel
    #[error("Numerical error: {0}")]
    Numerical(String),
}

impl From<UtilsError> for XasError {
    fn from(err: UtilsError) -> Self {
        XasError::Numerical(format!("{}", err))
    }
}
