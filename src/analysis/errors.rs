/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the analysis pipeline

use thiserror::Error;

use crate::fitting::FitError;
use crate::input::InputError;
use crate::xas::XasError;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors raised while configuring or running an analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("XAS error: {0}")]
    Xas(#[from] XasError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Config(err.to_string())
    }
}
