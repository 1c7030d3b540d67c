/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for project and data file I/O

use std::io;
use thiserror::Error;

/// Errors that can occur while reading or writing data files
#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

/// Result type for input operations
pub type Result<T> = std::result::Result<T, InputError>;
