/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Utility functions for XAFS analysis
//!
//! This module provides common utilities used throughout the crate: constants,
//! k-space conversions, nearest-sample search and the numerical kernels.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod linear_algebra;
pub mod math;
pub mod search;

pub use conversions::{energies_to_k, from_k, k_weight, to_k};
pub use errors::{Result, UtilsError};
pub use linear_algebra::solve_linear_system;
pub use search::{closest_index, closest_value, first_index_at_or_above};
