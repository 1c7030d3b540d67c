/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Physical and numerical constants used in XAFS background analysis

/// Conversion between eV above the edge and photoelectron wavenumber:
/// k (Å^-1) = KEV * sqrt(E - E0)
pub const KEV: f64 = 0.5123143;

/// Default step size in R-space (Å)
pub const DEFAULT_DR: f64 = 0.05;

/// Default number of FFT points
pub const DEFAULT_FFT_POINTS: usize = 512;

/// Exponent of the k-weighting applied to the spline fit and the XAFS signal
pub const K_WEIGHT: i32 = 3;
