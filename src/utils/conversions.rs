/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Energy ↔ k-space conversions

use super::constants::{KEV, K_WEIGHT};

/// Convert an energy (eV) to photoelectron wavenumber k (Å^-1)
///
/// Energies below the edge map to k = 0.
pub fn to_k(energy: f64, e0: f64) -> f64 {
    if energy < e0 {
        0.0
    } else {
        KEV * (energy - e0).sqrt()
    }
}

/// Convert a wavenumber k (Å^-1) back to an energy (eV)
///
/// Negative k maps to the edge itself.
pub fn from_k(k: f64, e0: f64) -> f64 {
    if k < 0.0 {
        e0
    } else {
        (k / KEV).powi(2) + e0
    }
}

/// Convert a whole energy series to k
pub fn energies_to_k(energies: &[f64], e0: f64) -> Vec<f64> {
    energies.iter().map(|&e| to_k(e, e0)).collect()
}

/// Statistical weight of a sample in the spline fit, k^3
pub fn k_weight(energy: f64, e0: f64) -> f64 {
    to_k(energy, e0).powi(K_WEIGHT)
}
