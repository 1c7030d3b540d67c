/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! EXAFS signal extraction
//!
//! Turns background-subtracted absorption and its spline into the
//! k^3-weighted oscillation chi(k) * k^3 used for the transform to R-space.

use log::warn;
use serde::{Deserialize, Serialize};

use super::errors::{Result, XasError};
use crate::utils::constants::K_WEIGHT;
use crate::utils::{energies_to_k, first_index_at_or_above};

/// k^3-weighted XAFS over the samples at or above E0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct XafsSeries {
    /// Index of the first sample at or above E0
    pub start_index: usize,
    /// Wavenumbers in Å^-1
    pub k: Vec<f64>,
    /// Weighted oscillation (normalized - spline) * k^3
    pub chi: Vec<f64>,
}

impl XafsSeries {
    pub fn len(&self) -> usize {
        self.k.len()
    }

    pub fn is_empty(&self) -> bool {
        self.k.is_empty()
    }

    /// Largest k in the series, 0 if empty
    pub fn k_max(&self) -> f64 {
        self.k.last().copied().unwrap_or(0.0)
    }

    /// Pad a slice-aligned series to `len` samples with leading zeros
    pub fn padded(values: &[f64], len: usize) -> Vec<f64> {
        let mut out = vec![0.0; len.saturating_sub(values.len())];
        out.extend_from_slice(values);
        out
    }
}

/// Divide a series by the spline value at the edge
pub fn normalize_by_edge(values: &[f64], edge_value: f64) -> Result<Vec<f64>> {
    if edge_value == 0.0 || !edge_value.is_finite() {
        return Err(XasError::InvalidParameter(format!(
            "cannot normalize by edge value {}",
            edge_value
        )));
    }
    Ok(values.iter().map(|v| v / edge_value).collect())
}

/// k^3-weighted difference between normalized data and spline
///
/// All three inputs must have the same length. Otherwise a warning is logged
/// and an empty series is returned.
pub fn xafs_difference(normalized: &[f64], spline: &[f64], k: &[f64]) -> Vec<f64> {
    if normalized.len() != spline.len() || normalized.len() != k.len() {
        warn!(
            "XAFS difference needs equal lengths (data {}, spline {}, k {})",
            normalized.len(),
            spline.len(),
            k.len()
        );
        return Vec::new();
    }

    normalized
        .iter()
        .zip(spline)
        .zip(k)
        .map(|((n, s), k)| (n - s) * k.powi(K_WEIGHT))
        .collect()
}

/// Build the k series and weighted XAFS from E0 upwards
///
/// # Arguments
///
/// * `x` - Sample energies
/// * `normalized` - Edge-normalized data
/// * `spline` - Edge-normalized spline
/// * `e0` - Edge energy
pub fn extract_xafs(x: &[f64], normalized: &[f64], spline: &[f64], e0: f64) -> Result<XafsSeries> {
    if x.len() != normalized.len() || x.len() != spline.len() {
        return Err(XasError::EnergyGridError(format!(
            "energy ({}), data ({}) and spline ({}) lengths differ",
            x.len(),
            normalized.len(),
            spline.len()
        )));
    }

    let start = first_index_at_or_above(e0, x);
    if start >= x.len() {
        return Err(XasError::EnergyGridError(format!(
            "E0 = {} lies above the last energy",
            e0
        )));
    }

    let k = energies_to_k(&x[start..], e0);
    let chi = xafs_difference(&normalized[start..], &spline[start..], &k);

    Ok(XafsSeries {
        start_index: start,
        k,
        chi,
    })
}
