/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Fourier transform of k-space XAFS to R-space
//!
//! The k series is first resampled onto a uniform grid of width
//! `dk = π / (fft_points * dr)` by averaging the samples that fall into each
//! bin, with a rectangular window between `k_min` and `k_max`. The binned
//! series is transformed with an `fft_points` FFT and folded into a real
//! magnitude spectrum of `fft_points / 2` values spaced `dr` apart.

use std::f64::consts::PI;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::errors::{Result, XasError};
use crate::utils::constants::{DEFAULT_DR, DEFAULT_FFT_POINTS};
use crate::utils::math::real_fft;

/// Transform grid parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FourierConfig {
    /// Number of FFT points; powers of two are fastest
    pub fft_points: usize,
    /// R-space step in Å
    pub dr: f64,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            fft_points: DEFAULT_FFT_POINTS,
            dr: DEFAULT_DR,
        }
    }
}

impl FourierConfig {
    /// Width of one k bin
    pub fn dk(&self) -> f64 {
        PI / (self.fft_points as f64 * self.dr)
    }
}

/// Magnitude spectrum in R-space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RSpectrum {
    pub magnitudes: Vec<f64>,
    pub dr: f64,
}

impl RSpectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// R value of every magnitude, `i * dr`
    pub fn r_values(&self) -> Vec<f64> {
        (0..self.magnitudes.len())
            .map(|i| i as f64 * self.dr)
            .collect()
    }
}

/// Average `signal` into uniform k bins of width `dk`
///
/// Bin `j` collects the samples with `k < (j + 1) * dk` not taken by an
/// earlier bin, in one forward pass. Samples outside `[k_min, k_max]`
/// contribute zero but still count towards the bin's sample count. `k` must
/// be strictly increasing. Only the first `min(k.len(), signal.len())`
/// samples are used, and a non-positive `dk` gives no bins.
pub fn bin_signal(k: &[f64], signal: &[f64], k_min: f64, k_max: f64, dk: f64) -> Vec<f64> {
    let len = k.len().min(signal.len());
    let (k, signal) = (&k[..len], &signal[..len]);
    let max_k = match k.last() {
        Some(&last) if dk > 0.0 => last,
        _ => return Vec::new(),
    };

    let mut samples = k.iter().zip(signal).peekable();
    let mut bins = Vec::new();
    let mut edge = dk;

    while edge < max_k {
        let mut sum = 0.0;
        let mut consumed = 0usize;
        while let Some((&kv, &value)) = samples.next_if(|&(&kv, _)| kv < edge) {
            if kv >= k_min && kv <= k_max {
                sum += value;
            }
            consumed += 1;
        }
        bins.push(sum / consumed.max(1) as f64);

        edge = (bins.len() + 1) as f64 * dk;
    }

    bins
}

/// Windowed FFT of a k-weighted XAFS series
///
/// # Arguments
///
/// * `k` - Wavenumbers, strictly increasing
/// * `signal` - k-weighted XAFS at each `k`
/// * `k_min`, `k_max` - Rectangular window bounds
/// * `config` - FFT size and R-space step
///
/// # Returns
///
/// `fft_points / 2` magnitudes spaced `config.dr` apart. Empty input gives an
/// empty spectrum.
pub fn compute_fourier_transform(
    k: &[f64],
    signal: &[f64],
    k_min: f64,
    k_max: f64,
    config: &FourierConfig,
) -> Result<RSpectrum> {
    if k.is_empty() || signal.is_empty() {
        return Ok(RSpectrum {
            magnitudes: Vec::new(),
            dr: config.dr,
        });
    }
    if k.len() != signal.len() {
        return Err(XasError::EnergyGridError(format!(
            "{} k values for {} signal values",
            k.len(),
            signal.len()
        )));
    }
    if config.fft_points == 0 || config.dr.is_nan() || config.dr <= 0.0 {
        return Err(XasError::InvalidParameter(format!(
            "FFT needs a positive size and dr (got {} and {})",
            config.fft_points, config.dr
        )));
    }
    if k.windows(2).any(|pair| pair[1] <= pair[0]) {
        warn!("k values are not strictly increasing; binning may misplace samples");
    }

    let points = config.fft_points;
    let dk = config.dk();
    let bins = bin_signal(k, signal, k_min, k_max, dk);
    debug!(
        "binned {} samples into {} bins of width {:.5}",
        k.len(),
        bins.len(),
        dk
    );

    let spectrum = real_fft(&bins, points)?;
    let magnitude: Vec<f64> = spectrum.iter().map(|c| (c * c.conj()).re.sqrt()).collect();

    let scale = dk * dk / 2.0;
    let magnitudes = (0..points / 2)
        .map(|i| (magnitude[i] + magnitude[(points - i) % points]) * scale)
        .collect();

    Ok(RSpectrum {
        magnitudes,
        dr: config.dr,
    })
}
