/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use approx::assert_relative_eq;
use std::f64::consts::PI;
use xafs_spline::utils::constants::DEFAULT_DR;
use xafs_spline::xas::fourier::bin_signal;
use xafs_spline::xas::{compute_fourier_transform, FourierConfig};

fn shell(distance: f64, k_max: f64, step: f64) -> (Vec<f64>, Vec<f64>) {
    let k: Vec<f64> = (0..)
        .map(|i| i as f64 * step)
        .take_while(|&k| k <= k_max)
        .collect();
    let chi = k.iter().map(|&k| (2.0 * distance * k).sin()).collect();
    (k, chi)
}

fn peak_position(magnitudes: &[f64], dr: f64) -> f64 {
    let (index, _) = magnitudes
        .iter()
        .enumerate()
        .fold((0, f64::MIN), |best, (i, &m)| if m > best.1 { (i, m) } else { best });
    index as f64 * dr
}

#[test]
fn test_empty_input_returns_default_dr() {
    let spectrum =
        compute_fourier_transform(&[], &[], 0.0, 15.0, &FourierConfig::default()).unwrap();
    assert!(spectrum.magnitudes.is_empty());
    assert_eq!(spectrum.dr, DEFAULT_DR);
}

#[test]
fn test_bin_width() {
    let config = FourierConfig::default();
    assert_relative_eq!(config.dk(), PI / (512.0 * 0.05), epsilon = 1e-15);
}

#[test]
fn test_single_forward_pass_binning() {
    let k = [0.05, 0.1, 0.3, 0.35, 0.4, 0.9];
    let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    // Edges at 0.25, 0.5, 0.75 (all below the last k)
    let bins = bin_signal(&k, &signal, 0.0, 1.0, 0.25);
    assert_eq!(bins.len(), 3);
    assert_relative_eq!(bins[0], 1.5);
    assert_relative_eq!(bins[1], 4.0);
    assert_relative_eq!(bins[2], 0.0);
}

#[test]
fn test_window_zeroes_contributions() {
    let k = [0.05, 0.1, 0.3, 0.35, 0.4, 0.9];
    let signal = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];

    let bins = bin_signal(&k, &signal, 0.32, 0.38, 0.25);
    assert_relative_eq!(bins[0], 0.0);
    assert_relative_eq!(bins[1], 4.0 / 3.0);
}

#[test]
fn test_shell_distance_is_recovered() {
    let (k, chi) = shell(2.5, 16.0, 0.05);
    let config = FourierConfig::default();
    let spectrum = compute_fourier_transform(&k, &chi, 3.0, 14.0, &config).unwrap();

    assert_eq!(spectrum.len(), 256);
    assert!((peak_position(&spectrum.magnitudes, spectrum.dr) - 2.5).abs() <= 0.1);
}

#[test]
fn test_custom_grid() {
    let (k, chi) = shell(1.8, 14.0, 0.05);
    let config = FourierConfig {
        fft_points: 1024,
        dr: 0.02,
    };
    let spectrum = compute_fourier_transform(&k, &chi, 2.0, 13.0, &config).unwrap();

    assert_eq!(spectrum.len(), 512);
    assert_relative_eq!(spectrum.r_values()[100], 2.0, epsilon = 1e-12);
    assert!((peak_position(&spectrum.magnitudes, spectrum.dr) - 1.8).abs() <= 0.1);
}

#[test]
fn test_spectrum_scales_linearly() {
    let (k, chi) = shell(2.0, 12.0, 0.05);
    let doubled: Vec<f64> = chi.iter().map(|c| 2.0 * c).collect();
    let config = FourierConfig::default();

    let single = compute_fourier_transform(&k, &chi, 2.0, 12.0, &config).unwrap();
    let double = compute_fourier_transform(&k, &doubled, 2.0, 12.0, &config).unwrap();
    for (a, b) in single.magnitudes.iter().zip(&double.magnitudes) {
        assert_relative_eq!(2.0 * a, *b, epsilon = 1e-9);
    }
}

#[test]
fn test_single_bin_gives_flat_spectrum() {
    // Only the first bin is non-zero, so every folded magnitude is c * dk^2
    let config = FourierConfig::default();
    let dk = config.dk();
    let spectrum = compute_fourier_transform(&[0.0, 1.0], &[3.0, 0.0], 0.0, 10.0, &config).unwrap();

    assert_eq!(spectrum.len(), 256);
    for magnitude in &spectrum.magnitudes {
        assert_relative_eq!(*magnitude, 3.0 * dk * dk, epsilon = 1e-12);
    }
}

#[test]
fn test_two_bins_match_direct_transform() {
    let config = FourierConfig {
        fft_points: 500,
        dr: 0.05,
    };
    let dk = config.dk();
    let k = [0.0, 1.5 * dk, 1.0];
    let chi = [2.0, 1.0, 0.0];

    let bins = bin_signal(&k, &chi, 0.0, 10.0, dk);
    assert_relative_eq!(bins[0], 2.0);
    assert_relative_eq!(bins[1], 1.0);

    let spectrum = compute_fourier_transform(&k, &chi, 0.0, 10.0, &config).unwrap();
    assert_eq!(spectrum.len(), 250);
    for (m, magnitude) in spectrum.magnitudes.iter().enumerate() {
        let phase = -2.0 * PI * m as f64 / 500.0;
        let term = num_complex::Complex64::new(2.0 + phase.cos(), phase.sin());
        assert_relative_eq!(*magnitude, term.norm() * dk * dk, epsilon = 1e-12);
    }
}

#[test]
fn test_non_power_of_two_grid() {
    let (k, chi) = shell(2.0, 15.0, 0.05);
    let config = FourierConfig {
        fft_points: 500,
        dr: 0.05,
    };
    let spectrum = compute_fourier_transform(&k, &chi, 2.0, 14.0, &config).unwrap();

    assert_eq!(spectrum.len(), 250);
    assert!((peak_position(&spectrum.magnitudes, spectrum.dr) - 2.0).abs() <= 0.1);
}
