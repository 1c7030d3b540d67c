/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! End-to-end background and spline analysis
//!
//! [`Analysis::run`] takes raw energy/absorption data through the whole chain:
//!
//! 1. background fit over the configured range
//! 2. spline fit to the background-subtracted data
//! 3. normalization by the spline value at E0
//! 4. k^3-weighted XAFS from E0 upwards
//! 5. windowed Fourier transform to R-space

pub mod config;
pub mod errors;

pub use config::AnalysisConfig;
pub use errors::{AnalysisError, Result};

use log::{debug, info};
use serde::Serialize;

use crate::fitting::{fit_background, fit_spline, segments_from_knots, Segment, SplineMethod};
use crate::input::{DataColumns, ProjectFile};
use crate::utils::{closest_index, energies_to_k};
use crate::xas::{
    check_e0_in_range, compute_fourier_transform, extract_xafs, normalize_by_edge, RSpectrum,
    XafsSeries,
};

/// Every series produced by one analysis
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub energy: Vec<f64>,
    pub i0: Vec<f64>,
    pub raw: Vec<f64>,
    pub background: Vec<f64>,
    /// Background-subtracted data divided by the edge value
    pub normalized: Vec<f64>,
    /// Spline divided by the edge value
    pub spline: Vec<f64>,
    /// Spline value at E0 before normalization
    pub edge_value: f64,
    pub spline_method: SplineMethod,
    pub segments: Vec<Segment>,
    /// k for every sample (0 below E0)
    pub k: Vec<f64>,
    pub xafs: XafsSeries,
    pub k_window: (f64, f64),
    pub spectrum: RSpectrum,
}

impl AnalysisResult {
    /// Package the result with its settings as a project file
    pub fn to_project(&self, title: &str, comments: &[String], config: &AnalysisConfig) -> ProjectFile {
        let len = self.energy.len();
        ProjectFile {
            title: title.to_string(),
            comments: comments.to_vec(),
            e0: config.e0,
            background: config.background.clone(),
            spline: config.spline.clone(),
            k_window: Some(self.k_window),
            columns: DataColumns {
                energy: self.energy.clone(),
                k: XafsSeries::padded(&self.xafs.k, len),
                i0: self.i0.clone(),
                raw: self.raw.clone(),
                background: self.background.clone(),
                normalized: self.normalized.clone(),
                spline: self.spline.clone(),
                xafs: XafsSeries::padded(&self.xafs.chi, len),
            },
        }
    }
}

/// Runs the analysis chain for one data set
#[derive(Debug, Clone)]
pub struct Analysis {
    config: AnalysisConfig,
}

impl Analysis {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse absorption `y` measured at energies `x`
    ///
    /// `i0` is carried through to the result unchanged.
    pub fn run(&self, x: &[f64], y: &[f64], i0: &[f64]) -> Result<AnalysisResult> {
        if x.len() != y.len() || x.len() != i0.len() {
            return Err(AnalysisError::InvalidData(format!(
                "energy ({}), absorption ({}) and I0 ({}) lengths differ",
                x.len(),
                y.len(),
                i0.len()
            )));
        }
        let config = &self.config;
        let e0 = config.e0;
        check_e0_in_range(e0, x)?;

        let (low, high) = self.background_indices(x);
        let background = fit_background(x, y, low, high, config.background.order(), e0)?;
        debug!(
            "background fitted over samples {}..={} with order {}",
            low,
            high,
            config.background.order()
        );

        let residual: Vec<f64> = y.iter().zip(&background).map(|(a, b)| a - b).collect();
        let segments = segments_from_knots(&config.spline.markers, &config.spline.degrees, x);
        let spline_fit = fit_spline(x, &residual, e0, &segments)?;
        info!(
            "spline fitted with {} segments ({:?}), edge value {:.6}",
            segments.len(),
            spline_fit.method,
            spline_fit.value_at_e0
        );

        let normalized = normalize_by_edge(&residual, spline_fit.value_at_e0)?;
        let spline = normalize_by_edge(&spline_fit.values, spline_fit.value_at_e0)?;

        let k = energies_to_k(x, e0);
        let xafs = extract_xafs(x, &normalized, &spline, e0)?;
        let k_window = config.k_window.unwrap_or((0.0, xafs.k_max()));
        let spectrum =
            compute_fourier_transform(&xafs.k, &xafs.chi, k_window.0, k_window.1, &config.fourier)?;

        Ok(AnalysisResult {
            energy: x.to_vec(),
            i0: i0.to_vec(),
            raw: y.to_vec(),
            background,
            normalized,
            spline,
            edge_value: spline_fit.value_at_e0,
            spline_method: spline_fit.method,
            segments,
            k,
            xafs,
            k_window,
            spectrum,
        })
    }

    /// Sample indices of the background bounds, in ascending order
    fn background_indices(&self, x: &[f64]) -> (usize, usize) {
        let low = closest_index(self.config.background.low, x);
        let high = closest_index(self.config.background.high, x);
        (low.min(high), low.max(high))
    }
}

/// Re-run the analysis stored in a project file
pub fn refit_project(project: &ProjectFile) -> Result<AnalysisResult> {
    let columns = &project.columns;
    Analysis::new(AnalysisConfig::from_project(project))?.run(
        &columns.energy,
        &columns.raw,
        &columns.i0,
    )
}
