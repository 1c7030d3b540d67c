/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Analysis settings

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{AnalysisError, Result};
use crate::fitting::DEFAULT_SEGMENT_DEGREE;
use crate::input::{BackgroundSettings, ProjectFile, SplineSettings};
use crate::utils::to_k;
use crate::xas::FourierConfig;

/// Degree of the background polynomial when none is configured
pub const DEFAULT_BACKGROUND_DEGREE: i32 = 2;

/// Everything needed to run one analysis
///
/// Energies in `background` and `spline` are snapped to the closest sample
/// when the analysis runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Edge energy in eV
    pub e0: f64,
    pub background: BackgroundSettings,
    pub spline: SplineSettings,
    /// Rectangular k window for the transform; the full k range if unset
    #[serde(default)]
    pub k_window: Option<(f64, f64)>,
    #[serde(default)]
    pub fourier: FourierConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            e0: 0.0,
            background: BackgroundSettings {
                low: 0.0,
                high: 0.0,
                degree: DEFAULT_BACKGROUND_DEGREE,
            },
            spline: SplineSettings::default(),
            k_window: None,
            fourier: FourierConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Default settings for freshly imported data
    ///
    /// The background spans all samples, the spline is a single quadratic
    /// from E0 to the last sample and the window covers the whole k range.
    pub fn for_data(x: &[f64], e0: f64) -> Self {
        let (first, last) = match (x.first(), x.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => (e0, e0),
        };

        Self {
            e0,
            background: BackgroundSettings {
                low: first,
                high: last,
                degree: DEFAULT_BACKGROUND_DEGREE,
            },
            spline: SplineSettings {
                markers: vec![e0, last],
                degrees: vec![DEFAULT_SEGMENT_DEGREE],
            },
            k_window: Some((0.0, to_k(last, e0))),
            fourier: FourierConfig::default(),
        }
    }

    /// Settings stored in a project file
    pub fn from_project(project: &ProjectFile) -> Self {
        Self {
            e0: project.e0,
            background: project.background.clone(),
            spline: project.spline.clone(),
            k_window: project.k_window,
            fourier: FourierConfig::default(),
        }
    }

    /// Load settings from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            AnalysisError::Config(format!("cannot open {}: {}", path.as_ref().display(), e))
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no analysis can run with
    pub fn validate(&self) -> Result<()> {
        if !self.e0.is_finite() {
            return Err(AnalysisError::Config(format!("E0 = {} is not finite", self.e0)));
        }
        if self.background.degree < -1 {
            return Err(AnalysisError::Config(format!(
                "background degree must be -1 or more, got {}",
                self.background.degree
            )));
        }
        if self.fourier.fft_points == 0 || self.fourier.dr.is_nan() || self.fourier.dr <= 0.0 {
            return Err(AnalysisError::Config(format!(
                "FFT needs a positive size and dr, got {} and {}",
                self.fourier.fft_points, self.fourier.dr
            )));
        }
        if let Some((min, max)) = self.k_window {
            if min > max {
                return Err(AnalysisError::Config(format!(
                    "k window {} to {} is reversed",
                    min, max
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_for_data_defaults() {
        let x: Vec<f64> = (0..11).map(|i| 100.0 + 10.0 * i as f64).collect();
        let config = AnalysisConfig::for_data(&x, 120.0);

        assert_eq!(config.background.low, 100.0);
        assert_eq!(config.background.high, 200.0);
        assert_eq!(config.background.degree, 2);
        assert_eq!(config.spline.markers, vec![120.0, 200.0]);
        assert_eq!(config.spline.degrees, vec![2]);
        let (kmin, kmax) = config.k_window.unwrap();
        assert_eq!(kmin, 0.0);
        assert_relative_eq!(kmax, to_k(200.0, 120.0));
    }

    #[test]
    fn test_json_round_trip() {
        let config = AnalysisConfig::for_data(&[1.0, 2.0, 3.0], 2.0);
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = AnalysisConfig::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_defaults_for_optional_fields() {
        let json = r#"{
            "e0": 8979.0,
            "background": {"low": 8800.0, "high": 8950.0, "degree": -1},
            "spline": {"markers": [8979.0, 9500.0], "degrees": [3]}
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.k_window, None);
        assert_eq!(config.fourier, FourierConfig::default());
        assert_eq!(config.background.order(), 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_any_positive_fft_size_is_valid() {
        let mut config = AnalysisConfig::for_data(&[1.0, 2.0], 1.0);
        config.fourier.fft_points = 500;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = AnalysisConfig::for_data(&[1.0, 2.0], 1.0);
        config.fourier.fft_points = 0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::for_data(&[1.0, 2.0], 1.0);
        config.fourier.dr = 0.0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::for_data(&[1.0, 2.0], 1.0);
        config.background.degree = -2;
        assert!(config.validate().is_err());
    }
}
