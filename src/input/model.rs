/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Project file model

use serde::{Deserialize, Serialize};

use super::errors::{InputError, Result};

/// Background fit range and polynomial degree
///
/// A degree of -1 selects the reciprocal model `a + b / x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundSettings {
    pub low: f64,
    pub high: f64,
    pub degree: i32,
}

impl BackgroundSettings {
    /// Number of coefficients passed to the background fit, 0 for the
    /// reciprocal model
    pub fn order(&self) -> usize {
        (self.degree + 1).max(0) as usize
    }
}

/// Spline knot positions and the degree of each segment between them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplineSettings {
    pub markers: Vec<f64>,
    pub degrees: Vec<usize>,
}

impl SplineSettings {
    /// One segment per gap between markers
    pub fn segment_count(&self) -> usize {
        self.markers.len().saturating_sub(1)
    }
}

/// The eight data columns of a project file
///
/// Only the first four are required. The derived columns are either all
/// present with the same length as `energy` or all empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataColumns {
    pub energy: Vec<f64>,
    pub k: Vec<f64>,
    pub i0: Vec<f64>,
    pub raw: Vec<f64>,
    pub background: Vec<f64>,
    pub normalized: Vec<f64>,
    pub spline: Vec<f64>,
    pub xafs: Vec<f64>,
}

impl DataColumns {
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }

    /// Whether the fitted columns were read or computed
    pub fn has_derived(&self) -> bool {
        !self.background.is_empty()
    }

    /// Build columns from rows of at least four values
    ///
    /// The derived columns are kept only when every row carries all eight.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(InputError::InvalidFormat("no data rows".to_string()));
        }
        if let Some(short) = rows.iter().find(|row| row.len() < 4) {
            return Err(InputError::InvalidFormat(format!(
                "data rows need at least 4 columns, found {}",
                short.len()
            )));
        }

        let column = |i: usize| rows.iter().map(|row| row[i]).collect::<Vec<f64>>();
        let complete = rows.iter().all(|row| row.len() >= 8);
        let derived = |i: usize| if complete { column(i) } else { Vec::new() };

        Ok(Self {
            energy: column(0),
            k: column(1),
            i0: column(2),
            raw: column(3),
            background: derived(4),
            normalized: derived(5),
            spline: derived(6),
            xafs: derived(7),
        })
    }

    /// Rows of all eight columns; missing derived values are written as 0
    pub fn rows(&self) -> Vec<[f64; 8]> {
        let at = |column: &[f64], i: usize| column.get(i).copied().unwrap_or(0.0);
        (0..self.len())
            .map(|i| {
                [
                    self.energy[i],
                    at(&self.k, i),
                    at(&self.i0, i),
                    at(&self.raw, i),
                    at(&self.background, i),
                    at(&self.normalized, i),
                    at(&self.spline, i),
                    at(&self.xafs, i),
                ]
            })
            .collect()
    }
}

/// A saved analysis: settings plus the data and fitted columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub title: String,
    pub comments: Vec<String>,
    pub e0: f64,
    pub background: BackgroundSettings,
    pub spline: SplineSettings,
    pub k_window: Option<(f64, f64)>,
    pub columns: DataColumns,
}

/// Energy, I0 and absorption imported from a plain column file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportedData {
    pub energy: Vec<f64>,
    pub i0: Vec<f64>,
    pub absorption: Vec<f64>,
}

impl ImportedData {
    pub fn len(&self) -> usize {
        self.energy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energy.is_empty()
    }
}
