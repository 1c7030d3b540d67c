/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! # xafs-spline
//!
//! Background subtraction and constrained spline fitting for x-ray absorption
//! fine structure (XAFS) data.
//!
//! The central piece is a least-squares spline whose polynomial segments are
//! solved together in one augmented linear system, with Lagrange multipliers
//! enforcing value and slope continuity at every knot and k^3 sample weights.
//! Around it the crate provides the pre-edge background fit, edge
//! normalization, k^3-weighted XAFS extraction and a binned FFT to R-space.
//!
//! ```no_run
//! use xafs_spline::analysis::{Analysis, AnalysisConfig};
//! use xafs_spline::input::read_columns;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = read_columns("cu_foil.dat")?;
//! let config = AnalysisConfig::for_data(&data.energy, 8979.0);
//! let result = Analysis::new(config)?.run(&data.energy, &data.absorption, &data.i0)?;
//! println!("edge value {}", result.edge_value);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod cli;
pub mod fitting;
pub mod input;
pub mod utils;
pub mod xas;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

pub use analysis::{Analysis, AnalysisConfig, AnalysisResult};
pub use fitting::{fit_background, fit_spline, Segment, SplineFit};
pub use xas::{compute_fourier_transform, xafs_difference};
