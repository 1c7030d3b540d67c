/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! X-ray absorption signal processing
//!
//! Edge normalization, k^3-weighted XAFS extraction, the binned Fourier
//! transform to R-space and a small table of absorption edge energies.

pub mod edge;
pub mod errors;
pub mod exafs;
pub mod fourier;

pub use edge::{check_e0_in_range, edge_energy, estimate_e0};
pub use errors::{Result, XasError};
pub use exafs::{extract_xafs, normalize_by_edge, xafs_difference, XafsSeries};
pub use fourier::{compute_fourier_transform, FourierConfig, RSpectrum};
