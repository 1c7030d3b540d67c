/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Least-squares fitting of backgrounds and constrained splines
//!
//! The spline is fitted in one linear solve: every segment's coefficients and
//! the Lagrange multipliers joining neighbouring segments are unknowns of a
//! single augmented system (see [`bounds`]). Backgrounds are plain
//! least-squares fits over a sub-range of the data.

pub mod background;
pub mod bounds;
pub mod errors;
pub mod polynomial;
pub mod segment;
pub mod spline;

pub use background::{fit_background, BackgroundModel};
pub use bounds::{build_constrained_system, LinearSystem};
pub use errors::{FitError, Result};
pub use polynomial::Polynomial;
pub use segment::{distribute_knots, segments_from_knots, Segment, DEFAULT_SEGMENT_DEGREE};
pub use spline::{evaluate_segments, fit_spline, SplineFit, SplineMethod};
