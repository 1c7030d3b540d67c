/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Project file and data file I/O
//!
//! A project file stores one complete analysis as line-oriented text:
//!
//! ```text
//! TITLE <title>
//! # <comment>
//! E0 <energy>
//! BACKGROUND <low> (<degree>) <high> eV
//! SPLINE <m0> (<d0>) <m1> (<d1>) ... <mN> eV
//! KWIN <kmin> <kmax>
//! EV K IO RAW BACKGROND NORMAL SPLINE XAFS
//! <comma separated rows>
//! ```
//!
//! Plain column files with energy and absorption can be imported, and
//! R-space spectra exported.

pub mod errors;
pub mod model;
pub mod parser;
pub mod writer;

pub use errors::{InputError, Result};
pub use model::{BackgroundSettings, DataColumns, ImportedData, ProjectFile, SplineSettings};
pub use parser::{parse_columns, parse_project, read_columns, read_project};
pub use writer::{export_r_spectrum, write_r_spectrum};
