/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Writers for project files and R-space exports

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::errors::{InputError, Result};
use super::model::ProjectFile;

/// Column header written above the data rows
pub const COLUMN_HEADER: &str = "EV K IO RAW BACKGROND NORMAL SPLINE XAFS";

impl ProjectFile {
    /// Write the project to any writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "TITLE {}", self.title).map_err(InputError::IoError)?;
        for comment in &self.comments {
            writeln!(writer, "# {}", comment).map_err(InputError::IoError)?;
        }

        writeln!(writer, "E0 {:.3}", self.e0).map_err(InputError::IoError)?;
        writeln!(
            writer,
            "BACKGROUND {:.5} ({}) {:.5} eV",
            self.background.low, self.background.degree, self.background.high
        )
        .map_err(InputError::IoError)?;

        write!(writer, "SPLINE ").map_err(InputError::IoError)?;
        let markers = &self.spline.markers;
        for (i, marker) in markers.iter().enumerate().take(markers.len().saturating_sub(1)) {
            let degree = self.spline.degrees.get(i).copied().unwrap_or_default();
            write!(writer, "{:.5} ({}) ", marker, degree).map_err(InputError::IoError)?;
        }
        let closing = match markers.last() {
            Some(last) => writeln!(writer, "{:.5} eV", last),
            None => writeln!(writer, "eV"),
        };
        closing.map_err(InputError::IoError)?;

        if let Some((min, max)) = self.k_window {
            writeln!(writer, "KWIN {:.5} {:.5} ", min, max).map_err(InputError::IoError)?;
        }

        writeln!(writer, "{}", COLUMN_HEADER).map_err(InputError::IoError)?;
        for row in self.columns.rows() {
            let line: Vec<String> = row.iter().map(|v| format!("{:.6}", v)).collect();
            writeln!(writer, "{}", line.join(",")).map_err(InputError::IoError)?;
        }

        Ok(())
    }

    /// Write the project to a file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path).map_err(InputError::IoError)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush().map_err(InputError::IoError)
    }
}

/// Write an R-space magnitude spectrum as `R FFT` columns
pub fn write_r_spectrum<W: Write>(writer: &mut W, r: &[f64], magnitudes: &[f64]) -> Result<()> {
    if r.len() != magnitudes.len() {
        return Err(InputError::InvalidFormat(format!(
            "{} R values for {} magnitudes",
            r.len(),
            magnitudes.len()
        )));
    }

    writeln!(writer, "R FFT").map_err(InputError::IoError)?;
    for (r, magnitude) in r.iter().zip(magnitudes) {
        writeln!(writer, "{:7.3} {:7.3}", r, magnitude).map_err(InputError::IoError)?;
    }
    Ok(())
}

/// Export an R-space spectrum to a file
pub fn export_r_spectrum<P: AsRef<Path>>(path: P, r: &[f64], magnitudes: &[f64]) -> Result<()> {
    let file = File::create(path).map_err(InputError::IoError)?;
    let mut writer = BufWriter::new(file);
    write_r_spectrum(&mut writer, r, magnitudes)?;
    writer.flush().map_err(InputError::IoError)
}
