/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Readers for project files and plain column data

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use super::errors::{InputError, Result};
use super::model::{BackgroundSettings, DataColumns, ImportedData, ProjectFile, SplineSettings};

/// Line-oriented reader for project files
///
/// Records are read in order: optional `TITLE`, `#` comments, then `E0`,
/// `BACKGROUND` and `SPLINE` (other lines before them are skipped), an
/// optional `KWIN` and finally the numeric data rows.
#[derive(Debug)]
struct ProjectReader {
    lines: Vec<String>,
    cursor: usize,
}

impl ProjectReader {
    fn new(lines: Vec<String>) -> Self {
        Self { lines, cursor: 0 }
    }

    fn peek(&self) -> Option<&str> {
        self.lines.get(self.cursor).map(String::as_str)
    }

    /// 1-based number of the line at the cursor
    fn line_number(&self) -> usize {
        self.cursor + 1
    }

    /// Advance to the next line starting with `keyword` and consume it
    fn find_record(&mut self, keyword: &str) -> Result<(usize, Vec<String>)> {
        while let Some(line) = self.peek() {
            if line.trim_start().to_uppercase().starts_with(keyword) {
                let tokens = line.split_whitespace().map(str::to_string).collect();
                let number = self.line_number();
                self.cursor += 1;
                return Ok((number, tokens));
            }
            self.cursor += 1;
        }
        Err(InputError::MissingRecord(keyword.to_string()))
    }

    fn title(&mut self) -> String {
        match self.peek() {
            Some(line) if line.starts_with("TITLE") => {
                let title = line["TITLE".len()..].trim().to_string();
                self.cursor += 1;
                title
            }
            _ => String::new(),
        }
    }

    fn comments(&mut self) -> Vec<String> {
        let mut comments = Vec::new();
        while let Some(comment) = self.peek().and_then(|line| line.strip_prefix('#')) {
            comments.push(comment.strip_prefix(' ').unwrap_or(comment).to_string());
            self.cursor += 1;
        }
        comments
    }

    fn e0(&mut self) -> Result<f64> {
        let (line, tokens) = self.find_record("E0")?;
        tokens
            .iter()
            .skip(1)
            .find_map(|token| token.replace("eV", "").replace("EV", "").parse::<f64>().ok())
            .ok_or_else(|| parse_error(line, "no numeric E0 value"))
    }

    fn background(&mut self) -> Result<BackgroundSettings> {
        let (line, tokens) = self.find_record("BACKGROUND")?;
        if tokens.len() < 4 {
            return Err(parse_error(line, "expected BACKGROUND low (degree) high"));
        }

        let low = parse_number(&tokens[1], line)?;
        let degree = tokens[2]
            .trim_matches(|c| c == '(' || c == ')')
            .parse::<i32>()
            .map_err(|_| parse_error(line, &format!("invalid degree '{}'", tokens[2])))?;
        let high = parse_number(&tokens[3], line)?;

        Ok(BackgroundSettings { low, high, degree })
    }

    fn spline(&mut self) -> Result<SplineSettings> {
        let (line, tokens) = self.find_record("SPLINE")?;
        let mut settings = SplineSettings::default();

        for token in tokens.iter().skip(1) {
            if token.starts_with('(') && token.ends_with(')') {
                if let Ok(degree) = token.trim_matches(|c| c == '(' || c == ')').parse() {
                    settings.degrees.push(degree);
                }
            } else if let Ok(marker) = token.parse::<f64>() {
                settings.markers.push(marker);
            }
        }

        if settings.markers.len() != settings.degrees.len() + 1 {
            warn!(
                "line {}: SPLINE record has {} markers for {} degrees",
                line,
                settings.markers.len(),
                settings.degrees.len()
            );
        }

        Ok(settings)
    }

    fn k_window(&mut self) -> Option<(f64, f64)> {
        let tokens: Vec<String> = self
            .peek()?
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if !tokens.first().is_some_and(|t| t.eq_ignore_ascii_case("KWIN")) {
            return None;
        }
        self.cursor += 1;

        match (
            tokens.get(1).and_then(|t| t.parse::<f64>().ok()),
            tokens.get(2).and_then(|t| t.parse::<f64>().ok()),
        ) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => {
                warn!("ignoring malformed KWIN record");
                None
            }
        }
    }

    fn rows(&mut self) -> Vec<Vec<f64>> {
        let rows: Vec<Vec<f64>> = self.lines[self.cursor..]
            .iter()
            .filter_map(|line| parse_row(line))
            .collect();
        self.cursor = self.lines.len();
        rows
    }
}

fn parse_error(line: usize, message: &str) -> InputError {
    InputError::ParseError {
        line,
        message: message.to_string(),
    }
}

fn parse_number(token: &str, line: usize) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| parse_error(line, &format!("invalid number '{}'", token)))
}

/// Split a data line on commas, or on whitespace when there are none
///
/// Returns `None` for blank lines and lines with any non-numeric field.
pub fn parse_row(line: &str) -> Option<Vec<f64>> {
    let fields: Vec<&str> = if line.contains(',') {
        line.split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .collect()
    } else {
        line.split_whitespace().collect()
    };

    if fields.is_empty() {
        return None;
    }
    fields.iter().map(|field| field.parse::<f64>().ok()).collect()
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .map_err(InputError::IoError)
}

/// Parse a project file from any buffered reader
pub fn parse_project<R: BufRead>(reader: R) -> Result<ProjectFile> {
    let mut reader = ProjectReader::new(read_lines(reader)?);

    let title = reader.title();
    let comments = reader.comments();
    let e0 = reader.e0()?;
    let background = reader.background()?;
    let spline = reader.spline()?;
    let k_window = reader.k_window();
    let columns = DataColumns::from_rows(&reader.rows())?;

    debug!(
        "read project '{}': {} samples, {} spline segments",
        title,
        columns.len(),
        spline.segment_count()
    );

    Ok(ProjectFile {
        title,
        comments,
        e0,
        background,
        spline,
        k_window,
        columns,
    })
}

/// Read a project file from disk
pub fn read_project<P: AsRef<Path>>(path: P) -> Result<ProjectFile> {
    let file = File::open(path.as_ref()).map_err(InputError::IoError)?;
    parse_project(BufReader::new(file))
}

/// Parse plain column data
///
/// Rows of exactly four values are read as `energy, k, I0, absorption`.
/// Any other row with at least two values is read as `energy, absorption`
/// with I0 set to 1. Everything else is skipped.
pub fn parse_columns<R: BufRead>(reader: R) -> Result<ImportedData> {
    let mut data = ImportedData::default();

    for row in read_lines(reader)?.iter().filter_map(|line| parse_row(line)) {
        match row.len() {
            4 => {
                data.energy.push(row[0]);
                data.i0.push(row[2]);
                data.absorption.push(row[3]);
            }
            n if n >= 2 => {
                data.energy.push(row[0]);
                data.i0.push(1.0);
                data.absorption.push(row[1]);
            }
            _ => {}
        }
    }

    if data.is_empty() {
        return Err(InputError::InvalidFormat(
            "no numeric data rows found".to_string(),
        ));
    }
    Ok(data)
}

/// Read plain column data from disk
pub fn read_columns<P: AsRef<Path>>(path: P) -> Result<ImportedData> {
    let file = File::open(path.as_ref()).map_err(InputError::IoError)?;
    parse_columns(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const PROJECT: &str = "TITLE copper foil
# first scan
# second comment
E0 8979.000
BACKGROUND 8800.00000 (2) 8950.00000 eV
SPLINE 8979.00000 (2) 9200.00000 (3) 9500.00000 eV
KWIN 2.00000 12.00000
EV K IO RAW BACKGROND NORMAL SPLINE XAFS
8800.0,0.0,1.0,0.5,0.5,0.0,0.0,0.0
8979.0,0.0,1.0,1.5,0.5,1.0,1.0,0.0
9500.0,11.7,1.0,1.6,0.6,1.0,1.1,-100.0
";

    #[test]
    fn test_parse_project_records() {
        let project = parse_project(Cursor::new(PROJECT)).unwrap();

        assert_eq!(project.title, "copper foil");
        assert_eq!(project.comments, vec!["first scan", "second comment"]);
        assert_eq!(project.e0, 8979.0);
        assert_eq!(project.background.degree, 2);
        assert_eq!(project.background.high, 8950.0);
        assert_eq!(project.spline.markers, vec![8979.0, 9200.0, 9500.0]);
        assert_eq!(project.spline.degrees, vec![2, 3]);
        assert_eq!(project.k_window, Some((2.0, 12.0)));
        assert_eq!(project.columns.len(), 3);
        assert_eq!(project.columns.xafs[2], -100.0);
    }

    #[test]
    fn test_missing_spline_record() {
        let text = "E0 10\nBACKGROUND 1 (1) 2 eV\n1,2,3,4\n";
        assert!(matches!(
            parse_project(Cursor::new(text)),
            Err(InputError::MissingRecord(record)) if record == "SPLINE"
        ));
    }

    #[test]
    fn test_optional_title_and_window() {
        let text = "E0 5.5eV\nBACKGROUND 1 (-1) 2 eV\nSPLINE 1 (2) 3 eV\n1 0 1 2\n2 0 1 3\n";
        let project = parse_project(Cursor::new(text)).unwrap();

        assert!(project.title.is_empty());
        assert_eq!(project.e0, 5.5);
        assert_eq!(project.background.order(), 0);
        assert_eq!(project.k_window, None);
        assert_eq!(project.columns.raw, vec![2.0, 3.0]);
    }

    #[test]
    fn test_bad_background_line() {
        let text = "E0 10\nBACKGROUND 1 (x) 2 eV\n";
        assert!(matches!(
            parse_project(Cursor::new(text)),
            Err(InputError::ParseError { line: 2, .. })
        ));
    }

    #[test]
    fn test_parse_row() {
        assert_eq!(parse_row("1.0, 2.0,3"), Some(vec![1.0, 2.0, 3.0]));
        assert_eq!(parse_row("  4 5\t6 "), Some(vec![4.0, 5.0, 6.0]));
        assert_eq!(parse_row("EV K IO RAW"), None);
        assert_eq!(parse_row("   "), None);
    }

    #[test]
    fn test_parse_columns_layouts() {
        let text = "energy mu\n100 0.1\n101,7.5,2.0,0.3\n102 0.2 9 9 9\n7\n";
        let data = parse_columns(Cursor::new(text)).unwrap();

        assert_eq!(data.energy, vec![100.0, 101.0, 102.0]);
        assert_eq!(data.i0, vec![1.0, 2.0, 1.0]);
        assert_eq!(data.absorption, vec![0.1, 0.3, 0.2]);
    }
}
