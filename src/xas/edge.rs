/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Absorption edge energies and E0 estimation

use std::collections::BTreeMap;
use std::io::BufRead;

use once_cell::sync::Lazy;

use super::errors::{Result, XasError};
use crate::utils::math::{argmax, gradient};

/// Edge label (K, L3, ...) to energy in eV
pub type ElementEdges = BTreeMap<String, f64>;

/// Element name to its edges
pub type EdgeTable = BTreeMap<String, ElementEdges>;

static BUILTIN_EDGES: Lazy<EdgeTable> = Lazy::new(|| {
    let entries: &[(&str, &[(&str, f64)])] = &[
        ("Chlorine", &[("K", 2840.0)]),
        ("Chromium", &[("K", 6005.0)]),
        ("Cobalt", &[("K", 7725.0)]),
        ("Copper", &[("K", 9000.0)]),
        ("Iron", &[("K", 7130.0)]),
        ("Manganese", &[("K", 6555.0)]),
        ("Molybdenum", &[("K", 20025.0), ("L3", 2530.0), ("L2", 2640.0)]),
        ("Sulfur", &[("K", 2490.0)]),
        ("Titanium", &[("K", 4985.0)]),
        ("Zinc", &[("K", 9680.0)]),
    ];

    entries
        .iter()
        .map(|(element, edges)| {
            let edges = edges
                .iter()
                .map(|(edge, energy)| (edge.to_string(), *energy))
                .collect();
            (element.to_string(), edges)
        })
        .collect()
});

/// The built-in edge table
pub fn builtin_edges() -> &'static EdgeTable {
    &BUILTIN_EDGES
}

/// Energy of `edge` for `element` from the built-in table
///
/// Element names match case-insensitively.
pub fn edge_energy(element: &str, edge: &str) -> Result<f64> {
    lookup(&BUILTIN_EDGES, element, edge)
}

/// Energy of `edge` for `element` in `table`
pub fn lookup(table: &EdgeTable, element: &str, edge: &str) -> Result<f64> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(element))
        .and_then(|(_, edges)| edges.get(&edge.to_ascii_uppercase()))
        .copied()
        .ok_or_else(|| XasError::UnknownEdge {
            element: element.to_string(),
            edge: edge.to_string(),
        })
}

/// Parse an edge table
///
/// The first line is a header. Every following line holds an element name and
/// its `EDGE:energy` pairs separated by whitespace. Blank lines are skipped.
pub fn parse_edge_table<R: BufRead>(reader: R) -> Result<EdgeTable> {
    let mut table = EdgeTable::new();

    for (line_number, line) in reader.lines().enumerate().skip(1) {
        let line = line.map_err(|e| XasError::EdgeTableError {
            line: line_number + 1,
            message: e.to_string(),
        })?;
        let mut fields = line.split_whitespace();
        let element = match fields.next() {
            Some(element) => element,
            None => continue,
        };

        let mut edges = ElementEdges::new();
        for field in fields {
            let (edge, energy) = field.split_once(':').ok_or_else(|| XasError::EdgeTableError {
                line: line_number + 1,
                message: format!("expected EDGE:energy, found '{}'", field),
            })?;
            let energy = energy.parse::<f64>().map_err(|_| XasError::EdgeTableError {
                line: line_number + 1,
                message: format!("invalid energy '{}'", energy),
            })?;
            edges.insert(edge.to_string(), energy);
        }
        table.insert(element.to_string(), edges);
    }

    Ok(table)
}

/// Estimate E0 from transmission data
///
/// E0 is the energy where the transmission ratio `it / i0` changes fastest.
pub fn estimate_e0(x: &[f64], i0: &[f64], it: &[f64]) -> Result<f64> {
    if x.len() != i0.len() || x.len() != it.len() {
        return Err(XasError::EnergyGridError(format!(
            "energy ({}), I0 ({}) and It ({}) lengths differ",
            x.len(),
            i0.len(),
            it.len()
        )));
    }

    let ratio: Vec<f64> = it
        .iter()
        .zip(i0)
        .map(|(t, i)| t / (i + 1e-12))
        .collect();
    let slope: Vec<f64> = gradient(&ratio, x)?.iter().map(|d| d.abs()).collect();

    argmax(&slope)
        .map(|i| x[i])
        .ok_or_else(|| XasError::EnergyGridError("no samples to estimate E0".to_string()))
}

/// Check that E0 lies inside the energy range of the data
pub fn check_e0_in_range(e0: f64, x: &[f64]) -> Result<()> {
    match (x.first(), x.last()) {
        (Some(&first), Some(&last)) if e0 >= first && e0 <= last => Ok(()),
        (Some(&first), Some(&last)) => Err(XasError::InvalidParameter(format!(
            "E0 = {} is outside the data range {} to {}",
            e0, first, last
        ))),
        _ => Err(XasError::EnergyGridError("no energies".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(edge_energy("Copper", "K").unwrap(), 9000.0);
        assert_eq!(edge_energy("molybdenum", "l3").unwrap(), 2530.0);
        assert!(matches!(
            edge_energy("Gold", "K"),
            Err(XasError::UnknownEdge { .. })
        ));
        assert_eq!(builtin_edges().len(), 10);
    }

    #[test]
    fn test_parse_edge_table() {
        let text = "Element Edges\nIron K:7112.0 L3:706.8\n\nNickel K:8333\n";
        let table = parse_edge_table(Cursor::new(text)).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(lookup(&table, "Iron", "L3").unwrap(), 706.8);
        assert_eq!(lookup(&table, "Nickel", "K").unwrap(), 8333.0);
    }

    #[test]
    fn test_parse_edge_table_bad_field() {
        let err = parse_edge_table(Cursor::new("header\nIron K=7112\n")).unwrap_err();
        assert!(matches!(err, XasError::EdgeTableError { line: 2, .. }));
    }

    #[test]
    fn test_estimate_e0_at_steepest_rise() {
        let x: Vec<f64> = (0..50).map(|i| 7000.0 + i as f64 * 2.0).collect();
        let i0 = vec![2.0; 50];
        let it: Vec<f64> = x
            .iter()
            .map(|&e| 1.0 + (((e - 7050.0) / 4.0).tanh()))
            .collect();

        assert_eq!(estimate_e0(&x, &i0, &it).unwrap(), 7050.0);
    }

    #[test]
    fn test_check_e0_in_range() {
        let x = [10.0, 20.0, 30.0];
        assert!(check_e0_in_range(15.0, &x).is_ok());
        assert!(check_e0_in_range(30.0, &x).is_ok());
        assert!(check_e0_in_range(31.0, &x).is_err());
        assert!(check_e0_in_range(1.0, &[]).is_err());
    }
}
