/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/
use std::fs;

use approx::assert_relative_eq;
use tempfile::tempdir;
use xafs_spline::analysis::{refit_project, Analysis, AnalysisConfig};
use xafs_spline::fitting::SplineMethod;
use xafs_spline::input::{read_project, BackgroundSettings, SplineSettings};
use xafs_spline::utils::to_k;

const E0: f64 = 179.0;

/// Linear pre-edge, unit step at E0 and a damped single-shell oscillation
fn spectrum() -> (Vec<f64>, Vec<f64>) {
    let x: Vec<f64> = (0..600).map(|i| 100.0 + i as f64).collect();
    let y = x
        .iter()
        .map(|&e| {
            let pre = 0.1 - 1e-5 * (e - 100.0);
            if e < E0 {
                pre
            } else {
                let k = to_k(e, E0);
                pre + 1.0 + 0.02 * (5.0 * k).sin() * (-0.01 * k * k).exp()
            }
        })
        .collect();
    (x, y)
}

fn config(x: &[f64]) -> AnalysisConfig {
    AnalysisConfig {
        background: BackgroundSettings {
            low: 100.0,
            high: 170.0,
            degree: 1,
        },
        spline: SplineSettings {
            markers: vec![E0, 400.0, 699.0],
            degrees: vec![2, 2],
        },
        k_window: Some((2.0, 10.0)),
        ..AnalysisConfig::for_data(x, E0)
    }
}

#[test]
fn test_background_removes_pre_edge() {
    let (x, y) = spectrum();
    let i0 = vec![1.0; x.len()];
    let result = Analysis::new(config(&x)).unwrap().run(&x, &y, &i0).unwrap();

    for (i, &e) in x.iter().enumerate().take(70) {
        assert_relative_eq!(result.background[i], 0.1 - 1e-5 * (e - 100.0), epsilon = 1e-8);
    }
    assert_eq!(result.spline_method, SplineMethod::Constrained);
    assert_relative_eq!(result.edge_value, 1.0, epsilon = 0.05);
}

#[test]
fn test_xafs_and_spectrum() {
    let (x, y) = spectrum();
    let i0 = vec![1.0; x.len()];
    let result = Analysis::new(config(&x)).unwrap().run(&x, &y, &i0).unwrap();

    assert_eq!(result.xafs.start_index, 79);
    assert_eq!(result.xafs.len(), 521);
    assert_eq!(result.k_window, (2.0, 10.0));
    assert_eq!(result.spectrum.len(), 256);
    assert!(result.spectrum.magnitudes.iter().all(|m| m.is_finite()));
    assert!(result.k[..79].iter().all(|&k| k == 0.0));
}

#[test]
fn test_project_round_trip_and_refit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("synthetic.d");
    let (x, y) = spectrum();
    let i0 = vec![1.0; x.len()];
    let config = config(&x);

    let first = Analysis::new(config.clone()).unwrap().run(&x, &y, &i0).unwrap();
    first
        .to_project("synthetic", &["generated".to_string()], &config)
        .write(&path)
        .unwrap();

    let project = read_project(&path).unwrap();
    assert_eq!(project.e0, E0);
    assert_eq!(project.spline, config.spline);
    assert_eq!(project.k_window, Some((2.0, 10.0)));
    assert_eq!(project.columns.len(), x.len());

    let again = refit_project(&project).unwrap();
    assert_relative_eq!(again.edge_value, first.edge_value, epsilon = 1e-4);
    assert_eq!(again.xafs.start_index, first.xafs.start_index);
}

#[test]
fn test_json_config_drives_analysis() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analysis.json");
    let (x, y) = spectrum();
    fs::write(
        &path,
        r#"{
            "e0": 179.0,
            "background": {"low": 100.0, "high": 170.0, "degree": 1},
            "spline": {"markers": [179.0, 699.0], "degrees": [2]},
            "fourier": {"fft_points": 1024}
        }"#,
    )
    .unwrap();

    let config = AnalysisConfig::from_json_file(&path).unwrap();
    assert_eq!(config.fourier.dr, 0.05);
    let result = Analysis::new(config).unwrap().run(&x, &y, &vec![1.0; x.len()]).unwrap();
    assert_eq!(result.segments.len(), 1);
    assert_eq!(result.spectrum.len(), 512);
    assert_relative_eq!(result.k_window.1, to_k(699.0, E0), epsilon = 1e-12);
}

#[test]
fn test_cli_fit_writes_outputs() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("scan.dat");
    let project = dir.path().join("scan.d");
    let fft = dir.path().join("scan.fft");
    let (x, y) = spectrum();
    let text: String = x
        .iter()
        .zip(&y)
        .map(|(e, mu)| format!("{} {}\n", e, mu))
        .collect();
    fs::write(&data, text).unwrap();

    xafs_spline::cli::run([
        "fit",
        data.to_str().unwrap(),
        "--e0",
        "179",
        "-o",
        project.to_str().unwrap(),
        "--fft",
        fft.to_str().unwrap(),
    ])
    .unwrap();

    let saved = read_project(&project).unwrap();
    assert_eq!(saved.title, "scan");
    assert!(saved.columns.has_derived());
    assert!(fs::read_to_string(&fft).unwrap().starts_with("R FFT\n"));
}

#[test]
fn test_cli_fit_with_distributed_knots() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("knots.dat");
    let project = dir.path().join("knots.d");
    let (x, y) = spectrum();
    let text: String = x
        .iter()
        .zip(&y)
        .map(|(e, mu)| format!("{},{}\n", e, mu))
        .collect();
    fs::write(&data, text).unwrap();

    xafs_spline::cli::run([
        "fit",
        data.to_str().unwrap(),
        "--e0",
        "179",
        "--knots",
        "3",
        "-o",
        project.to_str().unwrap(),
    ])
    .unwrap();

    let saved = read_project(&project).unwrap();
    assert_eq!(saved.spline.markers.len(), 3);
    assert_eq!(saved.spline.degrees, vec![2, 2]);
    assert_eq!(saved.spline.markers[0], E0);
    assert_eq!(saved.spline.markers[2], 699.0);
}

#[test]
fn test_cli_fit_uses_configured_e0() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("scan.dat");
    let settings = dir.path().join("analysis.json");
    let project = dir.path().join("scan.d");
    let (x, y) = spectrum();
    let text: String = x
        .iter()
        .zip(&y)
        .map(|(e, mu)| format!("{} {}\n", e, mu))
        .collect();
    fs::write(&data, text).unwrap();
    // Away from the step at 179 eV, where an estimate would land
    fs::write(
        &settings,
        r#"{
            "e0": 185.0,
            "background": {"low": 100.0, "high": 170.0, "degree": 1},
            "spline": {"markers": [185.0, 699.0], "degrees": [2]}
        }"#,
    )
    .unwrap();

    xafs_spline::cli::run([
        "fit",
        data.to_str().unwrap(),
        "--config",
        settings.to_str().unwrap(),
        "-o",
        project.to_str().unwrap(),
    ])
    .unwrap();

    let saved = read_project(&project).unwrap();
    assert_eq!(saved.e0, 185.0);
}
