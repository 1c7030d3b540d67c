/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use log::{info, warn};
use rayon::prelude::*;

use crate::analysis::{refit_project, Analysis, AnalysisConfig, AnalysisResult};
use crate::fitting::{distribute_knots, DEFAULT_SEGMENT_DEGREE};
use crate::input::{export_r_spectrum, read_columns, read_project};
use crate::xas::{edge_energy, estimate_e0};

#[derive(clap::Args, Debug)]
pub(super) struct FitArgs {
    /// Data file with energy and absorption columns
    pub data: PathBuf,

    /// Edge energy in eV; taken from --config or estimated from the data when omitted
    #[arg(long)]
    pub e0: Option<f64>,

    /// JSON analysis settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of spline knots from E0 to the last sample, evenly spaced in k
    #[arg(long, conflicts_with = "config")]
    pub knots: Option<usize>,

    /// Title stored in the project file
    #[arg(long)]
    pub title: Option<String>,

    /// Project file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// R-space spectrum to write
    #[arg(long)]
    pub fft: Option<PathBuf>,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub(super) struct RefitArgs {
    /// Project file to re-run
    pub project: PathBuf,

    /// Project file to write (the input is left untouched when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// R-space spectrum to write
    #[arg(long)]
    pub fft: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub(super) struct BatchArgs {
    /// Data files to fit
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON analysis settings shared by every file
    #[arg(long)]
    pub config: PathBuf,

    /// Directory receiving one project file per input
    #[arg(long)]
    pub out_dir: PathBuf,
}

#[derive(clap::Args, Debug)]
pub(super) struct EdgeArgs {
    /// Element name, e.g. Copper
    pub element: String,

    /// Edge label
    #[arg(default_value = "K")]
    pub edge: String,
}

pub(super) fn fit(args: FitArgs) -> anyhow::Result<()> {
    let data = read_columns(&args.data)
        .with_context(|| format!("reading {}", args.data.display()))?;

    let loaded = args
        .config
        .as_ref()
        .map(AnalysisConfig::from_json_file)
        .transpose()?;

    // --e0 first, then the configured E0, then an estimate from the data
    let e0 = match (args.e0, &loaded) {
        (Some(e0), _) => e0,
        (None, Some(config)) => config.e0,
        (None, None) => {
            let e0 = estimate_e0(&data.energy, &data.i0, &data.absorption)?;
            info!("estimated E0 = {:.3} eV", e0);
            e0
        }
    };

    let mut config = match loaded {
        Some(config) => AnalysisConfig { e0, ..config },
        None => AnalysisConfig::for_data(&data.energy, e0),
    };
    if let Some(count) = args.knots {
        let last = data.energy.last().copied().unwrap_or(e0);
        config.spline.markers = distribute_knots(e0, last, count, e0, &data.energy)?;
        config.spline.degrees = vec![DEFAULT_SEGMENT_DEGREE; count - 1];
    }

    let result = Analysis::new(config.clone())?.run(&data.energy, &data.absorption, &data.i0)?;
    print_summary(&args.data, &result);

    if let Some(output) = &args.output {
        let title = args.title.clone().unwrap_or_else(|| file_stem(&args.data));
        result
            .to_project(&title, &[], &config)
            .write(output)
            .with_context(|| format!("writing {}", output.display()))?;
    }
    if let Some(path) = &args.fft {
        write_fft(path, &result)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}

pub(super) fn refit(args: RefitArgs) -> anyhow::Result<()> {
    let project = read_project(&args.project)
        .with_context(|| format!("reading {}", args.project.display()))?;
    let result = refit_project(&project)?;
    print_summary(&args.project, &result);

    if let Some(output) = &args.output {
        let config = AnalysisConfig::from_project(&project);
        result
            .to_project(&project.title, &project.comments, &config)
            .write(output)
            .with_context(|| format!("writing {}", output.display()))?;
    }
    if let Some(path) = &args.fft {
        write_fft(path, &result)?;
    }

    Ok(())
}

pub(super) fn batch(args: BatchArgs) -> anyhow::Result<()> {
    let config = AnalysisConfig::from_json_file(&args.config)?;
    let analysis = Analysis::new(config)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let failures: Vec<(PathBuf, anyhow::Error)> = args
        .files
        .par_iter()
        .filter_map(|path| {
            fit_one(&analysis, path, &args.out_dir)
                .err()
                .map(|err| (path.clone(), err))
        })
        .collect();

    for (path, err) in &failures {
        warn!("{}: {:#}", path.display(), err);
    }
    if !failures.is_empty() {
        bail!("{} of {} files failed", failures.len(), args.files.len());
    }

    info!("fitted {} files", args.files.len());
    Ok(())
}

fn fit_one(analysis: &Analysis, path: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let data = read_columns(path)?;
    let result = analysis.run(&data.energy, &data.absorption, &data.i0)?;
    let title = file_stem(path);
    let output = out_dir.join(format!("{}.d", title));
    result
        .to_project(&title, &[], analysis.config())
        .write(&output)?;
    Ok(())
}

pub(super) fn edge(args: EdgeArgs) -> anyhow::Result<()> {
    let energy = edge_energy(&args.element, &args.edge)?;
    println!("{} {} edge: {:.1} eV", args.element, args.edge, energy);
    Ok(())
}

fn write_fft(path: &Path, result: &AnalysisResult) -> anyhow::Result<()> {
    export_r_spectrum(path, &result.spectrum.r_values(), &result.spectrum.magnitudes)
        .with_context(|| format!("writing {}", path.display()))
}

fn print_summary(source: &Path, result: &AnalysisResult) {
    println!(
        "{}: {} samples, edge value {:.6} ({:?}), {} k points",
        source.display(),
        result.energy.len(),
        result.edge_value,
        result.spline_method,
        result.xafs.len()
    );
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string())
}
