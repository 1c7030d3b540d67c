/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Command Line Interface (CLI) module
//!
//! This module provides the `xafs-spline` command line front-end.

mod commands;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "xafs-spline",
    version,
    about = "Background subtraction and constrained spline fitting for XAFS data"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand, Debug)]
enum CliCommand {
    /// Fit background and spline to a plain data file
    Fit(commands::FitArgs),
    /// Re-run the analysis stored in a project file
    Refit(commands::RefitArgs),
    /// Fit many data files with one configuration
    Batch(commands::BatchArgs),
    /// Look up an absorption edge energy
    Edge(commands::EdgeArgs),
}

/// Run the CLI with the process arguments
pub fn run_from_env() -> anyhow::Result<()> {
    dispatch(Cli::parse())
}

/// Run the CLI with explicit arguments (without the program name)
pub fn run<I, S>(args: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("xafs-spline".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    dispatch(Cli::try_parse_from(full_args)?)
}

fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        CliCommand::Fit(args) => commands::fit(args),
        CliCommand::Refit(args) => commands::refit(args),
        CliCommand::Batch(args) => commands::batch(args),
        CliCommand::Edge(args) => commands::edge(args),
    }
}
