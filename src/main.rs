/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Main executable for xafs-spline

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    xafs_spline::cli::run_from_env()
}
