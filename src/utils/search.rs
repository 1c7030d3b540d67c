/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Nearest-sample lookups on sorted sample grids
//!
//! Knot positions, background bounds and window edges are continuous values;
//! these helpers snap them onto the discrete energy grid. All functions assume
//! the sequence is sorted in ascending order.

/// Index of the sample closest to `value`
///
/// Returns 0 for an empty sequence, 0 for values at or below the first
/// sample and the last index for values at or above the last sample.
/// Ties resolve to the lowest index.
pub fn closest_index(value: f64, seq: &[f64]) -> usize {
    let (first, last) = match (seq.first(), seq.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return 0,
    };

    if value <= first {
        return 0;
    }
    if value >= last {
        return seq.len() - 1;
    }

    let mut closest_idx = 0;
    let mut min_diff = f64::INFINITY;

    for (i, &sample) in seq.iter().enumerate() {
        let diff = (sample - value).abs();
        if diff < min_diff {
            min_diff = diff;
            closest_idx = i;
        }
    }

    closest_idx
}

/// Sample value closest to `value`
///
/// Picks the nearer member of the bracketing pair, the lower one on a tie.
/// Values outside the sampled range snap to the corresponding end and an
/// empty sequence returns `value` unchanged.
pub fn closest_value(value: f64, seq: &[f64]) -> f64 {
    let (first, last) = match (seq.first(), seq.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return value,
    };

    if value <= first {
        return first;
    }
    if value >= last {
        return last;
    }

    // first < value < last, so 1 <= upper < len
    let upper = seq.partition_point(|&sample| sample <= value);
    let lower_value = seq[upper - 1];
    let upper_value = seq[upper];

    if upper_value - value < value - lower_value {
        upper_value
    } else {
        lower_value
    }
}

/// Index of the first sample at or above `value`, `seq.len()` if there is none
pub fn first_index_at_or_above(value: f64, seq: &[f64]) -> usize {
    seq.iter()
        .position(|&sample| sample >= value)
        .unwrap_or(seq.len())
}
