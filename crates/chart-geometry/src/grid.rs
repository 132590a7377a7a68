// File: crates/chart-geometry/src/grid.rs
// Summary: X-axis label selection: evenly spaced, first/last inclusive subset of points.

use std::collections::{BTreeSet, HashSet};

use crate::series::DataPoint;

/// Evenly spaced subset of `points` for x-axis labels. See [`sample_evenly_by`].
pub fn select_points_for_ticks(points: &[DataPoint], desired_count: usize) -> Vec<&DataPoint> {
    sample_evenly_by(points, desired_count, |p| p.x)
}

/// Deduplicate `items` by `x` (first occurrence wins), then pick `desired_count`
/// evenly spaced entries that always include the first and last one.
/// Relative order of the input is preserved.
pub fn sample_evenly_by<T>(items: &[T], desired_count: usize, x: impl Fn(&T) -> f64) -> Vec<&T> {
    let mut seen = HashSet::new();
    let unique: Vec<&T> = items
        .iter()
        .filter(|item| seen.insert(x_key(x(*item))))
        .collect();

    let n = unique.len();
    if n == 0 {
        return unique;
    }
    let count = desired_count.max(2).min(n);
    if n <= count {
        return unique;
    }

    let last = n - 1;
    let stride = last as f64 / (count - 1) as f64;
    let mut picked: BTreeSet<usize> = BTreeSet::from([0, last]);
    for i in 0..count {
        let idx = (i as f64 * stride).round() as usize;
        picked.insert(idx.min(last));
    }
    // Rounding collisions can leave gaps; fill with the earliest unused indices.
    let mut next = 0;
    while picked.len() < count && next < n {
        picked.insert(next);
        next += 1;
    }

    picked.into_iter().map(|i| unique[i]).collect()
}

/// Hashable identity for an x value; folds -0.0 onto 0.0.
fn x_key(v: f64) -> u64 {
    if v == 0.0 { 0f64.to_bits() } else { v.to_bits() }
}
