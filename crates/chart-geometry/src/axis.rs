// File: crates/chart-geometry/src/axis.rs
// Summary: "Nice number" tick generation, nice domain alignment and positioned axis ticks.

use crate::geometry::round12;
use crate::scale::{Domain, LinearScale};

/// Upper bound on generated ticks; guards the stepping loop against absurd spans.
const MAX_TICKS: usize = 10_000;

/// One axis tick: its domain value, its pixel position along the axis and its label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub position: f64,
    pub label: String,
}

/// Nearest 1/2/5/10 x 10^n to `range` (Heckbert's "nice numbers for graph labels").
///
/// With `round = true` the closest nice value is chosen; with `round = false` the
/// smallest nice value not below `range`. Non-positive or non-finite input yields 0.
pub fn nice_number(range: f64, round: bool) -> f64 {
    if !(range > 0.0) || !range.is_finite() {
        return 0.0;
    }
    let exponent = range.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = range / magnitude;
    let nice = if round {
        if fraction < 1.5 { 1.0 } else if fraction < 3.0 { 2.0 } else if fraction < 7.0 { 5.0 } else { 10.0 }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Step between ticks for `span` split into roughly `count` ticks.
pub fn nice_step(span: f64, count: usize) -> f64 {
    let count = count.max(2);
    nice_number(nice_number(span, false) / (count - 1) as f64, true)
}

/// Ascending "nice" tick values covering `domain`, about `desired_count` of them.
pub fn generate_linear_ticks(domain: Domain, desired_count: usize) -> Vec<f64> {
    if !domain.is_finite() {
        return Vec::new();
    }
    let (min, max) = domain.ordered();
    if min == max {
        return vec![min];
    }
    let step = nice_step(max - min, desired_count);
    if !(step > 0.0) || !step.is_finite() {
        return vec![min, max];
    }

    let start = (min / step).floor() * step;
    let end = (max / step).ceil() * step;
    let lo = min - step / 2.0;
    let hi = max + step / 2.0;
    let ticks: Vec<f64> = (0..MAX_TICKS)
        .map(|i| round12(start + i as f64 * step))
        .take_while(|v| *v <= end + step * 1e-9)
        .filter(|v| *v >= lo && *v <= hi)
        .collect();

    if ticks.is_empty() { vec![min, max] } else { ticks }
}

/// Expand a padded domain outward to nice step boundaries.
///
/// A domain that stays on one side of zero is pinned to zero on that side. Sides
/// not pinned keep at least a tenth of a step between the data and the boundary.
/// The result is never degenerate.
pub fn align_domain_to_nice_values(domain: Domain, target_count: usize) -> Domain {
    if !domain.is_finite() {
        return Domain::new(0.0, 1.0);
    }
    let (mut min, mut max) = domain.ordered();
    if min == max {
        let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        min -= pad;
        max += pad;
    }

    let step = nice_step(max - min, target_count);
    if !(step > 0.0) || !step.is_finite() {
        return Domain::new(min, max);
    }

    let margin = step * 0.1;
    let mut nice_min = if min >= 0.0 { 0.0 } else { (min / step).floor() * step };
    let mut nice_max = if max <= 0.0 { 0.0 } else { (max / step).ceil() * step };
    if min < 0.0 && min - nice_min < margin {
        nice_min -= step;
    }
    if max > 0.0 && nice_max - max < margin {
        nice_max += step;
    }
    if nice_max <= nice_min {
        nice_max = nice_min + step;
    }
    Domain::new(round12(nice_min), round12(nice_max))
}

/// Positioned y ticks for `scale`, labelled through `format`.
pub fn value_ticks(scale: &LinearScale, desired_count: usize, format: impl Fn(f64) -> String) -> Vec<Tick> {
    generate_linear_ticks(scale.domain(), desired_count)
        .into_iter()
        .map(|value| Tick { value, position: scale.scale(value), label: format(value) })
        .collect()
}
