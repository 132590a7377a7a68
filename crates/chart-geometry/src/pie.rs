// File: crates/chart-geometry/src/pie.rs
// Summary: Pie/donut slices, radius resolution, proportional angular layout and arc paths.
// Notes:
// - Angles are radians measured clockwise from 12 o'clock, so a slice starting at 0
//   begins straight above the centre.

use std::f64::consts::TAU;

use tracing::debug;

use crate::format::value_text;
use crate::geometry::Point;
use crate::path::PathBuilder;
use crate::series::parse_number;
use crate::theme::resolve_color;
use crate::types::Record;

/// One wedge of a pie chart. Only strictly positive values become slices.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub id: String,
    pub datum: Record,
    pub value: f64,
    pub label: String,
    pub color: String,
    /// Position among the kept slices.
    pub index: usize,
    /// `value / total`.
    pub percentage: f64,
}

/// Slices plus the sum they were normalised against.
#[derive(Clone, Debug, PartialEq)]
pub struct PieData {
    pub slices: Vec<Slice>,
    pub total: f64,
}

impl PieData {
    pub fn slice(&self, id: &str) -> Option<&Slice> {
        self.slices.iter().find(|s| s.id == id)
    }
}

/// Angular order of the layout. The slice list itself always keeps input order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PieSort {
    #[default]
    None,
    Ascending,
    Descending,
}

/// Radius either relative to the available radius (`0.0..=1.0`) or in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RadiusSpec {
    Percent(f64),
    Pixels(f64),
}

impl RadiusSpec {
    pub fn resolve(self, available: f64) -> f64 {
        let r = match self {
            RadiusSpec::Percent(p) => available * p,
            RadiusSpec::Pixels(px) => px,
        };
        if r.is_finite() { r.max(0.0) } else { 0.0 }
    }
}

/// Resolve `(inner, outer)`: outer is clamped to `available`, inner to outer.
pub fn resolve_radii(available: f64, inner: RadiusSpec, outer: RadiusSpec) -> (f64, f64) {
    let available = if available.is_finite() { available.max(0.0) } else { 0.0 };
    let outer = outer.resolve(available).min(available);
    let inner = inner.resolve(available).min(outer);
    (inner, outer)
}

/// Build slices from records. `value_key` values that are not finite and positive are excluded.
pub fn build_slices(
    records: &[Record],
    value_key: &str,
    name_key: Option<&str>,
    color_key: Option<&str>,
    palette: &[String],
) -> PieData {
    let kept: Vec<(usize, &Record, f64)> = records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| {
            let v = r.get(value_key).and_then(parse_number)?;
            (v > 0.0).then_some((i, r, v))
        })
        .collect();
    if kept.len() < records.len() {
        debug!(excluded = records.len() - kept.len(), "excluded non-positive or non-numeric slices");
    }

    let total: f64 = kept.iter().map(|(_, _, v)| v).sum();
    let slices = kept
        .into_iter()
        .enumerate()
        .map(|(index, (source_index, record, value))| {
            let name = name_key.and_then(|k| record.get(k)).and_then(value_text);
            let explicit_color = color_key.and_then(|k| record.get(k)).and_then(|v| v.as_str());
            Slice {
                id: name.clone().map(|n| format!("{n}-{source_index}")).unwrap_or_else(|| format!("slice-{source_index}")),
                label: name.unwrap_or_else(|| format!("Slice {}", index + 1)),
                color: resolve_color(explicit_color, palette, index),
                datum: record.clone(),
                percentage: if total > 0.0 { value / total } else { 0.0 },
                value,
                index,
            }
        })
        .collect();
    PieData { slices, total }
}

/// Angular and radial extent of one slice after layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcGeometry {
    pub slice_id: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub corner_radius: f64,
    pub path: String,
}

impl ArcGeometry {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) * 0.5
    }

    /// Point halfway through the ring at the slice's mid angle; used as label and tooltip anchor.
    pub fn centroid(&self, center: Point) -> Point {
        polar(center, (self.inner_radius + self.outer_radius) * 0.5, self.mid_angle())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcLayout {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Gap between neighbouring slices, radians.
    pub pad_angle: f64,
    pub corner_radius: f64,
    pub sort: PieSort,
}

/// Sweep each slice proportionally to its value over the full circle, minus padding.
pub fn layout_arcs(slices: &[Slice], layout: &ArcLayout) -> Vec<ArcGeometry> {
    let n = slices.len();
    let total: f64 = slices.iter().map(|s| s.value).sum();
    if n == 0 || !(total > 0.0) {
        return Vec::new();
    }

    let pad = if n > 1 { layout.pad_angle.max(0.0).min(TAU / n as f64) } else { 0.0 };
    let k = (TAU - pad * n as f64) / total;

    let mut order: Vec<usize> = (0..n).collect();
    match layout.sort {
        PieSort::None => {}
        PieSort::Ascending => order.sort_by(|&a, &b| slices[a].value.total_cmp(&slices[b].value)),
        PieSort::Descending => order.sort_by(|&a, &b| slices[b].value.total_cmp(&slices[a].value)),
    }

    let mut angles = vec![(0.0, 0.0); n];
    let mut cursor = 0.0;
    for &i in &order {
        let start = cursor + pad * 0.5;
        let end = start + slices[i].value * k;
        angles[i] = (start, end);
        cursor = end + pad * 0.5;
    }

    slices
        .iter()
        .zip(angles)
        .map(|(slice, (start, end))| ArcGeometry {
            slice_id: slice.id.clone(),
            start_angle: start,
            end_angle: end,
            inner_radius: layout.inner_radius,
            outer_radius: layout.outer_radius,
            corner_radius: layout.corner_radius,
            path: arc_path(layout.center, layout.inner_radius, layout.outer_radius, start, end, layout.corner_radius),
        })
        .collect()
}

#[inline]
fn polar(center: Point, r: f64, angle: f64) -> Point {
    Point::new(center.x + r * angle.sin(), center.y - r * angle.cos())
}

/// Path data for a ring sector between `start` and `end` (clockwise, radians).
pub fn arc_path(center: Point, inner: f64, outer: f64, start: f64, end: f64, corner: f64) -> String {
    let sweep = end - start;
    let mut path = PathBuilder::new();
    if !(outer > 0.0) || !(sweep > 0.0) {
        return path.finish();
    }

    if sweep >= TAU - 1e-9 {
        // Full ring: two half arcs per circle; an SVG arc cannot start and end on the same point.
        let (top, bottom) = (polar(center, outer, 0.0), polar(center, outer, TAU / 2.0));
        path.move_to(top).arc_to(outer, true, true, bottom).arc_to(outer, true, true, top);
        if inner > 0.0 {
            let (itop, ibottom) = (polar(center, inner, 0.0), polar(center, inner, TAU / 2.0));
            path.move_to(itop).arc_to(inner, true, false, ibottom).arc_to(inner, true, false, itop);
        }
        path.close();
        return path.finish();
    }

    let large = sweep > TAU / 2.0;
    let corner = effective_corner(inner, outer, sweep, corner);
    if corner <= 0.0 {
        path.move_to(polar(center, outer, start)).arc_to(outer, large, true, polar(center, outer, end));
        if inner > 0.0 {
            path.line_to(polar(center, inner, end)).arc_to(inner, large, false, polar(center, inner, start));
        } else {
            path.line_to(center);
        }
        path.close();
        return path.finish();
    }

    // Rounded corners: each corner is a quarter-ish arc of radius `corner` joining the
    // radial edge to the circular edge.
    let to = corner / outer;
    path.move_to(polar(center, outer - corner, start))
        .arc_to(corner, false, true, polar(center, outer, start + to))
        .arc_to(outer, sweep - 2.0 * to > TAU / 2.0, true, polar(center, outer, end - to))
        .arc_to(corner, false, true, polar(center, outer - corner, end));
    let ti = if inner > 0.0 { corner / inner } else { f64::INFINITY };
    if inner > 0.0 && 2.0 * ti < sweep {
        path.line_to(polar(center, inner + corner, end))
            .arc_to(corner, false, true, polar(center, inner, end - ti))
            .arc_to(inner, sweep - 2.0 * ti > TAU / 2.0, false, polar(center, inner, start + ti))
            .arc_to(corner, false, true, polar(center, inner + corner, start));
    } else if inner > 0.0 {
        path.line_to(polar(center, inner, end)).arc_to(inner, large, false, polar(center, inner, start));
    } else {
        path.line_to(center);
    }
    path.close();
    path.finish()
}

/// Corner radius limited to half the ring thickness and to what the outer sweep can hold.
fn effective_corner(inner: f64, outer: f64, sweep: f64, corner: f64) -> f64 {
    if !(corner > 0.0) {
        return 0.0;
    }
    let by_thickness = (outer - inner) * 0.5;
    let by_sweep = sweep * outer * 0.5 * 0.999;
    corner.min(by_thickness).min(by_sweep).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn radius_resolution_clamps() {
        assert_eq!(resolve_radii(100.0, RadiusSpec::Percent(0.5), RadiusSpec::Percent(0.9)), (50.0, 90.0));
        assert_eq!(resolve_radii(100.0, RadiusSpec::Pixels(20.0), RadiusSpec::Pixels(400.0)), (20.0, 100.0));
        assert_eq!(resolve_radii(100.0, RadiusSpec::Pixels(80.0), RadiusSpec::Pixels(60.0)), (60.0, 60.0));
        assert_eq!(resolve_radii(100.0, RadiusSpec::Pixels(-5.0), RadiusSpec::Percent(f64::NAN)), (0.0, 0.0));
    }

    #[test]
    fn non_positive_values_are_excluded() {
        let records = vec![rec(json!({"k": "a", "v": 0})), rec(json!({"k": "b", "v": -3})), rec(json!({"k": "c", "v": 4}))];
        let pie = build_slices(&records, "v", Some("k"), None, &[]);
        assert_eq!(pie.slices.len(), 1);
        assert_eq!(pie.slices[0].label, "c");
        assert_eq!(pie.slices[0].index, 0);
        assert_eq!(pie.slices[0].percentage, 1.0);
    }

    #[test]
    fn single_slice_is_a_full_ring() {
        let records = vec![rec(json!({"v": 1}))];
        let pie = build_slices(&records, "v", None, None, &[]);
        let layout = ArcLayout {
            center: Point::new(50.0, 50.0),
            inner_radius: 0.0,
            outer_radius: 40.0,
            pad_angle: 0.1,
            corner_radius: 0.0,
            sort: PieSort::None,
        };
        let arcs = layout_arcs(&pie.slices, &layout);
        assert_eq!(arcs.len(), 1);
        assert_eq!(arcs[0].start_angle, 0.0);
        assert!((arcs[0].end_angle - TAU).abs() < 1e-12);
        assert_eq!(arcs[0].path, "M50,10A40,40,0,1,1,50,90A40,40,0,1,1,50,10Z");
    }

    #[test]
    fn quarter_wedge_path() {
        let p = arc_path(Point::new(0.0, 0.0), 0.0, 10.0, 0.0, TAU / 4.0, 0.0);
        assert_eq!(p, "M0,-10A10,10,0,0,1,10,0L0,0Z");
    }

    #[test]
    fn corner_radius_is_limited_by_thickness() {
        assert_eq!(effective_corner(40.0, 50.0, 1.0, 20.0), 5.0);
        assert_eq!(effective_corner(0.0, 50.0, 1.0, 0.0), 0.0);
    }
}
