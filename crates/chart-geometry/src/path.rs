// File: crates/chart-geometry/src/path.rs
// Summary: SVG path-data construction for line and area series with selectable interpolation.

use std::fmt::Write as _;

use crate::geometry::{Point, Rect};
use crate::scale::LinearScale;
use crate::series::Series;

/// Interpolation between consecutive points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Curve {
    #[default]
    Linear,
    /// Monotone cubic in x (Fritsch-Carlson tangents); never overshoots the data.
    Monotone,
    /// Natural cubic spline (zero second derivative at the ends).
    Natural,
    /// Horizontal-vertical steps changing halfway between points.
    Step,
}

/// A point resolved to pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedPoint {
    pub point_id: String,
    pub series_index: usize,
    pub x: f64,
    pub y: f64,
}

impl PositionedPoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Drawable shapes for one series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesGeometry {
    pub series_id: String,
    pub series_index: usize,
    pub color: String,
    /// `None` when the series has fewer than two points.
    pub line_path: Option<String>,
    pub area_path: Option<String>,
    /// Every point of the series, including those of a single-point series.
    pub markers: Vec<PositionedPoint>,
}

/// Incremental SVG path-data writer. Coordinates are written with at most three decimals.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.cmd('M', &[p]);
        self
    }
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.cmd('L', &[p]);
        self
    }
    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) -> &mut Self {
        self.cmd('C', &[c1, c2, p]);
        self
    }
    /// Elliptical arc with equal radii.
    pub fn arc_to(&mut self, radius: f64, large_arc: bool, sweep: bool, p: Point) -> &mut Self {
        let r = num(radius);
        let _ = write!(self.data, "A{r},{r},0,{},{},{},{}", large_arc as u8, sweep as u8, num(p.x), num(p.y));
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.data.push('Z');
        self
    }
    pub fn is_empty(&self) -> bool { self.data.is_empty() }
    pub fn finish(self) -> String { self.data }

    fn cmd(&mut self, c: char, pts: &[Point]) {
        self.data.push(c);
        for (i, p) in pts.iter().enumerate() {
            if i > 0 {
                self.data.push(',');
            }
            let _ = write!(self.data, "{},{}", num(p.x), num(p.y));
        }
    }
}

/// Round to three decimals and drop negative zero so output is stable.
fn num(v: f64) -> f64 {
    let r = (v * 1000.0).round() / 1000.0;
    if r == 0.0 { 0.0 } else { r }
}

/// Append the segments after `pts[0]` using `curve`. The caller has already moved to `pts[0]`.
pub fn trace_curve(path: &mut PathBuilder, pts: &[Point], curve: Curve) {
    if pts.len() < 2 {
        return;
    }
    match curve {
        Curve::Linear => pts[1..].iter().for_each(|p| {
            path.line_to(*p);
        }),
        Curve::Step => {
            for w in pts.windows(2) {
                let mid = (w[0].x + w[1].x) * 0.5;
                path.line_to(Point::new(mid, w[0].y)).line_to(Point::new(mid, w[1].y)).line_to(w[1]);
            }
        }
        Curve::Monotone if pts.len() > 2 => {
            let m = monotone_tangents(pts);
            for i in 0..pts.len() - 1 {
                let (a, b) = (pts[i], pts[i + 1]);
                let dx = (b.x - a.x) / 3.0;
                path.cubic_to(
                    Point::new(a.x + dx, a.y + dx * m[i]),
                    Point::new(b.x - dx, b.y - dx * m[i + 1]),
                    b,
                );
            }
        }
        Curve::Natural if pts.len() > 2 => {
            let xs: Vec<f64> = pts.iter().map(|p| p.x).collect();
            let ys: Vec<f64> = pts.iter().map(|p| p.y).collect();
            let (ax, bx) = natural_control_points(&xs);
            let (ay, by) = natural_control_points(&ys);
            for i in 0..pts.len() - 1 {
                path.cubic_to(Point::new(ax[i], ay[i]), Point::new(bx[i], by[i]), pts[i + 1]);
            }
        }
        // Two points: both cubic curves reduce to a straight segment.
        Curve::Monotone | Curve::Natural => {
            path.line_to(pts[1]);
        }
    }
}

fn monotone_tangents(pts: &[Point]) -> Vec<f64> {
    let n = pts.len();
    let h: Vec<f64> = pts.windows(2).map(|w| w[1].x - w[0].x).collect();
    let d: Vec<f64> = pts
        .windows(2)
        .zip(&h)
        .map(|(w, h)| if *h != 0.0 { (w[1].y - w[0].y) / h } else { 0.0 })
        .collect();

    let sign = |v: f64| if v < 0.0 { -1.0 } else { 1.0 };
    let mut m = vec![0.0; n];
    for i in 1..n - 1 {
        let (h0, h1, s0, s1) = (h[i - 1], h[i], d[i - 1], d[i]);
        let p = if h0 + h1 != 0.0 { (s0 * h1 + s1 * h0) / (h0 + h1) } else { 0.0 };
        let t = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
        m[i] = if t.is_finite() { t } else { 0.0 };
    }
    m[0] = (3.0 * d[0] - m[1]) / 2.0;
    m[n - 1] = (3.0 * d[n - 2] - m[n - 2]) / 2.0;
    m
}

/// First and second Bezier control points per segment of a natural cubic spline
/// through `x` (one coordinate at a time). Requires at least three values.
fn natural_control_points(x: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = x.len() - 1;
    let mut a = vec![0.0; n];
    let mut b = vec![0.0; n];
    let mut r = vec![0.0; n];
    b[0] = 2.0;
    r[0] = x[0] + 2.0 * x[1];
    for i in 1..n - 1 {
        a[i] = 1.0;
        b[i] = 4.0;
        r[i] = 4.0 * x[i] + 2.0 * x[i + 1];
    }
    a[n - 1] = 2.0;
    b[n - 1] = 7.0;
    r[n - 1] = 8.0 * x[n - 1] + x[n];
    // Thomas algorithm: forward sweep, then back substitution.
    for i in 1..n {
        let m = a[i] / b[i - 1];
        b[i] -= m;
        r[i] -= m * r[i - 1];
    }
    a[n - 1] = r[n - 1] / b[n - 1];
    for i in (0..n - 1).rev() {
        a[i] = (r[i] - a[i + 1]) / b[i];
    }
    b[n - 1] = (x[n] + a[n - 1]) / 2.0;
    for i in 0..n - 1 {
        b[i] = 2.0 * x[i + 1] - a[i + 1];
    }
    (a, b)
}

/// Line path through `pts`, or `None` for fewer than two points.
pub fn line_path(pts: &[Point], curve: Curve) -> Option<String> {
    let first = *pts.first()?;
    if pts.len() < 2 {
        return None;
    }
    let mut path = PathBuilder::new();
    path.move_to(first);
    trace_curve(&mut path, pts, curve);
    Some(path.finish())
}

/// Closed area between the curve through `pts` and the horizontal `baseline`.
pub fn area_path(pts: &[Point], baseline: f64, curve: Curve) -> Option<String> {
    let (first, last) = (*pts.first()?, *pts.last()?);
    if pts.len() < 2 {
        return None;
    }
    let mut path = PathBuilder::new();
    path.move_to(first);
    trace_curve(&mut path, pts, curve);
    path.line_to(Point::new(last.x, baseline)).line_to(Point::new(first.x, baseline)).close();
    Some(path.finish())
}

/// Pixel y of the area baseline: the zero line when zero is in the y domain,
/// otherwise the bottom of the plot.
pub fn baseline_y(y_scale: &LinearScale, plot: &Rect) -> f64 {
    if y_scale.domain().contains(0.0) { y_scale.scale(0.0) } else { plot.bottom }
}

/// Position every point of `series` and build its line/area paths.
pub fn series_geometry(
    series: &Series,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
    plot: &Rect,
    curve: Curve,
) -> SeriesGeometry {
    let markers: Vec<PositionedPoint> = series
        .points
        .iter()
        .map(|p| PositionedPoint {
            point_id: p.id.clone(),
            series_index: series.series_index,
            x: x_scale.scale(p.x),
            y: y_scale.scale(p.y),
        })
        .collect();
    let pts: Vec<Point> = markers.iter().map(PositionedPoint::position).collect();
    let baseline = baseline_y(y_scale, plot);
    SeriesGeometry {
        series_id: series.id.clone(),
        series_index: series.series_index,
        color: series.color.clone(),
        line_path: line_path(&pts, curve),
        area_path: area_path(&pts, baseline, curve),
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(f64, f64)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn linear_line_and_area() {
        let p = pts(&[(0.0, 10.0), (5.0, 0.0), (10.0, 5.5)]);
        assert_eq!(line_path(&p, Curve::Linear).unwrap(), "M0,10L5,0L10,5.5");
        assert_eq!(area_path(&p, 20.0, Curve::Linear).unwrap(), "M0,10L5,0L10,5.5L10,20L0,20Z");
    }

    #[test]
    fn fewer_than_two_points_draw_nothing() {
        assert!(line_path(&[], Curve::Linear).is_none());
        assert!(area_path(&pts(&[(1.0, 1.0)]), 0.0, Curve::Monotone).is_none());
    }

    #[test]
    fn step_changes_halfway() {
        let p = pts(&[(0.0, 0.0), (10.0, 4.0)]);
        assert_eq!(line_path(&p, Curve::Step).unwrap(), "M0,0L5,0L5,4L10,4");
    }

    #[test]
    fn monotone_keeps_flat_segments_flat() {
        let p = pts(&[(0.0, 5.0), (1.0, 5.0), (2.0, 8.0)]);
        let path = line_path(&p, Curve::Monotone).unwrap();
        // First segment is flat: both control points share y = 5.
        assert!(path.starts_with("M0,5C0.333,5,0.667,5,1,5C"), "{path}");
    }

    #[test]
    fn natural_spline_passes_through_points() {
        let p = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let path = line_path(&p, Curve::Natural).unwrap();
        assert!(path.contains(",1,1C"), "{path}");
        assert!(path.ends_with(",2,0"), "{path}");
    }

    #[test]
    fn two_point_curves_degrade_to_lines() {
        let p = pts(&[(0.0, 0.0), (4.0, 4.0)]);
        assert_eq!(line_path(&p, Curve::Natural).unwrap(), "M0,0L4,4");
        assert_eq!(line_path(&p, Curve::Monotone).unwrap(), "M0,0L4,4");
    }
}
