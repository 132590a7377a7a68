// File: crates/chart-geometry/src/hit.rs
// Summary: Pointer hit testing: nearest point by x for Cartesian charts, slice lookup for pies.

use std::f64::consts::TAU;

use crate::geometry::{Point, Rect};
use crate::path::{PositionedPoint, SeriesGeometry};
use crate::pie::ArcGeometry;
use crate::scale::LinearScale;

/// Pointer input, in container-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Move(Point),
    /// Touch has no hover; a touch start runs the same lookup as a move.
    TouchStart(Point),
    Leave,
}

/// Result of a Cartesian hit test.
#[derive(Clone, Debug, PartialEq)]
pub struct PointHit {
    pub point: PositionedPoint,
    /// Pointer x converted back into data space.
    pub data_x: f64,
}

/// Marker with the smallest horizontal pixel distance to `pointer_x`. Ties keep
/// the earliest marker (series order, then point order).
pub fn nearest_point<'a, I>(markers: I, pointer_x: f64) -> Option<&'a PositionedPoint>
where
    I: IntoIterator<Item = &'a PositionedPoint>,
{
    let mut best: Option<(&PositionedPoint, f64)> = None;
    for m in markers {
        let d = (m.x - pointer_x).abs();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((m, d));
        }
    }
    best.map(|(m, _)| m)
}

/// Linear-scan hit tester over every series' markers.
pub struct HitTester<'a> {
    geometry: &'a [SeriesGeometry],
    plot: Rect,
    x_scale: &'a LinearScale,
}

impl<'a> HitTester<'a> {
    pub fn new(geometry: &'a [SeriesGeometry], plot: Rect, x_scale: &'a LinearScale) -> Self {
        Self { geometry, plot, x_scale }
    }

    /// Nearest marker for a pointer inside the plot area; `None` outside it or on leave.
    pub fn handle(&self, event: PointerEvent) -> Option<PointHit> {
        match event {
            PointerEvent::Move(p) | PointerEvent::TouchStart(p) => self.at(p),
            PointerEvent::Leave => None,
        }
    }

    pub fn at(&self, pointer: Point) -> Option<PointHit> {
        if !self.plot.contains(pointer) {
            return None;
        }
        let markers = self.geometry.iter().flat_map(|g| g.markers.iter());
        let point = nearest_point(markers, pointer.x)?.clone();
        Some(PointHit { point, data_x: self.x_scale.invert(pointer.x) })
    }
}

/// Clockwise angle from 12 o'clock of `p` around `center`, in `[0, TAU)`.
pub fn pointer_angle(center: Point, p: Point) -> f64 {
    let a = (p.x - center.x).atan2(center.y - p.y);
    if a < 0.0 { a + TAU } else { a }
}

/// Arc whose ring sector contains `pointer`.
pub fn slice_at<'a>(arcs: &'a [ArcGeometry], center: Point, pointer: Point) -> Option<&'a ArcGeometry> {
    let r = center.distance(pointer);
    let angle = pointer_angle(center, pointer);
    arcs.iter().find(|a| {
        r >= a.inner_radius && r <= a.outer_radius && angle >= a.start_angle && angle < a.end_angle
    })
}

/// Arc whose mid angle is closest to the pointer's angle, for pointers inside the
/// outer radius that fall in a padding gap or the donut hole.
pub fn nearest_slice<'a>(arcs: &'a [ArcGeometry], center: Point, pointer: Point) -> Option<&'a ArcGeometry> {
    if let Some(hit) = slice_at(arcs, center, pointer) {
        return Some(hit);
    }
    let outer = arcs.iter().map(|a| a.outer_radius).fold(0.0, f64::max);
    if center.distance(pointer) > outer {
        return None;
    }
    let angle = pointer_angle(center, pointer);
    let gap = |a: &ArcGeometry| {
        let d = (a.mid_angle() - angle).abs() % TAU;
        d.min(TAU - d)
    };
    arcs.iter().min_by(|a, b| gap(a).total_cmp(&gap(b)))
}

/// The single highlighted slice of a pie; every other slice is dimmed while one is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSlice {
    id: Option<String>,
}

impl ActiveSlice {
    pub fn activate(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }
    pub fn clear(&mut self) {
        self.id = None;
    }
    pub fn get(&self) -> Option<&str> {
        self.id.as_deref()
    }
    pub fn is_active(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }
    pub fn is_dimmed(&self, id: &str) -> bool {
        self.id.as_deref().is_some_and(|active| active != id)
    }
    /// Drop the active id when its slice no longer exists.
    pub fn retain<'a>(&mut self, mut ids: impl Iterator<Item = &'a str>) {
        if let Some(active) = self.id.as_deref() {
            if !ids.any(|id| id == active) {
                self.id = None;
            }
        }
    }
}
