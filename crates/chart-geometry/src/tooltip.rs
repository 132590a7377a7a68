// File: crates/chart-geometry/src/tooltip.rs
// Summary: Tooltip quadrant placement with collision avoidance, size estimation and the
//          entering/visible/leaving state machine driven by an explicit clock.

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::geometry::{clamp, Point, Rect, Size};
use crate::types::{DEFAULT_TOOLTIP_SIZE, TOOLTIP_HIDE_DELAY, TOOLTIP_VIEWPORT_PADDING};

/// Side of the anchor the tooltip body sits on horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// Side of the anchor the tooltip body sits on vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

/// Top-left corner of the tooltip plus the quadrant it was placed in. The quadrant
/// sides pick the transform origin of the scale-in animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    pub x: f64,
    pub y: f64,
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl TooltipPlacement {
    pub fn rect(&self, size: Size) -> Rect {
        Rect::from_ltwh(self.x, self.y, size.width, size.height)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementOptions {
    /// Minimum gap to the container edges.
    pub padding: f64,
    /// Gap between anchor and tooltip body.
    pub offset: f64,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self { padding: TOOLTIP_VIEWPORT_PADDING, offset: 0.0 }
    }
}

const QUADRANTS: [(Horizontal, Vertical); 4] = [
    (Horizontal::Left, Vertical::Top),
    (Horizontal::Right, Vertical::Top),
    (Horizontal::Left, Vertical::Bottom),
    (Horizontal::Right, Vertical::Bottom),
];

/// Choose where a `size` tooltip goes for `anchor` inside a `container` of the given size.
///
/// Quadrants are tried in the order left-top, right-top, left-bottom, right-bottom.
/// A first pass rejects candidates that clamping pushed out of their quadrant; a
/// second pass only rejects candidates that cover the anchor. When both fail the
/// tooltip goes right/top where it fits (flipping to left/bottom) and is clamped.
pub fn place_tooltip(anchor: Point, size: Size, container: Size, opts: PlacementOptions) -> TooltipPlacement {
    for allow_overflow in [false, true] {
        for (h, v) in QUADRANTS {
            if let Some(p) = try_quadrant(anchor, size, container, opts, h, v, allow_overflow) {
                return p;
            }
        }
    }

    let h = if anchor.x + opts.offset + size.width <= container.width - opts.padding {
        Horizontal::Right
    } else {
        Horizontal::Left
    };
    let v = if anchor.y - opts.offset - size.height >= opts.padding { Vertical::Top } else { Vertical::Bottom };
    debug!(?h, ?v, "no quadrant clears the anchor; using fallback placement");
    let (x, y) = clamp_into(candidate(anchor, size, opts.offset, h, v), size, container, opts.padding);
    TooltipPlacement { x, y, horizontal: h, vertical: v }
}

fn candidate(anchor: Point, size: Size, offset: f64, h: Horizontal, v: Vertical) -> (f64, f64) {
    let x = match h {
        Horizontal::Left => anchor.x - size.width - offset,
        Horizontal::Right => anchor.x + offset,
    };
    let y = match v {
        Vertical::Top => anchor.y - size.height - offset,
        Vertical::Bottom => anchor.y + offset,
    };
    (x, y)
}

/// Clamp the top-left corner so the box stays `padding` away from every edge. A box
/// larger than the container pins to the leading padding.
fn clamp_into((x, y): (f64, f64), size: Size, container: Size, padding: f64) -> (f64, f64) {
    let max_x = (container.width - padding - size.width).max(padding);
    let max_y = (container.height - padding - size.height).max(padding);
    (clamp(x, padding, max_x), clamp(y, padding, max_y))
}

fn try_quadrant(
    anchor: Point,
    size: Size,
    container: Size,
    opts: PlacementOptions,
    h: Horizontal,
    v: Vertical,
    allow_overflow: bool,
) -> Option<TooltipPlacement> {
    let (x, y) = clamp_into(candidate(anchor, size, opts.offset, h, v), size, container, opts.padding);
    let rect = Rect::from_ltwh(x, y, size.width, size.height);
    if !allow_overflow {
        let left_ok = match h {
            Horizontal::Left => rect.right <= anchor.x,
            Horizontal::Right => rect.left >= anchor.x,
        };
        let top_ok = match v {
            Vertical::Top => rect.bottom <= anchor.y,
            Vertical::Bottom => rect.top >= anchor.y,
        };
        if !(left_ok && top_ok) {
            return None;
        }
    }
    if rect.covers(anchor) {
        return None;
    }
    Some(TooltipPlacement { x, y, horizontal: h, vertical: v })
}

/// Last measured tooltip size, with a default before the first measurement.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TooltipSizeEstimate {
    last: Option<Size>,
}

impl TooltipSizeEstimate {
    /// Record a measurement; empty sizes (not laid out yet) are ignored.
    pub fn record(&mut self, measured: Size) {
        if !measured.is_empty() {
            self.last = Some(measured);
        }
    }
    pub fn get(&self) -> Size {
        self.last.unwrap_or(DEFAULT_TOOLTIP_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TooltipPhase {
    Hidden,
    /// Mounted; the entrance animation starts on the next animation frame.
    Entering,
    Visible,
    /// Still shown; hides once `deadline` passes unless hovered again.
    Leaving { deadline: Instant },
}

/// Snapshot the renderer reads.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
    pub target: Option<String>,
    pub placement: Option<TooltipPlacement>,
    pub phase: TooltipPhase,
    /// Bumped whenever the entrance animation (re)starts.
    pub entrance: u64,
}

impl TooltipState {
    pub fn visible(&self) -> bool {
        !matches!(self.phase, TooltipPhase::Hidden)
    }
    pub fn entering(&self) -> bool {
        matches!(self.phase, TooltipPhase::Entering)
    }
}

/// Tooltip lifecycle for one chart. Timed calls take the current time so the debounce
/// is explicit; the most recent event always wins.
#[derive(Clone, Debug)]
pub struct TooltipController {
    state: TooltipState,
    hide_delay: Duration,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new(TOOLTIP_HIDE_DELAY)
    }
}

impl TooltipController {
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            state: TooltipState { target: None, placement: None, phase: TooltipPhase::Hidden, entrance: 0 },
            hide_delay,
        }
    }

    pub fn state(&self) -> &TooltipState {
        &self.state
    }

    /// Pointer/focus reached `target`. Cancels a pending hide. A tooltip still entering
    /// at the same position keeps its in-flight entrance.
    pub fn hover(&mut self, target: impl Into<String>, placement: TooltipPlacement) -> &TooltipState {
        let target = target.into();
        let (next, restart) = match self.state.phase {
            TooltipPhase::Hidden => (TooltipPhase::Entering, true),
            TooltipPhase::Entering => (TooltipPhase::Entering, self.state.placement != Some(placement)),
            TooltipPhase::Visible | TooltipPhase::Leaving { .. } => (TooltipPhase::Visible, false),
        };
        trace!(%target, from = ?self.state.phase, to = ?next, restart, "tooltip hover");
        let entrance = self.state.entrance + u64::from(restart);
        self.state = TooltipState { target: Some(target), placement: Some(placement), phase: next, entrance };
        &self.state
    }

    /// Animation frame after mounting: the entrance completes.
    pub fn animation_frame(&mut self) -> &TooltipState {
        if self.state.phase == TooltipPhase::Entering {
            self.state.phase = TooltipPhase::Visible;
        }
        &self.state
    }

    /// Pointer left: schedule the debounced hide.
    pub fn leave(&mut self, now: Instant) -> &TooltipState {
        if matches!(self.state.phase, TooltipPhase::Entering | TooltipPhase::Visible) {
            self.state.phase = TooltipPhase::Leaving { deadline: now + self.hide_delay };
        }
        &self.state
    }

    /// Fire the pending hide if its deadline passed.
    pub fn tick(&mut self, now: Instant) -> &TooltipState {
        if let TooltipPhase::Leaving { deadline } = self.state.phase {
            if now >= deadline {
                trace!("tooltip hidden after debounce");
                self.clear();
            }
        }
        &self.state
    }

    /// Data changed: hide immediately when the target no longer exists.
    pub fn retain_targets<'a>(&mut self, mut ids: impl Iterator<Item = &'a str>) -> &TooltipState {
        if let Some(target) = self.state.target.as_deref() {
            if !ids.any(|id| id == target) {
                self.clear();
            }
        }
        &self.state
    }

    /// Chart torn down: drop everything, including pending timers.
    pub fn teardown(&mut self) {
        self.clear();
    }

    /// Time of the pending hide, if any; lets a host schedule exactly one timer.
    pub fn pending_deadline(&self) -> Option<Instant> {
        match self.state.phase {
            TooltipPhase::Leaving { deadline } => Some(deadline),
            _ => None,
        }
    }

    fn clear(&mut self) {
        self.state = TooltipState { target: None, placement: None, phase: TooltipPhase::Hidden, entrance: self.state.entrance };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> TooltipPlacement {
        TooltipPlacement { x, y, horizontal: Horizontal::Left, vertical: Vertical::Top }
    }

    #[test]
    fn corner_anchor_goes_bottom_right() {
        let p = place_tooltip(Point::new(10.0, 10.0), Size::new(80.0, 40.0), Size::new(200.0, 200.0), PlacementOptions::default());
        assert_eq!((p.horizontal, p.vertical), (Horizontal::Right, Vertical::Bottom));
        assert_eq!((p.x, p.y), (10.0, 10.0));
    }

    #[test]
    fn first_quadrant_is_left_top() {
        let p = place_tooltip(Point::new(100.0, 100.0), Size::new(80.0, 40.0), Size::new(200.0, 200.0), PlacementOptions::default());
        assert_eq!((p.horizontal, p.vertical), (Horizontal::Left, Vertical::Top));
        assert_eq!((p.x, p.y), (20.0, 60.0));
    }

    #[test]
    fn oversized_tooltip_falls_back_and_clamps() {
        let p = place_tooltip(Point::new(50.0, 50.0), Size::new(300.0, 300.0), Size::new(100.0, 100.0), PlacementOptions::default());
        assert_eq!((p.x, p.y), (8.0, 8.0));
    }

    #[test]
    fn size_estimate_defaults_until_measured() {
        let mut est = TooltipSizeEstimate::default();
        assert_eq!(est.get(), DEFAULT_TOOLTIP_SIZE);
        est.record(Size::new(0.0, 10.0));
        assert_eq!(est.get(), DEFAULT_TOOLTIP_SIZE);
        est.record(Size::new(120.0, 48.0));
        assert_eq!(est.get(), Size::new(120.0, 48.0));
    }

    #[test]
    fn entering_then_visible() {
        let mut c = TooltipController::default();
        assert_eq!(c.hover("p1", at(1.0, 1.0)).entrance, 1);
        // Same position while entering: the in-flight entrance is reused.
        let s = c.hover("p2", at(1.0, 1.0));
        assert!(s.entering());
        assert_eq!(s.entrance, 1);
        assert_eq!(c.hover("p3", at(5.0, 1.0)).entrance, 2);
        c.hover("p2", at(1.0, 1.0));
        let s = c.animation_frame();
        assert_eq!(s.phase, TooltipPhase::Visible);
        assert_eq!(s.target.as_deref(), Some("p2"));
    }

    #[test]
    fn reenter_before_debounce_cancels_hide() {
        let t0 = Instant::now();
        let mut c = TooltipController::default();
        c.hover("p1", at(1.0, 1.0));
        c.animation_frame();
        c.leave(t0);
        assert_eq!(c.pending_deadline(), Some(t0 + TOOLTIP_HIDE_DELAY));
        c.hover("p1", at(1.0, 1.0));
        assert_eq!(c.tick(t0 + Duration::from_millis(500)).phase, TooltipPhase::Visible);
    }

    #[test]
    fn hide_fires_after_debounce() {
        let t0 = Instant::now();
        let mut c = TooltipController::default();
        c.hover("p1", at(1.0, 1.0));
        c.leave(t0);
        assert!(c.tick(t0 + Duration::from_millis(139)).visible());
        let s = c.tick(t0 + Duration::from_millis(140));
        assert!(!s.visible());
        assert_eq!(s.target, None);
    }

    #[test]
    fn vanished_target_clears() {
        let mut c = TooltipController::default();
        c.hover("p1", at(1.0, 1.0));
        assert!(c.retain_targets(["p1", "p2"].into_iter()).visible());
        assert!(!c.retain_targets(["p2"].into_iter()).visible());
    }
}
