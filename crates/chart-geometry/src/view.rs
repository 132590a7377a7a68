// File: crates/chart-geometry/src/view.rs
// Summary: Measurement seam (container size in, plot layout out) with zero-size retry.

use tracing::debug;

use crate::geometry::{Rect, Size};
use crate::types::{Insets, MIN_CONTAINER_SIZE};

/// Source of the container's current content-box size (a DOM node, a window, a test fixture).
pub trait Measure {
    fn measure(&self) -> Size;
}

impl Measure for Size {
    fn measure(&self) -> Size {
        *self
    }
}

impl<F: Fn() -> Size> Measure for F {
    fn measure(&self) -> Size {
        self()
    }
}

/// Outcome of one measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Measured {
    Ready(Size),
    /// Nothing laid out yet: lay out with the fallback size and measure again next frame.
    Retry(Size),
}

impl Measured {
    pub fn size(&self) -> Size {
        match *self {
            Measured::Ready(s) | Measured::Retry(s) => s,
        }
    }
    pub fn needs_retry(&self) -> bool {
        matches!(self, Measured::Retry(_))
    }
}

/// Accept a measured size, or substitute [`MIN_CONTAINER_SIZE`] when it has no area.
pub fn resolve_container(measured: Size) -> Measured {
    if measured.is_empty() || !measured.width.is_finite() || !measured.height.is_finite() {
        debug!(?measured, "container not measurable yet; using fallback size");
        Measured::Retry(MIN_CONTAINER_SIZE)
    } else {
        Measured::Ready(measured)
    }
}

/// Container plus the plot rectangle inside its insets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    pub container: Size,
    pub plot: Rect,
}

impl PlotLayout {
    /// Plot area is the container minus `insets`, never narrower or shorter than one pixel.
    pub fn new(container: Size, insets: Insets) -> Self {
        let width = (container.width - insets.hsum()).max(1.0);
        let height = (container.height - insets.vsum()).max(1.0);
        Self { container, plot: Rect::from_ltwh(insets.left, insets.top, width, height) }
    }

    /// Measure `source` and lay out; the flag reports whether a retry is due.
    pub fn measure(source: &impl Measure, insets: Insets) -> (Self, bool) {
        let measured = resolve_container(source.measure());
        (Self::new(measured.size(), insets), measured.needs_retry())
    }

    /// Horizontal pixel range for an x scale.
    pub fn x_range(&self) -> (f64, f64) {
        (self.plot.left, self.plot.right)
    }

    /// Vertical pixel range for a y scale; larger values map higher on screen.
    pub fn y_range(&self) -> (f64, f64) {
        (self.plot.bottom, self.plot.top)
    }
}
