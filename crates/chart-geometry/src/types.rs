// File: crates/chart-geometry/src/types.rs
// Summary: Shared types and constants (records, sizes, paddings, delays).

use std::time::Duration;

use crate::geometry::Size;

/// One input record: arbitrary keyed fields, as produced by JSON or CSV loaders.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Fallback container size used while the real one is not measurable yet.
pub const MIN_CONTAINER_SIZE: Size = Size { width: 320.0, height: 200.0 };

/// Tooltip size assumed before the first measurement.
pub const DEFAULT_TOOLTIP_SIZE: Size = Size { width: 160.0, height: 64.0 };

/// Gap kept between a tooltip and the container edge, in pixels.
pub const TOOLTIP_VIEWPORT_PADDING: f64 = 8.0;

/// Debounce between pointer-leave and the tooltip actually hiding.
pub const TOOLTIP_HIDE_DELAY: Duration = Duration::from_millis(140);

/// Default number of y-axis ticks.
pub const DEFAULT_Y_TICK_COUNT: usize = 5;

/// Default number of x-axis labels.
pub const DEFAULT_X_TICK_COUNT: usize = 6;

/// Plot margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    /// Create new insets; negative values are treated as zero.
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(48.0, 16.0, 16.0, 32.0)
    }
}
