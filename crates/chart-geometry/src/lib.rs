// File: crates/chart-geometry/src/lib.rs
// Summary: Core library entry point; exports the chart geometry and interaction API.

pub mod chart;
pub mod series;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;
pub mod format;
pub mod path;
pub mod pie;
pub mod hit;
pub mod tooltip;
pub mod error;

pub use chart::{AreaChart, AreaChartConfig, ChartModel, ChartSlots, PieChart, PieChartConfig, PieModel, SliceFormatter};
pub use series::{build_series, ChartData, DataPoint, FormatContext, PointFormatter, Series, SeriesSpec, SortPoints};
pub use axis::{align_domain_to_nice_values, generate_linear_ticks, nice_number, Tick};
pub use grid::select_points_for_ticks;
pub use scale::{linear_scale, Domain, LinearScale};
pub use view::{resolve_container, Measure, Measured, PlotLayout};
pub use theme::Theme;
pub use path::{Curve, PositionedPoint, SeriesGeometry};
pub use pie::{ArcGeometry, PieData, PieSort, RadiusSpec, Slice};
pub use hit::{ActiveSlice, HitTester, PointHit, PointerEvent};
pub use tooltip::{place_tooltip, TooltipController, TooltipPlacement, TooltipState};
pub use error::{ChartError, Result};
pub use types::Record;
