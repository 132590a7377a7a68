// File: crates/chart-geometry/src/chart.rs
// Summary: Area and pie chart roots. Each build produces one immutable model that every
//          sub-view (header, graph, legend, data table, tooltip) reads from directly.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::axis::{value_ticks, Tick};
use crate::error::{ChartError, Result};
use crate::format::{format_number, format_percent, humanize_key};
use crate::geometry::{Point, Size};
use crate::grid::select_points_for_ticks;
use crate::hit::{nearest_slice, slice_at, HitTester, PointHit, PointerEvent};
use crate::path::{series_geometry, Curve, SeriesGeometry};
use crate::pie::{build_slices, layout_arcs, resolve_radii, ArcGeometry, ArcLayout, PieData, PieSort, RadiusSpec, Slice};
use crate::scale::LinearScale;
use crate::series::{build_series, ChartData, DataPoint, FormatContext, PointFormatter, SeriesSpec, SortPoints};
use crate::tooltip::{place_tooltip, PlacementOptions, TooltipPlacement};
use crate::types::{Insets, Record, DEFAULT_X_TICK_COUNT, DEFAULT_Y_TICK_COUNT};
use crate::view::{Measure, PlotLayout};

/// Named header slots. Replaces scanning children for title/description/actions markers.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ChartSlots {
    pub title: Option<String>,
    pub description: Option<String>,
    pub actions: Vec<String>,
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AreaChartConfig {
    pub data: Vec<Record>,
    /// Field holding the x/category value. Without it every point uses its record index.
    pub x_key: Option<String>,
    /// Field holding the primary series' value.
    pub y_key: String,
    /// Field holding a display name for each record.
    pub name_key: Option<String>,
    pub series_id: Option<String>,
    pub label: Option<String>,
    pub color: Option<String>,
    /// Additional overlay series.
    pub series: Vec<SeriesSpec>,
    pub sort_points: SortPoints,
    pub palette: Vec<String>,
    pub x_label: Option<String>,
    pub x_tick_count: usize,
    pub y_tick_count: usize,
    pub curve: Curve,
    pub insets: Insets,
    pub slots: ChartSlots,
    #[serde(skip)]
    pub value_formatter: Option<PointFormatter>,
    /// x label text for ticks, tooltips and ARIA labels.
    #[serde(skip)]
    pub label_formatter: Option<PointFormatter>,
}

impl Default for AreaChartConfig {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            x_key: None,
            y_key: String::new(),
            name_key: None,
            series_id: None,
            label: None,
            color: None,
            series: Vec::new(),
            sort_points: SortPoints::default(),
            palette: Vec::new(),
            x_label: None,
            x_tick_count: DEFAULT_X_TICK_COUNT,
            y_tick_count: DEFAULT_Y_TICK_COUNT,
            curve: Curve::default(),
            insets: Insets::default(),
            slots: ChartSlots::default(),
            value_formatter: None,
            label_formatter: None,
        }
    }
}

impl AreaChartConfig {
    pub fn new(data: Vec<Record>, x_key: impl Into<String>, y_key: impl Into<String>) -> Self {
        Self { data, x_key: Some(x_key.into()), y_key: y_key.into(), ..Self::default() }
    }

    /// Parse a JSON configuration; closure-valued fields stay unset.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.y_key.trim().is_empty() {
            return Err(ChartError::MissingKey("yKey"));
        }
        if self.series.iter().any(|s| s.y_key.trim().is_empty()) {
            return Err(ChartError::MissingKey("series[].yKey"));
        }
        Ok(())
    }

    pub fn with_series(mut self, spec: SeriesSpec) -> Self {
        self.series.push(spec);
        self
    }
    pub fn with_sort(mut self, sort: SortPoints) -> Self {
        self.sort_points = sort;
        self
    }
    pub fn with_sort_by(self, cmp: impl Fn(&Record, &Record) -> Ordering + Send + Sync + 'static) -> Self {
        self.with_sort(SortPoints::Custom(crate::series::RecordComparator::new(cmp)))
    }
    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }
    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }
    pub fn with_value_formatter(
        mut self,
        f: impl Fn(&DataPoint, &FormatContext) -> String + Send + Sync + 'static,
    ) -> Self {
        self.value_formatter = Some(PointFormatter::new(f));
        self
    }
    pub fn with_label_formatter(
        mut self,
        f: impl Fn(&DataPoint, &FormatContext) -> String + Send + Sync + 'static,
    ) -> Self {
        self.label_formatter = Some(PointFormatter::new(f));
        self
    }
    pub fn with_slots(mut self, slots: ChartSlots) -> Self {
        self.slots = slots;
        self
    }

    /// The chart-level keys expressed as a series spec.
    pub fn primary_spec(&self) -> SeriesSpec {
        SeriesSpec {
            id: self.series_id.clone(),
            data: None,
            x_key: self.x_key.clone(),
            y_key: self.y_key.clone(),
            name_key: self.name_key.clone(),
            label: self.label.clone(),
            color: self.color.clone(),
            value_formatter: self.value_formatter.clone(),
        }
    }

    /// Explicit x label, else the humanised x key, else `Point`.
    pub fn x_axis_label(&self) -> String {
        self.x_label
            .clone()
            .or_else(|| self.x_key.as_deref().map(humanize_key))
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "Point".to_string())
    }
}

/// Area/line chart root.
#[derive(Clone, Debug)]
pub struct AreaChart {
    config: AreaChartConfig,
}

impl AreaChart {
    pub fn new(config: AreaChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AreaChartConfig {
        &self.config
    }

    /// Run the whole pipeline for the container `measure` reports.
    pub fn build(&self, measure: &impl Measure) -> ChartModel {
        let (layout, needs_remeasure) = PlotLayout::measure(measure, self.config.insets);
        let data = build_series(&self.config);
        let x_scale = LinearScale::new(data.x_domain, layout.x_range());
        let y_scale = LinearScale::new(data.y_domain, layout.y_range());

        let geometry: Vec<SeriesGeometry> = data
            .series
            .iter()
            .map(|s| series_geometry(s, &x_scale, &y_scale, &layout.plot, self.config.curve))
            .collect();
        let y_ticks = value_ticks(&y_scale, self.config.y_tick_count, format_number);

        let mut model = ChartModel {
            data,
            layout,
            x_scale,
            y_scale,
            x_ticks: Vec::new(),
            y_ticks,
            geometry,
            slots: self.config.slots.clone(),
            label_formatter: self.config.label_formatter.clone(),
            needs_remeasure,
        };
        model.x_ticks = model.label_ticks(self.config.x_tick_count);
        debug!(
            series = model.data.series.len(),
            points = model.data.points().count(),
            x_ticks = model.x_ticks.len(),
            y_ticks = model.y_ticks.len(),
            "built area chart"
        );
        model
    }
}

/// Everything one render of an area chart needs, computed once per build.
#[derive(Clone, Debug)]
pub struct ChartModel {
    pub data: ChartData,
    pub layout: PlotLayout,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    pub geometry: Vec<SeriesGeometry>,
    pub slots: ChartSlots,
    label_formatter: Option<PointFormatter>,
    /// The container had no size yet; build again on the next frame.
    pub needs_remeasure: bool,
}

impl ChartModel {
    /// Show the "insufficient data" state instead of the graph.
    pub fn is_empty(&self) -> bool {
        self.data.is_insufficient()
    }

    fn label_ticks(&self, count: usize) -> Vec<Tick> {
        let mut points: Vec<&DataPoint> = self.data.points().collect();
        points.sort_by(|a, b| a.x.total_cmp(&b.x));
        let ordered: Vec<DataPoint> = points.into_iter().cloned().collect();
        select_points_for_ticks(&ordered, count)
            .into_iter()
            .map(|p| Tick { value: p.x, position: self.x_scale.scale(p.x), label: self.point_label(p) })
            .collect()
    }

    fn context_for(&self, point: &DataPoint) -> FormatContext {
        let total = self.data.series_of(point).map_or(0.0, |s| s.total);
        FormatContext { total, domain: self.data.y_domain }
    }

    /// x label text of `point`.
    pub fn point_label(&self, point: &DataPoint) -> String {
        match &self.label_formatter {
            Some(f) => f.format(point, &self.context_for(point)),
            None => point.label.clone(),
        }
    }

    /// Value text of `point` through its series formatter.
    pub fn format_value(&self, point: &DataPoint) -> String {
        match self.data.series_of(point) {
            Some(series) => series.format_value(point, self.data.y_domain),
            None => format_number(point.value),
        }
    }

    /// Label of the chart image: the title slot, else a generic name.
    pub fn aria_label(&self) -> String {
        self.slots.title.clone().unwrap_or_else(|| "Area chart".to_string())
    }

    /// `"<series>, <x label>: <value>"` for the point button.
    pub fn point_aria_label(&self, point_id: &str) -> Option<String> {
        let point = self.data.point(point_id)?;
        let series = self.data.series_of(point)?;
        Some(format!("{}, {}: {}", series.label, self.point_label(point), self.format_value(point)))
    }

    /// Pixel position of a point's marker.
    pub fn anchor_of(&self, point_id: &str) -> Option<Point> {
        self.geometry
            .iter()
            .flat_map(|g| g.markers.iter())
            .find(|m| m.point_id == point_id)
            .map(|m| m.position())
    }

    pub fn hit_test(&self, event: PointerEvent) -> Option<PointHit> {
        if self.is_empty() {
            return None;
        }
        HitTester::new(&self.geometry, self.layout.plot, &self.x_scale).handle(event)
    }

    /// Where the tooltip for `point_id` goes given the tooltip's estimated size.
    pub fn tooltip_for(&self, point_id: &str, tooltip: Size) -> Option<TooltipPlacement> {
        let anchor = self.anchor_of(point_id)?;
        Some(place_tooltip(anchor, tooltip, self.layout.container, PlacementOptions::default()))
    }

    /// Ids of every point, for dropping tooltip targets after a data change.
    pub fn point_ids(&self) -> impl Iterator<Item = &str> {
        self.data.points().map(|p| p.id.as_str())
    }
}

/// Caller-supplied value text for a slice; receives the pie total.
#[derive(Clone)]
pub struct SliceFormatter(Arc<dyn Fn(&Slice, f64) -> String + Send + Sync>);

impl SliceFormatter {
    pub fn new(f: impl Fn(&Slice, f64) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
}

impl fmt::Debug for SliceFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SliceFormatter(..)")
    }
}

#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PieChartConfig {
    pub data: Vec<Record>,
    pub value_key: String,
    pub name_key: Option<String>,
    /// Field holding an explicit per-slice colour.
    pub color_key: Option<String>,
    pub palette: Vec<String>,
    pub inner_radius: RadiusSpec,
    pub outer_radius: RadiusSpec,
    /// Gap between slices, radians.
    pub pad_angle: f64,
    pub corner_radius: f64,
    pub sort: PieSort,
    /// Space kept free around the pie, pixels.
    pub padding: f64,
    pub slots: ChartSlots,
    #[serde(skip)]
    pub value_formatter: Option<SliceFormatter>,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            value_key: String::new(),
            name_key: None,
            color_key: None,
            palette: Vec::new(),
            inner_radius: RadiusSpec::Percent(0.0),
            outer_radius: RadiusSpec::Percent(1.0),
            pad_angle: 0.0,
            corner_radius: 0.0,
            sort: PieSort::None,
            padding: 8.0,
            slots: ChartSlots::default(),
            value_formatter: None,
        }
    }
}

impl PieChartConfig {
    pub fn new(data: Vec<Record>, name_key: impl Into<String>, value_key: impl Into<String>) -> Self {
        Self { data, name_key: Some(name_key.into()), value_key: value_key.into(), ..Self::default() }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.value_key.trim().is_empty() {
            return Err(ChartError::MissingKey("valueKey"));
        }
        Ok(())
    }

    /// Donut with the given inner/outer radii.
    pub fn with_radii(mut self, inner: RadiusSpec, outer: RadiusSpec) -> Self {
        self.inner_radius = inner;
        self.outer_radius = outer;
        self
    }
    pub fn with_pad_angle(mut self, radians: f64) -> Self {
        self.pad_angle = radians;
        self
    }
    pub fn with_corner_radius(mut self, px: f64) -> Self {
        self.corner_radius = px;
        self
    }
    pub fn with_sort(mut self, sort: PieSort) -> Self {
        self.sort = sort;
        self
    }
    pub fn with_value_formatter(mut self, f: impl Fn(&Slice, f64) -> String + Send + Sync + 'static) -> Self {
        self.value_formatter = Some(SliceFormatter::new(f));
        self
    }
}

/// Pie/donut chart root.
#[derive(Clone, Debug)]
pub struct PieChart {
    config: PieChartConfig,
}

impl PieChart {
    pub fn new(config: PieChartConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, measure: &impl Measure) -> PieModel {
        let c = &self.config;
        let (layout, needs_remeasure) = PlotLayout::measure(measure, Insets::default());
        let container = layout.container;
        let center = Point::new(container.width * 0.5, container.height * 0.5);
        let available = (container.width.min(container.height) * 0.5 - c.padding).max(0.0);
        let (inner_radius, outer_radius) = resolve_radii(available, c.inner_radius, c.outer_radius);

        let data = build_slices(&c.data, &c.value_key, c.name_key.as_deref(), c.color_key.as_deref(), &c.palette);
        let arcs = layout_arcs(
            &data.slices,
            &ArcLayout {
                center,
                inner_radius,
                outer_radius,
                pad_angle: c.pad_angle,
                corner_radius: c.corner_radius,
                sort: c.sort,
            },
        );
        debug!(slices = data.slices.len(), total = data.total, inner_radius, outer_radius, "built pie chart");
        PieModel {
            data,
            arcs,
            center,
            inner_radius,
            outer_radius,
            container,
            slots: c.slots.clone(),
            value_formatter: c.value_formatter.clone(),
            needs_remeasure,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PieModel {
    pub data: PieData,
    /// One arc per slice, in slice order.
    pub arcs: Vec<ArcGeometry>,
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub container: Size,
    pub slots: ChartSlots,
    value_formatter: Option<SliceFormatter>,
    pub needs_remeasure: bool,
}

impl PieModel {
    pub fn is_empty(&self) -> bool {
        !(self.data.total > 0.0)
    }

    pub fn arc(&self, slice_id: &str) -> Option<&ArcGeometry> {
        self.arcs.iter().find(|a| a.slice_id == slice_id)
    }

    pub fn format_value(&self, slice: &Slice) -> String {
        match &self.value_formatter {
            Some(f) => (f.0)(slice, self.data.total),
            None => format_number(slice.value),
        }
    }

    pub fn aria_label(&self) -> String {
        self.slots.title.clone().unwrap_or_else(|| "Pie chart".to_string())
    }

    /// `"<label>: <value> (<percent>)"` for the slice button.
    pub fn slice_aria_label(&self, slice_id: &str) -> Option<String> {
        let slice = self.data.slice(slice_id)?;
        Some(format!("{}: {} ({})", slice.label, self.format_value(slice), format_percent(slice.percentage)))
    }

    /// Slice directly under `pointer`.
    pub fn slice_at(&self, pointer: Point) -> Option<&Slice> {
        let arc = slice_at(&self.arcs, self.center, pointer)?;
        self.data.slice(&arc.slice_id)
    }

    /// Slice under `pointer`, or the angularly closest one inside the outer radius.
    pub fn nearest_slice(&self, pointer: Point) -> Option<&Slice> {
        let arc = nearest_slice(&self.arcs, self.center, pointer)?;
        self.data.slice(&arc.slice_id)
    }

    /// Tooltip placement anchored at the slice's centroid.
    pub fn tooltip_for(&self, slice_id: &str, tooltip: Size) -> Option<TooltipPlacement> {
        let anchor = self.arc(slice_id)?.centroid(self.center);
        Some(place_tooltip(anchor, tooltip, self.container, PlacementOptions::default()))
    }

    pub fn slice_ids(&self) -> impl Iterator<Item = &str> {
        self.data.slices.iter().map(|s| s.id.as_str())
    }
}
