// File: crates/chart-geometry/src/series.rs
// Summary: Series builder: raw records + key accessors -> normalized, sorted, coloured point series.
// Notes:
// - A point's `index` is the record's position in its input array, assigned before
//   non-numeric values are filtered out. Category x values fall back to that index,
//   so a dropped record leaves a gap on the x axis.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use crate::axis::align_domain_to_nice_values;
use crate::chart::AreaChartConfig;
use crate::format::{format_number, humanize_key, value_text};
use crate::scale::Domain;
use crate::theme::resolve_color;
use crate::types::Record;

/// One plotted value: one per (series, record) pair whose value parsed as a finite number.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPoint {
    pub id: String,
    pub series_id: String,
    pub series_index: usize,
    /// Position of the source record in its input array.
    pub index: usize,
    pub x: f64,
    pub x_raw: Value,
    pub y: f64,
    pub label: String,
    pub value: f64,
}

/// What a formatter knows beyond the point itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormatContext {
    /// Sum of the series' values.
    pub total: f64,
    /// Value-axis domain after alignment.
    pub domain: Domain,
}

/// Caller-supplied text for a point's value or label.
#[derive(Clone)]
pub struct PointFormatter(Arc<dyn Fn(&DataPoint, &FormatContext) -> String + Send + Sync>);

impl PointFormatter {
    pub fn new(f: impl Fn(&DataPoint, &FormatContext) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
    pub fn format(&self, point: &DataPoint, ctx: &FormatContext) -> String {
        (self.0)(point, ctx)
    }
}

impl fmt::Debug for PointFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PointFormatter(..)")
    }
}

/// Ordering over raw records, for [`SortPoints::Custom`].
#[derive(Clone)]
pub struct RecordComparator(Arc<dyn Fn(&Record, &Record) -> Ordering + Send + Sync>);

impl RecordComparator {
    pub fn new(f: impl Fn(&Record, &Record) -> Ordering + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        (self.0)(a, b)
    }
}

impl fmt::Debug for RecordComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RecordComparator(..)")
    }
}

/// Point order within each series. Deserialises from a boolean.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(from = "bool")]
pub enum SortPoints {
    /// Input order.
    #[default]
    Insertion,
    /// Ascending by resolved x (stable).
    Ascending,
    /// Caller ordering over the source records (stable).
    Custom(RecordComparator),
}

impl From<bool> for SortPoints {
    fn from(ascending: bool) -> Self {
        if ascending { SortPoints::Ascending } else { SortPoints::Insertion }
    }
}

/// Overrides for one series. Unset fields inherit the chart-level value.
#[derive(Clone, Debug, Default, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesSpec {
    pub id: Option<String>,
    /// Separate dataset for this series.
    pub data: Option<Vec<Record>>,
    pub x_key: Option<String>,
    pub y_key: String,
    pub name_key: Option<String>,
    pub label: Option<String>,
    pub color: Option<String>,
    #[serde(skip)]
    pub value_formatter: Option<PointFormatter>,
}

impl SeriesSpec {
    pub fn new(y_key: impl Into<String>) -> Self {
        Self { y_key: y_key.into(), ..Self::default() }
    }
    pub fn with_data(mut self, data: Vec<Record>) -> Self {
        self.data = Some(data);
        self
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Clone, Debug)]
pub struct Series {
    pub id: String,
    pub series_index: usize,
    pub points: Vec<DataPoint>,
    /// Sum of point values.
    pub total: f64,
    pub label: String,
    /// Value-axis label, derived from the y key.
    pub value_label: String,
    pub color: String,
    pub value_formatter: Option<PointFormatter>,
}

impl Series {
    /// Value text for `point` through the series formatter, or the default number format.
    pub fn format_value(&self, point: &DataPoint, y_domain: Domain) -> String {
        match &self.value_formatter {
            Some(f) => f.format(point, &FormatContext { total: self.total, domain: y_domain }),
            None => format_number(point.value),
        }
    }
}

/// All series of one chart plus their combined domains.
#[derive(Clone, Debug)]
pub struct ChartData {
    pub series: Vec<Series>,
    pub x_domain: Domain,
    pub y_domain: Domain,
}

impl ChartData {
    pub fn points(&self) -> impl Iterator<Item = &DataPoint> {
        self.series.iter().flat_map(|s| s.points.iter())
    }

    pub fn point(&self, id: &str) -> Option<&DataPoint> {
        self.points().find(|p| p.id == id)
    }

    pub fn series_of(&self, point: &DataPoint) -> Option<&Series> {
        self.series.get(point.series_index)
    }

    /// Fewer than two usable points across the whole chart.
    pub fn is_insufficient(&self) -> bool {
        self.points().take(2).count() < 2
    }
}

/// Build every configured series (primary first, then overlays) and their domains.
pub fn build_series(config: &AreaChartConfig) -> ChartData {
    let mut specs = vec![config.primary_spec()];
    specs.extend(config.series.iter().cloned());

    let x_axis_label = config.x_axis_label();
    let mut used_ids = HashSet::new();
    let series: Vec<Series> = specs
        .iter()
        .enumerate()
        .map(|(series_index, spec)| {
            let mut id = spec.id.clone().unwrap_or_else(|| spec.y_key.clone());
            if !used_ids.insert(id.clone()) {
                id = format!("{id}-{series_index}");
                used_ids.insert(id.clone());
            }
            let records = spec.data.as_deref().unwrap_or(&config.data);
            let keys = Keys {
                x: spec.x_key.as_deref().or(config.x_key.as_deref()),
                y: &spec.y_key,
                name: spec.name_key.as_deref().or(config.name_key.as_deref()),
            };
            let points = build_points(records, &keys, &id, series_index, &x_axis_label, &config.sort_points);
            let total = points.iter().map(|p| p.value).sum();
            let value_label = humanize_key(&spec.y_key);
            Series {
                label: spec.label.clone().filter(|l| !l.trim().is_empty()).unwrap_or_else(|| value_label.clone()),
                value_label,
                color: resolve_color(spec.color.as_deref(), &config.palette, series_index),
                value_formatter: spec.value_formatter.clone(),
                id,
                series_index,
                points,
                total,
            }
        })
        .collect();

    let x_domain = x_domain_of(&series);
    let y_domain = y_domain_of(&series, config.y_tick_count);
    ChartData { series, x_domain, y_domain }
}

struct Keys<'a> {
    x: Option<&'a str>,
    y: &'a str,
    name: Option<&'a str>,
}

fn build_points(
    records: &[Record],
    keys: &Keys<'_>,
    series_id: &str,
    series_index: usize,
    x_axis_label: &str,
    sort: &SortPoints,
) -> Vec<DataPoint> {
    let mut kept: Vec<(&Record, DataPoint)> = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let y = record.get(keys.y).and_then(parse_number)?;
            let x_raw = keys.x.and_then(|k| record.get(k)).cloned().unwrap_or(Value::Null);
            let x = parse_x(&x_raw).unwrap_or(index as f64);
            let label = keys
                .name
                .and_then(|k| record.get(k))
                .and_then(value_text)
                .or_else(|| value_text(&x_raw))
                .unwrap_or_else(|| format!("{x_axis_label} {}", index + 1));
            let point = DataPoint {
                id: format!("{series_id}-{index}"),
                series_id: series_id.to_string(),
                series_index,
                index,
                x,
                x_raw,
                y,
                label,
                value: y,
            };
            Some((record, point))
        })
        .collect();

    let dropped = records.len() - kept.len();
    if dropped > 0 {
        debug!(series = series_id, dropped, "dropped records without a numeric value");
    }

    match sort {
        SortPoints::Insertion => {}
        SortPoints::Ascending => kept.sort_by(|a, b| a.1.x.total_cmp(&b.1.x)),
        SortPoints::Custom(cmp) => kept.sort_by(|a, b| cmp.compare(a.0, b.0)),
    }
    kept.into_iter().map(|(_, p)| p).collect()
}

/// Finite number from a JSON number or a numeric string; `None` otherwise.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// x coordinate for a raw field: number, numeric string, then date/date-time
/// string (milliseconds since the Unix epoch, UTC). `None` means "use the index".
pub fn parse_x(value: &Value) -> Option<f64> {
    if let Some(n) = parse_number(value) {
        return Some(n);
    }
    let s = value.as_str()?.trim();
    parse_temporal(s)
}

fn parse_temporal(s: &str) -> Option<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis() as f64);
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis() as f64)
}

/// `[min x, max x]` over all series, widened by 1 on each side when degenerate.
/// Empty input yields `[0, 1]`.
pub fn x_domain_of(series: &[Series]) -> Domain {
    Domain::from_values(series.iter().flat_map(|s| s.points.iter().map(|p| p.x)))
        .map(|d| d.widen_if_degenerate(1.0))
        .unwrap_or(Domain::new(0.0, 1.0))
}

/// Zero-anchored y domain, padded and aligned to nice values.
pub fn y_domain_of(series: &[Series], tick_count: usize) -> Domain {
    let raw = Domain::from_values(series.iter().flat_map(|s| s.points.iter().map(|p| p.y)))
        .unwrap_or(Domain::new(0.0, 0.0));
    let zeroed = Domain::new(raw.min.min(0.0), raw.max.max(0.0));
    align_domain_to_nice_values(pad_value_domain(zeroed), tick_count)
}

/// Pad a zero-anchored domain by 10% of its range on the sides away from zero.
/// A zero-width domain pads by 10% of its magnitude, or by 1 when that is zero too.
pub fn pad_value_domain(domain: Domain) -> Domain {
    let (min, max) = domain.ordered();
    let range = max - min;
    let pad = if range > 0.0 {
        range * 0.1
    } else {
        let magnitude = min.abs().max(max.abs());
        if magnitude > 0.0 { magnitude * 0.1 } else { 1.0 }
    };
    let lo = if min < 0.0 { min - pad } else { min };
    let hi = if max > 0.0 || (min >= 0.0 && range == 0.0) { max + pad } else { max };
    Domain::new(lo, hi)
}
