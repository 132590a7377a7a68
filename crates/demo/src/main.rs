// File: crates/demo/src/main.rs
// Summary: Demo loads CSV records (or a built-in sample), builds area and pie chart models,
//          logs ticks/domains/tooltip placement and renders both charts to PNGs.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chart_geometry::geometry::{Point, Size};
use chart_geometry::tooltip::TooltipSizeEstimate;
use chart_geometry::{
    ActiveSlice, AreaChart, AreaChartConfig, ChartSlots, PieChart, PieChartConfig, PointerEvent, RadiusSpec, Record,
    TooltipController,
};
use chart_render_skia::{RenderOptions, SkiaRenderer};
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SAMPLE_CSV: &str = "\
month,revenue,cost
Jan,120,80
Feb,135,90
Mar,n/a,95
Apr,160,100
May,148,110
Jun,190,120
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // chart-demo [data.csv] [config.json]; CHART_THEME=light|dark
    let mut args = std::env::args().skip(1);
    let csv_path = args.next().map(PathBuf::from);
    let config_path = args.next().map(PathBuf::from);

    let (headers, records) = match &csv_path {
        Some(p) => load_csv(std::fs::File::open(p).with_context(|| format!("opening {}", p.display()))?)
            .with_context(|| format!("failed to load CSV '{}'", p.display()))?,
        None => load_csv(SAMPLE_CSV.as_bytes()).context("parsing built-in sample")?,
    };
    info!(rows = records.len(), ?headers, "loaded records");
    if headers.len() < 2 {
        anyhow::bail!("need at least a category column and a value column; got {headers:?}");
    }

    let mut config = match &config_path {
        Some(p) => {
            let json = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            AreaChartConfig::from_json_str(&json).with_context(|| format!("invalid chart config {}", p.display()))?
        }
        None => AreaChartConfig::new(Vec::new(), headers[0].clone(), headers[1].clone()),
    };
    if config.data.is_empty() {
        config.data = records.clone();
    }
    if config_path.is_none() {
        for extra in &headers[2..] {
            config = config.with_series(chart_geometry::SeriesSpec::new(extra.clone()));
        }
        config = config.with_slots(ChartSlots { title: Some("Demo area chart".into()), ..ChartSlots::default() });
    }

    let container = Size::new(960.0, 540.0);
    let area = AreaChart::new(config.clone()).build(&container);
    info!(x_domain = ?area.data.x_domain, y_domain = ?area.data.y_domain, "domains");
    for s in &area.data.series {
        info!(series = %s.id, label = %s.label, points = s.points.len(), total = s.total, color = %s.color, "series");
    }
    info!(
        y_ticks = ?area.y_ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
        x_ticks = ?area.x_ticks.iter().map(|t| t.label.as_str()).collect::<Vec<_>>(),
        "ticks"
    );
    if area.is_empty() {
        warn!("fewer than two usable points; the chart shows its empty state");
    }

    // Simulated hover in the middle of the plot.
    let pointer = area.layout.plot.center();
    let hover = area.hit_test(PointerEvent::Move(pointer));
    let mut tooltip = TooltipController::default();
    let estimate = TooltipSizeEstimate::default();
    if let Some(hit) = &hover {
        if let Some(placement) = area.tooltip_for(&hit.point.point_id, estimate.get()) {
            tooltip.hover(hit.point.point_id.clone(), placement);
            tooltip.animation_frame();
            info!(
                point = %hit.point.point_id,
                aria = ?area.point_aria_label(&hit.point.point_id),
                ?placement,
                "tooltip"
            );
        }
    }
    tooltip.leave(Instant::now());
    info!(pending_hide = ?tooltip.pending_deadline(), "pointer left");

    let theme = chart_geometry::theme::find(&std::env::var("CHART_THEME").unwrap_or_default());
    let renderer = SkiaRenderer::new(RenderOptions { theme, ..RenderOptions::default() });
    let out_area = out_name_with(csv_path.as_deref(), "area");
    write_png(&out_area, &renderer.render_area(&area, hover.as_ref())?)?;

    // Pie of the first value column by category.
    let pie_config = PieChartConfig::new(records, headers[0].clone(), config.y_key.clone())
        .with_radii(RadiusSpec::Percent(0.55), RadiusSpec::Percent(1.0))
        .with_pad_angle(0.02)
        .with_corner_radius(4.0);
    let pie = PieChart::new(pie_config).build(&Size::new(480.0, 480.0));
    for slice in &pie.data.slices {
        info!(aria = ?pie.slice_aria_label(&slice.id), "slice");
    }
    let mut active = ActiveSlice::default();
    if let Some(slice) = pie.nearest_slice(Point::new(pie.center.x + 1.0, pie.center.y - pie.outer_radius * 0.8)) {
        active.activate(slice.id.clone());
    }
    let out_pie = out_name_with(csv_path.as_deref(), "pie");
    write_png(&out_pie, &renderer.render_pie(&pie, &active)?)?;

    Ok(())
}

/// Read CSV rows into records; numeric-looking cells become JSON numbers.
fn load_csv(reader: impl std::io::Read) -> Result<(Vec<String>, Vec<Record>)> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let mut record = Record::new();
        for (key, cell) in headers.iter().zip(rec.iter()) {
            record.insert(key.clone(), cell_value(cell));
        }
        out.push(record);
    }
    Ok((headers, out))
}

fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    match cell.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

/// Produce output file name like target/out/chart_<stem>_<suffix>.png
fn out_name_with(input: Option<&Path>, suffix: &str) -> PathBuf {
    let stem = input.and_then(|p| p.file_stem()).and_then(|s| s.to_str()).unwrap_or("sample");
    PathBuf::from("target/out").join(format!("chart_{stem}_{suffix}.png"))
}

fn write_png(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote");
    Ok(())
}
