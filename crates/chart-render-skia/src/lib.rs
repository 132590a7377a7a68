// File: crates/chart-render-skia/src/lib.rs
// Summary: Headless Skia raster backend. Feeds the path data built by chart-geometry to
//          Skia's SVG path parser and encodes the result as PNG bytes.

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::debug;

use chart_geometry::geometry::Size;
use chart_geometry::hit::ActiveSlice;
use chart_geometry::theme::{parse_hex_color, Rgba, Theme};
use chart_geometry::{ChartModel, PieModel, PointHit};

pub struct RenderOptions {
    pub theme: Theme,
    /// Tick labels use the platform default font; disable for byte-stable output.
    pub draw_labels: bool,
    pub draw_markers: bool,
    pub marker_radius: f32,
    pub line_width: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { theme: Theme::dark(), draw_labels: true, draw_markers: true, marker_radius: 3.0, line_width: 2.0 }
    }
}

pub struct SkiaRenderer {
    opts: RenderOptions,
}

impl SkiaRenderer {
    pub fn new(opts: RenderOptions) -> Self {
        Self { opts }
    }

    /// Area chart to PNG. `hover` draws the crosshair and the highlighted marker.
    pub fn render_area(&self, model: &ChartModel, hover: Option<&PointHit>) -> Result<Vec<u8>> {
        let mut surface = raster_surface(model.layout.container)?;
        let canvas = surface.canvas();
        let theme = &self.opts.theme;
        canvas.clear(color(theme.background));

        let plot = model.layout.plot;
        let (l, t, r, b) = (plot.left as f32, plot.top as f32, plot.right as f32, plot.bottom as f32);

        let mut grid = stroke_paint(theme.grid, 1.0);
        for tick in &model.y_ticks {
            let y = tick.position as f32;
            canvas.draw_line((l, y), (r, y), &grid);
        }
        grid.set_color(color(theme.axis_line));
        grid.set_stroke_width(1.5);
        canvas.draw_line((l, b), (r, b), &grid);
        canvas.draw_line((l, t), (l, b), &grid);

        if self.opts.draw_labels {
            self.draw_tick_labels(canvas, model);
        }
        if model.is_empty() {
            debug!("area chart has insufficient data; drawing frame only");
            return encode_png(&mut surface);
        }

        for g in &model.geometry {
            let base = series_color(&g.color);
            if let Some(d) = &g.area_path {
                let mut fill = skia::Paint::default();
                fill.set_anti_alias(true);
                fill.set_style(skia::paint::Style::Fill);
                fill.set_color(color(base.with_alpha(theme.area_fill_alpha)));
                canvas.draw_path(&svg_path(d)?, &fill);
            }
            if let Some(d) = &g.line_path {
                canvas.draw_path(&svg_path(d)?, &stroke_paint(base, self.opts.line_width));
            }
            if self.opts.draw_markers {
                let mut dot = skia::Paint::default();
                dot.set_anti_alias(true);
                dot.set_color(color(base));
                for m in &g.markers {
                    canvas.draw_circle((m.x as f32, m.y as f32), self.opts.marker_radius, &dot);
                }
            }
        }

        if let Some(hit) = hover {
            let x = hit.point.x as f32;
            canvas.draw_line((x, t), (x, b), &stroke_paint(theme.crosshair, 1.0));
            let ring = stroke_paint(theme.crosshair, 2.0);
            canvas.draw_circle((x, hit.point.y as f32), self.opts.marker_radius + 2.0, &ring);
        }

        encode_png(&mut surface)
    }

    /// Pie chart to PNG; slices other than the active one are dimmed.
    pub fn render_pie(&self, model: &PieModel, active: &ActiveSlice) -> Result<Vec<u8>> {
        let mut surface = raster_surface(model.container)?;
        let canvas = surface.canvas();
        let theme = &self.opts.theme;
        canvas.clear(color(theme.background));

        for (slice, arc) in model.data.slices.iter().zip(&model.arcs) {
            let mut base = series_color(&slice.color);
            if active.is_dimmed(&slice.id) {
                base = base.with_alpha(theme.dimmed_alpha);
            }
            let mut fill = skia::Paint::default();
            fill.set_anti_alias(true);
            fill.set_color(color(base));
            let mut path = svg_path(&arc.path)?;
            path.set_fill_type(skia::PathFillType::EvenOdd);
            canvas.draw_path(&path, &fill);
        }

        encode_png(&mut surface)
    }

    fn draw_tick_labels(&self, canvas: &skia::Canvas, model: &ChartModel) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_color(color(self.opts.theme.axis_label));
        let mut font = skia::Font::default();
        font.set_size(12.0);

        let plot = model.layout.plot;
        for tick in &model.y_ticks {
            canvas.draw_str(&tick.label, (4.0, tick.position as f32 + 4.0), &font, &paint);
        }
        for tick in &model.x_ticks {
            canvas.draw_str(&tick.label, (tick.position as f32 - 12.0, plot.bottom as f32 + 18.0), &font, &paint);
        }
    }
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn raster_surface(size: Size) -> Result<skia::Surface> {
    let dims = (size.width.round().max(1.0) as i32, size.height.round().max(1.0) as i32);
    skia::surfaces::raster_n32_premul(dims).ok_or_else(|| anyhow::anyhow!("failed to create raster surface {dims:?}"))
}

fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

fn svg_path(d: &str) -> Result<skia::Path> {
    skia::Path::from_svg(d).with_context(|| format!("invalid path data: {d}"))
}

fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

/// Series colours are CSS hex strings; anything else draws in mid grey.
fn series_color(hex: &str) -> Rgba {
    parse_hex_color(hex).unwrap_or(Rgba::rgb(128, 128, 128))
}

fn stroke_paint(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color(c));
    paint
}
