//! Plotters backend: draw a [`Figure`] to **SVG** or **PNG**.
//!
//! - Output format from the file extension (`.svg` → SVG, anything else → bitmap)
//! - Subplots on an even grid; layout mode controls the spacing around each chart
//! - Axis inversion mirrors data inside the range and mirrors tick labels back
//! - Legend drawn inside each subplot from the labelled traces

pub mod adapter;
pub mod util;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontFamily, FontStyle};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::LayoutMode;
use crate::descriptor::Aspect;
use crate::error::{Error, Result};
use crate::figure::{AxisRange, Axes, Figure, Trace};

use adapter::{Chart, draw_markers, draw_polyline, stroke};
use util::{font_px, format_tick, rgba, viridis};

/// Environment variable naming a TrueType font file to render text with.
pub const FONT_ENV: &str = "LAZYPLOT_FONT";

/// Fallback fonts tried when `LAZYPLOT_FONT` is unset.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const BORDER_COLOR: RGBColor = RGBColor(204, 204, 204);

/// One-time registration of a "sans-serif" font for the `ab_glyph` text path,
/// which does not discover OS fonts on its own.
static INIT_FONTS: Once = Once::new();
static FONT_READY: AtomicBool = AtomicBool::new(false);

fn ensure_fonts_registered() -> bool {
    INIT_FONTS.call_once(|| {
        let candidates = std::env::var_os(FONT_ENV)
            .map(PathBuf::from)
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from));
        for path in candidates {
            let Ok(bytes) = std::fs::read(&path) else {
                continue;
            };
            // The registry keeps the font for the whole process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match plotters::style::register_font("sans-serif", FontStyle::Normal, bytes) {
                Ok(()) => {
                    log::debug!("registered font {}", path.display());
                    FONT_READY.store(true, Ordering::Release);
                    return;
                }
                Err(_) => log::warn!("{} is not a usable font", path.display()),
            }
        }
        log::warn!("no usable font found; set {FONT_ENV} to a .ttf file");
    });
    FONT_READY.load(Ordering::Acquire)
}

/// Whether a font for text rendering could be registered.
pub fn font_available() -> bool {
    ensure_fonts_registered()
}

pub(crate) fn render_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{e:?}"))
}

/// Pixels of spacing around each chart.
fn layout_margin(layout: LayoutMode) -> u32 {
    match layout {
        LayoutMode::Tight => 4,
        LayoutMode::Constrained => 12,
    }
}

/// Draw `figure` into `out_path`.
pub fn save_figure<P: AsRef<Path>>(figure: &Figure, out_path: P) -> Result<()> {
    check_ranges(figure)?;
    if !ensure_fonts_registered() {
        return Err(Error::Render(format!(
            "no font available for text rendering; set {FONT_ENV} to a TrueType font file"
        )));
    }
    let out_path = out_path.as_ref();
    if let Some(parent) = out_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let size = figure.size_px();

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(out_path, size).into_drawing_area();
        draw_figure(&root, figure)?;
    } else {
        let root = BitMapBackend::new(out_path, size).into_drawing_area();
        draw_figure(&root, figure)?;
    }
    log::debug!("wrote figure to {}", out_path.display());
    Ok(())
}

/// Plotters cannot lay out ticks over NaN, infinite, or overflowing ranges.
fn check_ranges(figure: &Figure) -> Result<()> {
    for axes in figure.subplots() {
        let (x, y) = (axes.x_range(), axes.y_range());
        if !(x.is_finite() && y.is_finite()) {
            let (row, col) = axes.position();
            return Err(Error::Render(format!(
                "subplot at row {}, column {} has a non-finite axis range (x {}..{}, y {}..{})",
                row + 1,
                col + 1,
                x.low,
                x.high,
                y.low,
                y.high
            )));
        }
    }
    Ok(())
}

/// Pixel offset of grid line `i` of `n` across `extent` pixels.
fn grid_edge(i: usize, n: usize, extent: u32) -> u32 {
    (i as f64 * extent as f64 / n as f64).round() as u32
}

fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(render_err)?;
    let spacing = layout_margin(figure.layout());
    let font = font_px(10.0, figure.dpi());

    // Only allocated cells are laid out.
    let (w, h) = root.dim_in_pixel();
    let min_w = 2 * spacing + 4 * font;
    let min_h = 2 * spacing + 5 * font;
    for axes in figure.subplots() {
        let (row, col) = axes.position();
        let left = grid_edge(col, figure.cols(), w);
        let top = grid_edge(row, figure.rows(), h);
        let width = grid_edge(col + 1, figure.cols(), w).saturating_sub(left);
        let height = grid_edge(row + 1, figure.rows(), h).saturating_sub(top);
        if width < min_w || height < min_h {
            log::warn!(
                "subplot at row {}, column {} gets {width}x{height} px; too small to draw",
                row + 1,
                col + 1
            );
            continue;
        }
        let cell = root.clone().shrink((left, top), (width, height));
        draw_axes(&cell, axes, spacing, font)?;
    }

    let border = figure.border_width().round() as u32;
    if border > 0 {
        let (w, h) = root.dim_in_pixel();
        root.draw(&Rectangle::new(
            [(0, 0), (w as i32 - 1, h as i32 - 1)],
            BORDER_COLOR.stroke_width(border),
        ))
        .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Shrink `cell` so one y unit is `ratio` times as long as one x unit.
fn fit_aspect<DB>(
    cell: &DrawingArea<DB, Shift>,
    aspect: Aspect,
    x: &AxisRange,
    y: &AxisRange,
) -> DrawingArea<DB, Shift>
where
    DB: DrawingBackend,
{
    let Aspect::Ratio(ratio) = aspect else {
        return cell.clone();
    };
    let (w, h) = cell.dim_in_pixel();
    let (x_span, y_span) = (x.high - x.low, y.high - y.low);
    if w == 0 || h == 0 || x_span <= 0.0 || y_span <= 0.0 {
        return cell.clone();
    }
    let target = ratio * y_span / x_span;
    let (wf, hf) = (w as f64, h as f64);
    let (new_w, new_h) = if hf / wf > target {
        (wf, wf * target)
    } else {
        (hf / target, hf)
    };
    let new_w = (new_w.round() as u32).clamp(1, w);
    let new_h = (new_h.round() as u32).clamp(1, h);
    cell.clone()
        .shrink(((w - new_w) / 2, (h - new_h) / 2), (new_w, new_h))
}

fn draw_axes<DB>(cell: &DrawingArea<DB, Shift>, axes: &Axes, spacing: u32, font: u32) -> Result<()>
where
    DB: DrawingBackend,
{
    let x = axes.x_range();
    let y = axes.y_range();
    let area = fit_aspect(cell, axes.aspect(), &x, &y);

    let mut builder = ChartBuilder::on(&area);
    builder
        .margin(spacing)
        .x_label_area_size(font * 3)
        .y_label_area_size(font * 4);
    if let Some(title) = axes.title() {
        builder.caption(title, (FontFamily::SansSerif, font + 2));
    }
    let mut chart = builder
        .build_cartesian_2d(x.low..x.high, y.low..y.high)
        .map_err(render_err)?;

    let x_fmt = |v: &f64| format_tick(x.map(*v));
    let y_fmt = |v: &f64| format_tick(y.map(*v));
    chart
        .configure_mesh()
        .x_desc(axes.x_label())
        .y_desc(axes.y_label())
        .x_labels(6)
        .y_labels(6)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style((FontFamily::SansSerif, font))
        .axis_desc_style((FontFamily::SansSerif, font))
        .draw()
        .map_err(render_err)?;

    for trace in axes.traces() {
        draw_trace(&mut chart, trace, &x, &y, font)?;
    }

    if axes.has_legend() && axes.traces().iter().any(|t| t.label().is_some()) {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, font))
            .draw()
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_trace<DB>(
    chart: &mut Chart<'_, DB>,
    trace: &Trace,
    x: &AxisRange,
    y: &AxisRange,
    font: u32,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let at = |px: f64, py: f64| (x.map(px), y.map(py));

    match trace {
        Trace::Line(t) => {
            let color = rgba(t.color, t.opacity);
            let pts: Vec<(f64, f64)> = t
                .x
                .iter()
                .zip(&t.y)
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(a, b)| at(*a, *b))
                .collect();
            draw_polyline(
                chart,
                pts.clone(),
                t.style,
                stroke(color, t.width),
                t.label.as_deref(),
            )?;
            if let Some(marker) = t.marker {
                let size = (t.width * 2.0).round().max(2.0) as i32;
                draw_markers(chart, &pts, marker, size, color, None)?;
            }
        }
        Trace::Scatter(t) => {
            let pts: Vec<(f64, f64)> = t
                .points
                .iter()
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(a, b)| at(*a, *b))
                .collect();
            let size = t.size.round().max(1.0) as i32;
            draw_markers(
                chart,
                &pts,
                t.marker,
                size,
                rgba(t.color, t.opacity),
                t.label.as_deref(),
            )?;
        }
        Trace::Histogram(t) => {
            let fill = rgba(t.color, t.opacity).filled();
            let bars = t
                .bins
                .edges
                .windows(2)
                .zip(&t.bins.counts)
                .map(|(e, c)| Rectangle::new([at(e[0], 0.0), at(e[1], *c as f64)], fill));
            let anno = chart.draw_series(bars).map_err(render_err)?;
            if let Some(label) = &t.label {
                anno.label(label.as_str()).legend(move |(lx, ly)| {
                    Rectangle::new([(lx, ly - 4), (lx + 12, ly + 4)], fill)
                });
            }
        }
        Trace::Bar(t) => {
            let fill = rgba(t.color, t.opacity).filled();
            let half = t.width / 2.0;
            let bars = t
                .x
                .iter()
                .zip(&t.heights)
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(a, b)| Rectangle::new([at(a - half, 0.0), at(a + half, *b)], fill));
            let anno = chart.draw_series(bars).map_err(render_err)?;
            if let Some(label) = &t.label {
                anno.label(label.as_str()).legend(move |(lx, ly)| {
                    Rectangle::new([(lx, ly - 4), (lx + 12, ly + 4)], fill)
                });
            }
        }
        Trace::Image(t) => {
            let Some((low, high)) = t.value_range() else {
                return Ok(());
            };
            let cells = t.data.iter().enumerate().map(|(i, v)| {
                let (r, c) = (i / t.cols, i % t.cols);
                let top = (t.rows - r) as f64;
                Rectangle::new(
                    [at(c as f64, top), at(c as f64 + 1.0, top - 1.0)],
                    viridis(*v, low, high).filled(),
                )
            });
            chart.draw_series(cells).map_err(render_err)?;
        }
        Trace::Boxplot(t) => {
            let color = rgba(t.color, t.opacity);
            let line = stroke(color, 1.0);
            let fill = rgba(t.color, t.opacity * 0.25).filled();
            let half = t.width / 2.0;
            let cap = half / 2.0;
            for ((stats, pos), label) in t.boxes.iter().zip(&t.positions).zip(&t.labels) {
                let Some(b) = stats else {
                    continue;
                };
                let pos = *pos;
                let body = [at(pos - half, b.q1), at(pos + half, b.q3)];
                chart
                    .draw_series([Rectangle::new(body, fill), Rectangle::new(body, line)])
                    .map_err(render_err)?;
                let segments = vec![
                    vec![at(pos - half, b.median), at(pos + half, b.median)],
                    vec![at(pos, b.q1), at(pos, b.whisker_low)],
                    vec![at(pos, b.q3), at(pos, b.whisker_high)],
                    vec![at(pos - cap, b.whisker_low), at(pos + cap, b.whisker_low)],
                    vec![at(pos - cap, b.whisker_high), at(pos + cap, b.whisker_high)],
                ];
                chart
                    .draw_series(segments.into_iter().map(|s| PathElement::new(s, line)))
                    .map_err(render_err)?;
                chart
                    .draw_series(b.outliers.iter().map(|o| Circle::new(at(pos, *o), 3, line)))
                    .map_err(render_err)?;
                chart
                    .draw_series(std::iter::once(Text::new(
                        label.clone(),
                        at(pos - half, b.whisker_high),
                        (FontFamily::SansSerif, font),
                    )))
                    .map_err(render_err)?;
            }
        }
    }
    Ok(())
}
