//! Helpers mapping descriptor styling onto plotters series and elements.
//!
//! Plotters has no notion of line styles or single-character marker codes, so:
//! - non-solid lines become `DashedLineSeries` with a per-style dash pattern
//! - circle-like markers are `Circle`s, every other marker is a pixel-space
//!   `Polygon` anchored at the data point

use std::f64::consts::PI;

use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use super::render_err;
use crate::error::Result;
use crate::style::{LineStyle, MarkerStyle};

pub type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Stroke for a line of `width` pixels (at least 1).
pub fn stroke(color: RGBAColor, width: f64) -> ShapeStyle {
    ShapeStyle {
        color,
        filled: false,
        stroke_width: width.round().max(1.0) as u32,
    }
}

/// Dash length and gap in pixels; `None` for solid lines.
pub fn dash_pattern(style: LineStyle) -> Option<(u32, u32)> {
    match style {
        LineStyle::Solid => None,
        LineStyle::Dashed => Some((8, 5)),
        LineStyle::DashDot => Some((10, 3)),
        LineStyle::Dotted => Some((2, 3)),
    }
}

/// Draw a polyline through `points`, registering a legend entry when labelled.
pub fn draw_polyline<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    points: Vec<(f64, f64)>,
    style: LineStyle,
    line: ShapeStyle,
    label: Option<&str>,
) -> Result<()> {
    let anno = match dash_pattern(style) {
        None => chart.draw_series(LineSeries::new(points, line)),
        Some((dash, gap)) => chart.draw_series(DashedLineSeries::new(points, dash, gap, line)),
    }
    .map_err(render_err)?;
    if let Some(label) = label {
        anno.label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], line));
    }
    Ok(())
}

/// Draw one marker per point, registering a legend entry when labelled.
pub fn draw_markers<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    points: &[(f64, f64)],
    marker: MarkerStyle,
    size: i32,
    color: RGBAColor,
    label: Option<&str>,
) -> Result<()> {
    let fill = color.filled();
    let anno = match marker_polygon(marker, size) {
        None => {
            let radius = match marker {
                MarkerStyle::Pixel => 1,
                MarkerStyle::Point => (size / 2).max(1),
                _ => size,
            };
            chart.draw_series(points.iter().map(|p| Circle::new(*p, radius, fill)))
        }
        Some(shape) => chart.draw_series(
            points
                .iter()
                .map(|p| EmptyElement::at(*p) + Polygon::new(shape.clone(), fill)),
        ),
    }
    .map_err(render_err)?;
    if let Some(label) = label {
        anno.label(label)
            .legend(move |(x, y)| Circle::new((x + 8, y), 4, fill));
    }
    Ok(())
}

/// Pixel-space outline of a marker centred on the origin; `None` for markers
/// drawn as circles.
pub fn marker_polygon(marker: MarkerStyle, s: i32) -> Option<Vec<(i32, i32)>> {
    let half = (s / 2).max(1);
    let shape = match marker {
        MarkerStyle::Pixel | MarkerStyle::Point | MarkerStyle::Circle => return None,
        MarkerStyle::TriangleUp => vec![(0, -s), (-s, s), (s, s)],
        MarkerStyle::TriangleDown => vec![(0, s), (-s, -s), (s, -s)],
        MarkerStyle::TriangleLeft => vec![(-s, 0), (s, -s), (s, s)],
        MarkerStyle::TriangleRight => vec![(s, 0), (-s, -s), (-s, s)],
        MarkerStyle::Square => vec![(-s, -s), (s, -s), (s, s), (-s, s)],
        MarkerStyle::Diamond => vec![(0, -s), (s, 0), (0, s), (-s, 0)],
        MarkerStyle::ThinDiamond => vec![(0, -s), (half, 0), (0, s), (-half, 0)],
        MarkerStyle::Pentagon => star(5, s as f64, s as f64),
        MarkerStyle::Star => star(5, s as f64, s as f64 * 0.45),
    };
    Some(shape)
}

/// Vertices of a `points`-pointed star (a regular polygon when
/// `inner == outer`), first vertex straight up.
fn star(points: usize, outer: f64, inner: f64) -> Vec<(i32, i32)> {
    let step = if inner == outer { 1 } else { 2 };
    let count = points * step;
    (0..count)
        .map(|i| {
            let r = if i % 2 == 1 && step == 2 { inner } else { outer };
            let angle = -PI / 2.0 + 2.0 * PI * i as f64 / count as f64;
            (
                (r * angle.cos()).round() as i32,
                (r * angle.sin()).round() as i32,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygons_have_expected_vertex_counts() {
        assert!(marker_polygon(MarkerStyle::Circle, 4).is_none());
        assert_eq!(marker_polygon(MarkerStyle::Square, 4).map(|p| p.len()), Some(4));
        assert_eq!(marker_polygon(MarkerStyle::Pentagon, 4).map(|p| p.len()), Some(5));
        assert_eq!(marker_polygon(MarkerStyle::Star, 4).map(|p| p.len()), Some(10));
        assert_eq!(star(5, 4.0, 4.0)[0], (0, -4));
    }

    #[test]
    fn only_solid_is_undashed() {
        assert_eq!(dash_pattern(LineStyle::Solid), None);
        assert!(dash_pattern(LineStyle::Dotted).is_some());
    }
}
