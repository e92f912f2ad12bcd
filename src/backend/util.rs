//! Color conversion, the image colormap and tick label formatting.

use plotters::prelude::*;

use crate::style::Color as SeriesColor;

/// Viridis anchor colors, dark to light.
const VIRIDIS: [(u8, u8, u8); 5] = [
    (68, 1, 84),
    (59, 82, 139),
    (33, 145, 140),
    (94, 201, 98),
    (253, 231, 37),
];

/// Series color with opacity as a plotters color.
pub fn rgba(color: SeriesColor, opacity: f64) -> RGBAColor {
    let c = color.rgb();
    RGBAColor(c.r, c.g, c.b, opacity.clamp(0.0, 1.0))
}

/// Viridis color for `value` within `[low, high]`; out-of-range values clamp.
pub fn viridis(value: f64, low: f64, high: f64) -> RGBColor {
    let t = if high > low && value.is_finite() {
        ((value - low) / (high - low)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let f = scaled - i as f64;
    let (a, b) = (VIRIDIS[i], VIRIDIS[i + 1]);
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Tick label with precision chosen from the magnitude.
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    let prec = if a >= 100.0 || a == 0.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Text size in pixels for a point size at the figure's dpi.
pub fn font_px(points: f64, dpi: f64) -> u32 {
    ((points * dpi / 72.0).round() as u32).max(6)
}
