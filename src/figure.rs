//! Backend-neutral figure model.
//!
//! A [`Figure`] is a grid of [`Axes`]; each axes records the traces and axis
//! settings issued by the render dispatcher. Nothing is drawn until
//! [`Figure::save`] hands the model to the plotters backend, so a figure can be
//! inspected (and tested) without touching the file system.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::LayoutMode;
use crate::descriptor::{Aspect, Limits};
use crate::error::{Error, Result};
use crate::stats::{Bins, BoxStats};
use crate::style::{Color, LineStyle, MarkerStyle};

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub label: Option<String>,
    pub color: Color,
    pub opacity: f64,
    pub width: f64,
    pub style: LineStyle,
    pub marker: Option<MarkerStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterTrace {
    pub points: Vec<(f64, f64)>,
    pub label: Option<String>,
    pub color: Color,
    pub opacity: f64,
    pub marker: MarkerStyle,
    /// Marker radius in pixels.
    pub size: f64,
}

/// Row-major matrix; row 0 is drawn at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageTrace {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl ImageTrace {
    /// Finite `(min, max)` of the data, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        finite_range(self.data.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotTrace {
    /// `None` for a series without finite values.
    pub boxes: Vec<Option<BoxStats>>,
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
    pub color: Color,
    pub opacity: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramTrace {
    pub bins: Bins,
    pub label: Option<String>,
    pub color: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarTrace {
    pub x: Vec<f64>,
    pub heights: Vec<f64>,
    /// Bar width in data units.
    pub width: f64,
    pub label: Option<String>,
    pub color: Color,
    pub opacity: f64,
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Trace {
    Line(LineTrace),
    Scatter(ScatterTrace),
    Image(ImageTrace),
    Boxplot(BoxplotTrace),
    Histogram(HistogramTrace),
    Bar(BarTrace),
}

impl Trace {
    /// Legend entry, if the trace has one.
    pub fn label(&self) -> Option<&str> {
        match self {
            Trace::Line(t) => t.label.as_deref(),
            Trace::Scatter(t) => t.label.as_deref(),
            Trace::Histogram(t) => t.label.as_deref(),
            Trace::Bar(t) => t.label.as_deref(),
            Trace::Image(_) | Trace::Boxplot(_) => None,
        }
    }

    /// Finite data extent `((x_min, x_max), (y_min, y_max))`.
    fn extent(&self) -> Option<((f64, f64), (f64, f64))> {
        match self {
            Trace::Line(t) => {
                let pts = t
                    .x
                    .iter()
                    .zip(&t.y)
                    .filter(|(x, y)| x.is_finite() && y.is_finite());
                Some((
                    finite_range(pts.clone().map(|(x, _)| *x))?,
                    finite_range(pts.map(|(_, y)| *y))?,
                ))
            }
            Trace::Scatter(t) => {
                let pts = t
                    .points
                    .iter()
                    .filter(|(x, y)| x.is_finite() && y.is_finite());
                Some((
                    finite_range(pts.clone().map(|(x, _)| *x))?,
                    finite_range(pts.map(|(_, y)| *y))?,
                ))
            }
            Trace::Image(t) => Some(((0.0, t.cols as f64), (0.0, t.rows as f64))),
            Trace::Boxplot(t) => {
                let half = t.width / 2.0;
                let x = finite_range(
                    t.positions
                        .iter()
                        .flat_map(|p| [p - half, p + half]),
                )?;
                let y = finite_range(t.boxes.iter().flatten().flat_map(|b| {
                    b.outliers
                        .iter()
                        .copied()
                        .chain([b.whisker_low, b.whisker_high])
                        .collect::<Vec<_>>()
                }))?;
                Some((x, y))
            }
            Trace::Histogram(t) => {
                let x = finite_range(t.bins.edges.iter().copied())?;
                let top = t.bins.counts.iter().copied().max().unwrap_or(0) as f64;
                Some((x, (0.0, top)))
            }
            Trace::Bar(t) => {
                let half = t.width / 2.0;
                let x = finite_range(t.x.iter().flat_map(|x| [x - half, x + half]))?;
                let y = finite_range(t.heights.iter().copied().chain([0.0]))?;
                Some((x, y))
            }
        }
    }
}

/// Resolved axis range. When `inverted`, values run from `high` to `low`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub low: f64,
    pub high: f64,
    pub inverted: bool,
}

impl AxisRange {
    fn resolve(data: Option<(f64, f64)>, limits: Limits, inverted: bool) -> Self {
        let (data_low, data_high) = data.unwrap_or((0.0, 1.0));
        let mut low = limits.low.unwrap_or(data_low);
        let mut high = limits.high.unwrap_or(data_high);
        let mut inverted = inverted;
        if low > high {
            std::mem::swap(&mut low, &mut high);
            inverted = !inverted;
        }
        if (high - low).abs() < f64::EPSILON {
            low -= 1.0;
            high += 1.0;
        }
        Self {
            low,
            high,
            inverted,
        }
    }

    /// Map a data value to its drawing position (mirrored when inverted).
    /// Applying it twice yields the original value.
    pub fn map(&self, v: f64) -> f64 {
        if self.inverted {
            self.low + self.high - v
        } else {
            v
        }
    }

    /// Both ends and the span are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && (self.high - self.low).is_finite()
    }
}

/// One subplot: recorded traces plus axis settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    row: usize,
    col: usize,
    traces: Vec<Trace>,
    title: Option<String>,
    x_label: String,
    y_label: String,
    x_limits: Limits,
    y_limits: Limits,
    aspect: Aspect,
    x_inverted: bool,
    y_inverted: bool,
    legend: bool,
}

impl Axes {
    fn new(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            traces: Vec::new(),
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            x_limits: Limits::auto(),
            y_limits: Limits::auto(),
            aspect: Aspect::Auto,
            x_inverted: false,
            y_inverted: false,
            legend: false,
        }
    }

    pub fn draw_line(&mut self, trace: LineTrace) {
        self.traces.push(Trace::Line(trace));
    }

    pub fn draw_scatter(&mut self, trace: ScatterTrace) {
        self.traces.push(Trace::Scatter(trace));
    }

    pub fn draw_image(&mut self, trace: ImageTrace) {
        self.traces.push(Trace::Image(trace));
    }

    pub fn draw_boxplot(&mut self, trace: BoxplotTrace) {
        self.traces.push(Trace::Boxplot(trace));
    }

    pub fn draw_histogram(&mut self, trace: HistogramTrace) {
        self.traces.push(Trace::Histogram(trace));
    }

    pub fn draw_bar(&mut self, trace: BarTrace) {
        self.traces.push(Trace::Bar(trace));
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    pub fn set_x_limits(&mut self, limits: Limits) {
        self.x_limits = limits;
    }

    pub fn set_y_limits(&mut self, limits: Limits) {
        self.y_limits = limits;
    }

    pub fn set_aspect(&mut self, aspect: Aspect) {
        self.aspect = aspect;
    }

    /// Toggle the x direction.
    pub fn invert_x_axis(&mut self) {
        self.x_inverted = !self.x_inverted;
    }

    /// Toggle the y direction.
    pub fn invert_y_axis(&mut self) {
        self.y_inverted = !self.y_inverted;
    }

    pub fn draw_legend(&mut self) {
        self.legend = true;
    }

    /// Zero-based `(row, column)` of this subplot in the figure grid.
    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn x_limits(&self) -> Limits {
        self.x_limits
    }

    pub fn y_limits(&self) -> Limits {
        self.y_limits
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn x_inverted(&self) -> bool {
        self.x_inverted
    }

    pub fn y_inverted(&self) -> bool {
        self.y_inverted
    }

    pub fn has_legend(&self) -> bool {
        self.legend
    }

    fn data_extent(&self) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
        let extents: Vec<_> = self.traces.iter().filter_map(Trace::extent).collect();
        let x = finite_range(extents.iter().flat_map(|((a, b), _)| [*a, *b]));
        let y = finite_range(extents.iter().flat_map(|(_, (a, b))| [*a, *b]));
        (x, y)
    }

    /// X range from the data, explicit limits and inversion.
    pub fn x_range(&self) -> AxisRange {
        AxisRange::resolve(self.data_extent().0, self.x_limits, self.x_inverted)
    }

    /// Y range from the data, explicit limits and inversion.
    pub fn y_range(&self) -> AxisRange {
        AxisRange::resolve(self.data_extent().1, self.y_limits, self.y_inverted)
    }
}

/// Multi-subplot figure; the handle returned by a render call.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width_px: u32,
    height_px: u32,
    dpi: f64,
    layout: LayoutMode,
    border_width: f64,
    rows: usize,
    cols: usize,
    /// Allocated axes keyed by 1-based subplot index.
    cells: BTreeMap<usize, Axes>,
}

impl Figure {
    /// Empty figure without a grid; the first `add_subplot` fixes the grid.
    pub fn new(size_px: (u32, u32), dpi: f64, border_width: f64, layout: LayoutMode) -> Self {
        Self {
            width_px: size_px.0,
            height_px: size_px.1,
            dpi,
            layout,
            border_width,
            rows: 0,
            cols: 0,
            cells: BTreeMap::new(),
        }
    }

    /// Subplot `index` (1-based, row-major) of a `rows` x `cols` grid.
    ///
    /// Returns the existing axes when the cell is already allocated.
    pub fn add_subplot(&mut self, rows: usize, cols: usize, index: usize) -> Result<&mut Axes> {
        if self.rows > 0 && (rows, cols) != (self.rows, self.cols) {
            return Err(Error::GridShape {
                rows,
                cols,
                fixed_rows: self.rows,
                fixed_cols: self.cols,
            });
        }
        let in_grid = rows
            .checked_mul(cols)
            .is_some_and(|cells| (1..=cells).contains(&index));
        if !in_grid {
            return Err(Error::SubplotIndex { index, rows, cols });
        }
        self.rows = rows;
        self.cols = cols;
        let (row, col) = ((index - 1) / cols, (index - 1) % cols);
        Ok(self
            .cells
            .entry(index)
            .or_insert_with(|| Axes::new(row, col)))
    }

    pub fn size_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn border_width(&self) -> f64 {
        self.border_width
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Axes at zero-based `(row, col)`, if allocated.
    pub fn axes(&self, row: usize, col: usize) -> Option<&Axes> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(&(row * self.cols + col + 1))
    }

    /// Axes of 1-based subplot `index`, if allocated.
    pub fn subplot(&self, index: usize) -> Option<&Axes> {
        self.cells.get(&index)
    }

    /// Allocated subplots in row-major order.
    pub fn subplots(&self) -> impl Iterator<Item = &Axes> {
        self.cells.values()
    }

    /// Render to `path`: `.svg` writes SVG, any other extension a bitmap.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::backend::save_figure(self, path)
    }
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
