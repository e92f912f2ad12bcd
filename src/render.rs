//! Render dispatcher: turn a list of arrays and/or descriptors into a figure.
//!
//! ```no_run
//! use lazyplot::{ConfigUpdate, PlotConfig, render};
//! use ndarray::Array1;
//!
//! let data = Array1::linspace(0.0, 6.28, 30).mapv(f64::sin);
//! let fig = render([data], &PlotConfig::default(), Some(&ConfigUpdate::default().columns(2)))?;
//! fig.save("sine.svg")?;
//! # Ok::<(), lazyplot::Error>(())
//! ```

use ndarray::{Array, Array1, ArrayD, Dimension, IxDyn};

use crate::config::{ConfigUpdate, PlotConfig};
use crate::descriptor::DrawDescriptor;
use crate::error::{Error, Result};
use crate::figure::{
    Axes, BarTrace, BoxplotTrace, Figure, HistogramTrace, ImageTrace, LineTrace, ScatterTrace,
};
use crate::kind::PlotKind;
use crate::stats::{BoxStats, histogram};
use crate::style::MarkerStyle;

const BAR_WIDTH: f64 = 0.8;
const BOX_WIDTH: f64 = 0.5;
const SCATTER_SIZE: f64 = 3.0;

/// One entry of a render call: a raw array or a ready-made descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotItem {
    Array(ArrayD<f64>),
    Descriptor(DrawDescriptor),
}

impl<D: Dimension> From<Array<f64, D>> for PlotItem {
    fn from(values: Array<f64, D>) -> Self {
        PlotItem::Array(values.into_dyn())
    }
}

impl From<Vec<f64>> for PlotItem {
    fn from(values: Vec<f64>) -> Self {
        PlotItem::Array(Array1::from_vec(values).into_dyn())
    }
}

impl From<DrawDescriptor> for PlotItem {
    fn from(descriptor: DrawDescriptor) -> Self {
        PlotItem::Descriptor(descriptor)
    }
}

impl PlotItem {
    /// 2-D array from equal-length rows; ragged rows are rejected.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::InputType(format!(
                "row {} has {} values but row 1 has {width}; rows must be equal length",
                i + 1,
                row.len()
            )));
        }
        let height = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        ArrayD::from_shape_vec(IxDyn(&[height, width]), flat)
            .map(PlotItem::Array)
            .map_err(|e| Error::InputType(e.to_string()))
    }
}

/// Render `items` with `config` plus `options`, leaving `config` untouched.
pub fn render<I, T>(
    items: I,
    config: &PlotConfig,
    options: Option<&ConfigUpdate>,
) -> Result<Figure>
where
    I: IntoIterator<Item = T>,
    T: Into<PlotItem>,
{
    let mut cfg = config.clone();
    cfg.override_with(options)?;
    render_figure(items, &cfg)
}

/// Owns a configuration across render calls; overrides persist for the session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: PlotConfig,
}

impl Session {
    pub fn new(config: PlotConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn override_config(&mut self, update: Option<&ConfigUpdate>) -> Result<()> {
        self.config.override_with(update)
    }

    /// Merge `options` into the session configuration, then render.
    pub fn render<I, T>(&mut self, items: I, options: Option<&ConfigUpdate>) -> Result<Figure>
    where
        I: IntoIterator<Item = T>,
        T: Into<PlotItem>,
    {
        self.config.override_with(options)?;
        render_figure(items, &self.config)
    }
}

fn render_figure<I, T>(items: I, cfg: &PlotConfig) -> Result<Figure>
where
    I: IntoIterator<Item = T>,
    T: Into<PlotItem>,
{
    let items: Vec<PlotItem> = items.into_iter().map(Into::into).collect();
    if items.is_empty() {
        return Err(Error::InputType(
            "render input must contain at least one array or descriptor".into(),
        ));
    }

    let (rows, cols) = cfg.grid_shape(items.len());
    log::debug!("rendering {} item(s) on a {rows}x{cols} grid", items.len());
    let mut figure = Figure::new(
        cfg.pixel_size(),
        cfg.dpi(),
        cfg.line_width(),
        cfg.layout_mode(),
    );

    for (i, item) in items.into_iter().enumerate() {
        let index = i + 1;
        let descriptor = match item {
            PlotItem::Array(values) => infer_descriptor(values, index, cfg)?,
            PlotItem::Descriptor(d) => d,
        };
        log::debug!(
            "subplot {index}: {} of shape {:?}",
            descriptor.plot_kind(),
            descriptor.values().shape()
        );
        let axes = figure.add_subplot(rows, cols, index)?;
        draw_descriptor(axes, &descriptor);
    }
    Ok(figure)
}

/// Descriptor for raw array number `index` (1-based): kind from its rank,
/// title `data {index}`, line width from the configuration.
pub fn infer_descriptor(
    values: ArrayD<f64>,
    index: usize,
    cfg: &PlotConfig,
) -> Result<DrawDescriptor> {
    let kind = cfg.plot_kinds().for_rank(values.ndim())?;
    DrawDescriptor::builder(values, kind)
        .title(format!("data {index}"))
        .line_width(cfg.line_width())
        .build()
}

/// Draw `d` onto `axes` with the routine for its kind, then apply the axis
/// settings shared by every kind.
pub fn draw_descriptor(axes: &mut Axes, d: &DrawDescriptor) {
    match d.plot_kind() {
        PlotKind::Plot => draw_lines(axes, d),
        PlotKind::Scatter => draw_scatter(axes, d),
        PlotKind::Hist => draw_hist(axes, d),
        PlotKind::Bar => draw_bars(axes, d),
        PlotKind::Boxplot => draw_boxes(axes, d),
        PlotKind::Image => draw_image(axes, d),
    }

    if let Some(title) = d.title() {
        axes.set_title(title);
    }
    axes.set_x_label(d.x_label());
    axes.set_y_label(d.y_label());
    axes.set_x_limits(d.x_limits());
    axes.set_y_limits(d.y_limits());
    axes.set_aspect(d.aspect());
    if d.invert_x_axis() {
        axes.invert_x_axis();
    }
    if d.invert_y_axis() {
        axes.invert_y_axis();
    }
    axes.draw_legend();
}

/// Series of a 1-D or 2-D array; a 1-D array is a single series.
fn series(values: &ArrayD<f64>) -> Vec<Vec<f64>> {
    if values.ndim() == 1 {
        vec![values.iter().copied().collect()]
    } else {
        values
            .outer_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

/// X values for series `index`: the matching row of the independent axis, or
/// `0..len`.
fn x_values(x_rows: Option<&Vec<Vec<f64>>>, index: usize, len: usize) -> Vec<f64> {
    x_rows
        .and_then(|rows| rows.get(index).cloned())
        .unwrap_or_else(|| (0..len).map(|i| i as f64).collect())
}

fn draw_lines(axes: &mut Axes, d: &DrawDescriptor) {
    let x_rows = d.independent_axis_values().map(series);
    for (k, y) in series(d.values()).into_iter().enumerate() {
        let x = x_values(x_rows.as_ref(), k, y.len());
        axes.draw_line(LineTrace {
            x,
            y,
            label: Some(d.series_label(k)),
            color: d.series_color(k),
            opacity: d.opacity(),
            width: d.line_width(),
            style: d.series_line_style(k),
            marker: d.series_marker(k),
        });
    }
}

fn draw_scatter(axes: &mut Axes, d: &DrawDescriptor) {
    let marker_for = |k: usize| d.series_marker(k).unwrap_or(MarkerStyle::Circle);
    if d.rank() == 3 {
        for (k, set) in d.values().outer_iter().enumerate() {
            let points = set
                .outer_iter()
                .map(|p| {
                    let c: Vec<f64> = p.iter().copied().collect();
                    (c[0], c[1])
                })
                .collect();
            axes.draw_scatter(ScatterTrace {
                points,
                label: Some(d.series_label(k)),
                color: d.series_color(k),
                opacity: d.opacity(),
                marker: marker_for(k),
                size: SCATTER_SIZE,
            });
        }
        return;
    }

    let x_rows = d.independent_axis_values().map(series);
    for (k, y) in series(d.values()).into_iter().enumerate() {
        let x = x_values(x_rows.as_ref(), k, y.len());
        axes.draw_scatter(ScatterTrace {
            points: x.into_iter().zip(y).collect(),
            label: Some(d.series_label(k)),
            color: d.series_color(k),
            opacity: d.opacity(),
            marker: marker_for(k),
            size: SCATTER_SIZE,
        });
    }
}

fn draw_hist(axes: &mut Axes, d: &DrawDescriptor) {
    let values: Vec<f64> = d.values().iter().copied().collect();
    axes.draw_histogram(HistogramTrace {
        bins: histogram(&values),
        label: Some(d.series_label(0)),
        color: d.series_color(0),
        opacity: d.opacity(),
    });
}

fn draw_bars(axes: &mut Axes, d: &DrawDescriptor) {
    let heights: Vec<f64> = d.values().iter().copied().collect();
    let x = match d.independent_axis_values() {
        Some(t) => t.iter().copied().collect(),
        None => (0..heights.len()).map(|i| i as f64).collect(),
    };
    axes.draw_bar(BarTrace {
        x,
        heights,
        width: BAR_WIDTH,
        label: Some(d.series_label(0)),
        color: d.series_color(0),
        opacity: d.opacity(),
    });
}

fn draw_boxes(axes: &mut Axes, d: &DrawDescriptor) {
    let rows = series(d.values());
    let positions = (1..=rows.len()).map(|p| p as f64).collect();
    let labels = (0..rows.len()).map(|k| d.series_label(k)).collect();
    let boxes = rows.iter().map(|r| BoxStats::from_values(r)).collect();
    axes.draw_boxplot(BoxplotTrace {
        boxes,
        positions,
        labels,
        color: d.series_color(0),
        opacity: d.opacity(),
        width: BOX_WIDTH,
    });
}

fn draw_image(axes: &mut Axes, d: &DrawDescriptor) {
    let shape = d.values().shape();
    axes.draw_image(ImageTrace {
        rows: shape[0],
        cols: shape[1],
        data: d.values().iter().copied().collect(),
    });
}
