//! Draw descriptors: the validated data and styling of one subplot.
//!
//! A descriptor is built with [`DrawDescriptor::builder`] and checked once in
//! [`DrawDescriptorBuilder::build`]; afterwards it is read-only.

use ndarray::{Array, ArrayD, Dimension};

use crate::error::{Error, Result};
use crate::kind::PlotKind;
use crate::style::{
    Color, LineStyle, MarkerStyle, OneOrMany, cycle, cycle_grouped, default_colors,
    default_line_styles,
};

/// Axis range; an unset end is chosen from the data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Limits {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Limits {
    pub const fn auto() -> Self {
        Self {
            low: None,
            high: None,
        }
    }

    pub const fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    pub const fn between(low: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    pub fn is_auto(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// First set end that is NaN or infinite.
    pub fn non_finite_end(&self) -> Option<f64> {
        [self.low, self.high]
            .into_iter()
            .flatten()
            .find(|v| !v.is_finite())
    }
}

impl From<(Option<f64>, Option<f64>)> for Limits {
    fn from((low, high): (Option<f64>, Option<f64>)) -> Self {
        Self { low, high }
    }
}

/// Ratio of one y unit to one x unit on screen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Aspect {
    #[default]
    Auto,
    Ratio(f64),
}

/// Validated description of one subplot.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawDescriptor {
    values: ArrayD<f64>,
    plot_kind: PlotKind,
    title: Option<String>,
    independent_axis_values: Option<ArrayD<f64>>,
    series_labels: Option<Vec<String>>,
    x_label: String,
    y_label: String,
    x_limits: Limits,
    y_limits: Limits,
    colors: Vec<Color>,
    opacity: f64,
    line_styles: Vec<LineStyle>,
    marker_styles: Vec<MarkerStyle>,
    line_width: f64,
    aspect: Aspect,
    invert_x_axis: bool,
    invert_y_axis: bool,
}

impl DrawDescriptor {
    pub fn builder<D: Dimension>(
        values: Array<f64, D>,
        plot_kind: PlotKind,
    ) -> DrawDescriptorBuilder {
        DrawDescriptorBuilder::new(values.into_dyn(), plot_kind)
    }

    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    pub fn rank(&self) -> usize {
        self.values.ndim()
    }

    pub fn plot_kind(&self) -> PlotKind {
        self.plot_kind
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn independent_axis_values(&self) -> Option<&ArrayD<f64>> {
        self.independent_axis_values.as_ref()
    }

    pub fn series_labels(&self) -> Option<&[String]> {
        self.series_labels.as_deref()
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

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn line_styles(&self) -> &[LineStyle] {
        &self.line_styles
    }

    pub fn marker_styles(&self) -> &[MarkerStyle] {
        &self.marker_styles
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn aspect(&self) -> Aspect {
        self.aspect
    }

    pub fn invert_x_axis(&self) -> bool {
        self.invert_x_axis
    }

    pub fn invert_y_axis(&self) -> bool {
        self.invert_y_axis
    }

    /// Number of series: 1 for a 1-D array, the leading dimension otherwise.
    pub fn series_count(&self) -> usize {
        if self.rank() == 1 {
            1
        } else {
            self.values.shape()[0]
        }
    }

    /// Color of series `index`, cycling per series.
    pub fn series_color(&self, index: usize) -> Color {
        cycle(&self.colors, index).unwrap_or(Color::Blue)
    }

    /// Line style of series `index`. Consecutive series keep one style until
    /// the style sequence length is reached: `styles[(index / len) % len]`.
    pub fn series_line_style(&self, index: usize) -> LineStyle {
        cycle_grouped(&self.line_styles, index).unwrap_or(LineStyle::Solid)
    }

    pub fn series_marker(&self, index: usize) -> Option<MarkerStyle> {
        cycle(&self.marker_styles, index)
    }

    /// Legend label of series `index`: the supplied label or `graph {index+1}`.
    pub fn series_label(&self, index: usize) -> String {
        self.series_labels
            .as_ref()
            .and_then(|labels| labels.get(index).cloned())
            .unwrap_or_else(|| format!("graph {}", index + 1))
    }
}

/// Collects descriptor fields; [`build`](Self::build) validates them.
#[derive(Debug, Clone)]
pub struct DrawDescriptorBuilder {
    values: ArrayD<f64>,
    plot_kind: PlotKind,
    title: Option<String>,
    independent_axis_values: Option<ArrayD<f64>>,
    series_labels: Option<Vec<String>>,
    x_label: String,
    y_label: String,
    x_limits: Limits,
    y_limits: Limits,
    colors: OneOrMany<Color>,
    opacity: f64,
    line_styles: OneOrMany<LineStyle>,
    marker_styles: Option<OneOrMany<MarkerStyle>>,
    line_width: f64,
    aspect: Aspect,
    invert_x_axis: bool,
    invert_y_axis: bool,
}

impl DrawDescriptorBuilder {
    fn new(values: ArrayD<f64>, plot_kind: PlotKind) -> Self {
        Self {
            values,
            plot_kind,
            title: None,
            independent_axis_values: None,
            series_labels: None,
            x_label: "x".into(),
            y_label: "y".into(),
            x_limits: Limits::auto(),
            y_limits: Limits::auto(),
            colors: OneOrMany::Many(default_colors()),
            opacity: 1.0,
            line_styles: OneOrMany::Many(default_line_styles()),
            marker_styles: None,
            line_width: 2.0,
            aspect: Aspect::Auto,
            invert_x_axis: false,
            invert_y_axis: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// X values; must have exactly the shape of the data.
    pub fn independent_axis_values<D: Dimension>(mut self, values: Array<f64, D>) -> Self {
        self.independent_axis_values = Some(values.into_dyn());
        self
    }

    /// One label per entry of the data's leading dimension.
    pub fn series_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.series_labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = label.into();
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    pub fn x_limits(mut self, limits: impl Into<Limits>) -> Self {
        self.x_limits = limits.into();
        self
    }

    pub fn y_limits(mut self, limits: impl Into<Limits>) -> Self {
        self.y_limits = limits.into();
        self
    }

    pub fn colors(mut self, colors: impl Into<OneOrMany<Color>>) -> Self {
        self.colors = colors.into();
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn line_styles(mut self, styles: impl Into<OneOrMany<LineStyle>>) -> Self {
        self.line_styles = styles.into();
        self
    }

    pub fn marker_styles(mut self, markers: impl Into<OneOrMany<MarkerStyle>>) -> Self {
        self.marker_styles = Some(markers.into());
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }

    pub fn aspect(mut self, aspect: Aspect) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn invert_x_axis(mut self, invert: bool) -> Self {
        self.invert_x_axis = invert;
        self
    }

    pub fn invert_y_axis(mut self, invert: bool) -> Self {
        self.invert_y_axis = invert;
        self
    }

    pub fn build(self) -> Result<DrawDescriptor> {
        let rank = self.values.ndim();
        if !(1..=3).contains(&rank) {
            return Err(Error::UnsupportedRank { rank });
        }
        if !self.plot_kind.supports_rank(rank) {
            return Err(Error::UnsupportedKind {
                kind: self.plot_kind,
                rank,
            });
        }
        if let Some(t) = &self.independent_axis_values
            && t.shape() != self.values.shape()
        {
            return Err(Error::DataShape(format!(
                "independent axis values have shape {:?} but data has shape {:?}; x and y must be the same shape",
                t.shape(),
                self.values.shape()
            )));
        }
        if let Some(labels) = &self.series_labels {
            let leading = self.values.shape()[0];
            if labels.len() != leading {
                return Err(Error::DataShape(format!(
                    "{} series labels given but data has {leading} entries in its leading dimension",
                    labels.len()
                )));
            }
        }
        if rank == 3 && self.values.shape()[2] < 2 {
            return Err(Error::DataShape(format!(
                "3-dimensional scatter data needs at least 2 coordinates per point, got shape {:?}",
                self.values.shape()
            )));
        }

        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(Error::Style(format!(
                "opacity {} is outside 0..=1",
                self.opacity
            )));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(Error::Style(format!(
                "line width {} must be greater than 0",
                self.line_width
            )));
        }
        if let Aspect::Ratio(r) = self.aspect
            && !(r.is_finite() && r > 0.0)
        {
            return Err(Error::Style(format!(
                "aspect ratio {r} must be a positive number"
            )));
        }
        for (axis, limits) in [("x", self.x_limits), ("y", self.y_limits)] {
            if let Some(v) = limits.non_finite_end() {
                return Err(Error::Style(format!(
                    "{axis} limit {v} must be a finite number"
                )));
            }
        }

        let colors = self.colors.into_vec();
        let line_styles = self.line_styles.into_vec();
        let marker_styles = self.marker_styles.map(OneOrMany::into_vec).unwrap_or_default();
        if colors.is_empty() {
            return Err(Error::Style("colors must not be empty".into()));
        }
        if line_styles.is_empty() {
            return Err(Error::Style("line styles must not be empty".into()));
        }

        Ok(DrawDescriptor {
            values: self.values,
            plot_kind: self.plot_kind,
            title: self.title,
            independent_axis_values: self.independent_axis_values,
            series_labels: self.series_labels,
            x_label: self.x_label,
            y_label: self.y_label,
            x_limits: self.x_limits,
            y_limits: self.y_limits,
            colors,
            opacity: self.opacity,
            line_styles,
            marker_styles,
            line_width: self.line_width,
            aspect: self.aspect,
            invert_x_axis: self.invert_x_axis,
            invert_y_axis: self.invert_y_axis,
        })
    }
}
