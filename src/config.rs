//! Rendering defaults and typed overrides.
//!
//! A [`PlotConfig`] is always valid: it is validated when built and after every
//! override, and an override that would break an invariant leaves the previous
//! state untouched. Overrides arrive as a [`ConfigUpdate`], either built in code,
//! deserialised from a JSON object, or parsed from `key=value` pairs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::kind::PlotKind;

/// Spacing policy of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Minimal spacing between subplots.
    Tight,
    /// Room reserved for titles and axis labels.
    #[default]
    Constrained,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutMode::Tight => f.write_str("tight"),
            LayoutMode::Constrained => f.write_str("constrained"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tight" => Ok(LayoutMode::Tight),
            "constrained" => Ok(LayoutMode::Constrained),
            other => Err(Error::Configuration(format!(
                "invalid figure layout '{other}'; must be 'tight' or 'constrained'"
            ))),
        }
    }
}

/// Plot kind used for a raw array, keyed by the array's rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindDefaults {
    pub rank1: PlotKind,
    pub rank2: PlotKind,
    pub rank3: PlotKind,
}

impl Default for KindDefaults {
    fn default() -> Self {
        Self {
            rank1: PlotKind::Plot,
            rank2: PlotKind::Image,
            rank3: PlotKind::Scatter,
        }
    }
}

impl KindDefaults {
    /// Kind to draw an array of `rank` dimensions with.
    pub fn for_rank(&self, rank: usize) -> Result<PlotKind> {
        match rank {
            1 => Ok(self.rank1),
            2 => Ok(self.rank2),
            3 => Ok(self.rank3),
            _ => Err(Error::UnsupportedRank { rank }),
        }
    }
}

/// Figure-wide rendering defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotConfig {
    figure_size: (f64, f64),
    layout_mode: LayoutMode,
    line_width: f64,
    columns: usize,
    plot_kinds: KindDefaults,
    dpi: f64,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figure_size: (3.0, 4.0),
            layout_mode: LayoutMode::Constrained,
            line_width: 2.0,
            columns: 1,
            plot_kinds: KindDefaults::default(),
            dpi: 100.0,
        }
    }
}

impl PlotConfig {
    /// Defaults with `update` applied, validated.
    pub fn from_update(update: &ConfigUpdate) -> Result<Self> {
        let mut cfg = Self::default();
        cfg.override_with(Some(update))?;
        Ok(cfg)
    }

    /// Figure size in inches (width, height).
    pub fn figure_size(&self) -> (f64, f64) {
        self.figure_size
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn plot_kinds(&self) -> KindDefaults {
        self.plot_kinds
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    /// Figure size in pixels: `figure_size * dpi`, at least 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        let (w, h) = self.figure_size;
        (
            ((w * self.dpi).round() as u32).max(1),
            ((h * self.dpi).round() as u32).max(1),
        )
    }

    /// Grid shape for `count` items: `(ceil(count / columns), columns)`.
    pub fn grid_shape(&self, count: usize) -> (usize, usize) {
        (count.div_ceil(self.columns), self.columns)
    }

    /// Check every invariant of the configuration.
    pub fn validate(&self) -> Result<()> {
        let (w, h) = self.figure_size;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(Error::Configuration(format!(
                "invalid figure size {w}x{h}; both sides must be greater than 0"
            )));
        }
        if self.columns == 0 {
            return Err(Error::Configuration(
                "invalid columns: 0; must be greater than 0".into(),
            ));
        }
        if !(self.line_width.is_finite() && self.line_width > 0.0) {
            return Err(Error::Configuration(format!(
                "invalid line width {}; must be greater than 0",
                self.line_width
            )));
        }
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            return Err(Error::Configuration(format!(
                "invalid dpi {}; must be greater than 0",
                self.dpi
            )));
        }
        for (rank, kind) in [
            (1, self.plot_kinds.rank1),
            (2, self.plot_kinds.rank2),
            (3, self.plot_kinds.rank3),
        ] {
            if !kind.supports_rank(rank) {
                return Err(Error::Configuration(format!(
                    "plot kind '{kind}' cannot be the default for {rank}-dimensional data"
                )));
            }
        }
        Ok(())
    }

    /// Apply `update` and re-validate. `None` and empty updates are no-ops.
    ///
    /// The override is atomic: when the updated state fails validation the error
    /// is returned and `self` keeps its previous values.
    pub fn override_with(&mut self, update: Option<&ConfigUpdate>) -> Result<()> {
        let Some(update) = update else {
            return Ok(());
        };
        if update.is_empty() {
            return Ok(());
        }
        let mut next = self.clone();
        if let Some(size) = update.figure_size {
            next.figure_size = size;
        }
        if let Some(layout) = update.layout_mode {
            next.layout_mode = layout;
        }
        if let Some(width) = update.line_width {
            next.line_width = width;
        }
        if let Some(columns) = update.columns {
            next.columns = columns;
        }
        if let Some(dpi) = update.dpi {
            next.dpi = dpi;
        }
        if let Some(kind) = update.plot_kind_1d {
            next.plot_kinds.rank1 = kind;
        }
        if let Some(kind) = update.plot_kind_2d {
            next.plot_kinds.rank2 = kind;
        }
        if let Some(kind) = update.plot_kind_3d {
            next.plot_kinds.rank3 = kind;
        }
        next.validate()?;
        log::debug!("configuration overridden: {next:?}");
        *self = next;
        Ok(())
    }
}

/// Typed set of configuration overrides; `None` fields leave the value as is.
///
/// Deserialising rejects unknown keys. The short spellings `figsize`,
/// `layout`, `linewidth` and `plot_type_{1,2,3}d` are accepted as aliases.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigUpdate {
    #[serde(alias = "figsize")]
    pub figure_size: Option<(f64, f64)>,
    #[serde(alias = "layout")]
    pub layout_mode: Option<LayoutMode>,
    #[serde(alias = "linewidth")]
    pub line_width: Option<f64>,
    pub columns: Option<usize>,
    pub dpi: Option<f64>,
    #[serde(alias = "plot_type_1d")]
    pub plot_kind_1d: Option<PlotKind>,
    #[serde(alias = "plot_type_2d")]
    pub plot_kind_2d: Option<PlotKind>,
    #[serde(alias = "plot_type_3d")]
    pub plot_kind_3d: Option<PlotKind>,
}

impl ConfigUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn figure_size(mut self, width: f64, height: f64) -> Self {
        self.figure_size = Some((width, height));
        self
    }

    pub fn layout_mode(mut self, layout: LayoutMode) -> Self {
        self.layout_mode = Some(layout);
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }

    /// Default kind for arrays of `rank` dimensions.
    pub fn plot_kind(mut self, rank: usize, kind: PlotKind) -> Result<Self> {
        match rank {
            1 => self.plot_kind_1d = Some(kind),
            2 => self.plot_kind_2d = Some(kind),
            3 => self.plot_kind_3d = Some(kind),
            _ => return Err(Error::UnsupportedRank { rank }),
        }
        Ok(self)
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn merge(mut self, other: &ConfigUpdate) -> Self {
        self.figure_size = other.figure_size.or(self.figure_size);
        self.layout_mode = other.layout_mode.or(self.layout_mode);
        self.line_width = other.line_width.or(self.line_width);
        self.columns = other.columns.or(self.columns);
        self.dpi = other.dpi.or(self.dpi);
        self.plot_kind_1d = other.plot_kind_1d.or(self.plot_kind_1d);
        self.plot_kind_2d = other.plot_kind_2d.or(self.plot_kind_2d);
        self.plot_kind_3d = other.plot_kind_3d.or(self.plot_kind_3d);
        self
    }

    /// Parse a JSON object such as `{"columns": 2, "layout": "tight"}`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::Configuration(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Configuration(e.to_string()))
    }

    /// Parse `key=value` assignments, e.g. `["columns=2", "figsize=6x4"]`.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pairs = Vec::new();
        for a in assignments {
            let a = a.as_ref();
            let (key, value) = a.split_once('=').ok_or_else(|| {
                Error::Configuration(format!("expected key=value, got '{a}'"))
            })?;
            pairs.push((key.trim().to_string(), value.trim().to_string()));
        }
        Self::from_pairs(pairs)
    }

    /// Parse `(key, value)` string pairs. Unknown keys are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::default();
        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "figure_size" | "figsize" => update.figure_size = Some(parse_size(value)?),
                "layout_mode" | "layout" => update.layout_mode = Some(value.parse()?),
                "line_width" | "linewidth" => {
                    update.line_width = Some(parse_number(key, value)?)
                }
                "columns" => {
                    update.columns = Some(value.parse().map_err(|_| {
                        Error::Configuration(format!(
                            "invalid columns '{value}'; expected a positive integer"
                        ))
                    })?)
                }
                "dpi" => update.dpi = Some(parse_number(key, value)?),
                "plot_kind_1d" | "plot_type_1d" => update.plot_kind_1d = Some(value.parse()?),
                "plot_kind_2d" | "plot_type_2d" => update.plot_kind_2d = Some(value.parse()?),
                "plot_kind_3d" | "plot_type_3d" => update.plot_kind_3d = Some(value.parse()?),
                other => {
                    return Err(Error::Configuration(format!(
                        "unknown configuration key '{other}'"
                    )));
                }
            }
        }
        Ok(update)
    }
}

fn parse_number(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| Error::Configuration(format!("invalid {key} '{value}'; expected a number")))
}

/// Accepts `6x4`, `6,4` or `6 4`.
fn parse_size(value: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = value
        .split(|c: char| c == 'x' || c == 'X' || c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    match parts.as_slice() {
        [w, h] => Ok((
            parse_number("figure width", w)?,
            parse_number("figure height", h)?,
        )),
        _ => Err(Error::Configuration(format!(
            "invalid figure size '{value}'; expected WIDTHxHEIGHT"
        ))),
    }
}
