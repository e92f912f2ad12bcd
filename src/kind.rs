//! Plot kinds and the ranks each one can draw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Rendering routine selected for a subplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    /// Line trace per series.
    Plot,
    /// Histogram of a 1-D array.
    Hist,
    /// One bar per value of a 1-D array.
    Bar,
    /// Markers only; rows of a 2-D array or point sets of a 3-D array.
    Scatter,
    /// 2-D matrix drawn as a colour-mapped image.
    #[serde(alias = "imshow")]
    Image,
    /// One box per row of a 2-D array.
    Boxplot,
}

impl PlotKind {
    /// Kinds that can draw data of `rank` dimensions.
    pub fn for_rank(rank: usize) -> &'static [PlotKind] {
        match rank {
            1 => &[PlotKind::Plot, PlotKind::Hist, PlotKind::Bar],
            2 => &[
                PlotKind::Plot,
                PlotKind::Scatter,
                PlotKind::Image,
                PlotKind::Boxplot,
            ],
            3 => &[PlotKind::Scatter],
            _ => &[],
        }
    }

    pub fn supports_rank(self, rank: usize) -> bool {
        Self::for_rank(rank).contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlotKind::Plot => "plot",
            PlotKind::Hist => "hist",
            PlotKind::Bar => "bar",
            PlotKind::Scatter => "scatter",
            PlotKind::Image => "image",
            PlotKind::Boxplot => "boxplot",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plot" | "line" => Ok(PlotKind::Plot),
            "hist" | "histogram" => Ok(PlotKind::Hist),
            "bar" => Ok(PlotKind::Bar),
            "scatter" => Ok(PlotKind::Scatter),
            "image" | "imshow" => Ok(PlotKind::Image),
            "boxplot" | "box" => Ok(PlotKind::Boxplot),
            other => Err(Error::Configuration(format!(
                "unknown plot kind '{other}'; expected one of plot, hist, bar, scatter, image, boxplot"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_tables() {
        assert!(PlotKind::Hist.supports_rank(1));
        assert!(!PlotKind::Hist.supports_rank(2));
        assert!(PlotKind::Image.supports_rank(2));
        assert!(PlotKind::Scatter.supports_rank(3));
        assert!(!PlotKind::Plot.supports_rank(3));
        assert!(PlotKind::for_rank(0).is_empty());
        assert!(PlotKind::for_rank(4).is_empty());
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("imshow".parse::<PlotKind>().unwrap(), PlotKind::Image);
        assert_eq!(" Plot ".parse::<PlotKind>().unwrap(), PlotKind::Plot);
        assert!("pie".parse::<PlotKind>().is_err());
    }
}
