//! Error types for lazyplot operations.

use std::io;
use thiserror::Error;

use crate::kind::PlotKind;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while configuring, describing, or rendering a figure.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value, or an unknown/unparsable override key.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Data and its companion arrays do not agree in shape.
    #[error("invalid data shape: {0}")]
    DataShape(String),

    /// Top-level render input is not a usable sequence of arrays or descriptors.
    #[error("invalid input: {0}")]
    InputType(String),

    /// Array rank outside the supported 1..=3.
    #[error("unsupported data rank {rank}: data is limited to 1, 2 or 3 dimensions")]
    UnsupportedRank {
        /// Rank of the rejected array.
        rank: usize,
    },

    /// Plot kind that cannot draw data of the given rank.
    #[error("plot kind '{kind}' does not support {rank}-dimensional data")]
    UnsupportedKind {
        /// Requested kind.
        kind: PlotKind,
        /// Rank of the data.
        rank: usize,
    },

    /// Styling attribute out of its valid range.
    #[error("invalid style: {0}")]
    Style(String),

    /// Subplot index outside the figure grid.
    #[error("subplot index {index} is outside a {rows}x{cols} grid")]
    SubplotIndex {
        /// 1-based index that was requested.
        index: usize,
        /// Grid rows.
        rows: usize,
        /// Grid columns.
        cols: usize,
    },

    /// Subplot requested on a grid other than the one the figure already uses.
    #[error("figure uses a {fixed_rows}x{fixed_cols} grid, not {rows}x{cols}")]
    GridShape {
        /// Requested grid rows.
        rows: usize,
        /// Requested grid columns.
        cols: usize,
        /// Rows of the grid already in use.
        fixed_rows: usize,
        /// Columns of the grid already in use.
        fixed_cols: usize,
    },

    /// Drawing failure reported by the plotters backend.
    #[error("render error: {0}")]
    Render(String),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
