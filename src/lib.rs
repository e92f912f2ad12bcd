//! lazyplot
//!
//! Quick-look plotting for numeric arrays: hand over one or more arrays (or
//! fully specified draw descriptors) and get back a figure with one subplot
//! per item, laid out on a grid and drawn with `plotters`.
//!
//! ### Features
//! - Plot kind picked from the array rank (line plot, image, scatter) or chosen explicitly
//! - Line, scatter, histogram, bar, box and image plots
//! - Per-series colors, line styles, markers and labels with cycling
//! - Configuration as plain values with validated, all-or-nothing overrides
//! - SVG or PNG output
//!
//! ### Example
//! ```no_run
//! use lazyplot::{ConfigUpdate, DrawDescriptor, PlotConfig, PlotItem, PlotKind, render};
//! use ndarray::{Array1, Array2};
//!
//! let wave = Array1::linspace(0.0, 6.28, 50).mapv(f64::sin);
//! let heat = Array2::from_shape_fn((8, 8), |(i, j)| (i * j) as f64);
//! let bars = DrawDescriptor::builder(Array1::from(vec![3.0, 1.0, 4.0]), PlotKind::Bar)
//!     .title("counts")
//!     .build()?;
//!
//! let items: Vec<PlotItem> = vec![wave.into(), heat.into(), bars.into()];
//! let fig = render(items, &PlotConfig::default(), Some(&ConfigUpdate::default().columns(3)))?;
//! fig.save("overview.png")?;
//! # Ok::<(), lazyplot::Error>(())
//! ```

pub mod backend;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod figure;
pub mod kind;
pub mod render;
pub mod stats;
pub mod style;

pub use config::{ConfigUpdate, KindDefaults, LayoutMode, PlotConfig};
pub use descriptor::{Aspect, DrawDescriptor, DrawDescriptorBuilder, Limits};
pub use error::{Error, Result};
pub use figure::{Axes, Figure, Trace};
pub use kind::PlotKind;
pub use render::{PlotItem, Session, render};
pub use style::{Color, LineStyle, MarkerStyle, OneOrMany};
