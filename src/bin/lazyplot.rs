use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lazyplot::{ConfigUpdate, DrawDescriptor, PlotConfig, PlotItem, PlotKind, Session};
use ndarray::{Array1, Array2, ArrayD};
use std::f64::consts::TAU;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "lazyplot",
    version,
    about = "Quick-look plots of numeric arrays, written to SVG or PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render synthetic sine waves to a file.
    Demo(DemoArgs),
    /// Print the resolved configuration as JSON.
    Config(OverrideArgs),
}

#[derive(Args, Debug)]
struct OverrideArgs {
    /// Configuration override as key=value (repeatable), e.g. columns=2 or figsize=6x4
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// Configuration override as a JSON object; --set entries win on conflicts.
    #[arg(long, value_name = "JSON")]
    json: Option<String>,
}

impl OverrideArgs {
    fn update(&self) -> Result<Option<ConfigUpdate>> {
        let mut update = match &self.json {
            Some(text) => ConfigUpdate::from_json_str(text).context("invalid --json")?,
            None => ConfigUpdate::default(),
        };
        update = update.merge(&ConfigUpdate::from_assignments(&self.set).context("invalid --set")?);
        Ok((!update.is_empty()).then_some(update))
    }
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Output file (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    /// Number of subplots.
    #[arg(long, default_value_t = 1)]
    items: usize,
    /// Number of series per subplot.
    #[arg(long, default_value_t = 1)]
    series: usize,
    /// Samples per series.
    #[arg(long, default_value_t = 30)]
    length: usize,
    /// Plot kind for every subplot (plot, hist, bar, scatter, image, boxplot).
    /// If omitted, the kind follows the array rank.
    #[arg(long)]
    kind: Option<String>,
    #[command(flatten)]
    overrides: OverrideArgs,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_config(args: OverrideArgs) -> Result<()> {
    let mut session = Session::new(PlotConfig::default())?;
    session.override_config(args.update()?.as_ref())?;
    println!("{}", serde_json::to_string_pretty(session.config())?);
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> Result<()> {
    if args.series == 0 || args.length == 0 {
        anyhow::bail!("--series and --length must be at least 1");
    }
    let kind = args.kind.as_deref().map(str::parse::<PlotKind>).transpose()?;

    let items = (0..args.items)
        .map(|i| demo_item(i, args.series, args.length, kind))
        .collect::<lazyplot::Result<Vec<PlotItem>>>()?;

    let mut session = Session::default();
    let figure = session.render(items, args.overrides.update()?.as_ref())?;
    figure.save(&args.out)?;
    eprintln!(
        "Wrote {} subplot(s) on a {}x{} grid to {}",
        args.items,
        figure.rows(),
        figure.cols(),
        args.out.display()
    );
    Ok(())
}

/// Sine waves for subplot `index`: one row per series, each with its own
/// frequency and phase.
fn waves(index: usize, series: usize, length: usize) -> Array2<f64> {
    Array2::from_shape_fn((series, length), |(s, t)| {
        let phase = index as f64 * 0.5;
        ((s + 1) as f64 * TAU * t as f64 / length as f64 + phase).sin()
    })
}

fn demo_item(
    index: usize,
    series: usize,
    length: usize,
    kind: Option<PlotKind>,
) -> lazyplot::Result<PlotItem> {
    let data = waves(index, series, length);
    let Some(kind) = kind else {
        return Ok(if series == 1 {
            PlotItem::from(data.row(0).to_owned())
        } else {
            PlotItem::from(data)
        });
    };

    let values: ArrayD<f64> = if kind.supports_rank(2) && (series > 1 || !kind.supports_rank(1)) {
        data.into_dyn()
    } else {
        Array1::from_iter(data.row(0).iter().copied()).into_dyn()
    };
    let mut builder =
        DrawDescriptor::builder(values, kind).title(format!("demo {} ({kind})", index + 1));
    if series > 1 && kind.supports_rank(2) {
        builder = builder.series_labels((1..=series).map(|s| format!("wave {s}")));
    }
    let descriptor = builder.build()?;
    Ok(descriptor.into())
}
