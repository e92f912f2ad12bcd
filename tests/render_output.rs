use lazyplot::backend::font_available;
use lazyplot::{
    Aspect, Color, ConfigUpdate, DrawDescriptor, Error, LayoutMode, Limits, LineStyle, MarkerStyle,
    PlotConfig, PlotItem, PlotKind, render,
};
use ndarray::{Array1, Array2, Array3};
use std::fs;
use std::path::Path;

fn skip_without_font() -> bool {
    if font_available() {
        return false;
    }
    eprintln!("skipping: no font found (set LAZYPLOT_FONT to a .ttf file)");
    true
}

fn assert_written(path: &Path) {
    let meta = fs::metadata(path).expect("file created");
    assert!(meta.len() > 0, "{} is empty", path.display());
}

fn mixed_items() -> Vec<PlotItem> {
    let wave = Array1::from_iter((0..40).map(|i| (i as f64 / 5.0).sin()));
    let rows = Array2::from_shape_fn((3, 20), |(r, c)| ((r + 1) as f64 * c as f64 / 6.0).cos());
    let points = Array3::from_shape_fn((2, 15, 2), |(s, p, c)| (s * 3 + p * (c + 1)) as f64);

    let styled = DrawDescriptor::builder(rows.clone(), PlotKind::Plot)
        .title("styled")
        .colors(vec![Color::Red, Color::from((10, 120, 200))])
        .line_styles(vec![LineStyle::Dashed, LineStyle::Dotted])
        .marker_styles(MarkerStyle::Star)
        .opacity(0.7)
        .invert_x_axis(true)
        .build()
        .unwrap();
    let hist = DrawDescriptor::builder(wave.clone(), PlotKind::Hist)
        .build()
        .unwrap();
    let bars = DrawDescriptor::builder(Array1::from(vec![2.0, -1.0, 3.5]), PlotKind::Bar)
        .build()
        .unwrap();
    let boxes = DrawDescriptor::builder(rows.clone(), PlotKind::Boxplot)
        .build()
        .unwrap();
    let scatter = DrawDescriptor::builder(rows, PlotKind::Scatter)
        .marker_styles(vec![MarkerStyle::TriangleUp, MarkerStyle::Square])
        .aspect(Aspect::Ratio(1.0))
        .build()
        .unwrap();

    vec![
        wave.into(),
        Array2::from_shape_fn((6, 8), |(i, j)| (i * j) as f64).into(),
        points.into(),
        styled.into(),
        hist.into(),
        bars.into(),
        boxes.into(),
        scatter.into(),
    ]
}

#[test]
fn every_kind_renders_to_svg_and_png() {
    if skip_without_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let fig = render(
        mixed_items(),
        &PlotConfig::default(),
        Some(&ConfigUpdate::default().columns(3).figure_size(9.0, 9.0)),
    )
    .unwrap();

    for name in ["all.svg", "all.png"] {
        let path = dir.path().join(name);
        fig.save(&path).unwrap();
        assert_written(&path);
    }
}

#[test]
fn tight_layout_and_nested_output_dir() {
    if skip_without_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tight.svg");
    let update = ConfigUpdate::default().layout_mode(LayoutMode::Tight).dpi(72.0);
    let fig = render(
        [Array1::from(vec![1.0, 4.0, 9.0])],
        &PlotConfig::default(),
        Some(&update),
    )
    .unwrap();
    fig.save(&path).unwrap();
    assert_written(&path);
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("data 1"));
}

#[test]
fn non_finite_ranges_fail_instead_of_drawing() {
    let dir = tempfile::tempdir().unwrap();

    let overflowing = render([vec![-1e308, 1e308]], &PlotConfig::default(), None).unwrap();
    let err = overflowing.save(dir.path().join("overflow.svg")).unwrap_err();
    assert!(matches!(err, Error::Render(_)), "got {err:?}");

    let mut fig = render([vec![1.0, 2.0]], &PlotConfig::default(), None).unwrap();
    fig.add_subplot(1, 1, 1)
        .unwrap()
        .set_y_limits(Limits::new(None, Some(f64::INFINITY)));
    let err = fig.save(dir.path().join("inf.svg")).unwrap_err();
    assert!(matches!(err, Error::Render(_)), "got {err:?}");

    let mut fig = render([vec![1.0, 2.0]], &PlotConfig::default(), None).unwrap();
    fig.add_subplot(1, 1, 1)
        .unwrap()
        .set_x_limits(Limits::new(Some(f64::NAN), None));
    let err = fig.save(dir.path().join("nan.png")).unwrap_err();
    assert!(matches!(err, Error::Render(_)), "got {err:?}");
    assert!(!dir.path().join("nan.png").exists());
}

#[test]
fn very_wide_grid_saves() {
    if skip_without_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.svg");
    let fig = render(
        [vec![1.0, 2.0]],
        &PlotConfig::default(),
        Some(&ConfigUpdate::default().columns(usize::MAX)),
    )
    .unwrap();
    fig.save(&path).unwrap();
    assert_written(&path);
}
