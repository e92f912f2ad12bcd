use lazyplot::{
    Color, ConfigUpdate, DrawDescriptor, Error, PlotConfig, PlotItem, PlotKind, Session, Trace,
    render,
};
use ndarray::{Array1, Array2, Array3, ArrayD, IxDyn};

fn wave(len: usize) -> Array1<f64> {
    Array1::from_iter((0..len).map(|i| (i as f64 / 4.0).sin()))
}

#[test]
fn single_rank1_array_is_one_line() {
    let fig = render([wave(30)], &PlotConfig::default(), None).unwrap();
    assert_eq!((fig.rows(), fig.cols()), (1, 1));

    let axes = fig.subplot(1).expect("subplot 1");
    assert_eq!(axes.title(), Some("data 1"));
    assert!(axes.has_legend());
    assert_eq!(axes.traces().len(), 1);
    let Trace::Line(line) = &axes.traces()[0] else {
        panic!("expected a line trace");
    };
    let expected_x: Vec<f64> = (0..30).map(|i| i as f64).collect();
    assert_eq!(line.x, expected_x);
    assert_eq!(line.y, wave(30).to_vec());
    assert_eq!(line.label.as_deref(), Some("graph 1"));
    assert_eq!(line.width, 2.0);
    assert_eq!(line.color, Color::Blue);
}

#[test]
fn items_fill_grid_row_major() {
    let items: Vec<Array1<f64>> = (0..5).map(|_| wave(10)).collect();
    let fig = render(
        items,
        &PlotConfig::default(),
        Some(&ConfigUpdate::default().columns(2)),
    )
    .unwrap();
    assert_eq!((fig.rows(), fig.cols()), (3, 2));
    for index in 1..=5 {
        let axes = fig.subplot(index).expect("allocated");
        assert_eq!(axes.position(), ((index - 1) / 2, (index - 1) % 2));
        assert_eq!(axes.title(), Some(format!("data {index}").as_str()));
    }
    assert!(fig.subplot(6).is_none());
    assert!(fig.axes(2, 1).is_none());
    assert_eq!(fig.subplots().count(), 5);
}

#[test]
fn stateless_render_leaves_config_untouched() {
    let cfg = PlotConfig::default();
    render([wave(3)], &cfg, Some(&ConfigUpdate::default().columns(3))).unwrap();
    assert_eq!(cfg, PlotConfig::default());
}

#[test]
fn default_kinds_follow_rank() {
    let image = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f64);
    let points = Array3::from_shape_fn((2, 6, 2), |(s, p, c)| (s + p + c) as f64);
    let items: Vec<PlotItem> = vec![wave(8).into(), image.into(), points.into()];
    let fig = render(
        items,
        &PlotConfig::default(),
        Some(&ConfigUpdate::default().columns(3)),
    )
    .unwrap();

    assert!(matches!(fig.subplot(1).unwrap().traces()[0], Trace::Line(_)));
    let Trace::Image(img) = &fig.subplot(2).unwrap().traces()[0] else {
        panic!("expected an image");
    };
    assert_eq!((img.rows, img.cols), (3, 4));
    assert_eq!(img.data[5], 5.0);
    assert_eq!(img.value_range(), Some((0.0, 11.0)));

    let scatter = fig.subplot(3).unwrap().traces();
    assert_eq!(scatter.len(), 2);
    let Trace::Scatter(first) = &scatter[0] else {
        panic!("expected scatter");
    };
    assert_eq!(first.points.len(), 6);
    assert_eq!(first.points[1], (1.0, 2.0));
}

#[test]
fn rank2_lines_get_one_trace_per_row() {
    let rows = Array2::from_shape_fn((3, 5), |(r, c)| (r * c) as f64);
    let d = DrawDescriptor::builder(rows, PlotKind::Plot)
        .independent_axis_values(Array2::from_shape_fn((3, 5), |(_, c)| c as f64 * 10.0))
        .series_labels(["a", "b", "c"])
        .build()
        .unwrap();
    let fig = render([d], &PlotConfig::default(), None).unwrap();
    let traces = fig.subplot(1).unwrap().traces();
    assert_eq!(traces.len(), 3);
    let labels: Vec<_> = traces.iter().map(|t| t.label()).collect();
    assert_eq!(labels, [Some("a"), Some("b"), Some("c")]);
    let Trace::Line(second) = &traces[1] else {
        panic!("expected a line");
    };
    assert_eq!(second.x, [0.0, 10.0, 20.0, 30.0, 40.0]);
    assert_eq!(second.y, [0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn hist_counts_every_value() {
    let values = Array1::from_iter((0..40).map(|i| ((i * 7) % 13) as f64));
    let d = DrawDescriptor::builder(values, PlotKind::Hist).build().unwrap();
    let fig = render([d], &PlotConfig::default(), None).unwrap();
    let Trace::Histogram(h) = &fig.subplot(1).unwrap().traces()[0] else {
        panic!("expected a histogram");
    };
    assert_eq!(h.bins.total(), 40);
    assert_eq!(h.bins.edges.len(), h.bins.counts.len() + 1);
}

#[test]
fn bar_and_boxplot_kinds_draw() {
    let bars = DrawDescriptor::builder(Array1::from(vec![3.0, 1.0, 2.0]), PlotKind::Bar)
        .build()
        .unwrap();
    let boxes = DrawDescriptor::builder(
        Array2::from_shape_fn((2, 9), |(r, c)| (r * 10 + c) as f64),
        PlotKind::Boxplot,
    )
    .build()
    .unwrap();
    let fig = render(
        [PlotItem::from(bars), PlotItem::from(boxes)],
        &PlotConfig::default(),
        None,
    )
    .unwrap();

    let Trace::Bar(b) = &fig.subplot(1).unwrap().traces()[0] else {
        panic!("expected bars");
    };
    assert_eq!(b.x, [0.0, 1.0, 2.0]);
    assert_eq!(b.heights, [3.0, 1.0, 2.0]);

    let Trace::Boxplot(bp) = &fig.subplot(2).unwrap().traces()[0] else {
        panic!("expected a boxplot");
    };
    assert_eq!(bp.positions, [1.0, 2.0]);
    assert_eq!(bp.labels, ["graph 1", "graph 2"]);
    let first = bp.boxes[0].as_ref().expect("finite values");
    assert_eq!(first.median, 4.0);
}

#[test]
fn descriptor_axis_settings_are_applied() {
    let d = DrawDescriptor::builder(wave(10), PlotKind::Plot)
        .title("custom")
        .x_label("time")
        .y_label("value")
        .y_limits((Some(-2.0), Some(2.0)))
        .invert_y_axis(true)
        .build()
        .unwrap();
    let fig = render([d], &PlotConfig::default(), None).unwrap();
    let axes = fig.subplot(1).unwrap();
    assert_eq!(axes.title(), Some("custom"));
    assert_eq!((axes.x_label(), axes.y_label()), ("time", "value"));
    assert!(axes.y_inverted() && !axes.x_inverted());
    let y = axes.y_range();
    assert_eq!((y.low, y.high, y.inverted), (-2.0, 2.0, true));
}

#[test]
fn rank2_default_kind_can_be_overridden() {
    let cfg = PlotConfig::from_update(&ConfigUpdate::default().plot_kind(2, PlotKind::Plot).unwrap())
        .unwrap();
    let fig = render([Array2::<f64>::zeros((2, 4))], &cfg, None).unwrap();
    assert_eq!(fig.subplot(1).unwrap().traces().len(), 2);
}

#[test]
fn scalar_array_has_unsupported_rank() {
    let err = render(
        [ArrayD::<f64>::zeros(IxDyn(&[]))],
        &PlotConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedRank { rank: 0 }), "got {err:?}");
}

#[test]
fn very_wide_grid_renders() {
    let fig = render(
        [vec![1.0, 2.0]],
        &PlotConfig::default(),
        Some(&ConfigUpdate::default().columns(usize::MAX)),
    )
    .unwrap();
    assert_eq!((fig.rows(), fig.cols()), (1, usize::MAX));
    assert_eq!(fig.subplot(1).unwrap().position(), (0, 0));
    assert_eq!(fig.subplots().count(), 1);
}

#[test]
fn failures_abort_the_whole_render() {
    let err = render(
        [ArrayD::<f64>::zeros(IxDyn(&[1, 1, 1, 1]))],
        &PlotConfig::default(),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedRank { rank: 4 }));

    let items: Vec<PlotItem> = vec![
        wave(4).into(),
        ArrayD::<f64>::zeros(IxDyn(&[2, 2, 2, 2])).into(),
    ];
    assert!(render(items, &PlotConfig::default(), None).is_err());

    let err = render(Vec::<PlotItem>::new(), &PlotConfig::default(), None).unwrap_err();
    assert!(matches!(err, Error::InputType(_)));

    let err = render(
        [wave(3)],
        &PlotConfig::default(),
        Some(&ConfigUpdate::default().columns(0)),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn ragged_rows_are_rejected() {
    let err = PlotItem::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
    assert!(matches!(err, Error::InputType(_)));
    let ok = PlotItem::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    assert!(matches!(ok, PlotItem::Array(ref a) if a.shape() == [2, 2]));
}

#[test]
fn session_keeps_overrides() {
    let mut session = Session::default();
    let fig = session
        .render(
            [wave(5), wave(5), wave(5)],
            Some(&ConfigUpdate::default().columns(3)),
        )
        .unwrap();
    assert_eq!((fig.rows(), fig.cols()), (1, 3));
    assert_eq!(session.config().columns(), 3);

    let fig = session.render([wave(5), wave(5)], None).unwrap();
    assert_eq!((fig.rows(), fig.cols()), (1, 3));

    assert!(
        session
            .render([wave(5)], Some(&ConfigUpdate::default().line_width(-1.0)))
            .is_err()
    );
    assert_eq!(session.config().columns(), 3);
    assert_eq!(session.config().line_width(), 2.0);
}
