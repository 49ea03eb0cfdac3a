// File: crates/strata-core/tests/graph.rs
// Purpose: End-to-end graph construction and render cycles on a recording surface.

use std::cell::RefCell;
use std::rc::Rc;

use strata_core::{
    Color, Domain, DrawCommand, Frame, Graph, GraphArgs, GraphError, Interpolation, Palette, Point, RecordingHost,
    RecordingSurface, Renderer, Series, StackOffset, StackedData, Surface, Window,
};

fn two_series() -> Vec<Series> {
    vec![
        Series::with_data("a", vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]),
        Series::with_data("b", vec![(0.0, 2.0), (1.0, 2.0), (2.0, 2.0)]),
    ]
}

fn graph(args: GraphArgs) -> Graph<RecordingSurface> {
    Graph::new(&mut RecordingHost::new(), args).expect("graph should initialize")
}

/// Renderer whose draw step always fails.
struct Broken;

impl Renderer for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn domain(&self, _stacked: &StackedData) -> anyhow::Result<Domain> {
        Ok(Domain::new((0.0, 100.0), (0.0, 100.0)))
    }

    fn render(&self, _frame: &Frame<'_>, _surface: &mut dyn Surface) -> anyhow::Result<()> {
        anyhow::bail!("draw failed")
    }
}

#[test]
fn two_series_scenario() {
    let mut g = graph(GraphArgs::new(two_series()).with_size(400, 250));
    g.render().unwrap();

    let stacked = g.stacked_data();
    let y0: Vec<Vec<f64>> = stacked.iter().map(|l| l.iter().map(|p| p.y0).collect()).collect();
    let y: Vec<Vec<f64>> = stacked.iter().map(|l| l.iter().map(|p| p.y).collect()).collect();
    assert_eq!(y0, vec![vec![0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0]]);
    assert_eq!(y, vec![vec![1.0, 1.0, 1.0], vec![2.0, 2.0, 2.0]]);

    assert_eq!(g.domain().x, (0.0, 2.0));
    assert_eq!(g.domain().y, (0.0, 3.0));
    assert_eq!(g.scales().x.range, (0.0, 400.0));
    assert_eq!(g.scales().y.range, (250.0, 0.0));
    assert_eq!(g.scales().y_magnitude.range, (0.0, 250.0));
}

#[test]
fn defaults_match_construction_contract() {
    let g = graph(GraphArgs::new(two_series()));
    assert_eq!((g.width(), g.height()), (400, 250));
    assert_eq!(g.renderer_name(), Some("stack"));
    assert_eq!(g.interpolation(), Interpolation::Cardinal);
    assert_eq!(g.offset(), StackOffset::Zero);
    assert!(g.window().is_unbounded());
}

#[test]
fn initialization_resolves_domain_and_writes_stack() {
    let g = graph(GraphArgs::new(two_series()));
    assert_eq!(g.domain().y, (0.0, 3.0));
    let b = g.series().get(1).unwrap().stack.as_ref().unwrap();
    assert_eq!(b.iter().map(|p| p.y0).collect::<Vec<_>>(), vec![1.0, 1.0, 1.0]);
}

#[test]
fn dimensions_fall_back_to_measured_host_size() {
    let mut host = RecordingHost::measured(640, 480);
    let g = Graph::new(&mut host, GraphArgs::new(two_series())).unwrap();
    assert_eq!(g.surface().size(), (640, 480));

    let explicit = Graph::new(&mut host, GraphArgs::new(two_series()).with_size(100, 50)).unwrap();
    assert_eq!((explicit.width(), explicit.height()), (100, 50));
}

#[test]
fn initialization_fails_on_invalid_series() {
    let series = vec![
        Series::with_data("a", vec![(0.0, 1.0), (1.0, 1.0)]),
        Series::with_data("b", vec![(0.0, 1.0)]),
    ];
    let err = Graph::new(&mut RecordingHost::new(), GraphArgs::new(series)).unwrap_err();
    assert!(matches!(err, GraphError::Validation(_)));
}

#[test]
fn initialization_fails_on_unknown_default_renderer() {
    let err = Graph::new(&mut RecordingHost::new(), GraphArgs::new(two_series()).with_renderer("pie")).unwrap_err();
    assert!(matches!(err, GraphError::UnknownRenderer(name) if name == "pie"));
}

#[test]
fn initialization_fails_on_unknown_options() {
    let err = Graph::new(&mut RecordingHost::new(), GraphArgs::new(two_series()).with_interpolation("bezier"))
        .unwrap_err();
    assert!(matches!(err, GraphError::UnknownInterpolation(_)));

    let err = Graph::new(&mut RecordingHost::new(), GraphArgs::new(two_series()).with_offset("stream")).unwrap_err();
    assert!(matches!(err, GraphError::UnknownOffset(_)));
}

#[test]
fn render_is_idempotent() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.render().unwrap();
    let (stacked, scales) = (g.stacked_data().clone(), *g.scales());
    let commands = g.surface().commands().to_vec();

    g.update().unwrap();
    assert_eq!(g.stacked_data(), &stacked);
    assert_eq!(g.scales(), &scales);
    assert_eq!(g.surface().commands(), commands.as_slice());
}

#[test]
fn window_clips_points_on_next_render() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.set_x_min(Some(0.0));
    g.render().unwrap();
    assert_eq!(g.domain().x, (1.0, 2.0));

    g.set_window(Window::new(None, Some(2.0)));
    g.render().unwrap();
    assert_eq!(g.domain().x, (0.0, 1.0));

    g.clear_window();
    g.render().unwrap();
    assert_eq!(g.domain().x, (0.0, 2.0));
}

#[test]
fn disabling_a_series_restacks_without_it() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.series_mut().get_mut(0).unwrap().disabled = true;
    g.render().unwrap();

    assert_eq!(g.stacked_data().len(), 1);
    assert_eq!(g.domain().y, (0.0, 2.0));
    let b = g.series().get(1).unwrap().stack.as_ref().unwrap();
    assert!(b.iter().all(|p| p.y0 == 0.0));
}

#[test]
fn no_active_series_renders_with_unit_domain() {
    let series: Vec<Series> = two_series().into_iter().map(|s| s.disabled(true)).collect();
    let mut g = graph(GraphArgs::new(series));
    g.render().unwrap();
    assert!(g.stacked_data().is_empty());
    assert_eq!(*g.domain(), Domain::unit());
}

#[test]
fn set_renderer_unknown_keeps_current() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.set_renderer("line").unwrap();

    let err = g.set_renderer("nonexistent").unwrap_err();
    assert!(matches!(err, GraphError::UnknownRenderer(_)));
    assert_eq!(g.renderer_name(), Some("line"));
}

#[test]
fn switching_renderer_changes_domain_policy() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.set_renderer("line").unwrap();
    g.render().unwrap();
    assert_eq!(g.domain().y, (0.0, 2.0));

    g.set_renderer("bar").unwrap();
    g.render().unwrap();
    assert_eq!(g.domain().x, (0.0, 3.0));
    assert_eq!(g.domain().y, (0.0, 3.0));
}

#[test]
fn stack_renderer_fills_one_band_per_layer() {
    let mut g = graph(GraphArgs::new(two_series()).with_palette(Palette::light()));
    g.render().unwrap();

    let cmds = g.surface().commands();
    assert_eq!(cmds[0], DrawCommand::Clear(Palette::light().background));
    let bands: Vec<_> = cmds.iter().filter(|c| matches!(c, DrawCommand::Area { .. })).collect();
    assert_eq!(bands.len(), 2);
    match bands[1] {
        DrawCommand::Area { upper, lower, color, interpolation } => {
            // top edge of b (y=3) is pixel row 0; its baseline is a's top edge
            assert_eq!(upper, &vec![(0.0, 0.0), (200.0, 0.0), (400.0, 0.0)]);
            assert_eq!(lower.len(), 3);
            assert_eq!(lower[0].0, 0.0);
            assert_eq!(*color, Palette::light().color(1));
            assert_eq!(*interpolation, Interpolation::Cardinal);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn series_color_overrides_palette() {
    let red = Color::from_rgb(255, 0, 0);
    let series = vec![two_series().remove(0).with_color(red)];
    let mut g = graph(GraphArgs::new(series).with_renderer("line").with_interpolation("linear"));
    g.render().unwrap();

    let stroke = g.surface().commands().iter().find_map(|c| match c {
        DrawCommand::Polyline { stroke, .. } => Some(*stroke),
        _ => None,
    });
    let stroke = stroke.expect("line renderer strokes a polyline");
    assert_eq!(stroke.color, red);
    assert_eq!(stroke.interpolation, Interpolation::Linear);
}

#[test]
fn bar_renderer_emits_a_rect_per_point() {
    let mut g = graph(GraphArgs::new(two_series()).with_renderer("bar"));
    g.render().unwrap();
    let rects = g.surface().commands().iter().filter(|c| matches!(c, DrawCommand::Rect { .. })).count();
    assert_eq!(rects, 6);
}

#[test]
fn update_callbacks_fire_in_order_after_each_render() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = graph(GraphArgs::new(two_series()));
    for id in 0..3 {
        let log = Rc::clone(&log);
        g.on_update(move || log.borrow_mut().push(id));
    }

    g.render().unwrap();
    g.update().unwrap();
    assert_eq!(*log.borrow(), vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn failed_render_keeps_prior_state_and_skips_callbacks() {
    let calls = Rc::new(RefCell::new(0));
    let mut g = graph(GraphArgs::new(two_series()));
    {
        let calls = Rc::clone(&calls);
        g.on_update(move || *calls.borrow_mut() += 1);
    }
    g.render().unwrap();
    let (stacked, domain) = (g.stacked_data().clone(), *g.domain());

    g.register_renderer(Box::new(Broken));
    g.set_renderer("broken").unwrap();
    let err = g.render().unwrap_err();
    assert_eq!(err.to_string(), "draw failed");
    assert!(matches!(err, GraphError::Renderer(_)));

    assert_eq!(g.stacked_data(), &stacked);
    assert_eq!(g.domain(), &domain);
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn failing_hook_propagates_from_render() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.render().unwrap();
    let domain = *g.domain();

    g.add_data_hook("boom", |_| anyhow::bail!("normalization failed"));
    g.set_x_min(Some(0.5));
    let err = g.render().unwrap_err();
    assert!(err.is_hook());
    assert_eq!(g.domain(), &domain);
}

#[test]
fn data_hook_feeds_the_renderer() {
    let mut g = graph(GraphArgs::new(two_series()));
    g.add_data_hook("scale-by-ten", |layers| {
        Ok(layers
            .into_iter()
            .map(|l| l.into_iter().map(|p| Point::new(p.x, p.y * 10.0)).collect())
            .collect())
    });
    g.render().unwrap();
    assert_eq!(g.domain().y, (0.0, 30.0));
    assert_eq!(g.stack_engine().data_hooks().collect::<Vec<_>>(), vec!["scale-by-ten"]);
}

#[test]
fn replacing_the_active_renderer_takes_effect_on_next_render() {
    struct Tall;
    impl Renderer for Tall {
        fn name(&self) -> &str {
            "stack"
        }
        fn domain(&self, _stacked: &StackedData) -> anyhow::Result<Domain> {
            Ok(Domain::new((0.0, 1.0), (0.0, 99.0)))
        }
        fn render(&self, _frame: &Frame<'_>, _surface: &mut dyn Surface) -> anyhow::Result<()> {
            Ok(())
        }
    }

    let mut g = graph(GraphArgs::new(two_series()));
    g.register_renderer(Box::new(Tall));
    g.render().unwrap();
    assert_eq!(g.domain().y, (0.0, 99.0));
}

#[test]
fn expand_offset_normalizes_domain() {
    let mut g = graph(GraphArgs::new(two_series()).with_offset("expand"));
    g.render().unwrap();
    let (lo, hi) = g.domain().y;
    assert_eq!(lo, 0.0);
    assert!((hi - 1.0).abs() < 1e-12, "expanded stack should top out at 1, got {hi}");

    g.set_offset(StackOffset::Zero);
    g.render().unwrap();
    assert_eq!(g.domain().y, (0.0, 3.0));
}

#[test]
fn data_domain_reads_first_series() {
    let g = graph(GraphArgs::new(two_series()));
    assert_eq!(g.data_domain(), Some((0.0, 2.0)));
}

#[test]
fn panicking_callback_stops_the_remaining_ones() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut g = graph(GraphArgs::new(two_series()));
    {
        let log = Rc::clone(&log);
        g.on_update(move || log.borrow_mut().push("first"));
    }
    g.on_update(|| panic!("listener failed"));
    {
        let log = Rc::clone(&log);
        g.on_update(move || log.borrow_mut().push("third"));
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| g.render()));
    assert!(result.is_err(), "panic should unwind out of render");
    assert_eq!(*log.borrow(), vec!["first"]);
}

#[test]
fn palette_presets_are_selectable_by_name() {
    let presets = strata_core::palette::presets();
    let names: Vec<&str> = presets.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["dark", "light", "solarized"]);

    let solarized = presets.into_iter().find(|p| p.name == "solarized").unwrap();
    let mut g = graph(GraphArgs::new(two_series()).with_palette(solarized.clone()));
    g.render().unwrap();
    assert_eq!(g.surface().commands()[0], DrawCommand::Clear(solarized.background));
}
