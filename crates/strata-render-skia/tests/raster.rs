// File: crates/strata-render-skia/tests/raster.rs
// Purpose: Render graphs onto a Skia raster surface and check the decoded PNG pixels.

use strata_core::{Graph, GraphArgs, Interpolation, Palette, Series, Surface};
use strata_render_skia::{edge_segments, Segment, SkiaHost, SkiaSurface};

fn two_series() -> Vec<Series> {
    vec![
        Series::with_data("a", vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]),
        Series::with_data("b", vec![(0.0, 2.0), (1.0, 2.0), (2.0, 2.0)]),
    ]
}

fn render(args: GraphArgs) -> image::RgbaImage {
    let mut graph = Graph::new(&mut SkiaHost::new(), args).expect("graph");
    graph.render().expect("render");
    let bytes = graph.surface_mut().encode_png().expect("png");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    image::load_from_memory(&bytes).expect("decode png").to_rgba8()
}

fn rgba(c: strata_core::Color) -> [u8; 4] {
    [c.r, c.g, c.b, c.a]
}

#[test]
fn stacked_bands_fill_their_rows() {
    let palette = Palette::dark();
    let img = render(GraphArgs::new(two_series()).with_size(400, 250));
    assert_eq!(img.dimensions(), (400, 250));

    // a spans rows 250..~167, b spans ~167..0
    assert_eq!(img.get_pixel(200, 230).0, rgba(palette.color(0)));
    assert_eq!(img.get_pixel(200, 50).0, rgba(palette.color(1)));
}

#[test]
fn line_renderer_leaves_background_away_from_lines() {
    let palette = Palette::light();
    let img = render(
        GraphArgs::new(two_series())
            .with_size(200, 100)
            .with_renderer("line")
            .with_palette(palette.clone()),
    );
    // y domain is 0..2, so a sits at row 50 and b at row 0; row 90 is empty
    assert_eq!(img.get_pixel(100, 90).0, rgba(palette.background));
}

#[test]
fn host_measured_size_is_used() {
    let mut host = SkiaHost { measured: Some((320, 180)) };
    let graph = Graph::new(&mut host, GraphArgs::new(two_series())).expect("graph");
    assert_eq!(graph.surface().size(), (320, 180));
}

#[test]
fn write_png_creates_file() {
    let mut surface = SkiaSurface::new(16, 16).expect("surface");
    surface.clear(strata_core::Color::from_rgb(10, 20, 30));
    let out = std::path::PathBuf::from("target/test_out/blank.png");
    surface.write_png(&out).expect("write png");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");
}

/// Sample a segment list as the polyline of its line endpoints.
fn outline(segments: &[Segment]) -> Vec<(f64, f64)> {
    let mut pts = vec![segments[0].start()];
    pts.extend(segments.iter().map(Segment::end));
    pts
}

#[test]
fn reversed_step_edge_retraces_the_forward_edge() {
    let edge = [(0.0, 100.0), (10.0, 50.0), (20.0, 80.0)];
    let forward = edge_segments(&edge, Interpolation::StepAfter);
    assert_eq!(outline(&forward), vec![(0.0, 100.0), (10.0, 100.0), (10.0, 50.0), (20.0, 50.0), (20.0, 80.0)]);

    let back: Vec<Segment> = forward.iter().rev().map(Segment::reversed).collect();
    let mut retraced = outline(&back);
    retraced.reverse();
    assert_eq!(retraced, outline(&forward));
}

#[test]
fn reversed_cardinal_edge_swaps_control_points() {
    let edge = [(0.0, 0.0), (10.0, 20.0), (20.0, 5.0)];
    let forward = edge_segments(&edge, Interpolation::Cardinal);
    assert_eq!(forward.len(), 2);
    match (forward[0], forward[0].reversed()) {
        (Segment::Cubic { from, c1, c2, to }, Segment::Cubic { from: rf, c1: rc1, c2: rc2, to: rt }) => {
            assert_eq!((rf, rc1, rc2, rt), (to, c2, c1, from));
        }
        other => panic!("expected cubic segments, got {other:?}"),
    }
}

#[test]
fn step_after_bands_share_their_edge() {
    // a steps from 1 to 3 at x=1, b sits on top with thickness 1
    let series = vec![
        Series::with_data("a", vec![(0.0, 1.0), (1.0, 3.0), (2.0, 3.0)]),
        Series::with_data("b", vec![(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]),
    ];
    let palette = Palette::dark();
    let img = render(GraphArgs::new(series).with_size(200, 100).with_interpolation("step-after"));

    // y domain 0..4 -> 25px per unit; on x in [0,100) a fills rows 75..100 and b rows 50..75
    assert_eq!(img.get_pixel(50, 87).0, rgba(palette.color(0)));
    assert_eq!(img.get_pixel(50, 62).0, rgba(palette.color(1)));
    assert_eq!(img.get_pixel(50, 37).0, rgba(palette.background));
    // on x in [100,200] a fills rows 25..100 and b rows 0..25
    assert_eq!(img.get_pixel(150, 62).0, rgba(palette.color(0)));
    assert_eq!(img.get_pixel(150, 12).0, rgba(palette.color(1)));
}
