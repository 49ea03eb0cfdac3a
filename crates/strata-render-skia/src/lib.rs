// File: crates/strata-render-skia/src/lib.rs
// Summary: Skia CPU raster implementation of the strata-core Surface/Host traits, with PNG output.

use anyhow::Result;
use skia_safe as skia;
use strata_core::{Color, Host, Interpolation, Rect, Stroke, Surface};

/// Tension of cardinal splines; 0 is Catmull-Rom, 1 is straight segments.
pub const CARDINAL_TENSION: f64 = 0.7;

/// Raster surface backed by a Skia N32 premultiplied bitmap.
pub struct SkiaSurface {
    surface: skia::Surface,
    width: u32,
    height: u32,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let size = (i32::try_from(width)?, i32::try_from(height)?);
        let surface = skia::surfaces::raster_n32_premul(size)
            .ok_or_else(|| anyhow::anyhow!("failed to create {width}x{height} raster surface"))?;
        Ok(Self { surface, width, height })
    }

    /// Encode the current pixels as PNG.
    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Encode as PNG and write to `path`, creating parent directories.
    pub fn write_png(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.encode_png()?;
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), "wrote png");
        Ok(())
    }
}

impl Surface for SkiaSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.surface.canvas().clear(to_skia(color));
    }

    fn fill_area(&mut self, upper: &[(f64, f64)], lower: &[(f64, f64)], color: Color, interpolation: Interpolation) {
        let (Some(&first), Some(&last)) = (upper.first(), lower.last()) else { return };

        // Both edges are shaped left to right; the lower one is then walked backwards.
        let back: Vec<Segment> = edge_segments(lower, interpolation).iter().rev().map(|s| s.reversed()).collect();

        let mut path = skia::Path::new();
        path.move_to(pt(first));
        append(&mut path, &edge_segments(upper, interpolation));
        path.line_to(pt(last));
        append(&mut path, &back);
        path.close();

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(to_skia(color));
        self.surface.canvas().draw_path(&path, &paint);
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        let Some(&first) = points.first() else { return };

        let mut path = skia::Path::new();
        path.move_to(pt(first));
        append(&mut path, &edge_segments(points, stroke.interpolation));

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(stroke.width);
        paint.set_color(to_skia(stroke.color));
        self.surface.canvas().draw_path(&path, &paint);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(to_skia(color));
        let r = skia::Rect::from_ltrb(rect.left as f32, rect.top as f32, rect.right as f32, rect.bottom as f32);
        self.surface.canvas().draw_rect(r, &paint);
    }
}

/// Host creating Skia raster surfaces; `measured` plays the element's own size.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkiaHost {
    pub measured: Option<(u32, u32)>,
}

impl SkiaHost {
    pub const fn new() -> Self {
        Self { measured: None }
    }
}

impl Host for SkiaHost {
    type Surface = SkiaSurface;

    fn measured_size(&self) -> Option<(u32, u32)> {
        self.measured
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Result<SkiaSurface> {
        SkiaSurface::new(width, height)
    }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn pt((x, y): (f64, f64)) -> (f32, f32) {
    (x as f32, y as f32)
}

type Xy = (f64, f64);

/// One piece of an edge, in device space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    Line { from: Xy, to: Xy },
    Cubic { from: Xy, c1: Xy, c2: Xy, to: Xy },
}

impl Segment {
    pub fn start(&self) -> Xy {
        match *self {
            Segment::Line { from, .. } | Segment::Cubic { from, .. } => from,
        }
    }

    pub fn end(&self) -> Xy {
        match *self {
            Segment::Line { to, .. } | Segment::Cubic { to, .. } => to,
        }
    }

    /// The same curve traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        match *self {
            Segment::Line { from, to } => Segment::Line { from: to, to: from },
            Segment::Cubic { from, c1, c2, to } => Segment::Cubic { from: to, c1: c2, c2: c1, to: from },
        }
    }
}

/// Shape `points` left to right with `interpolation`. The first segment starts at `points[0]`.
pub fn edge_segments(points: &[Xy], interpolation: Interpolation) -> Vec<Segment> {
    match interpolation {
        Interpolation::Linear => points.windows(2).map(|w| Segment::Line { from: w[0], to: w[1] }).collect(),
        Interpolation::StepAfter => points
            .windows(2)
            .flat_map(|w| {
                let corner = (w[1].0, w[0].1);
                [Segment::Line { from: w[0], to: corner }, Segment::Line { from: corner, to: w[1] }]
            })
            .collect(),
        Interpolation::Cardinal => {
            if points.len() < 3 {
                return edge_segments(points, Interpolation::Linear);
            }
            let k = (1.0 - CARDINAL_TENSION) / 2.0;
            let last = points.len() - 1;
            let tangent = |i: usize| {
                let (prev, next) = (points[i.saturating_sub(1)], points[(i + 1).min(last)]);
                (k * (next.0 - prev.0), k * (next.1 - prev.1))
            };
            (0..last)
                .map(|i| {
                    let (p0, p1) = (points[i], points[i + 1]);
                    let (t0, t1) = (tangent(i), tangent(i + 1));
                    Segment::Cubic {
                        from: p0,
                        c1: (p0.0 + t0.0, p0.1 + t0.1),
                        c2: (p1.0 - t1.0, p1.1 - t1.1),
                        to: p1,
                    }
                })
                .collect()
        }
    }
}

/// Append `segments`; the path must already sit at the first segment's start.
fn append(path: &mut skia::Path, segments: &[Segment]) {
    for seg in segments {
        match *seg {
            Segment::Line { to, .. } => {
                path.line_to(pt(to));
            }
            Segment::Cubic { c1, c2, to, .. } => {
                path.cubic_to(pt(c1), pt(c2), pt(to));
            }
        }
    }
}
