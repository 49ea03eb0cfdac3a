// File: crates/strata-core/src/surface.rs
// Summary: Drawing-surface and host collaborator traits, plus a recording surface for headless use.
// Notes:
// - Renderers only emit polylines, filled bands and rectangles in surface pixels.
//   How those become pixels is the surface backend's business.

use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;
use crate::geometry::Rect;

/// Straight RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// How a polyline connects its points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    Linear,
    /// Horizontal then vertical.
    StepAfter,
    /// Cardinal spline through every point.
    #[default]
    Cardinal,
}

impl Interpolation {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::StepAfter => "step-after",
            Self::Cardinal => "cardinal",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(Self::Linear),
            "step-after" => Ok(Self::StepAfter),
            "cardinal" => Ok(Self::Cardinal),
            other => Err(GraphError::UnknownInterpolation(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub interpolation: Interpolation,
}

/// A fixed-size drawing target.
pub trait Surface {
    /// Size in pixels.
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: Color);
    /// Fill the band between two edges, both given left to right in surface pixels.
    fn fill_area(&mut self, upper: &[(f64, f64)], lower: &[(f64, f64)], color: Color, interpolation: Interpolation);
    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke);
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// The element a graph is attached to; it measures itself and creates the surface.
pub trait Host {
    type Surface: Surface;

    /// Measured size of the element, if it has one.
    fn measured_size(&self) -> Option<(u32, u32)> {
        None
    }

    fn create_surface(&mut self, width: u32, height: u32) -> anyhow::Result<Self::Surface>;
}

/// One primitive recorded by `RecordingSurface`.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Area { upper: Vec<(f64, f64)>, lower: Vec<(f64, f64)>, color: Color, interpolation: Interpolation },
    Polyline { points: Vec<(f64, f64)>, stroke: Stroke },
    Rect { rect: Rect, color: Color },
}

/// Surface that keeps the primitives of the current frame instead of rasterizing them.
/// `clear` starts a new frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_area(&mut self, upper: &[(f64, f64)], lower: &[(f64, f64)], color: Color, interpolation: Interpolation) {
        self.commands.push(DrawCommand::Area {
            upper: upper.to_vec(),
            lower: lower.to_vec(),
            color,
            interpolation,
        });
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], stroke: &Stroke) {
        self.commands.push(DrawCommand::Polyline { points: points.to_vec(), stroke: *stroke });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }
}

/// Host for headless graphs. `measured` stands in for the element's own size.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordingHost {
    pub measured: Option<(u32, u32)>,
}

impl RecordingHost {
    pub const fn new() -> Self {
        Self { measured: None }
    }

    pub const fn measured(width: u32, height: u32) -> Self {
        Self { measured: Some((width, height)) }
    }
}

impl Host for RecordingHost {
    type Surface = RecordingSurface;

    fn measured_size(&self) -> Option<(u32, u32)> {
        self.measured
    }

    fn create_surface(&mut self, width: u32, height: u32) -> anyhow::Result<RecordingSurface> {
        Ok(RecordingSurface::new(width, height))
    }
}
