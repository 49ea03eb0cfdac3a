// File: crates/strata-core/src/lib.rs
// Summary: Core library entry point; exports the series → stack → domain → renderer pipeline.

pub mod domain;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod palette;
pub mod renderer;
pub mod scale;
pub mod series;
pub mod stack;
pub mod surface;
pub mod types;
pub mod validate;
pub mod window;

pub use domain::{Domain, Padding};
pub use error::{GraphError, ValidationError};
pub use geometry::Rect;
pub use graph::{Graph, GraphArgs};
pub use palette::Palette;
pub use renderer::{Frame, Renderer, RendererRegistry};
pub use scale::{LinearScale, Scales};
pub use series::{Point, Series, SeriesCollection};
pub use stack::{stack_layers, Layers, StackEngine, StackOffset, StackedData, StackedPoint};
pub use surface::{Color, DrawCommand, Host, Interpolation, RecordingHost, RecordingSurface, Stroke, Surface};
pub use validate::validate;
pub use window::Window;
