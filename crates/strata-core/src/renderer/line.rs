// File: crates/strata-core/src/renderer/line.rs
// Summary: Line renderer: each layer drawn unstacked at its own y values.

use crate::domain::{unstacked_domain, Domain, Padding};
use crate::stack::StackedData;
use crate::surface::{Stroke, Surface};

use super::{Frame, Renderer};

#[derive(Clone, Copy, Debug)]
pub struct LineRenderer {
    pub padding: Padding,
    pub stroke_width: f32,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self { padding: Padding::none(), stroke_width: 2.0 }
    }
}

impl LineRenderer {
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

impl Renderer for LineRenderer {
    fn name(&self) -> &str {
        "line"
    }

    fn domain(&self, stacked: &StackedData) -> anyhow::Result<Domain> {
        Ok(unstacked_domain(stacked).padded(&self.padding))
    }

    fn render(&self, frame: &Frame<'_>, surface: &mut dyn Surface) -> anyhow::Result<()> {
        surface.clear(frame.palette.background);
        let (x, y) = (&frame.scales.x, &frame.scales.y);

        for (i, layer) in frame.stacked.iter().enumerate() {
            if layer.len() < 2 {
                continue;
            }
            let points: Vec<(f64, f64)> = layer.iter().map(|p| (x.map(p.x), y.map(p.y))).collect();
            let stroke = Stroke {
                color: frame.layer_color(i),
                width: self.stroke_width,
                interpolation: frame.interpolation,
            };
            surface.stroke_polyline(&points, &stroke);
        }
        Ok(())
    }
}
