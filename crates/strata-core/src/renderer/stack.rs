// File: crates/strata-core/src/renderer/stack.rs
// Summary: Stacked-area renderer: one filled band per layer between its baseline and top edge.

use crate::domain::{stacked_domain, Domain, Padding};
use crate::stack::StackedData;
use crate::surface::Surface;

use super::{Frame, Renderer};

#[derive(Clone, Copy, Debug, Default)]
pub struct StackRenderer {
    pub padding: Padding,
}

impl StackRenderer {
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }
}

impl Renderer for StackRenderer {
    fn name(&self) -> &str {
        "stack"
    }

    fn domain(&self, stacked: &StackedData) -> anyhow::Result<Domain> {
        Ok(stacked_domain(stacked).padded(&self.padding))
    }

    fn render(&self, frame: &Frame<'_>, surface: &mut dyn Surface) -> anyhow::Result<()> {
        surface.clear(frame.palette.background);
        let (x, y) = (&frame.scales.x, &frame.scales.y);

        for (i, layer) in frame.stacked.iter().enumerate() {
            if layer.is_empty() {
                continue;
            }
            let upper: Vec<(f64, f64)> = layer.iter().map(|p| (x.map(p.x), y.map(p.top()))).collect();
            let lower: Vec<(f64, f64)> = layer.iter().map(|p| (x.map(p.x), y.map(p.y0))).collect();
            surface.fill_area(&upper, &lower, frame.layer_color(i), frame.interpolation);
        }
        Ok(())
    }
}
