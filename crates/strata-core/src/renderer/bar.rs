// File: crates/strata-core/src/renderer/bar.rs
// Summary: Stacked bar renderer; the x domain is widened by one bar so the last bar fits.

use crate::domain::{frequent_interval, stacked_domain, Domain, Padding};
use crate::geometry::Rect;
use crate::stack::StackedData;
use crate::surface::Surface;

use super::{Frame, Renderer};

#[derive(Clone, Copy, Debug)]
pub struct BarRenderer {
    pub padding: Padding,
    /// Fraction of each slot left empty between bars, in `[0, 1)`.
    pub gap: f64,
}

impl Default for BarRenderer {
    fn default() -> Self {
        Self { padding: Padding::none(), gap: 0.05 }
    }
}

impl BarRenderer {
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap.clamp(0.0, 0.95);
        self
    }
}

impl Renderer for BarRenderer {
    fn name(&self) -> &str {
        "bar"
    }

    fn domain(&self, stacked: &StackedData) -> anyhow::Result<Domain> {
        let mut domain = stacked_domain(stacked);
        if let Some(interval) = frequent_interval(stacked) {
            domain.x.1 += interval;
        }
        Ok(domain.padded(&self.padding))
    }

    fn render(&self, frame: &Frame<'_>, surface: &mut dyn Surface) -> anyhow::Result<()> {
        surface.clear(frame.palette.background);
        let scales = frame.scales;

        let slot = match frequent_interval(frame.stacked) {
            Some(interval) => scales.x.map(scales.x.domain.0 + interval) - scales.x.map(scales.x.domain.0),
            None => f64::from(surface.size().0),
        };
        let bar_width = slot * (1.0 - self.gap);

        for (i, layer) in frame.stacked.iter().enumerate() {
            let color = frame.layer_color(i);
            for p in layer {
                let left = scales.x.map(p.x);
                let top = scales.y.map(p.top().max(p.y0));
                let height = scales.y_magnitude.map(p.y.abs()) - scales.y_magnitude.map(0.0);
                surface.fill_rect(Rect::from_ltwh(left, top, bar_width, height), color);
            }
        }
        Ok(())
    }
}
