// File: crates/strata-core/src/renderer/mod.rs
// Summary: Renderer trait, per-frame render context, and the registry holding the active renderer.

use std::collections::BTreeMap;

use crate::domain::Domain;
use crate::error::GraphError;
use crate::palette::Palette;
use crate::scale::Scales;
use crate::series::SeriesCollection;
use crate::stack::StackedData;
use crate::surface::{Color, Interpolation, Surface};

#[cfg(feature = "renderer-bar")]
mod bar;
#[cfg(feature = "renderer-line")]
mod line;
#[cfg(feature = "renderer-stack")]
mod stack;

#[cfg(feature = "renderer-bar")]
pub use bar::BarRenderer;
#[cfg(feature = "renderer-line")]
pub use line::LineRenderer;
#[cfg(feature = "renderer-stack")]
pub use stack::StackRenderer;

/// Turns stacked data into primitives on a surface.
///
/// Each renderer kind owns its domain policy: the graph only asks for it.
pub trait Renderer {
    /// Unique registry key.
    fn name(&self) -> &str;
    /// x/y extents for the given stacked data.
    fn domain(&self, stacked: &StackedData) -> anyhow::Result<Domain>;
    fn render(&self, frame: &Frame<'_>, surface: &mut dyn Surface) -> anyhow::Result<()>;
}

/// Everything a renderer may read while drawing one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub stacked: &'a StackedData,
    pub scales: &'a Scales,
    pub series: &'a SeriesCollection,
    pub interpolation: Interpolation,
    pub palette: &'a Palette,
}

impl Frame<'_> {
    /// Color for the `layer`-th stacked layer (the `layer`-th active series).
    pub fn layer_color(&self, layer: usize) -> Color {
        self.series
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.disabled)
            .nth(layer)
            .map(|(index, s)| s.color.unwrap_or_else(|| self.palette.color(index)))
            .unwrap_or_else(|| self.palette.color(layer))
    }
}

/// Named renderers plus the single active one.
#[derive(Default)]
pub struct RendererRegistry {
    renderers: BTreeMap<String, Box<dyn Renderer>>,
    active: Option<String>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the renderer registered under `renderer.name()`.
    pub fn register(&mut self, renderer: Box<dyn Renderer>) {
        self.renderers.insert(renderer.name().to_string(), renderer);
    }

    /// Make `name` active. Fails without touching the current selection if it is unknown.
    pub fn set_active(&mut self, name: &str) -> Result<(), GraphError> {
        if !self.renderers.contains_key(name) {
            return Err(GraphError::UnknownRenderer(name.to_string()));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    pub fn active(&self) -> Option<&dyn Renderer> {
        let name = self.active.as_deref()?;
        self.renderers.get(name).map(|r| r.as_ref())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Renderer> {
        self.renderers.get(name).map(|r| r.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.renderers.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.renderers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl std::fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("renderers", &self.renderers.keys().collect::<Vec<_>>())
            .field("active", &self.active)
            .finish()
    }
}

/// The renderer kinds compiled into this build.
pub fn builtin() -> Vec<Box<dyn Renderer>> {
    #[allow(unused_mut)]
    let mut out: Vec<Box<dyn Renderer>> = Vec::new();
    #[cfg(feature = "renderer-stack")]
    out.push(Box::new(StackRenderer::default()));
    #[cfg(feature = "renderer-line")]
    out.push(Box::new(LineRenderer::default()));
    #[cfg(feature = "renderer-bar")]
    out.push(Box::new(BarRenderer::default()));
    out
}
