// File: crates/strata-core/src/graph.rs
// Summary: Graph controller; owns series, window, renderers and surface, and runs the render cycle.
// Notes:
// - A render computes stack, domain and scales into locals and commits them only
//   after the active renderer has drawn. A failed render keeps the prior state.

use std::fmt;

use crate::domain::Domain;
use crate::error::GraphError;
use crate::palette::Palette;
use crate::renderer::{self, Frame, Renderer, RendererRegistry};
use crate::scale::Scales;
use crate::series::{Point, SeriesCollection};
use crate::stack::{self, Layers, StackEngine, StackOffset, StackedData};
use crate::surface::{Host, Interpolation, Surface};
use crate::types::{DEFAULT_HEIGHT, DEFAULT_INTERPOLATION, DEFAULT_OFFSET, DEFAULT_RENDERER, DEFAULT_WIDTH};
use crate::validate::validate;
use crate::window::Window;

/// Construction parameters for a `Graph`.
#[derive(Clone, Debug)]
pub struct GraphArgs {
    pub series: SeriesCollection,
    /// Falls back to the host's measured width, then `DEFAULT_WIDTH`.
    pub width: Option<u32>,
    /// Falls back to the host's measured height, then `DEFAULT_HEIGHT`.
    pub height: Option<u32>,
    pub interpolation: String,
    pub renderer: String,
    pub offset: String,
    pub palette: Palette,
}

impl GraphArgs {
    pub fn new(series: impl Into<SeriesCollection>) -> Self {
        Self {
            series: series.into(),
            width: None,
            height: None,
            interpolation: DEFAULT_INTERPOLATION.to_string(),
            renderer: DEFAULT_RENDERER.to_string(),
            offset: DEFAULT_OFFSET.to_string(),
            palette: Palette::default(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_renderer(mut self, name: impl Into<String>) -> Self {
        self.renderer = name.into();
        self
    }

    pub fn with_interpolation(mut self, interpolation: impl Into<String>) -> Self {
        self.interpolation = interpolation.into();
        self
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = offset.into();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

type UpdateCallback = Box<dyn FnMut()>;

pub struct Graph<S: Surface> {
    width: u32,
    height: u32,
    interpolation: Interpolation,
    palette: Palette,
    series: SeriesCollection,
    window: Window,
    stack: StackEngine,
    renderers: RendererRegistry,
    update_callbacks: Vec<UpdateCallback>,
    surface: S,
    stacked_data: StackedData,
    domain: Domain,
    scales: Scales,
}

impl<S: Surface> Graph<S> {
    /// Validate the series, create the surface on `host`, register the built-in
    /// renderers, activate `args.renderer` and resolve the initial domain.
    pub fn new<H>(host: &mut H, args: GraphArgs) -> Result<Self, GraphError>
    where
        H: Host<Surface = S>,
    {
        validate(args.series.as_slice())?;
        let interpolation: Interpolation = args.interpolation.parse()?;
        let offset: StackOffset = args.offset.parse()?;

        let measured = host.measured_size();
        let width = args
            .width
            .filter(|&w| w > 0)
            .or_else(|| measured.map(|(w, _)| w).filter(|&w| w > 0))
            .unwrap_or(DEFAULT_WIDTH);
        let height = args
            .height
            .filter(|&h| h > 0)
            .or_else(|| measured.map(|(_, h)| h).filter(|&h| h > 0))
            .unwrap_or(DEFAULT_HEIGHT);

        let surface = host.create_surface(width, height).map_err(GraphError::Surface)?;

        let mut renderers = RendererRegistry::new();
        for r in renderer::builtin() {
            renderers.register(r);
        }
        renderers.set_active(&args.renderer)?;

        let domain = Domain::unit();
        let mut graph = Self {
            width,
            height,
            interpolation,
            palette: args.palette,
            series: args.series,
            window: Window::unbounded(),
            stack: StackEngine::new(offset),
            renderers,
            update_callbacks: Vec::new(),
            surface,
            stacked_data: Vec::new(),
            domain,
            scales: Scales::new(&domain, width, height),
        };
        graph.discover_range()?;

        tracing::info!(
            width,
            height,
            renderer = %args.renderer,
            series = graph.series.len(),
            "graph initialized"
        );
        Ok(graph)
    }

    /// Initial layout: stacks the data, writes `series.stack`, and resolves
    /// domain and scales from the active renderer without drawing.
    fn discover_range(&mut self) -> Result<(), GraphError> {
        let stacked = self.stack.layout(&self.series, &self.window)?;
        let domain = active_renderer(&self.renderers)?
            .domain(&stacked)
            .map_err(GraphError::Renderer)?;
        stack::write_back(&mut self.series, &stacked);
        self.commit(stacked, domain);
        Ok(())
    }

    /// Run one render cycle, then notify update callbacks in registration order.
    pub fn render(&mut self) -> Result<(), GraphError> {
        let renderer = active_renderer(&self.renderers)?;
        let stacked = self.stack.layout(&self.series, &self.window)?;
        let domain = renderer.domain(&stacked).map_err(GraphError::Renderer)?;
        let scales = Scales::new(&domain, self.width, self.height);

        tracing::debug!(
            renderer = renderer.name(),
            layers = stacked.len(),
            points = stacked.iter().map(Vec::len).sum::<usize>(),
            x = ?domain.x,
            y = ?domain.y,
            "rendering graph"
        );

        let frame = Frame {
            stacked: &stacked,
            scales: &scales,
            series: &self.series,
            interpolation: self.interpolation,
            palette: &self.palette,
        };
        renderer.render(&frame, &mut self.surface).map_err(GraphError::Renderer)?;

        stack::write_back(&mut self.series, &stacked);
        self.commit(stacked, domain);

        for callback in &mut self.update_callbacks {
            callback();
        }
        Ok(())
    }

    /// Alias of `render`.
    pub fn update(&mut self) -> Result<(), GraphError> {
        self.render()
    }

    /// Run `callback` after every successful render. No dedup, no removal.
    pub fn on_update<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.update_callbacks.push(Box::new(callback));
    }

    /// Add or replace a renderer by name. Replacing the active one takes effect on the next render.
    pub fn register_renderer(&mut self, renderer: Box<dyn Renderer>) {
        tracing::debug!(renderer = renderer.name(), "registering renderer");
        self.renderers.register(renderer);
    }

    /// Switch the active renderer; unknown names leave the current one active.
    pub fn set_renderer(&mut self, name: &str) -> Result<(), GraphError> {
        self.renderers.set_active(name)?;
        tracing::info!(renderer = name, "renderer switched");
        Ok(())
    }

    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.renderers.active()
    }

    pub fn renderer_name(&self) -> Option<&str> {
        self.renderers.active_name()
    }

    pub fn renderers(&self) -> &RendererRegistry {
        &self.renderers
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn set_window(&mut self, window: Window) {
        self.window = window;
    }

    pub fn set_x_min(&mut self, x_min: Option<f64>) {
        self.window.x_min = x_min;
    }

    pub fn set_x_max(&mut self, x_max: Option<f64>) {
        self.window.x_max = x_max;
    }

    pub fn clear_window(&mut self) {
        self.window = Window::unbounded();
    }

    pub fn offset(&self) -> StackOffset {
        self.stack.offset()
    }

    pub fn set_offset(&mut self, offset: StackOffset) {
        self.stack.set_offset(offset);
    }

    /// Register a pre-layout transform; see `StackEngine::add_data_hook`.
    pub fn add_data_hook<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Layers) -> anyhow::Result<Layers> + 'static,
    {
        self.stack.add_data_hook(name, f);
    }

    /// Register a post-layout transform; see `StackEngine::add_after_hook`.
    pub fn add_after_hook<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[Vec<Point>]) -> anyhow::Result<StackedData> + 'static,
    {
        self.stack.add_after_hook(name, f);
    }

    pub fn stack_engine(&self) -> &StackEngine {
        &self.stack
    }

    pub fn series(&self) -> &SeriesCollection {
        &self.series
    }

    /// Mutable access for toggling or streaming data. Point counts are not re-validated.
    pub fn series_mut(&mut self) -> &mut SeriesCollection {
        &mut self.series
    }

    /// First and last x of the first series.
    pub fn data_domain(&self) -> Option<(f64, f64)> {
        let data = &self.series.get(0)?.data;
        Some((data.first()?.x, data.last()?.x))
    }

    pub fn stacked_data(&self) -> &StackedData {
        &self.stacked_data
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    fn commit(&mut self, stacked: StackedData, domain: Domain) {
        self.scales = Scales::new(&domain, self.width, self.height);
        self.domain = domain;
        self.stacked_data = stacked;
    }
}

fn active_renderer(renderers: &RendererRegistry) -> Result<&dyn Renderer, GraphError> {
    renderers
        .active()
        .ok_or_else(|| GraphError::UnknownRenderer(String::from("<none>")))
}

impl<S: Surface> fmt::Debug for Graph<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("renderer", &self.renderers.active_name())
            .field("series", &self.series.len())
            .field("window", &self.window)
            .field("domain", &self.domain)
            .field("update_callbacks", &self.update_callbacks.len())
            .finish_non_exhaustive()
    }
}
