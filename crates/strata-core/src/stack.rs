// File: crates/strata-core/src/stack.rs
// Summary: Stack engine: windowed slicing, data/after hook chains, offset-aware stack layout and write-back.
// Notes:
// - After hooks receive the filtered layers *before* stacking, not the stacked
//   result, and each one replaces the stacked data. Hooks that want the stacked
//   shape call `stack_layers` themselves.

use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;
use crate::series::{Point, SeriesCollection};
use crate::window::Window;

/// A point after stacking: `y0` is the baseline, `y` the thickness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedPoint {
    pub x: f64,
    pub y: f64,
    pub y0: f64,
}

impl StackedPoint {
    pub const fn new(x: f64, y: f64, y0: f64) -> Self {
        Self { x, y, y0 }
    }

    /// Top edge of the layer at this point.
    #[inline]
    pub fn top(&self) -> f64 {
        self.y0 + self.y
    }
}

/// Filtered per-series point sequences, one per active series.
pub type Layers = Vec<Vec<Point>>;

/// Stacked per-series point sequences, one per active series.
pub type StackedData = Vec<Vec<StackedPoint>>;

/// How stacked baselines are shifted at each x index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StackOffset {
    /// Layers sit on the cumulative sum of earlier layers, starting at 0.
    #[default]
    Zero,
    /// Each index is normalized so the stack totals 1.
    Expand,
    /// Each index is centered against the widest stack.
    Silhouette,
    /// Streamgraph baseline minimizing weighted slope changes.
    Wiggle,
}

impl StackOffset {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Expand => "expand",
            Self::Silhouette => "silhouette",
            Self::Wiggle => "wiggle",
        }
    }
}

impl fmt::Display for StackOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StackOffset {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zero" => Ok(Self::Zero),
            "expand" => Ok(Self::Expand),
            "silhouette" => Ok(Self::Silhouette),
            "wiggle" => Ok(Self::Wiggle),
            other => Err(GraphError::UnknownOffset(other.to_string())),
        }
    }
}

type DataHookFn = dyn Fn(Layers) -> anyhow::Result<Layers>;
type AfterHookFn = dyn Fn(&[Vec<Point>]) -> anyhow::Result<StackedData>;

/// A named transform stage in one of the hook chains.
pub struct Hook<F: ?Sized> {
    name: String,
    f: Box<F>,
}

impl<F: ?Sized> Hook<F> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F: ?Sized> fmt::Debug for Hook<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Layout pipeline run on every render.
#[derive(Debug, Default)]
pub struct StackEngine {
    offset: StackOffset,
    data_hooks: Vec<Hook<DataHookFn>>,
    after_hooks: Vec<Hook<AfterHookFn>>,
}

impl StackEngine {
    pub fn new(offset: StackOffset) -> Self {
        Self { offset, ..Self::default() }
    }

    pub fn offset(&self) -> StackOffset {
        self.offset
    }

    pub fn set_offset(&mut self, offset: StackOffset) {
        self.offset = offset;
    }

    /// Append a pre-layout stage. Stages run in registration order, each
    /// receiving the previous stage's output.
    pub fn add_data_hook<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(Layers) -> anyhow::Result<Layers> + 'static,
    {
        self.data_hooks.push(Hook { name: name.into(), f: Box::new(f) });
    }

    /// Append a post-layout stage. Every stage receives the filtered layers
    /// as they were before stacking; its result replaces the stacked data.
    pub fn add_after_hook<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[Vec<Point>]) -> anyhow::Result<StackedData> + 'static,
    {
        self.after_hooks.push(Hook { name: name.into(), f: Box::new(f) });
    }

    pub fn data_hooks(&self) -> impl Iterator<Item = &str> + '_ {
        self.data_hooks.iter().map(Hook::name)
    }

    pub fn after_hooks(&self) -> impl Iterator<Item = &str> + '_ {
        self.after_hooks.iter().map(Hook::name)
    }

    /// Run slicing, hooks and stacking without touching the series.
    pub fn layout(
        &self,
        series: &SeriesCollection,
        window: &Window,
    ) -> Result<StackedData, GraphError> {
        let mut data: Layers = series.active().map(|s| window.slice(&s.data)).collect();

        for hook in &self.data_hooks {
            tracing::trace!(hook = %hook.name, layers = data.len(), "running data hook");
            data = (hook.f)(data).map_err(GraphError::Hook)?;
        }

        let mut stacked = stack_layers(&data, self.offset);

        for hook in &self.after_hooks {
            tracing::trace!(hook = %hook.name, layers = data.len(), "running after hook");
            stacked = (hook.f)(&data).map_err(GraphError::Hook)?;
        }

        Ok(stacked)
    }

    /// Layout and write each layer back onto its series.
    pub fn compute(
        &self,
        series: &mut SeriesCollection,
        window: &Window,
    ) -> Result<StackedData, GraphError> {
        let stacked = self.layout(series, window)?;
        write_back(series, &stacked);
        Ok(stacked)
    }
}

/// Assign layers to enabled series in order; disabled series don't consume a slot.
pub fn write_back(series: &mut SeriesCollection, stacked: &StackedData) {
    let mut layers = stacked.iter();
    for s in series.iter_mut().filter(|s| !s.disabled) {
        s.stack = layers.next().cloned();
    }
}

/// Stack `layers` bottom to top.
///
/// Each point's `y0` is the offset baseline plus the sum of the `y` of all
/// earlier layers at the same index. Points missing from an earlier layer
/// count as 0.
pub fn stack_layers(layers: &[Vec<Point>], offset: StackOffset) -> StackedData {
    let m = layers.iter().map(Vec::len).max().unwrap_or(0);
    if layers.is_empty() || m == 0 {
        return layers.iter().map(|_| Vec::new()).collect();
    }

    let value = |i: usize, j: usize| layers[i].get(j).map_or(0.0, |p| p.y);
    let sums: Vec<f64> = (0..m).map(|j| (0..layers.len()).map(|i| value(i, j)).sum()).collect();

    let (base, scale): (Vec<f64>, Vec<f64>) = match offset {
        StackOffset::Zero => (vec![0.0; m], vec![1.0; m]),
        StackOffset::Expand => {
            let scale = sums.iter().map(|&s| if s != 0.0 { 1.0 / s } else { 1.0 }).collect();
            (vec![0.0; m], scale)
        }
        StackOffset::Silhouette => {
            let max = sums.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            (sums.iter().map(|&s| (max - s) / 2.0).collect(), vec![1.0; m])
        }
        StackOffset::Wiggle => (wiggle_baseline(layers, m), vec![1.0; m]),
    };

    let n = layers.len() as f64;
    let mut acc = base;
    layers
        .iter()
        .map(|layer| {
            layer
                .iter()
                .enumerate()
                .map(|(j, p)| {
                    let y = if offset == StackOffset::Expand && sums[j] == 0.0 {
                        1.0 / n
                    } else {
                        p.y * scale[j]
                    };
                    let sp = StackedPoint::new(p.x, y, acc[j]);
                    acc[j] += y;
                    sp
                })
                .collect()
        })
        .collect()
}

fn wiggle_baseline(layers: &[Vec<Point>], m: usize) -> Vec<f64> {
    let value = |i: usize, j: usize| layers[i].get(j).map_or(0.0, |p| p.y);
    let x = |j: usize| layers[0].get(j).map_or(0.0, |p| p.x);

    let mut y0 = vec![0.0; m];
    let mut o = 0.0;
    let mut o0 = 0.0f64;
    for j in 1..m {
        let s1: f64 = (0..layers.len()).map(|i| value(i, j)).sum();
        let dx = x(j) - x(j - 1);
        if dx != 0.0 {
            let mut s2 = 0.0;
            for i in 0..layers.len() {
                let mut s3 = (value(i, j) - value(i, j - 1)) / (2.0 * dx);
                for k in 0..i {
                    s3 += (value(k, j) - value(k, j - 1)) / dx;
                }
                s2 += s3 * value(i, j);
            }
            if s1 != 0.0 {
                o -= s2 / s1 * dx;
            }
        }
        y0[j] = o;
        o0 = o0.min(o);
    }
    for v in &mut y0 {
        *v -= o0;
    }
    y0
}
