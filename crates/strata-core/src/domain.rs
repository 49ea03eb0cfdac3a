// File: crates/strata-core/src/domain.rs
// Summary: Domain type and the extent policies shared by the built-in renderers.
// Notes:
// - The graph never computes a domain itself; it asks the active renderer,
//   which usually delegates to one of the helpers here.

use crate::stack::StackedData;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Domain {
    pub const fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Fallback when there is nothing to measure.
    pub const fn unit() -> Self {
        Self { x: (0.0, 1.0), y: (0.0, 1.0) }
    }

    pub fn is_finite(&self) -> bool {
        self.x.0.is_finite() && self.x.1.is_finite() && self.y.0.is_finite() && self.y.1.is_finite()
    }

    /// Replace non-finite domains with `Domain::unit()`.
    pub fn or_unit(self) -> Self {
        if self.is_finite() {
            self
        } else {
            Self::unit()
        }
    }

    /// Grow each extent by a fraction of its span.
    pub fn padded(self, padding: &Padding) -> Self {
        let xs = self.x.1 - self.x.0;
        let ys = self.y.1 - self.y.0;
        Self {
            x: (self.x.0 - xs * padding.left, self.x.1 + xs * padding.right),
            y: (self.y.0 - ys * padding.bottom, self.y.1 + ys * padding.top),
        }
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::unit()
    }
}

/// Fractional padding around a renderer's data extent.
/// Contract: all fields are non-negative fractions of the span.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Padding {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }

    pub const fn none() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// First and last x of the first layer, if it has any points.
pub fn x_extent(stacked: &StackedData) -> Option<(f64, f64)> {
    let first = stacked.first()?;
    Some((first.first()?.x, first.last()?.x))
}

/// x from the first layer, y from 0 to the highest top edge of the last layer.
pub fn stacked_domain(stacked: &StackedData) -> Domain {
    let Some(x) = x_extent(stacked) else { return Domain::unit() };
    let y_max = stacked
        .last()
        .into_iter()
        .flatten()
        .map(|p| p.top())
        .fold(f64::NEG_INFINITY, f64::max);
    if !y_max.is_finite() {
        return Domain::unit();
    }
    Domain::new(x, (0.0, y_max)).or_unit()
}

/// x from the first layer, y over every layer's own values, ignoring baselines.
/// The lower bound never rises above 0.
pub fn unstacked_domain(stacked: &StackedData) -> Domain {
    let Some(x) = x_extent(stacked) else { return Domain::unit() };
    let mut y_min = 0.0f64;
    let mut y_max = f64::NEG_INFINITY;
    for p in stacked.iter().flatten() {
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    if !y_max.is_finite() {
        return Domain::unit();
    }
    Domain::new(x, (y_min, y_max)).or_unit()
}

/// Most common gap between consecutive x values of the first layer.
/// Ties go to the smaller gap.
pub fn frequent_interval(stacked: &StackedData) -> Option<f64> {
    let first = stacked.first()?;
    let mut gaps: Vec<f64> = first.windows(2).map(|w| w[1].x - w[0].x).collect();
    if gaps.is_empty() {
        return None;
    }
    gaps.sort_by(f64::total_cmp);

    let mut best = (gaps[0], 0usize);
    let mut run = (gaps[0], 0usize);
    for &g in &gaps {
        if g == run.0 {
            run.1 += 1;
        } else {
            run = (g, 1);
        }
        if run.1 > best.1 {
            best = run;
        }
    }
    Some(best.0)
}
