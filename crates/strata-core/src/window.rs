// File: crates/strata-core/src/window.rs
// Summary: Optional x-range window deciding which points are visible.

use crate::series::Point;

/// Visible x-range. Both bounds are exclusive; an unset bound does not clip.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Window {
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
}

impl Window {
    pub const fn new(x_min: Option<f64>, x_max: Option<f64>) -> Self {
        Self { x_min, x_max }
    }

    /// Window with no bounds; every point is visible.
    pub const fn unbounded() -> Self {
        Self { x_min: None, x_max: None }
    }

    pub fn is_unbounded(&self) -> bool {
        self.x_min.is_none() && self.x_max.is_none()
    }

    /// Points with `x <= x_min` or `x >= x_max` are hidden.
    #[inline]
    pub fn is_visible(&self, p: &Point) -> bool {
        if let Some(min) = self.x_min {
            if p.x <= min {
                return false;
            }
        }
        if let Some(max) = self.x_max {
            if p.x >= max {
                return false;
            }
        }
        true
    }

    /// Visible points of `data`, in order.
    pub fn slice(&self, data: &[Point]) -> Vec<Point> {
        if self.is_unbounded() {
            return data.to_vec();
        }
        data.iter().filter(|p| self.is_visible(p)).copied().collect()
    }
}
