// File: crates/strata-core/src/scale.rs
// Summary: Linear domain-to-pixel scales derived from the active renderer's domain.

use crate::domain::Domain;

/// Linear map from a numeric domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Map a domain value into the range. A zero-width domain maps to the range start.
    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }

    /// Map a range value back into the domain.
    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }
}

/// The scales handed to a renderer for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    /// `domain.x` onto `[0, width]`.
    pub x: LinearScale,
    /// `domain.y` onto `[height, 0]`; larger values sit closer to the top row.
    pub y: LinearScale,
    /// `domain.y` onto `[0, height]`, for thicknesses rather than positions.
    pub y_magnitude: LinearScale,
}

impl Scales {
    pub fn new(domain: &Domain, width: u32, height: u32) -> Self {
        let (w, h) = (f64::from(width), f64::from(height));
        Self {
            x: LinearScale::new(domain.x, (0.0, w)),
            y: LinearScale::new(domain.y, (h, 0.0)),
            y_magnitude: LinearScale::new(domain.y, (0.0, h)),
        }
    }
}
