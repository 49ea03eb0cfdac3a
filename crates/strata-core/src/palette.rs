// File: crates/strata-core/src/palette.rs
// Summary: Background and series color rotation used when a series has no color of its own.

use crate::surface::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub name: &'static str,
    pub background: Color,
    pub series: Vec<Color>,
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::from_argb(255, 18, 18, 20),
            series: vec![
                Color::from_argb(255, 64, 160, 255),
                Color::from_argb(255, 40, 200, 120),
                Color::from_argb(255, 220, 80, 80),
                Color::from_argb(255, 255, 230, 70),
                Color::from_argb(255, 180, 120, 255),
                Color::from_argb(255, 96, 220, 220),
            ],
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::from_argb(255, 250, 250, 252),
            series: vec![
                Color::from_argb(255, 32, 120, 200),
                Color::from_argb(255, 20, 160, 90),
                Color::from_argb(255, 200, 60, 60),
                Color::from_argb(255, 230, 150, 20),
                Color::from_argb(255, 120, 70, 200),
                Color::from_argb(255, 30, 150, 160),
            ],
        }
    }

    pub fn solarized() -> Self {
        Self {
            name: "solarized",
            background: Color::from_argb(255, 0x00, 0x2b, 0x36), // base03
            series: vec![
                Color::from_argb(255, 0x26, 0x8b, 0xd2), // blue
                Color::from_argb(255, 0x2a, 0xa1, 0x98), // cyan
                Color::from_argb(255, 0x85, 0x99, 0x00), // green
                Color::from_argb(255, 0xb5, 0x89, 0x00), // yellow
                Color::from_argb(255, 0xcb, 0x4b, 0x16), // orange
                Color::from_argb(255, 0xdc, 0x32, 0x2f), // red
                Color::from_argb(255, 0x6c, 0x71, 0xc4), // violet
            ],
        }
    }

    /// Color for the `index`-th series, wrapping around.
    pub fn color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::from_rgb(128, 128, 128);
        }
        self.series[index % self.series.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

/// Built-in presets.
pub fn presets() -> Vec<Palette> {
    vec![Palette::dark(), Palette::light(), Palette::solarized()]
}
