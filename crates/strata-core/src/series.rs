// File: crates/strata-core/src/series.rs
// Summary: Point/Series model and the ordered series collection with its active view.
// Notes:
// - Insertion order of the collection is the stacking order.
// - `stack` is written by the stack engine after every successful layout.

use crate::error::ValidationError;
use crate::stack::StackedPoint;
use crate::surface::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Series {
    pub name: String,
    pub data: Vec<Point>,
    pub disabled: bool,
    /// Fill/stroke color; the graph palette assigns one when unset.
    pub color: Option<Color>,
    /// Stacked layout from the last render, if this series was enabled.
    pub stack: Option<Vec<StackedPoint>>,
}

impl Series {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_data(name: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            data: data.into_iter().map(Point::from).collect(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.data.push(Point::new(x, y));
    }
}

/// Ordered collection of series.
#[derive(Clone, Debug, Default)]
pub struct SeriesCollection {
    series: Vec<Series>,
}

impl SeriesCollection {
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn as_slice(&self) -> &[Series] {
        &self.series
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Series> {
        self.series.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Series> {
        self.series.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Series> {
        self.series.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Series> {
        self.series.get_mut(index)
    }

    pub fn push(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Series that are not disabled, in insertion order.
    pub fn active(&self) -> impl Iterator<Item = &Series> + '_ {
        self.series.iter().filter(|s| !s.disabled)
    }

    /// Pad every series with `y = 0` points at the x values it is missing,
    /// so series sampled at different positions share one x grid.
    ///
    /// The result of each series is sorted by x and every existing point is kept.
    /// An x that occurs several times in one series occurs that many times in
    /// every series afterwards. A NaN x cannot be placed on the grid, so it is
    /// rejected and the collection is left untouched.
    pub fn zero_fill(&mut self) -> Result<(), ValidationError> {
        // (x, how many times the most repetitive series has it), sorted by x
        let mut grid: Vec<(f64, usize)> = Vec::new();
        for (index, s) in self.series.iter().enumerate() {
            if let Some((point, p)) = s.data.iter().enumerate().find(|(_, p)| p.x.is_nan()) {
                return Err(ValidationError::NonNumericX { index, point, y: p.y });
            }
            let mut xs: Vec<f64> = s.data.iter().map(|p| p.x).collect();
            xs.sort_by(f64::total_cmp);
            for run in xs.chunk_by(|a, b| a == b) {
                let x = run[0];
                match grid.binary_search_by(|(g, _)| g.total_cmp(&x)) {
                    Ok(i) => grid[i].1 = grid[i].1.max(run.len()),
                    Err(i) => grid.insert(i, (x, run.len())),
                }
            }
        }

        let total = grid.iter().map(|&(_, n)| n).sum();
        for s in &mut self.series {
            let mut data = std::mem::take(&mut s.data);
            data.sort_by(|a, b| a.x.total_cmp(&b.x));
            let mut filled = Vec::with_capacity(total);
            let mut it = data.into_iter().peekable();
            for &(x, count) in &grid {
                let mut taken = 0;
                while let Some(p) = it.next_if(|p| p.x == x) {
                    filled.push(p);
                    taken += 1;
                }
                filled.extend((taken..count).map(|_| Point::new(x, 0.0)));
            }
            s.data = filled;
        }
        Ok(())
    }
}

impl From<Vec<Series>> for SeriesCollection {
    fn from(series: Vec<Series>) -> Self {
        Self::new(series)
    }
}

impl<'a> IntoIterator for &'a SeriesCollection {
    type Item = &'a Series;
    type IntoIter = std::slice::Iter<'a, Series>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}
