// File: crates/strata-core/src/validate.rs
// Summary: Structural checks on input series before a graph is built.

use crate::error::ValidationError;
use crate::series::Series;

/// Check that series can be stacked together.
///
/// Contract:
/// - every non-empty series has the same point count as the first non-empty one;
/// - the first point of every non-empty series has numeric (non-NaN) x and y.
///
/// Only point 0 is sampled for the numeric check. Empty series are skipped.
pub fn validate(series: &[Series]) -> Result<(), ValidationError> {
    let mut points_count: Option<usize> = None;

    for (index, s) in series.iter().enumerate() {
        let Some(first) = s.data.first() else { continue };

        let expected = *points_count.get_or_insert(s.data.len());
        if s.data.len() != expected {
            return Err(ValidationError::DifferingPointCounts {
                index,
                expected,
                found: s.data.len(),
            });
        }

        if first.x.is_nan() || first.y.is_nan() {
            return Err(ValidationError::NonNumericPoint { index, x: first.x, y: first.y });
        }
    }
    Ok(())
}
