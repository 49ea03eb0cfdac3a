// File: crates/strata-core/src/types.rs
// Summary: Shared defaults for graph construction.

/// Surface width in pixels when neither the caller nor the host provides one.
pub const DEFAULT_WIDTH: u32 = 400;
/// Surface height in pixels when neither the caller nor the host provides one.
pub const DEFAULT_HEIGHT: u32 = 250;

/// Renderer activated when the caller does not name one.
pub const DEFAULT_RENDERER: &str = "stack";
/// Default polyline interpolation.
pub const DEFAULT_INTERPOLATION: &str = "cardinal";
/// Default stack offset policy.
pub const DEFAULT_OFFSET: &str = "zero";
