//! # SketchKit Core
//!
//! Core types and utilities for SketchKit.
//! Provides the geometry kernel every renderer and the editor build on,
//! the error taxonomy, and callback aliases for host integration.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, ParseError, RenderError, Result, StorageError};

pub use geometry::{
    cubic_point, cubic_segments, flatten_cubic, flatten_quadratic, perpendicular_offsets,
    quadratic_point, quadratic_segments, rotated_offsets, snap_to_grid, Bounds, Point,
    MAX_SUBDIVISIONS,
};

// Re-export type aliases for convenience
pub use types::{Callback, DataCallback};
