//! # SketchKit
//!
//! Toolkit for small annotated diagrams: lines, arrows, boxes, icons, text
//! and Bezier paths stored in a compact record-per-line document format.
//!
//! ## Architecture
//!
//! SketchKit is organized as a workspace with multiple crates:
//!
//! 1. **sketchkit-core** - Geometry kernel and error taxonomy
//! 2. **sketchkit-designer** - Shape model, codec, renderers, editor engine
//! 3. **sketchkit-settings** - Configuration files and validation
//! 4. **sketchkit** - Command line front end (`render`, `svg`, `check`)

pub mod cli;

pub use sketchkit_core::{Bounds, Error, ParseError, Point, RenderError, Result, StorageError};
pub use sketchkit_designer as designer;
pub use sketchkit_designer::{
    Document, EditorConfig, EditorState, HostCallbacks, RasterOptions, Shape, ShapeType,
    SketchEditor,
};
pub use sketchkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Pretty console output on stderr, filtered by `RUST_LOG` (default `info`).
/// Calling it twice is an error.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
