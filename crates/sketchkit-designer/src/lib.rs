//! # SketchKit Designer
//!
//! This crate provides the annotated-diagram editor: the shape model, the
//! compact document format, one rendering engine with raster and SVG
//! backends, and the interactive manipulation engine behind an embeddable
//! editor facade.
//!
//! ## Core Components
//!
//! ### Document
//! - **Model**: sixteen shape types (lines, arrows, arcs, boxes, ellipses,
//!   icons, text, Bezier paths) with a shared color palette and width classes
//! - **Serialization**: one record per line, sparse defaults, forgiving reads
//!
//! ### Rendering
//! - **Renderer**: per-shape drawing routines written once against [`Surface`]
//! - **Raster**: `tiny-skia` pixmap backend and the text-to-PNG rasterizer
//! - **SVG**: vector backend for live views and export
//!
//! ### Editing
//! - **Canvas**: hit-testing, box selection, move, 8-handle resize, path points
//! - **Commands/History**: every mutation snapshots for undo (no redo)
//! - **Designer state**: tools, gestures, grid snapping and host callbacks
//!
//! ## Architecture
//!
//! ```text
//! SketchEditor (host facade, callbacks, local store)
//!   └── EditorState (tool, gesture, selection, history)
//!         └── Canvas (shapes in paint order)
//!
//! serialization <-> Document -> renderer -> RasterSurface | SvgSurface
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sketchkit_designer::raster::{rasterize_text, RasterOptions};
//!
//! let png = rasterize_text(&text, &RasterOptions::default()).into_bytes();
//! ```

pub mod canvas;
pub mod commands;
pub mod designer_state;
pub mod font_manager;
pub mod history;
pub mod local_store;
pub mod model;
pub mod path_data;
pub mod raster;
pub mod renderer;
pub mod selection_manager;
pub mod serialization;
pub mod svg_renderer;

pub use canvas::{Canvas, DrawingObject, PointRef, PointRole, ResizeHandle, Tool};
pub use commands::EditCommand;
pub use designer_state::{
    render_canvas, EditOutcome, EditorConfig, EditorState, HostCallbacks, Modifiers,
    SketchEditor, TextTarget,
};
pub use font_manager::FontMetrics;
pub use history::UndoHistory;
pub use local_store::LocalStore;
pub use model::{
    CanvasMeta, Document, PathArrows, Rgb, Segment, Shape, ShapeColor, ShapeKind, ShapeType,
    StrokeWidth, TextMetrics, Vertex,
};
pub use raster::{rasterize, rasterize_text, RasterOptions, RasterOutput, RasterSurface};
pub use renderer::{render_document, render_shape, RenderOptions, Surface};
pub use selection_manager::SelectionManager;
pub use serialization::{decode, decode_strict, encode, Decoded};
pub use svg_renderer::SvgSurface;

// Re-export core types
pub use sketchkit_core::{Bounds, Point};
