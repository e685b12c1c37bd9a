//! Load/save operations and image export for editor state.

use std::path::Path;

use anyhow::Context;

use super::EditorState;
use crate::font_manager::FontMetrics;
use crate::raster::{rasterize, scaled_size, RasterOptions, RasterSurface};
use crate::renderer::{render_document, RenderOptions};
use crate::serialization::{decode, encode};
use crate::svg_renderer::SvgSurface;
use sketchkit_core::{ParseError, RenderError};

impl EditorState {
    /// Replaces the document with decoded `text`. The canvas size resets to
    /// its default unless the text carries one. Selection, pending input and
    /// undo history are cleared. A malformed record keeps every shape read
    /// before it and returns the error.
    pub fn load_data(&mut self, text: &str) -> Option<ParseError> {
        let decoded = decode(text);
        self.cancel();
        self.selection.clear();
        self.history.clear();
        self.canvas.load_document(decoded.document);
        tracing::debug!(
            "Loaded {} shape(s), canvas {}x{}",
            self.canvas.shape_count(),
            self.canvas.meta().width,
            self.canvas.meta().height
        );
        decoded.error
    }

    /// The document in its serialized form.
    pub fn data(&self) -> String {
        encode(&self.canvas.to_document())
    }

    /// Rasterizes the current document at the editor scale.
    pub fn render_image(&self, font: FontMetrics) -> Result<RasterSurface, RenderError> {
        let options = RasterOptions {
            render: RenderOptions {
                scale: self.config.scale,
            },
            font,
            ..Default::default()
        };
        rasterize(&self.canvas.to_document(), &options)
    }

    /// Writes the current document as a PNG.
    pub fn save_as_image(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let png = self
            .render_image(FontMetrics::system())
            .and_then(|surface| surface.encode_png())
            .context("Failed to render sketch")?;
        std::fs::write(path, png)
            .with_context(|| format!("Failed to write image: {}", path.display()))?;
        Ok(())
    }

    /// The current document as standalone SVG markup.
    pub fn to_svg(&self) -> String {
        let doc = self.canvas.to_document();
        let scale = self.config.scale;
        let (width, height) = scaled_size(&doc, scale);
        let mut svg = SvgSurface::new(width, height);
        render_document(&mut svg, &doc, &RenderOptions { scale });
        svg.finish()
    }

    pub fn save_svg(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_svg())
            .with_context(|| format!("Failed to write SVG: {}", path.display()))?;
        Ok(())
    }
}
